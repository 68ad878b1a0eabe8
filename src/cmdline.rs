// ── Command-line splitting ────────────────────────────────────────────────────
//
// The host hands us one flat command line, written for `CreateProcess`.
// Platforms without `CreateProcess` need argv, so this splits the string the
// way `CommandLineToArgvW` does.  Pure Rust, no platform imports.

use std::iter::{repeat, Peekable};
use std::str::Chars;

fn is_blank(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// Split `line` into program + arguments.
///
/// The program name is special-cased like Windows does: quotes only group,
/// backslashes are literal.  For the remaining arguments:
///
/// * `2n` backslashes + `"` → `n` backslashes, quote toggles grouping;
/// * `2n+1` backslashes + `"` → `n` backslashes and a literal `"`;
/// * backslashes not followed by `"` are literal;
/// * `""` inside a quoted region is a literal `"`.
pub fn split(line: &str) -> Vec<String> {
    let mut chars = line.trim_start().chars().peekable();
    if chars.peek().is_none() {
        return Vec::new();
    }

    let mut args = vec![program_name(&mut chars)];

    loop {
        while chars.peek().copied().is_some_and(is_blank) {
            chars.next();
        }
        if chars.peek().is_none() {
            break;
        }
        args.push(argument(&mut chars));
    }

    args
}

fn program_name(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut name = String::new();
    let mut quoted = false;
    for c in chars.by_ref() {
        match c {
            '"' => quoted = !quoted,
            c if is_blank(c) && !quoted => break,
            c => name.push(c),
        }
    }
    name
}

fn argument(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut arg = String::new();
    let mut quoted = false;

    while let Some(&c) = chars.peek() {
        match c {
            '\\' => {
                let mut run = 0;
                while chars.peek() == Some(&'\\') {
                    chars.next();
                    run += 1;
                }
                if chars.peek() == Some(&'"') {
                    arg.extend(repeat('\\').take(run / 2));
                    if run % 2 == 1 {
                        chars.next();
                        arg.push('"');
                    }
                } else {
                    arg.extend(repeat('\\').take(run));
                }
            }
            '"' => {
                chars.next();
                if quoted && chars.peek() == Some(&'"') {
                    chars.next();
                    arg.push('"');
                } else {
                    quoted = !quoted;
                }
            }
            c if is_blank(c) && !quoted => break,
            c => {
                chars.next();
                arg.push(c);
            }
        }
    }

    arg
}
