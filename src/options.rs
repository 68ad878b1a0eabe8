// ── Fullscreen options ────────────────────────────────────────────────────────
//
// The host can only pass one string (or one integer), so the options for a
// fullscreen toggle arrive in one of three encodings:
//
//   • free text containing the tokens `enable`, `always on top` and
//     optionally `window=<id>` (what the Vim plugin sends);
//   • a JSON object, recognised by a leading `{`;
//   • integer bit flags via `fullscreen_flags` (bit 0 enable, bit 1 topmost).
//
// No Win32 imports; parsing is pure and fully unit-tested.

use serde::Deserialize;

use crate::{
    error::{Result, ShellError},
    fullscreen::WindowId,
};

/// Parameters for a single fullscreen toggle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FullscreenOptions {
    pub enable: bool,
    pub always_on_top: bool,
    /// Explicit target; `None` means "the current foreground window".
    pub window: Option<WindowId>,
}

const FLAG_ENABLE: i32 = 0b01;
const FLAG_ALWAYS_ON_TOP: i32 = 0b10;

impl FullscreenOptions {
    /// Decode the string argument of the `fullscreen` entry point.
    pub fn parse(text: &str) -> Result<Self> {
        let trimmed = text.trim_start();
        if trimmed.starts_with('{') {
            return serde_json::from_str(trimmed)
                .map_err(|e| ShellError::InvalidArgument(format!("fullscreen options: {e}")));
        }

        Ok(Self {
            enable: text.contains("enable"),
            always_on_top: text.contains("always on top"),
            window: window_token(text)?,
        })
    }

    /// Decode the integer argument of the `fullscreen_flags` entry point.
    pub fn from_flags(flags: i32) -> Self {
        Self {
            enable: flags & FLAG_ENABLE != 0,
            always_on_top: flags & FLAG_ALWAYS_ON_TOP != 0,
            window: None,
        }
    }
}

/// Find a `window=<id>` token; the id is decimal or `0x`-prefixed hex.
fn window_token(text: &str) -> Result<Option<WindowId>> {
    let Some(raw) = text
        .split_whitespace()
        .find_map(|token| token.strip_prefix("window="))
    else {
        return Ok(None);
    };

    let parsed = match raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        Some(hex) => isize::from_str_radix(hex, 16),
        None => raw.parse::<isize>(),
    };

    parsed
        .map_err(|_| ShellError::InvalidArgument(format!("bad window id {raw:?}")))
        .and_then(WindowId::try_from)
        .map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_tokens() {
        let o = FullscreenOptions::parse("enable always on top").expect("parse");
        assert!(o.enable);
        assert!(o.always_on_top);
        assert_eq!(o.window, None);
    }

    #[test]
    fn missing_enable_means_disable() {
        let o = FullscreenOptions::parse("always on top").expect("parse");
        assert!(!o.enable);
        assert!(o.always_on_top);

        assert_eq!(FullscreenOptions::parse("").expect("parse"), FullscreenOptions::default());
    }

    /// Tokens are substring-matched, so separators are irrelevant.
    #[test]
    fn tokens_are_substring_matched() {
        let o = FullscreenOptions::parse("enable,always on top").expect("parse");
        assert!(o.enable && o.always_on_top);
        assert!(!FullscreenOptions::parse("disable").expect("parse").enable);
    }

    #[test]
    fn window_token_decimal_and_hex() {
        let o = FullscreenOptions::parse("enable window=1234").expect("parse");
        assert_eq!(o.window, Some(WindowId(1234)));

        let o = FullscreenOptions::parse("window=0x1F0A").expect("parse");
        assert_eq!(o.window, Some(WindowId(0x1F0A)));
        assert!(!o.enable);
    }

    #[test]
    fn bad_window_token_is_rejected() {
        assert!(FullscreenOptions::parse("enable window=abc").is_err());
        assert!(FullscreenOptions::parse("enable window=0").is_err());
    }

    #[test]
    fn json_options() {
        let o = FullscreenOptions::parse(r#"{"enable": true, "window": 42}"#).expect("parse");
        assert!(o.enable);
        assert!(!o.always_on_top);
        assert_eq!(o.window, Some(WindowId(42)));
    }

    #[test]
    fn json_defaults_and_errors() {
        assert_eq!(
            FullscreenOptions::parse("  {}").expect("parse"),
            FullscreenOptions::default()
        );
        assert!(matches!(
            FullscreenOptions::parse("{\"enable\": 1}"),
            Err(ShellError::InvalidArgument(_))
        ));
        assert!(FullscreenOptions::parse("{\"fullscreen\": true}").is_err());
    }

    #[test]
    fn null_window_is_rejected_in_both_encodings() {
        for text in ["enable window=0", r#"{"enable": true, "window": 0}"#] {
            assert!(
                matches!(FullscreenOptions::parse(text), Err(ShellError::InvalidArgument(_))),
                "{text}"
            );
        }
    }

    #[test]
    fn integer_flags() {
        assert_eq!(FullscreenOptions::from_flags(0), FullscreenOptions::default());
        assert!(FullscreenOptions::from_flags(1).enable);
        assert!(!FullscreenOptions::from_flags(1).always_on_top);
        let both = FullscreenOptions::from_flags(3);
        assert!(both.enable && both.always_on_top);
    }
}
