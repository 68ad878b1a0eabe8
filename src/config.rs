// ── Configuration & logging ───────────────────────────────────────────────────
//
// A DLL loaded into an editor has no command line and no config file of its
// own, so everything comes from the environment the host was started with.
// Logging is off unless `VIM_SHELL_LOG` is set.

use std::{
    fs::OpenOptions,
    path::PathBuf,
    sync::{Mutex, Once},
};

use tracing_subscriber::EnvFilter;

/// Filter directive, e.g. `debug` or `shell=trace`.
pub const LOG_ENV: &str = "VIM_SHELL_LOG";

/// Optional log file; stderr is used when unset.
pub const LOG_FILE_ENV: &str = "VIM_SHELL_LOG_FILE";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub log_filter: Option<String>,
    pub log_file: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v: &String| !v.trim().is_empty());
        Self {
            log_filter: non_empty(LOG_ENV),
            log_file: non_empty(LOG_FILE_ENV).map(PathBuf::from),
        }
    }
}

static INIT: Once = Once::new();

/// Install the tracing subscriber on first use.  Safe to call from every
/// entry point; only the first call does any work.
pub fn init_logging() {
    INIT.call_once(|| install(&Config::from_env()));
}

fn install(config: &Config) {
    let Some(filter) = config.log_filter.as_deref() else {
        return;
    };
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));

    let file = config.log_file.as_ref().and_then(|path| {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .ok()
    });

    // try_init: the host (or a test harness) may already own the global
    // subscriber, in which case we keep quiet.
    let _ = match file {
        Some(file) => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .try_init(),
        None => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init(),
    };
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_disables_logging() {
        assert_eq!(Config::from_lookup(lookup(&[])), Config::default());
    }

    #[test]
    fn reads_filter_and_file() {
        let config = Config::from_lookup(lookup(&[
            (LOG_ENV, "debug"),
            (LOG_FILE_ENV, "/tmp/vim-shell.log"),
        ]));
        assert_eq!(config.log_filter.as_deref(), Some("debug"));
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/vim-shell.log")));
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = Config::from_lookup(lookup(&[(LOG_ENV, "  "), (LOG_FILE_ENV, "")]));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn init_is_idempotent() {
        init_logging();
        init_logging();
    }
}
