pub mod build_info;

use std::{env, path::PathBuf, sync::Once};

use dirs::home_dir;

const DEFAULT_DIR_NAME: &str = ".roomshare";
/// Directory under the app data dir that holds session backups.
pub const BACKUP_DIR: &str = "backups";

/// Overrides the application data directory when set.
pub const HOME_ENV: &str = "ROOMSHARE_HOME";

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber.
///
/// `RUST_LOG` wins when present; otherwise roomshare crates log at `info`.
/// Events go to stderr so script output stays clean.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("roomshare=info"));

        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}

/// Returns the application-specific data directory, defaulting to `~/.roomshare`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}
