use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use std::env;
use std::path::{Path, PathBuf};

pub mod models;
pub use models::*;

/// Loads the application configuration.
///
/// Sources are layered in order: `config/default`, `config/{RUN_ENV}`
/// (both optional files), then environment variables with the
/// `COURTBOOK` prefix and `__` as section separator, e.g.
/// `COURTBOOK_SERVER__PORT=8086`. `RUN_ENV` defaults to `debug`,
/// the prefix can be swapped via `PREFIX`.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());
    let prefix = env::var("PREFIX").unwrap_or_else(|_| "COURTBOOK".to_string());

    let config_dir = resolve_config_dir();
    let default_path = config_dir.join("default");
    let env_path = config_dir.join(&run_env);

    tracing::debug!(
        default = %default_path.display(),
        env_layer = %env_path.display(),
        "loading configuration"
    );

    let builder = Config::builder()
        .add_source(File::with_name(&default_path.to_string_lossy()).required(false))
        .add_source(File::with_name(&env_path.to_string_lossy()).required(false))
        .add_source(Environment::with_prefix(&prefix).separator("__"));

    builder.build()?.try_deserialize()
}

/// Directory holding the layered config files.
///
/// `COURTBOOK_CONFIG_DIR` overrides. Under cargo the files live at the
/// workspace root, two levels above this crate's manifest; outside cargo
/// the working directory is used.
fn resolve_config_dir() -> PathBuf {
    if let Ok(dir) = env::var("COURTBOOK_CONFIG_DIR") {
        return PathBuf::from(dir);
    }
    let root = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => {
            let manifest_dir = PathBuf::from(dir);
            manifest_dir
                .ancestors()
                .nth(2) // crates/courtbook_config -> workspace root
                .map(Path::to_path_buf)
                .unwrap_or(manifest_dir)
        }
        Err(_) => PathBuf::from("."),
    };
    root.join("config")
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Ensures the dotenv file is loaded into the environment exactly once.
///
/// `DOTENV_OVERRIDE` or a leading `.env*` command line argument selects
/// the file, otherwise `.env` in the working directory is tried. A
/// missing file is not an error.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path_override = std::env::var("DOTENV_OVERRIDE").ok();
    let dotenv_path_arg = env::args().nth(1).filter(|s| s.starts_with(".env"));

    let dotenv_path = dotenv_path_override
        .or(dotenv_path_arg)
        .unwrap_or_else(|| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}
