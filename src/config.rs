use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub serving: ServingConfig,
    pub logging: LoggingConfig,
    pub startup: StartupConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServingConfig {
    /// Serving root. When unset, the directory containing the executable is
    /// used, matching the "serve the app next to the binary" deployment.
    pub root: Option<String>,
    pub index_files: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub access_log: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StartupConfig {
    pub open_browser: bool,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("soundboard").required(false))
            .add_source(config::Environment::with_prefix("SOUNDBOARD"))
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default(
                "serving.index_files",
                vec!["index.html".to_string(), "index.htm".to_string()],
            )?
            .set_default("logging.access_log", true)?
            .set_default("startup.open_browser", true)?
            .build()?;

        settings.try_deserialize()
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid listen address: {e}"))
    }

    /// Resolve the serving root to a canonical absolute path.
    pub fn resolve_root(&self) -> std::io::Result<PathBuf> {
        let root = match &self.serving.root {
            Some(dir) => PathBuf::from(dir),
            None => match std::env::current_exe()?.parent() {
                Some(dir) => dir.to_path_buf(),
                None => std::env::current_dir()?,
            },
        };
        root.canonicalize()
    }
}

/// Per-server state shared by all request handlers.
///
/// Scoped to a `Server` instance rather than process-wide, so tests can run
/// several independent servers with different roots in one process.
#[derive(Debug)]
pub struct ServerState {
    pub root: PathBuf,
    pub index_files: Vec<String>,
    pub access_log: bool,
}

impl ServerState {
    pub fn new(config: &Config, root: PathBuf) -> Self {
        Self {
            root,
            index_files: config.serving.index_files.clone(),
            access_log: config.logging.access_log,
        }
    }
}
