use std::path::PathBuf;

use anyhow::Context;
use serde::Deserialize;

const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:4221";
const DEFAULT_MAX_CONNECTIONS: usize = 1024;

/// Server configuration, fixed at startup and shared read-only by all workers.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Address the accept loop binds to.
    pub listen_addr: String,
    /// Base directory for all `/files` operations.
    pub root_dir: PathBuf,
    /// Upper bound on concurrently served connections.
    pub max_connections: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            root_dir: PathBuf::from("."),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

impl Config {
    /// Loads configuration from the process environment and command line.
    ///
    /// Layering, lowest to highest precedence: built-in defaults, the YAML
    /// file named by `--config`, the `LISTEN` environment variable, then the
    /// remaining command-line flags.
    pub fn load() -> anyhow::Result<Self> {
        Self::from_args(std::env::args().skip(1))
    }

    pub fn from_args(args: impl IntoIterator<Item = String>) -> anyhow::Result<Self> {
        let mut config_file = None;
        let mut directory = None;
        let mut listen = None;
        let mut max_connections = None;

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => config_file = Some(flag_value(&mut args, "--config")?),
                "--directory" => directory = Some(flag_value(&mut args, "--directory")?),
                "--listen" => listen = Some(flag_value(&mut args, "--listen")?),
                "--max-connections" => {
                    max_connections = Some(flag_value(&mut args, "--max-connections")?)
                }
                other => anyhow::bail!("unknown argument: {other}"),
            }
        }

        let mut cfg = match config_file {
            Some(path) => {
                let text = std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read config file {path}"))?;
                serde_yaml::from_str(&text)
                    .with_context(|| format!("failed to parse config file {path}"))?
            }
            None => Config::default(),
        };

        if let Ok(addr) = std::env::var("LISTEN") {
            cfg.listen_addr = addr;
        }
        if let Some(dir) = directory {
            cfg.root_dir = PathBuf::from(dir);
        }
        if let Some(addr) = listen {
            cfg.listen_addr = addr;
        }
        if let Some(n) = max_connections {
            cfg.max_connections = n
                .parse()
                .with_context(|| format!("invalid --max-connections value: {n}"))?;
        }

        Ok(cfg)
    }
}

fn flag_value(args: &mut impl Iterator<Item = String>, flag: &str) -> anyhow::Result<String> {
    args.next()
        .with_context(|| format!("{flag} requires a value"))
}
