use std::path::{Path, PathBuf};

use linkarm_core::robot::ChainConfig;

#[derive(Clone, Debug, serde_derive::Deserialize, PartialEq)]
pub struct ViewportConfig {
    /// Display surface width.
    pub width: f32,
    /// Display surface height.
    pub height: f32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 400.0,
            height: 400.0,
        }
    }
}

#[derive(Clone, Debug, serde_derive::Deserialize, PartialEq)]
pub struct Config {
    /// Kinematic chain.
    pub chain: ChainConfig,
    /// Display surface.
    #[serde(default)]
    pub viewport: ViewportConfig,
    /// Tick interval in milliseconds.
    #[serde(default = "Config::default_tick_interval")]
    pub tick_interval: u64,
    /// Angle program.
    pub program: Option<PathBuf>,
}

impl Config {
    fn default_tick_interval() -> u64 {
        100
    }

    /// Reject values the driver cannot run with.
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.tick_interval > 0, "tick_interval must be non-zero");

        Ok(())
    }

    #[inline]
    pub fn tick_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.tick_interval)
    }
}

impl std::str::FromStr for Config {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let config: Config = toml::from_str(s)?;
        config.validate()?;

        Ok(config)
    }
}

/// Read the configuration from a TOML file.
pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Config> {
    let path = path.as_ref();

    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("{}: {}", path.display(), e))?;

    contents
        .parse()
        .map_err(|e| anyhow::anyhow!("{}: {}", path.display(), e))
}
