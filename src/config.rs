// config.rs - runtime configuration: defaults, optional JSON file, dev-mode flag
use crate::error::{Error, Result};
use crate::series::{Series, SeriesSet};
use crate::settings;
use log::LevelFilter;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 900.0,
            height: 670.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub tick_period_ms: u64,
    pub min_timeframe_secs: u32,
    pub max_timeframe_secs: u32,
    pub timeframe_step_secs: u32,
    pub initial_timeframe_secs: u32,
    pub min_window_secs: f64,
    pub initial_window_secs: f64,
    pub backfill: bool,
    pub series: SeriesSet,
    pub window: WindowConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_period_ms: 2_000,
            min_timeframe_secs: 300,
            max_timeframe_secs: 1_800,
            timeframe_step_secs: 300,
            initial_timeframe_secs: 300,
            min_window_secs: 30.0,
            initial_window_secs: 60.0,
            backfill: true,
            series: SeriesSet::default(),
            window: WindowConfig::default(),
        }
    }
}

impl Config {
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_period_ms)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Reads the file named by `MUNINN_CONFIG`, or falls back to defaults.
    pub fn from_env() -> Result<Self> {
        match std::env::var_os(settings::CONFIG_ENV_VAR) {
            Some(path) => {
                log::info!("Loading config from {}", Path::new(&path).display());
                Self::load(path)
            }
            None => {
                log::info!("Using default config");
                Ok(Self::default())
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.tick_period_ms == 0 {
            return Err(Error::InvalidConfig("tick_period_ms must be positive".into()));
        }
        if self.min_timeframe_secs == 0 || self.min_timeframe_secs > self.max_timeframe_secs {
            return Err(Error::InvalidConfig(format!(
                "timeframe bounds [{}, {}] are empty",
                self.min_timeframe_secs, self.max_timeframe_secs
            )));
        }
        if self.timeframe_step_secs == 0 {
            return Err(Error::InvalidConfig("timeframe_step_secs must be positive".into()));
        }
        if !(self.min_window_secs > 0.0 && self.min_window_secs < self.min_timeframe_secs as f64) {
            return Err(Error::InvalidConfig(format!(
                "min_window_secs {} must be in (0, {})",
                self.min_window_secs, self.min_timeframe_secs
            )));
        }
        if !(self.window.width > 0.0 && self.window.height > 0.0) {
            return Err(Error::InvalidConfig("window size must be positive".into()));
        }
        for series in Series::ALL {
            let params = self.series.get(series);
            if !(params.ceiling > 0.0) || !(params.period_ms > 0.0) {
                return Err(Error::InvalidConfig(format!(
                    "{} needs a positive ceiling and period",
                    series
                )));
            }
        }
        Ok(())
    }
}

/// Deployment mode picked by the `MUNINN_DEV` flag at launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Development,
    Packaged,
}

impl Mode {
    pub fn from_env() -> Self {
        Self::from_flag(std::env::var(settings::DEV_ENV_VAR).ok().as_deref())
    }

    pub fn from_flag(flag: Option<&str>) -> Self {
        match flag.map(|v| v.trim().to_ascii_lowercase()) {
            Some(v) if matches!(v.as_str(), "1" | "true" | "yes" | "on") => Mode::Development,
            _ => Mode::Packaged,
        }
    }

    pub fn is_dev(self) -> bool {
        self == Mode::Development
    }

    pub fn default_log_level(self) -> LevelFilter {
        match self {
            Mode::Development => LevelFilter::Debug,
            Mode::Packaged => LevelFilter::Info,
        }
    }
}
