//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`WHORL_SECTION__KEY`)

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use whorl_render::BackendSettings;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Window configuration
    #[serde(default)]
    pub window: WindowConfig,
    /// Simulation configuration
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Rendering configuration
    #[serde(default)]
    pub rendering: RenderingConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            simulation: SimulationConfig::default(),
            rendering: RenderingConfig::default(),
            debug: DebugConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`WHORL_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        // Load default config (required)
        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        // Load user config (optional)
        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // Environment variables override everything
        // WHORL_WINDOW__TITLE=Test -> window.title = "Test"
        figment = figment.merge(Env::prefixed("WHORL_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Window width in pixels
    pub width: u32,
    /// Window height in pixels
    pub height: u32,
    /// Start in fullscreen mode
    pub fullscreen: bool,
    /// Enable VSync
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Whorl".to_string(),
            width: 1280,
            height: 720,
            fullscreen: false,
            vsync: true,
        }
    }
}

/// Simulation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of animated points
    pub point_count: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            point_count: 100_000,
        }
    }
}

/// Rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderingConfig {
    /// Background color [r, g, b, a] in [0, 1]
    pub background_color: [f32; 4],
    /// Circle radius in pixels for the vector and raster variants
    pub point_radius: f32,
    /// Fill color for the vector variant [r, g, b, a] as bytes
    pub vector_color: [u8; 4],
    /// Fill color for the raster variant
    pub raster_color: [u8; 4],
    /// Fill color for the accelerated variant
    pub accelerated_color: [u8; 4],
    /// Accelerated variant: multiplier on the base point radius
    pub radius_scale: f32,
    /// Accelerated variant: minimum on-screen radius in pixels
    pub radius_min_pixels: f32,
}

impl Default for RenderingConfig {
    fn default() -> Self {
        Self {
            background_color: [1.0, 1.0, 1.0, 1.0],
            point_radius: 2.0,
            vector_color: [0xed, 0x3e, 0x15, 0xff],
            raster_color: [0xfc, 0xa1, 0x06, 0xff],
            accelerated_color: [26, 142, 156, 255],
            radius_scale: 2.0,
            radius_min_pixels: 0.25,
        }
    }
}

impl RenderingConfig {
    /// Resolve into the settings struct the render backends consume.
    pub fn to_backend_settings(&self) -> BackendSettings {
        BackendSettings {
            background: self.background_color,
            vector_color: self.vector_color,
            raster_color: self.raster_color,
            accelerated_color: self.accelerated_color,
            point_radius: self.point_radius,
            radius_scale: self.radius_scale,
            radius_min_pixels: self.radius_min_pixels,
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
    /// Log frame statistics periodically
    pub log_frame_stats: bool,
    /// Frames between frame-statistics log lines
    pub frame_stats_interval: u32,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_frame_stats: false,
            frame_stats_interval: 120,
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.window.width, 1280);
        assert_eq!(config.simulation.point_count, 100_000);
        assert_eq!(config.rendering.radius_scale, 2.0);
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("title"));
        assert!(toml.contains("point_count"));
    }

    #[test]
    fn test_backend_settings_resolution() {
        let rendering = RenderingConfig::default();
        let settings = rendering.to_backend_settings();
        assert_eq!(settings.vector_color, [0xed, 0x3e, 0x15, 0xff]);
        assert_eq!(settings.radius_min_pixels, 0.25);
    }
}
