//! Viewer configuration.
//!
//! Every field has a default, so a missing file or a file that only sets a
//! few keys both work. Lookup order: `$PADSCOPE_CONFIG`, then
//! `<config dir>/padscope/config.toml`.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::mapping::{Rgb, ScreenPoint, ViewportRect};

pub const CONFIG_ENV_VAR: &str = "PADSCOPE_CONFIG";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct ViewerConfig {
    pub window: WindowConfig,
    pub input: InputConfig,
    pub layout: LayoutConfig,
    pub gauge: GaugeConfig,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Frames per second the window repaints at.
    pub frame_rate: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Joystick Test".to_string(),
            width: 1100,
            height: 700,
            frame_rate: 30,
        }
    }
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct InputConfig {
    /// Minimum time between two accepted toggle clicks.
    pub click_interval_ms: u64,
    /// Button index that triggers a rumble when pressed.
    pub rumble_button: usize,
    pub rumble_strength: f32,
    pub rumble_duration_ms: u32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            click_interval_ms: 100,
            rumble_button: 0,
            rumble_strength: 0.7,
            rumble_duration_ms: 500,
        }
    }
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct LayoutConfig {
    pub text_origin: ScreenPoint,
    pub line_height: i32,
    pub indent_width: i32,
    pub font_size: f32,
    pub text_color: Rgb,

    pub background: Rgb,
    pub panel: ViewportRect,
    pub panel_border: i32,
    pub panel_border_color: Rgb,
    pub panel_fill: Rgb,

    pub stick_origin: ScreenPoint,
    pub stick_size: i32,
    /// Horizontal distance between the left and right stick plots.
    pub stick_spacing: i32,

    pub gauge_origin: ScreenPoint,
    pub gauge_spacing: i32,

    pub checkbox_origin: ScreenPoint,
    pub checkbox_size: i32,
    pub checkbox_spacing: i32,

    pub toggle: ViewportRect,
    pub toggle_label: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            text_origin: ScreenPoint::new(10, 10),
            line_height: 15,
            indent_width: 10,
            font_size: 13.0,
            text_color: Rgb::WHITE,

            background: Rgb::BLACK,
            panel: ViewportRect::new(500, 10, 480, 480),
            panel_border: 4,
            panel_border_color: Rgb::BLUE,
            panel_fill: Rgb::DARK_GRAY,

            stick_origin: ScreenPoint::new(550, 50),
            stick_size: 140,
            stick_spacing: 250,

            gauge_origin: ScreenPoint::new(550, 300),
            gauge_spacing: 250,

            checkbox_origin: ScreenPoint::new(510, 250),
            checkbox_size: 20,
            checkbox_spacing: 30,

            toggle: ViewportRect::new(520, 450, 20, 20),
            toggle_label: "Invert Y axis".to_string(),
        }
    }
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct GaugeConfig {
    pub radius: f32,
    /// Number of color bands in the gauge arc.
    pub steps: usize,
    pub thickness: f32,
    pub rest_color: Rgb,
    pub active_color: Rgb,
}

impl Default for GaugeConfig {
    fn default() -> Self {
        Self {
            radius: 50.0,
            steps: 50,
            thickness: 14.0,
            rest_color: Rgb::GREEN,
            active_color: Rgb::RED,
        }
    }
}

impl ViewerConfig {
    pub fn from_toml(path: &Path, content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Reads `path`. A missing file yields the defaults; any other read or
    /// parse failure is an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(content) => {
                info!("Loading configuration from {}", path.display());
                Self::from_toml(path, &content)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!("No configuration at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Loads from the default location, or defaults if there is none.
    pub fn load_default() -> Result<Self, ConfigError> {
        match default_path() {
            Some(path) => Self::load(&path),
            None => {
                debug!("No configuration directory on this platform, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Minimum interval between accepted toggle clicks.
    pub fn click_interval(&self) -> chrono::Duration {
        chrono::Duration::milliseconds(self.input.click_interval_ms as i64)
    }

    pub fn repaint_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(1000 / u64::from(self.window.frame_rate.max(1)))
    }
}

pub fn default_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|dir| dir.join("padscope").join("config.toml"))
}
