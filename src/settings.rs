use crate::canvas::model::{Color, StrokeState, Tool, DEFAULT_ERASER_RADIUS, DEFAULT_STROKE_WIDTH};
use crate::overlay::Placement;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const SETTINGS_FILE: &str = "settings.json";
/// Environment override for the recognition service base address.
pub const API_URL_ENV: &str = "MATH_CANVAS_API_URL";
pub const DEFAULT_API_URL: &str = "http://localhost:8900";
/// Upper bound applied to `reveal_delay_ms`.
pub const MAX_REVEAL_DELAY_MS: u64 = 60_000;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Settings {
    /// Base address of the recognition service. `/calculate` is appended.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Seconds before an in-flight recognition request is abandoned.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_stroke_width")]
    pub stroke_width: u32,
    #[serde(default = "default_eraser_radius")]
    pub eraser_radius: u32,
    /// Colors offered in the toolbar.
    #[serde(default = "default_swatches")]
    pub swatches: Vec<Color>,
    #[serde(default)]
    pub default_color: Color,
    /// Pause between revealing consecutive results. `0` shows them at once.
    #[serde(default = "default_reveal_delay")]
    pub reveal_delay_ms: u64,
    #[serde(default)]
    pub placement: Placement,
    /// Composite the drawing onto black before upload instead of sending
    /// transparent pixels.
    #[serde(default)]
    pub flatten_background: bool,
    /// When enabled the application initialises the logger at debug level.
    #[serde(default)]
    pub debug_logging: bool,
    /// Write logs to this file instead of stderr.
    #[serde(default)]
    pub log_file: Option<String>,
    #[serde(default = "default_toasts")]
    pub enable_toasts: bool,
    /// Duration of toast notifications in seconds.
    #[serde(default = "default_toast_duration")]
    pub toast_duration: f32,
    /// Initial window size. If absent, a default size is used.
    #[serde(default)]
    pub window_size: Option<(i32, i32)>,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.into()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_stroke_width() -> u32 {
    DEFAULT_STROKE_WIDTH
}

fn default_eraser_radius() -> u32 {
    DEFAULT_ERASER_RADIUS
}

fn default_swatches() -> Vec<Color> {
    vec![
        Color::rgb(255, 255, 255),
        Color::rgb(238, 51, 51),
        Color::rgb(230, 73, 128),
        Color::rgb(190, 75, 219),
        Color::rgb(34, 139, 230),
        Color::rgb(51, 154, 240),
        Color::rgb(64, 192, 87),
        Color::rgb(250, 176, 5),
        Color::rgb(253, 126, 20),
    ]
}

fn default_reveal_delay() -> u64 {
    1000
}

fn default_toasts() -> bool {
    true
}

fn default_toast_duration() -> f32 {
    3.0
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            request_timeout_secs: default_request_timeout(),
            stroke_width: default_stroke_width(),
            eraser_radius: default_eraser_radius(),
            swatches: default_swatches(),
            default_color: Color::WHITE,
            reveal_delay_ms: default_reveal_delay(),
            placement: Placement::Fixed,
            flatten_background: false,
            debug_logging: false,
            log_file: None,
            enable_toasts: true,
            toast_duration: default_toast_duration(),
            window_size: Some((1280, 800)),
        }
    }
}

impl Settings {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path).unwrap_or_default();
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(&content).with_context(|| format!("parse settings file {path}"))
    }

    pub fn save(&self, path: &str) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).with_context(|| format!("write settings file {path}"))?;
        Ok(())
    }

    /// Service address, preferring the environment override when it is set
    /// and non-empty.
    pub fn resolved_api_url(&self) -> String {
        match std::env::var(API_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => url.trim().to_string(),
            _ => self.api_url.clone(),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(self.reveal_delay_ms.min(MAX_REVEAL_DELAY_MS))
    }

    pub fn initial_stroke(&self) -> StrokeState {
        StrokeState {
            tool: Tool::Draw,
            color: self.default_color,
            stroke_width: self.stroke_width.max(1),
            eraser_radius: self.eraser_radius.max(1),
            pointer_down: false,
        }
    }
}
