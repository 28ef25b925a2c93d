//! Driver configuration: DOM element ids, initial grid size, and UI glyphs.
//!
//! Every field has a default, so hosts only pass what they override:
//!
//! ```
//! use conway_driver::DriverConfig;
//!
//! let config = DriverConfig::from_json_str(r#"{ "initial_width": 32 }"#).unwrap();
//! assert_eq!(config.initial_width, 32);
//! assert_eq!(config.canvas_id, "game-of-life-canvas");
//! ```

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::Level;

use crate::DriverError;
use crate::fps::DEFAULT_FPS_WINDOW;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DriverConfig {
    /// `<canvas>` the universe paints onto.
    pub canvas_id: String,
    /// Text node receiving the FPS readout.
    pub fps_id: String,
    /// Play/pause toggle button.
    pub play_pause_id: String,
    /// Numeric input holding the requested grid width.
    pub width_input_id: String,
    /// Numeric input holding the requested grid height.
    pub height_input_id: String,
    /// Button applying the two size inputs.
    pub resize_id: String,
    /// Button requesting a random mutation.
    pub random_id: String,
    pub initial_width: u32,
    pub initial_height: u32,
    /// Number of frame-rate samples kept for the readout (must be > 0).
    pub fps_window: usize,
    /// Toggle label while playing.
    pub pause_glyph: String,
    /// Toggle label while paused.
    pub resume_glyph: String,
    /// Start the render loop after a random mutation issued while paused.
    ///
    /// Off by default: the mutation only switches the toggle label.
    pub resume_on_random_mutate: bool,
    /// Most verbose log level forwarded to the browser console
    /// (`error`, `warn`, `info`, `debug`, `trace`).
    pub log_level: String,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            canvas_id: "game-of-life-canvas".to_string(),
            fps_id: "fps".to_string(),
            play_pause_id: "play-pause".to_string(),
            width_input_id: "width-input".to_string(),
            height_input_id: "height-input".to_string(),
            resize_id: "resize".to_string(),
            random_id: "random-mutate".to_string(),
            initial_width: 64,
            initial_height: 64,
            fps_window: DEFAULT_FPS_WINDOW,
            pause_glyph: "⏸".to_string(),
            resume_glyph: "▶".to_string(),
            resume_on_random_mutate: false,
            log_level: "info".to_string(),
        }
    }
}

impl DriverConfig {
    /// Parse and validate a JSON config object.
    pub fn from_json_str(s: &str) -> Result<Self, DriverError> {
        let config: Self =
            serde_json::from_str(s).map_err(|err| DriverError::InvalidConfig(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that deserialization alone cannot rule out.
    pub fn validate(&self) -> Result<(), DriverError> {
        if self.fps_window == 0 {
            return Err(DriverError::InvalidConfig(
                "fps_window must be greater than zero".to_string(),
            ));
        }
        let ids = [
            ("canvas_id", &self.canvas_id),
            ("fps_id", &self.fps_id),
            ("play_pause_id", &self.play_pause_id),
            ("width_input_id", &self.width_input_id),
            ("height_input_id", &self.height_input_id),
            ("resize_id", &self.resize_id),
            ("random_id", &self.random_id),
        ];
        for (field, id) in ids {
            if id.trim().is_empty() {
                return Err(DriverError::InvalidConfig(format!("{field} must not be empty")));
            }
        }
        self.level()?;
        Ok(())
    }

    /// Parsed [`log_level`](Self::log_level).
    pub fn level(&self) -> Result<Level, DriverError> {
        Level::from_str(self.log_level.trim()).map_err(|_| {
            DriverError::InvalidConfig(format!("unknown log_level {:?}", self.log_level))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_object_yields_defaults() {
        let config = DriverConfig::from_json_str("{}").unwrap();
        assert_eq!(config, DriverConfig::default());
    }

    #[test]
    fn overrides_are_applied() {
        let config = DriverConfig::from_json_str(
            r#"{ "canvas_id": "board", "fps_window": 30, "resume_on_random_mutate": true }"#,
        )
        .unwrap();
        assert_eq!(config.canvas_id, "board");
        assert_eq!(config.fps_window, 30);
        assert!(config.resume_on_random_mutate);
        assert_eq!(config.fps_id, "fps");
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = DriverConfig::from_json_str(r#"{ "canvas": "typo" }"#).unwrap_err();
        assert!(matches!(err, DriverError::InvalidConfig(_)));
    }

    #[test]
    fn zero_fps_window_is_rejected() {
        let err = DriverConfig::from_json_str(r#"{ "fps_window": 0 }"#).unwrap_err();
        assert_eq!(
            err,
            DriverError::InvalidConfig("fps_window must be greater than zero".to_string())
        );
    }

    #[test]
    fn blank_element_id_is_rejected() {
        let err = DriverConfig::from_json_str(r#"{ "fps_id": "  " }"#).unwrap_err();
        assert_eq!(err, DriverError::InvalidConfig("fps_id must not be empty".to_string()));
    }

    #[test]
    fn log_level_is_parsed() {
        let config = DriverConfig::from_json_str(r#"{ "log_level": "debug" }"#).unwrap();
        assert_eq!(config.level(), Ok(Level::DEBUG));
        assert_eq!(DriverConfig::default().level(), Ok(Level::INFO));
    }

    #[test]
    fn unknown_log_level_is_rejected() {
        let err = DriverConfig::from_json_str(r#"{ "log_level": "loud" }"#).unwrap_err();
        assert!(matches!(err, DriverError::InvalidConfig(_)));
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(DriverConfig::from_json_str("{").is_err());
    }
}
