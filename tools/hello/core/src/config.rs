use alloc::string::String;

use serde::Deserialize;

use crate::color::{self, Color};
use crate::error::ConfigError;
use crate::{HEIGHT, WIDTH};

/// How the square moves from one frame to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CursorMode {
    /// Slides left and right on its own, reversing at the edges.
    Bounce,
    /// Follows the first joypad's d-pad.
    #[default]
    Input,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    pub cursor_mode: CursorMode,
    /// Pixels per frame in bounce mode.
    pub step: i32,
    pub rect_width: i32,
    pub rect_height: i32,
    pub start_x: i32,
    pub start_y: i32,
    pub background: Color,
    pub rect_color: Color,
    pub text: String,
    pub text_x: i32,
    pub text_y: i32,
    pub text_color: Color,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            cursor_mode: CursorMode::default(),
            step: 1,
            rect_width: 20,
            rect_height: 20,
            start_x: 0,
            start_y: 0,
            background: color::BLACK,
            rect_color: color::RED,
            text: String::from("Hello World"),
            text_x: 50,
            text_y: 50,
            text_color: color::WHITE,
        }
    }
}

impl CoreConfig {
    pub fn with_mode(mut self, cursor_mode: CursorMode) -> Self {
        self.cursor_mode = cursor_mode;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.step <= 0 {
            return Err(ConfigError::Invalid {
                field: "step",
                reason: "must be positive",
            });
        }
        if self.rect_width <= 0 || self.rect_width > WIDTH as i32 {
            return Err(ConfigError::Invalid {
                field: "rect_width",
                reason: "must fit within the frame",
            });
        }
        if self.rect_height <= 0 || self.rect_height > HEIGHT as i32 {
            return Err(ConfigError::Invalid {
                field: "rect_height",
                reason: "must fit within the frame",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(CoreConfig::default().validate(), Ok(()));
    }

    #[test]
    fn zero_step_is_rejected() {
        let config = CoreConfig {
            step: 0,
            ..CoreConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "step", .. })
        ));
    }

    #[test]
    fn oversized_rect_is_rejected() {
        let config = CoreConfig {
            rect_width: WIDTH as i32 + 1,
            ..CoreConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "rect_width", .. })
        ));

        let config = CoreConfig {
            rect_height: 0,
            ..CoreConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "rect_height", .. })
        ));
    }
}
