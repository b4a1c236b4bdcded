use serde::{Deserialize, Serialize};

use super::error::{EngineError, Result};

/// RGBA tab color with components in `[0.0, 1.0]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TabColor {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Default for TabColor {
    fn default() -> Self {
        TabColor {
            red: 0.0,
            green: 0.0,
            blue: 0.0,
            alpha: 1.0,
        }
    }
}

impl TabColor {
    pub fn rgb(red: f64, green: f64, blue: f64) -> Result<TabColor> {
        TabColor::rgba(red, green, blue, 1.0)
    }

    pub fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Result<TabColor> {
        let color = TabColor {
            red,
            green,
            blue,
            alpha,
        };
        color.validate()?;
        Ok(color)
    }

    /// Build from three (RGB) or four (RGBA) components.
    pub fn from_components(components: &[f64]) -> Result<TabColor> {
        match *components {
            [r, g, b] => TabColor::rgb(r, g, b),
            [r, g, b, a] => TabColor::rgba(r, g, b, a),
            _ => Err(EngineError::InvalidArgument(format!(
                "a tab color needs 3 or 4 components, got {}",
                components.len()
            ))),
        }
    }

    pub fn validate(&self) -> Result<()> {
        for (name, v) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !(0.0..=1.0).contains(&v) {
                return Err(EngineError::InvalidArgument(format!(
                    "{} component must be between 0.0 and 1.0, not {}",
                    name, v
                )));
            }
        }
        Ok(())
    }
}
