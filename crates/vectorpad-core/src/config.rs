//! Editor settings.

use crate::shapes::Color;
use serde::{Deserialize, Serialize};

/// Default amount by which the radius buttons change a corner radius.
pub const DEFAULT_RADIUS_STEP: u32 = 5;

/// Settings that shape how the editor tools behave.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Color selected when the editor starts.
    pub default_color: Color,
    /// Corner radius change per increase/decrease action.
    pub radius_step: u32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            default_color: Color::BLACK,
            radius_step: DEFAULT_RADIUS_STEP,
        }
    }
}
