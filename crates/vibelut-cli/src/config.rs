//! Runtime configuration for the command-line front end.

use vibelut_core::InputColorSpace;
use vibelut_core::transform::lut::DEFAULT_TITLE;

/// Environment defaults. Command-line flags override these.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// `TITLE` written into baked `.cube` files.
    pub lut_title: String,
    /// Input encoding used when `--input-space` is absent.
    pub input_space: InputColorSpace,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            lut_title: std::env::var("VIBELUT_LUT_TITLE")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            input_space: std::env::var("VIBELUT_INPUT_SPACE")
                .ok()
                .and_then(|label| parse_space_or_warn(&label))
                .unwrap_or_default(),
        }
    }
}

fn parse_space_or_warn(label: &str) -> Option<InputColorSpace> {
    let space = InputColorSpace::from_label(label);
    if space.is_none() {
        tracing::warn!("ignoring unknown VIBELUT_INPUT_SPACE '{label}'");
    }
    space
}
