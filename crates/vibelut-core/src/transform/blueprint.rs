//! Structured grade export for downstream grading hosts.
//!
//! A [`NodeBlueprint`] mirrors the numeric fields of a grade in a JSON record
//! that host-side automation reads back. Hosts without LUT support apply the
//! grade as an ASC CDL instead, with contrast folded into slope and offset
//! (see [`CdlSop`]).

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CoreResult;
use crate::transform::params::{ColorParams, PipelineConfig};

/// Output encoding tag written into every blueprint.
pub const OUTPUT_GAMMA: &str = "Rec.709";

/// Default host node that receives the grade.
pub const DEFAULT_NODE: u32 = 2;

/// Color space transform section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CstBlueprint {
    pub is_log: bool,
    pub input_gamma: String,
    pub output_gamma: String,
}

/// Primary correction section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimaryBlueprint {
    pub lift: [f32; 3],
    pub gamma: [f32; 3],
    pub gain: [f32; 3],
    #[serde(default = "one")]
    pub saturation: f32,
    #[serde(default = "one")]
    pub contrast: f32,
    #[serde(default = "default_pivot")]
    pub pivot: f32,
}

/// Creative look section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookBlueprint {
    pub temp: f32,
    pub tint: f32,
    pub skin_protect: f32,
}

/// JSON export of one grade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeBlueprint {
    /// Generation time, milliseconds since the Unix epoch.
    pub timestamp: i64,
    pub cst: CstBlueprint,
    pub primary: PrimaryBlueprint,
    pub look: LookBlueprint,
}

fn one() -> f32 {
    1.0
}

fn default_pivot() -> f32 {
    ColorParams::default().contrast_pivot
}

impl NodeBlueprint {
    /// Snapshot `params` and `config`, stamped with the current time.
    pub fn new(params: &ColorParams, config: &PipelineConfig) -> Self {
        Self::from_parts(params, config, chrono::Utc::now().timestamp_millis())
    }

    pub fn from_parts(params: &ColorParams, config: &PipelineConfig, timestamp: i64) -> Self {
        Self {
            timestamp,
            cst: CstBlueprint {
                is_log: config.input_color_space.is_log(),
                input_gamma: config.input_color_space.label().to_string(),
                output_gamma: OUTPUT_GAMMA.to_string(),
            },
            primary: PrimaryBlueprint {
                lift: params.lift.to_array(),
                gamma: params.gamma.to_array(),
                gain: params.gain.to_array(),
                saturation: params.saturation,
                contrast: params.contrast,
                pivot: params.contrast_pivot,
            },
            look: LookBlueprint {
                temp: params.temperature,
                tint: params.tint,
                skin_protect: params.skin_protect,
            },
        }
    }

    pub fn to_json(&self) -> CoreResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn save(&self, path: &Path) -> CoreResult<()> {
        fs::write(path, self.to_json()?)?;
        tracing::info!("saved blueprint to {}", path.display());
        Ok(())
    }
}

/// ASC CDL slope/offset/power plus saturation, with contrast baked in.
///
/// ```text
/// slope  = gain × contrast
/// offset = lift × contrast + pivot × (1 − contrast)
/// power  = gamma
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CdlSop {
    pub slope: [f32; 3],
    pub offset: [f32; 3],
    pub power: [f32; 3],
    pub saturation: f32,
}

impl CdlSop {
    pub fn from_params(params: &ColorParams) -> Self {
        Self::fold(
            params.lift.to_array(),
            params.gamma.to_array(),
            params.gain.to_array(),
            params.contrast,
            params.contrast_pivot,
            params.saturation,
        )
    }

    pub fn from_blueprint(blueprint: &NodeBlueprint) -> Self {
        let p = &blueprint.primary;
        Self::fold(p.lift, p.gamma, p.gain, p.contrast, p.pivot, p.saturation)
    }

    fn fold(
        lift: [f32; 3],
        gamma: [f32; 3],
        gain: [f32; 3],
        contrast: f32,
        pivot: f32,
        saturation: f32,
    ) -> Self {
        Self {
            slope: gain.map(|g| g * contrast),
            offset: lift.map(|l| l * contrast + pivot * (1.0 - contrast)),
            power: gamma,
            saturation,
        }
    }

    /// Key/value map in the shape grading hosts accept for a CDL node.
    pub fn to_node_map(&self, node: u32) -> BTreeMap<&'static str, String> {
        BTreeMap::from([
            ("NodeIndex", node.to_string()),
            ("Slope", triplet(self.slope)),
            ("Offset", triplet(self.offset)),
            ("Power", triplet(self.power)),
            ("Saturation", self.saturation.to_string()),
        ])
    }
}

fn triplet(v: [f32; 3]) -> String {
    format!("{:.6} {:.6} {:.6}", v[0], v[1], v[2])
}
