//! Shading language versions
//!
//! The version a program is written against decides which syntactic
//! positions the passes may touch.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Shading language version / dialect tag carried by every program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShadingLanguageVersion {
    #[serde(rename = "100")]
    Essl100,
    #[serde(rename = "webgl1")]
    WebGl1,
    #[serde(rename = "300 es")]
    Essl300,
    #[serde(rename = "310 es")]
    Essl310,
    #[serde(rename = "320 es")]
    Essl320,
    #[serde(rename = "webgl2")]
    WebGl2,
    #[serde(rename = "110")]
    Glsl110,
    #[serde(rename = "130")]
    Glsl130,
    #[serde(rename = "330")]
    Glsl330,
    #[serde(rename = "440")]
    Glsl440,
    #[serde(rename = "450")]
    Glsl450,
}

impl ShadingLanguageVersion {
    pub const ALL: [Self; 11] = [
        Self::Essl100,
        Self::WebGl1,
        Self::Essl300,
        Self::Essl310,
        Self::Essl320,
        Self::WebGl2,
        Self::Glsl110,
        Self::Glsl130,
        Self::Glsl330,
        Self::Glsl440,
        Self::Glsl450,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Essl100 => "100",
            Self::WebGl1 => "webgl1",
            Self::Essl300 => "300 es",
            Self::Essl310 => "310 es",
            Self::Essl320 => "320 es",
            Self::WebGl2 => "webgl2",
            Self::Glsl110 => "110",
            Self::Glsl130 => "130",
            Self::Glsl330 => "330",
            Self::Glsl440 => "440",
            Self::Glsl450 => "450",
        }
    }

    /// `for` loops must keep statically analyzable trip counts (ESSL 1.00 Appendix A)
    pub fn restricts_loop_bounds(&self) -> bool {
        matches!(self, Self::Essl100 | Self::WebGl1)
    }

    /// Global initializers must be constant expressions
    pub fn global_initializers_must_be_const(&self) -> bool {
        matches!(self, Self::Essl100 | Self::WebGl1)
    }

    /// Scalars accept swizzles such as `f.xx` (GLSL 4.20 and later)
    pub fn supports_scalar_swizzles(&self) -> bool {
        matches!(self, Self::Glsl440 | Self::Glsl450)
    }

    pub fn is_webgl(&self) -> bool {
        matches!(self, Self::WebGl1 | Self::WebGl2)
    }
}

impl Default for ShadingLanguageVersion {
    fn default() -> Self {
        Self::Glsl440
    }
}

impl FromStr for ShadingLanguageVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|version| version.as_str() == normalized)
            .ok_or_else(|| {
                format!(
                    "Unknown shading language version '{}'. Valid versions: {}",
                    s,
                    Self::ALL
                        .iter()
                        .map(|v| v.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            })
    }
}

impl fmt::Display for ShadingLanguageVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
