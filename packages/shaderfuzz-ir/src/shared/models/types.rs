//! Semantic types
//!
//! The narrow slice of the shading-language type system that the passes
//! reason about: scalars, vectors, matrices, arrays and opaque named types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Element kind of a scalar or vector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarKind {
    Float,
    Int,
    Uint,
    Bool,
}

impl ScalarKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Float => "float",
            Self::Int => "int",
            Self::Uint => "uint",
            Self::Bool => "bool",
        }
    }

    /// Prefix used by the vector type names (`vec`, `ivec`, `uvec`, `bvec`)
    pub fn vector_prefix(&self) -> &'static str {
        match self {
            Self::Float => "vec",
            Self::Int => "ivec",
            Self::Uint => "uvec",
            Self::Bool => "bvec",
        }
    }

    pub fn is_numeric(&self) -> bool {
        !matches!(self, Self::Bool)
    }
}

/// Semantic type of a declaration or expression
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Type {
    Void,
    Scalar(ScalarKind),
    /// `vecN`, `ivecN`, `uvecN`, `bvecN` with N in 2..=4
    Vector { elem: ScalarKind, width: u8 },
    /// `matCxR`
    Matrix { columns: u8, rows: u8 },
    Array(Box<Type>, Option<u32>),
    Struct(String),
    /// Samplers and images; opaque to every pass
    Sampler(String),
}

impl Type {
    pub fn float() -> Self {
        Self::Scalar(ScalarKind::Float)
    }

    pub fn int() -> Self {
        Self::Scalar(ScalarKind::Int)
    }

    pub fn uint() -> Self {
        Self::Scalar(ScalarKind::Uint)
    }

    pub fn bool() -> Self {
        Self::Scalar(ScalarKind::Bool)
    }

    /// Scalar or vector of `width` components; width 1 collapses to the scalar.
    pub fn vector(elem: ScalarKind, width: u8) -> Self {
        if width == 1 {
            Self::Scalar(elem)
        } else {
            Self::Vector { elem, width }
        }
    }

    pub fn vec2() -> Self {
        Self::vector(ScalarKind::Float, 2)
    }

    pub fn vec3() -> Self {
        Self::vector(ScalarKind::Float, 3)
    }

    pub fn vec4() -> Self {
        Self::vector(ScalarKind::Float, 4)
    }

    /// Scalar kind of the components (matrices are float-valued)
    pub fn element(&self) -> Option<ScalarKind> {
        match self {
            Self::Scalar(kind) => Some(*kind),
            Self::Vector { elem, .. } => Some(*elem),
            Self::Matrix { .. } => Some(ScalarKind::Float),
            _ => None,
        }
    }

    /// Number of components of a scalar (1) or vector
    pub fn width(&self) -> Option<u8> {
        match self {
            Self::Scalar(_) => Some(1),
            Self::Vector { width, .. } => Some(*width),
            _ => None,
        }
    }

    pub fn is_vector(&self) -> bool {
        matches!(self, Self::Vector { .. })
    }

    pub fn is_numeric(&self) -> bool {
        match self {
            Self::Scalar(kind) | Self::Vector { elem: kind, .. } => kind.is_numeric(),
            Self::Matrix { .. } => true,
            _ => false,
        }
    }

    pub fn is_boolean(&self) -> bool {
        self.element() == Some(ScalarKind::Bool) && !matches!(self, Self::Matrix { .. })
    }

    /// Resolve a built-in type or constructor name (`float`, `ivec3`, `mat2x4`, ...)
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "void" => return Some(Self::Void),
            "float" => return Some(Self::float()),
            "int" => return Some(Self::int()),
            "uint" => return Some(Self::uint()),
            "bool" => return Some(Self::bool()),
            _ => {}
        }

        for elem in [
            ScalarKind::Float,
            ScalarKind::Int,
            ScalarKind::Uint,
            ScalarKind::Bool,
        ] {
            if let Some(width) = name.strip_prefix(elem.vector_prefix()) {
                return match width {
                    "2" | "3" | "4" => Some(Self::Vector {
                        elem,
                        width: width.parse().ok()?,
                    }),
                    _ => None,
                };
            }
        }

        let dims = name.strip_prefix("mat")?;
        let (columns, rows) = match dims.split_once('x') {
            Some((c, r)) => (c, r),
            None => (dims, dims),
        };
        let columns: u8 = columns.parse().ok()?;
        let rows: u8 = rows.parse().ok()?;
        if (2..=4).contains(&columns) && (2..=4).contains(&rows) {
            Some(Self::Matrix { columns, rows })
        } else {
            None
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Void => write!(f, "void"),
            Self::Scalar(kind) => write!(f, "{}", kind.as_str()),
            Self::Vector { elem, width } => write!(f, "{}{}", elem.vector_prefix(), width),
            Self::Matrix { columns, rows } if columns == rows => write!(f, "mat{}", columns),
            Self::Matrix { columns, rows } => write!(f, "mat{}x{}", columns, rows),
            Self::Array(inner, Some(size)) => write!(f, "{}[{}]", inner, size),
            Self::Array(inner, None) => write!(f, "{}[]", inner),
            Self::Struct(name) | Self::Sampler(name) => write!(f, "{}", name),
        }
    }
}
