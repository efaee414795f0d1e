//! Weather attributes and their display ranges.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CommonError;
use crate::field::ScalarField;

/// One of the four stored weather fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Snowpack,
    Snowfall,
    Precipitation,
    Runoff,
}

impl FieldKind {
    pub const ALL: [FieldKind; 4] = [
        FieldKind::Snowpack,
        FieldKind::Snowfall,
        FieldKind::Precipitation,
        FieldKind::Runoff,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Snowpack => "snowpack",
            Self::Snowfall => "snowfall",
            Self::Precipitation => "precipitation",
            Self::Runoff => "runoff",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A displayable attribute: a field shown either as its accumulated value or
/// as the change since the previous timestep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Attribute {
    pub field: FieldKind,
    pub daily: bool,
}

impl Attribute {
    pub const fn accumulated(field: FieldKind) -> Self {
        Self {
            field,
            daily: false,
        }
    }

    pub const fn daily(field: FieldKind) -> Self {
        Self { field, daily: true }
    }

    /// All eight attributes, accumulated first.
    pub fn all() -> impl Iterator<Item = Attribute> {
        FieldKind::ALL
            .into_iter()
            .map(Attribute::accumulated)
            .chain(FieldKind::ALL.into_iter().map(Attribute::daily))
    }

    /// Stable slot 0..8 (accumulated 0-3, daily 4-7).
    pub fn slot(&self) -> usize {
        let base = FieldKind::ALL
            .iter()
            .position(|k| *k == self.field)
            .unwrap_or(0);
        if self.daily {
            base + 4
        } else {
            base
        }
    }
}

impl Default for Attribute {
    fn default() -> Self {
        Self::accumulated(FieldKind::Snowpack)
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.daily {
            write!(f, "{}-daily", self.field)
        } else {
            write!(f, "{}", self.field)
        }
    }
}

/// Parse from `"snowpack"`, `"snowfall-daily"`, etc. (case-insensitive).
impl FromStr for Attribute {
    type Err = CommonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        let (name, daily) = match lower
            .strip_suffix("-daily")
            .or_else(|| lower.strip_suffix("_daily"))
        {
            Some(name) => (name, true),
            None => (lower.as_str(), false),
        };

        let field = FieldKind::ALL
            .into_iter()
            .find(|k| k.as_str() == name)
            .ok_or_else(|| CommonError::UnknownAttribute(s.to_string()))?;

        Ok(Self { field, daily })
    }
}

/// Min/max of every attribute over a dataset, used to scale charts and legends.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AttributeRanges {
    min: [f32; 8],
    max: [f32; 8],
}

impl AttributeRanges {
    /// Compute ranges from the four fields.
    ///
    /// Daily attributes range over the per-timestep deltas of their field.
    pub fn compute<'a, F>(mut field: F) -> Self
    where
        F: FnMut(FieldKind) -> &'a ScalarField,
    {
        let mut ranges = Self {
            min: [0.0; 8],
            max: [0.0; 8],
        };

        for kind in FieldKind::ALL {
            let data = field(kind);
            let acc = Attribute::accumulated(kind).slot();
            let daily = Attribute::daily(kind).slot();

            if let Some((lo, hi)) = data.value_range() {
                ranges.min[acc] = lo;
                ranges.max[acc] = hi;
            }
            if let Some((lo, hi)) = data.delta_range() {
                ranges.min[daily] = lo;
                ranges.max[daily] = hi;
            }
        }
        ranges
    }

    pub fn min(&self, attribute: Attribute) -> f32 {
        self.min[attribute.slot()]
    }

    pub fn max(&self, attribute: Attribute) -> f32 {
        self.max[attribute.slot()]
    }

    /// `max - min` for the attribute.
    pub fn span(&self, attribute: Attribute) -> f32 {
        self.max(attribute) - self.min(attribute)
    }
}
