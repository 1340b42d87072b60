//! Mode family, field selection and field components

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Waveguide mode family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModeFamily {
    /// Transverse electric: E_z = 0
    #[serde(rename = "TE", alias = "te", alias = "TE Mode")]
    Te,
    /// Transverse magnetic: H_z = 0
    #[serde(rename = "TM", alias = "tm", alias = "TM Mode")]
    Tm,
}

impl ModeFamily {
    /// Smallest (m, n) that yields a non-trivial field in this family.
    pub fn base_mode(&self) -> (u32, u32) {
        match self {
            ModeFamily::Te => (1, 0),
            ModeFamily::Tm => (1, 1),
        }
    }

    /// Whether (m, n) satisfies this family's minimum-index rule.
    pub fn accepts(&self, m: u32, n: u32) -> bool {
        let (min_m, min_n) = self.base_mode();
        m >= min_m && n >= min_n
    }

    /// Long-form name, as shown in warnings.
    pub fn long_name(&self) -> &'static str {
        match self {
            ModeFamily::Te => "Transverse Electric",
            ModeFamily::Tm => "Transverse Magnetic",
        }
    }
}

impl fmt::Display for ModeFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModeFamily::Te => write!(f, "TE"),
            ModeFamily::Tm => write!(f, "TM"),
        }
    }
}

impl FromStr for ModeFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "te" | "te mode" => Ok(ModeFamily::Te),
            "tm" | "tm mode" => Ok(ModeFamily::Tm),
            _ => Err(format!("Unknown mode family: {}. Use: te or tm", s)),
        }
    }
}

/// Which field triad a caller samples
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    #[serde(rename = "electric", alias = "Electric", alias = "Electric Field")]
    Electric,
    #[serde(rename = "magnetic", alias = "Magnetic", alias = "Magnetic Field")]
    Magnetic,
}

impl FieldKind {
    /// The (x, y, z) components making up this field.
    pub fn components(&self) -> [Component; 3] {
        match self {
            FieldKind::Electric => [Component::Ex, Component::Ey, Component::Ez],
            FieldKind::Magnetic => [Component::Hx, Component::Hy, Component::Hz],
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Electric => write!(f, "electric"),
            FieldKind::Magnetic => write!(f, "magnetic"),
        }
    }
}

impl FromStr for FieldKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "e" | "electric" | "electric field" => Ok(FieldKind::Electric),
            "h" | "magnetic" | "magnetic field" => Ok(FieldKind::Magnetic),
            _ => Err(format!("Unknown field kind: {}. Use: electric or magnetic", s)),
        }
    }
}

/// One of the six Cartesian field components
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Component {
    Ex,
    Ey,
    Ez,
    Hx,
    Hy,
    Hz,
}

impl Component {
    pub const ALL: [Component; 6] = [
        Component::Ex,
        Component::Ey,
        Component::Ez,
        Component::Hx,
        Component::Hy,
        Component::Hz,
    ];
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
