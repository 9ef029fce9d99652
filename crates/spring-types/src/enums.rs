use serde::{Deserialize, Serialize};

/// Which spring family a specification describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SpringKind {
    Compression,
    Extension,
    Torsion,
}

impl SpringKind {
    /// Spring-type name used to key enumeration tables.
    pub fn label(&self) -> &'static str {
        match self {
            SpringKind::Compression => "Compression",
            SpringKind::Extension => "Extension",
            SpringKind::Torsion => "Torsion",
        }
    }
}

/// End condition of a compression spring.
///
/// A closed variant set: each variant carries its own free-pitch formula,
/// matched exhaustively in spring-calc. The table labels are the canonical
/// option strings of the `Compression/EndType` enumeration table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EndType {
    Open,
    OpenGround,
    Closed,
    ClosedGround,
    TaperedClosedGround,
    PigTail,
    UserSpecified,
}

impl EndType {
    /// Canonical option label, first column of the end-type table.
    pub fn label(&self) -> &'static str {
        match self {
            EndType::Open => "Open",
            EndType::OpenGround => "Open&Ground",
            EndType::Closed => "Closed",
            EndType::ClosedGround => "Closed&Ground",
            EndType::TaperedClosedGround => "Tapered_C&G",
            EndType::PigTail => "Pig-tail",
            EndType::UserSpecified => "User_Specified",
        }
    }

    /// Parse a table label back into a variant.
    pub fn from_label(label: &str) -> Option<EndType> {
        Some(match label {
            "Open" => EndType::Open,
            "Open&Ground" => EndType::OpenGround,
            "Closed" => EndType::Closed,
            "Closed&Ground" => EndType::ClosedGround,
            "Tapered_C&G" => EndType::TaperedClosedGround,
            "Pig-tail" => EndType::PigTail,
            "User_Specified" => EndType::UserSpecified,
            _ => return None,
        })
    }

    /// Whether the end faces are machined flat ("ground" variants).
    pub fn is_ground(&self) -> bool {
        matches!(
            self,
            EndType::OpenGround | EndType::ClosedGround | EndType::TaperedClosedGround
        )
    }

    pub fn all() -> [EndType; 7] {
        [
            EndType::Open,
            EndType::OpenGround,
            EndType::Closed,
            EndType::ClosedGround,
            EndType::TaperedClosedGround,
            EndType::PigTail,
            EndType::UserSpecified,
        ]
    }
}

/// Expected service life of the spring.
///
/// Categories 1-4 are not shot peened, 5-8 are. Each category selects a
/// percent-of-tensile endurance constant from the material; the first
/// unpeened and first peened category share one constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum LifeCategory {
    Static,
    Cycles100k,
    Cycles1M,
    Cycles10M,
    PeenedStatic,
    PeenedCycles100k,
    PeenedCycles1M,
    PeenedCycles10M,
}

impl LifeCategory {
    pub fn label(&self) -> &'static str {
        match self {
            LifeCategory::Static => "Static",
            LifeCategory::Cycles100k => "100,000 Cycles",
            LifeCategory::Cycles1M => "1,000,000 Cycles",
            LifeCategory::Cycles10M => "10,000,000 Cycles",
            LifeCategory::PeenedStatic => "Shot Peened Static",
            LifeCategory::PeenedCycles100k => "Shot Peened 100,000 Cycles",
            LifeCategory::PeenedCycles1M => "Shot Peened 1,000,000 Cycles",
            LifeCategory::PeenedCycles10M => "Shot Peened 10,000,000 Cycles",
        }
    }

    /// 1-based row index in the life-category table.
    pub fn table_index(&self) -> usize {
        match self {
            LifeCategory::Static => 1,
            LifeCategory::Cycles100k => 2,
            LifeCategory::Cycles1M => 3,
            LifeCategory::Cycles10M => 4,
            LifeCategory::PeenedStatic => 5,
            LifeCategory::PeenedCycles100k => 6,
            LifeCategory::PeenedCycles1M => 7,
            LifeCategory::PeenedCycles10M => 8,
        }
    }

    pub fn from_label(label: &str) -> Option<LifeCategory> {
        Some(match label {
            "Static" => LifeCategory::Static,
            "100,000 Cycles" => LifeCategory::Cycles100k,
            "1,000,000 Cycles" => LifeCategory::Cycles1M,
            "10,000,000 Cycles" => LifeCategory::Cycles10M,
            "Shot Peened Static" => LifeCategory::PeenedStatic,
            "Shot Peened 100,000 Cycles" => LifeCategory::PeenedCycles100k,
            "Shot Peened 1,000,000 Cycles" => LifeCategory::PeenedCycles1M,
            "Shot Peened 10,000,000 Cycles" => LifeCategory::PeenedCycles10M,
            _ => return None,
        })
    }
}

/// How material-dependent properties are obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PropCalcMethod {
    /// Use values from the material table.
    MaterialTable,
    /// Specify tensile strength and percent-tensile values directly.
    SpecifyTensile,
    /// Specify the stress limits directly.
    SpecifyStressLimits,
}

impl PropCalcMethod {
    pub fn label(&self) -> &'static str {
        match self {
            PropCalcMethod::MaterialTable => "Use values from material table",
            PropCalcMethod::SpecifyTensile => "Specify tensile and percent tensile",
            PropCalcMethod::SpecifyStressLimits => "Specify stress limits",
        }
    }

    pub fn from_label(label: &str) -> Option<PropCalcMethod> {
        Some(match label {
            "Use values from material table" => PropCalcMethod::MaterialTable,
            "Specify tensile and percent tensile" => PropCalcMethod::SpecifyTensile,
            "Specify stress limits" => PropCalcMethod::SpecifyStressLimits,
            _ => return None,
        })
    }
}
