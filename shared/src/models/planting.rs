//! Crop planting models

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A recorded crop planting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Planting {
    pub id: Uuid,
    pub farmer_id: Uuid,
    pub barangay_id: Uuid,
    pub commodity: Commodity,
    pub classification: CropClassification,
    /// Area planted in hectares
    pub area_planted_ha: Decimal,
    pub date_planted: NaiveDate,
    pub growth_stage: GrowthStage,
    pub status: PlantingStatus,
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Commodities tracked by the office
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Commodity {
    Rice,
    Corn,
    /// High-value or other commodity with name
    Custom(String),
}

impl std::fmt::Display for Commodity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Commodity::Rice => write!(f, "rice"),
            Commodity::Corn => write!(f, "corn"),
            Commodity::Custom(name) => write!(f, "{}", name),
        }
    }
}

impl std::str::FromStr for Commodity {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "rice" => Commodity::Rice,
            "corn" => Commodity::Corn,
            other => Commodity::Custom(other.to_string()),
        })
    }
}

/// Seed/crop classification used for the report breakdown columns.
///
/// Corn reports break down by kernel color; rice reports by seed class.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CropClassification {
    Yellow,
    White,
    Hybrid,
    Certified,
    Registered,
    GoodQuality,
    /// Custom classification with name
    Custom(String),
}

impl CropClassification {
    /// Classifications reported for corn
    pub fn corn() -> Vec<CropClassification> {
        vec![CropClassification::Yellow, CropClassification::White]
    }

    /// Seed classes reported for rice
    pub fn rice() -> Vec<CropClassification> {
        vec![
            CropClassification::Hybrid,
            CropClassification::Certified,
            CropClassification::Registered,
            CropClassification::GoodQuality,
        ]
    }
}

impl std::fmt::Display for CropClassification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CropClassification::Yellow => write!(f, "Yellow"),
            CropClassification::White => write!(f, "White"),
            CropClassification::Hybrid => write!(f, "Hybrid"),
            CropClassification::Certified => write!(f, "Certified"),
            CropClassification::Registered => write!(f, "Registered"),
            CropClassification::GoodQuality => write!(f, "Good Quality"),
            CropClassification::Custom(name) => write!(f, "{}", name),
        }
    }
}

impl std::str::FromStr for CropClassification {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "Yellow" => CropClassification::Yellow,
            "White" => CropClassification::White,
            "Hybrid" => CropClassification::Hybrid,
            "Certified" => CropClassification::Certified,
            "Registered" => CropClassification::Registered,
            "Good Quality" => CropClassification::GoodQuality,
            other => CropClassification::Custom(other.to_string()),
        })
    }
}

/// Growth stage of a standing crop
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum GrowthStage {
    Seedling,
    Vegetative,
    Reproductive,
    Maturing,
}

impl GrowthStage {
    /// All stages in agronomic order, as laid out in standing-crop reports
    pub fn all() -> [GrowthStage; 4] {
        [
            GrowthStage::Seedling,
            GrowthStage::Vegetative,
            GrowthStage::Reproductive,
            GrowthStage::Maturing,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GrowthStage::Seedling => "seedling",
            GrowthStage::Vegetative => "vegetative",
            GrowthStage::Reproductive => "reproductive",
            GrowthStage::Maturing => "maturing",
        }
    }

    /// Report column label
    pub fn label(&self) -> &'static str {
        match self {
            GrowthStage::Seedling => "Seedling",
            GrowthStage::Vegetative => "Vegetative",
            GrowthStage::Reproductive => "Reproductive",
            GrowthStage::Maturing => "Maturing",
        }
    }
}

impl std::fmt::Display for GrowthStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for GrowthStage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "seedling" => Ok(GrowthStage::Seedling),
            "vegetative" => Ok(GrowthStage::Vegetative),
            "reproductive" => Ok(GrowthStage::Reproductive),
            "maturing" => Ok(GrowthStage::Maturing),
            other => Err(format!("Unknown growth stage: {}", other)),
        }
    }
}

/// Lifecycle status of a planting
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PlantingStatus {
    /// Planted and still in the field
    Standing,
    /// At least one harvest has been recorded
    Harvested,
}

impl PlantingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlantingStatus::Standing => "standing",
            PlantingStatus::Harvested => "harvested",
        }
    }
}

impl std::fmt::Display for PlantingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PlantingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standing" => Ok(PlantingStatus::Standing),
            "harvested" => Ok(PlantingStatus::Harvested),
            other => Err(format!("Unknown planting status: {}", other)),
        }
    }
}
