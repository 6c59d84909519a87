//! Morphological trait attributes and the user's selection of them
//!
//! The eight attributes form a closed vocabulary: every attribute has a
//! fixed set of legal string values, and the attribute order below is the
//! canonical order used by the catalog rows, the feature schema, and the
//! report.

use serde::{Deserialize, Serialize};

/// The eight morphological attributes, in canonical order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    LeafArrangement,
    FlowerSymmetry,
    PetalNumber,
    OvaryPosition,
    Habit,
    FruitType,
    LeafShape,
    InflorescenceType,
}

impl Attribute {
    /// All attributes in canonical order
    pub const ALL: [Attribute; 8] = [
        Attribute::LeafArrangement,
        Attribute::FlowerSymmetry,
        Attribute::PetalNumber,
        Attribute::OvaryPosition,
        Attribute::Habit,
        Attribute::FruitType,
        Attribute::LeafShape,
        Attribute::InflorescenceType,
    ];

    /// Snake-case field name, as used in the API and the catalog asset
    pub fn name(&self) -> &'static str {
        match self {
            Attribute::LeafArrangement => "leaf_arrangement",
            Attribute::FlowerSymmetry => "flower_symmetry",
            Attribute::PetalNumber => "petal_number",
            Attribute::OvaryPosition => "ovary_position",
            Attribute::Habit => "habit",
            Attribute::FruitType => "fruit_type",
            Attribute::LeafShape => "leaf_shape",
            Attribute::InflorescenceType => "inflorescence_type",
        }
    }

    /// Human-readable label for UI and report output
    pub fn label(&self) -> &'static str {
        match self {
            Attribute::LeafArrangement => "Leaf Arrangement",
            Attribute::FlowerSymmetry => "Flower Symmetry",
            Attribute::PetalNumber => "Petal Number",
            Attribute::OvaryPosition => "Ovary Position",
            Attribute::Habit => "Habit",
            Attribute::FruitType => "Fruit Type",
            Attribute::LeafShape => "Leaf Shape",
            Attribute::InflorescenceType => "Inflorescence Type",
        }
    }

    /// Closed set of legal values for this attribute
    pub fn allowed_values(&self) -> &'static [&'static str] {
        match self {
            Attribute::LeafArrangement => &["alternate", "opposite", "whorled"],
            Attribute::FlowerSymmetry => &["actinomorphic", "zygomorphic"],
            Attribute::PetalNumber => &["3", "4", "5", "6"],
            Attribute::OvaryPosition => &["superior", "inferior"],
            Attribute::Habit => &["herb", "shrub"],
            Attribute::FruitType => &["capsule", "nutlet", "schizocarp", "achene", "berry"],
            Attribute::LeafShape => &[
                "simple",
                "palmate",
                "pinnate",
                "lobed",
                "cordate",
                "lanceolate",
                "ovate",
                "linear",
                "toothed",
                "serrate",
                "fleshy",
            ],
            Attribute::InflorescenceType => &[
                "spike", "raceme", "umbel", "cyme", "head", "panicle", "solitary",
            ],
        }
    }

    /// Whether `value` is a member of this attribute's closed set
    pub fn is_legal(&self, value: &str) -> bool {
        self.allowed_values().contains(&value)
    }
}

/// One fully (or partially) specified set of trait choices.
///
/// Fields default to empty strings so that a request missing a field
/// reaches validation, which names the offending field, instead of being
/// rejected opaquely at deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TraitSelection {
    #[serde(default)]
    pub leaf_arrangement: String,
    #[serde(default)]
    pub flower_symmetry: String,
    #[serde(default)]
    pub petal_number: String,
    #[serde(default)]
    pub ovary_position: String,
    #[serde(default)]
    pub habit: String,
    #[serde(default)]
    pub fruit_type: String,
    #[serde(default)]
    pub leaf_shape: String,
    #[serde(default)]
    pub inflorescence_type: String,
}

impl TraitSelection {
    /// Build a selection from values in canonical attribute order
    pub fn from_values(values: [&str; 8]) -> Self {
        TraitSelection {
            leaf_arrangement: values[0].to_string(),
            flower_symmetry: values[1].to_string(),
            petal_number: values[2].to_string(),
            ovary_position: values[3].to_string(),
            habit: values[4].to_string(),
            fruit_type: values[5].to_string(),
            leaf_shape: values[6].to_string(),
            inflorescence_type: values[7].to_string(),
        }
    }

    /// Value for one attribute
    pub fn get(&self, attribute: Attribute) -> &str {
        match attribute {
            Attribute::LeafArrangement => &self.leaf_arrangement,
            Attribute::FlowerSymmetry => &self.flower_symmetry,
            Attribute::PetalNumber => &self.petal_number,
            Attribute::OvaryPosition => &self.ovary_position,
            Attribute::Habit => &self.habit,
            Attribute::FruitType => &self.fruit_type,
            Attribute::LeafShape => &self.leaf_shape,
            Attribute::InflorescenceType => &self.inflorescence_type,
        }
    }

    /// All values in canonical attribute order
    pub fn values(&self) -> [&str; 8] {
        [
            &self.leaf_arrangement,
            &self.flower_symmetry,
            &self.petal_number,
            &self.ovary_position,
            &self.habit,
            &self.fruit_type,
            &self.leaf_shape,
            &self.inflorescence_type,
        ]
    }
}
