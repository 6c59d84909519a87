//! Feature encoding: trait selections to numeric vectors
//!
//! Seven categorical attributes are one-hot encoded over the values
//! observed in the training rows; petal count is carried as a single
//! numeric column at its canonical position. The schema is derived from
//! the catalog at startup, so column meaning and order are identical
//! for training and prediction. Legal values that never occur in the
//! training rows encode as an all-zero indicator block.

use std::collections::BTreeSet;

use crate::error::{Error, Result};
use crate::traits::{Attribute, TraitSelection};

/// One feature column
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    /// Numeric petal count
    Petal,
    /// Indicator for one observed value of a categorical attribute
    Indicator {
        attribute: Attribute,
        value: String,
    },
}

/// Ordered column layout learned from training rows
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSchema {
    columns: Vec<Column>,
}

impl FeatureSchema {
    /// Derive the column layout from training selections.
    ///
    /// Attributes appear in canonical order; within an attribute the
    /// observed values are sorted, so the layout is deterministic for a
    /// given catalog.
    pub fn from_selections<'a, I>(selections: I) -> Self
    where
        I: IntoIterator<Item = &'a TraitSelection>,
    {
        let mut observed: [BTreeSet<String>; 8] = std::array::from_fn(|_| BTreeSet::new());
        for selection in selections {
            for (slot, attribute) in Attribute::ALL.iter().enumerate() {
                observed[slot].insert(selection.get(*attribute).to_string());
            }
        }

        let mut columns = Vec::new();
        for (slot, attribute) in Attribute::ALL.iter().enumerate() {
            if *attribute == Attribute::PetalNumber {
                columns.push(Column::Petal);
            } else {
                for value in &observed[slot] {
                    columns.push(Column::Indicator {
                        attribute: *attribute,
                        value: value.clone(),
                    });
                }
            }
        }
        FeatureSchema { columns }
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Encode a validated selection into a feature vector
    pub fn encode(&self, selection: &TraitSelection) -> Result<Vec<f32>> {
        let mut vector = Vec::with_capacity(self.columns.len());
        for column in &self.columns {
            match column {
                Column::Petal => {
                    let raw = selection.get(Attribute::PetalNumber);
                    let count: f32 = raw.parse().map_err(|_| Error::InvalidTrait {
                        field: Attribute::PetalNumber.name(),
                        value: raw.to_string(),
                    })?;
                    vector.push(count);
                }
                Column::Indicator { attribute, value } => {
                    let hit = selection.get(*attribute) == value;
                    vector.push(if hit { 1.0 } else { 0.0 });
                }
            }
        }
        Ok(vector)
    }

    /// Column names in layout order, for diagnostics
    pub fn column_names(&self) -> Vec<String> {
        self.columns
            .iter()
            .map(|c| match c {
                Column::Petal => Attribute::PetalNumber.name().to_string(),
                Column::Indicator { attribute, value } => {
                    format!("{}_{}", attribute.name(), value)
                }
            })
            .collect()
    }
}
