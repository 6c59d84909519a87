//! Trait resolution: validated selection to identified taxon
//!
//! The resolver owns the catalog, the feature schema derived from it,
//! and a decision tree trained on the authoritative rows. Construction
//! happens once at startup; afterwards resolution is pure and the
//! resolver is safe to share behind an `Arc`.

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, warn};

use crate::catalog::{Catalog, FamilyInfo, TaxonomyRecord};
use crate::encoding::FeatureSchema;
use crate::error::Result;
use crate::traits::TraitSelection;
use crate::tree::DecisionTree;
use crate::validate;

/// Posteriors below this raise the advisory flag on the resolution
pub const LOW_CONFIDENCE_THRESHOLD: f32 = 0.70;

/// Species and family for one trained class
#[derive(Debug, Clone, PartialEq)]
struct ClassLabel {
    species: String,
    family: String,
}

/// A completed resolution with its supporting reference material
#[derive(Debug, Clone, Serialize)]
pub struct Resolution {
    pub species: String,
    pub family: String,
    pub confidence: f32,
    pub low_confidence: bool,
    pub taxonomy: TaxonomyRecord,
    pub family_info: FamilyInfo,
}

/// Catalog-backed classifier, immutable after construction
#[derive(Debug, Clone)]
pub struct Resolver {
    catalog: Catalog,
    schema: FeatureSchema,
    tree: DecisionTree,
    classes: Vec<ClassLabel>,
}

impl Resolver {
    /// Build a resolver over the embedded catalog
    pub fn from_embedded() -> Result<Self> {
        Self::new(Catalog::load()?)
    }

    /// Derive the feature schema from the catalog's authoritative rows
    /// and train the tree on them. One class per distinct species.
    pub fn new(catalog: Catalog) -> Result<Self> {
        let schema = FeatureSchema::from_selections(catalog.resolved_entries().map(|e| &e.traits));

        let mut classes: Vec<ClassLabel> = Vec::new();
        let mut ids: HashMap<String, usize> = HashMap::new();
        let mut labels = Vec::with_capacity(catalog.resolved_len());
        let mut vectors = Vec::with_capacity(catalog.resolved_len());
        for entry in catalog.resolved_entries() {
            let id = *ids.entry(entry.species.clone()).or_insert_with(|| {
                classes.push(ClassLabel {
                    species: entry.species.clone(),
                    family: entry.family.clone(),
                });
                classes.len() - 1
            });
            labels.push(id);
            vectors.push(schema.encode(&entry.traits)?);
        }

        let tree = DecisionTree::fit(&vectors, &labels, classes.len())?;
        debug!(
            "Trained resolver: {} classes, {} features, {} leaves",
            classes.len(),
            schema.width(),
            tree.leaf_count()
        );

        Ok(Resolver {
            catalog,
            schema,
            tree,
            classes,
        })
    }

    /// Resolve a trait selection to a species.
    ///
    /// Validation failures and schema mismatches come back as errors;
    /// a low posterior is an advisory on the result, not a failure.
    pub fn resolve(&self, selection: &TraitSelection) -> Result<Resolution> {
        validate::validate(selection)?;
        let vector = self.schema.encode(selection)?;
        let prediction = self.tree.predict(&vector)?;

        let label = &self.classes[prediction.class];
        let low_confidence = prediction.posterior < LOW_CONFIDENCE_THRESHOLD;
        if low_confidence {
            warn!(
                "Low-confidence resolution: {} at {:.2}",
                label.species, prediction.posterior
            );
        } else {
            debug!(
                "Resolved {} ({}) at {:.2}",
                label.species, label.family, prediction.posterior
            );
        }

        Ok(Resolution {
            species: label.species.clone(),
            family: label.family.clone(),
            confidence: prediction.posterior,
            low_confidence,
            taxonomy: self.catalog.taxonomy_for(&label.species, &label.family),
            family_info: self.catalog.family_info(&label.family),
        })
    }

    /// The catalog this resolver was built from
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Width of the trained feature schema
    pub fn feature_width(&self) -> usize {
        self.schema.width()
    }

    /// Number of distinct species classes
    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    /// Leaf count of the trained tree
    pub fn leaf_count(&self) -> usize {
        self.tree.leaf_count()
    }
}
