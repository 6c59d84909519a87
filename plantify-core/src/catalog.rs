//! Reference catalog: trait rows, family details, and taxonomy
//!
//! The catalog is parsed once from an embedded, versioned TOML asset and
//! never mutated afterwards. Rows are kept verbatim in authoring order,
//! including duplicate trait tuples present in the reference data; the
//! first-defined row for a tuple is authoritative, later re-definitions
//! are counted as shadowed and reported at load time.

use std::collections::hash_map::Entry as MapEntry;
use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::traits::{Attribute, TraitSelection};

/// Embedded catalog asset; replace the file and bump `schema_version`
/// to ship a new revision.
const EMBEDDED_CATALOG: &str = include_str!("assets/catalog.toml");

/// One catalog row: a trait tuple and the taxon it identifies
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub traits: TraitSelection,
    pub family: String,
    pub species: String,
}

/// Descriptive details for a plant family
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamilyInfo {
    pub name: String,
    pub description: String,
    pub ethnobotanical_uses: String,
    pub reference: String,
}

impl FamilyInfo {
    /// Complete placeholder for families absent from the details table
    pub fn placeholder(name: &str) -> Self {
        FamilyInfo {
            name: name.to_string(),
            description: "Family description not documented.".to_string(),
            ethnobotanical_uses: "Ethnobotanical uses not documented.".to_string(),
            reference: "Not available.".to_string(),
        }
    }
}

/// Taxonomic hierarchy for one species
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxonomyRecord {
    pub species: String,
    pub kingdom: String,
    pub division: String,
    #[serde(rename = "class")]
    pub class_name: String,
    pub order: String,
    pub family: String,
    pub genus: String,
    pub epithet: String,
    pub description: String,
}

impl TaxonomyRecord {
    /// Synthesize a record for a species without a curated entry.
    ///
    /// Ranks above order are uniform across the catalog's flowering
    /// plants; genus and epithet come from the binomial name itself.
    pub fn synthesize(species: &str, family: &str) -> Self {
        let mut parts = species.split_whitespace();
        let genus = parts.next().unwrap_or(species).to_string();
        let rest: Vec<&str> = parts.collect();
        let epithet = if rest.is_empty() {
            species.to_string()
        } else {
            rest.join(" ")
        };
        TaxonomyRecord {
            species: species.to_string(),
            kingdom: "Plantae".to_string(),
            division: "Magnoliophyta".to_string(),
            class_name: "Magnoliopsida".to_string(),
            order: "Unknown".to_string(),
            family: family.to_string(),
            genus,
            epithet,
            description: "Morphological description not documented.".to_string(),
        }
    }
}

/// Raw asset shape as stored in `assets/catalog.toml`
#[derive(Debug, Deserialize)]
struct RawCatalog {
    schema_version: u32,
    rows: Vec<[String; 10]>,
    #[serde(default)]
    families: Vec<FamilyInfo>,
    #[serde(default)]
    taxa: Vec<TaxonomyRecord>,
}

/// The immutable fact base mapping trait tuples to taxa
#[derive(Debug, Clone)]
pub struct Catalog {
    version: u32,
    entries: Vec<CatalogEntry>,
    /// Indices of authoritative entries (first definition of each tuple),
    /// in authoring order
    authoritative: Vec<usize>,
    index: HashMap<TraitSelection, usize>,
    families: HashMap<String, FamilyInfo>,
    taxa: HashMap<String, TaxonomyRecord>,
    shadowed: usize,
}

impl Catalog {
    /// Load the embedded catalog asset
    pub fn load() -> Result<Self> {
        Self::from_toml_str(EMBEDDED_CATALOG)
    }

    /// Parse a catalog from TOML text, checking every row against the
    /// closed attribute vocabularies
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let raw: RawCatalog =
            toml::from_str(text).map_err(|e| Error::Catalog(format!("parse failure: {e}")))?;

        if raw.rows.is_empty() {
            return Err(Error::Catalog("catalog has no rows".to_string()));
        }

        let mut entries = Vec::with_capacity(raw.rows.len());
        for (row_no, row) in raw.rows.iter().enumerate() {
            let traits = TraitSelection::from_values([
                &row[0], &row[1], &row[2], &row[3], &row[4], &row[5], &row[6], &row[7],
            ]);
            for attribute in Attribute::ALL {
                let value = traits.get(attribute);
                if !attribute.is_legal(value) {
                    return Err(Error::Catalog(format!(
                        "row {}: illegal {} value {:?}",
                        row_no + 1,
                        attribute.name(),
                        value
                    )));
                }
            }
            let family = row[8].trim();
            let species = row[9].trim();
            if family.is_empty() || species.is_empty() {
                return Err(Error::Catalog(format!(
                    "row {}: family and species must be non-empty",
                    row_no + 1
                )));
            }
            entries.push(CatalogEntry {
                traits,
                family: family.to_string(),
                species: species.to_string(),
            });
        }

        // First-defined-wins: the earliest row for a tuple is authoritative;
        // later re-definitions are retained but shadowed.
        let mut index = HashMap::new();
        let mut authoritative = Vec::new();
        let mut shadowed = 0;
        for (i, entry) in entries.iter().enumerate() {
            match index.entry(entry.traits.clone()) {
                MapEntry::Vacant(slot) => {
                    slot.insert(i);
                    authoritative.push(i);
                }
                MapEntry::Occupied(_) => shadowed += 1,
            }
        }

        let families: HashMap<String, FamilyInfo> = raw
            .families
            .into_iter()
            .map(|f| (f.name.clone(), f))
            .collect();
        let taxa: HashMap<String, TaxonomyRecord> = raw
            .taxa
            .into_iter()
            .map(|t| (t.species.clone(), t))
            .collect();

        let catalog = Catalog {
            version: raw.schema_version,
            entries,
            authoritative,
            index,
            families,
            taxa,
            shadowed,
        };

        info!(
            "Loaded catalog v{}: {} rows, {} distinct trait tuples, {} families",
            catalog.version,
            catalog.entries.len(),
            catalog.authoritative.len(),
            catalog.family_count()
        );
        if catalog.shadowed > 0 {
            warn!(
                "Catalog contains {} shadowed rows (duplicate trait tuples); \
                 first definition wins, later rows need domain review",
                catalog.shadowed
            );
        }

        Ok(catalog)
    }

    /// Asset schema version
    pub fn version(&self) -> u32 {
        self.version
    }

    /// All rows in authoring order, shadowed duplicates included
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Authoritative rows (one per distinct tuple), in authoring order
    pub fn resolved_entries(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.authoritative.iter().map(move |&i| &self.entries[i])
    }

    /// Number of distinct trait tuples
    pub fn resolved_len(&self) -> usize {
        self.authoritative.len()
    }

    /// Number of rows shadowed by an earlier definition of the same tuple
    pub fn shadowed_rows(&self) -> usize {
        self.shadowed
    }

    /// Exact-match lookup against the authoritative mapping
    pub fn lookup_exact(&self, selection: &TraitSelection) -> Option<&CatalogEntry> {
        self.index.get(selection).map(|&i| &self.entries[i])
    }

    /// Number of distinct species across all rows
    pub fn distinct_species(&self) -> usize {
        self.entries
            .iter()
            .map(|e| e.species.as_str())
            .collect::<HashSet<_>>()
            .len()
    }

    /// Number of distinct families across all rows
    pub fn family_count(&self) -> usize {
        self.entries
            .iter()
            .map(|e| e.family.as_str())
            .collect::<HashSet<_>>()
            .len()
    }

    /// Family details, falling back to a complete placeholder
    pub fn family_info(&self, family: &str) -> FamilyInfo {
        self.families
            .get(family)
            .cloned()
            .unwrap_or_else(|| FamilyInfo::placeholder(family))
    }

    /// Taxonomy record for a species, synthesized when not curated
    pub fn taxonomy_for(&self, species: &str, family: &str) -> TaxonomyRecord {
        self.taxa
            .get(species)
            .cloned()
            .unwrap_or_else(|| TaxonomyRecord::synthesize(species, family))
    }
}
