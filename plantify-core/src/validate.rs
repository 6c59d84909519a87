//! Input validation for trait selections
//!
//! Runs before encoding; encoding is undefined for unvalidated input.
//! Checks fields in canonical attribute order and reports the first
//! offender, so the caller can point the user at one concrete field.

use crate::error::{Error, Result};
use crate::traits::{Attribute, TraitSelection};

/// Check every field of `selection` against its closed value set.
///
/// Returns the first failure in canonical attribute order: an empty field
/// is reported as missing, an out-of-set value as invalid.
pub fn validate(selection: &TraitSelection) -> Result<()> {
    for attribute in Attribute::ALL {
        let value = selection.get(attribute);
        if value.is_empty() {
            return Err(Error::MissingTrait {
                field: attribute.name(),
            });
        }
        if !attribute.is_legal(value) {
            return Err(Error::InvalidTrait {
                field: attribute.name(),
                value: value.to_string(),
            });
        }
    }
    Ok(())
}
