//! # Plantify Core Library
//!
//! Classification core for the Plantify herb identifier:
//! - Trait attribute registry and input validation
//! - Versioned reference catalog (trait rows, family details, taxonomy)
//! - One-hot feature schema, fixed once at catalog-load time
//! - Deterministic decision-tree resolver with confidence reporting
//!
//! Everything here is read-only after construction; a built [`Resolver`]
//! can serve unlimited concurrent resolutions without locking.

pub mod catalog;
pub mod crossval;
pub mod encoding;
pub mod error;
pub mod resolver;
pub mod traits;
pub mod tree;
pub mod validate;

pub use error::{Error, Result};
pub use resolver::{Resolution, Resolver, LOW_CONFIDENCE_THRESHOLD};
pub use traits::{Attribute, TraitSelection};
