//! Immutable registry of predefined personas.
//!
//! The built-in catalog is initialised once per process on first use and
//! never mutated afterwards, so concurrent readers need no synchronisation.
//!
//! # Example
//!
//! ```
//! use htma_core::PersonaCatalog;
//!
//! let catalog = PersonaCatalog::builtin();
//! let executives: Vec<&str> = catalog
//!     .by_category("Executive")
//!     .iter()
//!     .map(|p| p.id.as_str())
//!     .collect();
//! assert_eq!(
//!     executives,
//!     vec!["executive-strategic-visionary", "executive-crisis-manager"]
//! );
//! ```

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use tracing::trace;

use crate::error::{Error, Result};
use crate::persona::PredefinedPersona;
use crate::predefined::predefined_personas;

static BUILTIN: Lazy<PersonaCatalog> = Lazy::new(|| {
    let personas = predefined_personas();
    PersonaCatalog {
        by_id: index_by_id(&personas),
        personas,
    }
});

fn index_by_id(personas: &[PredefinedPersona]) -> HashMap<String, usize> {
    personas
        .iter()
        .enumerate()
        .map(|(i, p)| (p.id.clone(), i))
        .collect()
}

/// Read-only set of predefined personas indexed by id.
#[derive(Debug, Clone)]
pub struct PersonaCatalog {
    personas: Vec<PredefinedPersona>,
    by_id: HashMap<String, usize>,
}

impl PersonaCatalog {
    /// Build a catalog, rejecting duplicate ids.
    pub fn new(personas: Vec<PredefinedPersona>) -> Result<Self> {
        let by_id = index_by_id(&personas);
        if by_id.len() != personas.len() {
            let mut seen = HashSet::new();
            for p in &personas {
                if !seen.insert(p.id.as_str()) {
                    return Err(Error::InvalidInput(format!(
                        "duplicate persona id in catalog: {}",
                        p.id
                    )));
                }
            }
        }
        Ok(Self { personas, by_id })
    }

    /// The process-wide built-in catalog.
    pub fn builtin() -> &'static PersonaCatalog {
        &BUILTIN
    }

    pub fn get(&self, id: &str) -> Option<&PredefinedPersona> {
        self.by_id.get(id).map(|&i| &self.personas[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Personas in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &PredefinedPersona> {
        self.personas.iter()
    }

    pub fn len(&self) -> usize {
        self.personas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.personas.is_empty()
    }

    /// Personas whose category equals `category` exactly (case-sensitive),
    /// in declaration order.
    pub fn by_category(&self, category: &str) -> Vec<&PredefinedPersona> {
        let found: Vec<_> = self
            .personas
            .iter()
            .filter(|p| p.category == category)
            .collect();
        trace!(category, result_count = found.len(), "catalog category lookup");
        found
    }

    /// Personas with at least one target role that contains `role` or is
    /// contained in it, ignoring case.
    pub fn by_role(&self, role: &str) -> Vec<&PredefinedPersona> {
        let found: Vec<_> = self
            .personas
            .iter()
            .filter(|p| p.matches_role(role))
            .collect();
        trace!(role, result_count = found.len(), "catalog role lookup");
        found
    }

    /// Distinct categories in order of first occurrence.
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for p in &self.personas {
            if !categories.contains(&p.category.as_str()) {
                categories.push(&p.category);
            }
        }
        categories
    }
}
