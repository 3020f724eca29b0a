//! # htma-core
//!
//! Persona contracts for the HTMA platform.
//!
//! This crate provides the persona data model (filter, layout, and insights
//! facets), the predefined persona catalog, the per-user preference state
//! machine, request validation, persona events, and the storage traits that
//! backend crates implement.

pub mod applied;
pub mod catalog;
pub mod defaults;
pub mod error;
pub mod events;
pub mod logging;
pub mod persona;
pub mod predefined;
pub mod preference;
pub mod requests;
pub mod traits;
pub mod uuid_utils;

// Re-export commonly used types at crate root
pub use applied::PersonaFilterApplied;
pub use catalog::PersonaCatalog;
pub use error::{Error, Result};
pub use events::{EventActor, EventBus, EventContext, EventEnvelope, PersonaEvent};
pub use persona::*;
pub use predefined::predefined_personas;
pub use preference::{SessionEntry, UserPersonaPreference};
pub use requests::{
    CreatePersonaRequest, PersonaSearchRequest, PersonaSearchResponse, UpdatePersonaRequest,
};
pub use traits::*;
pub use uuid_utils::{extract_timestamp, is_v7, new_persona_id, new_v7};
