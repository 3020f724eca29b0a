//! # htma-personas
//!
//! Persona selection and custom persona management for the HTMA platform.
//!
//! [`PersonaService`] drives the contracts from `htma-core` over any
//! [`PersonaRepository`](htma_core::PersonaRepository) and
//! [`PreferenceStore`](htma_core::PreferenceStore). In-memory stores are
//! provided for tests and single-process deployments.

pub mod config;
pub mod memory;
pub mod service;

pub use config::{ConfigError, ConfigResult, PersonaConfig};
pub use memory::{InMemoryPersonaRepository, InMemoryPreferenceStore};
pub use service::PersonaService;
