//! Persona configuration model.
//!
//! A persona bundles three independent facets: a [`PersonaFilter`] over work
//! items, a [`PersonaLayout`] for the rendering layer, and
//! [`PersonaInsights`] for metrics and notifications.

pub mod filter;
pub mod insights;
pub mod layout;
pub mod profile;

pub use filter::*;
pub use insights::*;
pub use layout::*;
pub use profile::*;
