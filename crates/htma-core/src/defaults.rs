//! Centralized default constants for HTMA persona handling.
//!
//! Crates consuming the persona contracts should reference these constants
//! instead of defining their own magic numbers.

// =============================================================================
// PERSONA SELECTION
// =============================================================================

/// Predefined persona assigned on a user's first access.
pub const DEFAULT_PERSONA_ID: &str = "individual-contributor";

/// Length of a user's recently-used persona list.
pub const MAX_RECENT_PERSONAS: usize = 5;

/// Maximum number of custom personas a single user may own.
pub const MAX_CUSTOM_PERSONAS: usize = 50;

/// Owner recorded on predefined personas projected to profiles.
pub const SYSTEM_OWNER: &str = "system";

// =============================================================================
// VALIDATION
// =============================================================================

/// Maximum persona name length in characters.
pub const NAME_MAX_LEN: usize = 255;

/// Maximum persona description length in characters.
pub const DESCRIPTION_MAX_LEN: usize = 1000;

/// Maximum number of tags on a persona.
pub const MAX_TAGS: usize = 20;

/// Maximum tag length in characters.
pub const TAG_MAX_LEN: usize = 50;

/// Upper bound of the progress percentage scale.
pub const PROGRESS_MAX: f64 = 100.0;

// =============================================================================
// PAGINATION
// =============================================================================

/// Default page size for persona search.
pub const PAGE_LIMIT: usize = 20;

/// Largest page size a search request may ask for.
pub const PAGE_LIMIT_MAX: usize = 100;

// =============================================================================
// EVENTS
// =============================================================================

/// Default event bus broadcast channel capacity.
pub const EVENT_BUS_CAPACITY: usize = 256;
