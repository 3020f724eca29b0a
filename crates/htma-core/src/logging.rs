//! Structured logging field name constants for HTMA services.
//!
//! Persona code logs through `tracing` with these field names so that log
//! aggregation can query the same keys across every consumer of this crate.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Degraded service, requires operator attention |
//! | WARN  | Rejected operation (forbidden, unknown persona) |
//! | INFO  | Lifecycle events, completed mutations |
//! | DEBUG | Decision points, config choices |
//! | TRACE | Per-item iteration (catalog scans, search candidates) |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Subsystem originating the log event.
/// Values: "personas", "catalog", "config", "events"
pub const SUBSYSTEM: &str = "subsystem";

/// Logical operation name.
/// Examples: "switch_persona", "delete_persona", "search"
pub const OPERATION: &str = "op";

// ─── Entity fields ─────────────────────────────────────────────────────────

/// User the operation runs as.
pub const USER_ID: &str = "user_id";

/// Organization (tenant) scope.
pub const ORGANIZATION_ID: &str = "organization_id";

/// Persona being operated on.
pub const PERSONA_ID: &str = "persona_id";

/// Previously active persona during a switch.
pub const PREVIOUS_PERSONA_ID: &str = "previous_persona_id";

/// Role string used for catalog role matching.
pub const ROLE: &str = "role";

/// Category string used for catalog grouping.
pub const CATEGORY: &str = "category";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Number of results returned by a lookup or search.
pub const RESULT_COUNT: &str = "result_count";

/// Number of filter facets that were set.
pub const FACET_COUNT: &str = "facet_count";

// ─── Outcome fields ────────────────────────────────────────────────────────

/// Boolean success/failure indicator.
pub const SUCCESS: &str = "success";

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";
