//! Persona filter facet: independent, optional predicates over work items.
//!
//! Every field of [`PersonaFilter`] is optional and unset means "no
//! constraint from this facet". List allowlists combine with OR inside the
//! list and AND across facets. Booleans keep `None` apart from
//! `Some(false)`: the first is no constraint, the second an explicit
//! exclusion.
//!
//! # Example
//!
//! ```
//! use htma_core::{PersonaFilter, Timeframe, WorkItemType};
//!
//! let filter = PersonaFilter::new()
//!     .with_work_item_types([WorkItemType::Objective, WorkItemType::Strategy])
//!     .with_timeframe(Timeframe::ThisQuarter)
//!     .show_completed(false);
//!
//! assert_eq!(
//!     filter.applied_filters(),
//!     vec!["workItemTypes", "timeframe", "showCompleted"]
//! );
//! ```

use serde::{Deserialize, Serialize};

// =============================================================================
// VALUE SETS
// =============================================================================

/// Work item level in the objective → subtask hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum WorkItemType {
    Objective,
    Strategy,
    Initiative,
    Task,
    Subtask,
}

/// Work item status as seen by persona filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PersonaStatus {
    NotStarted,
    InProgress,
    Completed,
    OnHold,
    Cancelled,
    Blocked,
}

/// Four-step severity scale shared by priorities and risk levels.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, utoipa::ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum PriorityLevel {
    Low,
    Medium,
    High,
    Critical,
}

/// Risk levels use the same scale as priorities.
pub type RiskLevel = PriorityLevel;

/// Time window a persona focuses on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Timeframe {
    Today,
    ThisWeek,
    ThisMonth,
    ThisQuarter,
    All,
}

/// Whose work items a persona shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentScope {
    MyItems,
    MyTeam,
    MyDepartment,
    Organization,
    AllVisible,
}

// =============================================================================
// NESTED RANGES
// =============================================================================

/// Due-date window.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DueDateRange {
    /// Include overdue items.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overdue: Option<bool>,

    /// Include items due within this many days.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upcoming: Option<u32>,

    /// Include completed items.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl DueDateRange {
    /// True when no sub-field is set.
    pub fn is_empty(&self) -> bool {
        self.overdue.is_none() && self.upcoming.is_none() && self.completed.is_none()
    }
}

/// Progress percentage band plus schedule-health flags.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProgressThresholds {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_track: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub behind_schedule: Option<bool>,
}

impl ProgressThresholds {
    /// True when no sub-field is set.
    pub fn is_empty(&self) -> bool {
        self.min.is_none()
            && self.max.is_none()
            && self.on_track.is_none()
            && self.behind_schedule.is_none()
    }
}

// =============================================================================
// PERSONA FILTER
// =============================================================================

/// Data filter facet of a persona.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PersonaFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_item_types: Option<Vec<WorkItemType>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub statuses: Option<Vec<PersonaStatus>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub priorities: Option<Vec<PriorityLevel>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeframe: Option<Timeframe>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date_range: Option<DueDateRange>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignment_scope: Option<AssignmentScope>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_watching: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_created: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_levels: Option<Vec<RiskLevel>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress_thresholds: Option<ProgressThresholds>,

    /// Deepest hierarchy level to show (1 = roots).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_level_only: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_completed: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_cancelled: Option<bool>,
}

fn non_empty<T>(list: &Option<Vec<T>>) -> bool {
    list.as_ref().map(|l| !l.is_empty()).unwrap_or(false)
}

impl PersonaFilter {
    /// Create an empty filter (no constraints).
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // BUILDER METHODS
    // =========================================================================

    pub fn with_work_item_types(mut self, types: impl IntoIterator<Item = WorkItemType>) -> Self {
        self.work_item_types = Some(types.into_iter().collect());
        self
    }

    pub fn with_statuses(mut self, statuses: impl IntoIterator<Item = PersonaStatus>) -> Self {
        self.statuses = Some(statuses.into_iter().collect());
        self
    }

    pub fn with_priorities(mut self, priorities: impl IntoIterator<Item = PriorityLevel>) -> Self {
        self.priorities = Some(priorities.into_iter().collect());
        self
    }

    pub fn with_timeframe(mut self, timeframe: Timeframe) -> Self {
        self.timeframe = Some(timeframe);
        self
    }

    pub fn with_due_date_range(mut self, range: DueDateRange) -> Self {
        self.due_date_range = Some(range);
        self
    }

    pub fn with_assignment_scope(mut self, scope: AssignmentScope) -> Self {
        self.assignment_scope = Some(scope);
        self
    }

    pub fn include_watching(mut self, include: bool) -> Self {
        self.include_watching = Some(include);
        self
    }

    pub fn include_created(mut self, include: bool) -> Self {
        self.include_created = Some(include);
        self
    }

    pub fn with_risk_levels(mut self, levels: impl IntoIterator<Item = RiskLevel>) -> Self {
        self.risk_levels = Some(levels.into_iter().collect());
        self
    }

    pub fn with_progress_thresholds(mut self, thresholds: ProgressThresholds) -> Self {
        self.progress_thresholds = Some(thresholds);
        self
    }

    pub fn with_max_depth(mut self, depth: u32) -> Self {
        self.max_depth = Some(depth);
        self
    }

    pub fn root_level_only(mut self, root_only: bool) -> Self {
        self.root_level_only = Some(root_only);
        self
    }

    pub fn show_completed(mut self, show: bool) -> Self {
        self.show_completed = Some(show);
        self
    }

    pub fn show_cancelled(mut self, show: bool) -> Self {
        self.show_cancelled = Some(show);
        self
    }

    // =========================================================================
    // CONSTRAINT CHECKS
    // =========================================================================

    /// Names (wire spelling) of the facets this filter actually constrains,
    /// in field declaration order.
    ///
    /// A facet counts when it is set: lists must be non-empty and nested
    /// ranges must have at least one sub-field. Explicit `false` counts.
    pub fn applied_filters(&self) -> Vec<&'static str> {
        let mut applied = Vec::new();
        if non_empty(&self.work_item_types) {
            applied.push("workItemTypes");
        }
        if non_empty(&self.statuses) {
            applied.push("statuses");
        }
        if non_empty(&self.priorities) {
            applied.push("priorities");
        }
        if self.timeframe.is_some() {
            applied.push("timeframe");
        }
        if self
            .due_date_range
            .as_ref()
            .map(|r| !r.is_empty())
            .unwrap_or(false)
        {
            applied.push("dueDateRange");
        }
        if self.assignment_scope.is_some() {
            applied.push("assignmentScope");
        }
        if self.include_watching.is_some() {
            applied.push("includeWatching");
        }
        if self.include_created.is_some() {
            applied.push("includeCreated");
        }
        if non_empty(&self.risk_levels) {
            applied.push("riskLevels");
        }
        if self
            .progress_thresholds
            .as_ref()
            .map(|p| !p.is_empty())
            .unwrap_or(false)
        {
            applied.push("progressThresholds");
        }
        if self.max_depth.is_some() {
            applied.push("maxDepth");
        }
        if self.root_level_only.is_some() {
            applied.push("rootLevelOnly");
        }
        if self.show_completed.is_some() {
            applied.push("showCompleted");
        }
        if self.show_cancelled.is_some() {
            applied.push("showCancelled");
        }
        applied
    }

    /// Check if the filter constrains nothing.
    pub fn is_empty(&self) -> bool {
        self.applied_filters().is_empty()
    }

    /// Number of facets that are set.
    pub fn active_facet_count(&self) -> usize {
        self.applied_filters().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filter() {
        let filter = PersonaFilter::new();
        assert!(filter.is_empty());
        assert_eq!(filter.active_facet_count(), 0);
    }

    #[test]
    fn test_empty_lists_are_not_applied() {
        let filter = PersonaFilter {
            statuses: Some(vec![]),
            risk_levels: Some(vec![]),
            ..Default::default()
        };
        assert!(filter.is_empty());
    }

    #[test]
    fn test_empty_nested_ranges_are_not_applied() {
        let filter = PersonaFilter::new()
            .with_due_date_range(DueDateRange::default())
            .with_progress_thresholds(ProgressThresholds::default());
        assert!(filter.is_empty());
    }

    #[test]
    fn test_explicit_false_is_applied() {
        let filter = PersonaFilter::new().show_completed(false).include_watching(false);
        assert_eq!(filter.applied_filters(), vec!["includeWatching", "showCompleted"]);
    }

    #[test]
    fn test_applied_filters_follow_declaration_order() {
        let filter = PersonaFilter::new()
            .show_cancelled(true)
            .with_max_depth(2)
            .with_priorities([PriorityLevel::High])
            .with_assignment_scope(AssignmentScope::MyTeam)
            .with_due_date_range(DueDateRange {
                upcoming: Some(7),
                ..Default::default()
            });

        assert_eq!(
            filter.applied_filters(),
            vec![
                "priorities",
                "dueDateRange",
                "assignmentScope",
                "maxDepth",
                "showCancelled"
            ]
        );
    }

    #[test]
    fn test_unset_fields_are_omitted_on_the_wire() {
        let filter = PersonaFilter::new().with_timeframe(Timeframe::ThisWeek);
        let json = serde_json::to_value(&filter).unwrap();
        assert_eq!(json, serde_json::json!({"timeframe": "this_week"}));
    }

    #[test]
    fn test_wire_names_are_camel_case() {
        let filter = PersonaFilter::new()
            .with_work_item_types([WorkItemType::Subtask])
            .with_statuses([PersonaStatus::NotStarted])
            .with_progress_thresholds(ProgressThresholds {
                behind_schedule: Some(true),
                ..Default::default()
            });
        let json = serde_json::to_string(&filter).unwrap();
        assert!(json.contains(r#""workItemTypes":["subtask"]"#));
        assert!(json.contains(r#""statuses":["not_started"]"#));
        assert!(json.contains(r#""progressThresholds":{"behindSchedule":true}"#));
    }

    #[test]
    fn test_priority_ordering() {
        assert!(PriorityLevel::Critical > PriorityLevel::High);
        assert!(PriorityLevel::Low < PriorityLevel::Medium);
    }
}
