//! Result shape of applying a persona filter to a work-item view.
//!
//! The filtering itself belongs to the work-item query service. This module
//! pins down what that collaborator hands back: the surviving items, the
//! counts, and the facets that were in force so a UI can explain why an item
//! is shown or hidden.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::{Error, Result};
use crate::persona::PersonaFilter;

/// Filtered view produced under a persona.
///
/// Deserialization enforces `totalFiltered <= totalAvailable` like [`new`].
///
/// [`new`]: PersonaFilterApplied::new
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    rename_all = "camelCase",
    try_from = "RawFilterApplied<W, M, I>",
    bound(deserialize = "W: Deserialize<'de>, M: Deserialize<'de>, I: Deserialize<'de>")
)]
pub struct PersonaFilterApplied<W = JsonValue, M = JsonValue, I = JsonValue> {
    pub work_items: Vec<W>,
    pub metrics: M,
    pub insights: Vec<I>,
    pub total_filtered: usize,
    pub total_available: usize,
    /// Wire names of the filter facets that were set.
    pub applied_filters: Vec<String>,
}

/// Unchecked wire shape.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFilterApplied<W, M, I> {
    work_items: Vec<W>,
    metrics: M,
    insights: Vec<I>,
    total_filtered: usize,
    total_available: usize,
    applied_filters: Vec<String>,
}

fn check_totals(total_filtered: usize, total_available: usize) -> Result<()> {
    if total_filtered > total_available {
        return Err(Error::InvalidInput(format!(
            "totalFiltered ({}) exceeds totalAvailable ({})",
            total_filtered, total_available
        )));
    }
    Ok(())
}

impl<W, M, I> TryFrom<RawFilterApplied<W, M, I>> for PersonaFilterApplied<W, M, I> {
    type Error = Error;

    fn try_from(raw: RawFilterApplied<W, M, I>) -> Result<Self> {
        check_totals(raw.total_filtered, raw.total_available)?;
        Ok(Self {
            work_items: raw.work_items,
            metrics: raw.metrics,
            insights: raw.insights,
            total_filtered: raw.total_filtered,
            total_available: raw.total_available,
            applied_filters: raw.applied_filters,
        })
    }
}

impl<W, M, I> PersonaFilterApplied<W, M, I> {
    /// Assemble a result, deriving `total_filtered` from the item count and
    /// `applied_filters` from the filter.
    ///
    /// Fails when more items survive than were available.
    pub fn new(
        filter: &PersonaFilter,
        work_items: Vec<W>,
        metrics: M,
        insights: Vec<I>,
        total_available: usize,
    ) -> Result<Self> {
        let total_filtered = work_items.len();
        check_totals(total_filtered, total_available)?;
        Ok(Self {
            work_items,
            metrics,
            insights,
            total_filtered,
            total_available,
            applied_filters: filter
                .applied_filters()
                .into_iter()
                .map(String::from)
                .collect(),
        })
    }

    /// True when the filter removed nothing.
    pub fn is_noop(&self) -> bool {
        self.total_filtered == self.total_available
    }

    /// Number of items the filter removed.
    pub fn hidden_count(&self) -> usize {
        self.total_available.saturating_sub(self.total_filtered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persona::{AssignmentScope, PersonaStatus};
    use serde_json::json;

    #[test]
    fn test_new_derives_counts_and_facets() {
        let filter = PersonaFilter::new()
            .with_statuses([PersonaStatus::Blocked])
            .with_assignment_scope(AssignmentScope::MyTeam);
        let applied: PersonaFilterApplied =
            PersonaFilterApplied::new(&filter, vec![json!({"id": "w1"})], json!({}), vec![], 4)
                .unwrap();

        assert_eq!(applied.total_filtered, 1);
        assert_eq!(applied.total_available, 4);
        assert_eq!(applied.hidden_count(), 3);
        assert!(!applied.is_noop());
        assert_eq!(applied.applied_filters, vec!["statuses", "assignmentScope"]);
    }

    #[test]
    fn test_more_filtered_than_available_is_rejected() {
        let result = PersonaFilterApplied::<u32, (), ()>::new(
            &PersonaFilter::new(),
            vec![1, 2, 3],
            (),
            vec![],
            2,
        );
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_empty_filter_noop() {
        let applied =
            PersonaFilterApplied::<u32, (), ()>::new(&PersonaFilter::new(), vec![1, 2], (), vec![], 2)
                .unwrap();
        assert!(applied.is_noop());
        assert!(applied.applied_filters.is_empty());
    }

    #[test]
    fn test_wire_format() {
        let applied: PersonaFilterApplied =
            PersonaFilterApplied::new(&PersonaFilter::new(), vec![], json!({"velocity": 3}), vec![], 0)
                .unwrap();
        let value = serde_json::to_value(&applied).unwrap();
        assert_eq!(value["totalFiltered"], 0);
        assert_eq!(value["totalAvailable"], 0);
        assert_eq!(value["metrics"]["velocity"], 3);
        assert!(value["appliedFilters"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_deserialize_rejects_more_filtered_than_available() {
        let result: std::result::Result<PersonaFilterApplied, _> = serde_json::from_value(json!({
            "workItems": [],
            "metrics": {},
            "insights": [],
            "totalFiltered": 3,
            "totalAvailable": 1,
            "appliedFilters": []
        }));
        let err = result.unwrap_err();
        assert!(err.to_string().contains("exceeds totalAvailable"));
    }

    #[test]
    fn test_deserialize_valid_result() {
        let applied: PersonaFilterApplied = serde_json::from_value(json!({
            "workItems": [{"id": "w1"}],
            "metrics": {},
            "insights": [],
            "totalFiltered": 1,
            "totalAvailable": 5,
            "appliedFilters": ["statuses"]
        }))
        .unwrap();
        assert_eq!(applied.hidden_count(), 4);
        assert_eq!(applied.applied_filters, vec!["statuses"]);
    }

    #[test]
    fn test_hidden_count_saturates_on_inconsistent_fields() {
        let mut applied =
            PersonaFilterApplied::<u32, (), ()>::new(&PersonaFilter::new(), vec![1], (), vec![], 1)
                .unwrap();
        applied.total_available = 0;
        assert_eq!(applied.hidden_count(), 0);
    }
}
