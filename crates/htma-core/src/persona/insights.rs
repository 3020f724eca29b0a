//! Persona insights facet: metric emphasis, alerting, and briefing settings.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PrimaryMetric {
    Progress,
    Risk,
    Timeline,
    Quality,
    ResourceUtilization,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    Blockers,
    Overdue,
    HighRisk,
    DecisionNeeded,
    ResourceConflicts,
}

/// Tone of the AI assistant while the persona is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AiPersonality {
    Analytical,
    Supportive,
    Directive,
    Collaborative,
    Strategic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum BriefingStyle {
    Summary,
    Detailed,
    ActionOriented,
    Strategic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum NotificationFrequency {
    RealTime,
    Hourly,
    Daily,
    Weekly,
}

/// Trigger values at which an alert escalates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EscalationThresholds {
    /// Risk score in `0.0..=1.0`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk: Option<f64>,

    /// Days overdue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overdue: Option<u32>,

    /// Number of blocked items.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocked: Option<u32>,
}

impl EscalationThresholds {
    pub fn new(risk: f64, overdue: u32, blocked: u32) -> Self {
        Self {
            risk: Some(risk),
            overdue: Some(overdue),
            blocked: Some(blocked),
        }
    }

    /// Whether a risk score reaches the risk trigger.
    ///
    /// Unset thresholds never trigger.
    pub fn risk_triggered(&self, score: f64) -> bool {
        self.risk.map(|t| score >= t).unwrap_or(false)
    }

    /// Whether an item this many days overdue reaches the overdue trigger.
    pub fn overdue_triggered(&self, days: u32) -> bool {
        self.overdue.map(|t| days >= t).unwrap_or(false)
    }

    /// Whether this many blocked items exceed the blocked trigger.
    ///
    /// A threshold of 0 means any blocked item escalates, so the comparison
    /// is strict.
    pub fn blocked_triggered(&self, count: u32) -> bool {
        self.blocked.map(|t| count > t).unwrap_or(false)
    }
}

/// Insights facet of a persona.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PersonaInsights {
    /// Metrics to emphasize, most important first.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_metrics: Option<Vec<PrimaryMetric>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert_types: Option<Vec<AlertType>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_personality: Option<AiPersonality>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub briefing_style: Option<BriefingStyle>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_frequency: Option<NotificationFrequency>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub escalation_thresholds: Option<EscalationThresholds>,
}

impl PersonaInsights {
    /// Whether alerts of this type are surfaced.
    pub fn surfaces(&self, alert: AlertType) -> bool {
        self.alert_types
            .as_ref()
            .map(|types| types.contains(&alert))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thresholds_unset_never_trigger() {
        let thresholds = EscalationThresholds::default();
        assert!(!thresholds.risk_triggered(1.0));
        assert!(!thresholds.overdue_triggered(365));
        assert!(!thresholds.blocked_triggered(100));
    }

    #[test]
    fn test_thresholds_trigger_at_boundary() {
        let thresholds = EscalationThresholds::new(0.7, 7, 1);
        assert!(thresholds.risk_triggered(0.7));
        assert!(!thresholds.risk_triggered(0.69));
        assert!(thresholds.overdue_triggered(7));
        assert!(!thresholds.overdue_triggered(6));
        assert!(!thresholds.blocked_triggered(1));
        assert!(thresholds.blocked_triggered(2));
    }

    #[test]
    fn test_zero_blocked_threshold_escalates_any_block() {
        let thresholds = EscalationThresholds::new(0.5, 1, 0);
        assert!(!thresholds.blocked_triggered(0));
        assert!(thresholds.blocked_triggered(1));
    }

    #[test]
    fn test_surfaces() {
        let insights = PersonaInsights {
            alert_types: Some(vec![AlertType::Blockers, AlertType::Overdue]),
            ..Default::default()
        };
        assert!(insights.surfaces(AlertType::Overdue));
        assert!(!insights.surfaces(AlertType::HighRisk));
        assert!(!PersonaInsights::default().surfaces(AlertType::Blockers));
    }

    #[test]
    fn test_insights_wire_values() {
        let insights = PersonaInsights {
            primary_metrics: Some(vec![PrimaryMetric::ResourceUtilization]),
            briefing_style: Some(BriefingStyle::ActionOriented),
            notification_frequency: Some(NotificationFrequency::RealTime),
            ..Default::default()
        };
        let json = serde_json::to_string(&insights).unwrap();
        assert!(json.contains(r#""primaryMetrics":["resource_utilization"]"#));
        assert!(json.contains(r#""briefingStyle":"action_oriented""#));
        assert!(json.contains(r#""notificationFrequency":"real_time""#));
    }
}
