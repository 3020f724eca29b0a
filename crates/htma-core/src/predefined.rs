//! Built-in persona table.
//!
//! Personas are pure data: adding one means adding an entry here, never a
//! persona-specific branch elsewhere. Declaration order is significant for
//! category and role lookups.

use crate::persona::*;

fn roles(labels: &[&str]) -> Vec<String> {
    labels.iter().map(|s| s.to_string()).collect()
}

#[allow(clippy::too_many_arguments)]
fn components(
    portfolio_map: bool,
    metrics_overview: bool,
    recent_activity: bool,
    ai_assistant: bool,
    dependency_graph: bool,
    risk_alerts: bool,
    performance_charts: bool,
    team_status: bool,
) -> Option<ComponentVisibility> {
    Some(ComponentVisibility {
        portfolio_map: Some(portfolio_map),
        metrics_overview: Some(metrics_overview),
        recent_activity: Some(recent_activity),
        ai_assistant: Some(ai_assistant),
        dependency_graph: Some(dependency_graph),
        risk_alerts: Some(risk_alerts),
        performance_charts: Some(performance_charts),
        team_status: Some(team_status),
    })
}

fn schedule_health(on_track: Option<bool>, behind_schedule: Option<bool>) -> ProgressThresholds {
    ProgressThresholds {
        min: None,
        max: None,
        on_track,
        behind_schedule,
    }
}

fn due(overdue: Option<bool>, upcoming: Option<u32>) -> DueDateRange {
    DueDateRange {
        overdue,
        upcoming,
        completed: None,
    }
}

/// The built-in personas, in declaration order.
pub fn predefined_personas() -> Vec<PredefinedPersona> {
    use AlertType::*;
    use PrimaryMetric::*;

    vec![
        // ===== EXECUTIVE =====
        PredefinedPersona {
            id: "executive-strategic-visionary".to_string(),
            name: "Strategic Visionary".to_string(),
            description: "Focus on long-term objectives, strategic initiatives, and organizational alignment".to_string(),
            icon: "🎯".to_string(),
            color: "#8B5CF6".to_string(),
            category: "Executive".to_string(),
            target_roles: roles(&["CEO", "President", "VP", "C-Suite"]),
            filters: PersonaFilter::new()
                .with_work_item_types([WorkItemType::Objective, WorkItemType::Strategy])
                .with_timeframe(Timeframe::ThisQuarter)
                .with_assignment_scope(AssignmentScope::Organization)
                .show_completed(false)
                .with_max_depth(2)
                .with_progress_thresholds(schedule_health(Some(true), Some(true))),
            layout: PersonaLayout {
                default_view: Some(DefaultView::Executive),
                components: components(true, true, false, true, true, true, true, false),
                layout_density: Some(LayoutDensity::Comfortable),
                default_sort: Some(SortSpec::desc(SortField::Priority)),
                group_by: Some(GroupBy::Type),
                emphasis_style: Some(EmphasisStyle::Bold),
                ..Default::default()
            },
            insights: PersonaInsights {
                primary_metrics: Some(vec![Progress, Risk, Timeline]),
                alert_types: Some(vec![HighRisk, DecisionNeeded, Blockers]),
                ai_personality: Some(AiPersonality::Strategic),
                briefing_style: Some(BriefingStyle::Strategic),
                notification_frequency: Some(NotificationFrequency::Daily),
                escalation_thresholds: Some(EscalationThresholds::new(0.7, 7, 1)),
            },
        },
        PredefinedPersona {
            id: "executive-crisis-manager".to_string(),
            name: "Crisis Manager".to_string(),
            description: "Immediate focus on blocked items, urgent decisions, and critical risks".to_string(),
            icon: "🚨".to_string(),
            color: "#EF4444".to_string(),
            category: "Executive".to_string(),
            target_roles: roles(&["CEO", "President", "VP", "Director"]),
            filters: PersonaFilter::new()
                .with_statuses([PersonaStatus::Blocked, PersonaStatus::OnHold])
                .with_priorities([PriorityLevel::Critical, PriorityLevel::High])
                .with_timeframe(Timeframe::All)
                .with_assignment_scope(AssignmentScope::Organization)
                .with_due_date_range(due(Some(true), Some(7)))
                .with_risk_levels([PriorityLevel::Critical, PriorityLevel::High])
                .show_completed(false)
                .show_cancelled(false),
            layout: PersonaLayout {
                default_view: Some(DefaultView::Portfolio),
                components: components(true, true, true, true, false, true, false, true),
                layout_density: Some(LayoutDensity::Compact),
                default_sort: Some(SortSpec::desc(SortField::RiskScore)),
                group_by: Some(GroupBy::Priority),
                emphasis_style: Some(EmphasisStyle::Bold),
                accent_color: Some("#EF4444".to_string()),
                ..Default::default()
            },
            insights: PersonaInsights {
                primary_metrics: Some(vec![Risk, Timeline]),
                alert_types: Some(vec![
                    Blockers,
                    Overdue,
                    HighRisk,
                    DecisionNeeded,
                    ResourceConflicts,
                ]),
                ai_personality: Some(AiPersonality::Directive),
                briefing_style: Some(BriefingStyle::ActionOriented),
                notification_frequency: Some(NotificationFrequency::RealTime),
                escalation_thresholds: Some(EscalationThresholds::new(0.5, 1, 0)),
            },
        },
        // ===== MANAGEMENT AND INDIVIDUAL =====
        PredefinedPersona {
            id: "team-leader".to_string(),
            name: "Team Leader".to_string(),
            description: "Focus on team performance, resource allocation, and member development".to_string(),
            icon: "👥".to_string(),
            color: "#10B981".to_string(),
            category: "Management".to_string(),
            target_roles: roles(&["Manager", "Team Lead", "Director"]),
            filters: PersonaFilter::new()
                .with_assignment_scope(AssignmentScope::MyTeam)
                .with_timeframe(Timeframe::ThisMonth)
                .include_watching(true)
                .include_created(true)
                .show_completed(true)
                .with_progress_thresholds(schedule_health(Some(true), Some(true))),
            layout: PersonaLayout {
                default_view: Some(DefaultView::Portfolio),
                components: components(true, true, true, true, false, true, true, true),
                layout_density: Some(LayoutDensity::Comfortable),
                default_sort: Some(SortSpec::asc(SortField::DueDate)),
                group_by: Some(GroupBy::Assignee),
                emphasis_style: Some(EmphasisStyle::Moderate),
                ..Default::default()
            },
            insights: PersonaInsights {
                primary_metrics: Some(vec![Progress, ResourceUtilization, Timeline]),
                alert_types: Some(vec![Overdue, ResourceConflicts, Blockers]),
                ai_personality: Some(AiPersonality::Supportive),
                briefing_style: Some(BriefingStyle::Detailed),
                notification_frequency: Some(NotificationFrequency::Daily),
                escalation_thresholds: Some(EscalationThresholds::new(0.6, 3, 1)),
            },
        },
        PredefinedPersona {
            id: "project-manager".to_string(),
            name: "Project Manager".to_string(),
            description: "Emphasize timelines, dependencies, deliverables, and project health".to_string(),
            icon: "📊".to_string(),
            color: "#3B82F6".to_string(),
            category: "Management".to_string(),
            target_roles: roles(&["Project Manager", "Program Manager", "Delivery Manager"]),
            filters: PersonaFilter::new()
                .with_work_item_types([
                    WorkItemType::Initiative,
                    WorkItemType::Task,
                    WorkItemType::Subtask,
                ])
                .with_assignment_scope(AssignmentScope::MyDepartment)
                .with_timeframe(Timeframe::ThisQuarter)
                .show_completed(true)
                .with_due_date_range(due(Some(true), Some(14))),
            layout: PersonaLayout {
                default_view: Some(DefaultView::Timeline),
                components: components(true, true, true, true, true, true, true, true),
                layout_density: Some(LayoutDensity::Comfortable),
                default_sort: Some(SortSpec::asc(SortField::DueDate)),
                group_by: Some(GroupBy::Status),
                emphasis_style: Some(EmphasisStyle::Moderate),
                ..Default::default()
            },
            insights: PersonaInsights {
                primary_metrics: Some(vec![Timeline, Progress, Quality]),
                alert_types: Some(vec![Overdue, Blockers, ResourceConflicts]),
                ai_personality: Some(AiPersonality::Analytical),
                briefing_style: Some(BriefingStyle::Detailed),
                notification_frequency: Some(NotificationFrequency::Daily),
                escalation_thresholds: Some(EscalationThresholds::new(0.7, 2, 1)),
            },
        },
        PredefinedPersona {
            id: "individual-contributor".to_string(),
            name: "Individual Contributor".to_string(),
            description: "Personal tasks, immediate context, and individual productivity focus".to_string(),
            icon: "🎯".to_string(),
            color: "#8B5CF6".to_string(),
            category: "Individual".to_string(),
            target_roles: roles(&["Developer", "Designer", "Analyst", "Specialist"]),
            filters: PersonaFilter::new()
                .with_assignment_scope(AssignmentScope::MyItems)
                .with_work_item_types([WorkItemType::Task, WorkItemType::Subtask])
                .with_timeframe(Timeframe::ThisWeek)
                .include_watching(true)
                .with_due_date_range(due(Some(true), Some(7)))
                .show_completed(true)
                .with_max_depth(3),
            layout: PersonaLayout {
                default_view: Some(DefaultView::Kanban),
                components: components(true, false, true, true, false, true, false, false),
                layout_density: Some(LayoutDensity::Compact),
                default_sort: Some(SortSpec::desc(SortField::Priority)),
                group_by: Some(GroupBy::Status),
                emphasis_style: Some(EmphasisStyle::Subtle),
                sidebar_collapsed: Some(true),
                ..Default::default()
            },
            insights: PersonaInsights {
                primary_metrics: Some(vec![Progress, Timeline]),
                alert_types: Some(vec![Overdue, Blockers]),
                ai_personality: Some(AiPersonality::Supportive),
                briefing_style: Some(BriefingStyle::ActionOriented),
                notification_frequency: Some(NotificationFrequency::Hourly),
                escalation_thresholds: Some(EscalationThresholds::new(0.8, 1, 0)),
            },
        },
        // ===== ANALYTICS =====
        PredefinedPersona {
            id: "data-analyst".to_string(),
            name: "Data Analyst".to_string(),
            description: "Metrics, trends, performance data, and analytical insights".to_string(),
            icon: "📈".to_string(),
            color: "#F59E0B".to_string(),
            category: "Analytics".to_string(),
            target_roles: roles(&["Data Analyst", "Business Analyst", "Performance Manager"]),
            filters: PersonaFilter::new()
                .with_assignment_scope(AssignmentScope::Organization)
                .with_timeframe(Timeframe::ThisQuarter)
                .show_completed(true)
                .show_cancelled(true)
                .with_progress_thresholds(ProgressThresholds {
                    min: Some(0.0),
                    max: Some(100.0),
                    on_track: Some(true),
                    behind_schedule: Some(true),
                }),
            layout: PersonaLayout {
                default_view: Some(DefaultView::Portfolio),
                components: components(true, true, false, true, true, false, true, false),
                layout_density: Some(LayoutDensity::Spacious),
                default_sort: Some(SortSpec::asc(SortField::Progress)),
                group_by: Some(GroupBy::Type),
                emphasis_style: Some(EmphasisStyle::Moderate),
                ..Default::default()
            },
            insights: PersonaInsights {
                primary_metrics: Some(vec![Progress, Quality, ResourceUtilization, Timeline]),
                alert_types: Some(vec![HighRisk]),
                ai_personality: Some(AiPersonality::Analytical),
                briefing_style: Some(BriefingStyle::Detailed),
                notification_frequency: Some(NotificationFrequency::Weekly),
                escalation_thresholds: Some(EscalationThresholds::new(0.8, 14, 3)),
            },
        },
        PredefinedPersona {
            id: "risk-assessor".to_string(),
            name: "Risk Assessor".to_string(),
            description: "Risk indicators, mitigation needs, and compliance monitoring".to_string(),
            icon: "⚠️".to_string(),
            color: "#F97316".to_string(),
            category: "Analytics".to_string(),
            target_roles: roles(&["Risk Manager", "Compliance Officer", "Quality Assurance"]),
            filters: PersonaFilter::new()
                .with_assignment_scope(AssignmentScope::Organization)
                .with_risk_levels([
                    PriorityLevel::Medium,
                    PriorityLevel::High,
                    PriorityLevel::Critical,
                ])
                .with_statuses([
                    PersonaStatus::Blocked,
                    PersonaStatus::OnHold,
                    PersonaStatus::InProgress,
                ])
                .with_timeframe(Timeframe::All)
                .show_completed(false)
                .with_progress_thresholds(schedule_health(None, Some(true))),
            layout: PersonaLayout {
                default_view: Some(DefaultView::Portfolio),
                components: components(true, true, false, true, true, true, true, false),
                layout_density: Some(LayoutDensity::Comfortable),
                default_sort: Some(SortSpec::desc(SortField::RiskScore)),
                group_by: Some(GroupBy::Priority),
                emphasis_style: Some(EmphasisStyle::Bold),
                accent_color: Some("#F97316".to_string()),
                ..Default::default()
            },
            insights: PersonaInsights {
                primary_metrics: Some(vec![Risk, Quality, Timeline]),
                alert_types: Some(vec![HighRisk, Blockers, ResourceConflicts]),
                ai_personality: Some(AiPersonality::Analytical),
                briefing_style: Some(BriefingStyle::Detailed),
                notification_frequency: Some(NotificationFrequency::Daily),
                escalation_thresholds: Some(EscalationThresholds::new(0.6, 5, 1)),
            },
        },
        // ===== CONTEXTUAL =====
        PredefinedPersona {
            id: "daily-standup".to_string(),
            name: "Daily Standup".to_string(),
            description: "Today's priorities, blockers, and immediate actions".to_string(),
            icon: "☀️".to_string(),
            color: "#06B6D4".to_string(),
            category: "Contextual".to_string(),
            target_roles: roles(&["Developer", "Designer", "Manager", "Team Lead"]),
            filters: PersonaFilter::new()
                .with_assignment_scope(AssignmentScope::MyTeam)
                .with_timeframe(Timeframe::Today)
                .with_statuses([PersonaStatus::InProgress, PersonaStatus::Blocked])
                .with_due_date_range(due(Some(true), Some(1)))
                .include_watching(true)
                .show_completed(false),
            layout: PersonaLayout {
                default_view: Some(DefaultView::Kanban),
                components: components(true, false, true, true, false, true, false, true),
                layout_density: Some(LayoutDensity::Compact),
                default_sort: Some(SortSpec::desc(SortField::Priority)),
                group_by: Some(GroupBy::Assignee),
                emphasis_style: Some(EmphasisStyle::Moderate),
                ..Default::default()
            },
            insights: PersonaInsights {
                primary_metrics: Some(vec![Progress]),
                alert_types: Some(vec![Blockers, Overdue]),
                ai_personality: Some(AiPersonality::Collaborative),
                briefing_style: Some(BriefingStyle::Summary),
                notification_frequency: Some(NotificationFrequency::RealTime),
                escalation_thresholds: Some(EscalationThresholds::new(0.7, 0, 0)),
            },
        },
        PredefinedPersona {
            id: "weekly-review".to_string(),
            name: "Weekly Review".to_string(),
            description: "Weekly progress, upcoming milestones, and retrospective insights".to_string(),
            icon: "📅".to_string(),
            color: "#8B5CF6".to_string(),
            category: "Contextual".to_string(),
            target_roles: roles(&["Manager", "Team Lead", "Project Manager"]),
            filters: PersonaFilter::new()
                .with_assignment_scope(AssignmentScope::MyTeam)
                .with_timeframe(Timeframe::ThisWeek)
                .show_completed(true)
                .with_due_date_range(due(None, Some(7)))
                .include_watching(true)
                .include_created(true),
            layout: PersonaLayout {
                default_view: Some(DefaultView::Portfolio),
                components: components(true, true, true, true, false, true, true, true),
                layout_density: Some(LayoutDensity::Comfortable),
                default_sort: Some(SortSpec::asc(SortField::DueDate)),
                group_by: Some(GroupBy::Status),
                emphasis_style: Some(EmphasisStyle::Moderate),
                ..Default::default()
            },
            insights: PersonaInsights {
                primary_metrics: Some(vec![Progress, Timeline, ResourceUtilization]),
                alert_types: Some(vec![Overdue, HighRisk, ResourceConflicts]),
                ai_personality: Some(AiPersonality::Analytical),
                briefing_style: Some(BriefingStyle::Detailed),
                notification_frequency: Some(NotificationFrequency::Weekly),
                escalation_thresholds: Some(EscalationThresholds::new(0.6, 3, 1)),
            },
        },
        PredefinedPersona {
            id: "quarterly-business-review".to_string(),
            name: "Quarterly Business Review".to_string(),
            description: "High-level objectives, strategic outcomes, and business impact".to_string(),
            icon: "📋".to_string(),
            color: "#6366F1".to_string(),
            category: "Contextual".to_string(),
            target_roles: roles(&["CEO", "President", "VP", "Director"]),
            filters: PersonaFilter::new()
                .with_work_item_types([
                    WorkItemType::Objective,
                    WorkItemType::Strategy,
                    WorkItemType::Initiative,
                ])
                .with_assignment_scope(AssignmentScope::Organization)
                .with_timeframe(Timeframe::ThisQuarter)
                .show_completed(true)
                .with_max_depth(2)
                .with_progress_thresholds(schedule_health(Some(true), Some(true))),
            layout: PersonaLayout {
                default_view: Some(DefaultView::Executive),
                components: components(true, true, false, true, true, true, true, false),
                layout_density: Some(LayoutDensity::Spacious),
                default_sort: Some(SortSpec::desc(SortField::Priority)),
                group_by: Some(GroupBy::Type),
                emphasis_style: Some(EmphasisStyle::Bold),
                ..Default::default()
            },
            insights: PersonaInsights {
                primary_metrics: Some(vec![Progress, Risk, Timeline, Quality]),
                alert_types: Some(vec![HighRisk, DecisionNeeded]),
                ai_personality: Some(AiPersonality::Strategic),
                briefing_style: Some(BriefingStyle::Strategic),
                notification_frequency: Some(NotificationFrequency::Weekly),
                escalation_thresholds: Some(EscalationThresholds::new(0.7, 14, 2)),
            },
        },
    ]
}
