use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::catalog::MinistryId;
use crate::config::NotificationRulesConfig;
use crate::notify::rules::NotificationKind;
use crate::scoring::ScoringOutcome;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NotificationEvent {
    pub kind: NotificationKind,
    pub member_id: String,
    pub title: String,
    pub body: String,
}

/// Events for one submission. `previous` is the member's prior result, if any.
pub fn evaluate_notifications(
    previous: Option<&ScoringOutcome>,
    member_id: &str,
    current: &ScoringOutcome,
) -> Vec<NotificationEvent> {
    let mut events = Vec::new();

    let primary_names: Vec<&str> = current.primary_matches().map(|m| m.name.as_str()).collect();
    let body = if primary_names.is_empty() {
        format!(
            "Personality type {}; no primary ministry matches yet.",
            current.personality.personality_type
        )
    } else {
        format!(
            "Personality type {}; primary matches: {}.",
            current.personality.personality_type,
            primary_names.join(", ")
        )
    };
    events.push(NotificationEvent {
        kind: NotificationKind::SurveyCompleted,
        member_id: member_id.to_string(),
        title: format!("Member {member_id} completed the gifts survey"),
        body,
    });

    let Some(previous) = previous else {
        return events;
    };
    let before: BTreeSet<MinistryId> = previous.primary_ids().into_iter().collect();
    let after: BTreeSet<MinistryId> = current.primary_ids().into_iter().collect();

    for gained in after.difference(&before) {
        let name = current
            .ministry(gained.as_str())
            .map(|m| m.name.clone())
            .unwrap_or_else(|| gained.to_string());
        events.push(NotificationEvent {
            kind: NotificationKind::PrimaryMatchGained,
            member_id: member_id.to_string(),
            title: format!("{name} is now a primary match for {member_id}"),
            body: "Consider reaching out with next steps for this team.".to_string(),
        });
    }
    for lost in before.difference(&after) {
        let name = previous
            .ministry(lost.as_str())
            .map(|m| m.name.clone())
            .unwrap_or_else(|| lost.to_string());
        events.push(NotificationEvent {
            kind: NotificationKind::PrimaryMatchLost,
            member_id: member_id.to_string(),
            title: format!("{name} is no longer a primary match for {member_id}"),
            body: "The member's latest responses point elsewhere.".to_string(),
        });
    }

    events
}

pub fn apply_rules(
    events: Vec<NotificationEvent>,
    rules: &NotificationRulesConfig,
) -> Vec<NotificationEvent> {
    events
        .into_iter()
        .filter(|event| event.kind.is_enabled(rules))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answers::AnswerSet;
    use crate::scoring::ScoringEngine;

    #[test]
    fn first_submission_only_reports_completion() {
        let engine = ScoringEngine::with_defaults();
        let outcome = engine.score(&AnswerSet::new().with("g6", 5u8));
        let events = evaluate_notifications(None, "m1", &outcome);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, NotificationKind::SurveyCompleted);
        assert!(events[0].body.contains("Greeters"));
    }

    #[test]
    fn retake_diffs_primary_matches() {
        let engine = ScoringEngine::with_defaults();
        let before = engine.score(&AnswerSet::new().with("g6", 5u8));
        let after = engine.score(&AnswerSet::new().with("g5", 5u8));
        let events = evaluate_notifications(Some(&before), "m1", &after);

        let gained = events
            .iter()
            .filter(|e| e.kind == NotificationKind::PrimaryMatchGained)
            .count();
        let lost = events
            .iter()
            .filter(|e| e.kind == NotificationKind::PrimaryMatchLost)
            .count();
        assert!(gained > 0);
        assert!(lost > 0);
        assert!(events
            .iter()
            .any(|e| e.kind == NotificationKind::PrimaryMatchLost && e.title.contains("Greeters")));
    }

    #[test]
    fn unchanged_retake_reports_completion_only() {
        let engine = ScoringEngine::with_defaults();
        let outcome = engine.score(&AnswerSet::new().with("g6", 5u8));
        let events = evaluate_notifications(Some(&outcome), "m1", &outcome);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn disabled_rules_drop_events() {
        let engine = ScoringEngine::with_defaults();
        let outcome = engine.score(&AnswerSet::new());
        let rules = NotificationRulesConfig {
            survey_completed: false,
            ..NotificationRulesConfig::default()
        };
        let events = apply_rules(evaluate_notifications(None, "m1", &outcome), &rules);
        assert!(events.is_empty());
    }
}
