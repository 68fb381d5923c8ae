use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::answers::progress::{progress_report, ProgressReport};
use crate::answers::AnswerSet;
use crate::config::NotificationRulesConfig;
use crate::notify::{apply_rules, evaluate_notifications, NotificationEvent};
use crate::scoring::ScoringEngine;
use crate::snapshot::{record_from_outcome, ResultRecord, SurveyStore};

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("survey incomplete; unanswered required questions: {}", missing.join(", "))]
    Incomplete { missing: Vec<String> },
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

#[derive(Debug, Clone, Serialize)]
pub struct ProgressView {
    pub member_id: String,
    pub answers: AnswerSet,
    pub report: ProgressReport,
}

#[derive(Debug, Clone, Serialize)]
pub struct Submission {
    pub record: ResultRecord,
    pub notifications: Vec<NotificationEvent>,
}

pub fn load_progress(
    store: &SurveyStore,
    engine: &ScoringEngine,
    member_id: &str,
) -> anyhow::Result<ProgressView> {
    let answers = store.progress_answers(member_id)?;
    let report = progress_report(&answers, engine.catalog());
    Ok(ProgressView {
        member_id: member_id.to_string(),
        answers,
        report,
    })
}

pub fn save_progress(
    store: &SurveyStore,
    engine: &ScoringEngine,
    member_id: &str,
    batch: AnswerSet,
) -> anyhow::Result<ProgressView> {
    let record = store.save_progress(member_id, batch)?;
    let report = progress_report(&record.answers, engine.catalog());
    Ok(ProgressView {
        member_id: record.member_id,
        answers: record.answers,
        report,
    })
}

/// Scores stored progress, persists the result and returns the
/// notifications the enabled rules allow. Delivery is left to the caller.
pub fn submit(
    store: &SurveyStore,
    engine: &ScoringEngine,
    member_id: &str,
    allow_incomplete: bool,
    rules: &NotificationRulesConfig,
) -> Result<Submission, SubmitError> {
    let answers = store.progress_answers(member_id)?;
    let report = progress_report(&answers, engine.catalog());
    if !report.is_complete() && !allow_incomplete {
        return Err(SubmitError::Incomplete {
            missing: report.unanswered_required,
        });
    }

    let previous = store.latest_result(member_id)?;
    let outcome = engine.score(&answers);
    let record = record_from_outcome(member_id, engine.catalog_hash(), outcome);
    store.insert_result(&record)?;

    let notifications = apply_rules(
        evaluate_notifications(
            previous.as_ref().map(|r| &r.outcome),
            member_id,
            &record.outcome,
        ),
        rules,
    );
    info!(
        "stored result for {member_id}: {} primary match(es), {} notification(s)",
        record.outcome.primary_matches().count(),
        notifications.len()
    );

    Ok(Submission {
        record,
        notifications,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answers::AnswerValue;
    use crate::catalog::QuestionKind;
    use crate::notify::NotificationKind;

    fn complete_answers(engine: &ScoringEngine) -> AnswerSet {
        engine
            .catalog()
            .questions
            .iter()
            .map(|q| {
                let value = match q.kind {
                    QuestionKind::Likert => AnswerValue::likert(3),
                    QuestionKind::YesNo => AnswerValue::no(),
                    QuestionKind::MultipleChoice => AnswerValue::choice(
                        q.options.first().map(|o| o.value.clone()).unwrap_or_default(),
                    ),
                };
                (q.id.clone(), value)
            })
            .collect()
    }

    #[test]
    fn incomplete_submission_is_rejected() {
        let store = SurveyStore::open_in_memory().expect("store");
        let engine = ScoringEngine::with_defaults();
        store
            .save_progress("m1", AnswerSet::new().with("g1", 4u8))
            .expect("save");
        let err = submit(&store, &engine, "m1", false, &NotificationRulesConfig::default())
            .expect_err("incomplete");
        match err {
            SubmitError::Incomplete { missing } => assert!(missing.contains(&"g2".to_string())),
            other => panic!("unexpected error: {other}"),
        }
        assert!(store.latest_result("m1").expect("latest").is_none());
    }

    #[test]
    fn placeholder_answers_do_not_complete_the_survey() {
        let store = SurveyStore::open_in_memory().expect("store");
        let engine = ScoringEngine::with_defaults();
        let placeholders: AnswerSet = engine
            .catalog()
            .questions
            .iter()
            .map(|q| (q.id.clone(), AnswerValue::choice("x")))
            .collect();
        store.save_progress("m1", placeholders).expect("save");
        let err = submit(&store, &engine, "m1", false, &NotificationRulesConfig::default())
            .expect_err("placeholders rejected");
        match err {
            SubmitError::Incomplete { missing } => {
                assert!(missing.contains(&"g1".to_string()));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn allow_incomplete_bypasses_the_check() {
        let store = SurveyStore::open_in_memory().expect("store");
        let engine = ScoringEngine::with_defaults();
        let submission = submit(&store, &engine, "m1", true, &NotificationRulesConfig::default())
            .expect("submitted");
        assert_eq!(submission.notifications.len(), 1);
        assert_eq!(
            submission.notifications[0].kind,
            NotificationKind::SurveyCompleted
        );
        assert!(store.latest_result("m1").expect("latest").is_some());
    }

    #[test]
    fn complete_progress_submits_without_flag() {
        let store = SurveyStore::open_in_memory().expect("store");
        let engine = ScoringEngine::with_defaults();
        save_progress(&store, &engine, "m1", complete_answers(&engine)).expect("save");
        let view = load_progress(&store, &engine, "m1").expect("progress");
        assert!(view.report.is_complete());
        submit(&store, &engine, "m1", false, &NotificationRulesConfig::default())
            .expect("submitted");
    }

    #[test]
    fn retake_diffs_against_previous_result() {
        let store = SurveyStore::open_in_memory().expect("store");
        let engine = ScoringEngine::with_defaults();
        let rules = NotificationRulesConfig::default();

        save_progress(&store, &engine, "m1", AnswerSet::new().with("g6", 5u8)).expect("save");
        submit(&store, &engine, "m1", true, &rules).expect("first submission");

        store.reset_progress("m1").expect("retake");
        save_progress(&store, &engine, "m1", AnswerSet::new().with("g5", 5u8)).expect("save");
        let submission = submit(&store, &engine, "m1", true, &rules).expect("second submission");

        assert!(submission
            .notifications
            .iter()
            .any(|e| e.kind == NotificationKind::PrimaryMatchLost));
        assert!(submission
            .notifications
            .iter()
            .any(|e| e.kind == NotificationKind::PrimaryMatchGained));
        assert_eq!(store.load_history("m1", 10).expect("history").len(), 2);
    }
}
