pub mod history;
pub mod migrations;
pub mod store;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::answers::AnswerSet;
use crate::scoring::ScoringOutcome;

pub use history::{record_from_outcome, summarize_history, HistorySummary};
pub use store::SurveyStore;

/// In-progress answers for one member.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProgressRecord {
    pub member_id: String,
    pub answers: AnswerSet,
    pub updated_at: DateTime<Utc>,
}

/// One persisted scoring run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResultRecord {
    pub member_id: String,
    pub catalog_hash: String,
    pub outcome: ScoringOutcome,
    pub captured_at: DateTime<Utc>,
}
