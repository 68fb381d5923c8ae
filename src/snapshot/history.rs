use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::scoring::{PersonalityType, ScoringOutcome};
use crate::snapshot::ResultRecord;

pub fn record_from_outcome(
    member_id: impl Into<String>,
    catalog_hash: impl Into<String>,
    outcome: ScoringOutcome,
) -> ResultRecord {
    ResultRecord {
        member_id: member_id.into(),
        catalog_hash: catalog_hash.into(),
        outcome,
        captured_at: Utc::now(),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistorySummary {
    pub submissions: usize,
    pub latest_type: Option<PersonalityType>,
    pub personality_stable: bool,
    pub primary_stable: bool,
}

impl HistorySummary {
    pub fn describe(&self) -> String {
        let Some(latest) = self.latest_type else {
            return "No submitted results found.".to_string();
        };
        let personality = if self.personality_stable {
            "stable"
        } else {
            "changed"
        };
        let primary = if self.primary_stable {
            "stable"
        } else {
            "changed"
        };
        format!(
            "Submissions: {} | latest type: {latest} | personality {personality} | primary matches {primary}",
            self.submissions
        )
    }
}

/// Expects records newest first, as returned by the store.
pub fn summarize_history(records: &[ResultRecord]) -> HistorySummary {
    let latest_type = records
        .first()
        .map(|r| r.outcome.personality.personality_type);
    let personality_stable = records
        .windows(2)
        .all(|pair| {
            pair[0].outcome.personality.personality_type
                == pair[1].outcome.personality.personality_type
        });
    let primary_stable = records.windows(2).all(|pair| {
        let mut newer = pair[0].outcome.primary_ids();
        let mut older = pair[1].outcome.primary_ids();
        newer.sort();
        older.sort();
        newer == older
    });

    HistorySummary {
        submissions: records.len(),
        latest_type,
        personality_stable,
        primary_stable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answers::AnswerSet;
    use crate::scoring::ScoringEngine;

    #[test]
    fn empty_history_has_no_latest_type() {
        let summary = summarize_history(&[]);
        assert_eq!(summary.submissions, 0);
        assert!(summary.latest_type.is_none());
        assert_eq!(summary.describe(), "No submitted results found.");
    }

    #[test]
    fn detects_changed_primary_matches() {
        let engine = ScoringEngine::with_defaults();
        let hash = engine.catalog_hash().to_string();
        let care = engine.score(&AnswerSet::new().with("g5", 5u8));
        let welcome = engine.score(&AnswerSet::new().with("g6", 5u8));

        let same = vec![
            record_from_outcome("m1", &hash, care.clone()),
            record_from_outcome("m1", &hash, care.clone()),
        ];
        let summary = summarize_history(&same);
        assert!(summary.primary_stable);
        assert!(summary.personality_stable);
        assert_eq!(summary.submissions, 2);

        let changed = vec![
            record_from_outcome("m1", &hash, welcome),
            record_from_outcome("m1", &hash, care),
        ];
        let summary = summarize_history(&changed);
        assert!(!summary.primary_stable);
        assert!(summary.describe().contains("primary matches changed"));
    }
}
