use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Transaction, TransactionBehavior};

use crate::answers::AnswerSet;
use crate::snapshot::migrations::BASE_MIGRATION;
use crate::snapshot::{ProgressRecord, ResultRecord};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

pub struct SurveyStore {
    conn: Connection,
}

impl SurveyStore {
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed creating data directory: {}", parent.display()))?;
        }
        let conn = Connection::open(path)
            .with_context(|| format!("failed opening database: {}", path.display()))?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    pub fn open_in_memory() -> Result<Self> {
        let store = Self {
            conn: Connection::open_in_memory()?,
        };
        store.migrate()?;
        Ok(store)
    }

    pub fn migrate(&self) -> Result<()> {
        self.conn.execute_batch(BASE_MIGRATION)?;
        Ok(())
    }

    pub fn load_progress(&self, member_id: &str) -> Result<Option<ProgressRecord>> {
        query_progress(&self.conn, member_id)
    }

    /// Stored answers, or an empty set for a member who has not started.
    pub fn progress_answers(&self, member_id: &str) -> Result<AnswerSet> {
        Ok(self
            .load_progress(member_id)?
            .map(|record| record.answers)
            .unwrap_or_default())
    }

    /// Merges `batch` over the stored answers; later values win per question.
    /// The read and the write share one immediate transaction, so concurrent
    /// saves for the same member serialize instead of overwriting each other.
    pub fn save_progress(&self, member_id: &str, batch: AnswerSet) -> Result<ProgressRecord> {
        let tx = Transaction::new_unchecked(&self.conn, TransactionBehavior::Immediate)?;
        let mut answers = query_progress(&tx, member_id)?
            .map(|record| record.answers)
            .unwrap_or_default();
        answers.merge(batch);
        let updated_at = Utc::now();
        tx.execute(
            r#"
INSERT INTO survey_progress(member_id, answers_json, updated_at)
VALUES (?1, ?2, ?3)
ON CONFLICT(member_id) DO UPDATE SET
    answers_json = excluded.answers_json,
    updated_at = excluded.updated_at
"#,
            params![
                member_id,
                serde_json::to_string(&answers)?,
                updated_at.to_rfc3339()
            ],
        )?;
        tx.commit()?;
        Ok(ProgressRecord {
            member_id: member_id.to_string(),
            answers,
            updated_at,
        })
    }

    /// Drops stored progress. Returns whether anything was removed.
    pub fn reset_progress(&self, member_id: &str) -> Result<bool> {
        let removed = self.conn.execute(
            "DELETE FROM survey_progress WHERE member_id = ?1",
            params![member_id],
        )?;
        Ok(removed > 0)
    }

    pub fn insert_result(&self, record: &ResultRecord) -> Result<()> {
        let primary: Vec<&str> = record
            .outcome
            .primary_matches()
            .map(|m| m.ministry.as_str())
            .collect();
        self.conn.execute(
            r#"
INSERT INTO survey_results(
    member_id, catalog_hash, personality_type, primary_ministries, outcome_json, captured_at
) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
"#,
            params![
                record.member_id,
                record.catalog_hash,
                record.outcome.personality.personality_type.to_string(),
                primary.join(","),
                serde_json::to_string(&record.outcome)?,
                record.captured_at.to_rfc3339()
            ],
        )?;
        Ok(())
    }

    pub fn latest_result(&self, member_id: &str) -> Result<Option<ResultRecord>> {
        Ok(self.load_history(member_id, 1)?.into_iter().next())
    }

    /// Newest first.
    pub fn load_history(&self, member_id: &str, limit: usize) -> Result<Vec<ResultRecord>> {
        let mut stmt = self.conn.prepare(
            r#"
SELECT member_id, catalog_hash, outcome_json, captured_at
FROM survey_results
WHERE member_id = ?1
ORDER BY id DESC
LIMIT ?2
"#,
        )?;
        let rows = stmt
            .query_map(params![member_id, sql_limit(limit)], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                ))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(member_id, catalog_hash, outcome_json, captured_at)| {
                Ok(ResultRecord {
                    member_id,
                    catalog_hash,
                    outcome: serde_json::from_str(&outcome_json)
                        .context("stored outcome is not valid JSON")?,
                    captured_at: parse_timestamp(&captured_at),
                })
            })
            .collect()
    }
}

fn query_progress(conn: &Connection, member_id: &str) -> Result<Option<ProgressRecord>> {
    let row = conn
        .query_row(
            r#"
SELECT member_id, answers_json, updated_at
FROM survey_progress
WHERE member_id = ?1
"#,
            params![member_id],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                ))
            },
        )
        .optional()?;

    match row {
        Some((member_id, answers_json, updated_at)) => Ok(Some(ProgressRecord {
            member_id,
            answers: serde_json::from_str(&answers_json)
                .context("stored answers are not valid JSON")?,
            updated_at: parse_timestamp(&updated_at),
        })),
        None => Ok(None),
    }
}

/// SQLite reads a negative LIMIT as unbounded, so oversized values saturate.
fn sql_limit(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}

fn parse_timestamp(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}
