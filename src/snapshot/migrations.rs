pub const BASE_MIGRATION: &str = r#"
CREATE TABLE IF NOT EXISTS survey_progress (
    member_id TEXT PRIMARY KEY,
    answers_json TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS survey_results (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    member_id TEXT NOT NULL,
    catalog_hash TEXT NOT NULL,
    personality_type TEXT NOT NULL,
    primary_ministries TEXT NOT NULL,
    outcome_json TEXT NOT NULL,
    captured_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_results_member_captured
    ON survey_results(member_id, id DESC);
"#;
