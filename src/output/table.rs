use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, ContentArrangement, Row, Table};

use crate::answers::progress::ProgressReport;
use crate::catalog::{Ministry, Question};
use crate::scoring::{GiftScore, MinistryMatch, PersonalityProfile};
use crate::snapshot::ResultRecord;

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

pub fn render_gifts_table(gifts: &[GiftScore]) -> String {
    let mut table = new_table();
    table.set_header(vec!["Rank", "Gift", "Score", "Description"]);
    for (idx, gift) in gifts.iter().enumerate() {
        let score_cell = match gift.score {
            70..=100 => Cell::new(gift.score).fg(Color::Green),
            40..=69 => Cell::new(gift.score).fg(Color::Yellow),
            _ => Cell::new(gift.score),
        };
        table.add_row(Row::from(vec![
            Cell::new(idx + 1),
            Cell::new(gift.gift.to_string()),
            score_cell,
            Cell::new(&gift.description),
        ]));
    }
    table.to_string()
}

pub fn render_personality_table(profile: &PersonalityProfile) -> String {
    let mut table = new_table();
    table.set_header(vec!["Trait", "Average Lean"]);
    for (trait_, value) in &profile.trait_scores {
        table.add_row(vec![trait_.to_string(), format!("{value:+.2}")]);
    }
    format!(
        "{}\n{}\n{}",
        profile.summary(),
        profile.personality_type.description(),
        table
    )
}

pub fn render_matches_table(matches: &[MinistryMatch]) -> String {
    let mut table = new_table();
    table.set_header(vec![
        "Ministry",
        "Category",
        "Score",
        "Primary",
        "Skill Verified",
        "Why",
        "Growth Pathway",
    ]);
    for m in matches {
        let primary_cell = if m.is_primary {
            Cell::new("YES").fg(Color::Green)
        } else {
            Cell::new("-")
        };
        table.add_row(Row::from(vec![
            Cell::new(&m.name),
            Cell::new(m.category.to_string()),
            Cell::new(format!("{:.2}", m.score)),
            primary_cell,
            Cell::new(if m.has_verified_skill { "yes" } else { "-" }),
            Cell::new(&m.why_matched),
            Cell::new(m.growth_pathway.as_deref().unwrap_or("-")),
        ]));
    }
    table.to_string()
}

pub fn render_questions_table(questions: &[Question]) -> String {
    let mut table = new_table();
    table.set_header(vec!["Id", "Kind", "Required", "Question", "Options"]);
    for q in questions {
        let options = q
            .options
            .iter()
            .map(|o| o.value.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(vec![
            q.id.clone(),
            q.kind.to_string(),
            if q.required { "yes" } else { "no" }.to_string(),
            q.text.clone(),
            options,
        ]);
    }
    table.to_string()
}

pub fn render_ministries_table(ministries: &[Ministry]) -> String {
    let mut table = new_table();
    table.set_header(vec!["Id", "Name", "Category", "Description"]);
    for m in ministries {
        table.add_row(vec![
            m.id.to_string(),
            m.name.clone(),
            m.category.to_string(),
            m.description.clone(),
        ]);
    }
    table.to_string()
}

pub fn render_progress_table(report: &ProgressReport) -> String {
    let mut table = new_table();
    table.set_header(vec!["Answered", "Total", "Complete", "Missing Required"]);
    let complete = if report.is_complete() {
        Cell::new("YES").fg(Color::Green)
    } else {
        Cell::new("NO").fg(Color::Red)
    };
    table.add_row(Row::from(vec![
        Cell::new(report.answered),
        Cell::new(report.total),
        complete,
        Cell::new(report.unanswered_required.join(", ")),
    ]));
    let mut out = format!("{}\n{}% complete", table, report.percent_complete);
    if !report.invalid_answers.is_empty() {
        out.push_str(&format!(
            "\nAnswers that do not fit their question: {}",
            report.invalid_answers.join(", ")
        ));
    }
    if !report.unknown_answers.is_empty() {
        out.push_str(&format!(
            "\nIgnored answers to unknown questions: {}",
            report.unknown_answers.join(", ")
        ));
    }
    out
}

pub fn render_history_table(records: &[ResultRecord]) -> String {
    let mut table = new_table();
    table.set_header(vec![
        "Captured At",
        "Personality",
        "Top Gifts",
        "Primary Matches",
        "Catalog",
    ]);
    for rec in records {
        let top_gifts = rec
            .outcome
            .top_gifts(3)
            .iter()
            .map(|g| format!("{} {}", g.gift, g.score))
            .collect::<Vec<_>>()
            .join(", ");
        let primary = rec
            .outcome
            .primary_matches()
            .map(|m| m.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(vec![
            rec.captured_at.to_rfc3339(),
            rec.outcome.personality.personality_type.to_string(),
            top_gifts,
            primary,
            rec.catalog_hash.chars().take(12).collect(),
        ]);
    }
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answers::AnswerSet;
    use crate::scoring::ScoringEngine;

    #[test]
    fn match_table_lists_every_ministry() {
        let engine = ScoringEngine::with_defaults();
        let outcome = engine.score(&AnswerSet::new().with("g6", 5u8));
        let rendered = render_matches_table(&outcome.ministries);
        assert!(rendered.contains("Greeters"));
        assert!(rendered.contains("YES"));
        assert!(rendered.contains("Parking"));
    }

    #[test]
    fn progress_table_mentions_unknown_answers() {
        let report = ProgressReport {
            answered: 1,
            total: 2,
            percent_complete: 50,
            unanswered_required: vec!["g2".to_string()],
            invalid_answers: vec!["g2".to_string()],
            unknown_answers: vec!["legacy".to_string()],
        };
        let rendered = render_progress_table(&report);
        assert!(rendered.contains("50% complete"));
        assert!(rendered.contains("do not fit their question: g2"));
        assert!(rendered.contains("legacy"));
    }
}
