use serde::{Deserialize, Serialize};

use crate::answers::AnswerSet;
use crate::catalog::{Catalog, Question};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProgressReport {
    pub answered: usize,
    pub total: usize,
    pub percent_complete: u8,
    pub unanswered_required: Vec<String>,
    /// Answers that do not fit their question's kind. They count as unanswered.
    pub invalid_answers: Vec<String>,
    pub unknown_answers: Vec<String>,
}

impl ProgressReport {
    pub fn is_complete(&self) -> bool {
        self.unanswered_required.is_empty()
    }
}

pub fn progress_report(answers: &AnswerSet, catalog: &Catalog) -> ProgressReport {
    let total = catalog.questions.len();
    let is_answered = |q: &Question| answers.get(&q.id).is_some_and(|a| a.fits(q));
    let answered = catalog.questions.iter().filter(|q| is_answered(q)).count();
    let unanswered_required = catalog
        .questions
        .iter()
        .filter(|q| q.required && !is_answered(q))
        .map(|q| q.id.clone())
        .collect();
    let invalid_answers = catalog
        .questions
        .iter()
        .filter(|q| answers.get(&q.id).is_some_and(|a| !a.fits(q)))
        .map(|q| q.id.clone())
        .collect();
    let unknown_answers = answers
        .iter()
        .filter(|(id, _)| catalog.question(id).is_none())
        .map(|(id, _)| id.clone())
        .collect();
    let percent_complete = if total == 0 {
        0
    } else {
        ((answered as f64 / total as f64) * 100.0).round() as u8
    };

    ProgressReport {
        answered,
        total,
        percent_complete,
        unanswered_required,
        invalid_answers,
        unknown_answers,
    }
}

#[cfg(test)]
mod tests {
    use super::progress_report;
    use crate::answers::AnswerSet;
    use crate::answers::AnswerValue;
    use crate::catalog::{Catalog, Ministry, MinistryCategory, Question};

    fn tiny_catalog() -> Catalog {
        Catalog {
            questions: vec![
                Question::likert("q1", "one"),
                Question::yes_no("q2", "two"),
                Question::likert("q3", "three").optional(),
                Question::likert("q4", "four"),
                Question::choice("q5", "five", &[("weekday", "Weekdays"), ("weekend", "Weekends")])
                    .optional(),
            ],
            ministries: vec![Ministry::new("kids", "Kids", MinistryCategory::NextGeneration, "")],
            ..Catalog::default()
        }
    }

    #[test]
    fn counts_answered_and_missing_required() {
        let answers = AnswerSet::new()
            .with("q1", 4u8)
            .with("q3", 2u8)
            .with("retired", 5u8);
        let report = progress_report(&answers, &tiny_catalog());
        assert_eq!(report.answered, 2);
        assert_eq!(report.total, 5);
        assert_eq!(report.percent_complete, 40);
        assert_eq!(report.unanswered_required, vec!["q2", "q4"]);
        assert_eq!(report.unknown_answers, vec!["retired"]);
        assert!(!report.is_complete());
    }

    #[test]
    fn malformed_answers_do_not_count() {
        let answers = AnswerSet::new()
            .with("q1", 9u8)
            .with("q2", "yes")
            .with("q4", 3u8);
        let report = progress_report(&answers, &tiny_catalog());
        assert_eq!(report.answered, 2);
        assert_eq!(report.unanswered_required, vec!["q1"]);
    }

    #[test]
    fn answers_of_the_wrong_kind_do_not_count() {
        let answers = AnswerSet::new()
            .with("q1", "banana")
            .with("q2", 4u8)
            .with("q4", AnswerValue::yes())
            .with("q5", "x");
        let report = progress_report(&answers, &tiny_catalog());
        assert_eq!(report.answered, 0);
        assert_eq!(report.unanswered_required, vec!["q1", "q2", "q4"]);
        assert_eq!(report.invalid_answers, vec!["q1", "q2", "q4", "q5"]);
        assert!(!report.is_complete());
    }

    #[test]
    fn matching_kinds_complete_the_survey() {
        let answers = AnswerSet::new()
            .with("q1", "4")
            .with("q2", "No")
            .with("q4", 1u8)
            .with("q5", "weekend");
        let report = progress_report(&answers, &tiny_catalog());
        assert_eq!(report.answered, 4);
        assert!(report.invalid_answers.is_empty());
        assert!(report.is_complete());
    }
}
