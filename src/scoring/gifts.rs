use std::collections::BTreeMap;

use crate::answers::AnswerSet;
use crate::catalog::{Catalog, Gift};
use crate::scoring::GiftScore;

/// Raw weighted totals per gift, in [`Gift::ALL`] order.
pub fn gift_totals(catalog: &Catalog, answers: &AnswerSet) -> BTreeMap<Gift, f64> {
    let mut totals: BTreeMap<Gift, f64> = Gift::ALL.iter().map(|gift| (*gift, 0.0)).collect();
    for question in &catalog.questions {
        if question.gift_weights.is_empty() {
            continue;
        }
        let Some(answer) = answers.get(&question.id) else {
            continue;
        };
        let strength = answer.strength();
        for (gift, weight) in &question.gift_weights {
            *totals.entry(*gift).or_insert(0.0) += weight * strength;
        }
    }
    totals
}

pub fn normalize_totals(totals: &BTreeMap<Gift, f64>) -> Vec<GiftScore> {
    let max = totals.values().copied().fold(0.0_f64, f64::max);
    let mut scores: Vec<GiftScore> = Gift::ALL
        .iter()
        .map(|gift| {
            let total = totals.get(gift).copied().unwrap_or(0.0);
            let score = if max > 0.0 {
                ((total / max) * 100.0).round().clamp(0.0, 100.0) as u8
            } else {
                0
            };
            GiftScore {
                gift: *gift,
                score,
                description: gift.description().to_string(),
            }
        })
        .collect();
    // sort_by is stable: equal scores keep Gift::ALL order.
    scores.sort_by(|a, b| b.score.cmp(&a.score));
    scores
}

pub fn score_gifts(catalog: &Catalog, answers: &AnswerSet) -> Vec<GiftScore> {
    normalize_totals(&gift_totals(catalog, answers))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Question;

    fn catalog_with(questions: Vec<Question>) -> Catalog {
        Catalog {
            questions,
            ..Catalog::default()
        }
    }

    #[test]
    fn single_teaching_answer_normalizes_to_hundred() {
        let catalog = catalog_with(vec![Question::likert("q1", "t").gift(Gift::Teaching, 1.0)]);
        let scores = score_gifts(&catalog, &AnswerSet::new().with("q1", 5u8));
        assert_eq!(scores[0].gift, Gift::Teaching);
        assert_eq!(scores[0].score, 100);
        assert!(scores[1..].iter().all(|g| g.score == 0));
        assert_eq!(scores.len(), 12);
    }

    #[test]
    fn zero_totals_yield_zero_scores_in_fixed_order() {
        let catalog = catalog_with(vec![Question::likert("q1", "t").gift(Gift::Teaching, 1.0)]);
        let scores = score_gifts(&catalog, &AnswerSet::new().with("q1", 1u8));
        assert!(scores.iter().all(|g| g.score == 0));
        let order: Vec<Gift> = scores.iter().map(|g| g.gift).collect();
        assert_eq!(order, Gift::ALL.to_vec());
    }

    #[test]
    fn ties_keep_encounter_order() {
        let catalog = catalog_with(vec![
            Question::likert("q1", "a")
                .gift(Gift::Service, 1.0)
                .gift(Gift::Mercy, 1.0),
            Question::likert("q2", "b").gift(Gift::Teaching, 0.5),
        ]);
        let answers = AnswerSet::new().with("q1", 5u8).with("q2", 5u8);
        let scores = score_gifts(&catalog, &answers);
        assert_eq!(scores[0].gift, Gift::Mercy);
        assert_eq!(scores[1].gift, Gift::Service);
        assert_eq!(scores[2].gift, Gift::Teaching);
        assert_eq!(scores[2].score, 50);
    }

    #[test]
    fn yes_no_and_choice_answers_use_fixed_multipliers() {
        let catalog = catalog_with(vec![
            Question::yes_no("q1", "a").gift(Gift::Giving, 1.0),
            Question::yes_no("q2", "b").gift(Gift::Mercy, 1.0),
            Question::likert("q3", "c").gift(Gift::Service, 2.0),
        ]);
        let answers = AnswerSet::new()
            .with("q1", "yes")
            .with("q2", "no")
            .with("q3", 3u8);
        let totals = gift_totals(&catalog, &answers);
        assert_eq!(totals[&Gift::Giving], 1.0);
        assert_eq!(totals[&Gift::Mercy], 0.0);
        assert_eq!(totals[&Gift::Service], 1.0);
    }

    #[test]
    fn scores_stay_within_bounds_with_negative_weights() {
        let catalog = catalog_with(vec![
            Question::likert("q1", "a").gift(Gift::Leadership, -1.0),
            Question::likert("q2", "b").gift(Gift::Teaching, 1.0),
        ]);
        let answers = AnswerSet::new().with("q1", 5u8).with("q2", 4u8);
        let scores = score_gifts(&catalog, &answers);
        assert!(scores.iter().all(|g| g.score <= 100));
        assert!(scores.windows(2).all(|pair| pair[0].score >= pair[1].score));
        assert_eq!(scores.last().map(|g| g.score), Some(0));
    }
}
