use std::collections::BTreeMap;

use tracing::debug;

use crate::answers::AnswerSet;
use crate::catalog::{Catalog, MinistryId};
use crate::config::ScoringConfig;
use crate::scoring::explain::why_matched;
use crate::scoring::{GiftScore, MinistryMatch, PersonalityProfile};

pub const DEFAULT_GROWTH_PATHWAY: &str =
    "Shadow an experienced team member to build the skills this ministry needs.";

#[derive(Debug, Clone, Default)]
struct Tally {
    score: f64,
    verified: bool,
}

pub fn match_ministries(
    catalog: &Catalog,
    config: &ScoringConfig,
    answers: &AnswerSet,
    gifts: &[GiftScore],
    personality: &PersonalityProfile,
) -> Vec<MinistryMatch> {
    let index: BTreeMap<&MinistryId, usize> = catalog
        .ministries
        .iter()
        .enumerate()
        .map(|(i, m)| (&m.id, i))
        .collect();
    let mut tallies = vec![Tally::default(); catalog.ministries.len()];

    for question in &catalog.questions {
        if question.ministry_weights.is_empty() {
            continue;
        }
        let Some(answer) = answers.get(&question.id) else {
            continue;
        };
        let strength = answer.strength();
        let verifies = question.skill_verification && answer.is_explicit_yes();
        for (ministry, weight) in &question.ministry_weights {
            let Some(&i) = index.get(ministry) else {
                debug!("question {} weights unknown ministry {ministry}", question.id);
                continue;
            };
            tallies[i].score += weight * strength;
            if verifies {
                tallies[i].verified = true;
            }
        }
    }

    let top_gifts = &gifts[..config.top_gift_count.min(gifts.len())];
    for gift in top_gifts {
        let bonus = (f64::from(gift.score) / 100.0) * config.gift_bonus_weight;
        for ministry in catalog.ministries_for_gift(gift.gift) {
            if let Some(&i) = index.get(ministry) {
                tallies[i].score += bonus;
            }
        }
    }

    for bonus in &catalog.personality_bonuses {
        if !personality.has_lean(bonus.when) {
            continue;
        }
        if let Some(&i) = index.get(&bonus.ministry) {
            tallies[i].score += bonus.amount;
        }
    }

    let mut matches: Vec<MinistryMatch> = catalog
        .ministries
        .iter()
        .zip(tallies)
        .map(|(ministry, tally)| {
            let growth_pathway = (catalog.requires_skill_verification(&ministry.id)
                && !tally.verified
                && tally.score > config.growth_threshold)
                .then(|| {
                    ministry
                        .growth_pathway
                        .clone()
                        .unwrap_or_else(|| DEFAULT_GROWTH_PATHWAY.to_string())
                });
            MinistryMatch {
                ministry: ministry.id.clone(),
                name: ministry.name.clone(),
                category: ministry.category,
                score: tally.score,
                is_primary: false,
                has_verified_skill: tally.verified,
                growth_pathway,
                why_matched: why_matched(ministry, top_gifts, catalog, personality),
            }
        })
        .collect();

    // Stable: equal scores keep catalog order.
    matches.sort_by(|a, b| b.score.total_cmp(&a.score));
    mark_primary(&mut matches, config.primary_limit, config.primary_threshold);
    matches
}

/// Flags up to `limit` leading matches whose score is strictly above
/// `threshold`. Expects `matches` sorted descending.
pub fn mark_primary(matches: &mut [MinistryMatch], limit: usize, threshold: f64) {
    for (rank, item) in matches.iter_mut().enumerate() {
        item.is_primary = rank < limit && item.score > threshold;
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::catalog::{
        Gift, Ministry, MinistryCategory, PersonalityBonus, Question, TraitLean,
    };
    use crate::scoring::gifts::score_gifts;
    use crate::scoring::personality::score_personality;

    fn run(catalog: &Catalog, answers: &AnswerSet) -> Vec<MinistryMatch> {
        let config = ScoringConfig::default();
        let gifts = score_gifts(catalog, answers);
        let personality = score_personality(catalog, answers, config.trait_threshold);
        match_ministries(catalog, &config, answers, &gifts, &personality)
    }

    fn bare_catalog(questions: Vec<Question>, ministries: &[&str]) -> Catalog {
        Catalog {
            questions,
            ministries: ministries
                .iter()
                .map(|id| Ministry::new(id, id, MinistryCategory::Operations, ""))
                .collect(),
            gift_ministries: BTreeMap::new(),
            personality_bonuses: Vec::new(),
            skill_verified_ministries: BTreeSet::new(),
        }
    }

    #[test]
    fn primary_threshold_is_exclusive() {
        let catalog = bare_catalog(
            vec![
                Question::yes_no("q1", "a").ministry("exact", 0.3),
                Question::yes_no("q2", "b").ministry("above", 0.30001),
            ],
            &["exact", "above"],
        );
        let answers = AnswerSet::new().with("q1", "yes").with("q2", "yes");
        let matches = run(&catalog, &answers);
        assert_eq!(matches[0].ministry.as_str(), "above");
        assert!(matches[0].is_primary);
        assert_eq!(matches[1].ministry.as_str(), "exact");
        assert!(!matches[1].is_primary);
    }

    #[test]
    fn at_most_five_primary_matches() {
        let ids = ["a", "b", "c", "d", "e", "f", "g"];
        let mut question = Question::yes_no("q1", "all");
        for id in ids {
            question = question.ministry(id, 1.0);
        }
        let catalog = bare_catalog(vec![question], &ids);
        let matches = run(&catalog, &AnswerSet::new().with("q1", "yes"));
        assert_eq!(matches.iter().filter(|m| m.is_primary).count(), 5);
        // Ties keep catalog order, so the last two are not primary.
        assert!(!matches[5].is_primary && matches[5].ministry.as_str() == "f");
        assert!(!matches[6].is_primary && matches[6].ministry.as_str() == "g");
    }

    #[test]
    fn unknown_ministries_in_weights_are_ignored() {
        let catalog = bare_catalog(
            vec![Question::likert("q1", "a")
                .ministry("known", 1.0)
                .ministry("retired", 1.0)],
            &["known"],
        );
        let matches = run(&catalog, &AnswerSet::new().with("q1", 5u8));
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].score, 1.0);
    }

    #[test]
    fn gift_bonus_reaches_mapped_ministries() {
        let mut catalog = bare_catalog(
            vec![Question::likert("q1", "a").gift(Gift::Teaching, 1.0)],
            &["kids", "parking"],
        );
        catalog
            .gift_ministries
            .insert(Gift::Teaching, vec![MinistryId::from("kids")]);
        let matches = run(&catalog, &AnswerSet::new().with("q1", 5u8));
        let kids = matches.iter().find(|m| m.ministry.as_str() == "kids").expect("kids");
        assert!((kids.score - 0.5).abs() < 1e-12);
        assert!(kids.is_primary);
        let parking = matches
            .iter()
            .find(|m| m.ministry.as_str() == "parking")
            .expect("parking");
        assert_eq!(parking.score, 0.0);
        assert!(!parking.is_primary);
    }

    #[test]
    fn personality_bonus_applies_only_with_matching_lean() {
        let mut catalog = bare_catalog(
            vec![Question::likert("p1", "social").personality(crate::catalog::Trait::Extroversion, 1.0)],
            &["greeters"],
        );
        catalog.personality_bonuses.push(PersonalityBonus {
            when: TraitLean::Extrovert,
            ministry: MinistryId::from("greeters"),
            amount: 0.3,
        });

        let outgoing = run(&catalog, &AnswerSet::new().with("p1", 5u8));
        assert!((outgoing[0].score - 0.3).abs() < 1e-12);

        let reserved = run(&catalog, &AnswerSet::new().with("p1", 1u8));
        assert_eq!(reserved[0].score, 0.0);
    }

    fn verification_catalog() -> Catalog {
        let mut catalog = bare_catalog(
            vec![
                Question::likert("interest", "a")
                    .ministry("sound", 1.0)
                    .ministry("parking", 1.0),
                Question::yes_no("skill", "b").ministry("sound", 0.1).verifies_skill(),
            ],
            &["sound", "parking"],
        );
        catalog.skill_verified_ministries.insert(MinistryId::from("sound"));
        catalog.ministries[0] = catalog.ministries[0]
            .clone()
            .with_growth_pathway("Shadow the sound engineer.");
        catalog
    }

    #[test]
    fn growth_pathway_needs_missing_skill_and_high_score() {
        let catalog = verification_catalog();

        let unverified = run(
            &catalog,
            &AnswerSet::new().with("interest", 5u8).with("skill", "no"),
        );
        let sound = unverified
            .iter()
            .find(|m| m.ministry.as_str() == "sound")
            .expect("sound");
        assert_eq!(sound.growth_pathway.as_deref(), Some("Shadow the sound engineer."));
        assert!(!sound.has_verified_skill);
        let parking = unverified
            .iter()
            .find(|m| m.ministry.as_str() == "parking")
            .expect("parking");
        assert!(parking.growth_pathway.is_none());

        let verified = run(
            &catalog,
            &AnswerSet::new().with("interest", 5u8).with("skill", "yes"),
        );
        let sound = verified
            .iter()
            .find(|m| m.ministry.as_str() == "sound")
            .expect("sound");
        assert!(sound.has_verified_skill);
        assert!(sound.growth_pathway.is_none());

        // 0.5 exactly is not above the growth threshold.
        let lukewarm = run(
            &catalog,
            &AnswerSet::new().with("interest", 3u8).with("skill", "no"),
        );
        let sound = lukewarm
            .iter()
            .find(|m| m.ministry.as_str() == "sound")
            .expect("sound");
        assert_eq!(sound.score, 0.5);
        assert!(sound.growth_pathway.is_none());
    }

    #[test]
    fn likert_answer_on_verification_question_does_not_verify() {
        let catalog = verification_catalog();
        let matches = run(
            &catalog,
            &AnswerSet::new().with("interest", 5u8).with("skill", 5u8),
        );
        let sound = matches
            .iter()
            .find(|m| m.ministry.as_str() == "sound")
            .expect("sound");
        assert!(!sound.has_verified_skill);
    }
}
