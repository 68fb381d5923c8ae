use std::collections::BTreeMap;

use crate::answers::AnswerSet;
use crate::catalog::{Catalog, Trait, TraitLean};
use crate::scoring::{
    Perspective, PersonalityProfile, PersonalityType, Planning, SocialStyle, WorkFocus,
};

/// Ordered type rules. Every lean in a pattern must hold; the first matching
/// pattern wins, so order here is part of the contract.
pub const TYPE_RULES: &[(&[TraitLean], PersonalityType)] = &[
    (
        &[TraitLean::Extrovert, TraitLean::PeopleFocused],
        PersonalityType::Connector,
    ),
    (
        &[TraitLean::Introvert, TraitLean::PeopleFocused],
        PersonalityType::Shepherd,
    ),
    (
        &[
            TraitLean::TaskFocused,
            TraitLean::DetailOriented,
            TraitLean::Structured,
        ],
        PersonalityType::Architect,
    ),
    (
        &[TraitLean::Extrovert, TraitLean::BigPicture],
        PersonalityType::Visionary,
    ),
    (
        &[TraitLean::TaskFocused, TraitLean::Structured],
        PersonalityType::Builder,
    ),
    (
        &[TraitLean::BigPicture, TraitLean::Flexible],
        PersonalityType::Innovator,
    ),
    (
        &[TraitLean::Introvert, TraitLean::DetailOriented],
        PersonalityType::Analyst,
    ),
];

pub const DEFAULT_TYPE: PersonalityType = PersonalityType::Steward;

/// Average lean per trait. Only Likert answers count toward a trait; other
/// answer kinds are left out of both the sum and the denominator.
pub fn trait_averages(catalog: &Catalog, answers: &AnswerSet) -> BTreeMap<Trait, f64> {
    let mut sums: BTreeMap<Trait, f64> = BTreeMap::new();
    let mut counts: BTreeMap<Trait, u32> = BTreeMap::new();
    for question in &catalog.questions {
        if question.personality_weights.is_empty() {
            continue;
        }
        let Some(lean) = answers.get(&question.id).and_then(|a| a.lean()) else {
            continue;
        };
        for (trait_, weight) in &question.personality_weights {
            *sums.entry(*trait_).or_insert(0.0) += weight * lean;
            *counts.entry(*trait_).or_insert(0) += 1;
        }
    }

    Trait::ALL
        .iter()
        .map(|trait_| {
            let count = counts.get(trait_).copied().unwrap_or(0);
            let average = if count == 0 {
                0.0
            } else {
                sums.get(trait_).copied().unwrap_or(0.0) / f64::from(count)
            };
            (*trait_, average)
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pole {
    Positive,
    Negative,
    Neutral,
}

fn pole(value: f64, threshold: f64) -> Pole {
    if value > threshold {
        Pole::Positive
    } else if value < -threshold {
        Pole::Negative
    } else {
        Pole::Neutral
    }
}

pub fn classify_type(profile: &PersonalityProfile) -> PersonalityType {
    TYPE_RULES
        .iter()
        .find(|(pattern, _)| pattern.iter().all(|lean| profile.has_lean(*lean)))
        .map(|(_, personality_type)| *personality_type)
        .unwrap_or(DEFAULT_TYPE)
}

pub fn score_personality(
    catalog: &Catalog,
    answers: &AnswerSet,
    threshold: f64,
) -> PersonalityProfile {
    let trait_scores = trait_averages(catalog, answers);
    let value = |t: Trait| trait_scores.get(&t).copied().unwrap_or(0.0);

    let social = match pole(value(Trait::Extroversion), threshold) {
        Pole::Positive => SocialStyle::Extrovert,
        Pole::Negative => SocialStyle::Introvert,
        Pole::Neutral => SocialStyle::Ambivert,
    };
    let focus = match pole(value(Trait::PeopleFocus), threshold) {
        Pole::Positive => WorkFocus::People,
        Pole::Negative => WorkFocus::Task,
        Pole::Neutral => WorkFocus::Balanced,
    };
    let perspective = match pole(value(Trait::DetailFocus), threshold) {
        Pole::Positive => Perspective::Detail,
        Pole::Negative => Perspective::BigPicture,
        Pole::Neutral => Perspective::Balanced,
    };
    let planning = match pole(value(Trait::Structure), threshold) {
        Pole::Positive => Planning::Structured,
        Pole::Negative => Planning::Flexible,
        Pole::Neutral => Planning::Balanced,
    };

    let mut profile = PersonalityProfile {
        social,
        focus,
        perspective,
        planning,
        trait_scores,
        personality_type: DEFAULT_TYPE,
    };
    profile.personality_type = classify_type(&profile);
    profile
}
