use crate::catalog::{Catalog, Ministry, MinistryCategory, TraitLean};
use crate::scoring::{GiftScore, PersonalityProfile};

/// Canned reasons for ministry groups when no top gift overlaps.
const PERSONALITY_REASONS: &[(TraitLean, MinistryCategory, &str)] = &[
    (
        TraitLean::Extrovert,
        MinistryCategory::Welcome,
        "Your outgoing personality makes a warm first impression on guests.",
    ),
    (
        TraitLean::Extrovert,
        MinistryCategory::Outreach,
        "You draw energy from people, which fuels connecting with the community.",
    ),
    (
        TraitLean::PeopleFocused,
        MinistryCategory::Care,
        "You pay attention to how people are really doing, which is the heart of care.",
    ),
    (
        TraitLean::PeopleFocused,
        MinistryCategory::NextGeneration,
        "Your focus on people helps kids and students feel seen.",
    ),
    (
        TraitLean::TaskFocused,
        MinistryCategory::Operations,
        "You like getting things done, and this team keeps the church running.",
    ),
    (
        TraitLean::TaskFocused,
        MinistryCategory::Production,
        "You thrive on clear tasks, which is exactly what a service run sheet needs.",
    ),
    (
        TraitLean::DetailOriented,
        MinistryCategory::Production,
        "Your eye for detail keeps audio, slides, and streams clean.",
    ),
    (
        TraitLean::DetailOriented,
        MinistryCategory::CreativeArts,
        "Your eye for detail shows up in polished creative work.",
    ),
    (
        TraitLean::BigPicture,
        MinistryCategory::CreativeArts,
        "You think in possibilities, which sparks fresh creative ideas.",
    ),
    (
        TraitLean::Introvert,
        MinistryCategory::Care,
        "You do well in one-on-one settings where people feel safe to open up.",
    ),
];

pub fn why_matched(
    ministry: &Ministry,
    top_gifts: &[GiftScore],
    catalog: &Catalog,
    personality: &PersonalityProfile,
) -> String {
    let overlapping: Vec<String> = top_gifts
        .iter()
        .filter(|g| g.score > 0)
        .filter(|g| catalog.ministries_for_gift(g.gift).contains(&ministry.id))
        .map(|g| g.gift.to_string())
        .collect();
    if !overlapping.is_empty() {
        let noun = if overlapping.len() == 1 { "gift" } else { "gifts" };
        return format!(
            "Your top {noun} of {} line up with {}.",
            join_names(&overlapping),
            ministry.name
        );
    }

    if let Some((_, _, reason)) = PERSONALITY_REASONS
        .iter()
        .find(|(lean, category, _)| *category == ministry.category && personality.has_lean(*lean))
    {
        return (*reason).to_string();
    }

    format!(
        "Your survey responses show an interest in serving with {}.",
        ministry.name
    )
}

fn join_names(names: &[String]) -> String {
    match names {
        [] => String::new(),
        [only] => only.clone(),
        [first, second] => format!("{first} and {second}"),
        [rest @ .., last] => format!("{}, and {last}", rest.join(", ")),
    }
}
