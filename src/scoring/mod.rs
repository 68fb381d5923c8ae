pub mod engine;
pub mod explain;
pub mod gifts;
pub mod matching;
pub mod personality;

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::catalog::{Gift, MinistryCategory, MinistryId, Trait, TraitLean};

pub use engine::{score_answers, ScoringEngine};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GiftScore {
    pub gift: Gift,
    /// Normalized 0..=100.
    pub score: u8,
    pub description: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SocialStyle {
    Introvert,
    Extrovert,
    Ambivert,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WorkFocus {
    People,
    Task,
    Balanced,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Perspective {
    Detail,
    BigPicture,
    Balanced,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Planning {
    Structured,
    Flexible,
    Balanced,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PersonalityType {
    Connector,
    Shepherd,
    Architect,
    Visionary,
    Builder,
    Innovator,
    Analyst,
    Steward,
}

impl PersonalityType {
    pub fn description(&self) -> &'static str {
        match self {
            Self::Connector => "You light up a room and help people find their place.",
            Self::Shepherd => "You care deeply for people, often one conversation at a time.",
            Self::Architect => "You design careful, orderly systems that others can rely on.",
            Self::Visionary => "You rally people around what could be.",
            Self::Builder => "You turn plans into finished work, step by step.",
            Self::Innovator => "You see new possibilities and adapt as you go.",
            Self::Analyst => "You think things through and catch what others miss.",
            Self::Steward => "You bring a steady, balanced presence to any team.",
        }
    }
}

impl Display for PersonalityType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let display = match self {
            Self::Connector => "Connector",
            Self::Shepherd => "Shepherd",
            Self::Architect => "Architect",
            Self::Visionary => "Visionary",
            Self::Builder => "Builder",
            Self::Innovator => "Innovator",
            Self::Analyst => "Analyst",
            Self::Steward => "Steward",
        };
        write!(f, "{display}")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PersonalityProfile {
    pub social: SocialStyle,
    pub focus: WorkFocus,
    pub perspective: Perspective,
    pub planning: Planning,
    /// Averaged raw lean per trait, -1..=1.
    pub trait_scores: BTreeMap<Trait, f64>,
    pub personality_type: PersonalityType,
}

impl PersonalityProfile {
    pub fn has_lean(&self, lean: TraitLean) -> bool {
        match lean {
            TraitLean::Extrovert => self.social == SocialStyle::Extrovert,
            TraitLean::Introvert => self.social == SocialStyle::Introvert,
            TraitLean::PeopleFocused => self.focus == WorkFocus::People,
            TraitLean::TaskFocused => self.focus == WorkFocus::Task,
            TraitLean::DetailOriented => self.perspective == Perspective::Detail,
            TraitLean::BigPicture => self.perspective == Perspective::BigPicture,
            TraitLean::Structured => self.planning == Planning::Structured,
            TraitLean::Flexible => self.planning == Planning::Flexible,
        }
    }

    pub fn summary(&self) -> String {
        let social = match self.social {
            SocialStyle::Introvert => "introvert",
            SocialStyle::Extrovert => "extrovert",
            SocialStyle::Ambivert => "ambivert",
        };
        let focus = match self.focus {
            WorkFocus::People => "people-focused",
            WorkFocus::Task => "task-focused",
            WorkFocus::Balanced => "balanced focus",
        };
        let perspective = match self.perspective {
            Perspective::Detail => "detail-oriented",
            Perspective::BigPicture => "big-picture",
            Perspective::Balanced => "balanced perspective",
        };
        let planning = match self.planning {
            Planning::Structured => "structured",
            Planning::Flexible => "flexible",
            Planning::Balanced => "balanced planning",
        };
        format!(
            "{} ({social}, {focus}, {perspective}, {planning})",
            self.personality_type
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MinistryMatch {
    pub ministry: MinistryId,
    pub name: String,
    pub category: MinistryCategory,
    pub score: f64,
    pub is_primary: bool,
    pub has_verified_skill: bool,
    pub growth_pathway: Option<String>,
    pub why_matched: String,
}

/// Everything one scoring pass produces.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoringOutcome {
    pub gifts: Vec<GiftScore>,
    pub personality: PersonalityProfile,
    pub ministries: Vec<MinistryMatch>,
}

impl ScoringOutcome {
    pub fn primary_matches(&self) -> impl Iterator<Item = &MinistryMatch> {
        self.ministries.iter().filter(|m| m.is_primary)
    }

    pub fn primary_ids(&self) -> Vec<MinistryId> {
        self.primary_matches().map(|m| m.ministry.clone()).collect()
    }

    pub fn top_gifts(&self, count: usize) -> &[GiftScore] {
        &self.gifts[..count.min(self.gifts.len())]
    }

    pub fn gift_score(&self, gift: Gift) -> Option<u8> {
        self.gifts.iter().find(|g| g.gift == gift).map(|g| g.score)
    }

    pub fn ministry(&self, id: &str) -> Option<&MinistryMatch> {
        self.ministries.iter().find(|m| m.ministry.as_str() == id)
    }
}
