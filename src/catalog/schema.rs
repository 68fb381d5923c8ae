use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Gift {
    Administration,
    Leadership,
    Teaching,
    Shepherding,
    Mercy,
    Hospitality,
    Evangelism,
    Encouragement,
    Giving,
    Service,
    Creativity,
    Craftsmanship,
}

impl Gift {
    /// Fixed encounter order. Ties in gift ranking resolve to this order.
    pub const ALL: [Gift; 12] = [
        Gift::Administration,
        Gift::Leadership,
        Gift::Teaching,
        Gift::Shepherding,
        Gift::Mercy,
        Gift::Hospitality,
        Gift::Evangelism,
        Gift::Encouragement,
        Gift::Giving,
        Gift::Service,
        Gift::Creativity,
        Gift::Craftsmanship,
    ];

    pub fn as_slug(&self) -> &'static str {
        match self {
            Self::Administration => "administration",
            Self::Leadership => "leadership",
            Self::Teaching => "teaching",
            Self::Shepherding => "shepherding",
            Self::Mercy => "mercy",
            Self::Hospitality => "hospitality",
            Self::Evangelism => "evangelism",
            Self::Encouragement => "encouragement",
            Self::Giving => "giving",
            Self::Service => "service",
            Self::Creativity => "creativity",
            Self::Craftsmanship => "craftsmanship",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Administration => {
                "You bring order to plans, people, and resources so ministry runs smoothly."
            }
            Self::Leadership => "You cast vision and help others move toward a shared goal.",
            Self::Teaching => "You explain truth clearly and help others understand and apply it.",
            Self::Shepherding => "You guide and care for people over the long haul of their growth.",
            Self::Mercy => "You notice those who are hurting and move toward them with compassion.",
            Self::Hospitality => "You make people feel welcome, known, and at home.",
            Self::Evangelism => "You share your faith naturally with people outside the church.",
            Self::Encouragement => "You strengthen others with timely words of hope and support.",
            Self::Giving => "You support the work of the church generously and joyfully.",
            Self::Service => "You see practical needs and meet them, often behind the scenes.",
            Self::Creativity => "You express beauty and meaning through art, music, and design.",
            Self::Craftsmanship => "You build, repair, and operate the tools ministry depends on.",
        }
    }
}

impl Display for Gift {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let display = match self {
            Self::Administration => "Administration",
            Self::Leadership => "Leadership",
            Self::Teaching => "Teaching",
            Self::Shepherding => "Shepherding",
            Self::Mercy => "Mercy",
            Self::Hospitality => "Hospitality",
            Self::Evangelism => "Evangelism",
            Self::Encouragement => "Encouragement",
            Self::Giving => "Giving",
            Self::Service => "Service",
            Self::Creativity => "Creativity",
            Self::Craftsmanship => "Craftsmanship",
        };
        write!(f, "{display}")
    }
}

#[derive(Debug, Error)]
#[error("unknown gift: {0}")]
pub struct GiftParseError(pub String);

impl FromStr for Gift {
    type Err = GiftParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "administration" | "admin" => Ok(Self::Administration),
            "leadership" => Ok(Self::Leadership),
            "teaching" => Ok(Self::Teaching),
            "shepherding" | "pastoring" => Ok(Self::Shepherding),
            "mercy" => Ok(Self::Mercy),
            "hospitality" => Ok(Self::Hospitality),
            "evangelism" => Ok(Self::Evangelism),
            "encouragement" | "exhortation" => Ok(Self::Encouragement),
            "giving" => Ok(Self::Giving),
            "service" | "helps" => Ok(Self::Service),
            "creativity" | "creative_arts" => Ok(Self::Creativity),
            "craftsmanship" => Ok(Self::Craftsmanship),
            _ => Err(GiftParseError(s.to_string())),
        }
    }
}

/// Signed personality dimension. Positive values lean toward the first pole
/// named in each variant's doc.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Trait {
    /// extrovert (+) / introvert (-)
    Extroversion,
    /// people (+) / task (-)
    PeopleFocus,
    /// detail (+) / big picture (-)
    DetailFocus,
    /// structured (+) / flexible (-)
    Structure,
}

impl Trait {
    pub const ALL: [Trait; 4] = [
        Trait::Extroversion,
        Trait::PeopleFocus,
        Trait::DetailFocus,
        Trait::Structure,
    ];
}

impl Display for Trait {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Extroversion => write!(f, "extroversion"),
            Self::PeopleFocus => write!(f, "people_focus"),
            Self::DetailFocus => write!(f, "detail_focus"),
            Self::Structure => write!(f, "structure"),
        }
    }
}

/// One pole of a personality axis, as used by type rules and bonus tables.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum TraitLean {
    Extrovert,
    Introvert,
    PeopleFocused,
    TaskFocused,
    DetailOriented,
    BigPicture,
    Structured,
    Flexible,
}

impl Display for TraitLean {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let display = match self {
            Self::Extrovert => "extrovert",
            Self::Introvert => "introvert",
            Self::PeopleFocused => "people-focused",
            Self::TaskFocused => "task-focused",
            Self::DetailOriented => "detail-oriented",
            Self::BigPicture => "big-picture",
            Self::Structured => "structured",
            Self::Flexible => "flexible",
        };
        write!(f, "{display}")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct MinistryId(pub String);

impl MinistryId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for MinistryId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for MinistryId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "kebab-case")]
pub enum MinistryCategory {
    Welcome,
    CreativeArts,
    Production,
    Care,
    NextGeneration,
    Outreach,
    Operations,
}

impl MinistryCategory {
    pub fn as_slug(&self) -> &'static str {
        match self {
            Self::Welcome => "welcome",
            Self::CreativeArts => "creative-arts",
            Self::Production => "production",
            Self::Care => "care",
            Self::NextGeneration => "next-generation",
            Self::Outreach => "outreach",
            Self::Operations => "operations",
        }
    }
}

impl Display for MinistryCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let display = match self {
            Self::Welcome => "Welcome",
            Self::CreativeArts => "Creative Arts",
            Self::Production => "Production",
            Self::Care => "Care",
            Self::NextGeneration => "Next Generation",
            Self::Outreach => "Outreach",
            Self::Operations => "Operations",
        };
        write!(f, "{display}")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ministry {
    pub id: MinistryId,
    pub name: String,
    pub category: MinistryCategory,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub growth_pathway: Option<String>,
}

impl Ministry {
    pub fn new(id: &str, name: &str, category: MinistryCategory, description: &str) -> Self {
        Self {
            id: MinistryId::from(id),
            name: name.to_string(),
            category,
            description: description.to_string(),
            growth_pathway: None,
        }
    }

    pub fn with_growth_pathway(mut self, pathway: &str) -> Self {
        self.growth_pathway = Some(pathway.to_string());
        self
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    Likert,
    YesNo,
    MultipleChoice,
}

impl Display for QuestionKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Likert => write!(f, "likert"),
            Self::YesNo => write!(f, "yes/no"),
            Self::MultipleChoice => write!(f, "choice"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChoiceOption {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Question {
    pub id: String,
    pub text: String,
    pub kind: QuestionKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<ChoiceOption>,
    #[serde(default)]
    pub gift_weights: BTreeMap<Gift, f64>,
    #[serde(default)]
    pub personality_weights: BTreeMap<Trait, f64>,
    #[serde(default)]
    pub ministry_weights: BTreeMap<MinistryId, f64>,
    #[serde(default)]
    pub skill_verification: bool,
    #[serde(default = "default_required")]
    pub required: bool,
}

impl Question {
    pub fn new(id: &str, kind: QuestionKind, text: &str) -> Self {
        Self {
            id: id.to_string(),
            text: text.to_string(),
            kind,
            options: Vec::new(),
            gift_weights: BTreeMap::new(),
            personality_weights: BTreeMap::new(),
            ministry_weights: BTreeMap::new(),
            skill_verification: false,
            required: true,
        }
    }

    pub fn likert(id: &str, text: &str) -> Self {
        Self::new(id, QuestionKind::Likert, text)
    }

    pub fn yes_no(id: &str, text: &str) -> Self {
        Self::new(id, QuestionKind::YesNo, text)
    }

    pub fn choice(id: &str, text: &str, options: &[(&str, &str)]) -> Self {
        let mut question = Self::new(id, QuestionKind::MultipleChoice, text);
        question.options = options
            .iter()
            .map(|(value, label)| ChoiceOption {
                value: value.to_string(),
                label: label.to_string(),
            })
            .collect();
        question
    }

    pub fn gift(mut self, gift: Gift, weight: f64) -> Self {
        self.gift_weights.insert(gift, weight);
        self
    }

    pub fn personality(mut self, trait_: Trait, weight: f64) -> Self {
        self.personality_weights.insert(trait_, weight);
        self
    }

    pub fn ministry(mut self, ministry: &str, weight: f64) -> Self {
        self.ministry_weights.insert(MinistryId::from(ministry), weight);
        self
    }

    pub fn verifies_skill(mut self) -> Self {
        self.skill_verification = true;
        self
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }
}

fn default_required() -> bool {
    true
}

/// Flat score bump applied to a ministry when the profile shows a lean.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PersonalityBonus {
    pub when: TraitLean,
    pub ministry: MinistryId,
    pub amount: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gift_slugs_round_trip_through_from_str() {
        for gift in Gift::ALL {
            assert_eq!(gift.as_slug().parse::<Gift>().expect("slug parses"), gift);
        }
        assert!("prophecy".parse::<Gift>().is_err());
    }

    #[test]
    fn question_weights_deserialize_with_defaults() {
        let question: Question = serde_json::from_str(
            r#"{"id":"q1","text":"t","kind":"likert","gift_weights":{"teaching":1.0}}"#,
        )
        .expect("question parses");
        assert_eq!(question.gift_weights.get(&Gift::Teaching), Some(&1.0));
        assert!(question.required);
        assert!(!question.skill_verification);
        assert!(question.ministry_weights.is_empty());
    }
}
