pub mod builtin;
pub mod loader;
pub mod schema;

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

pub use loader::load_catalog;
pub use schema::{
    ChoiceOption, Gift, GiftParseError, Ministry, MinistryCategory, MinistryId, PersonalityBonus,
    Question, QuestionKind, Trait, TraitLean,
};

/// Everything the scoring engine reads: the question bank, the ministry
/// catalog and the bonus tables. Immutable once built.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Catalog {
    pub questions: Vec<Question>,
    pub ministries: Vec<Ministry>,
    #[serde(default)]
    pub gift_ministries: BTreeMap<Gift, Vec<MinistryId>>,
    #[serde(default)]
    pub personality_bonuses: Vec<PersonalityBonus>,
    #[serde(default)]
    pub skill_verified_ministries: BTreeSet<MinistryId>,
}

#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    #[error("duplicate question id: {0}")]
    DuplicateQuestion(String),
    #[error("duplicate ministry id: {0}")]
    DuplicateMinistry(MinistryId),
    #[error("question {question} has no options but is multiple choice")]
    MissingOptions { question: String },
    #[error("catalog has no questions")]
    Empty,
}

impl Default for Catalog {
    fn default() -> Self {
        builtin::default_catalog()
    }
}

impl Catalog {
    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    pub fn ministry(&self, id: &MinistryId) -> Option<&Ministry> {
        self.ministries.iter().find(|m| &m.id == id)
    }

    pub fn ministries_for_gift(&self, gift: Gift) -> &[MinistryId] {
        self.gift_ministries
            .get(&gift)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Catalog ministries tied to `gift`, in catalog order. `None` keeps all.
    pub fn ministries_with_gift(&self, gift: Option<Gift>) -> Vec<Ministry> {
        match gift {
            None => self.ministries.clone(),
            Some(gift) => {
                let ids = self.ministries_for_gift(gift);
                self.ministries
                    .iter()
                    .filter(|m| ids.contains(&m.id))
                    .cloned()
                    .collect()
            }
        }
    }

    pub fn requires_skill_verification(&self, id: &MinistryId) -> bool {
        self.skill_verified_ministries.contains(id)
    }

    /// SHA-256 over the canonical JSON form. Stored with every result so a
    /// record can be traced back to the catalog that produced it.
    pub fn fingerprint(&self) -> String {
        let canonical = serde_json::to_string(self).unwrap_or_default();
        let mut hasher = Sha256::new();
        hasher.update(canonical.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.questions.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut seen_questions = BTreeSet::new();
        for question in &self.questions {
            if !seen_questions.insert(question.id.as_str()) {
                return Err(CatalogError::DuplicateQuestion(question.id.clone()));
            }
            if question.kind == QuestionKind::MultipleChoice && question.options.is_empty() {
                return Err(CatalogError::MissingOptions {
                    question: question.id.clone(),
                });
            }
        }
        let mut seen_ministries = BTreeSet::new();
        for ministry in &self.ministries {
            if !seen_ministries.insert(&ministry.id) {
                return Err(CatalogError::DuplicateMinistry(ministry.id.clone()));
            }
        }
        Ok(())
    }

    /// Ministry ids referenced by weights or tables that the catalog does not
    /// define. Scoring ignores them; callers log them.
    pub fn dangling_ministry_refs(&self) -> BTreeSet<MinistryId> {
        let known: BTreeSet<&MinistryId> = self.ministries.iter().map(|m| &m.id).collect();
        let referenced = self
            .questions
            .iter()
            .flat_map(|q| q.ministry_weights.keys())
            .chain(self.gift_ministries.values().flatten())
            .chain(self.personality_bonuses.iter().map(|b| &b.ministry));
        referenced
            .filter(|id| !known.contains(id))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_is_valid_and_self_consistent() {
        let catalog = Catalog::default();
        assert_eq!(catalog.validate(), Ok(()));
        assert_eq!(catalog.ministries.len(), 22);
        assert_eq!(catalog.gift_ministries.len(), Gift::ALL.len());
        assert!(catalog.dangling_ministry_refs().is_empty());
        for id in &catalog.skill_verified_ministries {
            assert!(catalog.ministry(id).is_some(), "unknown verified ministry {id}");
        }
    }

    #[test]
    fn gift_filter_keeps_linked_ministries() {
        let catalog = Catalog::default();
        let ids: Vec<String> = catalog
            .ministries_with_gift(Some(Gift::Mercy))
            .into_iter()
            .map(|m| m.id.0)
            .collect();
        assert_eq!(ids.len(), 3);
        for id in ["visitation", "meals", "prayer"] {
            assert!(ids.iter().any(|known| known == id), "missing {id}");
        }
        assert_eq!(catalog.ministries_with_gift(None).len(), 22);
    }

    #[test]
    fn fingerprint_is_stable_and_content_sensitive() {
        let catalog = Catalog::default();
        assert_eq!(catalog.fingerprint(), Catalog::default().fingerprint());

        let mut changed = catalog.clone();
        changed.questions[0].text.push('!');
        assert_ne!(catalog.fingerprint(), changed.fingerprint());
    }

    #[test]
    fn validate_rejects_duplicate_question_ids() {
        let mut catalog = Catalog::default();
        let copy = catalog.questions[0].clone();
        catalog.questions.push(copy);
        assert!(matches!(
            catalog.validate(),
            Err(CatalogError::DuplicateQuestion(_))
        ));
    }

    #[test]
    fn dangling_refs_are_reported() {
        let mut catalog = Catalog::default();
        catalog.questions[8]
            .ministry_weights
            .insert(MinistryId::from("choir-retired"), 1.0);
        let dangling = catalog.dangling_ministry_refs();
        assert!(dangling.contains(&MinistryId::from("choir-retired")));
    }
}
