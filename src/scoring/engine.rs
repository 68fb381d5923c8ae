use std::sync::Arc;

use tracing::debug;

use crate::answers::AnswerSet;
use crate::catalog::Catalog;
use crate::config::ScoringConfig;
use crate::scoring::gifts::score_gifts;
use crate::scoring::matching::match_ministries;
use crate::scoring::personality::score_personality;
use crate::scoring::ScoringOutcome;

/// Single pass over the catalog. Never fails: malformed or missing answers
/// contribute nothing and answers to unknown questions are skipped.
pub fn score_answers(
    catalog: &Catalog,
    config: &ScoringConfig,
    answers: &AnswerSet,
) -> ScoringOutcome {
    let ignored = answers
        .iter()
        .filter(|(id, _)| catalog.question(id).is_none())
        .count();
    if ignored > 0 {
        debug!("ignoring {ignored} answer(s) to questions not in the catalog");
    }

    let gifts = score_gifts(catalog, answers);
    let personality = score_personality(catalog, answers, config.trait_threshold);
    let ministries = match_ministries(catalog, config, answers, &gifts, &personality);

    ScoringOutcome {
        gifts,
        personality,
        ministries,
    }
}

/// Catalog and thresholds bound together, shareable across requests.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    catalog: Arc<Catalog>,
    config: ScoringConfig,
    catalog_hash: String,
}

impl ScoringEngine {
    pub fn new(catalog: Catalog, config: ScoringConfig) -> Self {
        Self::from_shared(Arc::new(catalog), config)
    }

    pub fn from_shared(catalog: Arc<Catalog>, config: ScoringConfig) -> Self {
        let catalog_hash = catalog.fingerprint();
        Self {
            catalog,
            config,
            catalog_hash,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(Catalog::default(), ScoringConfig::default())
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn catalog_hash(&self) -> &str {
        &self.catalog_hash
    }

    pub fn score(&self, answers: &AnswerSet) -> ScoringOutcome {
        score_answers(&self.catalog, &self.config, answers)
    }
}
