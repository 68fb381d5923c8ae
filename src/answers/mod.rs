pub mod progress;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::{Question, QuestionKind};

/// Raw response as submitted by a form. Anything that is neither a number nor
/// a string is kept verbatim so a bad field never rejects the whole set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum AnswerValue {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

/// Interpreted form of an [`AnswerValue`].
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    Likert(f64),
    Yes,
    No,
    Choice(String),
    Malformed,
}

pub const LIKERT_MIN: f64 = 1.0;
pub const LIKERT_MAX: f64 = 5.0;

impl AnswerValue {
    pub fn likert(value: u8) -> Self {
        Self::Number(f64::from(value))
    }

    pub fn yes() -> Self {
        Self::Text("yes".to_string())
    }

    pub fn no() -> Self {
        Self::Text("no".to_string())
    }

    pub fn choice(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn interpret(&self) -> Response {
        match self {
            Self::Number(value) => likert_or_malformed(*value),
            Self::Text(raw) => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    return Response::Malformed;
                }
                if trimmed.eq_ignore_ascii_case("yes") {
                    return Response::Yes;
                }
                if trimmed.eq_ignore_ascii_case("no") {
                    return Response::No;
                }
                match trimmed.parse::<f64>() {
                    Ok(value) => likert_or_malformed(value),
                    Err(_) => Response::Choice(trimmed.to_string()),
                }
            }
            Self::Other(serde_json::Value::Bool(true)) => Response::Yes,
            Self::Other(serde_json::Value::Bool(false)) => Response::No,
            Self::Other(_) => Response::Malformed,
        }
    }

    /// Linear 0..=1 multiplier used by gift and ministry accumulation.
    pub fn strength(&self) -> f64 {
        match self.interpret() {
            Response::Likert(value) => (value - LIKERT_MIN) / (LIKERT_MAX - LIKERT_MIN),
            Response::Yes => 1.0,
            Response::No | Response::Choice(_) | Response::Malformed => 0.0,
        }
    }

    /// Signed -1..=1 multiplier used by personality averaging. Only Likert
    /// answers carry a lean.
    pub fn lean(&self) -> Option<f64> {
        match self.interpret() {
            Response::Likert(value) => Some((value - 3.0) / 2.0),
            _ => None,
        }
    }

    pub fn is_explicit_yes(&self) -> bool {
        self.interpret() == Response::Yes
    }

    /// Whether this value is a valid response to `question`: a 1-5 number
    /// for Likert, yes/no for yes-no, one of the listed option values for
    /// multiple choice.
    pub fn fits(&self, question: &Question) -> bool {
        match question.kind {
            QuestionKind::Likert => matches!(self.interpret(), Response::Likert(_)),
            QuestionKind::YesNo => matches!(self.interpret(), Response::Yes | Response::No),
            QuestionKind::MultipleChoice => match self {
                Self::Text(raw) => {
                    let raw = raw.trim();
                    question.options.iter().any(|option| option.value == raw)
                }
                _ => false,
            },
        }
    }
}

fn likert_or_malformed(value: f64) -> Response {
    if value.is_finite() && (LIKERT_MIN..=LIKERT_MAX).contains(&value) {
        Response::Likert(value)
    } else {
        Response::Malformed
    }
}

impl From<u8> for AnswerValue {
    fn from(value: u8) -> Self {
        Self::likert(value)
    }
}

impl From<&str> for AnswerValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Question id to response. Keys are unique and ordering carries no meaning.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct AnswerSet(BTreeMap<String, AnswerValue>);

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, question_id: &str) -> Option<&AnswerValue> {
        self.0.get(question_id)
    }

    pub fn insert(&mut self, question_id: impl Into<String>, value: impl Into<AnswerValue>) {
        self.0.insert(question_id.into(), value.into());
    }

    pub fn with(mut self, question_id: impl Into<String>, value: impl Into<AnswerValue>) -> Self {
        self.insert(question_id, value);
        self
    }

    /// Folds a partial batch into this set. Later values replace earlier ones
    /// per key; no key is ever removed.
    pub fn merge(&mut self, batch: AnswerSet) -> usize {
        let count = batch.0.len();
        self.0.extend(batch.0);
        count
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &AnswerValue)> {
        self.0.iter()
    }
}

impl FromIterator<(String, AnswerValue)> for AnswerSet {
    fn from_iter<T: IntoIterator<Item = (String, AnswerValue)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
