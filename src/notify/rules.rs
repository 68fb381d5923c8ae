use serde::{Deserialize, Serialize};

use crate::config::NotificationRulesConfig;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    SurveyCompleted,
    PrimaryMatchGained,
    PrimaryMatchLost,
}

impl NotificationKind {
    pub fn is_enabled(self, rules: &NotificationRulesConfig) -> bool {
        match self {
            Self::SurveyCompleted => rules.survey_completed,
            Self::PrimaryMatchGained => rules.primary_match_gained,
            Self::PrimaryMatchLost => rules.primary_match_lost,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rules_toggle_each_kind() {
        let rules = NotificationRulesConfig {
            survey_completed: true,
            primary_match_gained: false,
            primary_match_lost: true,
        };
        assert!(NotificationKind::SurveyCompleted.is_enabled(&rules));
        assert!(!NotificationKind::PrimaryMatchGained.is_enabled(&rules));
        assert!(NotificationKind::PrimaryMatchLost.is_enabled(&rules));
    }
}
