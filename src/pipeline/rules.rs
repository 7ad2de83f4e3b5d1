//! Product family business rules.

use tracing::warn;

/// What the pipeline does with a SKU of a given family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FamilyAction {
    /// Left out of the output entirely.
    Exclude,
    /// Emitted with a zero forecast, no model run.
    ZeroResult,
    /// Forecast with the hybrid model.
    Standard,
}

/// Family code lists driving [`FamilyAction`].
#[derive(Debug, Clone, PartialEq)]
pub struct FamilyRules {
    pub excluded: Vec<String>,
    pub zero_result: Vec<String>,
    /// Known standard families. Unknown families are forecast as standard too.
    pub standard: Vec<String>,
}

impl Default for FamilyRules {
    fn default() -> Self {
        let codes = |numbers: &[u32]| -> Vec<String> {
            numbers.iter().map(|n| format!("PA-{n:03}")).collect()
        };
        Self {
            excluded: codes(&[12]),
            zero_result: codes(&[13, 14, 16, 17, 18]),
            standard: codes(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 15]),
        }
    }
}

impl FamilyRules {
    /// Rules with no exclusions or zeroing: every family is standard.
    pub fn none() -> Self {
        Self {
            excluded: Vec::new(),
            zero_result: Vec::new(),
            standard: Vec::new(),
        }
    }

    /// Set the excluded families.
    pub fn with_excluded<I, S>(mut self, families: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded = families.into_iter().map(Into::into).collect();
        self
    }

    /// Set the families that get a zero forecast.
    pub fn with_zero_result<I, S>(mut self, families: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.zero_result = families.into_iter().map(Into::into).collect();
        self
    }

    /// Action for `family`. Exclusion is checked before zeroing.
    pub fn action(&self, family: &str) -> FamilyAction {
        if self.excluded.iter().any(|f| f == family) {
            FamilyAction::Exclude
        } else if self.zero_result.iter().any(|f| f == family) {
            FamilyAction::ZeroResult
        } else {
            if !self.standard.is_empty() && !self.standard.iter().any(|f| f == family) {
                warn!(family, "unrecognized family, using standard calculation");
            }
            FamilyAction::Standard
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_family_codes() {
        let rules = FamilyRules::default();
        assert_eq!(rules.action("PA-012"), FamilyAction::Exclude);
        for family in ["PA-013", "PA-014", "PA-016", "PA-017", "PA-018"] {
            assert_eq!(rules.action(family), FamilyAction::ZeroResult, "{family}");
        }
        for family in ["PA-001", "PA-009", "PA-011", "PA-015"] {
            assert_eq!(rules.action(family), FamilyAction::Standard, "{family}");
        }
        assert_eq!(rules.standard.len(), 12);
    }

    #[test]
    fn unknown_and_empty_families_are_standard() {
        let rules = FamilyRules::default();
        assert_eq!(rules.action("PA-099"), FamilyAction::Standard);
        assert_eq!(rules.action(""), FamilyAction::Standard);
    }

    #[test]
    fn custom_rules() {
        let rules = FamilyRules::none()
            .with_excluded(["X"])
            .with_zero_result(vec!["Y".to_string()]);
        assert_eq!(rules.action("X"), FamilyAction::Exclude);
        assert_eq!(rules.action("Y"), FamilyAction::ZeroResult);
        assert_eq!(rules.action("PA-012"), FamilyAction::Standard);
    }
}
