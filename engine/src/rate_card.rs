//! FILENAME: engine/src/rate_card.rs
//! PURPOSE: Static role-code -> hourly cost rates used for margin derivation.

use serde::{Deserialize, Serialize};

/// Roles that contribute to the team-average utilization metric.
pub const TEAM_ROLES: &[&str] = &["ACP", "CP", "SCP", "LCP", "ACE", "CE", "SCE"];

/// Hourly cost per role code. Entries keep their declaration order so that
/// the substring fallback in `rate_for` is deterministic.
const STANDARD_RATES: &[(&str, f64)] = &[
    ("ACP", 37.0),
    ("CP", 54.0),
    ("CE", 89.0),
    ("SCE", 119.0),
    ("LCP", 89.0),
    ("R+I I", 44.0),
    ("R+I II", 56.0),
    ("R+I III", 89.0),
    ("R+I IV", 135.0),
];

/// An ordered role -> rate table. Not mutated by normal operation; callers
/// that need a different card build one with `RateCard::new`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateCard {
    entries: Vec<(String, f64)>,
}

impl RateCard {
    /// The built-in rate card.
    pub fn standard() -> Self {
        RateCard {
            entries: STANDARD_RATES
                .iter()
                .map(|(role, rate)| (role.to_string(), *rate))
                .collect(),
        }
    }

    /// Builds a custom card. Role codes are uppercased so lookups stay
    /// case-insensitive; entry order is preserved for the fallback scan.
    pub fn new(entries: Vec<(String, f64)>) -> Self {
        RateCard {
            entries: entries
                .into_iter()
                .map(|(role, rate)| (role.trim().to_uppercase(), rate))
                .collect(),
        }
    }

    /// Resolves the hourly rate for a role label.
    ///
    /// Exact (case-insensitive) match wins; otherwise the first card entry
    /// whose code appears as a substring of the uppercased label is used, so
    /// variants like "Senior CP" still cost as "CP". Unknown roles cost 0.
    pub fn rate_for(&self, role: &str) -> f64 {
        let clean = role.trim().to_uppercase();
        if clean.is_empty() {
            return 0.0;
        }
        if let Some((_, rate)) = self.entries.iter().find(|(code, _)| *code == clean) {
            return *rate;
        }
        for (code, rate) in &self.entries {
            if clean.contains(code.as_str()) {
                return *rate;
            }
        }
        0.0
    }
}

impl Default for RateCard {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match_is_case_insensitive() {
        let card = RateCard::standard();
        assert_eq!(card.rate_for("CP"), 54.0);
        assert_eq!(card.rate_for("cp"), 54.0);
        assert_eq!(card.rate_for("  Sce "), 119.0);
    }

    #[test]
    fn substring_fallback_matches_variant_labels() {
        let card = RateCard::standard();
        assert_eq!(card.rate_for("Senior CP"), card.rate_for("CP"));
        assert_eq!(card.rate_for("CE - Contract"), 89.0);
    }

    #[test]
    fn unknown_roles_cost_zero() {
        let card = RateCard::standard();
        assert_eq!(card.rate_for("Unknown Role"), 0.0);
        assert_eq!(card.rate_for(""), 0.0);
        assert_eq!(card.rate_for("   "), 0.0);
    }

    #[test]
    fn tiered_codes_resolve_exactly() {
        let card = RateCard::standard();
        assert_eq!(card.rate_for("R+I I"), 44.0);
        assert_eq!(card.rate_for("R+I II"), 56.0);
        assert_eq!(card.rate_for("R+I IV"), 135.0);
    }

    #[test]
    fn custom_card_normalizes_codes() {
        let card = RateCard::new(vec![("  dev ".to_string(), 100.0)]);
        assert_eq!(card.rate_for("DEV"), 100.0);
        assert_eq!(card.rate_for("Senior Dev"), 100.0);
    }
}
