//! Jurisdiction-scoped Medicaid rule sets and the provider seam the engine
//! consumes them through.
//!
//! Rule data is curated outside this crate. The engine only requires that a
//! [`RulesProvider`] hand back a validated [`RuleSet`] for a (jurisdiction,
//! year) pair, so deployments can back the trait with bundled data
//! ([`StaticRulesCatalog`]), a database, or a remote service, optionally
//! wrapped in the TTL cache adapter ([`CachedRulesProvider`]).

mod cache;
mod catalog;
mod jurisdiction;

pub use cache::CachedRulesProvider;
pub use catalog::StaticRulesCatalog;
pub use jurisdiction::{Jurisdiction, UnknownJurisdiction};

pub(crate) use jurisdiction::normalize;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Immutable numeric limits and exemption categories for one jurisdiction
/// and benefit year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    pub jurisdiction: Jurisdiction,
    pub year: i32,
    pub resource_limit_single: f64,
    pub resource_limit_married: f64,
    pub income_limit_single: f64,
    pub income_limit_married: f64,
    /// Length of the transfer-scrutiny window, in calendar months.
    pub lookback_months: u32,
    /// Per-recipient, per-calendar-year amount excluded from gift penalties.
    pub annual_gift_exclusion: f64,
    /// Average regional monthly cost of care; divides the non-exempt total
    /// into penalty months.
    pub penalty_divisor: f64,
    /// Purpose tags that exempt a transfer outright (e.g. "caregiver
    /// compensation").
    pub exempt_transfer_categories: BTreeSet<String>,
}

impl RuleSet {
    /// Enforce the structural invariants every provider must guarantee
    /// before a rule set reaches the calculators: non-negative money, a
    /// positive lookback window, and a usable penalty divisor.
    pub fn validate(&self) -> Result<(), RulesError> {
        let monetary = [
            ("resource_limit_single", self.resource_limit_single),
            ("resource_limit_married", self.resource_limit_married),
            ("income_limit_single", self.income_limit_single),
            ("income_limit_married", self.income_limit_married),
            ("annual_gift_exclusion", self.annual_gift_exclusion),
        ];
        for (field, value) in monetary {
            if !value.is_finite() || value < 0.0 {
                return Err(self.invalid(format!("{field} must be a non-negative amount")));
            }
        }

        if self.lookback_months == 0 {
            return Err(self.invalid("lookback_months must be greater than zero".to_string()));
        }

        if !self.penalty_divisor.is_finite() || self.penalty_divisor <= 0.0 {
            return Err(self.invalid("penalty_divisor must be greater than zero".to_string()));
        }

        Ok(())
    }

    /// Whether a transfer purpose falls in an exempt category. Matching is
    /// case- and whitespace-insensitive and tolerates trailing annotations
    /// ("caregiver compensation 2023" still matches).
    pub fn exempts_purpose(&self, purpose: &str) -> bool {
        let normalized = normalize(purpose);
        self.exempt_transfer_categories
            .iter()
            .any(|category| normalized.contains(&normalize(category)))
    }

    fn invalid(&self, reason: String) -> RulesError {
        RulesError::Invalid {
            jurisdiction: self.jurisdiction.clone(),
            year: self.year,
            reason,
        }
    }
}

/// Source of jurisdiction/year rule sets.
///
/// Implementations may be slow (remote lookups) and may sit behind
/// [`CachedRulesProvider`]; the engine never assumes rules change within a
/// single request.
pub trait RulesProvider: Send + Sync {
    fn rules_for(&self, jurisdiction: &Jurisdiction, year: i32) -> Result<RuleSet, RulesError>;
}

/// Error enumeration for rules lookups.
#[derive(Debug, thiserror::Error)]
pub enum RulesError {
    #[error("no medicaid rules published for {jurisdiction} in {year}")]
    NotFound {
        jurisdiction: Jurisdiction,
        year: i32,
    },
    #[error("invalid rule set for {jurisdiction} {year}: {reason}")]
    Invalid {
        jurisdiction: Jurisdiction,
        year: i32,
        reason: String,
    },
    #[error("rules source unavailable: {0}")]
    Unavailable(String),
}
