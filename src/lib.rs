//! Medicaid long-term-care eligibility and divestment planning engine.
//!
//! Turns a household's financial profile and transfer history into an
//! eligibility verdict, a transfer penalty period, and ranked mitigation
//! strategies under jurisdiction-specific rules.

pub mod planning;
pub mod rules;

pub use planning::{
    ClientInfo, DivestmentPlan, EligibilityRequest, EligibilityVerdict, PlanningCoordinator,
    PlanningError, PlanningRequest, PlanningResult, Strategy, TransferRecord,
};
pub use rules::{
    CachedRulesProvider, Jurisdiction, RuleSet, RulesError, RulesProvider, StaticRulesCatalog,
    UnknownJurisdiction,
};
