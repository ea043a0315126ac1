use std::collections::BTreeMap;

use super::{Jurisdiction, RuleSet, RulesError, RulesProvider};

/// In-memory rules provider backed by curated per-state figures.
///
/// Ships a 2025 baseline for the states the planning desk currently serves;
/// deployments that source rules elsewhere implement [`RulesProvider`]
/// directly and skip this type.
#[derive(Debug, Default)]
pub struct StaticRulesCatalog {
    entries: BTreeMap<(String, i32), RuleSet>,
}

impl StaticRulesCatalog {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The bundled 2025 baseline.
    ///
    /// Resource/income limits follow the federal SSI-linked figures most
    /// states adopt; California, New York, and Minnesota carry their
    /// published state variants. Penalty divisors are each state's average
    /// monthly nursing facility cost as published for 2025.
    pub fn builtin_2025() -> Self {
        let mut catalog = Self::empty();
        for rules in builtin_2025_rule_sets() {
            catalog.entries.insert(rules_key(&rules), rules);
        }
        catalog
    }

    /// Add or replace the rule set for its (jurisdiction, year) scope.
    /// Validates before storing so no consumer ever observes a malformed set.
    pub fn insert(&mut self, rules: RuleSet) -> Result<(), RulesError> {
        rules.validate()?;
        self.entries.insert(rules_key(&rules), rules);
        Ok(())
    }

    pub fn contains(&self, jurisdiction: &Jurisdiction, year: i32) -> bool {
        self.entries
            .contains_key(&(jurisdiction.code().to_string(), year))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl RulesProvider for StaticRulesCatalog {
    fn rules_for(&self, jurisdiction: &Jurisdiction, year: i32) -> Result<RuleSet, RulesError> {
        self.entries
            .get(&(jurisdiction.code().to_string(), year))
            .cloned()
            .ok_or_else(|| RulesError::NotFound {
                jurisdiction: jurisdiction.clone(),
                year,
            })
    }
}

fn rules_key(rules: &RuleSet) -> (String, i32) {
    (rules.jurisdiction.code().to_string(), rules.year)
}

/// Transfer purposes exempted by federal statute in every bundled state.
const STATUTORY_EXEMPT_CATEGORIES: &[&str] = &[
    "caregiver compensation",
    "transfer to spouse",
    "transfer to disabled child",
    "transfer to special needs trust",
];

fn builtin_2025_rule_sets() -> Vec<RuleSet> {
    // California runs a shorter statutory lookback and raised its resource
    // limits ahead of phasing the asset test out.
    let mut california = baseline_2025("CA", 130_000.0, 1_801.0, 10_933.0);
    california.resource_limit_married = 195_000.0;
    california.lookback_months = 30;

    vec![
        california,
        baseline_2025("IA", 2_000.0, 2_901.0, 7_858.0),
        baseline_2025("FL", 2_000.0, 2_901.0, 10_809.0),
        baseline_2025("MN", 3_000.0, 2_901.0, 9_580.0),
        baseline_2025("NY", 32_396.0, 1_800.0, 14_273.0),
        baseline_2025("OH", 2_000.0, 2_901.0, 7_087.0),
        baseline_2025("PA", 2_000.0, 2_901.0, 14_342.0),
        baseline_2025("TX", 2_000.0, 2_901.0, 7_116.0),
    ]
}

fn baseline_2025(
    code: &str,
    resource_limit_single: f64,
    income_limit_single: f64,
    penalty_divisor: f64,
) -> RuleSet {
    RuleSet {
        jurisdiction: Jurisdiction::from_canonical(code),
        year: 2025,
        resource_limit_single,
        // 2025 federal community spouse resource allowance maximum.
        resource_limit_married: 157_920.0,
        income_limit_single,
        income_limit_married: income_limit_single * 2.0,
        lookback_months: 60,
        // 2025 federal annual gift-tax exclusion.
        annual_gift_exclusion: 19_000.0,
        penalty_divisor,
        exempt_transfer_categories: STATUTORY_EXEMPT_CATEGORIES
            .iter()
            .map(|category| (*category).to_string())
            .collect(),
    }
}
