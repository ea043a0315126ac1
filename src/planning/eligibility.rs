use serde::Serialize;

use crate::planning::classifier::AssetClassification;
use crate::planning::domain::MaritalStatus;
use crate::rules::RuleSet;

/// Resource and income tests against the jurisdiction's limits. Limits are
/// inclusive: a client sitting exactly at a limit is eligible.
#[derive(Debug, Clone, Serialize)]
pub struct EligibilityVerdict {
    pub countable_assets: f64,
    pub non_countable_assets: f64,
    pub total_monthly_income: f64,
    pub is_resource_eligible: bool,
    pub is_income_eligible: bool,
    pub excess_resources: f64,
    pub excess_income: f64,
}

impl EligibilityVerdict {
    pub fn is_eligible(&self) -> bool {
        self.is_resource_eligible && self.is_income_eligible
    }
}

pub fn assess_eligibility(
    classification: &AssetClassification,
    total_monthly_income: f64,
    rules: &RuleSet,
    marital_status: MaritalStatus,
) -> EligibilityVerdict {
    let (resource_limit, income_limit) = match marital_status {
        MaritalStatus::Single => (rules.resource_limit_single, rules.income_limit_single),
        MaritalStatus::Married => (rules.resource_limit_married, rules.income_limit_married),
    };

    let countable_assets = classification.countable_total();
    let non_countable_assets = classification.non_countable_total();

    EligibilityVerdict {
        countable_assets,
        non_countable_assets,
        total_monthly_income,
        is_resource_eligible: countable_assets <= resource_limit,
        is_income_eligible: total_monthly_income <= income_limit,
        excess_resources: (countable_assets - resource_limit).max(0.0),
        excess_income: (total_monthly_income - income_limit).max(0.0),
    }
}
