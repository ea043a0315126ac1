use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use tracing::{info, warn};

use crate::planning::classifier::{classify_assets, total_income, ClassifierConfig};
use crate::planning::domain::{ClientInfo, EligibilityRequest, MaritalStatus, PlanningRequest};
use crate::planning::eligibility::{self, EligibilityVerdict};
use crate::planning::lookback::{analyze_transfers, DocumentationRisk, TransferAnalysis};
use crate::planning::penalty::{calculate_penalty, PenaltyResult};
use crate::planning::strategy::{develop_strategies, Strategy};
use crate::rules::{Jurisdiction, RuleSet, RulesError, RulesProvider, UnknownJurisdiction};

/// Failures that halt a request before any analysis is produced. Data
/// quality problems in the transfer history never surface here; they ride
/// along inside the analysis instead.
#[derive(Debug, thiserror::Error)]
pub enum PlanningError {
    #[error(transparent)]
    Jurisdiction(#[from] UnknownJurisdiction),
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },
    #[error(transparent)]
    Rules(#[from] RulesError),
}

/// Everything a planner needs from one divestment review.
#[derive(Debug, Clone, Serialize)]
pub struct DivestmentPlan {
    pub jurisdiction: Jurisdiction,
    pub transfer_analysis: TransferAnalysis,
    pub penalty_calculation: PenaltyResult,
    pub eligibility: EligibilityVerdict,
    pub strategies: Vec<Strategy>,
    pub summary: String,
}

/// Envelope handed to callers that cannot deal in `Result`. Serializes as
/// the plan's fields plus `"status": "success"`, or as
/// `{"status": "error", "error": …}`.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PlanningResult {
    Success(DivestmentPlan),
    Error { error: String },
}

impl PlanningResult {
    pub fn is_success(&self) -> bool {
        matches!(self, PlanningResult::Success(_))
    }
}

/// Orchestrates one planning request end to end: rules lookup,
/// classification, lookback sweep, penalty arithmetic, eligibility tests,
/// and strategy generation. Holds no per-request state, so one coordinator
/// serves concurrent requests.
pub struct PlanningCoordinator<P> {
    rules: P,
    classifier: ClassifierConfig,
}

impl<P: RulesProvider> PlanningCoordinator<P> {
    pub fn new(rules: P) -> Self {
        Self::with_classifier(rules, ClassifierConfig::default())
    }

    pub fn with_classifier(rules: P, classifier: ClassifierConfig) -> Self {
        Self { rules, classifier }
    }

    /// Run a divestment review and fold any failure into the result
    /// envelope. Callers at the application boundary get a uniform shape
    /// whether the review succeeded or not.
    pub fn plan_divestment(&self, request: &PlanningRequest, today: NaiveDate) -> PlanningResult {
        match self.try_plan_divestment(request, today) {
            Ok(plan) => PlanningResult::Success(plan),
            Err(error) => {
                warn!(
                    client = %request.client.name,
                    jurisdiction = %request.jurisdiction,
                    %error,
                    "divestment planning failed"
                );
                PlanningResult::Error {
                    error: error.to_string(),
                }
            }
        }
    }

    /// Typed variant for callers that want to branch on the failure.
    pub fn try_plan_divestment(
        &self,
        request: &PlanningRequest,
        today: NaiveDate,
    ) -> Result<DivestmentPlan, PlanningError> {
        let jurisdiction = Jurisdiction::parse(&request.jurisdiction)?;
        validate_client(&request.client)?;
        validate_money_map("assets", &request.assets)?;
        validate_money_map("income", &request.income)?;
        validate_transfers(request)?;

        let rules = self.rules.rules_for(&jurisdiction, today.year())?;

        let classification = classify_assets(&request.assets, &self.classifier);
        let monthly_income = total_income(&request.income);
        let analysis = analyze_transfers(&request.transfers, &rules, today);
        let penalty = calculate_penalty(&analysis, &rules, today);
        let verdict = eligibility::assess_eligibility(
            &classification,
            monthly_income,
            &rules,
            request.client.marital_status,
        );
        let strategies = develop_strategies(&analysis, &penalty, &verdict, &request.client.household);
        let summary = compose_summary(
            &request.client,
            &jurisdiction,
            &rules,
            &analysis,
            &penalty,
            &verdict,
        );

        if analysis.documentation_risk == DocumentationRisk::High {
            warn!(
                client = %request.client.name,
                issues = analysis.documentation_issues.len(),
                "transfer history carries documentation issues"
            );
        }
        info!(
            client = %request.client.name,
            jurisdiction = %jurisdiction,
            penalty_months = penalty.penalty_months,
            strategies = strategies.len(),
            "divestment plan computed"
        );

        Ok(DivestmentPlan {
            jurisdiction,
            transfer_analysis: analysis,
            penalty_calculation: penalty,
            eligibility: verdict,
            strategies,
            summary,
        })
    }

    /// Standalone eligibility check without the transfer analysis.
    pub fn assess_eligibility(
        &self,
        request: &EligibilityRequest,
        today: NaiveDate,
    ) -> Result<EligibilityVerdict, PlanningError> {
        let jurisdiction = Jurisdiction::parse(&request.jurisdiction)?;
        validate_client(&request.client)?;
        validate_money_map("assets", &request.assets)?;
        validate_money_map("income", &request.income)?;

        let rules = self.rules.rules_for(&jurisdiction, today.year())?;
        let classification = classify_assets(&request.assets, &self.classifier);

        Ok(eligibility::assess_eligibility(
            &classification,
            total_income(&request.income),
            &rules,
            request.client.marital_status,
        ))
    }
}

fn validate_client(client: &ClientInfo) -> Result<(), PlanningError> {
    if client.name.trim().is_empty() {
        return Err(PlanningError::Validation {
            field: "client.name",
            reason: "must not be blank".to_string(),
        });
    }
    Ok(())
}

fn validate_money_map(
    field: &'static str,
    values: &BTreeMap<String, f64>,
) -> Result<(), PlanningError> {
    for (name, value) in values {
        if !value.is_finite() {
            return Err(PlanningError::Validation {
                field,
                reason: format!("'{name}' is not a finite amount"),
            });
        }
    }
    Ok(())
}

fn validate_transfers(request: &PlanningRequest) -> Result<(), PlanningError> {
    for transfer in &request.transfers {
        if !transfer.amount.is_finite() || transfer.amount <= 0.0 {
            return Err(PlanningError::Validation {
                field: "transfers",
                reason: format!(
                    "transfer to '{}' must have a positive amount",
                    transfer.recipient
                ),
            });
        }
    }
    Ok(())
}

fn compose_summary(
    client: &ClientInfo,
    jurisdiction: &Jurisdiction,
    rules: &RuleSet,
    analysis: &TransferAnalysis,
    penalty: &PenaltyResult,
    verdict: &EligibilityVerdict,
) -> String {
    let (resource_limit, income_limit) = match client.marital_status {
        MaritalStatus::Single => (rules.resource_limit_single, rules.income_limit_single),
        MaritalStatus::Married => (rules.resource_limit_married, rules.income_limit_married),
    };

    let mut lines = vec![
        format!(
            "Medicaid divestment review for {} ({}, {}).",
            client.name,
            jurisdiction.display_name(),
            client.marital_status
        ),
        format!(
            "Lookback window opens {}: {} transfer(s) in window, {} outside, {} exempt.",
            analysis.lookback_start,
            analysis.transfers_in_window.len(),
            analysis.transfers_out_of_window.len(),
            analysis.exempt_transfers.len()
        ),
    ];

    if penalty.has_penalty {
        lines.push(format!(
            "Non-exempt transfers of ${:.2} create a {:.1}-month penalty ({} days) ending {}.",
            analysis.non_exempt_total,
            penalty.penalty_months,
            penalty.penalty_days,
            penalty.penalty_end_date
        ));
    } else {
        lines.push("No transfer penalty applies.".to_string());
    }

    lines.push(format!(
        "Countable resources ${:.2} against a ${:.2} limit; monthly income ${:.2} against ${:.2}.",
        verdict.countable_assets, resource_limit, verdict.total_monthly_income, income_limit
    ));
    if verdict.is_eligible() {
        lines.push("Resource and income tests both pass.".to_string());
    } else {
        lines.push(format!(
            "Excess resources ${:.2}; excess income ${:.2}.",
            verdict.excess_resources, verdict.excess_income
        ));
    }

    if analysis.has_documentation_issues() {
        lines.push(format!(
            "{} documentation issue(s) need attention before filing.",
            analysis.documentation_issues.len()
        ));
    }

    lines.join("\n")
}
