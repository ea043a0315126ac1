use std::collections::BTreeSet;

use serde::Serialize;

use crate::planning::domain::{
    DiagnosisSeverity, FamilyMember, HouseholdContext, MedicalStatus, TransferRecord,
};
use crate::planning::eligibility::EligibilityVerdict;
use crate::planning::lookback::TransferAnalysis;
use crate::planning::penalty::PenaltyResult;

/// Penalty length above which returning assets beats waiting it out.
const ASSET_RETURN_THRESHOLD_MONTHS: f64 = 6.0;

/// One mitigation candidate for a planner to review. Strategies are built
/// fresh per request and never mutated afterwards; every strategy carries
/// both pros and cons so no recommendation reads as one-sided.
#[derive(Debug, Clone, Serialize)]
pub struct Strategy {
    pub id: &'static str,
    pub category: StrategyCategory,
    pub description: String,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    pub effectiveness: Effectiveness,
    pub priority: StrategyPriority,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub specific_actions: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyCategory {
    AssetReturn,
    PenaltyPlanning,
    Documentation,
    CaregiverExemption,
    HardshipWaiver,
    NoPenalty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Effectiveness {
    Low,
    Moderate,
    High,
}

/// Ordinal priority; variants are declared lowest first so the derived
/// ordering sorts Critical above High.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyPriority {
    Low,
    Medium,
    High,
    Critical,
}

/// Turn the computed analysis into a ranked list of mitigation strategies.
///
/// A clean history short-circuits to a single no-action strategy. Otherwise
/// each rule fires independently, duplicates collapse by id, and the result
/// sorts by descending priority (stable, so rule order breaks ties).
pub fn develop_strategies(
    analysis: &TransferAnalysis,
    penalty: &PenaltyResult,
    eligibility: &EligibilityVerdict,
    household: &HouseholdContext,
) -> Vec<Strategy> {
    if !penalty.has_penalty {
        return vec![no_penalty_strategy(eligibility)];
    }

    let mut strategies = Vec::new();

    if penalty.penalty_months > ASSET_RETURN_THRESHOLD_MONTHS {
        strategies.push(asset_return_strategy(analysis, penalty, eligibility));
    } else {
        strategies.push(penalty_planning_strategy(penalty));
    }

    if analysis.has_documentation_issues() {
        strategies.push(documentation_strategy(analysis));
    }

    if let Some(transfer) = analysis
        .transfers_in_window
        .iter()
        .find(|transfer| indicates_family_care(transfer))
    {
        strategies.push(caregiver_reclassification_strategy(transfer));
    }

    if let Some(caregiver) = household
        .family_members
        .iter()
        .find(|member| member.provides_care)
    {
        strategies.push(family_caregiver_strategy(caregiver));
    }

    if let Some(medical) = household.medical.as_ref() {
        if matches!(
            medical.severity,
            DiagnosisSeverity::Severe | DiagnosisSeverity::Terminal
        ) {
            strategies.push(hardship_strategy(medical));
        }
    }

    dedupe_by_id(&mut strategies);
    strategies.sort_by(|a, b| b.priority.cmp(&a.priority));
    strategies
}

/// Transfer details point at family care when a relationship is named and
/// at least one care measure (duration or weekly hours) is present. Both
/// measures together already exempt the transfer; one alone is a lead worth
/// chasing.
fn indicates_family_care(transfer: &TransferRecord) -> bool {
    transfer.details.as_ref().is_some_and(|details| {
        let named_relationship = details
            .relationship
            .as_deref()
            .is_some_and(|relationship| !relationship.trim().is_empty());
        named_relationship
            && (details.years_of_care.is_some() || details.hours_per_week.is_some())
    })
}

fn no_penalty_strategy(eligibility: &EligibilityVerdict) -> Strategy {
    let mut cons = vec![
        "Any new uncompensated transfer before applying restarts lookback exposure".to_string(),
    ];
    if !eligibility.is_eligible() {
        cons.push(format!(
            "Resource or income limits are still exceeded (${:.2} resources, ${:.2} income over)",
            eligibility.excess_resources, eligibility.excess_income
        ));
    }

    Strategy {
        id: "no-mitigation-needed",
        category: StrategyCategory::NoPenalty,
        description: "No transfer penalty applies; the history needs no mitigation".to_string(),
        pros: vec![
            "No penalty period delays coverage".to_string(),
            "No corrective action on past transfers is required".to_string(),
        ],
        cons,
        effectiveness: Effectiveness::High,
        priority: StrategyPriority::Low,
        specific_actions: Vec::new(),
    }
}

fn asset_return_strategy(
    analysis: &TransferAnalysis,
    penalty: &PenaltyResult,
    eligibility: &EligibilityVerdict,
) -> Strategy {
    let mut cons = vec![
        "Recipients may have spent or encumbered the funds".to_string(),
        "Returned funds raise countable resources and may need a spend-down plan".to_string(),
    ];
    if eligibility.excess_resources > 0.0 {
        cons.push(format!(
            "Countable resources already exceed the limit by ${:.2}",
            eligibility.excess_resources
        ));
    }

    Strategy {
        id: "return-transferred-assets",
        category: StrategyCategory::AssetReturn,
        description: format!(
            "Return ${:.2} in non-exempt transfers to shrink or eliminate the {:.1}-month penalty",
            analysis.non_exempt_total, penalty.penalty_months
        ),
        pros: vec![
            "Each returned dollar shortens the penalty proportionally".to_string(),
            "A full return can eliminate the penalty outright".to_string(),
        ],
        cons,
        effectiveness: Effectiveness::High,
        priority: StrategyPriority::High,
        specific_actions: vec![
            "Contact each recipient about a partial or full return".to_string(),
            "Paper every returned dollar with bank records".to_string(),
            "Re-run the penalty analysis once funds land".to_string(),
        ],
    }
}

fn penalty_planning_strategy(penalty: &PenaltyResult) -> Strategy {
    Strategy {
        id: "bridge-penalty-period",
        category: StrategyCategory::PenaltyPlanning,
        description: format!(
            "Plan private-pay coverage through the penalty period ending {}",
            penalty.penalty_end_date
        ),
        pros: vec![
            "Keeps the application timeline predictable".to_string(),
            "Avoids unwinding transfers the family has already relied on".to_string(),
        ],
        cons: vec![
            format!(
                "Care must be privately funded for roughly {} days",
                penalty.penalty_days
            ),
            "Costs escalate if care needs increase during the wait".to_string(),
        ],
        effectiveness: Effectiveness::Moderate,
        priority: StrategyPriority::High,
        specific_actions: vec![
            format!(
                "Reserve funds to cover care through {}",
                penalty.penalty_end_date
            ),
            "File the application once the penalty period lapses".to_string(),
        ],
    }
}

fn documentation_strategy(analysis: &TransferAnalysis) -> Strategy {
    Strategy {
        id: "repair-documentation",
        category: StrategyCategory::Documentation,
        description: format!(
            "Resolve {} flagged documentation issue(s) in the transfer history",
            analysis.documentation_issues.len()
        ),
        pros: vec![
            "Documented transfers withstand caseworker scrutiny".to_string(),
            "Better records may reveal exemptions that shrink the penalty base".to_string(),
        ],
        cons: vec![
            "Gathering old bank records takes time".to_string(),
            "Some supporting records may be unrecoverable".to_string(),
        ],
        effectiveness: Effectiveness::Moderate,
        priority: StrategyPriority::Medium,
        specific_actions: vec![
            "Collect bank statements for every flagged transfer".to_string(),
            "Correct unparseable transfer dates from source records".to_string(),
        ],
    }
}

fn caregiver_reclassification_strategy(transfer: &TransferRecord) -> Strategy {
    Strategy {
        id: "reclassify-caregiver-compensation",
        category: StrategyCategory::CaregiverExemption,
        description: format!(
            "Reclassify the ${:.2} transfer to {} as caregiver compensation",
            transfer.amount, transfer.recipient
        ),
        pros: vec![
            "An approved exemption removes the transfer from the penalty base entirely"
                .to_string(),
        ],
        cons: vec![
            "The state requires contemporaneous proof of care hours and duration".to_string(),
            "Reclassification invites closer review of the whole transfer history".to_string(),
        ],
        effectiveness: Effectiveness::High,
        priority: StrategyPriority::High,
        specific_actions: vec![
            "Assemble care logs covering duration and weekly hours".to_string(),
            "Obtain a physician statement of the care needs".to_string(),
            "Have counsel review a retroactive personal care agreement".to_string(),
        ],
    }
}

fn family_caregiver_strategy(caregiver: &FamilyMember) -> Strategy {
    Strategy {
        id: "formalize-family-caregiver-agreement",
        category: StrategyCategory::CaregiverExemption,
        description: format!(
            "Formalize a paid caregiver agreement with {} ({})",
            caregiver.name, caregiver.relationship
        ),
        pros: vec![
            format!(
                "Future payments to {} become compensation rather than gifts",
                caregiver.name
            ),
            "Establishes an hourly-rate record the state recognizes".to_string(),
        ],
        cons: vec![
            "Only prospective payments qualify; past transfers are unaffected".to_string(),
            "Compensation is taxable income to the caregiver".to_string(),
        ],
        effectiveness: Effectiveness::Moderate,
        priority: StrategyPriority::Medium,
        specific_actions: vec![
            "Execute a written care agreement before the next payment".to_string(),
            "Log hours and duties as care is provided".to_string(),
        ],
    }
}

fn hardship_strategy(medical: &MedicalStatus) -> Strategy {
    let priority = match medical.severity {
        DiagnosisSeverity::Terminal => StrategyPriority::Critical,
        _ => StrategyPriority::High,
    };

    Strategy {
        id: "pursue-hardship-waiver",
        category: StrategyCategory::HardshipWaiver,
        description: format!(
            "Pursue an undue-hardship waiver given the {} diagnosis",
            medical.diagnosis
        ),
        pros: vec![
            "A granted waiver suspends the penalty while care is urgent".to_string(),
            "Filing preserves appeal rights either way".to_string(),
        ],
        cons: vec![
            "Hardship waivers are granted sparingly and need strong evidence".to_string(),
            "Processing can outlast the care decision it is meant to protect".to_string(),
        ],
        effectiveness: Effectiveness::Moderate,
        priority,
        specific_actions: vec![
            "File the waiver alongside the penalty notice response".to_string(),
            "Attach medical records establishing severity".to_string(),
        ],
    }
}

fn dedupe_by_id(strategies: &mut Vec<Strategy>) {
    let mut seen = BTreeSet::new();
    strategies.retain(|strategy| seen.insert(strategy.id));
}
