use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

use crate::planning::domain::{
    ClientInfo, DiagnosisSeverity, FamilyMember, HouseholdContext, MaritalStatus, MedicalStatus,
    PlanningRequest, TransferDetails, TransferRecord,
};
use crate::rules::{Jurisdiction, RuleSet, RulesError, RulesProvider, StaticRulesCatalog};

/// Fixed assessment date so window math stays stable across test runs.
pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 15).expect("valid date")
}

pub(super) fn rules() -> RuleSet {
    RuleSet {
        jurisdiction: Jurisdiction::parse("IA").expect("valid jurisdiction"),
        year: 2025,
        resource_limit_single: 2_000.0,
        resource_limit_married: 157_920.0,
        income_limit_single: 2_901.0,
        income_limit_married: 5_802.0,
        lookback_months: 60,
        annual_gift_exclusion: 18_000.0,
        penalty_divisor: 9_901.0,
        exempt_transfer_categories: BTreeSet::from([
            "caregiver compensation".to_string(),
            "transfer to spouse".to_string(),
        ]),
    }
}

pub(super) fn catalog() -> StaticRulesCatalog {
    let mut catalog = StaticRulesCatalog::empty();
    catalog.insert(rules()).expect("fixture rules validate");
    catalog
}

pub(super) fn transfer(date: &str, amount: f64, recipient: &str, purpose: &str) -> TransferRecord {
    TransferRecord {
        date: date.to_string(),
        amount,
        recipient: recipient.to_string(),
        purpose: purpose.to_string(),
        documentation: Some("bank statement".to_string()),
        details: None,
    }
}

pub(super) fn caregiver_details() -> TransferDetails {
    TransferDetails {
        years_of_care: Some(2.0),
        hours_per_week: Some(40.0),
        relationship: Some("daughter".to_string()),
    }
}

pub(super) fn client(marital_status: MaritalStatus) -> ClientInfo {
    ClientInfo {
        name: "Evelyn Marsh".to_string(),
        age: Some(82),
        marital_status,
        household: HouseholdContext::default(),
    }
}

pub(super) fn caregiving_household() -> HouseholdContext {
    HouseholdContext {
        family_members: vec![
            FamilyMember {
                name: "Ray Marsh".to_string(),
                relationship: "son".to_string(),
                provides_care: false,
            },
            FamilyMember {
                name: "Dana Marsh".to_string(),
                relationship: "daughter".to_string(),
                provides_care: true,
            },
        ],
        medical: None,
    }
}

pub(super) fn medical(severity: DiagnosisSeverity) -> MedicalStatus {
    MedicalStatus {
        diagnosis: "late-stage Parkinson's".to_string(),
        severity,
    }
}

pub(super) fn planning_request(transfers: Vec<TransferRecord>) -> PlanningRequest {
    PlanningRequest {
        client: client(MaritalStatus::Single),
        assets: BTreeMap::from([
            ("checking".to_string(), 1_500.0),
            ("primary_residence".to_string(), 180_000.0),
        ]),
        income: BTreeMap::from([("social security".to_string(), 1_200.0)]),
        transfers,
        jurisdiction: "Iowa".to_string(),
    }
}

/// Provider that always fails, for exercising the error envelope.
pub(super) struct UnavailableProvider;

impl RulesProvider for UnavailableProvider {
    fn rules_for(&self, _: &Jurisdiction, _: i32) -> Result<RuleSet, RulesError> {
        Err(RulesError::Unavailable("rules service offline".to_string()))
    }
}
