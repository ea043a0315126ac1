//! Divestment planning pipeline.
//!
//! Data flows one direction: rules feed the classifier, lookback analyzer,
//! and eligibility assessor; the penalty calculator consumes the analysis;
//! the strategy engine consumes everything; the coordinator stitches one
//! request end to end. No stage mutates another's inputs.

pub mod classifier;
pub mod coordinator;
pub mod domain;
pub mod eligibility;
pub mod lookback;
pub mod penalty;
pub mod records;
pub mod strategy;

#[cfg(test)]
mod tests;

pub use classifier::{classify_assets, total_income, AssetClassification, ClassifierConfig};
pub use coordinator::{DivestmentPlan, PlanningCoordinator, PlanningError, PlanningResult};
pub use domain::{
    ClientInfo, DiagnosisSeverity, EligibilityRequest, FamilyMember, HouseholdContext,
    MaritalStatus, MedicalStatus, PlanningRequest, TransferDetails, TransferRecord,
    UnknownMaritalStatus,
};
pub use eligibility::{assess_eligibility, EligibilityVerdict};
pub use lookback::{
    analyze_transfers, DocumentationIssue, DocumentationIssueKind, DocumentationRisk,
    GiftExclusion, TransferAnalysis,
};
pub use penalty::{calculate_penalty, PenaltyResult};
pub use records::{
    AssessmentId, AssessmentRecord, ClientId, ClientRecord, PlanId, PlanRecord, RecordStore,
    RecordStoreError,
};
pub use strategy::{
    develop_strategies, Effectiveness, Strategy, StrategyCategory, StrategyPriority,
};
