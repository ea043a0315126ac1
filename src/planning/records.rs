use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::planning::coordinator::DivestmentPlan;
use crate::planning::domain::ClientInfo;
use crate::planning::eligibility::EligibilityVerdict;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ClientId(pub String);

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct AssessmentId(pub String);

impl fmt::Display for AssessmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PlanId(pub String);

impl fmt::Display for PlanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ClientRecord {
    pub id: ClientId,
    pub client: ClientInfo,
    pub created_on: NaiveDate,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssessmentRecord {
    pub id: AssessmentId,
    pub client_id: ClientId,
    pub jurisdiction: String,
    pub verdict: EligibilityVerdict,
    pub assessed_on: NaiveDate,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlanRecord {
    pub id: PlanId,
    pub client_id: ClientId,
    pub plan: DivestmentPlan,
    pub planned_on: NaiveDate,
}

/// Persistence seam for the surrounding application. The engine only hands
/// structured records across this boundary; it never owns storage.
pub trait RecordStore: Send + Sync {
    fn create_client(&self, record: ClientRecord) -> Result<(), RecordStoreError>;
    fn find_client(&self, id: &ClientId) -> Result<Option<ClientRecord>, RecordStoreError>;
    fn create_assessment(&self, record: AssessmentRecord) -> Result<(), RecordStoreError>;
    fn find_assessments(&self, client: &ClientId)
        -> Result<Vec<AssessmentRecord>, RecordStoreError>;
    fn create_plan(&self, record: PlanRecord) -> Result<(), RecordStoreError>;
    fn find_plans(&self, client: &ClientId) -> Result<Vec<PlanRecord>, RecordStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RecordStoreError {
    #[error("record {0} already exists")]
    Conflict(String),
    #[error("record {0} not found")]
    NotFound(String),
    #[error("record store unavailable: {0}")]
    Unavailable(String),
}
