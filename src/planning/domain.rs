use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Marital status drives which resource and income limits apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaritalStatus {
    Single,
    Married,
}

impl MaritalStatus {
    pub const fn label(&self) -> &'static str {
        match self {
            MaritalStatus::Single => "single",
            MaritalStatus::Married => "married",
        }
    }
}

impl fmt::Display for MaritalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MaritalStatus {
    type Err = UnknownMaritalStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "single" => Ok(MaritalStatus::Single),
            "married" => Ok(MaritalStatus::Married),
            _ => Err(UnknownMaritalStatus(value.to_string())),
        }
    }
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("unrecognized marital status '{0}'")]
pub struct UnknownMaritalStatus(pub String);

/// The person whose eligibility is being planned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientInfo {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u8>,
    pub marital_status: MaritalStatus,
    #[serde(default)]
    pub household: HouseholdContext,
}

/// Household facts consulted when shaping strategies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HouseholdContext {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub family_members: Vec<FamilyMember>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medical: Option<MedicalStatus>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamilyMember {
    pub name: String,
    pub relationship: String,
    #[serde(default)]
    pub provides_care: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicalStatus {
    pub diagnosis: String,
    pub severity: DiagnosisSeverity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosisSeverity {
    Stable,
    Severe,
    Terminal,
}

/// One historical asset transfer as reported by intake.
///
/// The date stays a raw string here: intake data is messy and an
/// unparseable date must surface as a documentation issue during lookback
/// analysis rather than reject the whole request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferRecord {
    pub date: String,
    pub amount: f64,
    pub recipient: String,
    pub purpose: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<TransferDetails>,
}

/// Caregiver and relationship context attached to a transfer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransferDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub years_of_care: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours_per_week: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationship: Option<String>,
}

impl TransferDetails {
    /// A compensated-caregiver claim needs both a duration and an intensity.
    pub fn documents_caregiving(&self) -> bool {
        self.years_of_care.is_some() && self.hours_per_week.is_some()
    }
}

/// Full intake payload for divestment planning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanningRequest {
    pub client: ClientInfo,
    #[serde(default)]
    pub assets: BTreeMap<String, f64>,
    #[serde(default)]
    pub income: BTreeMap<String, f64>,
    #[serde(default)]
    pub transfers: Vec<TransferRecord>,
    pub jurisdiction: String,
}

/// Slimmer payload for a standalone eligibility check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityRequest {
    pub client: ClientInfo,
    #[serde(default)]
    pub assets: BTreeMap<String, f64>,
    #[serde(default)]
    pub income: BTreeMap<String, f64>,
    pub jurisdiction: String,
}
