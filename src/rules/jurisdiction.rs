use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Canonical jurisdiction key (two-letter postal code, e.g. `IA`).
///
/// All rule lookups and cached entries are keyed by this type. Free-form
/// state input (full names, mixed case, stray whitespace) is resolved once
/// through [`Jurisdiction::parse`] at the provider boundary; nothing inside
/// the engine re-interprets jurisdiction strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Jurisdiction(String);

/// Raised when input cannot be resolved to a supported jurisdiction.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unrecognized jurisdiction '{0}'")]
pub struct UnknownJurisdiction(pub String);

impl Jurisdiction {
    /// Resolve free-form input ("Iowa", "ia", " New  York ") to a canonical key.
    pub fn parse(raw: &str) -> Result<Self, UnknownJurisdiction> {
        let normalized = normalize(raw);

        if normalized.len() == 2 {
            let code = normalized.to_ascii_uppercase();
            if STATE_TABLE.iter().any(|(_, c)| *c == code) {
                return Ok(Self(code));
            }
        }

        STATE_TABLE
            .iter()
            .find(|(name, _)| *name == normalized)
            .map(|(_, code)| Self((*code).to_string()))
            .ok_or_else(|| UnknownJurisdiction(raw.trim().to_string()))
    }

    pub fn code(&self) -> &str {
        &self.0
    }

    /// Construct from a code already known to be canonical (bundled catalog
    /// data). External input goes through [`Jurisdiction::parse`].
    pub(crate) fn from_canonical(code: &str) -> Self {
        Self(code.to_string())
    }

    /// Full state name for summaries and audit text.
    pub fn display_name(&self) -> &'static str {
        STATE_TABLE
            .iter()
            .find(|(_, code)| *code == self.0)
            .map(|(name, _)| *name)
            .unwrap_or("unknown")
    }
}

impl fmt::Display for Jurisdiction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Jurisdiction {
    type Err = UnknownJurisdiction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<'de> Deserialize<'de> for Jurisdiction {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Jurisdiction::parse(&raw).map_err(serde::de::Error::custom)
    }
}

pub(crate) fn normalize(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.to_ascii_lowercase()
}

/// Normalized full name, canonical postal code. Consulted only here.
const STATE_TABLE: &[(&str, &str)] = &[
    ("alabama", "AL"),
    ("alaska", "AK"),
    ("arizona", "AZ"),
    ("arkansas", "AR"),
    ("california", "CA"),
    ("colorado", "CO"),
    ("connecticut", "CT"),
    ("delaware", "DE"),
    ("district of columbia", "DC"),
    ("florida", "FL"),
    ("georgia", "GA"),
    ("hawaii", "HI"),
    ("idaho", "ID"),
    ("illinois", "IL"),
    ("indiana", "IN"),
    ("iowa", "IA"),
    ("kansas", "KS"),
    ("kentucky", "KY"),
    ("louisiana", "LA"),
    ("maine", "ME"),
    ("maryland", "MD"),
    ("massachusetts", "MA"),
    ("michigan", "MI"),
    ("minnesota", "MN"),
    ("mississippi", "MS"),
    ("missouri", "MO"),
    ("montana", "MT"),
    ("nebraska", "NE"),
    ("nevada", "NV"),
    ("new hampshire", "NH"),
    ("new jersey", "NJ"),
    ("new mexico", "NM"),
    ("new york", "NY"),
    ("north carolina", "NC"),
    ("north dakota", "ND"),
    ("ohio", "OH"),
    ("oklahoma", "OK"),
    ("oregon", "OR"),
    ("pennsylvania", "PA"),
    ("rhode island", "RI"),
    ("south carolina", "SC"),
    ("south dakota", "SD"),
    ("tennessee", "TN"),
    ("texas", "TX"),
    ("utah", "UT"),
    ("vermont", "VT"),
    ("virginia", "VA"),
    ("washington", "WA"),
    ("west virginia", "WV"),
    ("wisconsin", "WI"),
    ("wyoming", "WY"),
];
