use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Months, NaiveDate};
use serde::Serialize;

use crate::planning::domain::TransferRecord;
use crate::rules::{normalize, RuleSet};

/// Outcome of sweeping a client's transfer history against the lookback
/// window.
///
/// Every valid-dated transfer lands in exactly one of `transfers_in_window`
/// or `transfers_out_of_window`; unparseable dates appear only in
/// `documentation_issues`. Exempt transfers are a subset of the in-window
/// list and never contribute to `non_exempt_total`.
#[derive(Debug, Clone, Serialize)]
pub struct TransferAnalysis {
    pub lookback_start: NaiveDate,
    pub transfers_in_window: Vec<TransferRecord>,
    pub transfers_out_of_window: Vec<TransferRecord>,
    pub exempt_transfers: Vec<TransferRecord>,
    pub gift_exclusions_applied: Vec<GiftExclusion>,
    /// Penalty-bearing dollars after exemptions and gift exclusions.
    pub non_exempt_total: f64,
    pub documentation_issues: Vec<DocumentationIssue>,
    pub documentation_risk: DocumentationRisk,
}

impl TransferAnalysis {
    pub fn exempt_total(&self) -> f64 {
        self.exempt_transfers.iter().map(|t| t.amount).sum()
    }

    pub fn out_of_window_total(&self) -> f64 {
        self.transfers_out_of_window.iter().map(|t| t.amount).sum()
    }

    pub fn excluded_gift_total(&self) -> f64 {
        self.gift_exclusions_applied.iter().map(|g| g.excluded).sum()
    }

    pub fn has_documentation_issues(&self) -> bool {
        !self.documentation_issues.is_empty()
    }
}

/// How the annual gift exclusion was applied to one recipient in one
/// calendar year. Amounts aggregate before the exclusion is subtracted, so
/// splitting a large gift into smaller same-year checks does not shrink the
/// penalty base.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GiftExclusion {
    pub recipient: String,
    pub year: i32,
    pub total: f64,
    pub excluded: f64,
    pub excess: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentationIssue {
    pub kind: DocumentationIssueKind,
    pub recipient: String,
    pub amount: f64,
    pub raw_date: String,
    pub detail: String,
}

impl DocumentationIssue {
    fn invalid_date(transfer: &TransferRecord) -> Self {
        Self {
            kind: DocumentationIssueKind::InvalidDate,
            recipient: transfer.recipient.clone(),
            amount: transfer.amount,
            raw_date: transfer.date.clone(),
            detail: format!("transfer date '{}' could not be parsed", transfer.date),
        }
    }

    fn missing_documentation(transfer: &TransferRecord) -> Self {
        Self {
            kind: DocumentationIssueKind::MissingDocumentation,
            recipient: transfer.recipient.clone(),
            amount: transfer.amount,
            raw_date: transfer.date.clone(),
            detail: format!(
                "transfer of ${:.2} to {} has no supporting documentation",
                transfer.amount, transfer.recipient
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentationIssueKind {
    InvalidDate,
    MissingDocumentation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentationRisk {
    Low,
    High,
}

struct GiftGroup {
    recipient: String,
    total: f64,
}

/// Sweep the transfer history against the rule set's lookback window.
///
/// Unparseable dates and missing documentation are recorded as issues and
/// the sweep continues; the annual gift exclusion only softens transfers
/// whose purpose mentions a gift, while other non-exempt transfers count in
/// full.
pub fn analyze_transfers(
    transfers: &[TransferRecord],
    rules: &RuleSet,
    today: NaiveDate,
) -> TransferAnalysis {
    let lookback_start = today
        .checked_sub_months(Months::new(rules.lookback_months))
        .unwrap_or(NaiveDate::MIN);

    let mut analysis = TransferAnalysis {
        lookback_start,
        transfers_in_window: Vec::new(),
        transfers_out_of_window: Vec::new(),
        exempt_transfers: Vec::new(),
        gift_exclusions_applied: Vec::new(),
        non_exempt_total: 0.0,
        documentation_issues: Vec::new(),
        documentation_risk: DocumentationRisk::Low,
    };
    let mut gift_groups: BTreeMap<(String, i32), GiftGroup> = BTreeMap::new();

    for transfer in transfers {
        let parsed = parse_transfer_date(&transfer.date);
        if parsed.is_none() {
            analysis
                .documentation_issues
                .push(DocumentationIssue::invalid_date(transfer));
        }
        if lacks_documentation(transfer) {
            analysis
                .documentation_issues
                .push(DocumentationIssue::missing_documentation(transfer));
        }
        let Some(date) = parsed else {
            continue;
        };

        if date < lookback_start {
            analysis.transfers_out_of_window.push(transfer.clone());
            continue;
        }
        analysis.transfers_in_window.push(transfer.clone());

        if is_exempt(transfer, rules) {
            analysis.exempt_transfers.push(transfer.clone());
            continue;
        }

        if normalize(&transfer.purpose).contains("gift") {
            let group = gift_groups
                .entry((normalize(&transfer.recipient), date.year()))
                .or_insert_with(|| GiftGroup {
                    recipient: transfer.recipient.clone(),
                    total: 0.0,
                });
            group.total += transfer.amount;
        } else {
            analysis.non_exempt_total += transfer.amount;
        }
    }

    for ((_, year), group) in gift_groups {
        let excluded = group.total.min(rules.annual_gift_exclusion);
        let excess = (group.total - excluded).max(0.0);
        analysis.non_exempt_total += excess;
        analysis.gift_exclusions_applied.push(GiftExclusion {
            recipient: group.recipient,
            year,
            total: group.total,
            excluded,
            excess,
        });
    }

    if analysis.has_documentation_issues() {
        analysis.documentation_risk = DocumentationRisk::High;
    }

    analysis
}

/// A transfer escapes the penalty base when its purpose matches an exempt
/// category or its details document a caregiver arrangement outright.
fn is_exempt(transfer: &TransferRecord, rules: &RuleSet) -> bool {
    if rules.exempts_purpose(&transfer.purpose) {
        return true;
    }
    transfer
        .details
        .as_ref()
        .is_some_and(|details| details.documents_caregiving())
}

fn lacks_documentation(transfer: &TransferRecord) -> bool {
    transfer
        .documentation
        .as_deref()
        .map_or(true, |doc| doc.trim().is_empty())
}

/// Intake systems hand us dates in a handful of shapes. Anything else is a
/// data quality issue, not an error.
fn parse_transfer_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%m/%d/%Y") {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|timestamp| timestamp.date_naive())
}
