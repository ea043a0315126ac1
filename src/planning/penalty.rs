use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::planning::lookback::TransferAnalysis;
use crate::rules::RuleSet;

/// Transfer penalty expressed both ways caseworkers quote it: fractional
/// months and whole days. Days use the statutory 30-day month, floored, so
/// 3.03 months comes out as 90 days rather than 91.
#[derive(Debug, Clone, Serialize)]
pub struct PenaltyResult {
    pub penalty_months: f64,
    pub penalty_days: i64,
    pub has_penalty: bool,
    /// Always computed; equals the assessment date when there is no penalty.
    pub penalty_end_date: NaiveDate,
    /// First-order financial exposure, the non-exempt total itself. Facility
    /// day rates vary too much to price the penalty window more precisely.
    pub estimated_cost: f64,
}

/// Convert non-exempt transfer dollars into an ineligibility period.
///
/// The divisor is validated at the provider boundary, so division here is
/// safe.
pub fn calculate_penalty(
    analysis: &TransferAnalysis,
    rules: &RuleSet,
    today: NaiveDate,
) -> PenaltyResult {
    let penalty_months = if analysis.non_exempt_total > 0.0 {
        analysis.non_exempt_total / rules.penalty_divisor
    } else {
        0.0
    };
    let penalty_days = (penalty_months * 30.0).floor() as i64;
    let penalty_end_date = today
        .checked_add_signed(Duration::days(penalty_days))
        .unwrap_or(NaiveDate::MAX);

    PenaltyResult {
        penalty_months,
        penalty_days,
        has_penalty: penalty_months > 0.0,
        penalty_end_date,
        estimated_cost: analysis.non_exempt_total,
    }
}
