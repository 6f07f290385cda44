use serde::Serialize;

use super::config::{Rung, ScoringConfig};
use super::factors::RangeOp;
use crate::ipo::IpoRecord;

/// Highest score an IPO can reach.
pub const MAX_SCORE: f64 = 10.0;

/// The four sub-scores, each computed independently.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Factors {
    pub gmp: f64,
    pub subscription: f64,
    pub financials: f64,
    /// Deduction, subtracted from the sum of the other three.
    pub risk: f64,
}

/// Display strings for each factor, e.g. `"2.5/3"` and `"-0.4"`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Breakdown {
    pub gmp: String,
    pub subscription: String,
    pub financials: String,
    pub risk: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreResult {
    pub score: f64,
    pub factors: Factors,
    pub breakdown: Breakdown,
}

/// Score an IPO with the default ladders.
pub fn compute(ipo: &IpoRecord) -> ScoreResult {
    compute_with(ipo, &ScoringConfig::default())
}

/// Score an IPO. Never fails: a factor whose inputs are missing or
/// malformed contributes 0 and the rest of the score is unaffected.
pub fn compute_with(ipo: &IpoRecord, config: &ScoringConfig) -> ScoreResult {
    let factors = Factors {
        gmp: gmp_factor(ipo, config),
        subscription: subscription_factor(ipo, config),
        financials: financials_factor(ipo, config),
        risk: risk_factor(ipo, config),
    };

    let raw = factors.gmp + factors.subscription + factors.financials - factors.risk;
    let score = round_tenth(finite_or_zero(raw).clamp(0.0, MAX_SCORE));

    let breakdown = Breakdown {
        gmp: format!("{}/{}", format_points(factors.gmp), format_points(config.gmp_max())),
        subscription: format!(
            "{}/{}",
            format_points(factors.subscription),
            format_points(config.subscription_max())
        ),
        financials: format!(
            "{}/{}",
            format_points(factors.financials),
            format_points(config.financials_max())
        ),
        risk: format_deduction(factors.risk),
    };

    ScoreResult {
        score,
        factors,
        breakdown,
    }
}

/// Grey market premium as a percentage of the upper price band.
///
/// `None` when the premium or a parseable band is missing, or when the
/// division is undefined (zero upper price).
pub fn gmp_percent(ipo: &IpoRecord) -> Option<f64> {
    let current = ipo.gmp.as_ref()?.current?;
    let band = ipo.pricing.as_ref()?.band()?;
    let percent = current / band.upper as f64 * 100.0;
    percent.is_finite().then_some(percent)
}

/// Average subscription multiple, `None` without a categories object.
pub fn subscription_average(ipo: &IpoRecord) -> Option<f64> {
    let average = ipo.subscription.as_ref()?.categories.as_ref()?.average();
    average.is_finite().then_some(average)
}

/// Year-on-year revenue and profit growth, in percent, between the two
/// most recent financial years.
///
/// `None` unless there are at least two years and both carry revenue and
/// profit. Each growth is individually `None` when its previous value is
/// zero.
pub fn growth_rates(ipo: &IpoRecord) -> Option<(Option<f64>, Option<f64>)> {
    let (latest, previous) = ipo.latest_two_years()?;
    let revenue = (latest.revenue?, previous.revenue?);
    let profit = (latest.profit?, previous.profit?);
    Some((growth(revenue.0, revenue.1), growth(profit.0, profit.1)))
}

fn growth(latest: f64, previous: f64) -> Option<f64> {
    let pct = (latest - previous) / previous * 100.0;
    pct.is_finite().then_some(pct)
}

fn gmp_factor(ipo: &IpoRecord, config: &ScoringConfig) -> f64 {
    gmp_percent(ipo).map_or(0.0, |pct| ladder_points(pct, &config.gmp))
}

fn subscription_factor(ipo: &IpoRecord, config: &ScoringConfig) -> f64 {
    subscription_average(ipo).map_or(0.0, |avg| ladder_points(avg, &config.subscription))
}

fn financials_factor(ipo: &IpoRecord, config: &ScoringConfig) -> f64 {
    let Some((revenue_growth, profit_growth)) = growth_rates(ipo) else {
        return 0.0;
    };
    let points = |g: Option<f64>| g.map_or(0.0, |g| ladder_points(g, &config.growth));
    points(revenue_growth) + points(profit_growth)
}

fn risk_factor(ipo: &IpoRecord, config: &ScoringConfig) -> f64 {
    let deduction = (ipo.risk_count() as f64 * config.risk.per_risk).min(config.risk.max);
    finite_or_zero(deduction).max(0.0)
}

/// Points of the first rung whose range matches `value`, or 0.
/// Rungs with an unparseable range are skipped.
fn ladder_points(value: f64, ladder: &[Rung]) -> f64 {
    for rung in ladder {
        if let Ok(range) = RangeOp::parse(&rung.range) {
            if range.matches(value) {
                return finite_or_zero(rung.points);
            }
        }
    }
    0.0
}

fn finite_or_zero(n: f64) -> f64 {
    if n.is_finite() {
        n
    } else {
        0.0
    }
}

fn round_tenth(n: f64) -> f64 {
    (n * 10.0).round() / 10.0
}

/// Render points with at most two decimals and no trailing zeros.
pub fn format_points(points: f64) -> String {
    let formatted = format!("{:.2}", points);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

fn format_deduction(risk: f64) -> String {
    let points = format_points(risk);
    if points == "0" {
        points
    } else {
        format!("-{}", points)
    }
}
