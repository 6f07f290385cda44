use super::config::{Rung, ScoringConfig};
use super::engine::{gmp_percent, growth_rates, subscription_average};
use super::factors::RangeOp;
use crate::ipo::{IpoRecord, PriceBand};

/// Validate scoring configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_scoring(config: &ScoringConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    validate_ladder("scoring.gmp", &config.gmp, &mut errors);
    validate_ladder("scoring.subscription", &config.subscription, &mut errors);
    validate_ladder("scoring.growth", &config.growth, &mut errors);

    let risk = &config.risk;
    if !risk.per_risk.is_finite() || risk.per_risk < 0.0 {
        errors.push("scoring.risk.per_risk: must be a non-negative number".to_string());
    }
    if !risk.max.is_finite() || risk.max < 0.0 {
        errors.push("scoring.risk.max: must be a non-negative number".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_ladder(path: &str, ladder: &[Rung], errors: &mut Vec<String>) {
    if ladder.is_empty() {
        errors.push(format!("{}: ladder needs at least one rung", path));
    }
    for (i, rung) in ladder.iter().enumerate() {
        if let Err(e) = RangeOp::parse(&rung.range) {
            errors.push(format!(
                "{}[{}].range: invalid '{}' - {}",
                path, i, rung.range, e
            ));
        }
        if !rung.points.is_finite() {
            errors.push(format!("{}[{}].points: must be a finite number", path, i));
        }
    }
}

/// Explain which factors of a record fell back to 0 because their inputs
/// were missing or unusable. An empty list means every factor had data.
pub fn diagnose_record(ipo: &IpoRecord) -> Vec<String> {
    let mut notes = Vec::new();

    if gmp_percent(ipo).is_none() {
        let current = ipo.gmp.as_ref().and_then(|g| g.current);
        let band = ipo.pricing.as_ref().and_then(|p| p.price_band.as_deref());
        let note = match (current, band) {
            (None, _) => "gmp: no current premium".to_string(),
            (Some(_), None) => "gmp: no price band".to_string(),
            (Some(_), Some(band)) => match PriceBand::parse(band) {
                Err(e) => format!("gmp: {:#}", e),
                Ok(_) => "gmp: upper price is 0".to_string(),
            },
        };
        notes.push(note);
    }

    if subscription_average(ipo).is_none() {
        notes.push("subscription: no categories".to_string());
    }

    let years = ipo.financials.as_ref().map_or(0, Vec::len);
    match growth_rates(ipo) {
        None if years < 2 => notes.push(format!(
            "financials: need at least 2 years, got {}",
            years
        )),
        None => notes.push(
            "financials: revenue or profit missing in the two latest years".to_string(),
        ),
        Some((revenue, profit)) => {
            if revenue.is_none() {
                notes.push("financials: previous revenue is 0, revenue growth ignored".to_string());
            }
            if profit.is_none() {
                notes.push("financials: previous profit is 0, profit growth ignored".to_string());
            }
        }
    }

    notes
}
