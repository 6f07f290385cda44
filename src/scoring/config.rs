use serde::{Deserialize, Serialize};

/// Main scoring configuration.
///
/// Each factor is a ladder of rungs checked top to bottom; the first rung
/// whose range matches awards its points. Sections left out of the YAML
/// keep their default ladder.
///
/// Example YAML:
/// ```yaml
/// scoring:
///   gmp:
///     - { range: ">=50", points: 3 }
///     - { range: ">0", points: 0.5 }
///   risk:
///     per_risk: 0.25
///     max: 1.5
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ScoringConfig {
    /// Ladder over the grey market premium as a percentage of the upper
    /// price band.
    pub gmp: Vec<Rung>,

    /// Ladder over the average subscription multiple across QIB, NII and
    /// retail.
    pub subscription: Vec<Rung>,

    /// Ladder over year-on-year growth percentage. Applied once to revenue
    /// growth and once to profit growth; the two results are summed.
    pub growth: Vec<Rung>,

    /// Deduction for disclosed risks.
    pub risk: RiskConfig,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            gmp: rungs(&[
                (">=50", 3.0),
                (">=30", 2.5),
                (">=20", 2.0),
                (">=10", 1.5),
                (">=5", 1.0),
                (">0", 0.5),
            ]),
            subscription: rungs(&[
                (">=100", 3.0),
                (">=50", 2.5),
                (">=30", 2.0),
                (">=15", 1.5),
                (">=5", 1.0),
                (">=1", 0.5),
            ]),
            growth: rungs(&[
                (">=30", 1.5),
                (">=20", 1.0),
                (">=10", 0.5),
                ("<0", -0.5),
            ]),
            risk: RiskConfig::default(),
        }
    }
}

impl ScoringConfig {
    /// Highest points the gmp ladder can award.
    pub fn gmp_max(&self) -> f64 {
        max_points(&self.gmp)
    }

    pub fn subscription_max(&self) -> f64 {
        max_points(&self.subscription)
    }

    /// Revenue and profit growth each award at most the top growth rung.
    pub fn financials_max(&self) -> f64 {
        2.0 * max_points(&self.growth)
    }
}

/// A ladder rung: range expression and the points it awards.
/// Range format: "<N", "<=N", ">N", ">=N", "N", "N-M" (inclusive range)
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Rung {
    pub range: String,
    pub points: f64,
}

/// Risk deduction: `min(count * per_risk, max)`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RiskConfig {
    pub per_risk: f64,
    pub max: f64,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            per_risk: 0.2,
            max: 1.0,
        }
    }
}

fn rungs(table: &[(&str, f64)]) -> Vec<Rung> {
    table
        .iter()
        .map(|(range, points)| Rung {
            range: range.to_string(),
            points: *points,
        })
        .collect()
}

// A ladder that awards nothing positive still has a max of 0.
fn max_points(ladder: &[Rung]) -> f64 {
    ladder.iter().map(|r| r.points).fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scoring_config() {
        let config = ScoringConfig::default();

        assert_eq!(config.gmp.len(), 6);
        assert_eq!(config.subscription.len(), 6);
        assert_eq!(config.growth.len(), 4);
        assert_eq!(config.risk, RiskConfig { per_risk: 0.2, max: 1.0 });
    }

    #[test]
    fn test_default_maxima() {
        let config = ScoringConfig::default();
        assert_eq!(config.gmp_max(), 3.0);
        assert_eq!(config.subscription_max(), 3.0);
        assert_eq!(config.financials_max(), 3.0);
    }

    #[test]
    fn test_scoring_config_serde_roundtrip() {
        let config = ScoringConfig::default();
        let yaml = serde_saphyr::to_string(&config).unwrap();
        let parsed: ScoringConfig = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_scoring_config_keeps_defaults() {
        let yaml = r#"
gmp:
  - range: ">=40"
    points: 2
risk:
  per_risk: 0.5
"#;
        let config: ScoringConfig = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.gmp.len(), 1);
        assert_eq!(config.gmp[0].points, 2.0);
        assert_eq!(config.subscription, ScoringConfig::default().subscription);
        assert_eq!(config.risk.per_risk, 0.5);
        assert_eq!(config.risk.max, 1.0);
    }

    #[test]
    fn test_empty_scoring_config_parse() {
        let config: ScoringConfig = serde_saphyr::from_str("{}").unwrap();
        assert_eq!(config, ScoringConfig::default());
    }

    #[test]
    fn test_unknown_key_rejected() {
        let yaml = r#"
base_score: 100
"#;
        assert!(serde_saphyr::from_str::<ScoringConfig>(yaml).is_err());
    }

    #[test]
    fn test_all_negative_ladder_max_is_zero() {
        let ladder = rungs(&[("<0", -0.5)]);
        assert_eq!(max_points(&ladder), 0.0);
    }
}
