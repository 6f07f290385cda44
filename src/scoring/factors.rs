use anyhow::{bail, Result};

/// Comparison a ladder rung applies to a factor's input value.
#[derive(Debug, Clone, PartialEq)]
pub enum RangeOp {
    LessThan(f64),
    LessEqual(f64),
    GreaterThan(f64),
    GreaterEqual(f64),
    Equal(f64),
    Between(f64, f64), // Inclusive range: N-M
}

impl RangeOp {
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Some(val) = s.strip_prefix(">=") {
            Ok(RangeOp::GreaterEqual(parse_bound(val)?))
        } else if let Some(val) = s.strip_prefix("<=") {
            Ok(RangeOp::LessEqual(parse_bound(val)?))
        } else if let Some(val) = s.strip_prefix('>') {
            Ok(RangeOp::GreaterThan(parse_bound(val)?))
        } else if let Some(val) = s.strip_prefix('<') {
            Ok(RangeOp::LessThan(parse_bound(val)?))
        } else if s.contains('-') && !s.starts_with('-') {
            // Range format: "10-20"
            let parts: Vec<&str> = s.split('-').collect();
            if parts.len() == 2 {
                let low = parse_bound(parts[0])?;
                let high = parse_bound(parts[1])?;
                if low > high {
                    bail!("Range lower bound exceeds upper bound: {}", s)
                }
                Ok(RangeOp::Between(low, high))
            } else {
                bail!("Invalid range format: {}", s)
            }
        } else {
            Ok(RangeOp::Equal(parse_bound(s)?))
        }
    }

    /// NaN never matches: every comparison against it is false.
    pub fn matches(&self, value: f64) -> bool {
        match self {
            RangeOp::LessThan(n) => value < *n,
            RangeOp::LessEqual(n) => value <= *n,
            RangeOp::GreaterThan(n) => value > *n,
            RangeOp::GreaterEqual(n) => value >= *n,
            RangeOp::Equal(n) => value == *n,
            RangeOp::Between(low, high) => value >= *low && value <= *high,
        }
    }
}

fn parse_bound(s: &str) -> Result<f64> {
    let n: f64 = s.trim().parse()?;
    if !n.is_finite() {
        bail!("Range bound must be finite: {}", s.trim())
    }
    Ok(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_range_less_than() {
        let range = RangeOp::parse("<0").unwrap();
        assert!(range.matches(-0.1));
        assert!(!range.matches(0.0));
        assert!(!range.matches(5.0));
    }

    #[test]
    fn test_parse_range_less_equal() {
        let range = RangeOp::parse("<=100").unwrap();
        assert!(range.matches(50.0));
        assert!(range.matches(100.0));
        assert!(!range.matches(100.5));
    }

    #[test]
    fn test_parse_range_greater_than() {
        let range = RangeOp::parse(">0").unwrap();
        assert!(!range.matches(0.0));
        assert!(range.matches(0.01));
    }

    #[test]
    fn test_parse_range_greater_equal() {
        let range = RangeOp::parse(">=50").unwrap();
        assert!(!range.matches(49.99));
        assert!(range.matches(50.0));
        assert!(range.matches(150.0));
    }

    #[test]
    fn test_parse_range_negative_bound() {
        let range = RangeOp::parse(">=-5").unwrap();
        assert!(range.matches(-5.0));
        assert!(!range.matches(-5.5));
    }

    #[test]
    fn test_parse_range_equal() {
        let range = RangeOp::parse("0").unwrap();
        assert!(range.matches(0.0));
        assert!(!range.matches(1.0));
    }

    #[test]
    fn test_parse_range_between() {
        let range = RangeOp::parse("10-20.5").unwrap();
        assert!(!range.matches(9.9));
        assert!(range.matches(10.0));
        assert!(range.matches(20.5));
        assert!(!range.matches(21.0));
    }

    #[test]
    fn test_parse_range_rejects_garbage() {
        assert!(RangeOp::parse("abc").is_err());
        assert!(RangeOp::parse(">=").is_err());
        assert!(RangeOp::parse("1-2-3").is_err());
        assert!(RangeOp::parse("20-10").is_err());
        assert!(RangeOp::parse(">=inf").is_err());
    }

    #[test]
    fn test_nan_never_matches() {
        for s in ["<0", "<=0", ">0", ">=0", "0", "0-10"] {
            assert!(!RangeOp::parse(s).unwrap().matches(f64::NAN), "{} matched NaN", s);
        }
    }
}
