use anyhow::{bail, Context, Result};

/// Bid range of an IPO, parsed from strings like `"₹100-120"`.
///
/// Grammar: `[glyph] digits "-" digits`, where `glyph` is a single currency
/// character (anything but an ASCII digit, whitespace or `-`). Surrounding
/// whitespace is ignored; nothing else is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceBand {
    pub lower: u64,
    pub upper: u64,
}

impl PriceBand {
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();

        let mut chars = s.chars();
        let body = match chars.next() {
            Some(c) if !c.is_ascii_digit() && !c.is_whitespace() && c != '-' => chars.as_str(),
            Some(_) => s,
            None => bail!("Empty price band"),
        };

        let Some((low, high)) = body.split_once('-') else {
            bail!("Price band must be 'LOW-HIGH': {}", s)
        };

        Ok(PriceBand {
            lower: parse_digits(low).with_context(|| format!("Invalid lower bound in '{}'", s))?,
            upper: parse_digits(high).with_context(|| format!("Invalid upper bound in '{}'", s))?,
        })
    }
}

// `str::parse::<u64>` accepts a leading '+', the grammar doesn't.
fn parse_digits(s: &str) -> Result<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        bail!("expected digits, got '{}'", s);
    }
    Ok(s.parse()?)
}
