use serde::Deserialize;
use serde_json::Value;

use super::decode::{lenient, lenient_integer, lenient_number, lenient_object_seq, lenient_seq};
use super::price_band::PriceBand;

/// One IPO listing as delivered by the upstream data source.
///
/// Every field is optional. Values of the wrong type decode as absent
/// rather than failing the record, so a partially broken document still
/// scores on whatever it does carry.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IpoRecord {
    #[serde(default, deserialize_with = "lenient")]
    pub symbol: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub gmp: Option<Gmp>,

    #[serde(default, deserialize_with = "lenient")]
    pub pricing: Option<Pricing>,

    #[serde(default, deserialize_with = "lenient")]
    pub subscription: Option<Subscription>,

    #[serde(default, deserialize_with = "lenient_object_seq")]
    pub financials: Option<Vec<FinancialYear>>,

    #[serde(default, deserialize_with = "lenient")]
    pub company: Option<Company>,
}

/// Grey market premium quote.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Gmp {
    #[serde(default, deserialize_with = "lenient_number")]
    pub current: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Pricing {
    #[serde(default, deserialize_with = "lenient")]
    pub price_band: Option<String>,
}

impl Pricing {
    pub fn band(&self) -> Option<PriceBand> {
        self.price_band
            .as_deref()
            .and_then(|s| PriceBand::parse(s).ok())
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Subscription {
    #[serde(default, deserialize_with = "lenient")]
    pub categories: Option<Categories>,
}

/// Subscription multiples per investor category.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Categories {
    #[serde(default, deserialize_with = "lenient_number")]
    pub qib: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub nii: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub retail: Option<f64>,
}

impl Categories {
    /// Mean of the three multiples, absent categories counting as 0.
    pub fn average(&self) -> f64 {
        let total = self.qib.unwrap_or(0.0) + self.nii.unwrap_or(0.0) + self.retail.unwrap_or(0.0);
        total / 3.0
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct FinancialYear {
    #[serde(default, deserialize_with = "lenient_integer")]
    pub year: Option<i64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub revenue: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub profit: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Company {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,

    /// Disclosed risk items. Only the count is used.
    #[serde(default, deserialize_with = "lenient_seq")]
    pub risks: Option<Vec<Value>>,
}

impl IpoRecord {
    /// Name used in listings: company name, then symbol.
    pub fn display_name(&self) -> &str {
        self.company
            .as_ref()
            .and_then(|c| c.name.as_deref())
            .or(self.symbol.as_deref())
            .unwrap_or("(unnamed)")
    }

    pub fn risk_count(&self) -> usize {
        self.company
            .as_ref()
            .and_then(|c| c.risks.as_ref())
            .map_or(0, Vec::len)
    }

    /// The two most recent financial years, newest first.
    ///
    /// Entries are stably sorted by year descending, so entries sharing a
    /// year keep their input order and entries without a year sort last.
    pub fn latest_two_years(&self) -> Option<(&FinancialYear, &FinancialYear)> {
        let financials = self.financials.as_ref()?;
        if financials.len() < 2 {
            return None;
        }
        let mut sorted: Vec<&FinancialYear> = financials.iter().collect();
        sorted.sort_by(|a, b| b.year.cmp(&a.year));
        Some((sorted[0], sorted[1]))
    }
}
