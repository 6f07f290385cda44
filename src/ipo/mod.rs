mod decode;
pub mod input;
pub mod price_band;
pub mod types;

pub use input::{parse_records, read_records};
pub use price_band::PriceBand;
pub use types::{Categories, Company, FinancialYear, Gmp, IpoRecord, Pricing, Subscription};
