//! Field normalizers: cell-level coercions to canonical form.
//!
//! Every function here follows one contract: convert a single raw cell value
//! to its canonical form, or signal invalidity by returning `None`. Nothing
//! panics and nothing returns an error; what a caller does with an invalid
//! cell (drop the row, null the cell, keep the raw value) is the entity
//! cleaner's decision, not the normalizer's.
//!
//! Currently implemented:
//!
//! - [`date`]: multi-format date parsing normalized to `DD-MM-YYYY`
//! - [`numeric`]: digit extraction and currency-amount parsing
//! - [`weight`]: mixed-unit weight strings converted to kilograms
//! - [`uuid`]: canonical 8-4-4-4-12 UUID validation
//! - [`category`]: closed-set label-to-code mapping

pub mod category;
pub mod date;
pub mod numeric;
pub mod uuid;
pub mod weight;

pub use category::{CategoryMap, UnmappedPolicy, time_period};
pub use date::{is_expiry_mm_yy, normalize_date, parse_date};
pub use numeric::{currency_amount, digits_only};
pub use uuid::is_canonical_uuid;
pub use weight::to_kilograms;
