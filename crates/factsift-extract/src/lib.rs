//! FactSift Extract: regex fallback for contact details.
//!
//! Pure functions over immutable text: no I/O, no shared state beyond the
//! compiled patterns. The phone pattern is deliberately loose and will
//! accept some digit runs that are not phone numbers.

pub mod patterns;

pub use patterns::{extract, extract_emails, extract_phones, FallbackMatches};
