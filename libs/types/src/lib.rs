//! # Mstk Types Library
//!
//! Pure data structures for the MetaStock-family decoder.
//!
//! ## Design Philosophy
//!
//! - **Data, not rules**: this crate holds the decoded shapes of the legacy
//!   catalog, extended catalog, overflow catalog, and per-symbol quote
//!   tables. All byte-layout knowledge, validation, and cross-table
//!   reconciliation live in the `codec` crate.
//! - **Immutable results**: every struct here is produced once by a decode
//!   pass and never mutated afterwards; downstream export and verification
//!   tools consume them as plain values.
//! - **No precision games**: prices stay as the IEEE `f32` values recovered
//!   from the vendor float codec; dates are plain `YYYYMMDD` integers.
//!
//! ## Architecture Role
//!
//! ```text
//! raw catalog/quote buffers → codec (layout rules) → types (decoded values)
//!            ↑                       ↓                        ↓
//!     caller-owned bytes       validation errors        export tooling
//! ```

pub mod catalog;
pub mod field_mask;
pub mod quote;
pub mod records;
pub mod time_frame;

pub use catalog::CatalogEntry;
pub use field_mask::FieldMask;
pub use quote::QuoteRecord;
pub use records::{ExtendedCatalogRecord, LegacyCatalogRecord, OverflowCatalogRecord};
pub use time_frame::{TimeFrame, UnsupportedTimeFrameByte};
