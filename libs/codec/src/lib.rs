//! # Mstk Catalog Codec
//!
//! ## Purpose
//!
//! Decoding rules for the MetaStock-family binary files: the three
//! symbol catalogs (`MASTER`, `EMASTER`, `XMASTER`) and the per-symbol
//! quote tables they reference. Every field in these formats is defined
//! purely by byte offset, width, and a set of "must equal this constant"
//! invariants reverse-engineered from sample files; this crate owns all
//! of that knowledge so downstream export and migration tools only ever
//! see typed records or structured errors.
//!
//! ## Architecture Role
//!
//! ```text
//! caller-owned buffers → codec (this crate) → types (decoded values)
//!        ↓                      ↓                      ↓
//!   file lookup/IO       layout + validation     export tooling
//!   (external)           cross-table checks      (external)
//! ```
//!
//! ## What This Crate Contains
//!
//! - **RecordView**: bounds-checked primitive reads (no raw offsets)
//! - **Vendor float codec**: Microsoft Basic 4-byte float → IEEE `f32`
//! - **Packed-date codec**: date floats → `YYYYMMDD` integers
//! - **RecordLayout engine**: declarative per-format constraint tables
//! - **Table reader**: shared header + fixed-width record geometry
//! - **Catalog decoders**: one module per on-disk catalog format
//! - **Catalog builder**: legacy/extended cross-validation plus overflow
//!   merge, producing the reconciled `CatalogEntry` list
//! - **Quote decoder**: per-symbol OHLCV bars at catalog-derived widths
//!
//! ## What This Crate Does NOT Contain
//!
//! - Directory scanning, file opening, or path handling (caller's job:
//!   the decoder borrows immutable byte buffers and nothing else)
//! - Console or report formatting
//! - Encoding back into the vendor formats
//!
//! ## Error Handling
//!
//! Violations are values, never aborts. The [`config::ValidationPolicy`]
//! chooses between failing on the first bad record and collecting every
//! violation keyed by record index; header-level damage is always fatal
//! for its table. Decoding is pure and synchronous over borrowed slices,
//! so per-symbol decodes can be fanned out freely by the caller.

pub mod buffers;
pub mod catalog;
pub mod config;
pub mod dates;
pub mod emaster;
pub mod error;
pub mod float;
pub mod layout;
pub mod master;
pub mod quotes;
pub mod table;
pub mod xmaster;

// Re-export key types for convenience
pub use buffers::RecordView;
pub use catalog::{build_from_buffers, CatalogBuild, RejectedEntry};
pub use config::{DecodeConfig, ValidationPolicy};
pub use dates::{decode_packed_date, PACKED_DATE_MAX, PACKED_DATE_MIN};
pub use error::{DecodeError, DecodeResult};
pub use float::legacy_f32;
pub use layout::{FieldConstraint, RecordLayout};
pub use table::TableDecode;
