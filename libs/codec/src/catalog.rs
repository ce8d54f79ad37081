//! Catalog builder and cross-table validator.
//!
//! ## Purpose
//!
//! The legacy and extended catalogs describe the same symbols and must
//! agree entry by entry: identical record counts, and per index the same
//! data file number and the same derived data length. The overflow
//! catalog stands alone and only contributes entries for file numbers
//! above 255. This module reconciles the three tables into the flat
//! sequence of [`CatalogEntry`] values downstream tools iterate.
//!
//! ```text
//! MASTER ──┐
//!          ├─ cross-validate ─┐
//! EMASTER ─┘                  ├─ CatalogEntry list ─ per-symbol decode
//! XMASTER ── own invariants ──┘
//! ```
//!
//! Under the strict policy the first disagreement aborts the whole
//! build; under the permissive policy only the offending entry is marked
//! unusable and the rest of the catalog survives.

use tracing::debug;
use types::{CatalogEntry, ExtendedCatalogRecord, LegacyCatalogRecord, OverflowCatalogRecord};

use crate::config::{DecodeConfig, ValidationPolicy};
use crate::emaster;
use crate::error::{DecodeError, DecodeResult};
use crate::master;
use crate::table::TableDecode;
use crate::xmaster;

/// An entry that failed cross-validation or record decoding.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedEntry {
    /// Which table flagged the entry.
    pub table: &'static str,
    /// 1-based record index within that table; 0 stands for the header
    /// slot (count-level disagreement).
    pub index: usize,
    pub error: DecodeError,
}

/// Result of reconciling the catalogs.
#[derive(Debug, Clone)]
pub struct CatalogBuild {
    /// Usable entries, legacy/extended first, overflow appended.
    pub entries: Vec<CatalogEntry>,
    /// Entries dropped in permissive mode, with the reason each was
    /// dropped. Empty after a strict build.
    pub rejected: Vec<RejectedEntry>,
}

impl CatalogBuild {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Reconcile decoded catalog tables into the entry list.
pub fn build(
    legacy: &TableDecode<LegacyCatalogRecord>,
    extended: &TableDecode<ExtendedCatalogRecord>,
    overflow: Option<&TableDecode<OverflowCatalogRecord>>,
    config: &DecodeConfig,
) -> DecodeResult<CatalogBuild> {
    let mut entries = Vec::with_capacity(legacy.record_count);
    let mut rejected = Vec::new();

    if legacy.record_count != extended.record_count {
        let err = DecodeError::CrossTableInconsistency {
            index: 0,
            field: "record_count",
            legacy: legacy.record_count as u64,
            extended: extended.record_count as u64,
        };
        match config.policy {
            ValidationPolicy::Strict => return Err(err),
            ValidationPolicy::Permissive => rejected.push(RejectedEntry {
                table: emaster::TABLE,
                index: 0,
                error: err,
            }),
        }
    }

    // Record-level failures already collected during table decoding make
    // their entries unusable; surface them here so a caller sees the
    // whole picture in one place.
    for (index, error) in &legacy.violations {
        rejected.push(RejectedEntry {
            table: master::TABLE,
            index: *index,
            error: error.clone(),
        });
    }
    for (index, error) in &extended.violations {
        rejected.push(RejectedEntry {
            table: emaster::TABLE,
            index: *index,
            error: error.clone(),
        });
    }

    for (index, legacy_rec) in &legacy.records {
        match cross_check(*index, legacy_rec, extended) {
            Ok(partner) => entries.push(make_entry(legacy_rec, partner)),
            Err(err) => match config.policy {
                ValidationPolicy::Strict => return Err(err),
                ValidationPolicy::Permissive => rejected.push(RejectedEntry {
                    table: master::TABLE,
                    index: *index,
                    error: err,
                }),
            },
        }
    }

    if let Some(overflow) = overflow {
        for (index, error) in &overflow.violations {
            rejected.push(RejectedEntry {
                table: xmaster::TABLE,
                index: *index,
                error: error.clone(),
            });
        }
        for (_, rec) in &overflow.records {
            entries.push(CatalogEntry {
                file_number: u32::from(rec.file_number),
                record_width: rec.data_length(),
                ticker_symbol: rec.ticker_symbol.clone(),
                display_name: rec.display_name.clone(),
            });
        }
    }

    debug!(
        entries = entries.len(),
        rejected = rejected.len(),
        "catalog build complete"
    );
    Ok(CatalogBuild { entries, rejected })
}

/// Decode all three catalog buffers and reconcile them.
///
/// `overflow_buf` is `None` when the collection has no overflow catalog
/// file; that is the common case, not an error.
pub fn build_from_buffers(
    legacy_buf: &[u8],
    extended_buf: &[u8],
    overflow_buf: Option<&[u8]>,
    config: &DecodeConfig,
) -> DecodeResult<CatalogBuild> {
    let legacy = master::decode(legacy_buf, config)?;
    let extended = emaster::decode(extended_buf, config)?;
    let overflow = overflow_buf
        .map(|buf| xmaster::decode(buf, config))
        .transpose()?;
    build(&legacy, &extended, overflow.as_ref(), config)
}

/// Check one legacy record against its extended partner.
///
/// Returns the partner when both sides agree. A partner slot that does
/// not exist on the extended side (count mismatch, permissive mode) is
/// not a per-entry failure: the legacy record alone fully describes the
/// entry. A partner that failed its own record decode is unusable for
/// comparison and rejects the entry.
fn cross_check<'a>(
    index: usize,
    legacy_rec: &LegacyCatalogRecord,
    extended: &'a TableDecode<ExtendedCatalogRecord>,
) -> DecodeResult<Option<&'a ExtendedCatalogRecord>> {
    let Some(partner) = extended.record(index) else {
        if index > extended.record_count {
            return Ok(None);
        }
        return Err(DecodeError::CrossTableInconsistency {
            index,
            field: "record_decode",
            legacy: 1,
            extended: 0,
        });
    };

    if partner.file_number != legacy_rec.file_number {
        return Err(DecodeError::CrossTableInconsistency {
            index,
            field: "file_number",
            legacy: u64::from(legacy_rec.file_number),
            extended: u64::from(partner.file_number),
        });
    }

    let legacy_len = u64::from(legacy_rec.data_length);
    let extended_len = u64::from(partner.data_length());
    if legacy_len != extended_len {
        return Err(DecodeError::CrossTableInconsistency {
            index,
            field: "data_length",
            legacy: legacy_len,
            extended: extended_len,
        });
    }

    Ok(Some(partner))
}

fn make_entry(
    legacy_rec: &LegacyCatalogRecord,
    partner: Option<&ExtendedCatalogRecord>,
) -> CatalogEntry {
    // The extended catalog's long-name fallback beats the legacy 16-byte
    // field when the partner record is available.
    let display_name = match partner {
        Some(ext) if !ext.display_name().is_empty() => ext.display_name().to_string(),
        _ => legacy_rec.display_name.clone(),
    };

    CatalogEntry {
        file_number: u32::from(legacy_rec.file_number),
        record_width: u16::from(legacy_rec.data_length),
        ticker_symbol: legacy_rec.ticker_symbol.clone(),
        display_name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::{FieldMask, TimeFrame};

    fn legacy_rec(file_number: u8) -> LegacyCatalogRecord {
        LegacyCatalogRecord {
            file_number,
            data_length: 28,
            field_count: 7,
            display_name: format!("Issue {file_number}"),
            start_date: 20_040_102,
            end_date: 20_051_230,
            time_frame: TimeFrame::Daily,
            intraday_frame: [0, 0],
            ticker_symbol: format!("SYM{file_number}"),
        }
    }

    fn extended_rec(file_number: u8) -> ExtendedCatalogRecord {
        ExtendedCatalogRecord {
            file_number,
            field_count: 7,
            field_mask: FieldMask::FULL,
            ticker_symbol: format!("SYM{file_number}"),
            name: format!("Issue {file_number}"),
            long_name: String::new(),
            time_frame: TimeFrame::Daily,
            first_date: Some(20_040_102),
            last_date: Some(20_051_230),
            last_date_long: None,
        }
    }

    fn decoded<T>(records: Vec<T>) -> TableDecode<T> {
        TableDecode {
            record_count: records.len(),
            records: records.into_iter().enumerate().map(|(i, r)| (i + 1, r)).collect(),
            violations: Vec::new(),
        }
    }

    #[test]
    fn matched_catalogs_produce_one_entry_per_record() {
        let legacy = decoded(vec![legacy_rec(1), legacy_rec(2)]);
        let extended = decoded(vec![extended_rec(1), extended_rec(2)]);
        let build = build(&legacy, &extended, None, &DecodeConfig::strict()).unwrap();
        assert!(build.is_clean());
        assert_eq!(build.entries.len(), 2);
        assert_eq!(build.entries[0].file_number, 1);
        assert_eq!(build.entries[0].record_width, 28);
        assert_eq!(build.entries[0].data_file_name(), "f1.dat");
    }

    #[test]
    fn count_mismatch_fails_strict_build() {
        let legacy = decoded(vec![legacy_rec(1); 5]);
        let extended = decoded(vec![extended_rec(1); 6]);
        let err = build(&legacy, &extended, None, &DecodeConfig::strict()).unwrap_err();
        assert_eq!(
            err,
            DecodeError::CrossTableInconsistency {
                index: 0,
                field: "record_count",
                legacy: 5,
                extended: 6,
            }
        );
    }

    #[test]
    fn count_mismatch_in_permissive_mode_keeps_legacy_entries() {
        let legacy = decoded(vec![legacy_rec(1), legacy_rec(2), legacy_rec(3)]);
        let extended = decoded(vec![extended_rec(1), extended_rec(2)]);
        let build = build(&legacy, &extended, None, &DecodeConfig::permissive()).unwrap();
        // All legacy entries survive; the mismatch itself is flagged.
        assert_eq!(build.entries.len(), 3);
        assert_eq!(build.rejected.len(), 1);
        assert_eq!(build.rejected[0].index, 0);
        assert!(matches!(
            build.rejected[0].error,
            DecodeError::CrossTableInconsistency { field: "record_count", .. }
        ));
    }

    #[test]
    fn file_number_disagreement_rejects_only_that_entry() {
        let legacy = decoded(vec![legacy_rec(1), legacy_rec(2)]);
        let extended = decoded(vec![extended_rec(1), extended_rec(9)]);

        let err = build(&legacy, &extended, None, &DecodeConfig::strict()).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::CrossTableInconsistency { index: 2, field: "file_number", .. }
        ));

        let build = build(&legacy, &extended, None, &DecodeConfig::permissive()).unwrap();
        assert_eq!(build.entries.len(), 1);
        assert_eq!(build.rejected.len(), 1);
        assert_eq!(build.rejected[0].index, 2);
    }

    #[test]
    fn data_length_disagreement_is_caught() {
        let legacy = decoded(vec![legacy_rec(1)]);
        let mut ext = extended_rec(1);
        ext.field_count = 6; // derived length 24 vs legacy 28
        let extended = decoded(vec![ext]);
        let err = build(&legacy, &extended, None, &DecodeConfig::strict()).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::CrossTableInconsistency { field: "data_length", .. }
        ));
    }

    #[test]
    fn overflow_entries_are_appended_independently() {
        let legacy = decoded(vec![legacy_rec(1)]);
        let extended = decoded(vec![extended_rec(1)]);
        let overflow = decoded(vec![OverflowCatalogRecord {
            file_number: 300,
            ticker_symbol: "OVR".into(),
            display_name: "Overflow Issue".into(),
            time_frame: TimeFrame::Daily,
            field_mask: FieldMask::NO_OPEN_INTEREST,
            start_date: 19_980_105,
            first_date: 19_980_105,
            last_date: 20_051_230,
            last_date_alt: 20_051_230,
        }]);

        let build = build(&legacy, &extended, Some(&overflow), &DecodeConfig::strict()).unwrap();
        assert_eq!(build.entries.len(), 2);
        let overflow_entry = &build.entries[1];
        assert_eq!(overflow_entry.file_number, 300);
        assert_eq!(overflow_entry.record_width, 24);
        assert_eq!(overflow_entry.data_file_name(), "f300.mwd");
        assert!(!overflow_entry.has_open_interest());
    }

    #[test]
    fn long_name_from_extended_catalog_wins() {
        let legacy = decoded(vec![legacy_rec(1)]);
        let mut ext = extended_rec(1);
        ext.long_name = "Issue One Full Legal Name Inc.".into();
        let extended = decoded(vec![ext]);
        let build = build(&legacy, &extended, None, &DecodeConfig::strict()).unwrap();
        assert_eq!(build.entries[0].display_name, "Issue One Full Legal Name Inc.");
    }
}
