//! passage-core: scriptural passage normalization and citation rendering.
//!
//! Models a contiguous span of verses within one book of a canonical text
//! and renders collections of such spans into compact, human-readable
//! citation strings (e.g. "Romans 3:21-26" or "Matthew 5:3-12, ch. 7").
//!
//! # Public API
//!
//! Key types are re-exported at the crate root for convenience:
//!
//! - [`Passage`] -- a validated verse span; owns normalization,
//!   truncation/extension, and single-passage rendering
//! - [`PassageCollection`] -- an ordered sequence of passages; grouping
//!   and joined rendering
//! - [`Versification`] -- read-only canon-structure provider trait
//! - [`BookRef`] -- tagged book input (name, abbreviation, or 1-66 id)
//! - [`InvalidReference`] -- construction error type
//! - [`PassageRecord`] -- plain-data snapshot for storage-layer range
//!   queries

pub mod collection;
pub mod error;
pub mod passage;
pub mod record;
pub mod versification;

mod bunch;

// ── Convenience re-exports: key types ────────────────────────────────

pub use collection::PassageCollection;
pub use error::InvalidReference;
pub use passage::Passage;
pub use record::PassageRecord;
pub use versification::{BookRef, Versification, CANON_BOOKS, PSALMS};

/// En-dash range separator, for callers that want typographic output:
/// `passage.reference_string(false, EN_DASH)`.
pub const EN_DASH: &str = "\u{2013}";
