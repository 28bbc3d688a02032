//! passage-data: versification datasets and the translation registry.
//!
//! Supplies concrete [`Versification`] providers for the normalization
//! engine in `passage-core`. Currently one dataset ships: the English
//! Standard Version ([`Esv`]), with standard English chapter/verse
//! structure and the sixteen verses the ESV leaves out of its numbering.
//!
//! Providers are selected by translation code through
//! [`versification()`]; unrecognized codes deliberately fall back to the
//! ESV dataset rather than erroring, so lookups always succeed.

mod esv;
mod tables;

pub use esv::Esv;

use passage_core::Versification;

/// The shared ESV provider instance.
pub static ESV: Esv = Esv;

static REGISTRY: &[(&str, &'static dyn Versification)] = &[("ESV", &ESV)];

/// Select a versification provider by translation code,
/// case-insensitively. Unrecognized codes fall back to the ESV dataset;
/// the fallback is deliberate, not an error.
pub fn versification(code: &str) -> &'static dyn Versification {
    REGISTRY
        .iter()
        .find(|(c, _)| c.eq_ignore_ascii_case(code))
        .map(|(_, v)| *v)
        .unwrap_or(&ESV)
}

/// The ESV provider, for callers that want it by name.
pub fn esv() -> &'static Esv {
    &ESV
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_resolves_esv_in_any_case() {
        assert_eq!(versification("ESV").book_number("Gen"), Some(1));
        assert_eq!(versification("esv").book_number("Gen"), Some(1));
    }

    #[test]
    fn unrecognized_codes_fall_back_to_esv() {
        let fallback = versification("NO-SUCH-TRANSLATION");
        assert_eq!(fallback.chapter_count(1), 50);
        assert_eq!(fallback.book_number("Phm"), Some(57));
    }
}
