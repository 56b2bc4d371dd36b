use std::hash::{DefaultHasher, Hash, Hasher};
use std::sync::Arc;

use log::debug;

use crate::data::model::ScanCollection;
use crate::data::parser::{self, ParseError};

// ---------------------------------------------------------------------------
// ParseCache – whole-file parse memo
// ---------------------------------------------------------------------------

/// Single-slot memo for the whole-file parse.
///
/// Re-parsing the same content on every interaction is wasted work, so the
/// parse result is kept keyed by a fingerprint of the raw text. Supplying
/// different content replaces the slot; there is no global state and the
/// owner decides the cache's lifetime.
#[derive(Debug, Default)]
pub struct ParseCache {
    slot: Option<(u64, Arc<ScanCollection>)>,
}

impl ParseCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached parse of `content`, parsing it on a fingerprint miss.
    ///
    /// The returned `Arc` is the same allocation on a hit, so callers can
    /// hold on to a parse across interactions without cloning scan data.
    pub fn get_or_parse(&mut self, content: &str) -> Result<Arc<ScanCollection>, ParseError> {
        let fingerprint = fingerprint(content.as_bytes());
        if let Some((cached_fp, collection)) = &self.slot {
            if *cached_fp == fingerprint {
                debug!("parse cache hit (fingerprint {fingerprint:016x})");
                return Ok(Arc::clone(collection));
            }
        }

        debug!("parse cache miss (fingerprint {fingerprint:016x})");
        let collection = Arc::new(parser::parse(content)?);
        self.slot = Some((fingerprint, Arc::clone(&collection)));
        Ok(collection)
    }

    /// Drop the cached parse, e.g. when the current file is closed.
    pub fn clear(&mut self) {
        self.slot = None;
    }
}

fn fingerprint(bytes: &[u8]) -> u64 {
    let mut hasher = DefaultHasher::new();
    bytes.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE_SCAN: &str = "BEGIN IONS\nSCANS=1\n100.0 1.0\nEND IONS\n";
    const OTHER_SCAN: &str = "BEGIN IONS\nSCANS=2\n200.0 2.0\nEND IONS\n";

    #[test]
    fn repeated_content_hits_the_cache() {
        let mut cache = ParseCache::new();
        let first = cache.get_or_parse(ONE_SCAN).unwrap();
        let second = cache.get_or_parse(ONE_SCAN).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn new_content_replaces_the_slot() {
        let mut cache = ParseCache::new();
        let first = cache.get_or_parse(ONE_SCAN).unwrap();
        let second = cache.get_or_parse(OTHER_SCAN).unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(second.scan_numbers, vec![2]);

        // The old content must be re-parsed after replacement.
        let third = cache.get_or_parse(ONE_SCAN).unwrap();
        assert!(!Arc::ptr_eq(&first, &third));
        assert_eq!(third.scan_numbers, vec![1]);
    }

    #[test]
    fn clear_forces_a_reparse() {
        let mut cache = ParseCache::new();
        let first = cache.get_or_parse(ONE_SCAN).unwrap();
        cache.clear();
        let second = cache.get_or_parse(ONE_SCAN).unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(first, second);
    }

    #[test]
    fn parse_errors_pass_through_uncached() {
        let mut cache = ParseCache::new();
        let bad = "BEGIN IONS\nSCANS=abc\nEND IONS\n";
        assert!(cache.get_or_parse(bad).is_err());
        // A failed parse must not poison the slot.
        assert!(cache.get_or_parse(ONE_SCAN).is_ok());
    }
}
