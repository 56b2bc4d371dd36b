use std::sync::Arc;

use thiserror::Error;

use crate::cache::ParseCache;
use crate::data::model::{FilteredSpectrum, Scan, ScanCollection};
use crate::data::normalize::NormalizeError;
use crate::data::parser::ParseError;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Scan selection failed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectError {
    /// The requested number is not in the file's scan-number index.
    #[error("scan number {0} not found in the loaded file")]
    ScanNotFound(u32),
    /// No file content has been loaded yet.
    #[error("no scan file loaded")]
    NoFileLoaded,
}

// ---------------------------------------------------------------------------
// Session state
// ---------------------------------------------------------------------------

/// Caller-owned viewer session, independent of any rendering.
///
/// Owns the parse cache and the current scan selection, and hands the
/// presentation layer read-only views: scan metadata, the unfiltered peak
/// arrays, and the filtered/normalized spectrum (recomputed per request).
#[derive(Debug, Default)]
pub struct SessionState {
    cache: ParseCache,
    collection: Option<Arc<ScanCollection>>,
    /// Index into `collection.scans` of the selected scan.
    selected: Option<usize>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ingest file content, parsing through the cache. Any previous
    /// selection is reset; the previous parse survives a failed load.
    pub fn load_content(&mut self, content: &str) -> Result<(), ParseError> {
        let collection = self.cache.get_or_parse(content)?;
        self.collection = Some(collection);
        self.selected = None;
        Ok(())
    }

    /// The loaded collection, if any.
    pub fn collection(&self) -> Option<&ScanCollection> {
        self.collection.as_deref()
    }

    /// Scan numbers in file order, for a selection dropdown. Empty before load.
    pub fn scan_numbers(&self) -> &[u32] {
        self.collection
            .as_deref()
            .map(|c| c.scan_numbers.as_slice())
            .unwrap_or(&[])
    }

    /// Select a scan by number. On duplicate numbers the first block wins.
    pub fn select_scan(&mut self, scan_number: u32) -> Result<(), SelectError> {
        let collection = self.collection.as_deref().ok_or(SelectError::NoFileLoaded)?;
        let index = collection
            .scans
            .iter()
            .position(|s| s.scan_number == scan_number)
            .ok_or(SelectError::ScanNotFound(scan_number))?;
        self.selected = Some(index);
        Ok(())
    }

    /// Currently selected scan: metadata plus the unfiltered peak arrays.
    pub fn selected_scan(&self) -> Option<&Scan> {
        let collection = self.collection.as_deref()?;
        self.selected.map(|i| &collection.scans[i])
    }

    /// Filtered and normalized view of the selected scan.
    ///
    /// Recomputed on every call; `None` when no scan is selected, and
    /// `Some(Err(..))` when nothing survives filtering so the presenter can
    /// show a message instead of an empty plot.
    pub fn filtered_spectrum(&self) -> Option<Result<FilteredSpectrum, NormalizeError>> {
        self.selected_scan().map(FilteredSpectrum::compute)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_SCANS: &str = "BEGIN IONS\n\
                             SCANS=1\n\
                             PEPMASS=500.0\n\
                             CHARGE=2\n\
                             490.0 10.0\n\
                             505.0 5.0\n\
                             600.0 20.0\n\
                             END IONS\n\
                             BEGIN IONS\n\
                             SCANS=2\n\
                             PEPMASS=300.0\n\
                             290.0 4.0\n\
                             310.0 6.0\n\
                             END IONS\n";

    #[test]
    fn load_select_and_view() {
        let mut session = SessionState::new();
        session.load_content(TWO_SCANS).unwrap();
        assert_eq!(session.scan_numbers(), &[1, 2]);

        session.select_scan(1).unwrap();
        let scan = session.selected_scan().unwrap();
        assert_eq!(scan.pepmass, 500.0);
        assert_eq!(scan.mz_values, vec![490.0, 505.0, 600.0]);

        let spectrum = session.filtered_spectrum().unwrap().unwrap();
        assert_eq!(spectrum.mz, vec![600.0]);
        assert!((spectrum.normalized[0] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn missing_scan_number_is_reported_not_a_crash() {
        let mut session = SessionState::new();
        session.load_content(TWO_SCANS).unwrap();
        assert_eq!(session.select_scan(99), Err(SelectError::ScanNotFound(99)));
        assert!(session.selected_scan().is_none());
    }

    #[test]
    fn select_before_load_fails() {
        let mut session = SessionState::new();
        assert_eq!(session.select_scan(1), Err(SelectError::NoFileLoaded));
        assert!(session.scan_numbers().is_empty());
    }

    #[test]
    fn degenerate_filtering_surfaces_as_error_value() {
        let mut session = SessionState::new();
        session.load_content(TWO_SCANS).unwrap();
        // Scan 2: both peaks sit within 17 of PEPMASS=300, nothing survives.
        session.select_scan(2).unwrap();
        let result = session.filtered_spectrum().unwrap();
        assert!(result.is_err());
    }

    #[test]
    fn loading_new_content_resets_selection() {
        let mut session = SessionState::new();
        session.load_content(TWO_SCANS).unwrap();
        session.select_scan(1).unwrap();

        session
            .load_content("BEGIN IONS\nSCANS=7\n100.0 1.0\nEND IONS\n")
            .unwrap();
        assert!(session.selected_scan().is_none());
        assert_eq!(session.scan_numbers(), &[7]);
    }

    #[test]
    fn reloading_same_content_is_a_cache_hit() {
        let mut session = SessionState::new();
        session.load_content(TWO_SCANS).unwrap();
        let first = Arc::clone(session.collection.as_ref().unwrap());
        session.load_content(TWO_SCANS).unwrap();
        let second = session.collection.as_ref().unwrap();
        assert!(Arc::ptr_eq(&first, second));
    }
}
