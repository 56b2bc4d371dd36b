use serde::Serialize;

// ---------------------------------------------------------------------------
// Scan – one MS2 spectrum block
// ---------------------------------------------------------------------------

/// A single MS2 scan: one `BEGIN IONS` / `END IONS` block of the source file.
///
/// All fields start at their documented defaults when a block opens and are
/// overwritten as header lines are encountered. Peaks are stored three ways
/// (pairs plus two parallel arrays) because the filtering step works on the
/// plain arrays while the pair form is convenient for export.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Scan {
    /// Value of the SCANS field. Defaults to 0; the parser does not check
    /// uniqueness, so two blocks may legitimately carry the same number.
    pub scan_number: u32,
    /// Value of the SPECTRUMID field, empty if absent.
    pub spectrum_id: String,
    /// Precursor m/z from the PEPMASS field, 0.0 if absent.
    pub pepmass: f64,
    /// Precursor charge from the CHARGE field, 0 if absent.
    pub charge_state: i32,
    /// Value of the SMILES field (surrounding whitespace trimmed), empty if absent.
    pub smiles_id: String,
    /// (m/z, intensity) pairs in file order.
    pub peaks: Vec<(f64, f64)>,
    /// m/z axis, parallel to `intensity_values`. File order, never re-sorted.
    pub mz_values: Vec<f64>,
    /// Intensity axis, parallel to `mz_values`.
    pub intensity_values: Vec<f64>,
}

impl Scan {
    /// Record one peak line in all three storage forms.
    pub fn push_peak(&mut self, mz: f64, intensity: f64) {
        self.peaks.push((mz, intensity));
        self.mz_values.push(mz);
        self.intensity_values.push(intensity);
    }

    /// Number of peaks in this scan.
    pub fn peak_count(&self) -> usize {
        self.peaks.len()
    }
}

// ---------------------------------------------------------------------------
// ScanCollection – the complete parsed file
// ---------------------------------------------------------------------------

/// The full parse result of one scan file.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScanCollection {
    /// All completed scans, in file order.
    pub scans: Vec<Scan>,
    /// Every SCANS value in the order encountered (may contain duplicates).
    pub scan_numbers: Vec<u32>,
}

impl ScanCollection {
    /// Number of scans.
    pub fn len(&self) -> usize {
        self.scans.len()
    }

    /// Whether the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.scans.is_empty()
    }

    /// First scan carrying the given scan number, if any.
    pub fn find_scan(&self, scan_number: u32) -> Option<&Scan> {
        self.scans.iter().find(|s| s.scan_number == scan_number)
    }
}

// ---------------------------------------------------------------------------
// FilteredSpectrum – per-scan derived view
// ---------------------------------------------------------------------------

/// Filtered and normalized view of one scan's peaks.
///
/// All four arrays are parallel. This is a pure function of a [`Scan`] and is
/// recomputed on demand; nothing here is cached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilteredSpectrum {
    /// Surviving m/z values, a subset of the scan's `mz_values` in original order.
    pub mz: Vec<f64>,
    /// Raw intensities of the surviving peaks.
    pub intensity: Vec<f64>,
    /// L2-normalized intensities (squares sum to 1).
    pub normalized: Vec<f64>,
    /// Square roots of the normalized intensities.
    pub sqrt_normalized: Vec<f64>,
}

impl FilteredSpectrum {
    /// Filter a scan's peaks and normalize the survivors.
    ///
    /// Fails with [`NormalizeError::DegenerateNorm`](super::normalize::NormalizeError::DegenerateNorm)
    /// when no peak survives filtering (or all survivors have zero intensity),
    /// so the caller can show a message instead of propagating NaNs.
    pub fn compute(scan: &Scan) -> Result<Self, super::normalize::NormalizeError> {
        let filtered = super::filter::filter_peaks(scan);
        let norm = super::normalize::normalize(&filtered.intensity)?;
        Ok(FilteredSpectrum {
            mz: filtered.mz,
            intensity: filtered.intensity,
            normalized: norm.normalized,
            sqrt_normalized: norm.sqrt_normalized,
        })
    }
}
