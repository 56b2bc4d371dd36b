use super::model::Scan;

// ---------------------------------------------------------------------------
// Filtering constants
// ---------------------------------------------------------------------------

/// Half-width of the m/z neighborhood each peak competes in.
pub const WINDOW_HALF_WIDTH: f64 = 25.0;

/// A peak survives only if it ranks among the top-k intensities of its window.
pub const TOP_K: usize = 6;

/// Peaks within this distance of the precursor m/z are dropped; they are
/// usually unfragmented precursor ions, not informative fragments.
pub const PRECURSOR_EXCLUSION_RADIUS: f64 = 17.0;

// ---------------------------------------------------------------------------
// FilteredPeaks – raw filter output, before normalization
// ---------------------------------------------------------------------------

/// Peaks surviving the window and precursor-exclusion tests, in original order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilteredPeaks {
    pub mz: Vec<f64>,
    pub intensity: Vec<f64>,
}

// ---------------------------------------------------------------------------
// Peak filtering
// ---------------------------------------------------------------------------

/// Reduce a scan's peak list to its locally dominant, chemically relevant peaks.
///
/// Each peak `i` defines its own window: every index `j` (itself included)
/// with `|mz[j] - mz[i]| <= WINDOW_HALF_WIDTH`, collected in array order.
/// The window is ranked by intensity descending with a stable sort, so
/// equal-intensity peaks keep their array order. Peak `i` is kept iff
///
/// * it sits within the first [`TOP_K`] ranks of its own window, and
/// * `|mz[i] - pepmass| > PRECURSOR_EXCLUSION_RADIUS`.
///
/// Survivors come out in their original relative order; nothing is re-sorted.
/// A `pepmass` of 0.0 (header absent) is not special-cased, so the exclusion
/// radius then applies around zero and can drop very-low-m/z peaks.
///
/// Quadratic in the peak count: every peak rescans the whole array to build
/// its window. Peak lists are low hundreds of entries, so this stays cheap,
/// and the rank/tie-break behavior is part of the output contract.
pub fn filter_peaks(scan: &Scan) -> FilteredPeaks {
    let mz_array = &scan.mz_values;
    let intensity_array = &scan.intensity_values;
    let mut filtered = FilteredPeaks::default();

    for (i, &mz) in mz_array.iter().enumerate() {
        let mut window: Vec<usize> = (0..mz_array.len())
            .filter(|&j| (mz_array[j] - mz).abs() <= WINDOW_HALF_WIDTH)
            .collect();
        // Stable: ties keep the earlier index at the earlier rank.
        window.sort_by(|&a, &b| intensity_array[b].total_cmp(&intensity_array[a]));

        let is_local_top = window.iter().take(TOP_K).any(|&j| j == i);
        if is_local_top && (mz - scan.pepmass).abs() > PRECURSOR_EXCLUSION_RADIUS {
            filtered.mz.push(mz);
            filtered.intensity.push(intensity_array[i]);
        }
    }

    filtered
}
