//! Data layer for an MS2 scan viewer.
//!
//! Parses MGF-style peak-list files into [`Scan`] records, reduces each
//! scan's peaks to the locally dominant fragments, and rescales the
//! survivors into L2-normalized and square-root-normalized intensities.
//! Rendering (plots, tables, file pickers) lives in the consuming
//! application; everything here is plain data.
//!
//! ```text
//!  raw text ──▶ parser ──▶ ScanCollection ──▶ filter ──▶ normalize ──▶ FilteredSpectrum
//!                              ▲                                            │
//!                          ParseCache                                  presentation
//!                        (SessionState)                                  layer
//! ```
//!
//! ```
//! use ms2view::SessionState;
//!
//! let content = "BEGIN IONS\nSCANS=1\nPEPMASS=500.0\n600.0 20.0\nEND IONS\n";
//! let mut session = SessionState::new();
//! session.load_content(content)?;
//! session.select_scan(1)?;
//! let spectrum = session.filtered_spectrum().unwrap()?;
//! assert_eq!(spectrum.mz, vec![600.0]);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cache;
pub mod data;
pub mod state;

pub use cache::ParseCache;
pub use data::filter::{filter_peaks, FilteredPeaks};
pub use data::model::{FilteredSpectrum, Scan, ScanCollection};
pub use data::normalize::{normalize, NormalizeError, NormalizedIntensities};
pub use data::parser::{parse, ParseError};
pub use state::{SelectError, SessionState};
