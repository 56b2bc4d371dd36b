use log::{debug, warn};
use thiserror::Error;

use super::model::{Scan, ScanCollection};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Fatal parse failure. Everything recoverable (malformed peak lines,
/// unterminated blocks) is absorbed inside [`parse`] and never surfaces here.
#[derive(Debug, Error)]
pub enum ParseError {
    /// A SCANS, PEPMASS or CHARGE field whose value is not a plain number.
    /// Distinct from the field being absent, which yields the default.
    #[error("line {line}: {key} value '{value}' is not a valid number")]
    NumericField {
        line: usize,
        key: String,
        value: String,
    },
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Parse the text content of an MGF-style scan file.
///
/// The format is a sequence of `BEGIN IONS` / `END IONS` blocks. Inside a
/// block, `KEY=VALUE` lines set scan metadata (split on the first `=` only;
/// unrecognized keys are ignored by contract) and every other non-empty line
/// is expected to be a peak: two whitespace-separated numbers. Malformed peak
/// lines are skipped with a warning; lines outside any block are ignored; a
/// trailing `BEGIN IONS` with no matching end contributes no scan.
///
/// Numeric header values are parsed as-is. Common MGF extensions are *not*
/// supported and fail the parse: `PEPMASS=500.25 1000.0` (mass plus
/// intensity) and `CHARGE=2+` (trailing polarity sign) both raise
/// [`ParseError::NumericField`].
pub fn parse(content: &str) -> Result<ScanCollection, ParseError> {
    let mut scans: Vec<Scan> = Vec::new();
    let mut scan_numbers: Vec<u32> = Vec::new();
    let mut current: Option<Scan> = None;

    for (idx, raw_line) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw_line.trim();

        if line == "BEGIN IONS" {
            // A BEGIN while a block is still open abandons the open block.
            current = Some(Scan::default());
        } else if line == "END IONS" {
            if let Some(scan) = current.take() {
                scans.push(scan);
            }
        } else if let Some(scan) = current.as_mut() {
            if let Some((key, value)) = line.split_once('=') {
                apply_header_field(scan, &mut scan_numbers, key, value, line_no)?;
            } else {
                parse_peak_line(scan, line, line_no);
            }
        }
        // Outside a block: ignored.
    }

    if current.is_some() {
        debug!("discarding unterminated scan block at end of input");
    }
    debug!(
        "parsed {} scans ({} scan numbers)",
        scans.len(),
        scan_numbers.len()
    );

    Ok(ScanCollection {
        scans,
        scan_numbers,
    })
}

// ---------------------------------------------------------------------------
// Line handlers
// ---------------------------------------------------------------------------

fn apply_header_field(
    scan: &mut Scan,
    scan_numbers: &mut Vec<u32>,
    key: &str,
    value: &str,
    line_no: usize,
) -> Result<(), ParseError> {
    match key {
        "SCANS" => {
            let number = parse_numeric::<u32>(key, value, line_no)?;
            scan.scan_number = number;
            scan_numbers.push(number);
        }
        "SPECTRUMID" => scan.spectrum_id = value.to_string(),
        "PEPMASS" => scan.pepmass = parse_numeric::<f64>(key, value, line_no)?,
        "CHARGE" => scan.charge_state = parse_numeric::<i32>(key, value, line_no)?,
        "SMILES" => scan.smiles_id = value.trim().to_string(),
        _ => {} // unrecognized keys are a no-op by contract
    }
    Ok(())
}

fn parse_numeric<T: std::str::FromStr>(
    key: &str,
    value: &str,
    line_no: usize,
) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::NumericField {
        line: line_no,
        key: key.to_string(),
        value: value.to_string(),
    })
}

/// Parse one peak line: exactly two whitespace-separated floats.
/// Anything else is skipped with a diagnostic; empty lines are skipped silently.
fn parse_peak_line(scan: &mut Scan, line: &str, line_no: usize) {
    if line.is_empty() {
        return;
    }
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if let [mz_tok, intensity_tok] = tokens.as_slice() {
        match (mz_tok.parse::<f64>(), intensity_tok.parse::<f64>()) {
            (Ok(mz), Ok(intensity)) => {
                scan.push_peak(mz, intensity);
                return;
            }
            _ => {}
        }
    }
    warn!("line {line_no}: skipping unreadable peak line '{line}'");
}
