use thiserror::Error;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Normalization cannot produce finite values for this input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NormalizeError {
    /// Empty intensity vector, or one whose Euclidean norm is zero. Dividing
    /// by the norm would yield NaN or infinity, so the caller gets an error
    /// to handle (typically shown as "no peaks survived filtering").
    #[error("cannot normalize {len} intensities with zero norm")]
    DegenerateNorm { len: usize },
}

// ---------------------------------------------------------------------------
// NormalizedIntensities – the two derived representations
// ---------------------------------------------------------------------------

/// L2-normalized intensities and their square roots, parallel to the input.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedIntensities {
    /// `intensity[k] / ||intensity||`; squares sum to 1.
    pub normalized: Vec<f64>,
    /// `sqrt(normalized[k])`. Real-valued because peak intensities are
    /// physically non-negative.
    pub sqrt_normalized: Vec<f64>,
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// Rescale filtered intensities by their Euclidean norm.
pub fn normalize(intensity: &[f64]) -> Result<NormalizedIntensities, NormalizeError> {
    let norm = intensity.iter().map(|x| x * x).sum::<f64>().sqrt();
    if intensity.is_empty() || norm == 0.0 {
        return Err(NormalizeError::DegenerateNorm {
            len: intensity.len(),
        });
    }

    let normalized: Vec<f64> = intensity.iter().map(|x| x / norm).collect();
    let sqrt_normalized: Vec<f64> = normalized.iter().map(|x| x.sqrt()).collect();
    Ok(NormalizedIntensities {
        normalized,
        sqrt_normalized,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn normalized_squares_sum_to_one() {
        let result = normalize(&[3.0, 4.0]).unwrap();
        assert_eq!(result.normalized, vec![0.6, 0.8]);
        let sum_sq: f64 = result.normalized.iter().map(|x| x * x).sum();
        assert!((sum_sq - 1.0).abs() < EPS);
    }

    #[test]
    fn sqrt_values_square_back_to_normalized() {
        let result = normalize(&[1.0, 2.0, 5.0, 0.5]).unwrap();
        assert_eq!(result.sqrt_normalized.len(), result.normalized.len());
        for (sqrt_v, v) in result.sqrt_normalized.iter().zip(&result.normalized) {
            assert!((sqrt_v * sqrt_v - v).abs() < EPS);
        }
    }

    #[test]
    fn single_value_normalizes_to_unity() {
        let result = normalize(&[42.0]).unwrap();
        assert!((result.normalized[0] - 1.0).abs() < EPS);
        assert!((result.sqrt_normalized[0] - 1.0).abs() < EPS);
    }

    #[test]
    fn empty_input_is_degenerate() {
        assert_eq!(
            normalize(&[]),
            Err(NormalizeError::DegenerateNorm { len: 0 })
        );
    }

    #[test]
    fn all_zero_intensities_are_degenerate() {
        assert_eq!(
            normalize(&[0.0, 0.0, 0.0]),
            Err(NormalizeError::DegenerateNorm { len: 3 })
        );
    }

    #[test]
    fn output_never_contains_nan_or_infinity() {
        let result = normalize(&[1e-30, 2e-30]).unwrap();
        for v in result.normalized.iter().chain(&result.sqrt_normalized) {
            assert!(v.is_finite());
        }
    }
}
