use crate::error::ModalityError;

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// One measurement per modality axis, in axis order.
pub type DataPoint = [f64; 3];

/// Presence flag per modality, in axis order.
pub type BinarizationFlags = [bool; 3];

// ---------------------------------------------------------------------------
// ModalityDataset – validated parallel sequences
// ---------------------------------------------------------------------------

/// Measurements and their binarization, kept as two parallel sequences.
///
/// Construction checks that both sequences are non-empty and of equal length.
/// The three-cells-per-row requirement is carried by the array types.
#[derive(Debug, Clone, PartialEq)]
pub struct ModalityDataset {
    data: Vec<DataPoint>,
    binarization: Vec<BinarizationFlags>,
}

impl ModalityDataset {
    pub fn new(
        data: Vec<DataPoint>,
        binarization: Vec<BinarizationFlags>,
    ) -> Result<Self, ModalityError> {
        if data.is_empty() {
            return Err(ModalityError::EmptyData);
        }
        if binarization.is_empty() {
            return Err(ModalityError::EmptyBinarization);
        }
        if data.len() != binarization.len() {
            return Err(ModalityError::LengthMismatch {
                data: data.len(),
                binarization: binarization.len(),
            });
        }
        Ok(Self { data, binarization })
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Never true for a constructed dataset.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Iterate rows as `(measurements, flags)` pairs.
    pub fn rows(&self) -> impl Iterator<Item = (&DataPoint, &BinarizationFlags)> {
        self.data.iter().zip(self.binarization.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_data() {
        let err = ModalityDataset::new(vec![], vec![[true, false, false]]).unwrap_err();
        assert_eq!(err, ModalityError::EmptyData);
    }

    #[test]
    fn rejects_empty_binarization() {
        let err = ModalityDataset::new(vec![[1.0, 0.0, 0.0]], vec![]).unwrap_err();
        assert_eq!(err, ModalityError::EmptyBinarization);
    }

    #[test]
    fn rejects_length_mismatch() {
        let err = ModalityDataset::new(
            vec![[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            vec![[true, false, false]],
        )
        .unwrap_err();
        assert_eq!(
            err,
            ModalityError::LengthMismatch {
                data: 2,
                binarization: 1
            }
        );
    }

    #[test]
    fn rows_are_zipped_in_order() {
        let ds = ModalityDataset::new(
            vec![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]],
            vec![[true, false, false], [false, true, true]],
        )
        .unwrap();
        assert_eq!(ds.len(), 2);
        let rows: Vec<_> = ds.rows().collect();
        assert_eq!(rows[1], (&[4.0, 5.0, 6.0], &[false, true, true]));
    }
}
