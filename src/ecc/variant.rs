//! Code variant descriptor.
//!
//! A [`CodeVariant`] fixes every parameter of one instantiation of the
//! two-dimensional code: the row word length, the parity positions inside a
//! row, the number of information bits carried per row and the number of
//! vertical parity rows appended to a block. Every other component of the
//! engine is driven by it, so all position arithmetic and loop bounds come
//! from here rather than from literal constants.
//!
//! Parity positions follow the classic Hamming layout: the `i`-th parity bit
//! sits at zero-based offset `2^i - 1`, and the 1-indexed bit `j` takes part
//! in check `i` iff `j & 2^i != 0`. That bitmask relation is what lets the
//! sum of the failing checks name the erroneous bit directly.

use crate::error::{Error, Result};

/// Data rows per block conventionally paired with the shortened (17, 7) variant.
pub const DATA_ROWS_17_7: usize = 17;

/// Immutable description of one instantiation of the code.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CodeVariant {
    /// Total bits per encoded row (information + parity + shortened padding)
    word_length: usize,
    /// Zero-based parity offsets, strictly increasing
    parity_positions: Vec<usize>,
    /// Information bits carried per row
    data_length: usize,
    /// Number of column-parity rows appended to a block
    vertical_redundancy: usize,
}

impl CodeVariant {
    /// Creates a new code variant after validating its parameters.
    ///
    /// # Arguments
    ///
    /// * `word_length` - Number of bits in an encoded row
    /// * `parity_positions` - Zero-based offsets reserved for parity bits
    /// * `vertical_redundancy` - Number of vertical parity rows per block
    ///
    /// # Returns
    ///
    /// A variant carrying `word_length - parity_positions.len()` information
    /// bits per row, or [`Error::InvalidCodeVariant`].
    pub fn new(
        word_length: usize,
        parity_positions: Vec<usize>,
        vertical_redundancy: usize,
    ) -> Result<Self> {
        if parity_positions.is_empty() {
            return Err(Error::InvalidCodeVariant(
                "at least one parity position is required".to_string(),
            ));
        }

        if word_length <= parity_positions.len() {
            return Err(Error::InvalidCodeVariant(format!(
                "word length {} leaves no room for data next to {} parity bits",
                word_length,
                parity_positions.len()
            )));
        }

        if let Some(&p) = parity_positions.iter().find(|&&p| p >= word_length) {
            return Err(Error::InvalidCodeVariant(format!(
                "parity position {} is outside a word of {} bits",
                p, word_length
            )));
        }

        if parity_positions.windows(2).any(|w| w[0] >= w[1]) {
            return Err(Error::InvalidCodeVariant(
                "parity positions must be strictly increasing".to_string(),
            ));
        }

        for (i, &p) in parity_positions.iter().enumerate() {
            let expected = (1usize << i) - 1;
            if p != expected {
                return Err(Error::InvalidCodeVariant(format!(
                    "parity position #{} must be at offset {}, found {}",
                    i, expected, p
                )));
            }
        }

        // Every 1-indexed position 1..=n needs a distinct nonzero signature.
        let m = parity_positions.len();
        if m < usize::BITS as usize && (1usize << m) - 1 < word_length {
            return Err(Error::InvalidCodeVariant(format!(
                "{} parity bits cannot locate errors in a word of {} bits",
                m, word_length
            )));
        }

        if vertical_redundancy == 0 {
            return Err(Error::InvalidCodeVariant(
                "at least one vertical parity row is required".to_string(),
            ));
        }

        Ok(CodeVariant {
            word_length,
            data_length: word_length - m,
            parity_positions,
            vertical_redundancy,
        })
    }

    /// Creates a variant with the minimal Hamming parity layout for a word length.
    pub fn hamming(word_length: usize, vertical_redundancy: usize) -> Result<Self> {
        let mut parity_positions = Vec::new();
        while (1usize << parity_positions.len()) - 1 < word_length {
            parity_positions.push((1usize << parity_positions.len()) - 1);
        }
        Self::new(word_length, parity_positions, vertical_redundancy)
    }

    /// Shortens the code to carry only `data_length` information bits per row.
    ///
    /// The remaining data positions are encoded as zeros.
    pub fn with_data_length(mut self, data_length: usize) -> Result<Self> {
        let capacity = self.capacity();
        if data_length == 0 || data_length > capacity {
            return Err(Error::InvalidCodeVariant(format!(
                "data length {} must be in 1..={}",
                data_length, capacity
            )));
        }
        self.data_length = data_length;
        Ok(self)
    }

    /// The (11, 7) row code with a single vertical parity row.
    pub fn standard_11_7() -> Self {
        CodeVariant {
            word_length: 11,
            parity_positions: vec![0, 1, 3, 7],
            data_length: 7,
            vertical_redundancy: 1,
        }
    }

    /// 17-bit rows with five parity bits carrying seven information bits,
    /// and a single vertical parity row.
    pub fn shortened_17_7() -> Self {
        CodeVariant {
            word_length: 17,
            parity_positions: vec![0, 1, 3, 7, 15],
            data_length: 7,
            vertical_redundancy: 1,
        }
    }

    /// Total bits per encoded row
    pub fn word_length(&self) -> usize {
        self.word_length
    }

    /// Zero-based parity offsets
    pub fn parity_positions(&self) -> &[usize] {
        &self.parity_positions
    }

    /// Number of parity bits per row
    pub fn parity_count(&self) -> usize {
        self.parity_positions.len()
    }

    /// Information bits carried per row
    pub fn data_length(&self) -> usize {
        self.data_length
    }

    /// Number of data positions in a row, including shortened padding
    pub fn capacity(&self) -> usize {
        self.word_length - self.parity_positions.len()
    }

    /// Number of vertical parity rows per block
    pub fn vertical_redundancy(&self) -> usize {
        self.vertical_redundancy
    }

    /// Whether the zero-based offset `j` holds a parity bit
    pub fn is_parity_position(&self, j: usize) -> bool {
        self.parity_positions.binary_search(&j).is_ok()
    }

    /// Zero-based offsets that carry information bits, in order
    pub fn data_positions(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.word_length)
            .filter(move |&j| !self.is_parity_position(j))
            .take(self.data_length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_creation() {
        let variant = CodeVariant::new(11, vec![0, 1, 3, 7], 1).unwrap();
        assert_eq!(variant.word_length(), 11);
        assert_eq!(variant.parity_count(), 4);
        assert_eq!(variant.data_length(), 7);
        assert_eq!(variant.vertical_redundancy(), 1);
        assert_eq!(variant, CodeVariant::standard_11_7());
    }

    #[test]
    fn test_hamming_layout() {
        let variant = CodeVariant::hamming(7, 1).unwrap();
        assert_eq!(variant.parity_positions(), &[0, 1, 3]);
        assert_eq!(variant.data_length(), 4);

        let variant = CodeVariant::hamming(17, 2).unwrap();
        assert_eq!(variant.parity_positions(), &[0, 1, 3, 7, 15]);
        assert_eq!(variant.data_length(), 12);
        assert_eq!(variant.vertical_redundancy(), 2);
    }

    #[test]
    fn test_shortened_variant() {
        let variant = CodeVariant::hamming(17, 1)
            .unwrap()
            .with_data_length(7)
            .unwrap();
        assert_eq!(variant, CodeVariant::shortened_17_7());
        assert_eq!(variant.capacity(), 12);
        assert_eq!(
            variant.data_positions().collect::<Vec<_>>(),
            vec![2, 4, 5, 6, 8, 9, 10]
        );

        assert!(CodeVariant::standard_11_7().with_data_length(0).is_err());
        assert!(CodeVariant::standard_11_7().with_data_length(8).is_err());
    }

    #[test]
    fn test_data_positions() {
        let variant = CodeVariant::standard_11_7();
        let positions: Vec<usize> = variant.data_positions().collect();
        assert_eq!(positions, vec![2, 4, 5, 6, 8, 9, 10]);
        assert!(variant.is_parity_position(7));
        assert!(!variant.is_parity_position(8));
    }

    #[test]
    fn test_invalid_variants() {
        // Not increasing
        assert!(matches!(
            CodeVariant::new(11, vec![0, 3, 1, 7], 1),
            Err(Error::InvalidCodeVariant(_))
        ));
        // Out of range
        assert!(matches!(
            CodeVariant::new(7, vec![0, 1, 3, 7], 1),
            Err(Error::InvalidCodeVariant(_))
        ));
        // Not a power-of-two-minus-one layout
        assert!(matches!(
            CodeVariant::new(11, vec![0, 1, 2, 7], 1),
            Err(Error::InvalidCodeVariant(_))
        ));
        // Too few parity bits to locate every position
        assert!(matches!(
            CodeVariant::new(9, vec![0, 1, 3], 1),
            Err(Error::InvalidCodeVariant(_))
        ));
        // No data bits
        assert!(matches!(
            CodeVariant::new(2, vec![0, 1], 1),
            Err(Error::InvalidCodeVariant(_))
        ));
        // No parity bits
        assert!(CodeVariant::new(4, vec![], 1).is_err());
        // No vertical parity rows
        assert!(matches!(
            CodeVariant::new(11, vec![0, 1, 3, 7], 0),
            Err(Error::InvalidCodeVariant(_))
        ));
    }
}
