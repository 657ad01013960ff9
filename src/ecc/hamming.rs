//! Hamming row code.
//!
//! Each row of a block is protected by a single-error-correcting Hamming code
//! laid out by a [`CodeVariant`]: information bits fill the non-parity
//! positions in order and every parity position `p` stores the XOR of all
//! bits `j` with `(j + 1) & (p + 1) != 0`.
//!
//! Decoding recomputes each check against the current row contents and sums
//! `p + 1` over the failing checks. A nonzero sum within the word names the
//! 1-indexed bit to flip. Two or more errors in one row may be "corrected"
//! into a different codeword; that is the boundary of any single-error
//! correcting code.

use crate::ecc::variant::CodeVariant;
use crate::error::{Error, Result};
use bitvec::prelude::*;

/// One encoded row of a block.
pub type Row = BitVec<u8, Msb0>;

/// Encoder and single-error corrector for the rows of a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowCodec {
    variant: CodeVariant,
}

impl RowCodec {
    /// Creates a row codec for the given variant.
    pub fn new(variant: &CodeVariant) -> Self {
        RowCodec {
            variant: variant.clone(),
        }
    }

    /// The variant this codec encodes
    pub fn variant(&self) -> &CodeVariant {
        &self.variant
    }

    /// Encodes exactly `data_length` information bits into a row.
    ///
    /// # Arguments
    ///
    /// * `data` - Information bits of one row
    ///
    /// # Returns
    ///
    /// A row of `word_length` bits, or [`Error::LengthMismatch`]
    pub fn encode(&self, data: &BitSlice<u8, Msb0>) -> Result<Row> {
        if data.len() != self.variant.data_length() {
            return Err(Error::LengthMismatch {
                expected: self.variant.data_length(),
                actual: data.len(),
            });
        }

        let mut row = bitvec![u8, Msb0; 0; self.variant.word_length()];
        for (pos, bit) in self.variant.data_positions().zip(data.iter().by_vals()) {
            row.set(pos, bit);
        }

        // The parity slot is still zero here, so including it is harmless.
        for &p in self.variant.parity_positions() {
            let parity = self.check(&row, p);
            row.set(p, parity);
        }

        Ok(row)
    }

    /// Computes the error position of a row without modifying it.
    ///
    /// Returns 0 when every check passes. A value in `1..=word_length` is the
    /// 1-indexed position of a single flipped bit; anything larger cannot be
    /// mapped onto the row.
    pub fn syndrome(&self, row: &BitSlice<u8, Msb0>) -> Result<usize> {
        self.check_length(row)?;
        Ok(self.error_position(row))
    }

    /// Corrects at most one bit of `row` in place.
    ///
    /// # Returns
    ///
    /// The zero-based index of the flipped bit, or `None` when the row was
    /// left untouched.
    pub fn correct(&self, row: &mut BitSlice<u8, Msb0>) -> Result<Option<usize>> {
        self.check_length(row)?;

        let position = self.error_position(row);
        if position == 0 || position > self.variant.word_length() {
            return Ok(None);
        }

        let bit = position - 1;
        let current = row[bit];
        row.set(bit, !current);
        Ok(Some(bit))
    }

    /// Decodes a row in place, reporting whether a bit was changed.
    pub fn decode(&self, row: &mut BitSlice<u8, Msb0>) -> Result<bool> {
        Ok(self.correct(row)?.is_some())
    }

    /// Extracts the information bits carried by a row.
    pub fn extract(&self, row: &BitSlice<u8, Msb0>) -> Result<BitVec<u8, Msb0>> {
        self.check_length(row)?;
        Ok(self.variant.data_positions().map(|pos| row[pos]).collect())
    }

    fn check_length(&self, row: &BitSlice<u8, Msb0>) -> Result<()> {
        if row.len() != self.variant.word_length() {
            return Err(Error::LengthMismatch {
                expected: self.variant.word_length(),
                actual: row.len(),
            });
        }
        Ok(())
    }

    /// XOR of every bit covered by the parity check at offset `p`
    fn check(&self, row: &BitSlice<u8, Msb0>, p: usize) -> bool {
        let mask = p + 1;
        row.iter()
            .by_vals()
            .enumerate()
            .filter(|&(j, _)| (j + 1) & mask != 0)
            .fold(false, |acc, (_, bit)| acc ^ bit)
    }

    fn error_position(&self, row: &BitSlice<u8, Msb0>) -> usize {
        self.variant
            .parity_positions()
            .iter()
            .filter(|&&p| self.check(row, p))
            .map(|&p| p + 1)
            .sum()
    }
}
