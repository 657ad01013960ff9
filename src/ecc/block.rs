//! Blocks of encoded rows and the vertical parity assembler.
//!
//! A [`Block`] stacks `data_rows` row-encoded words on top of one or more
//! vertical parity rows. Every parity row holds the column-wise XOR of all
//! data rows.

use crate::ecc::hamming::Row;
use crate::ecc::variant::CodeVariant;
use crate::error::{Error, Result};
use bitvec::prelude::*;
use std::fmt;

/// A rectangular block of encoded rows followed by vertical parity rows.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Block {
    rows: Vec<Row>,
    data_rows: usize,
}

impl Block {
    /// Builds a block from raw rows, the first `data_rows` of which carry data.
    ///
    /// All rows must share one width and at least one row must remain for
    /// vertical parity.
    pub fn from_rows(rows: Vec<Row>, data_rows: usize) -> Result<Self> {
        if data_rows == 0 || rows.is_empty() {
            return Err(Error::EmptyBlock);
        }

        if data_rows >= rows.len() {
            return Err(Error::ShapeMismatch(format!(
                "{} rows leave no vertical parity row after {} data rows",
                rows.len(),
                data_rows
            )));
        }

        let width = rows[0].len();
        if let Some(row) = rows.iter().find(|row| row.len() != width) {
            return Err(Error::LengthMismatch {
                expected: width,
                actual: row.len(),
            });
        }

        Ok(Block { rows, data_rows })
    }

    /// Total number of rows, data and parity
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Bits per row
    pub fn width(&self) -> usize {
        self.rows[0].len()
    }

    /// Number of rows carrying row-encoded data
    pub fn data_rows(&self) -> usize {
        self.data_rows
    }

    /// Number of vertical parity rows
    pub fn redundancy_rows(&self) -> usize {
        self.rows.len() - self.data_rows
    }

    /// All rows, data rows first
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// The row at `index`, if any
    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// The row-encoded data rows
    pub fn data(&self) -> &[Row] {
        &self.rows[..self.data_rows]
    }

    /// The vertical parity rows
    pub fn parity(&self) -> &[Row] {
        &self.rows[self.data_rows..]
    }

    /// Reads one bit, `None` when out of range
    pub fn get(&self, row: usize, col: usize) -> Option<bool> {
        self.rows.get(row).and_then(|r| r.get(col).map(|bit| *bit))
    }

    /// Inverts one bit in place.
    pub fn flip(&mut self, row: usize, col: usize) -> Result<()> {
        let height = self.height();
        let width = self.width();
        let target = self
            .rows
            .get_mut(row)
            .and_then(|r| r.get_mut(col))
            .ok_or_else(|| {
                Error::InvalidInput(format!(
                    "bit ({}, {}) is outside a {}x{} block",
                    row, col, height, width
                ))
            })?;
        let current = *target;
        target.commit(!current);
        Ok(())
    }

    /// Consumes the block, returning its rows.
    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    pub(crate) fn rows_mut(&mut self) -> &mut [Row] {
        &mut self.rows
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            let line: Vec<&str> = row
                .iter()
                .by_vals()
                .map(|bit| if bit { "1" } else { "0" })
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

/// Column-wise XOR of `rows`, all of which must have `width` bits.
pub fn column_parity<'a, I>(rows: I, width: usize) -> Row
where
    I: IntoIterator<Item = &'a Row>,
{
    let mut parity = bitvec![u8, Msb0; 0; width];
    for row in rows {
        for (mut acc, bit) in parity.iter_mut().zip(row.iter().by_vals()) {
            *acc ^= bit;
        }
    }
    parity
}

/// Appends the variant's vertical parity rows to a set of encoded rows.
///
/// # Arguments
///
/// * `variant` - Code variant fixing the row width and redundancy count
/// * `encoded_rows` - Row-encoded data, each `word_length` bits
///
/// # Returns
///
/// A block of `encoded_rows.len() + vertical_redundancy` rows
pub fn assemble(variant: &CodeVariant, encoded_rows: Vec<Row>) -> Result<Block> {
    if encoded_rows.is_empty() {
        return Err(Error::EmptyBlock);
    }

    let width = variant.word_length();
    if let Some(row) = encoded_rows.iter().find(|row| row.len() != width) {
        return Err(Error::LengthMismatch {
            expected: width,
            actual: row.len(),
        });
    }

    let data_rows = encoded_rows.len();
    let parity = column_parity(&encoded_rows, width);

    let mut rows = encoded_rows;
    rows.extend(std::iter::repeat(parity).take(variant.vertical_redundancy()));

    Ok(Block { rows, data_rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecc::hamming::RowCodec;

    fn encoded_rows(variant: &CodeVariant) -> Vec<Row> {
        let codec = RowCodec::new(variant);
        vec![
            codec.encode(bits![u8, Msb0; 1, 0, 1, 1, 0, 0, 1]).unwrap(),
            codec.encode(bits![u8, Msb0; 0, 1, 1, 0, 1, 0, 0]).unwrap(),
            codec.encode(bits![u8, Msb0; 1, 1, 1, 0, 0, 1, 0]).unwrap(),
        ]
    }

    #[test]
    fn test_assemble_single_parity_row() {
        let variant = CodeVariant::standard_11_7();
        let rows = encoded_rows(&variant);
        let block = assemble(&variant, rows.clone()).unwrap();

        assert_eq!(block.height(), 4);
        assert_eq!(block.width(), 11);
        assert_eq!(block.data_rows(), 3);
        assert_eq!(block.redundancy_rows(), 1);
        assert_eq!(block.data(), &rows[..]);

        for col in 0..11 {
            let expected = rows.iter().fold(false, |acc, r| acc ^ r[col]);
            assert_eq!(block.get(3, col), Some(expected));
        }
    }

    #[test]
    fn test_assemble_repeats_parity_rows() {
        let variant = CodeVariant::hamming(11, 3).unwrap();
        let block = assemble(&variant, encoded_rows(&variant)).unwrap();

        assert_eq!(block.height(), 6);
        assert_eq!(block.parity().len(), 3);
        assert!(block.parity().iter().all(|row| row == &block.parity()[0]));
    }

    #[test]
    fn test_assemble_errors() {
        let variant = CodeVariant::standard_11_7();
        assert_eq!(assemble(&variant, Vec::new()), Err(Error::EmptyBlock));

        let short = vec![bitvec![u8, Msb0; 0; 10]];
        assert_eq!(
            assemble(&variant, short),
            Err(Error::LengthMismatch {
                expected: 11,
                actual: 10
            })
        );
    }

    #[test]
    fn test_from_rows_validation() {
        let rows = vec![bitvec![u8, Msb0; 0; 4]; 3];
        assert!(Block::from_rows(rows.clone(), 2).is_ok());
        assert_eq!(Block::from_rows(rows.clone(), 0), Err(Error::EmptyBlock));
        assert!(matches!(
            Block::from_rows(rows, 3),
            Err(Error::ShapeMismatch(_))
        ));

        let ragged = vec![bitvec![u8, Msb0; 0; 4], bitvec![u8, Msb0; 0; 5]];
        assert!(matches!(
            Block::from_rows(ragged, 1),
            Err(Error::LengthMismatch { .. })
        ));
    }

    #[test]
    fn test_flip_and_display() {
        let mut block = Block::from_rows(vec![bitvec![u8, Msb0; 0; 3]; 2], 1).unwrap();
        block.flip(0, 1).unwrap();
        assert_eq!(block.get(0, 1), Some(true));
        assert_eq!(block.to_string(), "0 1 0\n0 0 0\n");

        assert!(block.flip(2, 0).is_err());
        assert!(block.flip(0, 3).is_err());
        assert_eq!(block.get(5, 0), None);
    }
}
