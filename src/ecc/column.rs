//! Column parity corrector.
//!
//! For each column the corrector XORs every data row with the first vertical
//! parity row. A nonzero result flips that column's bit in the last row of
//! the block. With a single parity row the checked row and the corrected row
//! coincide; with more than one, only the first is checked and only the last
//! is written.

use crate::ecc::block::Block;

/// Re-checks column parity and repairs mismatches in place.
///
/// # Returns
///
/// `true` if any bit of the block was flipped
pub fn correct_columns(block: &mut Block) -> bool {
    correct_columns_with(block, |_| {})
}

/// Like [`correct_columns`], calling `on_flip` with each corrected column.
pub fn correct_columns_with<F>(block: &mut Block, mut on_flip: F) -> bool
where
    F: FnMut(usize),
{
    let data_rows = block.data_rows();
    let width = block.width();
    let rows = block.rows_mut();
    let last = rows.len() - 1;

    let mut changed = false;
    for col in 0..width {
        let syndrome = rows[..=data_rows]
            .iter()
            .fold(false, |acc, row| acc ^ row[col]);

        if syndrome {
            let current = rows[last][col];
            rows[last].set(col, !current);
            on_flip(col);
            changed = true;
        }
    }

    changed
}
