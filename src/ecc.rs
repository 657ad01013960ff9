//! Two-dimensional Hamming product code.
//!
//! This module provides a systematic block code built from:
//! - Hamming row codes that locate and correct one flipped bit per row
//! - Vertical parity rows holding the column-wise XOR of all data rows
//! - An iterative decoder alternating row and column correction until the
//!   block stops changing or an iteration bound is reached
//!
//! All parameters of a code live in a [`CodeVariant`], so the (11, 7), the
//! shortened (17, 7) and any other Hamming layout share one implementation.
//!
//! # Examples
//!
//! ```rust
//! use bitvec::prelude::*;
//! use hamming2d::ecc::{CodeVariant, DecodeStatus, DecoderParameters, ProductCode};
//!
//! let code = ProductCode::new(CodeVariant::standard_11_7(), 2, DecoderParameters::default())
//!     .unwrap();
//! let data = vec![
//!     bitvec![u8, Msb0; 1, 0, 1, 1, 0, 0, 1],
//!     bitvec![u8, Msb0; 0, 1, 1, 0, 1, 0, 0],
//! ];
//!
//! let mut block = code.encode(&data).unwrap();
//! block.flip(1, 4).unwrap();
//!
//! let outcome = code.decode(&mut block).unwrap();
//! assert_eq!(outcome.status, DecodeStatus::Converged { iterations: 1 });
//! assert_eq!(code.extract(&block).unwrap(), data);
//! ```

pub use crate::error::Result;

/// A channel that corrupts blocks before they are decoded.
pub trait NoiseSource {
    /// Corrupts `block` in place, returning the number of flipped bits.
    fn apply(&mut self, block: &mut Block) -> usize;
}

/// Code variant descriptor
pub mod variant;
pub use variant::{CodeVariant, DATA_ROWS_17_7};

/// Hamming row codec
pub mod hamming;
pub use hamming::{Row, RowCodec};

/// Blocks and vertical parity
pub mod block;
pub use block::{assemble, column_parity, Block};

pub mod column;
pub use column::{correct_columns, correct_columns_with};

/// Iterative row/column decoding
pub mod decoder;
pub use decoder::{
    DecodeEvent, DecodeObserver, DecodeOutcome, DecodeStatus, DecoderParameters,
    IterativeDecoder, DEFAULT_MAX_ITERATIONS,
};

pub mod channel;
pub use channel::BinarySymmetricChannel;

pub mod product;
pub use product::ProductCode;
