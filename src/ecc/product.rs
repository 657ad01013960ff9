//! Two-dimensional product code pipeline.
//!
//! [`ProductCode`] ties the components together for a fixed number of data
//! rows: raw bit matrix → row encoding → vertical parity → (noise) →
//! iterative decoding → information bits.

use crate::ecc::block::{assemble, Block};
use crate::ecc::decoder::{DecodeObserver, DecodeOutcome, DecoderParameters, IterativeDecoder};
use crate::ecc::hamming::RowCodec;
use crate::ecc::variant::CodeVariant;
use crate::error::{Error, Result};
use bitvec::prelude::*;

/// Encoder and decoder for blocks of `data_rows` rows of one variant.
#[derive(Debug, Clone)]
pub struct ProductCode {
    codec: RowCodec,
    decoder: IterativeDecoder,
    data_rows: usize,
}

impl ProductCode {
    /// Creates a product code.
    ///
    /// # Arguments
    ///
    /// * `variant` - Row code and vertical redundancy
    /// * `data_rows` - Number of information rows per block
    /// * `params` - Iterative decoder parameters
    pub fn new(variant: CodeVariant, data_rows: usize, params: DecoderParameters) -> Result<Self> {
        if data_rows == 0 {
            return Err(Error::EmptyBlock);
        }

        Ok(ProductCode {
            decoder: IterativeDecoder::new(&variant, params)?,
            codec: RowCodec::new(&variant),
            data_rows,
        })
    }

    /// The variant in use
    pub fn variant(&self) -> &CodeVariant {
        self.codec.variant()
    }

    /// Number of information rows per block
    pub fn data_rows(&self) -> usize {
        self.data_rows
    }

    /// Encodes a `data_rows x data_length` bit matrix into a block.
    pub fn encode<R>(&self, data: &[R]) -> Result<Block>
    where
        R: AsRef<BitSlice<u8, Msb0>>,
    {
        if data.len() != self.data_rows {
            return Err(Error::ShapeMismatch(format!(
                "expected {} data rows, got {}",
                self.data_rows,
                data.len()
            )));
        }

        let rows = data
            .iter()
            .map(|row| self.codec.encode(row.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        assemble(self.codec.variant(), rows)
    }

    /// Decodes a block in place.
    pub fn decode(&self, block: &mut Block) -> Result<DecodeOutcome> {
        self.check_rows(block)?;
        self.decoder.decode(block)
    }

    /// Decodes a block in place, reporting progress to `observer`.
    pub fn decode_with_observer(
        &self,
        block: &mut Block,
        observer: &mut dyn DecodeObserver,
    ) -> Result<DecodeOutcome> {
        self.check_rows(block)?;
        self.decoder.decode_with_observer(block, observer)
    }

    /// Returns the information bits of every data row.
    pub fn extract(&self, block: &Block) -> Result<Vec<BitVec<u8, Msb0>>> {
        self.check_rows(block)?;
        block
            .data()
            .iter()
            .map(|row| self.codec.extract(row))
            .collect()
    }

    fn check_rows(&self, block: &Block) -> Result<()> {
        if block.data_rows() != self.data_rows {
            return Err(Error::ShapeMismatch(format!(
                "block has {} data rows, expected {}",
                block.data_rows(),
                self.data_rows
            )));
        }
        Ok(())
    }
}
