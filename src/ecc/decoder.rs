//! Iterative row/column decoder.
//!
//! Each pass runs the row code over every data row and then the column
//! corrector over the whole block. Decoding stops at the first pass that
//! changes nothing, or gives up once the iteration bound is reached and
//! hands back the partially corrected block with
//! [`DecodeStatus::MaxIterationsExceeded`].
//!
//! Progress is reported through the `log` facade and, for programmatic
//! consumers, as [`DecodeEvent`]s delivered to a [`DecodeObserver`].

use crate::ecc::block::Block;
use crate::ecc::column::correct_columns_with;
use crate::ecc::hamming::RowCodec;
use crate::ecc::variant::CodeVariant;
use crate::error::{Error, Result};
use log::{debug, trace, warn};
use rayon::prelude::*;

/// Default bound on decoding passes
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// Parameters for configuring the iterative decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderParameters {
    /// Number of changing passes after which decoding gives up
    pub max_iterations: usize,
}

impl Default for DecoderParameters {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

/// Terminal state of a decode call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeStatus {
    /// A full pass changed nothing after `iterations` changing passes
    Converged { iterations: usize },
    /// Every one of `iterations` passes changed the block
    MaxIterationsExceeded { iterations: usize },
}

/// Status of a decode call along with correction counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOutcome {
    pub status: DecodeStatus,
    /// Bits flipped by the row code, over all passes
    pub row_corrections: usize,
    /// Bits flipped by the column corrector, over all passes
    pub column_corrections: usize,
}

impl DecodeOutcome {
    pub fn is_converged(&self) -> bool {
        matches!(self.status, DecodeStatus::Converged { .. })
    }
}

/// Something that happened during decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeEvent {
    /// The row code flipped `bit` of data row `row`
    RowCorrected {
        iteration: usize,
        row: usize,
        bit: usize,
    },
    /// The column corrector flipped `column` of the last row
    ColumnCorrected { iteration: usize, column: usize },
    /// A pass finished
    PassCompleted { iteration: usize, changed: bool },
}

/// Receives [`DecodeEvent`]s as decoding proceeds.
pub trait DecodeObserver {
    fn on_event(&mut self, event: &DecodeEvent);
}

impl<F> DecodeObserver for F
where
    F: FnMut(&DecodeEvent),
{
    fn on_event(&mut self, event: &DecodeEvent) {
        self(event)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DecoderState {
    Running(usize),
    Converged(usize),
    MaxIterationsExceeded(usize),
}

/// Alternating row/column decoder for one code variant.
#[derive(Debug, Clone)]
pub struct IterativeDecoder {
    codec: RowCodec,
    params: DecoderParameters,
}

impl IterativeDecoder {
    /// Creates a decoder for `variant`.
    ///
    /// Fails if `params.max_iterations` is zero.
    pub fn new(variant: &CodeVariant, params: DecoderParameters) -> Result<Self> {
        if params.max_iterations == 0 {
            return Err(Error::InvalidInput(
                "max_iterations must be positive".to_string(),
            ));
        }

        Ok(IterativeDecoder {
            codec: RowCodec::new(variant),
            params,
        })
    }

    /// The variant this decoder corrects
    pub fn variant(&self) -> &CodeVariant {
        self.codec.variant()
    }

    /// The decoder's parameters
    pub fn params(&self) -> &DecoderParameters {
        &self.params
    }

    /// Decodes a block in place.
    pub fn decode(&self, block: &mut Block) -> Result<DecodeOutcome> {
        self.decode_with_observer(block, &mut |_: &DecodeEvent| {})
    }

    /// Decodes a block by value, returning it with the outcome.
    pub fn decode_owned(&self, mut block: Block) -> Result<(Block, DecodeOutcome)> {
        let outcome = self.decode(&mut block)?;
        Ok((block, outcome))
    }

    /// Decodes a block in place, reporting every correction to `observer`.
    ///
    /// # Returns
    ///
    /// The outcome, or [`Error::ShapeMismatch`] if the block was not produced
    /// for this decoder's variant. The block is not touched on error.
    pub fn decode_with_observer(
        &self,
        block: &mut Block,
        observer: &mut dyn DecodeObserver,
    ) -> Result<DecodeOutcome> {
        self.check_shape(block)?;

        let mut row_corrections = 0;
        let mut column_corrections = 0;
        let mut state = DecoderState::Running(0);

        loop {
            state = match state {
                DecoderState::Running(iteration) => {
                    let (rows, columns) = self.pass(block, iteration, observer)?;
                    row_corrections += rows;
                    column_corrections += columns;

                    let changed = rows + columns > 0;
                    observer.on_event(&DecodeEvent::PassCompleted { iteration, changed });
                    debug!(
                        "pass {}: {} row and {} column corrections",
                        iteration, rows, columns
                    );

                    if !changed {
                        DecoderState::Converged(iteration)
                    } else if iteration + 1 >= self.params.max_iterations {
                        DecoderState::MaxIterationsExceeded(iteration + 1)
                    } else {
                        DecoderState::Running(iteration + 1)
                    }
                }
                DecoderState::Converged(iterations) => {
                    debug!("decoding converged after {} iterations", iterations);
                    return Ok(DecodeOutcome {
                        status: DecodeStatus::Converged { iterations },
                        row_corrections,
                        column_corrections,
                    });
                }
                DecoderState::MaxIterationsExceeded(iterations) => {
                    warn!(
                        "decoding did not converge within {} iterations",
                        iterations
                    );
                    return Ok(DecodeOutcome {
                        status: DecodeStatus::MaxIterationsExceeded { iterations },
                        row_corrections,
                        column_corrections,
                    });
                }
            };
        }
    }

    /// Decodes independent blocks in parallel.
    ///
    /// Results are returned in the order of `blocks`.
    pub fn decode_batch(&self, blocks: &mut [Block]) -> Vec<Result<DecodeOutcome>> {
        blocks
            .par_iter_mut()
            .map(|block| self.decode(block))
            .collect()
    }

    fn check_shape(&self, block: &Block) -> Result<()> {
        let variant = self.codec.variant();
        if block.width() != variant.word_length() {
            return Err(Error::ShapeMismatch(format!(
                "rows are {} bits wide, expected {}",
                block.width(),
                variant.word_length()
            )));
        }
        if block.redundancy_rows() != variant.vertical_redundancy() {
            return Err(Error::ShapeMismatch(format!(
                "block has {} vertical parity rows, expected {}",
                block.redundancy_rows(),
                variant.vertical_redundancy()
            )));
        }
        Ok(())
    }

    /// One row pass followed by one column pass; returns the flip counts.
    fn pass(
        &self,
        block: &mut Block,
        iteration: usize,
        observer: &mut dyn DecodeObserver,
    ) -> Result<(usize, usize)> {
        let data_rows = block.data_rows();

        let mut rows = 0;
        for (index, row) in block.rows_mut()[..data_rows].iter_mut().enumerate() {
            if let Some(bit) = self.codec.correct(row)? {
                trace!("iteration {}: row {} bit {} corrected", iteration, index, bit);
                observer.on_event(&DecodeEvent::RowCorrected {
                    iteration,
                    row: index,
                    bit,
                });
                rows += 1;
            }
        }

        let mut columns = 0;
        correct_columns_with(block, |column| {
            trace!("iteration {}: column {} corrected", iteration, column);
            observer.on_event(&DecodeEvent::ColumnCorrected { iteration, column });
            columns += 1;
        });

        Ok((rows, columns))
    }
}
