pub mod ecc;
pub mod error;

pub use ecc::{Block, CodeVariant, DecodeStatus, IterativeDecoder, ProductCode};
pub use error::{Error, Result};
