use bitvec::prelude::*;
use hamming2d::ecc::{
    BinarySymmetricChannel, CodeVariant, DecodeStatus, DecoderParameters, NoiseSource,
    ProductCode, DATA_ROWS_17_7,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

const NOISE_PROBABILITY: f64 = 0.025;

fn main() -> hamming2d::Result<()> {
    let seed: u64 = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(2024);
    let mut rng = ChaCha20Rng::seed_from_u64(seed);

    let variant = CodeVariant::shortened_17_7();
    let code = ProductCode::new(variant.clone(), DATA_ROWS_17_7, DecoderParameters::default())?;

    let data: Vec<BitVec<u8, Msb0>> = (0..DATA_ROWS_17_7)
        .map(|_| (0..variant.data_length()).map(|_| rng.gen_bool(0.5)).collect())
        .collect();

    let encoded = code.encode(&data)?;
    println!("Encoded block:\n{}", encoded);

    let mut block = encoded.clone();
    let mut channel = BinarySymmetricChannel::with_seed(NOISE_PROBABILITY, seed)?;
    let flipped = channel.apply(&mut block);
    println!("Noisy block ({} bits flipped):\n{}", flipped, block);

    let outcome = code.decode(&mut block)?;
    println!("Decoded block:\n{}", block);

    match outcome.status {
        DecodeStatus::Converged { iterations } => println!(
            "Converged after {} iterations ({} row, {} column corrections)",
            iterations, outcome.row_corrections, outcome.column_corrections
        ),
        DecodeStatus::MaxIterationsExceeded { iterations } => {
            println!("Gave up after {} iterations", iterations)
        }
    }

    let recovered = code.extract(&block)?;
    let wrong_rows = recovered
        .iter()
        .zip(&data)
        .filter(|(got, want)| got != want)
        .count();
    println!(
        "{} of {} data rows recovered",
        DATA_ROWS_17_7 - wrong_rows,
        DATA_ROWS_17_7
    );

    Ok(())
}
