use bitvec::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hamming2d::ecc::{
    BinarySymmetricChannel, CodeVariant, DecoderParameters, NoiseSource, ProductCode,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

fn random_data(rows: usize, bits: usize, seed: u64) -> Vec<BitVec<u8, Msb0>> {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    (0..rows)
        .map(|_| (0..bits).map(|_| rng.gen_bool(0.5)).collect())
        .collect()
}

fn variants() -> Vec<(&'static str, CodeVariant)> {
    vec![
        ("11_7", CodeVariant::standard_11_7()),
        ("17_7", CodeVariant::shortened_17_7()),
        ("31_26", CodeVariant::hamming(31, 1).unwrap()),
    ]
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("product_encode");
    for (name, variant) in variants() {
        let code = ProductCode::new(variant.clone(), 32, DecoderParameters::default()).unwrap();
        let data = random_data(32, variant.data_length(), 1);
        group.bench_with_input(BenchmarkId::from_parameter(name), &data, |b, data| {
            b.iter(|| code.encode(black_box(data.as_slice())).unwrap())
        });
    }
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("product_decode");
    for (name, variant) in variants() {
        let code = ProductCode::new(variant.clone(), 32, DecoderParameters::default()).unwrap();
        let mut noisy = code
            .encode(&random_data(32, variant.data_length(), 2))
            .unwrap();
        BinarySymmetricChannel::with_seed(0.01, 3)
            .unwrap()
            .apply(&mut noisy);

        group.bench_with_input(BenchmarkId::from_parameter(name), &noisy, |b, noisy| {
            b.iter(|| {
                let mut block = noisy.clone();
                code.decode(black_box(&mut block)).unwrap()
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode);
criterion_main!(benches);
