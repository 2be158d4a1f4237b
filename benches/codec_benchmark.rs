use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use fieldrs::field::BinaryField;
use fieldrs::reed_solomon::ReedSolomon;
use std::hint::black_box;

fn gf256_codec(message_len: usize, ecc_len: usize) -> ReedSolomon<BinaryField> {
    let field = BinaryField::new(0x11D).unwrap();
    ReedSolomon::new(field, 0x02, message_len, ecc_len).unwrap()
}

fn sample_message(len: usize) -> Vec<u32> {
    (0..len).map(|i| (i * 37 + 11) as u32 % 256).collect()
}

/// Encoding cost as the ECC length grows
fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");
    for &(message_len, ecc_len) in &[(16usize, 4usize), (64, 16), (223, 32)] {
        let rs = gf256_codec(message_len, ecc_len);
        let message = sample_message(message_len);
        group.bench_with_input(
            BenchmarkId::new("gf256", format!("{}+{}", message_len, ecc_len)),
            &message,
            |b, message| b.iter(|| rs.encode(black_box(message)).unwrap()),
        );
    }
    group.finish();
}

/// Clean decode only computes syndromes; corrupted decode runs the full pipeline
fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");
    for &(message_len, ecc_len) in &[(16usize, 4usize), (64, 16), (223, 32)] {
        let rs = gf256_codec(message_len, ecc_len);
        let codeword = rs.encode(&sample_message(message_len)).unwrap();
        let label = format!("{}+{}", message_len, ecc_len);

        group.bench_with_input(BenchmarkId::new("clean", &label), &codeword, |b, cw| {
            b.iter(|| rs.decode(black_box(cw)).unwrap())
        });

        let mut corrupted = codeword.clone();
        let step = corrupted.len() / rs.max_correctable();
        for pos in (0..corrupted.len()).step_by(step).take(rs.max_correctable()) {
            corrupted[pos] ^= 0x5A;
        }
        group.bench_with_input(
            BenchmarkId::new("max_errors", &label),
            &corrupted,
            |b, cw| b.iter(|| rs.decode(black_box(cw)).unwrap()),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode);
criterion_main!(benches);
