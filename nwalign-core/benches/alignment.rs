use criterion::{black_box, criterion_group, criterion_main, Criterion};
use nwalign_core::{align, expand, CostModel, Limits};

const MAX_LEN: usize = 1 << 20;

fn bench_expand(c: &mut Criterion) {
    // Ten doubling steps: 8 symbols -> 8192.
    let positions = vec![3usize, 6, 1, 0, 5, 11, 2, 7, 4, 9];

    c.bench_function("expand_8k", |b| {
        b.iter(|| {
            let out = expand(black_box(b"ACACACTA"), black_box(&positions), MAX_LEN);
            black_box(out)
        })
    });
}

fn bench_align(c: &mut Criterion) {
    let s1 = expand(b"ACACACTA", &[3, 6, 1, 0, 5, 11], MAX_LEN).unwrap();
    let s2 = expand(b"TATTATAACC", &[1, 2, 9, 0, 4], MAX_LEN).unwrap();
    assert_eq!(s1.len(), 512);
    assert_eq!(s2.len(), 320);

    let model = CostModel::default();
    let limits = Limits::default();

    c.bench_function("align_512x320", |b| {
        b.iter(|| {
            let result = align(black_box(&s1), black_box(&s2), &model, &limits);
            black_box(result)
        })
    });
}

criterion_group!(benches, bench_expand, bench_align);
criterion_main!(benches);
