use criterion::*;
use symcomp::*;

fn filled(frame: &FrameRef, nid: usize, spec: SymmetrySpec) -> Components<f64> {
    let mut comp = Components::with_symmetry(frame.clone(), nid, 0, spec).unwrap();
    let indices: Vec<_> = comp.canonical_index_range().collect();
    for (k, ind) in indices.iter().enumerate() {
        comp.set(ind, 1.0 + k as f64).unwrap();
    }
    comp
}

fn self_contract(c: &mut Criterion) {
    let mut group = c.benchmark_group("self_contract");
    for &n in &[2, 4, 8, 16] {
        let frame = FrameRef::new(Basis::new("e", n));
        let plain = filled(&frame, 3, SymmetrySpec::none(3));
        let sym = filled(&frame, 3, SymmetrySpec::fully_symmetric(3));
        group.bench_with_input(BenchmarkId::new("plain", n), &plain, |bench, a| {
            bench.iter(|| a.self_contract(0, 2).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("fully_sym", n), &sym, |bench, a| {
            bench.iter(|| a.self_contract(0, 2).unwrap())
        });
    }
}

fn symmetrize(c: &mut Criterion) {
    let mut group = c.benchmark_group("symmetrize");
    for &n in &[2, 4, 8] {
        let frame = FrameRef::new(Basis::new("e", n));
        let a = filled(&frame, 3, SymmetrySpec::none(3));
        group.bench_with_input(BenchmarkId::new("sym", n), &a, |bench, a| {
            bench.iter(|| a.symmetrize(None).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("antisym", n), &a, |bench, a| {
            bench.iter(|| a.antisymmetrize(None).unwrap())
        });
    }
}

criterion_group!(contraction, self_contract, symmetrize);
criterion_main!(contraction);
