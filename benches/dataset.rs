use criterion::{black_box, criterion_group, criterion_main, Criterion};

use molgraph::{smiles_to_graph, Batch, CollatedStorage, Device, EdgeMode, GraphRecord};

const CAFFEINE: &str = "Cn1cnc2c1c(=O)n(C)c(=O)n2C";

const TABLE: &[&str] = &[
    "CCO",
    "c1ccccc1",
    "CC(=O)Nc1ccc(O)cc1",
    "Cn1cnc2c1c(=O)n(C)c(=O)n2C",
    "CC(C)Cc1ccc(cc1)C(C)C(=O)O",
    "O=C(O)c1ccccc1OC(C)=O",
    "c1ccc2ccccc2c1",
    "CN1CCC[C@H]1c1cccnc1",
];

fn records(mode: EdgeMode) -> Vec<GraphRecord> {
    TABLE
        .iter()
        .cycle()
        .take(256)
        .map(|s| smiles_to_graph(s, vec![1.0], mode).unwrap())
        .collect()
}

fn bench_convert(c: &mut Criterion) {
    let mut group = c.benchmark_group("smiles_to_graph");
    group.bench_function("adjacency", |b| {
        b.iter(|| {
            black_box(smiles_to_graph(black_box(CAFFEINE), vec![1.0], EdgeMode::AdjacencyOnly).unwrap())
        })
    });
    group.bench_function("bonds", |b| {
        b.iter(|| {
            black_box(
                smiles_to_graph(black_box(CAFFEINE), vec![1.0], EdgeMode::WithBondFeatures).unwrap(),
            )
        })
    });
    group.finish();
}

fn bench_collate(c: &mut Criterion) {
    let records = records(EdgeMode::WithBondFeatures);
    let storage = CollatedStorage::collate(&records, EdgeMode::WithBondFeatures);

    let mut group = c.benchmark_group("collate");
    group.bench_function("storage_256", |b| {
        b.iter(|| black_box(CollatedStorage::collate(black_box(&records), EdgeMode::WithBondFeatures)))
    });
    group.bench_function("get_all", |b| {
        b.iter(|| {
            for i in 0..storage.len() {
                black_box(storage.get(i));
            }
        })
    });
    group.bench_function("batch_64", |b| {
        b.iter(|| black_box(Batch::from_records(black_box(&records[..64]), Device::Cpu)))
    });
    group.finish();
}

criterion_group!(benches, bench_convert, bench_collate);
criterion_main!(benches);
