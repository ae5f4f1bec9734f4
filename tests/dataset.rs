use std::fs;
use std::path::Path;

use molgraph::cache::staging_path;
use molgraph::{
    DatasetConfig, EdgeMode, Error, MoleculeDataset, Origin, ParseErrorPolicy, RowError,
    TableSchema,
};
use tempfile::TempDir;

fn setup(table: &str) -> (TempDir, DatasetConfig) {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("raw/molecules.csv");
    fs::create_dir_all(source.parent().unwrap()).unwrap();
    fs::write(&source, table).unwrap();
    let config = DatasetConfig {
        source,
        cache: dir.path().join("processed/molecules.bin"),
        ..DatasetConfig::default()
    };
    (dir, config)
}

fn assert_no_cache(cache: &Path) {
    assert!(!cache.exists(), "cache should not exist");
    assert!(!staging_path(cache).exists(), "staging file left behind");
}

#[test]
fn ethanol_and_water() {
    let (_dir, config) = setup("smiles,label\nCCO,1\nO,0\n");
    let dataset = MoleculeDataset::load_or_build(&config).unwrap();

    assert_eq!(dataset.len(), 2);
    assert!(config.cache.exists());
    assert!(matches!(dataset.origin(), Origin::Built(r) if r.rows == 2 && r.skipped.is_empty()));

    let ethanol = dataset.get(0).unwrap();
    assert_eq!(ethanol.x_shape(), [3, 5]);
    assert_eq!(ethanol.smiles, "CCO");
    assert_eq!(ethanol.y, vec![1.0]);

    let water = dataset.get(1).unwrap();
    assert_eq!(water.x_shape(), [1, 5]);
    assert_eq!(water.num_edges(), 0);
    assert_eq!(water.y, vec![0.0]);

    assert!(dataset.get(2).is_none());
    assert_eq!(dataset.num_classes(), 2);
}

#[test]
fn second_load_uses_the_cache_only() {
    let (_dir, config) = setup("smiles,label\nCCO,1\nO,0\nc1ccccc1,1\n");
    let built = MoleculeDataset::load_or_build(&config).unwrap();

    // Without a source table a rebuild would fail, so success proves the
    // parser was never invoked.
    fs::remove_file(&config.source).unwrap();
    let loaded = MoleculeDataset::load_or_build(&config).unwrap();

    assert_eq!(loaded.origin(), &Origin::Cached);
    assert_eq!(loaded.storage(), built.storage());
    assert_eq!(loaded.iter().collect::<Vec<_>>(), built.iter().collect::<Vec<_>>());

    let again = MoleculeDataset::load_or_build(&config).unwrap();
    assert_eq!(again.storage(), loaded.storage());
}

#[test]
fn cache_is_trusted_over_the_source_table() {
    let (_dir, config) = setup("smiles,label\nCCO,1\n");
    MoleculeDataset::load_or_build(&config).unwrap();
    fs::write(&config.source, "smiles,label\nO,0\nN,0\n").unwrap();

    let dataset = MoleculeDataset::load_or_build(&config).unwrap();
    assert_eq!(dataset.len(), 1);
    assert_eq!(dataset.get(0).unwrap().smiles, "CCO");
}

#[test]
fn labels_survive_the_cache_exactly() {
    let (_dir, config) = setup("smiles,label\nC,0\nCC,1\nCCC,1\nCCCC,0\n");
    MoleculeDataset::load_or_build(&config).unwrap();
    let dataset = MoleculeDataset::load_or_build(&config).unwrap();

    let labels: Vec<i64> = dataset.iter().map(|g| g.y[0] as i64).collect();
    assert_eq!(labels, vec![0, 1, 1, 0]);
    for g in dataset.iter() {
        assert_eq!(g.y[0].fract(), 0.0);
    }
}

#[test]
fn fail_fast_aborts_without_writing() {
    let (_dir, config) = setup("smiles,label\nCCO,1\nC1CC,0\nO,0\n");
    let err = MoleculeDataset::load_or_build(&config).unwrap_err();

    match err {
        Error::Parse { row, smiles, source } => {
            assert_eq!(row, 1);
            assert_eq!(smiles, "C1CC");
            assert!(matches!(source, RowError::Smiles(_)));
        }
        other => panic!("expected a parse error, got {other:?}"),
    }
    assert_no_cache(&config.cache);
}

#[test]
fn bad_label_is_a_parse_failure() {
    let (_dir, config) = setup("smiles,label\nCCO,yes\n");
    let err = MoleculeDataset::load_or_build(&config).unwrap_err();
    assert!(matches!(
        err,
        Error::Parse { row: 0, source: RowError::Label { .. }, .. }
    ));
    assert_no_cache(&config.cache);
}

#[test]
fn skip_and_warn_drops_only_bad_rows() {
    let (_dir, mut config) = setup("smiles,label\nCCO,1\nnot-a-molecule,0\nO,0\nc1cccc1,1\nN,x\nC#N,1\n");
    config.on_parse_error = ParseErrorPolicy::SkipAndWarn;

    let dataset = MoleculeDataset::load_or_build(&config).unwrap();
    let smiles: Vec<String> = dataset.iter().map(|g| g.smiles).collect();
    assert_eq!(smiles, vec!["CCO", "O", "C#N"]);

    let Origin::Built(report) = dataset.origin() else {
        panic!("expected a fresh build");
    };
    assert_eq!(report.rows, 6);
    assert_eq!(report.converted(), 3);
    let skipped: Vec<usize> = report.skipped.iter().map(|s| s.row).collect();
    assert_eq!(skipped, vec![1, 3, 4]);
    assert!(matches!(report.skipped[2].reason, RowError::Label { .. }));
    assert!(config.cache.exists());
}

#[test]
fn missing_column_is_fatal() {
    let (_dir, config) = setup("SMILES,p_np\nCCO,1\n");
    let err = MoleculeDataset::load_or_build(&config).unwrap_err();
    assert!(matches!(err, Error::MissingColumn { column, .. } if column == "smiles"));
    assert_no_cache(&config.cache);
}

#[test]
fn empty_label_columns_are_rejected_before_building() {
    let (_dir, mut config) = setup("smiles,label\nCCO,1\n");
    config.table.label_columns.clear();
    let err = MoleculeDataset::load_or_build(&config).unwrap_err();
    assert!(matches!(err, Error::InvalidConfig(_)));
    assert_no_cache(&config.cache);
}

#[test]
fn custom_schema_and_bond_features() {
    let (_dir, mut config) = setup("name;SMILES;p_np;logp\nacetic;CC(=O)O;1;0.09\nbenzene;c1ccccc1;0;2.13\n");
    config.table = TableSchema {
        smiles_column: "SMILES".into(),
        label_columns: vec!["p_np".into(), "logp".into()],
        delimiter: ';',
    };
    config.edge_mode = EdgeMode::WithBondFeatures;

    MoleculeDataset::load_or_build(&config).unwrap();
    let dataset = MoleculeDataset::load_or_build(&config).unwrap();
    assert_eq!(dataset.edge_mode(), EdgeMode::WithBondFeatures);
    assert_eq!(dataset.num_edge_features(), 1);
    assert_eq!(dataset.label_width(), 2);
    assert_eq!(dataset.num_classes(), 2);

    let acetic = dataset.get(0).unwrap();
    assert_eq!(acetic.y, vec![1.0, 0.09]);
    assert_eq!(acetic.edge_attr, Some(vec![1.0, 1.0, 2.0, 1.0, 2.0, 1.0]));

    let benzene = dataset.get(1).unwrap();
    assert_eq!(benzene.num_edges(), 12);
    assert!(benzene.edge_attr.unwrap().iter().all(|&c| c == 1.5));
}

#[test]
fn unreadable_cache_is_a_persistence_error() {
    let (_dir, config) = setup("smiles,label\nCCO,1\n");
    fs::create_dir_all(config.cache.parent().unwrap()).unwrap();
    fs::write(&config.cache, b"garbage").unwrap();
    let err = MoleculeDataset::load_or_build(&config).unwrap_err();
    assert!(matches!(err, Error::Persistence { .. }));
}

#[test]
fn empty_table_builds_an_empty_dataset() {
    let (_dir, config) = setup("smiles,label\n");
    let dataset = MoleculeDataset::load_or_build(&config).unwrap();
    assert!(dataset.is_empty());
    assert!(config.cache.exists());
    let reloaded = MoleculeDataset::load_or_build(&config).unwrap();
    assert!(reloaded.is_empty());
}
