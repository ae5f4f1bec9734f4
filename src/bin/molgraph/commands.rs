use anyhow::{Context, Result};
use tracing::info;

use molgraph::{
    train_test_split, Config, DataLoader, GraphRecord, LoaderOptions, MoleculeDataset, Origin,
};

use crate::cli::Command;

pub fn dispatch(command: Command, config: &Config) -> Result<()> {
    match command {
        Command::Build => run_build(config),
        Command::Inspect { index } => run_inspect(config, index),
        Command::Batches(_) => run_batches(config),
    }
}

fn load(config: &Config) -> Result<MoleculeDataset> {
    MoleculeDataset::load_or_build(&config.dataset).with_context(|| {
        format!(
            "failed to prepare dataset from {}",
            config.dataset.source.display()
        )
    })
}

fn run_build(config: &Config) -> Result<()> {
    let dataset = load(config)?;
    match dataset.origin() {
        Origin::Cached => {
            println!(
                "Loaded {} graphs from {}",
                dataset.len(),
                config.dataset.cache.display()
            );
        }
        Origin::Built(report) => {
            println!(
                "Built {} graphs from {} rows into {}",
                dataset.len(),
                report.rows,
                config.dataset.cache.display()
            );
            for skipped in &report.skipped {
                println!(
                    "  skipped row {} ({}): {}",
                    skipped.row, skipped.smiles, skipped.reason
                );
            }
        }
    }
    Ok(())
}

fn run_inspect(config: &Config, index: usize) -> Result<()> {
    let dataset = load(config)?;
    println!("Dataset: {} graphs", dataset.len());
    println!("Number of node features: {}", dataset.num_node_features());
    println!("Number of edge features: {}", dataset.num_edge_features());
    println!("Number of classes: {}", dataset.num_classes());
    println!("Edge mode: {:?}", dataset.edge_mode());

    let record = dataset.get(index).with_context(|| {
        format!(
            "index {index} is out of range for a dataset of {} graphs",
            dataset.len()
        )
    })?;
    println!();
    print_record(index, &record);
    Ok(())
}

fn print_record(index: usize, record: &GraphRecord) {
    println!("Graph {index}: {}", record.smiles);
    println!("  x: {:?}", record.x_shape());
    println!("  edge_index: [2, {}]", record.num_edges());
    if let Some(attr) = &record.edge_attr {
        println!("  edge_attr: [{}, 1]", attr.len());
    }
    println!("  y: {:?}", record.y);
    println!("  Number of nodes: {}", record.num_nodes());
    println!("  Number of edges: {}", record.num_edges());
    println!("  Average node degree: {:.2}", record.average_degree());
    println!("  Has isolated nodes: {}", record.has_isolated_nodes());
    println!("  Has self-loops: {}", record.has_self_loops());
    println!("  Is undirected: {}", record.is_undirected());
    for (atom, row) in record.x.iter().enumerate() {
        println!("  atom {atom}: {row:?}");
    }
}

fn run_batches(config: &Config) -> Result<()> {
    let dataset = load(config)?;
    let loader = &config.loader;
    let (train, test) = train_test_split(dataset.len(), loader.train_fraction, loader.seed)?;
    println!("Number of training graphs: {}", train.len());
    println!("Number of test graphs: {}", test.len());

    let options = LoaderOptions::from(loader);
    for (name, indices, shuffle) in [("train", train, options.shuffle), ("test", test, false)] {
        let batches = DataLoader::new(&dataset, indices, LoaderOptions { shuffle, ..options })?;
        info!(split = name, batches = batches.num_batches(), device = %batches.device(), "iterating");
        for (step, batch) in batches.enumerate() {
            println!(
                "{name} step {}: graphs={} x=[{}, {}] edge_index=[2, {}] y={:?} device={}",
                step + 1,
                batch.num_graphs(),
                batch.num_nodes(),
                dataset.num_node_features(),
                batch.num_edges(),
                batch.y_shape(),
                batch.device
            );
        }
    }
    Ok(())
}
