use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use molgraph::{Config, Device, EdgeMode, ParseErrorPolicy};

#[derive(Parser)]
#[command(
    name = "molgraph",
    about = "Build, inspect and batch molecular graph datasets",
    version,
    propagate_version = true
)]
pub struct Cli {
    /// TOML configuration file (defaults apply when omitted)
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub dataset: DatasetOptions,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Load the cached dataset or build it from the source table
    Build,

    /// Print a dataset summary and one record
    Inspect {
        /// Record to show
        #[arg(short, long, default_value_t = 0)]
        index: usize,
    },

    /// Split the dataset and report the shape of every batch
    Batches(BatchOptions),
}

/// Dataset options shared by all commands. Each overrides the config file.
#[derive(Args)]
#[command(next_help_heading = "Dataset")]
pub struct DatasetOptions {
    /// Source table
    #[arg(long, value_name = "FILE", global = true)]
    pub source: Option<PathBuf>,

    /// Cache file
    #[arg(long, value_name = "FILE", global = true)]
    pub cache: Option<PathBuf>,

    /// Column holding SMILES strings
    #[arg(long, value_name = "NAME", global = true)]
    pub smiles_column: Option<String>,

    /// Label column, repeatable
    #[arg(long = "label-column", value_name = "NAME", global = true)]
    pub label_columns: Vec<String>,

    /// Edge representation
    #[arg(long, value_name = "MODE", global = true)]
    pub edge_mode: Option<EdgeModeArg>,

    /// What to do with rows that fail to parse
    #[arg(long, value_name = "POLICY", global = true)]
    pub on_parse_error: Option<PolicyArg>,
}

#[derive(Args)]
#[command(next_help_heading = "Batching")]
pub struct BatchOptions {
    #[arg(long, value_name = "N")]
    pub batch_size: Option<usize>,

    /// Share of records used for training
    #[arg(long, value_name = "FRACTION")]
    pub train_fraction: Option<f64>,

    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Target device: cpu, cuda or cuda:N
    #[arg(long, value_name = "DEVICE")]
    pub device: Option<Device>,

    /// Keep dataset order inside each split
    #[arg(long)]
    pub no_shuffle: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum EdgeModeArg {
    /// Edges from the adjacency matrix, no edge features
    Adjacency,
    /// Both bond directions with bond-order codes
    Bonds,
}

impl From<EdgeModeArg> for EdgeMode {
    fn from(arg: EdgeModeArg) -> Self {
        match arg {
            EdgeModeArg::Adjacency => EdgeMode::AdjacencyOnly,
            EdgeModeArg::Bonds => EdgeMode::WithBondFeatures,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum PolicyArg {
    /// Abort on the first bad row
    Fail,
    /// Log and leave out bad rows
    Skip,
}

impl From<PolicyArg> for ParseErrorPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Fail => ParseErrorPolicy::FailFast,
            PolicyArg::Skip => ParseErrorPolicy::SkipAndWarn,
        }
    }
}

impl DatasetOptions {
    pub fn apply(&self, config: &mut Config) {
        let dataset = &mut config.dataset;
        if let Some(source) = &self.source {
            dataset.source = source.clone();
        }
        if let Some(cache) = &self.cache {
            dataset.cache = cache.clone();
        }
        if let Some(column) = &self.smiles_column {
            dataset.table.smiles_column = column.clone();
        }
        if !self.label_columns.is_empty() {
            dataset.table.label_columns = self.label_columns.clone();
        }
        if let Some(mode) = self.edge_mode {
            dataset.edge_mode = mode.into();
        }
        if let Some(policy) = self.on_parse_error {
            dataset.on_parse_error = policy.into();
        }
    }
}

impl BatchOptions {
    pub fn apply(&self, config: &mut Config) {
        let loader = &mut config.loader;
        if let Some(batch_size) = self.batch_size {
            loader.batch_size = batch_size;
        }
        if let Some(fraction) = self.train_fraction {
            loader.train_fraction = fraction;
        }
        if let Some(seed) = self.seed {
            loader.seed = seed;
        }
        if let Some(device) = self.device {
            loader.device = device;
        }
        if self.no_shuffle {
            loader.shuffle = false;
        }
    }
}

pub fn parse() -> Cli {
    Cli::parse()
}
