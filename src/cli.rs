use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(name = "labelviz")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Visualize cluster objects by component and managed-by labels")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file (falls back to $CONFIG_FILE, then ./labelviz.toml)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Draw component.gv and managed-by.gv from an object listing
    Chart {
        #[command(flatten)]
        input: ObjectsArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Query Prometheus and write metrics.txt
    Metrics {
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Both graphs and the metrics report
    All {
        #[command(flatten)]
        input: ObjectsArgs,

        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Debug, clap::Args)]
pub struct ObjectsArgs {
    /// Object listing (`kubectl get ... -o json|yaml`); `-` reads stdin
    #[arg(long, value_name = "FILE")]
    pub objects: PathBuf,
}

impl ObjectsArgs {
    pub fn is_stdin(&self) -> bool {
        self.objects == Path::new("-")
    }
}

#[derive(Debug, clap::Args)]
pub struct OutputArgs {
    /// Directory the artifacts are written to
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub out_dir: PathBuf,
}
