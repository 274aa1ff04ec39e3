use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "sheetgraph",
    about = "Sheetgraph: dependency analysis over scenes and external event sheets",
    version
)]
pub struct Cli {
    /// Path to a TOML config file (defaults to ./sheetgraph.toml when present)
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Collect the scenes, external sheets and source files one root depends on
    Analyze {
        /// Path to the project JSON file
        #[arg(long)]
        project: String,

        /// Scene to use as the analysis root
        #[arg(long, conflicts_with = "sheet", required_unless_present = "sheet")]
        scene: Option<String>,

        /// External sheet to use as the analysis root
        #[arg(long)]
        sheet: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Decide whether external sheets can be compiled for one exclusive scene
    Eligibility {
        /// Path to the project JSON file
        #[arg(long)]
        project: String,

        /// External sheet to check
        #[arg(long, conflicts_with = "all", required_unless_present = "all")]
        sheet: Option<String>,

        /// Check every external sheet of the project
        #[arg(long)]
        all: bool,

        /// Analyze scenes one after another instead of on the thread pool
        #[arg(long)]
        sequential: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Report every scene and external sheet whose links form a cycle
    Cycles {
        /// Path to the project JSON file
        #[arg(long)]
        project: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
