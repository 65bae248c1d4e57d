use clap::Subcommand;
use std::path::PathBuf;

pub mod glb;

#[derive(Subcommand)]
pub enum Commands {
    /// Inspect a GLB file and display its full structure
    Inspect {
        /// GLB file to inspect
        path: PathBuf,
    },

    /// Extract model information to JSON
    Extract {
        /// Source GLB file
        path: PathBuf,

        /// Output JSON file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Search nodes by name (case-insensitive substring)
    Find {
        /// GLB file to search
        path: PathBuf,

        /// Search term
        query: String,
    },

    /// Summarize one or more GLB files, continuing past bad ones
    Summary {
        /// GLB files to summarize
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
}

impl Commands {
    pub fn execute(&self) -> anyhow::Result<()> {
        match self {
            Commands::Inspect { path } => glb::inspect(path),
            Commands::Extract { path, output } => glb::extract_json(path, output),
            Commands::Find { path, query } => glb::find(path, query),
            Commands::Summary { paths } => glb::summary(paths),
        }
    }
}
