//! Knoll CLI - Command-line interface for terrain generation

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{build, sample};

#[derive(Parser)]
#[command(name = "knoll")]
#[command(about = "Heightmap terrain meshes, flat or wrapped onto a torus", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a terrain mesh and write its vertex buffers as JSON
    Build {
        /// Path to the heightmap image
        heightmap: String,

        /// Path to a terrain TOML config
        #[arg(long)]
        config: Option<String>,

        /// Output JSON path
        #[arg(short, long, default_value = "terrain.json")]
        output: String,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Query the surface at a (possibly fractional) grid position
    Sample {
        /// Path to the heightmap image
        heightmap: String,

        /// Grid row
        #[arg(long, allow_negative_numbers = true)]
        row: f32,

        /// Grid column
        #[arg(long, allow_negative_numbers = true)]
        col: f32,

        /// Path to a terrain TOML config
        #[arg(long)]
        config: Option<String>,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            heightmap,
            config,
            output,
            pretty,
        } => build::run(build::BuildArgs {
            heightmap,
            config,
            output,
            pretty,
        }),
        Commands::Sample {
            heightmap,
            row,
            col,
            config,
        } => sample::run(sample::SampleArgs {
            heightmap,
            row,
            col,
            config,
        }),
    }
}
