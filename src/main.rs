//! ryml-build command-line interface
//!
//! Builds the rapidyaml Python extension with `CMake` and prepares its
//! install tree for packaging

use clap::{Parser, Subcommand};
use ryml_build::{Config, Verbosity};
use std::path::PathBuf;
use std::process;

/// Display an error with optional backtrace information
fn display_error(err: &anyhow::Error, backtrace_enabled: bool) {
    eprintln!("error: {err}");

    // Show error chain
    let mut source = err.source();
    while let Some(err) = source {
        eprintln!("caused by: {err}");
        source = err.source();
    }

    // Show backtrace if enabled
    if backtrace_enabled {
        let backtrace = err.backtrace();
        if backtrace.status() == std::backtrace::BacktraceStatus::Captured {
            eprintln!("\nBacktrace:");
            eprintln!("{backtrace}");
        }
    }
}

#[derive(Parser)]
#[command(name = "ryml-build")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Build the rapidyaml Python extension through CMake", long_about = None)]
pub(crate) struct Cli {
    /// Path to a configuration file (default: ./.ryml-build.toml, then the user config)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Ignore configuration files; use defaults and environment only
    #[arg(long, global = true, conflicts_with = "config")]
    norc: bool,

    /// Suppress progress output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Show CMake command lines and tool output
    #[arg(long, global = true)]
    debug: bool,

    /// Show a backtrace with errors (requires `RUST_BACKTRACE=1`)
    #[arg(long, global = true)]
    backtrace: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Configure, compile and install the extension, then prepare the install tree
    Build {
        /// Repository root holding the top-level CMakeLists.txt
        #[arg(long, default_value = ".")]
        source_dir: PathBuf,

        /// Packaging staging directory (default: <source-dir>/build/lib)
        #[arg(long)]
        build_lib: Option<PathBuf>,

        /// CMake binary directory (default: <source-dir>/build/temp)
        #[arg(long)]
        build_temp: Option<PathBuf>,

        /// Python interpreter the extension is built for
        #[arg(long)]
        python: Option<PathBuf>,
    },

    /// Report the CMake installation and whether it supports component installs
    Probe,

    /// Print the resolved configuration as TOML
    ShowConfig,
}

fn main() {
    let cli = Cli::parse();

    ryml_build::init_verbosity(Verbosity::from_flags(cli.quiet, cli.debug));

    let result = Config::load_with_options(cli.config.as_deref(), cli.norc).and_then(|config| {
        match cli.command {
            Commands::Build {
                source_dir,
                build_lib,
                build_temp,
                python,
            } => commands::build::run(
                config,
                &commands::build::BuildOptions {
                    source_dir,
                    build_lib,
                    build_temp,
                    python,
                },
            ),
            Commands::Probe => commands::probe::run(config),
            Commands::ShowConfig => commands::show_config::run(&config),
        }
    });

    if let Err(e) = result {
        // Display error with formatting
        display_error(&e, cli.backtrace);
        process::exit(1);
    }
}

mod commands;
