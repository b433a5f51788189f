//! Build command
//!
//! Probe the helper, prepare the descriptor/step pair, build, and report.

use anyhow::{Context, Result};
use ryml_build::debug::{self, Verbosity};
use ryml_build::{BuildLayout, BuildReport, CMakeHelper, Config, ExtensionBuilder};
use std::env;
use std::path::{Path, PathBuf};

/// Command-line options of `ryml-build build`
#[derive(Debug)]
pub(crate) struct BuildOptions {
    pub(crate) source_dir: PathBuf,
    pub(crate) build_lib: Option<PathBuf>,
    pub(crate) build_temp: Option<PathBuf>,
    pub(crate) python: Option<PathBuf>,
}

impl BuildOptions {
    /// Layout from the options, resolved against the working directory
    fn layout(&self) -> Result<BuildLayout> {
        let cwd = env::current_dir().context("Failed to read the current directory")?;
        Ok(self.layout_in(&cwd))
    }

    /// Layout with every directory absolute under `cwd`, defaulting to
    /// `build/lib` and `build/temp` below the source dir
    fn layout_in(&self, cwd: &Path) -> BuildLayout {
        let source_root = absolute_in(cwd, &self.source_dir);
        let defaults = BuildLayout::under(&source_root);
        BuildLayout::new(
            source_root.clone(),
            self.build_lib.as_deref().map_or_else(
                || defaults.build_lib().to_path_buf(),
                |dir| absolute_in(cwd, dir),
            ),
            self.build_temp.as_deref().map_or_else(
                || defaults.build_temp().to_path_buf(),
                |dir| absolute_in(cwd, dir),
            ),
        )
    }
}

// `components()` drops the `.` segments left by joining `.`
fn absolute_in(cwd: &Path, path: &Path) -> PathBuf {
    cwd.join(path).components().collect()
}

/// Build the configured extension
pub(crate) fn run(config: Config, options: &BuildOptions) -> Result<()> {
    let interpreter = ryml_build::resolve_interpreter(options.python.clone())?;
    ryml_build::debug!("Forwarding interpreter {}", interpreter.display());

    let extension = config.extension.with_interpreter(&interpreter);
    let helper = CMakeHelper::new(config.cmake).context(
        "CMake executable not found. The rapidyaml extension requires CMake to be installed.",
    )?;

    let builder = ExtensionBuilder::new(helper, options.layout()?);
    let report = builder
        .build(&extension)
        .with_context(|| format!("Failed to build extension {}", extension.name))?;

    if debug::verbosity() > Verbosity::Quiet {
        print_report(&report);
    }
    Ok(())
}

fn print_report(report: &BuildReport) {
    println!(
        "Built {} in {:.2}s ({} build step)",
        report.extension,
        report.duration.as_secs_f64(),
        report.step
    );
    println!("  install root: {}", report.install_root.display());
    for path in &report.removed {
        println!("  removed: {}", path.display());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_defaults_under_source_dir() {
        let options = BuildOptions {
            source_dir: PathBuf::from("/repo"),
            build_lib: None,
            build_temp: Some(PathBuf::from("/tmp/ryml")),
            python: None,
        };

        let layout = options.layout_in(Path::new("/work"));

        assert_eq!(layout.build_lib(), PathBuf::from("/repo/build/lib"));
        assert_eq!(layout.build_temp(), PathBuf::from("/tmp/ryml"));
        assert_eq!(layout.source_root(), PathBuf::from("/repo"));
    }

    #[test]
    fn relative_dirs_resolve_against_working_dir() {
        let options = BuildOptions {
            source_dir: PathBuf::from("."),
            build_lib: None,
            build_temp: Some(PathBuf::from("out/temp")),
            python: None,
        };

        let layout = options.layout_in(Path::new("/work/ryml"));

        assert_eq!(layout.source_root(), PathBuf::from("/work/ryml"));
        assert_eq!(layout.build_lib(), PathBuf::from("/work/ryml/build/lib"));
        assert_eq!(layout.build_temp(), PathBuf::from("/work/ryml/out/temp"));
        assert!(layout.build_lib().is_absolute());
    }
}
