//! `CMake` build helper
//!
//! Drives the configure/compile/install cycle of a descriptor.
//!
//! Build process:
//! ```bash
//! cmake -S <source> -B <build_temp> -DCMAKE_INSTALL_PREFIX:PATH=<install_root> ...
//! cmake --build <build_temp> --config Release
//! cmake --install <build_temp> --config Release --component python   # componentized
//! cmake --build <build_temp> --config Release --target install        # full install
//! ```

use super::descriptor::ExtensionDescriptor;
use super::detector::{capability_for_version, detect_cmake_project, parse_cmake_version};
use super::helper::{BuildHelper, HelperError};
use super::layout::BuildLayout;
use super::types::BuildCapability;
use crate::config::CMakeSettings;
use crate::{debug, env_vars, paths};
use semver::Version;
use std::path::{Path, PathBuf};
use std::process::Command;

/// `CMake` build helper
///
/// Holds the resolved `cmake` executable and invocation settings. The
/// capability is derived from the `CMake` version unless the settings pin it.
#[derive(Debug)]
pub struct CMakeHelper {
    /// Path to `CMake` executable
    cmake_path: PathBuf,
    /// Build type, generator, jobs and capability override
    settings: CMakeSettings,
}

impl CMakeHelper {
    /// Create a new `CMake` helper
    ///
    /// Priority order for the executable:
    /// 1. `executable` setting (includes the `CMAKE` environment variable)
    /// 2. `cmake` in `PATH`
    /// 3. Error if not found
    ///
    /// # Errors
    ///
    /// Returns [`HelperError::ToolNotFound`] if no executable can be located.
    pub fn new(settings: CMakeSettings) -> Result<Self, HelperError> {
        let cmake_path = match &settings.executable {
            Some(path) => path.clone(),
            None => paths::find_executable("cmake").ok_or(HelperError::ToolNotFound)?,
        };

        Ok(Self::with_executable(cmake_path, settings))
    }

    /// Create a helper around a known executable
    #[must_use]
    pub const fn with_executable(cmake_path: PathBuf, settings: CMakeSettings) -> Self {
        Self {
            cmake_path,
            settings,
        }
    }

    /// Path of the `cmake` executable in use
    #[must_use]
    pub fn cmake_path(&self) -> &Path {
        &self.cmake_path
    }

    /// Query the installed `CMake` version
    ///
    /// # Errors
    ///
    /// Returns an error if `cmake --version` cannot run or its output is not
    /// recognized.
    pub fn version(&self) -> Result<Version, HelperError> {
        let mut cmd = Command::new(&self.cmake_path);
        cmd.arg("--version");
        let output = run("cmake --version", &mut cmd)?;

        parse_cmake_version(&output).ok_or(HelperError::UnknownVersion { output })
    }

    /// Configure command for `descriptor`
    #[must_use]
    pub fn configure_command(
        &self,
        descriptor: &ExtensionDescriptor,
        layout: &BuildLayout,
    ) -> Command {
        let mut cmd = Command::new(&self.cmake_path);
        cmd.arg("-S")
            .arg(layout.source_dir(descriptor))
            .arg("-B")
            .arg(layout.build_temp())
            .arg(format!(
                "-DCMAKE_INSTALL_PREFIX:PATH={}",
                layout.install_root(descriptor).display()
            ))
            .arg(format!("-DCMAKE_BUILD_TYPE={}", self.settings.build_type));

        if let Some(generator) = &self.settings.generator {
            cmd.arg("-G").arg(generator);
        }

        // Pass build tool environment variables to CMake
        // CMake respects both CMAKE_* and standard compiler variables
        if let Some(cc) = env_vars::cc() {
            cmd.env("CC", &cc);
            cmd.arg(format!("-DCMAKE_C_COMPILER={cc}"));
        }
        if let Some(cxx) = env_vars::cxx() {
            cmd.env("CXX", &cxx);
            cmd.arg(format!("-DCMAKE_CXX_COMPILER={cxx}"));
        }
        if let Some(cflags) = env_vars::cflags() {
            cmd.arg(format!("-DCMAKE_C_FLAGS={cflags}"));
        }
        if let Some(cxxflags) = env_vars::cxxflags() {
            cmd.arg(format!("-DCMAKE_CXX_FLAGS={cxxflags}"));
        }
        if let Some(ldflags) = env_vars::ldflags() {
            cmd.arg(format!("-DCMAKE_SHARED_LINKER_FLAGS={ldflags}"));
            cmd.arg(format!("-DCMAKE_MODULE_LINKER_FLAGS={ldflags}"));
        }

        cmd.args(descriptor.configure_options());
        cmd
    }

    /// Compile command
    #[must_use]
    pub fn compile_command(&self, layout: &BuildLayout) -> Command {
        let mut cmd = Command::new(&self.cmake_path);
        cmd.arg("--build")
            .arg(layout.build_temp())
            .arg("--config")
            .arg(&self.settings.build_type);

        if let Some(jobs) = self.settings.jobs {
            cmd.arg("--parallel").arg(jobs.to_string());
        }
        cmd
    }

    /// Install command for `descriptor`
    ///
    /// With a component, `cmake --install` limits the install to it. Without
    /// one, the `install` target runs, which works on every `CMake` version.
    #[must_use]
    pub fn install_command(
        &self,
        descriptor: &ExtensionDescriptor,
        layout: &BuildLayout,
    ) -> Command {
        let mut cmd = Command::new(&self.cmake_path);

        if let Some(component) = descriptor.component() {
            cmd.arg("--install")
                .arg(layout.build_temp())
                .arg("--config")
                .arg(&self.settings.build_type)
                .arg("--component")
                .arg(component);
        } else {
            cmd.arg("--build")
                .arg(layout.build_temp())
                .arg("--config")
                .arg(&self.settings.build_type)
                .arg("--target")
                .arg("install");
        }
        cmd
    }
}

impl BuildHelper for CMakeHelper {
    fn probe(&self) -> Result<BuildCapability, HelperError> {
        if let Some(capability) = self.settings.capability.pinned() {
            crate::debug!("Capability pinned by configuration: {capability}");
            return Ok(capability);
        }

        let version = self.version()?;
        let capability = capability_for_version(&version);
        crate::debug!("CMake {version} at {}: {capability}", self.cmake_path.display());
        Ok(capability)
    }

    fn build(
        &self,
        descriptor: &ExtensionDescriptor,
        layout: &BuildLayout,
    ) -> Result<(), HelperError> {
        let source_dir = layout.source_dir(descriptor);
        if detect_cmake_project(&source_dir).is_none() {
            return Err(HelperError::MissingProject { dir: source_dir });
        }

        std::fs::create_dir_all(layout.build_temp()).map_err(|source| HelperError::Io {
            path: layout.build_temp().to_path_buf(),
            source,
        })?;

        crate::info!("Building CMake extension {}", descriptor.name());

        // Step 1: Run cmake to configure
        run(
            "CMake configuration",
            &mut self.configure_command(descriptor, layout),
        )?;

        // Step 2: Run cmake --build to compile
        run("CMake build", &mut self.compile_command(layout))?;

        // Step 3: Install into the extension directory
        run(
            "CMake install",
            &mut self.install_command(descriptor, layout),
        )?;

        Ok(())
    }
}

/// Run one command to completion, capturing stdout + stderr
fn run(step: &'static str, cmd: &mut Command) -> Result<String, HelperError> {
    crate::debug!("{step}: {cmd:?}");

    let output = cmd
        .output()
        .map_err(|source| HelperError::Spawn { step, source })?;

    let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
    text.push_str(&String::from_utf8_lossy(&output.stderr));

    if !output.status.success() {
        return Err(HelperError::CommandFailed {
            step,
            status: output.status.to_string(),
            output: text,
        });
    }

    debug::debug_log(text.trim_end());
    Ok(text)
}
