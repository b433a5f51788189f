//! Configuration file management
//!
//! Handles reading ryml-build's TOML configuration from an explicit path, the
//! project directory, or the user config directory, then layering environment
//! overrides on top.

use crate::env_vars;
use crate::extensions::CapabilityOverride;
use crate::paths;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Extension name of the rapidyaml Python module
pub const DEFAULT_EXTENSION_NAME: &str = "ryml.ryml";

/// Install component holding only the files the Python module needs
pub const DEFAULT_COMPONENT: &str = "python";

/// `CMake` cache entry that pins the interpreter
pub const PYTHON_EXECUTABLE_OPTION: &str = "-DPython3_EXECUTABLE:FILEPATH=";

/// Build type used when neither config nor environment names one
pub const DEFAULT_BUILD_TYPE: &str = "Release";

/// Application configuration loaded from TOML files
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// The extension to build
    pub extension: ExtensionConfig,

    /// How `CMake` is invoked
    pub cmake: CMakeSettings,
}

/// Configuration mapping from which an extension descriptor is built
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct ExtensionConfig {
    /// Qualified module name (`package.module`)
    pub name: String,

    /// Install prefix relative to the extension directory
    pub install_prefix: PathBuf,

    /// `CMake` source directory relative to the source root
    pub source_dir: PathBuf,

    /// Install component (only honored by componentized helpers)
    pub component: Option<String>,

    /// Flags passed verbatim to the configure step
    pub configure_options: Vec<String>,
}

impl Default for ExtensionConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_EXTENSION_NAME.to_string(),
            install_prefix: PathBuf::new(),
            source_dir: PathBuf::new(),
            component: Some(DEFAULT_COMPONENT.to_string()),
            configure_options: vec!["-DRYML_BUILD_API:BOOL=ON".to_string()],
        }
    }
}

impl ExtensionConfig {
    /// Same configuration with the install component removed
    #[must_use]
    pub fn without_component(&self) -> Self {
        Self {
            component: None,
            ..self.clone()
        }
    }

    /// Pin the interpreter the native build must use.
    ///
    /// Appends `-DPython3_EXECUTABLE:FILEPATH=<path>` unless the options
    /// already carry an explicit `Python3_EXECUTABLE` entry.
    #[must_use]
    pub fn with_interpreter(mut self, interpreter: &Path) -> Self {
        let already_pinned = self
            .configure_options
            .iter()
            .any(|opt| opt.starts_with("-DPython3_EXECUTABLE"));

        if !already_pinned {
            self.configure_options.push(format!(
                "{PYTHON_EXECUTABLE_OPTION}{}",
                interpreter.display()
            ));
        }
        self
    }
}

/// `CMake` invocation settings
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct CMakeSettings {
    /// Explicit `cmake` executable (otherwise `CMAKE` or `PATH`)
    pub executable: Option<PathBuf>,

    /// `CMAKE_BUILD_TYPE` and `--config` value
    pub build_type: String,

    /// Generator passed with `-G`
    pub generator: Option<String>,

    /// Parallel build jobs
    pub jobs: Option<usize>,

    /// Capability probe override
    pub capability: CapabilityOverride,
}

impl Default for CMakeSettings {
    fn default() -> Self {
        Self {
            executable: None,
            build_type: DEFAULT_BUILD_TYPE.to_string(),
            generator: None,
            jobs: None,
            capability: CapabilityOverride::Auto,
        }
    }
}

impl Config {
    /// Load configuration from TOML files and the environment.
    /// Priority: `custom_path` -> ./.ryml-build.toml -> ~/.config/ryml-build/config.toml -> defaults
    ///
    /// # Arguments
    /// * `custom_path` - Optional custom path to config file (overrides defaults)
    /// * `skip_rc` - If true, skip loading config files (defaults + environment)
    ///
    /// # Errors
    ///
    /// Returns an error if config file reading or parsing fails.
    pub fn load_with_options(custom_path: Option<&Path>, skip_rc: bool) -> Result<Self> {
        let config = if skip_rc {
            Self::default()
        } else if let Some(path) = custom_path {
            Self::load_from(path)?
        } else if let Some(path) = Self::discover() {
            Self::load_from(&path)?
        } else {
            Self::default()
        };

        config.apply_env()
    }

    /// Parse configuration from a TOML string
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or has unknown value types.
    pub fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Failed to parse ryml-build configuration")
    }

    /// Render the configuration as TOML
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }

    fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&contents).with_context(|| format!("in {}", path.display()))
    }

    fn discover() -> Option<PathBuf> {
        let local = PathBuf::from(paths::LOCAL_CONFIG_FILE);
        if local.is_file() {
            return Some(local);
        }

        paths::user_config_dir()
            .map(|dir| dir.join("config.toml"))
            .filter(|path| path.is_file())
    }

    /// Layer environment overrides on top of file values
    fn apply_env(mut self) -> Result<Self> {
        if let Some(cmake) = env_vars::cmake() {
            self.cmake.executable = Some(PathBuf::from(cmake));
        }
        if let Some(build_type) = env_vars::build_type() {
            self.cmake.build_type = build_type;
        }
        if let Some(generator) = env_vars::generator() {
            self.cmake.generator = Some(generator);
        }
        if let Some(jobs) = env_vars::build_jobs() {
            self.cmake.jobs = Some(jobs);
        }
        if let Some(capability) = env_vars::capability() {
            self.cmake.capability = capability
                .parse()
                .map_err(anyhow::Error::msg)
                .context("Invalid RYML_BUILD_CAPABILITY")?;
        }
        Ok(self)
    }
}
