//! Extension descriptors
//!
//! A descriptor is the declarative record of one native extension: what it is
//! called, where its sources live, where it installs, and which flags the
//! configure step receives. Construction checks the configuration against the
//! helper capability, so a descriptor that exists is one the helper can build.

use super::types::BuildCapability;
use crate::config::ExtensionConfig;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Reasons a descriptor cannot be constructed
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DescriptorError {
    #[error("invalid extension name '{name}': {reason}")]
    InvalidName { name: String, reason: &'static str },

    #[error("{field} must be a relative path, got {}", .path.display())]
    AbsolutePath { field: &'static str, path: PathBuf },

    #[error("install component must not be empty")]
    EmptyComponent,

    #[error("build helper does not accept the '{option}' option")]
    UnsupportedOption { option: &'static str },
}

/// One native extension to build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionDescriptor {
    name: String,
    install_prefix: PathBuf,
    source_dir: PathBuf,
    component: Option<String>,
    configure_options: Vec<String>,
}

impl ExtensionDescriptor {
    /// Construct a descriptor for a helper with the given capability.
    ///
    /// # Errors
    ///
    /// Returns [`DescriptorError::UnsupportedOption`] when `config` names an
    /// install component and the helper cannot honor one. Also fails on a
    /// malformed name, an absolute prefix or source dir, or an empty component.
    pub fn new(
        config: &ExtensionConfig,
        capability: BuildCapability,
    ) -> Result<Self, DescriptorError> {
        validate_name(&config.name)?;
        validate_relative("install_prefix", &config.install_prefix)?;
        validate_relative("source_dir", &config.source_dir)?;

        if let Some(component) = &config.component {
            if component.trim().is_empty() {
                return Err(DescriptorError::EmptyComponent);
            }
            if !capability.supports_component() {
                return Err(DescriptorError::UnsupportedOption {
                    option: "component",
                });
            }
        }

        Ok(Self {
            name: config.name.clone(),
            install_prefix: config.install_prefix.clone(),
            source_dir: config.source_dir.clone(),
            component: config.component.clone(),
            configure_options: config.configure_options.clone(),
        })
    }

    /// Qualified, dot-separated extension name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Install prefix relative to the extension directory (empty = the directory itself)
    #[must_use]
    pub fn install_prefix(&self) -> &Path {
        &self.install_prefix
    }

    /// Source directory relative to the source root (empty = the root itself)
    #[must_use]
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Install component, when the helper limits the install to one
    #[must_use]
    pub fn component(&self) -> Option<&str> {
        self.component.as_deref()
    }

    /// Configure flags, in the order they are passed
    #[must_use]
    pub fn configure_options(&self) -> &[String] {
        &self.configure_options
    }

    /// Name segments leading to the module's package directory
    ///
    /// `ryml.ryml` -> `["ryml"]`, `toplevel` -> `[]`
    pub fn package_segments(&self) -> impl Iterator<Item = &str> {
        let mut segments: Vec<&str> = self.name.split('.').collect();
        segments.pop();
        segments.into_iter()
    }
}

fn validate_name(name: &str) -> Result<(), DescriptorError> {
    let invalid = |reason| DescriptorError::InvalidName {
        name: name.to_string(),
        reason,
    };

    if name.is_empty() {
        return Err(invalid("name is empty"));
    }

    for segment in name.split('.') {
        let mut chars = segment.chars();
        let Some(first) = chars.next() else {
            return Err(invalid("empty segment between dots"));
        };
        if !(first.is_ascii_alphabetic() || first == '_') {
            return Err(invalid("segments must start with a letter or underscore"));
        }
        if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(invalid("segments may only contain letters, digits and underscores"));
        }
    }

    Ok(())
}

fn validate_relative(field: &'static str, path: &Path) -> Result<(), DescriptorError> {
    if path.is_absolute() || path.has_root() {
        return Err(DescriptorError::AbsolutePath {
            field,
            path: path.to_path_buf(),
        });
    }
    Ok(())
}
