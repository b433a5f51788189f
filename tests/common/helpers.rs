//! Shared test helpers and utilities

use ryml_build::extensions::HelperError;
use ryml_build::{BuildCapability, BuildHelper, BuildLayout, ExtensionDescriptor};
use std::cell::RefCell;
use std::fs;
use std::path::Path;

/// Get the path to the ryml-build binary built for this test run
#[allow(dead_code)]
pub(crate) fn get_ryml_build_binary() -> &'static str {
    env!("CARGO_BIN_EXE_ryml-build")
}

/// Build helper that fakes `CMake` by writing directories into the install root
///
/// Every build writes `ryml.so`. Descriptors without a component also get
/// `full_install_dirs`, the way a full install puts down library, headers
/// and package files.
#[derive(Debug)]
#[allow(dead_code)]
pub(crate) struct MockHelper {
    capability: BuildCapability,
    full_install_dirs: Vec<&'static str>,
    /// Component of every descriptor built so far
    built: RefCell<Vec<Option<String>>>,
}

#[allow(dead_code)]
impl MockHelper {
    pub(crate) fn new(capability: BuildCapability, full_install_dirs: &[&'static str]) -> Self {
        Self {
            capability,
            full_install_dirs: full_install_dirs.to_vec(),
            built: RefCell::new(Vec::new()),
        }
    }

    /// Components of the descriptors built so far, in order
    pub(crate) fn built_components(&self) -> Vec<Option<String>> {
        self.built.borrow().clone()
    }
}

impl BuildHelper for MockHelper {
    fn probe(&self) -> Result<BuildCapability, HelperError> {
        Ok(self.capability)
    }

    fn build(
        &self,
        descriptor: &ExtensionDescriptor,
        layout: &BuildLayout,
    ) -> Result<(), HelperError> {
        self.built
            .borrow_mut()
            .push(descriptor.component().map(str::to_string));

        let root = layout.install_root(descriptor);
        let dirs: &[&str] = if descriptor.component().is_some() {
            &[]
        } else {
            &self.full_install_dirs
        };
        write_install_tree(&root, dirs).map_err(|source| HelperError::Io { path: root, source })
    }
}

/// Create `root` with `ryml.so` and each of `dirs` (each holding one file)
#[allow(dead_code)]
pub(crate) fn write_install_tree(root: &Path, dirs: &[&str]) -> std::io::Result<()> {
    fs::create_dir_all(root)?;
    fs::write(root.join("ryml.so"), "")?;
    for dir in dirs {
        let path = root.join(dir);
        fs::create_dir_all(&path)?;
        fs::write(path.join("placeholder"), "")?;
    }
    Ok(())
}
