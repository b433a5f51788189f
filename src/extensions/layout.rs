//! Build directory layout
//!
//! Maps a descriptor onto concrete directories: where the sources are, where
//! intermediate build files go, and where the install step puts its output.

use super::descriptor::ExtensionDescriptor;
use std::path::{Path, PathBuf};

/// Directories used by one build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildLayout {
    /// Repository root; descriptor source dirs are relative to this
    source_root: PathBuf,
    /// Staging tree that is packaged (importable modules land here)
    build_lib: PathBuf,
    /// Scratch directory for the `CMake` binary tree
    build_temp: PathBuf,
}

impl BuildLayout {
    /// Create a layout from its three roots
    #[must_use]
    pub const fn new(source_root: PathBuf, build_lib: PathBuf, build_temp: PathBuf) -> Self {
        Self {
            source_root,
            build_lib,
            build_temp,
        }
    }

    /// Layout rooted at `source_root` with `build/lib` and `build/temp` below it
    #[must_use]
    pub fn under(source_root: &Path) -> Self {
        let build = source_root.join("build");
        Self::new(
            source_root.to_path_buf(),
            build.join("lib"),
            build.join("temp"),
        )
    }

    /// Repository root
    #[must_use]
    pub fn source_root(&self) -> &Path {
        &self.source_root
    }

    /// Packaging staging tree
    #[must_use]
    pub fn build_lib(&self) -> &Path {
        &self.build_lib
    }

    /// `CMake` binary tree for the extension
    #[must_use]
    pub fn build_temp(&self) -> &Path {
        &self.build_temp
    }

    /// Directory holding the compiled module of `descriptor`
    ///
    /// `ryml.ryml` -> `<build_lib>/ryml`
    #[must_use]
    pub fn extension_dir(&self, descriptor: &ExtensionDescriptor) -> PathBuf {
        descriptor
            .package_segments()
            .fold(self.build_lib.clone(), |dir, segment| dir.join(segment))
    }

    /// Install-output root of `descriptor` (`CMAKE_INSTALL_PREFIX`)
    #[must_use]
    pub fn install_root(&self, descriptor: &ExtensionDescriptor) -> PathBuf {
        let ext_dir = self.extension_dir(descriptor);
        if descriptor.install_prefix().as_os_str().is_empty() {
            ext_dir
        } else {
            ext_dir.join(descriptor.install_prefix())
        }
    }

    /// `CMake` source directory of `descriptor`
    #[must_use]
    pub fn source_dir(&self, descriptor: &ExtensionDescriptor) -> PathBuf {
        if descriptor.source_dir().as_os_str().is_empty() {
            self.source_root.clone()
        } else {
            self.source_root.join(descriptor.source_dir())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExtensionConfig;
    use crate::extensions::BuildCapability;

    fn descriptor(name: &str, install_prefix: &str, source_dir: &str) -> ExtensionDescriptor {
        let config = ExtensionConfig {
            name: name.to_string(),
            install_prefix: PathBuf::from(install_prefix),
            source_dir: PathBuf::from(source_dir),
            ..ExtensionConfig::default()
        };
        ExtensionDescriptor::new(&config, BuildCapability::Componentized).unwrap()
    }

    #[test]
    fn empty_prefix_installs_into_extension_dir() {
        let layout = BuildLayout::under(Path::new("/src/rapidyaml"));
        let descriptor = descriptor("ryml.ryml", "", "");

        assert_eq!(
            layout.install_root(&descriptor),
            PathBuf::from("/src/rapidyaml/build/lib/ryml")
        );
        assert_eq!(layout.source_dir(&descriptor), PathBuf::from("/src/rapidyaml"));
    }

    #[test]
    fn nested_name_and_prefix() {
        let layout = BuildLayout::new(
            PathBuf::from("/repo"),
            PathBuf::from("/out/lib"),
            PathBuf::from("/out/tmp"),
        );
        let descriptor = descriptor("pkg.sub.native", "data", "native");

        assert_eq!(
            layout.extension_dir(&descriptor),
            PathBuf::from("/out/lib/pkg/sub")
        );
        assert_eq!(
            layout.install_root(&descriptor),
            PathBuf::from("/out/lib/pkg/sub/data")
        );
        assert_eq!(layout.source_dir(&descriptor), PathBuf::from("/repo/native"));
    }

    #[test]
    fn top_level_module() {
        let layout = BuildLayout::under(Path::new("/repo"));
        let descriptor = descriptor("native", "", "");

        assert_eq!(
            layout.install_root(&descriptor),
            PathBuf::from("/repo/build/lib")
        );
    }
}
