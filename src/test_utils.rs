//! Shared test utilities for ryml-build tests
//!
//! This module provides a scripted build helper so the driver and the build
//! steps can be tested without a `CMake` toolchain.
