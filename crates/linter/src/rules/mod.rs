//! Conan recipe lint rules

pub mod package_name;

// Re-export rule structs
pub use package_name::{NameMessage, PackageName};
