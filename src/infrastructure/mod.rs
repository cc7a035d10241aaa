//! Infrastructure layer for filesystem and environment interactions.
//!
//! Resolves where the directory keeps its configuration and trace files and
//! expands `~` in user-supplied paths.

pub mod paths;

pub use paths::{config_dir, data_dir, expand_tilde};
