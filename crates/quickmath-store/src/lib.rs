//! quickmath-store: Best-score persistence and configuration.
//!
//! Implements the `ScoreStore` trait for a JSON file on disk and for an
//! in-memory map, and loads the TOML configuration shared by the CLI.

pub mod config;
pub mod error;
pub mod json_file;
pub mod memory;

pub use config::{load_config, load_config_from, QuickmathConfig};
pub use error::StoreError;
pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
