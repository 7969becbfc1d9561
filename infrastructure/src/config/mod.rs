//! Configuration: raw TOML structures and the multi-source loader.

mod file_config;
mod loader;

pub use file_config::{
    FileAgentConfig, FileCampusConfig, FileConfig, FileLlmConfig, FileVocabConfig,
};
pub use loader::ConfigLoader;
