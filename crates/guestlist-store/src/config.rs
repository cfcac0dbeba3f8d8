use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default location of the guest file, relative to the working directory.
pub const DEFAULT_PATH: &str = "./database.csv";

/// Where the guest store keeps its file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub path: PathBuf,
}

impl StoreConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_PATH),
        }
    }
}
