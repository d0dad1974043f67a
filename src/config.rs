use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Engine configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Directory holding one subdirectory per calendar-day shard
    pub index_root: PathBuf,
    /// Capacity of the writer's append-handle cache
    pub max_open_descriptors: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            index_root: PathBuf::from("./data/index"),
            max_open_descriptors: 512,
        }
    }
}

impl IndexConfig {
    /// Create a configuration rooted at `index_root` with default limits
    pub fn new(index_root: impl Into<PathBuf>) -> Self {
        Self {
            index_root: index_root.into(),
            ..Self::default()
        }
    }

    /// Set the descriptor cache capacity
    pub fn with_max_open_descriptors(mut self, max: usize) -> Self {
        self.max_open_descriptors = max;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = IndexConfig::default();
        assert_eq!(config.max_open_descriptors, 512);
    }

    #[test]
    fn test_config_builder() {
        let config = IndexConfig::new("/tmp/idx").with_max_open_descriptors(4);
        assert_eq!(config.index_root, PathBuf::from("/tmp/idx"));
        assert_eq!(config.max_open_descriptors, 4);
    }
}
