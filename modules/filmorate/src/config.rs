use serde::{Deserialize, Serialize};

/// Configuration for the filmorate module
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilmorateConfig {
    /// Size of the popularity ranking when the request names no count
    #[serde(default = "default_popular_count")]
    pub default_popular_count: usize,
    /// Upper bound accepted for the `count` query parameter
    #[serde(default = "default_max_popular_count")]
    pub max_popular_count: usize,
}

impl Default for FilmorateConfig {
    fn default() -> Self {
        Self {
            default_popular_count: default_popular_count(),
            max_popular_count: default_max_popular_count(),
        }
    }
}

fn default_popular_count() -> usize {
    10
}

fn default_max_popular_count() -> usize {
    1000
}
