use std::path::PathBuf;

use serde::Deserialize;

/// Image upload storage configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Root directory for uploaded images. Default: "./uploads".
    #[serde(default = "default_upload_dir")]
    pub upload_dir: PathBuf,
    /// Maximum accepted size of a single image in bytes. Default: 10 MB.
    #[serde(default = "default_max_image_size")]
    pub max_image_size: u64,
}

fn default_upload_dir() -> PathBuf {
    PathBuf::from("./uploads")
}
fn default_max_image_size() -> u64 {
    10 * 1024 * 1024
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            upload_dir: default_upload_dir(),
            max_image_size: default_max_image_size(),
        }
    }
}
