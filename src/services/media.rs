//! On-disk image store backing the `/static/images/` route.

use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;
use rand::distr::Alphanumeric;
use rand::Rng;
use tracing::warn;

pub const IMAGE_URL_PREFIX: &str = "/static/images/";

#[derive(Clone)]
pub struct MediaStore {
    dir: PathBuf,
}

impl MediaStore {
    #[must_use]
    pub fn new(images_path: &str) -> Self {
        Self {
            dir: PathBuf::from(images_path),
        }
    }

    pub fn ensure_dir(&self) -> anyhow::Result<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create image directory {}", self.dir.display()))
    }

    /// Writes the image and returns the URL it will be served under.
    pub fn save_png(&self, bytes: &[u8]) -> anyhow::Result<String> {
        let filename = unique_filename();
        let path = self.dir.join(&filename);
        std::fs::write(&path, bytes)
            .with_context(|| format!("failed to write image {}", path.display()))?;
        Ok(format!("{IMAGE_URL_PREFIX}{filename}"))
    }

    /// Best-effort removal of a previously saved image. A missing or
    /// malformed URL is logged and ignored; deleting a post must not fail
    /// over a file that is already gone.
    pub fn delete(&self, url: &str) {
        let Some(filename) = url.rsplit('/').next() else {
            return;
        };
        if filename.is_empty() || filename.contains("..") {
            return;
        }
        let path = self.dir.join(filename);
        if let Err(e) = std::fs::remove_file(&path) {
            warn!("could not remove image {}: {}", path.display(), e);
        }
    }
}

/// Millisecond timestamp plus a short random suffix, so two images written in
/// the same millisecond still get distinct names.
fn unique_filename() -> String {
    let millis = Utc::now().timestamp_millis();
    let suffix: String = rand::rng()
        .sample_iter(Alphanumeric)
        .take(6)
        .map(char::from)
        .collect();
    format!("post_{millis}_{suffix}.png")
}
