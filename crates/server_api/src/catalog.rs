use std::path::{Path, PathBuf};

use anyhow::Context;
use shared::domain::ImageFilename;

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "png", "webp"];

/// Image listing backed directly by a directory. Nothing is cached, every
/// query rescans the filesystem.
#[derive(Debug, Clone)]
pub struct AssetCatalog {
    dir: PathBuf,
}

impl AssetCatalog {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Regular files (or links to them) with an image extension, sorted
    /// ascending.
    pub async fn list_images(&self) -> anyhow::Result<Vec<ImageFilename>> {
        let mut entries = tokio::fs::read_dir(&self.dir)
            .await
            .with_context(|| format!("failed to read asset directory '{}'", self.dir.display()))?;

        let mut images = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .with_context(|| format!("failed to scan asset directory '{}'", self.dir.display()))?
        {
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            if !has_image_extension(&name) {
                continue;
            }
            // metadata follows symlinks
            match tokio::fs::metadata(entry.path()).await {
                Ok(metadata) if metadata.is_file() => images.push(ImageFilename(name)),
                Ok(_) => {}
                Err(error) => {
                    tracing::debug!(%name, %error, "skipping unreadable catalog entry");
                }
            }
        }

        images.sort();
        Ok(images)
    }
}

pub fn has_image_extension(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext))
}

#[cfg(test)]
#[path = "tests/catalog_tests.rs"]
mod tests;
