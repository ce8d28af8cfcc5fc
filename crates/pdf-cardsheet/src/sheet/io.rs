//! Source image loading

use crate::natural::natural_sort_by_key;
use crate::types::*;
use image::{DynamicImage, ImageReader};
use std::path::{Path, PathBuf};

/// A source image on disk
///
/// Holds only the path and header information; pixels are decoded on demand
/// while the image's page is composed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageHandle {
    path: PathBuf,
    name: String,
    width: u32,
    height: u32,
}

impl ImageHandle {
    /// Read the image header at `path` without decoding pixels
    pub fn probe(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let (width, height) = ImageReader::open(&path)?
            .with_guessed_format()?
            .into_dimensions()
            .map_err(|source| SheetError::Decode {
                path: path.clone(),
                source,
            })?;
        let name = display_name(&path);
        Ok(Self {
            path,
            name,
            width,
            height,
        })
    }

    /// Decode the full image
    pub fn decode(&self) -> Result<DynamicImage> {
        ImageReader::open(&self.path)?
            .with_guessed_format()?
            .decode()
            .map_err(|source| SheetError::Decode {
                path: self.path.clone(),
                source,
            })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File stem, used for natural ordering
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

fn display_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// List the visible regular files of a directory.
///
/// Entries whose name starts with `.` are skipped. Symlinks are followed.
pub async fn list_image_files(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let mut entries = tokio::fs::read_dir(dir.as_ref()).await?;
    let mut paths = Vec::new();

    while let Some(entry) = entries.next_entry().await? {
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        let path = entry.path();
        if tokio::fs::metadata(&path).await?.is_file() {
            paths.push(path);
        }
    }

    Ok(paths)
}

/// Load the images of a directory in natural order of their file stems.
///
/// Every entry is probed up front so an undecodable file is reported before
/// any page is composed. With [`DecodePolicy::Skip`] each entry is also fully
/// decoded once, so files with a valid header but broken pixel data are
/// logged and left out before pagination instead of failing a page later.
/// An empty directory yields no images; a directory whose entries are all
/// undecodable is an error.
pub async fn load_images(
    dir: impl AsRef<Path>,
    policy: DecodePolicy,
) -> Result<Vec<ImageHandle>> {
    let dir = dir.as_ref().to_owned();
    let mut paths = list_image_files(&dir).await?;

    // Full names first so stems that tie ("a.png", "a.jpg") keep a fixed order
    paths.sort();
    natural_sort_by_key(&mut paths, |path| {
        path.file_stem().and_then(|stem| stem.to_str()).unwrap_or("")
    });

    let handles = tokio::task::spawn_blocking(move || probe_all(&dir, paths, policy)).await??;
    Ok(handles)
}

fn probe_all(dir: &Path, paths: Vec<PathBuf>, policy: DecodePolicy) -> Result<Vec<ImageHandle>> {
    let entry_count = paths.len();
    let mut handles = Vec::with_capacity(entry_count);

    for path in paths {
        let checked = ImageHandle::probe(path).and_then(|handle| match policy {
            DecodePolicy::Abort => Ok(handle),
            DecodePolicy::Skip => handle.decode().map(|_| handle),
        });
        match checked {
            Ok(handle) => handles.push(handle),
            Err(err @ SheetError::Decode { .. }) => match policy {
                DecodePolicy::Abort => return Err(err),
                DecodePolicy::Skip => log::warn!("Skipping undecodable entry: {}", err),
            },
            Err(err) => return Err(err),
        }
    }

    if handles.is_empty() && entry_count > 0 {
        return Err(SheetError::NoDecodableImages {
            dir: dir.to_owned(),
        });
    }

    log::info!(
        "Loaded {} image(s) from {}",
        handles.len(),
        dir.display()
    );
    Ok(handles)
}
