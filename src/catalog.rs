// SPDX-License-Identifier: MPL-2.0
//! Model catalog: discovery and selection of loadable 3D models.
//!
//! The catalog scans a directory for glTF files and pairs each model with
//! its preview images by file stem: `<stem>.png` (or `.jpg`/`.jpeg`/`.webp`)
//! is the thumbnail, `<stem>_normal.<ext>` is the normal-map preview shown
//! in the enlarged hover overlay. Entries are sorted by name so the gallery
//! order is stable across platforms.

use crate::error::Result;
use std::path::{Path, PathBuf};

const MODEL_EXTENSIONS: [&str; 2] = ["gltf", "glb"];
const IMAGE_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "webp"];

/// One selectable model with its associated preview images.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelEntry {
    /// Path to the `.gltf`/`.glb` asset.
    pub model_path: PathBuf,
    /// Thumbnail shown in the gallery strip and as the base preview image.
    pub thumbnail: Option<PathBuf>,
    /// Normal-map preview shown in the overlay's second slot, if present.
    pub normal_preview: Option<PathBuf>,
    /// Display name derived from the file stem.
    pub name: String,
}

/// The set of selectable models.
///
/// `selected` holds at most one index, so the "exactly one thumbnail is
/// selected" rule is enforced structurally rather than by clearing flags.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelCatalog {
    entries: Vec<ModelEntry>,
    selected: Option<usize>,
}

impl ModelCatalog {
    /// Creates an empty catalog (used when no models directory is available).
    pub fn new() -> Self {
        Self::default()
    }

    /// Scans `directory` for model files and pairs preview images.
    ///
    /// The first entry (by name) starts out selected, mirroring the default
    /// selection that drives the initial model load. An empty directory
    /// yields an empty, inert catalog rather than an error.
    pub fn scan_directory(directory: &Path) -> Result<Self> {
        let mut entries = Vec::new();

        for dir_entry in std::fs::read_dir(directory)? {
            let dir_entry = dir_entry?;
            let path = dir_entry.path();

            if path.is_file() && is_model_file(&path) {
                entries.push(entry_for_model(&path));
            }
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));

        let selected = if entries.is_empty() { None } else { Some(0) };

        Ok(Self { entries, selected })
    }

    /// Marks entry `index` as the sole selected entry and returns it.
    ///
    /// Out-of-range indices leave the selection untouched.
    pub fn select(&mut self, index: usize) -> Option<&ModelEntry> {
        if index < self.entries.len() {
            self.selected = Some(index);
            self.entries.get(index)
        } else {
            None
        }
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_entry(&self) -> Option<&ModelEntry> {
        self.selected.and_then(|idx| self.entries.get(idx))
    }

    pub fn entries(&self) -> &[ModelEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&ModelEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn is_model_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            MODEL_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

fn entry_for_model(model_path: &Path) -> ModelEntry {
    let stem = model_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string();

    ModelEntry {
        thumbnail: find_sibling_image(model_path, &stem),
        normal_preview: find_sibling_image(model_path, &format!("{stem}_normal")),
        name: stem,
        model_path: model_path.to_path_buf(),
    }
}

fn find_sibling_image(model_path: &Path, stem: &str) -> Option<PathBuf> {
    let parent = model_path.parent()?;
    for ext in IMAGE_EXTENSIONS {
        let candidate = parent.join(format!("{stem}.{ext}"));
        if candidate.is_file() {
            return Some(candidate);
        }
    }
    None
}
