use relative_path::RelativePath;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::{ElementRef, Entry};
use crate::resolve::ElementIndex;

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("Entry file not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid vault directory: {0}")]
    InvalidVaultDir(String),
    #[error("Malformed entry file {path}: {source}")]
    Malformed {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Failed to serialize entry: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Read and deserialize one entry file.
pub fn read_entry(relative_path: &RelativePath, vault_root: &Path) -> Result<Entry, IoError> {
    let absolute_path = relative_path.to_path(vault_root);
    if !absolute_path.exists() {
        return Err(IoError::NotFound(absolute_path));
    }
    let content = fs::read_to_string(&absolute_path).map_err(IoError::Io)?;
    toml::from_str(&content).map_err(|source| IoError::Malformed {
        path: absolute_path,
        source,
    })
}

/// Serialize and write one entry file, creating parent directories as
/// needed.
pub fn write_entry(
    relative_path: &RelativePath,
    vault_root: &Path,
    entry: &Entry,
) -> Result<(), IoError> {
    let absolute_path = relative_path.to_path(vault_root);
    if let Some(parent) = absolute_path.parent() {
        fs::create_dir_all(parent).map_err(IoError::Io)?;
    }
    let content = toml::to_string_pretty(entry)?;
    fs::write(&absolute_path, content).map_err(IoError::Io)
}

/// Scan for entry files (`*.toml`) under the vault directory.
pub fn scan_entry_files(vault_root: &Path) -> Result<Vec<PathBuf>, IoError> {
    if !vault_root.exists() {
        return Err(IoError::InvalidVaultDir(
            "vault directory not found".to_string(),
        ));
    }

    let mut files = Vec::new();
    scan_directory_recursive(vault_root, &mut files)?;
    files.sort();
    Ok(files)
}

fn scan_directory_recursive(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), IoError> {
    let entries = fs::read_dir(dir).map_err(IoError::Io)?;

    for dir_entry in entries {
        let dir_entry = dir_entry.map_err(IoError::Io)?;
        let path = dir_entry.path();

        if path.is_dir() {
            scan_directory_recursive(&path, files)?;
        } else if let Some(ext) = path.extension()
            && ext == "toml"
        {
            files.push(path);
        }
    }

    Ok(())
}

/// Load every entry in the vault, sorted by file path. Malformed files
/// abort the load so broken vaults are noticed, not silently thinned.
pub fn load_vault(vault_root: &Path) -> Result<Vec<Entry>, IoError> {
    let mut entries = Vec::new();
    for path in scan_entry_files(vault_root)? {
        let content = fs::read_to_string(&path).map_err(IoError::Io)?;
        let entry = toml::from_str(&content).map_err(|source| IoError::Malformed {
            path: path.clone(),
            source,
        })?;
        entries.push(entry);
    }
    Ok(entries)
}

pub fn validate_vault_dir(path: &Path) -> Result<(), IoError> {
    if !path.exists() || !path.is_dir() {
        return Err(IoError::InvalidVaultDir(
            "Directory does not exist".to_string(),
        ));
    }

    Ok(())
}

/// In-memory element directory built from a loaded vault.
///
/// Keyed by element id in a BTreeMap so iteration order is stable.
#[derive(Debug, Default)]
pub struct VaultIndex {
    elements: BTreeMap<String, ElementRef>,
}

impl VaultIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries<'a>(entries: impl IntoIterator<Item = &'a Entry>) -> Self {
        let mut index = Self::new();
        for entry in entries {
            index.add(entry.element_ref());
        }
        index
    }

    pub fn add(&mut self, element: ElementRef) {
        self.elements.insert(element.id.clone(), element);
    }

    pub fn remove(&mut self, id: &str) -> Option<ElementRef> {
        self.elements.remove(id)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl ElementIndex for VaultIndex {
    fn lookup_by_id(&self, id: &str) -> Option<ElementRef> {
        self.elements.get(id).cloned()
    }

    fn list_all(&self) -> Vec<ElementRef> {
        self.elements.values().cloned().collect()
    }
}
