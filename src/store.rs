// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Named collection storage
//!
//! A store holds one opaque byte blob per collection. `save_all` replaces a
//! collection as a whole; readers never observe a partially written blob.

use crate::error::{Error, Result};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// The persisted collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionName {
    /// The garage
    Bicycles,
    /// Wishes not yet acquired
    WishlistCurrent,
    /// Acquired wishes
    WishlistHistory,
}

impl CollectionName {
    /// Every collection, in load order
    pub const ALL: [Self; 3] = [Self::Bicycles, Self::WishlistCurrent, Self::WishlistHistory];

    /// Logical name, also the file stem on disk
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bicycles => "bicycles",
            Self::WishlistCurrent => "wishlist-current",
            Self::WishlistHistory => "wishlist-history",
        }
    }

    /// File name inside a data directory
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}.json", self.as_str())
    }
}

impl fmt::Display for CollectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Backing storage for named collections
pub trait CollectionStore {
    /// Read a collection; `Ok(None)` when it was never saved
    fn load(&self, name: CollectionName) -> Result<Option<Vec<u8>>>;

    /// Replace a collection atomically
    fn save_all(&mut self, name: CollectionName, bytes: &[u8]) -> Result<()>;

    /// Move an undecodable collection out of the way so it is not overwritten
    fn quarantine(&mut self, name: CollectionName) -> Result<()>;
}

// =============================================================================
// File Store
// =============================================================================

/// One JSON file per collection in a data directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Store rooted at `dir`; the directory is created on first save
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Data directory
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of a collection file
    #[must_use]
    pub fn path_for(&self, name: CollectionName) -> PathBuf {
        self.dir.join(name.file_name())
    }

    /// Path the first corrupt copy of a collection is moved to
    #[must_use]
    pub fn quarantine_path_for(&self, name: CollectionName) -> PathBuf {
        self.quarantine_path(name, 0)
    }

    /// `<name>.json.corrupt`, then `<name>.json.corrupt.1`, `.2`, ...
    fn quarantine_path(&self, name: CollectionName, attempt: u32) -> PathBuf {
        match attempt {
            0 => self.dir.join(format!("{}.corrupt", name.file_name())),
            n => self.dir.join(format!("{}.corrupt.{n}", name.file_name())),
        }
    }

    fn ensure_dir(&self) -> io::Result<()> {
        if self.dir.is_dir() {
            return Ok(());
        }
        fs::create_dir_all(&self.dir)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.dir, fs::Permissions::from_mode(0o700))?;
        }
        Ok(())
    }

    fn write_atomic(&self, path: &Path, bytes: &[u8]) -> io::Result<()> {
        self.ensure_dir()?;

        // Temp file in the same directory so the rename stays on one filesystem
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(bytes)?;
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|e| e.error)?;

        #[cfg(unix)]
        {
            if let Ok(dir) = fs::File::open(&self.dir) {
                let _ = dir.sync_all();
            }
        }

        Ok(())
    }
}

impl CollectionStore for FileStore {
    fn load(&self, name: CollectionName) -> Result<Option<Vec<u8>>> {
        let path = self.path_for(name);
        match fs::read(&path) {
            Ok(bytes) => {
                debug!("Read {} bytes from {}", bytes.len(), path.display());
                Ok(Some(bytes))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::read(name.as_str(), e)),
        }
    }

    fn save_all(&mut self, name: CollectionName, bytes: &[u8]) -> Result<()> {
        let path = self.path_for(name);
        self.write_atomic(&path, bytes)
            .map_err(|e| Error::persistence(name.as_str(), e))?;
        debug!("Wrote {} bytes to {}", bytes.len(), path.display());
        Ok(())
    }

    // Linking fails on an existing target, so earlier corrupt copies survive
    fn quarantine(&mut self, name: CollectionName) -> Result<()> {
        let from = self.path_for(name);
        for attempt in 0..MAX_QUARANTINED {
            let to = self.quarantine_path(name, attempt);
            match fs::hard_link(&from, &to) {
                Ok(()) => {
                    fs::remove_file(&from).map_err(|e| Error::persistence(name.as_str(), e))?;
                    debug!("Moved {} to {}", from.display(), to.display());
                    return Ok(());
                }
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {}
                Err(e) => return Err(Error::persistence(name.as_str(), e)),
            }
        }
        Err(Error::persistence(
            name.as_str(),
            io::Error::new(io::ErrorKind::AlreadyExists, "too many corrupt copies set aside"),
        ))
    }
}

const MAX_QUARANTINED: u32 = 1000;

// =============================================================================
// Memory Store
// =============================================================================

/// In-memory store for tests and dry runs
///
/// Writes to a collection can be made to fail with [`MemoryStore::fail_writes`].
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    collections: HashMap<CollectionName, Vec<u8>>,
    quarantined: HashMap<CollectionName, Vec<u8>>,
    failing: HashSet<CollectionName>,
    writes: usize,
}

impl MemoryStore {
    /// Empty store: every collection is absent
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Preload raw bytes for a collection
    #[must_use]
    pub fn with(mut self, name: CollectionName, bytes: impl Into<Vec<u8>>) -> Self {
        self.collections.insert(name, bytes.into());
        self
    }

    /// Make writes to `name` fail (or succeed again)
    pub fn fail_writes(&mut self, name: CollectionName, fail: bool) {
        if fail {
            self.failing.insert(name);
        } else {
            self.failing.remove(&name);
        }
    }

    /// Current bytes of a collection
    #[must_use]
    pub fn get(&self, name: CollectionName) -> Option<&[u8]> {
        self.collections.get(&name).map(Vec::as_slice)
    }

    /// Bytes set aside by [`CollectionStore::quarantine`]
    #[must_use]
    pub fn quarantined(&self, name: CollectionName) -> Option<&[u8]> {
        self.quarantined.get(&name).map(Vec::as_slice)
    }

    /// Number of successful writes
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl CollectionStore for MemoryStore {
    fn load(&self, name: CollectionName) -> Result<Option<Vec<u8>>> {
        Ok(self.collections.get(&name).cloned())
    }

    fn save_all(&mut self, name: CollectionName, bytes: &[u8]) -> Result<()> {
        if self.failing.contains(&name) {
            return Err(Error::persistence(
                name.as_str(),
                io::Error::new(io::ErrorKind::Other, "simulated write failure"),
            ));
        }
        self.collections.insert(name, bytes.to_vec());
        self.writes += 1;
        Ok(())
    }

    fn quarantine(&mut self, name: CollectionName) -> Result<()> {
        if let Some(bytes) = self.collections.remove(&name) {
            self.quarantined.insert(name, bytes);
        }
        Ok(())
    }
}
