/// Album directory discovery
use crate::error::{Result, ScanError};
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use walkdir::{DirEntry, WalkDir};

/// Scan configuration
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Audio file extension to look for, without the dot (default: "flac")
    pub extension: String,

    /// Directories whose name starts with this are never entered (default: '.')
    pub hidden_prefix: char,

    /// Follow symbolic links while walking (default: false)
    pub follow_links: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extension: "flac".to_string(),
            hidden_prefix: '.',
            follow_links: false,
        }
    }
}

impl ScanConfig {
    /// Case-insensitive suffix match on the whole file name
    pub fn matches(&self, file_name: &OsStr) -> bool {
        let name = file_name.to_string_lossy().to_lowercase();
        name.strip_suffix(&self.extension.to_lowercase())
            .is_some_and(|stem| stem.ends_with('.'))
    }

    /// Whether a directory name marks it as hidden
    pub fn is_hidden(&self, dir_name: &OsStr) -> bool {
        // Lossy so that names with invalid UTF-8 after the prefix still match
        dir_name.to_string_lossy().starts_with(self.hidden_prefix)
    }
}

/// A directory holding at least one matching audio file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumDirectory {
    path: PathBuf,
    audio_files: Vec<PathBuf>,
}

impl AlbumDirectory {
    /// Returns `None` when `audio_files` is empty
    pub fn new(path: PathBuf, audio_files: Vec<PathBuf>) -> Option<Self> {
        if audio_files.is_empty() {
            return None;
        }
        Some(Self { path, audio_files })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Matching files, in the order the filesystem listed them
    pub fn audio_files(&self) -> &[PathBuf] {
        &self.audio_files
    }

    /// The file artwork is taken from: the first one listed
    pub fn selected(&self) -> &Path {
        &self.audio_files[0]
    }
}

/// Lazy walk over every non-hidden directory below a root
///
/// Yields only directories containing at least one matching file. The
/// listing is kept in `read_dir` order, which is platform dependent and
/// deliberately not sorted.
///
/// With a cancel flag attached, the walk ends (yields `None`) as soon as the
/// flag is raised, checked once per filesystem entry.
pub struct DirectoryScan {
    root: PathBuf,
    config: ScanConfig,
    walker: walkdir::IntoIter,
    cancel: Option<Arc<AtomicBool>>,
}

impl DirectoryScan {
    /// Start a scan with the default configuration
    pub fn new(root: &Path) -> Result<Self> {
        Self::with_config(root, ScanConfig::default())
    }

    /// Start a scan with custom configuration
    ///
    /// Fails if the root is missing or not a directory. The root is
    /// canonicalized so that reported paths are absolute.
    pub fn with_config(root: &Path, config: ScanConfig) -> Result<Self> {
        if !root.exists() {
            return Err(ScanError::RootNotFound(root.to_path_buf()));
        }

        if !root.is_dir() {
            return Err(ScanError::NotADirectory(root.to_path_buf()));
        }

        let root = root.canonicalize()?;
        let walker = WalkDir::new(&root)
            .follow_links(config.follow_links)
            .into_iter();

        Ok(Self {
            root,
            config,
            walker,
            cancel: None,
        })
    }

    /// Stop walking once `flag` is set
    pub fn with_cancel(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Whether the attached cancel flag has been raised
    pub fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::SeqCst))
    }

    /// Resolved root path
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn is_pruned(&self, entry: &DirEntry) -> bool {
        entry.depth() > 0 && self.config.is_hidden(entry.file_name())
    }

    /// Read the direct listing of `dir` and keep matching files
    fn list_audio_files(&self, dir: &Path) -> std::io::Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            if !self.config.matches(&entry.file_name()) {
                continue;
            }

            let path = entry.path();
            if path.is_file() {
                files.push(path);
            }
        }

        Ok(files)
    }
}

impl Iterator for DirectoryScan {
    type Item = AlbumDirectory;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.is_cancelled() {
                tracing::debug!("Walk of {} cancelled", self.root.display());
                return None;
            }

            let entry = match self.walker.next()? {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e.path().map(|p| p.display().to_string()).unwrap_or_default();
                    tracing::warn!("Skipping unreadable entry {}: {}", path, e);
                    continue;
                }
            };

            if !entry.file_type().is_dir() {
                continue;
            }

            if self.is_pruned(&entry) {
                tracing::debug!("Skipping hidden directory {}", entry.path().display());
                self.walker.skip_current_dir();
                continue;
            }

            match self.list_audio_files(entry.path()) {
                Ok(files) => {
                    if let Some(album) = AlbumDirectory::new(entry.into_path(), files) {
                        return Some(album);
                    }
                }
                Err(e) => {
                    tracing::warn!("Failed to list {}: {}", entry.path().display(), e);
                }
            }
        }
    }
}
