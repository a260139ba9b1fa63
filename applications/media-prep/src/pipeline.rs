//! Per-directory cover preparation
//!
//! Each yielded album directory runs through the same short state machine:
//!
//! ```text
//! scanned -> extracted -> (no picture: skipped with warning
//!                         | picture -> saved
//!                         | save failed: skipped with error)
//! ```
//!
//! Failures are turned into values here and never escape a single
//! directory. Only an invalid root aborts the run.

use crate::reporter::{PrepEvent, Reporter};
use bentley_artwork::{
    processor, ColorMode, CoverProcessor, CoverSettings, EmbeddedPicture, FlacArtworkExtractor,
};
use bentley_scan::{AlbumDirectory, DirectoryScan, ScanConfig, ScanError};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Output file name used when none is given
pub const DEFAULT_JPEG_NAME: &str = "cover.jpg";

/// Exit status for fatal errors
pub const EXIT_FAILURE: u8 = 1;

/// Exit status after a user interrupt (128 + SIGINT)
pub const EXIT_INTERRUPTED: u8 = 130;

/// What a run is pointed at
#[derive(Debug, Clone)]
pub struct PrepOptions {
    /// Root directory to walk
    pub root: PathBuf,

    /// File name written into every album directory
    pub jpeg_name: String,

    /// Render parameters (fixed at 800x800, quality 95)
    pub settings: CoverSettings,

    /// Walk parameters (fixed at `.flac`, hidden prefix `.`)
    pub scan: ScanConfig,
}

impl PrepOptions {
    pub fn new(root: impl Into<PathBuf>, jpeg_name: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            jpeg_name: jpeg_name.into(),
            settings: CoverSettings::default(),
            scan: ScanConfig::default(),
        }
    }
}

/// Run counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Directories holding at least one matching audio file
    pub folders_scanned: usize,

    /// Directories that ended with a written cover
    pub folders_processed: usize,

    /// Cover files written
    pub images_created: usize,
}

impl RunStats {
    fn record(&mut self, outcome: &DirectoryOutcome) {
        self.folders_scanned += 1;
        if let DirectoryOutcome::Saved { .. } = outcome {
            self.folders_processed += 1;
            self.images_created += 1;
        }
    }
}

/// Result of pulling a picture out of the selected audio file
#[derive(Debug, Clone)]
pub enum Extraction {
    Found(EmbeddedPicture),
    Missing,
    Failed(String),
}

/// Terminal state of one album directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryOutcome {
    /// Cover written to `output`
    Saved { output: PathBuf },

    /// No usable picture in the selected file
    NoPicture,

    /// Picture found but decoding, encoding or writing failed
    SaveFailed { output: PathBuf, error: String },
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Completed(RunStats),
    Interrupted(RunStats),
}

impl RunOutcome {
    pub fn stats(&self) -> RunStats {
        match self {
            Self::Completed(stats) | Self::Interrupted(stats) => *stats,
        }
    }

    /// Process exit status for this outcome
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Completed(_) => 0,
            Self::Interrupted(_) => EXIT_INTERRUPTED,
        }
    }
}

/// Drives traversal, extraction and rendering, reporting every step
pub struct Pipeline<R: Reporter> {
    options: PrepOptions,
    extractor: FlacArtworkExtractor,
    processor: CoverProcessor,
    reporter: R,
}

impl<R: Reporter> Pipeline<R> {
    pub fn new(options: PrepOptions, reporter: R) -> Self {
        let processor = CoverProcessor::new(options.settings);
        Self {
            options,
            extractor: FlacArtworkExtractor::new(),
            processor,
            reporter,
        }
    }

    pub fn into_reporter(self) -> R {
        self.reporter
    }

    /// Walk the root and prepare a cover for every album directory
    ///
    /// `cancel` is shared with the walk, which gives up as soon as it is
    /// raised even in long stretches without album directories. It is also
    /// checked before each directory and once more after the walk; once set,
    /// the run stops and returns [`RunOutcome::Interrupted`] with the counts
    /// so far.
    pub fn run(&mut self, cancel: &Arc<AtomicBool>) -> Result<RunOutcome, ScanError> {
        let scan = DirectoryScan::with_config(&self.options.root, self.options.scan.clone())?
            .with_cancel(Arc::clone(cancel));

        self.reporter.report(&PrepEvent::RunStarted {
            root: scan.root(),
            jpeg_name: &self.options.jpeg_name,
            settings: self.processor.settings(),
        });

        let mut stats = RunStats::default();
        for album in scan {
            if cancel.load(Ordering::SeqCst) {
                self.reporter.report(&PrepEvent::Interrupted { stats });
                return Ok(RunOutcome::Interrupted(stats));
            }

            let outcome = self.process_directory(&album);
            stats.record(&outcome);
        }

        // Walk cut short, or interrupt landed while the last directory was in flight
        if cancel.load(Ordering::SeqCst) {
            self.reporter.report(&PrepEvent::Interrupted { stats });
            return Ok(RunOutcome::Interrupted(stats));
        }

        self.reporter.report(&PrepEvent::Completed { stats });
        Ok(RunOutcome::Completed(stats))
    }

    /// Take the first audio file's picture and write the cover next to it
    pub fn process_directory(&mut self, album: &AlbumDirectory) -> DirectoryOutcome {
        let source = album.selected();
        self.reporter.report(&PrepEvent::DirectoryStarted {
            directory: album.path(),
            audio_files: album.audio_files().len(),
            selected: source,
        });

        let picture = match self.extract(source) {
            Extraction::Found(picture) => picture,
            Extraction::Missing => {
                self.reporter.report(&PrepEvent::NoPicture { file: source });
                return DirectoryOutcome::NoPicture;
            }
            Extraction::Failed(error) => {
                self.reporter.report(&PrepEvent::ExtractionFailed {
                    file: source,
                    error: &error,
                });
                self.reporter.report(&PrepEvent::NoPicture { file: source });
                return DirectoryOutcome::NoPicture;
            }
        };

        let output = album.path().join(&self.options.jpeg_name);
        match self.save(&picture, &output) {
            Ok(()) => {
                self.reporter.report(&PrepEvent::CoverSaved { output: &output });
                DirectoryOutcome::Saved { output }
            }
            Err(e) => {
                let error = e.to_string();
                self.reporter.report(&PrepEvent::SaveFailed {
                    output: &output,
                    error: &error,
                });
                DirectoryOutcome::SaveFailed { output, error }
            }
        }
    }

    fn extract(&mut self, file: &Path) -> Extraction {
        match self.extractor.extract(file) {
            Ok(Some(picture)) => {
                self.reporter.report(&PrepEvent::PictureExtracted { picture: &picture });
                Extraction::Found(picture)
            }
            Ok(None) => Extraction::Missing,
            Err(e) => Extraction::Failed(e.to_string()),
        }
    }

    fn save(&mut self, picture: &EmbeddedPicture, output: &Path) -> bentley_artwork::Result<()> {
        let image = processor::decode(&picture.data)?;
        self.reporter.report(&PrepEvent::OriginalSize {
            width: image.width(),
            height: image.height(),
            mode: ColorMode::of(&image),
        });

        self.processor.save(image, output)
    }
}
