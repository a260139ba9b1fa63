//! Progress reporting
//!
//! The pipeline describes what happens through [`PrepEvent`]s; a
//! [`Reporter`] decides how to show them. Reporters only observe, they never
//! steer the run.

use crate::pipeline::RunStats;
use bentley_artwork::{ColorMode, CoverSettings, EmbeddedPicture};
use std::path::Path;

const SEPARATOR_WIDTH: usize = 80;

/// Something worth telling the user about
#[derive(Debug, Clone, Copy)]
pub enum PrepEvent<'a> {
    /// Root validated, walk about to begin
    RunStarted {
        root: &'a Path,
        jpeg_name: &'a str,
        settings: CoverSettings,
    },

    /// An album directory was found
    DirectoryStarted {
        directory: &'a Path,
        audio_files: usize,
        selected: &'a Path,
    },

    /// The selected file had a picture block
    PictureExtracted { picture: &'a EmbeddedPicture },

    /// The selected file could not be parsed
    ExtractionFailed { file: &'a Path, error: &'a str },

    /// Nothing usable in the selected file; directory skipped
    NoPicture { file: &'a Path },

    /// Picture decoded
    OriginalSize {
        width: u32,
        height: u32,
        mode: ColorMode,
    },

    /// Cover written
    CoverSaved { output: &'a Path },

    /// Decoding, encoding or writing failed; directory skipped
    SaveFailed { output: &'a Path, error: &'a str },

    /// Cancelled before the walk finished
    Interrupted { stats: RunStats },

    /// Walk finished
    Completed { stats: RunStats },
}

/// Fieldless mirror of [`PrepEvent`], handy for filtering and assertions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    RunStarted,
    DirectoryStarted,
    PictureExtracted,
    ExtractionFailed,
    NoPicture,
    OriginalSize,
    CoverSaved,
    SaveFailed,
    Interrupted,
    Completed,
}

impl PrepEvent<'_> {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::RunStarted { .. } => EventKind::RunStarted,
            Self::DirectoryStarted { .. } => EventKind::DirectoryStarted,
            Self::PictureExtracted { .. } => EventKind::PictureExtracted,
            Self::ExtractionFailed { .. } => EventKind::ExtractionFailed,
            Self::NoPicture { .. } => EventKind::NoPicture,
            Self::OriginalSize { .. } => EventKind::OriginalSize,
            Self::CoverSaved { .. } => EventKind::CoverSaved,
            Self::SaveFailed { .. } => EventKind::SaveFailed,
            Self::Interrupted { .. } => EventKind::Interrupted,
            Self::Completed { .. } => EventKind::Completed,
        }
    }
}

/// Receives pipeline events
pub trait Reporter {
    fn report(&mut self, event: &PrepEvent<'_>);
}

impl<R: Reporter + ?Sized> Reporter for &mut R {
    fn report(&mut self, event: &PrepEvent<'_>) {
        (**self).report(event);
    }
}

/// Writes one log line per event through `tracing`
///
/// Timestamps come from the installed subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl LogReporter {
    pub fn new() -> Self {
        Self
    }

    fn separator() {
        tracing::info!("{}", "-".repeat(SEPARATOR_WIDTH));
    }
}

impl Reporter for LogReporter {
    fn report(&mut self, event: &PrepEvent<'_>) {
        match *event {
            PrepEvent::RunStarted {
                root,
                jpeg_name,
                settings,
            } => {
                tracing::info!("Starting processing of: {}", root.display());
                tracing::info!("Output filename: {}", jpeg_name);
                tracing::info!(
                    "Target size: {}x{}, Quality: {}",
                    settings.width,
                    settings.height,
                    settings.quality
                );
                Self::separator();
            }
            PrepEvent::DirectoryStarted {
                directory,
                audio_files,
                selected,
            } => {
                tracing::info!("Processing folder: {}", directory.display());
                tracing::info!("  Found {} FLAC file(s)", audio_files);
                tracing::info!("  Extracting from: {}", file_name(selected));
            }
            PrepEvent::PictureExtracted { picture } => {
                tracing::info!(
                    "  Embedded picture: {} bytes, {}, declared {}x{} at {}-bit",
                    picture.data.len(),
                    picture.mime_type,
                    picture.declared_width,
                    picture.declared_height,
                    picture.declared_color_depth
                );
            }
            PrepEvent::ExtractionFailed { file, error } => {
                tracing::error!(
                    "Failed to extract cover art from {}: {}",
                    file.display(),
                    error
                );
            }
            PrepEvent::NoPicture { file } => {
                tracing::warn!("  No cover art found in {}", file_name(file));
            }
            PrepEvent::OriginalSize {
                width,
                height,
                mode,
            } => {
                tracing::info!("  Original cover art size: {}x{} ({:?})", width, height, mode);
            }
            PrepEvent::CoverSaved { output } => {
                tracing::info!("SUCCESS: Created {}", output.display());
                tracing::info!("");
            }
            PrepEvent::SaveFailed { output, error } => {
                tracing::error!("Failed to save image to {}: {}", output.display(), error);
                tracing::info!("");
            }
            PrepEvent::Interrupted { stats } => {
                tracing::warn!("INTERRUPTED: Processing cancelled by user");
                tracing::info!(
                    "Stopped after {} folder(s), {} image(s) created",
                    stats.folders_scanned,
                    stats.images_created
                );
            }
            PrepEvent::Completed { stats } => {
                Self::separator();
                tracing::info!("Processing complete!");
                tracing::info!("Folders scanned: {}", stats.folders_scanned);
                tracing::info!("Folders processed: {}", stats.folders_processed);
                tracing::info!("Images created: {}", stats.images_created);
            }
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Kinds(Vec<EventKind>);

    impl Reporter for Kinds {
        fn report(&mut self, event: &PrepEvent<'_>) {
            self.0.push(event.kind());
        }
    }

    fn send_two<R: Reporter>(mut reporter: R) {
        reporter.report(&PrepEvent::NoPicture {
            file: Path::new("/music/a/01.flac"),
        });
        reporter.report(&PrepEvent::Completed {
            stats: RunStats::default(),
        });
    }

    #[test]
    fn mutable_reference_forwards_events() {
        let mut kinds = Kinds::default();
        send_two(&mut kinds);
        assert_eq!(kinds.0, vec![EventKind::NoPicture, EventKind::Completed]);
    }

    #[test]
    fn log_reporter_handles_every_event() {
        let picture = EmbeddedPicture::new(vec![1, 2, 3], "image/png".to_string());
        let path = Path::new("/music/a/01.flac");
        let events = [
            PrepEvent::RunStarted {
                root: Path::new("/music"),
                jpeg_name: "cover.jpg",
                settings: CoverSettings::default(),
            },
            PrepEvent::DirectoryStarted {
                directory: Path::new("/music/a"),
                audio_files: 3,
                selected: path,
            },
            PrepEvent::PictureExtracted { picture: &picture },
            PrepEvent::ExtractionFailed {
                file: path,
                error: "bad header",
            },
            PrepEvent::NoPicture { file: path },
            PrepEvent::OriginalSize {
                width: 1200,
                height: 1200,
                mode: ColorMode::Rgb,
            },
            PrepEvent::CoverSaved {
                output: Path::new("/music/a/cover.jpg"),
            },
            PrepEvent::SaveFailed {
                output: Path::new("/music/a/cover.jpg"),
                error: "disk full",
            },
            PrepEvent::Interrupted {
                stats: RunStats::default(),
            },
            PrepEvent::Completed {
                stats: RunStats::default(),
            },
        ];

        let mut reporter = LogReporter::new();
        for event in &events {
            reporter.report(event);
        }
    }

    #[test]
    fn file_name_falls_back_to_full_path() {
        assert_eq!(file_name(Path::new("/music/a/01.flac")), "01.flac");
        assert_eq!(file_name(Path::new("/")), "/");
    }
}
