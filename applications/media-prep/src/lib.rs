//! Bentley Media Prep - cover art for every album folder
//!
//! Walks a music tree, takes the first FLAC file in each folder, pulls out
//! its first embedded picture and writes it next to the audio as an 800x800
//! JPEG.

pub mod pipeline;
pub mod reporter;

pub use pipeline::{
    DirectoryOutcome, Extraction, Pipeline, PrepOptions, RunOutcome, RunStats, DEFAULT_JPEG_NAME,
    EXIT_FAILURE, EXIT_INTERRUPTED,
};
pub use reporter::{EventKind, LogReporter, PrepEvent, Reporter};
