//! Common test utilities and fixtures

// Each test binary uses a different subset
#![allow(dead_code)]

use bentley_media_prep::{EventKind, PrepEvent, Reporter};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Once;

pub use bentley_artwork::fixtures::{encode, png_bytes, FlacFixture};

static INIT: Once = Once::new();

pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();
    });
}

/// Reporter that keeps every event as kind + debug text
#[derive(Debug, Default)]
pub struct Recorder {
    pub events: Vec<(EventKind, String)>,
}

impl Recorder {
    pub fn kinds(&self) -> Vec<EventKind> {
        self.events.iter().map(|(kind, _)| *kind).collect()
    }

    pub fn count(&self, kind: EventKind) -> usize {
        self.events.iter().filter(|(k, _)| *k == kind).count()
    }

    pub fn texts(&self, kind: EventKind) -> Vec<&str> {
        self.events
            .iter()
            .filter(|(k, _)| *k == kind)
            .map(|(_, text)| text.as_str())
            .collect()
    }
}

impl Reporter for Recorder {
    fn report(&mut self, event: &PrepEvent<'_>) {
        self.events.push((event.kind(), format!("{event:?}")));
    }
}

/// Write a FLAC at `root/rel`, creating parent directories
pub fn write_flac(root: &Path, rel: &str, fixture: &FlacFixture) -> PathBuf {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fixture.write_to(&path).unwrap();
    path
}

/// FLAC with a PNG front cover of the given size
pub fn flac_with_cover(width: u32, height: u32) -> FlacFixture {
    FlacFixture::new().cover("image/png", &png_bytes(width, height))
}

/// Assert `path` is a JPEG and return its dimensions
pub fn jpeg_dimensions(path: &Path) -> (u32, u32) {
    let bytes = fs::read(path).unwrap();
    assert_eq!(
        image::guess_format(&bytes).unwrap(),
        image::ImageFormat::Jpeg,
        "{} is not a JPEG",
        path.display()
    );
    let decoded = image::load_from_memory(&bytes).unwrap();
    (decoded.width(), decoded.height())
}
