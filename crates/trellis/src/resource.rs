//! Asynchronous resource loading.
//!
//! The tree never blocks on IO. Loads are handed to a [`ResourceLoader`],
//! which completes them on its own threads and hands the result back as a
//! callback. The tree turns that callback into a deferred task owned by the
//! requesting widget, so completions for destroyed widgets are dropped.

use std::{fs, sync::Arc, thread};

use crate::error::{Error, Result};

/// A decoded RGBA8 image.
#[derive(Debug, Clone)]
pub struct ImageData {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Tightly packed RGBA8 rows, shared between clones.
    pub pixels: Arc<Vec<u8>>,
}

/// Raw font bytes, ready for a text backend to parse.
#[derive(Debug, Clone)]
pub struct FontData {
    /// The font file contents, shared between clones.
    pub bytes: Arc<Vec<u8>>,
}

/// Completion callback for an image load.
pub type ImageCallback = Box<dyn FnOnce(Result<ImageData>) + Send>;
/// Completion callback for a font load.
pub type FontCallback = Box<dyn FnOnce(Result<FontData>) + Send>;

/// Performs resource loads off the UI thread.
pub trait ResourceLoader: Send + Sync {
    /// Load and decode an image, then invoke `done` with the result. The
    /// callback may run on any thread.
    fn load_image(&self, path: &str, done: ImageCallback);

    /// Load a font file, then invoke `done` with the result. The callback
    /// may run on any thread.
    fn load_font(&self, path: &str, done: FontCallback);
}

/// Filesystem-backed loader. Each request runs on its own thread; images
/// are decoded with the `image` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileLoader;

impl ResourceLoader for FileLoader {
    fn load_image(&self, path: &str, done: ImageCallback) {
        let path = path.to_string();
        thread::spawn(move || {
            done(decode_image(&path));
        });
    }

    fn load_font(&self, path: &str, done: FontCallback) {
        let path = path.to_string();
        thread::spawn(move || {
            let result = fs::read(&path)
                .map(|bytes| FontData {
                    bytes: Arc::new(bytes),
                })
                .map_err(|e| Error::Resource {
                    path: path.clone(),
                    reason: e.to_string(),
                });
            done(result);
        });
    }
}

fn decode_image(path: &str) -> Result<ImageData> {
    let img = image::open(path).map_err(|e| Error::Resource {
        path: path.to_string(),
        reason: e.to_string(),
    })?;
    let rgba = img.to_rgba8();
    Ok(ImageData {
        width: rgba.width(),
        height: rgba.height(),
        pixels: Arc::new(rgba.into_raw()),
    })
}
