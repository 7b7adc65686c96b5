//! Asynchronous, best-effort image decoding.
//!
//! One detached thread walks the item list, decodes each file with the
//! `image` crate, and sends the RGBA result over a channel. The frame
//! loop drains the channel with `try_recv`, so a finished decode only
//! ever touches its own item's texture, on the render thread. Failures
//! are logged and skipped; a plane without pixels just keeps its
//! placeholder.

use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver};

/// A decoded image on its way to an item's texture.
pub(crate) struct LoadedImage {
    /// Index into the gallery's (doubled) item list.
    pub index: usize,
    /// Pixel width.
    pub width: u32,
    /// Pixel height.
    pub height: u32,
    /// Tightly-packed RGBA8 rows, top-first.
    pub rgba: Vec<u8>,
}

/// Receiving end of the decode thread.
pub(crate) struct ImageLoader {
    rx: Receiver<LoadedImage>,
}

impl ImageLoader {
    /// Spawn the decode thread over `(item index, path)` jobs. Returns
    /// `None` (with a log line) if the thread cannot be spawned; the
    /// gallery then simply shows placeholders.
    pub fn spawn(jobs: Vec<(usize, PathBuf)>) -> Option<Self> {
        let (tx, rx) = mpsc::channel();

        let spawned = std::thread::Builder::new()
            .name("galleria-image-loader".to_owned())
            .spawn(move || {
                for (index, path) in jobs {
                    match image::open(&path) {
                        Ok(decoded) => {
                            let rgba = decoded.to_rgba8();
                            let (width, height) = rgba.dimensions();
                            log::debug!(
                                "decoded {} ({width}x{height})",
                                path.display()
                            );
                            // Receiver gone means the gallery was torn
                            // down; stop decoding.
                            if tx
                                .send(LoadedImage {
                                    index,
                                    width,
                                    height,
                                    rgba: rgba.into_raw(),
                                })
                                .is_err()
                            {
                                return;
                            }
                        }
                        Err(e) => {
                            log::warn!(
                                "failed to decode {}: {e}",
                                path.display()
                            );
                        }
                    }
                }
            });

        match spawned {
            Ok(_handle) => Some(Self { rx }),
            Err(e) => {
                log::warn!("could not spawn image loader: {e}");
                None
            }
        }
    }

    /// Take every image that has finished decoding since the last call.
    pub fn drain(&self) -> Vec<LoadedImage> {
        let mut ready = Vec::new();
        while let Ok(img) = self.rx.try_recv() {
            ready.push(img);
        }
        ready
    }
}
