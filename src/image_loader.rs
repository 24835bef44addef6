use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread;

use eframe::egui;
use image_board::{Error, Result};

/// Decoded pixels for one URL, sent back from a worker thread.
struct ImageLoadData {
    url: String,
    result: Result<egui::ColorImage>,
}

enum TextureSlot {
    Loading,
    Ready(egui::TextureHandle),
    /// Remote, missing, or undecodable; the shaded placeholder is drawn.
    Unavailable,
}

/// Textures keyed by image URL. Only local files are decoded.
pub struct TextureCache {
    slots: HashMap<String, TextureSlot>,
    image_rx: Receiver<ImageLoadData>,
    image_tx: Sender<ImageLoadData>,
}

impl Default for TextureCache {
    fn default() -> Self {
        let (tx, rx) = channel();
        Self {
            slots: HashMap::new(),
            image_rx: rx,
            image_tx: tx,
        }
    }
}

impl TextureCache {
    /// Uploads whatever the workers finished since the last frame.
    pub fn poll(&mut self, ctx: &egui::Context) {
        while let Ok(data) = self.image_rx.try_recv() {
            let slot = match data.result {
                Ok(image) => {
                    let texture = ctx.load_texture(
                        format!("board-{}", data.url),
                        image,
                        egui::TextureOptions::LINEAR,
                    );
                    TextureSlot::Ready(texture)
                }
                Err(err) => {
                    log::error!("{err}");
                    TextureSlot::Unavailable
                }
            };
            self.slots.insert(data.url, slot);
        }
    }

    /// Returns the texture for `url`, starting a load the first time a
    /// local file path is seen.
    pub fn get(&mut self, ctx: &egui::Context, url: &str) -> Option<egui::TextureId> {
        if url.is_empty() {
            return None;
        }
        if !self.slots.contains_key(url) {
            let slot = match local_path(url) {
                Some(path) => {
                    self.spawn_load(ctx.clone(), url.to_owned(), path);
                    TextureSlot::Loading
                }
                None => TextureSlot::Unavailable,
            };
            self.slots.insert(url.to_owned(), slot);
        }
        match self.slots.get(url) {
            Some(TextureSlot::Ready(texture)) => Some(texture.id()),
            _ => None,
        }
    }

    /// Drops textures no record refers to any more.
    pub fn retain_urls(&mut self, in_use: &HashSet<&str>) {
        self.slots.retain(|url, slot| {
            in_use.contains(url.as_str()) || matches!(slot, TextureSlot::Loading)
        });
    }

    fn spawn_load(&self, ctx: egui::Context, url: String, path: PathBuf) {
        let tx = self.image_tx.clone();
        thread::spawn(move || {
            let result = decode(&path, &url);
            let _ = tx.send(ImageLoadData { url, result });
            ctx.request_repaint();
        });
    }
}

fn local_path(url: &str) -> Option<PathBuf> {
    let path = Path::new(url.strip_prefix("file://").unwrap_or(url));
    path.is_file().then(|| path.to_path_buf())
}

fn decode(path: &Path, url: &str) -> Result<egui::ColorImage> {
    let img = image::open(path).map_err(|e| Error::Image {
        path: url.to_owned(),
        reason: e.to_string(),
    })?;
    let buffer = img.to_rgba8();
    let size = [buffer.width() as usize, buffer.height() as usize];
    if size[0] == 0 || size[1] == 0 {
        return Err(Error::Image {
            path: url.to_owned(),
            reason: "image has no pixels".to_owned(),
        });
    }
    Ok(egui::ColorImage::from_rgba_unmultiplied(size, buffer.as_raw()))
}
