//! The image entity store.
//!
//! Records are held behind `Rc` and every mutation swaps in a fresh record,
//! so a snapshot taken before a mutation keeps seeing the old values.

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Stable identifier of an image, e.g. `img3`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ImageKey(String);

impl ImageKey {
    fn for_sequence(n: usize) -> Self {
        Self(format!("img{n}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ImageKey {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

/// Where a displayed image sits inside a row taller than itself.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlign {
    #[default]
    Auto,
    Start,
    End,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    pub id: u64,
    /// Empty means "no image yet".
    pub url: String,
    /// `true` while the image sits in the grid, `false` once it is removed.
    pub display: bool,
    pub align: VerticalAlign,
}

impl ImageRecord {
    fn new(id: u64) -> Self {
        Self {
            id,
            url: String::new(),
            display: true,
            align: VerticalAlign::Auto,
        }
    }

    pub fn is_displayed(&self) -> bool {
        self.display
    }

    /// Removed records only count once they carry a URL; a blank removed
    /// placeholder is not rendered anywhere.
    pub fn is_removed(&self) -> bool {
        !self.display && !self.url.is_empty()
    }
}

/// A `(key, record)` pair as handed out by the store.
#[derive(Clone, Debug, PartialEq)]
pub struct Entry {
    pub key: ImageKey,
    pub record: Rc<ImageRecord>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ImageStore {
    entries: Vec<Entry>,
}

impl ImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Appends a blank displayed record. Keys come from the collection size,
    /// which only grows, so they are never reused.
    pub fn add_image(&mut self) -> ImageKey {
        let n = self.entries.len();
        let key = ImageKey::for_sequence(n);
        self.entries.push(Entry {
            key: key.clone(),
            record: Rc::new(ImageRecord::new(n as u64)),
        });
        log::debug!("added image {key}");
        key
    }

    pub fn get(&self, key: &ImageKey) -> Option<&ImageRecord> {
        self.entries
            .iter()
            .find(|e| &e.key == key)
            .map(|e| e.record.as_ref())
    }

    pub fn set_url(&mut self, key: &ImageKey, url: impl Into<String>) -> bool {
        let url = url.into();
        self.replace(key, |old| ImageRecord {
            url,
            ..old.clone()
        })
    }

    pub fn set_display(&mut self, key: &ImageKey, display: bool) -> bool {
        self.replace(key, |old| ImageRecord {
            display,
            ..old.clone()
        })
    }

    pub fn set_align(&mut self, key: &ImageKey, align: VerticalAlign) -> bool {
        self.replace(key, |old| ImageRecord {
            align,
            ..old.clone()
        })
    }

    /// All entries in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = &Entry> + '_ {
        self.entries.iter()
    }

    pub fn displayed(&self) -> Vec<Entry> {
        self.filtered(ImageRecord::is_displayed)
    }

    pub fn removed(&self) -> Vec<Entry> {
        self.filtered(ImageRecord::is_removed)
    }

    pub fn displayed_count(&self) -> usize {
        self.entries.iter().filter(|e| e.record.display).count()
    }

    fn filtered(&self, keep: fn(&ImageRecord) -> bool) -> Vec<Entry> {
        self.entries
            .iter()
            .filter(|e| keep(&e.record))
            .cloned()
            .collect()
    }

    fn replace(&mut self, key: &ImageKey, f: impl FnOnce(&ImageRecord) -> ImageRecord) -> bool {
        match self.entries.iter_mut().find(|e| &e.key == key) {
            Some(entry) => {
                entry.record = Rc::new(f(&entry.record));
                true
            }
            None => {
                log::warn!("ignoring update for unknown image {key}");
                false
            }
        }
    }
}
