//! The editor controller: single owner of all mutable state.
//!
//! The presentation layer reads through `&Editor` and reports user intents
//! as [`Command`]s. Layout is recomputed from scratch on every read, so it
//! always reflects the latest store snapshot and drag state together.

use crate::config::EditorConfig;
use crate::drag::{DragMachine, Handle, Point};
use crate::flow::{self, Placement};
use crate::geometry::{self, GeometryMap, LayoutInput};
use crate::settings::{Justification, LayoutSettings};
use crate::store::{Entry, ImageKey, ImageStore, VerticalAlign};

pub const DEFAULT_CONTAINER_WIDTH: f32 = 1000.0;

/// A user intent, as reported by the presentation layer.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    AddImage,
    SetUrl { key: ImageKey, url: String },
    Remove(ImageKey),
    PutBack(ImageKey),
    SetAlign { key: ImageKey, align: VerticalAlign },
    SetJustification(Justification),
    ToggleMargins,
    ToggleBorders,
    /// Pointer went down on a resize handle. `origin` is the image's
    /// top-left corner in the same space as later pointer positions.
    PointerDown {
        key: ImageKey,
        handle: Handle,
        origin: Point,
    },
    PointerMove(Point),
    /// Pointer released anywhere in the window.
    PointerUp,
    ContainerResized(f32),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Ignored,
}

impl From<bool> for Outcome {
    fn from(applied: bool) -> Self {
        if applied {
            Self::Applied
        } else {
            Self::Ignored
        }
    }
}

/// Positions of both image groups, each relative to its own container.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BoardLayout {
    pub geometry: GeometryMap,
    pub displayed: Vec<Placement>,
    pub removed: Vec<Placement>,
}

#[derive(Clone, Debug)]
pub struct Editor {
    store: ImageStore,
    settings: LayoutSettings,
    drag: DragMachine,
    config: EditorConfig,
    container_width: f32,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl Editor {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            store: ImageStore::new(),
            settings: LayoutSettings::default(),
            drag: DragMachine::from_config(&config),
            config,
            container_width: DEFAULT_CONTAINER_WIDTH,
        }
    }

    pub fn store(&self) -> &ImageStore {
        &self.store
    }

    pub fn settings(&self) -> &LayoutSettings {
        &self.settings
    }

    pub fn drag(&self) -> &DragMachine {
        &self.drag
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn container_width(&self) -> f32 {
        self.container_width
    }

    pub fn displayed(&self) -> Vec<Entry> {
        self.store.displayed()
    }

    pub fn removed(&self) -> Vec<Entry> {
        self.store.removed()
    }

    /// Layout controls do nothing while the grid is empty.
    pub fn controls_enabled(&self) -> bool {
        self.store.displayed_count() > 0
    }

    pub fn apply(&mut self, command: Command) -> Outcome {
        let outcome = match &command {
            Command::AddImage => {
                self.store.add_image();
                Outcome::Applied
            }
            Command::SetUrl { key, url } => self.store.set_url(key, url.as_str()).into(),
            Command::Remove(key) => self.store.set_display(key, false).into(),
            Command::PutBack(key) => self.store.set_display(key, true).into(),
            Command::SetAlign { key, align } => self.store.set_align(key, *align).into(),
            Command::SetJustification(justification) => {
                self.with_controls(|s| s.set_justification(*justification))
            }
            Command::ToggleMargins => self.with_controls(LayoutSettings::toggle_margins),
            Command::ToggleBorders => self.with_controls(LayoutSettings::toggle_borders),
            Command::PointerDown {
                key,
                handle,
                origin,
            } => {
                let displayed = self.store.get(key).is_some_and(|r| r.display);
                (displayed && self.drag.press(key.clone(), *handle, *origin)).into()
            }
            Command::PointerMove(pointer) => self.drag.motion(*pointer).is_some().into(),
            Command::PointerUp => self.drag.release().is_some().into(),
            Command::ContainerResized(width) => {
                if width.is_finite() && *width >= 0.0 {
                    self.container_width = *width;
                    Outcome::Applied
                } else {
                    Outcome::Ignored
                }
            }
        };
        match (outcome, &command) {
            (Outcome::Applied, Command::PointerMove(_) | Command::ContainerResized(_)) => {}
            (Outcome::Applied, _) => log::debug!("applied {command:?}"),
            (Outcome::Ignored, Command::PointerMove(_) | Command::PointerUp) => {}
            (Outcome::Ignored, _) => log::debug!("ignored {command:?}"),
        }
        outcome
    }

    fn with_controls(&mut self, f: impl FnOnce(&mut LayoutSettings)) -> Outcome {
        if !self.controls_enabled() {
            return Outcome::Ignored;
        }
        f(&mut self.settings);
        Outcome::Applied
    }

    pub fn geometry(&self) -> GeometryMap {
        let displayed = self.store.displayed();
        let removed = self.store.removed();
        geometry::compute_geometry(&LayoutInput {
            displayed: &displayed,
            removed: &removed,
            settings: &self.settings,
            container_width: self.container_width,
            drag: &self.drag,
            config: &self.config,
        })
    }

    pub fn layout(&self) -> BoardLayout {
        let geometry = self.geometry();
        let resolve = |entries: Vec<Entry>| {
            entries
                .into_iter()
                .filter_map(|e| {
                    let b = geometry.get(&e.key)?.resolve(self.container_width);
                    Some((e.key, b))
                })
                .collect::<Vec<_>>()
        };
        let displayed = flow::place(
            &resolve(self.store.displayed()),
            self.container_width,
            self.settings.justification,
        );
        let removed = flow::place(
            &resolve(self.store.removed()),
            self.container_width,
            Justification::Start,
        );
        BoardLayout {
            geometry,
            displayed,
            removed,
        }
    }
}
