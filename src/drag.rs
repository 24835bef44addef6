//! Pointer-driven resize of a single displayed image.
//!
//! ```text
//!            press(handle)             release (anywhere)
//!   Idle ───────────────────► Dragging ──────────────────► Idle
//!                              │    ▲
//!                              └────┘ motion: update the grabbed axes
//! ```

use serde::{Deserialize, Serialize};

use crate::config::EditorConfig;
use crate::store::ImageKey;

/// Which resize grip the pointer went down on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Handle {
    Right,
    Down,
    Corner,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axes {
    Width,
    Height,
    Both,
}

impl Axes {
    pub fn width(self) -> bool {
        matches!(self, Self::Width | Self::Both)
    }

    pub fn height(self) -> bool {
        matches!(self, Self::Height | Self::Both)
    }
}

impl From<Handle> for Axes {
    fn from(handle: Handle) -> Self {
        match handle {
            Handle::Right => Self::Width,
            Handle::Down => Self::Height,
            Handle::Corner => Self::Both,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DragSession {
    pub image: ImageKey,
    pub axes: Axes,
    /// Top-left corner of the image when the gesture started.
    pub origin: Point,
}

/// Dimensions forced by the active gesture. An axis stays `None` until the
/// first pointer move, and forever if the handle does not control it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SizeOverride {
    pub width: Option<f32>,
    pub height: Option<f32>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        session: DragSession,
        size: SizeOverride,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct DragMachine {
    state: DragState,
    padding: f32,
    min_size: f32,
}

impl Default for DragMachine {
    fn default() -> Self {
        Self::from_config(&EditorConfig::default())
    }
}

impl DragMachine {
    pub fn new(padding: f32, min_size: f32) -> Self {
        Self {
            state: DragState::Idle,
            padding,
            min_size: min_size.max(0.0),
        }
    }

    pub fn from_config(config: &EditorConfig) -> Self {
        Self::new(config.drag_padding, config.min_drag_size)
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    pub fn active_image(&self) -> Option<&ImageKey> {
        match &self.state {
            DragState::Idle => None,
            DragState::Dragging { session, .. } => Some(&session.image),
        }
    }

    /// Starts a gesture. Returns `false` (and changes nothing) if another
    /// gesture is already in progress.
    pub fn press(&mut self, image: ImageKey, handle: Handle, origin: Point) -> bool {
        if let DragState::Dragging { session, .. } = &self.state {
            log::debug!(
                "ignoring {handle:?} press on {image}: {} is already being resized",
                session.image
            );
            return false;
        }
        log::debug!("resize started on {image} with {handle:?} handle");
        self.state = DragState::Dragging {
            session: DragSession {
                image,
                axes: handle.into(),
                origin,
            },
            size: SizeOverride::default(),
        };
        true
    }

    /// Tracks the pointer. Only the axes grabbed at press time change.
    pub fn motion(&mut self, pointer: Point) -> Option<SizeOverride> {
        let (padding, min_size) = (self.padding, self.min_size);
        let DragState::Dragging { session, size } = &mut self.state else {
            return None;
        };
        let extent = |coord: f32, origin: f32| (coord - origin + padding).max(min_size);
        if session.axes.width() {
            size.width = Some(extent(pointer.x, session.origin.x));
        }
        if session.axes.height() {
            size.height = Some(extent(pointer.y, session.origin.y));
        }
        Some(*size)
    }

    /// Ends the gesture wherever the pointer is. The override is dropped.
    pub fn release(&mut self) -> Option<DragSession> {
        match std::mem::take(&mut self.state) {
            DragState::Idle => None,
            DragState::Dragging { session, size } => {
                log::debug!("resize ended on {} at {size:?}", session.image);
                Some(session)
            }
        }
    }

    pub fn override_for(&self, key: &ImageKey) -> Option<SizeOverride> {
        match &self.state {
            DragState::Dragging { session, size } if &session.image == key => Some(*size),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> ImageKey {
        ImageKey::from("img0")
    }

    #[test]
    fn handle_selects_axes() {
        assert_eq!(Axes::from(Handle::Right), Axes::Width);
        assert_eq!(Axes::from(Handle::Down), Axes::Height);
        assert_eq!(Axes::from(Handle::Corner), Axes::Both);
    }

    #[test]
    fn right_handle_only_changes_width() {
        let mut drag = DragMachine::new(5.0, 0.0);
        assert!(drag.press(key(), Handle::Right, Point::new(100.0, 50.0)));
        let size = drag.motion(Point::new(300.0, 900.0)).unwrap();
        assert_eq!(size.width, Some(205.0));
        assert_eq!(size.height, None);
    }

    #[test]
    fn down_handle_only_changes_height() {
        let mut drag = DragMachine::new(5.0, 0.0);
        drag.press(key(), Handle::Down, Point::new(100.0, 50.0));
        let size = drag.motion(Point::new(999.0, 150.0)).unwrap();
        assert_eq!(size.width, None);
        assert_eq!(size.height, Some(105.0));
    }

    #[test]
    fn corner_handle_changes_both() {
        let mut drag = DragMachine::new(5.0, 0.0);
        drag.press(key(), Handle::Corner, Point::new(10.0, 20.0));
        let size = drag.motion(Point::new(110.0, 70.0)).unwrap();
        assert_eq!(size.width, Some(105.0));
        assert_eq!(size.height, Some(55.0));
    }

    #[test]
    fn reverse_motion_is_clamped() {
        let mut drag = DragMachine::new(5.0, 0.0);
        drag.press(key(), Handle::Corner, Point::new(100.0, 100.0));
        let size = drag.motion(Point::new(0.0, 0.0)).unwrap();
        assert_eq!(size.width, Some(0.0));
        assert_eq!(size.height, Some(0.0));

        let mut floored = DragMachine::new(5.0, 20.0);
        floored.press(key(), Handle::Right, Point::new(100.0, 100.0));
        assert_eq!(floored.motion(Point::new(-50.0, 0.0)).unwrap().width, Some(20.0));
    }

    #[test]
    fn second_press_is_ignored() {
        let mut drag = DragMachine::default();
        drag.press(key(), Handle::Right, Point::default());
        assert!(!drag.press(ImageKey::from("img1"), Handle::Down, Point::default()));
        assert_eq!(drag.active_image(), Some(&key()));
    }

    #[test]
    fn release_returns_to_idle_and_stops_tracking() {
        let mut drag = DragMachine::default();
        drag.press(key(), Handle::Corner, Point::default());
        drag.motion(Point::new(50.0, 50.0));
        let session = drag.release().unwrap();
        assert_eq!(session.image, key());
        assert_eq!(*drag.state(), DragState::Idle);
        assert_eq!(drag.motion(Point::new(80.0, 80.0)), None);
        assert_eq!(drag.override_for(&key()), None);
        assert_eq!(drag.release(), None);
    }

    #[test]
    fn override_only_for_active_image() {
        let mut drag = DragMachine::default();
        drag.press(key(), Handle::Right, Point::default());
        drag.motion(Point::new(40.0, 0.0));
        assert!(drag.override_for(&key()).is_some());
        assert!(drag.override_for(&ImageKey::from("img1")).is_none());
    }
}
