//! Layout and resize engine for an image-board editor.
//!
//! Images live in an [`ImageStore`], global toggles in [`LayoutSettings`],
//! and an in-progress resize gesture in a [`DragMachine`]. The [`Editor`]
//! owns all three and derives per-image [`Geometry`] on demand. Rendering
//! is left to the caller (see the `image_board` binary for an egui one).
//!
//! ```
//! use image_board::{Command, Editor, Extent, ImageKey};
//!
//! let mut editor = Editor::default();
//! for _ in 0..3 {
//!     editor.apply(Command::AddImage);
//! }
//! let geometry = editor.geometry();
//! assert_eq!(geometry[&ImageKey::from("img2")].width, Extent::Percent(100.0));
//! ```

#![forbid(unsafe_code)]

pub mod config;
pub mod drag;
pub mod editor;
pub mod error;
pub mod flow;
pub mod geometry;
pub mod settings;
pub mod store;

pub use config::EditorConfig;
pub use drag::{Axes, DragMachine, DragSession, DragState, Handle, Point, SizeOverride};
pub use editor::{BoardLayout, Command, Editor, Outcome};
pub use error::{Error, Result};
pub use flow::Placement;
pub use geometry::{
    compute_geometry, Border, Extent, Geometry, GeometryMap, LayoutInput, Margin, ResolvedBox,
    Shade,
};
pub use settings::{Justification, LayoutSettings};
pub use store::{Entry, ImageKey, ImageRecord, ImageStore, VerticalAlign};
