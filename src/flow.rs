//! Row-wrapping placement of resolved boxes.
//!
//! Boxes fill rows left to right and wrap when the next one would overflow
//! the container. Justification moves each row as a whole; vertical
//! alignment moves an item inside its row.

use crate::geometry::ResolvedBox;
use crate::settings::Justification;
use crate::store::{ImageKey, VerticalAlign};

/// Outer (margin-inclusive) box of one item, in container coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct Placement {
    pub key: ImageKey,
    pub x: f32,
    pub y: f32,
    pub inner: ResolvedBox,
}

impl Placement {
    /// Top-left corner of the image itself, past its margins.
    pub fn content_origin(&self) -> (f32, f32) {
        (self.x + self.inner.margin_left, self.y + self.inner.margin_top)
    }
}

/// Total height of a placed flow.
pub fn extent_height(placements: &[Placement]) -> f32 {
    placements
        .iter()
        .map(|p| p.y + p.inner.outer_height())
        .fold(0.0, f32::max)
}

pub fn place(
    items: &[(ImageKey, ResolvedBox)],
    container_width: f32,
    justification: Justification,
) -> Vec<Placement> {
    let mut out = Vec::with_capacity(items.len());
    let mut y = 0.0;
    for row in rows(items, container_width) {
        let used: f32 = row.iter().map(|(_, b)| b.outer_width()).sum();
        let free = (container_width - used).max(0.0);
        let row_height = row.iter().map(|(_, b)| b.outer_height()).fold(0.0, f32::max);

        let mut x = free * justification.lead_fraction();
        for (key, b) in row {
            let dy = match b.align {
                VerticalAlign::End => row_height - b.outer_height(),
                VerticalAlign::Auto | VerticalAlign::Start => 0.0,
            };
            out.push(Placement {
                key: key.clone(),
                x,
                y: y + dy,
                inner: *b,
            });
            x += b.outer_width();
        }
        y += row_height;
    }
    out
}

fn rows(
    items: &[(ImageKey, ResolvedBox)],
    container_width: f32,
) -> Vec<&[(ImageKey, ResolvedBox)]> {
    let mut rows = Vec::new();
    let mut start = 0;
    let mut used = 0.0;
    // Tolerate rounding so two 50% boxes share a row.
    let limit = container_width + 0.01;
    for (i, (_, b)) in items.iter().enumerate() {
        let w = b.outer_width();
        if i > start && used + w > limit {
            rows.push(&items[start..i]);
            start = i;
            used = 0.0;
        }
        used += w;
    }
    if start < items.len() {
        rows.push(&items[start..]);
    }
    rows
}
