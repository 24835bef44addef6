//! Property-based invariant tests for the store, geometry and drag engine.
//!
//! 1. Keys grow strictly and are never reused; new records are blank and displayed
//! 2. Displayed and removed views filter exactly by `display` and `url`
//! 3. `set_url` is idempotent
//! 4. With margins on, no image is ever stretched to full width
//! 5. With margins off, only the last of an odd count is stretched
//! 6. Shade strictly decreases with position
//! 7. A right-handle drag never changes height; dragged sizes are never negative

use std::collections::BTreeSet;

use image_board::geometry::{displayed_geometry, shade};
use image_board::{
    Command, DragMachine, EditorConfig, Editor, Extent, Handle, ImageKey, ImageRecord,
    ImageStore, LayoutSettings, Point,
};
use proptest::prelude::*;

// ── Strategies ──────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum Op {
    Add,
    SetUrl(usize, bool),
    SetDisplay(usize, bool),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Add),
        (0usize..20, any::<bool>()).prop_map(|(i, blank)| Op::SetUrl(i, blank)),
        (0usize..20, any::<bool>()).prop_map(|(i, d)| Op::SetDisplay(i, d)),
    ]
}

fn nth_key(n: usize) -> ImageKey {
    ImageKey::from(format!("img{n}").as_str())
}

fn apply_ops(store: &mut ImageStore, ops: &[Op]) {
    for op in ops {
        match op {
            Op::Add => {
                store.add_image();
            }
            Op::SetUrl(i, blank) => {
                let url = if *blank { "" } else { "http://x/y.png" };
                store.set_url(&nth_key(*i), url);
            }
            Op::SetDisplay(i, display) => {
                store.set_display(&nth_key(*i), *display);
            }
        }
    }
}

fn record() -> ImageRecord {
    let mut store = ImageStore::new();
    let key = store.add_image();
    store.get(&key).cloned().unwrap()
}

// ═══════════════════════════════════════════════════════════════════════
// 1–3. Store
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn keys_are_strictly_increasing(count in 1usize..40) {
        let mut store = ImageStore::new();
        let mut ids = Vec::new();
        for _ in 0..count {
            let key = store.add_image();
            let r = store.get(&key).unwrap();
            prop_assert!(r.display);
            prop_assert!(r.url.is_empty());
            ids.push(r.id);
        }
        prop_assert!(ids.windows(2).all(|w| w[0] < w[1]));
        let keys: BTreeSet<_> = store.entries().map(|e| e.key.clone()).collect();
        prop_assert_eq!(keys.len(), count);
    }

    #[test]
    fn views_filter_by_display_and_url(ops in prop::collection::vec(op_strategy(), 0..60)) {
        let mut store = ImageStore::new();
        apply_ops(&mut store, &ops);
        let displayed: Vec<_> = store.displayed().into_iter().map(|e| e.key).collect();
        let removed: Vec<_> = store.removed().into_iter().map(|e| e.key).collect();
        for entry in store.entries() {
            prop_assert_eq!(displayed.contains(&entry.key), entry.record.display);
            prop_assert_eq!(
                removed.contains(&entry.key),
                !entry.record.display && !entry.record.url.is_empty()
            );
        }
    }

    #[test]
    fn hiding_then_reading_views(ops in prop::collection::vec(op_strategy(), 1..40), pick in 0usize..20) {
        let mut store = ImageStore::new();
        store.add_image();
        apply_ops(&mut store, &ops);
        let key = nth_key(pick % store.len());
        store.set_display(&key, false);
        prop_assert!(!store.displayed().iter().any(|e| e.key == key));
        let has_url = !store.get(&key).unwrap().url.is_empty();
        prop_assert_eq!(store.removed().iter().any(|e| e.key == key), has_url);
    }

    #[test]
    fn set_url_is_idempotent(ops in prop::collection::vec(op_strategy(), 1..40), url in "[a-z]{0,12}") {
        let mut store = ImageStore::new();
        store.add_image();
        apply_ops(&mut store, &ops);
        let key = nth_key(0);
        store.set_url(&key, url.clone());
        let once = store.clone();
        store.set_url(&key, url);
        prop_assert_eq!(once, store);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 4–6. Geometry
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn margins_never_stretch(n in 1usize..30) {
        let config = EditorConfig::default();
        let settings = LayoutSettings { margins_enabled: true, ..LayoutSettings::default() };
        for i in 0..n {
            let g = displayed_geometry(i, n, &record(), &settings, None, &config);
            prop_assert_ne!(g.width, Extent::Percent(100.0));
        }
    }

    #[test]
    fn only_last_odd_is_stretched(n in 1usize..30) {
        let config = EditorConfig::default();
        let settings = LayoutSettings::default();
        for i in 0..n {
            let g = displayed_geometry(i, n, &record(), &settings, None, &config);
            let expected = if n % 2 == 1 && i == n - 1 { 100.0 } else { 50.0 };
            prop_assert_eq!(g.width, Extent::Percent(expected));
        }
    }

    #[test]
    fn shade_strictly_decreases(n in 2usize..60) {
        for i in 0..n - 1 {
            let a = shade(i, n, 90.0).unwrap().lightness;
            let b = shade(i + 1, n, 90.0).unwrap().lightness;
            prop_assert!(a > b, "tone({}) = {} should exceed tone({}) = {}", i, a, i + 1, b);
        }
    }

    #[test]
    fn editor_geometry_covers_exactly_the_views(ops in prop::collection::vec(op_strategy(), 0..60)) {
        let mut editor = Editor::default();
        for op in &ops {
            let command = match op {
                Op::Add => Command::AddImage,
                Op::SetUrl(i, blank) => Command::SetUrl {
                    key: nth_key(*i),
                    url: if *blank { String::new() } else { "u.png".into() },
                },
                Op::SetDisplay(i, true) => Command::PutBack(nth_key(*i)),
                Op::SetDisplay(i, false) => Command::Remove(nth_key(*i)),
            };
            editor.apply(command);
        }
        let geometry = editor.geometry();
        prop_assert_eq!(geometry.len(), editor.displayed().len() + editor.removed().len());
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 7. Drag
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn right_drag_isolates_width(
        origin in (0f32..500.0, 0f32..500.0),
        moves in prop::collection::vec((-1000f32..2000.0, -1000f32..2000.0), 1..30),
    ) {
        let mut drag = DragMachine::default();
        drag.press(nth_key(0), Handle::Right, Point::new(origin.0, origin.1));
        for (x, y) in moves {
            let size = drag.motion(Point::new(x, y)).unwrap();
            prop_assert_eq!(size.height, None);
            let width = size.width.unwrap();
            prop_assert!(width >= 0.0);
            prop_assert_eq!(width, (x - origin.0 + 5.0).max(0.0));
        }
    }

    #[test]
    fn release_stops_all_tracking(
        handle in prop_oneof![Just(Handle::Right), Just(Handle::Down), Just(Handle::Corner)],
        release_at in (-5000f32..5000.0, -5000f32..5000.0),
    ) {
        let mut drag = DragMachine::default();
        drag.press(nth_key(0), handle, Point::default());
        drag.motion(Point::new(release_at.0, release_at.1));
        prop_assert!(drag.release().is_some());
        prop_assert!(!drag.is_dragging());
        prop_assert_eq!(drag.motion(Point::new(1.0, 1.0)), None);
        prop_assert_eq!(drag.override_for(&nth_key(0)), None);
    }
}
