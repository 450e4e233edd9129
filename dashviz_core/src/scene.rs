// Copyright 2026 the Dashviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyed scene reconciliation.

use hashbrown::HashMap;
use hashbrown::hash_map::Entry;
use kurbo::Rect;

use crate::{Mark, MarkId, MarkKind, MarkPayload};

/// A change to a single mark between two ticks.
#[derive(Clone, Debug, PartialEq)]
pub enum MarkDiff {
    /// A mark id appeared.
    Enter {
        /// Mark id.
        id: MarkId,
        /// Mark kind.
        kind: MarkKind,
        /// Paint order.
        z_index: i32,
        /// Visibility.
        visible: bool,
        /// New payload.
        new: Box<MarkPayload>,
        /// Bounds of the new payload, if known.
        bounds: Option<Rect>,
    },
    /// An existing mark changed payload, z-order or visibility.
    Update {
        /// Mark id.
        id: MarkId,
        /// Mark kind (of the new payload).
        kind: MarkKind,
        /// Previous paint order.
        old_z_index: i32,
        /// New paint order.
        new_z_index: i32,
        /// New visibility.
        visible: bool,
        /// Previous payload.
        old: Box<MarkPayload>,
        /// New payload.
        new: Box<MarkPayload>,
        /// Bounds of the new payload, if known.
        bounds: Option<Rect>,
    },
    /// A mark id is no longer emitted.
    Exit {
        /// Mark id.
        id: MarkId,
        /// Mark kind.
        kind: MarkKind,
        /// Last payload.
        old: Box<MarkPayload>,
    },
}

impl MarkDiff {
    /// Returns the id this diff refers to.
    pub fn id(&self) -> MarkId {
        match self {
            Self::Enter { id, .. } | Self::Update { id, .. } | Self::Exit { id, .. } => *id,
        }
    }
}

/// The retained set of marks from the previous tick.
#[derive(Debug, Default)]
pub struct Scene {
    marks: HashMap<MarkId, Mark>,
    ticks: u64,
}

impl Scene {
    /// Creates an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of marks currently retained.
    pub fn len(&self) -> usize {
        self.marks.len()
    }

    /// Returns `true` if no marks are retained.
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// Number of ticks applied so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Returns the retained mark with the given id.
    pub fn get(&self, id: MarkId) -> Option<&Mark> {
        self.marks.get(&id)
    }

    /// Replaces the retained marks with `marks` and reports what changed.
    ///
    /// Enter/update diffs follow the order of `marks`; exit diffs follow, sorted by id. Unchanged
    /// marks produce no diff. If `marks` contains an id twice, the later mark wins.
    pub fn tick(&mut self, marks: Vec<Mark>) -> Vec<MarkDiff> {
        self.ticks += 1;

        let mut next: HashMap<MarkId, Mark> = HashMap::with_capacity(marks.len());
        let mut order: Vec<MarkId> = Vec::with_capacity(marks.len());
        for mark in marks {
            match next.entry(mark.id) {
                Entry::Occupied(mut e) => {
                    e.insert(mark);
                }
                Entry::Vacant(e) => {
                    order.push(mark.id);
                    e.insert(mark);
                }
            }
        }

        let mut diffs = Vec::new();
        for id in &order {
            let Some(mark) = next.get(id) else {
                continue;
            };
            match self.marks.get(id) {
                None => diffs.push(MarkDiff::Enter {
                    id: *id,
                    kind: mark.kind(),
                    z_index: mark.z_index,
                    visible: mark.visible,
                    new: Box::new(mark.payload.clone()),
                    bounds: mark.payload.bounds(),
                }),
                Some(old) if old != mark => diffs.push(MarkDiff::Update {
                    id: *id,
                    kind: mark.kind(),
                    old_z_index: old.z_index,
                    new_z_index: mark.z_index,
                    visible: mark.visible,
                    old: Box::new(old.payload.clone()),
                    new: Box::new(mark.payload.clone()),
                    bounds: mark.payload.bounds(),
                }),
                Some(_) => {}
            }
        }

        let mut exits: Vec<MarkId> = self
            .marks
            .keys()
            .filter(|id| !next.contains_key(*id))
            .copied()
            .collect();
        exits.sort();
        for id in exits {
            if let Some(old) = self.marks.remove(&id) {
                diffs.push(MarkDiff::Exit {
                    id,
                    kind: old.kind(),
                    old: Box::new(old.payload),
                });
            }
        }

        self.marks = next;
        diffs
    }

    /// Removes every mark, returning an exit diff for each (sorted by id).
    pub fn clear(&mut self) -> Vec<MarkDiff> {
        self.tick(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Rect;
    use peniko::color::palette::css;

    use super::*;

    fn rect_mark(key: &str, x: f64) -> Mark {
        Mark::builder(MarkId::for_key(7, key))
            .rect(Rect::new(x, 0.0, x + 10.0, 10.0))
            .fill(css::TOMATO)
            .build()
    }

    #[test]
    fn reorder_only_yields_no_diffs() {
        let mut scene = Scene::new();
        let diffs = scene.tick(vec![rect_mark("a", 0.0), rect_mark("b", 20.0)]);
        assert_eq!(diffs.len(), 2);
        assert!(matches!(diffs[0], MarkDiff::Enter { .. }));

        let diffs = scene.tick(vec![rect_mark("b", 20.0), rect_mark("a", 0.0)]);
        assert!(diffs.is_empty(), "identity is the key, not the position");
    }

    #[test]
    fn update_and_exit_are_keyed() {
        let mut scene = Scene::new();
        scene.tick(vec![rect_mark("a", 0.0), rect_mark("b", 20.0)]);

        let diffs = scene.tick(vec![rect_mark("a", 5.0)]);
        let [
            MarkDiff::Update { id: up, old, new, .. },
            MarkDiff::Exit { id: gone, .. },
        ] = &diffs[..]
        else {
            panic!("expected an update followed by an exit, got {diffs:?}");
        };
        assert_eq!(*up, MarkId::for_key(7, "a"));
        assert_eq!(*gone, MarkId::for_key(7, "b"));
        assert_eq!(old.bounds().map(|r| r.x0), Some(0.0));
        assert_eq!(new.bounds().map(|r| r.x0), Some(5.0));
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn visibility_toggle_is_an_update() {
        let mut scene = Scene::new();
        scene.tick(vec![rect_mark("tip", 0.0)]);
        let mut hidden = rect_mark("tip", 0.0);
        hidden.visible = false;
        let diffs = scene.tick(vec![hidden]);
        let [MarkDiff::Update { visible, .. }] = &diffs[..] else {
            panic!("expected a single update, got {diffs:?}");
        };
        assert!(!visible);
    }

    #[test]
    fn clear_exits_everything() {
        let mut scene = Scene::new();
        scene.tick(vec![rect_mark("a", 0.0), rect_mark("b", 20.0)]);
        let diffs = scene.clear();
        assert_eq!(diffs.len(), 2);
        assert!(diffs.iter().all(|d| matches!(d, MarkDiff::Exit { .. })));
        assert!(scene.is_empty());
        assert_eq!(scene.ticks(), 2);
    }
}
