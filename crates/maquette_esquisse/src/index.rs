//! Boundary index.
//!
//! Keeps every discovered [`ComponentBoundary`] addressable both by name and
//! by source span. Span lookups return the innermost boundary containing the
//! queried range, so markup inside a nested component is attributed to that
//! component rather than to its enclosing one.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use maquette_carton::{CompactString, FxHashMap};

use crate::boundary::ComponentBoundary;

/// Outcome of [`BoundaryIndex::register`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    /// First boundary with this name
    Inserted,
    /// Same name and span as an existing boundary; the existing one is kept
    Unchanged,
    /// Same name at a different span; the new boundary replaces the old one
    Replaced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SpanEntry {
    start: u32,
    end: u32,
    slot: usize,
}

#[derive(Debug, Clone, Default)]
pub struct BoundaryIndex {
    boundaries: Vec<ComponentBoundary>,
    by_name: FxHashMap<CompactString, usize>,
    /// Sorted by `(start, Reverse(end))`
    spans: Vec<SpanEntry>,
}

impl BoundaryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.boundaries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.boundaries.is_empty()
    }

    /// Add a boundary, keyed by its name.
    pub fn register(&mut self, boundary: ComponentBoundary) -> Registration {
        if let Some(&slot) = self.by_name.get(&boundary.name) {
            let existing = &self.boundaries[slot];
            if existing.start == boundary.start && existing.end == boundary.end {
                return Registration::Unchanged;
            }

            tracing::debug!(
                "component `{}` redeclared at {}..{}, replacing {}..{}",
                boundary.name,
                boundary.start,
                boundary.end,
                existing.start,
                existing.end
            );
            self.spans.retain(|entry| entry.slot != slot);
            self.insert_span(boundary.start, boundary.end, slot);
            self.boundaries[slot] = boundary;
            return Registration::Replaced;
        }

        let slot = self.boundaries.len();
        self.by_name.insert(boundary.name.clone(), slot);
        self.insert_span(boundary.start, boundary.end, slot);
        self.boundaries.push(boundary);
        Registration::Inserted
    }

    fn insert_span(&mut self, start: u32, end: u32, slot: usize) {
        let key = (start, Reverse(end));
        let at = self
            .spans
            .partition_point(|entry| (entry.start, Reverse(entry.end)) <= key);
        self.spans.insert(at, SpanEntry { start, end, slot });
    }

    /// Slot of the innermost boundary containing `[start, end]`.
    ///
    /// Ties between identical spans resolve to the earliest registered.
    fn resolve_slot(&self, start: u32, end: u32) -> Option<usize> {
        let candidates = self.spans.partition_point(|entry| entry.start <= start);
        self.spans[..candidates]
            .iter()
            .filter(|entry| entry.end >= end)
            .min_by_key(|entry| (entry.end - entry.start, Reverse(entry.start), entry.slot))
            .map(|entry| entry.slot)
    }

    /// Innermost boundary containing `[start, end]`.
    pub fn resolve_mut(&mut self, start: u32, end: u32) -> Option<&mut ComponentBoundary> {
        self.resolve_slot(start, end)
            .map(|slot| &mut self.boundaries[slot])
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&ComponentBoundary> {
        self.by_name.get(name).map(|&slot| &self.boundaries[slot])
    }

    /// Boundaries in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &ComponentBoundary> {
        self.boundaries.iter()
    }

    /// Boundaries keyed by component name.
    pub fn into_map(self) -> BTreeMap<CompactString, ComponentBoundary> {
        self.boundaries
            .into_iter()
            .map(|boundary| (boundary.name.clone(), boundary))
            .collect()
    }
}
