//! Chart instance ownership.
//!
//! Rendering is an external capability: a [`ChartBackend`] draws a chart from
//! a labeled-series spec and hands back an opaque instance id. The
//! [`ChartRegistry`] keys instances by visual slot and enforces at most one
//! live instance per slot: replacing disposes the prior instance before the
//! new one is drawn, so repeated renders never leak drawing resources.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

/// Kind of mark a chart draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Line,
    Bar,
    Pie,
}

/// One labeled dataset within a chart. `x` and `y` pair up index-wise; a
/// `None` y-value is a gap, not a zero.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSpec {
    pub label: String,
    pub x: Vec<String>,
    pub y: Vec<Option<f64>>,
    pub color: Option<String>,
    /// Per-point colors (pie slices); takes precedence over `color` when
    /// non-empty.
    pub point_colors: Vec<String>,
    pub dashed: bool,
}

impl SeriesSpec {
    pub fn new(label: impl Into<String>, x: Vec<String>, y: Vec<f64>) -> Self {
        Self::with_gaps(label, x, y.into_iter().map(Some).collect())
    }

    pub fn with_gaps(label: impl Into<String>, x: Vec<String>, y: Vec<Option<f64>>) -> Self {
        Self {
            label: label.into(),
            x,
            y,
            color: None,
            point_colors: Vec::new(),
            dashed: false,
        }
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn point_colors(mut self, colors: Vec<String>) -> Self {
        self.point_colors = colors;
        self
    }

    pub fn dashed(mut self) -> Self {
        self.dashed = true;
        self
    }
}

/// Full specification handed to the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub series: Vec<SeriesSpec>,
}

impl ChartSpec {
    pub fn new(kind: ChartKind, series: Vec<SeriesSpec>) -> Self {
        Self { kind, series }
    }

    /// An instance with no datasets yet, as drawn at view initialization.
    pub fn empty(kind: ChartKind) -> Self {
        Self {
            kind,
            series: Vec::new(),
        }
    }
}

/// Opaque id of a live chart instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChartId(pub u64);

/// External drawing capability.
pub trait ChartBackend: Send + Sync {
    /// Draw a new chart instance.
    fn draw(&self, spec: &ChartSpec) -> ChartId;

    /// Replace the dataset of an existing instance.
    fn update(&self, id: ChartId, spec: &ChartSpec);

    /// Release a previously drawn instance.
    fn dispose(&self, id: ChartId);
}

/// Slot-keyed owner of chart instances.
pub struct ChartRegistry {
    backend: Arc<dyn ChartBackend>,
    slots: RwLock<HashMap<String, ChartId>>,
}

impl ChartRegistry {
    pub fn new(backend: Arc<dyn ChartBackend>) -> Self {
        Self {
            backend,
            slots: RwLock::new(HashMap::new()),
        }
    }

    /// Draw a fresh instance into `slot`, disposing any prior instance
    /// first.
    pub fn replace(&self, slot: &str, spec: ChartSpec) -> ChartId {
        let mut slots = self.slots.write();
        if let Some(old) = slots.remove(slot) {
            self.backend.dispose(old);
        }
        let id = self.backend.draw(&spec);
        slots.insert(slot.to_string(), id);
        id
    }

    /// Draw into `slot`, reusing the live instance when one exists.
    pub fn upsert(&self, slot: &str, spec: ChartSpec) -> ChartId {
        let mut slots = self.slots.write();
        if let Some(id) = slots.get(slot) {
            self.backend.update(*id, &spec);
            return *id;
        }
        let id = self.backend.draw(&spec);
        slots.insert(slot.to_string(), id);
        id
    }

    /// Dispose the instance in `slot`, if any.
    pub fn dispose_slot(&self, slot: &str) {
        if let Some(id) = self.slots.write().remove(slot) {
            self.backend.dispose(id);
        }
    }

    /// Dispose every slot whose name starts with `prefix`.
    pub fn dispose_group(&self, prefix: &str) {
        let mut slots = self.slots.write();
        let doomed: Vec<String> = slots
            .keys()
            .filter(|slot| slot.starts_with(prefix))
            .cloned()
            .collect();
        for slot in doomed {
            if let Some(id) = slots.remove(&slot) {
                self.backend.dispose(id);
            }
        }
    }

    pub fn contains(&self, slot: &str) -> bool {
        self.slots.read().contains_key(slot)
    }

    pub fn id_of(&self, slot: &str) -> Option<ChartId> {
        self.slots.read().get(slot).copied()
    }

    /// Number of live instances across all slots.
    pub fn live_count(&self) -> usize {
        self.slots.read().len()
    }
}

/// Reference backend that records draw calls without rendering anything.
///
/// Keeps the latest spec per live instance so tests (and headless runs) can
/// assert on what would have been drawn.
#[derive(Default)]
pub struct RecordingBackend {
    next_id: AtomicU64,
    live: RwLock<HashMap<ChartId, ChartSpec>>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of instances drawn and not yet disposed.
    pub fn live_instances(&self) -> usize {
        self.live.read().len()
    }

    /// Latest spec of a live instance.
    pub fn spec_of(&self, id: ChartId) -> Option<ChartSpec> {
        self.live.read().get(&id).cloned()
    }
}

impl ChartBackend for RecordingBackend {
    fn draw(&self, spec: &ChartSpec) -> ChartId {
        let id = ChartId(self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        self.live.write().insert(id, spec.clone());
        id
    }

    fn update(&self, id: ChartId, spec: &ChartSpec) {
        if let Some(entry) = self.live.write().get_mut(&id) {
            *entry = spec.clone();
        }
    }

    fn dispose(&self, id: ChartId) {
        self.live.write().remove(&id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> (Arc<RecordingBackend>, ChartRegistry) {
        let backend = Arc::new(RecordingBackend::new());
        let registry = ChartRegistry::new(backend.clone());
        (backend, registry)
    }

    #[test]
    fn replace_disposes_the_prior_instance() {
        let (backend, registry) = registry();
        let first = registry.replace("main", ChartSpec::empty(ChartKind::Line));
        let second = registry.replace("main", ChartSpec::empty(ChartKind::Line));
        assert_ne!(first, second);
        assert_eq!(backend.live_instances(), 1);
        assert_eq!(registry.live_count(), 1);
        assert!(backend.spec_of(first).is_none());
    }

    #[test]
    fn upsert_reuses_the_live_instance() {
        let (backend, registry) = registry();
        let first = registry.upsert("main", ChartSpec::empty(ChartKind::Line));
        let spec = ChartSpec::new(
            ChartKind::Line,
            vec![SeriesSpec::new("Historical AQI", vec!["t0".into()], vec![42.0])],
        );
        let second = registry.upsert("main", spec.clone());
        assert_eq!(first, second);
        assert_eq!(backend.live_instances(), 1);
        assert_eq!(backend.spec_of(first), Some(spec));
    }

    #[test]
    fn dispose_group_only_touches_the_prefix() {
        let (backend, registry) = registry();
        registry.replace("main", ChartSpec::empty(ChartKind::Line));
        registry.replace("eda.dist", ChartSpec::empty(ChartKind::Bar));
        registry.replace("eda.by_hour", ChartSpec::empty(ChartKind::Bar));

        registry.dispose_group("eda.");
        assert_eq!(registry.live_count(), 1);
        assert!(registry.contains("main"));
        assert_eq!(backend.live_instances(), 1);
    }
}
