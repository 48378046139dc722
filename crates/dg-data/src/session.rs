//! Caller-side grid session
//!
//! Holds the records, the pipeline and the current view state, caches the
//! last computed page and tells subscribers when the view changes.

use std::sync::{Arc, Weak};

use dg_core::{compute_range, PageToken, RangeOptions, Record, SortState, ViewState};
use parking_lot::RwLock;
use serde::Serialize;
use tracing::{debug, trace};

use crate::pipeline::Pipeline;

/// Computed view of a session: the visible rows plus pagination tokens
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridSnapshot<R> {
    /// State the snapshot was computed for
    pub state: ViewState,
    pub rows: Vec<R>,
    pub total_rows: usize,
    pub filtered_rows: usize,
    pub page_count: usize,
    pub tokens: Vec<PageToken>,
}

impl<R> GridSnapshot<R> {
    /// Page shown by the pagination control
    pub fn current_page(&self) -> usize {
        self.tokens
            .iter()
            .find(|token| token.is_current())
            .and_then(PageToken::target)
            .unwrap_or(1)
    }
}

/// Trait for components that need to respond to grid view changes
pub trait GridSubscriber<R>: Send + Sync {
    /// Called after the view state changed
    fn on_grid_change(&self, snapshot: &GridSnapshot<R>);
}

/// Record collection tagged with how many times it has been replaced
struct Generation<R> {
    number: u64,
    records: Arc<[R]>,
}

/// Last snapshot and the record generation it was computed from
struct Memo<R> {
    generation: u64,
    snapshot: Arc<GridSnapshot<R>>,
}

/// Records, columns and view state of one grid
pub struct GridSession<R> {
    records: RwLock<Generation<R>>,
    pipeline: Pipeline<R>,
    range: RangeOptions,
    state: RwLock<ViewState>,
    memo: RwLock<Option<Memo<R>>>,
    subscribers: RwLock<Vec<Weak<dyn GridSubscriber<R>>>>,
}

impl<R: Record + Clone> GridSession<R> {
    /// Create a new session over `records`, initially unfiltered and unpaged
    pub fn new(records: impl Into<Arc<[R]>>, pipeline: Pipeline<R>) -> Self {
        Self {
            records: RwLock::new(Generation {
                number: 0,
                records: records.into(),
            }),
            pipeline,
            range: RangeOptions::default(),
            state: RwLock::new(ViewState::new()),
            memo: RwLock::new(None),
            subscribers: RwLock::new(Vec::new()),
        }
    }

    pub fn with_state(self, state: ViewState) -> Self {
        *self.state.write() = state;
        self
    }

    /// Spacing and edge controls of the pagination tokens. The page fields
    /// of `range` are ignored.
    pub fn with_range_options(mut self, range: RangeOptions) -> Self {
        self.range = range;
        self
    }

    pub fn pipeline(&self) -> &Pipeline<R> {
        &self.pipeline
    }

    pub fn records(&self) -> Arc<[R]> {
        Arc::clone(&self.records.read().records)
    }

    fn generation(&self) -> (u64, Arc<[R]>) {
        let current = self.records.read();
        (current.number, Arc::clone(&current.records))
    }

    pub fn state(&self) -> ViewState {
        self.state.read().clone()
    }

    /// Current view, recomputed only when the state or the records changed
    /// since the last call
    pub fn snapshot(&self) -> Arc<GridSnapshot<R>> {
        let state = self.state();
        let (generation, records) = self.generation();

        if let Some(memo) = self.memo.read().as_ref() {
            if memo.generation == generation && memo.snapshot.state == state {
                trace!("Grid snapshot cache hit");
                return Arc::clone(&memo.snapshot);
            }
        }

        let snapshot = Arc::new(self.compute(&records, state));

        // Records replaced while computing: hand back the result, don't keep it
        let mut memo = self.memo.write();
        if self.records.read().number == generation {
            *memo = Some(Memo {
                generation,
                snapshot: Arc::clone(&snapshot),
            });
        } else {
            debug!("Records replaced during snapshot, result not cached");
        }
        snapshot
    }

    fn compute(&self, records: &[R], state: ViewState) -> GridSnapshot<R> {
        let output = self.pipeline.run(records, &state);
        let options = RangeOptions {
            page: output.page.max(1),
            page_count: output.page_count,
            ..self.range
        };

        GridSnapshot {
            rows: output.rows.into_iter().cloned().collect(),
            total_rows: output.total_rows,
            filtered_rows: output.filtered_rows,
            page_count: output.page_count,
            tokens: compute_range(&options),
            state,
        }
    }

    /// Replace the view state with `update(state)`. Subscribers hear about
    /// it only when the state actually changed.
    pub fn update<F>(&self, update: F) -> Arc<GridSnapshot<R>>
    where
        F: FnOnce(ViewState) -> ViewState,
    {
        let mut state = self.state.write();
        let next = update(state.clone());
        let changed = next != *state;
        *state = next;
        drop(state);

        let snapshot = self.snapshot();
        if changed {
            self.notify_subscribers(&snapshot);
        }
        snapshot
    }

    pub fn set_query(&self, query: &str) -> Arc<GridSnapshot<R>> {
        self.update(|state| state.with_filter(query))
    }

    pub fn set_filter_keys(&self, keys: Option<Vec<String>>) -> Arc<GridSnapshot<R>> {
        self.update(|state| match keys {
            Some(keys) => state.with_filter_keys(keys),
            None => ViewState {
                filter_keys: None,
                ..state
            },
        })
    }

    pub fn set_sort(&self, sort: Option<SortState>) -> Arc<GridSnapshot<R>> {
        self.update(|state| state.with_sort(sort))
    }

    /// Header click on the column `key`
    pub fn toggle_sort(&self, key: &str) -> Arc<GridSnapshot<R>> {
        match self.pipeline.columns().get(key) {
            Some(column) => self.update(|state| state.toggle_sort(column)),
            None => {
                debug!("No column '{}' to sort by", key);
                self.snapshot()
            }
        }
    }

    /// Jump to `page`, clamped to the pages of the current filter
    pub fn set_page(&self, page: usize) -> Arc<GridSnapshot<R>> {
        let page_count = self.snapshot().page_count;
        self.update(|state| state.with_page(page).clamp_page(page_count))
    }

    pub fn set_page_size(&self, page_size: usize) -> Arc<GridSnapshot<R>> {
        self.update(|state| state.with_page_size(page_size))
    }

    pub fn next_page(&self) -> Arc<GridSnapshot<R>> {
        let page_count = self.snapshot().page_count;
        self.update(|state| state.next_page(page_count))
    }

    pub fn previous_page(&self) -> Arc<GridSnapshot<R>> {
        self.update(ViewState::previous_page)
    }

    /// Follow a clicked pagination token. Disabled controls and ellipses
    /// leave the view unchanged.
    pub fn navigate(&self, token: &PageToken) -> Arc<GridSnapshot<R>> {
        match token.target() {
            Some(page) if !token.is_disabled() => self.set_page(page),
            _ => self.snapshot(),
        }
    }

    /// Swap the record collection, keeping the view state
    pub fn replace_records(&self, records: impl Into<Arc<[R]>>) -> Arc<GridSnapshot<R>> {
        {
            let mut current = self.records.write();
            current.number += 1;
            current.records = records.into();
        }
        self.invalidate();

        let page_count = self.snapshot().page_count;
        let mut state = self.state.write();
        *state = state.clone().clamp_page(page_count);
        drop(state);

        let snapshot = self.snapshot();
        self.notify_subscribers(&snapshot);
        snapshot
    }

    /// Drop the cached snapshot
    pub fn invalidate(&self) {
        *self.memo.write() = None;
    }

    /// Add a subscriber
    pub fn add_subscriber(&self, subscriber: Arc<dyn GridSubscriber<R>>) {
        let mut subscribers = self.subscribers.write();
        subscribers.push(Arc::downgrade(&subscriber));
    }

    /// Notify all subscribers of a view change
    fn notify_subscribers(&self, snapshot: &GridSnapshot<R>) {
        let mut subscribers = self.subscribers.write();

        // Remove any dead weak references
        subscribers.retain(|weak| weak.strong_count() > 0);

        for weak in subscribers.iter() {
            if let Some(subscriber) = weak.upgrade() {
                subscriber.on_grid_change(snapshot);
            }
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .read()
            .iter()
            .filter(|weak| weak.strong_count() > 0)
            .count()
    }
}
