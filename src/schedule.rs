//! Run scheduling: signal coalescing and stale-run suppression.
//!
//! Layout signals only mark a run as pending; the event loop starts at most
//! one run per frame. Every started run gets a [`RunToken`] tied to the
//! scheduler's "current run" cell. Starting another run (or tearing down)
//! moves that cell on, so an older run can still finish its loop but can no
//! longer publish.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use log::{debug, info};

/// Identifier of a fitting run. Strictly increasing in start order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RunId(u64);

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Layout-affecting events that call for a fresh run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutSignal {
    /// The container's content width changed.
    Resized,
    /// Font (cell) metrics became reliable. Delivered once.
    FontsReady,
    /// Text, ellipsis or style changed.
    PropsChanged,
}

/// Cancellation token of one run.
#[derive(Debug, Clone)]
pub struct RunToken {
    id: RunId,
    current: Rc<Cell<Option<RunId>>>,
}

impl RunToken {
    pub fn id(&self) -> RunId {
        self.id
    }

    /// Whether a newer run started (or the owner was torn down) since this one.
    pub fn is_cancelled(&self) -> bool {
        self.current.get() != Some(self.id)
    }
}

/// Coalesces layout signals and hands out run tokens.
#[derive(Debug)]
pub struct FitScheduler {
    next_id: u64,
    current: Rc<Cell<Option<RunId>>>,
    /// Signals received since the last run started.
    pending: Vec<LayoutSignal>,
    observing: bool,
    fonts_ready: bool,
}

impl Default for FitScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl FitScheduler {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            current: Rc::new(Cell::new(None)),
            pending: Vec::new(),
            observing: true,
            fonts_ready: false,
        }
    }

    /// Record a layout signal. Returns `false` if it was ignored.
    pub fn notify(&mut self, signal: LayoutSignal) -> bool {
        if !self.observing {
            return false;
        }
        if signal == LayoutSignal::FontsReady {
            if self.fonts_ready {
                return false;
            }
            self.fonts_ready = true;
        }
        self.pending.push(signal);
        true
    }

    /// Whether a run is waiting for the next frame.
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Consume all pending signals at once. Returns `true` if a run is due.
    pub fn take_pending(&mut self) -> bool {
        if self.pending.is_empty() {
            return false;
        }
        if self.pending.len() > 1 {
            debug!("coalesced {} signals into one run", self.pending.len());
        }
        self.pending.clear();
        true
    }

    /// Start a run, cancelling any run still in flight.
    ///
    /// Returns `None` once torn down.
    pub fn begin_run(&mut self) -> Option<RunToken> {
        if !self.observing {
            debug!("run refused after teardown");
            return None;
        }
        self.next_id += 1;
        let id = RunId(self.next_id);
        if let Some(previous) = self.current.replace(Some(id)) {
            debug!("run {previous} superseded by {id}");
        }
        Some(RunToken {
            id,
            current: Rc::clone(&self.current),
        })
    }

    /// Write `value` into `slot` if `token` is still the current run.
    pub fn publish<T>(&self, token: &RunToken, slot: &mut T, value: T) -> bool {
        if token.is_cancelled() {
            debug!("run {} discarded (stale)", token.id);
            return false;
        }
        *slot = value;
        true
    }

    /// Stop observing signals and cancel the in-flight run.
    pub fn teardown(&mut self) {
        self.observing = false;
        self.pending.clear();
        self.current.set(None);
        info!("fit scheduler torn down after {} runs", self.next_id);
    }
}
