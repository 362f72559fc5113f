//! Cancelable repeating loops
//!
//! The session asks for one frame loop and one timer loop per run and
//! cancels both when it ends or restarts. Whoever drives the loops reports
//! each firing back with the handle it was scheduled under.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Kind of repeating loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoopKind {
    /// Once per display frame
    Frame,
    /// Once per second
    Timer,
}

/// Identifies one scheduled loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoopHandle {
    pub id: u64,
    pub kind: LoopKind,
}

/// Something that can run repeating loops
pub trait Scheduler {
    /// Start a loop; firings are reported with the returned handle
    fn schedule(&mut self, kind: LoopKind) -> LoopHandle;
    /// Stop a loop. Unknown or already-cancelled handles are ignored.
    fn cancel(&mut self, handle: LoopHandle);
}

/// Shared home for a callback that re-arms itself
///
/// The callback holds a clone of the slot to request its next run, which
/// forms a cycle. `release` breaks it by dropping the callback, except while
/// that callback is executing.
pub struct LoopSlot<T> {
    callback: Rc<RefCell<Option<T>>>,
    running: Rc<Cell<bool>>,
}

impl<T> Clone for LoopSlot<T> {
    fn clone(&self) -> Self {
        Self {
            callback: self.callback.clone(),
            running: self.running.clone(),
        }
    }
}

impl<T> Default for LoopSlot<T> {
    fn default() -> Self {
        Self {
            callback: Rc::new(RefCell::new(None)),
            running: Rc::new(Cell::new(false)),
        }
    }
}

impl<T> LoopSlot<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fill(&self, callback: T) {
        *self.callback.borrow_mut() = Some(callback);
    }

    /// Borrow the stored callback, if it is still there
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        self.callback.borrow().as_ref().map(f)
    }

    /// Run `f` with the slot marked as executing
    pub fn run<R>(&self, f: impl FnOnce() -> R) -> R {
        self.running.set(true);
        let result = f();
        self.running.set(false);
        result
    }

    pub fn is_running(&self) -> bool {
        self.running.get()
    }

    /// Drop the callback. Returns false (and keeps it) while it is executing.
    pub fn release(&self) -> bool {
        if self.running.get() {
            return false;
        }
        match self.callback.try_borrow_mut() {
            Ok(mut callback) => {
                callback.take();
                true
            }
            Err(_) => false,
        }
    }
}

/// In-memory scheduler driven by hand (tests and headless runs)
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    active: Vec<LoopHandle>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Live loops of the given kind, oldest first
    pub fn active(&self, kind: LoopKind) -> Vec<LoopHandle> {
        self.active
            .iter()
            .copied()
            .filter(|h| h.kind == kind)
            .collect()
    }

    pub fn is_active(&self, handle: LoopHandle) -> bool {
        self.active.contains(&handle)
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, kind: LoopKind) -> LoopHandle {
        self.next_id += 1;
        let handle = LoopHandle {
            id: self.next_id,
            kind,
        };
        self.active.push(handle);
        handle
    }

    fn cancel(&mut self, handle: LoopHandle) {
        self.active.retain(|h| *h != handle);
    }
}
