//! Browser loop driver
//!
//! Frame loops chain `requestAnimationFrame`; timer loops use `setInterval`.
//! Firings are routed to a dispatch callback installed after construction,
//! since the callback usually needs the object that owns this scheduler.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use super::scheduler::{LoopHandle, LoopKind, LoopSlot, Scheduler};
use crate::consts::TIMER_PERIOD_MS;

type Dispatch = Rc<dyn Fn(LoopHandle)>;
type DispatchSlot = Rc<RefCell<Option<Dispatch>>>;
type FrameCallback = LoopSlot<Closure<dyn FnMut(f64)>>;

struct FrameLoop {
    alive: Rc<Cell<bool>>,
    request_id: Rc<Cell<i32>>,
    callback: FrameCallback,
}

/// Scheduler backed by the browser event loop
#[derive(Default)]
pub struct BrowserScheduler {
    next_id: u64,
    dispatch: DispatchSlot,
    frames: HashMap<u64, FrameLoop>,
    timers: HashMap<u64, i32>,
}

impl BrowserScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the callback that receives every loop firing
    pub fn set_dispatch(&self, dispatch: impl Fn(LoopHandle) + 'static) {
        *self.dispatch.borrow_mut() = Some(Rc::new(dispatch));
    }

    fn schedule_frame(&mut self, handle: LoopHandle) {
        let alive = Rc::new(Cell::new(true));
        let request_id = Rc::new(Cell::new(0));

        // The closure re-requests itself through the slot; `cancel` releases it
        let slot: FrameCallback = LoopSlot::new();
        let slot_inner = slot.clone();
        let alive_inner = alive.clone();
        let request_inner = request_id.clone();
        let dispatch = self.dispatch.clone();

        slot.fill(Closure::wrap(Box::new(move |_ts: f64| {
            if !alive_inner.get() {
                return;
            }
            slot_inner.run(|| fire(&dispatch, handle));
            if alive_inner.get() {
                if let Some(id) = request_frame(&slot_inner) {
                    request_inner.set(id);
                }
            }
        }) as Box<dyn FnMut(f64)>));

        match request_frame(&slot) {
            Some(id) => request_id.set(id),
            None => log::warn!("requestAnimationFrame failed for loop {}", handle.id),
        }

        self.frames.insert(
            handle.id,
            FrameLoop {
                alive,
                request_id,
                callback: slot,
            },
        );
    }

    fn schedule_timer(&mut self, handle: LoopHandle) {
        let Some(window) = web_sys::window() else {
            log::warn!("No window - timer loop {} not started", handle.id);
            return;
        };

        let dispatch = self.dispatch.clone();
        let closure = Closure::<dyn FnMut()>::new(move || fire(&dispatch, handle));
        match window.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            TIMER_PERIOD_MS,
        ) {
            Ok(id) => {
                self.timers.insert(handle.id, id);
            }
            Err(e) => log::warn!("setInterval failed: {:?}", e),
        }
        // The interval may be cleared from inside its own callback, so the
        // closure is never dropped.
        closure.forget();
    }
}

impl Scheduler for BrowserScheduler {
    fn schedule(&mut self, kind: LoopKind) -> LoopHandle {
        self.next_id += 1;
        let handle = LoopHandle {
            id: self.next_id,
            kind,
        };
        match kind {
            LoopKind::Frame => self.schedule_frame(handle),
            LoopKind::Timer => self.schedule_timer(handle),
        }
        handle
    }

    fn cancel(&mut self, handle: LoopHandle) {
        let window = web_sys::window();
        match handle.kind {
            LoopKind::Frame => {
                if let Some(frame) = self.frames.remove(&handle.id) {
                    frame.alive.set(false);
                    if let Some(window) = &window {
                        window.cancel_animation_frame(frame.request_id.get()).ok();
                    }
                    // A closure cannot drop itself mid-call; that one stays parked
                    if !frame.callback.release() {
                        log::debug!("Frame loop {} cancelled from its own callback", handle.id);
                    }
                }
            }
            LoopKind::Timer => {
                if let Some(id) = self.timers.remove(&handle.id) {
                    if let Some(window) = &window {
                        window.clear_interval_with_handle(id);
                    }
                }
            }
        }
    }
}

fn fire(dispatch: &DispatchSlot, handle: LoopHandle) {
    // Clone out first so the slot is not borrowed while the game runs
    let callback = dispatch.borrow().clone();
    if let Some(callback) = callback {
        callback(handle);
    }
}

fn request_frame(slot: &FrameCallback) -> Option<i32> {
    let window = web_sys::window()?;
    slot.with(|closure| {
        window
            .request_animation_frame(closure.as_ref().unchecked_ref())
            .ok()
    })
    .flatten()
}
