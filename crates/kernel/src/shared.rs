use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use parking_lot::{Condvar, Mutex, MutexGuard, RwLock};
use twinloop_input::InputEvent;
use twinloop_render::DrawList;

use crate::world::World;

/// One world shared by the simulation and presentation threads, double buffered.
///
/// The world lives behind a single mutex. After each mutation the world is recorded
/// into a fresh [`DrawList`] and swapped in as the front buffer, still under the world
/// lock, so published frames are never reordered. Presentation only clones the front
/// `Arc` and never blocks on the world: input it hands over goes into an inbox that is
/// applied right away when the world is free, and otherwise by the tick holding it.
///
/// Lock order is world, then inbox or front. Neither of those is held while taking the
/// world lock.
pub struct SharedWorld<W> {
    world: Mutex<W>,
    inbox: Mutex<VecDeque<InputEvent>>,
    front: RwLock<Arc<DrawList>>,
    ticks: AtomicU64,
    events: AtomicU64,
    generation: AtomicU64,
}

impl<W: World> SharedWorld<W> {
    /// Wrap `world` and publish its initial frame.
    pub fn new(world: W) -> Self {
        let initial = record(&world);
        Self {
            world: Mutex::new(world),
            inbox: Mutex::new(VecDeque::new()),
            front: RwLock::new(Arc::new(initial)),
            ticks: AtomicU64::new(0),
            events: AtomicU64::new(0),
            generation: AtomicU64::new(0),
        }
    }

    /// Run one simulation step of `step` ticks and publish the result.
    ///
    /// Input queued before or during the step is applied around it, in arrival order.
    pub fn tick(&self, step: u32) {
        let _span = tracing::debug_span!("tick", step).entered();
        let mut world = self.world.lock();
        self.apply_pending(&mut world);
        world.update(step);
        self.ticks.fetch_add(1, Ordering::Release);
        self.apply_pending(&mut world);
        self.publish(record(&*world));
    }

    /// Hand an input event to the world without waiting for it.
    ///
    /// Applied and published at once if no tick is running, otherwise by that tick
    /// before it releases the world, or by the next one.
    pub fn dispatch(&self, event: InputEvent) {
        tracing::debug!(
            kind = ?event.kind,
            x = event.position.x,
            y = event.position.y,
            "input event"
        );
        self.inbox.lock().push_back(event);
        match self.world.try_lock() {
            Some(mut world) => {
                if self.apply_pending(&mut world) > 0 {
                    self.publish(record(&*world));
                }
            }
            None => tracing::trace!("world busy, input queued"),
        }
    }

    /// Apply any input still queued, waiting for the world if needed.
    pub fn flush(&self) {
        let mut world = self.world.lock();
        if self.apply_pending(&mut world) > 0 {
            self.publish(record(&*world));
        }
    }

    /// The most recently published frame. Stays valid and unchanged for as long as
    /// the caller holds it, whatever the simulation does meanwhile.
    pub fn front(&self) -> Arc<DrawList> {
        self.front.read().clone()
    }

    /// Number of frames published so far, not counting the initial one.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Number of simulation steps whose `update` has completed.
    pub fn ticks(&self) -> u64 {
        self.ticks.load(Ordering::Acquire)
    }

    /// Number of input events applied so far.
    pub fn events(&self) -> u64 {
        self.events.load(Ordering::Relaxed)
    }

    /// Number of input events waiting for the world.
    pub fn queued(&self) -> usize {
        self.inbox.lock().len()
    }

    /// Inspect the world under its lock.
    pub fn with_world<R>(&self, f: impl FnOnce(&W) -> R) -> R {
        f(&self.world.lock())
    }

    pub fn into_inner(self) -> W {
        self.world.into_inner()
    }

    fn apply_pending(&self, world: &mut MutexGuard<'_, W>) -> usize {
        let pending = std::mem::take(&mut *self.inbox.lock());
        let applied = pending.len();
        for event in pending {
            world.event(event.kind, event.position);
        }
        self.events.fetch_add(applied as u64, Ordering::Relaxed);
        applied
    }

    fn publish(&self, frame: DrawList) {
        *self.front.write() = Arc::new(frame);
        self.generation.fetch_add(1, Ordering::Release);
    }
}

fn record<W: World>(world: &W) -> DrawList {
    let mut list = DrawList::new();
    world.render(&mut list);
    list
}

/// "Still running" flag for the simulation loop.
///
/// Unlike a bare boolean, `stop` wakes a loop that is waiting for its next tick, so
/// shutdown never has to sit out a full tick interval.
#[derive(Debug)]
pub struct RunFlag {
    running: Mutex<bool>,
    wake: Condvar,
}

impl Default for RunFlag {
    fn default() -> Self {
        Self::new()
    }
}

impl RunFlag {
    pub fn new() -> Self {
        Self {
            running: Mutex::new(true),
            wake: Condvar::new(),
        }
    }

    pub fn is_running(&self) -> bool {
        *self.running.lock()
    }

    pub fn stop(&self) {
        *self.running.lock() = false;
        self.wake.notify_all();
    }

    /// Block until `deadline` or until stopped. Returns whether still running.
    pub fn wait_until(&self, deadline: Instant) -> bool {
        let mut running = self.running.lock();
        while *running {
            if self.wake.wait_until(&mut running, deadline).timed_out() {
                break;
            }
        }
        *running
    }
}
