//! Tween scheduler
//!
//! Owns every registered handle and advances them once per frame. The
//! scheduler is a cheap clonable handle to shared state, so completion
//! callbacks can capture it and start or kill tweens. Callbacks always run
//! after the scheduler has released its borrow.

use crate::error::{check_timestep, Result};
use crate::handle::{HandleState, TweenHandle};
use crate::node::Callback;
use slotmap::{new_key_type, SlotMap};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, trace};

new_key_type! {
    pub struct TweenId;
}

#[derive(Default)]
struct SchedulerInner {
    handles: SlotMap<TweenId, TweenHandle>,
    frame: u64,
}

/// Caller-owned driver for all playing tweens
#[derive(Clone, Default)]
pub struct TweenScheduler {
    inner: Rc<RefCell<SchedulerInner>>,
}

impl std::fmt::Debug for TweenScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("TweenScheduler")
            .field("handles", &inner.handles.len())
            .field("frame", &inner.frame)
            .finish()
    }
}

impl TweenScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a handle, starting it if it is idle
    pub fn register(&self, mut handle: TweenHandle) -> TweenId {
        if handle.state() == HandleState::Idle {
            handle.start();
        }
        let duration = handle.duration();
        let id = self.inner.borrow_mut().handles.insert(handle);
        debug!(?id, ?duration, "tween registered");
        id
    }

    /// Remove a handle without touching its state
    pub fn unregister(&self, id: TweenId) -> Option<TweenHandle> {
        let handle = self.inner.borrow_mut().handles.remove(id);
        if handle.is_some() {
            debug!(?id, "tween unregistered");
        }
        handle
    }

    /// Kill a running handle and dispose of it
    ///
    /// A completed handle that kept its graph (`auto_kill` off) is released
    /// instead: the graph is dropped without firing callbacks and the id is
    /// disposed. Returns `false` for unknown or already disposed ids.
    pub fn kill(&self, id: TweenId, jump_to_end: bool) -> bool {
        let mut inner = self.inner.borrow_mut();
        let Some(handle) = inner.handles.get_mut(id) else {
            return false;
        };

        let was_running = handle.kill(jump_to_end);
        let released = !was_running && handle.release();
        if !(was_running || released) {
            return false;
        }

        inner.handles.remove(id);
        debug!(?id, jump_to_end, released, "tween killed");
        true
    }

    /// Replay a completed handle that was registered with `auto_kill` off
    pub fn restart(&self, id: TweenId) -> bool {
        let mut inner = self.inner.borrow_mut();
        let restarted = match inner.handles.get_mut(id) {
            Some(handle) if handle.state() == HandleState::Completed => handle.start(),
            _ => false,
        };
        if restarted {
            debug!(?id, "tween restarted");
        }
        restarted
    }

    /// State of a registered handle
    ///
    /// Killed handles are disposed by `kill` itself and auto-killed ones at
    /// the end of their completing tick, so their ids report `None` rather
    /// than `Killed` or `Completed`.
    pub fn state(&self, id: TweenId) -> Option<HandleState> {
        self.inner.borrow().handles.get(id).map(TweenHandle::state)
    }

    pub fn is_running(&self, id: TweenId) -> bool {
        self.state(id) == Some(HandleState::Running)
    }

    /// Advance every running handle by `dt`
    ///
    /// Finished handles are disposed before any callback runs. Returns the
    /// number of handles that completed on this tick.
    pub fn tick_all(&self, dt: f32) -> Result<usize> {
        check_timestep(dt)?;

        let mut fired: Vec<Callback> = Vec::new();
        let completed = {
            let mut guard = self.inner.borrow_mut();
            let inner = &mut *guard;
            inner.frame += 1;

            let mut completed = 0;
            for (id, handle) in inner.handles.iter_mut() {
                if handle.advance(dt, &mut fired)? {
                    debug!(?id, "tween completed");
                    completed += 1;
                }
            }
            inner.handles.retain(|_, handle| !handle.is_disposable());

            trace!(
                frame = inner.frame,
                dt,
                live = inner.handles.len(),
                completed,
                callbacks = fired.len(),
                "tick"
            );
            completed
        };

        for callback in fired {
            callback();
        }
        Ok(completed)
    }

    /// Kill every running handle and drop all handles
    pub fn kill_all(&self, jump_to_end: bool) -> usize {
        let mut inner = self.inner.borrow_mut();
        let mut killed = 0;
        for handle in inner.handles.values_mut() {
            if handle.kill(jump_to_end) {
                killed += 1;
            }
        }
        inner.handles.clear();
        debug!(killed, jump_to_end, "killed all tweens");
        killed
    }

    pub fn has_active_animations(&self) -> bool {
        self.inner
            .borrow()
            .handles
            .values()
            .any(TweenHandle::is_running)
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().handles.is_empty()
    }

    /// Number of `tick_all` calls so far
    pub fn frame(&self) -> u64 {
        self.inner.borrow().frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::TweenNode;
    use crate::target::{Axis, TargetRef, Transform};
    use crate::tween::Tween;
    use glam::Vec3;
    use std::cell::Cell;

    fn setup() -> (Rc<RefCell<Transform>>, TargetRef) {
        let concrete = Transform::new().shared();
        let target: TargetRef = concrete.clone();
        (concrete, target)
    }

    #[test]
    fn test_register_starts_and_tick_completes() {
        let scheduler = TweenScheduler::new();
        let (concrete, target) = setup();
        let id = scheduler.register(TweenHandle::new(Tween::move_axis(&target, Axis::X, 4.0, 1.0)));

        assert!(scheduler.is_running(id));
        assert!(scheduler.has_active_animations());

        assert_eq!(scheduler.tick_all(0.5).unwrap(), 0);
        assert!((concrete.borrow().position.x - 2.0).abs() < 1e-5);
        assert_eq!(scheduler.tick_all(0.5).unwrap(), 1);

        // Auto-killed on completion
        assert_eq!(scheduler.state(id), None);
        assert!(scheduler.is_empty());
        assert_eq!(scheduler.frame(), 2);
    }

    #[test]
    fn test_invalid_dt_mutates_nothing() {
        let scheduler = TweenScheduler::new();
        let (concrete, target) = setup();
        scheduler.register(TweenHandle::new(Tween::move_axis(&target, Axis::X, 4.0, 1.0)));

        assert!(scheduler.tick_all(-0.016).is_err());
        assert_eq!(concrete.borrow().position.x, 0.0);
        assert_eq!(scheduler.frame(), 0);
    }

    #[test]
    fn test_kill_and_stale_ids() {
        let scheduler = TweenScheduler::new();
        let (concrete, target) = setup();
        let id = scheduler.register(TweenHandle::new(Tween::scale(&target, Vec3::splat(2.0), 1.0)));

        scheduler.tick_all(0.25).unwrap();
        assert!(scheduler.kill(id, true));
        assert_eq!(concrete.borrow().scale, Vec3::splat(2.0));
        assert!(!scheduler.kill(id, true));
        assert_eq!(scheduler.state(id), None);
    }

    #[test]
    fn test_kill_from_own_callback_is_noop() {
        let scheduler = TweenScheduler::new();
        let (_, target) = setup();
        let id_cell: Rc<Cell<Option<TweenId>>> = Rc::new(Cell::new(None));
        let killed = Rc::new(Cell::new(None));

        let s = scheduler.clone();
        let ids = id_cell.clone();
        let result = killed.clone();
        let handle =
            TweenHandle::new(Tween::scale(&target, Vec3::ZERO, 0.1)).on_complete(Rc::new(move || {
                if let Some(id) = ids.get() {
                    result.set(Some(s.kill(id, true)));
                }
            }));
        id_cell.set(Some(scheduler.register(handle)));

        scheduler.tick_all(0.1).unwrap();
        assert_eq!(killed.get(), Some(false));
    }

    #[test]
    fn test_callback_can_register_follow_up() {
        let scheduler = TweenScheduler::new();
        let (concrete, target) = setup();

        let s = scheduler.clone();
        let t = target.clone();
        let handle = TweenHandle::new(Tween::move_axis(&target, Axis::X, 1.0, 0.1))
            .on_complete(Rc::new(move || {
                s.register(TweenHandle::new(Tween::move_axis(&t, Axis::Y, 1.0, 0.1)));
            }));
        scheduler.register(handle);

        scheduler.tick_all(0.1).unwrap();
        assert_eq!(scheduler.len(), 1);
        scheduler.tick_all(0.1).unwrap();
        assert_eq!(concrete.borrow().position, Vec3::new(1.0, 1.0, 0.0));
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_callbacks_see_all_writes_of_the_tick() {
        let scheduler = TweenScheduler::new();
        let (concrete, target) = setup();
        let seen = Rc::new(Cell::new(Vec3::ZERO));

        let observed = concrete.clone();
        let out = seen.clone();
        let first = TweenHandle::new(Tween::move_axis(&target, Axis::X, 1.0, 0.1))
            .on_complete(Rc::new(move || out.set(observed.borrow().scale)));
        scheduler.register(first);
        scheduler.register(TweenHandle::new(Tween::scale(&target, Vec3::splat(3.0), 0.1)));

        scheduler.tick_all(0.1).unwrap();
        assert_eq!(seen.get(), Vec3::splat(3.0));
    }

    #[test]
    fn test_restart_requires_kept_graph() {
        let scheduler = TweenScheduler::new();
        let (_, target) = setup();
        let kept = scheduler.register(
            TweenHandle::new(TweenNode::leaf(Tween::move_axis(&target, Axis::Z, 1.0, 0.1)))
                .with_auto_kill(false),
        );

        assert!(!scheduler.restart(kept));
        scheduler.tick_all(0.1).unwrap();
        assert_eq!(scheduler.state(kept), Some(HandleState::Completed));
        assert!(!scheduler.has_active_animations());

        assert!(scheduler.restart(kept));
        assert!(scheduler.is_running(kept));
    }

    #[test]
    fn test_kill_all() {
        let scheduler = TweenScheduler::new();
        let (_, target) = setup();
        for i in 0..3 {
            scheduler.register(TweenHandle::new(Tween::move_axis(&target, Axis::X, i as f32, 1.0)));
        }
        assert_eq!(scheduler.kill_all(false), 3);
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_kill_all_counts_only_running() {
        let scheduler = TweenScheduler::new();
        let (_, target) = setup();
        scheduler.register(
            TweenHandle::new(Tween::move_axis(&target, Axis::X, 1.0, 0.1)).with_auto_kill(false),
        );
        scheduler.register(TweenHandle::new(Tween::move_axis(&target, Axis::Y, 1.0, 1.0)));
        scheduler.tick_all(0.1).unwrap();

        assert_eq!(scheduler.len(), 2);
        assert_eq!(scheduler.kill_all(true), 1);
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_kill_releases_kept_graph() {
        let scheduler = TweenScheduler::new();
        let (concrete, target) = setup();
        let count = Rc::new(Cell::new(0));
        let inner = count.clone();
        let id = scheduler.register(
            TweenHandle::new(Tween::move_axis(&target, Axis::X, 2.0, 0.1))
                .with_auto_kill(false)
                .on_complete(Rc::new(move || inner.set(inner.get() + 1))),
        );

        scheduler.tick_all(0.1).unwrap();
        assert_eq!(scheduler.state(id), Some(HandleState::Completed));
        assert_eq!(count.get(), 1);

        concrete.borrow_mut().position.x = 7.0;
        assert!(scheduler.kill(id, true));
        assert_eq!(scheduler.state(id), None);
        assert!(scheduler.is_empty());
        assert!(!scheduler.restart(id));
        assert!(!scheduler.kill(id, true));

        // Released silently, without writing the end value again
        assert_eq!(count.get(), 1);
        assert_eq!(concrete.borrow().position.x, 7.0);
    }

    #[test]
    fn test_killed_ids_report_none() {
        let scheduler = TweenScheduler::new();
        let (_, target) = setup();
        let id = scheduler.register(TweenHandle::new(Tween::move_axis(&target, Axis::X, 1.0, 1.0)));

        assert_eq!(scheduler.state(id), Some(HandleState::Running));
        assert!(scheduler.kill(id, false));
        assert_eq!(scheduler.state(id), None);
        assert!(!scheduler.is_running(id));
    }
}
