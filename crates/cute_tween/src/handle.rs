//! Tween handles: the lifecycle of one playing animation
//!
//! A handle owns the root node of its graph. It moves through
//! `Idle -> Running -> Completed | Killed`; kill is only meaningful while
//! running, so killing from inside a completion callback is a no-op.

use crate::error::{check_timestep, Result};
use crate::node::{Callback, TweenNode};

/// Lifecycle state of a [`TweenHandle`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HandleState {
    /// Built but not started
    Idle,
    Running,
    /// Finished naturally
    Completed,
    /// Cancelled before finishing
    Killed,
}

/// Owns one animation instance
pub struct TweenHandle {
    root: Option<TweenNode>,
    state: HandleState,
    auto_kill: bool,
    on_complete: Option<Callback>,
}

impl std::fmt::Debug for TweenHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TweenHandle")
            .field("root", &self.root)
            .field("state", &self.state)
            .field("auto_kill", &self.auto_kill)
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

impl TweenHandle {
    pub fn new(root: impl Into<TweenNode>) -> Self {
        Self {
            root: Some(root.into()),
            state: HandleState::Idle,
            auto_kill: true,
            on_complete: None,
        }
    }

    /// Builder: keep the graph after completion so the handle can be restarted
    pub fn with_auto_kill(mut self, auto_kill: bool) -> Self {
        self.auto_kill = auto_kill;
        self
    }

    /// Builder: callback fired once after the root's own callbacks on natural completion
    pub fn on_complete(mut self, callback: Callback) -> Self {
        self.on_complete = Some(callback);
        self
    }

    /// Begin playing
    ///
    /// A completed handle whose graph was kept (`auto_kill == false`) is
    /// rewound and played again. Returns whether the handle is now running.
    pub fn start(&mut self) -> bool {
        match self.state {
            HandleState::Idle if self.root.is_some() => {
                self.state = HandleState::Running;
                true
            }
            HandleState::Completed => match self.root.as_mut() {
                Some(root) => {
                    root.rewind();
                    self.state = HandleState::Running;
                    true
                }
                None => false,
            },
            HandleState::Running => true,
            _ => false,
        }
    }

    /// Advance by `dt`, queueing completion callbacks into `fired`
    ///
    /// Returns `true` on the tick the handle completes.
    pub(crate) fn advance(&mut self, dt: f32, fired: &mut Vec<Callback>) -> Result<bool> {
        check_timestep(dt)?;
        if self.state != HandleState::Running {
            return Ok(false);
        }
        let Some(root) = self.root.as_mut() else {
            return Ok(false);
        };

        if !root.advance(dt, fired)? {
            return Ok(false);
        }

        self.state = HandleState::Completed;
        if let Some(callback) = &self.on_complete {
            fired.push(callback.clone());
        }
        if self.auto_kill {
            self.root = None;
        }
        Ok(true)
    }

    /// Advance a handle that is driven directly rather than through a scheduler
    ///
    /// Callbacks run before this returns, after the tick's writes.
    pub fn tick(&mut self, dt: f32) -> Result<bool> {
        let mut fired = Vec::new();
        let completed = self.advance(dt, &mut fired)?;
        for callback in fired {
            callback();
        }
        Ok(completed)
    }

    /// Cancel a running handle without firing callbacks
    ///
    /// Returns whether anything was killed.
    pub fn kill(&mut self, jump_to_end: bool) -> bool {
        if self.state != HandleState::Running {
            return false;
        }
        if let Some(mut root) = self.root.take() {
            root.kill(jump_to_end);
        }
        self.state = HandleState::Killed;
        true
    }

    /// Drop the graph a completed handle kept for restarting
    ///
    /// Returns whether there was one. No callbacks fire and nothing is
    /// written; afterwards the handle can no longer be restarted.
    pub fn release(&mut self) -> bool {
        self.state == HandleState::Completed && self.root.take().is_some()
    }

    pub fn state(&self) -> HandleState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == HandleState::Running
    }

    pub fn auto_kill(&self) -> bool {
        self.auto_kill
    }

    pub fn root(&self) -> Option<&TweenNode> {
        self.root.as_ref()
    }

    /// Total duration of the graph; `None` if infinite or already disposed
    pub fn duration(&self) -> Option<f32> {
        self.root.as_ref().and_then(TweenNode::duration)
    }

    /// Whether a scheduler can drop this handle
    pub(crate) fn is_disposable(&self) -> bool {
        match self.state {
            HandleState::Killed => true,
            HandleState::Completed => self.root.is_none(),
            HandleState::Idle | HandleState::Running => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::{Axis, TargetRef, Transform};
    use crate::tween::Tween;
    use glam::Vec3;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    fn setup() -> (Rc<RefCell<Transform>>, TargetRef) {
        let concrete = Transform::new().shared();
        let target: TargetRef = concrete.clone();
        (concrete, target)
    }

    #[test]
    fn test_idle_until_started() {
        let (concrete, target) = setup();
        let mut handle = TweenHandle::new(Tween::move_axis(&target, Axis::X, 1.0, 0.5));
        assert_eq!(handle.state(), HandleState::Idle);

        assert!(!handle.tick(0.5).unwrap());
        assert_eq!(concrete.borrow().position.x, 0.0);

        assert!(handle.start());
        assert!(handle.tick(0.5).unwrap());
        assert_eq!(handle.state(), HandleState::Completed);
        assert_eq!(concrete.borrow().position.x, 1.0);
    }

    #[test]
    fn test_callback_order_and_auto_kill() {
        let (_, target) = setup();
        let log = Rc::new(RefCell::new(Vec::new()));
        let node_log = log.clone();
        let handle_log = log.clone();

        let root = TweenNode::leaf(Tween::scale(&target, Vec3::ZERO, 0.1))
            .on_complete(Rc::new(move || node_log.borrow_mut().push("node")));
        let mut handle = TweenHandle::new(root)
            .on_complete(Rc::new(move || handle_log.borrow_mut().push("handle")));
        handle.start();

        assert!(handle.tick(0.1).unwrap());
        assert_eq!(*log.borrow(), vec!["node", "handle"]);
        assert!(handle.root().is_none());
        assert!(handle.is_disposable());

        // Completion is reported once
        assert!(!handle.tick(0.1).unwrap());
        assert_eq!(log.borrow().len(), 2);
    }

    #[test]
    fn test_kill_only_while_running() {
        let (_, target) = setup();
        let mut handle = TweenHandle::new(Tween::scale(&target, Vec3::ZERO, 0.1));
        assert!(!handle.kill(true));
        assert_eq!(handle.state(), HandleState::Idle);

        handle.start();
        assert!(handle.kill(false));
        assert_eq!(handle.state(), HandleState::Killed);
        assert!(!handle.kill(false));
        assert!(!handle.start());
    }

    #[test]
    fn test_kill_after_completion_is_noop() {
        let (concrete, target) = setup();
        let count = Rc::new(Cell::new(0));
        let inner = count.clone();
        let mut handle = TweenHandle::new(Tween::move_axis(&target, Axis::Y, 3.0, 0.2))
            .on_complete(Rc::new(move || inner.set(inner.get() + 1)));
        handle.start();
        handle.tick(0.2).unwrap();

        assert!(!handle.kill(true));
        assert_eq!(handle.state(), HandleState::Completed);
        assert_eq!(concrete.borrow().position.y, 3.0);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_restart_kept_graph() {
        let (concrete, target) = setup();
        let count = Rc::new(Cell::new(0));
        let inner = count.clone();
        let mut handle = TweenHandle::new(Tween::move_axis(&target, Axis::X, 2.0, 1.0))
            .with_auto_kill(false)
            .on_complete(Rc::new(move || inner.set(inner.get() + 1)));

        handle.start();
        handle.tick(1.0).unwrap();
        assert_eq!(handle.state(), HandleState::Completed);
        assert!(!handle.is_disposable());

        concrete.borrow_mut().position.x = 0.0;
        assert!(handle.start());
        handle.tick(0.5).unwrap();
        assert!((concrete.borrow().position.x - 1.0).abs() < 1e-5);
        handle.tick(0.5).unwrap();
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn test_release_kept_graph() {
        let (_, target) = setup();
        let mut handle =
            TweenHandle::new(Tween::move_axis(&target, Axis::X, 2.0, 0.1)).with_auto_kill(false);
        assert!(!handle.release());

        handle.start();
        assert!(!handle.release());
        handle.tick(0.1).unwrap();
        assert!(!handle.is_disposable());

        assert!(handle.release());
        assert_eq!(handle.state(), HandleState::Completed);
        assert!(handle.is_disposable());
        assert!(!handle.start());
        assert!(!handle.release());
    }

    #[test]
    fn test_invalid_dt_rejected() {
        let (_, target) = setup();
        let mut handle = TweenHandle::new(Tween::scale(&target, Vec3::ZERO, 1.0));
        handle.start();
        assert!(handle.tick(f32::NAN).is_err());
        assert!(handle.is_running());
    }
}
