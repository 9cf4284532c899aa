//! Tween node trees: sequences, parallel groups and loops
//!
//! A node is a leaf tween or an ordered/unordered group of child nodes. Any
//! node can loop. Every node, however deep, exposes the same contract:
//! `advance(dt)` reports completion and `kill` cancels silently.
//!
//! # Sequence overflow
//!
//! A sequence gives each tick's `dt` to the child at its cursor only. When
//! that child finishes partway through the tick, the leftover time is
//! dropped; the next child starts on the following tick. This keeps every
//! step's start value a value that was actually rendered for a frame.

use crate::error::{check_timestep, Result};
use crate::tween::Tween;
use serde::{Deserialize, Serialize};
use std::rc::Rc;

/// A completion callback
///
/// Callbacks are reference-counted so they can be queued while the tree is
/// borrowed and invoked after the tick has finished writing properties.
pub type Callback = Rc<dyn Fn()>;

/// How many times a node plays
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopCount {
    Finite(u32),
    Infinite,
}

impl LoopCount {
    /// Integer loop count as used in configs: negative means infinite, 0 plays once
    pub fn from_i32(count: i32) -> Self {
        if count < 0 {
            LoopCount::Infinite
        } else {
            LoopCount::Finite(count.max(1) as u32)
        }
    }
}

/// What happens between loop cycles
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoopMode {
    /// Jump back to the start values
    #[default]
    Restart,
    /// Play the next cycle backwards (endpoints swapped, sequences reversed)
    Yoyo,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Loops {
    count: LoopCount,
    mode: LoopMode,
    /// Cycles left after the current one (finite counts only)
    remaining: u32,
}

impl Loops {
    fn new(count: LoopCount, mode: LoopMode) -> Self {
        let mut loops = Self {
            count,
            mode,
            remaining: 0,
        };
        loops.reset();
        loops
    }

    fn reset(&mut self) {
        self.remaining = match self.count {
            LoopCount::Finite(n) => n.saturating_sub(1),
            LoopCount::Infinite => 0,
        };
    }

    /// Consume one cycle if any are left
    fn take_cycle(&mut self) -> bool {
        match self.count {
            LoopCount::Infinite => true,
            LoopCount::Finite(_) if self.remaining > 0 => {
                self.remaining -= 1;
                true
            }
            LoopCount::Finite(_) => false,
        }
    }
}

enum NodeKind {
    Leaf(Tween),
    Sequence {
        children: Vec<TweenNode>,
        /// Number of children already finished in the current pass
        cursor: usize,
    },
    Parallel {
        children: Vec<TweenNode>,
    },
}

/// A node in a tween tree
pub struct TweenNode {
    kind: NodeKind,
    loops: Option<Loops>,
    on_complete: Option<Callback>,
    /// Playing backwards: sequences run last-to-first
    reversed: bool,
    completed: bool,
    killed: bool,
    /// Set once the callback has been queued; survives loop cycles
    notified: bool,
}

impl std::fmt::Debug for TweenNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match &self.kind {
            NodeKind::Leaf(_) => "leaf",
            NodeKind::Sequence { .. } => "sequence",
            NodeKind::Parallel { .. } => "parallel",
        };
        f.debug_struct("TweenNode")
            .field("kind", &kind)
            .field("loops", &self.loops)
            .field("completed", &self.completed)
            .field("killed", &self.killed)
            .finish_non_exhaustive()
    }
}

impl From<Tween> for TweenNode {
    fn from(tween: Tween) -> Self {
        Self::leaf(tween)
    }
}

impl TweenNode {
    fn with_kind(kind: NodeKind) -> Self {
        Self {
            kind,
            loops: None,
            on_complete: None,
            reversed: false,
            completed: false,
            killed: false,
            notified: false,
        }
    }

    pub fn leaf(tween: Tween) -> Self {
        Self::with_kind(NodeKind::Leaf(tween))
    }

    /// Children play one after another
    pub fn sequence<I>(children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<TweenNode>,
    {
        Self::with_kind(NodeKind::Sequence {
            children: children.into_iter().map(Into::into).collect(),
            cursor: 0,
        })
    }

    /// Children play at the same time
    pub fn parallel<I>(children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<TweenNode>,
    {
        Self::with_kind(NodeKind::Parallel {
            children: children.into_iter().map(Into::into).collect(),
        })
    }

    /// Builder: append `child` to this sequence
    ///
    /// Anything other than a plain sequence is wrapped in a new one.
    pub fn then(mut self, child: impl Into<TweenNode>) -> Self {
        if self.loops.is_none() && self.on_complete.is_none() {
            if let NodeKind::Sequence { children, .. } = &mut self.kind {
                children.push(child.into());
                return self;
            }
        }
        Self::sequence([self, child.into()])
    }

    /// Builder: play `child` alongside this node
    pub fn join(mut self, child: impl Into<TweenNode>) -> Self {
        if self.loops.is_none() && self.on_complete.is_none() {
            if let NodeKind::Parallel { children } = &mut self.kind {
                children.push(child.into());
                return self;
            }
        }
        Self::parallel([self, child.into()])
    }

    /// Builder: loop this node
    pub fn looped(mut self, count: LoopCount, mode: LoopMode) -> Self {
        self.loops = Some(Loops::new(count, mode));
        self
    }

    /// Builder: callback fired once when this node completes naturally
    pub fn on_complete(mut self, callback: Callback) -> Self {
        self.on_complete = Some(callback);
        self
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }

    pub fn is_killed(&self) -> bool {
        self.killed
    }

    /// Whether the node has stopped, naturally or by kill
    pub fn is_finished(&self) -> bool {
        self.completed || self.killed
    }

    /// Total playing time, `None` for infinite loops
    pub fn duration(&self) -> Option<f32> {
        let once = match &self.kind {
            NodeKind::Leaf(tween) => Some(tween.duration()),
            NodeKind::Sequence { children, .. } => children
                .iter()
                .try_fold(0.0, |total, child| child.duration().map(|d| total + d)),
            NodeKind::Parallel { children } => children
                .iter()
                .try_fold(0.0_f32, |longest, child| child.duration().map(|d| longest.max(d))),
        }?;

        match self.loops.map(|l| l.count) {
            None => Some(once),
            Some(LoopCount::Finite(n)) => Some(once * n as f32),
            Some(LoopCount::Infinite) => None,
        }
    }

    /// Advance the tree by `dt`
    ///
    /// Completion callbacks of nodes that finish are pushed to `fired`; the
    /// caller runs them once the whole tick has been applied. Returns whether
    /// this node is finished.
    pub fn advance(&mut self, dt: f32, fired: &mut Vec<Callback>) -> Result<bool> {
        check_timestep(dt)?;
        if self.is_finished() {
            return Ok(true);
        }

        let pass_done = match &mut self.kind {
            NodeKind::Leaf(tween) => tween.advance(dt)?,
            NodeKind::Sequence { children, cursor } => {
                if *cursor >= children.len() {
                    true
                } else {
                    let index = if self.reversed {
                        children.len() - 1 - *cursor
                    } else {
                        *cursor
                    };
                    if children[index].advance(dt, fired)? {
                        *cursor += 1;
                    }
                    *cursor >= children.len()
                }
            }
            NodeKind::Parallel { children } => {
                let mut all_done = true;
                for child in children.iter_mut() {
                    all_done &= child.advance(dt, fired)?;
                }
                all_done
            }
        };

        if !pass_done {
            return Ok(false);
        }

        if let Some(loops) = self.loops.as_mut() {
            if loops.take_cycle() {
                let mode = loops.mode;
                self.next_cycle(mode);
                return Ok(false);
            }
        }

        self.completed = true;
        if !self.notified {
            self.notified = true;
            if let Some(callback) = &self.on_complete {
                fired.push(callback.clone());
            }
        }
        Ok(true)
    }

    /// Prepare the inner tree for another of this node's own loop cycles
    fn next_cycle(&mut self, mode: LoopMode) {
        if mode == LoopMode::Yoyo {
            self.reversed = !self.reversed;
        }
        let reversed = self.reversed;
        match &mut self.kind {
            NodeKind::Leaf(tween) => tween.orient(reversed),
            NodeKind::Sequence { children, cursor } => {
                *cursor = 0;
                children.iter_mut().for_each(|c| c.orient(reversed));
            }
            NodeKind::Parallel { children } => {
                children.iter_mut().for_each(|c| c.orient(reversed));
            }
        }
    }

    /// Reset this subtree to play from its start in the given direction
    ///
    /// Callbacks that already fired stay fired.
    fn orient(&mut self, reversed: bool) {
        self.completed = false;
        self.reversed = reversed;
        if let Some(loops) = self.loops.as_mut() {
            loops.reset();
        }
        match &mut self.kind {
            NodeKind::Leaf(tween) => tween.orient(reversed),
            NodeKind::Sequence { children, cursor } => {
                *cursor = 0;
                children.iter_mut().for_each(|c| c.orient(reversed));
            }
            NodeKind::Parallel { children } => {
                children.iter_mut().for_each(|c| c.orient(reversed));
            }
        }
    }

    /// Stop the tree without firing any completion callback
    ///
    /// With `jump_to_end`, every unfinished leaf writes its configured end
    /// value in traversal order; otherwise properties keep their last
    /// advanced values. On a backward yoyo pass a sequence is traversed
    /// last-to-first, so its first step's end is written last.
    pub fn kill(&mut self, jump_to_end: bool) {
        if self.is_finished() {
            return;
        }

        match &mut self.kind {
            NodeKind::Leaf(tween) => tween.kill(jump_to_end),
            NodeKind::Sequence { children, .. } => {
                if self.reversed {
                    children.iter_mut().rev().for_each(|c| c.kill(jump_to_end));
                } else {
                    children.iter_mut().for_each(|c| c.kill(jump_to_end));
                }
            }
            NodeKind::Parallel { children } => {
                children.iter_mut().for_each(|c| c.kill(jump_to_end));
            }
        }
        self.killed = true;
    }

    /// Return the whole tree to its initial state so it can be replayed
    ///
    /// Captured start values are kept; callbacks may fire again.
    pub fn rewind(&mut self) {
        self.killed = false;
        self.notified = false;
        match &mut self.kind {
            NodeKind::Leaf(_) => {}
            NodeKind::Sequence { children, .. } | NodeKind::Parallel { children } => {
                children.iter_mut().for_each(TweenNode::rewind);
            }
        }
        self.orient(false);
    }

    /// Visit every leaf tween in declaration order
    pub fn for_each_leaf(&self, f: &mut dyn FnMut(&Tween)) {
        match &self.kind {
            NodeKind::Leaf(tween) => f(tween),
            NodeKind::Sequence { children, .. } | NodeKind::Parallel { children } => {
                for child in children {
                    child.for_each_leaf(f);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing::Easing;
    use crate::target::{Axis, TargetRef, Transform};
    use glam::Vec3;
    use std::cell::{Cell, RefCell};

    fn target() -> (Rc<RefCell<Transform>>, TargetRef) {
        let concrete = Transform::new().shared();
        let target: TargetRef = concrete.clone();
        (concrete, target)
    }

    fn counter() -> (Rc<Cell<u32>>, Callback) {
        let count = Rc::new(Cell::new(0));
        let inner = count.clone();
        (count, Rc::new(move || inner.set(inner.get() + 1)))
    }

    fn run(node: &mut TweenNode, dt: f32) -> bool {
        let mut fired = Vec::new();
        let done = node.advance(dt, &mut fired).unwrap();
        fired.iter().for_each(|cb| cb());
        done
    }

    #[test]
    fn test_sequence_runs_children_in_order() {
        let (concrete, target) = target();
        let mut node = TweenNode::sequence([
            Tween::move_axis(&target, Axis::X, 10.0, 1.0),
            Tween::move_axis(&target, Axis::Y, 5.0, 1.0),
        ]);

        assert!(!run(&mut node, 0.5));
        assert!((concrete.borrow().position.x - 5.0).abs() < 1e-5);
        assert_eq!(concrete.borrow().position.y, 0.0);

        assert!(!run(&mut node, 0.5));
        assert!(run(&mut node, 1.0));
        assert!(node.is_complete());
        assert_eq!(concrete.borrow().position, Vec3::new(10.0, 5.0, 0.0));
    }

    #[test]
    fn test_sequence_drops_overflow() {
        let (concrete, target) = target();
        let mut node = TweenNode::sequence([
            Tween::move_axis(&target, Axis::X, 1.0, 0.1),
            Tween::move_axis(&target, Axis::Y, 1.0, 1.0),
        ]);

        // 0.9s of leftover is not carried into the second step
        run(&mut node, 1.0);
        assert_eq!(concrete.borrow().position, Vec3::new(1.0, 0.0, 0.0));

        run(&mut node, 0.5);
        assert!((concrete.borrow().position.y - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_sequence_duration_is_sum() {
        let (_, target) = target();
        let node = TweenNode::sequence([
            Tween::scale(&target, Vec3::ONE, 0.5),
            Tween::scale(&target, Vec3::ONE, 0.2),
            Tween::scale(&target, Vec3::ONE, 0.3),
        ]);
        assert!((node.duration().unwrap() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_parallel_finishes_when_all_children_finish() {
        let (concrete, target) = target();
        let mut node = TweenNode::parallel([
            Tween::move_axis(&target, Axis::X, 1.0, 0.5),
            Tween::scale_axis(&target, Axis::Y, 3.0, 1.0),
        ]);
        assert_eq!(node.duration(), Some(1.0));

        assert!(!run(&mut node, 0.5));
        assert_eq!(concrete.borrow().position.x, 1.0);
        assert!(run(&mut node, 0.5));
        assert_eq!(concrete.borrow().scale.y, 3.0);
    }

    #[test]
    fn test_parallel_any_completion_order() {
        // Children finishing first, last, or together all give the same answer
        let orders = [
            [0.25, 0.5, 0.75],
            [0.75, 0.5, 0.25],
            [0.75, 0.75, 0.75],
            [0.5, 0.75, 0.25],
        ];
        for durations in orders {
            let (_, target) = target();
            let mut node = TweenNode::parallel([
                Tween::move_axis(&target, Axis::X, 1.0, durations[0]),
                Tween::move_axis(&target, Axis::Y, 1.0, durations[1]),
                Tween::move_axis(&target, Axis::Z, 1.0, durations[2]),
            ]);
            let mut elapsed = 0.0;
            loop {
                let done = run(&mut node, 0.125);
                elapsed += 0.125;
                assert_eq!(done, elapsed >= 0.75, "{durations:?} at {elapsed}");
                if done {
                    break;
                }
            }
        }
    }

    #[test]
    fn test_restart_loop() {
        let (concrete, target) = target();
        let (count, cb) = counter();
        let mut node = TweenNode::leaf(Tween::move_axis(&target, Axis::X, 10.0, 1.0))
            .looped(LoopCount::Finite(3), LoopMode::Restart)
            .on_complete(cb);
        assert_eq!(node.duration(), Some(3.0));

        assert!(!run(&mut node, 1.0));
        // Second cycle starts again from the captured start
        run(&mut node, 0.5);
        assert!((concrete.borrow().position.x - 5.0).abs() < 1e-5);
        run(&mut node, 0.5);
        assert!(run(&mut node, 1.0));
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_yoyo_round_trip_returns_to_start() {
        let (concrete, target) = target();
        concrete.borrow_mut().rotation = Vec3::new(0.0, 0.0, 4.0);
        let mut node = TweenNode::leaf(
            Tween::rotate_to(&target, Vec3::new(0.0, 0.0, 15.0), 0.5).ease(Easing::EaseInOutSine),
        )
        .looped(LoopCount::Finite(4), LoopMode::Yoyo);

        for cycle in 1..=4 {
            run(&mut node, 0.5);
            let z = concrete.borrow().rotation.z;
            let expected = if cycle % 2 == 0 { 4.0 } else { 15.0 };
            assert!((z - expected).abs() < 1e-4, "cycle {cycle}: {z}");
        }
        assert!(node.is_complete());
    }

    #[test]
    fn test_yoyo_sequence_plays_backwards() {
        let (concrete, target) = target();
        let mut node = TweenNode::sequence([
            Tween::rotate_by(&target, Vec3::new(0.0, 0.0, 5.0), 0.5),
            Tween::rotate_by(&target, Vec3::new(0.0, 0.0, -10.0), 0.5),
        ])
        .looped(LoopCount::Finite(2), LoopMode::Yoyo);

        run(&mut node, 0.5);
        assert!((concrete.borrow().rotation.z - 5.0).abs() < 1e-4);
        run(&mut node, 0.5);
        assert!((concrete.borrow().rotation.z + 5.0).abs() < 1e-4);

        // Backwards pass: the second step undoes itself first, no jump
        run(&mut node, 0.25);
        assert!(concrete.borrow().rotation.z > -5.0 && concrete.borrow().rotation.z < 5.0);
        run(&mut node, 0.25);
        assert!((concrete.borrow().rotation.z - 5.0).abs() < 1e-4);
        run(&mut node, 0.5);
        assert!(concrete.borrow().rotation.z.abs() < 1e-4);
        assert!(node.is_complete());
    }

    #[test]
    fn test_infinite_loop_never_completes() {
        let (_, target) = target();
        let (count, cb) = counter();
        let mut node = TweenNode::leaf(Tween::move_axis(&target, Axis::Y, 1.0, 0.3))
            .looped(LoopCount::Infinite, LoopMode::Yoyo)
            .on_complete(cb);
        assert_eq!(node.duration(), None);

        for i in 0..1000 {
            assert!(!run(&mut node, 0.01 * (i % 7) as f32));
        }
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn test_leaf_callback_fires_once() {
        let (_, target) = target();
        let (count, cb) = counter();
        let mut node = TweenNode::leaf(Tween::scale(&target, Vec3::ZERO, 0.2)).on_complete(cb);

        run(&mut node, 0.2);
        run(&mut node, 0.2);
        run(&mut node, 0.0);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_nested_callbacks_fire_once_across_loops() {
        let (_, target) = target();
        let (inner_count, inner_cb) = counter();
        let mut node = TweenNode::sequence([
            TweenNode::leaf(Tween::move_axis(&target, Axis::X, 1.0, 0.1)).on_complete(inner_cb),
            TweenNode::leaf(Tween::move_axis(&target, Axis::X, 0.0, 0.1)),
        ])
        .looped(LoopCount::Finite(3), LoopMode::Restart);

        while !run(&mut node, 0.1) {}
        assert_eq!(inner_count.get(), 1);
    }

    #[test]
    fn test_kill_jump_to_end_is_silent() {
        let (concrete, target) = target();
        let (count, cb) = counter();
        let mut node = TweenNode::sequence([
            Tween::move_axis(&target, Axis::X, 10.0, 1.0),
            Tween::scale(&target, Vec3::splat(2.0), 1.0),
        ])
        .on_complete(cb);

        run(&mut node, 0.3);
        node.kill(true);
        assert!(node.is_killed());
        assert_eq!(concrete.borrow().position.x, 10.0);
        assert_eq!(concrete.borrow().scale, Vec3::splat(2.0));

        // Further advances are no-ops
        assert!(run(&mut node, 1.0));
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn test_kill_in_place() {
        let (concrete, target) = target();
        let mut node = TweenNode::parallel([
            Tween::move_axis(&target, Axis::X, 10.0, 1.0),
            Tween::scale(&target, Vec3::splat(3.0), 1.0),
        ]);

        run(&mut node, 0.5);
        node.kill(false);
        run(&mut node, 0.5);
        assert!((concrete.borrow().position.x - 5.0).abs() < 1e-5);
        assert!(concrete.borrow().scale.abs_diff_eq(Vec3::splat(2.0), 1e-5));
    }

    #[test]
    fn test_kill_jump_follows_traversal_order_on_yoyo() {
        let wiggle = |target: &TargetRef| {
            let swing = Vec3::new(0.0, 0.0, 5.0);
            TweenNode::sequence([
                Tween::rotate_by(target, swing, 0.5),
                Tween::rotate_by(target, -swing, 0.5),
            ])
            .looped(LoopCount::Finite(2), LoopMode::Yoyo)
        };

        // Forward pass: the last step's end wins
        let (concrete, target) = target();
        let mut node = wiggle(&target);
        run(&mut node, 0.25);
        node.kill(true);
        assert!(concrete.borrow().rotation.z.abs() < 1e-5);

        // Backward pass: steps are visited last-to-first, so the first
        // step's configured end is written last
        let (concrete, target) = self::target();
        let mut node = wiggle(&target);
        for _ in 0..4 {
            assert!(!run(&mut node, 0.25));
        }
        assert!(concrete.borrow().rotation.z.abs() < 1e-5);
        run(&mut node, 0.25);
        node.kill(true);
        assert!((concrete.borrow().rotation.z - 5.0).abs() < 1e-5);
        assert!(node.is_killed());
    }

    #[test]
    fn test_kill_after_complete_is_noop() {
        let (concrete, target) = target();
        let mut node = TweenNode::leaf(Tween::move_axis(&target, Axis::X, 1.0, 0.1));
        run(&mut node, 0.1);
        node.kill(true);
        assert!(node.is_complete());
        assert!(!node.is_killed());
        assert_eq!(concrete.borrow().position.x, 1.0);
    }

    #[test]
    fn test_negative_dt_rejected() {
        let (_, target) = target();
        let mut node = TweenNode::leaf(Tween::scale(&target, Vec3::ZERO, 1.0));
        let mut fired = Vec::new();
        assert!(node.advance(-0.01, &mut fired).is_err());
        assert!(!node.is_finished());
    }

    #[test]
    fn test_rewind_replays() {
        let (concrete, target) = target();
        let (count, cb) = counter();
        let mut node = TweenNode::leaf(Tween::move_axis(&target, Axis::X, 4.0, 1.0))
            .looped(LoopCount::Finite(2), LoopMode::Yoyo)
            .on_complete(cb);

        while !run(&mut node, 0.5) {}
        assert_eq!(count.get(), 1);

        node.rewind();
        assert!(!node.is_finished());
        run(&mut node, 1.0);
        assert_eq!(concrete.borrow().position.x, 4.0);
        while !run(&mut node, 0.5) {}
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn test_builders() {
        let (_, target) = target();
        let node = TweenNode::leaf(Tween::scale(&target, Vec3::ONE, 0.2))
            .join(Tween::move_axis(&target, Axis::Y, 1.0, 0.4))
            .then(Tween::scale(&target, Vec3::ONE, 0.1));
        assert!((node.duration().unwrap() - 0.5).abs() < 1e-6);

        let mut leaves = 0;
        node.for_each_leaf(&mut |_| leaves += 1);
        assert_eq!(leaves, 3);
    }
}
