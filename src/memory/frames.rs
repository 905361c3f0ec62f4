//! Runtime scope stack
//!
//! This module provides the activation records the interpreter pushes while
//! walking scopes:
//! - [`Bindings`]: a reference-counted name → value store
//! - [`Frame`]: one activation of a [`ScopeTemplate`], holding its store
//! - [`ScopeStack`]: the ordered frames, innermost last
//!
//! # Capture Modes
//!
//! A frame's store is chosen when the frame is created:
//! - `Shared`: the enclosing frame's store handle is cloned, so writes are
//!   visible to the enclosing frame
//! - `Copied`: a new store is filled from a snapshot of the source store
//! - `Fresh`: a new empty store (the global frame)

use super::value::Value;
use crate::parser::ast::{CaptureMode, ScopeId, ScopeTemplate};
use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

/// A single-threaded, shareable variable store.
///
/// Cloning a `Bindings` clones the handle, not the map: both handles see the
/// same variables. Use [`Bindings::snapshot`] for an independent copy.
#[derive(Clone, Default)]
pub struct Bindings(Rc<RefCell<FxHashMap<String, Value>>>);

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a name, cloning the value out of the store
    pub fn get(&self, name: &str) -> Option<Value> {
        self.0.borrow().get(name).cloned()
    }

    /// Bind or rebind a name
    pub fn set(&self, name: impl Into<String>, value: Value) {
        self.0.borrow_mut().insert(name.into(), value);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.borrow().contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Independent copy of the current contents
    pub fn snapshot(&self) -> Bindings {
        Bindings(Rc::new(RefCell::new(self.0.borrow().clone())))
    }

    /// Contents ordered by name
    pub fn to_sorted(&self) -> BTreeMap<String, Value> {
        self.0
            .borrow()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

// Stores reachable from closures may contain those closures, so only names
// are printed.
impl fmt::Debug for Bindings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.to_sorted().into_keys().collect();
        f.debug_tuple("Bindings").field(&names).finish()
    }
}

/// Build the store for a new activation from `source` per `mode`.
///
/// Nested scopes pass the enclosing frame's store; calls pass the closure's
/// captured store.
pub fn capture_store(mode: CaptureMode, source: Option<&Bindings>) -> Bindings {
    match (mode, source) {
        (CaptureMode::Shared, Some(store)) => store.clone(),
        (CaptureMode::Copied, Some(store)) => store.snapshot(),
        _ => Bindings::new(),
    }
}

/// One activation of a scope template
#[derive(Debug, Clone)]
pub struct Frame {
    pub template: ScopeId,
    pub store: Bindings,
}

impl Frame {
    pub fn new(template: ScopeId, store: Bindings) -> Self {
        Frame { template, store }
    }
}

/// The runtime scope stack
#[derive(Debug, Clone, Default)]
pub struct ScopeStack {
    frames: Vec<Frame>,
}

impl ScopeStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the store for a nested activation of `template` on top of the current frame
    pub fn store_for(&self, template: &ScopeTemplate) -> Bindings {
        capture_store(template.capture, self.current().map(|frame| &frame.store))
    }

    /// Push a frame whose store was prepared by the caller
    pub fn push_frame(&mut self, frame: Frame) {
        tracing::trace!(template = frame.template, depth = self.frames.len() + 1, "push frame");
        self.frames.push(frame);
    }

    /// Pop the top frame
    pub fn pop_frame(&mut self) -> Option<Frame> {
        let frame = self.frames.pop();
        if let Some(frame) = &frame {
            tracing::trace!(template = frame.template, depth = self.frames.len(), "pop frame");
        }
        frame
    }

    /// Get the current (innermost) frame
    pub fn current(&self) -> Option<&Frame> {
        self.frames.last()
    }

    /// Get the global (outermost) frame
    pub fn global(&self) -> Option<&Frame> {
        self.frames.first()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ast::SourceLocation;

    fn template(id: ScopeId, parent: Option<ScopeId>, capture: CaptureMode) -> ScopeTemplate {
        ScopeTemplate {
            id,
            parent,
            capture,
            statements: Vec::new(),
            location: SourceLocation::default(),
        }
    }

    fn enter(stack: &mut ScopeStack, template: &ScopeTemplate) {
        let store = stack.store_for(template);
        stack.push_frame(Frame::new(template.id, store));
    }

    #[test]
    fn test_shared_frame_writes_are_visible_to_parent() {
        let mut stack = ScopeStack::new();
        enter(&mut stack, &template(0, None, CaptureMode::Fresh));
        enter(&mut stack, &template(1, Some(0), CaptureMode::Shared));

        stack.current().unwrap().store.set("x", Value::Number(1.0));
        stack.pop_frame();

        assert_eq!(stack.current().unwrap().store.get("x"), Some(Value::Number(1.0)));
    }

    #[test]
    fn test_copied_frame_writes_are_not_visible_to_parent() {
        let mut stack = ScopeStack::new();
        enter(&mut stack, &template(0, None, CaptureMode::Fresh));
        stack.current().unwrap().store.set("x", Value::Number(1.0));
        enter(&mut stack, &template(1, Some(0), CaptureMode::Copied));

        let inner = &stack.current().unwrap().store;
        assert_eq!(inner.get("x"), Some(Value::Number(1.0)));
        inner.set("x", Value::Number(2.0));
        inner.set("y", Value::Number(3.0));
        stack.pop_frame();

        let outer = &stack.current().unwrap().store;
        assert_eq!(outer.get("x"), Some(Value::Number(1.0)));
        assert!(!outer.contains("y"));
    }

    #[test]
    fn test_copied_frame_ignores_later_parent_writes() {
        let mut stack = ScopeStack::new();
        enter(&mut stack, &template(0, None, CaptureMode::Fresh));
        enter(&mut stack, &template(1, Some(0), CaptureMode::Copied));

        stack.global().unwrap().store.set("late", Value::Nil);
        assert!(!stack.current().unwrap().store.contains("late"));
    }

    #[test]
    fn test_fresh_frame_has_empty_store() {
        let mut stack = ScopeStack::new();
        enter(&mut stack, &template(0, None, CaptureMode::Fresh));
        stack.current().unwrap().store.set("x", Value::Nil);
        enter(&mut stack, &template(1, Some(0), CaptureMode::Fresh));

        assert!(stack.current().unwrap().store.is_empty());
        stack.pop_frame();
        stack.pop_frame();
        assert!(stack.is_empty());
    }

    #[test]
    fn test_capture_store_from_explicit_source() {
        let env = Bindings::new();
        env.set("x", Value::Number(1.0));

        let shared = capture_store(CaptureMode::Shared, Some(&env));
        let copied = capture_store(CaptureMode::Copied, Some(&env));
        let fresh = capture_store(CaptureMode::Fresh, Some(&env));
        shared.set("s", Value::Nil);
        copied.set("c", Value::Nil);

        assert!(env.contains("s"));
        assert!(!env.contains("c"));
        assert_eq!(copied.get("x"), Some(Value::Number(1.0)));
        assert!(fresh.is_empty());
        assert!(capture_store(CaptureMode::Copied, None).is_empty());
    }

    #[test]
    fn test_sorted_contents() {
        let store = Bindings::new();
        store.set("b", Value::Number(2.0));
        store.set("a", Value::Number(1.0));

        let names: Vec<_> = store.to_sorted().into_keys().collect();
        assert_eq!(names, vec!["a", "b"]);
    }
}
