//! Lexical scope chain for the Ember interpreter.
//!
//! An [`Environment`] is a cheap handle to one scope; cloning it shares the
//! scope. Lookups and assignments walk outward through parents, declarations
//! only ever touch the innermost scope.

use crate::builtins;
use crate::error::{Result, RuntimeError};
use crate::value::Value;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

#[derive(Clone)]
pub struct Environment {
    inner: Rc<RefCell<Scope>>,
}

struct Scope {
    bindings: HashMap<String, Binding>,
    parent: Option<Environment>,
}

/// A named value and whether it may be reassigned
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub value: Value,
    pub constant: bool,
}

impl Environment {
    /// Create an empty root scope with no bindings at all
    pub fn new() -> Self {
        Self::with_parent(None)
    }

    /// Create the root scope seeded with `true`, `false`, `null` and the
    /// native print functions, all constant
    pub fn new_global() -> Self {
        let env = Self::new();
        for (name, value) in builtins::globals() {
            env.insert(name, value, true);
        }
        env
    }

    pub fn new_enclosed(parent: &Environment) -> Self {
        Self::with_parent(Some(parent.clone()))
    }

    fn with_parent(parent: Option<Environment>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Scope {
                bindings: HashMap::new(),
                parent,
            })),
        }
    }

    /// Bind `name` in this scope; fails if this exact scope already has it
    pub fn declare(&self, name: &str, value: Value, constant: bool) -> Result<()> {
        if self.contains_local(name) {
            return Err(RuntimeError::duplicate_binding(name));
        }
        self.insert(name, value, constant);
        Ok(())
    }

    fn insert(&self, name: &str, value: Value, constant: bool) {
        self.inner
            .borrow_mut()
            .bindings
            .insert(name.to_string(), Binding { value, constant });
    }

    /// Overwrite the nearest binding of `name`
    pub fn assign(&self, name: &str, value: Value) -> Result<()> {
        if self.try_assign(name, value)? {
            Ok(())
        } else {
            Err(self.unresolved(name))
        }
    }

    fn try_assign(&self, name: &str, value: Value) -> Result<bool> {
        let parent = {
            let mut scope = self.inner.borrow_mut();
            if let Some(binding) = scope.bindings.get_mut(name) {
                if binding.constant {
                    return Err(RuntimeError::const_violation(name));
                }
                binding.value = value;
                return Ok(true);
            }
            scope.parent.clone()
        };

        match parent {
            Some(parent) => parent.try_assign(name, value),
            None => Ok(false),
        }
    }

    /// Resolve `name` through the scope chain, innermost first
    pub fn lookup(&self, name: &str) -> Result<Value> {
        self.binding(name)
            .map(|binding| binding.value)
            .ok_or_else(|| self.unresolved(name))
    }

    pub fn binding(&self, name: &str) -> Option<Binding> {
        let parent = {
            let scope = self.inner.borrow();
            if let Some(binding) = scope.bindings.get(name) {
                return Some(binding.clone());
            }
            scope.parent.clone()
        };

        parent.and_then(|scope| scope.binding(name))
    }

    pub fn contains_local(&self, name: &str) -> bool {
        self.inner.borrow().bindings.contains_key(name)
    }

    /// Number of scopes from this one up to the root, inclusive
    pub fn depth(&self) -> usize {
        let parent = self.inner.borrow().parent.clone();
        1 + parent.map_or(0, |scope| scope.depth())
    }

    /// Every name visible from this scope, sorted and deduplicated
    pub fn visible_names(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut names = Vec::new();
        self.collect_visible_names(&mut seen, &mut names);
        names.sort();
        names
    }

    fn collect_visible_names(&self, seen: &mut HashSet<String>, names: &mut Vec<String>) {
        let parent = {
            let scope = self.inner.borrow();
            for name in scope.bindings.keys() {
                if seen.insert(name.clone()) {
                    names.push(name.clone());
                }
            }
            scope.parent.clone()
        };

        if let Some(parent) = parent {
            parent.collect_visible_names(seen, names);
        }
    }

    /// Bindings declared directly in this scope, sorted by name
    pub fn local_bindings(&self) -> Vec<(String, Binding)> {
        let mut bindings: Vec<(String, Binding)> = self
            .inner
            .borrow()
            .bindings
            .iter()
            .map(|(name, binding)| (name.clone(), binding.clone()))
            .collect();
        bindings.sort_by(|a, b| a.0.cmp(&b.0));
        bindings
    }

    fn unresolved(&self, name: &str) -> RuntimeError {
        RuntimeError::unresolved_name(name, closest_name(name, &self.visible_names()))
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Environment")
            .field("depth", &self.depth())
            .field("locals", &self.inner.borrow().bindings.len())
            .finish()
    }
}

fn closest_name(name: &str, candidates: &[String]) -> Option<String> {
    let mut best: Option<(&String, usize)> = None;
    for candidate in candidates {
        let distance = edit_distance(name, candidate);
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((candidate, distance)),
        }
    }

    let (candidate, distance) = best?;
    let threshold = (name.chars().count() / 3).max(1);
    (distance <= threshold).then(|| candidate.clone())
}

fn edit_distance(a: &str, b: &str) -> usize {
    let a = a.chars().collect::<Vec<_>>();
    let b = b.chars().collect::<Vec<_>>();

    let mut prev = (0..=b.len()).collect::<Vec<_>>();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        prev.copy_from_slice(&curr);
    }

    prev[b.len()]
}
