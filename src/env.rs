// ABOUTME: Environment module — the two scope kinds, Global and Local

use crate::error::GlamError;
use crate::value::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// A name-to-value mapping. The interpreter has exactly two scope
/// kinds: a single `Global` environment (no parent) created once at
/// start-up, and per-call `Local` environments (`with_parent`)
/// discarded at call exit. There is no block-local scope — `if`/
/// `while`/`for` bodies share the enclosing environment.
#[derive(Debug)]
pub struct Environment {
    bindings: RefCell<HashMap<String, Value>>,
    parent: Option<Rc<Environment>>,
}

impl Environment {
    /// Creates a new global environment with no parent.
    pub fn new() -> Rc<Self> {
        Rc::new(Environment {
            bindings: RefCell::new(HashMap::new()),
            parent: None,
        })
    }

    /// Creates a new local environment chained to a parent scope.
    pub fn with_parent(parent: Rc<Environment>) -> Rc<Self> {
        Rc::new(Environment {
            bindings: RefCell::new(HashMap::new()),
            parent: Some(parent),
        })
    }

    /// Defines a binding in THIS scope only (does not walk the parent
    /// chain) — used for `VarDeclaration`, which always introduces a
    /// fresh name in the active scope.
    pub fn define(&self, name: String, value: Value) {
        self.bindings.borrow_mut().insert(name, value);
    }

    /// Looks up a name in this scope, then parent scopes recursively.
    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.bindings.borrow().get(name) {
            return Some(value.clone());
        }

        if let Some(ref parent) = self.parent {
            return parent.get(name);
        }

        None
    }

    /// Updates an existing binding, walking up to the scope that
    /// defines it. Errors if the name isn't bound anywhere in the
    /// chain. Statement-level assignment does not use this — it
    /// always `define`s into the active scope instead.
    pub fn set(&self, name: &str, value: Value) -> Result<(), GlamError> {
        if self.bindings.borrow().contains_key(name) {
            self.bindings.borrow_mut().insert(name.to_string(), value);
            return Ok(());
        }

        if let Some(ref parent) = self.parent {
            return parent.set(name, value);
        }

        Err(GlamError::name_error(
            format!("assignment to undefined variable '{name}'"),
            None,
        ))
    }

    pub fn is_global(&self) -> bool {
        self.parent.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_define_and_get() {
        let env = Environment::new();
        env.define("x".to_string(), Value::Int(42));

        match env.get("x") {
            Some(Value::Int(n)) => assert_eq!(n, 42),
            _ => panic!("Expected Int(42)"),
        }
    }

    #[test]
    fn test_undefined_symbol() {
        let env = Environment::new();
        assert!(env.get("undefined").is_none());
    }

    #[test]
    fn test_shadowing() {
        let parent = Environment::new();
        parent.define("x".to_string(), Value::Int(42));

        let child = Environment::with_parent(parent);
        child.define("x".to_string(), Value::Int(100));

        match child.get("x") {
            Some(Value::Int(n)) => assert_eq!(n, 100),
            _ => panic!("Expected Int(100)"),
        }
    }

    #[test]
    fn test_parent_lookup() {
        let parent = Environment::new();
        parent.define("x".to_string(), Value::Int(42));

        let child = Environment::with_parent(parent);

        match child.get("x") {
            Some(Value::Int(n)) => assert_eq!(n, 42),
            _ => panic!("Expected Int(42)"),
        }
    }

    #[test]
    fn set_walks_up_to_the_defining_scope() {
        let parent = Environment::new();
        parent.define("x".to_string(), Value::Int(1));

        let child = Environment::with_parent(parent.clone());
        child.set("x", Value::Int(2)).unwrap();

        assert_eq!(parent.get("x"), Some(Value::Int(2)));
        // child never gained a binding of its own — it wrote through to parent
        assert!(!child.bindings.borrow().contains_key("x"));
    }

    #[test]
    fn set_on_unknown_name_is_a_name_error() {
        let env = Environment::new();
        let err = env.set("ghost", Value::Null).unwrap_err();
        assert!(matches!(err, GlamError::NameError { .. }));
    }

    #[test]
    fn test_multiple_levels() {
        let grandparent = Environment::new();
        grandparent.define("a".to_string(), Value::Int(1));

        let parent = Environment::with_parent(grandparent);
        parent.define("b".to_string(), Value::Int(2));

        let child = Environment::with_parent(parent);
        child.define("c".to_string(), Value::Int(3));

        assert_eq!(child.get("a"), Some(Value::Int(1)));
        assert_eq!(child.get("b"), Some(Value::Int(2)));
        assert_eq!(child.get("c"), Some(Value::Int(3)));
    }
}
