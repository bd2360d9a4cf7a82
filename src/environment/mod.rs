pub mod native;

use crate::string::IdentName;
use crate::value::Value;
use std::{cell::RefCell, collections::HashMap, fmt, rc::Rc};

/// A shared, mutable scope. Clones refer to the same bindings.
#[derive(Clone)]
pub struct Environment {
    inner: Rc<RefCell<EnvironmentImpl>>,
}

struct EnvironmentImpl {
    values: HashMap<IdentName, Value>,
    parent: Option<Environment>,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(EnvironmentImpl {
                values: HashMap::new(),
                parent: None,
            })),
        }
    }

    pub fn new_scope(&self) -> Self {
        Self {
            inner: Rc::new(RefCell::new(EnvironmentImpl {
                values: HashMap::new(),
                parent: Some(self.clone()),
            })),
        }
    }

    /// Looks `name` up in this scope, then in each enclosing scope.
    pub fn access(&self, name: &str) -> Option<Value> {
        let inner = self.inner.borrow();
        match inner.values.get(name) {
            Some(value) => Some(value.clone()),
            None => inner.parent.as_ref()?.access(name),
        }
    }

    /// Binds `name` in this scope, shadowing any outer binding.
    pub fn declare(&self, name: impl Into<IdentName>, value: Value) {
        self.inner.borrow_mut().values.insert(name.into(), value);
    }

    pub fn contains_local(&self, name: &str) -> bool {
        self.inner.borrow().values.contains_key(name)
    }

    pub fn is_same(&self, other: &Environment) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

// Bindings may hold closures that point back here, so only names are shown.
impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        let mut names: Vec<&str> = inner.values.keys().map(|name| name.as_str()).collect();
        names.sort_unstable();
        f.debug_struct("Environment")
            .field("names", &names)
            .field("has_parent", &inner.parent.is_some())
            .finish()
    }
}
