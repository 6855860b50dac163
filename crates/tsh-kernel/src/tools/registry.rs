//! Name → built-in lookup.

use std::collections::HashMap;
use std::sync::Arc;

use super::traits::Builtin;

/// Registry of built-in commands, keyed by name.
#[derive(Default)]
pub struct BuiltinRegistry {
    builtins: HashMap<String, Arc<dyn Builtin>>,
}

impl BuiltinRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a built-in. A later registration under the same name wins.
    pub fn register(&mut self, builtin: impl Builtin + 'static) {
        let name = builtin.name().to_string();
        if self.builtins.insert(name.clone(), Arc::new(builtin)).is_some() {
            tracing::debug!(name = %name, "replaced built-in");
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Builtin>> {
        self.builtins.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.builtins.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.builtins.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl std::fmt::Debug for BuiltinRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuiltinRegistry")
            .field("builtins", &self.names())
            .finish()
    }
}
