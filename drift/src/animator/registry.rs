//! Registry of animator backends.
//!
//! Constructed at startup, populated via `register()` and queried by name.
//! No global state, so it is testable in isolation.

use std::collections::HashMap;

use drift_common::config::AnimationConfig;

use super::{AnimationError, Animator, AnimatorFactory, headless, terminal};

/// Registry of available animator backends.
pub struct AnimatorRegistry {
    factories: HashMap<&'static str, AnimatorFactory>,
}

impl AnimatorRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Registry with every built-in backend.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register(terminal::BACKEND_NAME, terminal::create_animator);
        registry.register(headless::BACKEND_NAME, headless::create_animator);
        registry
    }

    /// Register a backend factory.
    ///
    /// # Panics
    /// Panics if a backend with the same name is already registered.
    pub fn register(&mut self, name: &'static str, factory: AnimatorFactory) {
        if self.factories.contains_key(name) {
            panic!("Animator backend '{name}' is already registered");
        }
        self.factories.insert(name, factory);
    }

    /// Create a backend instance by name.
    ///
    /// # Errors
    /// `AnimationError::Unavailable` if no backend with that name exists.
    pub fn create(
        &self,
        name: &str,
        config: &AnimationConfig,
    ) -> Result<Box<dyn Animator>, AnimationError> {
        let factory = self.factories.get(name).ok_or_else(|| {
            AnimationError::Unavailable(format!(
                "unknown backend '{name}' (available: {})",
                self.list_backends().join(", ")
            ))
        })?;
        Ok(factory(config))
    }

    /// Registered backend names, sorted.
    pub fn list_backends(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.factories.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

impl Default for AnimatorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_backends() {
        let registry = AnimatorRegistry::with_builtin();
        assert_eq!(registry.list_backends(), vec!["headless", "terminal"]);
    }

    #[test]
    fn create_by_name() {
        let registry = AnimatorRegistry::with_builtin();
        let animator = registry
            .create("headless", &AnimationConfig::default())
            .unwrap();
        assert_eq!(animator.name(), "headless");
    }

    #[test]
    fn unknown_backend_is_unavailable() {
        let registry = AnimatorRegistry::with_builtin();
        let result = registry.create("turtle", &AnimationConfig::default());
        match result {
            Err(AnimationError::Unavailable(msg)) => assert!(msg.contains("turtle")),
            _ => panic!("expected Unavailable"),
        }
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn duplicate_registration_panics() {
        let mut registry = AnimatorRegistry::with_builtin();
        registry.register("headless", headless::create_animator);
    }
}
