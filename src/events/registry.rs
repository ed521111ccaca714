//! Per-owner event registry
//!
//! Each descriptor owns one registry. Registrations keep the order in
//! which their event was first declared, which is the order listeners are
//! emitted in.

use indexmap::IndexMap;

use super::binding::{BindingKey, EventBinding, EventHandler};

#[derive(Debug, Clone, Default)]
pub struct EventRegistry {
    bindings: IndexMap<BindingKey, EventBinding>,
}

impl EventRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `binding`, folding it into an existing registration of the
    /// same event instead of adding a duplicate
    pub fn add(&mut self, binding: EventBinding) {
        match self.bindings.get_mut(binding.key()) {
            Some(existing) => existing.merge(binding),
            None => {
                self.bindings.insert(binding.key().clone(), binding);
            }
        }
    }

    /// Detach `handler` from the registration matching `binding`.
    /// No-op when the event was never registered.
    pub fn remove_handler(&mut self, binding: &EventBinding, handler: &EventHandler) -> bool {
        match self.bindings.get_mut(binding.key()) {
            Some(existing) => existing.remove(handler),
            None => false,
        }
    }

    pub fn get(&self, binding: &EventBinding) -> Option<&EventBinding> {
        self.bindings.get(binding.key())
    }

    pub fn iter(&self) -> impl Iterator<Item = &EventBinding> {
        self.bindings.values()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{on_change, on_click, MouseEventArgs};

    #[test]
    fn same_event_accumulates_into_one_registration() {
        let mut registry = EventRegistry::new();
        registry.add(on_click().add(|_| {}));
        registry.add(on_change().add(|_| {}));
        registry.add(on_click().add(|_| {}).prevent_default());

        assert_eq!(registry.len(), 2);
        let click = registry.get(&on_click()).unwrap();
        assert_eq!(click.handlers().len(), 2);
        assert!(click.should_prevent_default());

        let names: Vec<_> = registry.iter().map(|b| b.name().to_string()).collect();
        assert_eq!(names, vec!["onclick", "onchange"]);
    }

    #[test]
    fn removing_from_an_absent_registration_is_a_noop() {
        let mut registry = EventRegistry::new();
        let handler = EventHandler::typed(|_: &MouseEventArgs| {});
        assert!(!registry.remove_handler(&on_click(), &handler));

        registry.add(on_click().add_handler(handler.clone()));
        assert!(registry.remove_handler(&on_click(), &handler));
        assert!(registry.get(&on_click()).unwrap().handlers().is_empty());
    }
}
