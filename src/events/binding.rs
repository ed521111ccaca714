//! Event bindings: a named callback chain plus lazy guards
//!
//! A binding is identified by its event name and declared payload type
//! only. Two bindings for `onclick` with `MouseEventArgs` are the same
//! registration no matter which handlers they carry, so configuring the
//! same event twice accumulates one chain instead of duplicating it.

use std::any::{type_name, Any, TypeId};
use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use crate::error::EventError;

/// Lazily evaluated guard, read once per emission pass
pub type Guard = Rc<dyn Fn() -> bool>;

type HandlerFn = dyn Fn(&dyn Any) -> Result<(), &'static str>;

/// One link in a callback chain
///
/// Compared by identity so a specific handler can be detached again.
#[derive(Clone)]
pub struct EventHandler(Rc<HandlerFn>);

impl EventHandler {
    /// Handler receiving the payload type-erased; never fails
    pub fn new(handler: impl Fn(&dyn Any) + 'static) -> Self {
        Self(Rc::new(move |payload: &dyn Any| {
            handler(payload);
            Ok(())
        }))
    }

    /// Handler for a narrower payload type, downcast on every invocation
    pub fn typed<T: Any>(handler: impl Fn(&T) + 'static) -> Self {
        Self(Rc::new(move |payload: &dyn Any| {
            let payload = payload.downcast_ref::<T>().ok_or(type_name::<T>())?;
            handler(payload);
            Ok(())
        }))
    }

    pub fn ptr_eq(&self, other: &EventHandler) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    fn call(&self, payload: &dyn Any) -> Result<(), &'static str> {
        (self.0)(payload)
    }
}

impl PartialEq for EventHandler {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for EventHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EventHandler({:p})", Rc::as_ptr(&self.0))
    }
}

/// Declared payload type of a binding
#[derive(Debug, Clone, Copy)]
pub struct PayloadType {
    id: TypeId,
    name: &'static str,
}

impl PayloadType {
    pub fn of<T: Any>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for PayloadType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for PayloadType {}

impl Hash for PayloadType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Registration identity: event name plus payload type
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BindingKey {
    pub name: Cow<'static, str>,
    pub payload: PayloadType,
}

/// A named event registration with its handler chain and guards
#[derive(Clone)]
pub struct EventBinding {
    key: BindingKey,
    chain: Vec<EventHandler>,
    prevent_default: Option<Guard>,
    stop_propagation: Option<Guard>,
}

impl EventBinding {
    /// Fresh binding for `name` declaring payload `T`, with no handlers
    pub fn create<T: Any>(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            key: BindingKey {
                name: name.into(),
                payload: PayloadType::of::<T>(),
            },
            chain: Vec::new(),
            prevent_default: None,
            stop_propagation: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.key.name
    }

    pub fn payload(&self) -> PayloadType {
        self.key.payload
    }

    pub fn key(&self) -> &BindingKey {
        &self.key
    }

    pub fn handlers(&self) -> &[EventHandler] {
        &self.chain
    }

    /// Append an untyped handler; earlier handlers keep running first
    pub fn add(self, handler: impl Fn(&dyn Any) + 'static) -> Self {
        self.add_handler(EventHandler::new(handler))
    }

    /// Append a handler for payload `T`
    ///
    /// A dispatch carrying any other payload fails with
    /// [`EventError::InvalidEventPayload`].
    pub fn add_typed<T: Any>(self, handler: impl Fn(&T) + 'static) -> Self {
        self.add_handler(EventHandler::typed(handler))
    }

    pub fn add_handler(mut self, handler: EventHandler) -> Self {
        self.chain.push(handler);
        self
    }

    /// Detach `handler` from the chain. Returns whether it was attached.
    pub fn remove(&mut self, handler: &EventHandler) -> bool {
        let before = self.chain.len();
        self.chain.retain(|h| !h.ptr_eq(handler));
        self.chain.len() != before
    }

    pub fn prevent_default(self) -> Self {
        self.prevent_default_when(|| true)
    }

    pub fn prevent_default_when(mut self, predicate: impl Fn() -> bool + 'static) -> Self {
        self.prevent_default = Some(Rc::new(predicate));
        self
    }

    pub fn stop_propagation(self) -> Self {
        self.stop_propagation_when(|| true)
    }

    pub fn stop_propagation_when(mut self, predicate: impl Fn() -> bool + 'static) -> Self {
        self.stop_propagation = Some(Rc::new(predicate));
        self
    }

    /// Evaluate the prevent-default guard; no guard means false
    pub fn should_prevent_default(&self) -> bool {
        self.prevent_default.as_ref().is_some_and(|guard| guard())
    }

    pub fn should_stop_propagation(&self) -> bool {
        self.stop_propagation.as_ref().is_some_and(|guard| guard())
    }

    /// Snapshot of the current chain, handed to the host as an attribute value
    pub fn callback(&self) -> EventCallback {
        EventCallback {
            event: self.key.name.to_string(),
            chain: self.chain.iter().cloned().collect(),
        }
    }

    /// Run the chain in order. The first mismatched payload aborts the dispatch.
    pub fn invoke(&self, payload: &dyn Any) -> Result<(), EventError> {
        run_chain(&self.key.name, &self.chain, payload)
    }

    /// Fold another registration of the same event into this one
    pub(crate) fn merge(&mut self, other: EventBinding) {
        debug_assert_eq!(self.key, other.key);
        self.chain.extend(other.chain);
        if other.prevent_default.is_some() {
            self.prevent_default = other.prevent_default;
        }
        if other.stop_propagation.is_some() {
            self.stop_propagation = other.stop_propagation;
        }
    }
}

impl PartialEq for EventBinding {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for EventBinding {}

impl Hash for EventBinding {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl fmt::Debug for EventBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBinding")
            .field("name", &self.key.name)
            .field("payload", &self.key.payload.name)
            .field("handlers", &self.chain.len())
            .field("prevent_default", &self.prevent_default.is_some())
            .field("stop_propagation", &self.stop_propagation.is_some())
            .finish()
    }
}

/// Invokable callback value passed to the host renderer
#[derive(Clone)]
pub struct EventCallback {
    event: String,
    chain: Rc<[EventHandler]>,
}

impl EventCallback {
    /// Single-handler callback, typically for two-way bound attributes
    pub fn new(event: impl Into<String>, handler: impl Fn(&dyn Any) + 'static) -> Self {
        Self {
            event: event.into(),
            chain: Rc::from(vec![EventHandler::new(handler)]),
        }
    }

    pub fn typed<T: Any>(event: impl Into<String>, handler: impl Fn(&T) + 'static) -> Self {
        Self {
            event: event.into(),
            chain: Rc::from(vec![EventHandler::typed(handler)]),
        }
    }

    pub fn event(&self) -> &str {
        &self.event
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    pub fn invoke(&self, payload: &dyn Any) -> Result<(), EventError> {
        run_chain(&self.event, &self.chain, payload)
    }
}

/// Equal when both run the very same handlers for the same event, so a
/// snapshot taken from an unchanged binding compares equal across passes
impl PartialEq for EventCallback {
    fn eq(&self, other: &Self) -> bool {
        self.event == other.event && self.chain[..] == other.chain[..]
    }
}

impl fmt::Debug for EventCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EventCallback({}, {} handlers)", self.event, self.chain.len())
    }
}

fn run_chain(event: &str, chain: &[EventHandler], payload: &dyn Any) -> Result<(), EventError> {
    for handler in chain {
        handler
            .call(payload)
            .map_err(|expected| EventError::InvalidEventPayload {
                event: event.to_string(),
                expected,
            })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{ChangeEventArgs, MouseEventArgs};
    use std::cell::RefCell;

    #[test]
    fn handlers_accumulate_in_addition_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let (a, b) = (log.clone(), log.clone());

        let binding = EventBinding::create::<MouseEventArgs>("onclick")
            .add(move |_| a.borrow_mut().push("first"))
            .add_typed(move |_: &MouseEventArgs| b.borrow_mut().push("second"));

        binding.invoke(&MouseEventArgs::default()).unwrap();
        assert_eq!(*log.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn typed_handler_rejects_mismatched_payload() {
        let binding = EventBinding::create::<MouseEventArgs>("onclick")
            .add_typed(|_: &MouseEventArgs| {});

        let err = binding.invoke(&ChangeEventArgs::new("x")).unwrap_err();
        assert_eq!(
            err,
            EventError::InvalidEventPayload {
                event: "onclick".into(),
                expected: type_name::<MouseEventArgs>(),
            }
        );
    }

    #[test]
    fn equality_ignores_handlers() {
        let bare = EventBinding::create::<MouseEventArgs>("onclick");
        let busy = EventBinding::create::<MouseEventArgs>("onclick").add(|_| {});
        let other_payload = EventBinding::create::<ChangeEventArgs>("onclick");

        assert_eq!(bare, busy);
        assert_ne!(bare, other_payload);
    }

    #[test]
    fn remove_detaches_only_the_given_handler() {
        let keep = EventHandler::new(|_| {});
        let drop = EventHandler::new(|_| {});
        let mut binding = EventBinding::create::<MouseEventArgs>("onclick")
            .add_handler(keep.clone())
            .add_handler(drop.clone());

        assert!(binding.remove(&drop));
        assert!(!binding.remove(&drop));
        assert_eq!(binding.handlers(), &[keep]);
    }

    #[test]
    fn guards_default_to_false_and_evaluate_lazily() {
        let flag = Rc::new(RefCell::new(false));
        let seen = flag.clone();
        let binding = EventBinding::create::<MouseEventArgs>("onclick")
            .prevent_default_when(move || *seen.borrow());

        assert!(!binding.should_prevent_default());
        assert!(!binding.should_stop_propagation());
        *flag.borrow_mut() = true;
        assert!(binding.should_prevent_default());
        assert!(binding.clone().stop_propagation().should_stop_propagation());
    }

    #[test]
    fn callback_snapshot_is_unaffected_by_later_additions() {
        let binding = EventBinding::create::<MouseEventArgs>("onclick").add(|_| {});
        let snapshot = binding.callback();
        let binding = binding.add(|_| {});

        assert_eq!(snapshot.len(), 1);
        assert_eq!(binding.callback().len(), 2);
        assert_eq!(snapshot.event(), "onclick");
        assert_ne!(snapshot, binding.callback());
        assert_eq!(binding.callback(), binding.callback());
    }
}
