//! Fragment descriptors: declarative render units
//!
//! A [`Fragment`] describes one element, component or transparent region
//! together with its attributes, listeners and children. Identity is fixed
//! at construction; everything else is configured fluently until the
//! descriptor is linearized by [`Fragment::emit`].
//!
//! ```text
//! Fragment ──configure──► Fragment ──emit──► RenderTreeBuilder
//!   identity fixed          attrs, listeners,     ordered instructions,
//!                           children, key, ref    gapless sequence numbers
//! ```

mod content;
pub mod elements;
mod emit;

pub use content::{IntoRenderItem, Markup, RenderItem};
pub use emit::{EmitOptions, Emitter, ScopePattern, ScopeStrategy, DEFAULT_SCOPE_PREFIX};

use crate::error::ContentError;
use crate::events::{EventBinding, EventCallback, EventHandler, EventRegistry};
use crate::lifecycle::Component;
use crate::render::{AttributeValue, ComponentType, DynValue, ElementRef};

/// Attribute name carrying a component's data parameter
pub const DATA_PARAMETER: &str = "Data";

const CLASS: &str = "class";

/// What a descriptor opens: exactly one of the three
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    Element(String),
    Component(ComponentType),
    /// Transparent grouping with no element of its own
    Region,
}

impl Identity {
    pub fn is_element(&self) -> bool {
        matches!(self, Identity::Element(_))
    }
}

#[derive(Debug, Clone)]
pub struct Fragment {
    identity: Identity,
    key: Option<String>,
    id: Option<String>,
    scope_key: Option<String>,
    bound_attributes: Vec<(String, EventCallback)>,
    attributes: Vec<(String, AttributeValue)>,
    listeners: EventRegistry,
    data: Option<AttributeValue>,
    children: Vec<RenderItem>,
    reference: Option<ElementRef>,
}

impl Fragment {
    fn with_identity(identity: Identity) -> Self {
        Self {
            identity,
            key: None,
            id: None,
            scope_key: None,
            bound_attributes: Vec::new(),
            attributes: Vec::new(),
            listeners: EventRegistry::new(),
            data: None,
            children: Vec::new(),
            reference: None,
        }
    }

    /// Element descriptor for `tag`. An empty tag has nothing to open and
    /// yields a region instead.
    pub fn element(tag: impl Into<String>) -> Self {
        let tag = tag.into();
        if tag.is_empty() {
            return Self::region();
        }
        Self::with_identity(Identity::Element(tag))
    }

    pub fn component<C: 'static>() -> Self {
        Self::with_identity(Identity::Component(ComponentType::of::<C>()))
    }

    /// Component descriptor passing `data` as the component's data parameter
    pub fn component_with<C: Component>(data: C::Data) -> Self {
        let mut fragment = Self::component::<C>();
        fragment.data = Some(AttributeValue::Opaque(DynValue::new(data)));
        fragment
    }

    pub fn region() -> Self {
        Self::with_identity(Identity::Region)
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Scope key cached by the last emission pass, if any
    pub fn scope_key(&self) -> Option<&str> {
        self.scope_key.as_deref()
    }

    pub fn attributes(&self) -> &[(String, AttributeValue)] {
        &self.attributes
    }

    /// Value of the first static attribute called `name`
    pub fn attribute(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value)
    }

    pub fn bound_attributes(&self) -> &[(String, EventCallback)] {
        &self.bound_attributes
    }

    pub fn listeners(&self) -> &EventRegistry {
        &self.listeners
    }

    pub fn data(&self) -> Option<&AttributeValue> {
        self.data.as_ref()
    }

    pub fn children(&self) -> &[RenderItem] {
        &self.children
    }

    pub fn reference(&self) -> Option<&ElementRef> {
        self.reference.as_ref()
    }

    /// Append static attributes. Values pass through to the host untouched.
    pub fn add_attributes<I, K, V>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<AttributeValue>,
    {
        self.attributes
            .extend(entries.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn add_attribute(self, name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.add_attributes([(name, value)])
    }

    /// Merge class tokens into the single `class` attribute
    ///
    /// Previous tokens come first, then `names` in order, separated by one
    /// space. The merged entry moves to the end of the attribute list.
    pub fn add_classes<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let added: Vec<String> = names
            .into_iter()
            .map(|s| s.as_ref().trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if added.is_empty() {
            return self;
        }

        let mut tokens = Vec::new();
        self.attributes.retain(|(name, value)| {
            if name != CLASS {
                return true;
            }
            if let Some(previous) = value.to_text().filter(|s| !s.is_empty()) {
                tokens.push(previous);
            }
            false
        });
        tokens.extend(added);

        self.attributes
            .push((CLASS.to_string(), AttributeValue::Text(tokens.join(" "))));
        self
    }

    /// Two-way bound value, emitted ahead of listeners and static attributes
    pub fn add_bound_attribute(mut self, name: impl Into<String>, callback: EventCallback) -> Self {
        self.bound_attributes.push((name.into(), callback));
        self
    }

    /// Merge bindings into this descriptor's listeners
    ///
    /// A binding for an event already registered extends that registration's
    /// chain rather than adding a second listener.
    pub fn add_event_listener(mut self, bindings: impl IntoIterator<Item = EventBinding>) -> Self {
        for binding in bindings {
            self.listeners.add(binding);
        }
        self
    }

    /// Detach `handler` from the registration matching `binding`
    pub fn remove_event_listener(
        &mut self,
        binding: &EventBinding,
        handler: &EventHandler,
    ) -> bool {
        self.listeners.remove_handler(binding, handler)
    }

    /// Append children; `None` items are dropped
    pub fn with_content<I>(mut self, items: I) -> Self
    where
        I: IntoIterator,
        I::Item: IntoRenderItem,
    {
        self.children
            .extend(items.into_iter().filter_map(IntoRenderItem::into_render_item));
        self
    }

    pub fn child(self, item: impl IntoRenderItem) -> Self {
        self.with_content([item])
    }

    /// Append type-erased children, classifying each one now
    ///
    /// Fails on the first value whose kind cannot be rendered, leaving the
    /// descriptor untouched.
    pub fn try_with_content<I>(mut self, values: I) -> Result<Self, ContentError>
    where
        I: IntoIterator<Item = Option<DynValue>>,
    {
        let mut resolved = Vec::new();
        for value in values.into_iter().flatten() {
            resolved.extend(RenderItem::classify(&value)?);
        }
        self.children.extend(resolved);
        Ok(self)
    }

    /// Child component descriptor, optionally carrying its data parameter
    pub fn with_component_content<C: Component>(self, data: Option<C::Data>) -> Self {
        let component = match data {
            Some(data) => Fragment::component_with::<C>(data),
            None => Fragment::component::<C>(),
        };
        self.child(component)
    }

    pub fn set_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn set_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn set_ref(mut self, reference: &ElementRef) -> Self {
        self.reference = Some(reference.clone());
        self
    }
}
