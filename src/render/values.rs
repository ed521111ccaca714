//! Values that cross the boundary into the host renderer

use std::any::{type_name, Any, TypeId};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use super::RenderTreeBuilder;
use crate::events::EventCallback;

/// Reference to a component type, as handed to `open_component`
#[derive(Clone, Copy)]
pub struct ComponentType {
    id: TypeId,
    name: &'static str,
}

impl ComponentType {
    pub fn of<C: Any>() -> Self {
        Self {
            id: TypeId::of::<C>(),
            name: type_name::<C>(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Type name without its module path
    pub fn short_name(&self) -> &'static str {
        self.name.rsplit("::").next().unwrap_or(self.name)
    }

    pub fn is<C: Any>(&self) -> bool {
        self.id == TypeId::of::<C>()
    }
}

impl PartialEq for ComponentType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ComponentType {}

impl fmt::Debug for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ComponentType({})", self.name)
    }
}

impl Serialize for ComponentType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name)
    }
}

/// Type-erased value that remembers its concrete type name
#[derive(Clone)]
pub struct DynValue {
    value: Rc<dyn Any>,
    type_name: &'static str,
}

impl DynValue {
    pub fn new<T: Any>(value: T) -> Self {
        Self {
            value: Rc::new(value),
            type_name: type_name::<T>(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }

    pub fn ptr_eq(&self, other: &DynValue) -> bool {
        Rc::ptr_eq(&self.value, &other.value)
    }
}

impl fmt::Debug for DynValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DynValue({})", self.type_name)
    }
}

/// Attribute payload; opaque to this layer and passed through unchanged
#[derive(Debug, Clone)]
pub enum AttributeValue {
    Text(String),
    Bool(bool),
    Integer(i64),
    Float(f64),
    Callback(EventCallback),
    Opaque(DynValue),
}

impl AttributeValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttributeValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_callback(&self) -> Option<&EventCallback> {
        match self {
            AttributeValue::Callback(cb) => Some(cb),
            _ => None,
        }
    }

    /// Plain-text rendering of scalar values, `None` for callbacks and opaque values
    pub fn to_text(&self) -> Option<String> {
        match self {
            AttributeValue::Text(s) => Some(s.clone()),
            AttributeValue::Bool(b) => Some(b.to_string()),
            AttributeValue::Integer(n) => Some(n.to_string()),
            AttributeValue::Float(n) => Some(n.to_string()),
            AttributeValue::Callback(_) | AttributeValue::Opaque(_) => None,
        }
    }
}

impl PartialEq for AttributeValue {
    fn eq(&self, other: &Self) -> bool {
        use AttributeValue::*;
        match (self, other) {
            (Text(a), Text(b)) => a == b,
            (Bool(a), Bool(b)) => a == b,
            (Integer(a), Integer(b)) => a == b,
            (Float(a), Float(b)) => a == b,
            (Callback(a), Callback(b)) => a == b,
            (Opaque(a), Opaque(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl Serialize for AttributeValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            AttributeValue::Text(s) => serializer.serialize_str(s),
            AttributeValue::Bool(b) => serializer.serialize_bool(*b),
            AttributeValue::Integer(n) => serializer.serialize_i64(*n),
            AttributeValue::Float(n) => serializer.serialize_f64(*n),
            AttributeValue::Callback(cb) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("callback", cb.event())?;
                map.end()
            }
            AttributeValue::Opaque(v) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("opaque", v.type_name())?;
                map.end()
            }
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Text(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::Text(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Bool(value)
    }
}

impl From<i32> for AttributeValue {
    fn from(value: i32) -> Self {
        AttributeValue::Integer(value.into())
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::Integer(value)
    }
}

impl From<u32> for AttributeValue {
    fn from(value: u32) -> Self {
        AttributeValue::Integer(value.into())
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        AttributeValue::Float(value)
    }
}

impl From<EventCallback> for AttributeValue {
    fn from(value: EventCallback) -> Self {
        AttributeValue::Callback(value)
    }
}

impl From<DynValue> for AttributeValue {
    fn from(value: DynValue) -> Self {
        AttributeValue::Opaque(value)
    }
}

/// Opaque fragment handle supplied by the host renderer
#[derive(Clone)]
pub struct ExternalFragment {
    label: Rc<str>,
    render: Rc<dyn Fn(&mut dyn RenderTreeBuilder)>,
}

impl ExternalFragment {
    pub fn new(label: &str, render: impl Fn(&mut dyn RenderTreeBuilder) + 'static) -> Self {
        Self {
            label: Rc::from(label),
            render: Rc::new(render),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Let the host expand the handle into its own builder
    pub fn render_into(&self, builder: &mut dyn RenderTreeBuilder) {
        (self.render)(builder)
    }
}

impl PartialEq for ExternalFragment {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.render, &other.render)
    }
}

impl fmt::Debug for ExternalFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExternalFragment({})", self.label)
    }
}

/// Literal content handed to `add_content` verbatim
#[derive(Clone)]
pub enum Content {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Display(Rc<dyn fmt::Display>),
    Fragment(ExternalFragment),
}

impl Content {
    pub fn display(value: impl fmt::Display + 'static) -> Self {
        Content::Display(Rc::new(value))
    }

    /// Text the host would render for this content
    pub fn to_text(&self) -> String {
        match self {
            Content::Text(s) => s.clone(),
            Content::Integer(n) => n.to_string(),
            Content::Float(n) => n.to_string(),
            Content::Bool(b) => b.to_string(),
            Content::Display(d) => d.to_string(),
            Content::Fragment(f) => format!("<{}>", f.label()),
        }
    }
}

impl PartialEq for Content {
    fn eq(&self, other: &Self) -> bool {
        use Content::*;
        match (self, other) {
            (Text(a), Text(b)) => a == b,
            (Integer(a), Integer(b)) => a == b,
            (Float(a), Float(b)) => a == b,
            (Bool(a), Bool(b)) => a == b,
            (Display(a), Display(b)) => a.to_string() == b.to_string(),
            (Fragment(a), Fragment(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Debug for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Content::Text(s) => write!(f, "Text({s:?})"),
            Content::Integer(n) => write!(f, "Integer({n})"),
            Content::Float(n) => write!(f, "Float({n})"),
            Content::Bool(b) => write!(f, "Bool({b})"),
            Content::Display(d) => write!(f, "Display({d})"),
            Content::Fragment(x) => fmt::Debug::fmt(x, f),
        }
    }
}

impl Serialize for Content {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Content::Text(s) => serializer.serialize_str(s),
            Content::Integer(n) => serializer.serialize_i64(*n),
            Content::Float(n) => serializer.serialize_f64(*n),
            Content::Bool(b) => serializer.serialize_bool(*b),
            Content::Display(d) => serializer.collect_str(d),
            Content::Fragment(x) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("fragment", x.label())?;
                map.end()
            }
        }
    }
}

/// Live handle the host assigns once an element is realized
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElementHandle {
    pub id: String,
}

/// Shared slot receiving an element's live handle
#[derive(Debug, Clone, Default)]
pub struct ElementRef(Rc<RefCell<Option<ElementHandle>>>);

impl ElementRef {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<ElementHandle> {
        self.0.borrow().clone()
    }

    /// Capture request that fills this slot when the host delivers a handle
    pub fn capture(&self) -> ReferenceCapture {
        ReferenceCapture(self.0.clone())
    }
}

/// Receives the live handle of a realized element
///
/// Two captures are equal when they fill the same slot, so re-emitting an
/// unchanged descriptor yields an identical instruction.
#[derive(Clone)]
pub struct ReferenceCapture(Rc<RefCell<Option<ElementHandle>>>);

impl ReferenceCapture {
    pub fn deliver(&self, handle: ElementHandle) {
        *self.0.borrow_mut() = Some(handle);
    }
}

impl PartialEq for ReferenceCapture {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for ReferenceCapture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ReferenceCapture")
    }
}

impl Serialize for ReferenceCapture {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str("capture")
    }
}
