//! In-memory builder recording one pass of instructions

use std::any::Any;
use std::fmt;

use serde::Serialize;

use super::values::{AttributeValue, ComponentType, Content, ElementHandle, ReferenceCapture};
use super::RenderTreeBuilder;
use crate::error::EventError;

/// One recorded instruction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub sequence: u32,
    #[serde(flatten)]
    pub kind: FrameKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum FrameKind {
    OpenElement { tag: String },
    OpenComponent { component: ComponentType },
    OpenRegion,
    SetKey { key: String },
    Attribute { name: String, value: AttributeValue },
    PreventDefault { event: String, value: bool },
    StopPropagation { event: String, value: bool },
    Markup { html: String },
    Content { value: Content },
    ReferenceCapture { capture: ReferenceCapture },
    CloseElement,
    CloseComponent,
    CloseRegion,
}

impl FrameKind {
    pub fn attribute(name: &str, value: impl Into<AttributeValue>) -> Self {
        FrameKind::Attribute {
            name: name.to_string(),
            value: value.into(),
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(
            self,
            FrameKind::OpenElement { .. } | FrameKind::OpenComponent { .. } | FrameKind::OpenRegion
        )
    }

    pub fn is_close(&self) -> bool {
        matches!(
            self,
            FrameKind::CloseElement | FrameKind::CloseComponent | FrameKind::CloseRegion
        )
    }
}

impl fmt::Display for FrameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameKind::OpenElement { tag } => write!(f, "open-element {tag}"),
            FrameKind::OpenComponent { component } => {
                write!(f, "open-component {}", component.short_name())
            }
            FrameKind::OpenRegion => f.write_str("open-region"),
            FrameKind::SetKey { key } => write!(f, "set-key {key:?}"),
            FrameKind::Attribute { name, value } => match value {
                AttributeValue::Callback(cb) => {
                    write!(f, "add-attribute {name} <callback x{}>", cb.len())
                }
                AttributeValue::Opaque(v) => write!(f, "add-attribute {name} <{}>", v.type_name()),
                AttributeValue::Text(s) => write!(f, "add-attribute {name}={s:?}"),
                other => write!(f, "add-attribute {name}={}", other.to_text().unwrap_or_default()),
            },
            FrameKind::PreventDefault { event, value } => {
                write!(f, "add-event-prevent-default {event}={value}")
            }
            FrameKind::StopPropagation { event, value } => {
                write!(f, "add-event-stop-propagation {event}={value}")
            }
            FrameKind::Markup { html } => write!(f, "add-markup-content {html:?}"),
            FrameKind::Content { value } => write!(f, "add-content {:?}", value.to_text()),
            FrameKind::ReferenceCapture { .. } => f.write_str("capture-reference"),
            FrameKind::CloseElement => f.write_str("close-element"),
            FrameKind::CloseComponent => f.write_str("close-component"),
            FrameKind::CloseRegion => f.write_str("close-region"),
        }
    }
}

/// Builder that keeps every instruction of a pass in order
#[derive(Debug, Default)]
pub struct RecordingBuilder {
    frames: Vec<Frame>,
}

impl RecordingBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn into_frames(self) -> Vec<Frame> {
        self.frames
    }

    pub fn kinds(&self) -> Vec<FrameKind> {
        self.frames.iter().map(|f| f.kind.clone()).collect()
    }

    pub fn sequences(&self) -> Vec<u32> {
        self.frames.iter().map(|f| f.sequence).collect()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Value of the first attribute frame called `name`
    pub fn attribute(&self, name: &str) -> Option<&AttributeValue> {
        self.frames.iter().find_map(|f| match &f.kind {
            FrameKind::Attribute { name: n, value } if n == name => Some(value),
            _ => None,
        })
    }

    /// Invoke the first callback attribute named `event`, the way the
    /// host routes a UI event. Returns `Ok(false)` when nothing listens.
    pub fn dispatch(&self, event: &str, payload: &dyn Any) -> Result<bool, EventError> {
        match self.attribute(event).and_then(AttributeValue::as_callback) {
            Some(callback) => callback.invoke(payload).map(|_| true),
            None => Ok(false),
        }
    }

    /// Realize every captured reference, handing out handles from `assign`
    pub fn realize_references(&self, mut assign: impl FnMut(u32) -> ElementHandle) -> usize {
        let mut realized = 0;
        for frame in &self.frames {
            if let FrameKind::ReferenceCapture { capture } = &frame.kind {
                capture.deliver(assign(frame.sequence));
                realized += 1;
            }
        }
        realized
    }

    fn push(&mut self, sequence: u32, kind: FrameKind) {
        self.frames.push(Frame { sequence, kind });
    }
}

impl RenderTreeBuilder for RecordingBuilder {
    fn open_element(&mut self, sequence: u32, tag: &str) {
        self.push(sequence, FrameKind::OpenElement { tag: tag.to_string() });
    }

    fn open_component(&mut self, sequence: u32, component: ComponentType) {
        self.push(sequence, FrameKind::OpenComponent { component });
    }

    fn open_region(&mut self, sequence: u32) {
        self.push(sequence, FrameKind::OpenRegion);
    }

    fn set_key(&mut self, sequence: u32, key: &str) {
        self.push(sequence, FrameKind::SetKey { key: key.to_string() });
    }

    fn add_attribute(&mut self, sequence: u32, name: &str, value: AttributeValue) {
        self.push(sequence, FrameKind::attribute(name, value));
    }

    fn add_event_prevent_default(&mut self, sequence: u32, event: &str, value: bool) {
        self.push(
            sequence,
            FrameKind::PreventDefault {
                event: event.to_string(),
                value,
            },
        );
    }

    fn add_event_stop_propagation(&mut self, sequence: u32, event: &str, value: bool) {
        self.push(
            sequence,
            FrameKind::StopPropagation {
                event: event.to_string(),
                value,
            },
        );
    }

    fn add_markup_content(&mut self, sequence: u32, html: &str) {
        self.push(sequence, FrameKind::Markup { html: html.to_string() });
    }

    fn add_content(&mut self, sequence: u32, content: Content) {
        self.push(sequence, FrameKind::Content { value: content });
    }

    fn add_reference_capture(&mut self, sequence: u32, capture: ReferenceCapture) {
        self.push(sequence, FrameKind::ReferenceCapture { capture });
    }

    fn close_element(&mut self, sequence: u32) {
        self.push(sequence, FrameKind::CloseElement);
    }

    fn close_component(&mut self, sequence: u32) {
        self.push(sequence, FrameKind::CloseComponent);
    }

    fn close_region(&mut self, sequence: u32) {
        self.push(sequence, FrameKind::CloseRegion);
    }

    fn last_attribute_matching(&self, matches: &dyn Fn(&str) -> bool) -> Option<String> {
        self.frames.iter().rev().find_map(|f| match &f.kind {
            FrameKind::Attribute { name, .. } if matches(name) => Some(name.clone()),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{EventCallback, MouseEventArgs};
    use crate::render::ElementRef;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn scope_scan_returns_most_recent_match() {
        let mut builder = RecordingBuilder::new();
        builder.open_element(0, "div");
        builder.add_attribute(1, "b-first", true.into());
        builder.add_attribute(2, "class", "x".into());
        builder.add_attribute(3, "b-second", true.into());
        builder.add_content(4, Content::Text("hi".into()));

        let found = builder.last_attribute_matching(&|name| name.starts_with("b-"));
        assert_eq!(found.as_deref(), Some("b-second"));
        assert_eq!(builder.last_attribute_matching(&|name| name == "nope"), None);
    }

    #[test]
    fn dispatch_routes_to_callback_attribute() {
        let hits = Rc::new(Cell::new(0));
        let seen = hits.clone();
        let mut builder = RecordingBuilder::new();
        builder.add_attribute(
            0,
            "onclick",
            EventCallback::typed("onclick", move |_: &MouseEventArgs| seen.set(seen.get() + 1))
                .into(),
        );

        assert_eq!(builder.dispatch("onclick", &MouseEventArgs::default()), Ok(true));
        assert_eq!(builder.dispatch("onkeydown", &MouseEventArgs::default()), Ok(false));
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn realized_references_reach_their_slot() {
        let slot = ElementRef::new();
        let mut builder = RecordingBuilder::new();
        builder.add_reference_capture(7, slot.capture());

        let realized = builder.realize_references(|seq| ElementHandle {
            id: format!("el-{seq}"),
        });
        assert_eq!(realized, 1);
        assert_eq!(slot.get().map(|h| h.id), Some("el-7".to_string()));
    }

    #[test]
    fn frames_serialize_with_op_tag() {
        let mut builder = RecordingBuilder::new();
        builder.open_element(0, "span");
        builder.add_attribute(1, "id", "a".into());
        builder.close_element(2);

        let json = serde_json::to_value(builder.frames()).unwrap();
        assert_eq!(json[0]["op"], "open_element");
        assert_eq!(json[0]["tag"], "span");
        assert_eq!(json[1]["value"], "a");
        assert_eq!(json[2]["sequence"], 2);
    }
}
