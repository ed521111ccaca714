//! Boundary with the host incremental renderer
//!
//! The host consumes an ordered instruction stream and diffs it against the
//! previous pass. Sequence numbers double as diff identity, so every
//! instruction is keyed by the sequence number the emitter hands out.
//!
//! ```text
//! Fragment::emit ──► RenderTreeBuilder (host) ──► diff/patch (not ours)
//!                          ▲
//! LifecycleController ─────┘ state_has_changed() via RenderHost
//! ```

mod host;
mod recording;
mod values;

pub use host::{ChannelHost, RenderHost, RenderRequest};
pub use recording::{Frame, FrameKind, RecordingBuilder};
pub use values::{
    AttributeValue, ComponentType, Content, DynValue, ElementHandle, ElementRef,
    ExternalFragment, ReferenceCapture,
};

/// Instruction sink implemented by the host renderer
pub trait RenderTreeBuilder {
    fn open_element(&mut self, sequence: u32, tag: &str);
    fn open_component(&mut self, sequence: u32, component: ComponentType);
    fn open_region(&mut self, sequence: u32);
    fn set_key(&mut self, sequence: u32, key: &str);
    fn add_attribute(&mut self, sequence: u32, name: &str, value: AttributeValue);
    fn add_event_prevent_default(&mut self, sequence: u32, event: &str, value: bool);
    fn add_event_stop_propagation(&mut self, sequence: u32, event: &str, value: bool);
    fn add_markup_content(&mut self, sequence: u32, html: &str);
    fn add_content(&mut self, sequence: u32, content: Content);
    fn add_reference_capture(&mut self, sequence: u32, capture: ReferenceCapture);
    fn close_element(&mut self, sequence: u32);
    fn close_component(&mut self, sequence: u32);
    fn close_region(&mut self, sequence: u32);

    /// Name of the most recently emitted attribute in this pass accepted by
    /// `matches`. Used for scope-key discovery.
    fn last_attribute_matching(&self, matches: &dyn Fn(&str) -> bool) -> Option<String>;
}
