//! Linearization of descriptors into host instructions
//!
//! Order within one descriptor:
//!
//! ```text
//! open ─► set-key ─► id ─► bound attrs ─► listeners (+guards) ─► static attrs
//!      ─► Data ─► scope attr (elements) ─► reference capture ─► children ─► close
//! ```
//!
//! Every instruction, the closing one included, takes the next sequence
//! number of the pass. Sequence numbers double as diff identity on the host
//! side, so the order above must never change between passes.

use std::borrow::Cow;

use regex::Regex;

use super::content::{classify, Classified, RenderItem};
use super::{Fragment, Identity, DATA_PARAMETER};
use crate::error::EmitError;
use crate::render::{AttributeValue, Content, ReferenceCapture, RenderTreeBuilder};

/// Attribute prefix the host uses for style-scope markers
pub const DEFAULT_SCOPE_PREFIX: &str = "b-";

/// Recognizes scope-marker attribute names
#[derive(Debug, Clone)]
pub enum ScopePattern {
    Prefix(Cow<'static, str>),
    Regex(Regex),
}

impl ScopePattern {
    pub fn regex(pattern: &str) -> Result<Self, regex::Error> {
        Regex::new(pattern).map(ScopePattern::Regex)
    }

    pub fn matches(&self, name: &str) -> bool {
        match self {
            ScopePattern::Prefix(prefix) => name.starts_with(prefix.as_ref()),
            ScopePattern::Regex(re) => re.is_match(name),
        }
    }
}

impl Default for ScopePattern {
    fn default() -> Self {
        ScopePattern::Prefix(Cow::Borrowed(DEFAULT_SCOPE_PREFIX))
    }
}

/// How element descriptors resolve their style-scope key
#[derive(Debug, Clone)]
pub enum ScopeStrategy {
    /// Never emit a scope attribute
    Disabled,
    /// Use this key for every element of the pass
    Explicit(String),
    /// Scan the builder for the most recent attribute matching the pattern
    Discover(ScopePattern),
}

impl Default for ScopeStrategy {
    fn default() -> Self {
        ScopeStrategy::Discover(ScopePattern::default())
    }
}

#[derive(Debug, Clone, Default)]
pub struct EmitOptions {
    pub scope: ScopeStrategy,
}

impl EmitOptions {
    pub fn with_scope_key(key: impl Into<String>) -> Self {
        Self {
            scope: ScopeStrategy::Explicit(key.into()),
        }
    }
}

/// One emission pass over a host builder
///
/// Owns the sequence counter, so nested descriptors emitted through the
/// same emitter share one gapless numbering.
pub struct Emitter<'a> {
    builder: &'a mut dyn RenderTreeBuilder,
    options: &'a EmitOptions,
    next: u32,
}

impl<'a> Emitter<'a> {
    pub fn new(builder: &'a mut dyn RenderTreeBuilder, options: &'a EmitOptions) -> Self {
        Self {
            builder,
            options,
            next: 0,
        }
    }

    /// Number of instructions emitted so far in this pass
    pub fn emitted(&self) -> u32 {
        self.next
    }

    fn sequence(&mut self) -> u32 {
        let sequence = self.next;
        self.next += 1;
        sequence
    }

    fn attribute(&mut self, name: &str, value: AttributeValue) {
        let seq = self.sequence();
        self.builder.add_attribute(seq, name, value);
    }

    fn content(&mut self, content: Content) {
        let seq = self.sequence();
        self.builder.add_content(seq, content);
    }

    fn markup(&mut self, html: &str) {
        let seq = self.sequence();
        self.builder.add_markup_content(seq, html);
    }

    fn reference(&mut self, capture: ReferenceCapture) {
        let seq = self.sequence();
        self.builder.add_reference_capture(seq, capture);
    }

    fn scope_enabled(&self) -> bool {
        !matches!(self.options.scope, ScopeStrategy::Disabled)
    }

    fn resolve_scope(&self) -> Option<String> {
        match &self.options.scope {
            ScopeStrategy::Disabled => None,
            ScopeStrategy::Explicit(key) => Some(key.clone()),
            ScopeStrategy::Discover(pattern) => self
                .builder
                .last_attribute_matching(&|name| pattern.matches(name)),
        }
    }
}

impl Fragment {
    /// Linearize into `builder` with default options, returning the number
    /// of instructions emitted
    pub fn emit(&mut self, builder: &mut dyn RenderTreeBuilder) -> Result<u32, EmitError> {
        self.emit_with_options(builder, &EmitOptions::default())
    }

    pub fn emit_with_options(
        &mut self,
        builder: &mut dyn RenderTreeBuilder,
        options: &EmitOptions,
    ) -> Result<u32, EmitError> {
        let mut emitter = Emitter::new(builder, options);
        self.emit_with(&mut emitter)?;
        tracing::trace!("Emitted {} instructions", emitter.emitted());
        Ok(emitter.emitted())
    }

    /// Linearize into an ongoing pass
    ///
    /// Only the scope-key cache is written; the configuration is read-only
    /// for the duration of the pass.
    pub fn emit_with(&mut self, out: &mut Emitter<'_>) -> Result<(), EmitError> {
        if self.identity.is_element() {
            if let Some(found) = out.resolve_scope() {
                self.scope_key = Some(found);
            }
        }

        let seq = out.sequence();
        match &self.identity {
            Identity::Element(tag) => out.builder.open_element(seq, tag),
            Identity::Component(component) => out.builder.open_component(seq, *component),
            Identity::Region => out.builder.open_region(seq),
        }

        if let Some(key) = &self.key {
            let seq = out.sequence();
            out.builder.set_key(seq, key);
        }
        if let Some(id) = &self.id {
            out.attribute("id", AttributeValue::Text(id.clone()));
        }
        for (name, callback) in &self.bound_attributes {
            out.attribute(name, AttributeValue::Callback(callback.clone()));
        }
        for binding in self.listeners.iter() {
            out.attribute(binding.name(), AttributeValue::Callback(binding.callback()));
            if binding.should_prevent_default() {
                let seq = out.sequence();
                out.builder.add_event_prevent_default(seq, binding.name(), true);
            }
            if binding.should_stop_propagation() {
                let seq = out.sequence();
                out.builder.add_event_stop_propagation(seq, binding.name(), true);
            }
        }
        for (name, value) in &self.attributes {
            out.attribute(name, value.clone());
        }
        if let Some(data) = &self.data {
            out.attribute(DATA_PARAMETER, data.clone());
        }

        if self.identity.is_element() && out.scope_enabled() {
            if let Some(scope) = self.scope_key.as_deref().filter(|k| !k.is_empty()) {
                out.attribute(scope, AttributeValue::Bool(true));
            }
        }

        if let Some(reference) = &self.reference {
            out.reference(reference.capture());
        }

        for child in &mut self.children {
            emit_child(child, out)?;
        }

        let seq = out.sequence();
        match &self.identity {
            Identity::Element(_) => out.builder.close_element(seq),
            Identity::Component(_) => out.builder.close_component(seq),
            Identity::Region => out.builder.close_region(seq),
        }
        Ok(())
    }
}

fn emit_child(child: &mut RenderItem, out: &mut Emitter<'_>) -> Result<(), EmitError> {
    match child {
        RenderItem::Markup(markup) => out.markup(markup.as_str()),
        RenderItem::Fragment(fragment) => fragment.emit_with(out)?,
        RenderItem::Produce(produce) => {
            if let Some(mut fragment) = produce() {
                fragment.emit_with(out)?;
            }
        }
        RenderItem::ProduceMany(produce) => {
            for mut fragment in produce() {
                fragment.emit_with(out)?;
            }
        }
        RenderItem::External(external) => out.content(Content::Fragment(external.clone())),
        RenderItem::Content(content) => out.content(content.clone()),
        RenderItem::Dynamic(produce) => {
            let Some(value) = produce() else {
                return Ok(());
            };
            match classify(&value) {
                Some(Classified::Markup(html)) => out.markup(&html),
                Some(Classified::Fragments(fragments)) => {
                    for mut fragment in fragments {
                        fragment.emit_with(out)?;
                    }
                }
                Some(Classified::Content(content)) => out.content(content),
                None => {
                    tracing::error!(
                        "Unsupported content kind {} at sequence {}",
                        value.type_name(),
                        out.emitted()
                    );
                    return Err(EmitError::UnsupportedContentKind {
                        type_name: value.type_name(),
                        sequence: out.emitted(),
                    });
                }
            }
        }
    }
    Ok(())
}
