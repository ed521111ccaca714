//! Child content of a descriptor

use std::fmt;
use std::rc::Rc;

use super::Fragment;
use crate::error::ContentError;
use crate::render::{Content, DynValue, ExternalFragment};

/// Pre-escaped markup, handed to the host without further escaping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markup(pub String);

impl Markup {
    pub fn new(html: impl Into<String>) -> Self {
        Self(html.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One child slot of a descriptor
///
/// Producers run once per emission pass and are never cached across passes.
#[derive(Clone)]
pub enum RenderItem {
    Markup(Markup),
    Fragment(Box<Fragment>),
    Produce(Rc<dyn Fn() -> Option<Fragment>>),
    ProduceMany(Rc<dyn Fn() -> Vec<Fragment>>),
    External(ExternalFragment),
    Content(Content),
    /// Type-erased value classified at emission; the only item that can fail
    Dynamic(Rc<dyn Fn() -> Option<DynValue>>),
}

impl RenderItem {
    pub fn produce(producer: impl Fn() -> Option<Fragment> + 'static) -> Self {
        RenderItem::Produce(Rc::new(producer))
    }

    pub fn produce_many(producer: impl Fn() -> Vec<Fragment> + 'static) -> Self {
        RenderItem::ProduceMany(Rc::new(producer))
    }

    pub fn dynamic(producer: impl Fn() -> Option<DynValue> + 'static) -> Self {
        RenderItem::Dynamic(Rc::new(producer))
    }

    /// Fixed list of descriptors, handed out fresh on every pass
    pub fn from_fragments(fragments: impl IntoIterator<Item = Fragment>) -> Self {
        let fragments: Rc<[Fragment]> = fragments.into_iter().collect();
        RenderItem::ProduceMany(Rc::new(move || fragments.to_vec()))
    }

    /// Classify a type-erased value into concrete items
    pub fn classify(value: &DynValue) -> Result<Vec<RenderItem>, ContentError> {
        let classified = classify(value).ok_or(ContentError::UnsupportedContentKind {
            type_name: value.type_name(),
        })?;
        Ok(match classified {
            Classified::Markup(html) => vec![RenderItem::Markup(Markup(html))],
            Classified::Fragments(fragments) => fragments
                .into_iter()
                .map(|f| RenderItem::Fragment(Box::new(f)))
                .collect(),
            Classified::Content(content) => vec![RenderItem::Content(content)],
        })
    }
}

impl fmt::Debug for RenderItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderItem::Markup(m) => write!(f, "Markup({:?})", m.0),
            RenderItem::Fragment(x) => f.debug_tuple("Fragment").field(&x.identity()).finish(),
            RenderItem::Produce(_) => f.write_str("Produce"),
            RenderItem::ProduceMany(_) => f.write_str("ProduceMany"),
            RenderItem::External(x) => fmt::Debug::fmt(x, f),
            RenderItem::Content(c) => fmt::Debug::fmt(c, f),
            RenderItem::Dynamic(_) => f.write_str("Dynamic"),
        }
    }
}

pub(crate) enum Classified {
    Markup(String),
    Fragments(Vec<Fragment>),
    Content(Content),
}

/// Map a type-erased value onto the kinds the host understands.
/// `None` means the kind is unsupported.
pub(crate) fn classify(value: &DynValue) -> Option<Classified> {
    macro_rules! integer {
        ($($t:ty),*) => {$(
            if let Some(n) = value.downcast_ref::<$t>() {
                return Some(Classified::Content(match i64::try_from(*n) {
                    Ok(n) => Content::Integer(n),
                    Err(_) => Content::Text(n.to_string()),
                }));
            }
        )*};
    }

    if let Some(m) = value.downcast_ref::<Markup>() {
        return Some(Classified::Markup(m.0.clone()));
    }
    if let Some(f) = value.downcast_ref::<Fragment>() {
        return Some(Classified::Fragments(vec![f.clone()]));
    }
    if let Some(fs) = value.downcast_ref::<Vec<Fragment>>() {
        return Some(Classified::Fragments(fs.clone()));
    }
    if let Some(x) = value.downcast_ref::<ExternalFragment>() {
        return Some(Classified::Content(Content::Fragment(x.clone())));
    }
    if let Some(c) = value.downcast_ref::<Content>() {
        return Some(Classified::Content(c.clone()));
    }
    if let Some(s) = value.downcast_ref::<String>() {
        return Some(Classified::Content(Content::Text(s.clone())));
    }
    if let Some(s) = value.downcast_ref::<&'static str>() {
        return Some(Classified::Content(Content::Text((*s).to_string())));
    }
    integer!(i8, i16, i32, i64, u8, u16, u32, u64, usize, isize);
    if let Some(n) = value.downcast_ref::<f64>() {
        return Some(Classified::Content(Content::Float(*n)));
    }
    if let Some(n) = value.downcast_ref::<f32>() {
        return Some(Classified::Content(Content::Float(f64::from(*n))));
    }
    if let Some(b) = value.downcast_ref::<bool>() {
        return Some(Classified::Content(Content::Bool(*b)));
    }
    None
}

/// Conversion into an optional child; `None` drops the child
pub trait IntoRenderItem {
    fn into_render_item(self) -> Option<RenderItem>;
}

impl IntoRenderItem for RenderItem {
    fn into_render_item(self) -> Option<RenderItem> {
        Some(self)
    }
}

impl IntoRenderItem for Fragment {
    fn into_render_item(self) -> Option<RenderItem> {
        Some(RenderItem::Fragment(Box::new(self)))
    }
}

impl IntoRenderItem for Markup {
    fn into_render_item(self) -> Option<RenderItem> {
        Some(RenderItem::Markup(self))
    }
}

impl IntoRenderItem for ExternalFragment {
    fn into_render_item(self) -> Option<RenderItem> {
        Some(RenderItem::External(self))
    }
}

impl IntoRenderItem for Content {
    fn into_render_item(self) -> Option<RenderItem> {
        Some(RenderItem::Content(self))
    }
}

impl IntoRenderItem for &str {
    fn into_render_item(self) -> Option<RenderItem> {
        Some(RenderItem::Content(Content::Text(self.to_string())))
    }
}

impl IntoRenderItem for String {
    fn into_render_item(self) -> Option<RenderItem> {
        Some(RenderItem::Content(Content::Text(self)))
    }
}

impl IntoRenderItem for i32 {
    fn into_render_item(self) -> Option<RenderItem> {
        Some(RenderItem::Content(Content::Integer(self.into())))
    }
}

impl IntoRenderItem for i64 {
    fn into_render_item(self) -> Option<RenderItem> {
        Some(RenderItem::Content(Content::Integer(self)))
    }
}

impl IntoRenderItem for f64 {
    fn into_render_item(self) -> Option<RenderItem> {
        Some(RenderItem::Content(Content::Float(self)))
    }
}

impl IntoRenderItem for bool {
    fn into_render_item(self) -> Option<RenderItem> {
        Some(RenderItem::Content(Content::Bool(self)))
    }
}

impl<T: IntoRenderItem> IntoRenderItem for Option<T> {
    fn into_render_item(self) -> Option<RenderItem> {
        self.and_then(IntoRenderItem::into_render_item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_classify_as_content() {
        let items = RenderItem::classify(&DynValue::new(7u8)).unwrap();
        assert!(matches!(items.as_slice(), [RenderItem::Content(Content::Integer(7))]));

        let items = RenderItem::classify(&DynValue::new(u64::MAX)).unwrap();
        assert!(matches!(
            items.as_slice(),
            [RenderItem::Content(Content::Text(s))] if s == &u64::MAX.to_string()
        ));
    }

    #[test]
    fn fragment_lists_expand_in_order() {
        let list = vec![Fragment::element("a"), Fragment::element("b")];
        let items = RenderItem::classify(&DynValue::new(list)).unwrap();
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn from_fragments_hands_out_fresh_copies() {
        let item = RenderItem::from_fragments([Fragment::element("li"), Fragment::element("li")]);
        let RenderItem::ProduceMany(produce) = item else {
            panic!("expected a sequence producer");
        };
        assert_eq!(produce().len(), 2);
        assert_eq!(produce().len(), 2);
    }

    #[test]
    fn unit_struct_is_unsupported() {
        struct Widget;
        assert!(RenderItem::classify(&DynValue::new(Widget)).is_err());
    }
}
