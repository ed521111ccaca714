//! Page composition and service registration
//!
//! A [`Page`] is a component whose view comes from an optional
//! [`PageImplementation`]. Without one it renders an empty `div`.

use serde::{Deserialize, Serialize};

use crate::fragment::{elements, Fragment};
use crate::layout::Layout;
use crate::lifecycle::Component;

/// Slot a page fills with its navigation links
pub const NAV_SLOT: &str = "nav";

/// Service registration step: takes the collection and hands it back
pub type Register<S> = fn(S) -> S;

/// Chain registration steps onto a collection
pub trait With: Sized {
    fn with(self, register: Register<Self>) -> Self {
        register(self)
    }
}

impl With for Layout {}

/// Supplies what a page shows
pub trait PageImplementation: 'static {
    /// Slots this implementation provides on top of the page's own
    fn page_layout(&self) -> Layout {
        Layout::new()
    }

    fn render(&self, layout: &Layout) -> Fragment;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub text: String,
    pub url: String,
}

impl Link {
    pub fn new(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            url: url.into(),
        }
    }

    pub fn view(&self) -> Fragment {
        elements::href()
            .set_href(self.url.clone())
            .into_fragment()
            .child(self.text.clone())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Links(pub Vec<Link>);

impl Links {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `nav` element with one anchor per link, keyed by url
    pub fn view(&self) -> Fragment {
        Fragment::element("nav").with_content(
            self.0
                .iter()
                .map(|link| link.view().set_key(link.url.clone())),
        )
    }
}

pub struct Page {
    layout: Layout,
    links: Links,
    implementation: Option<Box<dyn PageImplementation>>,
}

impl Page {
    pub fn new(layout: Layout) -> Self {
        Self {
            layout,
            links: Links::default(),
            implementation: None,
        }
    }

    pub fn with_implementation(mut self, implementation: impl PageImplementation) -> Self {
        self.implementation = Some(Box::new(implementation));
        self
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn links(&self) -> &Links {
        &self.links
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(Layout::new())
    }
}

impl Component for Page {
    type Data = Links;

    fn set_data(&mut self, links: Links) {
        self.links = links;
    }

    fn view(&self) -> Fragment {
        let Some(implementation) = &self.implementation else {
            return elements::div();
        };

        let mut layout = self.layout.clone().merge(implementation.page_layout());
        if !self.links.is_empty() {
            layout.set(NAV_SLOT, Some(self.links.view()));
        }
        implementation.render(&layout)
    }
}
