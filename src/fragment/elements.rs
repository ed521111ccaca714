//! Shorthands for common intrinsic elements

use std::fmt;

use super::{Fragment, IntoRenderItem, RenderItem};

/// Transparent region, for grouping siblings without a wrapper element
pub fn content() -> Fragment {
    Fragment::region()
}

pub fn main() -> Fragment {
    Fragment::element("main")
}

pub fn div() -> Fragment {
    Fragment::element("div")
}

/// Font Awesome icon host: an `i` carrying the `fa` class
pub fn fa_i() -> Fragment {
    Fragment::element("i").add_classes(["fa"])
}

pub fn span() -> Fragment {
    Fragment::element("span")
}

pub fn input() -> Fragment {
    Fragment::element("input")
}

pub fn section() -> Fragment {
    Fragment::element("section")
}

pub fn button() -> Fragment {
    Fragment::element("button")
}

pub fn img() -> Fragment {
    Fragment::element("img")
}

pub fn footer() -> Fragment {
    Fragment::element("footer")
}

pub fn href() -> Href {
    Href(Fragment::element("a"))
}

pub fn svg() -> Svg {
    Svg(Fragment::element("svg"))
}

/// Anchor element
#[derive(Debug, Clone)]
pub struct Href(Fragment);

impl Href {
    pub fn set_href(self, link: impl Into<String>) -> Self {
        Self(self.0.add_attribute("href", link.into()))
    }

    /// Continue configuring as a plain descriptor
    pub fn into_fragment(self) -> Fragment {
        self.0
    }
}

/// `viewBox` of an svg, rendered as `"x y w h"`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBox {
    pub x: i32,
    pub y: i32,
    pub w: f64,
    pub h: f64,
}

impl fmt::Display for ViewBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.x, self.y, self.w, self.h)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathValue {
    pub d: Option<String>,
}

impl PathValue {
    pub fn d(d: impl Into<String>) -> Self {
        Self { d: Some(d.into()) }
    }
}

/// Svg element with presentation-attribute shorthands
#[derive(Debug, Clone)]
pub struct Svg(Fragment);

impl Svg {
    pub fn with_viewbox(self, viewbox: ViewBox) -> Self {
        self.attr("viewBox", viewbox.to_string())
    }

    pub fn with_fill(self, fill: Option<&str>) -> Self {
        self.attr("fill", fill.unwrap_or("none").to_string())
    }

    pub fn with_stroke(self, color: Option<&str>) -> Self {
        self.attr("stroke", color.unwrap_or("currentColor").to_string())
    }

    pub fn with_stroke_width(self, width: Option<f64>) -> Self {
        Self(self.0.add_attribute("stroke-width", width.unwrap_or(1.0)))
    }

    pub fn with_stroke_line_join(self, join: Option<&str>) -> Self {
        self.attr("stroke-linejoin", join.unwrap_or("round").to_string())
    }

    pub fn with_stroke_line_cap(self, cap: Option<&str>) -> Self {
        self.attr("stroke-linecap", cap.unwrap_or("round").to_string())
    }

    /// Append a `path` child. A path without drawing data adds nothing.
    pub fn with_path(self, path: PathValue) -> Self {
        match path.d.filter(|d| !d.is_empty()) {
            Some(d) => Self(self.0.child(Fragment::element("path").add_attribute("d", d))),
            None => self,
        }
    }

    pub fn into_fragment(self) -> Fragment {
        self.0
    }

    fn attr(self, name: &str, value: String) -> Self {
        Self(self.0.add_attribute(name, value))
    }
}

impl From<Href> for Fragment {
    fn from(value: Href) -> Self {
        value.0
    }
}

impl From<Svg> for Fragment {
    fn from(value: Svg) -> Self {
        value.0
    }
}

impl IntoRenderItem for Href {
    fn into_render_item(self) -> Option<RenderItem> {
        self.0.into_render_item()
    }
}

impl IntoRenderItem for Svg {
    fn into_render_item(self) -> Option<RenderItem> {
        self.0.into_render_item()
    }
}
