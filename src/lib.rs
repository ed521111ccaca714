// construct - declarative render fragments and component lifecycle
//
// Callers describe UI as descriptor trees instead of imperative tree
// mutation; a lifecycle controller sequences component hooks against a
// host incremental renderer.
//
// Architecture:
// - events: named callback chains with lazy guards, one registry per descriptor
// - fragment: descriptor builder and its linearization into host instructions
// - lifecycle: construct / initialize / parameters-set state machine
// - layout, page: named slots and page composition over descriptors
// - render: the host boundary (instruction sink, re-render entry point)

pub mod error;
pub mod events;
pub mod fragment;
pub mod layout;
pub mod lifecycle;
pub mod observable;
pub mod page;
pub mod render;

pub use error::{ContentError, EmitError, EventError, HookError, LifecycleFault};
pub use fragment::{elements, EmitOptions, Fragment, Identity, IntoRenderItem, Markup, RenderItem};
pub use layout::Layout;
pub use lifecycle::{Component, LifecycleController, LifecycleState, ParameterView};
pub use observable::Observable;
pub use page::{Link, Links, Page, PageImplementation};
pub use render::{RenderHost, RenderTreeBuilder};
