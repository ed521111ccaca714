//! Event binding registry
//!
//! Bindings are created from the catalog below (or [`EventBinding::create`]
//! for custom events), configured with handlers and guards, then attached to
//! a descriptor through `Fragment::add_event_listener`.
//!
//! ```ignore
//! let button = div().add_event_listener([on_click()
//!     .add_typed(|e: &MouseEventArgs| tracing::info!(x = e.client_x, "clicked"))
//!     .prevent_default()]);
//! ```

mod args;
mod binding;
mod registry;

pub use args::{ChangeEventArgs, FocusEventArgs, KeyboardEventArgs, MouseEventArgs};
pub use binding::{BindingKey, EventBinding, EventCallback, EventHandler, Guard, PayloadType};
pub use registry::EventRegistry;

pub fn on_mouse_down() -> EventBinding {
    EventBinding::create::<MouseEventArgs>("onmousedown")
}

pub fn on_mouse_up() -> EventBinding {
    EventBinding::create::<MouseEventArgs>("onmouseup")
}

pub fn on_click() -> EventBinding {
    EventBinding::create::<MouseEventArgs>("onclick")
}

pub fn on_key_down() -> EventBinding {
    EventBinding::create::<KeyboardEventArgs>("onkeydown")
}

pub fn on_key_up() -> EventBinding {
    EventBinding::create::<KeyboardEventArgs>("onkeyup")
}

pub fn on_blur() -> EventBinding {
    EventBinding::create::<FocusEventArgs>("onblur")
}

pub fn on_focus() -> EventBinding {
    EventBinding::create::<FocusEventArgs>("onfocus")
}

pub fn on_focus_in() -> EventBinding {
    EventBinding::create::<FocusEventArgs>("onfocusin")
}

pub fn on_focus_out() -> EventBinding {
    EventBinding::create::<FocusEventArgs>("onfocusout")
}

pub fn on_change() -> EventBinding {
    EventBinding::create::<ChangeEventArgs>("onchange")
}

pub fn on_input() -> EventBinding {
    EventBinding::create::<ChangeEventArgs>("oninput")
}
