//! Event payloads delivered by the host renderer
//!
//! Handlers receive payloads type-erased (`&dyn Any`); typed handlers
//! downcast to one of these at invocation time.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MouseEventArgs {
    pub client_x: f64,
    pub client_y: f64,
    pub button: i64,
    pub detail: i64,
    pub ctrl_key: bool,
    pub shift_key: bool,
    pub alt_key: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeyboardEventArgs {
    pub key: String,
    pub code: String,
    pub repeat: bool,
    pub ctrl_key: bool,
    pub shift_key: bool,
    pub alt_key: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FocusEventArgs {
    /// DOM event type (`focus`, `blur`, `focusin`, `focusout`)
    #[serde(rename = "type")]
    pub kind: String,
}

/// Value change from `oninput` / `onchange` and two-way bound attributes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChangeEventArgs {
    pub value: Option<String>,
}

impl ChangeEventArgs {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
        }
    }
}
