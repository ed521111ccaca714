//! Named slots over descriptors, used by page composition

use indexmap::IndexMap;

use crate::fragment::Fragment;

/// Ordered map of slot name to descriptor
#[derive(Debug, Clone, Default)]
pub struct Layout {
    slots: IndexMap<String, Fragment>,
}

impl Layout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill or clear slots. `None` removes the slot.
    pub fn set_layout<I, K>(mut self, slots: I) -> Self
    where
        I: IntoIterator<Item = (K, Option<Fragment>)>,
        K: Into<String>,
    {
        for (name, fragment) in slots {
            self.set(name, fragment);
        }
        self
    }

    pub fn set(&mut self, name: impl Into<String>, fragment: Option<Fragment>) {
        let name = name.into();
        match fragment {
            Some(fragment) => {
                self.slots.insert(name, fragment);
            }
            None => {
                self.slots.shift_remove(&name);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Fragment> {
        self.slots.get(name)
    }

    /// Slot contents for rendering; empty slots render nothing
    pub fn slot(&self, name: &str) -> Option<Fragment> {
        self.slots.get(name).cloned()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.slots.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Overlay `other` onto this layout; its slots win
    pub fn merge(mut self, other: Layout) -> Self {
        self.slots.extend(other.slots);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fragment::{elements, Identity};

    #[test]
    fn slots_keep_declaration_order() {
        let layout = Layout::new().set_layout([
            ("header", Some(elements::section())),
            ("body", Some(elements::main())),
            ("footer", Some(elements::footer())),
        ]);
        assert_eq!(layout.names().collect::<Vec<_>>(), ["header", "body", "footer"]);
    }

    #[test]
    fn none_clears_and_later_values_replace() {
        let layout = Layout::new()
            .set_layout([("body", Some(elements::div()))])
            .set_layout([("body", Some(elements::main())), ("aside", None)]);

        assert_eq!(
            layout.get("body").map(Fragment::identity),
            Some(&Identity::Element("main".into()))
        );

        let layout = layout.set_layout([("body", None::<Fragment>)]);
        assert!(layout.is_empty());
        assert!(layout.slot("body").is_none());
    }

    #[test]
    fn merge_prefers_the_overlay() {
        let base = Layout::new().set_layout([
            ("header", Some(elements::div())),
            ("body", Some(elements::div())),
        ]);
        let overlay = Layout::new().set_layout([("body", Some(elements::section()))]);
        let merged = base.merge(overlay);

        assert_eq!(merged.len(), 2);
        assert_eq!(
            merged.get("body").map(Fragment::identity),
            Some(&Identity::Element("section".into()))
        );
    }
}
