// Demo pages mounted by the preview
//
// - counter: async initial load, a click handler, an observable count
// - profile: page composed from layout slots with nav links, an svg icon,
//   a captured element reference and a two-way bound input
//
// Both hook their observables to the render host, so a dispatched event
// queues a re-render the same way a real host would.

use std::rc::Rc;
use std::time::Duration;

use construct::elements::{self, PathValue, ViewBox};
use construct::events::{on_click, ChangeEventArgs, EventCallback, MouseEventArgs};
use construct::fragment::RenderItem;
use construct::lifecycle::hook::{self, HookFuture};
use construct::page::{With, NAV_SLOT};
use construct::render::{DynValue, ElementRef, RenderHost};
use construct::{Component, Fragment, Layout, Link, Links, Observable, Page, PageImplementation};

/// Re-render whenever `observable` changes
fn notify_on_change<T>(observable: &Observable<T>, host: &Rc<dyn RenderHost>)
where
    T: Clone + PartialEq + std::fmt::Debug + 'static,
{
    let host = host.clone();
    observable.subscribe(move |key, value| {
        tracing::debug!("{} changed to {:?}", key, value);
        host.state_has_changed();
    });
}

// ─────────────────────────────────────────────────────────────────────────────
// Counter
// ─────────────────────────────────────────────────────────────────────────────

/// Parameters of the counter page
#[derive(Debug, Clone, PartialEq)]
pub struct CounterData {
    pub title: String,
    pub start: i64,
}

impl Default for CounterData {
    fn default() -> Self {
        Self {
            title: "Counter".to_string(),
            start: 0,
        }
    }
}

pub struct Counter {
    host: Rc<dyn RenderHost>,
    title: String,
    start: i64,
    count: Observable<i64>,
    status: Observable<String>,
    init_delay: Duration,
}

impl Counter {
    pub fn new(host: Rc<dyn RenderHost>, init_delay: Duration) -> Self {
        Self {
            host,
            title: String::new(),
            start: 0,
            count: Observable::new("count", 0),
            status: Observable::new("status", "loading".to_string()),
            init_delay,
        }
    }
}

impl Component for Counter {
    type Data = CounterData;

    fn set_data(&mut self, data: CounterData) {
        self.title = data.title;
        self.start = data.start;
    }

    fn on_initialized(&mut self) {
        // Seed before subscribing; the lifecycle notifies for this phase
        self.count.set(self.start);
        notify_on_change(&self.count, &self.host);
    }

    fn on_initialized_async(&mut self) -> HookFuture {
        let status = self.status.clone();
        let delay = self.init_delay;
        hook::from_future(async move {
            tokio::time::sleep(delay).await;
            status.set("ready".to_string());
            Ok(())
        })
    }

    fn view(&self) -> Fragment {
        let count = self.count.clone();
        let status = self.status.clone();
        let clicks = self.count.clone();

        elements::div().add_classes(["counter"]).with_content([
            Fragment::element("h1").child(self.title.clone()),
            elements::span()
                .add_classes(["status"])
                .child(RenderItem::dynamic(move || Some(DynValue::new(status.get())))),
            elements::span()
                .set_id("count")
                .child(RenderItem::dynamic(move || Some(DynValue::new(count.get())))),
            elements::button()
                .add_event_listener([on_click()
                    .add_typed(move |_: &MouseEventArgs| {
                        clicks.increment();
                    })
                    .prevent_default()])
                .child("+1"),
        ])
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Profile
// ─────────────────────────────────────────────────────────────────────────────

const USER_ICON: &str = "M12 12a4 4 0 1 0 0-8 4 4 0 0 0 0 8zm-7 8a7 7 0 0 1 14 0";

fn footer_slot(mut layout: Layout) -> Layout {
    layout.set(
        "footer",
        Some(
            elements::footer().child(
                elements::href()
                    .set_href("/privacy")
                    .into_fragment()
                    .child("Privacy"),
            ),
        ),
    );
    layout
}

/// Links rendered into the page's nav slot
pub fn profile_links() -> Links {
    Links(vec![
        Link::new("Home", "/"),
        Link::new("Profile", "/profile"),
        Link::new("Settings", "/settings"),
    ])
}

pub struct ProfileCard {
    name: String,
    followers: Observable<i64>,
    bio: Observable<String>,
    avatar: ElementRef,
}

impl ProfileCard {
    pub fn new(host: &Rc<dyn RenderHost>, name: impl Into<String>) -> Self {
        let followers = Observable::new("followers", 0);
        let bio = Observable::new("bio", String::new());
        notify_on_change(&followers, host);
        notify_on_change(&bio, host);

        Self {
            name: name.into(),
            followers,
            bio,
            avatar: ElementRef::new(),
        }
    }

    fn header(&self) -> Fragment {
        let icon = elements::svg()
            .with_viewbox(ViewBox {
                x: 0,
                y: 0,
                w: 24.0,
                h: 24.0,
            })
            .with_fill(None)
            .with_stroke(None)
            .with_stroke_width(Some(1.5))
            .with_stroke_line_join(None)
            .with_stroke_line_cap(None)
            .with_path(PathValue::d(USER_ICON));

        elements::section()
            .add_classes(["header"])
            .with_content([
                elements::img()
                    .add_attribute("src", "/avatar.png")
                    .set_ref(&self.avatar),
                icon.into_fragment(),
                elements::span().child(self.name.clone()),
            ])
    }

    fn body(&self) -> Fragment {
        let followers = self.followers.clone();
        let shown = self.followers.clone();
        let bio = self.bio.clone();
        let edited = self.bio.clone();

        elements::section().add_classes(["body"]).with_content([
            elements::span()
                .add_classes(["followers"])
                .child(RenderItem::dynamic(move || Some(DynValue::new(shown.get())))),
            elements::button()
                .add_event_listener([on_click().add_typed(move |_: &MouseEventArgs| {
                    followers.increment();
                })])
                .child("Follow"),
            elements::input().add_bound_attribute(
                "onchange",
                EventCallback::typed("onchange", move |e: &ChangeEventArgs| {
                    edited.set(e.value.clone().unwrap_or_default());
                }),
            ),
            elements::span()
                .add_classes(["bio"])
                .child(RenderItem::dynamic(move || Some(DynValue::new(bio.get())))),
        ])
    }
}

impl PageImplementation for ProfileCard {
    fn page_layout(&self) -> Layout {
        let mut layout = Layout::new().with(footer_slot);
        layout.set("header", Some(self.header()));
        layout.set("body", Some(self.body()));
        layout
    }

    fn render(&self, layout: &Layout) -> Fragment {
        elements::main()
            .add_attribute("b-profile", "")
            .add_classes(["profile"])
            .with_content([
                layout.slot(NAV_SLOT),
                layout.slot("header"),
                layout.slot("body"),
                layout.slot("footer"),
            ])
    }
}

/// Profile page ready to mount
pub fn profile_page(host: &Rc<dyn RenderHost>) -> Page {
    Page::default().with_implementation(ProfileCard::new(host, "Ada"))
}
