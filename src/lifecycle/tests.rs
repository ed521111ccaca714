//! Lifecycle controller tests
//!
//! A recording component logs every hook it runs and, for async hooks, how
//! many host notifications had happened by the time the hook resolved.

use super::*;
use crate::render::RecordingBuilder;
use std::cell::Cell;

type Log = Rc<RefCell<Vec<String>>>;

#[derive(Default)]
struct CountingHost {
    count: Cell<u32>,
}

impl CountingHost {
    fn count(&self) -> u32 {
        self.count.get()
    }
}

impl RenderHost for CountingHost {
    fn state_has_changed(&self) {
        self.count.set(self.count.get() + 1);
    }
}

#[derive(Clone, Copy)]
enum Outcome {
    Ready,
    Yield,
    Cancel,
    YieldThenCancel,
    Fail,
    YieldThenFail,
}

struct Recorder {
    log: Log,
    host: Rc<CountingHost>,
    init: Outcome,
    params: Outcome,
    data: Option<String>,
    views: Rc<Cell<u32>>,
}

impl Recorder {
    fn record(&self, entry: impl Into<String>) {
        self.log.borrow_mut().push(entry.into());
    }

    fn hook(&self, label: &'static str, outcome: Outcome) -> HookFuture {
        let log = self.log.clone();
        let host = self.host.clone();
        Box::pin(async move {
            if matches!(
                outcome,
                Outcome::Yield | Outcome::YieldThenCancel | Outcome::YieldThenFail
            ) {
                tokio::task::yield_now().await;
            }
            log.borrow_mut()
                .push(format!("{label} resolved after {}", host.count()));
            match outcome {
                Outcome::Ready | Outcome::Yield => Ok(()),
                Outcome::Cancel | Outcome::YieldThenCancel => Err(HookError::Canceled),
                Outcome::Fail | Outcome::YieldThenFail => {
                    Err(anyhow::anyhow!("{label} blew up").into())
                }
            }
        })
    }
}

impl Component for Recorder {
    type Data = String;

    fn construct(&mut self) {
        self.record("construct");
    }

    fn set_data(&mut self, data: String) {
        self.record(format!("data {data}"));
        self.data = Some(data);
    }

    fn on_initialized(&mut self) {
        self.record("init");
    }

    fn on_initialized_async(&mut self) -> HookFuture {
        self.hook("init_async", self.init)
    }

    fn on_parameters_set(&mut self) {
        self.record("params");
    }

    fn on_parameters_set_async(&mut self) -> HookFuture {
        self.hook("params_async", self.params)
    }

    fn view(&self) -> Fragment {
        self.views.set(self.views.get() + 1);
        Fragment::element("p").child(self.data.clone())
    }
}

struct Harness {
    log: Log,
    host: Rc<CountingHost>,
    views: Rc<Cell<u32>>,
    controller: LifecycleController<Recorder>,
}

fn harness(init: Outcome, params: Outcome) -> Harness {
    let log = Log::default();
    let host = Rc::new(CountingHost::default());
    let views = Rc::new(Cell::new(0));
    let recorder = Recorder {
        log: log.clone(),
        host: host.clone(),
        init,
        params,
        data: None,
        views: views.clone(),
    };
    Harness {
        controller: LifecycleController::new(recorder, host.clone()),
        log,
        host,
        views,
    }
}

impl Harness {
    fn entries(&self) -> Vec<String> {
        self.log.borrow().clone()
    }
}

#[tokio::test]
async fn first_delivery_initializes_exactly_once() {
    let h = harness(Outcome::Ready, Outcome::Ready);
    assert_eq!(h.controller.state(), LifecycleState::Uninitialized);

    h.controller.receive_parameters(ParameterView::empty()).await.unwrap();
    assert_eq!(h.controller.state(), LifecycleState::Ready);
    assert_eq!(
        h.entries(),
        vec![
            "construct",
            "init",
            "init_async resolved after 0",
            "params",
            "params_async resolved after 0",
        ]
    );
    assert_eq!(h.host.count(), 1);

    h.controller.receive_parameters(ParameterView::empty()).await.unwrap();
    assert_eq!(h.entries().iter().filter(|e| e.starts_with("init")).count(), 2);
    assert_eq!(h.entries().len(), 7);
    assert_eq!(h.host.count(), 2);
}

#[tokio::test]
async fn suspending_init_notifies_before_it_resolves() {
    let h = harness(Outcome::Yield, Outcome::Ready);
    h.controller.receive_parameters(ParameterView::empty()).await.unwrap();

    assert!(h.entries().contains(&"init_async resolved after 1".to_string()));
    assert_eq!(h.host.count(), 2);
}

#[tokio::test]
async fn suspending_parameter_hook_notifies_twice() {
    let h = harness(Outcome::Ready, Outcome::Yield);
    h.controller.receive_parameters(ParameterView::empty()).await.unwrap();

    assert!(h.entries().contains(&"params_async resolved after 1".to_string()));
    assert_eq!(h.host.count(), 2);

    h.controller.receive_parameters(ParameterView::empty()).await.unwrap();
    assert_eq!(h.host.count(), 4);
}

#[tokio::test]
async fn both_hooks_suspending_notifies_three_times() {
    let h = harness(Outcome::Yield, Outcome::Yield);
    h.controller.receive_parameters(ParameterView::empty()).await.unwrap();

    // Suspended init, synchronous parameter slice, settled parameter hook
    assert!(h.entries().contains(&"init_async resolved after 1".to_string()));
    assert!(h.entries().contains(&"params_async resolved after 2".to_string()));
    assert_eq!(h.host.count(), 3);
    assert_eq!(h.controller.state(), LifecycleState::Ready);
}

#[tokio::test]
async fn cancellation_is_silent() {
    let h = harness(Outcome::YieldThenCancel, Outcome::YieldThenCancel);
    h.controller.receive_parameters(ParameterView::empty()).await.unwrap();

    // One for the suspended init, one for the synchronous parameter slice
    assert_eq!(h.host.count(), 2);
    assert_eq!(h.controller.state(), LifecycleState::Ready);

    let h = harness(Outcome::Cancel, Outcome::Cancel);
    h.controller.receive_parameters(ParameterView::empty()).await.unwrap();
    assert_eq!(h.host.count(), 1);
}

#[tokio::test]
async fn init_failure_surfaces_after_notifying() {
    let h = harness(Outcome::Fail, Outcome::Ready);
    let err = h
        .controller
        .receive_parameters(ParameterView::empty())
        .await
        .unwrap_err();

    assert!(matches!(err, LifecycleFault::Initialization { .. }));
    assert!(err.to_string().contains("init_async blew up"));
    assert_eq!(h.host.count(), 1);
    assert!(!h.entries().contains(&"params".to_string()));
    // Initialization is never retried
    assert_eq!(h.controller.state(), LifecycleState::Ready);
}

#[tokio::test]
async fn suspended_init_failure_surfaces() {
    let h = harness(Outcome::YieldThenFail, Outcome::Ready);
    let result = h.controller.receive_parameters(ParameterView::empty()).await;

    assert!(matches!(result, Err(LifecycleFault::Initialization { .. })));
    assert_eq!(h.host.count(), 1);
}

#[tokio::test]
async fn parameter_failure_skips_second_notification() {
    let h = harness(Outcome::Ready, Outcome::YieldThenFail);
    let result = h.controller.receive_parameters(ParameterView::empty()).await;
    assert!(matches!(result, Err(LifecycleFault::ParametersSet { .. })));
    assert_eq!(h.host.count(), 1);

    let h = harness(Outcome::Ready, Outcome::Fail);
    let result = h.controller.receive_parameters(ParameterView::empty()).await;
    assert!(matches!(result, Err(LifecycleFault::ParametersSet { .. })));
    assert_eq!(h.host.count(), 1);
}

#[tokio::test]
async fn data_is_applied_before_hooks_run() {
    let h = harness(Outcome::Ready, Outcome::Ready);
    let parent = Fragment::component_with::<Recorder>("hello".to_string());

    h.controller
        .receive_parameters(ParameterView::from_fragment(&parent))
        .await
        .unwrap();
    assert_eq!(h.entries()[1], "data hello");
    assert_eq!(h.entries()[2], "init");
}

#[test]
fn mismatched_data_attribute_is_ignored() {
    let value = AttributeValue::Opaque(crate::render::DynValue::new(42u8));
    let view = ParameterView::<String>::from_attributes([(DATA_PARAMETER, &value)]);
    assert!(view.data().is_none());

    let text = AttributeValue::Text("x".into());
    let view = ParameterView::<String>::from_attributes([("Other", &text)]);
    assert!(view.into_data().is_none());
}

#[tokio::test]
async fn view_is_requested_once_and_reused() {
    let h = harness(Outcome::Ready, Outcome::Ready);
    h.controller
        .receive_parameters(ParameterView::with_data("a".to_string()))
        .await
        .unwrap();

    let mut first = RecordingBuilder::new();
    let mut second = RecordingBuilder::new();
    assert_eq!(h.controller.render(&mut first).unwrap(), 3);
    h.controller.render(&mut second).unwrap();
    assert_eq!(first.into_frames(), second.into_frames());
    assert_eq!(h.views.get(), 1);

    h.controller.invalidate_view();
    h.controller.render(&mut RecordingBuilder::new()).unwrap();
    assert_eq!(h.views.get(), 2);
}

#[tokio::test]
async fn cancellable_hook_with_fired_token() {
    use tokio_util::sync::CancellationToken;

    struct Loader {
        token: CancellationToken,
    }

    impl Component for Loader {
        type Data = ();

        fn set_data(&mut self, _: ()) {}

        fn on_initialized_async(&mut self) -> HookFuture {
            hook::cancellable(self.token.clone(), futures::future::pending())
        }

        fn view(&self) -> Fragment {
            Fragment::region()
        }
    }

    let token = CancellationToken::new();
    token.cancel();
    let host = Rc::new(CountingHost::default());
    let controller = LifecycleController::new(Loader { token }, host.clone());

    controller.receive_parameters(ParameterView::empty()).await.unwrap();
    assert_eq!(host.count(), 1);
}
