//! Component lifecycle controller
//!
//! Sequences construction, initialization and parameter updates for one
//! component instance and tells the host when to re-render.
//!
//! ```text
//! Uninitialized ──first receive_parameters──► Initializing ──► Ready
//!                                                               │
//!                    later receive_parameters ──────────────────┘ (parameter phase only)
//! ```
//!
//! Notification contract of the parameter phase: one notification right
//! after the synchronous hook, and a second one only when the async hook
//! really suspended and then succeeded. Cancellation is silent.

pub mod hook;

#[cfg(test)]
mod tests;

use std::any::type_name;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tracing::{debug, warn};

pub use hook::{HookFuture, HookStatus};

use crate::error::{EmitError, HookError, LifecycleFault};
use crate::fragment::{EmitOptions, Fragment, DATA_PARAMETER};
use crate::render::{AttributeValue, RenderHost, RenderTreeBuilder};

/// A stateful UI unit driven by a [`LifecycleController`]
///
/// Async hooks return `'static` futures. State they need to touch after
/// the hook returns must be shared through `Rc` cells, never borrowed.
pub trait Component: 'static {
    /// Payload delivered through the `Data` parameter
    type Data: 'static;

    /// Runs once, when the controller is created
    fn construct(&mut self) {}

    fn set_data(&mut self, data: Self::Data);

    fn on_initialized(&mut self) {}

    fn on_initialized_async(&mut self) -> HookFuture {
        hook::completed()
    }

    fn on_parameters_set(&mut self) {}

    fn on_parameters_set_async(&mut self) -> HookFuture {
        hook::completed()
    }

    /// The component's descriptor tree. Requested once and reused for every
    /// later pass, so dynamic parts should be producers.
    fn view(&self) -> Fragment;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Uninitialized,
    Initializing,
    Ready,
}

/// Parameters delivered to a component by its parent
pub struct ParameterView<D> {
    data: Option<D>,
}

impl<D> ParameterView<D> {
    pub fn empty() -> Self {
        Self { data: None }
    }

    pub fn with_data(data: D) -> Self {
        Self { data: Some(data) }
    }

    pub fn data(&self) -> Option<&D> {
        self.data.as_ref()
    }

    pub fn into_data(self) -> Option<D> {
        self.data
    }
}

impl<D: Clone + 'static> ParameterView<D> {
    /// Read the `Data` parameter out of emitted attributes
    ///
    /// A `Data` attribute of another type is ignored.
    pub fn from_attributes<'a, I>(attributes: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a AttributeValue)>,
    {
        let data = attributes
            .into_iter()
            .filter(|(name, _)| *name == DATA_PARAMETER)
            .find_map(|(_, value)| match value {
                AttributeValue::Opaque(value) => value.downcast_ref::<D>().cloned(),
                _ => None,
            });
        Self { data }
    }

    /// Parameters a component descriptor passes to the component it opens
    pub fn from_fragment(fragment: &Fragment) -> Self {
        Self::from_attributes(fragment.data().map(|value| (DATA_PARAMETER, value)))
    }
}

impl<D> Default for ParameterView<D> {
    fn default() -> Self {
        Self::empty()
    }
}

/// Drives one component instance through its lifecycle
pub struct LifecycleController<C: Component> {
    component: Rc<RefCell<C>>,
    host: Rc<dyn RenderHost>,
    state: Cell<LifecycleState>,
    view: RefCell<Option<Fragment>>,
    options: EmitOptions,
}

impl<C: Component> LifecycleController<C> {
    /// Take ownership of `component` and run its construct hook
    pub fn new(mut component: C, host: Rc<dyn RenderHost>) -> Self {
        component.construct();
        debug!("Constructed {}", type_name::<C>());
        Self {
            component: Rc::new(RefCell::new(component)),
            host,
            state: Cell::new(LifecycleState::Uninitialized),
            view: RefCell::new(None),
            options: EmitOptions::default(),
        }
    }

    pub fn with_options(mut self, options: EmitOptions) -> Self {
        self.options = options;
        self
    }

    pub fn state(&self) -> LifecycleState {
        self.state.get()
    }

    pub fn component(&self) -> &Rc<RefCell<C>> {
        &self.component
    }

    /// Accept new parameters from the parent and run the due phases
    ///
    /// The first delivery initializes the component; later ones only run
    /// the parameter phase. Callers must not overlap deliveries for the
    /// same instance.
    pub async fn receive_parameters(
        &self,
        parameters: ParameterView<C::Data>,
    ) -> Result<(), LifecycleFault> {
        if let Some(data) = parameters.into_data() {
            self.component.borrow_mut().set_data(data);
        }

        if self.state.get() == LifecycleState::Uninitialized {
            self.state.set(LifecycleState::Initializing);
            debug!("{} initializing", type_name::<C>());
            let initialized = self.initialize().await;
            self.state.set(LifecycleState::Ready);
            initialized?;
            debug!("{} ready", type_name::<C>());
        }

        self.parameters_set().await
    }

    async fn initialize(&self) -> Result<(), LifecycleFault> {
        let pending = {
            let mut component = self.component.borrow_mut();
            component.on_initialized();
            component.on_initialized_async()
        };

        let status = HookStatus::start(pending).await;
        debug!("{} init hook {}", type_name::<C>(), status.label());
        let outcome = match status {
            HookStatus::Completed | HookStatus::Canceled => return Ok(()),
            HookStatus::Faulted(err) => {
                // Show what the synchronous part produced before failing
                self.notify();
                Err(HookError::Failed(err))
            }
            HookStatus::Suspended(rest) => {
                self.notify();
                rest.await
            }
        };

        match outcome {
            Ok(()) | Err(HookError::Canceled) => Ok(()),
            Err(HookError::Failed(source)) => {
                warn!("{} initialization failed: {:#}", type_name::<C>(), source);
                Err(LifecycleFault::Initialization {
                    component: type_name::<C>(),
                    source,
                })
            }
        }
    }

    async fn parameters_set(&self) -> Result<(), LifecycleFault> {
        let pending = {
            let mut component = self.component.borrow_mut();
            component.on_parameters_set();
            component.on_parameters_set_async()
        };

        let status = HookStatus::start(pending).await;
        self.notify();

        let outcome = match status {
            HookStatus::Completed | HookStatus::Canceled => return Ok(()),
            HookStatus::Faulted(err) => Err(HookError::Failed(err)),
            HookStatus::Suspended(rest) => rest.await,
        };

        match outcome {
            Ok(()) => {
                self.notify();
                Ok(())
            }
            Err(HookError::Canceled) => {
                debug!("{} parameter hook canceled", type_name::<C>());
                Ok(())
            }
            Err(HookError::Failed(source)) => {
                warn!("{} parameter update failed: {:#}", type_name::<C>(), source);
                Err(LifecycleFault::ParametersSet {
                    component: type_name::<C>(),
                    source,
                })
            }
        }
    }

    fn notify(&self) {
        self.host.state_has_changed();
    }

    /// Emit the component's view into the host's builder for this pass
    pub fn render(&self, builder: &mut dyn RenderTreeBuilder) -> Result<u32, EmitError> {
        let mut view = self.view.borrow_mut();
        let view = view.get_or_insert_with(|| self.component.borrow().view());
        view.emit_with_options(builder, &self.options)
    }

    /// Drop the cached view so the next pass asks the component again
    pub fn invalidate_view(&self) {
        self.view.borrow_mut().take();
    }
}
