//! Shared values that announce their changes

use std::borrow::Cow;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

type Subscriber<T> = Rc<dyn Fn(&str, &T)>;

/// Numeric types an [`Observable`] can step up and down
pub trait Step: Sized {
    fn step_up(self) -> Self;
    fn step_down(self) -> Self;
}

// Integers wrap at their bounds instead of overflowing.
macro_rules! step_int {
    ($($t:ty),*) => {$(
        impl Step for $t {
            fn step_up(self) -> Self {
                self.wrapping_add(1)
            }

            fn step_down(self) -> Self {
                self.wrapping_sub(1)
            }
        }
    )*};
}

macro_rules! step_float {
    ($($t:ty),*) => {$(
        impl Step for $t {
            fn step_up(self) -> Self {
                self + 1.0
            }

            fn step_down(self) -> Self {
                self - 1.0
            }
        }
    )*};
}

step_int!(i32, i64);
step_float!(f32, f64);

struct Shared<T> {
    key: Cow<'static, str>,
    value: RefCell<T>,
    subscribers: RefCell<Vec<Subscriber<T>>>,
}

/// A value cell shared by clones, notifying subscribers on real changes
///
/// Subscribers receive the observable's key and the new value. They run
/// after the value is stored and may read or set the observable again.
pub struct Observable<T> {
    shared: Rc<Shared<T>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
        }
    }
}

impl<T: Clone + PartialEq + 'static> Observable<T> {
    pub fn new(key: impl Into<Cow<'static, str>>, value: T) -> Self {
        Self {
            shared: Rc::new(Shared {
                key: key.into(),
                value: RefCell::new(value),
                subscribers: RefCell::new(Vec::new()),
            }),
        }
    }

    pub fn key(&self) -> &str {
        &self.shared.key
    }

    pub fn get(&self) -> T {
        self.shared.value.borrow().clone()
    }

    /// Store `value`. Returns `false`, notifying nobody, when it equals the
    /// current value.
    pub fn set(&self, value: T) -> bool {
        {
            let mut current = self.shared.value.borrow_mut();
            if *current == value {
                return false;
            }
            *current = value.clone();
        }

        let subscribers = self.shared.subscribers.borrow().clone();
        for subscriber in subscribers {
            subscriber(&self.shared.key, &value);
        }
        true
    }

    pub fn update(&self, f: impl FnOnce(&T) -> T) -> bool {
        let next = f(&self.shared.value.borrow());
        self.set(next)
    }

    pub fn subscribe(&self, subscriber: impl Fn(&str, &T) + 'static) {
        self.shared.subscribers.borrow_mut().push(Rc::new(subscriber));
    }
}

impl<T: Step + Clone + PartialEq + 'static> Observable<T> {
    pub fn increment(&self) -> T {
        self.update(|v| v.clone().step_up());
        self.get()
    }

    pub fn decrement(&self) -> T {
        self.update(|v| v.clone().step_down());
        self.get()
    }
}

impl<T: fmt::Display> fmt::Display for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.shared.value.borrow(), f)
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable")
            .field("key", &self.shared.key)
            .field("value", &self.shared.value.borrow())
            .finish()
    }
}
