//! Synchronous observable values.
//!
//! A [`Mutable`] holds a current value plus a set of listeners that are called
//! on the same thread, in subscription order, every time the value is written.
//! [`Signal`] is the read-only half handed to consumers, and [`Combined`] folds
//! several signals into one derived value that is republished only when it
//! actually changes.
//!
//! Everything here is `Rc`-based and meant to live on one event-loop thread.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::{Rc, Weak};

type Listener<T> = Rc<dyn Fn(&T)>;

struct Inner<T> {
    value: T,
    listeners: BTreeMap<u64, Listener<T>>,
    next_id: u64,
    // Bumped on every write so an outer notification pass can tell that a
    // listener already wrote (and delivered) a newer value.
    version: u64,
}

type Shared<T> = Rc<RefCell<Inner<T>>>;

fn register<T: Clone + 'static>(inner: &Shared<T>, listener: Listener<T>, emit_current: bool) -> Subscription {
    let (id, current) = {
        let mut state = inner.borrow_mut();
        let id = state.next_id;
        state.next_id += 1;
        state.listeners.insert(id, listener.clone());
        (id, emit_current.then(|| state.value.clone()))
    };

    if let Some(value) = current {
        listener(&value);
    }

    let weak: Weak<RefCell<Inner<T>>> = Rc::downgrade(inner);
    Subscription::new(move || {
        if let Some(inner) = weak.upgrade() {
            inner.borrow_mut().listeners.remove(&id);
        }
    })
}

fn notify<T: Clone + 'static>(inner: &Shared<T>) {
    let (value, version, listeners) = {
        let state = inner.borrow();
        let listeners: Vec<(u64, Listener<T>)> = state
            .listeners
            .iter()
            .map(|(id, listener)| (*id, listener.clone()))
            .collect();
        (state.value.clone(), state.version, listeners)
    };

    for (id, listener) in listeners {
        {
            let state = inner.borrow();
            if state.version != version {
                // A listener wrote again; that write has already reached everyone.
                return;
            }
            if !state.listeners.contains_key(&id) {
                continue;
            }
        }
        listener(&value);
    }
}

/// An owned, writable observable value.
///
/// Cloning a `Mutable` produces another handle to the same value.
pub struct Mutable<T> {
    inner: Shared<T>,
}

impl<T> Clone for Mutable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: Clone + 'static> Mutable<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                value,
                listeners: BTreeMap::new(),
                next_id: 0,
                version: 0,
            })),
        }
    }

    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Writes `value` and notifies every listener, even if it is unchanged.
    pub fn set(&self, value: T) {
        {
            let mut state = self.inner.borrow_mut();
            state.value = value;
            state.version += 1;
        }
        notify(&self.inner);
    }

    /// Read-only view of this value.
    pub fn signal(&self) -> Signal<T> {
        Signal {
            inner: self.inner.clone(),
        }
    }

    /// Calls `f` with the current value right away and then after every write.
    pub fn subscribe(&self, f: impl Fn(&T) + 'static) -> Subscription {
        register(&self.inner, Rc::new(f), true)
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }
}

impl<T: Clone + PartialEq + 'static> Mutable<T> {
    /// Writes `value` only if it differs from the current one.
    ///
    /// Returns whether a write (and therefore a notification) happened.
    pub fn set_neq(&self, value: T) -> bool {
        {
            let mut state = self.inner.borrow_mut();
            if state.value == value {
                return false;
            }
            state.value = value;
            state.version += 1;
        }
        notify(&self.inner);
        true
    }
}

impl<T: fmt::Debug> fmt::Debug for Mutable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.try_borrow() {
            Ok(state) => f.debug_tuple("Mutable").field(&state.value).finish(),
            Err(_) => f.write_str("Mutable(<borrowed>)"),
        }
    }
}

/// Read-only handle to a [`Mutable`] or to a derived value.
pub struct Signal<T> {
    inner: Shared<T>,
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: Clone + 'static> Signal<T> {
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Calls `f` with the current value right away and then after every change.
    pub fn subscribe(&self, f: impl Fn(&T) + 'static) -> Subscription {
        register(&self.inner, Rc::new(f), true)
    }

    /// Like [`Signal::subscribe`] but skips the initial call.
    pub fn subscribe_changes(&self, f: impl Fn(&T) + 'static) -> Subscription {
        register(&self.inner, Rc::new(f), false)
    }

    pub fn downgrade(&self) -> WeakSignal<T> {
        WeakSignal {
            inner: Rc::downgrade(&self.inner),
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }
}

impl<T: fmt::Debug> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.try_borrow() {
            Ok(state) => f.debug_tuple("Signal").field(&state.value).finish(),
            Err(_) => f.write_str("Signal(<borrowed>)"),
        }
    }
}

/// Non-owning [`Signal`] reference, used by listeners that must not keep their
/// own source alive.
pub struct WeakSignal<T> {
    inner: Weak<RefCell<Inner<T>>>,
}

impl<T> Clone for WeakSignal<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> WeakSignal<T> {
    pub fn upgrade(&self) -> Option<Signal<T>> {
        self.inner.upgrade().map(|inner| Signal { inner })
    }
}

/// Handle returned by every `subscribe` call.
///
/// The listener is removed when the handle is dropped or [`unsubscribe`d].
///
/// [`unsubscribe`d]: Subscription::unsubscribe
#[must_use = "dropping a Subscription immediately removes its listener"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    pub fn unsubscribe(mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }

    /// Keeps the listener registered for as long as its source lives.
    pub fn detach(mut self) {
        self.release = None;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}

/// A group of subscriptions released together, e.g. everything a rendered
/// row is bound to.
#[derive(Debug, Default)]
pub struct SubscriptionBag {
    subscriptions: Vec<Subscription>,
}

impl SubscriptionBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, subscription: Subscription) {
        self.subscriptions.push(subscription);
    }

    /// Drops every held subscription.
    pub fn reset(&mut self) {
        self.subscriptions.clear();
    }

    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }
}

impl Extend<Subscription> for SubscriptionBag {
    fn extend<I: IntoIterator<Item = Subscription>>(&mut self, iter: I) {
        self.subscriptions.extend(iter);
    }
}

/// A value derived from several source signals of the same type.
///
/// `combine` sees the current values of all sources, in source order, and is
/// re-run synchronously after any source changes. The result is published
/// through [`Combined::signal`] only when it differs from the previous one.
pub struct Combined<U> {
    output: Mutable<U>,
    _sources: SubscriptionBag,
}

impl<U: Clone + PartialEq + 'static> Combined<U> {
    pub fn new<T, F>(sources: &[Signal<T>], combine: F) -> Self
    where
        T: Clone + 'static,
        F: Fn(&[T]) -> U + 'static,
    {
        let current: Vec<T> = sources.iter().map(Signal::get).collect();
        let output = Mutable::new(combine(&current));

        let weak_sources: Rc<Vec<WeakSignal<T>>> =
            Rc::new(sources.iter().map(Signal::downgrade).collect());
        let combine = Rc::new(combine);

        let mut bag = SubscriptionBag::new();
        for source in sources {
            let weak_sources = weak_sources.clone();
            let combine = combine.clone();
            let output = output.clone();
            bag.add(source.subscribe_changes(move |_| {
                let values: Option<Vec<T>> = weak_sources
                    .iter()
                    .map(|source| source.upgrade().map(|source| source.get()))
                    .collect();
                if let Some(values) = values {
                    output.set_neq(combine(&values));
                }
            }));
        }

        Self {
            output,
            _sources: bag,
        }
    }

    pub fn get(&self) -> U {
        self.output.get()
    }

    pub fn signal(&self) -> Signal<U> {
        self.output.signal()
    }
}

impl<U: fmt::Debug> fmt::Debug for Combined<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Combined").field(&self.output).finish()
    }
}
