//! Observable layout inputs.
//!
//! A [`Property`] carries a value and a list of public listeners. The component
//! tree commits a change in a fixed order: store the value silently, run its own
//! re-layout pass (the internal channel), then call [`Property::notify`] so user
//! listeners see the already laid-out state.

use std::fmt;

/// Callback receiving `(old, new)`.
pub type Listener<T> = Box<dyn FnMut(&T, &T)>;

/// Handle returned by `add_listener`, used to remove the listener again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Ordered list of public listeners.
pub struct Observers<T> {
    next_id: u64,
    listeners: Vec<(ListenerId, Listener<T>)>,
}

impl<T> Default for Observers<T> {
    fn default() -> Self {
        Self { next_id: 0, listeners: Vec::new() }
    }
}

impl<T> Observers<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, listener: impl FnMut(&T, &T) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    pub fn clear(&mut self) {
        self.listeners.clear();
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Call every listener in registration order.
    pub fn notify(&mut self, old: &T, new: &T) {
        for (_, listener) in &mut self.listeners {
            listener(old, new);
        }
    }
}

impl<T> fmt::Debug for Observers<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers").field("listeners", &self.listeners.len()).finish()
    }
}

/// A value with public change listeners.
#[derive(Debug)]
pub struct Property<T> {
    value: T,
    observers: Observers<T>,
}

impl<T: Clone + PartialEq> Property<T> {
    pub fn new(value: T) -> Self {
        Self { value, observers: Observers::new() }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    /// Replace the value without notifying anyone. Returns the old value.
    pub fn set_silent(&mut self, value: T) -> T {
        std::mem::replace(&mut self.value, value)
    }

    /// Replace the value and notify listeners if it changed.
    ///
    /// Used for inputs that have no layout consequence; layout inputs go
    /// through the scene so the re-layout runs before listeners.
    pub fn set(&mut self, value: T) -> bool {
        if self.value == value {
            return false;
        }
        let old = self.set_silent(value);
        self.notify(&old);
        true
    }

    /// Notify listeners that the value changed from `old` to the current value.
    pub fn notify(&mut self, old: &T) {
        let new = self.value.clone();
        self.observers.notify(old, &new);
    }

    pub fn add_listener(&mut self, listener: impl FnMut(&T, &T) + 'static) -> ListenerId {
        self.observers.add(listener)
    }

    /// Register a listener and immediately call it with `(value, value)`.
    pub fn add_listener_and_invoke(&mut self, mut listener: impl FnMut(&T, &T) + 'static) -> ListenerId {
        listener(&self.value, &self.value);
        self.observers.add(listener)
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.observers.remove(id)
    }

    pub fn clear_listeners(&mut self) {
        self.observers.clear();
    }

    pub fn observers_mut(&mut self) -> &mut Observers<T> {
        &mut self.observers
    }
}

impl<T: Clone + PartialEq + Default> Default for Property<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_set_notifies_on_change_only() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut property = Property::new(1.0);
        let sink = seen.clone();
        property.add_listener(move |old, new| sink.borrow_mut().push((*old, *new)));

        assert!(property.set(2.0));
        assert!(!property.set(2.0));
        assert_eq!(*seen.borrow(), vec![(1.0, 2.0)]);
    }

    #[test]
    fn test_silent_set_then_notify() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut property = Property::new(String::from("a"));
        let sink = seen.clone();
        property.add_listener(move |old: &String, new: &String| sink.borrow_mut().push(format!("{old}->{new}")));

        let old = property.set_silent("b".to_string());
        assert!(seen.borrow().is_empty());
        property.notify(&old);
        assert_eq!(*seen.borrow(), vec!["a->b".to_string()]);
    }

    #[test]
    fn test_remove_listener() {
        let count = Rc::new(RefCell::new(0));
        let mut property = Property::new(0);
        let sink = count.clone();
        let id = property.add_listener_and_invoke(move |_, _| *sink.borrow_mut() += 1);
        assert_eq!(*count.borrow(), 1);

        assert!(property.remove_listener(id));
        assert!(!property.remove_listener(id));
        property.set(5);
        assert_eq!(*count.borrow(), 1);
    }
}
