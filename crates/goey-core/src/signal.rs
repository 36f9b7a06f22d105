use std::cell::RefCell;
use std::rc::Rc;

pub type SubId = usize;

/// Observable value. Subscribers run synchronously on every write; a
/// subscription must be removed with `unsubscribe` before the listening side
/// is torn down.
pub struct Signal<T: 'static>(Rc<RefCell<Inner<T>>>);

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

struct Inner<T> {
    value: T,
    next_sub: SubId,
    subs: Vec<(SubId, Rc<dyn Fn(&T)>)>,
}

impl<T> Signal<T> {
    pub fn new(value: T) -> Self {
        Self(Rc::new(RefCell::new(Inner {
            value,
            next_sub: 0,
            subs: Vec::new(),
        })))
    }

    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.0.borrow().value.clone()
    }

    pub fn set(&self, v: T) {
        let subs = {
            let mut inner = self.0.borrow_mut();
            inner.value = v;
            inner.subs.clone()
        };
        let inner = self.0.borrow();
        for (_, s) in &subs {
            s(&inner.value);
        }
    }

    pub fn update<F: FnOnce(&mut T)>(&self, f: F) {
        let subs = {
            let mut inner = self.0.borrow_mut();
            f(&mut inner.value);
            inner.subs.clone()
        };
        let inner = self.0.borrow();
        for (_, s) in &subs {
            s(&inner.value);
        }
    }

    pub fn subscribe(&self, f: impl Fn(&T) + 'static) -> SubId {
        let mut inner = self.0.borrow_mut();
        let id = inner.next_sub;
        inner.next_sub += 1;
        inner.subs.push((id, Rc::new(f)));
        id
    }

    pub fn unsubscribe(&self, id: SubId) {
        self.0.borrow_mut().subs.retain(|(sid, _)| *sid != id);
    }
}

pub fn signal<T>(t: T) -> Signal<T> {
    Signal::new(t)
}

/// Live reduced-motion preference. The platform layer flips it when the OS
/// setting changes; the engine subscribes per toast instance.
#[derive(Clone)]
pub struct MotionPreference {
    reduced: Signal<bool>,
}

impl MotionPreference {
    pub fn new(reduced: bool) -> Self {
        Self {
            reduced: signal(reduced),
        }
    }

    pub fn reduced(&self) -> bool {
        self.reduced.get()
    }

    pub fn set_reduced(&self, reduced: bool) {
        self.reduced.set(reduced);
    }

    pub fn subscribe(&self, f: impl Fn(bool) + 'static) -> SubId {
        self.reduced.subscribe(move |v| f(*v))
    }

    pub fn unsubscribe(&self, id: SubId) {
        self.reduced.unsubscribe(id);
    }
}

impl Default for MotionPreference {
    fn default() -> Self {
        Self::new(false)
    }
}
