//! Host stack coupling: height re-publication after settles, and the shared
//! per-container mutation watcher.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use bitflags::bitflags;
use goey_core::{Dispose, Runtime};

use crate::types::ToastId;

bitflags! {
    /// What kind of host-driven mutation was observed.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct MutationKind: u8 {
        const ATTRIBUTES = 1 << 0;
        const CHILD_LIST = 1 << 1;
        const SUBTREE = 1 << 2;
    }
}

/// The stacking container this engine lives inside. It owns insertion,
/// removal, and stacking order; the engine only feeds it height hints.
pub trait HostStack {
    fn toast_ids(&self) -> Vec<ToastId>;
    /// Current rendered content height of one toast, `None` if unmounted.
    fn content_height(&self, id: &ToastId) -> Option<f32>;
    /// Publish the height hint the stack uses for offset math.
    fn publish_initial_height(&self, id: &ToastId, px: f32);
    fn remove(&self, id: &ToastId);
}

/// Re-publish every sibling's height hint. Called after any animation that
/// changed a toast's rendered footprint settles, so stacking offsets stay
/// correct.
pub fn sync_stack_heights(host: &dyn HostStack) {
    for id in host.toast_ids() {
        if let Some(h) = host.content_height(&id) {
            host.publish_initial_height(&id, h);
        }
    }
}

/// Opaque key identifying one host container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ContainerKey(pub u64);

#[derive(Clone, Copy, PartialEq, Eq)]
enum WatchState {
    Idle,
    /// A burst is being coalesced into one delivery next frame.
    Coalescing,
    /// Delivery just happened; ignore echoes for one frame.
    Cooldown,
}

struct Watcher {
    refcount: Cell<usize>,
    next_sub: Cell<usize>,
    subscribers: RefCell<Vec<(usize, Rc<dyn Fn(MutationKind)>)>>,
    pending: Cell<MutationKind>,
    state: Cell<WatchState>,
}

impl Watcher {
    fn new() -> Rc<Self> {
        Rc::new(Self {
            refcount: Cell::new(0),
            next_sub: Cell::new(0),
            subscribers: RefCell::new(Vec::new()),
            pending: Cell::new(MutationKind::empty()),
            state: Cell::new(WatchState::Idle),
        })
    }
}

/// Reference-counted registry of per-container mutation watchers.
///
/// All toasts in one container share a single watcher; it is created on
/// first registration and torn down when the last one unregisters. Bursts of
/// notifications are coalesced for one frame before delivery, and a
/// one-frame cooldown follows each delivery so the subscribers' own layout
/// writes do not echo back as a fresh burst.
pub struct ObserverRegistry {
    runtime: Runtime,
    watchers: RefCell<HashMap<ContainerKey, Rc<Watcher>>>,
}

impl ObserverRegistry {
    pub fn new(runtime: Runtime) -> Rc<Self> {
        Rc::new(Self {
            runtime,
            watchers: RefCell::new(HashMap::new()),
        })
    }

    /// Subscribe one toast to its container's watcher. The returned disposer
    /// detaches the subscription and drops the watcher at refcount zero.
    pub fn register(
        self: &Rc<Self>,
        container: ContainerKey,
        callback: impl Fn(MutationKind) + 'static,
    ) -> Dispose {
        let watcher = self
            .watchers
            .borrow_mut()
            .entry(container)
            .or_insert_with(Watcher::new)
            .clone();

        watcher.refcount.set(watcher.refcount.get() + 1);
        let sub_id = watcher.next_sub.get();
        watcher.next_sub.set(sub_id + 1);
        watcher
            .subscribers
            .borrow_mut()
            .push((sub_id, Rc::new(callback)));

        let registry = Rc::downgrade(self);
        Dispose::new(move || {
            let Some(registry) = registry.upgrade() else {
                return;
            };
            let Some(watcher) = registry.watchers.borrow().get(&container).cloned() else {
                return;
            };
            watcher
                .subscribers
                .borrow_mut()
                .retain(|(id, _)| *id != sub_id);
            let count = watcher.refcount.get().saturating_sub(1);
            watcher.refcount.set(count);
            if count == 0 {
                registry.watchers.borrow_mut().remove(&container);
            }
        })
    }

    /// Host-side entry point: a mutation happened in `container`.
    pub fn notify(self: &Rc<Self>, container: ContainerKey, kinds: MutationKind) {
        let Some(watcher) = self.watchers.borrow().get(&container).cloned() else {
            return;
        };
        match watcher.state.get() {
            WatchState::Cooldown => {}
            WatchState::Coalescing => {
                watcher.pending.set(watcher.pending.get() | kinds);
            }
            WatchState::Idle => {
                watcher.pending.set(kinds);
                watcher.state.set(WatchState::Coalescing);
                let registry = Rc::downgrade(self);
                let w = watcher.clone();
                self.runtime.request_frame(move || {
                    let kinds = w.pending.replace(MutationKind::empty());
                    w.state.set(WatchState::Cooldown);
                    let subs = w.subscribers.borrow().clone();
                    for (_, cb) in &subs {
                        cb(kinds);
                    }
                    if let Some(registry) = registry.upgrade() {
                        let w = w.clone();
                        registry.runtime.request_frame(move || {
                            w.state.set(WatchState::Idle);
                        });
                    } else {
                        w.state.set(WatchState::Idle);
                    }
                });
            }
        }
    }

    /// Number of live watchers, for teardown checks in tests.
    pub fn watcher_count(&self) -> usize {
        self.watchers.borrow().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell as StdRefCell;

    struct FakeStack {
        heights: StdRefCell<HashMap<ToastId, f32>>,
        published: StdRefCell<Vec<(ToastId, f32)>>,
    }

    impl FakeStack {
        fn new(entries: &[(&str, f32)]) -> Self {
            Self {
                heights: StdRefCell::new(
                    entries
                        .iter()
                        .map(|(id, h)| (ToastId::from(*id), *h))
                        .collect(),
                ),
                published: StdRefCell::new(Vec::new()),
            }
        }
    }

    impl HostStack for FakeStack {
        fn toast_ids(&self) -> Vec<ToastId> {
            let mut ids: Vec<ToastId> = self.heights.borrow().keys().cloned().collect();
            ids.sort_by(|a, b| a.0.cmp(&b.0));
            ids
        }
        fn content_height(&self, id: &ToastId) -> Option<f32> {
            self.heights.borrow().get(id).copied()
        }
        fn publish_initial_height(&self, id: &ToastId, px: f32) {
            self.published.borrow_mut().push((id.clone(), px));
        }
        fn remove(&self, id: &ToastId) {
            self.heights.borrow_mut().remove(id);
        }
    }

    #[test]
    fn sync_publishes_every_mounted_sibling() {
        let stack = FakeStack::new(&[("a", 34.0), ("b", 110.0)]);
        sync_stack_heights(&stack);
        let published = stack.published.borrow();
        assert_eq!(published.len(), 2);
        assert!(published.contains(&(ToastId::from("a"), 34.0)));
        assert!(published.contains(&(ToastId::from("b"), 110.0)));
    }

    #[test]
    fn shared_watcher_is_created_once_and_torn_down_at_zero() {
        let (rt, _clock) = Runtime::new_test();
        let registry = ObserverRegistry::new(rt);
        let key = ContainerKey(7);

        let a = registry.register(key, |_| {});
        let b = registry.register(key, |_| {});
        assert_eq!(registry.watcher_count(), 1);

        a.run();
        assert_eq!(registry.watcher_count(), 1);
        b.run();
        assert_eq!(registry.watcher_count(), 0);
    }

    #[test]
    fn dispose_is_idempotent() {
        let (rt, _clock) = Runtime::new_test();
        let registry = ObserverRegistry::new(rt);
        let key = ContainerKey(1);

        let a = registry.register(key, |_| {});
        let _b = registry.register(key, |_| {});
        a.run();
        a.run();
        assert_eq!(registry.watcher_count(), 1);
    }

    #[test]
    fn burst_is_coalesced_into_one_delivery() {
        let (rt, _clock) = Runtime::new_test();
        let registry = ObserverRegistry::new(rt.clone());
        let key = ContainerKey(2);
        let seen = Rc::new(StdRefCell::new(Vec::new()));

        let s = seen.clone();
        let _sub = registry.register(key, move |k| s.borrow_mut().push(k));

        registry.notify(key, MutationKind::ATTRIBUTES);
        registry.notify(key, MutationKind::CHILD_LIST);
        registry.notify(key, MutationKind::SUBTREE);
        rt.tick();

        let seen_now = seen.borrow().clone();
        assert_eq!(
            seen_now,
            vec![MutationKind::ATTRIBUTES | MutationKind::CHILD_LIST | MutationKind::SUBTREE]
        );
    }

    #[test]
    fn cooldown_swallows_the_echo_frame() {
        let (rt, _clock) = Runtime::new_test();
        let registry = ObserverRegistry::new(rt.clone());
        let key = ContainerKey(3);
        let count = Rc::new(Cell::new(0));

        let c = count.clone();
        let _sub = registry.register(key, move |_| c.set(c.get() + 1));

        registry.notify(key, MutationKind::ATTRIBUTES);
        rt.tick();
        assert_eq!(count.get(), 1);

        // Echo from our own layout write: dropped during cooldown.
        registry.notify(key, MutationKind::ATTRIBUTES);
        rt.tick();
        assert_eq!(count.get(), 1);

        // Watcher re-armed after the cooldown frame.
        registry.notify(key, MutationKind::CHILD_LIST);
        rt.tick();
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn notify_without_registration_is_a_noop() {
        let (rt, _clock) = Runtime::new_test();
        let registry = ObserverRegistry::new(rt.clone());
        registry.notify(ContainerKey(99), MutationKind::SUBTREE);
        rt.tick();
    }
}
