use std::fmt;

use crate::entity::Entity;
use crate::flat;
use crate::schema::Schema;

/// A boxed hook invoked with the entity and its component.
pub type Callback<S, C> = Box<dyn FnMut(Entity<S>, &mut C) + Send>;

/// Identifies an attached callback so that it can be detached later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CallbackHandle(u32);

/// The callbacks attached to one event of one system, in attachment order.
pub(crate) struct List<S: Schema, C> {
    callbacks: flat::Map<CallbackHandle, Callback<S, C>>,
    next:      u32,
}

impl<S: Schema, C> Default for List<S, C> {
    fn default() -> Self { Self { callbacks: flat::Map::new(), next: 0 } }
}

impl<S: Schema, C> fmt::Debug for List<S, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.callbacks.keys()).finish()
    }
}

impl<S: Schema, C> List<S, C> {
    pub(crate) fn attach(&mut self, callback: Callback<S, C>) -> CallbackHandle {
        let handle = CallbackHandle(self.next);
        self.next = self.next.checked_add(1).expect("too many callbacks attached");
        self.callbacks.insert(handle, callback);
        handle
    }

    pub(crate) fn detach(&mut self, handle: CallbackHandle) -> bool {
        self.callbacks.remove(&handle).is_some()
    }

    pub(crate) fn len(&self) -> usize { self.callbacks.len() }

    /// Invokes every callback, oldest first.
    pub(crate) fn fire(&mut self, entity: Entity<S>, value: &mut C) {
        for (_, callback) in self.callbacks.iter_mut() {
            callback(entity, value);
        }
    }
}
