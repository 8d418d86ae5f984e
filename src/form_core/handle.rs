use crate::app::Effect;
use crate::widgets::Widget;
use std::any::Any;
use std::fmt;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_SCREEN_ID: AtomicU64 = AtomicU64::new(1);

/// Non-owning name of a screen, resolved against the navigation stack when used.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ScreenId(u64);

impl ScreenId {
    pub fn next() -> Self {
        Self(NEXT_SCREEN_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "screen#{}", self.0)
    }
}

/// A state edit whose state type is erased so it can travel through effects.
pub struct Edit(Box<dyn FnOnce(&mut dyn Any) -> bool>);

impl Edit {
    pub fn new<S: 'static>(f: impl FnOnce(&mut S) + 'static) -> Self {
        Self(Box::new(move |target: &mut dyn Any| {
            match target.downcast_mut::<S>() {
                Some(state) => {
                    f(state);
                    true
                }
                None => false,
            }
        }))
    }

    /// Returns false (and leaves `target` untouched) when the state type differs.
    pub fn apply(self, target: &mut dyn Any) -> bool {
        (self.0)(target)
    }
}

impl fmt::Debug for Edit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Edit(..)")
    }
}

/// The only way a control asks for a change to its driver's state.
pub struct Mutator<S> {
    target: ScreenId,
    _state: PhantomData<fn(&mut S)>,
}

impl<S> Clone for Mutator<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for Mutator<S> {}

impl<S: 'static> Mutator<S> {
    pub fn new(target: ScreenId) -> Self {
        Self {
            target,
            _state: PhantomData,
        }
    }

    pub fn request(&self, f: impl FnOnce(&mut S) + 'static) -> Effect {
        Effect::Mutate {
            target: self.target,
            edit: Edit::new(f),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Navigator {
    origin: ScreenId,
}

impl Navigator {
    pub fn new(origin: ScreenId) -> Self {
        Self { origin }
    }

    pub fn push(&self, screen: Box<dyn Widget>) -> Effect {
        Effect::Push {
            from: self.origin,
            screen,
        }
    }
}
