//! Debug-only reentrancy guard.
//!
//! The map calls into user code (`K: Eq`, `V: PartialEq`) while scanning
//! chains. A key whose `Eq` reaches back into the same map could observe a
//! chain mid-splice or a table mid-resize. In debug builds:
//! - mutating operations `enter` the guard and hold it until they return;
//! - reads `check` it and panic if a mutation is in progress;
//! - a mutation entered while another is in progress panics too.
//!
//! Reads never take the guard, so concurrent readers behind a shared lock do
//! not trip it. In release builds everything compiles to nothing.

#[cfg(not(debug_assertions))]
use core::marker::PhantomData;
#[cfg(debug_assertions)]
use parking_lot::Mutex;

/// Per-map tracker.
#[derive(Debug, Default)]
pub(crate) struct DebugReentrancy {
    #[cfg(debug_assertions)]
    active: Mutex<Option<&'static str>>,
}

impl DebugReentrancy {
    pub(crate) fn new() -> Self {
        Self {
            #[cfg(debug_assertions)]
            active: Mutex::new(None),
        }
    }

    /// Enter a mutating section for `op`.
    #[inline]
    pub(crate) fn enter(&self, op: &'static str) -> ReentrancyGuard<'_> {
        #[cfg(debug_assertions)]
        {
            let mut active = self.active.lock();
            if let Some(outer) = *active {
                drop(active);
                panic!("reentrancy detected: `{op}` entered while `{outer}` is in progress");
            }
            *active = Some(op);
            return ReentrancyGuard { owner: self };
        }

        #[cfg(not(debug_assertions))]
        {
            let _ = op;
            return ReentrancyGuard { _z: PhantomData };
        }
    }

    /// Assert no mutation is in progress before a read named `op`.
    #[inline]
    pub(crate) fn check(&self, op: &'static str) {
        #[cfg(debug_assertions)]
        {
            let outer = *self.active.lock();
            if let Some(outer) = outer {
                panic!("reentrancy detected: `{op}` entered while `{outer}` is in progress");
            }
        }
        #[cfg(not(debug_assertions))]
        let _ = op;
    }
}

/// RAII guard returned by [`DebugReentrancy::enter`].
pub(crate) struct ReentrancyGuard<'a> {
    #[cfg(debug_assertions)]
    owner: &'a DebugReentrancy,
    #[cfg(not(debug_assertions))]
    _z: PhantomData<&'a ()>,
}

impl Drop for ReentrancyGuard<'_> {
    fn drop(&mut self) {
        #[cfg(debug_assertions)]
        {
            *self.owner.active.lock() = None;
        }
    }
}
