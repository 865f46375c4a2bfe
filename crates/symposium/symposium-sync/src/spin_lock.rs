//! Spin-then-yield mutual exclusion.
//!
//! A lock is a single `AtomicBool`. Acquiring it is a compare-exchange from
//! `false` to `true`; releasing it stores `false`. Waiters do not queue and
//! there is no fairness between them.
//!
//! # Protocol
//!
//! **Acquire:**
//! 1. Try CAS `false -> true` with `Acquire` ordering
//! 2. On failure, poll with a plain `Relaxed` load, yielding the CPU between
//!    polls, until the flag reads `false`
//! 3. Retry from step 1
//!
//! **Release:**
//! 1. Store `false` with `Release` ordering
//!
//! The `Release` store synchronizes-with the `Acquire` CAS of the next owner,
//! so everything written inside one critical section is visible inside the
//! next one.
//!
//! # Reentrancy
//!
//! The lock is not reentrant. A thread that calls `acquire()` while it already
//! holds the lock spins forever, exactly like a non-reentrant mutex.

use std::cell::UnsafeCell;
use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

/// A bare exclusivity flag with no protected data.
///
/// Used directly for forks, where the resource is the ownership itself.
#[derive(Debug, Default)]
pub struct RawSpinLock {
    /// `true` while some thread owns the lock.
    locked: AtomicBool,
}

impl RawSpinLock {
    pub const fn new() -> Self {
        Self {
            locked: AtomicBool::new(false),
        }
    }

    /// Blocks until the calling thread owns the lock.
    ///
    /// Test-and-test-and-set: the inner loop only reads, so waiters do not
    /// bounce the cache line between cores while the owner is inside its
    /// critical section.
    #[inline]
    pub fn acquire(&self) {
        while self
            .locked
            .compare_exchange_weak(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            while self.locked.load(Ordering::Relaxed) {
                thread::yield_now();
            }
        }
    }

    /// Takes the lock if it is free, without waiting.
    #[inline]
    pub fn try_acquire(&self) -> bool {
        self.locked
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_ok()
    }

    /// Gives the lock up. Only the current owner may call this.
    #[inline]
    pub fn release(&self) {
        self.locked.store(false, Ordering::Release);
    }

    /// Racy by nature; only meaningful for diagnostics.
    #[inline]
    pub fn is_locked(&self) -> bool {
        self.locked.load(Ordering::Relaxed)
    }
}

/// A `RawSpinLock` guarding a value of type `T`.
///
/// Access goes through [`SpinGuard`], which releases the lock when dropped,
/// including on early return and unwinding.
#[derive(Default)]
pub struct SpinLock<T> {
    raw: RawSpinLock,
    data: UnsafeCell<T>,
}

// SAFETY: `data` is only reachable through a `SpinGuard`, and at most one
// guard exists at a time because creating one requires owning `raw`.
unsafe impl<T: Send> Send for SpinLock<T> {}
unsafe impl<T: Send> Sync for SpinLock<T> {}

impl<T> SpinLock<T> {
    pub const fn new(value: T) -> Self {
        Self {
            raw: RawSpinLock::new(),
            data: UnsafeCell::new(value),
        }
    }

    pub fn lock(&self) -> SpinGuard<'_, T> {
        self.raw.acquire();
        SpinGuard { lock: self }
    }

    pub fn try_lock(&self) -> Option<SpinGuard<'_, T>> {
        self.raw.try_acquire().then_some(SpinGuard { lock: self })
    }

    /// Runs `f` with exclusive access; the lock is released when `f` returns.
    pub fn with_lock<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let mut guard = self.lock();
        f(&mut guard)
    }

    pub fn into_inner(self) -> T {
        self.data.into_inner()
    }
}

/// Scoped ownership of a [`SpinLock`].
pub struct SpinGuard<'a, T> {
    lock: &'a SpinLock<T>,
}

impl<T> Deref for SpinGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        // SAFETY: the guard owns the lock, so no other reference to `data` exists.
        unsafe { &*self.lock.data.get() }
    }
}

impl<T> DerefMut for SpinGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        // SAFETY: as above, and `&mut self` makes this the only live borrow.
        unsafe { &mut *self.lock.data.get() }
    }
}

impl<T> Drop for SpinGuard<'_, T> {
    fn drop(&mut self) {
        self.lock.raw.release();
    }
}
