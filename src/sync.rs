//! Serialized access to a device shared between execution contexts.

use core::cell::RefCell;

use critical_section::Mutex;

use crate::LampOutput;
use crate::device::Device;
use crate::random::RandomSource;
use crate::storage::KeyValueStore;

/// Device behind a critical-section mutex.
///
/// Every access runs inside a critical section, so power, mode and
/// `advance` calls from different tasks or interrupts never interleave.
/// Keep the closures short: they block every other context.
pub struct SharedDevice<S: KeyValueStore, O: LampOutput, R: RandomSource> {
    inner: Mutex<RefCell<Device<S, O, R>>>,
}

impl<S: KeyValueStore, O: LampOutput, R: RandomSource> SharedDevice<S, O, R> {
    pub const fn new(device: Device<S, O, R>) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(device)),
        }
    }

    /// Run `f` with exclusive access to the device
    pub fn with<T>(&self, f: impl FnOnce(&mut Device<S, O, R>) -> T) -> T {
        critical_section::with(|cs| {
            let mut device = self.inner.borrow(cs).borrow_mut();
            f(&mut device)
        })
    }

    /// Take the device back out
    pub fn into_inner(self) -> Device<S, O, R> {
        self.inner.into_inner().into_inner()
    }
}
