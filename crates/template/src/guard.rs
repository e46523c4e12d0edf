use std::sync::atomic::{AtomicBool, Ordering};

/// Flag admitting one outstanding operation at a time.
#[derive(Debug, Default)]
pub struct InFlight {
    active: AtomicBool,
}

/// Clears its [`InFlight`] flag when dropped.
#[derive(Debug)]
pub struct InFlightGuard<'a> {
    active: &'a AtomicBool,
}

impl InFlight {
    #[must_use]
    pub const fn new() -> Self { Self { active: AtomicBool::new(false) } }

    /// Raises the flag, or returns `None` if it is already raised.
    #[must_use]
    pub fn try_acquire(&self) -> Option<InFlightGuard<'_>> {
        self.active
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlightGuard { active: &self.active })
    }

    #[must_use]
    pub fn is_active(&self) -> bool { self.active.load(Ordering::Acquire) }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) { self.active.store(false, Ordering::Release); }
}
