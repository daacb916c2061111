use std::sync::{Mutex, MutexGuard, PoisonError};

/// Lock a state mutex, recovering the guard if a previous holder panicked.
///
/// Guards are never held across an `.await`.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
