//! Store I/O on Tokio's blocking pool.
//!
//! Dropping the awaiting future (the clock's dispatch timeout does this)
//! marks the job abandoned.  A job that has not yet taken its lock by then
//! is skipped, so a reading the clock counted as dropped is never written
//! later.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;

use crate::{OutputError, OutputResult};

/// Sets the flag when the awaiting future goes away, finished or not.
struct AbandonOnDrop(Arc<AtomicBool>);

impl Drop for AbandonOnDrop {
    fn drop(&mut self) {
        self.0.store(true, Ordering::Release);
    }
}

/// Lock `resource` on the blocking pool and run `f` on it, unless the
/// caller stopped waiting before the lock was acquired.
///
/// # Errors
///
/// [`OutputError::Abandoned`] for a skipped job; otherwise whatever `f`
/// returns, or [`OutputError::Join`] if it panicked.
pub(crate) async fn with_locked<R, T, F>(resource: &Arc<Mutex<R>>, f: F) -> OutputResult<T>
where
    R: Send + 'static,
    T: Send + 'static,
    F: FnOnce(&mut R) -> OutputResult<T> + Send + 'static,
{
    let abandoned = Arc::new(AtomicBool::new(false));
    let _guard = AbandonOnDrop(Arc::clone(&abandoned));
    let resource = Arc::clone(resource);

    tokio::task::spawn_blocking(move || {
        let mut locked = resource.lock();
        if abandoned.load(Ordering::Acquire) {
            return Err(OutputError::Abandoned);
        }
        f(&mut locked)
    })
    .await?
}
