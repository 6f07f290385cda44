//! Deferred stderr warnings.
//!
//! While a batch of records is scored, warnings about degraded factors are
//! held back so they don't interleave with the results on a shared
//! terminal. The caller flushes them once the output has been written.

use std::sync::{Mutex, MutexGuard};

static BUFFER: Mutex<Option<Vec<String>>> = Mutex::new(None);

// A panic while holding the lock leaves the Vec intact; keep using it.
fn buffer() -> MutexGuard<'static, Option<Vec<String>>> {
    BUFFER.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Start holding warnings back.
pub fn activate() {
    *buffer() = Some(Vec::new());
}

/// Stop buffering and return the held warnings in the order they came.
pub fn drain() -> Vec<String> {
    buffer().take().unwrap_or_default()
}

/// Store the message if buffering is active, otherwise print it now.
pub fn warn(msg: String) {
    let mut guard = buffer();
    if let Some(held) = guard.as_mut() {
        held.push(msg);
    } else {
        drop(guard);
        eprintln!("{}", msg);
    }
}

/// `eprintln!` that goes through the buffer when it is active.
#[macro_export]
macro_rules! buffered_eprintln {
    ($($arg:tt)*) => {
        $crate::stderr_buffer::warn(format!($($arg)*))
    };
}
