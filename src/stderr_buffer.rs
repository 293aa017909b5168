//! Diagnostics on stderr.
//!
//! Warnings always print; debug lines only print with `--verbose`. While the
//! interactive form owns the terminal both are held back and flushed after it
//! exits, so they don't corrupt the display.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

static BUFFER: Mutex<Option<Vec<String>>> = Mutex::new(None);
static VERBOSE: AtomicBool = AtomicBool::new(false);

pub fn set_verbose(verbose: bool) {
    VERBOSE.store(verbose, Ordering::Relaxed);
}

pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::Relaxed)
}

/// Start holding messages back instead of printing them.
/// Messages already held are kept.
pub fn activate() {
    if let Ok(mut guard) = BUFFER.lock() {
        guard.get_or_insert_with(Vec::new);
    }
}

/// Stop buffering and return all collected messages.
pub fn drain() -> Vec<String> {
    BUFFER
        .lock()
        .ok()
        .and_then(|mut guard| guard.take())
        .unwrap_or_default()
}

/// Stop buffering and print everything that was held back.
pub fn flush() {
    for msg in drain() {
        eprintln!("{}", msg);
    }
}

/// Write a warning. Stored if buffering is active, printed otherwise.
pub fn warn(msg: String) {
    let Ok(mut guard) = BUFFER.lock() else {
        eprintln!("{}", msg);
        return;
    };
    if let Some(buf) = guard.as_mut() {
        buf.push(msg);
    } else {
        drop(guard);
        eprintln!("{}", msg);
    }
}

/// Write a debug line; dropped unless verbose mode is on.
pub fn debug(msg: String) {
    if is_verbose() {
        warn(msg);
    }
}

/// Like `eprintln!`, but held back while the interactive form is active.
#[macro_export]
macro_rules! buffered_eprintln {
    ($($arg:tt)*) => {
        $crate::stderr_buffer::warn(format!($($arg)*))
    };
}

/// Like `buffered_eprintln!`, but only with `--verbose`.
#[macro_export]
macro_rules! verbose_eprintln {
    ($($arg:tt)*) => {
        $crate::stderr_buffer::debug(format!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    // The buffer is process-global; keep everything in one test.
    #[test]
    fn test_buffering_keeps_warnings_and_drops_quiet_debug() {
        activate();
        buffered_eprintln!("sample data missing: {}", "data.csv");
        activate(); // Re-activating keeps held messages
        verbose_eprintln!("hidden unless verbose");

        let messages = drain();
        assert_eq!(messages, vec!["sample data missing: data.csv".to_string()]);
        assert!(drain().is_empty());
        assert!(!is_verbose());
    }
}
