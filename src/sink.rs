//! Line-oriented text sinks for run logs.
//!
//! The runner writes a human-readable transcript of each run (banners,
//! per-round counts, escalations, final summary) to a [`LogSink`]. This is
//! separate from the structured `tracing` events the runner also emits:
//! the transcript is presentation output, tracing is diagnostics.

/// Receives one log line at a time.
pub trait LogSink {
    fn line(&mut self, message: &str);
}

impl<S: LogSink + ?Sized> LogSink for &mut S {
    fn line(&mut self, message: &str) {
        (**self).line(message);
    }
}

impl LogSink for Vec<String> {
    fn line(&mut self, message: &str) {
        self.push(message.to_string());
    }
}

/// Discards every line.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl LogSink for NullSink {
    fn line(&mut self, _message: &str) {}
}

/// Adapts a closure into a sink.
///
/// ```
/// use u_placement::sink::{FnSink, LogSink};
///
/// let mut count = 0;
/// let mut sink = FnSink(|_: &str| count += 1);
/// sink.line("a");
/// sink.line("b");
/// drop(sink);
/// assert_eq!(count, 2);
/// ```
pub struct FnSink<F: FnMut(&str)>(pub F);

impl<F: FnMut(&str)> LogSink for FnSink<F> {
    fn line(&mut self, message: &str) {
        (self.0)(message);
    }
}

/// Forwards non-empty lines to `tracing` at INFO level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn line(&mut self, message: &str) {
        if !message.is_empty() {
            tracing::info!(target: "u_placement::transcript", "{message}");
        }
    }
}
