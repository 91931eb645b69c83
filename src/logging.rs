//! Status reporting for the refresh lifecycle
//!
//! The engine reports human-readable progress through an injected sink so a
//! hosting overlay can display it, and mirrors everything to the `log`
//! facade for ordinary logging setups.

use std::fmt;
use std::sync::Arc;

/// Callback receiving human-readable status lines
pub type StatusSink = Arc<dyn Fn(&str) + Send + Sync>;

/// Status reporter shared by the sync components.
///
/// `status` lines always reach the sink; `debug` lines only when debug
/// logging was enabled in the settings.
#[derive(Clone)]
pub struct StatusLog {
    sink: Option<StatusSink>,
    debug_enabled: bool,
}

impl StatusLog {
    pub fn new(sink: Option<StatusSink>, debug_enabled: bool) -> Self {
        Self {
            sink,
            debug_enabled,
        }
    }

    /// Reports a lifecycle message
    pub fn status(&self, msg: &str) {
        log::info!("{msg}");
        if let Some(sink) = &self.sink {
            sink(msg);
        }
    }

    /// Reports a diagnostic message, forwarded to the sink only when debug
    /// logging is enabled
    pub fn debug(&self, msg: &str) {
        log::debug!("{msg}");
        if self.debug_enabled {
            if let Some(sink) = &self.sink {
                sink(msg);
            }
        }
    }
}

impl fmt::Debug for StatusLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatusLog")
            .field("sink", &self.sink.is_some())
            .field("debug_enabled", &self.debug_enabled)
            .finish()
    }
}
