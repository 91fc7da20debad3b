// SPDX-License-Identifier: LGPL-3.0-or-later

//! Structured module diagnostics.
//!
//! Modules report non-fatal warnings and fatal configuration errors as
//! typed events through an [`EventSink`] they own. Events carry the
//! offending values; the sink decides how to render them. The default
//! [`LogSink`] forwards to the `log` facade, [`NullSink`] discards, and
//! [`MemorySink`] records events for inspection in tests.

use std::fmt;
use std::sync::{Mutex, MutexGuard};

use crate::error::ConfigError;

/// Which tap array a filter warning refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapRole {
    Feedforward,
    Feedback,
}

impl fmt::Display for TapRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TapRole::Feedforward => f.write_str("feedforward"),
            TapRole::Feedback => f.write_str("feedback"),
        }
    }
}

/// Non-fatal condition a module continues through.
#[derive(Debug, Clone, PartialEq)]
pub enum Warning {
    /// A tap array was supplied with an unexpected length. The values are
    /// kept as given; initialization will fail unless they are replaced.
    TapCount {
        role: TapRole,
        expected: usize,
        got: usize,
    },
    /// A smoothing preset name was not recognized and the default preset
    /// was substituted.
    UnknownPreset { requested: String },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::TapCount {
                role,
                expected,
                got,
            } => write!(f, "{} taps: expected {}, got {}", role, expected, got),
            Warning::UnknownPreset { requested } => {
                write!(f, "unknown smoothing preset {:?}, using default", requested)
            }
        }
    }
}

/// Event emitted by a module through its sink.
#[derive(Debug, Clone, PartialEq)]
pub enum ModuleEvent {
    Warning(Warning),
    Fatal(ConfigError),
}

/// Receiver for module events.
///
/// Sinks are shared as `Arc<dyn EventSink>` so one receiver can serve
/// several module instances across threads.
pub trait EventSink: Send + Sync {
    /// Deliver one event from the named module.
    fn emit(&self, module: &'static str, event: ModuleEvent);
}

/// Sink that discards every event.
#[derive(Debug, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _module: &'static str, _event: ModuleEvent) {}
}

/// Sink that forwards events to the `log` facade.
///
/// Warnings go out at warn level, fatal errors at error level. This is
/// the sink modules are constructed with.
#[derive(Debug, Default)]
pub struct LogSink;

impl EventSink for LogSink {
    fn emit(&self, module: &'static str, event: ModuleEvent) {
        match event {
            ModuleEvent::Warning(warning) => log::warn!("[{}] {}", module, warning),
            ModuleEvent::Fatal(error) => log::error!("[{}] {}", module, error),
        }
    }
}

/// Sink that records events in memory.
///
/// # Examples
/// ```
/// use tvl_signal::{EventSink, MemorySink, ModuleEvent, TapRole, Warning};
///
/// let sink = MemorySink::new();
/// sink.emit(
///     "Biquad",
///     ModuleEvent::Warning(Warning::TapCount {
///         role: TapRole::Feedback,
///         expected: 3,
///         got: 2,
///     }),
/// );
/// assert_eq!(sink.events().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<(&'static str, ModuleEvent)>>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a copy of every recorded event, in emission order.
    pub fn events(&self) -> Vec<(&'static str, ModuleEvent)> {
        self.lock().clone()
    }

    /// Return true if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Drop all recorded events.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, Vec<(&'static str, ModuleEvent)>> {
        // A poisoned Vec of plain values is still valid; keep serving it.
        self.events.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl EventSink for MemorySink {
    fn emit(&self, module: &'static str, event: ModuleEvent) {
        self.lock().push((module, event));
    }
}
