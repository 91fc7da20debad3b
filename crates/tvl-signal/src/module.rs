// SPDX-License-Identifier: LGPL-3.0-or-later

//! Module lifecycle.
//!
//! Every processing stage of the model implements the same three-phase
//! contract: configure against an input bank, stream blocks through,
//! and rewind transient state between independent signals.

use crate::bank::SignalBank;
use crate::error::ConfigResult;

/// A processing stage that reads an input bank and maintains its own
/// output bank.
///
/// The lifecycle is:
///
/// 1. [`initialize`](Module::initialize) validates configuration against
///    the shape and metadata of the input bank, allocates the output bank
///    and internal state, and derives per-stream scalars. It may be called
///    again to reconfigure against a new input; each call starts from the
///    pristine configuration.
/// 2. [`process`](Module::process) runs one block through the stage and
///    writes the result into the output bank. On a module that was never
///    successfully initialized this is a no-op.
/// 3. [`reset`](Module::reset) zeroes transient numeric state only, so the
///    next block is processed as if it were the first. Configuration and
///    allocations are untouched.
///
/// `process` and `reset` never allocate.
pub trait Module {
    /// Stable name used in diagnostic events.
    fn name(&self) -> &'static str;

    /// Validate configuration against `input`, allocate the output bank
    /// and state, and derive scalars.
    fn initialize(&mut self, input: &SignalBank) -> ConfigResult<()>;

    /// Process one block from `input` into the output bank.
    fn process(&mut self, input: &SignalBank);

    /// Zero transient state so the next block starts from silence.
    fn reset(&mut self);

    /// The output bank, or `None` before the first successful
    /// [`initialize`](Module::initialize).
    fn output(&self) -> Option<&SignalBank>;
}
