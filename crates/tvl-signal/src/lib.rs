// SPDX-License-Identifier: LGPL-3.0-or-later

//! # tvl-signal
//!
//! Signal-bank container and module plumbing for the TVL time-varying
//! loudness model.
//!
//! This crate provides the foundation the processing stages in
//! `tvl-units` are built on:
//!
//! - **SignalBank**: the (ear, channel, sample) block container with
//!   sample-rate, frame-rate, and centre-frequency metadata
//! - **Module**: the initialize/process/reset lifecycle every stage
//!   implements
//! - **Errors**: fatal configuration errors returned from `initialize`
//! - **Events**: structured warnings and errors routed through a
//!   per-module [`EventSink`](events::EventSink)

pub mod bank;
pub mod error;
pub mod events;
pub mod module;

pub use bank::{Sample, SignalBank};
pub use error::{ConfigError, ConfigResult};
pub use events::{EventSink, LogSink, MemorySink, ModuleEvent, NullSink, TapRole, Warning};
pub use module::Module;
