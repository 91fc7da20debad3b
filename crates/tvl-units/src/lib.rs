// SPDX-License-Identifier: LGPL-3.0-or-later

//! # tvl-units
//!
//! Processing stages of the TVL time-varying loudness model, built on
//! [`tvl_signal`]. It includes:
//!
//! - **Filters**: general second-order recursive (biquad) section
//! - **Loudness**: two-stage temporal integration of instantaneous
//!   loudness into short-term and long-term loudness
//! - **Auditory**: conversions between linear frequency and the Cam
//!   (ERB-rate) scale
//!
//! Stages implement the [`Module`](tvl_signal::Module) lifecycle: they are
//! initialized against an input [`SignalBank`](tvl_signal::SignalBank),
//! stream blocks through `process`, and rewind with `reset`.

pub mod auditory;
pub mod filters;
pub mod loudness;
