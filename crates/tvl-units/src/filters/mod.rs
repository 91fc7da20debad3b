// SPDX-License-Identifier: LGPL-3.0-or-later

//! Recursive filter stages.
//!
//! - **Biquad**: general second-order section filtering one signal with
//!   host-supplied taps

pub mod biquad;

pub use biquad::Biquad;
