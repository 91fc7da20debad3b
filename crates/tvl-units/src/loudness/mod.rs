// SPDX-License-Identifier: LGPL-3.0-or-later

//! Loudness integration stages.
//!
//! - **IntegratedLoudness**: two-stage asymmetric smoothing of
//!   instantaneous loudness into short-term and long-term loudness
//! - **Smoothing presets**: published attack/release time-constant sets

pub mod integrated;
pub mod smoothing;

pub use integrated::IntegratedLoudness;
pub use smoothing::{SmoothingCoefs, SmoothingPreset, SmoothingTimes};
