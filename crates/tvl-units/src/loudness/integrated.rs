// SPDX-License-Identifier: LGPL-3.0-or-later

//! Temporal integration of instantaneous loudness.
//!
//! Collapses a specific-loudness frame into instantaneous loudness per
//! ear and smooths it through two cascaded asymmetric one-pole stages:
//!
//! ```text
//! il  = scale * sum(specific_loudness[channel])
//! stl += coef_stl * (il  - stl)     attack coef while rising, release while falling
//! ltl += coef_ltl * (stl - ltl)
//! ```
//!
//! `scale` folds the calibration constant, the filterbank channel
//! spacing in Cams, and the diotic presentation correction into one
//! multiplier, so the channel sum approximates the integral of specific
//! loudness over the Cam axis.

use std::sync::Arc;

use tvl_signal::{
    ConfigError, ConfigResult, EventSink, LogSink, Module, ModuleEvent, Sample, SignalBank,
    Warning,
};

use crate::auditory::hz_to_cam;
use crate::loudness::smoothing::{SmoothingCoefs, SmoothingPreset, SmoothingTimes};

/// Output channel holding instantaneous loudness.
pub const CHANNEL_INSTANTANEOUS: usize = 0;
/// Output channel holding short-term loudness.
pub const CHANNEL_SHORT_TERM: usize = 1;
/// Output channel holding long-term loudness.
pub const CHANNEL_LONG_TERM: usize = 2;

const NAME: &str = "IntegratedLoudness";

/// Previous smoother outputs for one ear.
#[derive(Debug, Clone, Copy, Default)]
struct EarState {
    stl: Sample,
    ltl: Sample,
}

/// Two-stage temporal loudness integrator.
///
/// The input bank carries one specific-loudness value per auditory
/// channel per ear, one frame per `process` call. The output bank has
/// one frame of three channels per ear: instantaneous, short-term, and
/// long-term loudness. Ears are integrated independently; the smoothing
/// state is owned by the module, starts at zero, and is zeroed again by
/// [`reset`](Module::reset).
///
/// # Examples
///
/// ```
/// use tvl_signal::{Module, SignalBank};
/// use tvl_units::auditory::cam_space;
/// use tvl_units::loudness::integrated::CHANNEL_SHORT_TERM;
/// use tvl_units::loudness::IntegratedLoudness;
///
/// let mut input = SignalBank::new(1, 4, 1, 32000.0);
/// input.set_frame_rate(1000.0);
/// input.set_centre_freqs(&cam_space(50.0, 0.25, 4));
///
/// let mut integrator = IntegratedLoudness::new("GM2002", 1.0);
/// integrator.initialize(&input).unwrap();
///
/// for channel in 0..4 {
///     input.set_sample(0, channel, 0, 0.25);
/// }
/// integrator.process(&input);
///
/// let stl = integrator.output().unwrap().sample(0, CHANNEL_SHORT_TERM, 0);
/// assert!(stl > 0.0);
/// ```
pub struct IntegratedLoudness {
    /// Smoothing times in seconds.
    times: SmoothingTimes,
    /// Calibration constant, kept as configured.
    c_param: Sample,
    /// Derived at initialize: `c_param` with the diotic and channel
    /// spacing corrections folded in.
    scale: Sample,
    /// Channel spacing of the input filterbank in Cams.
    cam_step: f64,
    /// Seconds per frame of the input bank.
    time_step: f64,
    coefs: SmoothingCoefs,
    /// Smoother state per ear.
    state: Vec<EarState>,
    output: Option<SignalBank>,
    sink: Arc<dyn EventSink>,
}

impl IntegratedLoudness {
    /// Create an integrator from a preset name and calibration constant.
    ///
    /// Unknown names emit a warning and select the default set (GM2002).
    /// Recognized names: `"GM2002"`, `"GM2003"`, `"CH2012"`.
    pub fn new(preset_name: &str, c_param: Sample) -> Self {
        let mut integrator = Self::with_preset(SmoothingPreset::default(), c_param);
        integrator.set_preset(preset_name);
        integrator
    }

    /// Create an integrator from an already resolved preset.
    pub fn with_preset(preset: SmoothingPreset, c_param: Sample) -> Self {
        Self {
            times: preset.times(),
            c_param,
            scale: 0.0,
            cam_step: 0.0,
            time_step: 0.0,
            coefs: SmoothingCoefs::default(),
            state: Vec::new(),
            output: None,
            sink: Arc::new(LogSink),
        }
    }

    /// Select a smoothing preset by published name.
    ///
    /// Unknown names emit a warning and select the default set.
    pub fn set_preset(&mut self, name: &str) -> &mut Self {
        match SmoothingPreset::from_name(name) {
            Some(preset) => self.times = preset.times(),
            None => {
                self.sink.emit(
                    NAME,
                    ModuleEvent::Warning(Warning::UnknownPreset {
                        requested: name.to_string(),
                    }),
                );
                self.times = SmoothingPreset::default().times();
            }
        }
        self
    }

    /// Set the short-term attack time in seconds.
    pub fn set_attack_stl(&mut self, seconds: f64) -> &mut Self {
        self.times.attack_stl = seconds;
        self
    }

    /// Set the short-term release time in seconds.
    pub fn set_release_stl(&mut self, seconds: f64) -> &mut Self {
        self.times.release_stl = seconds;
        self
    }

    /// Set the long-term attack time in seconds.
    pub fn set_attack_ltl(&mut self, seconds: f64) -> &mut Self {
        self.times.attack_ltl = seconds;
        self
    }

    /// Set the long-term release time in seconds.
    pub fn set_release_ltl(&mut self, seconds: f64) -> &mut Self {
        self.times.release_ltl = seconds;
        self
    }

    /// Route diagnostic events to `sink`.
    pub fn set_sink(&mut self, sink: Arc<dyn EventSink>) -> &mut Self {
        self.sink = sink;
        self
    }

    /// Return the smoothing times currently in effect, in seconds.
    pub fn times(&self) -> SmoothingTimes {
        self.times
    }
}

impl Module for IntegratedLoudness {
    fn name(&self) -> &'static str {
        NAME
    }

    /// Derive the per-stream scalars and allocate the output bank.
    ///
    /// The input must have more than one channel, because the channel
    /// spacing is measured between the first two centre frequencies, and
    /// one or two ears. The output bank is shaped (ears, 3, 1) at the
    /// input's sample rate and frame rate. A one-ear input is treated as
    /// diotic presentation and its loudness is doubled; the doubling
    /// applies before the spacing multiplication and never accumulates
    /// across repeated initialization.
    fn initialize(&mut self, input: &SignalBank) -> ConfigResult<()> {
        if input.channels() <= 1 {
            let error = ConfigError::TooFewChannels {
                got: input.channels(),
            };
            self.sink.emit(NAME, ModuleEvent::Fatal(error.clone()));
            return Err(error);
        }
        let ears = input.ears();
        if ears == 0 || ears > 2 {
            let error = ConfigError::EarCount { got: ears };
            self.sink.emit(NAME, ModuleEvent::Fatal(error.clone()));
            return Err(error);
        }

        self.cam_step = hz_to_cam(input.centre_freq(1)) - hz_to_cam(input.centre_freq(0));

        let mut scale = self.c_param;
        if ears == 1 {
            scale *= 2.0;
        }
        self.scale = scale * self.cam_step;

        self.time_step = 1.0 / input.frame_rate();
        self.coefs = self.times.coefficients(self.time_step);

        self.state = vec![EarState::default(); ears];

        let mut output = SignalBank::new(ears, 3, 1, input.sample_rate());
        output.set_frame_rate(input.frame_rate());
        self.output = Some(output);
        Ok(())
    }

    /// Integrate one specific-loudness frame.
    ///
    /// Reads sample 0 of every input channel per ear. The smoother picks
    /// its attack coefficient while the stage input exceeds the previous
    /// output and its release coefficient otherwise. Without a successful
    /// [`initialize`](Module::initialize) this is a no-op.
    fn process(&mut self, input: &SignalBank) {
        let Some(output) = self.output.as_mut() else {
            return;
        };
        if input.samples() == 0 {
            return;
        }

        let ears = input.ears().min(self.state.len());
        for ear in 0..ears {
            let mut il = 0.0;
            for channel in 0..input.channels() {
                il += input.sample(ear, channel, 0);
            }
            il *= self.scale;

            let state = &mut self.state[ear];
            let coef = if il > state.stl {
                self.coefs.attack_stl
            } else {
                self.coefs.release_stl
            };
            let stl = state.stl + coef * (il - state.stl);

            let coef = if stl > state.ltl {
                self.coefs.attack_ltl
            } else {
                self.coefs.release_ltl
            };
            let ltl = state.ltl + coef * (stl - state.ltl);

            output.set_sample(ear, CHANNEL_INSTANTANEOUS, 0, il);
            output.set_sample(ear, CHANNEL_SHORT_TERM, 0, stl);
            output.set_sample(ear, CHANNEL_LONG_TERM, 0, ltl);
            state.stl = stl;
            state.ltl = ltl;
        }
    }

    /// Zero the per-ear smoothing state so the next frame integrates
    /// from silence. Configuration and the output bank are untouched.
    fn reset(&mut self) {
        for state in &mut self.state {
            *state = EarState::default();
        }
    }

    fn output(&self) -> Option<&SignalBank> {
        self.output.as_ref()
    }
}
