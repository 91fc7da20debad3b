// SPDX-License-Identifier: LGPL-3.0-or-later

//! General second-order recursive filter section.
//!
//! Filters one signal through the Direct-Form I difference equation
//!
//! ```text
//! y[n] = b0*x[n] + b1*x[n-1] + b2*x[n-2] - a1*y[n-1] - a2*y[n-2]
//! ```
//!
//! Taps arrive precomputed from the host and are divided through by the
//! leading feedback tap at initialization, so the recursion can assume
//! `a0 == 1`.

use std::sync::Arc;

use tvl_signal::{
    ConfigError, ConfigResult, EventSink, LogSink, Module, ModuleEvent, Sample, SignalBank,
    TapRole, Warning,
};

/// Taps per array of a second-order section.
const TAPS: usize = 3;

/// Filter order; the delay line holds `2 * ORDER` cells.
const ORDER: usize = 2;

const NAME: &str = "Biquad";

/// Second-order recursive filter section.
///
/// Taps are supplied at construction or through the setters, and become
/// immutable once streaming starts; change them and call
/// [`initialize`](Module::initialize) again to reconfigure. The section
/// filters ear 0, channel 0 of its input into channel 0 of a one-ear
/// output bank; the delay line carries across block boundaries so a
/// signal may be streamed in blocks of any size.
///
/// # Examples
///
/// ```
/// use tvl_signal::{Module, SignalBank};
/// use tvl_units::filters::Biquad;
///
/// let mut input = SignalBank::new(1, 1, 4, 48000.0);
/// input.channel_data_mut(0, 0).unwrap().copy_from_slice(&[1.0, 0.0, 0.0, 0.0]);
///
/// let mut filter = Biquad::with_coefficients(&[1.0, 0.0, 0.0], &[1.0, 0.0, 0.0]);
/// filter.initialize(&input).unwrap();
/// filter.process(&input);
///
/// let output = filter.output().unwrap();
/// assert_eq!(output.channel_data(0, 0).unwrap(), &[1.0, 0.0, 0.0, 0.0]);
/// ```
pub struct Biquad {
    /// Feedforward taps, expected length 3.
    b: Vec<Sample>,
    /// Feedback taps, expected length 3.
    a: Vec<Sample>,
    /// Input gain applied before the recursion.
    gain: Sample,
    /// Delay line: x[n-1], x[n-2], y[n-1], y[n-2].
    state: [Sample; 2 * ORDER],
    output: Option<SignalBank>,
    sink: Arc<dyn EventSink>,
}

impl Default for Biquad {
    fn default() -> Self {
        Self::new()
    }
}

impl Biquad {
    /// Create a section with no taps and unity gain.
    ///
    /// Taps must be supplied through [`set_feedforward`](Biquad::set_feedforward)
    /// and [`set_feedback`](Biquad::set_feedback) before initialization.
    pub fn new() -> Self {
        Self {
            b: Vec::new(),
            a: Vec::new(),
            gain: 1.0,
            state: [0.0; 2 * ORDER],
            output: None,
            sink: Arc::new(LogSink),
        }
    }

    /// Create a section from feedforward (`b`) and feedback (`a`) taps.
    ///
    /// A warning is emitted for any array whose length is not 3; the
    /// values are kept as given and may be replaced before initialization.
    pub fn with_coefficients(b: &[Sample], a: &[Sample]) -> Self {
        let mut filter = Self::new();
        filter.set_feedforward(b).set_feedback(a);
        filter
    }

    /// Set the feedforward taps `[b0, b1, b2]`.
    ///
    /// Emits a warning if the length is not 3.
    pub fn set_feedforward(&mut self, taps: &[Sample]) -> &mut Self {
        if taps.len() != TAPS {
            self.sink.emit(
                NAME,
                ModuleEvent::Warning(Warning::TapCount {
                    role: TapRole::Feedforward,
                    expected: TAPS,
                    got: taps.len(),
                }),
            );
        }
        self.b = taps.to_vec();
        self
    }

    /// Set the feedback taps `[a0, a1, a2]`.
    ///
    /// Emits a warning if the length is not 3.
    pub fn set_feedback(&mut self, taps: &[Sample]) -> &mut Self {
        if taps.len() != TAPS {
            self.sink.emit(
                NAME,
                ModuleEvent::Warning(Warning::TapCount {
                    role: TapRole::Feedback,
                    expected: TAPS,
                    got: taps.len(),
                }),
            );
        }
        self.a = taps.to_vec();
        self
    }

    /// Set the input gain (linear, default 1.0).
    pub fn set_gain(&mut self, gain: Sample) -> &mut Self {
        self.gain = gain;
        self
    }

    /// Route diagnostic events to `sink`.
    pub fn set_sink(&mut self, sink: Arc<dyn EventSink>) -> &mut Self {
        self.sink = sink;
        self
    }

    /// Return the feedforward taps as currently stored.
    ///
    /// After initialization these are the normalized values.
    pub fn feedforward(&self) -> &[Sample] {
        &self.b
    }

    /// Return the feedback taps as currently stored.
    pub fn feedback(&self) -> &[Sample] {
        &self.a
    }

    /// Return the input gain.
    pub fn gain(&self) -> Sample {
        self.gain
    }
}

impl Module for Biquad {
    fn name(&self) -> &'static str {
        NAME
    }

    /// Normalize the taps, zero the delay line, and allocate the output
    /// bank shaped (1 ear, input channels, input samples) at the input's
    /// rates.
    ///
    /// Fails with [`ConfigError::TapCount`] unless both tap arrays hold
    /// exactly 3 values.
    fn initialize(&mut self, input: &SignalBank) -> ConfigResult<()> {
        if self.b.len() != TAPS || self.a.len() != TAPS {
            let error = ConfigError::TapCount {
                expected: TAPS,
                feedforward: self.b.len(),
                feedback: self.a.len(),
            };
            self.sink.emit(NAME, ModuleEvent::Fatal(error.clone()));
            return Err(error);
        }

        // Divide both arrays by the leading feedback tap. The stored a0
        // becomes 1, which also makes repeated initialization a no-op on
        // the taps.
        let a0 = self.a[0];
        for tap in self.b.iter_mut().chain(self.a.iter_mut()) {
            *tap /= a0;
        }

        self.state = [0.0; 2 * ORDER];

        let mut output =
            SignalBank::new(1, input.channels(), input.samples(), input.sample_rate());
        output.set_frame_rate(input.frame_rate());
        self.output = Some(output);
        Ok(())
    }

    /// Filter ear 0, channel 0 of `input` into channel 0 of the output.
    ///
    /// Samples are processed strictly in order and the delay line carries
    /// over to the next call. The processed length is the shorter of the
    /// input and output blocks. Without a successful
    /// [`initialize`](Module::initialize) this is a no-op.
    fn process(&mut self, input: &SignalBank) {
        let Some(output) = self.output.as_mut() else {
            return;
        };
        let Some(src) = input.channel_data(0, 0) else {
            return;
        };
        let Some(dst) = output.channel_data_mut(0, 0) else {
            return;
        };
        let Ok([b0, b1, b2]) = <[Sample; TAPS]>::try_from(self.b.as_slice()) else {
            return;
        };
        let Ok([_, a1, a2]) = <[Sample; TAPS]>::try_from(self.a.as_slice()) else {
            return;
        };

        let gain = self.gain;
        let [mut x1, mut x2, mut y1, mut y2] = self.state;

        for (out, &inp) in dst.iter_mut().zip(src.iter()) {
            let x = inp * gain;
            let y = b0 * x + b1 * x1 + b2 * x2 - a1 * y1 - a2 * y2;
            x2 = x1;
            x1 = x;
            y2 = y1;
            y1 = y;
            *out = y;
        }

        self.state = [x1, x2, y1, y2];
    }

    /// Zero the four delay-line cells. Taps, gain, and the output bank
    /// are untouched.
    fn reset(&mut self) {
        self.state = [0.0; 2 * ORDER];
    }

    fn output(&self) -> Option<&SignalBank> {
        self.output.as_ref()
    }
}
