// SPDX-License-Identifier: LGPL-3.0-or-later

//! Signal-bank storage.
//!
//! Provides the block container passed between processing stages. A bank
//! holds `ears * channels * samples` values in one owned contiguous buffer
//! together with the metadata downstream stages need: the audio sample
//! rate, the frame rate at which blocks arrive, and one centre frequency
//! per channel.

/// Sample value type used throughout the model.
pub type Sample = f64;

/// Block of samples addressed by (ear, channel, sample).
///
/// Storage is row-major with the sample index fastest:
///
/// ```text
/// index(ear, channel, sample) = (ear * channels + channel) * samples + sample
/// ```
///
/// The frame rate defaults to the sample rate and is overridden by
/// frame-based producers that emit one sample per analysis frame.
/// Centre frequencies default to zero.
///
/// # Examples
/// ```
/// use tvl_signal::SignalBank;
///
/// let mut bank = SignalBank::new(2, 3, 4, 48000.0);
/// bank.set_sample(1, 2, 3, 0.5);
/// assert_eq!(bank.ears(), 2);
/// assert_eq!(bank.channels(), 3);
/// assert_eq!(bank.samples(), 4);
/// assert_eq!(bank.sample(1, 2, 3), 0.5);
/// assert_eq!(bank.frame_rate(), 48000.0);
/// ```
#[derive(Debug, Clone)]
pub struct SignalBank {
    ears: usize,
    channels: usize,
    samples: usize,
    /// Audio sample rate in Hz.
    sample_rate: f64,
    /// Rate at which frames update, in Hz.
    frame_rate: f64,
    /// Centre frequency per channel, in Hz.
    centre_freqs: Vec<f64>,
    /// Contiguous sample storage.
    data: Vec<Sample>,
}

impl SignalBank {
    /// Create a zeroed bank with the given shape.
    ///
    /// # Arguments
    /// * `ears` - Number of ears (outermost axis)
    /// * `channels` - Number of channels per ear
    /// * `samples` - Number of samples per channel
    /// * `sample_rate` - Audio sample rate in Hz
    pub fn new(ears: usize, channels: usize, samples: usize, sample_rate: f64) -> Self {
        Self {
            ears,
            channels,
            samples,
            sample_rate,
            frame_rate: sample_rate,
            centre_freqs: vec![0.0; channels],
            data: vec![0.0; ears * channels * samples],
        }
    }

    /// Return the number of ears.
    pub fn ears(&self) -> usize {
        self.ears
    }

    /// Return the number of channels per ear.
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Return the number of samples per channel.
    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Return the audio sample rate in Hz.
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Return the frame rate in Hz.
    pub fn frame_rate(&self) -> f64 {
        self.frame_rate
    }

    /// Set the frame rate in Hz.
    pub fn set_frame_rate(&mut self, frame_rate: f64) {
        self.frame_rate = frame_rate;
    }

    /// Return the centre frequency of a channel in Hz.
    ///
    /// Panics if the channel index is out of range.
    pub fn centre_freq(&self, channel: usize) -> f64 {
        self.centre_freqs[channel]
    }

    /// Set the centre frequency of a channel in Hz.
    ///
    /// Panics if the channel index is out of range.
    pub fn set_centre_freq(&mut self, channel: usize, freq: f64) {
        self.centre_freqs[channel] = freq;
    }

    /// Copy centre frequencies from a slice.
    ///
    /// If the lengths differ, only the overlapping prefix is copied.
    pub fn set_centre_freqs(&mut self, freqs: &[f64]) {
        let len = freqs.len().min(self.centre_freqs.len());
        self.centre_freqs[..len].copy_from_slice(&freqs[..len]);
    }

    /// Read one sample.
    ///
    /// Panics if any index is out of range.
    pub fn sample(&self, ear: usize, channel: usize, sample: usize) -> Sample {
        assert!(ear < self.ears, "ear index {} out of range ({} ears)", ear, self.ears);
        assert!(
            channel < self.channels,
            "channel index {} out of range ({} channels)",
            channel,
            self.channels
        );
        assert!(
            sample < self.samples,
            "sample index {} out of range ({} samples)",
            sample,
            self.samples
        );
        self.data[(ear * self.channels + channel) * self.samples + sample]
    }

    /// Write one sample.
    ///
    /// Panics if any index is out of range.
    pub fn set_sample(&mut self, ear: usize, channel: usize, sample: usize, value: Sample) {
        assert!(ear < self.ears, "ear index {} out of range ({} ears)", ear, self.ears);
        assert!(
            channel < self.channels,
            "channel index {} out of range ({} channels)",
            channel,
            self.channels
        );
        assert!(
            sample < self.samples,
            "sample index {} out of range ({} samples)",
            sample,
            self.samples
        );
        self.data[(ear * self.channels + channel) * self.samples + sample] = value;
    }

    /// Return a reference to the samples of one (ear, channel) signal.
    ///
    /// Returns `None` if either index is out of bounds.
    ///
    /// # Arguments
    /// * `ear` - Ear index (0-based)
    /// * `channel` - Channel index (0-based)
    pub fn channel_data(&self, ear: usize, channel: usize) -> Option<&[Sample]> {
        if ear >= self.ears || channel >= self.channels {
            return None;
        }
        let off = (ear * self.channels + channel) * self.samples;
        Some(&self.data[off..off + self.samples])
    }

    /// Return a mutable reference to the samples of one (ear, channel) signal.
    ///
    /// Returns `None` if either index is out of bounds.
    pub fn channel_data_mut(&mut self, ear: usize, channel: usize) -> Option<&mut [Sample]> {
        if ear >= self.ears || channel >= self.channels {
            return None;
        }
        let off = (ear * self.channels + channel) * self.samples;
        Some(&mut self.data[off..off + self.samples])
    }

    /// Zero every sample, leaving shape and metadata untouched.
    pub fn zero(&mut self) {
        self.data.fill(0.0);
    }
}
