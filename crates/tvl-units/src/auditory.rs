// SPDX-License-Identifier: LGPL-3.0-or-later

//! Auditory frequency scale conversions.
//!
//! The model spaces its filterbank channels uniformly on the Cam scale
//! (ERB-rate), where one Cam spans one equivalent rectangular bandwidth
//! of the auditory filter at that frequency:
//!
//! ```text
//! cam(f) = 21.4 * log10(1 + 4.37 * f / 1000)    f in Hz
//! ```

/// Convert a frequency in Hz to its position on the Cam (ERB-rate) scale.
///
/// # Examples
/// ```
/// use tvl_units::auditory::hz_to_cam;
///
/// assert_eq!(hz_to_cam(0.0), 0.0);
/// assert!((hz_to_cam(1000.0) - 15.6214).abs() < 1e-3);
/// ```
pub fn hz_to_cam(freq: f64) -> f64 {
    21.4 * (1.0 + 4.37 * freq / 1000.0).log10()
}

/// Convert a position on the Cam scale back to frequency in Hz.
///
/// Inverse of [`hz_to_cam`].
pub fn cam_to_hz(cam: f64) -> f64 {
    (10.0_f64.powf(cam / 21.4) - 1.0) * 1000.0 / 4.37
}

/// Generate `count` centre frequencies spaced `step_cams` apart on the
/// Cam scale, starting at `first_hz`.
///
/// # Arguments
/// * `first_hz` - Centre frequency of the first channel in Hz
/// * `step_cams` - Channel spacing in Cams
/// * `count` - Number of channels
pub fn cam_space(first_hz: f64, step_cams: f64, count: usize) -> Vec<f64> {
    let first_cam = hz_to_cam(first_hz);
    (0..count)
        .map(|i| cam_to_hz(first_cam + i as f64 * step_cams))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_hz_to_cam_reference_points() {
        assert_eq!(hz_to_cam(0.0), 0.0);
        // 21.4 * log10(1 + 4.37)
        assert_relative_eq!(hz_to_cam(1000.0), 15.62141, max_relative = 1e-5);
        assert!(hz_to_cam(50.0) < hz_to_cam(100.0), "scale must be monotonic");
    }

    #[test]
    fn test_round_trip() {
        for freq in [20.0, 50.0, 250.0, 1000.0, 4000.0, 16000.0] {
            assert_relative_eq!(cam_to_hz(hz_to_cam(freq)), freq, max_relative = 1e-12);
        }
        assert_relative_eq!(hz_to_cam(cam_to_hz(10.0)), 10.0, max_relative = 1e-12);
    }

    #[test]
    fn test_cam_space_uniform_spacing() {
        let freqs = cam_space(50.0, 0.25, 40);
        assert_eq!(freqs.len(), 40);
        assert_relative_eq!(freqs[0], 50.0, max_relative = 1e-12);

        for pair in freqs.windows(2) {
            let step = hz_to_cam(pair[1]) - hz_to_cam(pair[0]);
            assert_relative_eq!(step, 0.25, max_relative = 1e-9);
            assert!(pair[1] > pair[0], "frequencies must increase");
        }
    }

    #[test]
    fn test_cam_space_empty() {
        assert!(cam_space(50.0, 0.25, 0).is_empty());
    }
}
