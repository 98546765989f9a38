// src/demo.rs
// Synthetic ECG-like recording shown before any analysis has been loaded.
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::config::DemoConfig;
use crate::viewer::palette::BeatClass;
use crate::viewer::{Recording, ViewerError};

const BEAT_INTERVAL_SECS: f32 = 0.8;

struct Wave {
    offset_secs: f32,
    width_secs: f32,
    amplitude: f32,
}

fn beat_waves(class: BeatClass) -> [Wave; 5] {
    let (r_amp, r_width) = match class {
        BeatClass::V => (1.6, 0.03),
        BeatClass::F => (1.3, 0.02),
        _ => (1.2, 0.012),
    };
    [
        // P
        Wave {
            offset_secs: -0.2,
            width_secs: 0.025,
            amplitude: 0.15,
        },
        // Q
        Wave {
            offset_secs: -0.03,
            width_secs: 0.01,
            amplitude: -0.12,
        },
        // R
        Wave {
            offset_secs: 0.0,
            width_secs: r_width,
            amplitude: r_amp,
        },
        // S
        Wave {
            offset_secs: 0.03,
            width_secs: 0.01,
            amplitude: -0.25,
        },
        // T
        Wave {
            offset_secs: 0.25,
            width_secs: 0.05,
            amplitude: 0.3,
        },
    ]
}

fn class_of_beat(n: usize) -> BeatClass {
    match n {
        n if n % 23 == 22 => BeatClass::F,
        n if n % 11 == 10 => BeatClass::S,
        n if n % 7 == 6 => BeatClass::V,
        n if n % 31 == 30 => BeatClass::Q,
        _ => BeatClass::N,
    }
}

/// Deterministic for a given config.
pub fn synthetic_recording(config: &DemoConfig) -> Result<Recording, ViewerError> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let rate = config.sample_rate_hz.max(1.0);
    let len = config.samples;
    let reach = (0.4 * rate) as isize;

    let mut signal: Vec<f32> = (0..len)
        .map(|i| {
            let t = i as f32 / rate;
            0.1 * (2.0 * std::f32::consts::PI * 0.3 * t).sin() + rng.gen_range(-0.02..0.02)
        })
        .collect();

    let mut peaks = Vec::new();
    let mut annotations = Vec::new();
    let mut predictions = Vec::new();
    let mut center = (0.5 * rate) as usize;
    let mut beat = 0;
    while center < len {
        let class = class_of_beat(beat);
        for wave in beat_waves(class) {
            let mid = center as f32 + wave.offset_secs * rate;
            let sigma = wave.width_secs * rate;
            let from = (mid as isize - reach).max(0) as usize;
            let to = ((mid as isize + reach).max(0) as usize).min(len);
            for (i, sample) in signal.iter_mut().enumerate().take(to).skip(from) {
                let d = (i as f32 - mid) / sigma;
                *sample += wave.amplitude * (-0.5 * d * d).exp();
            }
        }
        peaks.push(center);
        annotations.push(class.tag().to_string());
        let predicted = if rng.gen_bool(0.1) {
            BeatClass::ALL[rng.gen_range(0..BeatClass::ALL.len())]
        } else {
            class
        };
        predictions.push(predicted.tag().to_string());

        let jitter = rng.gen_range(-0.05..0.05);
        center += ((BEAT_INTERVAL_SECS + jitter) * rate).max(1.0) as usize;
        beat += 1;
    }
    Recording::new(signal, peaks, annotations, predictions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_recording() {
        let config = DemoConfig::default();
        assert_eq!(
            synthetic_recording(&config).unwrap(),
            synthetic_recording(&config).unwrap()
        );
    }

    #[test]
    fn peaks_and_labels_line_up() {
        let rec = synthetic_recording(&DemoConfig::default()).unwrap();
        assert_eq!(rec.len(), 10_000);
        assert!(rec.peaks().len() > 20);
        assert_eq!(rec.annotations().len(), rec.peaks().len());
        assert_eq!(rec.predictions().len(), rec.peaks().len());
        assert!(rec.annotations().iter().any(|c| c == "V"));
    }

    #[test]
    fn r_waves_are_local_maxima() {
        let rec = synthetic_recording(&DemoConfig::default()).unwrap();
        let signal = rec.signal();
        for &peak in rec.peaks() {
            if peak == 0 || peak + 1 >= signal.len() {
                continue;
            }
            assert!(signal[peak] > signal[peak - 5]);
            assert!(signal[peak] > signal[peak + 5]);
        }
    }

    #[test]
    fn empty_demo_is_valid() {
        let config = DemoConfig {
            samples: 0,
            ..DemoConfig::default()
        };
        assert!(synthetic_recording(&config).unwrap().is_empty());
    }
}
