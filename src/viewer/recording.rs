use crate::viewer::ViewerError;

/// Signal, peak set and the two label streams, loaded and replaced together.
///
/// Peaks are checked against the signal on construction. The label streams are
/// trusted to be aligned with the peaks; renderers only use bounds-checked lookups.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Recording {
    signal: Vec<f32>,
    peaks: Vec<usize>,
    annotations: Vec<String>,
    predictions: Vec<String>,
}

impl Recording {
    pub fn new(
        signal: Vec<f32>,
        peaks: Vec<usize>,
        annotations: Vec<String>,
        predictions: Vec<String>,
    ) -> Result<Self, ViewerError> {
        for (position, pair) in peaks.windows(2).enumerate() {
            if pair[1] <= pair[0] {
                return Err(ViewerError::PeaksNotIncreasing {
                    position: position + 1,
                    previous: pair[0],
                    index: pair[1],
                });
            }
        }
        if let Some((position, &index)) = peaks
            .iter()
            .enumerate()
            .find(|&(_, &index)| index >= signal.len())
        {
            return Err(ViewerError::PeakOutOfRange {
                position,
                index,
                len: signal.len(),
            });
        }
        Ok(Self {
            signal,
            peaks,
            annotations,
            predictions,
        })
    }

    pub fn signal(&self) -> &[f32] {
        &self.signal
    }

    pub fn peaks(&self) -> &[usize] {
        &self.peaks
    }

    pub fn annotations(&self) -> &[String] {
        &self.annotations
    }

    pub fn predictions(&self) -> &[String] {
        &self.predictions
    }

    pub fn len(&self) -> usize {
        self.signal.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signal.is_empty()
    }

    /// One line per predicted peak, numbered from 1.
    pub fn prediction_lines(&self) -> Vec<String> {
        self.predictions
            .iter()
            .enumerate()
            .map(|(i, class)| format!("Peak {}: {}", i + 1, class))
            .collect()
    }
}
