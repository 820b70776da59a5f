//! Energy-flux onset detection
//!
//! Detects instants where a new musical/percussive event begins in a mono
//! waveform. The detector computes a windowed RMS energy envelope, takes the
//! rectified frame-to-frame energy rise as onset strength, and peak-picks
//! against an adaptive threshold with a minimum inter-onset gap. Each peak is
//! then backtracked to the preceding local minimum of the envelope so the
//! reported instant is the start of the energy rise, not its crest.

/// Onset detector over mono f32 PCM
pub struct OnsetDetector {
    /// RMS window size in samples
    window_size: usize,

    /// Hop between consecutive analysis frames in samples
    hop_size: usize,

    /// Minimum spacing between reported onsets in seconds
    min_gap_seconds: f32,

    /// Frames on each side used for the adaptive threshold mean
    threshold_span: usize,

    /// Offset added to the local strength mean
    threshold_delta: f32,

    /// Absolute strength floor below which peaks are ignored
    strength_floor: f32,
}

impl OnsetDetector {
    /// Create a detector with defaults (1024-sample window, 512 hop, 50ms gap)
    pub fn new() -> Self {
        Self {
            window_size: 1024,
            hop_size: 512,
            min_gap_seconds: 0.05,
            threshold_span: 16,
            threshold_delta: 0.05,
            strength_floor: 0.02,
        }
    }

    /// Set the minimum inter-onset gap
    pub fn with_min_gap(mut self, min_gap_seconds: f32) -> Self {
        self.min_gap_seconds = min_gap_seconds;
        self
    }

    /// Detect onsets, returning instants in seconds in ascending order.
    ///
    /// A signal shorter than one analysis window, or containing no energy at
    /// all, yields no onsets.
    pub fn detect(&self, samples: &[f32], sample_rate: u32) -> Vec<f64> {
        let envelope = self.energy_envelope(samples);
        if envelope.len() < 3 {
            return Vec::new();
        }

        let max_energy = envelope.iter().cloned().fold(0.0f32, f32::max);
        if max_energy <= 1e-6 {
            // Silence
            return Vec::new();
        }

        // Rectified, normalized energy rise per frame
        let mut strength = vec![0.0f32; envelope.len()];
        for i in 1..envelope.len() {
            strength[i] = ((envelope[i] - envelope[i - 1]) / max_energy).max(0.0);
        }

        let peaks = self.pick_peaks(&strength, sample_rate);

        // Backtrack each peak to the preceding envelope minimum, then convert
        // frames to seconds. Backtracking can collapse neighboring peaks onto
        // the same minimum; keep only strictly ascending instants.
        let mut onsets = Vec::with_capacity(peaks.len());
        let mut last_time = f64::NEG_INFINITY;
        for peak in peaks {
            let mut frame = peak;
            while frame > 0 && envelope[frame - 1] < envelope[frame] {
                frame -= 1;
            }

            let time = self.frame_to_seconds(frame, sample_rate);
            if time > last_time {
                onsets.push(time);
                last_time = time;
            }
        }

        tracing::debug!(
            frames = envelope.len(),
            onsets = onsets.len(),
            "Onset detection complete"
        );

        onsets
    }

    /// Windowed RMS energy envelope
    fn energy_envelope(&self, samples: &[f32]) -> Vec<f32> {
        if samples.len() < self.window_size {
            return Vec::new();
        }

        let frame_count = (samples.len() - self.window_size) / self.hop_size + 1;
        let mut envelope = Vec::with_capacity(frame_count);

        for i in 0..frame_count {
            let start = i * self.hop_size;
            let window = &samples[start..start + self.window_size];
            let sum_squares: f32 = window.iter().map(|&s| s * s).sum();
            envelope.push((sum_squares / self.window_size as f32).sqrt());
        }

        envelope
    }

    /// Local maxima above the adaptive threshold, spaced by the minimum gap
    fn pick_peaks(&self, strength: &[f32], sample_rate: u32) -> Vec<usize> {
        let min_gap_frames =
            ((self.min_gap_seconds * sample_rate as f32) / self.hop_size as f32).ceil() as usize;

        let mut peaks = Vec::new();
        let mut last_peak: Option<usize> = None;

        for i in 1..strength.len() - 1 {
            if strength[i] <= strength[i - 1] || strength[i] < strength[i + 1] {
                continue;
            }
            if strength[i] < self.adaptive_threshold(strength, i) {
                continue;
            }
            if let Some(last) = last_peak {
                if i - last < min_gap_frames.max(1) {
                    continue;
                }
            }
            peaks.push(i);
            last_peak = Some(i);
        }

        peaks
    }

    /// Local mean plus delta, clamped to the absolute floor
    fn adaptive_threshold(&self, strength: &[f32], index: usize) -> f32 {
        let lo = index.saturating_sub(self.threshold_span);
        let hi = (index + self.threshold_span + 1).min(strength.len());
        let mean: f32 = strength[lo..hi].iter().sum::<f32>() / (hi - lo) as f32;
        (mean + self.threshold_delta).max(self.strength_floor)
    }

    fn frame_to_seconds(&self, frame: usize, sample_rate: u32) -> f64 {
        (frame * self.hop_size) as f64 / sample_rate as f64
    }
}

impl Default for OnsetDetector {
    fn default() -> Self {
        Self::new()
    }
}
