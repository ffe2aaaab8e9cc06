use super::param::{AudioParam, Automation};
use super::waveform::Waveform;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Oscillator frequency before anything is scheduled.
pub const DEFAULT_FREQUENCY: f32 = 440.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamId {
    Gain,
    Frequency,
}

/// Messages from the UI thread to the audio thread.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Automate(ParamId, Automation),
    /// Swap the oscillator shape. Applied between two samples, so no sample
    /// mixes the old and new shape; the phase carries over.
    Rewire(Waveform),
}

/// Oscillator → gain → output, rendered one frame at a time.
pub struct Voice {
    sample_rate: f32,
    phase: f32,
    waveform: Waveform,
    frequency: AudioParam,
    gain: AudioParam,
    frames: Arc<AtomicU64>,
}

impl Voice {
    pub fn new(sample_rate: f32, frequency: f32, frames: Arc<AtomicU64>) -> Self {
        Self {
            sample_rate,
            phase: 0.0,
            waveform: Waveform::default(),
            frequency: AudioParam::new(frequency),
            gain: AudioParam::new(0.0),
            frames,
        }
    }

    pub fn handle(&mut self, command: Command) {
        match command {
            Command::Automate(ParamId::Gain, automation) => self.gain.apply(automation),
            Command::Automate(ParamId::Frequency, automation) => self.frequency.apply(automation),
            Command::Rewire(waveform) => self.waveform = waveform,
        }
    }

    pub fn now(&self) -> f64 {
        self.frames.load(Ordering::Acquire) as f64 / self.sample_rate as f64
    }

    pub fn next_sample(&mut self) -> f32 {
        let frame = self.frames.fetch_add(1, Ordering::AcqRel);
        let t = frame as f64 / self.sample_rate as f64;

        let freq = self.frequency.value_at(t);
        let out = self.waveform.sample(self.phase) * self.gain.value_at(t);

        self.phase = (self.phase + freq / self.sample_rate).fract();
        out
    }

    /// Called once per output buffer so the timelines stay short.
    pub fn end_block(&mut self) {
        let now = self.now();
        self.gain.prune(now);
        self.frequency.prune(now);
    }

    #[cfg(test)]
    pub fn waveform(&self) -> Waveform {
        self.waveform
    }
}
