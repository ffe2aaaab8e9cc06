use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Oscillator shapes, in the order of their legacy numeric codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

impl Waveform {
    pub const ALL: [Waveform; 4] = [
        Waveform::Sine,
        Waveform::Square,
        Waveform::Sawtooth,
        Waveform::Triangle,
    ];

    pub fn code(self) -> u8 {
        match self {
            Waveform::Sine => 0,
            Waveform::Square => 1,
            Waveform::Sawtooth => 2,
            Waveform::Triangle => 3,
        }
    }

    pub fn from_code(code: u8) -> Option<Waveform> {
        Waveform::ALL.get(code as usize).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            Waveform::Sine => "sine",
            Waveform::Square => "square",
            Waveform::Sawtooth => "sawtooth",
            Waveform::Triangle => "triangle",
        }
    }

    /// One cycle of the shape, `phase` in `[0, 1)`, output in `[-1, 1]`.
    pub fn sample(self, phase: f32) -> f32 {
        match self {
            Waveform::Sine => (phase * std::f32::consts::TAU).sin(),
            Waveform::Square => {
                if phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Sawtooth => 2.0 * phase - 1.0,
            Waveform::Triangle => 1.0 - 4.0 * (phase - 0.5).abs(),
        }
    }
}

impl Default for Waveform {
    fn default() -> Self {
        Waveform::Sine
    }
}

impl fmt::Display for Waveform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Waveform {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Waveform::ALL
            .iter()
            .copied()
            .find(|w| w.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| anyhow::anyhow!("unknown oscillator type '{}'", s))
    }
}

/// How a waveform is identified when it is handed to the oscillator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WaveformId {
    /// Legacy numeric encoding (0 sine, 1 square, 2 sawtooth, 3 triangle).
    Code(u8),
    Name(String),
}

impl WaveformId {
    pub fn resolve(&self) -> Option<Waveform> {
        match self {
            WaveformId::Code(code) => Waveform::from_code(*code),
            WaveformId::Name(name) => name.parse().ok(),
        }
    }
}

impl From<Waveform> for WaveformId {
    fn from(waveform: Waveform) -> Self {
        WaveformId::Name(waveform.name().to_string())
    }
}

impl fmt::Display for WaveformId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WaveformId::Code(code) => write!(f, "#{}", code),
            WaveformId::Name(name) => write!(f, "'{}'", name),
        }
    }
}
