use super::param::{AudioParam, Automation};
use super::render::{Command, ParamId, DEFAULT_FREQUENCY};
use super::waveform::{Waveform, WaveformId};
use crate::capabilities::WaveformEncoding;
use crate::console::console_warn;

/// The audio output collaborator, seen from the UI thread.
pub trait Backend {
    /// Seconds on the audio clock.
    fn current_time(&self) -> f64;

    fn send(&mut self, command: Command) -> anyhow::Result<()>;

    /// Sound-on. Browsers only let this through inside a user gesture.
    fn resume(&mut self) -> anyhow::Result<()>;

    fn waveform_encoding(&self) -> WaveformEncoding;
}

/// UI-side handle of the oscillator → gain → output graph.
///
/// Keeps a mirror of both parameter timelines so the current value of a
/// parameter can be read without asking the audio thread.
pub struct AudioGraph<B> {
    backend: B,
    encoding: WaveformEncoding,
    gain: AudioParam,
    frequency: AudioParam,
    waveform: Waveform,
}

impl<B: Backend> AudioGraph<B> {
    pub fn new(backend: B, encoding: WaveformEncoding) -> Self {
        Self {
            backend,
            encoding,
            gain: AudioParam::new(0.0),
            frequency: AudioParam::new(DEFAULT_FREQUENCY),
            waveform: Waveform::default(),
        }
    }

    pub fn now(&self) -> f64 {
        self.backend.current_time()
    }

    pub fn resume(&mut self) {
        if let Err(err) = self.backend.resume() {
            console_warn!("could not resume audio output: {}", err);
        }
    }

    #[cfg(test)]
    pub fn param(&self, id: ParamId) -> &AudioParam {
        match id {
            ParamId::Gain => &self.gain,
            ParamId::Frequency => &self.frequency,
        }
    }

    fn param_mut(&mut self, id: ParamId) -> &mut AudioParam {
        match id {
            ParamId::Gain => &mut self.gain,
            ParamId::Frequency => &mut self.frequency,
        }
    }

    pub fn automate(&mut self, id: ParamId, automation: Automation) {
        self.param_mut(id).apply(automation);
        if let Err(err) = self.backend.send(Command::Automate(id, automation)) {
            console_warn!("dropped {:?} automation: {}", id, err);
        }
    }

    /// Cancel whatever is scheduled on `id`, hold its current value, then ramp
    /// linearly to `target` over `duration` seconds. Returns the ramp's end time.
    pub fn ramp_to(&mut self, id: ParamId, target: f32, duration: f64) -> f64 {
        let now = self.now();
        let param = self.param_mut(id);
        param.prune(now);
        let current = param.value_at(now);

        self.automate(id, Automation::Cancel { from: now });
        self.automate(id, Automation::SetValue { value: current, at: now });
        self.automate(id, Automation::LinearRamp { value: target, end: now + duration });
        now + duration
    }

    /// Swap the oscillator shape in one command. An identifier in the
    /// encoding the platform rejects is retried in the other encoding.
    pub fn set_waveform(&mut self, id: WaveformId) -> anyhow::Result<Waveform> {
        let waveform = match self.encoding.assign(&id) {
            Ok(waveform) => waveform,
            Err(rejected) => {
                let fallback = id
                    .resolve()
                    .map(|w| self.encoding.identify(w))
                    .ok_or(rejected)?;
                self.encoding.assign(&fallback)?
            }
        };

        self.backend.send(Command::Rewire(waveform))?;
        self.waveform = waveform;
        Ok(waveform)
    }

    pub fn waveform(&self) -> Waveform {
        self.waveform
    }

    #[cfg(test)]
    pub fn backend(&self) -> &B {
        &self.backend
    }
}


#[cfg(test)]
mod tests {
    use super::testing::RecordingBackend;
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use pretty_assertions::assert_eq;

    fn graph(encoding: WaveformEncoding) -> AudioGraph<RecordingBackend> {
        AudioGraph::new(RecordingBackend::new(encoding), encoding)
    }

    #[test]
    fn ramp_snapshots_current_value_and_forwards_commands() {
        let mut g = graph(WaveformEncoding::Standard);
        g.backend().clock.set(1.0);
        let end = g.ramp_to(ParamId::Gain, 0.2, 0.1);
        assert_approx_eq!(end, 1.1);

        assert_eq!(
            g.backend().sent,
            vec![
                Command::Automate(ParamId::Gain, Automation::Cancel { from: 1.0 }),
                Command::Automate(ParamId::Gain, Automation::SetValue { value: 0.0, at: 1.0 }),
                Command::Automate(ParamId::Gain, Automation::LinearRamp { value: 0.2, end: 1.1 }),
            ]
        );
        assert_approx_eq!(g.param(ParamId::Gain).value_at(1.05), 0.1);
    }

    #[test]
    fn second_ramp_starts_where_the_first_one_is() {
        let mut g = graph(WaveformEncoding::Standard);
        g.ramp_to(ParamId::Frequency, 1440.0, 1.0);
        g.backend().clock.set(0.5);
        g.ramp_to(ParamId::Frequency, 440.0, 0.5);

        let freq = g.param(ParamId::Frequency);
        assert_approx_eq!(freq.value_at(0.5), 940.0);
        assert_approx_eq!(freq.value_at(1.0), 440.0);
        assert_eq!(freq.final_value(), 440.0);
    }

    #[test]
    fn legacy_code_falls_back_to_name_on_standard_platform() {
        let mut g = graph(WaveformEncoding::Standard);
        let waveform = g.set_waveform(WaveformId::Code(3)).unwrap();
        assert_eq!(waveform, Waveform::Triangle);
        assert_eq!(g.waveform(), Waveform::Triangle);
        assert_eq!(g.backend().sent, vec![Command::Rewire(Waveform::Triangle)]);
    }

    #[test]
    fn name_falls_back_to_code_on_legacy_platform() {
        let mut g = graph(WaveformEncoding::Legacy);
        let waveform = g.set_waveform(WaveformId::Name("square".into())).unwrap();
        assert_eq!(waveform, Waveform::Square);
    }

    #[test]
    fn unknown_code_leaves_waveform_alone() {
        let mut g = graph(WaveformEncoding::Standard);
        assert!(g.set_waveform(WaveformId::Code(42)).is_err());
        assert_eq!(g.waveform(), Waveform::Sine);
        assert!(g.backend().sent.is_empty());
    }
}
