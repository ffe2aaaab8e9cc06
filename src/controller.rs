use crate::audio::graph::{AudioGraph, Backend};
use crate::audio::render::ParamId;
use crate::audio::waveform::{Waveform, WaveformId};
use crate::capabilities::Capabilities;
use crate::config::{EnvelopeConfig, WARMUP_SECS};
use crate::console::{console_log, console_warn};
use crate::input::{ContactEvent, InputMode, Phase};
use crate::mapping::{Screen, Target};
use crate::motion::{Motion, Prop, Sprite};
use crate::pos::Pos;

/// Whether any contact is down. `Engaged` owns the move/end(/cancel)
/// subscription; `Idle` only hears starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contacts {
    Idle,
    Engaged {
        active: u32,
        listening: &'static [Phase],
    },
}

/// The two sprites mirroring the sound: `amp` slides horizontally with
/// amplitude, `pitch` slides vertically with frequency.
#[derive(Debug, Clone, PartialEq)]
pub struct Indicators {
    pub amp: Sprite,
    pub pitch: Sprite,
}

impl Default for Indicators {
    fn default() -> Self {
        Self {
            amp: Sprite::new(0.0, 0.0, true),
            pitch: Sprite::new(0.0, 0.0, false),
        }
    }
}

pub struct Theremin<B> {
    graph: AudioGraph<B>,
    envelope: EnvelopeConfig,
    screen: Screen,
    input: InputMode,
    contacts: Contacts,
    indicators: Indicators,
    warmup_release: Option<f64>,
}

impl<B: Backend> Theremin<B> {
    pub fn new(
        graph: AudioGraph<B>,
        caps: Capabilities,
        envelope: EnvelopeConfig,
        screen: Screen,
    ) -> Self {
        Self {
            graph,
            envelope,
            screen,
            input: caps.input,
            contacts: Contacts::Idle,
            indicators: Indicators::default(),
            warmup_release: None,
        }
    }

    /// Synthetic start at the amplitude indicator's origin, released
    /// [`WARMUP_SECS`] later by [`Theremin::update`].
    pub fn warm_up(&mut self, ui_now: f64) {
        let origin = Pos::new(self.indicators.amp.left, self.indicators.amp.top);
        self.start(origin, ui_now);
        self.warmup_release = Some(ui_now + WARMUP_SECS);
        console_log!("warming up audio output");
    }

    pub fn listens(&self, phase: Phase) -> bool {
        match (phase, self.contacts) {
            (Phase::Start, _) => true,
            (_, Contacts::Idle) => false,
            (_, Contacts::Engaged { listening, .. }) => listening.contains(&phase),
        }
    }

    /// Route a contact event to its handler if something is listening for it.
    pub fn handle(&mut self, event: ContactEvent, ui_now: f64) {
        if !self.listens(event.phase) {
            return;
        }
        match event.phase {
            Phase::Start => self.start(event.pos, ui_now),
            Phase::Move => self.move_to(event.pos, ui_now),
            Phase::End | Phase::Cancel => self.stop(ui_now),
        }
    }

    /// Ramp towards the sound for `pos` and move the indicators there.
    pub fn play(&mut self, pos: Pos, ui_now: f64) -> Target {
        let pos = self.screen.clamp(pos);
        let target = self.screen.map(pos, &self.envelope);
        let EnvelopeConfig { attack, glide, .. } = self.envelope;

        self.graph.ramp_to(ParamId::Gain, target.gain, attack);
        self.graph.ramp_to(ParamId::Frequency, target.frequency, glide);

        self.indicators.amp.animate(
            Motion::new()
                .set(Prop::Top, pos.y)
                .then(Motion::new().set(Prop::Left, pos.x).duration(attack)),
            ui_now,
        );
        self.indicators.pitch.visible = true;
        self.indicators.pitch.animate(
            Motion::new()
                .set(Prop::Left, pos.x)
                .then(Motion::new().set(Prop::Top, pos.y).duration(glide)),
            ui_now,
        );

        target
    }

    pub fn start(&mut self, pos: Pos, ui_now: f64) {
        self.contacts = match self.contacts {
            Contacts::Idle => Contacts::Engaged {
                active: 1,
                listening: self.input.contact_phases(),
            },
            Contacts::Engaged { active, listening } => Contacts::Engaged {
                active: active + 1,
                listening,
            },
        };
        self.graph.resume();
        self.play(pos, ui_now);
    }

    pub fn move_to(&mut self, pos: Pos, ui_now: f64) {
        if self.active_contacts() > 0 {
            self.play(pos, ui_now);
        }
    }

    /// Release one contact. The sound decays once the last one is gone.
    pub fn stop(&mut self, ui_now: f64) {
        match self.contacts {
            Contacts::Idle => return,
            Contacts::Engaged { active, listening } if active > 1 => {
                self.contacts = Contacts::Engaged {
                    active: active - 1,
                    listening,
                };
                return;
            }
            Contacts::Engaged { .. } => self.contacts = Contacts::Idle,
        }

        let decay = self.envelope.decay;
        self.graph.ramp_to(ParamId::Gain, 0.0, decay);
        self.indicators
            .amp
            .animate(Motion::new().set(Prop::Left, 0.0).duration(decay), ui_now);
        self.indicators.pitch.visible = false;
    }

    /// Advance indicator motions and release the warm-up contact when due.
    pub fn update(&mut self, ui_now: f64) {
        if let Some(at) = self.warmup_release {
            if ui_now >= at {
                self.warmup_release = None;
                self.stop(ui_now);
            }
        }
        self.indicators.amp.update(ui_now);
        self.indicators.pitch.update(ui_now);
    }

    pub fn set_waveform(&mut self, id: WaveformId) -> Option<Waveform> {
        match self.graph.set_waveform(id.clone()) {
            Ok(waveform) => {
                console_log!("oscillator type {} -> {}", id, waveform);
                Some(waveform)
            }
            Err(err) => {
                console_warn!("keeping {} oscillator: {:#}", self.graph.waveform(), err);
                None
            }
        }
    }

    pub fn set_envelope(&mut self, envelope: EnvelopeConfig) {
        self.envelope = envelope;
    }

    pub fn envelope(&self) -> &EnvelopeConfig {
        &self.envelope
    }

    /// Track the window size. A zero-sized window (minimized) keeps the
    /// previous extents so mapping never divides by zero.
    pub fn resize(&mut self, screen: Screen) {
        if screen.width > 0.0 && screen.height > 0.0 {
            self.screen = screen;
        }
    }

    pub fn input_mode(&self) -> InputMode {
        self.input
    }

    pub fn active_contacts(&self) -> u32 {
        match self.contacts {
            Contacts::Idle => 0,
            Contacts::Engaged { active, .. } => active,
        }
    }

    #[cfg(test)]
    pub fn contacts(&self) -> Contacts {
        self.contacts
    }

    pub fn indicators(&self) -> &Indicators {
        &self.indicators
    }

    #[cfg(test)]
    pub fn graph(&self) -> &AudioGraph<B> {
        &self.graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::graph::testing::RecordingBackend;
    use crate::audio::render::Command;
    use crate::capabilities::WaveformEncoding;
    use assert_approx_eq::assert_approx_eq;
    use pretty_assertions::assert_eq;

    fn theremin(input: InputMode) -> Theremin<RecordingBackend> {
        let encoding = WaveformEncoding::Standard;
        let graph = AudioGraph::new(RecordingBackend::new(encoding), encoding);
        let caps = Capabilities {
            input,
            waveform_encoding: encoding,
        };
        Theremin::new(
            graph,
            caps,
            EnvelopeConfig::default(),
            Screen::new(1000.0, 500.0),
        )
    }

    fn set_clock(t: &Theremin<RecordingBackend>, now: f64) {
        t.graph().backend().clock.set(now);
    }

    fn event(phase: Phase, x: f32, y: f32) -> ContactEvent {
        ContactEvent {
            phase,
            pos: Pos::new(x, y),
        }
    }

    #[test]
    fn contact_at_origin_then_release() {
        let mut t = theremin(InputMode::Mouse);
        t.handle(event(Phase::Start, 0.0, 0.0), 0.0);

        let gain = t.graph().param(ParamId::Gain);
        let freq = t.graph().param(ParamId::Frequency);
        assert_eq!(gain.final_value(), 0.0);
        assert_approx_eq!(freq.final_value(), 16.35);
        assert_approx_eq!(freq.end_time().unwrap(), 0.2);
        assert!(t.indicators().pitch.visible);

        set_clock(&t, 1.0);
        t.handle(event(Phase::End, 0.0, 0.0), 1.0);

        let gain = t.graph().param(ParamId::Gain);
        assert_eq!(gain.final_value(), 0.0);
        assert_approx_eq!(gain.end_time().unwrap(), 1.4);
        assert!(!t.indicators().pitch.visible);
        assert_eq!(t.contacts(), Contacts::Idle);
    }

    #[test]
    fn decay_setting_applies_to_next_stop() {
        let mut t = theremin(InputMode::Mouse);
        t.start(Pos::new(500.0, 250.0), 0.0);

        let mut envelope = *t.envelope();
        envelope.decay = crate::config::rate_from_slider(80);
        t.set_envelope(envelope);

        set_clock(&t, 2.0);
        t.stop(2.0);
        let gain = t.graph().param(ParamId::Gain);
        assert_approx_eq!(gain.end_time().unwrap(), 2.8);
        assert_eq!(gain.final_value(), 0.0);
    }

    #[test]
    fn play_ramps_to_mapped_values() {
        let mut t = theremin(InputMode::Mouse);
        set_clock(&t, 3.0);
        let target = t.play(Pos::new(1000.0, 500.0), 0.0);
        assert_approx_eq!(target.gain, 0.2);
        assert_approx_eq!(target.frequency, 4186.01, 1e-2);

        let gain = t.graph().param(ParamId::Gain);
        assert_approx_eq!(gain.end_time().unwrap(), 3.1);
        assert_approx_eq!(gain.value_at(3.05), 0.1, 1e-6);
    }

    #[test]
    fn every_play_cancels_before_scheduling() {
        let mut t = theremin(InputMode::Mouse);
        t.start(Pos::new(10.0, 10.0), 0.0);
        t.handle(event(Phase::Move, 20.0, 20.0), 0.0);

        let sent = &t.graph().backend().sent;
        let cancels = sent
            .iter()
            .filter(|c| matches!(c, Command::Automate(_, crate::audio::param::Automation::Cancel { .. })))
            .count();
        assert_eq!(cancels, 4);
        assert_eq!(t.indicators().pitch.left, 20.0);
    }

    #[test]
    fn counter_is_balanced_and_never_negative() {
        let mut t = theremin(InputMode::Touch);
        t.handle(event(Phase::Start, 1.0, 1.0), 0.0);
        t.handle(event(Phase::Start, 2.0, 2.0), 0.0);
        assert_eq!(t.active_contacts(), 2);

        t.handle(event(Phase::End, 0.0, 0.0), 0.0);
        assert_eq!(t.active_contacts(), 1);
        assert!(t.indicators().pitch.visible);

        t.handle(event(Phase::Cancel, 0.0, 0.0), 0.0);
        assert_eq!(t.active_contacts(), 0);

        t.handle(event(Phase::End, 0.0, 0.0), 0.0);
        t.stop(0.0);
        assert_eq!(t.active_contacts(), 0);
    }

    #[test]
    fn moves_while_idle_are_ignored() {
        let mut t = theremin(InputMode::Mouse);
        assert!(!t.listens(Phase::Move));
        t.handle(event(Phase::Move, 50.0, 50.0), 0.0);
        t.move_to(Pos::new(50.0, 50.0), 0.0);
        assert!(t.graph().backend().sent.is_empty());
        assert!(!t.indicators().pitch.visible);
    }

    #[test]
    fn mouse_contacts_do_not_listen_for_cancel() {
        let mut t = theremin(InputMode::Mouse);
        t.start(Pos::new(1.0, 1.0), 0.0);
        assert!(t.listens(Phase::Move));
        assert!(t.listens(Phase::End));
        assert!(!t.listens(Phase::Cancel));
        t.handle(event(Phase::Cancel, 0.0, 0.0), 0.0);
        assert_eq!(t.active_contacts(), 1);
    }

    #[test]
    fn start_resumes_output() {
        let mut t = theremin(InputMode::Mouse);
        t.start(Pos::default(), 0.0);
        t.stop(0.0);
        t.start(Pos::default(), 0.0);
        assert_eq!(t.graph().backend().resumed, 2);
    }

    #[test]
    fn indicators_snap_then_follow() {
        let mut t = theremin(InputMode::Mouse);
        t.start(Pos::new(300.0, 200.0), 0.0);

        let ind = t.indicators();
        assert_eq!(ind.amp.top, 200.0);
        assert_eq!(ind.amp.left, 0.0);
        assert_eq!(ind.pitch.left, 300.0);
        assert_eq!(ind.pitch.top, 0.0);

        t.update(0.1);
        assert_approx_eq!(t.indicators().amp.left, 300.0);
        assert_approx_eq!(t.indicators().pitch.top, 100.0, 1e-3);

        t.update(0.2);
        assert_approx_eq!(t.indicators().pitch.top, 200.0);

        t.stop(0.2);
        t.update(0.4);
        assert_approx_eq!(t.indicators().amp.left, 150.0, 1e-3);
        t.update(0.6);
        assert_approx_eq!(t.indicators().amp.left, 0.0);
    }

    #[test]
    fn warm_up_releases_itself() {
        let mut t = theremin(InputMode::Mouse);
        t.warm_up(0.0);
        assert_eq!(t.active_contacts(), 1);

        t.update(0.1);
        assert_eq!(t.active_contacts(), 1);

        t.update(0.2);
        assert_eq!(t.contacts(), Contacts::Idle);
        assert_eq!(t.graph().param(ParamId::Gain).final_value(), 0.0);
    }

    #[test]
    fn out_of_window_drag_is_clamped() {
        let mut t = theremin(InputMode::Mouse);
        let target = t.play(Pos::new(-20.0, 900.0), 0.0);
        assert_eq!(target.gain, 0.0);
        assert_approx_eq!(target.frequency, 4186.01, 1e-2);
        assert_eq!(t.indicators().amp.top, 500.0);
        assert_eq!(t.indicators().pitch.left, 0.0);
    }

    #[test]
    fn play_after_resize_maps_against_new_extents() {
        let mut t = theremin(InputMode::Mouse);
        t.resize(Screen::new(390.0, 844.0));

        let target = t.play(Pos::new(390.0, 844.0), 0.0);
        assert_approx_eq!(target.gain, 0.2);
        assert_approx_eq!(target.frequency, 4186.01, 1e-2);

        let half = t.play(Pos::new(195.0, 0.0), 0.0);
        assert_approx_eq!(half.gain, 0.1);
    }

    #[test]
    fn zero_sized_resize_keeps_previous_extents() {
        let mut t = theremin(InputMode::Mouse);
        t.resize(Screen::new(0.0, 0.0));
        t.resize(Screen::new(640.0, 0.0));

        let target = t.play(Pos::new(500.0, 250.0), 0.0);
        assert!(target.gain.is_finite());
        assert_approx_eq!(target.gain, 0.1);
        assert!(t.graph().param(ParamId::Gain).final_value().is_finite());
    }

    #[test]
    fn waveform_change_falls_back_without_error() {
        let mut t = theremin(InputMode::Mouse);
        assert_eq!(t.set_waveform(WaveformId::Code(1)), Some(Waveform::Square));
        assert_eq!(t.set_waveform(WaveformId::Code(77)), None);
        assert_eq!(t.graph().waveform(), Waveform::Square);
    }
}
