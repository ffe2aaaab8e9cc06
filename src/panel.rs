use crate::audio::waveform::{Waveform, WaveformId};
use crate::config::{rate_from_slider, slider_from_rate, EnvelopeConfig};
use crate::input::Phase;
use crate::motion::{Motion, Prop, Sprite};
use nannou_egui::egui;

/// Length of the panel's fade in and out.
pub const FADE_SECS: f64 = 0.3;

#[derive(Debug, Clone, PartialEq)]
pub enum PanelChange {
    Rates,
    Waveform(WaveformId),
}

/// Attack, decay and glide sliders (0..=100) plus the oscillator selector.
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsPanel {
    pub attack: u8,
    pub decay: u8,
    pub glide: u8,
    pub waveform: Waveform,
    open: bool,
    fade: Sprite,
}

impl SettingsPanel {
    pub fn new(envelope: &EnvelopeConfig, waveform: Waveform) -> Self {
        let mut fade = Sprite::new(0.0, 0.0, false);
        fade.opacity = 0.0;
        Self {
            attack: slider_from_rate(envelope.attack),
            decay: slider_from_rate(envelope.decay),
            glide: slider_from_rate(envelope.glide),
            waveform,
            open: false,
            fade,
        }
    }

    /// Fade the panel in if it is closed, out if it is open.
    pub fn flip(&mut self, ui_now: f64) {
        self.open = !self.open;
        let motion = if self.open {
            self.fade.visible = true;
            Motion::new().set(Prop::Opacity, 1.0).duration(FADE_SECS)
        } else {
            Motion::new()
                .set(Prop::Opacity, 0.0)
                .duration(FADE_SECS)
                .visible_at_end(false)
        };
        self.fade.animate(motion, ui_now);
    }

    pub fn update(&mut self, ui_now: f64) {
        self.fade.update(ui_now);
    }

    #[cfg(test)]
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_shown(&self) -> bool {
        self.fade.visible
    }

    pub fn opacity(&self) -> f32 {
        self.fade.opacity
    }

    pub fn apply_to(&self, envelope: &mut EnvelopeConfig) {
        envelope.attack = rate_from_slider(self.attack);
        envelope.decay = rate_from_slider(self.decay);
        envelope.glide = rate_from_slider(self.glide);
    }

    /// The selector speaks the legacy numeric encoding.
    pub fn selected_waveform(&self) -> WaveformId {
        WaveformId::Code(self.waveform.code())
    }

    /// Draw the toggle button and, while shown, the panel itself.
    pub fn show(&mut self, ctx: &egui::Context, ui_now: f64) -> Vec<PanelChange> {
        let mut changes = vec![];

        let toggled = egui::Area::new("settings-toggle")
            .anchor(egui::Align2::RIGHT_TOP, [-12.0, 12.0])
            .show(ctx, |ui| ui.button("Settings").clicked())
            .inner;
        if toggled {
            self.flip(ui_now);
        }
        if !self.is_shown() {
            return changes;
        }

        let opacity = self.opacity();
        let mut frame = egui::Frame::window(&ctx.style());
        frame.fill = frame.fill.linear_multiply(opacity);
        frame.stroke.color = frame.stroke.color.linear_multiply(opacity);

        egui::Window::new("Settings")
            .frame(frame)
            .anchor(egui::Align2::RIGHT_TOP, [-12.0, 44.0])
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                let rates = (self.attack, self.decay, self.glide);
                ui.add(egui::Slider::new(&mut self.attack, 0..=100).text("Attack"));
                ui.add(egui::Slider::new(&mut self.decay, 0..=100).text("Decay"));
                ui.add(egui::Slider::new(&mut self.glide, 0..=100).text("Glide"));
                if rates != (self.attack, self.decay, self.glide) {
                    changes.push(PanelChange::Rates);
                }

                let selected = self.waveform;
                egui::ComboBox::from_label("Waveform")
                    .selected_text(self.waveform.name())
                    .show_ui(ui, |ui| {
                        for w in Waveform::ALL {
                            ui.selectable_value(&mut self.waveform, w, w.name());
                        }
                    });
                if self.waveform != selected {
                    changes.push(PanelChange::Waveform(self.selected_waveform()));
                }
            });

        changes
    }
}

/// Whether a contact event should stop at the panel instead of reaching the
/// play surface. Releases always get through so no contact is left hanging.
pub fn swallows(ctx: &egui::Context, phase: Phase) -> bool {
    match phase {
        Phase::Start | Phase::Move => ctx.is_pointer_over_area() || ctx.wants_pointer_input(),
        Phase::End | Phase::Cancel => false,
    }
}
