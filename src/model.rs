use crate::audio::{AudioGraph, Backend, CpalBackend};
use crate::capabilities;
use crate::config::Settings;
use crate::console;
use crate::controller::Theremin;
use crate::mapping::Screen;
use crate::panel::SettingsPanel;
use nannou::window::Id as WindowId;
use nannou_egui::Egui;

/// Seconds since start-up, for indicator and panel motions.
pub struct UiClock {
    started: wasm_timer::Instant,
}

impl UiClock {
    pub fn start() -> Self {
        Self {
            started: wasm_timer::Instant::now(),
        }
    }

    pub fn now(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }
}

pub struct Model {
    pub window: Option<WindowId>,
    pub size: (u32, u32),
    pub egui: Option<Egui>,
    /// `None` when the platform has no audio output.
    pub theremin: Option<Theremin<CpalBackend>>,
    pub panel: SettingsPanel,
    pub notice: Option<String>,
    pub clock: UiClock,
}

impl Model {
    /// Build the audio graph, bind the indicators and the panel, then warm
    /// the output up with a short synthetic contact.
    pub fn new(settings: Settings) -> Self {
        let clock = UiClock::start();
        let panel = SettingsPanel::new(&settings.envelope, settings.waveform);

        let (theremin, notice) = match CpalBackend::open() {
            Ok(backend) => {
                let caps = capabilities::negotiate(&settings, backend.waveform_encoding());
                console::console_log!("capabilities: {:?}", caps);
                let graph = AudioGraph::new(backend, caps.waveform_encoding);
                let screen = Screen::new(settings.width as f32, settings.height as f32);
                let mut theremin = Theremin::new(graph, caps, settings.envelope, screen);
                theremin.set_waveform(caps.waveform_encoding.identify(settings.waveform));
                theremin.warm_up(clock.now());
                (Some(theremin), None)
            }
            Err(err) => {
                let notice = format!("No audio oscillator support on this platform ({:#})", err);
                console::alert(&notice);
                (None, Some(notice))
            }
        };

        Model {
            window: None,
            size: (settings.width, settings.height),
            egui: None,
            theremin,
            panel,
            notice,
            clock,
        }
    }
}
