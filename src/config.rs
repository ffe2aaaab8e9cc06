use crate::audio::waveform::Waveform;
use anyhow::Context;
use serde::Deserialize;
#[cfg(not(target_family = "wasm"))]
use std::path::{Path, PathBuf};

/// C0
pub const MIN_FREQ: f32 = 16.35;
/// C8
pub const MAX_FREQ: f32 = 4186.01;

/// Delay between the synthetic start and stop at start-up.
pub const WARMUP_SECS: f64 = 0.2;

/// Envelope rates in seconds, plus the gain and pitch ranges the pointer
/// is mapped onto.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct EnvelopeConfig {
    pub attack: f64,
    pub decay: f64,
    pub glide: f64,
    pub max_gain: f32,
    #[serde(skip, default = "min_freq")]
    pub min_freq: f32,
    #[serde(skip, default = "max_freq")]
    pub max_freq: f32,
}

fn min_freq() -> f32 {
    MIN_FREQ
}

fn max_freq() -> f32 {
    MAX_FREQ
}

impl Default for EnvelopeConfig {
    fn default() -> Self {
        Self {
            attack: 0.1,
            decay: 0.4,
            glide: 0.2,
            max_gain: 0.2,
            min_freq: MIN_FREQ,
            max_freq: MAX_FREQ,
        }
    }
}

/// Panel sliders run 0..=100, rates are fractions of a second.
pub fn rate_from_slider(value: u8) -> f64 {
    value.min(100) as f64 / 100.0
}

pub fn slider_from_rate(secs: f64) -> u8 {
    (secs * 100.0).round().clamp(0.0, 100.0) as u8
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub envelope: EnvelopeConfig,
    pub waveform: Waveform,
    /// Force touch input even when the platform does not report it.
    pub touch: bool,
    pub width: u32,
    pub height: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            envelope: EnvelopeConfig::default(),
            waveform: Waveform::Sine,
            touch: false,
            width: 1024,
            height: 768,
        }
    }
}

#[cfg(not(target_family = "wasm"))]
#[derive(clap::Parser, Debug, Default)]
#[clap(author, version, about = "A theremin played with the mouse or a finger")]
pub struct Args {
    /// YAML file with start-up settings
    #[clap(short, long, env = "MYSTERON_CONFIG")]
    pub config: Option<PathBuf>,

    /// Listen for touch events instead of mouse events
    #[clap(long)]
    pub touch: bool,

    #[clap(long)]
    pub width: Option<u32>,

    #[clap(long)]
    pub height: Option<u32>,

    /// sine, square, sawtooth or triangle
    #[clap(short, long)]
    pub waveform: Option<Waveform>,
}

#[cfg(not(target_family = "wasm"))]
impl Settings {
    pub fn load(path: &Path) -> anyhow::Result<Settings> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Settings::parse_yaml(&text).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn parse_yaml(text: &str) -> anyhow::Result<Settings> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn from_args(args: &Args) -> anyhow::Result<Settings> {
        let mut settings = match &args.config {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };
        settings.touch |= args.touch;
        if let Some(width) = args.width {
            settings.width = width;
        }
        if let Some(height) = args.height {
            settings.height = height;
        }
        if let Some(waveform) = args.waveform {
            settings.waveform = waveform;
        }
        Ok(settings)
    }
}

// Only the browser build reads settings from the page.
#[cfg_attr(not(target_family = "wasm"), allow(dead_code))]
impl Settings {
    /// Make the play surface the size of the browser viewport. Sizes below
    /// one pixel (or not numbers at all) are ignored.
    pub fn fit_viewport(&mut self, width: f64, height: f64) {
        if width >= 1.0 && height >= 1.0 {
            self.width = width as u32;
            self.height = height as u32;
        }
    }

    /// Overrides from `key=value` pairs such as a page's query string.
    /// Rates use the panel's 0..=100 scale.
    pub fn apply_query(&mut self, get: impl Fn(&str) -> Option<String>) -> anyhow::Result<()> {
        let slider = |key: &str| -> anyhow::Result<Option<f64>> {
            get(key)
                .map(|v| {
                    v.parse::<u8>()
                        .map(rate_from_slider)
                        .with_context(|| format!("'{}' is not a 0-100 value for {}", v, key))
                })
                .transpose()
        };

        if let Some(attack) = slider("attack")? {
            self.envelope.attack = attack;
        }
        if let Some(decay) = slider("decay")? {
            self.envelope.decay = decay;
        }
        if let Some(glide) = slider("glide")? {
            self.envelope.glide = glide;
        }
        if let Some(waveform) = get("waveform") {
            self.waveform = waveform.parse()?;
        }
        if let Some(touch) = get("touch") {
            self.touch = matches!(touch.as_str(), "1" | "true" | "yes");
        }
        Ok(())
    }
}

cfg_if::cfg_if! {
    if #[cfg(target_family = "wasm")] {
        /// Settings for the browser build, taken from the page's URL query.
        /// The surface always spans the whole viewport.
        pub fn settings() -> Settings {
            let mut settings = Settings::default();
            let window = match web_sys::window() {
                Some(window) => window,
                None => return settings,
            };
            let search = window.location().search().unwrap_or_default();
            if let Ok(params) = web_sys::UrlSearchParams::new_with_str(&search) {
                if let Err(err) = settings.apply_query(|key| params.get(key)) {
                    crate::console::console_warn!("ignoring URL settings: {:#}", err);
                    settings = Settings::default();
                }
            }

            let px = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
                v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
            };
            settings.fit_viewport(px(window.inner_width()), px(window.inner_height()));
            settings
        }
    } else {
        /// Settings for the native build, from the command line and an
        /// optional config file.
        pub fn settings() -> Settings {
            use clap::Parser;

            let args = Args::parse();
            Settings::from_args(&args).unwrap_or_else(|err| {
                crate::console::console_warn!("using default settings: {:#}", err);
                Settings::default()
            })
        }
    }
}
