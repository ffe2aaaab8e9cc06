//! Platform differences, resolved once at start-up.

use crate::audio::waveform::{Waveform, WaveformId};
use crate::config::Settings;
use crate::input::InputMode;

/// Which waveform identifiers the oscillator takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveformEncoding {
    /// Numeric codes only. No bundled backend speaks it.
    #[allow(dead_code)]
    Legacy,
    /// Names only.
    Standard,
}

impl WaveformEncoding {
    pub fn assign(self, id: &WaveformId) -> anyhow::Result<Waveform> {
        let accepted = matches!(
            (self, id),
            (WaveformEncoding::Legacy, WaveformId::Code(_))
                | (WaveformEncoding::Standard, WaveformId::Name(_))
        );
        if !accepted {
            anyhow::bail!("oscillator type {} rejected by {:?} platform", id, self);
        }
        id.resolve()
            .ok_or_else(|| anyhow::anyhow!("unknown oscillator type {}", id))
    }

    /// The identifier of `waveform` in this encoding.
    pub fn identify(self, waveform: Waveform) -> WaveformId {
        match self {
            WaveformEncoding::Legacy => WaveformId::Code(waveform.code()),
            WaveformEncoding::Standard => WaveformId::from(waveform),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub input: InputMode,
    pub waveform_encoding: WaveformEncoding,
}

pub fn negotiate(settings: &Settings, waveform_encoding: WaveformEncoding) -> Capabilities {
    let input = if settings.touch || has_touch() {
        InputMode::Touch
    } else {
        InputMode::Mouse
    };
    Capabilities {
        input,
        waveform_encoding,
    }
}

cfg_if::cfg_if! {
    if #[cfg(target_family = "wasm")] {
        fn has_touch() -> bool {
            use wasm_bindgen::JsValue;

            let window = match web_sys::window() {
                Some(window) => window,
                None => return false,
            };
            let on_window = js_sys::Reflect::has(&window, &JsValue::from_str("ontouchstart"))
                .unwrap_or(false);
            let on_document = window
                .document()
                .map(|doc| {
                    js_sys::Reflect::has(&doc, &JsValue::from_str("createTouch")).unwrap_or(false)
                })
                .unwrap_or(false);
            on_window || on_document
        }
    } else {
        fn has_touch() -> bool {
            false
        }
    }
}
