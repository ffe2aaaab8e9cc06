cfg_if::cfg_if! {
    if #[cfg(target_family = "wasm")] {
        use wasm_bindgen::prelude::*;

        #[wasm_bindgen]
        extern "C" {
            #[wasm_bindgen(js_namespace = console)]
            pub fn log(s: &str);

            #[wasm_bindgen(js_namespace = console)]
            pub fn warn(s: &str);
        }

        /// Blocking notice the user has to acknowledge.
        pub fn alert(s: &str) {
            warn(s);
            if let Some(window) = web_sys::window() {
                let _ = window.alert_with_message(s);
            }
        }
    } else {
        pub fn log(s: &str) {
            println!("[{}] {}", chrono::Local::now().format("%H:%M:%S%.3f"), s);
        }

        pub fn warn(s: &str) {
            eprintln!("[{} WARN] {}", chrono::Local::now().format("%H:%M:%S%.3f"), s);
        }

        /// Natively the notice also shows up in the window, see `view`.
        pub fn alert(s: &str) {
            warn(s);
        }
    }
}

macro_rules! console_log {
    ($($t:tt)*) => (crate::console::log(&format_args!($($t)*).to_string()))
}

macro_rules! console_warn {
    ($($t:tt)*) => (crate::console::warn(&format_args!($($t)*).to_string()))
}

pub(crate) use console_log;
pub(crate) use console_warn;
