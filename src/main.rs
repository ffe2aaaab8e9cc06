#![cfg_attr(target_family = "wasm", no_main)]
use nannou::app::{self, App};
use nannou::prelude::*;
use nannou::wgpu::{DeviceDescriptor, Limits};
#[cfg(target_family = "wasm")]
use nannou::wgpu::Backends;
use nannou_egui::{egui, Egui};

#[cfg(target_family = "wasm")]
use wasm_bindgen::prelude::*;

use std::cell::RefCell;

pub mod audio;
pub mod capabilities;
pub mod config;
pub mod console;
pub mod controller;
pub mod input;
pub mod mapping;
pub mod model;
pub mod motion;
pub mod panel;
pub mod pos;
pub mod render;
pub mod task;

use console::console_warn;
use mapping::Screen;
use model::Model;
use panel::PanelChange;
use pos::Pos;

#[cfg(target_family = "wasm")]
#[wasm_bindgen(start)]
pub async fn start() -> Result<(), JsValue> {
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));

    task::block_on(run(Model::new(config::settings())));

    Ok(())
}

#[cfg(not(target_family = "wasm"))]
fn main() {
    task::block_on(run(Model::new(config::settings())));
}

thread_local!(static MODEL: RefCell<Option<Model>> = RefCell::new(None));

async fn run(model: Model) {
    MODEL.with(|m| m.replace(Some(model)));

    let builder = app::Builder::new_async(|app| {
        Box::new(async move {
            let mut model = MODEL
                .with(|m| m.take())
                .expect("model is staged before the app starts");
            model.window = Some(create_window(app, model.size).await);
            model
        })
    });
    #[cfg(target_family = "wasm")]
    let builder = builder.backends(Backends::PRIMARY | Backends::GL);

    builder.update(update).run_async().await;
}

async fn create_window(app: &App, (width, height): (u32, u32)) -> WindowId {
    let device_desc = DeviceDescriptor {
        limits: Limits {
            max_texture_dimension_2d: 8192,
            ..Limits::downlevel_webgl2_defaults()
        },
        ..Default::default()
    };

    app.new_window()
        .size(width, height)
        .device_descriptor(device_desc)
        .key_pressed(key_pressed)
        .raw_event(raw_window_event)
        .title("Mysteron")
        .view(render::view)
        .event(event)
        .build_async()
        .await
        .expect("failed to build window")
}

fn key_pressed(app: &App, m: &mut Model, key: Key) {
    if key == Key::S {
        m.panel.flip(m.clock.now());
    }
    if key == Key::Escape {
        app.quit();
    }
}

fn event(app: &App, m: &mut Model, event: WindowEvent) {
    let window = app.window_rect();
    let theremin = match m.theremin.as_mut() {
        Some(theremin) => theremin,
        None => return,
    };

    if let WindowEvent::Resized(_) = event {
        theremin.resize(Screen::new(window.w(), window.h()));
        return;
    }

    let cursor = Pos::from_window(app.mouse.position(), window);
    let contact = match theremin.input_mode().translate(&event, cursor, window) {
        Some(contact) => contact,
        None => return,
    };

    // Contacts that begin on the settings panel belong to egui.
    if let Some(egui) = m.egui.as_ref() {
        if panel::swallows(egui.ctx(), contact.phase) {
            return;
        }
    }

    theremin.handle(contact, m.clock.now());
}

fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    // Let egui handle things like keyboard and mouse input.
    if let Some(egui) = model.egui.as_mut() {
        egui.handle_raw_event(event);
    }
}

fn update(app: &App, m: &mut Model, update: Update) {
    if m.egui.is_none() {
        if let Some(window) = m.window.and_then(|id| app.window(id)) {
            m.egui = Some(Egui::from_window(&window));
        }
    }

    let now = m.clock.now();
    m.panel.update(now);
    if let Some(theremin) = m.theremin.as_mut() {
        theremin.update(now);
    }

    let egui = match m.egui.as_mut() {
        Some(egui) => egui,
        None => return,
    };
    egui.set_elapsed_time(update.since_start);
    let ctx = egui.begin_frame();

    if let Some(notice) = &m.notice {
        egui::Window::new("Audio unavailable")
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .collapsible(false)
            .show(&ctx, |ui| ui.label(notice.as_str()));
    }

    let changes = m.panel.show(&ctx, now);
    let theremin = match m.theremin.as_mut() {
        Some(theremin) => theremin,
        None => return,
    };
    for change in changes {
        match change {
            PanelChange::Rates => {
                let mut envelope = *theremin.envelope();
                m.panel.apply_to(&mut envelope);
                theremin.set_envelope(envelope);
            }
            PanelChange::Waveform(id) => {
                if theremin.set_waveform(id).is_none() {
                    console_warn!("waveform selection ignored");
                }
            }
        }
    }
}
