use crate::console::console_warn;
use crate::model::Model;
use crate::pos::Pos;
use nannou::prelude::*;

pub fn view(app: &App, m: &Model, frame: Frame) {
    let main_color = Rgb::new(0x0du8, 0x11u8, 0x17u8);
    let sec_color = Rgb::new(0xf2u8, 0xeeu8, 0xe8u8);
    let tri_color = Rgb::new(0x7du8, 0x11u8, 0x17u8);
    let draw = app.draw();
    draw.background().color(main_color);

    let window = app.window_rect();

    if let Some(theremin) = &m.theremin {
        let ind = theremin.indicators();

        let amp = Pos::new(ind.amp.left, ind.amp.top).to_window(window);
        draw.line()
            .start(pt2(window.left(), amp.y))
            .end(amp)
            .weight(1.0)
            .color(tri_color);
        draw.ellipse().xy(amp).w_h(18.0, 18.0).color(sec_color);

        if ind.pitch.visible {
            let pitch = Pos::new(ind.pitch.left, ind.pitch.top).to_window(window);
            draw.ellipse()
                .xy(pitch)
                .w_h(26.0, 26.0)
                .no_fill()
                .stroke(tri_color)
                .stroke_weight(3.0);
        }
    } else if let Some(notice) = &m.notice {
        draw.text(notice)
            .w(window.w() * 0.8)
            .font_size(18)
            .color(sec_color);
    }

    if let Err(err) = draw.to_frame(app, &frame) {
        console_warn!("drawing failed: {:?}", err);
    }
    if let Some(egui) = m.egui.as_ref() {
        if let Err(err) = egui.draw_to_frame(&frame) {
            console_warn!("drawing settings panel failed: {:?}", err);
        }
    }
}
