// src/bin/gui.rs
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]
use bbti_collect::{ config::state::GuiState, gui };
use eframe::egui::ViewportBuilder;

fn main() {
    let gui_state = GuiState::default();
    let options = eframe::NativeOptions {
        viewport: ViewportBuilder::default()
            .with_inner_size([gui_state.window_w as f32, gui_state.window_h as f32])
            .with_title("BBTI Collections"),
        ..Default::default()
    };

    if let Err(e) = gui::run(options) {
        eprintln!("GUI failed: {}", e);
        std::process::exit(1);
    }
}
