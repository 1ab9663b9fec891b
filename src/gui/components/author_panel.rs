// src/gui/components/author_panel.rs
//
// create_collection.html: title and id box, live link, copy.

use eframe::egui;
use crate::gui::{ actions, app::App };

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    let mut changed = false;

    egui::Grid::new("author_form").num_columns(2).spacing([8.0, 6.0]).show(ui, |ui| {
        ui.label("Title:");
        changed |= ui
            .add(egui::TextEdit::singleline(&mut app.author.title).desired_width(420.0))
            .changed();
        ui.end_row();

        ui.label("Record ids:");
        changed |= ui
            .add(
                egui::TextEdit::multiline(&mut app.author.record_ids)
                    .hint_text("Paste ids separated by spaces, commas, new lines…")
                    .desired_rows(6)
                    .desired_width(420.0),
            )
            .changed();
        ui.end_row();
    });

    if changed {
        app.author.on_input();
    }

    ui.add_space(8.0);
    ui.label(format!("{} id(s)", app.author.id_count()));

    ui.horizontal(|ui| {
        ui.label("Link:");
        let mut uri = app.author.uri().to_owned();
        ui.add(
            egui::TextEdit::singleline(&mut uri)
                .desired_width(f32::INFINITY)
                .font(egui::TextStyle::Monospace)
                .interactive(false),
        );
    });

    ui.horizontal(|ui| {
        if ui.button("Copy link").clicked() {
            actions::copy(app, ui.ctx());
        }
        if ui.button("View here").clicked() {
            actions::view_authored(app, ui.ctx());
        }
    });
}
