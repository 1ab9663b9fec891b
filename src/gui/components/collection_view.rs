// src/gui/components/collection_view.rs
//
// collection.html: query in, records table + alerts out.

use eframe::egui::{ self, Align, Layout, RichText, TextWrapMode };
use egui_extras::{ Column, TableBuilder };

use crate::{
    collection::AssembledCollection,
    gui::{ actions, app::App },
};

const PREVIEW_CHARS: usize = 120;

/// One table row: position, id, status, preview.
struct Row {
    position: usize,
    id: String,
    status: &'static str,
    preview: String,
}

fn rows_of(c: &AssembledCollection) -> Vec<Row> {
    let mut rows: Vec<Row> = c
        .records
        .iter()
        .map(|p| Row {
            position: p.position,
            id: s!(p.fragment.id()),
            status: if p.fragment.is_found() { "ok" } else { "not found" },
            preview: p.fragment.preview(PREVIEW_CHARS),
        })
        .collect();
    rows.extend(c.omitted.iter().map(|(position, id)| Row {
        position: *position,
        id: id.clone(),
        status: "failed",
        preview: s!("(omitted)"),
    }));
    rows.sort_by_key(|r| r.position);
    rows
}

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    ui.horizontal(|ui| {
        ui.label("Query:");
        let resp = ui.add(
            egui::TextEdit::singleline(&mut app.state.gui.query_text)
                .hint_text("?collTitle=…&records=1;2;3  or a full collection URL")
                .desired_width(520.0)
                .font(egui::TextStyle::Monospace),
        );
        let enter = resp.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

        let label = if app.running { "Building…" } else { "Build" };
        if ui.button(label).clicked() || enter {
            actions::build(app, ui.ctx());
        }
    });

    ui.horizontal(|ui| {
        ui.label("Output:");
        if ui
            .add(egui::TextEdit::singleline(&mut app.state.gui.out_path_text).font(egui::TextStyle::Monospace))
            .changed()
        {
            app.state.gui.out_path_dirty = true;
            logd!("UI: out_path_text changed (dirty=true) → {}", app.state.gui.out_path_text);
        }
        if ui.add_enabled(app.collection.is_some(), egui::Button::new("Save HTML")).clicked() {
            actions::export(app);
        }
    });

    let alerts = app.alert_list();
    if !alerts.is_empty() {
        ui.separator();
        for a in &alerts {
            ui.label(RichText::new(a).color(ui.visuals().warn_fg_color));
        }
    }

    ui.separator();

    let Some(collection) = app.collection.as_ref() else {
        ui.label(RichText::new("No collection built yet.").weak());
        return;
    };

    ui.heading(&collection.title);
    let rows = rows_of(collection);

    TableBuilder::new(ui)
        .striped(true)
        .min_scrolled_height(0.0)
        .column(Column::exact(40.0))
        .column(Column::initial(80.0).resizable(true).clip(true))
        .column(Column::initial(80.0).resizable(true))
        .column(Column::remainder().clip(true))
        .header(24.0, |mut header| {
            for title in ["#", "Id", "Status", "Preview"] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(20.0, rows.len(), |mut row| {
                let Some(r) = rows.get(row.index()) else { return };
                row.col(|ui| {
                    ui.centered_and_justified(|ui| { ui.label(r.position.to_string()); });
                });
                row.col(|ui| { ui.label(&r.id); });
                row.col(|ui| {
                    let mut rt = RichText::new(r.status);
                    if r.status != "ok" {
                        rt = rt.color(ui.visuals().warn_fg_color);
                    }
                    ui.label(rt);
                });
                row.col(|ui| {
                    ui.with_layout(Layout::left_to_right(Align::Center), |ui| {
                        ui.style_mut().wrap_mode = Some(TextWrapMode::Truncate);
                        ui.label(&r.preview);
                    });
                });
            });
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::{ Fragment, Placed };

    #[test]
    fn omitted_positions_slot_in_order() {
        let c = AssembledCollection {
            title: s!("t"),
            records: vec![
                Placed { position: 1, fragment: Fragment::NotFound { id: s!("5") } },
                Placed { position: 3, fragment: Fragment::NotFound { id: s!("5") } },
            ],
            omitted: vec![(2, s!("7"))],
        };
        let rows = rows_of(&c);
        assert_eq!(rows.iter().map(|r| r.position).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(rows[1].status, "failed");
    }
}
