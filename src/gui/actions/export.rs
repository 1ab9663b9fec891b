// src/gui/actions/export.rs
use crate::{ file, gui::app::App };

pub fn export(app: &mut App) {
    // normalize out_path first (mutates app) before any &app borrows
    if app.state.gui.out_path_dirty {
        app.state.options.export.set_path(&app.state.gui.out_path_text);
        logf!(
            "Export: Out path set → {}",
            app.state.options.export.out_path().display()
        );
        app.state.gui.out_path_dirty = false;
    }

    let status_msg = match app.collection.as_ref() {
        None => {
            logd!("Export: Clicked, but there's nothing to export");
            s!("Nothing to export")
        }
        Some(collection) => {
            logf!("Export: Begin records={} title='{}'", collection.records.len(), collection.title);
            match file::write_collection(&app.state.options.export, collection) {
                Ok(path) => {
                    logf!("Export: OK {}", path.display());
                    format!("Saved {} record(s) to {}", collection.records.len(), path.display())
                }
                Err(e) => {
                    loge!("Export: Error: {}", e);
                    format!("Export error: {e}")
                }
            }
        }
    };

    // mutate app only after the collection borrow is gone
    app.status(status_msg);
}
