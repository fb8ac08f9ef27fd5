//! Modal dialogs: file picking, confirmation, error notices and About

use gtk4::prelude::*;
use gtk4::{gio, AlertDialog, FileDialog, FileFilter, Window};
use std::path::PathBuf;
use tracing::debug;

/// Pick one or more font files; `on_chosen` only runs when the user confirms.
pub fn choose_font_files<F>(parent: &impl IsA<Window>, on_chosen: F)
where
    F: FnOnce(Vec<PathBuf>) + 'static,
{
    let fonts = FileFilter::new();
    fonts.set_name(Some("Font files (*.ttf *.otf *.ttc)"));
    for suffix in fontview_core::constants::INSTALLABLE_EXTENSIONS {
        fonts.add_suffix(suffix);
    }
    let everything = FileFilter::new();
    everything.set_name(Some("All files"));
    everything.add_pattern("*");

    let filters = gio::ListStore::new::<FileFilter>();
    filters.append(&fonts);
    filters.append(&everything);

    let dialog = FileDialog::builder()
        .title("Select font files")
        .modal(true)
        .filters(&filters)
        .default_filter(&fonts)
        .build();

    dialog.open_multiple(Some(parent), None::<&gio::Cancellable>, move |result| {
        let files = match result {
            Ok(files) => files,
            Err(e) => {
                debug!("File dialog dismissed: {}", e);
                return;
            }
        };
        let paths: Vec<PathBuf> = (0..files.n_items())
            .filter_map(|i| files.item(i).and_downcast::<gio::File>())
            .filter_map(|file| file.path())
            .collect();
        if !paths.is_empty() {
            on_chosen(paths);
        }
    });
}

/// Ask before deleting a managed font file from disk.
pub fn confirm_deletion<F>(parent: &impl IsA<Window>, file_name: &str, on_confirmed: F)
where
    F: FnOnce() + 'static,
{
    const CANCEL: i32 = 0;
    const DELETE: i32 = 1;

    let dialog = AlertDialog::builder()
        .modal(true)
        .message("Permanently delete this font file from disk?")
        .detail(file_name)
        .buttons(["Cancel", "Delete"])
        .cancel_button(CANCEL)
        .default_button(CANCEL)
        .build();

    dialog.choose(Some(parent), None::<&gio::Cancellable>, move |result| {
        if matches!(result, Ok(DELETE)) {
            on_confirmed();
        }
    });
}

pub fn show_error(parent: &impl IsA<Window>, title: &str, detail: &str) {
    AlertDialog::builder()
        .modal(true)
        .message(title)
        .detail(detail)
        .build()
        .show(Some(parent));
}

pub fn show_about(parent: &impl IsA<Window>) {
    let about = gtk4::AboutDialog::builder()
        .transient_for(parent)
        .modal(true)
        .program_name("Font Viewer")
        .version(env!("CARGO_PKG_VERSION"))
        .authors(vec![env!("CARGO_PKG_AUTHORS").to_string()])
        .comments("Live preview of local font files.")
        .build();
    about.present();
}

