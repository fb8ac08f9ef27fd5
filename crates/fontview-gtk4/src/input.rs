//! Drag-and-drop and context menu handling for the font list

use crate::window::FontViewerWindow;
use fontview_core::is_font_file;
use gtk4::prelude::*;
use gtk4::{gdk, Button, DropTarget, GestureClick, Popover, PositionType};
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use tracing::debug;

fn local_paths(files: &gdk::FileList) -> Vec<PathBuf> {
    files.files().iter().filter_map(|file| file.path()).collect()
}

fn contains_font(paths: &[PathBuf]) -> bool {
    paths.iter().any(|path| is_font_file(path))
}

pub struct InputHandler;

impl InputHandler {
    /// Accept file drops onto `widget` and install them into the managed directory.
    ///
    /// A drag carrying no ttf/otf/ttc file is refused as soon as its payload is known.
    pub fn setup_drop(widget: &impl IsA<gtk4::Widget>, shell: &Rc<FontViewerWindow>) {
        let target = DropTarget::new(gdk::FileList::static_type(), gdk::DragAction::COPY);
        target.set_preload(true);

        target.connect_value_notify(|target| {
            let Some(value) = target.value() else {
                return;
            };
            if let Ok(files) = value.get::<gdk::FileList>() {
                if !contains_font(&local_paths(&files)) {
                    debug!("Refusing drag without font files");
                    target.reject();
                }
            }
        });

        let weak = Rc::downgrade(shell);
        target.connect_drop(move |_, value, _, _| {
            let Ok(files) = value.get::<gdk::FileList>() else {
                return false;
            };
            let paths = local_paths(&files);
            if !contains_font(&paths) {
                return false;
            }
            let Some(shell) = weak.upgrade() else {
                return false;
            };
            // The drag source is waiting on our answer; install after returning.
            glib::idle_add_local_once(move || shell.install_dropped(paths));
            true
        });

        widget.add_controller(target);
    }

    /// Right-click a row to get its removal action.
    pub fn setup_context_menu(shell: &Rc<FontViewerWindow>) {
        let list_box = shell.list_box().clone();
        let action = Button::new();
        action.add_css_class("flat");
        let popover = Popover::builder()
            .child(&action)
            .has_arrow(false)
            .position(PositionType::Bottom)
            .build();
        popover.set_parent(&list_box);

        let menu_target: Rc<RefCell<Option<PathBuf>>> = Rc::new(RefCell::new(None));

        let click = GestureClick::new();
        click.set_button(gdk::BUTTON_SECONDARY);

        let weak = Rc::downgrade(shell);
        let popover_open = popover.clone();
        let action_label = action.clone();
        let target_open = Rc::clone(&menu_target);
        click.connect_pressed(move |gesture, _, x, y| {
            let Some(shell) = weak.upgrade() else {
                return;
            };
            let Some(row) = shell.list_box().row_at_y(y as i32) else {
                return;
            };
            let Some(path) = shell.path_at(row.index()) else {
                return;
            };
            gesture.set_state(gtk4::EventSequenceState::Claimed);

            let prompt = shell.removal_prompt(&path);
            action_label.set_label(prompt.label);
            target_open.replace(Some(path));
            popover_open.set_pointing_to(Some(&gdk::Rectangle::new(x as i32, y as i32, 1, 1)));
            popover_open.popup();
        });
        list_box.add_controller(click);

        let weak = Rc::downgrade(shell);
        let popover_close = popover.clone();
        action.connect_clicked(move |_| {
            popover_close.popdown();
            let Some(path) = menu_target.take() else {
                return;
            };
            if let Some(shell) = weak.upgrade() {
                shell.request_removal(path);
            }
        });

        list_box.connect_destroy(move |_| popover.unparent());
    }
}
