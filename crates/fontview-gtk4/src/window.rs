//! Main window: widget tree and the handlers wiring it to the viewer core

use crate::cairo_preview::paint_preview;
use crate::dialogs;
use crate::info_panel::InfoPanel;
use crate::input::InputHandler;
use fontview_core::constants::{MAX_FONT_SIZE, MIN_FONT_SIZE};
use fontview_core::{DropOutcome, FontViewer, RemovalPrompt, RenderTarget, ViewerConfig};
use gtk4::prelude::*;
use gtk4::{
    gdk, Align, Application, ApplicationWindow, Button, CssProvider, DrawingArea, Entry,
    HeaderBar, Label, ListBox, Orientation, Overlay, Paned, PolicyType, Scale, ScrolledWindow,
    SelectionMode,
};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing::{debug, info, warn};

const DEFAULT_WIDTH: i32 = 1200;
const DEFAULT_HEIGHT: i32 = 700;
const MIN_WIDTH: i32 = 900;
const MIN_HEIGHT: i32 = 600;
const LIST_PANE_WIDTH: i32 = 280;
const INFO_PANE_WIDTH: i32 = 240;

const STYLESHEET: &str = "
.sidebar, .info-panel { background-color: #ffffff; }
.panel-title { font-weight: bold; font-size: 15px; color: #1a2530; }
.info-caption { color: #586a7a; font-size: 12px; margin-top: 6px; }
.info-value { color: #1a2530; }
.preview { background-color: #ffffff; border-radius: 12px; }
.preview-hint { color: #586a7a; font-size: 16px; }
.size-value { min-width: 40px; font-weight: bold; }
";

/// Register the application stylesheet on the default display.
pub fn install_stylesheet() {
    let css = CssProvider::new();
    css.load_from_data(STYLESHEET);

    match gdk::Display::default() {
        Some(display) => gtk4::style_context_add_provider_for_display(
            &display,
            &css,
            gtk4::STYLE_PROVIDER_PRIORITY_APPLICATION,
        ),
        None => warn!("No display available, skipping stylesheet"),
    }
}

/// The viewer window. Owns the widget tree and the core state it drives.
pub struct FontViewerWindow {
    window: ApplicationWindow,
    list_box: ListBox,
    entry: Entry,
    slider: Scale,
    size_label: Label,
    area: DrawingArea,
    hint: Label,
    info: InfoPanel,
    viewer: RefCell<FontViewer>,
}

impl FontViewerWindow {
    pub fn new(app: &Application, config: &ViewerConfig) -> Rc<Self> {
        let viewer = FontViewer::startup(config);
        let initial_size = viewer.preview_state().font_size();

        let window = ApplicationWindow::builder()
            .application(app)
            .title("Font Viewer")
            .default_width(DEFAULT_WIDTH)
            .default_height(DEFAULT_HEIGHT)
            .build();
        window.set_size_request(MIN_WIDTH, MIN_HEIGHT);

        let list_box = ListBox::new();
        list_box.set_selection_mode(SelectionMode::Single);

        let entry = Entry::builder()
            .placeholder_text("Type some text to preview")
            .build();

        let slider = Scale::with_range(
            Orientation::Horizontal,
            MIN_FONT_SIZE as f64,
            MAX_FONT_SIZE as f64,
            1.0,
        );
        slider.set_digits(0);
        slider.set_draw_value(false);
        slider.set_value(initial_size as f64);
        slider.set_hexpand(true);

        let size_label = Label::new(Some(&initial_size.to_string()));
        size_label.add_css_class("size-value");

        let area = DrawingArea::new();
        area.set_hexpand(true);
        area.set_vexpand(true);
        area.add_css_class("preview");

        let hint = Label::new(Some(&config.placeholder_text));
        hint.add_css_class("preview-hint");
        hint.set_wrap(true);
        hint.set_justify(gtk4::Justification::Center);
        hint.set_can_target(false);

        let shell = Rc::new(Self {
            window,
            list_box,
            entry,
            slider,
            size_label,
            area,
            hint,
            info: InfoPanel::new(),
            viewer: RefCell::new(viewer),
        });

        shell.layout();
        shell.append_new_rows();
        shell.connect_signals();
        shell.refresh_preview();
        shell
    }

    pub fn present(&self) {
        self.window.present();
    }

    pub fn window(&self) -> &ApplicationWindow {
        &self.window
    }

    pub(crate) fn list_box(&self) -> &ListBox {
        &self.list_box
    }

    fn layout(self: &Rc<Self>) {
        let header = HeaderBar::new();
        let about = Button::with_label("About");
        let weak = Rc::downgrade(self);
        about.connect_clicked(move |_| {
            if let Some(shell) = weak.upgrade() {
                dialogs::show_about(&shell.window);
            }
        });
        header.pack_end(&about);
        self.window.set_titlebar(Some(&header));

        // Font list
        let sidebar = gtk4::Box::new(Orientation::Vertical, 8);
        sidebar.add_css_class("sidebar");
        sidebar.set_margin_top(12);
        sidebar.set_margin_bottom(12);
        sidebar.set_margin_start(12);
        sidebar.set_margin_end(12);

        let title = Label::new(Some("Fonts"));
        title.add_css_class("panel-title");
        title.set_halign(Align::Start);

        let scroller = ScrolledWindow::builder()
            .hscrollbar_policy(PolicyType::Never)
            .vexpand(true)
            .child(&self.list_box)
            .build();

        let add = Button::with_label("Add Fonts...");
        let weak = Rc::downgrade(self);
        add.connect_clicked(move |_| {
            let Some(shell) = weak.upgrade() else {
                return;
            };
            let chosen = Rc::downgrade(&shell);
            dialogs::choose_font_files(&shell.window, move |paths| {
                if let Some(shell) = chosen.upgrade() {
                    shell.add_files(paths);
                }
            });
        });

        let drop_hint = Label::new(Some("Drop font files on the list to install them"));
        drop_hint.add_css_class("info-caption");
        drop_hint.set_wrap(true);

        sidebar.append(&title);
        sidebar.append(&scroller);
        sidebar.append(&add);
        sidebar.append(&drop_hint);
        InputHandler::setup_drop(&scroller, self);

        // Preview
        let center = gtk4::Box::new(Orientation::Vertical, 8);
        center.set_margin_top(12);
        center.set_margin_bottom(12);
        center.set_margin_start(12);
        center.set_margin_end(12);

        let overlay = Overlay::new();
        overlay.set_child(Some(&self.area));
        overlay.add_overlay(&self.hint);

        let size_row = gtk4::Box::new(Orientation::Horizontal, 8);
        size_row.append(&Label::new(Some("Font size:")));
        size_row.append(&self.slider);
        size_row.append(&self.size_label);

        center.append(&self.entry);
        center.append(&overlay);
        center.append(&size_row);

        // Three panes: list | preview | info
        let inner = Paned::new(Orientation::Horizontal);
        inner.set_start_child(Some(&center));
        inner.set_end_child(Some(self.info.widget()));
        inner.set_shrink_start_child(false);
        inner.set_shrink_end_child(false);
        inner.set_resize_end_child(false);
        inner.set_position(DEFAULT_WIDTH - LIST_PANE_WIDTH - INFO_PANE_WIDTH);

        let outer = Paned::new(Orientation::Horizontal);
        outer.set_start_child(Some(&sidebar));
        outer.set_end_child(Some(&inner));
        outer.set_shrink_start_child(false);
        outer.set_resize_start_child(false);
        outer.set_position(LIST_PANE_WIDTH);

        self.window.set_child(Some(&outer));
    }

    fn connect_signals(self: &Rc<Self>) {
        let weak = Rc::downgrade(self);
        self.list_box.connect_row_selected(move |_, row| {
            let (Some(shell), Some(row)) = (weak.upgrade(), row) else {
                return;
            };
            if let Some(path) = shell.path_at(row.index()) {
                shell.select(&path);
            }
        });

        let weak = Rc::downgrade(self);
        self.entry.connect_changed(move |entry| {
            if let Some(shell) = weak.upgrade() {
                shell.viewer.borrow_mut().set_preview_text(&entry.text());
                shell.refresh_preview();
            }
        });

        let weak = Rc::downgrade(self);
        self.slider.connect_value_changed(move |slider| {
            if let Some(shell) = weak.upgrade() {
                let size = shell
                    .viewer
                    .borrow_mut()
                    .set_font_size(slider.value().round() as u32);
                shell.size_label.set_text(&size.to_string());
                shell.refresh_preview();
            }
        });

        let weak = Rc::downgrade(self);
        self.area.set_draw_func(move |area, cr, width, height| {
            let Some(shell) = weak.upgrade() else {
                return;
            };
            let target = RenderTarget::new(width as f64, height as f64, area.scale_factor() as f64);
            let rendered = shell.viewer.borrow_mut().render_preview(target);
            match rendered {
                Some(Ok(image)) => {
                    if let Err(e) = paint_preview(cr, &image) {
                        warn!("Failed to paint preview: {}", e);
                    }
                }
                Some(Err(e)) => warn!("{}", e),
                None => {}
            }
        });

        InputHandler::setup_context_menu(self);

        // The window keeps the shell alive until it is destroyed.
        let shell = Rc::clone(self);
        self.window.connect_close_request(move |_| {
            shell.viewer.borrow_mut().shutdown();
            info!("Viewer closed");
            glib::Propagation::Proceed
        });
    }

    pub(crate) fn path_at(&self, index: i32) -> Option<PathBuf> {
        let index = usize::try_from(index).ok()?;
        self.viewer
            .borrow()
            .entries()
            .get(index)
            .map(|entry| entry.file_path().to_path_buf())
    }

    pub(crate) fn removal_prompt(&self, path: &Path) -> RemovalPrompt {
        self.viewer.borrow().removal_prompt(path)
    }

    /// Rows only ever get appended by the core, so new entries sit past the last row.
    fn append_new_rows(&self) {
        let mut rows = 0;
        while self.list_box.row_at_index(rows).is_some() {
            rows += 1;
        }

        let fresh: Vec<(String, PathBuf)> = self
            .viewer
            .borrow()
            .entries()
            .iter()
            .skip(rows as usize)
            .map(|entry| (entry.display_name().to_string(), entry.file_path().to_path_buf()))
            .collect();

        for (name, path) in fresh {
            let label = Label::new(Some(&name));
            label.set_xalign(0.0);
            label.set_margin_top(8);
            label.set_margin_bottom(8);
            label.set_margin_start(6);
            label.set_tooltip_text(Some(&path.to_string_lossy()));
            self.list_box.append(&label);
        }
    }

    fn select(&self, path: &Path) {
        let result = self.viewer.borrow_mut().select_font(path);
        match result {
            Ok(details) => {
                debug!("Selected {} ({})", details.family, details.style);
                self.info.show(&details);
            }
            Err(e) => {
                self.info.clear();
                dialogs::show_error(&self.window, "Could not load font", &e.to_string());
            }
        }
        self.refresh_preview();
    }

    fn refresh_preview(&self) {
        let idle = self.viewer.borrow().preview_state().active_family().is_none();
        self.hint.set_visible(idle);
        self.area.queue_draw();
    }

    fn add_files(&self, paths: Vec<PathBuf>) {
        let result = self.viewer.borrow_mut().add_files_from_dialog(paths);
        self.append_new_rows();
        match result {
            Ok(added) => info!("Added {} fonts from dialog", added.len()),
            Err(e) => dialogs::show_error(&self.window, "Could not save font list", &e.to_string()),
        }
    }

    pub(crate) fn install_dropped(&self, paths: Vec<PathBuf>) {
        let outcomes = self.viewer.borrow_mut().install_dropped_files(paths);
        self.append_new_rows();

        let failures: Vec<String> = outcomes
            .into_iter()
            .filter_map(|outcome| match outcome {
                DropOutcome::Failed(e) => Some(e.to_string()),
                _ => None,
            })
            .collect();
        if !failures.is_empty() {
            dialogs::show_error(&self.window, "Could not install font", &failures.join("\n"));
        }
    }

    /// Remove `path`, asking first when that deletes the file from disk.
    pub(crate) fn request_removal(self: &Rc<Self>, path: PathBuf) {
        let prompt = self.removal_prompt(&path);
        if !prompt.needs_confirmation {
            self.remove(&path);
            return;
        }
        let weak = Rc::downgrade(self);
        dialogs::confirm_deletion(&self.window, &prompt.file_name, move || {
            if let Some(shell) = weak.upgrade() {
                shell.remove(&path);
            }
        });
    }

    fn remove(&self, path: &Path) {
        let index = self
            .viewer
            .borrow()
            .entries()
            .iter()
            .position(|entry| entry.file_path() == path);
        let result = self.viewer.borrow_mut().remove_entry(path);

        match result {
            Ok(Some(_)) => {
                if let Some(row) = index.and_then(|i| self.list_box.row_at_index(i as i32)) {
                    self.list_box.remove(&row);
                }
            }
            Ok(None) => debug!("{:?} was no longer listed", path),
            Err(e) => dialogs::show_error(&self.window, "Delete failed", &e.to_string()),
        }
    }
}
