//! Right-hand panel describing the selected font

use fontview_core::FontDetails;
use gtk4::prelude::*;
use gtk4::{Align, Label, Orientation};

const PENDING: &str = "Not selected";

pub struct InfoPanel {
    container: gtk4::Box,
    family: Label,
    style: Label,
    weight: Label,
    italic: Label,
    path: Label,
    size: Label,
}

impl InfoPanel {
    pub fn new() -> Self {
        let container = gtk4::Box::new(Orientation::Vertical, 6);
        container.add_css_class("info-panel");
        container.set_margin_top(12);
        container.set_margin_bottom(12);
        container.set_margin_start(12);
        container.set_margin_end(12);

        let title = Label::new(Some("Font Info"));
        title.add_css_class("panel-title");
        title.set_halign(Align::Start);
        container.append(&title);

        let field = |caption: &str| {
            let heading = Label::new(Some(caption));
            heading.add_css_class("info-caption");
            heading.set_halign(Align::Start);
            let value = Label::new(Some(PENDING));
            value.add_css_class("info-value");
            value.set_halign(Align::Start);
            value.set_wrap(true);
            value.set_wrap_mode(gtk4::pango::WrapMode::WordChar);
            value.set_selectable(true);
            value.set_xalign(0.0);
            container.append(&heading);
            container.append(&value);
            value
        };

        let family = field("Family");
        let style = field("Style");
        let weight = field("Weight");
        let italic = field("Italic");
        let path = field("File path");
        let size = field("File size");

        Self {
            container,
            family,
            style,
            weight,
            italic,
            path,
            size,
        }
    }

    pub fn widget(&self) -> &gtk4::Box {
        &self.container
    }

    pub fn show(&self, details: &FontDetails) {
        self.family.set_text(&details.family);
        self.style.set_text(&details.style);
        self.weight.set_text(&details.weight.to_string());
        self.italic.set_text(details.italic_label());
        self.path.set_text(&details.path.to_string_lossy());
        self.size.set_text(&details.file_size_label());
    }

    pub fn clear(&self) {
        for label in [
            &self.family,
            &self.style,
            &self.weight,
            &self.italic,
            &self.path,
            &self.size,
        ] {
            label.set_text(PENDING);
        }
    }
}
