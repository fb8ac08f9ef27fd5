// src/main.rs
use anyhow::Result;
use clap::Parser;
use fontview::{logging, CliArgs};
use fontview_gtk4::{install_stylesheet, FontViewerWindow};
use gtk4::prelude::*;
use gtk4::Application;
use tracing::info;

const APP_ID: &str = "com.example.fontview";

fn main() -> Result<()> {
    let args = CliArgs::parse();
    logging::init(args.log_filter.as_deref())?;
    args.validate()?;

    let config = args.to_config()?;
    info!("Managed fonts directory: {}", config.fonts_dir().display());

    let app = Application::builder().application_id(APP_ID).build();

    app.connect_activate(move |app| {
        install_stylesheet();
        let window = FontViewerWindow::new(app, &config);
        window.present();
    });

    // Our own flags were consumed by clap; GTK gets none.
    let status = app.run_with_args::<&str>(&[]);
    info!("Exiting with status {:?}", status);
    Ok(())
}
