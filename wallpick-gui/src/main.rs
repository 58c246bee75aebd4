use anyhow::Result;
use clap::Parser;
use eframe::NativeOptions;

use wallpick_core::desktop::{get_desktop_environment, PictureDirPermissions};
use wallpick_core::{desktop_applier, Conf};
use wallpick_gui::{GuiServices, WallpickApp};

#[derive(Parser)]
#[command(name = "wallpick-gui")]
#[command(about = "Wallpick - set gallery images as home or lock screen wallpaper")]
#[command(version)]
struct Cli {
    /// Model an Android API level instead of the current desktop
    #[arg(long)]
    api_level: Option<u32>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let conf = Conf::new()?;
    let mut settings = conf.load_settings()?;
    if cli.api_level.is_some() {
        settings.api_level = cli.api_level;
    }

    env_logger::Builder::new()
        .parse_filters(settings.log_filter())
        .parse_env("RUST_LOG")
        .init();

    let desktop_env = get_desktop_environment();
    let profile = settings.profile(&desktop_env);
    log::info!(
        "Starting Wallpick on {} ({:?} wallpapers)",
        desktop_env,
        profile.wallpaper_api
    );

    let app = WallpickApp::new(
        profile,
        desktop_applier(&conf, &desktop_env, profile),
        GuiServices::new(PictureDirPermissions::new()),
    );

    let native_options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Wallpick")
            .with_inner_size([420.0, 760.0]),
        ..Default::default()
    };

    if let Err(e) = app.run(native_options) {
        log::error!("Wallpick exited with an error: {}", e);
        return Err(anyhow::anyhow!("eframe error: {}", e));
    }
    Ok(())
}
