use anyhow::Result;
use clap::Parser;
use std::io;
use std::path::PathBuf;

use wallpick_cli::WallpickCliApp;
use wallpick_core::desktop::get_desktop_environment;
use wallpick_core::{desktop_applier, Conf, PickStatus, WallpaperTarget};

#[derive(Parser)]
#[command(name = "wallpick-cli")]
#[command(about = "Wallpick - set gallery images as home or lock screen wallpaper")]
#[command(version)]
struct Cli {
    /// Apply to this screen without asking (home, lock or both)
    #[arg(long, requires = "images")]
    target: Option<WallpaperTarget>,

    /// Model an Android API level instead of the current desktop
    #[arg(long)]
    api_level: Option<u32>,

    /// Images to select; the first one is applied
    images: Vec<PathBuf>,
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
    log::info!("Desktop environment: {}", desktop_env);

    let applier = desktop_applier(&conf, &desktop_env, profile);
    let stdin = io::stdin();
    let mut app = WallpickCliApp::new(profile, applier, stdin.lock(), io::stdout());

    if cli.images.is_empty() {
        return app.run();
    }

    if let PickStatus::Picked(count) = app.pick_paths(cli.images) {
        log::info!("{} image(s) selected from the command line", count);
    }
    match cli.target {
        Some(target) => {
            app.set_background_to(target);
        }
        None => {
            app.set_background();
        }
    }

    Ok(())
}
