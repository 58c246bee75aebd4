mod terminal;

pub use crate::app::WallpickCliApp;
pub use crate::terminal::{FixedChooser, Terminal};

mod app {
    use anyhow::Result;
    use std::io::{BufRead, Write};
    use std::path::PathBuf;

    use crate::terminal::{FixedChooser, Terminal};
    use wallpick_core::desktop::PictureDirPermissions;
    use wallpick_core::{DesktopApplier, Notice, PickStatus, PlatformProfile, Screen, WallpaperTarget};

    pub struct WallpickCliApp<R, W> {
        screen: Screen,
        terminal: Terminal<R, W>,
        applier: DesktopApplier,
    }

    impl<R: BufRead, W: Write> WallpickCliApp<R, W> {
        pub fn new(profile: PlatformProfile, applier: DesktopApplier, input: R, output: W) -> Self {
            log::info!(
                "Wallpick CLI using {} with {:?} wallpapers",
                profile.media_permission.id(),
                profile.wallpaper_api
            );
            Self {
                screen: Screen::new(profile),
                terminal: Terminal::new(input, output, PictureDirPermissions::new()),
                applier,
            }
        }

        pub fn with_terminal(profile: PlatformProfile, applier: DesktopApplier, terminal: Terminal<R, W>) -> Self {
            Self {
                screen: Screen::new(profile),
                terminal,
                applier,
            }
        }

        pub fn screen(&self) -> &Screen {
            &self.screen
        }

        pub fn into_terminal(self) -> Terminal<R, W> {
            self.terminal
        }

        pub fn pick(&mut self) -> PickStatus {
            self.screen.pick(&self.terminal)
        }

        /// Treat `images` as the picker's answer.
        pub fn pick_paths(&mut self, images: Vec<PathBuf>) -> PickStatus {
            self.terminal.preset_pick(images);
            self.screen.pick(&self.terminal)
        }

        pub fn set_background(&mut self) -> Option<Notice> {
            self.screen.set_background(&self.terminal, &self.applier, &self.terminal)
        }

        pub fn set_background_to(&mut self, target: WallpaperTarget) -> Option<Notice> {
            self.screen
                .set_background(&FixedChooser(target), &self.applier, &self.terminal)
        }

        fn selection_summary(&self) -> String {
            let selection = self.screen.selection();
            match selection.first() {
                None => "(no image)".to_string(),
                Some(first) if selection.len() == 1 => first.to_string(),
                Some(first) => format!("{} (+{} more)", first, selection.len() - 1),
            }
        }

        fn show_menu(&self) -> Result<()> {
            let preview = self.terminal.preview().unwrap_or_else(|| "(none)".to_string());
            self.terminal.say("\n=== Wallpick - Gallery Wallpaper Setter ===")?;
            self.terminal.say(&format!("Selected: {}", self.selection_summary()))?;
            self.terminal.say(&format!("Preview: {}", preview))?;
            self.terminal.say("")?;
            self.terminal.say("1. Pick images")?;
            self.terminal.say("2. Set background")?;
            self.terminal.say("3. Exit")?;
            Ok(())
        }

        pub fn run(&mut self) -> Result<()> {
            loop {
                self.show_menu()?;

                let Some(input) = self.terminal.prompt("\nSelect an option (1-3): ")? else {
                    break;
                };

                match input.as_str() {
                    "1" => {
                        let status = self.pick();
                        log::debug!("Pick finished: {:?}", status);
                    }
                    "2" => {
                        let notice = self.set_background();
                        log::debug!("Set background finished: {:?}", notice);
                    }
                    "3" => {
                        self.terminal.say("Exiting Wallpick...")?;
                        break;
                    }
                    _ => {
                        self.terminal.say("Invalid option. Please select 1-3.")?;
                    }
                }
            }

            Ok(())
        }
    }

}
