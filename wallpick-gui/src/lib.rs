use eframe::{egui, NativeOptions};
use std::io;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;

use wallpick_core::{
    Applied, ApplyError, ApplyStage, ChooserState, DesktopApplier, PlatformProfile, Screen,
    WallpaperTarget, CHOOSER_TITLE,
};

mod services;

pub use services::{GuiServices, Preview, Toast};

type ApplyResult = Result<Applied, ApplyError>;

/// The single wallpaper screen: a preview, "Pick Images" and
/// "Set Background", the target chooser and a toast.
pub struct WallpickApp {
    screen: Screen,
    services: GuiServices,
    applier: Arc<DesktopApplier>,
    pending: Option<Receiver<ApplyResult>>,
}

impl WallpickApp {
    pub fn new(profile: PlatformProfile, applier: DesktopApplier, services: GuiServices) -> Self {
        Self {
            screen: Screen::new(profile),
            services,
            applier: Arc::new(applier),
            pending: None,
        }
    }

    pub fn run(self, options: NativeOptions) -> Result<(), eframe::Error> {
        eframe::run_native(
            "Wallpick",
            options,
            Box::new(move |cc| {
                egui_extras::install_image_loaders(&cc.egui_ctx);
                Ok(Box::new(self))
            }),
        )
    }

    /// Decode and submit off the UI thread; the result comes back through
    /// `pending` and is reported on the next frame.
    fn start_apply(&mut self, ctx: &egui::Context, target: Option<WallpaperTarget>) {
        let Some(request) = self.screen.choose(target) else {
            return;
        };

        let (tx, rx) = mpsc::channel();
        let applier = Arc::clone(&self.applier);
        let ctx = ctx.clone();
        std::thread::spawn(move || {
            log::info!("Applying wallpaper in background thread");
            let result = applier.apply_request(&request);
            if tx.send(result).is_err() {
                log::error!("Screen went away before the wallpaper result arrived");
            }
            ctx.request_repaint();
        });
        self.pending = Some(rx);
    }

    fn poll_apply(&mut self) {
        let Some(rx) = &self.pending else {
            return;
        };

        let result = match rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Disconnected) => Err(ApplyError {
                stage: ApplyStage::Submit(None),
                applied: Vec::new(),
                source: io::Error::new(io::ErrorKind::Other, "wallpaper worker stopped"),
            }),
        };

        self.pending = None;
        self.screen.finish_apply(&result, &self.services);
    }

    fn ui_preview(&self, ui: &mut egui::Ui) {
        let size = egui::vec2(ui.available_width(), (ui.available_height() - 140.0).max(120.0));
        match self.services.preview() {
            Preview::Image(uri) => {
                ui.add_sized(size, egui::Image::new(uri).maintain_aspect_ratio(true).max_size(size));
            }
            Preview::Placeholder => {
                ui.add_sized(size, egui::Label::new("Preview unavailable"));
            }
            Preview::Empty => {
                ui.add_sized(size, egui::Label::new("No image selected"));
            }
        }
    }

    /// The chooser window is not modal, so the screen buttons stay disabled
    /// while it is open.
    fn buttons_enabled(&self) -> bool {
        !self.screen.is_applying() && self.screen.chooser_state() == ChooserState::Idle
    }

    fn ui_buttons(&mut self, ui: &mut egui::Ui) {
        let busy = self.screen.is_applying();
        let enabled = self.buttons_enabled();
        let button_size = egui::vec2(ui.available_width(), 48.0);

        if ui
            .add_enabled(enabled, egui::Button::new("Pick Images").min_size(button_size))
            .clicked()
        {
            let status = self.screen.pick(&self.services);
            log::debug!("Pick finished: {:?}", status);
        }

        ui.add_space(8.0);

        if ui
            .add_enabled(enabled, egui::Button::new("Set Background").min_size(button_size))
            .clicked()
        {
            self.screen.request_background(&self.services);
        }

        if busy {
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Setting wallpaper...");
            });
        }
    }

    fn ui_chooser(&mut self, ctx: &egui::Context) {
        if self.screen.chooser_state() != ChooserState::ChoicePresented {
            return;
        }

        let mut open = true;
        let mut chosen = None;
        egui::Window::new(CHOOSER_TITLE)
            .id(egui::Id::new("wallpick_target_chooser"))
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .open(&mut open)
            .show(ctx, |ui| {
                for target in WallpaperTarget::ALL {
                    if ui
                        .add(egui::Button::new(target.label()).min_size(egui::vec2(200.0, 40.0)))
                        .clicked()
                    {
                        chosen = Some(target);
                    }
                }
            });

        if chosen.is_some() || !open {
            self.start_apply(ctx, chosen);
        }
    }

    fn ui_toast(&self, ctx: &egui::Context) {
        let Some(toast) = self.services.toast() else {
            return;
        };

        egui::Area::new(egui::Id::new("wallpick_toast"))
            .anchor(egui::Align2::CENTER_BOTTOM, egui::vec2(0.0, -48.0))
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    let text = egui::RichText::new(toast.notice.message());
                    if toast.notice.is_error() {
                        ui.label(text.color(ui.visuals().error_fg_color));
                    } else {
                        ui.label(text);
                    }
                });
            });
        ctx.request_repaint_after(std::time::Duration::from_millis(250));
    }
}

impl eframe::App for WallpickApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_apply();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("Wallpick");
                ui.add_space(8.0);
                self.ui_preview(ui);
                ui.add_space(8.0);
                self.ui_buttons(ui);
            });
        });

        self.ui_chooser(ctx);
        self.ui_toast(ctx);
    }
}
