use crate::applier::{Applied, ApplyRequest, MediaDecoder, WallpaperApplier, WallpaperService};
use crate::error::{ApplyError, WallpaperError};
use crate::notice::{Notice, Notifier};
use crate::permission::{PermissionGate, PermissionService};
use crate::picker::{ImagePicker, PickOutcome, PickRequest};
use crate::platform::PlatformProfile;
use crate::preview::{self, PreviewRenderer};
use crate::selection::SelectedImageList;
use crate::target::{ChooserState, TargetChooser, WallpaperTarget, CHOOSER_TITLE};

/// Collaborators the "pick" action talks to.
pub trait PickServices: PermissionService + ImagePicker + PreviewRenderer + Notifier {}

impl<T> PickServices for T where T: PermissionService + ImagePicker + PreviewRenderer + Notifier {}

/// What a pick action ended with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickStatus {
    Picked(usize),
    Cancelled,
    PermissionDenied,
    Busy,
}

/// State of the single wallpaper screen: the current selection, the
/// chooser modal and whether an apply is running.
#[derive(Debug, Clone)]
pub struct Screen {
    gate: PermissionGate,
    selection: SelectedImageList,
    chooser: ChooserState,
    applying: bool,
}

impl Screen {
    pub fn new(profile: PlatformProfile) -> Self {
        Self {
            gate: PermissionGate::new(profile.media_permission),
            selection: SelectedImageList::default(),
            chooser: ChooserState::Idle,
            applying: false,
        }
    }

    pub fn selection(&self) -> &SelectedImageList {
        &self.selection
    }

    pub fn chooser_state(&self) -> ChooserState {
        self.chooser
    }

    pub fn is_applying(&self) -> bool {
        self.applying
    }

    /// Permission gate, picker, then preview. The selection is swapped only
    /// when the picker actually returns a result, and never while the
    /// chooser is open or an apply is running.
    pub fn pick<S: PickServices + ?Sized>(&mut self, services: &S) -> PickStatus {
        if self.applying {
            log::warn!("Pick ignored while a wallpaper is being applied");
            return PickStatus::Busy;
        }
        if self.chooser == ChooserState::ChoicePresented {
            log::warn!("Pick ignored while the target chooser is open");
            return PickStatus::Busy;
        }

        if !self.gate.request_if_needed(services) {
            log::info!("{} denied", self.gate.permission().id());
            services.notify(WallpaperError::PermissionDenied.notice());
            return PickStatus::PermissionDenied;
        }

        let outcome = match services.pick_images(&PickRequest::default()) {
            Ok(outcome) => outcome,
            Err(e) => {
                log::error!("Image picker failed: {:#}", e);
                PickOutcome::Cancelled
            }
        };

        match outcome {
            PickOutcome::Cancelled => {
                log::debug!("Picker cancelled, keeping {} image(s)", self.selection.len());
                PickStatus::Cancelled
            }
            PickOutcome::Picked(result) => {
                self.selection = result.into_selection();
                log::info!("Selected {} image(s)", self.selection.len());
                preview::render(services, &self.selection);
                PickStatus::Picked(self.selection.len())
            }
        }
    }

    /// Open the target chooser. Refused with a notice when nothing is selected.
    pub fn request_background<N: Notifier + ?Sized>(&mut self, notifier: &N) -> bool {
        if self.applying {
            log::warn!("Set background ignored while a wallpaper is being applied");
            return false;
        }
        if self.selection.is_empty() {
            notifier.notify(WallpaperError::NoImageSelected.notice());
            return false;
        }
        self.chooser = ChooserState::ChoicePresented;
        true
    }

    /// Close the chooser. A choice marks an apply as in flight and yields
    /// the work to hand to the applier; a dismissal yields nothing.
    pub fn choose(&mut self, choice: Option<WallpaperTarget>) -> Option<ApplyRequest> {
        if self.chooser != ChooserState::ChoicePresented {
            log::warn!("Target chosen without an open chooser");
            return None;
        }
        self.chooser = ChooserState::Idle;

        let target = choice?;
        let image = self.selection.first()?.clone();
        self.applying = true;
        Some(ApplyRequest { image, target })
    }

    /// Report the result of an apply started by [`Screen::choose`].
    pub fn finish_apply<N: Notifier + ?Sized>(
        &mut self,
        result: &Result<Applied, ApplyError>,
        notifier: &N,
    ) -> Notice {
        self.applying = false;
        let notice = match result {
            Ok(applied) => applied.notice(),
            Err(e) => {
                log::error!("{}", e);
                Notice::SetFailed
            }
        };
        notifier.notify(notice);
        notice
    }

    /// Chooser and applier run back to back on the calling thread.
    pub fn set_background<C, N, D, W>(
        &mut self,
        chooser: &C,
        applier: &WallpaperApplier<D, W>,
        notifier: &N,
    ) -> Option<Notice>
    where
        C: TargetChooser + ?Sized,
        N: Notifier + ?Sized,
        D: MediaDecoder,
        W: WallpaperService<D::Bitmap>,
    {
        if !self.request_background(notifier) {
            return None;
        }

        let choice = match chooser.choose_target(CHOOSER_TITLE, &WallpaperTarget::ALL) {
            Ok(choice) => choice,
            Err(e) => {
                log::error!("Target chooser failed: {:#}", e);
                None
            }
        };

        let request = self.choose(choice)?;
        let result = applier.apply_request(&request);
        Some(self.finish_apply(&result, notifier))
    }
}
