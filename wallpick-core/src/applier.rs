use std::io;

use crate::error::{ApplyError, ApplyStage};
use crate::notice::Notice;
use crate::platform::WallpaperApi;
use crate::selection::ImageReference;
use crate::target::{WallpaperFlag, WallpaperTarget};

/// Resolves an image reference to pixel data. Blocking and I/O bound.
pub trait MediaDecoder {
    type Bitmap;

    fn decode(&self, image: &ImageReference) -> io::Result<Self::Bitmap>;
}

/// Platform wallpaper service.
pub trait WallpaperService<B> {
    /// `flag` is `None` on platforms that only have one wallpaper.
    fn set_bitmap(&self, bitmap: &B, flag: Option<WallpaperFlag>) -> io::Result<()>;
}

/// A successful apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    pub target: WallpaperTarget,
    pub submissions: usize,
}

impl Applied {
    pub fn notice(&self) -> Notice {
        match self.target {
            WallpaperTarget::Home => Notice::HomeScreenSet,
            WallpaperTarget::Lock => Notice::LockScreenSet,
            WallpaperTarget::Both => Notice::BothScreensSet,
        }
    }
}

/// An image and target handed from the screen to the applier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyRequest {
    pub image: ImageReference,
    pub target: WallpaperTarget,
}

pub struct WallpaperApplier<D, W> {
    decoder: D,
    service: W,
    api: WallpaperApi,
}

impl<D, W> WallpaperApplier<D, W>
where
    D: MediaDecoder,
    W: WallpaperService<D::Bitmap>,
{
    pub fn new(decoder: D, service: W, api: WallpaperApi) -> Self {
        Self { decoder, service, api }
    }

    pub fn apply_request(&self, request: &ApplyRequest) -> Result<Applied, ApplyError> {
        self.apply(&request.image, request.target)
    }

    /// Decode once, then submit the same bitmap to every screen `target`
    /// covers. A failure part-way leaves earlier screens set.
    pub fn apply(&self, image: &ImageReference, target: WallpaperTarget) -> Result<Applied, ApplyError> {
        log::info!("Applying {} to {}", image, target);

        let bitmap = self.decoder.decode(image).map_err(|source| {
            log::error!("Failed to decode {}: {}", image, source);
            ApplyError {
                stage: ApplyStage::Decode,
                applied: Vec::new(),
                source,
            }
        })?;

        let flags: Vec<Option<WallpaperFlag>> = match self.api {
            WallpaperApi::Targeted => target.flags().iter().copied().map(Some).collect(),
            WallpaperApi::Undifferentiated => vec![None],
        };

        let mut applied = Vec::new();
        for flag in &flags {
            if let Err(source) = self.service.set_bitmap(&bitmap, *flag) {
                if applied.is_empty() {
                    log::error!("Wallpaper service rejected {:?}: {}", flag, source);
                } else {
                    log::warn!(
                        "Wallpaper only partially applied: {:?} set, {:?} failed: {}",
                        applied,
                        flag,
                        source
                    );
                }
                return Err(ApplyError {
                    stage: ApplyStage::Submit(*flag),
                    applied,
                    source,
                });
            }
            if let Some(flag) = flag {
                applied.push(*flag);
            }
        }

        log::info!("Wallpaper set for {} ({} submission(s))", target, flags.len());
        Ok(Applied {
            target,
            submissions: flags.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, PartialEq)]
    struct Bitmap(String);

    #[derive(Default)]
    struct FakeDecoder {
        fail: bool,
        decoded: RefCell<Vec<String>>,
    }

    impl MediaDecoder for FakeDecoder {
        type Bitmap = Rc<Bitmap>;

        fn decode(&self, image: &ImageReference) -> io::Result<Rc<Bitmap>> {
            self.decoded.borrow_mut().push(image.locator().to_string());
            if self.fail {
                return Err(io::Error::new(io::ErrorKind::InvalidData, "corrupt"));
            }
            Ok(Rc::new(Bitmap(image.locator().to_string())))
        }
    }

    #[derive(Default)]
    struct FakeService {
        fail_on: Option<Option<WallpaperFlag>>,
        submitted: RefCell<Vec<(Rc<Bitmap>, Option<WallpaperFlag>)>>,
    }

    impl WallpaperService<Rc<Bitmap>> for FakeService {
        fn set_bitmap(&self, bitmap: &Rc<Bitmap>, flag: Option<WallpaperFlag>) -> io::Result<()> {
            if self.fail_on == Some(flag) {
                return Err(io::Error::new(io::ErrorKind::PermissionDenied, "refused"));
            }
            self.submitted.borrow_mut().push((Rc::clone(bitmap), flag));
            Ok(())
        }
    }

    fn image() -> ImageReference {
        ImageReference::new("content://media/1")
    }

    fn flags_of(service: &FakeService) -> Vec<Option<WallpaperFlag>> {
        service.submitted.borrow().iter().map(|(_, f)| *f).collect()
    }

    #[test]
    fn home_is_one_system_submission() {
        let applier = WallpaperApplier::new(FakeDecoder::default(), FakeService::default(), WallpaperApi::Targeted);
        let applied = applier.apply(&image(), WallpaperTarget::Home).unwrap();
        assert_eq!(flags_of(&applier.service), vec![Some(WallpaperFlag::System)]);
        assert_eq!(applied.notice(), Notice::HomeScreenSet);
        assert_eq!(applied.notice().message(), "Home Screen Set!");
    }

    #[test]
    fn lock_is_one_lock_submission() {
        let applier = WallpaperApplier::new(FakeDecoder::default(), FakeService::default(), WallpaperApi::Targeted);
        let applied = applier.apply(&image(), WallpaperTarget::Lock).unwrap();
        assert_eq!(flags_of(&applier.service), vec![Some(WallpaperFlag::Lock)]);
        assert_eq!(applied.notice().message(), "Lock Screen Set!");
    }

    #[test]
    fn both_decodes_once_and_reuses_the_bitmap() {
        let applier = WallpaperApplier::new(FakeDecoder::default(), FakeService::default(), WallpaperApi::Targeted);
        let applied = applier.apply(&image(), WallpaperTarget::Both).unwrap();

        assert_eq!(applier.decoder.decoded.borrow().len(), 1);
        assert_eq!(
            flags_of(&applier.service),
            vec![Some(WallpaperFlag::System), Some(WallpaperFlag::Lock)]
        );
        let submitted = applier.service.submitted.borrow();
        assert!(Rc::ptr_eq(&submitted[0].0, &submitted[1].0));
        assert_eq!(applied.submissions, 2);
        assert_eq!(applied.notice().message(), "Wallpaper Set for Both Screens!");
    }

    #[test]
    fn decode_failure_submits_nothing() {
        let decoder = FakeDecoder {
            fail: true,
            ..Default::default()
        };
        let applier = WallpaperApplier::new(decoder, FakeService::default(), WallpaperApi::Targeted);
        for target in WallpaperTarget::ALL {
            let err = applier.apply(&image(), target).unwrap_err();
            assert_eq!(err.stage, ApplyStage::Decode);
            assert!(!err.is_partial());
        }
        assert!(applier.service.submitted.borrow().is_empty());
    }

    #[test]
    fn lock_failure_after_home_leaves_home_applied() {
        let service = FakeService {
            fail_on: Some(Some(WallpaperFlag::Lock)),
            ..Default::default()
        };
        let applier = WallpaperApplier::new(FakeDecoder::default(), service, WallpaperApi::Targeted);
        let err = applier.apply(&image(), WallpaperTarget::Both).unwrap_err();

        assert_eq!(err.stage, ApplyStage::Submit(Some(WallpaperFlag::Lock)));
        assert_eq!(err.applied, vec![WallpaperFlag::System]);
        assert_eq!(flags_of(&applier.service), vec![Some(WallpaperFlag::System)]);
    }

    #[test]
    fn undifferentiated_api_submits_once_without_flag() {
        let applier = WallpaperApplier::new(
            FakeDecoder::default(),
            FakeService::default(),
            WallpaperApi::Undifferentiated,
        );
        let notices: Vec<Notice> = WallpaperTarget::ALL
            .into_iter()
            .map(|target| {
                let applied = applier.apply(&image(), target).unwrap();
                assert_eq!(applied.submissions, 1);
                applied.notice()
            })
            .collect();

        assert_eq!(flags_of(&applier.service), vec![None, None, None]);
        assert_eq!(
            notices,
            vec![Notice::HomeScreenSet, Notice::LockScreenSet, Notice::BothScreensSet]
        );
        assert_eq!(notices[2].message(), "Wallpaper Set for Both Screens!");
    }
}
