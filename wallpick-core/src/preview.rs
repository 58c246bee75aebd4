use anyhow::Result;

use crate::selection::{ImageReference, SelectedImageList};

/// The view area that shows the current image.
pub trait PreviewRenderer {
    fn show(&self, image: &ImageReference) -> Result<()>;

    /// Blank the view after an image could not be shown.
    fn show_placeholder(&self) {}
}

/// Project the first selected image onto `renderer`. An empty list leaves
/// the view untouched; a display failure falls back to the placeholder.
pub fn render<R: PreviewRenderer + ?Sized>(renderer: &R, list: &SelectedImageList) {
    let Some(image) = list.first() else {
        return;
    };

    if let Err(e) = renderer.show(image) {
        log::warn!("Could not preview {}: {:#}", image, e);
        renderer.show_placeholder();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingRenderer {
        fail: bool,
        shown: RefCell<Vec<String>>,
        placeholders: RefCell<usize>,
    }

    impl PreviewRenderer for RecordingRenderer {
        fn show(&self, image: &ImageReference) -> Result<()> {
            self.shown.borrow_mut().push(image.locator().to_string());
            if self.fail {
                anyhow::bail!("corrupt image");
            }
            Ok(())
        }

        fn show_placeholder(&self) {
            *self.placeholders.borrow_mut() += 1;
        }
    }

    #[test]
    fn shows_only_the_first_image() {
        let renderer = RecordingRenderer::default();
        let list = SelectedImageList::new(vec![
            ImageReference::new("one"),
            ImageReference::new("two"),
        ]);
        render(&renderer, &list);
        assert_eq!(*renderer.shown.borrow(), vec!["one".to_string()]);
        assert_eq!(*renderer.placeholders.borrow(), 0);
    }

    #[test]
    fn empty_list_is_a_no_op() {
        let renderer = RecordingRenderer::default();
        render(&renderer, &SelectedImageList::default());
        assert!(renderer.shown.borrow().is_empty());
        assert_eq!(*renderer.placeholders.borrow(), 0);
    }

    #[test]
    fn display_failure_falls_back_to_placeholder() {
        let renderer = RecordingRenderer {
            fail: true,
            ..Default::default()
        };
        render(&renderer, &SelectedImageList::new(vec![ImageReference::new("bad")]));
        assert_eq!(*renderer.placeholders.borrow(), 1);
    }
}
