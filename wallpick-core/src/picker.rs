use anyhow::Result;

use crate::selection::{ImageReference, SelectedImageList};

pub const IMAGE_MIME_TYPE: &str = "image/*";
pub const PICKER_TITLE: &str = "Select Images";

/// How the platform picker is asked to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickRequest {
    pub mime_type: &'static str,
    pub allow_multiple: bool,
    pub title: &'static str,
}

impl Default for PickRequest {
    fn default() -> Self {
        Self {
            mime_type: IMAGE_MIME_TYPE,
            allow_multiple: true,
            title: PICKER_TITLE,
        }
    }
}

/// Raw picker result. Multi-selections come back as a clip; a single
/// selection may come back as the plain data item instead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PickResult {
    pub clip: Option<Vec<ImageReference>>,
    pub data: Option<ImageReference>,
}

impl PickResult {
    pub fn from_clip(items: Vec<ImageReference>) -> Self {
        Self {
            clip: Some(items),
            data: None,
        }
    }

    pub fn from_data(item: ImageReference) -> Self {
        Self {
            clip: None,
            data: Some(item),
        }
    }

    /// The clip wins over the single item; with neither the list is empty.
    pub fn into_selection(self) -> SelectedImageList {
        match (self.clip, self.data) {
            (Some(clip), _) => SelectedImageList::new(clip),
            (None, Some(item)) => SelectedImageList::new(vec![item]),
            (None, None) => SelectedImageList::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickOutcome {
    /// The user backed out; the current selection stays as it is.
    Cancelled,
    Picked(PickResult),
}

/// Platform content picker.
pub trait ImagePicker {
    fn pick_images(&self, request: &PickRequest) -> Result<PickOutcome>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn refs(names: &[&str]) -> Vec<ImageReference> {
        names.iter().map(|n| ImageReference::new(*n)).collect()
    }

    #[test]
    fn clip_items_are_kept_in_source_order() {
        let selection = PickResult::from_clip(refs(&["c", "a", "b", "d"])).into_selection();
        let order: Vec<_> = selection.iter().map(|i| i.locator()).collect();
        assert_eq!(order, vec!["c", "a", "b", "d"]);
    }

    #[test]
    fn single_item_without_clip_gives_one_entry() {
        let selection = PickResult::from_data(ImageReference::new("only")).into_selection();
        assert_eq!(selection.len(), 1);
        assert_eq!(selection.first().map(|i| i.locator()), Some("only"));
    }

    #[test]
    fn clip_takes_precedence_over_data() {
        let result = PickResult {
            clip: Some(refs(&["x", "y"])),
            data: Some(ImageReference::new("z")),
        };
        let selection = result.into_selection();
        assert_eq!(selection.len(), 2);
        assert_eq!(selection.first().map(|i| i.locator()), Some("x"));
    }

    #[test]
    fn empty_result_gives_empty_selection() {
        assert!(PickResult::default().into_selection().is_empty());
        assert!(PickResult::from_clip(Vec::new()).into_selection().is_empty());
    }

    #[test]
    fn default_request_allows_multiple_images() {
        let request = PickRequest::default();
        assert_eq!(request.mime_type, "image/*");
        assert!(request.allow_multiple);
        assert_eq!(request.title, "Select Images");
    }
}
