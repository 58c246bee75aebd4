use image::{DynamicImage, ImageError};
use std::io;

use crate::applier::MediaDecoder;
use crate::selection::ImageReference;

/// Decodes local image files with the `image` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageDecoder;

impl MediaDecoder for ImageDecoder {
    type Bitmap = DynamicImage;

    fn decode(&self, image: &ImageReference) -> io::Result<DynamicImage> {
        let path = image.to_path();
        let bitmap = image::open(&path).map_err(into_io_error)?;
        log::debug!("Decoded {} ({}x{})", path.display(), bitmap.width(), bitmap.height());
        Ok(bitmap)
    }
}

pub(crate) fn into_io_error(err: ImageError) -> io::Error {
    match err {
        ImageError::IoError(e) => e,
        other => io::Error::new(io::ErrorKind::InvalidData, other),
    }
}
