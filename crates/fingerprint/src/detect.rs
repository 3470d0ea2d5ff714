use std::path::Path;

use crate::{core, singular};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Errors produced by the high-level facade helpers.
#[derive(thiserror::Error, Debug)]
pub enum DetectError {
    #[error("invalid grayscale image buffer length (expected {expected} bytes, got {got})")]
    InvalidGrayBuffer { expected: usize, got: usize },

    #[error("invalid grayscale image dimensions (width={width}, height={height})")]
    InvalidGrayDimensions { width: u32, height: u32 },

    #[error(transparent)]
    Image(#[from] ::image::ImageError),

    #[error(transparent)]
    SingularPoint(#[from] singular::SingularPointError),
}

/// Convert an `image::GrayImage` into the lightweight `fingerprint-core` view type.
pub fn gray_view(img: &::image::GrayImage) -> core::GrayImageView<'_> {
    core::GrayImageView {
        width: img.width() as usize,
        height: img.height() as usize,
        data: img.as_raw(),
    }
}

/// Wrap a row-major 8-bit buffer into an `image::GrayImage`.
pub fn gray_image_from_slice(
    width: u32,
    height: u32,
    pixels: &[u8],
) -> Result<::image::GrayImage, DetectError> {
    if width == 0 || height == 0 {
        return Err(DetectError::InvalidGrayDimensions { width, height });
    }
    let expected = (width as usize)
        .checked_mul(height as usize)
        .ok_or(DetectError::InvalidGrayDimensions { width, height })?;
    if pixels.len() != expected {
        return Err(DetectError::InvalidGrayBuffer {
            expected,
            got: pixels.len(),
        });
    }
    ::image::GrayImage::from_raw(width, height, pixels.to_vec()).ok_or(
        DetectError::InvalidGrayBuffer {
            expected,
            got: pixels.len(),
        },
    )
}

/// Decode an image file and convert it to 8-bit luma.
pub fn load_gray(path: impl AsRef<Path>) -> Result<::image::GrayImage, DetectError> {
    let path = path.as_ref();
    log::debug!("loading {}", path.display());
    Ok(::image::ImageReader::open(path)
        .map_err(::image::ImageError::IoError)?
        .with_guessed_format()
        .map_err(::image::ImageError::IoError)?
        .decode()?
        .to_luma8())
}

/// Run the full singular point pipeline on an `image::GrayImage`.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(img, params), fields(width = img.width(), height = img.height()))
)]
pub fn detect_singular_points(
    img: &::image::GrayImage,
    params: singular::SingularPointParams,
) -> Result<singular::SingularPointResult, DetectError> {
    let detector = singular::SingularPointDetector::new(params)?;
    Ok(detector.detect(&gray_view(img))?)
}

/// Like [`detect_singular_points`], keeping the orientation field and candidate records.
pub fn analyze_singular_points(
    img: &::image::GrayImage,
    params: singular::SingularPointParams,
) -> Result<singular::SingularPointAnalysis, DetectError> {
    let detector = singular::SingularPointDetector::new(params)?;
    Ok(detector.analyze(&gray_view(img))?)
}

/// Run the pipeline on a raw row-major 8-bit buffer.
pub fn detect_from_gray_u8(
    width: u32,
    height: u32,
    pixels: &[u8],
    params: singular::SingularPointParams,
) -> Result<singular::SingularPointResult, DetectError> {
    let img = gray_image_from_slice(width, height, pixels)?;
    detect_singular_points(&img, params)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gray_image_from_slice_checks_buffer() {
        assert!(matches!(
            gray_image_from_slice(4, 4, &[0u8; 15]),
            Err(DetectError::InvalidGrayBuffer {
                expected: 16,
                got: 15
            })
        ));
        assert!(matches!(
            gray_image_from_slice(0, 4, &[]),
            Err(DetectError::InvalidGrayDimensions { width: 0, height: 4 })
        ));
        let img = gray_image_from_slice(3, 2, &[1, 2, 3, 4, 5, 6]).expect("image");
        assert_eq!(img.get_pixel(2, 1).0, [6]);
    }

    #[test]
    fn gray_view_borrows_raw_pixels() {
        let img = ::image::GrayImage::from_fn(5, 3, |x, y| ::image::Luma([(x + 10 * y) as u8]));
        let view = gray_view(&img);
        assert_eq!((view.width, view.height), (5, 3));
        assert_eq!(view.row(2), &[20, 21, 22, 23, 24]);
    }

    #[test]
    fn load_gray_reports_missing_file_as_image_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = load_gray(dir.path().join("absent.png")).expect_err("missing file");
        assert!(matches!(
            err,
            DetectError::Image(::image::ImageError::IoError(ref io))
                if io.kind() == std::io::ErrorKind::NotFound
        ));
    }

    #[test]
    fn load_gray_decodes_by_content_not_extension() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("ridges.bin");
        let img = ::image::GrayImage::from_fn(9, 7, |x, y| ::image::Luma([(x * 20 + y) as u8]));
        img.save_with_format(&path, ::image::ImageFormat::Png)
            .expect("save png");
        let loaded = load_gray(&path).expect("load");
        assert_eq!(loaded.as_raw(), img.as_raw());
    }

    #[test]
    fn invalid_params_surface_as_detect_error() {
        let img = ::image::GrayImage::new(32, 32);
        let mut params = singular::SingularPointParams::default();
        params.poincare.step = 0;
        assert!(matches!(
            detect_singular_points(&img, params),
            Err(DetectError::SingularPoint(
                singular::SingularPointError::InvalidParams(_)
            ))
        ));
    }
}
