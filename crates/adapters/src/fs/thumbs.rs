use std::fs;
use std::path::{Path, PathBuf};

use geonote_application::{ApplicationError, ThumbnailArtifact, ThumbnailGenerator};
use image::imageops::FilterType;
use image::{io::Reader as ImageReader, DynamicImage, ImageFormat};
use sha2::{Digest, Sha256};

use crate::metadata::read_orientation;

#[derive(Debug, Default)]
pub struct FsThumbnailGenerator;

impl ThumbnailGenerator for FsThumbnailGenerator {
    fn ensure_thumbnail(
        &self,
        source_path: &Path,
        cache_root: &str,
        max_size: u32,
    ) -> Result<ThumbnailArtifact, ApplicationError> {
        if max_size == 0 {
            return Err(ApplicationError::InvalidInput(
                "thumbnail size must be positive".to_string(),
            ));
        }
        let thumb_path = thumbnail_path(cache_root, source_path, max_size);

        let (width, height) = if thumb_path.exists() {
            image::image_dimensions(&thumb_path)
                .map_err(|error| ApplicationError::Decode(error.to_string()))?
        } else {
            write_thumbnail(source_path, &thumb_path, max_size)?
        };

        Ok(ThumbnailArtifact {
            file_path: thumb_path.to_string_lossy().to_string(),
            width,
            height,
        })
    }
}

/// `{cache_root}/thumbs/{digest}_{size}.jpg`, keyed by the source path.
pub fn thumbnail_path(cache_root: &str, source_path: &Path, max_size: u32) -> PathBuf {
    let digest = Sha256::digest(source_path.to_string_lossy().as_bytes());
    let key: String = format!("{digest:x}").chars().take(16).collect();
    Path::new(cache_root)
        .join("thumbs")
        .join(format!("{key}_{max_size}.jpg"))
}

fn write_thumbnail(
    source_path: &Path,
    thumb_path: &Path,
    max_size: u32,
) -> Result<(u32, u32), ApplicationError> {
    let image = ImageReader::open(source_path)
        .map_err(|error| ApplicationError::Io(error.to_string()))?
        .with_guessed_format()
        .map_err(|error| ApplicationError::Decode(error.to_string()))?
        .decode()
        .map_err(|error| ApplicationError::Decode(error.to_string()))?;

    let sample = sample_size(image.width(), image.height(), max_size, max_size);
    let sampled = if sample > 1 {
        image.resize_exact(
            (image.width() / sample).max(1),
            (image.height() / sample).max(1),
            FilterType::Triangle,
        )
    } else {
        image
    };
    let thumb = apply_orientation(sampled, read_orientation(source_path));

    if let Some(parent) = thumb_path.parent() {
        fs::create_dir_all(parent).map_err(|error| ApplicationError::Io(error.to_string()))?;
    }

    DynamicImage::ImageRgb8(thumb.to_rgb8())
        .save_with_format(thumb_path, ImageFormat::Jpeg)
        .map_err(|error| ApplicationError::Io(error.to_string()))?;

    Ok((thumb.width(), thumb.height()))
}

/// Largest power of two that keeps both halved dimensions at or above the
/// requested size. A zero request is treated as 1.
pub fn sample_size(width: u32, height: u32, req_width: u32, req_height: u32) -> u32 {
    let req_width = req_width.max(1);
    let req_height = req_height.max(1);
    let mut sample = 1;
    if height > req_height || width > req_width {
        let half_height = height / 2;
        let half_width = width / 2;
        while half_height / sample >= req_height && half_width / sample >= req_width {
            sample *= 2;
        }
    }
    sample
}

/// Rotates according to EXIF orientation 3, 6 and 8. Mirrored orientations
/// are left untouched.
pub fn apply_orientation(image: DynamicImage, orientation: u16) -> DynamicImage {
    match orientation {
        3 => image.rotate180(),
        6 => image.rotate90(),
        8 => image.rotate270(),
        _ => image,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb};
    use tempfile::TempDir;

    #[test]
    fn sample_size_halves_until_below_request() {
        assert_eq!(sample_size(4000, 3000, 256, 256), 8);
        assert_eq!(sample_size(2048, 1024, 256, 256), 4);
        assert_eq!(sample_size(500, 300, 256, 256), 1);
        assert_eq!(sample_size(100, 100, 256, 256), 1);
    }

    #[test]
    fn sample_size_treats_zero_request_as_one() {
        assert_eq!(sample_size(40, 30, 0, 0), 16);
        assert_eq!(sample_size(1, 1, 0, 0), 1);
    }

    #[test]
    fn orientation_six_swaps_dimensions() {
        let image = DynamicImage::ImageRgb8(ImageBuffer::from_fn(40, 10, |_x, _y| {
            Rgb([1_u8, 2_u8, 3_u8])
        }));
        let rotated = apply_orientation(image.clone(), 6);
        assert_eq!((rotated.width(), rotated.height()), (10, 40));
        let upright = apply_orientation(image, 1);
        assert_eq!((upright.width(), upright.height()), (40, 10));
    }

    #[test]
    fn creates_downsampled_thumbnail_and_reuses_it() {
        let dir = TempDir::new().expect("tempdir");
        let src = dir.path().join("x.jpg");
        let img = ImageBuffer::from_fn(2048, 1024, |_x, _y| Rgb([10_u8, 20_u8, 30_u8]));
        img.save(&src).expect("save");

        let cache_root = dir.path().join("cache").to_string_lossy().to_string();
        let generator = FsThumbnailGenerator;
        let out = generator
            .ensure_thumbnail(&src, &cache_root, 256)
            .expect("thumbnail");

        assert_eq!((out.width, out.height), (512, 256));
        assert!(Path::new(&out.file_path).exists());
        assert!(out.file_path.ends_with("_256.jpg"));

        let again = generator
            .ensure_thumbnail(&src, &cache_root, 256)
            .expect("thumbnail");
        assert_eq!(again.file_path, out.file_path);
        assert_eq!((again.width, again.height), (512, 256));
    }

    #[test]
    fn zero_size_is_rejected_before_decoding() {
        let dir = TempDir::new().expect("tempdir");
        let src = dir.path().join("small.jpg");
        let img = ImageBuffer::from_fn(40, 30, |_x, _y| Rgb([10_u8, 20_u8, 30_u8]));
        img.save(&src).expect("save");

        let cache_root = dir.path().join("cache");
        let result = FsThumbnailGenerator.ensure_thumbnail(&src, &cache_root.to_string_lossy(), 0);
        assert!(matches!(result, Err(ApplicationError::InvalidInput(_))));
        assert!(!cache_root.exists());
    }

    #[test]
    fn thumbnail_of_garbage_fails_with_decode_error() {
        let dir = TempDir::new().expect("tempdir");
        let src = dir.path().join("broken.jpg");
        fs::write(&src, b"nope").expect("write");

        let result =
            FsThumbnailGenerator.ensure_thumbnail(&src, &dir.path().to_string_lossy(), 100);
        assert!(matches!(result, Err(ApplicationError::Decode(_))));
    }
}
