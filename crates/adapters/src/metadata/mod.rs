//! EXIF metadata via kamadak-exif.

use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

use chrono::{Local, NaiveDateTime, TimeZone};
use exif::{Exif, In, Tag, Value};
use geonote_application::{ApplicationError, MetadataReader, PhotoMetadata};
use geonote_domain::{extract_from_source, GeoCoordinate, GpsTag, GpsTagSource};

use crate::fs::modified_millis;

const EXIF_DATE_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

#[derive(Debug, Default)]
pub struct KamadakExifReader;

impl MetadataReader for KamadakExifReader {
    fn read_metadata(&self, path: &Path) -> Result<PhotoMetadata, ApplicationError> {
        let file_metadata =
            fs::metadata(path).map_err(|error| ApplicationError::Io(error.to_string()))?;
        let mut metadata = PhotoMetadata {
            date_taken: modified_millis(&file_metadata),
            orientation: 1,
            gps: GeoCoordinate::absent(),
            ..PhotoMetadata::default()
        };

        if let Some(exif) = read_exif(path)? {
            if let Some(width) = uint_field(&exif, Tag::PixelXDimension)
                .or_else(|| uint_field(&exif, Tag::ImageWidth))
            {
                metadata.width = width;
            }
            if let Some(height) = uint_field(&exif, Tag::PixelYDimension)
                .or_else(|| uint_field(&exif, Tag::ImageLength))
            {
                metadata.height = height;
            }
            if let Some(taken) = capture_millis(&exif) {
                metadata.date_taken = taken;
            }
            metadata.orientation = orientation_of(&exif);
            metadata.gps = extract_from_source(&ExifGpsTags::new(&exif));
        }

        if metadata.width == 0 || metadata.height == 0 {
            match image::image_dimensions(path) {
                Ok((width, height)) => {
                    metadata.width = width;
                    metadata.height = height;
                }
                Err(error) => log::debug!("no dimensions for {}: {error}", path.display()),
            }
        }

        Ok(metadata)
    }
}

/// `Ok(None)` when the container carries no parseable EXIF block.
fn read_exif(path: &Path) -> Result<Option<Exif>, ApplicationError> {
    let file = File::open(path).map_err(|error| ApplicationError::Io(error.to_string()))?;
    let mut reader = BufReader::new(file);
    match exif::Reader::new().read_from_container(&mut reader) {
        Ok(exif) => Ok(Some(exif)),
        Err(error) => {
            log::debug!("no EXIF in {}: {error}", path.display());
            Ok(None)
        }
    }
}

/// EXIF orientation of the file at `path`, 1 when unknown.
pub(crate) fn read_orientation(path: &Path) -> u16 {
    match read_exif(path) {
        Ok(Some(exif)) => orientation_of(&exif),
        _ => 1,
    }
}

fn orientation_of(exif: &Exif) -> u16 {
    uint_field(exif, Tag::Orientation)
        .and_then(|value| u16::try_from(value).ok())
        .unwrap_or(1)
}

fn uint_field(exif: &Exif, tag: Tag) -> Option<u32> {
    exif.get_field(tag, In::PRIMARY)
        .and_then(|field| field.value.get_uint(0))
}

fn capture_millis(exif: &Exif) -> Option<i64> {
    [Tag::DateTimeOriginal, Tag::DateTime]
        .into_iter()
        .filter_map(|tag| exif.get_field(tag, In::PRIMARY))
        .filter_map(|field| render_value(&field.value))
        .find_map(|text| parse_exif_datetime(&text))
}

/// EXIF timestamps carry no zone; they are read as local time.
pub(crate) fn parse_exif_datetime(text: &str) -> Option<i64> {
    let naive = NaiveDateTime::parse_from_str(text.trim(), EXIF_DATE_FORMAT).ok()?;
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|instant| instant.timestamp_millis())
}

/// GPS tag lookups over a parsed EXIF block.
pub struct ExifGpsTags<'a> {
    exif: &'a Exif,
}

impl<'a> ExifGpsTags<'a> {
    pub fn new(exif: &'a Exif) -> Self {
        Self { exif }
    }
}

impl GpsTagSource for ExifGpsTags<'_> {
    fn tag(&self, tag: GpsTag) -> Option<String> {
        let exif_tag = match tag {
            GpsTag::Latitude => Tag::GPSLatitude,
            GpsTag::LatitudeRef => Tag::GPSLatitudeRef,
            GpsTag::Longitude => Tag::GPSLongitude,
            GpsTag::LongitudeRef => Tag::GPSLongitudeRef,
            GpsTag::Altitude => Tag::GPSAltitude,
            GpsTag::AltitudeRef => Tag::GPSAltitudeRef,
        };
        self.exif
            .get_field(exif_tag, In::PRIMARY)
            .and_then(|field| render_value(&field.value))
    }
}

/// Renders a raw EXIF value the way [`GpsTagSource`] expects it.
pub(crate) fn render_value(value: &Value) -> Option<String> {
    match value {
        Value::Rational(parts) if !parts.is_empty() => Some(
            parts
                .iter()
                .map(|part| format!("{}/{}", part.num, part.denom))
                .collect::<Vec<_>>()
                .join(","),
        ),
        Value::SRational(parts) if !parts.is_empty() => Some(
            parts
                .iter()
                .map(|part| format!("{}/{}", part.num, part.denom))
                .collect::<Vec<_>>()
                .join(","),
        ),
        Value::Ascii(chunks) => chunks
            .iter()
            .map(|chunk| {
                String::from_utf8_lossy(chunk)
                    .trim_end_matches('\0')
                    .trim()
                    .to_string()
            })
            .find(|text| !text.is_empty()),
        Value::Byte(bytes) => bytes.first().map(|byte| byte.to_string()),
        Value::Short(shorts) => shorts.first().map(|short| short.to_string()),
        _ => None,
    }
}
