//! Shared test utilities.
//!
//! Real EXIF test fixtures are awkward to check in (binary blobs, camera
//! firmware quirks), so tests build their own: [`ExifSpec`] serializes a
//! minimal little-endian TIFF structure that `kamadak-exif` parses the same
//! way it parses camera output, and [`jpeg_with_exif`] splices that
//! structure into a synthetic JPEG as an APP1 segment. This keeps extractor
//! and end-to-end tests running on real bytes end to end.

use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbImage};

/// GPS tag block description. Each piece is independently optional so tests
/// can produce half-written blocks.
#[derive(Debug, Clone, Default)]
pub struct GpsSpec {
    /// Degree/minute/second rationals as (numerator, denominator) pairs.
    pub lat_dms: Option<[(u32, u32); 3]>,
    pub lat_ref: Option<&'static str>,
    pub lon_dms: Option<[(u32, u32); 3]>,
    pub lon_ref: Option<&'static str>,
}

/// Description of an EXIF block to synthesize.
#[derive(Debug, Clone, Default)]
pub struct ExifSpec {
    pub orientation: Option<u16>,
    pub date_time_original: Option<String>,
    pub gps: Option<GpsSpec>,
}

// TIFF field types used below.
const TYPE_ASCII: u16 = 2;
const TYPE_SHORT: u16 = 3;
const TYPE_LONG: u16 = 4;
const TYPE_RATIONAL: u16 = 5;

const TAG_ORIENTATION: u16 = 0x0112;
const TAG_EXIF_IFD: u16 = 0x8769;
const TAG_GPS_IFD: u16 = 0x8825;
const TAG_DATETIME_ORIGINAL: u16 = 0x9003;
const TAG_GPS_LAT_REF: u16 = 0x0001;
const TAG_GPS_LAT: u16 = 0x0002;
const TAG_GPS_LON_REF: u16 = 0x0003;
const TAG_GPS_LON: u16 = 0x0004;

/// One 12-byte IFD entry plus its payload.
struct Entry {
    tag: u16,
    typ: u16,
    count: u32,
    /// Payload bytes. Written inline (zero-padded) when they fit in the
    /// 4-byte value slot, otherwise appended to the data heap.
    payload: Vec<u8>,
}

impl Entry {
    fn short(tag: u16, value: u16) -> Entry {
        Entry {
            tag,
            typ: TYPE_SHORT,
            count: 1,
            payload: value.to_le_bytes().to_vec(),
        }
    }

    fn long(tag: u16, value: u32) -> Entry {
        Entry {
            tag,
            typ: TYPE_LONG,
            count: 1,
            payload: value.to_le_bytes().to_vec(),
        }
    }

    fn ascii(tag: u16, text: &str) -> Entry {
        let mut payload = text.as_bytes().to_vec();
        payload.push(0);
        Entry {
            tag,
            typ: TYPE_ASCII,
            count: payload.len() as u32,
            payload,
        }
    }

    fn rationals(tag: u16, values: &[(u32, u32)]) -> Entry {
        let mut payload = Vec::with_capacity(values.len() * 8);
        for &(num, den) in values {
            payload.extend_from_slice(&num.to_le_bytes());
            payload.extend_from_slice(&den.to_le_bytes());
        }
        Entry {
            tag,
            typ: TYPE_RATIONAL,
            count: values.len() as u32,
            payload,
        }
    }
}

/// Size of an IFD block on disk: entry count + entries + next-IFD offset.
fn ifd_size(entries: &[Entry]) -> u32 {
    2 + 12 * entries.len() as u32 + 4
}

/// Serialize one IFD, appending large payloads to `heap` (`heap_base` is
/// the file offset where the heap will land).
fn write_ifd(out: &mut Vec<u8>, entries: &[Entry], heap: &mut Vec<u8>, heap_base: u32) {
    out.extend_from_slice(&(entries.len() as u16).to_le_bytes());
    for entry in entries {
        out.extend_from_slice(&entry.tag.to_le_bytes());
        out.extend_from_slice(&entry.typ.to_le_bytes());
        out.extend_from_slice(&entry.count.to_le_bytes());
        if entry.payload.len() <= 4 {
            let mut slot = [0u8; 4];
            slot[..entry.payload.len()].copy_from_slice(&entry.payload);
            out.extend_from_slice(&slot);
        } else {
            let offset = heap_base + heap.len() as u32;
            out.extend_from_slice(&offset.to_le_bytes());
            heap.extend_from_slice(&entry.payload);
        }
    }
    // No chained IFD.
    out.extend_from_slice(&0u32.to_le_bytes());
}

impl ExifSpec {
    /// Serialize as a little-endian TIFF block, the payload format of both
    /// `Reader::read_raw` and a JPEG APP1 segment.
    pub fn to_tiff(&self) -> Vec<u8> {
        let exif_entries: Vec<Entry> = self
            .date_time_original
            .iter()
            .map(|dt| Entry::ascii(TAG_DATETIME_ORIGINAL, dt))
            .collect();

        let mut gps_entries: Vec<Entry> = Vec::new();
        if let Some(gps) = &self.gps {
            if let Some(r) = gps.lat_ref {
                gps_entries.push(Entry::ascii(TAG_GPS_LAT_REF, r));
            }
            if let Some(dms) = gps.lat_dms {
                gps_entries.push(Entry::rationals(TAG_GPS_LAT, &dms));
            }
            if let Some(r) = gps.lon_ref {
                gps_entries.push(Entry::ascii(TAG_GPS_LON_REF, r));
            }
            if let Some(dms) = gps.lon_dms {
                gps_entries.push(Entry::rationals(TAG_GPS_LON, &dms));
            }
        }

        // IFD0 carries the sub-IFD pointers, so the block layout must be
        // fixed before serializing: header, IFD0, Exif IFD, GPS IFD, heap.
        let mut ifd0_len = 0usize;
        if self.orientation.is_some() {
            ifd0_len += 1;
        }
        if !exif_entries.is_empty() {
            ifd0_len += 1;
        }
        if !gps_entries.is_empty() {
            ifd0_len += 1;
        }

        let ifd0_size = 2 + 12 * ifd0_len as u32 + 4;
        let exif_offset = 8 + ifd0_size;
        let exif_size = if exif_entries.is_empty() {
            0
        } else {
            ifd_size(&exif_entries)
        };
        let gps_offset = exif_offset + exif_size;
        let gps_size = if gps_entries.is_empty() {
            0
        } else {
            ifd_size(&gps_entries)
        };
        let heap_base = gps_offset + gps_size;

        let mut ifd0_entries: Vec<Entry> = Vec::new();
        if let Some(orientation) = self.orientation {
            ifd0_entries.push(Entry::short(TAG_ORIENTATION, orientation));
        }
        if !exif_entries.is_empty() {
            ifd0_entries.push(Entry::long(TAG_EXIF_IFD, exif_offset));
        }
        if !gps_entries.is_empty() {
            ifd0_entries.push(Entry::long(TAG_GPS_IFD, gps_offset));
        }

        let mut out = Vec::new();
        out.extend_from_slice(b"II");
        out.extend_from_slice(&42u16.to_le_bytes());
        out.extend_from_slice(&8u32.to_le_bytes());

        let mut heap = Vec::new();
        write_ifd(&mut out, &ifd0_entries, &mut heap, heap_base);
        if !exif_entries.is_empty() {
            write_ifd(&mut out, &exif_entries, &mut heap, heap_base);
        }
        if !gps_entries.is_empty() {
            write_ifd(&mut out, &gps_entries, &mut heap, heap_base);
        }
        out.extend_from_slice(&heap);
        out
    }
}

/// Encode a small gradient JPEG in memory.
pub fn encode_test_jpeg(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    let mut bytes = Vec::new();
    JpegEncoder::new(&mut bytes)
        .write_image(img.as_raw(), width, height, ExtendedColorType::Rgb8)
        .unwrap();
    bytes
}

/// Encode a JPEG and splice the spec's EXIF block in as an APP1 segment
/// right after SOI, where readers expect it.
pub fn jpeg_with_exif(width: u32, height: u32, spec: &ExifSpec) -> Vec<u8> {
    let jpeg = encode_test_jpeg(width, height);
    assert_eq!(&jpeg[..2], &[0xFF, 0xD8], "encoder did not emit SOI first");

    let tiff = spec.to_tiff();
    let segment_len = (2 + 6 + tiff.len()) as u16;

    let mut out = Vec::with_capacity(jpeg.len() + tiff.len() + 10);
    out.extend_from_slice(&jpeg[..2]);
    out.extend_from_slice(&[0xFF, 0xE1]);
    out.extend_from_slice(&segment_len.to_be_bytes());
    out.extend_from_slice(b"Exif\0\0");
    out.extend_from_slice(&tiff);
    out.extend_from_slice(&jpeg[2..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiff_block_parses_back() {
        let spec = ExifSpec {
            orientation: Some(3),
            date_time_original: Some("2023:12:24 18:00:00".to_string()),
            gps: Some(GpsSpec {
                lat_dms: Some([(35, 1), (41, 1), (2264, 100)]),
                lat_ref: Some("N"),
                lon_dms: Some([(139, 1), (41, 1), (3000, 100)]),
                lon_ref: Some("E"),
            }),
        };
        let tags = exif::Reader::new().read_raw(spec.to_tiff()).unwrap();
        assert!(
            tags.get_field(exif::Tag::Orientation, exif::In::PRIMARY)
                .is_some()
        );
        assert!(
            tags.get_field(exif::Tag::DateTimeOriginal, exif::In::PRIMARY)
                .is_some()
        );
        assert!(
            tags.get_field(exif::Tag::GPSLatitude, exif::In::PRIMARY)
                .is_some()
        );
    }

    #[test]
    fn spliced_jpeg_still_decodes() {
        let spec = ExifSpec {
            orientation: Some(6),
            ..ExifSpec::default()
        };
        let bytes = jpeg_with_exif(20, 10, &spec);
        let img = image::load_from_memory(&bytes).unwrap();
        assert_eq!((img.width(), img.height()), (20, 10));
    }
}
