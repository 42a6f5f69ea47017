//! Image handling for PDF documents

use crate::{PdfError, Result};
use image::codecs::jpeg::JpegDecoder;
use image::{ColorType, DynamicImage, ImageDecoder, ImageReader};
use lopdf::{Dictionary, Object, Stream};
use std::io::{Cursor, Write};

impl From<image::ImageError> for PdfError {
    fn from(err: image::ImageError) -> Self {
        PdfError::ImageError(err.to_string())
    }
}

/// Detected image format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
}

/// Detect image format from magic bytes
pub fn detect_format(data: &[u8]) -> Result<ImageFormat> {
    if data.len() < 8 {
        return Err(PdfError::ImageError("Image data too short".to_string()));
    }

    if data[..3] == [0xFF, 0xD8, 0xFF] {
        return Ok(ImageFormat::Jpeg);
    }

    if data[..8] == [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A] {
        return Ok(ImageFormat::Png);
    }

    Err(PdfError::ImageError("Unknown image format".to_string()))
}

/// Image XObject for PDF embedding
#[derive(Debug, Clone)]
pub struct ImageXObject {
    pub width: u32,
    pub height: u32,
    /// "DeviceRGB", "DeviceGray" or "DeviceCMYK"
    pub color_space: &'static str,
    pub bits_per_component: u8,
    /// "DCTDecode" for JPEG, "FlateDecode" for PNG
    pub filter: &'static str,
    /// Compressed image data
    pub data: Vec<u8>,
    /// Samples are stored inverted (Adobe CMYK JPEGs) and need a
    /// `/Decode [1 0 1 0 1 0 1 0]` array
    pub inverted: bool,
}

impl ImageXObject {
    /// Create an XObject from image bytes, dispatching on the magic bytes
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        match detect_format(data)? {
            ImageFormat::Jpeg => Self::from_jpeg(data),
            ImageFormat::Png => Self::from_png(data),
        }
    }

    /// Create XObject from JPEG data
    ///
    /// JPEG data is embedded unchanged with the DCTDecode filter; only the
    /// header is decoded for dimensions and component count.
    pub fn from_jpeg(data: &[u8]) -> Result<Self> {
        let decoder = JpegDecoder::new(Cursor::new(data))?;
        let (width, height) = decoder.dimensions();

        // The decoder reports CMYK input as RGB, so the colour space follows
        // the frame header's component count instead.
        let header = read_jpeg_header(data)
            .ok_or_else(|| PdfError::ImageError("JPEG has no frame header".to_string()))?;
        let color_space = match header.components {
            1 => "DeviceGray",
            3 => "DeviceRGB",
            4 => "DeviceCMYK",
            n => {
                return Err(PdfError::ImageError(format!(
                    "Unsupported JPEG component count: {n}"
                )))
            }
        };

        Ok(Self {
            width,
            height,
            color_space,
            bits_per_component: 8,
            filter: "DCTDecode",
            data: data.to_vec(),
            inverted: header.components == 4 && header.adobe,
        })
    }

    /// Create XObject from PNG data
    ///
    /// PNG pixels are decoded, blended onto white when they carry alpha,
    /// and recompressed with FlateDecode.
    pub fn from_png(data: &[u8]) -> Result<Self> {
        let reader = ImageReader::new(Cursor::new(data)).with_guessed_format()?;
        let decoder = reader.into_decoder()?;
        let (width, height) = decoder.dimensions();
        let color_type = decoder.color_type();
        let image = DynamicImage::from_decoder(decoder)?;

        let (raw, color_space) = match color_type {
            ColorType::L8 | ColorType::L16 => (image.to_luma8().into_raw(), "DeviceGray"),
            ColorType::La8 | ColorType::La16 => {
                let gray = image
                    .to_luma_alpha8()
                    .pixels()
                    .map(|p| blend_on_white(p[0], p[1]))
                    .collect::<Vec<u8>>();
                (gray, "DeviceGray")
            }
            ColorType::Rgba8 | ColorType::Rgba16 | ColorType::Rgba32F => {
                let mut rgb = Vec::with_capacity((width * height * 3) as usize);
                for p in image.to_rgba8().pixels() {
                    rgb.extend_from_slice(&[
                        blend_on_white(p[0], p[3]),
                        blend_on_white(p[1], p[3]),
                        blend_on_white(p[2], p[3]),
                    ]);
                }
                (rgb, "DeviceRGB")
            }
            _ => (image.to_rgb8().into_raw(), "DeviceRGB"),
        };

        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(&raw)?;
        let data = encoder.finish()?;

        Ok(Self {
            width,
            height,
            color_space,
            bits_per_component: 8,
            filter: "FlateDecode",
            data,
            inverted: false,
        })
    }

    /// Convert to lopdf Stream object
    pub fn to_pdf_stream(&self) -> Stream {
        let mut dict = Dictionary::new();
        dict.set("Type", Object::Name(b"XObject".to_vec()));
        dict.set("Subtype", Object::Name(b"Image".to_vec()));
        dict.set("Width", self.width as i64);
        dict.set("Height", self.height as i64);
        dict.set(
            "ColorSpace",
            Object::Name(self.color_space.as_bytes().to_vec()),
        );
        dict.set("BitsPerComponent", self.bits_per_component as i64);
        dict.set("Filter", Object::Name(self.filter.as_bytes().to_vec()));
        if self.inverted {
            let decode = (0..4)
                .flat_map(|_| [Object::Integer(1), Object::Integer(0)])
                .collect();
            dict.set("Decode", Object::Array(decode));
        }
        dict.set("Length", self.data.len() as i64);

        Stream::new(dict, self.data.clone())
    }
}

/// What the JPEG marker segments say about the pixel layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct JpegHeader {
    /// Components per pixel from the SOF segment
    components: u8,
    /// An Adobe APP14 segment precedes the frame header
    adobe: bool,
}

/// Walk the marker segments up to the first SOF and read its component count
fn read_jpeg_header(data: &[u8]) -> Option<JpegHeader> {
    if !data.starts_with(&[0xFF, 0xD8]) {
        return None;
    }

    let mut adobe = false;
    let mut pos = 2;
    loop {
        if *data.get(pos)? != 0xFF {
            return None;
        }
        let marker = *data.get(pos + 1)?;
        match marker {
            // Fill bytes before a marker
            0xFF => {
                pos += 1;
                continue;
            }
            // Standalone markers carry no length
            0x01 | 0xD0..=0xD7 => {
                pos += 2;
                continue;
            }
            // Start of scan or end of image before any frame header
            0xDA | 0xD9 => return None,
            _ => {}
        }

        let length = u16::from_be_bytes([*data.get(pos + 2)?, *data.get(pos + 3)?]) as usize;
        let segment = data.get(pos + 4..pos + 2 + length)?;
        match marker {
            // SOF0..=SOF15 except DHT, JPG and DAC
            0xC0..=0xCF if !matches!(marker, 0xC4 | 0xC8 | 0xCC) => {
                // precision(1) height(2) width(2) components(1)
                let components = *segment.get(5)?;
                return Some(JpegHeader { components, adobe });
            }
            0xEE if segment.starts_with(b"Adobe") => adobe = true,
            _ => {}
        }
        pos += 2 + length;
    }
}

fn blend_on_white(channel: u8, alpha: u8) -> u8 {
    let alpha = alpha as f32 / 255.0;
    (channel as f32 * alpha + 255.0 * (1.0 - alpha)) as u8
}

/// Generate operators to draw an image XObject
///
/// `x`/`y` is the lower-left corner in PDF coordinates; the image unit
/// square is scaled to `width` x `height` points.
pub fn generate_image_operators(
    image_name: &str,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
) -> Vec<u8> {
    format!("q\n{width} 0 0 {height} {x} {y} cm\n/{image_name} Do\nQ\n").into_bytes()
}
