//! RGBA8 pixel buffers for input sprites and the sheets they're packed into.

use std::io::{Read, Write};

use png::{BitDepth, ColorType, Transformations};
use thiserror::Error;

const STRIDE: usize = 4;

/// Larger buffers are refused rather than allocated. PNG dimensions are limited
/// to `i32::MAX` too, so nothing bigger could be written back out anyway.
const MAX_BYTES: usize = i32::MAX as usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Pixel {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Image {
    size: (u32, u32),
    data: Vec<u8>,
}

impl Image {
    pub fn new_rgba8<D: Into<Vec<u8>>>(size: (u32, u32), data: D) -> Result<Self, ImageError> {
        let data = data.into();

        assert_eq!(data.len(), buffer_len(size)?);

        Ok(Self { size, data })
    }

    pub fn new_empty_rgba8(size: (u32, u32)) -> Result<Self, ImageError> {
        let data = vec![0; buffer_len(size)?];
        Self::new_rgba8(size, data)
    }

    /// Decodes an 8-bit PNG of any color type, converting it to RGBA.
    pub fn decode_png<R: Read>(input: R) -> Result<Self, ImageError> {
        let mut decoder = png::Decoder::new(input);

        // Turns palettes and low bit depths into plain 8-bit channels.
        decoder.set_transformations(Transformations::EXPAND);

        let (info, mut reader) = decoder.read_info()?;

        if info.bit_depth != BitDepth::Eight {
            return Err(ImageError::UnsupportedFormat {
                color_type: info.color_type,
                bit_depth: info.bit_depth,
            });
        }

        let mut data = vec![0; info.buffer_size()];
        reader.next_frame(&mut data)?;

        let rgba = match info.color_type {
            ColorType::RGBA => data,
            ColorType::RGB => expand_to_rgba(&data, 3, |px| [px[0], px[1], px[2], 255]),
            ColorType::GrayscaleAlpha => {
                expand_to_rgba(&data, 2, |px| [px[0], px[0], px[0], px[1]])
            }
            ColorType::Grayscale => expand_to_rgba(&data, 1, |px| [px[0], px[0], px[0], 255]),
            color_type => {
                return Err(ImageError::UnsupportedFormat {
                    color_type,
                    bit_depth: info.bit_depth,
                })
            }
        };

        Self::new_rgba8((info.width, info.height), rgba)
    }

    pub fn encode_png<W: Write>(&self, output: W) -> Result<(), ImageError> {
        let mut encoder = png::Encoder::new(output, self.size.0, self.size.1);
        encoder.set_color(ColorType::RGBA);
        encoder.set_depth(BitDepth::Eight);

        let mut output_writer = encoder.write_header()?;
        output_writer.write_image_data(&self.data)?;

        // On drop, output_writer will write the last chunk of the PNG file.
        Ok(())
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    /// Copies all of `other` into this image with its top-left corner at `pos`.
    pub fn blit(&mut self, other: &Image, pos: (u32, u32)) {
        assert!(pos.0 + other.size.0 <= self.size.0);
        assert!(pos.1 + other.size.1 <= self.size.1);

        let other_width_bytes = other.size.0 as usize * STRIDE;
        let other_rows = other.data.chunks_exact(other_width_bytes);

        for (other_y, other_row) in other_rows.enumerate() {
            let self_y = pos.1 as usize + other_y;

            let start_px = pos.0 as usize + self.size.0 as usize * self_y;

            let start_in_bytes = STRIDE * start_px;
            let end_in_bytes = start_in_bytes + other_row.len();

            self.data[start_in_bytes..end_in_bytes].copy_from_slice(other_row);
        }
    }

    pub fn get_pixel(&self, pos: (u32, u32)) -> Pixel {
        let start = self.pixel_offset(pos);

        Pixel {
            r: self.data[start],
            g: self.data[start + 1],
            b: self.data[start + 2],
            a: self.data[start + 3],
        }
    }

    pub fn set_pixel(&mut self, pos: (u32, u32), pixel: Pixel) {
        let start = self.pixel_offset(pos);

        self.data[start..start + 4].copy_from_slice(&[pixel.r, pixel.g, pixel.b, pixel.a]);
    }

    fn pixel_offset(&self, pos: (u32, u32)) -> usize {
        assert!(pos.0 < self.size.0);
        assert!(pos.1 < self.size.1);

        STRIDE * (pos.0 as usize + pos.1 as usize * self.size.0 as usize)
    }
}

/// The number of bytes an RGBA8 buffer of the given size needs.
fn buffer_len(size: (u32, u32)) -> Result<usize, ImageError> {
    (size.0 as usize)
        .checked_mul(size.1 as usize)
        .and_then(|pixels| pixels.checked_mul(STRIDE))
        .filter(|&len| len <= MAX_BYTES)
        .ok_or(ImageError::TooLarge {
            width: size.0,
            height: size.1,
        })
}

fn expand_to_rgba(data: &[u8], channels: usize, convert: impl Fn(&[u8]) -> [u8; 4]) -> Vec<u8> {
    let mut rgba = Vec::with_capacity(data.len() / channels * STRIDE);

    for px in data.chunks_exact(channels) {
        rgba.extend_from_slice(&convert(px));
    }

    rgba
}

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("a {width}x{height} image is too large to hold in memory")]
    TooLarge { width: u32, height: u32 },

    #[error("unsupported PNG format: {color_type:?} at bit depth {bit_depth:?}")]
    UnsupportedFormat {
        color_type: ColorType,
        bit_depth: BitDepth,
    },

    #[error(transparent)]
    Decoding {
        #[from]
        source: png::DecodingError,
    },

    #[error(transparent)]
    Encoding {
        #[from]
        source: png::EncodingError,
    },
}

#[cfg(test)]
mod test {
    use super::*;

    fn checkerboard(size: (u32, u32)) -> Image {
        let mut image = Image::new_empty_rgba8(size).unwrap();

        for y in 0..size.1 {
            for x in 0..size.0 {
                if (x + y) % 2 == 0 {
                    image.set_pixel((x, y), Pixel::new(255, 0, 0, 255));
                }
            }
        }

        image
    }

    #[test]
    fn blit_whole() {
        let source = checkerboard((17, 20));
        let mut target = Image::new_empty_rgba8((17, 20)).unwrap();

        target.blit(&source, (0, 0));

        assert_eq!(target.data, source.data);
    }

    #[test]
    fn blit_corner() {
        let source = checkerboard((4, 4));
        let mut target = Image::new_empty_rgba8((8, 8)).unwrap();

        target.blit(&source, (4, 4));

        assert_eq!(target.get_pixel((4, 4)), Pixel::new(255, 0, 0, 255));
        assert_eq!(target.get_pixel((5, 4)), Pixel::new(0, 0, 0, 0));
        assert_eq!(target.get_pixel((7, 7)), Pixel::new(255, 0, 0, 255));
        assert_eq!(target.get_pixel((3, 3)), Pixel::new(0, 0, 0, 0));
    }

    #[test]
    #[should_panic]
    fn blit_out_of_bounds() {
        let source = Image::new_empty_rgba8((4, 4)).unwrap();
        let mut target = Image::new_empty_rgba8((8, 8)).unwrap();

        target.blit(&source, (5, 0));
    }

    #[test]
    fn set_pixel() {
        let mut source = Image::new_empty_rgba8((3, 3)).unwrap();

        source.set_pixel((0, 0), Pixel::new(1, 2, 3, 4));
        assert_eq!(source.get_pixel((0, 0)), Pixel::new(1, 2, 3, 4));

        source.set_pixel((2, 2), Pixel::new(5, 6, 7, 8));
        assert_eq!(source.get_pixel((2, 2)), Pixel::new(5, 6, 7, 8));

        assert_eq!(&source.data[0..4], &[1, 2, 3, 4]);
        assert_eq!(&source.data[(source.data.len() - 4)..], &[5, 6, 7, 8]);
    }

    #[test]
    fn oversized_buffer_is_an_error() {
        let err = Image::new_empty_rgba8((32768, 32768)).unwrap_err();

        assert_eq!(err.to_string(), "a 32768x32768 image is too large to hold in memory");
        assert!(Image::new_empty_rgba8((u32::MAX, u32::MAX)).is_err());
    }

    #[test]
    fn largest_offsets_do_not_wrap() {
        let image = Image::new_empty_rgba8((1, 70_000)).unwrap();

        assert_eq!(image.pixel_offset((0, 69_999)), 4 * 69_999);
    }

    #[test]
    fn png_round_trip() {
        let image = checkerboard((5, 3));

        let mut encoded = Vec::new();
        image.encode_png(&mut encoded).unwrap();
        let decoded = Image::decode_png(encoded.as_slice()).unwrap();

        assert_eq!(decoded.size(), (5, 3));
        assert_eq!(decoded.data, image.data);
    }

    #[test]
    fn decode_rgb_adds_alpha() {
        let mut encoded = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut encoded, 2, 1);
            encoder.set_color(ColorType::RGB);
            encoder.set_depth(BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(&[10, 20, 30, 40, 50, 60]).unwrap();
        }

        let decoded = Image::decode_png(encoded.as_slice()).unwrap();

        assert_eq!(decoded.get_pixel((0, 0)), Pixel::new(10, 20, 30, 255));
        assert_eq!(decoded.get_pixel((1, 0)), Pixel::new(40, 50, 60, 255));
    }
}
