use std::fs::File;
use std::path::Path;

use thiserror::Error;

pub struct RgbaImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Decodes a PNG into a 4-channel 8-bit pixel buffer. RGB input gets an
/// opaque alpha channel appended; other layouts are rejected.
pub fn load_rgba(path: &Path) -> Result<RgbaImage, TextureLoadError> {
    let file = File::open(path)?;

    let decoder = png::Decoder::new(file);
    let mut reader = decoder.read_info()?;

    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf)?;
    buf.truncate(info.buffer_size());

    if info.bit_depth != png::BitDepth::Eight {
        return Err(TextureLoadError::UnsupportedBitDepth(info.bit_depth));
    }

    let pixels = match info.color_type {
        png::ColorType::Rgba => buf,
        png::ColorType::Rgb => {
            let mut pixels = Vec::with_capacity(info.width as usize * info.height as usize * 4);
            for rgb in buf.chunks_exact(3) {
                pixels.extend_from_slice(rgb);
                pixels.push(u8::MAX);
            }
            pixels
        }
        other => return Err(TextureLoadError::UnsupportedColorType(other)),
    };

    Ok(RgbaImage {
        width: info.width,
        height: info.height,
        pixels,
    })
}

#[derive(Debug, Error)]
pub enum TextureLoadError {
    #[error("couldn't open image: {0}")]
    Io(#[from] std::io::Error),
    #[error("couldn't decode image: {0}")]
    Decode(#[from] png::DecodingError),
    #[error("unsupported color type {0:?}, expected RGB or RGBA")]
    UnsupportedColorType(png::ColorType),
    #[error("unsupported bit depth {0:?}, expected 8 bit")]
    UnsupportedBitDepth(png::BitDepth),
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::BufWriter;

    use tempfile::TempDir;

    fn write_png(path: &Path, color: png::ColorType, data: &[u8]) {
        let file = File::create(path).unwrap();
        let writer = BufWriter::new(file);
        let mut encoder = png::Encoder::new(writer, 2, 2);
        encoder.set_color(color);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(data).unwrap();
    }

    #[test]
    fn expands_rgb_to_rgba() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rgb.png");
        #[rustfmt::skip]
        let data = [
            255, 0, 0,  0, 255, 0,
            0, 0, 255,  255, 255, 255,
        ];
        write_png(&path, png::ColorType::Rgb, &data);

        let image = load_rgba(&path).unwrap();

        assert_eq!((image.width, image.height), (2, 2));
        assert_eq!(image.pixels.len(), 16);
        assert_eq!(&image.pixels[..4], &[255, 0, 0, 255]);
        assert!(image.pixels.iter().skip(3).step_by(4).all(|&a| a == 255));
    }

    #[test]
    fn keeps_rgba_unchanged() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rgba.png");
        let data = [10u8; 16];
        write_png(&path, png::ColorType::Rgba, &data);

        let image = load_rgba(&path).unwrap();

        assert_eq!(image.pixels, data);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = load_rgba(Path::new("/no/such/image.png"));

        assert!(matches!(result, Err(TextureLoadError::Io(_))));
    }
}
