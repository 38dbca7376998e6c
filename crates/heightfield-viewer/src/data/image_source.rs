//! Image discovery and decoding into [`PixelField`]s.

use anyhow::{Context, Result};
use heightfield::PixelField;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// File extensions the decoder is built with.
pub const IMAGE_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "gif", "webp", "bmp"];

pub fn is_image_path(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| IMAGE_EXTENSIONS.iter().any(|e| ext.eq_ignore_ascii_case(e)))
        .unwrap_or(false)
}

/// Image files under `root`, sorted by path. A file path is returned as-is.
pub fn list_images(root: &Path) -> Vec<PathBuf> {
    if root.is_file() {
        return vec![root.to_path_buf()];
    }

    let mut paths: Vec<_> = WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file() && is_image_path(e.path()))
        .map(|e| e.path().to_path_buf())
        .collect();
    paths.sort();

    if paths.is_empty() {
        log::warn!("No images found in '{}'", root.display());
    }

    paths
}

/// Decodes `bytes` to RGBA8 and normalizes them.
pub fn decode_image(bytes: &[u8]) -> Result<PixelField> {
    let rgba = image::load_from_memory(bytes)
        .context("decoding image")?
        .to_rgba8();
    let (width, height) = rgba.dimensions();

    Ok(PixelField::from_rgba8(width, height, rgba.as_raw())?)
}

pub fn load_image(path: &Path) -> Result<PixelField> {
    let bytes =
        std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let field = decode_image(&bytes).with_context(|| format!("loading {}", path.display()))?;

    log::info!(
        "Loaded {} ({}x{})",
        path.display(),
        field.width(),
        field.height()
    );

    Ok(field)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    fn encode_png(img: &RgbaImage) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn png_bytes_become_normalized_samples() {
        let mut img = RgbaImage::new(3, 2);
        img.put_pixel(2, 1, Rgba([255, 0, 51, 255]));
        let field = decode_image(&encode_png(&img)).unwrap();

        assert_eq!((field.width(), field.height()), (3, 2));
        assert_eq!(field.rgba(2, 1), Some([1.0, 0.0, 0.2, 1.0]));
        assert_eq!(field.rgba(0, 0), Some([0.0, 0.0, 0.0, 0.0]));
    }

    #[test]
    fn garbage_is_an_error() {
        assert!(decode_image(b"not an image").is_err());
    }

    #[test]
    fn extension_filter() {
        assert!(is_image_path(Path::new("a/b/terrain.PNG")));
        assert!(is_image_path(Path::new("x.jpeg")));
        assert!(!is_image_path(Path::new("notes.txt")));
        assert!(!is_image_path(Path::new("png")));
    }

    #[test]
    fn directory_listing_is_sorted_and_filtered() {
        let dir = std::env::temp_dir().join(format!("heightfield-list-{}", std::process::id()));
        std::fs::create_dir_all(dir.join("nested")).unwrap();
        for name in ["b.png", "a.jpg", "readme.md", "nested/c.webp"] {
            std::fs::write(dir.join(name), b"").unwrap();
        }

        let found = list_images(&dir);
        std::fs::remove_dir_all(&dir).unwrap();

        let names: Vec<_> = found
            .iter()
            .map(|p| p.strip_prefix(&dir).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            names,
            vec![
                PathBuf::from("a.jpg"),
                PathBuf::from("b.png"),
                PathBuf::from("nested/c.webp"),
            ]
        );
    }
}
