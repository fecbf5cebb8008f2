use std::fs::File;
use std::io::Write;

use anyhow::{Context, Result};
use image::codecs::ico::{IcoEncoder, IcoFrame};
use image::{ExtendedColorType, ImageResult, RgbaImage, RgbImage};

use crate::compose;
use crate::config::{self, Config};
use crate::manifest;

/// Run the whole pipeline: decode the logo, derive the opaque and
/// alpha-preserving variants, then emit the sized PNGs, the ICO, and the
/// web manifest into the public directory.
///
/// Returns `Ok(false)` without writing anything when the source logo is
/// missing; every other failure propagates to the caller. Outputs already
/// written before a mid-loop failure stay on disk; a re-run overwrites
/// all of them.
pub fn generate(config: &Config) -> Result<bool> {
    let logo_path = config.logo_path();
    if !logo_path.exists() {
        tracing::error!("source image not found: {}", logo_path.display());
        return Ok(false);
    }

    tracing::info!("loading source image: {}", logo_path.display());
    let decoded = image::open(&logo_path)
        .with_context(|| format!("failed to decode {}", logo_path.display()))?;
    let source = compose::normalize_rgba(decoded);
    let opaque = compose::flatten_onto_background(&source);

    write_pngs(config, &opaque)?;
    write_ico(config, &source)?;
    manifest::write(&config.manifest_path())?;

    tracing::info!("all favicon assets generated");
    Ok(true)
}

/// Opaque RGB PNGs, one per table entry, in declaration order.
fn write_pngs(config: &Config, opaque: &RgbImage) -> Result<()> {
    tracing::info!("generating PNG favicons");
    for (filename, size) in config::FAVICON_SIZES {
        let path = config.output_path(filename);
        let resized: RgbImage = compose::resize_square(opaque, size);
        resized
            .save(&path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        tracing::info!("created {} ({}x{})", filename, size, size);
    }
    Ok(())
}

/// One 32x32 RGBA frame, PNG-compressed. Goes into the public directory
/// only: a copy under the app source tree would get picked up and
/// reprocessed by the web bundler, so it deliberately stays out of there.
fn write_ico(config: &Config, source: &RgbaImage) -> Result<()> {
    tracing::info!("generating favicon.ico");
    let resized: RgbaImage = compose::resize_square(source, config::ICO_SIZE);

    let path = config.ico_path();
    // Written through the File unbuffered so a failed write surfaces from
    // encode_ico rather than getting lost in a drop-time flush.
    let file =
        File::create(&path).with_context(|| format!("failed to create {}", path.display()))?;
    encode_ico(file, &resized)
        .with_context(|| format!("failed to encode {}", path.display()))?;
    tracing::info!(
        "created {} ({}x{})",
        config::ICO_FILENAME,
        config::ICO_SIZE,
        config::ICO_SIZE
    );
    Ok(())
}

fn encode_ico<W: Write>(writer: W, image: &RgbaImage) -> ImageResult<()> {
    let (w, h) = image.dimensions();
    let frame = IcoFrame::as_png(image.as_raw(), w, h, ExtendedColorType::Rgba8)?;
    IcoEncoder::new(writer).encode_images(&[frame])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BACKGROUND_RGB, FAVICON_SIZES};
    use image::{ColorType, GenericImageView, Rgba};

    fn test_config() -> (tempfile::TempDir, Config) {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            public_dir: dir.path().to_path_buf(),
        };
        (dir, config)
    }

    fn write_logo(config: &Config, logo: &RgbaImage) {
        logo.save(config.logo_path()).unwrap();
    }

    fn solid_logo(pixel: Rgba<u8>) -> RgbaImage {
        RgbaImage::from_pixel(64, 64, pixel)
    }

    #[test]
    fn generates_all_seven_assets() {
        let (_dir, config) = test_config();
        write_logo(&config, &solid_logo(Rgba([255, 0, 0, 255])));

        assert!(generate(&config).unwrap());

        for (filename, size) in FAVICON_SIZES {
            let img = image::open(config.output_path(filename)).unwrap();
            assert_eq!(img.dimensions(), (size, size), "{filename}");
            assert_eq!(img.color(), ColorType::Rgb8, "{filename}");
        }

        let ico = image::open(config.ico_path()).unwrap();
        assert_eq!(ico.dimensions(), (32, 32));
        assert_eq!(ico.color(), ColorType::Rgba8);

        assert!(config.manifest_path().exists());
    }

    #[test]
    fn transparent_sources_flatten_to_background() {
        let (_dir, config) = test_config();
        write_logo(&config, &solid_logo(Rgba([200, 200, 200, 0])));

        assert!(generate(&config).unwrap());

        let [r, g, b] = BACKGROUND_RGB;
        for (filename, size) in FAVICON_SIZES {
            let img = image::open(config.output_path(filename)).unwrap();
            let px = img.get_pixel(size / 2, size / 2);
            assert_eq!(px, Rgba([r, g, b, 255]), "{filename}");
        }
    }

    #[test]
    fn opaque_sources_keep_their_color() {
        let (_dir, config) = test_config();
        write_logo(&config, &solid_logo(Rgba([10, 200, 30, 255])));

        assert!(generate(&config).unwrap());

        let img = image::open(config.output_path("android-chrome-512x512.png")).unwrap();
        assert_eq!(img.get_pixel(256, 256), Rgba([10, 200, 30, 255]));
    }

    #[test]
    fn ico_preserves_source_alpha() {
        let (_dir, config) = test_config();
        write_logo(&config, &solid_logo(Rgba([0, 0, 0, 0])));

        assert!(generate(&config).unwrap());

        let ico = image::open(config.ico_path()).unwrap();
        assert_eq!(ico.get_pixel(16, 16)[3], 0);
    }

    #[test]
    fn corrupt_source_is_a_hard_error() {
        let (_dir, config) = test_config();
        std::fs::write(config.logo_path(), b"definitely not an image").unwrap();

        assert!(generate(&config).is_err());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn ico_encode_surfaces_write_failures() {
        // /dev/full accepts the open and fails every write with ENOSPC
        let file = File::create("/dev/full").unwrap();
        let frame: RgbaImage =
            compose::resize_square(&solid_logo(Rgba([1, 2, 3, 255])), config::ICO_SIZE);

        assert!(encode_ico(file, &frame).is_err());
    }

    #[test]
    fn missing_source_writes_nothing() {
        let (_dir, config) = test_config();

        assert!(!generate(&config).unwrap());

        let entries: Vec<_> = std::fs::read_dir(&config.public_dir).unwrap().collect();
        assert!(entries.is_empty());
    }

    #[test]
    fn reruns_are_byte_identical() {
        let (_dir, config) = test_config();
        write_logo(&config, &solid_logo(Rgba([90, 40, 120, 180])));

        assert!(generate(&config).unwrap());
        let first: Vec<Vec<u8>> = output_filenames()
            .iter()
            .map(|f| std::fs::read(config.output_path(f)).unwrap())
            .collect();

        assert!(generate(&config).unwrap());
        let second: Vec<Vec<u8>> = output_filenames()
            .iter()
            .map(|f| std::fs::read(config.output_path(f)).unwrap())
            .collect();

        assert_eq!(first, second);
    }

    fn output_filenames() -> Vec<&'static str> {
        let mut names: Vec<&str> = FAVICON_SIZES.iter().map(|(f, _)| *f).collect();
        names.push(config::ICO_FILENAME);
        names.push(config::MANIFEST_FILENAME);
        names
    }
}
