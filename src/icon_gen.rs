use crate::compositor::{compose, resize_premultiplied};
use crate::style::{IconStyle, LOGO_PATH, OUTPUT_PATH};
use anyhow::{Context, Result};
use image::{
    codecs::{
        ico::{IcoEncoder, IcoFrame},
        png::{CompressionType, FilterType as PngFilterType, PngEncoder},
    },
    ColorType, DynamicImage, ImageEncoder, RgbaImage,
};
use std::{
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};
use tempfile::NamedTempFile;

/// Generate the launchpad icon under `root`.
///
/// Reads the logo from [`LOGO_PATH`] and writes the ICO to [`OUTPUT_PATH`],
/// both relative to `root`. Returns the path of the written icon.
pub fn generate_icon(root: &Path) -> Result<PathBuf> {
    let style = IconStyle::default();

    let logo = load_logo(&root.join(LOGO_PATH))?;
    let canvas = compose(&logo, &style)?;

    let output = root.join(OUTPUT_PATH);
    write_ico(&canvas, &style.frame_sizes, &output)?;

    println!("Icon saved to: {}", output.display());
    println!("Sizes: {}", describe_sizes(&style.frame_sizes));
    Ok(output)
}

fn load_logo(path: &Path) -> Result<DynamicImage> {
    image::open(path).with_context(|| format!("Failed to load logo image {}", path.display()))
}

/// "16x16, 24x24, ..." in the order given.
pub fn describe_sizes(sizes: &[u32]) -> String {
    sizes
        .iter()
        .map(|size| format!("{size}x{size}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Downsample `canvas` to every size and write them as one ICO at `path`.
///
/// Frames are stored largest first. The file is assembled in a temporary file
/// next to `path` and only renamed into place once fully written.
pub fn write_ico(canvas: &RgbaImage, sizes: &[u32], path: &Path) -> Result<()> {
    let mut ordered = sizes.to_vec();
    ordered.sort_unstable_by(|a, b| b.cmp(a));

    let mut frames = Vec::with_capacity(ordered.len());
    for size in ordered {
        let resized = resize_premultiplied(canvas, size, size);

        let mut buf = Vec::new();
        write_png(resized.as_raw(), &mut buf, size)?;
        frames.push(IcoFrame::with_encoded(buf, size, size, ColorType::Rgba8)?);
    }

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staged = NamedTempFile::new_in(dir)
        .with_context(|| format!("Can't create temporary file in {}", dir.display()))?;

    {
        let mut out_file = BufWriter::new(&mut staged);
        let encoder = IcoEncoder::new(&mut out_file);
        encoder
            .encode_images(&frames)
            .context("Failed to encode ICO")?;
        out_file.flush()?;
    }

    staged
        .persist(path)
        .with_context(|| format!("Can't write icon to {}", path.display()))?;
    Ok(())
}

// Encode image data as PNG with compression
fn write_png<W: Write>(image_data: &[u8], w: W, size: u32) -> Result<()> {
    let encoder = PngEncoder::new_with_quality(w, CompressionType::Best, PngFilterType::Adaptive);
    encoder.write_image(image_data, size, size, ColorType::Rgba8)?;
    Ok(())
}
