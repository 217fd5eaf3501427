//! Reading back generated ICO containers.

use anyhow::{Context, Result};
use ico::{IconDir, ResourceType};
use image::RgbaImage;
use std::{fs::File, io::Cursor, path::Path};

/// One decoded frame of an ICO container.
#[derive(Debug, Clone)]
pub struct IconFrame {
    pub width: u32,
    pub height: u32,
    /// Size of the frame's encoded bytes inside the container
    pub encoded_len: u32,
    pub image: RgbaImage,
}

pub fn read_icon(path: &Path) -> Result<Vec<IconFrame>> {
    let file =
        File::open(path).with_context(|| format!("Failed to open icon {}", path.display()))?;
    let icon_dir = IconDir::read(file)
        .with_context(|| format!("Invalid icon file {}", path.display()))?;
    decode_frames(&icon_dir)
}

/// Decode every frame of an in-memory ICO container, in directory order.
pub fn parse_icon(data: &[u8]) -> Result<Vec<IconFrame>> {
    let icon_dir = IconDir::read(Cursor::new(data)).context("Invalid icon data")?;
    decode_frames(&icon_dir)
}

fn decode_frames(icon_dir: &IconDir) -> Result<Vec<IconFrame>> {
    if icon_dir.resource_type() != ResourceType::Icon {
        anyhow::bail!("Not an icon resource");
    }

    icon_dir
        .entries()
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let (width, height) = (entry.width(), entry.height());
            let image = image::load_from_memory(entry.data())
                .with_context(|| format!("Failed to decode frame {index} ({width}x{height})"))?
                .to_rgba8();

            Ok(IconFrame {
                width,
                height,
                encoded_len: entry.data().len() as u32,
                image,
            })
        })
        .collect()
}
