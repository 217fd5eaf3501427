use anyhow::Result;
use launchpad_icon::{inspect::read_icon, style::OUTPUT_PATH};
use std::path::PathBuf;

fn main() -> Result<()> {
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(OUTPUT_PATH));

    let frames = read_icon(&path)?;

    println!("Checking icon: {}", path.display());
    println!("Frames: {}", frames.len());
    for frame in &frames {
        println!(
            "  {}x{}  ({} bytes encoded)",
            frame.width, frame.height, frame.encoded_len
        );
    }

    let Some(largest) = frames.iter().max_by_key(|frame| frame.width) else {
        println!("⚠ Icon contains no frames");
        return Ok(());
    };

    let img = &largest.image;
    let (width, height) = img.dimensions();
    let center = img.get_pixel(width / 2, height / 2);
    println!("\nLargest frame ({}x{}):", width, height);
    println!(
        "  Center RGBA: [{}, {}, {}, {}]",
        center[0], center[1], center[2], center[3]
    );

    let corners = [
        (0, 0),
        (width - 1, 0),
        (0, height - 1),
        (width - 1, height - 1),
    ];
    let transparent = corners
        .iter()
        .filter(|&&(x, y)| img.get_pixel(x, y)[3] == 0)
        .count();
    println!("  {} out of {} corners transparent", transparent, corners.len());

    if transparent == corners.len() {
        println!("✓ Rounded corners intact!");
    } else {
        println!("⚠ Corners are not fully masked");
    }

    Ok(())
}
