use anyhow::Result;
use image::Rgb;

/// Logo asset, relative to the project root.
pub const LOGO_PATH: &str = "public/launchpad-rocket-logo.png";

/// Generated icon, relative to the project root.
pub const OUTPUT_PATH: &str = "traka-launchpad.ico";

/// Largest frame an ICO directory entry can describe.
const MAX_ICO_FRAME: u32 = 256;

/// Every constant that shapes the generated icon.
///
/// The binary only ever uses [`IconStyle::default`]; the struct exists so the
/// compositing steps can be exercised on small canvases in tests.
#[derive(Debug, Clone)]
pub struct IconStyle {
    pub canvas_size: u32,
    pub corner_radius: u32,
    /// Traka orange, used for the logo, glow and border.
    pub accent: Rgb<u8>,
    pub background_top: Rgb<u8>,
    pub background_bottom: Rgb<u8>,
    /// Logo edge length as a fraction of the canvas.
    pub logo_scale: f64,
    /// Upward shift of the logo from the exact center, in pixels.
    pub logo_lift: u32,
    pub glow_band: u32,
    pub glow_inset: u32,
    pub glow_peak_alpha: u8,
    pub border_width: u32,
    pub border_alpha: u8,
    pub frame_sizes: Vec<u32>,
}

impl Default for IconStyle {
    fn default() -> Self {
        Self {
            canvas_size: 512,
            corner_radius: 100,
            accent: Rgb([255, 131, 0]),
            background_top: Rgb([15, 15, 20]),
            background_bottom: Rgb([25, 25, 35]),
            logo_scale: 0.68,
            logo_lift: 15,
            glow_band: 80,
            glow_inset: 40,
            glow_peak_alpha: 12,
            border_width: 2,
            border_alpha: 40,
            frame_sizes: vec![16, 24, 32, 48, 64, 128, 256],
        }
    }
}

impl IconStyle {
    /// Edge length of the tinted logo once resized onto the canvas.
    pub fn logo_size(&self) -> u32 {
        (self.canvas_size as f64 * self.logo_scale) as u32
    }

    pub fn validate(&self) -> Result<()> {
        if self.canvas_size == 0 {
            anyhow::bail!("Canvas size must be greater than zero");
        }
        if self.corner_radius * 2 > self.canvas_size {
            anyhow::bail!(
                "Corner radius {} does not fit a {}px canvas",
                self.corner_radius,
                self.canvas_size
            );
        }
        if self.glow_band > self.canvas_size {
            anyhow::bail!("Glow band is taller than the canvas");
        }
        if self.frame_sizes.is_empty() {
            anyhow::bail!("At least one frame size is required");
        }
        if let Some(size) = self
            .frame_sizes
            .iter()
            .find(|&&size| size == 0 || size > MAX_ICO_FRAME)
        {
            anyhow::bail!("Frame size {size} is outside the ICO range 1..={MAX_ICO_FRAME}");
        }
        Ok(())
    }
}
