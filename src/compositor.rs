use crate::style::IconStyle;
use anyhow::Result;
use image::{
    imageops, imageops::FilterType, DynamicImage, GrayImage, Luma, Rgb, Rgba, Rgba32FImage,
    RgbaImage,
};

/// An axis-aligned rectangle with circular corners, in continuous canvas
/// coordinates (pixel `x` covers `[x, x + 1)`).
#[derive(Debug, Clone, Copy)]
pub struct RoundedRect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub radius: f64,
}

impl RoundedRect {
    /// The rounded square covering a whole `size`×`size` canvas.
    pub fn full(size: u32, radius: u32) -> Self {
        Self::inset(size, 0, radius)
    }

    /// A rounded square shrunk by `inset` pixels on every side.
    pub fn inset(size: u32, inset: u32, radius: u32) -> Self {
        let near = inset as f64;
        let far = size as f64 - inset as f64;
        Self {
            left: near,
            top: near,
            right: far,
            bottom: far,
            radius: radius as f64,
        }
    }

    /// Whether the center of pixel `(x, y)` lies inside the shape.
    pub fn contains(&self, x: u32, y: u32) -> bool {
        let px = x as f64 + 0.5;
        let py = y as f64 + 0.5;
        if px < self.left || px > self.right || py < self.top || py > self.bottom {
            return false;
        }

        let radius = self
            .radius
            .min((self.right - self.left) / 2.0)
            .min((self.bottom - self.top) / 2.0)
            .max(0.0);

        // Nearest point on the inner rectangle the corner arcs are centered on
        let cx = px.clamp(self.left + radius, self.right - radius);
        let cy = py.clamp(self.top + radius, self.bottom - radius);
        let dx = px - cx;
        let dy = py - cy;
        dx * dx + dy * dy <= radius * radius
    }
}

/// Color of gradient row `y` on a canvas of `size` rows.
pub fn gradient_row_color(top: Rgb<u8>, bottom: Rgb<u8>, y: u32, size: u32) -> Rgb<u8> {
    let t = y as f64 / size as f64;
    let mut color = top;
    for (channel, (&start, &end)) in color.0.iter_mut().zip(top.0.iter().zip(bottom.0.iter())) {
        *channel = (start as f64 + (end as f64 - start as f64) * t) as u8;
    }
    color
}

/// Opaque canvas filled with a vertical gradient from `background_top` to
/// `background_bottom`.
pub fn gradient_background(style: &IconStyle) -> RgbaImage {
    let size = style.canvas_size;
    let mut canvas = RgbaImage::new(size, size);

    for (y, row) in canvas.enumerate_rows_mut() {
        let Rgb([r, g, b]) =
            gradient_row_color(style.background_top, style.background_bottom, y, size);
        for (_, _, pixel) in row {
            *pixel = Rgba([r, g, b, 255]);
        }
    }

    canvas
}

/// Binary alpha mask of the rounded square: 255 inside, 0 outside.
pub fn rounded_mask(size: u32, radius: u32) -> GrayImage {
    let shape = RoundedRect::full(size, radius);
    GrayImage::from_fn(size, size, |x, y| {
        if shape.contains(x, y) {
            Luma([255])
        } else {
            Luma([0])
        }
    })
}

/// Replace the canvas alpha channel with the mask.
pub fn apply_mask(canvas: &mut RgbaImage, mask: &GrayImage) {
    for (pixel, coverage) in canvas.pixels_mut().zip(mask.pixels()) {
        pixel[3] = coverage[0];
    }
}

/// Transparent layer holding the accent glow along the bottom of the canvas.
///
/// Rows fade linearly from `glow_peak_alpha` at the top of the band to fully
/// transparent on the bottom row.
pub fn glow_overlay(style: &IconStyle) -> RgbaImage {
    let size = style.canvas_size;
    let band = style.glow_band;
    let mut glow = RgbaImage::new(size, size);
    let Rgb([r, g, b]) = style.accent;

    let x_end = size.saturating_sub(style.glow_inset).min(size - 1);
    for i in 0..band {
        let alpha = (style.glow_peak_alpha as f64 * (1.0 - i as f64 / band as f64)) as u8;
        let y = size - band + i;
        for x in style.glow_inset..=x_end {
            glow.put_pixel(x, y, Rgba([r, g, b, alpha]));
        }
    }

    glow
}

/// Recolor an image to `color`, scaling each RGB channel by its own
/// intensity and keeping alpha untouched.
pub fn tint(image: &RgbaImage, color: Rgb<u8>) -> RgbaImage {
    let mut tinted = image.clone();
    for pixel in tinted.pixels_mut() {
        for (channel, &target) in pixel.0.iter_mut().take(3).zip(color.0.iter()) {
            *channel = (*channel as f64 / 255.0 * target as f64) as u8;
        }
    }
    tinted
}

/// Paste `top` at `(x, y)` using its own alpha as the blend mask.
///
/// Every channel, alpha included, is interpolated between canvas and `top`,
/// so a fully opaque logo pixel replaces the canvas pixel outright.
pub fn paste_with_alpha(canvas: &mut RgbaImage, top: &RgbaImage, x: i64, y: i64) {
    let (width, height) = (canvas.width() as i64, canvas.height() as i64);

    for (tx, ty, src) in top.enumerate_pixels() {
        let cx = x + tx as i64;
        let cy = y + ty as i64;
        if cx < 0 || cy < 0 || cx >= width || cy >= height {
            continue;
        }

        let weight = src[3] as u32;
        let dst = canvas.get_pixel_mut(cx as u32, cy as u32);
        for c in 0..4 {
            let blended = src[c] as u32 * weight + dst[c] as u32 * (255 - weight);
            dst[c] = ((blended + 127) / 255) as u8;
        }
    }
}

/// Lanczos3 resize on premultiplied color.
///
/// Color hidden under zero alpha never bleeds into neighboring pixels, and
/// pixels that end up fully transparent come out as `[0, 0, 0, 0]`.
pub fn resize_premultiplied(image: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    let premultiplied = Rgba32FImage::from_fn(image.width(), image.height(), |x, y| {
        let Rgba([r, g, b, a]) = *image.get_pixel(x, y);
        let alpha = a as f32 / 255.0;
        Rgba([
            r as f32 / 255.0 * alpha,
            g as f32 / 255.0 * alpha,
            b as f32 / 255.0 * alpha,
            alpha,
        ])
    });

    let resized = imageops::resize(&premultiplied, width, height, FilterType::Lanczos3);

    RgbaImage::from_fn(width, height, |x, y| {
        let Rgba([r, g, b, a]) = *resized.get_pixel(x, y);
        let alpha = unit_to_u8(a);
        if alpha == 0 {
            return Rgba([0, 0, 0, 0]);
        }
        Rgba([unit_to_u8(r / a), unit_to_u8(g / a), unit_to_u8(b / a), alpha])
    })
}

fn unit_to_u8(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Resize the tinted logo and paste it centered, lifted by `logo_lift`.
pub fn place_logo(canvas: &mut RgbaImage, logo: &RgbaImage, style: &IconStyle) {
    let logo_size = style.logo_size();
    let resized = resize_premultiplied(logo, logo_size, logo_size);

    let offset_x = (canvas.width() as i64 - logo_size as i64).div_euclid(2);
    let offset_y =
        (canvas.height() as i64 - logo_size as i64).div_euclid(2) - style.logo_lift as i64;
    paste_with_alpha(canvas, &resized, offset_x, offset_y);
}

/// Transparent layer with a thin accent outline just inside the rounded edge.
pub fn border_overlay(style: &IconStyle) -> RgbaImage {
    let size = style.canvas_size;
    let outer = RoundedRect::inset(size, 1, style.corner_radius);
    let inner = RoundedRect::inset(
        size,
        1 + style.border_width,
        style.corner_radius.saturating_sub(style.border_width),
    );
    let Rgb([r, g, b]) = style.accent;
    let ring = Rgba([r, g, b, style.border_alpha]);

    RgbaImage::from_fn(size, size, |x, y| {
        if outer.contains(x, y) && !inner.contains(x, y) {
            ring
        } else {
            Rgba([0, 0, 0, 0])
        }
    })
}

/// Build the full-resolution icon: gradient, glow, tinted logo and border,
/// clipped to the rounded square.
pub fn compose(logo: &DynamicImage, style: &IconStyle) -> Result<RgbaImage> {
    style.validate()?;

    let mask = rounded_mask(style.canvas_size, style.corner_radius);
    let mut canvas = gradient_background(style);
    apply_mask(&mut canvas, &mask);

    imageops::overlay(&mut canvas, &glow_overlay(style), 0, 0);
    apply_mask(&mut canvas, &mask);

    let tinted = tint(&logo.to_rgba8(), style.accent);
    place_logo(&mut canvas, &tinted, style);

    imageops::overlay(&mut canvas, &border_overlay(style), 0, 0);
    apply_mask(&mut canvas, &mask);

    Ok(canvas)
}
