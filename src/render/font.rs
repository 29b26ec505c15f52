//! Compiled-in bitmap font with the glyphs needed for an `MM:SS` timestamp.

use crate::format::pixel::PixelLayout;
use crate::render::planes::PlaneGeometry;

/// Width of the glyph atlas in pixels.
pub const ATLAS_WIDTH: u32 = 264;
/// Height of the glyph atlas in pixels.
pub const ATLAS_HEIGHT: u32 = 50;

/// 8-bit coverage atlas, row-major, `ATLAS_WIDTH * ATLAS_HEIGHT` bytes.
static ATLAS: &[u8; (ATLAS_WIDTH * ATLAS_HEIGHT) as usize] =
    include_bytes!("../../assets/fonts/digits_264x50.bin");

/// Placement of one character in the atlas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Glyph {
    /// Character this glyph draws.
    pub id: char,
    /// Left edge in the atlas.
    pub x: u32,
    /// Top edge in the atlas.
    pub y: u32,
    /// Width of the atlas rectangle.
    pub width: u32,
    /// Height of the atlas rectangle.
    pub height: u32,
    /// Horizontal offset from the pen position.
    pub xoffset: u32,
    /// Vertical offset from the line top.
    pub yoffset: u32,
    /// Pen advance after drawing.
    pub xadvance: u32,
}

const fn glyph(
    id: char,
    x: u32,
    width: u32,
    height: u32,
    xoffset: u32,
    yoffset: u32,
    xadvance: u32,
) -> Glyph {
    Glyph {
        id,
        x,
        y: 0,
        width,
        height,
        xoffset,
        yoffset,
        xadvance,
    }
}

/// Digits `0`-`9` and `:`.
pub const GLYPHS: [Glyph; 11] = [
    glyph('0', 109, 25, 39, 3, 12, 31),
    glyph('1', 239, 15, 39, 6, 12, 31),
    glyph('2', 28, 26, 39, 2, 12, 31),
    glyph('3', 135, 25, 39, 3, 12, 31),
    glyph('4', 0, 27, 39, 1, 12, 31),
    glyph('5', 161, 25, 39, 3, 12, 31),
    glyph('6', 55, 26, 39, 2, 12, 31),
    glyph('7', 82, 26, 39, 2, 12, 31),
    glyph('8', 187, 25, 39, 3, 12, 31),
    glyph('9', 213, 25, 39, 3, 12, 31),
    glyph(':', 255, 5, 29, 5, 22, 15),
];

/// Find the glyph for `c`.
pub fn find_glyph(c: char) -> Option<&'static Glyph> {
    GLYPHS.iter().find(|g| g.id == c)
}

/// Atlas coverage value at `(x, y)`.
pub fn atlas_value(x: u32, y: u32) -> u8 {
    ATLAS[(y * ATLAS_WIDTH + x) as usize]
}

/// Blit `text` into a luma plane with the pen starting at sample `(x, y)`.
///
/// Only the luma plane is written. Characters without a glyph are logged and skipped. Pixels
/// past the plane edge are clipped. Returns the number of glyphs drawn.
pub(crate) fn draw_text(
    luma: &mut [u8],
    geom: PlaneGeometry,
    layout: &PixelLayout,
    text: &str,
    x: u32,
    y: u32,
) -> usize {
    let mut pen = x;
    let mut drawn = 0;
    for c in text.chars() {
        let Some(g) = find_glyph(c) else {
            tracing::warn!(character = %c, "no glyph for character, skipping");
            continue;
        };
        blit_glyph(luma, geom, layout, g, pen, y);
        pen = pen.saturating_add(g.xadvance);
        drawn += 1;
    }
    drawn
}

fn blit_glyph(
    luma: &mut [u8],
    geom: PlaneGeometry,
    layout: &PixelLayout,
    g: &Glyph,
    pen: u32,
    top: u32,
) {
    let bps = layout.bytes_per_sample;
    let left = pen.saturating_add(g.xoffset);
    for row in 0..g.height {
        let dst_y = top.saturating_add(g.yoffset).saturating_add(row);
        if dst_y >= geom.height {
            break;
        }
        for col in 0..g.width {
            let dst_x = left.saturating_add(col);
            if dst_x >= geom.width {
                break;
            }
            let sample = layout.encode(atlas_value(g.x + col, g.y + row));
            let at = (dst_y as usize * geom.width as usize + dst_x as usize) * bps;
            luma[at..at + bps].copy_from_slice(sample.as_bytes());
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/font.rs"]
mod tests;
