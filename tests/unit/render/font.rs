use super::*;
use crate::format::pixel::{BitDepth, ByteOrder, Subsampling};

fn geom(width: u32, height: u32) -> PlaneGeometry {
    PlaneGeometry { width, height }
}

#[test]
fn glyph_table_covers_timestamp_characters() {
    for c in "0123456789:".chars() {
        assert!(find_glyph(c).is_some(), "missing glyph for {c}");
    }
    assert!(find_glyph('a').is_none());
}

#[test]
fn glyphs_fit_inside_the_atlas() {
    for g in &GLYPHS {
        assert!(g.x + g.width <= ATLAS_WIDTH, "{g:?}");
        assert!(g.y + g.height <= ATLAS_HEIGHT, "{g:?}");
    }
}

#[test]
fn atlas_is_binary_coverage() {
    let zero = find_glyph('0').unwrap();
    let mut lit = 0;
    for y in 0..zero.height {
        for x in 0..zero.width {
            let v = atlas_value(zero.x + x, zero.y + y);
            assert!(v == 0 || v == 255);
            if v == 255 {
                lit += 1;
            }
        }
    }
    assert!(lit > 0);
}

#[test]
fn draw_text_writes_luma_and_advances() {
    let layout = PixelLayout::new(Subsampling::Yuv420, BitDepth::Eight, ByteOrder::Little);
    let g = geom(200, 80);
    let mut luma = vec![7u8; 200 * 80];
    let drawn = draw_text(&mut luma, g, &layout, "00", 10, 5);
    assert_eq!(drawn, 2);

    let zero = find_glyph('0').unwrap();
    // The second glyph starts one advance to the right of the first.
    for pen in [10u32, 10 + zero.xadvance] {
        for row in 0..zero.height {
            for col in 0..zero.width {
                let dx = (pen + zero.xoffset + col) as usize;
                let dy = (5 + zero.yoffset + row) as usize;
                assert_eq!(luma[dy * 200 + dx], atlas_value(zero.x + col, row));
            }
        }
    }
    // Above the glyph band nothing changed.
    assert!(luma[..200 * 17].iter().all(|&b| b == 7));
}

#[test]
fn unknown_characters_are_skipped() {
    let layout = PixelLayout::new(Subsampling::Yuv420, BitDepth::Eight, ByteOrder::Little);
    let mut luma = vec![0u8; 100 * 60];
    let drawn = draw_text(&mut luma, geom(100, 60), &layout, "1x", 0, 0);
    assert_eq!(drawn, 1);
}

#[test]
fn draw_text_clips_at_plane_edge() {
    let layout = PixelLayout::new(Subsampling::Yuv420, BitDepth::Ten, ByteOrder::Big);
    let mut luma = vec![0u8; 20 * 20 * 2];
    assert_eq!(draw_text(&mut luma, geom(20, 20), &layout, "88:88", 5, 5), 5);
}

#[test]
fn sixteen_bit_glyph_pixels_are_scaled() {
    let layout = PixelLayout::new(Subsampling::Yuv420, BitDepth::Ten, ByteOrder::Big);
    let g = geom(64, 64);
    let mut luma = vec![0u8; 64 * 64 * 2];
    draw_text(&mut luma, g, &layout, "8", 0, 0);
    let eight = find_glyph('8').unwrap();
    let mut seen_lit = false;
    for row in 0..eight.height {
        for col in 0..eight.width {
            if atlas_value(eight.x + col, row) == 255 {
                let at = (((eight.yoffset + row) * 64 + eight.xoffset + col) * 2) as usize;
                assert_eq!(&luma[at..at + 2], &[0x03, 0xFC]);
                seen_lit = true;
            }
        }
    }
    assert!(seen_lit);
}
