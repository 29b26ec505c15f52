use super::*;
use crate::format::color::Rgb;
use crate::format::pixel::{BitDepth, ByteOrder, Subsampling};

fn layout(s: Subsampling, d: BitDepth) -> PixelLayout {
    PixelLayout::new(s, d, ByteOrder::Little)
}

fn canvas(width: u32, height: u32) -> Canvas {
    Canvas { width, height }
}

#[test]
fn plane_sizes_follow_decimation() {
    let l = layout(Subsampling::Yuv420, BitDepth::Eight);
    let p = PlaneBuffer::allocate(canvas(64, 64), &l).unwrap();
    assert_eq!(p.y().len(), 4096);
    assert_eq!(p.u().len(), 1024);
    assert_eq!(p.v().len(), 1024);
    assert_eq!(p.data().len(), 6144);

    let l = layout(Subsampling::Yuv422, BitDepth::Ten);
    let p = PlaneBuffer::allocate(canvas(64, 48), &l).unwrap();
    assert_eq!(p.y_len(), 64 * 48 * 2);
    assert_eq!(p.c_len(), 32 * 48 * 2);
    assert_eq!(p.u().len(), p.v().len());
}

#[test]
fn mono_has_empty_chroma() {
    let l = layout(Subsampling::Yuv400, BitDepth::Twelve);
    let p = PlaneBuffer::allocate(canvas(33, 17), &l).unwrap();
    assert_eq!(p.u().len(), 0);
    assert_eq!(p.v().len(), 0);
    assert_eq!(p.data().len(), 33 * 17 * 2);
}

#[test]
fn fill_rect_clips_to_bounds() {
    let l = layout(Subsampling::Yuv444, BitDepth::Eight);
    let mut p = PlaneBuffer::allocate(canvas(4, 4), &l).unwrap();
    let white = Rgb::new(255, 255, 255).to_yuv();
    p.fill_rect(&l, 2..100, 3..100, white);
    let y = p.y();
    assert_eq!(&y[12..16], &[0, 0, 235, 235]);
    assert!(y[..12].iter().all(|&b| b == 0));
    assert_eq!(&p.u()[12..16], &[0, 0, 128, 128]);
}

#[test]
fn fill_rows_touches_mapped_chroma_rows() {
    let l = layout(Subsampling::Yuv420, BitDepth::Eight);
    let mut p = PlaneBuffer::allocate(canvas(8, 8), &l).unwrap();
    let red = Rgb::new(255, 0, 0).to_yuv();
    p.fill_rows(&l, 2..6, red);
    let geom = p.chroma_geometry();
    assert_eq!((geom.width, geom.height), (4, 4));
    let v = p.v();
    assert!(v[..4].iter().all(|&b| b == 0));
    assert!(v[4..12].iter().all(|&b| b == red.v));
    assert!(v[12..].iter().all(|&b| b == 0));
}

#[test]
fn clear_zeroes_everything() {
    let l = layout(Subsampling::Yuv420, BitDepth::Ten);
    let mut p = PlaneBuffer::allocate(canvas(8, 8), &l).unwrap();
    p.fill_rows(&l, 0..8, Rgb::new(1, 2, 3).to_yuv());
    p.clear();
    assert!(p.data().iter().all(|&b| b == 0));
}

#[test]
fn absurd_geometry_is_rejected() {
    let l = layout(Subsampling::Yuv444, BitDepth::Twelve);
    let err = PlaneBuffer::allocate(canvas(u32::MAX, u32::MAX), &l).unwrap_err();
    assert!(matches!(
        err,
        AvgenError::Configuration(_) | AvgenError::Allocation(_)
    ));
}
