use std::ops::Range;

use crate::foundation::core::Canvas;
use crate::foundation::error::{AvgenError, AvgenResult};
use crate::format::color::Yuv;
use crate::format::pixel::{EncodedSample, PixelLayout};

/// Dimensions of one plane, in samples.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlaneGeometry {
    /// Samples per row.
    pub width: u32,
    /// Rows.
    pub height: u32,
}

impl PlaneGeometry {
    fn byte_len(self, bytes_per_sample: usize) -> Option<usize> {
        usize::try_from(self.width)
            .ok()?
            .checked_mul(usize::try_from(self.height).ok()?)?
            .checked_mul(bytes_per_sample)
    }
}

/// One contiguous allocation holding the Y, U and V planes back to back.
#[derive(Debug)]
pub(crate) struct PlaneBuffer {
    data: Vec<u8>,
    bytes_per_sample: usize,
    luma: PlaneGeometry,
    chroma: PlaneGeometry,
    y_len: usize,
    c_len: usize,
}

impl PlaneBuffer {
    /// Allocate zeroed planes for `canvas` in `layout`.
    pub(crate) fn allocate(canvas: Canvas, layout: &PixelLayout) -> AvgenResult<Self> {
        let luma = PlaneGeometry {
            width: canvas.width,
            height: canvas.height,
        };
        let (cw, ch) = layout.chroma_dims(canvas.width, canvas.height);
        let chroma = PlaneGeometry {
            width: cw,
            height: ch,
        };

        let bps = layout.bytes_per_sample;
        let too_large = || {
            AvgenError::configuration(format!(
                "frame {}x{} does not fit in memory",
                canvas.width, canvas.height
            ))
        };
        let y_len = luma.byte_len(bps).ok_or_else(too_large)?;
        let c_len = chroma.byte_len(bps).ok_or_else(too_large)?;
        let total = c_len
            .checked_mul(2)
            .and_then(|c| c.checked_add(y_len))
            .ok_or_else(too_large)?;

        let mut data = Vec::new();
        data.try_reserve_exact(total).map_err(|e| {
            AvgenError::allocation(format!("failed to allocate {total} bytes of planes: {e}"))
        })?;
        data.resize(total, 0);

        Ok(Self {
            data,
            bytes_per_sample: bps,
            luma,
            chroma,
            y_len,
            c_len,
        })
    }

    pub(crate) fn luma_geometry(&self) -> PlaneGeometry {
        self.luma
    }

    pub(crate) fn chroma_geometry(&self) -> PlaneGeometry {
        self.chroma
    }

    pub(crate) fn y_len(&self) -> usize {
        self.y_len
    }

    pub(crate) fn c_len(&self) -> usize {
        self.c_len
    }

    pub(crate) fn data(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn y(&self) -> &[u8] {
        &self.data[..self.y_len]
    }

    pub(crate) fn u(&self) -> &[u8] {
        &self.data[self.y_len..self.y_len + self.c_len]
    }

    pub(crate) fn v(&self) -> &[u8] {
        &self.data[self.y_len + self.c_len..]
    }

    pub(crate) fn y_mut(&mut self) -> &mut [u8] {
        &mut self.data[..self.y_len]
    }

    fn planes_mut(&mut self) -> (&mut [u8], &mut [u8], &mut [u8]) {
        let (y, chroma) = self.data.split_at_mut(self.y_len);
        let (u, v) = chroma.split_at_mut(self.c_len);
        (y, u, v)
    }

    /// Zero every byte of all three planes.
    pub(crate) fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Fill a luma-space rectangle with `color`, mapping it into chroma space for U and V.
    ///
    /// The rectangle is clipped to the plane bounds.
    pub(crate) fn fill_rect(
        &mut self,
        layout: &PixelLayout,
        x: Range<u32>,
        y: Range<u32>,
        color: Yuv,
    ) {
        let bps = self.bytes_per_sample;
        let luma = self.luma;
        let chroma = self.chroma;
        let cx = layout.chroma.horizontal.apply(x.start)..layout.chroma.horizontal.apply(x.end);
        let cy = layout.chroma.vertical.apply(y.start)..layout.chroma.vertical.apply(y.end);

        let (yp, up, vp) = self.planes_mut();
        fill_plane(yp, luma, bps, x, y, layout.encode(color.y));
        fill_plane(up, chroma, bps, cx.clone(), cy.clone(), layout.encode(color.u));
        fill_plane(vp, chroma, bps, cx, cy, layout.encode(color.v));
    }

    /// Fill whole luma rows, and the chroma rows they map to, with `color`.
    pub(crate) fn fill_rows(&mut self, layout: &PixelLayout, rows: Range<u32>, color: Yuv) {
        let width = self.luma.width;
        self.fill_rect(layout, 0..width, rows, color);
    }
}

/// Write `sample` into `x` by `y` of a plane, clipped to `geom`.
fn fill_plane(
    plane: &mut [u8],
    geom: PlaneGeometry,
    bytes_per_sample: usize,
    x: Range<u32>,
    y: Range<u32>,
    sample: EncodedSample,
) {
    let x0 = x.start.min(geom.width) as usize;
    let x1 = x.end.min(geom.width) as usize;
    let y0 = y.start.min(geom.height) as usize;
    let y1 = y.end.min(geom.height) as usize;
    if x0 >= x1 || y0 >= y1 {
        return;
    }

    let stride = geom.width as usize * bytes_per_sample;
    let (b0, b1) = (x0 * bytes_per_sample, x1 * bytes_per_sample);
    for row in plane.chunks_exact_mut(stride).skip(y0).take(y1 - y0) {
        sample.fill(&mut row[b0..b1]);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/planes.rs"]
mod tests;
