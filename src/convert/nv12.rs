use crate::convert::alloc;
use crate::foundation::error::{AvgenError, AvgenResult};

/// Three separate planes of 16-bit samples.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct I420Planes {
    /// Luma, `width * height` samples.
    pub y: Vec<u16>,
    /// Cb, `(width / 2) * (height / 2)` samples.
    pub u: Vec<u16>,
    /// Cr, `(width / 2) * (height / 2)` samples.
    pub v: Vec<u16>,
}

/// Luma plane plus one interleaved Cb/Cr plane of 16-bit samples.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Nv12Planes {
    /// Luma, `width * height` samples.
    pub y: Vec<u16>,
    /// Interleaved `U, V` pairs, `2 * (width / 2) * (height / 2)` samples.
    pub uv: Vec<u16>,
}

fn plane_sizes(width: u32, height: u32) -> AvgenResult<(usize, usize)> {
    let luma = (width as usize).checked_mul(height as usize);
    let chroma = (width as usize / 2).checked_mul(height as usize / 2);
    match (luma, chroma) {
        (Some(l), Some(c)) => Ok((l, c)),
        _ => Err(AvgenError::configuration(format!(
            "plane size {width}x{height} overflows"
        ))),
    }
}

fn require(name: &str, have: usize, need: usize) -> AvgenResult<()> {
    if have < need {
        return Err(AvgenError::configuration(format!(
            "{name} plane has {have} samples, need {need}"
        )));
    }
    Ok(())
}

/// Interleave the chroma planes of a 10-bit I420 frame.
///
/// Samples beyond the stated geometry are ignored.
pub fn convert_i420_to_nv12_10bit(
    src: &I420Planes,
    width: u32,
    height: u32,
) -> AvgenResult<Nv12Planes> {
    let (luma, chroma) = plane_sizes(width, height)?;
    require("Y", src.y.len(), luma)?;
    require("U", src.u.len(), chroma)?;
    require("V", src.v.len(), chroma)?;

    let mut y = alloc(luma)?;
    y.extend_from_slice(&src.y[..luma]);
    let mut uv = alloc(chroma * 2)?;
    for (u, v) in src.u[..chroma].iter().zip(&src.v[..chroma]) {
        uv.push(*u);
        uv.push(*v);
    }
    Ok(Nv12Planes { y, uv })
}

/// Split the interleaved chroma plane of a 10-bit NV12 frame.
pub fn convert_nv12_to_i420_10bit(
    src: &Nv12Planes,
    width: u32,
    height: u32,
) -> AvgenResult<I420Planes> {
    let (luma, chroma) = plane_sizes(width, height)?;
    require("Y", src.y.len(), luma)?;
    require("UV", src.uv.len(), chroma * 2)?;

    let mut y = alloc(luma)?;
    y.extend_from_slice(&src.y[..luma]);
    let mut u = alloc(chroma)?;
    let mut v = alloc(chroma)?;
    for pair in src.uv[..chroma * 2].chunks_exact(2) {
        u.push(pair[0]);
        v.push(pair[1]);
    }
    Ok(I420Planes { y, u, v })
}

#[cfg(test)]
#[path = "../../tests/unit/convert/nv12.rs"]
mod tests;
