use crate::convert::alloc;
use crate::foundation::error::AvgenResult;

/// Pack consecutive byte pairs into 16-bit values, first byte high.
///
/// A trailing odd byte becomes the high byte of a final value whose low byte is zero.
pub fn convert_8_to_16(src: &[u8]) -> AvgenResult<Vec<u16>> {
    let mut out = alloc(src.len().div_ceil(2))?;
    let mut pairs = src.chunks_exact(2);
    out.extend(pairs.by_ref().map(|p| u16::from_be_bytes([p[0], p[1]])));
    if let [last] = pairs.remainder() {
        out.push(u16::from(*last) << 8);
    }
    Ok(out)
}

/// Split each 16-bit value into its high and low bytes, in that order.
pub fn convert_16_to_8(src: &[u16]) -> AvgenResult<Vec<u8>> {
    let mut out = alloc(src.len() * 2)?;
    out.extend(src.iter().flat_map(|v| v.to_be_bytes()));
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/convert/depth.rs"]
mod tests;
