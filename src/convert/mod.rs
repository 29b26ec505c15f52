//! Standalone repacking helpers for raw plane buffers.
//!
//! These do not depend on a [`crate::Generator`]; they take slices and return freshly allocated
//! buffers.

/// 8-bit and 16-bit container repacking.
pub mod depth;
/// I420 and NV12 layout repacking for 10-bit samples.
pub mod nv12;

use crate::foundation::error::{AvgenError, AvgenResult};

pub(crate) fn alloc<T>(len: usize) -> AvgenResult<Vec<T>> {
    let mut out = Vec::new();
    out.try_reserve_exact(len).map_err(|e| {
        AvgenError::allocation(format!("failed to allocate {len} converter samples: {e}"))
    })?;
    Ok(out)
}
