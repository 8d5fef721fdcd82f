use candle_core::Device;
use tracing::debug;

#[cfg(any(feature = "metal", feature = "cuda"))]
use tracing::{info, warn};

use super::error::EmbeddingError;

/// Picks the compute device for model inference based on enabled features.
///
/// Tries Metal, then CUDA, then falls back to CPU. The CPU fallback always
/// succeeds, so the `Result` only exists to keep loader call sites uniform.
pub fn select_device() -> Result<Device, EmbeddingError> {
    #[cfg(feature = "metal")]
    match Device::new_metal(0) {
        Ok(device) => {
            info!("Using Metal GPU acceleration");
            return Ok(device);
        }
        Err(e) => warn!(error = %e, "Metal device unavailable, falling back"),
    }

    #[cfg(feature = "cuda")]
    match Device::new_cuda(0) {
        Ok(device) => {
            info!("Using CUDA GPU acceleration");
            return Ok(device);
        }
        Err(e) => warn!(error = %e, "CUDA device unavailable, falling back"),
    }

    debug!("Using CPU device");
    Ok(Device::Cpu)
}
