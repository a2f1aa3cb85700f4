use thiserror::Error;

/// High-level response after a surface acquisition error.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface was reconfigured; rendering may resume next frame.
    Reconfigured,
    /// Transient error; skip the current frame.
    SkipFrame,
    /// Unrecoverable (commonly OOM).
    Fatal,
}

/// Failures raised by the presentation surface.
#[derive(Debug, Error)]
pub enum GpuError {
    #[error("surface size {width}x{height} exceeds the device limit of {max}")]
    SurfaceTooLarge { width: u32, height: u32, max: u32 },

    #[error("surface acquisition failed: {0}")]
    Surface(#[from] wgpu::SurfaceError),
}

/// An error reported by the device: captured by an error scope, escaped to
/// the uncaptured-error handler, or a device loss.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeviceError {
    #[error("GPU out of memory during {what}")]
    OutOfMemory { what: &'static str },

    #[error("GPU validation failed during {what}: {message}")]
    Validation { what: &'static str, message: String },

    #[error("internal GPU error during {what}: {message}")]
    Internal { what: &'static str, message: String },

    #[error("GPU device lost: {0}")]
    Lost(String),
}

impl DeviceError {
    pub fn from_wgpu(what: &'static str, err: &wgpu::Error) -> Self {
        match err {
            wgpu::Error::OutOfMemory { .. } => DeviceError::OutOfMemory { what },
            wgpu::Error::Validation { description, .. } => DeviceError::Validation {
                what,
                message: description.clone(),
            },
            wgpu::Error::Internal { description, .. } => DeviceError::Internal {
                what,
                message: description.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wgpu_errors_keep_their_kind_and_description() {
        let oom = wgpu::Error::OutOfMemory { source: "no heap".into() };
        assert_eq!(DeviceError::from_wgpu("target creation", &oom), DeviceError::OutOfMemory { what: "target creation" });

        let invalid = wgpu::Error::Validation {
            source: "bad usage".into(),
            description: "texture usage is empty".into(),
        };
        let err = DeviceError::from_wgpu("target creation", &invalid);
        assert_eq!(err.to_string(), "GPU validation failed during target creation: texture usage is empty");
    }
}
