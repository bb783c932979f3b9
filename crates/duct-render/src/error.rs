use std::fmt;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    /// Any Vulkan failure while bringing up the instance, surface, device or
    /// swapchain.
    #[error("failed to {stage}: {message}")]
    Gpu { stage: &'static str, message: String },

    #[error("no Vulkan device with graphics and present support")]
    NoSuitableDevice,
}

impl RenderError {
    pub(crate) fn gpu(stage: &'static str, err: impl fmt::Display) -> Self {
        Self::Gpu {
            stage,
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gpu_error_message() {
        let err = RenderError::gpu("create swapchain", "out of memory");
        assert_eq!(err.to_string(), "failed to create swapchain: out of memory");
    }
}
