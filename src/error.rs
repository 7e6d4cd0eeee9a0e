//! Error type shared by the windowed and headless front ends.

use thiserror::Error;

/// Everything that can go wrong outside the numeric core.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid color {0:?}: expected #rgb or #rrggbb")]
    InvalidColor(String),

    #[error("invalid parameter: {0}")]
    InvalidParams(String),

    #[error("failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("no suitable GPU adapter found")]
    NoAdapter,

    #[error("failed to request device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to write image: {0}")]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Shorthand for parameter validation failures.
pub(crate) fn invalid(msg: impl Into<String>) -> Error {
    Error::InvalidParams(msg.into())
}
