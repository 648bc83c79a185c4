//! Error types for startup and asset loading.
//!
//! The per-frame scene code never fails; everything that can go wrong happens
//! while acquiring the GPU, linking shader programs or loading models, and is
//! reported through [`LanternError`].

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while starting the renderer or loading assets.
#[derive(Debug, Error)]
pub enum LanternError {
    #[error("failed to create the window surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("no suitable GPU adapter: {0}")]
    RequestAdapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to acquire a GPU device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    #[error("surface reports no supported texture formats")]
    NoSurfaceFormat,

    #[error("shader program '{name}' failed to link: {message}")]
    ShaderLink { name: String, message: String },

    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to load OBJ model '{path}': {source}")]
    ObjLoad {
        path: PathBuf,
        #[source]
        source: tobj::LoadError,
    },

    #[error("OBJ model '{0}' contains no meshes")]
    EmptyModel(PathBuf),

    #[error("window creation failed: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
}

pub type Result<T> = std::result::Result<T, LanternError>;
