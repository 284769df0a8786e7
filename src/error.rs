//! Error types
//!
//! Gameplay input never fails (invalid input is ignored), so the only errors
//! are startup failures, bad tuning files and per-frame presentation issues.

use thiserror::Error;

/// Failure to bring up the drawing surface. The frame loop is never started.
#[derive(Debug, Error)]
pub enum InitError {
    #[error("canvas element `{0}` not found")]
    MissingCanvas(String),
    #[error("failed to create drawing surface: {0}")]
    Surface(String),
    #[error("no suitable graphics adapter: {0}")]
    Adapter(String),
    #[error("failed to create graphics device: {0}")]
    Device(String),
    #[error("failed to build HUD overlay: {0}")]
    Overlay(String),
    #[error("game host was already torn down")]
    TornDown,
}

/// Invalid tuning data
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("tuning parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Per-frame presentation failure (tolerated by the frame loop)
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("surface lost")]
    SurfaceLost,
    #[error("out of memory")]
    OutOfMemory,
    #[error("render error: {0}")]
    Other(String),
}

impl From<wgpu::SurfaceError> for RenderError {
    fn from(e: wgpu::SurfaceError) -> Self {
        match e {
            wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => RenderError::SurfaceLost,
            wgpu::SurfaceError::OutOfMemory => RenderError::OutOfMemory,
            other => RenderError::Other(other.to_string()),
        }
    }
}
