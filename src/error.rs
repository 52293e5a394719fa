use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DemoError {
    #[error("Event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("Failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("Failed to create GPU surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("No suitable GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    #[error("Failed to create GPU device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("GPU surface reports no supported formats")]
    UnsupportedSurface,

    #[error("Failed to load sprite sheet {path:?}: {source}")]
    AssetLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to present frame: {0}")]
    Present(#[from] wgpu::SurfaceError),
}

pub type Result<T> = std::result::Result<T, DemoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asset_load_names_the_file() {
        let source = image::ImageError::IoError(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "no such file",
        ));
        let err = DemoError::AssetLoad {
            path: PathBuf::from("walk_iso.jpg"),
            source,
        };
        let msg = err.to_string();
        assert!(msg.contains("walk_iso.jpg"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn present_error_display() {
        let err = DemoError::from(wgpu::SurfaceError::OutOfMemory);
        assert!(err.to_string().starts_with("Failed to present frame"));
    }
}
