//! Raster drawing surface for page preview and landmark markers.

mod encode;
mod font;
mod marker;
mod surface;

pub use font::LabelFont;
pub use marker::MarkerStyle;
pub use surface::{Surface, SurfaceBase};

use pagemark_core::LoadError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("{0}")]
    Page(#[from] LoadError),

    #[error("图像编码失败: {0}")]
    Encode(#[from] image::ImageError),

    #[error("字体加载失败: {0}")]
    Font(String),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),
}
