//! Core model for page landmark picking.

pub mod document;
pub mod geometry;
pub mod landmarks;
pub mod selection;
pub mod sequence;
pub mod status;

pub use document::{DocumentLoader, LoadError, LoadedDocument, PageSource};
pub use geometry::{Point, PointerSample, Viewport, BLANK_HEIGHT, BLANK_WIDTH};
pub use landmarks::{LandmarkEntry, LandmarkStore};
pub use selection::{FileSelection, PDF_MIME_TYPE};
pub use sequence::{LoadSequencer, LoadTicket};
pub use status::SurfaceStatus;

pub type Result<T> = std::result::Result<T, CoreError>;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("请选择一个文件")]
    NoFile,
    #[error("请选择有效的 PDF 文件（当前类型: {0}）")]
    UnsupportedMediaType(String),
}
