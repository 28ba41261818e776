//! 文档加载接口
//!
//! 控制器只通过这两个 trait 接触渲染库：`DocumentLoader` 把字节解码为首页句柄，
//! `PageSource` 把首页栅格化为像素。

use crate::geometry::Viewport;
use image::RgbaImage;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("PDF 渲染库不可用: {0}")]
    LibraryUnavailable(String),
    #[error("无法解析 PDF: {0}")]
    Decode(String),
    #[error("PDF 不包含任何页面")]
    NoPages,
    #[error("渲染页面失败: {0}")]
    Render(String),
}

/// 已解码文档的首页
pub trait PageSource: Send + Sync {
    /// 按视口尺寸栅格化页面
    fn rasterize(&self, viewport: &Viewport) -> Result<RgbaImage, LoadError>;
}

/// 解码结果：首页句柄 + 缩放 1.0 的视口
#[derive(Clone)]
pub struct LoadedDocument {
    pub page: Arc<dyn PageSource>,
    pub viewport: Viewport,
    pub page_count: usize,
    /// 文档内容的 SHA-256（十六进制）
    pub fingerprint: String,
}

impl std::fmt::Debug for LoadedDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedDocument")
            .field("viewport", &self.viewport)
            .field("page_count", &self.page_count)
            .field("fingerprint", &self.fingerprint)
            .finish_non_exhaustive()
    }
}

pub trait DocumentLoader: Send + Sync {
    /// 解码 PDF 字节，只取第 1 页
    fn load(&self, bytes: &[u8]) -> Result<LoadedDocument, LoadError>;

    /// 检查渲染库能否初始化（启动时调用一次）
    fn probe(&self) -> Result<(), LoadError> {
        Ok(())
    }
}
