//! PDF 文档加载
//!
//! 使用 pdfium-render 解码 PDF 并只取第 1 页。pdfium 的文档对象借用库绑定，
//! 无法跨命令保存，所以页面句柄持有原始字节，需要栅格化时重新绑定并打开。

mod binding;
mod page;

pub use binding::{pdfium_search_paths, LibrarySource, PdfiumLocator, PDFIUM_DIR_ENV};
pub use page::PdfPage;

use pagemark_core::{DocumentLoader, LoadError, LoadedDocument, Viewport};
use sha2::{Digest, Sha256};
use std::path::PathBuf;
use std::sync::Arc;

/// 首页以 1 PDF 单位 = 1 像素渲染
pub const PAGE_SCALE: f32 = 1.0;

/// 基于 pdfium 的文档加载器
#[derive(Debug, Clone)]
pub struct PdfiumLoader {
    locator: Arc<PdfiumLocator>,
}

impl PdfiumLoader {
    /// `extra_dir` 为配置中指定的 pdfium 目录，优先于默认搜索路径
    pub fn new(extra_dir: Option<PathBuf>) -> Self {
        Self {
            locator: Arc::new(PdfiumLocator::new(pdfium_search_paths(extra_dir))),
        }
    }
}

impl DocumentLoader for PdfiumLoader {
    fn load(&self, bytes: &[u8]) -> Result<LoadedDocument, LoadError> {
        let pdfium = self.locator.bind()?;

        let document = pdfium
            .load_pdf_from_byte_slice(bytes, None)
            .map_err(|e| LoadError::Decode(e.to_string()))?;

        let page_count = document.pages().len() as usize;
        if page_count == 0 {
            return Err(LoadError::NoPages);
        }

        let page = document
            .pages()
            .get(0)
            .map_err(|e| LoadError::Decode(format!("获取第 1 页失败: {}", e)))?;

        let viewport = Viewport::from_page_size(page.width().value, page.height().value, PAGE_SCALE);
        let fingerprint = fingerprint(bytes);

        log::info!(
            "[Loader] 已解码: {} 页, 首页 {}x{} px, sha256={}",
            page_count,
            viewport.width,
            viewport.height,
            &fingerprint[..12]
        );

        Ok(LoadedDocument {
            page: Arc::new(PdfPage::new(bytes.to_vec(), Arc::clone(&self.locator))),
            viewport,
            page_count,
            fingerprint,
        })
    }

    fn probe(&self) -> Result<(), LoadError> {
        self.locator.bind().map(|_| ())
    }
}

/// 文档内容的 SHA-256 十六进制摘要
pub fn fingerprint(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}
