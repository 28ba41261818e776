use image::RgbaImage;
use pagemark_core::{LoadError, PageSource, Viewport};
use pdfium_render::prelude::*;
use std::sync::{Arc, OnceLock};

use crate::binding::PdfiumLocator;

/// 已解码文档第 1 页的句柄
///
/// 首次成功栅格化的结果会被缓存，之后同尺寸的重绘直接复用。
pub struct PdfPage {
    bytes: Vec<u8>,
    locator: Arc<PdfiumLocator>,
    raster: OnceLock<RgbaImage>,
}

impl PdfPage {
    pub(crate) fn new(bytes: Vec<u8>, locator: Arc<PdfiumLocator>) -> Self {
        Self {
            bytes,
            locator,
            raster: OnceLock::new(),
        }
    }

    fn render(&self, viewport: &Viewport) -> Result<RgbaImage, LoadError> {
        let pdfium = self.locator.bind()?;

        let document = pdfium
            .load_pdf_from_byte_slice(&self.bytes, None)
            .map_err(|e| LoadError::Decode(e.to_string()))?;

        let page = document
            .pages()
            .get(0)
            .map_err(|e| LoadError::Decode(format!("获取第 1 页失败: {}", e)))?;

        let render_config = PdfRenderConfig::new()
            .set_target_width(viewport.width as i32)
            .set_target_height(viewport.height as i32);

        let bitmap = page
            .render_with_config(&render_config)
            .map_err(|e| LoadError::Render(e.to_string()))?;

        log::debug!(
            "[Loader] 首页栅格化完成: {}x{} px",
            viewport.width,
            viewport.height
        );

        Ok(bitmap.as_image().to_rgba8())
    }
}

impl PageSource for PdfPage {
    fn rasterize(&self, viewport: &Viewport) -> Result<RgbaImage, LoadError> {
        if let Some(cached) = self.raster.get() {
            if cached.dimensions() == (viewport.width, viewport.height) {
                return Ok(cached.clone());
            }
        }

        let image = self.render(viewport)?;
        let _ = self.raster.set(image.clone());
        Ok(image)
    }
}
