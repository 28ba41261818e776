//! 绘图表面
//!
//! 表面没有图层：叠加标记时总是先完整重绘底图，再按序列顺序绘制全部标记。

use image::{imageops, Rgba, RgbaImage};
use pagemark_core::{PageSource, Point, Viewport, BLANK_HEIGHT, BLANK_WIDTH};

use crate::font::LabelFont;
use crate::marker::{draw_marker, MarkerStyle};
use crate::RenderError;

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// 重绘时使用的底图
#[derive(Clone, Copy)]
pub enum SurfaceBase<'a> {
    Blank,
    Page {
        page: &'a dyn PageSource,
        viewport: &'a Viewport,
    },
}

#[derive(Debug)]
pub struct Surface {
    canvas: RgbaImage,
    style: MarkerStyle,
    font: LabelFont,
}

impl Surface {
    /// 创建一个默认尺寸的空白表面
    pub fn new(font: LabelFont) -> Self {
        Self {
            canvas: RgbaImage::from_pixel(BLANK_WIDTH, BLANK_HEIGHT, WHITE),
            style: MarkerStyle::default(),
            font,
        }
    }

    pub fn set_font(&mut self, font: LabelFont) {
        self.font = font;
    }

    pub fn style(&self) -> &MarkerStyle {
        &self.style
    }

    pub fn paint_blank(&mut self, width: u32, height: u32) {
        self.canvas = RgbaImage::from_pixel(width, height, WHITE);
    }

    pub fn paint_default_blank(&mut self) {
        self.paint_blank(BLANK_WIDTH, BLANK_HEIGHT);
    }

    /// 将表面调整为视口尺寸并让页面以缩放 1 栅格化到表面上
    ///
    /// 栅格化失败时返回错误，表面内容保持不变。
    pub fn paint_document_page(
        &mut self,
        page: &dyn PageSource,
        viewport: &Viewport,
    ) -> Result<(), RenderError> {
        let raster = page.rasterize(viewport)?;

        let mut canvas = RgbaImage::from_pixel(viewport.width, viewport.height, WHITE);
        if raster.dimensions() != canvas.dimensions() {
            log::warn!(
                "[Surface] 页面栅格 {:?} 与视口 {}x{} 不一致，按左上角对齐",
                raster.dimensions(),
                viewport.width,
                viewport.height
            );
        }
        imageops::replace(&mut canvas, &raster, 0, 0);
        self.canvas = canvas;
        Ok(())
    }

    pub fn repaint_base(&mut self, base: SurfaceBase<'_>) -> Result<(), RenderError> {
        match base {
            SurfaceBase::Blank => {
                self.paint_default_blank();
                Ok(())
            }
            SurfaceBase::Page { page, viewport } => self.paint_document_page(page, viewport),
        }
    }

    /// 重绘底图，然后按顺序绘制所有标记（编号 = 索引 + 1）
    pub fn overlay_landmarks(
        &mut self,
        base: SurfaceBase<'_>,
        points: &[Point],
    ) -> Result<(), RenderError> {
        self.repaint_base(base)?;
        for (index, point) in points.iter().enumerate() {
            draw_marker(&mut self.canvas, &self.style, &self.font, *point, index + 1);
        }
        Ok(())
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.canvas.dimensions()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba<u8>> {
        self.canvas.get_pixel_checked(x, y).copied()
    }

    pub fn canvas(&self) -> &RgbaImage {
        &self.canvas
    }

    /// 表面是否为纯白
    pub fn is_blank(&self) -> bool {
        self.canvas.pixels().all(|p| *p == WHITE)
    }
}
