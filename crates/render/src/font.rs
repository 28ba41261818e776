//! 标记编号字体
//!
//! 优先使用配置或系统中的 TrueType 字体；都找不到时退回内置的数字点阵字体。

use ab_glyph::{Font, FontVec, PxScale, ScaleFont};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_text_mut};
use imageproc::rect::Rect;
use std::path::{Path, PathBuf};

use crate::RenderError;

pub enum LabelFont {
    Outline(FontVec),
    /// 内置 3x5 数字点阵
    Bitmap,
}

impl std::fmt::Debug for LabelFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LabelFont::Outline(_) => f.write_str("LabelFont::Outline"),
            LabelFont::Bitmap => f.write_str("LabelFont::Bitmap"),
        }
    }
}

/// 常见系统粗体无衬线字体位置
fn system_font_candidates() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    #[cfg(target_os = "linux")]
    {
        paths.push(PathBuf::from("/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf"));
        paths.push(PathBuf::from("/usr/share/fonts/TTF/DejaVuSans-Bold.ttf"));
        paths.push(PathBuf::from("/usr/share/fonts/dejavu-sans-fonts/DejaVuSans-Bold.ttf"));
        paths.push(PathBuf::from("/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf"));
    }

    #[cfg(target_os = "macos")]
    {
        paths.push(PathBuf::from("/System/Library/Fonts/Supplemental/Arial Bold.ttf"));
        paths.push(PathBuf::from("/Library/Fonts/Arial Bold.ttf"));
    }

    #[cfg(target_os = "windows")]
    {
        paths.push(PathBuf::from(r"C:\Windows\Fonts\arialbd.ttf"));
        paths.push(PathBuf::from(r"C:\Windows\Fonts\segoeuib.ttf"));
    }

    paths
}

impl LabelFont {
    pub fn from_file(path: &Path) -> Result<Self, RenderError> {
        let data = std::fs::read(path)?;
        let font = FontVec::try_from_vec(data)
            .map_err(|e| RenderError::Font(format!("{}: {}", path.display(), e)))?;
        Ok(LabelFont::Outline(font))
    }

    /// 依次尝试配置路径、系统字体，最后退回点阵字体
    pub fn locate(configured: Option<&Path>) -> Self {
        if let Some(path) = configured {
            match Self::from_file(path) {
                Ok(font) => {
                    log::info!("[Surface] 使用配置字体: {:?}", path);
                    return font;
                }
                Err(e) => log::warn!("[Surface] 配置字体不可用: {}", e),
            }
        }

        for path in system_font_candidates() {
            if !path.exists() {
                continue;
            }
            if let Ok(font) = Self::from_file(&path) {
                log::info!("[Surface] 使用系统字体: {:?}", path);
                return font;
            }
        }

        log::info!("[Surface] 未找到可用字体，使用内置点阵数字");
        LabelFont::Bitmap
    }

    /// 绘制文本，`baseline_y` 为基线位置
    pub(crate) fn draw(
        &self,
        canvas: &mut RgbaImage,
        text: &str,
        x: i32,
        baseline_y: i32,
        height: u32,
        color: Rgba<u8>,
    ) {
        match self {
            LabelFont::Outline(font) => {
                let scale = PxScale::from(height as f32);
                let ascent = font.as_scaled(scale).ascent();
                let top = baseline_y - ascent.round() as i32;
                draw_text_mut(canvas, color, x, top, scale, font, text);
            }
            LabelFont::Bitmap => draw_bitmap_text(canvas, text, x, baseline_y, height, color),
        }
    }
}

const GLYPH_W: i32 = 3;
const GLYPH_H: i32 = 5;

// 每行 3 位，高位在左
const DIGITS: [[u8; 5]; 10] = [
    [0b111, 0b101, 0b101, 0b101, 0b111],
    [0b010, 0b110, 0b010, 0b010, 0b111],
    [0b111, 0b001, 0b111, 0b100, 0b111],
    [0b111, 0b001, 0b111, 0b001, 0b111],
    [0b101, 0b101, 0b111, 0b001, 0b001],
    [0b111, 0b100, 0b111, 0b001, 0b111],
    [0b111, 0b100, 0b111, 0b101, 0b111],
    [0b111, 0b001, 0b010, 0b010, 0b010],
    [0b111, 0b101, 0b111, 0b101, 0b111],
    [0b111, 0b101, 0b111, 0b001, 0b111],
];

fn draw_bitmap_text(
    canvas: &mut RgbaImage,
    text: &str,
    x: i32,
    baseline_y: i32,
    height: u32,
    color: Rgba<u8>,
) {
    let cell = (height as i32 / (GLYPH_H + 1)).max(1);
    let top = baseline_y - GLYPH_H * cell;
    let mut pen_x = x;

    for ch in text.chars() {
        if let Some(rows) = ch.to_digit(10).map(|d| DIGITS[d as usize]) {
            for (row, bits) in rows.iter().enumerate() {
                for col in 0..GLYPH_W {
                    if bits & (1 << (GLYPH_W - 1 - col)) == 0 {
                        continue;
                    }
                    let rect = Rect::at(pen_x + col * cell, top + row as i32 * cell)
                        .of_size(cell as u32, cell as u32);
                    draw_filled_rect_mut(canvas, rect, color);
                }
            }
        }
        pen_x += (GLYPH_W + 1) * cell;
    }
}
