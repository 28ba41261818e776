//! 地标标记绘制

use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_filled_circle_mut;
use pagemark_core::Point;

use crate::font::LabelFont;

/// 标记样式
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerStyle {
    /// 圆点半径
    pub radius: i32,
    pub fill: Rgba<u8>,
    pub outline: Rgba<u8>,
    /// 描边宽度，沿半径居中
    pub outline_width: i32,
    /// 编号相对圆心的偏移（向右为正，向上为负）
    pub label_offset: (i32, i32),
    pub label_color: Rgba<u8>,
    /// 编号字号（像素）
    pub label_height: u32,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        let red = Rgba([255u8, 0, 0, 255]);
        Self {
            radius: 5,
            fill: red,
            outline: Rgba([255u8, 255, 255, 255]),
            outline_width: 2,
            label_offset: (8, -8),
            label_color: red,
            label_height: 12,
        }
    }
}

/// 在 `point` 处绘制一个编号为 `number` 的标记
pub(crate) fn draw_marker(
    canvas: &mut RgbaImage,
    style: &MarkerStyle,
    font: &LabelFont,
    point: Point,
    number: usize,
) {
    let center = (point.x, point.y);
    let half = style.outline_width / 2;

    // 先铺描边外沿，再用填充色覆盖内圈
    draw_filled_circle_mut(canvas, center, style.radius + half, style.outline);
    if style.radius - half > 0 {
        draw_filled_circle_mut(canvas, center, style.radius - half, style.fill);
    }

    font.draw(
        canvas,
        &number.to_string(),
        point.x + style.label_offset.0,
        point.y + style.label_offset.1,
        style.label_height,
        style.label_color,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_fill_and_outline() {
        let white = Rgba([255u8, 255, 255, 255]);
        let mut canvas = RgbaImage::from_pixel(60, 60, Rgba([0, 0, 0, 255]));
        let style = MarkerStyle::default();
        draw_marker(&mut canvas, &style, &LabelFont::Bitmap, Point::new(20, 40), 1);

        assert_eq!(*canvas.get_pixel(20, 40), style.fill);
        // 半径 5 处落在白色描边上
        assert_eq!(*canvas.get_pixel(25, 40), white);
        assert_eq!(*canvas.get_pixel(20, 45), white);
        // 描边之外保持原样
        assert_eq!(*canvas.get_pixel(28, 40), Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_marker_near_edge_is_clipped() {
        let mut canvas = RgbaImage::from_pixel(10, 10, Rgba([0, 0, 0, 255]));
        draw_marker(
            &mut canvas,
            &MarkerStyle::default(),
            &LabelFont::Bitmap,
            Point::new(0, 0),
            12,
        );
        assert_eq!(*canvas.get_pixel(0, 0), MarkerStyle::default().fill);
    }
}
