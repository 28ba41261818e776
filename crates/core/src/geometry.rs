//! 像素坐标与视口

use serde::{Deserialize, Serialize};

/// 空白页宽度（A4 @ 96 DPI）
pub const BLANK_WIDTH: u32 = 794;
/// 空白页高度（A4 @ 96 DPI）
pub const BLANK_HEIGHT: u32 = 1123;

/// 绘图表面内的整数像素坐标
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// 前端上报的一次指针采样
///
/// `client_*` 为指针位置，`origin_*` 为绘图表面包围盒左上角，二者处于同一页面坐标系。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointerSample {
    pub client_x: f64,
    pub client_y: f64,
    pub origin_left: f64,
    pub origin_top: f64,
}

impl PointerSample {
    /// 指针相对表面左上角的偏移，四舍五入到整数像素
    pub fn to_point(&self) -> Point {
        Point {
            x: round_half_up(self.client_x - self.origin_left),
            y: round_half_up(self.client_y - self.origin_top),
        }
    }
}

// .5 一律向正无穷取整，与浏览器 Math.round 一致
fn round_half_up(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}

/// 页面渲染视口
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    pub scale: f32,
}

impl Viewport {
    /// 由页面尺寸（PDF 单位）按缩放比例计算像素视口
    ///
    /// 非整数像素直接截断，宽高至少为 1。
    pub fn from_page_size(width: f32, height: f32, scale: f32) -> Self {
        let to_px = |v: f32| ((v * scale).max(0.0) as u32).max(1);
        Self {
            width: to_px(width),
            height: to_px(height),
            scale,
        }
    }

    pub fn blank() -> Self {
        Self {
            width: BLANK_WIDTH,
            height: BLANK_HEIGHT,
            scale: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(cx: f64, cy: f64, left: f64, top: f64) -> PointerSample {
        PointerSample {
            client_x: cx,
            client_y: cy,
            origin_left: left,
            origin_top: top,
        }
    }

    #[test]
    fn test_pointer_offset_subtracts_origin() {
        assert_eq!(sample(140.0, 400.0, 20.0, 60.0).to_point(), Point::new(120, 340));
    }

    #[test]
    fn test_pointer_at_surface_corner_is_origin() {
        // 原点必须是图像像素 (0,0) 的位置，不含边框
        assert_eq!(sample(31.0, 71.0, 31.0, 71.0).to_point(), Point::new(0, 0));
        assert_eq!(sample(31.4, 71.4, 31.0, 71.0).to_point(), Point::new(0, 0));
    }

    #[test]
    fn test_pointer_offset_rounds_to_nearest() {
        assert_eq!(sample(10.4, 10.6, 0.0, 0.0).to_point(), Point::new(10, 11));
        assert_eq!(sample(10.5, 0.0, 0.0, 0.5).to_point(), Point::new(11, 0));
        assert_eq!(sample(0.0, 0.0, 2.5, 0.0).to_point(), Point::new(-2, 0));
    }

    #[test]
    fn test_viewport_truncates_fractional_points() {
        let vp = Viewport::from_page_size(595.28, 841.89, 1.0);
        assert_eq!((vp.width, vp.height), (595, 841));
    }

    #[test]
    fn test_viewport_minimum_one_pixel() {
        let vp = Viewport::from_page_size(0.2, 0.0, 1.0);
        assert_eq!((vp.width, vp.height), (1, 1));
    }

    #[test]
    fn test_blank_viewport() {
        let vp = Viewport::blank();
        assert_eq!((vp.width, vp.height), (794, 1123));
    }
}
