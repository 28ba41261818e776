use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::ImageFormat;
use std::io::Cursor;

use crate::{RenderError, Surface};

impl Surface {
    pub fn encode_png(&self) -> Result<Vec<u8>, RenderError> {
        let mut data = Vec::new();
        self.canvas()
            .write_to(&mut Cursor::new(&mut data), ImageFormat::Png)?;
        Ok(data)
    }

    /// 供前端 `<img>` 直接使用的 data URL
    pub fn to_data_url(&self) -> Result<String, RenderError> {
        let png = self.encode_png()?;
        Ok(format!("data:image/png;base64,{}", STANDARD.encode(png)))
    }
}
