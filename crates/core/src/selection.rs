//! 文件选择校验

use crate::{CoreError, Result};
use serde::{Deserialize, Serialize};

pub const PDF_MIME_TYPE: &str = "application/pdf";

/// 前端文件选择框提交的文件
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileSelection {
    pub file_name: String,
    /// 浏览器声明的媒体类型
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl FileSelection {
    /// 校验文件存在且媒体类型严格等于 PDF
    pub fn validate(selection: Option<&FileSelection>) -> Result<&FileSelection> {
        let selection = selection.ok_or(CoreError::NoFile)?;
        if selection.mime_type != PDF_MIME_TYPE {
            return Err(CoreError::UnsupportedMediaType(display_type(&selection.mime_type)));
        }
        Ok(selection)
    }
}

fn display_type(mime: &str) -> String {
    if mime.is_empty() {
        "未知".to_string()
    } else {
        mime.to_string()
    }
}
