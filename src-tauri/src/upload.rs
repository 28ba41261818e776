//! 文件上传请求解析
//!
//! 前端把文件内容作为原始请求体发送，文件名和媒体类型放在请求头中，
//! 避免大文件经过 JSON 数组序列化。文件名是 UTF-8 的 base64 编码。

use base64::{engine::general_purpose::STANDARD, Engine};
use pagemark_core::FileSelection;
use tauri::ipc::{InvokeBody, Request};

pub const FILE_NAME_HEADER: &str = "x-file-name";
pub const MIME_TYPE_HEADER: &str = "x-mime-type";

/// 从请求头和请求体还原文件选择，没有文件名头表示未选择文件
pub fn selection_from_parts(
    encoded_name: Option<&str>,
    mime_type: Option<&str>,
    bytes: Vec<u8>,
) -> Option<FileSelection> {
    let encoded_name = encoded_name?;
    let file_name = match STANDARD.decode(encoded_name.trim()) {
        Ok(raw) => String::from_utf8_lossy(&raw).into_owned(),
        Err(e) => {
            log::warn!("[Upload] 文件名无法解码，按原样使用: {}", e);
            encoded_name.to_string()
        }
    };

    Some(FileSelection {
        file_name,
        mime_type: mime_type.unwrap_or_default().to_string(),
        bytes,
    })
}

/// 读取 `open_document` 请求中的文件
pub fn selection_from_request(request: &Request<'_>) -> Option<FileSelection> {
    let header = |name: &str| {
        request
            .headers()
            .get(name)
            .and_then(|value| value.to_str().ok())
    };

    let bytes = match request.body() {
        InvokeBody::Raw(bytes) => bytes.clone(),
        InvokeBody::Json(_) => Vec::new(),
    };

    selection_from_parts(header(FILE_NAME_HEADER), header(MIME_TYPE_HEADER), bytes)
}
