use pagemark_core::{LandmarkEntry, Point, SurfaceStatus};
use serde::{Deserialize, Serialize};

/// 当前文档信息
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSummary {
    pub name: String,
    pub page_count: usize,
    pub fingerprint: String,
    /// 首页视口宽度（像素）
    pub width: u32,
    pub height: u32,
}

/// 界面快照（返回给前端）
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurfaceView {
    pub status: SurfaceStatus,
    pub width: u32,
    pub height: u32,
    /// 表面位图，PNG data URL
    pub image: String,
    pub landmarks: Vec<LandmarkEntry>,
    pub cursor: Option<Point>,
    pub error: Option<String>,
    pub startup_error: Option<String>,
    pub document: Option<DocumentSummary>,
    pub selected_file: Option<String>,
}
