use serde::{Deserialize, Serialize};

/// 绘图表面当前显示的内容
///
/// Blank → Loading → Loaded。解码失败时表面显示空白页、状态停在 Error，
/// 直到下一次加载（Loading）或重置（Blank）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceStatus {
    #[default]
    Blank,
    Loading,
    Loaded,
    Error,
}

impl SurfaceStatus {
    pub fn is_loading(self) -> bool {
        self == SurfaceStatus::Loading
    }
}
