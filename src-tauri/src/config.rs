use pagemark_render::LabelFont;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tauri::Manager;

use crate::commands::AppState;

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    /// 额外的 pdfium 库目录（优先于默认搜索路径）
    pub pdfium_dir: Option<String>,
    /// 标记编号使用的字体文件
    pub label_font_path: Option<String>,
}

impl AppConfig {
    pub fn pdfium_dir(&self) -> Option<PathBuf> {
        self.pdfium_dir.as_ref().map(PathBuf::from)
    }

    pub fn label_font(&self) -> LabelFont {
        LabelFont::locate(self.label_font_path.as_deref().map(Path::new))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("app data dir unavailable")]
    NoAppDataDir,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ConfigResult<T> = Result<T, String>;

pub fn config_path(app: &tauri::AppHandle) -> Result<PathBuf, ConfigError> {
    let base = app
        .path()
        .app_data_dir()
        .map_err(|_| ConfigError::NoAppDataDir)?;
    Ok(base.join("pagemark").join("config.json"))
}

/// 读取配置文件，不存在时返回默认配置
pub fn read_config(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

pub fn write_config(path: &Path, config: &AppConfig) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let raw = serde_json::to_string_pretty(config)?;
    fs::write(path, raw)?;
    Ok(())
}

#[tauri::command]
pub fn load_config(app: tauri::AppHandle) -> ConfigResult<AppConfig> {
    let path = config_path(&app).map_err(|err| err.to_string())?;
    read_config(&path).map_err(|err| err.to_string())
}

/// 保存配置，并立即把标记字体应用到当前表面
///
/// pdfium 目录在下次启动时生效。
#[tauri::command]
pub fn save_config(
    app: tauri::AppHandle,
    state: tauri::State<'_, AppState>,
    config: AppConfig,
) -> ConfigResult<()> {
    let path = config_path(&app).map_err(|err| err.to_string())?;
    write_config(&path, &config).map_err(|err| err.to_string())?;

    let font = config.label_font();
    state.lock()?.set_label_font(font);
    log::info!("[Config] 配置已保存: {:?}", path);
    Ok(())
}
