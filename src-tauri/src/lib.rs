mod commands;
mod config;
mod session;
mod types;
mod upload;

pub use commands::AppState;
pub use config::AppConfig;
pub use session::{LoadOutcome, Session};
pub use types::{DocumentSummary, SurfaceView};

use pagemark_core::DocumentLoader;
use pagemark_pdf::PdfiumLoader;
use std::sync::Arc;
use tauri::Manager;

/// 读取配置并构建应用状态
///
/// pdfium 绑定失败只记录为启动错误，界面其余部分照常可用。
fn build_state(app: &tauri::AppHandle) -> AppState {
    let config = match config::config_path(app).map(|path| config::read_config(&path)) {
        Ok(Ok(config)) => config,
        Ok(Err(e)) | Err(e) => {
            log::warn!("[Startup] 读取配置失败，使用默认配置: {}", e);
            AppConfig::default()
        }
    };

    let loader = PdfiumLoader::new(config.pdfium_dir());
    let mut session = Session::new(config.label_font());

    match loader.probe() {
        Ok(()) => log::info!("[Startup] pdfium 已就绪"),
        Err(e) => {
            log::error!("[Startup] pdfium 初始化失败: {}", e);
            session.set_startup_error(e.to_string());
        }
    }

    AppState::new(session, Arc::new(loader))
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tauri::Builder::default()
        .plugin(
            tauri_plugin_log::Builder::default()
                .level(log::LevelFilter::Info)
                .timezone_strategy(tauri_plugin_log::TimezoneStrategy::UseLocal)
                .build(),
        )
        .setup(|app| {
            let state = build_state(app.handle());
            app.manage(state);
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            // 视图
            commands::get_view,
            // 文档
            commands::open_document,
            commands::reset,
            // 指针与地标
            commands::pointer_move,
            commands::pointer_leave,
            commands::click_surface,
            commands::delete_landmark,
            // 配置
            config::load_config,
            config::save_config
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
