//! 前端事件入口

use pagemark_core::{DocumentLoader, Point, PointerSample};
use std::sync::{Arc, Mutex, MutexGuard};
use tauri::ipc::Request;
use tauri::State;

use crate::session::{decode_document, task_failure, Session};
use crate::types::SurfaceView;
use crate::upload;

pub type CommandResult<T> = Result<T, String>;

pub struct AppState {
    pub session: Mutex<Session>,
    pub loader: Arc<dyn DocumentLoader>,
}

impl AppState {
    pub fn new(session: Session, loader: Arc<dyn DocumentLoader>) -> Self {
        Self {
            session: Mutex::new(session),
            loader,
        }
    }

    pub fn lock(&self) -> CommandResult<MutexGuard<'_, Session>> {
        self.session.lock().map_err(|e| e.to_string())
    }
}

fn view_of(session: &Session) -> CommandResult<SurfaceView> {
    session.view().map_err(|e| e.to_string())
}

/// 获取当前界面快照
#[tauri::command]
pub fn get_view(state: State<'_, AppState>) -> CommandResult<SurfaceView> {
    view_of(&*state.lock()?)
}

/// 打开用户选择的 PDF
///
/// 文件内容是原始请求体，文件名和类型在请求头中（见 `upload`）。
/// 校验和结果应用在锁内完成，解码和首页栅格化在阻塞线程池中进行；
/// 解码期间若有新的选择或重置，本次结果会被丢弃。
#[tauri::command]
pub async fn open_document(
    state: State<'_, AppState>,
    request: Request<'_>,
) -> CommandResult<SurfaceView> {
    let selection = upload::selection_from_request(&request);

    let ticket = {
        let mut session = state.lock()?;
        match session.begin_load(selection.as_ref()) {
            Ok(ticket) => ticket,
            Err(_) => return view_of(&session),
        }
    };

    let Some(selection) = selection else {
        return view_of(&*state.lock()?);
    };
    let file_name = selection.file_name.clone();
    let loader = Arc::clone(&state.loader);

    let result = tauri::async_runtime::spawn_blocking(move || {
        decode_document(loader.as_ref(), &selection.bytes)
    })
    .await
    .unwrap_or_else(|e| Err(task_failure(e)));

    let mut session = state.lock()?;
    session.finish_load(ticket, file_name, result);
    view_of(&session)
}

/// 指针在表面上移动
#[tauri::command]
pub fn pointer_move(state: State<'_, AppState>, sample: PointerSample) -> CommandResult<Point> {
    Ok(state.lock()?.pointer_move(&sample))
}

/// 指针离开表面
#[tauri::command]
pub fn pointer_leave(state: State<'_, AppState>) -> CommandResult<()> {
    state.lock()?.pointer_leave();
    Ok(())
}

/// 点击表面添加地标
#[tauri::command]
pub fn click_surface(state: State<'_, AppState>, sample: PointerSample) -> CommandResult<SurfaceView> {
    let mut session = state.lock()?;
    session.click(&sample);
    view_of(&session)
}

/// 删除列表中的地标
#[tauri::command]
pub fn delete_landmark(state: State<'_, AppState>, index: usize) -> CommandResult<SurfaceView> {
    let mut session = state.lock()?;
    session.delete_landmark(index);
    view_of(&session)
}

/// 重置为空白页
#[tauri::command]
pub fn reset(state: State<'_, AppState>) -> CommandResult<SurfaceView> {
    let mut session = state.lock()?;
    session.reset();
    view_of(&session)
}
