//! 交互控制器
//!
//! 持有绘图表面、地标序列和当前文档，把前端事件翻译成对它们的操作。
//! 每个操作结束后表面都已重绘完毕，前端只需展示 `view()` 的结果。

use pagemark_core::{
    CoreError, DocumentLoader, FileSelection, LandmarkStore, LoadError, LoadSequencer,
    LoadTicket, LoadedDocument, Point, PointerSample, SurfaceStatus,
};
use pagemark_render::{LabelFont, RenderError, Surface, SurfaceBase};

use crate::types::{DocumentSummary, SurfaceView};

/// 一次加载结果的去向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// 文档已显示
    Applied,
    /// 解码或渲染失败，表面已回到空白页，状态为 Error
    Failed,
    /// 期间有更新的加载请求，结果被丢弃
    Superseded,
}

/// 解码文档并预先栅格化首页
///
/// 在会话锁之外调用，`finish_load` 只需复制页面已缓存的栅格。
pub fn decode_document(
    loader: &dyn DocumentLoader,
    bytes: &[u8],
) -> Result<LoadedDocument, LoadError> {
    let loaded = loader.load(bytes)?;
    loaded.page.rasterize(&loaded.viewport)?;
    Ok(loaded)
}

/// 加载任务本身异常退出（如 panic）时的错误
pub fn task_failure(reason: impl std::fmt::Display) -> LoadError {
    LoadError::Decode(format!("加载任务异常退出: {}", reason))
}

struct OpenDocument {
    name: String,
    loaded: LoadedDocument,
}

pub struct Session {
    surface: Surface,
    landmarks: LandmarkStore,
    document: Option<OpenDocument>,
    cursor: Option<Point>,
    status: SurfaceStatus,
    error: Option<String>,
    startup_error: Option<String>,
    selected_file: Option<String>,
    sequencer: LoadSequencer,
}

impl Session {
    pub fn new(font: LabelFont) -> Self {
        Self {
            surface: Surface::new(font),
            landmarks: LandmarkStore::new(),
            document: None,
            cursor: None,
            status: SurfaceStatus::Blank,
            error: None,
            startup_error: None,
            selected_file: None,
            sequencer: LoadSequencer::new(),
        }
    }

    /// 记录渲染库初始化失败，仅用于提示，不阻止后续操作
    pub fn set_startup_error(&mut self, message: String) {
        self.startup_error = Some(message);
    }

    pub fn set_label_font(&mut self, font: LabelFont) {
        self.surface.set_font(font);
        self.rerender();
    }

    // ============ 文件选择 ============

    /// 校验文件选择并领取加载票据
    ///
    /// 校验失败只设置错误信息，其余状态保持不变。
    pub fn begin_load(&mut self, selection: Option<&FileSelection>) -> Result<LoadTicket, CoreError> {
        let selection = match FileSelection::validate(selection) {
            Ok(selection) => selection,
            Err(e) => {
                log::warn!("[Session] 拒绝文件: {}", e);
                self.error = Some(e.to_string());
                return Err(e);
            }
        };

        let ticket = self.sequencer.issue();
        self.status = SurfaceStatus::Loading;
        self.error = None;
        self.selected_file = Some(selection.file_name.clone());
        log::info!(
            "[Session] 开始加载 #{}: {} ({} 字节)",
            ticket.id(),
            selection.file_name,
            selection.bytes.len()
        );
        Ok(ticket)
    }

    /// 应用加载结果，过期票据的结果直接丢弃
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        file_name: String,
        result: Result<LoadedDocument, LoadError>,
    ) -> LoadOutcome {
        if !self.sequencer.is_current(ticket) {
            log::info!("[Session] 加载 #{} 已过期，丢弃结果: {}", ticket.id(), file_name);
            return LoadOutcome::Superseded;
        }

        let loaded = match result {
            Ok(loaded) => loaded,
            Err(e) => {
                log::warn!("[Session] 加载 #{} 失败: {}", ticket.id(), e);
                self.fall_back_to_blank(format!("加载 PDF 失败: {}", e));
                return LoadOutcome::Failed;
            }
        };

        self.landmarks.clear();
        if let Err(e) = self
            .surface
            .paint_document_page(loaded.page.as_ref(), &loaded.viewport)
        {
            log::warn!("[Session] 渲染 #{} 失败: {}", ticket.id(), e);
            self.fall_back_to_blank(format!("加载 PDF 失败: {}", e));
            return LoadOutcome::Failed;
        }

        log::info!(
            "[Session] 加载 #{} 完成: {} ({}x{})",
            ticket.id(),
            file_name,
            loaded.viewport.width,
            loaded.viewport.height
        );
        self.document = Some(OpenDocument {
            name: file_name,
            loaded,
        });
        self.status = SurfaceStatus::Loaded;
        LoadOutcome::Applied
    }

    /// 在当前线程完成校验、解码和绘制
    #[cfg(test)]
    pub fn open_with(
        &mut self,
        loader: &dyn DocumentLoader,
        selection: Option<&FileSelection>,
    ) -> Result<LoadOutcome, CoreError> {
        let ticket = self.begin_load(selection)?;
        let selection = selection.ok_or(CoreError::NoFile)?;
        let result = decode_document(loader, &selection.bytes);
        Ok(self.finish_load(ticket, selection.file_name.clone(), result))
    }

    // ============ 指针事件 ============

    pub fn pointer_move(&mut self, sample: &PointerSample) -> Point {
        let point = sample.to_point();
        self.cursor = Some(point);
        point
    }

    pub fn pointer_leave(&mut self) {
        self.cursor = None;
    }

    /// 在点击位置添加地标并重绘
    pub fn click(&mut self, sample: &PointerSample) -> Point {
        let point = sample.to_point();
        self.landmarks.append(point);
        self.rerender();
        point
    }

    // ============ 列表与重置 ============

    /// 删除地标，越界索引不做任何事
    pub fn delete_landmark(&mut self, index: usize) {
        if self.landmarks.remove_at(index).is_some() {
            self.rerender();
        }
    }

    /// 回到空白页，清空地标、文件选择和文档
    pub fn reset(&mut self) {
        self.sequencer.invalidate();
        self.paint_blank();
        self.selected_file = None;
        self.landmarks.clear();
        self.document = None;
        self.status = SurfaceStatus::Blank;
        log::info!("[Session] 已重置");
    }

    // ============ 绘制 ============

    fn paint_blank(&mut self) {
        self.surface.paint_default_blank();
        self.error = None;
    }

    /// 表面回到空白页，状态保持 Error 直到下一次加载或重置
    fn fall_back_to_blank(&mut self, message: String) {
        self.document = None;
        self.paint_blank();
        self.status = SurfaceStatus::Error;
        self.error = Some(message);
    }

    /// 重绘底图并叠加全部地标
    fn rerender(&mut self) {
        let base = match &self.document {
            Some(doc) => SurfaceBase::Page {
                page: doc.loaded.page.as_ref(),
                viewport: &doc.loaded.viewport,
            },
            None => SurfaceBase::Blank,
        };
        let result = self.surface.overlay_landmarks(base, self.landmarks.points());

        if let Err(e) = result {
            log::warn!("[Session] 重绘失败: {}", e);
            self.fall_back_to_blank(format!("渲染页面失败: {}", e));
        }
    }

    // ============ 查询 ============

    pub fn status(&self) -> SurfaceStatus {
        self.status
    }

    pub fn landmarks(&self) -> &LandmarkStore {
        &self.landmarks
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn cursor(&self) -> Option<Point> {
        self.cursor
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn selected_file(&self) -> Option<&str> {
        self.selected_file.as_deref()
    }

    pub fn has_document(&self) -> bool {
        self.document.is_some()
    }

    pub fn view(&self) -> Result<SurfaceView, RenderError> {
        let (width, height) = self.surface.dimensions();
        Ok(SurfaceView {
            status: self.status,
            width,
            height,
            image: self.surface.to_data_url()?,
            landmarks: self.landmarks.entries(),
            cursor: self.cursor,
            error: self.error.clone(),
            startup_error: self.startup_error.clone(),
            document: self.document.as_ref().map(|doc| DocumentSummary {
                name: doc.name.clone(),
                page_count: doc.loaded.page_count,
                fingerprint: doc.loaded.fingerprint.clone(),
                width: doc.loaded.viewport.width,
                height: doc.loaded.viewport.height,
            }),
            selected_file: self.selected_file.clone(),
        })
    }
}
