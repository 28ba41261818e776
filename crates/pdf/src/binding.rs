//! pdfium 动态库定位与绑定
//!
//! 文档对象无法跨线程保存，每次栅格化都要重新绑定。定位器记住上一次
//! 成功的位置，重新绑定时先试它，不必每次扫描全部目录。

use pagemark_core::LoadError;
use pdfium_render::prelude::*;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Mutex;

/// 指定额外 pdfium 目录的环境变量
pub const PDFIUM_DIR_ENV: &str = "PAGEMARK_PDFIUM_DIR";

/// pdfium 库的一个候选来源
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LibrarySource {
    Dir(PathBuf),
    System,
}

impl LibrarySource {
    fn bind(&self) -> Result<Pdfium, PdfiumError> {
        let bindings = match self {
            LibrarySource::Dir(dir) => {
                Pdfium::bind_to_library(&Pdfium::pdfium_platform_library_name_at_path(dir))
            }
            LibrarySource::System => Pdfium::bind_to_system_library(),
        }?;
        Ok(Pdfium::new(bindings))
    }
}

/// 获取 pdfium 库的搜索目录，按优先级排列并去重
///
/// 顺序：配置目录、环境变量、可执行文件附近（含 macOS bundle 和 AppImage）、
/// 开发目录、当前目录。
pub fn pdfium_search_paths(configured: Option<PathBuf>) -> Vec<PathBuf> {
    let env_dir = std::env::var_os(PDFIUM_DIR_ENV).map(PathBuf::from);
    let mut paths: Vec<PathBuf> = configured.into_iter().chain(env_dir).collect();

    if let Some(exe_dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(PathBuf::from))
    {
        paths.extend(bundle_dirs(exe_dir));
    }

    paths.extend(["libs", "src-tauri/libs", "./"].map(PathBuf::from));
    dedupe(paths)
}

/// 安装包内可能放置 pdfium 的目录
fn bundle_dirs(exe_dir: PathBuf) -> Vec<PathBuf> {
    let mut dirs = vec![exe_dir.join("libs"), exe_dir.clone()];

    // .app/Contents/MacOS -> .app/Contents/Resources
    if cfg!(target_os = "macos") {
        if let Some(contents) = exe_dir.parent() {
            let resources = contents.join("Resources");
            dirs.push(resources.join("libs"));
            dirs.push(resources);
        }
    }

    if cfg!(target_os = "linux") {
        if let Some(appdir) = std::env::var_os("APPDIR") {
            let lib = PathBuf::from(appdir).join("usr").join("lib");
            dirs.push(lib.join("libs"));
            dirs.push(lib);
        }
    }

    dirs
}

fn dedupe(paths: Vec<PathBuf>) -> Vec<PathBuf> {
    let mut seen = HashSet::new();
    paths
        .into_iter()
        .filter(|path| seen.insert(path.clone()))
        .collect()
}

/// 按搜索目录定位并绑定 pdfium
#[derive(Debug)]
pub struct PdfiumLocator {
    search_paths: Vec<PathBuf>,
    resolved: Mutex<Option<LibrarySource>>,
}

impl PdfiumLocator {
    pub fn new(search_paths: Vec<PathBuf>) -> Self {
        Self {
            search_paths,
            resolved: Mutex::new(None),
        }
    }

    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    /// 上一次绑定成功的来源
    pub fn resolved(&self) -> Option<LibrarySource> {
        self.resolved.lock().ok().and_then(|guard| guard.clone())
    }

    fn remember(&self, source: Option<LibrarySource>) {
        if let Ok(mut guard) = self.resolved.lock() {
            *guard = source;
        }
    }

    /// 本次绑定的尝试顺序：已记住的来源优先，系统库最后
    pub fn candidates(&self) -> Vec<LibrarySource> {
        let remembered = self.resolved();
        let mut sources: Vec<LibrarySource> = remembered.iter().cloned().collect();
        sources.extend(
            self.search_paths
                .iter()
                .cloned()
                .map(LibrarySource::Dir)
                .chain(std::iter::once(LibrarySource::System))
                .filter(|source| Some(source) != remembered.as_ref()),
        );
        sources
    }

    pub fn bind(&self) -> Result<Pdfium, LoadError> {
        let mut last_error = None;

        for source in self.candidates() {
            log::debug!("[Loader] 尝试加载 pdfium: {:?}", source);
            match source.bind() {
                Ok(pdfium) => {
                    if self.resolved().as_ref() != Some(&source) {
                        log::info!("[Loader] pdfium 来源: {:?}", source);
                        self.remember(Some(source));
                    }
                    return Ok(pdfium);
                }
                Err(e) => last_error = Some(e.to_string()),
            }
        }

        self.remember(None);
        Err(LoadError::LibraryUnavailable(format!(
            "在 {} 个目录和系统库中均未找到 pdfium（{}）",
            self.search_paths.len(),
            last_error.unwrap_or_default()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_paths_end_with_working_dir() {
        let paths = pdfium_search_paths(None);
        assert_eq!(paths.last(), Some(&PathBuf::from("./")));
        assert!(paths.contains(&PathBuf::from("libs")));
    }

    #[test]
    fn test_configured_dir_comes_first() {
        let paths = pdfium_search_paths(Some(PathBuf::from("/custom/pdfium")));
        assert_eq!(paths.first(), Some(&PathBuf::from("/custom/pdfium")));
    }

    #[test]
    fn test_duplicate_dirs_are_dropped() {
        let paths = pdfium_search_paths(Some(PathBuf::from("libs")));
        assert_eq!(paths.iter().filter(|p| *p == &PathBuf::from("libs")).count(), 1);
        assert_eq!(paths[0], PathBuf::from("libs"));
    }

    #[test]
    fn test_candidates_try_system_last() {
        let locator = PdfiumLocator::new(vec![PathBuf::from("/a"), PathBuf::from("/b")]);
        assert_eq!(
            locator.candidates(),
            vec![
                LibrarySource::Dir(PathBuf::from("/a")),
                LibrarySource::Dir(PathBuf::from("/b")),
                LibrarySource::System,
            ]
        );
    }

    #[test]
    fn test_remembered_source_is_tried_first() {
        let locator = PdfiumLocator::new(vec![PathBuf::from("/a"), PathBuf::from("/b")]);
        locator.remember(Some(LibrarySource::Dir(PathBuf::from("/b"))));
        assert_eq!(
            locator.candidates(),
            vec![
                LibrarySource::Dir(PathBuf::from("/b")),
                LibrarySource::Dir(PathBuf::from("/a")),
                LibrarySource::System,
            ]
        );
    }

    #[test]
    fn test_failed_bind_reports_library_unavailable() {
        let locator = PdfiumLocator::new(vec![PathBuf::from("/nonexistent/pdfium-dir")]);
        // 测试环境可能装有系统 pdfium，只在绑定失败时检查错误
        if let Err(e) = locator.bind() {
            assert!(matches!(e, LoadError::LibraryUnavailable(_)));
            assert_eq!(locator.resolved(), None);
        }
    }
}
