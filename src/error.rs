use std::fmt;

/// 应用程序错误类型
#[derive(Debug)]
pub enum AppError {
    /// 浏览器相关错误
    Browser(BrowserError),
    /// 订单数据获取错误
    Feed(FeedError),
    /// 产物（收据/截图/归档）错误
    Artifact(ArtifactError),
    /// 其他错误（用于包装第三方库错误）
    Other(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Browser(e) => write!(f, "浏览器错误: {}", e),
            AppError::Feed(e) => write!(f, "订单数据错误: {}", e),
            AppError::Artifact(e) => write!(f, "产物错误: {}", e),
            AppError::Other(msg) => write!(f, "错误: {}", msg),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Browser(e) => Some(e),
            AppError::Feed(e) => Some(e),
            AppError::Artifact(e) => Some(e),
            AppError::Other(_) => None,
        }
    }
}

/// 浏览器相关错误
#[derive(Debug)]
pub enum BrowserError {
    /// 启动浏览器失败
    LaunchFailed {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 创建页面失败
    PageCreationFailed {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 元素定位失败
    ElementNotFound {
        selector: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 执行脚本失败
    ScriptExecutionFailed {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for BrowserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BrowserError::LaunchFailed { source } => {
                write!(f, "启动浏览器失败: {}", source)
            }
            BrowserError::PageCreationFailed { source } => {
                write!(f, "创建页面失败: {}", source)
            }
            BrowserError::ElementNotFound { selector, source } => {
                write!(f, "找不到元素 {}: {}", selector, source)
            }
            BrowserError::ScriptExecutionFailed { source } => {
                write!(f, "执行脚本失败: {}", source)
            }
        }
    }
}

impl std::error::Error for BrowserError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BrowserError::LaunchFailed { source }
            | BrowserError::PageCreationFailed { source }
            | BrowserError::ElementNotFound { source, .. }
            | BrowserError::ScriptExecutionFailed { source } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
        }
    }
}

/// 订单数据获取错误
#[derive(Debug)]
pub enum FeedError {
    /// CSV 下载失败
    DownloadFailed {
        url: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 写入本地 CSV 文件失败
    WriteFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// CSV 解析失败
    CsvParseFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for FeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedError::DownloadFailed { url, source } => {
                write!(f, "下载订单 CSV 失败 ({}): {}", url, source)
            }
            FeedError::WriteFailed { path, source } => {
                write!(f, "写入 CSV 文件失败 ({}): {}", path, source)
            }
            FeedError::CsvParseFailed { path, source } => {
                write!(f, "解析 CSV 失败 ({}): {}", path, source)
            }
        }
    }
}

impl std::error::Error for FeedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FeedError::DownloadFailed { source, .. }
            | FeedError::WriteFailed { source, .. }
            | FeedError::CsvParseFailed { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
        }
    }
}

/// 产物（收据/截图/归档）错误
#[derive(Debug)]
pub enum ArtifactError {
    /// 收据 PDF 导出失败
    PdfExportFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 机器人截图失败
    ScreenshotFailed {
        selector: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 截图嵌入 PDF 失败
    EmbedFailed {
        pdf_path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// ZIP 归档失败
    ArchiveFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 目录清理失败
    CleanupFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for ArtifactError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactError::PdfExportFailed { path, source } => {
                write!(f, "导出收据 PDF 失败 ({}): {}", path, source)
            }
            ArtifactError::ScreenshotFailed { selector, source } => {
                write!(f, "截图失败 ({}): {}", selector, source)
            }
            ArtifactError::EmbedFailed { pdf_path, source } => {
                write!(f, "嵌入截图到 PDF 失败 ({}): {}", pdf_path, source)
            }
            ArtifactError::ArchiveFailed { path, source } => {
                write!(f, "创建 ZIP 归档失败 ({}): {}", path, source)
            }
            ArtifactError::CleanupFailed { path, source } => {
                write!(f, "清理目录失败 ({}): {}", path, source)
            }
        }
    }
}

impl std::error::Error for ArtifactError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ArtifactError::PdfExportFailed { source, .. }
            | ArtifactError::ScreenshotFailed { source, .. }
            | ArtifactError::EmbedFailed { source, .. }
            | ArtifactError::ArchiveFailed { source, .. }
            | ArtifactError::CleanupFailed { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
        }
    }
}

// ========== 便捷构造函数 ==========
// 注意：不需要手动实现 From<AppError> for anyhow::Error，
// 因为 anyhow 已经为所有实现了 std::error::Error 的类型提供了自动实现

impl AppError {
    /// 创建元素定位错误
    pub fn element_not_found(
        selector: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Browser(BrowserError::ElementNotFound {
            selector: selector.into(),
            source: Box::new(source),
        })
    }

    /// 创建 CSV 下载错误
    pub fn download_failed(
        url: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Feed(FeedError::DownloadFailed {
            url: url.into(),
            source: Box::new(source),
        })
    }

    /// 创建收据导出错误
    pub fn pdf_export_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Artifact(ArtifactError::PdfExportFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
