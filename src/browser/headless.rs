use std::path::Path;

use anyhow::Result;
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use tokio::time::sleep;
use tracing::{debug, error, info};

use crate::config::Config;
use crate::error::{AppError, BrowserError};

/// 启动无头浏览器并导航到订单网站
pub async fn launch_headless_browser(config: &Config) -> Result<(Browser, Page)> {
    info!("🚀 启动无头浏览器...");
    debug!("目标 URL: {}", config.order_site_url);

    // 配置无头浏览器
    let mut builder = BrowserConfig::builder().new_headless_mode().args(vec![
        "--disable-gpu",           // 无头模式下禁用 GPU
        "--no-sandbox",            // 禁用沙盒，防止权限问题导致的崩溃
        "--disable-dev-shm-usage", // 防止共享内存不足
    ]);
    if let Some(chrome) = &config.chrome_executable {
        builder = builder.chrome_executable(Path::new(chrome));
    }
    let browser_config = builder.build().map_err(|e| {
        error!("配置无头浏览器失败: {}", e);
        anyhow::anyhow!("配置无头浏览器失败: {}", e)
    })?;

    // 启动浏览器
    let (browser, mut handler) = Browser::launch(browser_config).await.map_err(|e| {
        error!("启动无头浏览器失败: {}", e);
        AppError::Browser(BrowserError::LaunchFailed {
            source: Box::new(e),
        })
    })?;
    debug!("无头浏览器启动成功");

    // 在后台处理浏览器事件
    tokio::spawn(async move {
        while let Some(h) = handler.next().await {
            if h.is_err() {
                break;
            }
        }
    });

    // 添加短暂延迟以等待浏览器状态同步
    sleep(tokio::time::Duration::from_millis(300)).await;

    // 创建新页面并导航
    let page = browser
        .new_page(&config.order_site_url)
        .await
        .map_err(|e| {
            error!("创建页面失败: {}", e);
            AppError::Browser(BrowserError::PageCreationFailed {
                source: Box::new(e),
            })
        })?;

    info!("✅ 无头浏览器已导航到: {}", config.order_site_url);

    Ok((browser, page))
}

/// 创建一个空白的隐藏渲染页面（用于 HTML → PDF 打印）
pub async fn open_renderer_page(browser: &Browser) -> Result<Page> {
    debug!("创建收据渲染页面");
    let page = browser.new_page("about:blank").await.map_err(|e| {
        error!("创建渲染页面失败: {}", e);
        AppError::Browser(BrowserError::PageCreationFailed {
            source: Box::new(e),
        })
    })?;
    Ok(page)
}
