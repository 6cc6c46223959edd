//! 收据导出服务 - 业务能力层
//!
//! 只负责"成功下单之后"的三个产物动作：
//! 收据 HTML → PDF、机器人截图 PNG、截图嵌入 PDF

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use async_trait::async_trait;
use lopdf::{xobject, Document};
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{AppError, ArtifactError};
use crate::infrastructure::PageDriver;

/// 收据内容容器，innerHTML 就是 PDF 的正文
const RECEIPT_CONTAINER: &str = "#receipt";
/// 机器人预览图元素
const ROBOT_PREVIEW: &str = "#robot-preview-image";

/// printToPDF 默认输出 Letter 纸张（612 x 792 pt）
const PAGE_WIDTH_PT: f32 = 612.0;

/// 收据产物接口
///
/// 成功提交后的导出序列走这个接口，流程层用假实现
/// 就能验证"成功才有产物"的不变量
#[async_trait]
pub trait ReceiptSink {
    /// 把当前收据导出为 PDF，返回 PDF 路径
    async fn export_receipt(&self, order_number: &str) -> Result<PathBuf>;

    /// 截取机器人预览图，返回 PNG 路径
    async fn capture_robot(&self, order_number: &str) -> Result<PathBuf>;

    /// 把截图嵌入收据 PDF（原地改写 PDF 文件）
    async fn embed_screenshot(&self, screenshot_path: &Path, pdf_path: &Path) -> Result<()>;
}

/// 收据导出服务
///
/// 职责：
/// - 从订单页面取收据 HTML，在独立的渲染页面上打印成 PDF
/// - 对机器人预览图做元素级截图
/// - 用 lopdf 把截图原地嵌入 PDF 第一页
/// - 产物路径只由订单号决定，重复运行会覆盖旧文件
pub struct ReceiptExporter<'a> {
    order_driver: &'a PageDriver,
    renderer: &'a PageDriver,
    receipts_dir: PathBuf,
    robots_dir: PathBuf,
}

impl<'a> ReceiptExporter<'a> {
    /// 创建新的收据导出服务
    ///
    /// `renderer` 是专门用于打印的隐藏页面，
    /// 这样导出 PDF 不会破坏还要截图的订单页面
    pub fn new(config: &Config, order_driver: &'a PageDriver, renderer: &'a PageDriver) -> Self {
        Self {
            order_driver,
            renderer,
            receipts_dir: PathBuf::from(&config.receipts_dir),
            robots_dir: PathBuf::from(&config.robots_dir),
        }
    }

    fn receipt_path(&self, order_number: &str) -> PathBuf {
        receipt_path(&self.receipts_dir, order_number)
    }

    fn robot_path(&self, order_number: &str) -> PathBuf {
        robot_path(&self.robots_dir, order_number)
    }
}

/// 收据 PDF 路径，只由订单号决定
fn receipt_path(dir: &Path, order_number: &str) -> PathBuf {
    dir.join(format!("Receipt_{}.pdf", order_number))
}

/// 机器人截图路径，只由订单号决定
fn robot_path(dir: &Path, order_number: &str) -> PathBuf {
    dir.join(format!("Robot_{}.png", order_number))
}

#[async_trait]
impl ReceiptSink for ReceiptExporter<'_> {
    async fn export_receipt(&self, order_number: &str) -> Result<PathBuf> {
        let path = self.receipt_path(order_number);
        debug!("导出收据 PDF: {}", path.display());

        let receipt_html = self.order_driver.inner_html(RECEIPT_CONTAINER).await?;
        self.renderer.set_content(&receipt_html).await?;
        let pdf_bytes = self.renderer.print_to_pdf().await?;

        fs::create_dir_all(&self.receipts_dir)
            .map_err(|e| AppError::pdf_export_failed(self.receipts_dir.display().to_string(), e))?;
        fs::write(&path, &pdf_bytes)
            .map_err(|e| AppError::pdf_export_failed(path.display().to_string(), e))?;

        info!("📄 收据已保存: {}", path.display());
        Ok(path)
    }

    async fn capture_robot(&self, order_number: &str) -> Result<PathBuf> {
        let path = self.robot_path(order_number);
        debug!("截取机器人预览图: {}", path.display());

        let png_bytes = self.order_driver.screenshot_element(ROBOT_PREVIEW).await?;

        fs::create_dir_all(&self.robots_dir).map_err(|e| {
            AppError::Artifact(ArtifactError::ScreenshotFailed {
                selector: ROBOT_PREVIEW.to_string(),
                source: Box::new(e),
            })
        })?;
        fs::write(&path, &png_bytes).map_err(|e| {
            AppError::Artifact(ArtifactError::ScreenshotFailed {
                selector: ROBOT_PREVIEW.to_string(),
                source: Box::new(e),
            })
        })?;

        info!("🤖 机器人截图已保存: {}", path.display());
        Ok(path)
    }

    async fn embed_screenshot(&self, screenshot_path: &Path, pdf_path: &Path) -> Result<()> {
        debug!(
            "嵌入截图到收据: {} -> {}",
            screenshot_path.display(),
            pdf_path.display()
        );
        embed_image_into_pdf(screenshot_path, pdf_path)?;
        info!("🧷 截图已嵌入收据: {}", pdf_path.display());
        Ok(())
    }
}

/// 把 PNG 图片嵌入 PDF 第一页并原地保存
///
/// 图片按比例缩放到页面宽度的六成以内，水平居中放在页面下方
fn embed_image_into_pdf(image_path: &Path, pdf_path: &Path) -> Result<()> {
    let embed_error = |source: Box<dyn std::error::Error + Send + Sync>| {
        AppError::Artifact(ArtifactError::EmbedFailed {
            pdf_path: pdf_path.display().to_string(),
            source,
        })
    };

    let mut doc = Document::load(pdf_path).map_err(|e| embed_error(Box::new(e)))?;
    let page_id = doc
        .get_pages()
        .values()
        .next()
        .copied()
        .ok_or_else(|| anyhow::anyhow!("收据 PDF 没有页面: {}", pdf_path.display()))?;

    let (px_width, px_height) =
        image::image_dimensions(image_path).map_err(|e| embed_error(Box::new(e)))?;

    // 像素按 1:1 当作 pt，再整体缩放到页面宽度以内
    let max_width = PAGE_WIDTH_PT * 0.6;
    let scale = (max_width / px_width as f32).min(1.0);
    let width = px_width as f32 * scale;
    let height = px_height as f32 * scale;
    let x = (PAGE_WIDTH_PT - width) / 2.0;
    let y = 72.0;

    let image_stream = xobject::image(image_path).map_err(|e| embed_error(Box::new(e)))?;
    doc.insert_image(page_id, image_stream, (x, y), (width, height))
        .map_err(|e| embed_error(Box::new(e)))?;
    doc.save(pdf_path).map_err(|e| embed_error(Box::new(e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artifact_paths_are_keyed_purely_by_order_number() {
        let receipts = Path::new("output/Receipts");
        let robots = Path::new("output/Robots");

        assert_eq!(
            receipt_path(receipts, "1001"),
            PathBuf::from("output/Receipts/Receipt_1001.pdf")
        );
        assert_eq!(
            robot_path(robots, "1001"),
            PathBuf::from("output/Robots/Robot_1001.png")
        );
        // 同一订单号重复运行会落到同一路径，直接覆盖旧产物
        assert_eq!(receipt_path(receipts, "1001"), receipt_path(receipts, "1001"));
    }
}
