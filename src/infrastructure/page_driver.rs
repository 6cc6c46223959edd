//! 页面驱动 - 基础设施层
//!
//! 持有唯一的 page 资源，只暴露浏览器交互能力

use anyhow::Result;
use chromiumoxide::cdp::browser_protocol::page::{CaptureScreenshotFormat, PrintToPdfParams};
use chromiumoxide::Page;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use tracing::debug;

use crate::error::{AppError, BrowserError};

/// 页面驱动
///
/// 职责：
/// - 持有唯一的 Page 资源
/// - 暴露点击/输入/求值/截图/打印能力
/// - 不认识 Order / Receipt
/// - 不处理业务流程
pub struct PageDriver {
    page: Page,
}

impl PageDriver {
    /// 创建新的页面驱动
    pub fn new(page: Page) -> Self {
        Self { page }
    }

    /// 执行 JS 代码并返回 JSON 结果
    pub async fn eval(&self, js_code: impl Into<String>) -> Result<JsonValue> {
        let result = self.page.evaluate(js_code.into()).await.map_err(|e| {
            AppError::Browser(BrowserError::ScriptExecutionFailed {
                source: Box::new(e),
            })
        })?;
        let json_value = result.into_value()?;
        Ok(json_value)
    }

    /// 执行 JS 代码并反序列化为指定类型
    pub async fn eval_as<T: DeserializeOwned>(&self, js_code: impl Into<String>) -> Result<T> {
        let json_value = self.eval(js_code).await?;
        let typed_value = serde_json::from_value(json_value)?;
        Ok(typed_value)
    }

    /// 点击 CSS 选择器定位的元素
    pub async fn click(&self, selector: &str) -> Result<()> {
        debug!("点击元素: {}", selector);
        let element = self
            .page
            .find_element(selector)
            .await
            .map_err(|e| AppError::element_not_found(selector, e))?;
        element.click().await?;
        Ok(())
    }

    /// 向 CSS 选择器定位的输入框输入文本
    pub async fn type_text(&self, selector: &str, text: &str) -> Result<()> {
        debug!("输入文本: {} <- {}", selector, text);
        let element = self
            .page
            .find_element(selector)
            .await
            .map_err(|e| AppError::element_not_found(selector, e))?;
        element.click().await?;
        element.type_str(text).await?;
        Ok(())
    }

    /// 在下拉框中按 value 选择选项，并触发 change/input 事件
    pub async fn select_option(&self, selector: &str, value: &str) -> Result<()> {
        debug!("选择下拉选项: {} <- {}", selector, value);
        let js_code = format!(
            r#"
            (() => {{
                const el = document.querySelector({selector});
                if (!el) return false;
                el.value = {value};
                el.dispatchEvent(new Event('input', {{ bubbles: true }}));
                el.dispatchEvent(new Event('change', {{ bubbles: true }}));
                return true;
            }})()
            "#,
            selector = serde_json::to_string(selector)?,
            value = serde_json::to_string(value)?,
        );
        let found: bool = self.eval_as(js_code).await?;
        if !found {
            anyhow::bail!("找不到下拉框: {}", selector);
        }
        Ok(())
    }

    /// 点击文本内容（去除首尾空白后，忽略大小写）匹配的第一个元素
    ///
    /// 返回是否找到并点击了元素；找不到时不报错，由调用方决定语义
    pub async fn click_by_text(&self, text: &str) -> Result<bool> {
        debug!("按文本点击元素: {}", text);
        let js_code = format!(
            r#"
            (() => {{
                const wanted = {text}.trim().toLowerCase();
                const candidates = document.querySelectorAll('button, a, input[type=button], input[type=submit]');
                for (const el of candidates) {{
                    const label = (el.textContent || el.value || '').trim().toLowerCase();
                    if (label === wanted) {{
                        el.click();
                        return true;
                    }}
                }}
                return false;
            }})()
            "#,
            text = serde_json::to_string(text)?,
        );
        let clicked: bool = self.eval_as(js_code).await?;
        Ok(clicked)
    }

    /// 检查 CSS 选择器定位的元素当前是否可见
    pub async fn is_visible(&self, selector: &str) -> Result<bool> {
        let js_code = format!(
            r#"
            (() => {{
                const el = document.querySelector({selector});
                if (!el) return false;
                const style = window.getComputedStyle(el);
                if (style.display === 'none' || style.visibility === 'hidden') return false;
                return el.offsetParent !== null;
            }})()
            "#,
            selector = serde_json::to_string(selector)?,
        );
        let visible: bool = self.eval_as(js_code).await?;
        Ok(visible)
    }

    /// 获取 CSS 选择器定位元素的 innerHTML
    pub async fn inner_html(&self, selector: &str) -> Result<String> {
        let js_code = format!(
            r#"
            (() => {{
                const el = document.querySelector({selector});
                return el ? el.innerHTML : null;
            }})()
            "#,
            selector = serde_json::to_string(selector)?,
        );
        let html: Option<String> = self.eval_as(js_code).await?;
        html.ok_or_else(|| anyhow::anyhow!("找不到元素: {}", selector))
    }

    /// 对 CSS 选择器定位的元素截图（PNG 字节）
    pub async fn screenshot_element(&self, selector: &str) -> Result<Vec<u8>> {
        debug!("截图元素: {}", selector);
        let element = self
            .page
            .find_element(selector)
            .await
            .map_err(|e| AppError::element_not_found(selector, e))?;
        let bytes = element.screenshot(CaptureScreenshotFormat::Png).await?;
        Ok(bytes)
    }

    /// 用给定 HTML 替换当前页面内容
    pub async fn set_content(&self, html: &str) -> Result<()> {
        self.page.set_content(html).await?;
        Ok(())
    }

    /// 把当前页面打印为 PDF（PDF 字节）
    pub async fn print_to_pdf(&self) -> Result<Vec<u8>> {
        let bytes = self.page.pdf(PrintToPdfParams::default()).await?;
        Ok(bytes)
    }
}
