//! 订单表单服务 - 业务能力层
//!
//! 只负责订单页面上的表单交互，不关心重试与产物导出

use anyhow::Result;
use async_trait::async_trait;
use tracing::debug;

use crate::infrastructure::PageDriver;
use crate::models::Order;

/// 头部下拉框
const HEAD_SELECT: &str = "#head";
/// 腿部件号输入框（页面上没有 id，按 placeholder 定位）
const LEGS_INPUT: &str =
    "input[type='number'][placeholder='Enter the part number for the legs']";
/// 收货地址输入框
const ADDRESS_INPUT: &str = "#address";
/// 预览按钮
const PREVIEW_BUTTON: &str = "#preview";
/// 提交按钮
const ORDER_BUTTON: &str = "#order";
/// 下一单按钮
const ORDER_ANOTHER_BUTTON: &str = "#order-another";
/// 提交失败时出现的错误横幅
const ERROR_BANNER: &str = "div.alert.alert-danger";
/// 弹窗关闭按钮的文本
const MODAL_OK_TEXT: &str = "ok";

/// 订单页面交互接口
///
/// 把表单交互收窄成几个动作，流程层只依赖这个接口，
/// 这样重试状态机可以用假实现做测试，不需要真浏览器
#[async_trait]
pub trait OrderPortal {
    /// 关掉挡在表单前面的弹窗；弹窗不存在时应当静默通过
    async fn dismiss_modal(&self) -> Result<()>;

    /// 按订单数据填写四个表单字段并点击预览
    async fn fill_form(&self, order: &Order) -> Result<()>;

    /// 点击提交按钮（一次）
    async fn click_submit(&self) -> Result<()>;

    /// 检查错误横幅当前是否可见
    async fn error_banner_visible(&self) -> Result<bool>;

    /// 点击"下一单"，回到空白表单
    async fn proceed_to_next(&self) -> Result<()>;
}

/// 订单表单服务
///
/// 职责：
/// - 在真实订单页面上实现 `OrderPortal` 的各个动作
/// - 只处理单个 Order
/// - 不认识重试预算，不认识收据
pub struct OrderForm<'a> {
    driver: &'a PageDriver,
}

impl<'a> OrderForm<'a> {
    /// 创建新的订单表单服务
    pub fn new(driver: &'a PageDriver) -> Self {
        Self { driver }
    }

    /// 身体单选按钮按 value 定位
    fn body_radio_selector(body: &str) -> String {
        format!("input[name='body'][value='{}']", body)
    }
}

#[async_trait]
impl OrderPortal for OrderForm<'_> {
    async fn dismiss_modal(&self) -> Result<()> {
        let clicked = self.driver.click_by_text(MODAL_OK_TEXT).await?;
        if !clicked {
            debug!("页面上没有弹窗，跳过");
        }
        Ok(())
    }

    async fn fill_form(&self, order: &Order) -> Result<()> {
        debug!("填写订单表单: {}", order);
        self.driver.select_option(HEAD_SELECT, &order.head).await?;
        self.driver
            .click(&Self::body_radio_selector(&order.body))
            .await?;
        self.driver.type_text(LEGS_INPUT, &order.legs).await?;
        self.driver.type_text(ADDRESS_INPUT, &order.address).await?;
        self.driver.click(PREVIEW_BUTTON).await?;
        Ok(())
    }

    async fn click_submit(&self) -> Result<()> {
        self.driver.click(ORDER_BUTTON).await
    }

    async fn error_banner_visible(&self) -> Result<bool> {
        self.driver.is_visible(ERROR_BANNER).await
    }

    async fn proceed_to_next(&self) -> Result<()> {
        self.driver.click(ORDER_ANOTHER_BUTTON).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_radio_selector_targets_value_attribute() {
        assert_eq!(
            OrderForm::body_radio_selector("2"),
            "input[name='body'][value='2']"
        );
    }
}
