//! 订单处理流程 - 流程层
//!
//! 核心职责：定义"一个订单"的完整处理流程
//!
//! 流程顺序：
//! 1. 关弹窗 → 填表 → 预览
//! 2. 提交（固定重试预算，按点击次数计数）
//! 3. 成功 → 导出收据 PDF → 机器人截图 → 截图嵌入 PDF
//! 4. 无论成败，点击"下一单"

use std::time::Duration;

use anyhow::Result;
use tokio::time::sleep;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::models::Order;
use crate::services::{OrderPortal, ReceiptSink};
use crate::workflow::order_ctx::OrderCtx;

/// 订单处理结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessResult {
    /// 处理成功，产物已导出
    Success,
    /// 重试预算用尽，订单被跳过
    Failed,
}

/// 单次订单提交的终态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// 提交成功（attempts 为实际点击次数）
    Succeeded { attempts: usize },
    /// 预算用尽仍然失败
    Exhausted { attempts: usize },
}

/// 订单处理流程
///
/// - 编排单个订单从填表到产物导出的全过程
/// - 持有重试预算和提交后的固定等待时间
/// - 不持有任何资源（page），只依赖 `OrderPortal` / `ReceiptSink`
pub struct OrderFlow {
    max_attempts: usize,
    settle_delay: Duration,
    verbose_logging: bool,
}

impl OrderFlow {
    /// 创建新的订单处理流程
    pub fn new(config: &Config) -> Self {
        Self {
            max_attempts: config.max_submit_attempts,
            settle_delay: Duration::from_millis(config.submit_settle_ms),
            verbose_logging: config.verbose_logging,
        }
    }

    /// 使用自定义预算创建
    pub fn with_budget(max_attempts: usize, settle_delay: Duration) -> Self {
        Self {
            max_attempts,
            settle_delay,
            verbose_logging: false,
        }
    }

    /// 处理一个订单
    ///
    /// 提交失败在预算内重试，预算用尽则跳过该订单；
    /// 导出序列的任何错误会向上传播，终止整个运行
    pub async fn run<P, S>(
        &self,
        portal: &P,
        sink: &S,
        order: &Order,
        ctx: &OrderCtx,
    ) -> Result<ProcessResult>
    where
        P: OrderPortal + Sync,
        S: ReceiptSink + Sync,
    {
        // 详细日志（如果启用）
        if self.verbose_logging {
            info!("[订单 {}] 订单明细: {}", ctx.row_index, order);
        }

        // 弹窗每一行都可能挡在表单前面，必须先关掉
        portal.dismiss_modal().await?;
        portal.fill_form(order).await?;

        let result = match self.submit_with_retry(portal, ctx).await? {
            SubmitOutcome::Succeeded { attempts } => {
                info!(
                    "[订单 {}] ✓ 第 {} 次提交成功 (订单号: {})",
                    ctx.row_index, attempts, ctx.order_number
                );

                // 导出顺序固定：PDF → 截图 → 嵌入
                let pdf_path = sink.export_receipt(&ctx.order_number).await?;
                let screenshot_path = sink.capture_robot(&ctx.order_number).await?;
                sink.embed_screenshot(&screenshot_path, &pdf_path).await?;

                ProcessResult::Success
            }
            SubmitOutcome::Exhausted { attempts } => {
                error!(
                    "[订单 {}] ❌ 订单号 {} 提交 {} 次后仍然失败，跳过该订单",
                    ctx.row_index, ctx.order_number, attempts
                );
                ProcessResult::Failed
            }
        };

        // 无论成败都前往下一单
        portal.proceed_to_next().await?;

        Ok(result)
    }

    /// 带预算的提交重试
    ///
    /// 每次点击都消耗一次预算；点击后固定等待一段时间再检查错误横幅，
    /// 重试只重新点击提交，不重新填表
    pub async fn submit_with_retry<P>(&self, portal: &P, ctx: &OrderCtx) -> Result<SubmitOutcome>
    where
        P: OrderPortal + Sync,
    {
        let mut attempts = 0;

        loop {
            portal.click_submit().await?;
            attempts += 1;

            // 固定等待页面对提交做出反应，不是事件驱动的等待
            sleep(self.settle_delay).await;

            if !portal.error_banner_visible().await? {
                return Ok(SubmitOutcome::Succeeded { attempts });
            }

            if attempts >= self.max_attempts {
                return Ok(SubmitOutcome::Exhausted { attempts });
            }

            warn!(
                "[订单 {}] ⚠️ 提交出现错误提示，重试中 ({}/{})",
                ctx.row_index, attempts, self.max_attempts
            );
        }
    }
}
