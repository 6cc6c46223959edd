//! 应用编排层
//!
//! 串起整个流水线：启动浏览器 → 下载订单表 → 逐行处理订单 →
//! 归档收据 → 清理产物目录 → 输出统计

use anyhow::Result;
use chromiumoxide::Browser;
use tracing::{info, warn};

use crate::browser;
use crate::config::Config;
use crate::infrastructure::PageDriver;
use crate::models::Order;
use crate::services::{OrderFeed, OrderForm, ReceiptArchiver, ReceiptExporter};
use crate::workflow::{OrderCtx, OrderFlow, ProcessResult};

/// 应用主结构
pub struct App {
    config: Config,
    // Browser 必须活到进程结束，否则 CDP 连接会被提前关掉
    _browser: Browser,
    order_driver: PageDriver,
    renderer: PageDriver,
}

impl App {
    /// 初始化应用：启动无头浏览器并打开订单页面
    pub async fn initialize(config: Config) -> Result<Self> {
        log_startup(&config);

        let (browser, order_page) = browser::launch_headless_browser(&config).await?;
        let renderer_page = browser::open_renderer_page(&browser).await?;

        Ok(Self {
            config,
            _browser: browser,
            order_driver: PageDriver::new(order_page),
            renderer: PageDriver::new(renderer_page),
        })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<()> {
        // 下载并解析订单表
        let orders = self.load_orders().await?;

        if orders.is_empty() {
            warn!("⚠️ 订单 CSV 中没有任何订单，程序结束");
            return Ok(());
        }

        log_orders_loaded(orders.len(), self.config.max_submit_attempts);

        // 逐行处理订单
        let stats = self.process_all_orders(&orders).await?;

        // 归档收据，然后删除产物目录（ZIP 留下）
        let archiver = ReceiptArchiver::new(&self.config);
        archiver.archive_receipts()?;
        archiver.clean_up()?;

        // 输出最终统计
        print_final_stats(&stats, &self.config);

        Ok(())
    }

    async fn load_orders(&self) -> Result<Vec<Order>> {
        info!("\n📁 正在获取订单表...");
        let feed = OrderFeed::new(&self.config);
        let orders = feed.fetch_orders().await?;
        Ok(orders)
    }

    /// 按 CSV 行序逐个处理订单；单个订单用尽重试预算只计入失败，
    /// 导出序列的错误则直接向上传播
    async fn process_all_orders(&self, orders: &[Order]) -> Result<ProcessingStats> {
        let flow = OrderFlow::new(&self.config);
        let portal = OrderForm::new(&self.order_driver);
        let sink = ReceiptExporter::new(&self.config, &self.order_driver, &self.renderer);

        let mut stats = ProcessingStats {
            total: orders.len(),
            ..Default::default()
        };

        for (index, order) in orders.iter().enumerate() {
            let ctx = OrderCtx::new(order.order_number.clone(), index + 1, orders.len());
            log_order_start(&ctx);

            match flow.run(&portal, &sink, order, &ctx).await? {
                ProcessResult::Success => stats.success += 1,
                ProcessResult::Failed => stats.failed += 1,
            }
        }

        Ok(stats)
    }
}

/// 处理统计
#[derive(Debug, Default)]
struct ProcessingStats {
    success: usize,
    failed: usize,
    total: usize,
}

// ========== 日志辅助函数 ==========

fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 机器人订单自动提交");
    info!("📊 提交重试预算: {} 次", config.max_submit_attempts);
    info!("🌐 订单网站: {}", config.order_site_url);
    info!("{}", "=".repeat(60));
}

fn log_orders_loaded(total: usize, max_attempts: usize) {
    info!("✓ 找到 {} 条待提交的订单", total);
    info!("💡 每条订单最多提交 {} 次，失败则跳过\n", max_attempts);
}

fn log_order_start(ctx: &OrderCtx) {
    info!("\n{}", "─".repeat(60));
    info!(
        "📦 开始处理第 {}/{} 条订单 (订单号: {})",
        ctx.row_index, ctx.total_rows, ctx.order_number
    );
    info!("{}", "─".repeat(60));
}

fn print_final_stats(stats: &ProcessingStats, config: &Config) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 成功: {}/{}", stats.success, stats.total);
    info!("❌ 失败: {}", stats.failed);
    info!("🗜️  收据归档: {}", config.archive_file);
    info!("{}", "=".repeat(60));
}
