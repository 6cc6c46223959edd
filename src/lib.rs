//! # Robot Order Submit
//!
//! 一个在 RobotSpareBin 订单网站上自动下单的 Rust 应用程序：
//! 逐行读取订单 CSV，驱动网页表单提交订单，成功后导出收据 PDF
//! 并把机器人截图嵌入 PDF，最后把所有收据打包成 ZIP 归档。
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有稀缺资源（Page），只暴露能力
//! - `PageDriver` - 唯一的 page owner，提供点击/输入/求值/截图/打印能力
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单个 Order
//! - `OrderFeed` - 下载并解析订单 CSV 能力
//! - `OrderForm` - 订单表单交互能力（实现 `OrderPortal`）
//! - `ReceiptExporter` - 收据 PDF / 机器人截图导出能力（实现 `ReceiptSink`）
//! - `ReceiptArchiver` - ZIP 归档与目录清理能力
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一个订单"的完整处理流程
//! - `OrderCtx` - 上下文封装（order_number + row_index）
//! - `OrderFlow` - 流程编排（填表 → 重试提交 → 导出收据 → 下一单）
//!
//! ### ④ 编排层（Orchestration）
//! - `app` - 应用入口，串起浏览器、订单循环、归档和清理

pub mod app;
pub mod browser;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use app::App;
pub use browser::launch_headless_browser;
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::PageDriver;
pub use models::Order;
pub use services::{
    OrderFeed, OrderForm, OrderPortal, ReceiptArchiver, ReceiptExporter, ReceiptSink,
};
pub use utils::logging as logger;
pub use workflow::{OrderCtx, OrderFlow, ProcessResult, SubmitOutcome};
