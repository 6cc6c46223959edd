//! 订单处理上下文
//!
//! 封装"我正在处理第几行的哪个订单"这一信息

use std::fmt::Display;

/// 订单处理上下文
#[derive(Debug, Clone)]
pub struct OrderCtx {
    /// 订单号（产物文件名以它为键）
    pub order_number: String,

    /// 订单在 CSV 中的行号（从 1 开始，仅用于日志显示）
    pub row_index: usize,

    /// 订单总数
    pub total_rows: usize,
}

impl OrderCtx {
    /// 创建新的订单上下文
    pub fn new(order_number: String, row_index: usize, total_rows: usize) -> Self {
        Self {
            order_number,
            row_index,
            total_rows,
        }
    }
}

impl Display for OrderCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[订单号#{} 第 {}/{} 行]",
            self.order_number, self.row_index, self.total_rows
        )
    }
}
