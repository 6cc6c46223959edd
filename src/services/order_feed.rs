//! 订单数据服务 - 业务能力层
//!
//! 只负责"拿到订单表"能力：下载 CSV（覆盖本地缓存）并解析成 `Vec<Order>`

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::config::Config;
use crate::error::{AppError, AppResult, FeedError};
use crate::models::Order;

/// 订单数据服务
///
/// 职责：
/// - 下载订单 CSV 到本地文件（每次运行覆盖旧缓存）
/// - 把 CSV 解析成有序的 `Vec<Order>`（保持文件中的行序）
/// - 不操作浏览器，不关心流程顺序
pub struct OrderFeed {
    csv_url: String,
    csv_file: String,
    client: reqwest::Client,
}

impl OrderFeed {
    /// 创建新的订单数据服务
    pub fn new(config: &Config) -> Self {
        Self {
            csv_url: config.orders_csv_url.clone(),
            csv_file: config.orders_csv_file.clone(),
            client: reqwest::Client::new(),
        }
    }

    /// 下载并解析订单表
    pub async fn fetch_orders(&self) -> AppResult<Vec<Order>> {
        self.download().await?;
        let orders = self.read_local()?;
        info!("✓ 读取到 {} 条订单", orders.len());
        Ok(orders)
    }

    /// 下载 CSV 到本地文件，覆盖已有缓存
    async fn download(&self) -> AppResult<()> {
        info!("⬇️  正在下载订单 CSV: {}", self.csv_url);

        let response = self
            .client
            .get(&self.csv_url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| AppError::download_failed(&self.csv_url, e))?;

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AppError::download_failed(&self.csv_url, e))?;

        fs::write(&self.csv_file, &bytes).map_err(|e| {
            AppError::Feed(FeedError::WriteFailed {
                path: self.csv_file.clone(),
                source: Box::new(e),
            })
        })?;

        debug!("CSV 已写入: {} ({} 字节)", self.csv_file, bytes.len());
        Ok(())
    }

    /// 从本地文件读取订单表
    fn read_local(&self) -> AppResult<Vec<Order>> {
        read_orders_from_csv(&self.csv_file)
    }
}

/// 从 CSV 文件解析订单列表，保持行序
fn read_orders_from_csv(path: impl AsRef<Path>) -> AppResult<Vec<Order>> {
    let path = path.as_ref();
    let parse_error = |e: csv::Error| {
        AppError::Feed(FeedError::CsvParseFailed {
            path: path.display().to_string(),
            source: Box::new(e),
        })
    };

    let mut reader = csv::Reader::from_path(path).map_err(parse_error)?;
    let mut orders = Vec::new();
    for row in reader.deserialize() {
        let order: Order = row.map_err(parse_error)?;
        orders.push(order);
    }
    Ok(orders)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_orders_in_file_order() {
        let dir = tempfile::tempdir().expect("创建临时目录失败");
        let csv_path = dir.path().join("orders.csv");
        let mut file = fs::File::create(&csv_path).expect("创建 CSV 失败");
        writeln!(file, "Order number,Head,Body,Legs,Address").unwrap();
        writeln!(file, "1001,1,2,3,Address Road 28").unwrap();
        writeln!(file, "1002,2,1,5,Sunny Street 3").unwrap();

        let orders = read_orders_from_csv(&csv_path).expect("解析 CSV 失败");
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].order_number, "1001");
        assert_eq!(orders[1].order_number, "1002");
        assert_eq!(orders[1].body, "1");
    }

    #[test]
    fn missing_file_is_a_feed_error() {
        let result = read_orders_from_csv("no/such/orders.csv");
        assert!(matches!(result, Err(AppError::Feed(_))));
    }
}
