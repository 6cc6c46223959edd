/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 订单网站地址
    pub order_site_url: String,
    /// 订单 CSV 下载地址
    pub orders_csv_url: String,
    /// CSV 本地缓存文件（每次运行覆盖）
    pub orders_csv_file: String,
    /// 收据 PDF 输出目录
    pub receipts_dir: String,
    /// 机器人截图输出目录
    pub robots_dir: String,
    /// 收据 ZIP 归档路径
    pub archive_file: String,
    /// 单个订单的最大提交次数
    pub max_submit_attempts: usize,
    /// 点击提交后的固定等待时间（毫秒）
    pub submit_settle_ms: u64,
    /// 浏览器可执行文件路径（为空则使用系统默认 Chrome）
    pub chrome_executable: Option<String>,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            order_site_url: "https://robotsparebinindustries.com/#/robot-order".to_string(),
            orders_csv_url: "https://robotsparebinindustries.com/orders.csv".to_string(),
            orders_csv_file: "orders.csv".to_string(),
            receipts_dir: "output/Receipts".to_string(),
            robots_dir: "output/Robots".to_string(),
            archive_file: "output/receipts.zip".to_string(),
            max_submit_attempts: 3,
            submit_settle_ms: 2000,
            chrome_executable: None,
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            order_site_url: std::env::var("ROBOT_ORDER_SITE_URL").unwrap_or(default.order_site_url),
            orders_csv_url: std::env::var("ROBOT_ORDER_CSV_URL").unwrap_or(default.orders_csv_url),
            orders_csv_file: std::env::var("ROBOT_ORDER_CSV_FILE").unwrap_or(default.orders_csv_file),
            receipts_dir: std::env::var("ROBOT_ORDER_RECEIPTS_DIR").unwrap_or(default.receipts_dir),
            robots_dir: std::env::var("ROBOT_ORDER_ROBOTS_DIR").unwrap_or(default.robots_dir),
            archive_file: std::env::var("ROBOT_ORDER_ARCHIVE_FILE").unwrap_or(default.archive_file),
            max_submit_attempts: std::env::var("ROBOT_ORDER_MAX_ATTEMPTS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_submit_attempts),
            submit_settle_ms: std::env::var("ROBOT_ORDER_SETTLE_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.submit_settle_ms),
            chrome_executable: std::env::var("ROBOT_ORDER_CHROME_EXECUTABLE").ok(),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_order_site_contract() {
        let config = Config::default();
        assert_eq!(config.max_submit_attempts, 3);
        assert_eq!(config.submit_settle_ms, 2000);
        assert_eq!(config.receipts_dir, "output/Receipts");
        assert_eq!(config.robots_dir, "output/Robots");
        assert_eq!(config.archive_file, "output/receipts.zip");
    }
}
