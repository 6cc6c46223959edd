use robot_order_submit::launch_headless_browser;
use robot_order_submit::logger;
use robot_order_submit::services::{OrderFeed, OrderForm, OrderPortal};
use robot_order_submit::{Config, PageDriver};

#[tokio::test]
#[ignore] // 默认忽略，需要本机有 Chrome：cargo test -- --ignored
async fn test_browser_launch_and_navigation() {
    // 初始化日志
    logger::init();

    // 加载配置
    let config = Config::from_env();

    // 启动浏览器并导航到订单网站
    let result = launch_headless_browser(&config).await;

    assert!(result.is_ok(), "应该能够启动浏览器并打开订单页面");
}

#[tokio::test]
#[ignore]
async fn test_fetch_orders_csv() {
    // 初始化日志
    logger::init();

    // 加载配置
    let config = Config::from_env();

    // 下载并解析订单表
    let feed = OrderFeed::new(&config);
    let orders = feed.fetch_orders().await.expect("下载订单 CSV 失败");

    assert!(!orders.is_empty(), "订单表不应该为空");
    println!("找到 {} 条订单", orders.len());
}

#[tokio::test]
#[ignore]
async fn test_dismiss_modal_and_fill_first_order() {
    // 初始化日志
    logger::init();

    // 加载配置
    let config = Config::from_env();

    // 启动浏览器
    let (_browser, page) = launch_headless_browser(&config)
        .await
        .expect("启动浏览器失败");
    let driver = PageDriver::new(page);

    // 下载订单表，取第一条
    let feed = OrderFeed::new(&config);
    let orders = feed.fetch_orders().await.expect("下载订单 CSV 失败");
    let first = orders.first().expect("订单表不应该为空");

    // 关弹窗并填表
    let form = OrderForm::new(&driver);
    form.dismiss_modal().await.expect("关闭弹窗失败");
    form.fill_form(first).await.expect("填写表单失败");
}
