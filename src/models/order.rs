//! 订单数据模型
//!
//! 对应订单 CSV 的一行，列名：`Order number, Head, Body, Legs, Address`

use serde::Deserialize;
use std::fmt::Display;

/// 一条机器人订单
///
/// 所有字段都按原样读入为字符串：Legs 虽然是数字件号，
/// 但在表单里是按文本输入的，保持字符串可以避免丢失前导零
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Order {
    /// 订单号（产物文件名以它为键）
    #[serde(rename = "Order number")]
    pub order_number: String,

    /// 机器人头部选项代码
    #[serde(rename = "Head")]
    pub head: String,

    /// 机器人身体选项代码
    #[serde(rename = "Body")]
    pub body: String,

    /// 腿部件号（按文本输入）
    #[serde(rename = "Legs")]
    pub legs: String,

    /// 收货地址
    #[serde(rename = "Address")]
    pub address: String,
}

impl Display for Order {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[订单 #{} 头部#{} 身体#{} 腿部#{}]",
            self.order_number, self.head, self.body, self.legs
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_orders_from_csv() {
        let data = "\
Order number,Head,Body,Legs,Address
1001,1,2,3,Address Road 28
1002,2,1,5,Sunny Street 3";
        let mut reader = csv::Reader::from_reader(data.as_bytes());
        let orders: Vec<Order> = reader
            .deserialize()
            .collect::<Result<Vec<_>, _>>()
            .expect("CSV 应该能解析");

        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].order_number, "1001");
        assert_eq!(orders[0].head, "1");
        assert_eq!(orders[0].legs, "3");
        assert_eq!(orders[1].address, "Sunny Street 3");
    }

    #[test]
    fn rows_keep_source_order() {
        let data = "\
Order number,Head,Body,Legs,Address
3,1,1,1,a
1,1,1,1,b
2,1,1,1,c";
        let mut reader = csv::Reader::from_reader(data.as_bytes());
        let numbers: Vec<String> = reader
            .deserialize::<Order>()
            .map(|r| r.expect("行应该能解析").order_number)
            .collect();
        assert_eq!(numbers, vec!["3", "1", "2"]);
    }
}
