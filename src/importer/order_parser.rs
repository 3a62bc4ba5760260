// ==========================================
// 杯子钥匙扣运营看板 - 订单粘贴内容解析
// ==========================================
// 输入: {"data": {"main_orders": [...]}}
// 输出: ParsedOrders（保持原始顺序，不去重）
// 规则: 整体结构错误才报错；单条订单无法识别时跳过并记 warn
// ==========================================

use crate::domain::order::Order;
use crate::importer::error::{ImportError, ImportResult};
use serde_json::Value;

/// 解析结果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedOrders {
    pub orders: Vec<Order>,
    /// 无法识别而跳过的条目下标
    pub rejected: Vec<usize>,
}

/// 解析粘贴文本
pub fn parse_payload(text: &str) -> ImportResult<ParsedOrders> {
    if text.trim().is_empty() {
        return Err(ImportError::EmptyInput);
    }

    let root: Value = serde_json::from_str(text)?;
    parse_payload_value(root)
}

/// 解析已反序列化的 JSON 值
pub fn parse_payload_value(root: Value) -> ImportResult<ParsedOrders> {
    let main_orders = match root {
        Value::Object(mut obj) => match obj.remove("data") {
            Some(Value::Object(mut data)) => data.remove("main_orders"),
            _ => None,
        },
        _ => None,
    };

    let items = match main_orders {
        Some(Value::Array(items)) => items,
        _ => return Err(ImportError::MissingMainOrders),
    };

    let mut parsed = ParsedOrders::default();
    for (index, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<Order>(item) {
            Ok(order) => parsed.orders.push(order),
            Err(e) => {
                tracing::warn!(index, error = %e, "订单条目无法识别，已跳过");
                parsed.rejected.push(index);
            }
        }
    }

    Ok(parsed)
}
