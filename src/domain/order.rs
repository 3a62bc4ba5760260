// ==========================================
// 杯子钥匙扣运营看板 - 订单领域模型
// ==========================================
// 职责: 电商后台导出的订单 JSON 外部结构
// 说明: 除 main_order_id 外所有字段均可缺失,
//       数值字段既可能是数字也可能是数字字符串
// ==========================================

use crate::domain::types::status_label;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// ==========================================
// Order - 订单
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// 订单号（唯一键）
    #[serde(deserialize_with = "de_id")]
    pub main_order_id: String,

    /// SKU 明细
    #[serde(default, deserialize_with = "de_vec")]
    pub sku_module: Vec<SkuLine>,

    /// 金额信息
    #[serde(default, deserialize_with = "de_option")]
    pub price_module: Option<PriceModule>,

    /// 状态列表（表格展示取第一条）
    #[serde(default, deserialize_with = "de_vec")]
    pub order_status_module: Vec<OrderStatusEntry>,

    /// 交易信息（下单时间）
    #[serde(default, deserialize_with = "de_option")]
    pub trade_order_module: Option<TradeOrderModule>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkuLine {
    #[serde(default, deserialize_with = "de_string")]
    pub sku_name: Option<String>,

    #[serde(default, deserialize_with = "de_u32")]
    pub quantity: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceModule {
    #[serde(default, deserialize_with = "de_option")]
    pub grand_total: Option<PriceValue>,

    #[serde(default, deserialize_with = "de_option")]
    pub taxes: Option<PriceValue>,

    #[serde(default, deserialize_with = "de_option")]
    pub shipping_origin_fee: Option<PriceValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceValue {
    #[serde(default, deserialize_with = "de_f64")]
    pub price_val: Option<f64>,

    /// 平台格式化后的金额文本（如 "$12.99"）
    #[serde(default, deserialize_with = "de_string")]
    pub format_price: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderStatusEntry {
    #[serde(default, deserialize_with = "de_i64")]
    pub main_order_status: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TradeOrderModule {
    /// Unix 秒
    #[serde(default, deserialize_with = "de_i64")]
    pub create_time: Option<i64>,
}

impl SkuLine {
    /// SKU 名称，缺失时为 "Unknown"
    pub fn name(&self) -> &str {
        self.sku_name.as_deref().unwrap_or("Unknown")
    }

    /// 有效件数：缺失或为 0 时按 1 件计
    pub fn effective_quantity(&self) -> u32 {
        self.quantity.filter(|q| *q > 0).unwrap_or(1)
    }
}

impl Order {
    /// 订单件数 = 各 SKU 有效件数之和
    pub fn item_count(&self) -> u64 {
        self.sku_module
            .iter()
            .map(|sku| sku.effective_quantity() as u64)
            .sum()
    }

    /// 订单金额（缺失为 0）
    pub fn grand_total(&self) -> f64 {
        self.price_module
            .as_ref()
            .and_then(|p| p.grand_total.as_ref())
            .and_then(|v| v.price_val)
            .unwrap_or(0.0)
    }

    pub fn taxes(&self) -> f64 {
        self.price_module
            .as_ref()
            .and_then(|p| p.taxes.as_ref())
            .and_then(|v| v.price_val)
            .unwrap_or(0.0)
    }

    pub fn shipping(&self) -> f64 {
        self.price_module
            .as_ref()
            .and_then(|p| p.shipping_origin_fee.as_ref())
            .and_then(|v| v.price_val)
            .unwrap_or(0.0)
    }

    /// 下单时间（Unix 秒）
    pub fn create_time(&self) -> Option<i64> {
        self.trade_order_module.as_ref().and_then(|t| t.create_time)
    }

    /// 第一条状态的展示名称，无状态时为 "Unknown"
    pub fn primary_status_label(&self) -> String {
        self.order_status_module
            .first()
            .and_then(|s| s.main_order_status)
            .map(status_label)
            .unwrap_or_else(|| "Unknown".to_string())
    }

    /// 金额展示文本：format_price > price_val > "N/A"
    pub fn total_display(&self) -> String {
        match self.price_module.as_ref().and_then(|p| p.grand_total.as_ref()) {
            Some(total) => match (&total.format_price, total.price_val) {
                (Some(text), _) if !text.is_empty() => text.clone(),
                (_, Some(val)) => format!("{}", val),
                _ => "N/A".to_string(),
            },
            None => "N/A".to_string(),
        }
    }
}

// ==========================================
// 宽松反序列化
// ==========================================
// 外部数据字段类型不稳定：无法识别的值一律视为缺失

fn value_to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|v| v.is_finite())
}

fn value_to_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
        }
        _ => None,
    }
}

fn de_f64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    Ok(value_to_f64(&Value::deserialize(d)?))
}

fn de_i64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
    Ok(value_to_i64(&Value::deserialize(d)?))
}

fn de_u32<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u32>, D::Error> {
    Ok(value_to_i64(&Value::deserialize(d)?).and_then(|v| u32::try_from(v).ok()))
}

fn de_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn de_id<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    match Value::deserialize(d)? {
        Value::String(s) if !s.trim().is_empty() => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "main_order_id 必须为非空字符串, 实际: {}",
            other
        ))),
    }
}

fn de_option<'de, D, T>(d: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(serde_json::from_value(Value::deserialize(d)?).ok())
}

fn de_vec<'de, D, T>(d: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Value::deserialize(d)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lenient_numbers() {
        let order: Order = serde_json::from_value(json!({
            "main_order_id": "A1",
            "sku_module": [{"sku_name": "Purple Body", "quantity": "3"}, {"sku_name": "Default"}],
            "price_module": {"grand_total": {"price_val": "25.50"}, "taxes": {"price_val": 1.5}},
            "order_status_module": [{"main_order_status": "102"}],
            "trade_order_module": {"create_time": "1700000000"}
        }))
        .unwrap();

        assert_eq!(order.item_count(), 4);
        assert_eq!(order.grand_total(), 25.5);
        assert_eq!(order.taxes(), 1.5);
        assert_eq!(order.shipping(), 0.0);
        assert_eq!(order.create_time(), Some(1_700_000_000));
        assert_eq!(order.primary_status_label(), "Shipped");
        assert_eq!(order.total_display(), "25.5");
    }

    #[test]
    fn test_missing_modules_degrade() {
        let order: Order = serde_json::from_value(json!({
            "main_order_id": 12345,
            "sku_module": null,
            "price_module": "garbage"
        }))
        .unwrap();

        assert_eq!(order.main_order_id, "12345");
        assert_eq!(order.item_count(), 0);
        assert_eq!(order.grand_total(), 0.0);
        assert_eq!(order.create_time(), None);
        assert_eq!(order.primary_status_label(), "Unknown");
        assert_eq!(order.total_display(), "N/A");
    }

    #[test]
    fn test_zero_quantity_counts_as_one() {
        let sku = SkuLine {
            sku_name: None,
            quantity: Some(0),
        };
        assert_eq!(sku.effective_quantity(), 1);
        assert_eq!(sku.name(), "Unknown");
    }

    #[test]
    fn test_missing_id_rejected() {
        let result: Result<Order, _> = serde_json::from_value(json!({"sku_module": []}));
        assert!(result.is_err());
    }
}
