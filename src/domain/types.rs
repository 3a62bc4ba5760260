// ==========================================
// 杯子钥匙扣运营看板 - 领域类型定义
// ==========================================
// 职责: 订单看板与生产跟踪共用的枚举类型
// 序列化格式: 与前端约定的字符串一致
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 商品大类 (Product Category)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ProductCategory {
    Cup,   // 杯子
    Other, // 其他
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductCategory::Cup => write!(f, "Cup"),
            ProductCategory::Other => write!(f, "Other"),
        }
    }
}

// ==========================================
// 商品类型 (Product Type)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ProductType {
    Owala,
    Stanley,
    Keychain,
    Other,
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductType::Owala => write!(f, "Owala"),
            ProductType::Stanley => write!(f, "Stanley"),
            ProductType::Keychain => write!(f, "Keychain"),
            ProductType::Other => write!(f, "Other"),
        }
    }
}

// ==========================================
// 订单状态码 → 展示名称
// ==========================================

/// 订单状态码映射表（未知状态码回退为 `Status {code}`）
pub fn status_label(code: i64) -> String {
    match code {
        101 => "Awaiting Shipment".to_string(),
        102 => "Shipped".to_string(),
        103 => "Delivered".to_string(),
        104 => "Completed".to_string(),
        105 => "Cancelled".to_string(),
        other => format!("Status {}", other),
    }
}

// ==========================================
// 表格排序
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Date,  // 下单时间
    Items, // 件数
    Total, // 订单金额
    Id,    // 订单号
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKey::Date => write!(f, "date"),
            SortKey::Items => write!(f, "items"),
            SortKey::Total => write!(f, "total"),
            SortKey::Id => write!(f, "id"),
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "date" => Ok(SortKey::Date),
            "items" => Ok(SortKey::Items),
            "total" => Ok(SortKey::Total),
            "id" => Ok(SortKey::Id),
            other => Err(format!("未知排序字段: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "asc"),
            SortDirection::Desc => write!(f, "desc"),
        }
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(format!("未知排序方向: {}", other)),
        }
    }
}

// ==========================================
// 日期区间过滤
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateRange {
    #[default]
    All,   // 不限
    Today, // 今日零点起
    Week,  // 近 7 天
    Month, // 近一个自然月
}

// ==========================================
// 生产计划 (Plan)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PlanId {
    #[default]
    #[serde(rename = "72h")]
    Hours72,
    #[serde(rename = "1week")]
    OneWeek,
}

impl PlanId {
    pub const ALL: [PlanId; 2] = [PlanId::Hours72, PlanId::OneWeek];

    pub fn as_str(&self) -> &'static str {
        match self {
            PlanId::Hours72 => "72h",
            PlanId::OneWeek => "1week",
        }
    }
}

impl fmt::Display for PlanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PlanId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "72h" => Ok(PlanId::Hours72),
            "1week" => Ok(PlanId::OneWeek),
            other => Err(format!("未知生产计划: {}", other)),
        }
    }
}

// ==========================================
// 零件种类 (Component Kind)
// ==========================================
// 一个完整的杯子由五种零件组装而成
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    Bottle,
    Lid,
    Button,
    Ring,
    Handle,
}

impl ComponentKind {
    pub const ALL: [ComponentKind; 5] = [
        ComponentKind::Bottle,
        ComponentKind::Lid,
        ComponentKind::Button,
        ComponentKind::Ring,
        ComponentKind::Handle,
    ];
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentKind::Bottle => write!(f, "Bottle"),
            ComponentKind::Lid => write!(f, "Lid"),
            ComponentKind::Button => write!(f, "Button"),
            ComponentKind::Ring => write!(f, "Ring"),
            ComponentKind::Handle => write!(f, "Handle"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_label_fallback() {
        assert_eq!(status_label(102), "Shipped");
        assert_eq!(status_label(140), "Status 140");
    }

    #[test]
    fn test_plan_id_serde() {
        let json = serde_json::to_string(&PlanId::OneWeek).unwrap();
        assert_eq!(json, "\"1week\"");
        let parsed: PlanId = serde_json::from_str("\"72h\"").unwrap();
        assert_eq!(parsed, PlanId::Hours72);
        assert!("2weeks".parse::<PlanId>().is_err());
    }

    #[test]
    fn test_sort_key_parse() {
        assert_eq!("Total".parse::<SortKey>().unwrap(), SortKey::Total);
        assert_eq!(" desc ".parse::<SortDirection>().unwrap(), SortDirection::Desc);
    }
}
