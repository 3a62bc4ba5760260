// ==========================================
// 杯子钥匙扣运营看板 - SKU 分类引擎
// ==========================================
// 职责: SKU 名称 → 大类 / 类型 / 展示名
// 规则: 固定子串与集合匹配，无状态
// ==========================================

use crate::domain::summary::SkuClassification;
use crate::domain::types::{ProductCategory, ProductType};

/// Stanley 系列的 SKU 名称
const STANLEY_SKUS: [&str; 4] = ["Green", "Blue", "Multi-Color", "Gradient"];

/// 分类 SKU
///
/// 规则（按顺序匹配）:
/// 1) "Default" → Other / Keychain（动物钥匙扣）
/// 2) 含 "Body" → Cup / Owala
/// 3) Stanley 集合 → Cup / Stanley
/// 4) 其他 → Other / Other
pub fn classify_sku(sku_name: &str) -> SkuClassification {
    if sku_name == "Default" {
        return SkuClassification {
            category: ProductCategory::Other,
            product_type: ProductType::Keychain,
            display: "Animal Keychain".to_string(),
        };
    }

    if sku_name.contains("Body") {
        return SkuClassification {
            category: ProductCategory::Cup,
            product_type: ProductType::Owala,
            display: format!("Owala {}", sku_name.replacen(" Body", "", 1)),
        };
    }

    if STANLEY_SKUS.contains(&sku_name) {
        return SkuClassification {
            category: ProductCategory::Cup,
            product_type: ProductType::Stanley,
            display: format!("Stanley {}", sku_name),
        };
    }

    SkuClassification {
        category: ProductCategory::Other,
        product_type: ProductType::Other,
        display: sku_name.to_string(),
    }
}
