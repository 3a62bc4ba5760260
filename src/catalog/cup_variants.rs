// ==========================================
// 杯子钥匙扣运营看板 - 杯型物料清单（生产跟踪）
// ==========================================
// 职责: 六种杯型各自需要的瓶身/杯盖/按钮/圆环/提手
// 注意: 与 Owala 销售 BOM 独立维护，颜色命名存在差异
// ==========================================

use crate::domain::batch::CupVariant;
use std::sync::OnceLock;

static CUP_VARIANTS: OnceLock<Vec<CupVariant>> = OnceLock::new();

fn variant(
    key: &str,
    name: &str,
    [bottle, lid, button, ring, handle]: [&str; 5],
    sales_percentage: f64,
) -> CupVariant {
    CupVariant {
        key: key.to_string(),
        name: name.to_string(),
        bottle: bottle.to_string(),
        lid: lid.to_string(),
        button: button.to_string(),
        ring: ring.to_string(),
        handle: handle.to_string(),
        sales_percentage,
    }
}

/// 全部杯型（按销量占比降序，即展示顺序）
pub fn cup_variants() -> &'static [CupVariant] {
    CUP_VARIANTS.get_or_init(|| {
        vec![
            variant(
                "mint",
                "Mint",
                ["Mint Bottle", "Pink Lid", "Brown Button", "Yellow Ring", "White Handle"],
                48.2,
            ),
            variant(
                "white",
                "White",
                ["White Bottle", "Gray Lid", "Black Button", "Black Ring", "White Handle"],
                16.3,
            ),
            variant(
                "pink",
                "Pink",
                ["Pink Bottle", "Purple Lid", "Brown Button", "Yellow Ring", "Yellow Handle"],
                14.2,
            ),
            variant(
                "purple",
                "Purple",
                ["Purple Bottle", "Magenta Lid", "Orange Button", "Blue Ring", "Yellow Handle"],
                10.6,
            ),
            variant(
                "orange",
                "Orange",
                ["Orange Bottle", "Gray Lid", "Orange Button", "White Ring", "Brown Handle"],
                5.7,
            ),
            variant(
                "lime",
                "Lime",
                ["Lime Bottle", "Blue Lid", "Mint Button", "Mint Ring", "Green Handle"],
                5.0,
            ),
        ]
    })
}

pub fn cup_variant(key: &str) -> Option<&'static CupVariant> {
    cup_variants().iter().find(|v| v.key == key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        assert_eq!(cup_variants().len(), 6);
        let white = cup_variant("white").unwrap();
        assert_eq!(white.lid, "Gray Lid");
        assert!(cup_variant("teal").is_none());
    }
}
