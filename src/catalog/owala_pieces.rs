// ==========================================
// 杯子钥匙扣运营看板 - Owala 杯身零件清单
// ==========================================
// 职责: Owala SKU → 组装所需的五个零件
// ==========================================

use crate::domain::batch::PieceSpec;
use crate::domain::types::ComponentKind::{Bottle, Button, Handle, Lid, Ring};

const fn piece(name: &'static str, kind: crate::domain::types::ComponentKind) -> PieceSpec {
    PieceSpec { name, kind }
}

const PURPLE_BODY: [PieceSpec; 5] = [
    piece("Purple Bottle", Bottle),
    piece("Magenta Lid", Lid),
    piece("Yellow Handle", Handle),
    piece("Blue Ring", Ring),
    piece("Orange Button", Button),
];

const WHITE_BODY: [PieceSpec; 5] = [
    piece("White Bottle", Bottle),
    piece("Gray Lid", Lid),
    piece("White Handle", Handle),
    piece("Black Button", Button),
    piece("Black Ring", Ring),
];

const PINK_BODY: [PieceSpec; 5] = [
    piece("Pink Bottle", Bottle),
    piece("Purple Lid", Lid),
    piece("Yellow Handle", Handle),
    piece("Yellow Ring", Ring),
    piece("White Button", Button),
];

const ORANGE_BODY: [PieceSpec; 5] = [
    piece("Orange Bottle", Bottle),
    piece("Gray Lid", Lid),
    piece("Brown Handle", Handle),
    piece("White Ring", Ring),
    piece("Orange Button", Button),
];

const LIME_BODY: [PieceSpec; 5] = [
    piece("Lime Green Bottle", Bottle),
    piece("Blue Lid", Lid),
    piece("Green Handle", Handle),
    piece("Mint Green Ring", Ring),
    piece("Mint Green Button", Button),
];

const LIGHT_GREEN_BODY: [PieceSpec; 5] = [
    piece("Mint Green Bottle", Bottle),
    piece("Pink Lid", Lid),
    piece("White Handle", Handle),
    piece("Yellow Ring", Ring),
    piece("Brown Button", Button),
];

/// 已登记 BOM 的 Owala SKU 名称
pub fn owala_sku_names() -> [&'static str; 6] {
    [
        "Purple Body",
        "White Body",
        "Pink Body",
        "Orange Body",
        "Lime/Neon Green Body",
        "Light Green Body",
    ]
}

/// 查询 SKU 所需零件，未登记的 SKU 返回空切片
pub fn pieces_for_sku(sku_name: &str) -> &'static [PieceSpec] {
    match sku_name {
        "Purple Body" => &PURPLE_BODY,
        "White Body" => &WHITE_BODY,
        "Pink Body" => &PINK_BODY,
        "Orange Body" => &ORANGE_BODY,
        "Lime/Neon Green Body" => &LIME_BODY,
        "Light Green Body" => &LIGHT_GREEN_BODY,
        _ => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::ComponentKind;

    #[test]
    fn test_every_owala_sku_has_one_piece_per_kind() {
        for sku in owala_sku_names() {
            let pieces = pieces_for_sku(sku);
            assert_eq!(pieces.len(), 5, "{}", sku);
            for kind in ComponentKind::ALL {
                assert_eq!(pieces.iter().filter(|p| p.kind == kind).count(), 1, "{} {:?}", sku, kind);
            }
        }
    }

    #[test]
    fn test_unknown_sku_has_no_pieces() {
        assert!(pieces_for_sku("Green").is_empty());
        assert!(pieces_for_sku("purple body").is_empty());
    }
}
