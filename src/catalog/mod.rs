// ==========================================
// 杯子钥匙扣运营看板 - 静态目录数据
// ==========================================
// 职责: 物料清单（BOM）与生产计划排程
// 说明: 全部为手工维护的配置数据，运行期只读
// ==========================================

pub mod cup_variants;
pub mod owala_pieces;
pub mod plans;

pub use cup_variants::{cup_variant, cup_variants};
pub use owala_pieces::{owala_sku_names, pieces_for_sku};
pub use plans::{find_batch_plan, plan};
