// ==========================================
// 杯子钥匙扣运营看板 - 导入层
// ==========================================
// 职责: 粘贴的订单 JSON → 领域订单
// ==========================================

pub mod error;
pub mod order_parser;

// 重导出核心类型
pub use error::{ImportError, ImportResult};
pub use order_parser::{parse_payload, parse_payload_value, ParsedOrders};
