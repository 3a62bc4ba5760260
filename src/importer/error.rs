// ==========================================
// 杯子钥匙扣运营看板 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 说明: 唯一对用户可见的失败类型（粘贴内容无法解析）
// ==========================================

use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("粘贴内容为空")]
    EmptyInput,

    #[error("JSON 解析失败: {0}")]
    InvalidJson(String),

    #[error("JSON 结构错误: 缺少 data.main_orders 数组")]
    MissingMainOrders,
}

impl From<serde_json::Error> for ImportError {
    fn from(err: serde_json::Error) -> Self {
        ImportError::InvalidJson(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
