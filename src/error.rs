//! 统一错误处理
//!
//! 只有输入错误 (`AppError`) 会终止一次调用；外部调用失败在各自模块中
//! 降级为“无值”并记录 warn 日志。

use thiserror::Error;

/// 致命输入错误
#[derive(Debug, Error)]
pub enum AppError {
    /// App 名称不合法
    #[error(
        "App name must begin with lowercase alphanumeric character, and cannot include uppercase characters, colons, underscores, slashes or whitespace: {0:?}"
    )]
    InvalidAppName(String),

    /// App 目录不存在
    #[error("App {0} does not exist")]
    AppNotFound(String),

    /// 未配置 apps 根目录
    #[error("Apps root is not configured (set APPNET_ROOT or DOKKU_ROOT)")]
    MissingRoot,
}

/// 便捷类型别名
pub type AppResult<T> = Result<T, AppError>;
