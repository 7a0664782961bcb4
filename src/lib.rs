//! appnet - 应用容器网络配置同步
//!
//! 按照进程扩缩容声明 (DOKKU_SCALE) 遍历运行中的容器，计算每个 web 容器的
//! IP / 端口，并通过插件触发器 (plugin trigger) 广播给 proxy、路由等子系统。

pub mod error;
pub mod config;
pub mod domain;
pub mod infra;
pub mod services;

pub use config::EnvConfig;
pub use error::{AppError, AppResult};
pub use services::network::{has_network_config, NetworkReconciler, ReconcileReport};
