//! 网络配置同步
//!
//! 流程：扩缩容声明 → 枚举运行中的容器 → 解析 IP / 端口 → 发送通知。
//! 每次调用都从磁盘与运行时重新计算，不保存任何状态。

pub mod enumerator;
pub mod resolver;
pub mod reconcile;
pub mod presence;

#[cfg(test)]
pub(crate) mod fakes;

pub use enumerator::SlotEnumerator;
pub use presence::has_network_config;
pub use reconcile::{NetworkReconciler, PassOutcome, ReconcileReport};
pub use resolver::{AddressStrategy, NetworkResolver};
