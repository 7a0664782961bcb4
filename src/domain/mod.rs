//! 领域模型模块
//!
//! 纯数据结构与纯函数，不依赖 tokio

pub mod app;
pub mod scale;
pub mod network;

// Re-exports for convenience
pub use app::AppName;
pub use network::{
    ContainerSlot, EventKind, ImageFlavor, NetworkBinding, NetworkEvent, ProxyMode, SlotBinding,
};
pub use scale::{ScaleEntry, ScaleLine, ScaleSpec, SkipReason};
