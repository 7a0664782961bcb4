//! 基础设施模块
//!
//! 封装外部依赖（容器运行时、插件触发器、app 目录、命令执行等）

pub mod command;
pub mod docker;
pub mod app_config;
pub mod trigger;
pub mod layout;

pub use app_config::{ConfigStore, EnvFileConfig, ProxyStatus};
pub use command::CommandRunner;
pub use docker::{ContainerRuntime, DockerCli, RuntimeError};
pub use layout::AppLayout;
pub use trigger::{NotificationSink, PluginTrigger, TriggerError};
