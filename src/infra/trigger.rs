//! 通知接收方
//!
//! 网络事件通过插件触发器广播：
//! `plugn trigger <event> <app> <proc_type> <index> <value>`

use async_trait::async_trait;
use thiserror::Error;

use super::command::{CommandError, CommandRunner};
use crate::domain::NetworkEvent;

/// 事件发送错误
#[derive(Debug, Error)]
pub enum TriggerError {
    #[error(transparent)]
    Command(#[from] CommandError),
}

/// 事件接收方
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn emit(&self, event: &NetworkEvent) -> Result<(), TriggerError>;
}

/// 插件触发器实现
#[derive(Debug, Clone)]
pub struct PluginTrigger {
    bin: String,
}

impl PluginTrigger {
    pub fn new(bin: impl Into<String>) -> Self {
        Self { bin: bin.into() }
    }
}

impl Default for PluginTrigger {
    fn default() -> Self {
        Self::new("plugn")
    }
}

#[async_trait]
impl NotificationSink for PluginTrigger {
    async fn emit(&self, event: &NetworkEvent) -> Result<(), TriggerError> {
        let index = event.index.to_string();
        CommandRunner::run_simple(
            &self.bin,
            &[
                "trigger",
                event.kind.trigger_name(),
                &event.app,
                &event.proc_type,
                &index,
                &event.value,
            ],
        )
        .await?;
        Ok(())
    }
}
