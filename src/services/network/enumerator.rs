//! 容器 slot 枚举

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::{AppName, ContainerSlot};
use crate::infra::layout::{read_first_line, AppLayout};
use crate::infra::ContainerRuntime;

/// 按扩缩容声明枚举运行中的容器
pub struct SlotEnumerator {
    layout: AppLayout,
    runtime: Arc<dyn ContainerRuntime>,
}

impl SlotEnumerator {
    pub fn new(layout: AppLayout, runtime: Arc<dyn ContainerRuntime>) -> Self {
        Self { layout, runtime }
    }

    /// 返回 `1..=count` 中容器 ID 文件存在且容器正在运行的 slot（按 index 升序）
    ///
    /// 只读取声明数量以内的 ID 文件，不等待容器启动
    pub async fn live_slots(&self, app: &AppName, proc_type: &str, count: u32) -> Vec<ContainerSlot> {
        let mut slots = Vec::new();

        for index in 1..=count {
            let id_file = self.layout.container_id_file(app, proc_type, index);
            let Some(container_id) = read_first_line(&id_file).await else {
                debug!(app = %app, proc_type, index, "No container id, skipping slot");
                continue;
            };

            match self.runtime.is_running(&container_id).await {
                Ok(true) => slots.push(ContainerSlot {
                    proc_type: proc_type.to_string(),
                    index,
                    container_id,
                }),
                Ok(false) => {
                    debug!(app = %app, proc_type, index, container = %container_id, "Container not running");
                }
                Err(e) => {
                    warn!(app = %app, proc_type, index, container = %container_id, error = %e, "Failed to query container state");
                }
            }
        }

        slots
    }
}
