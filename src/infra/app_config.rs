//! App 配置读取
//!
//! 配置保存在 `<app_root>/ENV`，dotenv 格式：
//!
//! ```text
//! export DOKKU_DOCKERFILE_PORTS='8080/tcp 9000/udp'
//! DOKKU_DISABLE_PROXY=1
//! ```

use std::collections::HashMap;

use async_trait::async_trait;

use super::layout::AppLayout;
use crate::domain::{AppName, ProxyMode};

/// Dockerfile 中声明的端口
pub const DOCKERFILE_PORTS_KEY: &str = "DOKKU_DOCKERFILE_PORTS";

/// 非空即表示禁用 proxy
pub const DISABLE_PROXY_KEY: &str = "DOKKU_DISABLE_PROXY";

/// App 级键值配置
#[async_trait]
pub trait ConfigStore: Send + Sync {
    async fn get(&self, app: &AppName, key: &str) -> Option<String>;
}

/// proxy 状态查询
#[async_trait]
pub trait ProxyStatus: Send + Sync {
    async fn is_enabled(&self, app: &AppName) -> bool;

    async fn mode(&self, app: &AppName) -> ProxyMode {
        ProxyMode::from_enabled(self.is_enabled(app).await)
    }
}

/// 基于 ENV 文件的配置
#[derive(Debug, Clone)]
pub struct EnvFileConfig {
    layout: AppLayout,
}

impl EnvFileConfig {
    pub fn new(layout: AppLayout) -> Self {
        Self { layout }
    }

    /// 读取并解析整个 ENV 文件，文件不存在时为空
    ///
    /// 只解析，不写入进程环境变量
    pub async fn load(&self, app: &AppName) -> HashMap<String, String> {
        let content = match tokio::fs::read(self.layout.env_file(app)).await {
            Ok(content) => content,
            Err(e) => {
                tracing::trace!(app = %app, error = %e, "No ENV file");
                return HashMap::new();
            }
        };

        let mut values = HashMap::new();
        for item in dotenvy::from_read_iter(content.as_slice()) {
            match item {
                Ok((key, value)) => {
                    values.insert(key, value);
                }
                Err(e) => {
                    tracing::warn!(app = %app, error = %e, "Skipping malformed ENV line");
                }
            }
        }
        values
    }
}

#[async_trait]
impl ConfigStore for EnvFileConfig {
    async fn get(&self, app: &AppName, key: &str) -> Option<String> {
        self.load(app).await.remove(key)
    }
}

#[async_trait]
impl ProxyStatus for EnvFileConfig {
    async fn is_enabled(&self, app: &AppName) -> bool {
        self.get(app, DISABLE_PROXY_KEY)
            .await
            .map_or(true, |v| v.is_empty())
    }
}
