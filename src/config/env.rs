//! 环境变量配置加载

use std::env;
use std::path::PathBuf;

use crate::error::{AppError, AppResult};

/// 环境配置
#[derive(Clone, Debug)]
pub struct EnvConfig {
    /// apps 根目录（每个 app 一个子目录）
    pub apps_root: Option<PathBuf>,
    /// 容器运行时 CLI
    pub docker_bin: String,
    /// 插件触发器 CLI
    pub trigger_bin: String,
    /// 镜像仓库前缀，镜像名为 `<repo>/<app>:latest`
    pub image_repo: String,
}

impl EnvConfig {
    /// 从环境变量加载配置
    pub fn from_env() -> Self {
        // Apps root - 兼容 DOKKU_ROOT
        let apps_root = ["APPNET_ROOT", "DOKKU_ROOT"]
            .into_iter()
            .find_map(|key| env::var(key).ok().filter(|v| !v.is_empty()))
            .map(PathBuf::from);

        let docker_bin = env::var("APPNET_DOCKER_BIN").unwrap_or_else(|_| "docker".to_string());
        let trigger_bin = env::var("APPNET_TRIGGER_BIN").unwrap_or_else(|_| "plugn".to_string());
        let image_repo = env::var("APPNET_IMAGE_REPO").unwrap_or_else(|_| "dokku".to_string());

        Self {
            apps_root,
            docker_bin,
            trigger_bin,
            image_repo,
        }
    }

    /// 命令行参数覆盖根目录
    pub fn with_root(mut self, root: Option<PathBuf>) -> Self {
        if root.is_some() {
            self.apps_root = root;
        }
        self
    }

    /// 获取 apps 根目录，未配置则为致命错误
    pub fn require_root(&self) -> AppResult<PathBuf> {
        self.apps_root.clone().ok_or(AppError::MissingRoot)
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            apps_root: None,
            docker_bin: "docker".to_string(),
            trigger_bin: "plugn".to_string(),
            image_repo: "dokku".to_string(),
        }
    }
}
