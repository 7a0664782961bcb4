//! 容器运行时客户端
//!
//! `ContainerRuntime` 抽象了网络同步需要的全部运行时查询，
//! `DockerCli` 通过 docker 命令行实现它。

use async_trait::async_trait;
use thiserror::Error;

use super::command::{CommandError, CommandRunner};

/// 运行时查询错误
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Command(#[from] CommandError),
}

/// 容器运行时
#[async_trait]
pub trait ContainerRuntime: Send + Sync {
    /// 容器是否在运行
    async fn is_running(&self, container_id: &str) -> Result<bool, RuntimeError>;

    /// 以 Go template 格式查询容器信息
    async fn inspect(&self, container_id: &str, format: &str) -> Result<String, RuntimeError>;

    /// 查询容器端口映射到的主机地址，格式为 `host:port`
    async fn port(&self, container_id: &str, container_port: &str) -> Result<String, RuntimeError>;

    /// 镜像是否为 herokuish (buildpack) 构建
    async fn is_herokuish(&self, image: &str) -> Result<bool, RuntimeError>;
}

/// herokuish 镜像内置的用户环境变量
const HEROKUISH_USER_ENV: &str = "USER=herokuishuser";

/// docker CLI 实现
#[derive(Debug, Clone)]
pub struct DockerCli {
    bin: String,
}

impl DockerCli {
    pub fn new(bin: impl Into<String>) -> Self {
        Self { bin: bin.into() }
    }
}

impl Default for DockerCli {
    fn default() -> Self {
        Self::new("docker")
    }
}

#[async_trait]
impl ContainerRuntime for DockerCli {
    async fn is_running(&self, container_id: &str) -> Result<bool, RuntimeError> {
        let output = self.inspect(container_id, "{{.State.Running}}").await?;
        Ok(output.trim() == "true")
    }

    async fn inspect(&self, container_id: &str, format: &str) -> Result<String, RuntimeError> {
        let output =
            CommandRunner::run_simple(&self.bin, &["container", "inspect", "--format", format, container_id])
                .await?;
        Ok(output)
    }

    async fn port(&self, container_id: &str, container_port: &str) -> Result<String, RuntimeError> {
        let output = CommandRunner::run_simple(&self.bin, &["port", container_id, container_port]).await?;
        Ok(output)
    }

    async fn is_herokuish(&self, image: &str) -> Result<bool, RuntimeError> {
        let format = format!(
            "{{{{range .Config.Env}}}}{{{{if eq . \"{}\" }}}}{{{{println .}}}}{{{{end}}}}{{{{end}}}}",
            HEROKUISH_USER_ENV
        );
        let output =
            CommandRunner::run_simple(&self.bin, &["image", "inspect", "--format", &format, image]).await?;
        Ok(!output.trim().is_empty())
    }
}
