//! 命令执行器
//!
//! 运行时查询与插件触发器都是一次性的外部进程调用：
//! - 捕获 stdout 作为结果
//! - 非零退出码连同 stderr 作为错误返回
//! - 不设超时，超时策略属于被调用方

use thiserror::Error;
use tokio::process::Command;

/// 命令执行器
pub struct CommandRunner;

/// 命令执行错误
#[derive(Debug, Error)]
pub enum CommandError {
    /// 命令启动失败
    #[error("Failed to spawn {program}: {source}")]
    SpawnFailed {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// 命令以非零状态退出
    #[error("{program} exited with {code:?}: {stderr}")]
    Failed {
        program: String,
        code: Option<i32>,
        stderr: String,
    },
}

impl CommandRunner {
    /// 执行简单命令并返回 stdout
    pub async fn run_simple(program: &str, args: &[&str]) -> Result<String, CommandError> {
        tracing::trace!(program, ?args, "Running command");

        let output = Command::new(program)
            .args(args)
            .output()
            .await
            .map_err(|source| CommandError::SpawnFailed {
                program: program.to_string(),
                source,
            })?;

        if !output.status.success() {
            return Err(CommandError::Failed {
                program: program.to_string(),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
