//! App 目录布局
//!
//! ```text
//! <apps_root>/<app>/
//!   DOKKU_SCALE              # 扩缩容声明
//!   ENV                      # app 配置
//!   CONTAINER.<proc>.<n>     # 容器 ID
//!   IP.<proc>.<n>            # 已写入的 IP
//!   PORT.<proc>.<n>          # 已写入的端口
//! ```

use std::path::{Path, PathBuf};

use crate::domain::AppName;
use crate::error::{AppError, AppResult};

const SCALE_FILE: &str = "DOKKU_SCALE";
const ENV_FILE: &str = "ENV";
const CONTAINER_PREFIX: &str = "CONTAINER";

/// apps 根目录下的文件路径约定
#[derive(Debug, Clone)]
pub struct AppLayout {
    root: PathBuf,
}

impl AppLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn app_root(&self, app: &AppName) -> PathBuf {
        self.root.join(app.as_str())
    }

    pub fn scale_file(&self, app: &AppName) -> PathBuf {
        self.app_root(app).join(SCALE_FILE)
    }

    pub fn env_file(&self, app: &AppName) -> PathBuf {
        self.app_root(app).join(ENV_FILE)
    }

    pub fn container_id_file(&self, app: &AppName, proc_type: &str, index: u32) -> PathBuf {
        self.app_root(app)
            .join(format!("{}.{}.{}", CONTAINER_PREFIX, proc_type, index))
    }

    pub fn ip_file(&self, app: &AppName, proc_type: &str, index: u32) -> PathBuf {
        self.app_root(app).join(format!("IP.{}.{}", proc_type, index))
    }

    pub fn port_file(&self, app: &AppName, proc_type: &str, index: u32) -> PathBuf {
        self.app_root(app).join(format!("PORT.{}.{}", proc_type, index))
    }

    /// 确认 app 目录存在
    pub async fn verify_app(&self, app: &AppName) -> AppResult<()> {
        match tokio::fs::metadata(self.app_root(app)).await {
            Ok(meta) if meta.is_dir() => Ok(()),
            _ => Err(AppError::AppNotFound(app.to_string())),
        }
    }

    /// 存在 `CONTAINER` 或任意 `CONTAINER.<proc>.<n>` 文件即视为已部署
    pub async fn is_deployed(&self, app: &AppName) -> bool {
        let app_root = self.app_root(app);
        if let Ok(meta) = tokio::fs::metadata(app_root.join(CONTAINER_PREFIX)).await {
            if meta.is_file() {
                return true;
            }
        }

        let Ok(mut entries) = tokio::fs::read_dir(&app_root).await else {
            return false;
        };
        let slot_prefix = format!("{}.", CONTAINER_PREFIX);
        while let Ok(Some(entry)) = entries.next_entry().await {
            if entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.starts_with(&slot_prefix))
            {
                return true;
            }
        }
        false
    }

    /// 读取扩缩容声明，文件不存在或不可读时返回 None
    pub async fn read_scale(&self, app: &AppName) -> Option<String> {
        tokio::fs::read_to_string(self.scale_file(app)).await.ok()
    }
}

/// 读取文件首行（去除首尾空白），文件不存在或首行为空时返回 None
pub async fn read_first_line(path: &Path) -> Option<String> {
    let content = tokio::fs::read_to_string(path).await.ok()?;
    let line = content.lines().next()?.trim();
    (!line.is_empty()).then(|| line.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> AppName {
        AppName::parse("api").unwrap()
    }

    #[test]
    fn test_paths() {
        let layout = AppLayout::new("/home/dokku");
        assert_eq!(layout.scale_file(&app()), PathBuf::from("/home/dokku/api/DOKKU_SCALE"));
        assert_eq!(
            layout.container_id_file(&app(), "web", 2),
            PathBuf::from("/home/dokku/api/CONTAINER.web.2")
        );
        assert_eq!(layout.ip_file(&app(), "web", 1), PathBuf::from("/home/dokku/api/IP.web.1"));
        assert_eq!(
            layout.port_file(&app(), "web", 1),
            PathBuf::from("/home/dokku/api/PORT.web.1")
        );
    }

    #[tokio::test]
    async fn test_verify_and_deployed() {
        let dir = tempfile::tempdir().unwrap();
        let layout = AppLayout::new(dir.path());

        assert!(matches!(layout.verify_app(&app()).await, Err(AppError::AppNotFound(_))));
        assert!(!layout.is_deployed(&app()).await);

        std::fs::create_dir(dir.path().join("api")).unwrap();
        assert!(layout.verify_app(&app()).await.is_ok());
        assert!(!layout.is_deployed(&app()).await);

        // 其他文件不算部署
        std::fs::write(dir.path().join("api/DOKKU_SCALE"), "web=1\n").unwrap();
        assert!(!layout.is_deployed(&app()).await);

        std::fs::write(dir.path().join("api/CONTAINER.web.1"), "abc\n").unwrap();
        assert!(layout.is_deployed(&app()).await);
    }

    #[tokio::test]
    async fn test_deployed_with_legacy_container_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("api")).unwrap();
        std::fs::write(dir.path().join("api/CONTAINER"), "abc\n").unwrap();

        assert!(AppLayout::new(dir.path()).is_deployed(&app()).await);
    }

    #[tokio::test]
    async fn test_verify_rejects_plain_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("api"), "").unwrap();

        let result = AppLayout::new(dir.path()).verify_app(&app()).await;
        assert!(matches!(result, Err(AppError::AppNotFound(_))));
    }

    #[tokio::test]
    async fn test_read_first_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("CONTAINER.web.1");

        assert_eq!(read_first_line(&path).await, None);

        std::fs::write(&path, "").unwrap();
        assert_eq!(read_first_line(&path).await, None);

        std::fs::write(&path, "  abc123  \nignored\n").unwrap();
        assert_eq!(read_first_line(&path).await.as_deref(), Some("abc123"));
    }
}
