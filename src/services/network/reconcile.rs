//! 网络配置同步驱动
//!
//! 单次调用流程：
//! 1. 校验 app 名称（失败为致命错误）
//! 2. 未部署或没有扩缩容声明时静默返回
//! 3. 确定镜像类型与 proxy 模式
//! 4. 按声明顺序遍历运行中的 slot，解析 IP / 端口并逐个发送通知
//! 5. 通知失败只记录 warn，不影响其余通知

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use super::enumerator::SlotEnumerator;
use super::resolver::NetworkResolver;
use crate::config::EnvConfig;
use crate::domain::{AppName, ImageFlavor, NetworkEvent, ProxyMode, ScaleSpec, SlotBinding};
use crate::error::AppResult;
use crate::infra::{
    AppLayout, ConfigStore, ContainerRuntime, DockerCli, EnvFileConfig, NotificationSink,
    PluginTrigger, ProxyStatus,
};

/// 本次调用的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PassOutcome {
    /// app 尚未部署
    NotDeployed,
    /// 没有扩缩容声明文件
    NoScaleFile,
    /// 完成同步
    Reconciled,
}

/// 同步报告
#[derive(Debug, Clone, Serialize)]
pub struct ReconcileReport {
    pub app: AppName,
    pub outcome: PassOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy: Option<ProxyMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flavor: Option<ImageFlavor>,
    /// 所有运行中的 slot，非 web 进程的 binding 为空
    pub bindings: Vec<SlotBinding>,
    pub emitted: usize,
    pub failed: usize,
}

impl ReconcileReport {
    fn skipped(app: AppName, outcome: PassOutcome) -> Self {
        Self {
            app,
            outcome,
            proxy: None,
            flavor: None,
            bindings: Vec::new(),
            emitted: 0,
            failed: 0,
        }
    }
}

/// 网络配置同步器
pub struct NetworkReconciler {
    layout: AppLayout,
    runtime: Arc<dyn ContainerRuntime>,
    proxy: Arc<dyn ProxyStatus>,
    sink: Arc<dyn NotificationSink>,
    enumerator: SlotEnumerator,
    resolver: NetworkResolver,
    image_repo: String,
}

impl NetworkReconciler {
    pub fn new(
        layout: AppLayout,
        runtime: Arc<dyn ContainerRuntime>,
        config: Arc<dyn ConfigStore>,
        proxy: Arc<dyn ProxyStatus>,
        sink: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            enumerator: SlotEnumerator::new(layout.clone(), runtime.clone()),
            resolver: NetworkResolver::new(runtime.clone(), config),
            layout,
            runtime,
            proxy,
            sink,
            image_repo: "dokku".to_string(),
        }
    }

    /// 使用 docker CLI、ENV 文件与插件触发器创建
    pub fn from_env(config: &EnvConfig) -> AppResult<Self> {
        let layout = AppLayout::new(config.require_root()?);
        let app_config = Arc::new(EnvFileConfig::new(layout.clone()));

        Ok(Self::new(
            layout,
            Arc::new(DockerCli::new(&config.docker_bin)),
            app_config.clone(),
            app_config,
            Arc::new(PluginTrigger::new(&config.trigger_bin)),
        )
        .with_image_repo(&config.image_repo))
    }

    pub fn with_image_repo(mut self, repo: impl Into<String>) -> Self {
        self.image_repo = repo.into();
        self
    }

    /// 部署后的镜像名
    pub fn image_name(&self, app: &AppName) -> String {
        format!("{}/{}:latest", self.image_repo, app)
    }

    /// 同步网络配置并发送通知
    pub async fn build_config(&self, app: &str) -> AppResult<ReconcileReport> {
        self.run_pass(app, true).await
    }

    /// 只计算绑定，不发送通知
    pub async fn inspect(&self, app: &str) -> AppResult<ReconcileReport> {
        self.run_pass(app, false).await
    }

    async fn run_pass(&self, app: &str, emit: bool) -> AppResult<ReconcileReport> {
        let app = AppName::parse(app)?;
        self.layout.verify_app(&app).await?;

        if !self.layout.is_deployed(&app).await {
            return Ok(ReconcileReport::skipped(app, PassOutcome::NotDeployed));
        }

        let Some(scale) = self.layout.read_scale(&app).await else {
            return Ok(ReconcileReport::skipped(app, PassOutcome::NoScaleFile));
        };
        let scale = ScaleSpec::parse(&scale);

        let flavor = self.image_flavor(&app).await;
        let proxy = self.proxy.mode(&app).await;

        info!(app = %app, "Ensuring network configuration is in sync for {}", app);

        let mut report = ReconcileReport {
            proxy: Some(proxy),
            flavor: Some(flavor),
            ..ReconcileReport::skipped(app.clone(), PassOutcome::Reconciled)
        };

        for entry in scale.entries() {
            let slots = self
                .enumerator
                .live_slots(&app, &entry.proc_type, entry.count)
                .await;

            for slot in slots {
                let binding = self.resolver.resolve(&app, &slot, proxy, flavor).await;
                let slot_binding = SlotBinding { slot, binding };

                if emit {
                    for event in NetworkEvent::from_binding(app.as_str(), &slot_binding) {
                        match self.sink.emit(&event).await {
                            Ok(()) => report.emitted += 1,
                            Err(e) => {
                                report.failed += 1;
                                warn!(
                                    app = %app,
                                    proc_type = %event.proc_type,
                                    index = event.index,
                                    trigger = event.kind.trigger_name(),
                                    error = %e,
                                    "Failed to emit network event"
                                );
                            }
                        }
                    }
                }

                report.bindings.push(slot_binding);
            }
        }

        Ok(report)
    }

    /// 查询失败时按 Dockerfile 镜像处理
    async fn image_flavor(&self, app: &AppName) -> ImageFlavor {
        let image = self.image_name(app);
        match self.runtime.is_herokuish(&image).await {
            Ok(herokuish) => ImageFlavor::from_herokuish(herokuish),
            Err(e) => {
                warn!(app = %app, image = %image, error = %e, "Failed to inspect image");
                ImageFlavor::Dockerfile
            }
        }
    }
}
