//! 容器网络地址解析
//!
//! 只有 `web` 进程会得到 IP / 端口，其他进程类型直接返回空，不访问运行时。

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::network::{
    candidate_port, parse_host_port, LOOPBACK_ADDRESS, WEB_PROCESS,
};
use crate::domain::{AppName, ContainerSlot, ImageFlavor, NetworkBinding, ProxyMode};
use crate::infra::app_config::DOCKERFILE_PORTS_KEY;
use crate::infra::{ConfigStore, ContainerRuntime};

/// 容器 IP 查询方式，按顺序尝试
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressStrategy {
    /// 多网络 (docker >= 1.9)
    Networks,
    /// 单网络，兼容旧版本 docker
    Legacy,
}

impl AddressStrategy {
    pub const DEFAULT_ORDER: [AddressStrategy; 2] =
        [AddressStrategy::Networks, AddressStrategy::Legacy];

    /// inspect 使用的 Go template
    pub fn format(self) -> &'static str {
        match self {
            AddressStrategy::Networks => "{{range .NetworkSettings.Networks}}{{.IPAddress}}{{end}}",
            AddressStrategy::Legacy => "{{.NetworkSettings.IPAddress}}",
        }
    }
}

/// IP / 端口解析器
pub struct NetworkResolver {
    runtime: Arc<dyn ContainerRuntime>,
    config: Arc<dyn ConfigStore>,
    strategies: Vec<AddressStrategy>,
}

impl NetworkResolver {
    pub fn new(runtime: Arc<dyn ContainerRuntime>, config: Arc<dyn ConfigStore>) -> Self {
        Self {
            runtime,
            config,
            strategies: AddressStrategy::DEFAULT_ORDER.to_vec(),
        }
    }

    /// 替换 IP 查询策略列表
    pub fn with_strategies(mut self, strategies: Vec<AddressStrategy>) -> Self {
        self.strategies = strategies;
        self
    }

    /// 解析一个 slot 的 IP 与端口
    pub async fn resolve(
        &self,
        app: &AppName,
        slot: &ContainerSlot,
        proxy: ProxyMode,
        flavor: ImageFlavor,
    ) -> NetworkBinding {
        NetworkBinding {
            address: self
                .resolve_address(&slot.proc_type, &slot.container_id, proxy)
                .await,
            port: self
                .resolve_port(app, &slot.proc_type, &slot.container_id, proxy, flavor)
                .await,
        }
    }

    /// 解析容器 IP
    ///
    /// 未启用 proxy 时流量经主机回环地址上的映射端口到达容器，直接返回 127.0.0.1
    pub async fn resolve_address(
        &self,
        proc_type: &str,
        container_id: &str,
        proxy: ProxyMode,
    ) -> Option<String> {
        if proc_type != WEB_PROCESS {
            return None;
        }

        if !proxy.is_enabled() {
            return Some(LOOPBACK_ADDRESS.to_string());
        }

        for strategy in &self.strategies {
            match self.runtime.inspect(container_id, strategy.format()).await {
                Ok(output) => {
                    let address = output.trim();
                    if !address.is_empty() {
                        return Some(address.to_string());
                    }
                    debug!(container = %container_id, ?strategy, "Empty address, trying next strategy");
                }
                Err(e) => {
                    warn!(container = %container_id, ?strategy, error = %e, "Failed to inspect container address");
                }
            }
        }

        None
    }

    /// 解析对外公布的端口
    ///
    /// 启用 proxy 时公布容器内端口；否则公布主机映射端口，查询失败时退回容器内端口
    pub async fn resolve_port(
        &self,
        app: &AppName,
        proc_type: &str,
        container_id: &str,
        proxy: ProxyMode,
        flavor: ImageFlavor,
    ) -> Option<String> {
        if proc_type != WEB_PROCESS {
            return None;
        }

        let declared = match flavor {
            ImageFlavor::Dockerfile => self.config.get(app, DOCKERFILE_PORTS_KEY).await,
            ImageFlavor::Herokuish => None,
        };
        let Some(candidate) = candidate_port(flavor, declared.as_deref()) else {
            debug!(app = %app, "No tcp port declared");
            return None;
        };

        if proxy.is_enabled() {
            return Some(candidate);
        }

        match self.runtime.port(container_id, &candidate).await {
            Ok(output) => match parse_host_port(&output) {
                Some(host_port) => Some(host_port),
                None => {
                    warn!(container = %container_id, port = %candidate, output = %output.trim(), "Unexpected port mapping output");
                    Some(candidate)
                }
            },
            Err(e) => {
                warn!(container = %container_id, port = %candidate, error = %e, "Failed to query port mapping");
                Some(candidate)
            }
        }
    }
}
