//! 网络绑定相关领域模型

use serde::Serialize;

/// 唯一参与网络配置的进程类型
pub const WEB_PROCESS: &str = "web";

/// 未启用 proxy 时对外公布的地址
pub const LOOPBACK_ADDRESS: &str = "127.0.0.1";

/// herokuish 镜像固定监听的端口，也是未声明端口时的默认值
pub const DEFAULT_PORT: &str = "5000";

/// 容器是否位于反向代理之后
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProxyMode {
    Enabled,
    Disabled,
}

impl ProxyMode {
    pub fn from_enabled(enabled: bool) -> Self {
        if enabled {
            ProxyMode::Enabled
        } else {
            ProxyMode::Disabled
        }
    }

    pub fn is_enabled(self) -> bool {
        self == ProxyMode::Enabled
    }
}

/// 镜像构建方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFlavor {
    /// buildpack (herokuish) 镜像，固定监听 5000
    Herokuish,
    /// Dockerfile 镜像，端口来自 DOKKU_DOCKERFILE_PORTS
    Dockerfile,
}

impl ImageFlavor {
    pub fn from_herokuish(herokuish: bool) -> Self {
        if herokuish {
            ImageFlavor::Herokuish
        } else {
            ImageFlavor::Dockerfile
        }
    }
}

/// 一个运行中的容器副本
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContainerSlot {
    pub proc_type: String,
    /// 从 1 开始
    pub index: u32,
    pub container_id: String,
}

/// 容器的 (IP, 端口)，两个字段独立上报
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NetworkBinding {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<String>,
}

/// 某个 slot 计算出的绑定
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotBinding {
    #[serde(flatten)]
    pub slot: ContainerSlot,
    #[serde(flatten)]
    pub binding: NetworkBinding,
}

/// 通知事件类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    AddressChanged,
    PortChanged,
}

impl EventKind {
    /// 对应的插件触发器名称
    pub fn trigger_name(self) -> &'static str {
        match self {
            EventKind::AddressChanged => "network-write-ipaddr",
            EventKind::PortChanged => "network-write-port",
        }
    }
}

/// 发往通知接收方的事件
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkEvent {
    pub kind: EventKind,
    pub app: String,
    pub proc_type: String,
    pub index: u32,
    pub value: String,
}

impl NetworkEvent {
    /// 按 binding 中非空字段生成事件，地址在前
    pub fn from_binding(app: &str, slot_binding: &SlotBinding) -> Vec<Self> {
        let slot = &slot_binding.slot;
        let fields = [
            (EventKind::AddressChanged, &slot_binding.binding.address),
            (EventKind::PortChanged, &slot_binding.binding.port),
        ];

        fields
            .into_iter()
            .filter_map(|(kind, value)| {
                value.as_ref().map(|value| NetworkEvent {
                    kind,
                    app: app.to_string(),
                    proc_type: slot.proc_type.clone(),
                    index: slot.index,
                    value: value.clone(),
                })
            })
            .collect()
    }
}

/// 计算候选容器端口
///
/// Dockerfile 镜像取 `declared_ports`（空格分隔，可带 `/tcp` 或 `/udp`）中第一个
/// 非 UDP 的端口；未声明或 herokuish 镜像使用 5000。声明了端口但全部为 UDP 时返回 None。
pub fn candidate_port(flavor: ImageFlavor, declared_ports: Option<&str>) -> Option<String> {
    let declared = match flavor {
        ImageFlavor::Herokuish => None,
        ImageFlavor::Dockerfile => declared_ports.filter(|v| !v.trim().is_empty()),
    };

    let Some(declared) = declared else {
        return Some(DEFAULT_PORT.to_string());
    };

    declared
        .split_whitespace()
        .filter(|p| !p.ends_with("/udp"))
        .map(|p| p.strip_suffix("/tcp").unwrap_or(p))
        .find(|p| !p.is_empty())
        .map(str::to_string)
}

/// 从 `docker port` 的输出（`host:port`）中提取主机端口
///
/// 多行输出（IPv4 + IPv6）只取第一行
pub fn parse_host_port(output: &str) -> Option<String> {
    let line = output.lines().map(str::trim).find(|l| !l.is_empty())?;
    let (_, port) = line.rsplit_once(':')?;
    let port = port.trim();
    (!port.is_empty()).then(|| port.to_string())
}
