//! 测试用的内存实现

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use tempfile::TempDir;

use crate::domain::{AppName, NetworkEvent};
use crate::infra::command::CommandError;
use crate::infra::{
    AppLayout, ConfigStore, ContainerRuntime, NotificationSink, ProxyStatus, RuntimeError,
    TriggerError,
};

/// 临时 apps 根目录，内含一个 app
pub struct AppDir {
    dir: TempDir,
    name: String,
}

impl AppDir {
    pub fn new(name: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join(name)).unwrap();
        Self {
            dir,
            name: name.to_string(),
        }
    }

    pub fn app(&self) -> AppName {
        AppName::parse(&self.name).unwrap()
    }

    pub fn layout(&self) -> AppLayout {
        AppLayout::new(self.dir.path())
    }

    pub fn write(&self, file: &str, content: &str) {
        std::fs::write(self.dir.path().join(&self.name).join(file), content).unwrap();
    }

    pub fn container(&self, proc_type: &str, index: u32, id: &str) {
        self.write(&format!("CONTAINER.{proc_type}.{index}"), &format!("{id}\n"));
    }

    pub fn scale(&self, content: &str) {
        self.write("DOKKU_SCALE", content);
    }
}

/// 可编程的容器运行时，记录每次调用
#[derive(Default)]
pub struct FakeRuntime {
    running: HashSet<String>,
    failing_state: HashSet<String>,
    inspect: HashMap<(String, String), Option<String>>,
    ports: HashMap<(String, String), Option<String>>,
    herokuish: bool,
    calls: Mutex<Vec<String>>,
}

impl FakeRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn running(mut self, ids: &[&str]) -> Self {
        self.running.extend(ids.iter().map(|id| id.to_string()));
        self
    }

    pub fn failing_state(mut self, id: &str) -> Self {
        self.failing_state.insert(id.to_string());
        self
    }

    pub fn inspect_ok(mut self, id: &str, format: &str, output: &str) -> Self {
        self.inspect
            .insert((id.to_string(), format.to_string()), Some(output.to_string()));
        self
    }

    pub fn inspect_err(mut self, id: &str, format: &str) -> Self {
        self.inspect.insert((id.to_string(), format.to_string()), None);
        self
    }

    pub fn port_ok(mut self, id: &str, port: &str, output: &str) -> Self {
        self.ports
            .insert((id.to_string(), port.to_string()), Some(output.to_string()));
        self
    }

    pub fn port_err(mut self, id: &str, port: &str) -> Self {
        self.ports.insert((id.to_string(), port.to_string()), None);
        self
    }

    pub fn herokuish(mut self, herokuish: bool) -> Self {
        self.herokuish = herokuish;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

/// docker 对未知容器的失败输出
pub fn no_such_container(container_id: &str) -> RuntimeError {
    RuntimeError::Command(CommandError::Failed {
        program: "docker".to_string(),
        code: Some(1),
        stderr: format!("Error: No such container: {container_id}"),
    })
}

#[async_trait]
impl ContainerRuntime for FakeRuntime {
    async fn is_running(&self, container_id: &str) -> Result<bool, RuntimeError> {
        self.record(format!("is_running {container_id}"));
        if self.failing_state.contains(container_id) {
            return Err(no_such_container(container_id));
        }
        Ok(self.running.contains(container_id))
    }

    async fn inspect(&self, container_id: &str, format: &str) -> Result<String, RuntimeError> {
        self.record(format!("inspect {container_id} {format}"));
        self.inspect
            .get(&(container_id.to_string(), format.to_string()))
            .cloned()
            .flatten()
            .ok_or_else(|| no_such_container(container_id))
    }

    async fn port(&self, container_id: &str, container_port: &str) -> Result<String, RuntimeError> {
        self.record(format!("port {container_id} {container_port}"));
        self.ports
            .get(&(container_id.to_string(), container_port.to_string()))
            .cloned()
            .flatten()
            .ok_or_else(|| no_such_container(container_id))
    }

    async fn is_herokuish(&self, image: &str) -> Result<bool, RuntimeError> {
        self.record(format!("is_herokuish {image}"));
        Ok(self.herokuish)
    }
}

/// 内存配置
#[derive(Default)]
pub struct FakeConfig {
    values: HashMap<(String, String), String>,
}

impl FakeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, app: &str, key: &str, value: &str) -> Self {
        self.values
            .insert((app.to_string(), key.to_string()), value.to_string());
        self
    }
}

#[async_trait]
impl ConfigStore for FakeConfig {
    async fn get(&self, app: &AppName, key: &str) -> Option<String> {
        self.values
            .get(&(app.to_string(), key.to_string()))
            .cloned()
    }
}

/// 固定的 proxy 状态
pub struct FakeProxy(pub bool);

#[async_trait]
impl ProxyStatus for FakeProxy {
    async fn is_enabled(&self, _app: &AppName) -> bool {
        self.0
    }
}

/// 记录事件的接收方，可指定对某些值返回失败
#[derive(Default)]
pub struct RecordingSink {
    failing_values: HashSet<String>,
    attempts: Mutex<Vec<NetworkEvent>>,
    delivered: Mutex<Vec<NetworkEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(mut self, value: &str) -> Self {
        self.failing_values.insert(value.to_string());
        self
    }

    pub fn attempts(&self) -> Vec<NetworkEvent> {
        self.attempts.lock().unwrap().clone()
    }

    pub fn delivered(&self) -> Vec<NetworkEvent> {
        self.delivered.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationSink for RecordingSink {
    async fn emit(&self, event: &NetworkEvent) -> Result<(), TriggerError> {
        self.attempts.lock().unwrap().push(event.clone());
        if self.failing_values.contains(&event.value) {
            return Err(TriggerError::Command(CommandError::Failed {
                program: "plugn".to_string(),
                code: Some(1),
                stderr: "trigger failed".to_string(),
            }));
        }
        self.delivered.lock().unwrap().push(event.clone());
        Ok(())
    }
}
