//! 网络配置存在性检查

use crate::domain::network::WEB_PROCESS;
use crate::domain::AppName;
use crate::infra::AppLayout;

/// web.1 的 IP 与端口文件是否都已写入
pub fn has_network_config(layout: &AppLayout, app: &AppName) -> bool {
    layout.ip_file(app, WEB_PROCESS, 1).exists() && layout.port_file(app, WEB_PROCESS, 1).exists()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::network::fakes::AppDir;

    #[test]
    fn test_requires_both_files() {
        let dir = AppDir::new("api");
        assert!(!has_network_config(&dir.layout(), &dir.app()));

        dir.write("IP.web.1", "172.17.0.2");
        assert!(!has_network_config(&dir.layout(), &dir.app()));

        dir.write("PORT.web.1", "5000");
        assert!(has_network_config(&dir.layout(), &dir.app()));
    }

    #[test]
    fn test_ignores_other_slots() {
        let dir = AppDir::new("api");
        dir.write("IP.web.2", "172.17.0.3");
        dir.write("PORT.web.2", "5000");
        dir.write("IP.worker.1", "172.17.0.4");
        dir.write("PORT.worker.1", "5000");

        assert!(!has_network_config(&dir.layout(), &dir.app()));
    }
}
