//! App 标识

use std::fmt;

use serde::Serialize;

use crate::error::{AppError, AppResult};

/// 经过校验的 App 名称
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct AppName(String);

impl AppName {
    /// 校验并创建 App 名称
    ///
    /// 只检查名称格式，目录是否存在由 `AppLayout::verify_app` 负责
    pub fn parse(name: &str) -> AppResult<Self> {
        if Self::is_valid(name) {
            Ok(Self(name.to_string()))
        } else {
            Err(AppError::InvalidAppName(name.to_string()))
        }
    }

    /// 首字符必须是小写字母或数字，且不能包含大写字母、`/`、`:`、`_` 或空白
    pub fn is_valid(name: &str) -> bool {
        let mut chars = name.chars();
        match chars.next() {
            Some(c) if c.is_ascii_lowercase() || c.is_ascii_digit() => {}
            _ => return false,
        }

        chars.all(|c| {
            !c.is_ascii_uppercase() && !c.is_whitespace() && !matches!(c, '/' | ':' | '_')
        })
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AppName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for AppName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
