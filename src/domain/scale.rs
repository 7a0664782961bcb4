//! 进程扩缩容声明解析
//!
//! 格式为逐行 `proc_type=count`，例如：
//!
//! ```text
//! # comment
//! web=2
//! worker=1
//! ```
//!
//! 每一行独立判定为 `Entry` 或 `Skip`，不合法的行被静默跳过。
//! 只去除整行首尾空白，`=` 两侧的空白原样保留：`web= 2` 不是合法数量，
//! `web =2` 的进程类型是 `"web "`。

use serde::Serialize;

/// 单个进程类型的期望副本数
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScaleEntry {
    pub proc_type: String,
    pub count: u32,
}

/// 跳过原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// 空行
    Blank,
    /// `#` 开头的注释
    Comment,
    /// 没有 `=`
    MissingSeparator,
    /// 多于一个 `=`
    ExtraSeparator,
    /// 右侧不是非负整数
    InvalidCount,
}

/// 单行解析结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScaleLine {
    Entry(ScaleEntry),
    Skip(SkipReason),
}

/// 解析一行扩缩容声明
pub fn parse_line(line: &str) -> ScaleLine {
    let line = line.trim();
    if line.is_empty() {
        return ScaleLine::Skip(SkipReason::Blank);
    }
    if line.starts_with('#') {
        return ScaleLine::Skip(SkipReason::Comment);
    }

    let mut parts = line.split('=');
    let (proc_type, count) = match (parts.next(), parts.next(), parts.next()) {
        (Some(proc_type), Some(count), None) => (proc_type, count),
        (_, None, _) => return ScaleLine::Skip(SkipReason::MissingSeparator),
        _ => return ScaleLine::Skip(SkipReason::ExtraSeparator),
    };

    match count.parse::<u32>() {
        Ok(count) => ScaleLine::Entry(ScaleEntry {
            proc_type: proc_type.to_string(),
            count,
        }),
        Err(_) => ScaleLine::Skip(SkipReason::InvalidCount),
    }
}

/// 扩缩容声明，保持输入行顺序
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScaleSpec {
    entries: Vec<ScaleEntry>,
}

impl ScaleSpec {
    /// 解析完整文件内容
    pub fn parse(content: &str) -> Self {
        Self::from_lines(content.lines())
    }

    pub fn from_lines<'a>(lines: impl IntoIterator<Item = &'a str>) -> Self {
        let entries = lines
            .into_iter()
            .filter_map(|line| match parse_line(line) {
                ScaleLine::Entry(entry) => Some(entry),
                ScaleLine::Skip(reason) => {
                    tracing::trace!(?reason, line, "Skipping scale line");
                    None
                }
            })
            .collect();

        Self { entries }
    }

    pub fn entries(&self) -> &[ScaleEntry] {
        &self.entries
    }
}
