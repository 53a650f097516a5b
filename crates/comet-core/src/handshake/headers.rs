use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use serde::{Deserialize, Serialize};

/// 单个头部条目：一个名字与按接收顺序保存的一个或多个值。
///
/// # 契约说明（What）
/// - `name` 保留首次出现时的原始大小写，匹配时按 ASCII 大小写不敏感处理；
/// - `values` 至少含一个元素，顺序即协商层写入顺序。
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderEntry {
    name: String,
    values: Vec<String>,
}

impl HeaderEntry {
    /// 获取头部名（原始大小写）。
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 获取该名字下的全部值。
    pub fn values(&self) -> &[String] {
        &self.values
    }
}

/// `HandshakeHeaders` 是握手期间交换的 HTTP 头部的有序多值映射。
///
/// # 设计背景（Why）
/// - 服务端会话存放升级请求头，客户端会话存放升级响应头；两侧共用同一容器；
/// - 采用"条目向量 + 线性查找"而非哈希表：握手头部数量通常在十余个以内，
///   线性查找开销可忽略，却天然保留插入顺序并支持按序回放；
/// - 名字匹配按 ASCII 大小写不敏感执行，与 HTTP 字段名语义一致。
///
/// # 契约说明（What）
/// - [`insert`](Self::insert) 覆盖同名条目的全部旧值；[`append`](Self::append)
///   追加一个值，名字首次出现时在尾部建立新条目；
/// - [`get`](Self::get) 返回首个值，[`all`](Self::all) 返回全部值；
/// - 容器本身不校验名字与值的语法：记录是被动载体，语法合法性由产生
///   头部的协商层负责。
///
/// # 线程安全
/// - 嵌入握手记录后不再变更，任意数量的并发读者无需同步即可安全访问。
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandshakeHeaders {
    entries: Vec<HeaderEntry>,
}

impl HandshakeHeaders {
    /// 创建空容器。
    pub fn new() -> Self {
        Self::default()
    }

    /// 覆盖写入：清除同名条目的旧值后写入单个值。
    ///
    /// # 契约
    /// - 名字已存在时保留首次出现的大小写，仅替换值列表；
    /// - 名字不存在时在尾部建立新条目。
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.position(&name) {
            Some(index) => self.entries[index].values = vec![value],
            None => self.entries.push(HeaderEntry {
                name,
                values: vec![value],
            }),
        }
    }

    /// 追加写入：在同名条目尾部增加一个值，条目不存在时先建立。
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.position(&name) {
            Some(index) => self.entries[index].values.push(value),
            None => self.entries.push(HeaderEntry {
                name,
                values: vec![value],
            }),
        }
    }

    /// 获取指定名字的首个值；名字不存在时返回 `None`。
    pub fn get(&self, name: &str) -> Option<&str> {
        self.position(name)
            .and_then(|index| self.entries[index].values.first())
            .map(String::as_str)
    }

    /// 获取指定名字的全部值；名字不存在时返回空切片。
    pub fn all(&self, name: &str) -> &[String] {
        self.position(name)
            .map(|index| self.entries[index].values.as_slice())
            .unwrap_or(&[])
    }

    /// 判断名字是否存在。
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// 获取不同名字的数量。
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 判断容器是否为空。
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 按插入顺序遍历条目。
    pub fn iter(&self) -> core::slice::Iter<'_, HeaderEntry> {
        self.entries.iter()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.name.eq_ignore_ascii_case(name))
    }
}

impl<'a> IntoIterator for &'a HandshakeHeaders {
    type Item = &'a HeaderEntry;
    type IntoIter = core::slice::Iter<'a, HeaderEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for HandshakeHeaders {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(pairs: I) -> Self {
        let mut headers = Self::new();
        for (name, value) in pairs {
            headers.append(name, value);
        }
        headers
    }
}

impl fmt::Display for HandshakeHeaders {
    /// 日志友好的渲染：`{Name: [v1, v2], ...}`，仅用于排障关联，非线上格式。
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (index, entry) in self.entries.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: [", entry.name)?;
            for (value_index, value) in entry.values.iter().enumerate() {
                if value_index > 0 {
                    f.write_str(", ")?;
                }
                f.write_str(value)?;
            }
            f.write_str("]")?;
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_matching_ignores_ascii_case() {
        let mut headers = HandshakeHeaders::new();
        headers.insert("Sec-WebSocket-Protocol", "chat");
        assert_eq!(headers.get("sec-websocket-protocol"), Some("chat"));
        assert!(headers.contains("SEC-WEBSOCKET-PROTOCOL"));
    }

    #[test]
    fn append_accumulates_and_insert_replaces() {
        let mut headers = HandshakeHeaders::new();
        headers.append("Via", "proxy-a");
        headers.append("via", "proxy-b");
        assert_eq!(headers.all("Via"), ["proxy-a", "proxy-b"]);

        headers.insert("VIA", "proxy-c");
        assert_eq!(headers.all("Via"), ["proxy-c"]);
        assert_eq!(headers.len(), 1);
    }

    #[test]
    fn insertion_order_is_preserved() {
        let headers: HandshakeHeaders = [
            ("Host", "example.com"),
            ("Upgrade", "websocket"),
            ("Connection", "Upgrade"),
        ]
        .into_iter()
        .collect();
        let names: Vec<&str> = headers.iter().map(HeaderEntry::name).collect();
        assert_eq!(names, ["Host", "Upgrade", "Connection"]);
    }

    #[test]
    fn absent_name_yields_empty_views() {
        let headers = HandshakeHeaders::new();
        assert_eq!(headers.get("Host"), None);
        assert!(headers.all("Host").is_empty());
        assert!(headers.is_empty());
    }

    #[test]
    fn display_renders_names_and_values() {
        let mut headers = HandshakeHeaders::new();
        headers.append("Host", "example.com");
        headers.append("Via", "a");
        headers.append("Via", "b");
        assert_eq!(
            alloc::format!("{headers}"),
            "{Host: [example.com], Via: [a, b]}"
        );
    }
}
