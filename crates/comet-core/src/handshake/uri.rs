use alloc::string::String;
use core::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{HandshakeError, codes};

/// `EndpointUri` 表示 WebSocket 端点的绝对 URI，构造期完成全部校验。
///
/// # 设计背景（Why）
/// - 握手记录要求 `uri` 字段"必填且合法"；将校验收敛到值对象工厂，
///   使记录本身的构造无需再返回 `Result`，对象一旦存在即合法。
/// - 解析时仅记录各组成部分的偏移量而不切分字符串，保持单次分配、
///   访问器零拷贝的借用语义。
///
/// # 契约说明（What）
/// - 接受形如 `scheme://authority[/path][?query][#fragment]` 的绝对 URI；
/// - `scheme` 以 ASCII 字母开头，仅含字母、数字与 `+`、`-`、`.`；
/// - `authority` 不得为空；`path`、`query`、`fragment` 均可缺省；
/// - 校验失败返回 [`HandshakeError`]，错误码见 [`codes`]，不产生部分对象。
///
/// # 设计取舍（Trade-offs）
/// - 不做百分号解码、IDN 归一化等深度处理：记录只负责携带协商结果，
///   语义级归一化属于上游协商组件的职责。
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct EndpointUri {
    raw: String,
    scheme_end: usize,
    authority_end: usize,
    path_end: usize,
    query: Option<(usize, usize)>,
}

impl EndpointUri {
    /// 解析并校验绝对 URI。
    ///
    /// # 契约
    /// - **参数**：`raw` 为完整 URI 文本，所有权转入本值对象；
    /// - **返回值**：校验通过返回 `EndpointUri`；否则返回携带稳定错误码的
    ///   [`HandshakeError`]，并在消息中指明被拒绝的原因；
    /// - **后置条件**：`as_str()` 与传入文本逐字节一致。
    pub fn parse(raw: impl Into<String>) -> Result<Self, HandshakeError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(HandshakeError::new(
                codes::URI_EMPTY,
                "uri must not be empty",
            ));
        }
        let scheme_end = raw.find(':').ok_or_else(|| {
            HandshakeError::new(
                codes::URI_RELATIVE,
                "uri must be absolute: missing scheme",
            )
        })?;
        let scheme = &raw[..scheme_end];
        let valid_scheme = scheme
            .as_bytes()
            .first()
            .is_some_and(|b| b.is_ascii_alphabetic())
            && scheme
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'+' | b'-' | b'.'));
        if !valid_scheme {
            return Err(HandshakeError::new(
                codes::URI_SCHEME_INVALID,
                "uri scheme must start with a letter and contain only letters, digits, '+', '-' or '.'",
            ));
        }
        let after_scheme = &raw[scheme_end + 1..];
        let Some(rest) = after_scheme.strip_prefix("//") else {
            return Err(HandshakeError::new(
                codes::URI_AUTHORITY_MISSING,
                "uri must carry an authority introduced by '//'",
            ));
        };
        let authority_start = scheme_end + 3;
        let authority_len = rest
            .find(['/', '?', '#'])
            .unwrap_or(rest.len());
        if authority_len == 0 {
            return Err(HandshakeError::new(
                codes::URI_AUTHORITY_MISSING,
                "uri authority must not be empty",
            ));
        }
        let authority_end = authority_start + authority_len;
        let tail = &raw[authority_end..];
        let path_len = tail.find(['?', '#']).unwrap_or(tail.len());
        let path_end = authority_end + path_len;
        let query = match raw[path_end..].strip_prefix('?') {
            Some(after_mark) => {
                let start = path_end + 1;
                let end = start + after_mark.find('#').unwrap_or(after_mark.len());
                Some((start, end))
            }
            None => None,
        };
        Ok(Self {
            raw,
            scheme_end,
            authority_end,
            path_end,
            query,
        })
    }

    /// 获取完整 URI 文本。
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// 获取 scheme（不含 `:`）。
    pub fn scheme(&self) -> &str {
        &self.raw[..self.scheme_end]
    }

    /// 获取 authority（主机与可选端口）。
    pub fn authority(&self) -> &str {
        &self.raw[self.scheme_end + 3..self.authority_end]
    }

    /// 获取路径部分；URI 未携带路径时返回空字符串。
    pub fn path(&self) -> &str {
        &self.raw[self.authority_end..self.path_end]
    }

    /// 获取查询串（不含 `?`）；未携带时返回 `None`。
    pub fn query(&self) -> Option<&str> {
        self.query.map(|(start, end)| &self.raw[start..end])
    }

    /// 判断端点是否运行在加密通道上（`wss` 或 `https`）。
    pub fn is_secure(&self) -> bool {
        self.scheme().eq_ignore_ascii_case("wss") || self.scheme().eq_ignore_ascii_case("https")
    }
}

impl fmt::Display for EndpointUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl fmt::Debug for EndpointUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EndpointUri").field(&self.raw).finish()
    }
}

impl AsRef<str> for EndpointUri {
    fn as_ref(&self) -> &str {
        &self.raw
    }
}

impl Serialize for EndpointUri {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for EndpointUri {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_components_of_a_full_uri() {
        let uri = EndpointUri::parse("ws://gateway.example:8080/rooms/42?token=abc#frag").unwrap();
        assert_eq!(uri.scheme(), "ws");
        assert_eq!(uri.authority(), "gateway.example:8080");
        assert_eq!(uri.path(), "/rooms/42");
        assert_eq!(uri.query(), Some("token=abc"));
        assert!(!uri.is_secure());
        assert_eq!(uri.as_str(), "ws://gateway.example:8080/rooms/42?token=abc#frag");
    }

    #[test]
    fn pathless_uri_reads_back_empty_path() {
        let uri = EndpointUri::parse("wss://example.com").unwrap();
        assert_eq!(uri.authority(), "example.com");
        assert_eq!(uri.path(), "");
        assert_eq!(uri.query(), None);
        assert!(uri.is_secure());
    }

    #[test]
    fn empty_input_is_rejected() {
        let err = EndpointUri::parse("").unwrap_err();
        assert_eq!(err.code(), codes::URI_EMPTY);
    }

    #[test]
    fn relative_reference_is_rejected() {
        let err = EndpointUri::parse("/chat").unwrap_err();
        assert_eq!(err.code(), codes::URI_RELATIVE);
    }

    #[test]
    fn malformed_scheme_is_rejected() {
        assert_eq!(
            EndpointUri::parse("1ws://example.com").unwrap_err().code(),
            codes::URI_SCHEME_INVALID
        );
        assert_eq!(
            EndpointUri::parse("://example.com").unwrap_err().code(),
            codes::URI_SCHEME_INVALID
        );
    }

    #[test]
    fn missing_authority_is_rejected() {
        assert_eq!(
            EndpointUri::parse("wss://").unwrap_err().code(),
            codes::URI_AUTHORITY_MISSING
        );
        assert_eq!(
            EndpointUri::parse("mailto:ops@example.com").unwrap_err().code(),
            codes::URI_AUTHORITY_MISSING
        );
    }

    #[test]
    fn query_stops_at_fragment() {
        let uri = EndpointUri::parse("ws://h/p?q=1#f?bogus").unwrap();
        assert_eq!(uri.query(), Some("q=1"));
    }
}
