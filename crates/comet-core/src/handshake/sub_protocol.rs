use alloc::string::String;
use core::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{HandshakeError, codes};

/// `SubProtocol` 是握手协商出的 WebSocket 子协议名（RFC 6455 §1.9）。
///
/// # 契约说明（What）
/// - 名字必须是非空的 HTTP token：仅含字母、数字与
///   `! # $ % & ' * + - . ^ _ ` | ~`；
/// - "未协商出子协议"不由本类型表达，而由记录中的 `Option<SubProtocol>`
///   的 `None` 表达；因此空字符串在此处一律视为非法参数。
///
/// # 设计取舍（Trade-offs）
/// - 不维护已注册子协议名录：注册表归 IANA 管理且允许私有名字，
///   语法校验之外的合法性由协商双方自行约定。
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SubProtocol(String);

impl SubProtocol {
    /// 校验并包装子协议名。
    ///
    /// # 契约
    /// - **参数**：`name` 为协商结果，非空 token；
    /// - **返回值**：非法时返回错误码
    ///   [`codes::SUB_PROTOCOL_INVALID`] 的 [`HandshakeError`]。
    pub fn new(name: impl Into<String>) -> Result<Self, HandshakeError> {
        let name = name.into();
        if name.is_empty() {
            return Err(HandshakeError::new(
                codes::SUB_PROTOCOL_INVALID,
                "sub-protocol name must not be empty",
            ));
        }
        if !name.bytes().all(is_token_byte) {
            return Err(HandshakeError::new(
                codes::SUB_PROTOCOL_INVALID,
                "sub-protocol name must be an HTTP token",
            ));
        }
        Ok(Self(name))
    }

    /// 获取子协议名文本。
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_token_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric()
        || matches!(
            byte,
            b'!' | b'#'
                | b'$'
                | b'%'
                | b'&'
                | b'\''
                | b'*'
                | b'+'
                | b'-'
                | b'.'
                | b'^'
                | b'_'
                | b'`'
                | b'|'
                | b'~'
        )
}

impl fmt::Display for SubProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SubProtocol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for SubProtocol {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for SubProtocol {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Self::new(name).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_registered_style_names() {
        for name in ["chat", "v1.stomp", "soap", "wamp.2.json"] {
            assert_eq!(SubProtocol::new(name).unwrap().as_str(), name);
        }
    }

    #[test]
    fn rejects_empty_name() {
        let err = SubProtocol::new("").unwrap_err();
        assert_eq!(err.code(), codes::SUB_PROTOCOL_INVALID);
    }

    #[test]
    fn rejects_non_token_characters() {
        for name in ["chat room", "proto,alt", "名字", "a\tb"] {
            let err = SubProtocol::new(name).unwrap_err();
            assert_eq!(err.code(), codes::SUB_PROTOCOL_INVALID);
        }
    }
}
