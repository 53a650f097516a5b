use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::string::String;
use core::any::Any;
use core::fmt;

/// 属性值的类型擦除包装：任何 `'static + Send + Sync` 的值均可存入。
pub type AttributeValue = Box<dyn Any + Send + Sync>;

/// `AttributeMap` 承载从握手请求中提取、随会话传播的附加上下文。
///
/// # 设计背景（Why）
/// - 对标 Netty `AttributeMap` 与各框架的 `Extensions` 容器：跨阶段共享
///   数据需要类型擦除存储，读取时按具体类型向下转型；
/// - 与管线扩展存储不同，这里以字符串为键：上游协商组件按约定名投放
///   上下文（如租户、路由标签），会话侧按同名取回。
///
/// # 契约说明（What）
/// - 值需满足 `'static + Send + Sync`，确保跨线程访问安全；
/// - [`get`](Self::get) 在键缺失或类型不匹配时一律返回 `None`；
/// - 嵌入握手记录后容器即视为只读，记录不提供任何可变访问路径。
///
/// # 设计取舍（Trade-offs）
/// - 采用 `BTreeMap`，在 `no_std + alloc` 下零额外依赖且键序确定；
///   握手属性通常只有个位数条目，树查找开销可忽略；
/// - 类型擦除使容器无法 `Clone` 与序列化：属性只在进程内传递。
#[derive(Default)]
pub struct AttributeMap {
    entries: BTreeMap<String, AttributeValue>,
}

impl AttributeMap {
    /// 创建空容器。
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder 风格写入，便于在构造握手记录前链式填充。
    pub fn with(mut self, key: impl Into<String>, value: impl Any + Send + Sync) -> Self {
        self.insert(key, value);
        self
    }

    /// 写入属性；同键旧值被替换并返回。
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Any + Send + Sync,
    ) -> Option<AttributeValue> {
        self.entries.insert(key.into(), Box::new(value))
    }

    /// 按具体类型读取属性。
    ///
    /// # 契约
    /// - **返回值**：键缺失或存储值并非 `T` 时返回 `None`；
    /// - 读取不转移所有权，值仍归容器所有。
    pub fn get<T: Any>(&self, key: &str) -> Option<&T> {
        self.entries.get(key).and_then(|value| value.downcast_ref())
    }

    /// 读取类型擦除形态的属性值。
    pub fn get_raw(&self, key: &str) -> Option<&(dyn Any + Send + Sync)> {
        self.entries.get(key).map(Box::as_ref)
    }

    /// 判断键是否存在。
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// 获取属性条目数。
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 判断容器是否为空。
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 按键序遍历全部键。
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl fmt::Debug for AttributeMap {
    /// 值经过类型擦除无法逐一打印，仅呈现键集合。
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.entries.keys()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_read_round_trips() {
        let attributes = AttributeMap::new()
            .with("tenant", String::from("acme"))
            .with("hops", 3u32);
        assert_eq!(attributes.get::<String>("tenant").map(String::as_str), Some("acme"));
        assert_eq!(attributes.get::<u32>("hops"), Some(&3));
        assert_eq!(attributes.len(), 2);
    }

    #[test]
    fn type_mismatch_reads_none() {
        let attributes = AttributeMap::new().with("hops", 3u32);
        assert_eq!(attributes.get::<i64>("hops"), None);
        assert!(attributes.get_raw("hops").is_some());
    }

    #[test]
    fn replaced_value_is_returned() {
        let mut attributes = AttributeMap::new();
        assert!(attributes.insert("k", 1u8).is_none());
        let old = attributes.insert("k", 2u8).unwrap();
        assert_eq!(old.downcast_ref::<u8>(), Some(&1));
        assert_eq!(attributes.get::<u8>("k"), Some(&2));
    }

    #[test]
    fn debug_renders_keys_only() {
        let attributes = AttributeMap::new().with("b", 1u8).with("a", 2u8);
        assert_eq!(alloc::format!("{attributes:?}"), "{\"a\", \"b\"}");
    }
}
