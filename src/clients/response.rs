//! HTTP 响应处理的公共逻辑

use serde_json::Value;

/// 从错误响应体中提取 `detail` 字段
///
/// 字符串原样返回，其他 JSON 值序列化为字符串；响应体不是 JSON 或没有 detail 时返回 None
pub fn extract_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// 拼接基础地址与路径，容忍两端多余的斜杠
pub fn join_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
