/*
 * @Date         : 2026-03-02
 * @Description  : 忽略大小写的字符串比较（层类型名匹配用）
 */

/// 忽略 ASCII 大小写比较两个字符串，如 `"Input"` 与 `"input"` 视为相等
pub fn caseless_eq(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

/// 判断 `value` 是否（忽略大小写）等于 `candidates` 中任一项
pub fn caseless_contains<S: AsRef<str>>(candidates: &[S], value: &str) -> bool {
    candidates.iter().any(|c| caseless_eq(c.as_ref(), value))
}
