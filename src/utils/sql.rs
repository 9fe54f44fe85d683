use sea_orm::sea_query::LikeExpr;

/// 转义 LIKE 通配符，反斜杠作为转义符
pub fn escape_like_pattern(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// 子串匹配的 LIKE 表达式
pub fn contains_pattern(raw: &str) -> LikeExpr {
    LikeExpr::new(format!("%{}%", escape_like_pattern(raw))).escape('\\')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like_pattern() {
        assert_eq!(escape_like_pattern("essay"), "essay");
        assert_eq!(escape_like_pattern("100%_done\\"), "100\\%\\_done\\\\");
    }
}
