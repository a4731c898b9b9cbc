//! 组装日志用 SQL：按顺序把字面量填入 `?`，再做一遍只影响排版的美化。
//!
//! 这里不解析 SQL：模板里每个 `?` 都视为占位符。

use crate::literal::Literal;

pub const PLACEHOLDER: char = '?';

/// 美化时在这些关键字前换行（大小写敏感，整词匹配，前面必须是空格）。
pub const BREAK_KEYWORDS: [&str; 4] = ["FROM", "WHERE", "VALUES", "LIMIT"];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("sqllog template has {placeholders} placeholders but {bindings} bindings")]
    PlaceholderMismatch { placeholders: usize, bindings: usize },
}

pub fn count_placeholders(sql: &str) -> usize {
    sql.chars().filter(|&c| c == PLACEHOLDER).count()
}

/// 从左到右，每个 `?` 只替换一次；已填入的文本不会再被扫描。
///
/// - `strict = false`：绑定多出来的值被丢弃（记一条 warn），占位符多出来的保持 `?`；
/// - `strict = true`：数量不一致直接返回 `PlaceholderMismatch`。
pub fn substitute(sql: &str, literals: &[Literal], strict: bool) -> Result<String, RenderError> {
    if strict {
        let placeholders = count_placeholders(sql);
        if placeholders != literals.len() {
            return Err(RenderError::PlaceholderMismatch {
                placeholders,
                bindings: literals.len(),
            });
        }
    }

    let mut out = String::with_capacity(sql.len() + literals.len() * 20);
    let mut values = literals.iter();
    for c in sql.chars() {
        if c == PLACEHOLDER
            && let Some(lit) = values.next()
        {
            out.push_str(&lit.to_string());
            continue;
        }
        out.push(c);
    }

    let dropped = values.len();
    if dropped > 0 {
        tracing::warn!(
            dropped,
            bindings = literals.len(),
            "more bindings than placeholders, trailing values not rendered"
        );
    }
    Ok(out)
}

/// 换行转空格、压缩连续空格，然后在 `BREAK_KEYWORDS` 前断行。
///
/// 对已经美化过的文本再做一次，结果不变。
pub fn pretty_print(sql: &str) -> String {
    let mut flat = String::with_capacity(sql.len());
    let mut prev_space = false;
    for c in sql.chars() {
        let c = if c == '\n' { ' ' } else { c };
        if c == ' ' {
            if prev_space {
                continue;
            }
            prev_space = true;
        } else {
            prev_space = false;
        }
        flat.push(c);
    }

    BREAK_KEYWORDS
        .iter()
        .fold(flat, |acc, kw| break_before(&acc, kw))
}

fn break_before(s: &str, keyword: &str) -> String {
    let needle = format!(" {keyword}");
    let mut out = String::with_capacity(s.len() + 8);
    let mut rest = s;
    while let Some(pos) = rest.find(&needle) {
        let after = &rest[pos + needle.len()..];
        let whole_word = after
            .chars()
            .next()
            .is_none_or(|c| !(c.is_alphanumeric() || c == '_'));
        out.push_str(&rest[..pos]);
        if whole_word {
            out.push('\n');
        }
        out.push_str(&needle);
        rest = after;
    }
    out.push_str(rest);
    out
}
