//! Text renderers for a derived profile.
//!
//! Two artifacts: a structured `CLIMATE { ... }` syntax block and a
//! natural-language prompt paragraph.

mod prompt;
mod syntax;

pub use prompt::render_prompt;
pub use syntax::render_syntax;

/// Single-quote `s`, escaping backslashes, single quotes and control
/// characters so the value stays on one line.
pub(crate) fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            c if c.is_control() => out.extend(c.escape_default()),
            _ => out.push(ch),
        }
    }
    out.push('\'');
    out
}

/// Bracketed list of quoted items: `['a', 'b']`.
pub(crate) fn quote_list<'a>(items: impl IntoIterator<Item = &'a str>) -> String {
    let quoted: Vec<String> = items.into_iter().map(quote).collect();
    format!("[{}]", quoted.join(", "))
}
