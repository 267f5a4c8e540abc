//! List rendering
//!
//! [`TemplateRenderer`] understands `{{dotted.path}}` (HTML-escaped) and
//! `{{{dotted.path}}}` (raw) placeholders. Paths are resolved against each
//! item the same way data paths are resolved against payloads; missing
//! values render as nothing.

use serde_json::Value;

use crate::normalize::resolve;

/// Sink for rendered list items
pub trait ListRenderer: Send {
    /// Drop everything rendered so far (pull-down replaces the list)
    fn clear(&mut self);

    /// Append items, returning how many were rendered
    fn render(&mut self, items: &[Value]) -> usize;
}

/// Minimal mustache-style renderer writing into a string buffer
#[derive(Debug, Clone, Default)]
pub struct TemplateRenderer {
    template: String,
    output: String,
}

impl TemplateRenderer {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            output: String::new(),
        }
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    /// Render one item against the template
    pub fn render_item(&self, item: &Value) -> String {
        let mut out = String::with_capacity(self.template.len());
        let mut rest = self.template.as_str();

        while let Some(start) = rest.find("{{") {
            out.push_str(&rest[..start]);
            let after = &rest[start..];

            let (raw, open, close) = if after.starts_with("{{{") {
                (true, 3, "}}}")
            } else {
                (false, 2, "}}")
            };

            let Some(end) = after[open..].find(close) else {
                // Unterminated tag: emit verbatim
                out.push_str(after);
                return out;
            };

            let key = after[open..open + end].trim();
            let text = lookup(item, key);
            if raw {
                out.push_str(&text);
            } else {
                escape_into(&mut out, &text);
            }

            rest = &after[open + end + close.len()..];
        }

        out.push_str(rest);
        out
    }
}

impl ListRenderer for TemplateRenderer {
    fn clear(&mut self) {
        self.output.clear();
    }

    fn render(&mut self, items: &[Value]) -> usize {
        for item in items {
            let html = self.render_item(item);
            self.output.push_str(&html);
        }
        items.len()
    }
}

fn lookup(item: &Value, key: &str) -> String {
    let value = if key == "." { Some(item) } else { resolve(Some(item), key) };

    match value {
        None => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn escape_into(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
}
