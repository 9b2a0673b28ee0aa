/// Escapa texto para insertarlo en HTML (contenido o atributo entre comillas dobles)
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Id apto para atributos (`aria-labelledby`): solo [a-zA-Z0-9_-]
pub fn dom_id(prefix: &str, raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '-' })
        .collect();
    format!("{}-{}", prefix, cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape(r#"<img src="x" onerror='a'>&"#),
            "&lt;img src=&quot;x&quot; onerror=&#39;a&#39;&gt;&amp;"
        );
        assert_eq!(escape("plain text"), "plain text");
    }

    #[test]
    fn dom_id_replaces_unsafe_chars() {
        assert_eq!(dom_id("photo-title", "a b/c"), "photo-title-a-b-c");
    }
}
