//! HTML escaping and plain-text rendering of HTML fragments.

/// Escape text for inclusion in HTML content or a quoted attribute.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Tags that start a new line when rendered as text.
const BLOCK_TAGS: &[&str] = &[
    "p", "div", "h1", "h2", "h3", "h4", "h5", "h6", "br", "form", "li", "ul", "textarea",
];

/// Render an HTML fragment as plain text.
///
/// Tags are dropped, block-level tags become line breaks, common entities are
/// decoded and runs of blank lines are collapsed.
pub fn html_to_text(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut tag = String::new();
    let mut entity = String::new();
    let mut in_tag = false;
    let mut in_entity = false;

    for ch in html.chars() {
        match ch {
            '<' if !in_tag => {
                in_tag = true;
                tag.clear();
            }
            '>' if in_tag => {
                in_tag = false;
                if is_block_tag(&tag) {
                    out.push('\n');
                }
            }
            _ if in_tag => tag.push(ch),
            '&' => {
                if in_entity {
                    out.push('&');
                    out.push_str(&entity);
                }
                in_entity = true;
                entity.clear();
            }
            ';' if in_entity => {
                in_entity = false;
                match decode_entity(&entity) {
                    Some(c) => out.push(c),
                    None => {
                        out.push('&');
                        out.push_str(&entity);
                        out.push(';');
                    }
                }
            }
            _ if in_entity => entity.push(ch),
            _ => out.push(ch),
        }
    }
    if in_entity {
        out.push('&');
        out.push_str(&entity);
    }

    out.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn is_block_tag(tag: &str) -> bool {
    let name = tag
        .trim_start_matches('/')
        .split(|c: char| c.is_whitespace() || c == '/')
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();
    BLOCK_TAGS.contains(&name.as_str())
}

fn decode_entity(entity: &str) -> Option<char> {
    match entity {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some(' '),
        _ => {
            let code = if let Some(hex) = entity
                .strip_prefix("#x")
                .or_else(|| entity.strip_prefix("#X"))
            {
                u32::from_str_radix(hex, 16).ok()?
            } else {
                entity.strip_prefix('#')?.parse().ok()?
            };
            char::from_u32(code)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("plain"), "plain");
        assert_eq!(
            escape_html(r#"<script>alert("x & 'y'")</script>"#),
            "&lt;script&gt;alert(&quot;x &amp; &#39;y&#39;&quot;)&lt;/script&gt;"
        );
    }

    #[test]
    fn test_html_to_text_blocks() {
        let html = "<div><h4>Title</h4><span>Posted by bob</span></div><p>Next</p>";
        assert_eq!(html_to_text(html), "Title\nPosted by bob\nNext");
    }

    #[test]
    fn test_html_to_text_inline_tags() {
        assert_eq!(
            html_to_text("<a href='#general'>general</a> | <b>bold</b>"),
            "general | bold"
        );
    }

    #[test]
    fn test_html_to_text_entities() {
        assert_eq!(html_to_text("a &amp; b &lt;c&gt; &#39;d&#39; &#x41;"), "a & b <c> 'd' A");
        assert_eq!(html_to_text("&unknown; & rest"), "&unknown; & rest");
    }

    #[test]
    fn test_html_to_text_escape_round_trip() {
        let text = r#"Tom & "Jerry" <3"#;
        assert_eq!(html_to_text(&escape_html(text)), text);
    }

    #[test]
    fn test_is_block_tag() {
        assert!(is_block_tag("p"));
        assert!(is_block_tag("/div"));
        assert!(is_block_tag("br/"));
        assert!(is_block_tag("form id=\"login-form\""));
        assert!(!is_block_tag("a href='#x'"));
        assert!(!is_block_tag("/span"));
    }
}
