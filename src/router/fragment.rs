//! Location fragment parsing.

/// A parsed location fragment (`#name` or `#name=id`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    raw: String,
    name: String,
    id: Option<String>,
}

impl Fragment {
    /// Parse a fragment, with or without its leading `#`.
    ///
    /// The text is split on the first `=` into a name and an optional id;
    /// both are percent-decoded when they decode to valid UTF-8.
    pub fn parse(fragment: &str) -> Self {
        let raw = fragment.strip_prefix('#').unwrap_or(fragment);
        let (name, id) = match raw.split_once('=') {
            Some((name, id)) => (name, Some(id)),
            None => (raw, None),
        };
        Self {
            raw: raw.to_string(),
            name: decode(name),
            id: id.map(decode),
        }
    }

    /// Whether the fragment is empty (no `#`, or a bare `#`).
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Route or board name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The id after `=`, if present.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Heading derived from the name.
    pub fn heading(&self) -> String {
        heading_for(&self.name)
    }
}

/// Heading for a route or board name: the first `-` becomes a space.
pub fn heading_for(name: &str) -> String {
    name.replacen('-', " ", 1)
}

fn decode(part: &str) -> String {
    urlencoding::decode(part)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| part.to_string())
}
