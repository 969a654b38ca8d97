//! Parsed document tree

/// A value in the document tree
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Inline value, trimmed and unquoted (may be empty)
    Scalar(String),
    /// Literal block scalar (`key: |`), indentation stripped
    Block(String),
    Mapping(Vec<Entry>),
    Sequence(Vec<Item>),
}

/// `key: value` inside a mapping
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub key: String,
    pub value: Node,
    /// 1-based line of the key
    pub line: usize,
}

/// `- value` inside a sequence
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub value: Node,
    /// 1-based line of the dash
    pub line: usize,
}

impl Node {
    /// Text content of a scalar or block scalar
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Scalar(text) | Node::Block(text) => Some(text.as_str()),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&[Entry]> {
        match self {
            Node::Mapping(entries) => Some(entries.as_slice()),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Item]> {
        match self {
            Node::Sequence(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// First entry with the given key, if this is a mapping
    pub fn entry(&self, key: &str) -> Option<&Entry> {
        self.as_mapping()?.iter().find(|entry| entry.key == key)
    }

    /// Value of the first entry with the given key, if this is a mapping
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.entry(key).map(|entry| &entry.value)
    }

    /// Non-blank text of the first entry with the given key
    pub fn get_text(&self, key: &str) -> Option<&str> {
        self.get(key)
            .and_then(Node::as_text)
            .filter(|text| !text.trim().is_empty())
    }
}
