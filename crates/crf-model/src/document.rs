//! Nested CRF document tree.
//!
//! A document is an insertion-ordered map from keys to nodes. Nodes are
//! either leaves, lists, or nested containers, so whether a path segment
//! may be descended into is decided by the node's variant.

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

/// A leaf value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrfValue {
    Text(String),
    Flag(bool),
}

impl CrfValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Flag(_) => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            Self::Flag(flag) => Some(*flag),
            Self::Text(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrfNode {
    Leaf(CrfValue),
    List(Vec<CrfNode>),
    Container(CrfDocument),
}

impl CrfNode {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Leaf(CrfValue::Text(value.into()))
    }

    pub fn flag(value: bool) -> Self {
        Self::Leaf(CrfValue::Flag(value))
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Leaf(value) => value.as_text(),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            Self::Leaf(value) => value.as_flag(),
            _ => None,
        }
    }

    pub fn as_container(&self) -> Option<&CrfDocument> {
        match self {
            Self::Container(doc) => Some(doc),
            _ => None,
        }
    }
}

impl From<CrfDocument> for CrfNode {
    fn from(doc: CrfDocument) -> Self {
        Self::Container(doc)
    }
}

impl From<CrfValue> for CrfNode {
    fn from(value: CrfValue) -> Self {
        Self::Leaf(value)
    }
}

/// Insertion-ordered container of named nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrfDocument {
    entries: Vec<(String, CrfNode)>,
}

impl CrfDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    pub fn get(&self, key: &str) -> Option<&CrfNode> {
        self.position(key).map(|idx| &self.entries[idx].1)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut CrfNode> {
        self.position(key).map(|idx| &mut self.entries[idx].1)
    }

    /// Insert `node` under `key`. An existing key keeps its position and
    /// gets its node replaced; the previous node is returned.
    pub fn insert(&mut self, key: impl Into<String>, node: CrfNode) -> Option<CrfNode> {
        let key = key.into();
        match self.position(&key) {
            Some(idx) => Some(std::mem::replace(&mut self.entries[idx].1, node)),
            None => {
                self.entries.push((key, node));
                None
            }
        }
    }

    /// Resolve a dotted path such as `demographics.age`.
    pub fn lookup(&self, path: &str) -> Option<&CrfNode> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        let mut node = self.get(first)?;
        for segment in segments {
            node = node.as_container()?.get(segment)?;
        }
        Some(node)
    }

    /// Convenience for reading a text leaf at a dotted path.
    pub fn text_at(&self, path: &str) -> Option<&str> {
        self.lookup(path).and_then(CrfNode::as_text)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CrfNode)> {
        self.entries.iter().map(|(key, node)| (key.as_str(), node))
    }

    /// Number of leaves reachable from this container.
    pub fn leaf_count(&self) -> usize {
        fn count(node: &CrfNode) -> usize {
            match node {
                CrfNode::Leaf(_) => 1,
                CrfNode::List(items) => items.iter().map(count).sum(),
                CrfNode::Container(doc) => doc.leaf_count(),
            }
        }
        self.entries.iter().map(|(_, node)| count(node)).sum()
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }
}

impl FromIterator<(String, CrfNode)> for CrfDocument {
    fn from_iter<I: IntoIterator<Item = (String, CrfNode)>>(iter: I) -> Self {
        let mut doc = Self::new();
        for (key, node) in iter {
            doc.insert(key, node);
        }
        doc
    }
}

impl Serialize for CrfValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Text(text) => serializer.serialize_str(text),
            Self::Flag(flag) => serializer.serialize_bool(*flag),
        }
    }
}

impl Serialize for CrfNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Leaf(value) => value.serialize(serializer),
            Self::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Container(doc) => doc.serialize(serializer),
        }
    }
}

impl Serialize for CrfDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, node) in &self.entries {
            map.serialize_entry(key, node)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_existing_key_keeps_position() {
        let mut doc = CrfDocument::new();
        doc.insert("a", CrfNode::text("1"));
        doc.insert("b", CrfNode::text("2"));
        let previous = doc.insert("a", CrfNode::text("3"));

        assert_eq!(previous, Some(CrfNode::text("1")));
        assert_eq!(doc.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(doc.get("a").and_then(CrfNode::as_text), Some("3"));
    }

    #[test]
    fn lookup_walks_nested_containers() {
        let mut inner = CrfDocument::new();
        inner.insert("age", CrfNode::text("34"));
        let mut doc = CrfDocument::new();
        doc.insert("demographics", CrfNode::Container(inner));

        assert_eq!(doc.text_at("demographics.age"), Some("34"));
        assert!(doc.lookup("demographics.sex").is_none());
        assert!(doc.lookup("demographics.age.value").is_none());
    }

    #[test]
    fn leaf_count_includes_list_items() {
        let mut doc = CrfDocument::new();
        doc.insert("flag", CrfNode::flag(true));
        doc.insert(
            "symptoms",
            CrfNode::List(vec![CrfNode::text("a"), CrfNode::text("b")]),
        );
        assert_eq!(doc.leaf_count(), 3);
    }
}
