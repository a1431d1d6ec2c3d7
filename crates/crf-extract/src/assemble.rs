//! Writes values into a document at dotted paths.

use crf_model::{CrfDocument, CrfError, CrfNode, Result};

/// Assign `node` at `path`, creating intermediate containers on demand.
///
/// Existing intermediate containers are reused, so sibling paths coexist.
/// The final segment is overwritten. An intermediate segment that holds a
/// leaf or list is a [`CrfError::PathCollision`]; it is never replaced.
pub fn assign(doc: &mut CrfDocument, path: &str, node: CrfNode) -> Result<()> {
    let segments: Vec<&str> = path.split('.').collect();
    if segments.iter().any(|segment| segment.is_empty()) {
        return Err(CrfError::InvalidPath {
            path: path.to_string(),
        });
    }
    let Some((last, parents)) = segments.split_last() else {
        return Err(CrfError::InvalidPath {
            path: path.to_string(),
        });
    };

    let mut current = doc;
    for segment in parents {
        if !current.contains_key(segment) {
            current.insert(*segment, CrfNode::Container(CrfDocument::new()));
        }
        current = match current.get_mut(segment) {
            Some(CrfNode::Container(child)) => child,
            _ => {
                return Err(CrfError::PathCollision {
                    path: path.to_string(),
                    segment: (*segment).to_string(),
                });
            }
        };
    }
    current.insert(*last, node);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_nested_containers() {
        let mut doc = CrfDocument::new();
        assign(&mut doc, "a.b.c", CrfNode::text("v")).unwrap();
        assert_eq!(doc.text_at("a.b.c"), Some("v"));
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn siblings_share_intermediate_containers() {
        let mut doc = CrfDocument::new();
        assign(&mut doc, "a.b.c", CrfNode::text("v")).unwrap();
        assign(&mut doc, "a.b.d", CrfNode::text("v2")).unwrap();

        let b = doc.lookup("a.b").and_then(CrfNode::as_container).unwrap();
        assert_eq!(b.keys().collect::<Vec<_>>(), vec!["c", "d"]);
        assert_eq!(doc.text_at("a.b.c"), Some("v"));
        assert_eq!(doc.text_at("a.b.d"), Some("v2"));
    }

    #[test]
    fn final_segment_is_overwritten() {
        let mut doc = CrfDocument::new();
        assign(&mut doc, "a.b", CrfNode::text("old")).unwrap();
        assign(&mut doc, "a.b", CrfNode::text("new")).unwrap();
        assert_eq!(doc.text_at("a.b"), Some("new"));
    }

    #[test]
    fn single_segment_path_writes_top_level() {
        let mut doc = CrfDocument::new();
        assign(&mut doc, "scheduledDate", CrfNode::text("03/27/2024")).unwrap();
        assert_eq!(doc.text_at("scheduledDate"), Some("03/27/2024"));
    }

    #[test]
    fn leaf_in_intermediate_position_is_a_collision() {
        let mut doc = CrfDocument::new();
        assign(&mut doc, "a.b", CrfNode::text("leaf")).unwrap();
        let error = assign(&mut doc, "a.b.c", CrfNode::text("v")).unwrap_err();
        match error {
            CrfError::PathCollision { path, segment } => {
                assert_eq!(path, "a.b.c");
                assert_eq!(segment, "b");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(doc.text_at("a.b"), Some("leaf"));
    }

    #[test]
    fn empty_segments_are_rejected() {
        let mut doc = CrfDocument::new();
        for path in ["", "a..b", ".a", "a."] {
            assert!(matches!(
                assign(&mut doc, path, CrfNode::text("v")),
                Err(CrfError::InvalidPath { .. })
            ));
        }
        assert!(doc.is_empty());
    }
}
