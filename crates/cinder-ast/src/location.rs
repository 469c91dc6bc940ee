//! Source locations and inlined-call ancestry.

use std::sync::Arc;

use smallvec::SmallVec;

use crate::types::MethodReference;

/// One level of inlining: the method that was inlined and the call site
/// (file/line) where the inlining happened. Each node shares its parent, so a
/// method with many inlined expressions keeps a single ancestry tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InliningInfo {
    pub method: MethodReference,
    pub file_name: Option<Arc<str>>,
    pub line: u32,
    pub parent: Option<Arc<InliningInfo>>,
}

impl InliningInfo {
    pub fn new(
        method: MethodReference,
        file_name: Option<Arc<str>>,
        line: u32,
        parent: Option<Arc<InliningInfo>>,
    ) -> Self {
        Self {
            method,
            file_name,
            line,
            parent,
        }
    }
}

/// A source position attached to a tree node: file, line, and the chain of
/// inlined calls leading to it. The empty location (no file, no inlining)
/// marks "unknown position".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextLocation {
    pub file_name: Option<Arc<str>>,
    pub line: u32,
    pub inlining: Option<Arc<InliningInfo>>,
}

impl TextLocation {
    pub fn new(file_name: impl Into<Arc<str>>, line: u32) -> Self {
        Self {
            file_name: Some(file_name.into()),
            line,
            inlining: None,
        }
    }

    pub fn with_inlining(
        file_name: impl Into<Arc<str>>,
        line: u32,
        inlining: Arc<InliningInfo>,
    ) -> Self {
        Self {
            file_name: Some(file_name.into()),
            line,
            inlining: Some(inlining),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.file_name.is_none() && self.inlining.is_none()
    }

    /// The inlining chain ordered outermost-first.
    pub fn inlining_path(&self) -> SmallVec<[Arc<InliningInfo>; 4]> {
        let mut path = SmallVec::new();
        let mut current = self.inlining.clone();
        while let Some(info) = current {
            current = info.parent.clone();
            path.push(info);
        }
        path.reverse();
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inlining_path_is_outermost_first() {
        let outer = Arc::new(InliningInfo::new(
            MethodReference::new("a.Outer", "f"),
            Some("Outer.java".into()),
            10,
            None,
        ));
        let inner = Arc::new(InliningInfo::new(
            MethodReference::new("a.Inner", "g"),
            Some("Inner.java".into()),
            20,
            Some(outer.clone()),
        ));
        let location = TextLocation::with_inlining("Leaf.java", 5, inner.clone());

        let path = location.inlining_path();
        assert_eq!(path.len(), 2);
        assert_eq!(path[0], outer);
        assert_eq!(path[1], inner);
    }

    #[test]
    fn empty_location_has_no_path() {
        assert!(TextLocation::empty().is_empty());
        assert!(TextLocation::empty().inlining_path().is_empty());
    }
}
