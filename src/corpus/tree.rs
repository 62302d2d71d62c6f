//! Documentation page trees and their depth-first flattening.

use super::{CorpusPage, FrontMatter};
use serde::{Deserialize, Serialize};

/// A page in a version's documentation tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageNode {
    pub title: String,
    pub slug: String,
    /// Resolved URL. Derived from the version and slug when omitted.
    #[serde(default)]
    pub route: Option<String>,
    /// Rendered HTML body.
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub front_matter: FrontMatter,
    #[serde(default)]
    pub children: Vec<PageNode>,
}

impl PageNode {
    pub fn new(title: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            slug: slug.into(),
            route: None,
            content: String::new(),
            front_matter: FrontMatter::new(),
            children: Vec::new(),
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_route(mut self, route: impl Into<String>) -> Self {
        self.route = Some(route.into());
        self
    }

    pub fn with_front_matter(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.front_matter.insert(key.into(), value);
        self
    }

    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }
}

/// Flatten page trees into depth-first pre-order.
///
/// Uses an explicit stack, so arbitrarily deep trees cannot overflow the
/// call stack. Siblings keep their declared order.
pub fn flatten(roots: Vec<PageNode>, version: &str) -> Vec<CorpusPage> {
    let mut flat = Vec::new();
    let mut stack: Vec<PageNode> = roots.into_iter().rev().collect();

    while let Some(mut node) = stack.pop() {
        let children = std::mem::take(&mut node.children);
        stack.extend(children.into_iter().rev());

        let route = node
            .route
            .unwrap_or_else(|| format!("/{}/{}", version, node.slug.trim_start_matches('/')));
        flat.push(CorpusPage {
            title: node.title,
            slug: node.slug,
            route,
            content: node.content,
            front_matter: node.front_matter,
            version: version.to_string(),
        });
    }

    flat
}
