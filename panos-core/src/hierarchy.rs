//! Device-group hierarchy flattening.

use std::collections::HashMap;

use serde::Deserialize;

/// Payload of `show > dg-hierarchy`: a forest of device groups.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DgHierarchyResult {
    #[serde(rename = "dg-hierarchy", default)]
    pub hierarchy: DgHierarchy,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DgHierarchy {
    #[serde(rename = "dg", default)]
    pub nodes: Vec<DgNode>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DgNode {
    #[serde(rename = "@name")]
    pub name: String,
    #[serde(rename = "dg", default)]
    pub children: Vec<DgNode>,
}

impl DgHierarchy {
    /// Flatten the tree into a `child name -> parent name` map.
    ///
    /// Pre-order depth-first walk in root-list order. Top-level groups map
    /// to the empty string. Node names are assumed unique across the tree;
    /// if a name repeats, the later-visited occurrence's parent wins.
    pub fn flatten(&self) -> HashMap<String, String> {
        let mut parents = HashMap::new();
        for node in &self.nodes {
            parents.insert(node.name.clone(), String::new());
            node.collect(&mut parents);
        }
        parents
    }
}

impl DgNode {
    fn collect(&self, parents: &mut HashMap<String, String>) {
        for child in &self.children {
            parents.insert(child.name.clone(), self.name.clone());
            child.collect(parents);
        }
    }
}
