use crate::catalog::Season;
use serde::Serialize;

/// One perfume row: a brand plus its three comma-separated note columns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormulationRecord {
    pub brand: String,
    pub top: String,
    pub middle: String,
    pub base: String,
}

impl FormulationRecord {
    pub fn new(brand: &str, top: &str, middle: &str, base: &str) -> Self {
        Self {
            brand: brand.to_string(),
            top: top.to_string(),
            middle: middle.to_string(),
            base: base.to_string(),
        }
    }

    /// Trimmed, lowercased, non-empty note names across Top, Middle and Base.
    pub fn raw_notes(&self) -> impl Iterator<Item = String> + '_ {
        [&self.top, &self.middle, &self.base]
            .into_iter()
            .flat_map(|column| column.split(','))
            .map(|note| note.trim().to_lowercase())
            .filter(|note| !note.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphNode {
    pub id: String,
    pub season: Season,
    pub color: String,
    pub connections: u32,
}

/// Undirected: `(a, b)` and `(b, a)` name the same link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphLink {
    pub source: String,
    pub target: String,
    pub weight: u32,
}

impl GraphLink {
    pub fn touches(&self, id: &str) -> bool {
        self.source == id || self.target == id
    }

    pub fn connects(&self, a: &str, b: &str) -> bool {
        (self.source == a && self.target == b) || (self.source == b && self.target == a)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Graph {
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphLink>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Nothing to draw. The sink renders an empty canvas.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() || self.links.is_empty()
    }

    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn link(&self, a: &str, b: &str) -> Option<&GraphLink> {
        self.links.iter().find(|link| link.connects(a, b))
    }

    pub fn max_weight(&self) -> u32 {
        self.links.iter().map(|link| link.weight).max().unwrap_or(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_notes_normalizes_all_columns() {
        let record = FormulationRecord::new("dior", " Bergamot ,LEMON", "rose", "");
        let notes: Vec<String> = record.raw_notes().collect();
        assert_eq!(notes, vec!["bergamot", "lemon", "rose"]);
    }

    #[test]
    fn raw_notes_skips_empty_fragments() {
        let record = FormulationRecord::new("dior", "bergamot,,", " , ", "musk");
        let notes: Vec<String> = record.raw_notes().collect();
        assert_eq!(notes, vec!["bergamot", "musk"]);
    }

    #[test]
    fn link_lookup_is_symmetric() {
        let graph = Graph {
            nodes: Vec::new(),
            links: vec![GraphLink {
                source: "rose".to_string(),
                target: "musk".to_string(),
                weight: 3,
            }],
        };
        assert_eq!(graph.link("musk", "rose").map(|l| l.weight), Some(3));
        assert_eq!(graph.link("rose", "musk").map(|l| l.weight), Some(3));
        assert!(graph.link("rose", "iris").is_none());
        assert_eq!(graph.max_weight(), 3);
    }

    #[test]
    fn empty_graph_has_unit_max_weight() {
        let graph = Graph::new();
        assert!(graph.is_empty());
        assert_eq!(graph.max_weight(), 1);
    }
}
