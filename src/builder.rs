use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::catalog::NoteCatalog;
use crate::ir::{FormulationRecord, Graph, GraphLink, GraphNode};

/// Accumulates raw co-occurrence counts, record by record.
///
/// Nothing is filtered until [`GraphBuilder::finish`]; links keep the
/// orientation and order in which their pair was first seen.
#[derive(Debug)]
pub struct GraphBuilder<'a> {
    catalog: &'a NoteCatalog,
    nodes: Vec<GraphNode>,
    node_index: HashMap<String, usize>,
    links: Vec<GraphLink>,
    link_index: HashMap<(String, String), usize>,
    records: usize,
}

impl<'a> GraphBuilder<'a> {
    pub fn new(catalog: &'a NoteCatalog) -> Self {
        Self {
            catalog,
            nodes: Vec::new(),
            node_index: HashMap::new(),
            links: Vec::new(),
            link_index: HashMap::new(),
            records: 0,
        }
    }

    pub fn add_record(&mut self, record: &FormulationRecord) {
        self.records += 1;
        let notes = self.record_notes(record);

        for note in &notes {
            self.ensure_node(note);
        }

        for (i, source) in notes.iter().enumerate() {
            for target in &notes[i + 1..] {
                self.bump_link(source, target);
                self.bump_connections(source);
                self.bump_connections(target);
            }
        }
    }

    /// Deduplicated catalog notes of one record, in first-seen order.
    fn record_notes(&self, record: &FormulationRecord) -> Vec<String> {
        let mut seen = HashSet::new();
        record
            .raw_notes()
            .filter(|note| self.catalog.contains(note))
            .filter(|note| seen.insert(note.clone()))
            .collect()
    }

    fn ensure_node(&mut self, id: &str) {
        if self.node_index.contains_key(id) {
            return;
        }
        // Callers only pass notes that passed the catalog filter.
        let Some(note) = self.catalog.note(id) else {
            return;
        };
        self.node_index.insert(id.to_string(), self.nodes.len());
        self.nodes.push(GraphNode {
            id: id.to_string(),
            season: note.season,
            color: note.color().to_string(),
            connections: 0,
        });
    }

    fn bump_link(&mut self, source: &str, target: &str) {
        let key = pair_key(source, target);
        match self.link_index.get(&key) {
            Some(&idx) => self.links[idx].weight += 1,
            None => {
                self.link_index.insert(key, self.links.len());
                self.links.push(GraphLink {
                    source: source.to_string(),
                    target: target.to_string(),
                    weight: 1,
                });
            }
        }
    }

    // Counted per pair occurrence, so repeated partners inflate the total.
    fn bump_connections(&mut self, id: &str) {
        if let Some(&idx) = self.node_index.get(id) {
            self.nodes[idx].connections += 1;
        }
    }

    /// Drops links with `weight <= threshold`, then every node left without a link.
    pub fn finish(self, threshold: u32) -> Graph {
        let raw_links = self.links.len();
        let links: Vec<GraphLink> = self
            .links
            .into_iter()
            .filter(|link| link.weight > threshold)
            .collect();

        let linked: HashSet<&str> = links
            .iter()
            .flat_map(|link| [link.source.as_str(), link.target.as_str()])
            .collect();
        let nodes: Vec<GraphNode> = self
            .nodes
            .into_iter()
            .filter(|node| linked.contains(node.id.as_str()))
            .collect();

        debug!(
            records = self.records,
            raw_links,
            links = links.len(),
            nodes = nodes.len(),
            threshold,
            "built co-occurrence graph"
        );

        Graph { nodes, links }
    }
}

fn pair_key(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

/// Builds the filtered co-occurrence graph for one view.
///
/// `brand_filter` matches the record brand exactly (case-sensitive). Only links
/// whose weight is strictly greater than `weight_threshold` survive.
pub fn build_graph(
    records: &[FormulationRecord],
    brand_filter: Option<&str>,
    weight_threshold: u32,
) -> Graph {
    build_graph_with_catalog(NoteCatalog::global(), records, brand_filter, weight_threshold)
}

pub fn build_graph_with_catalog(
    catalog: &NoteCatalog,
    records: &[FormulationRecord],
    brand_filter: Option<&str>,
    weight_threshold: u32,
) -> Graph {
    let mut builder = GraphBuilder::new(catalog);
    records
        .iter()
        .filter(|record| brand_filter.is_none_or(|brand| record.brand == brand))
        .for_each(|record| builder.add_record(record));
    builder.finish(weight_threshold)
}
