use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use perfume_note_graph::layout_dump::LayoutDump;
use perfume_note_graph::{
    Config, FormulationRecord, InteractionState, NoteCatalog, RenderOptions, build_graph,
    compute_layout, parse_records, render_view,
};
use pretty_assertions::assert_eq;

const BRANDS: [&str; 7] = [
    "chanel",
    "dior",
    "yves-saint-laurent",
    "tom-ford",
    "jo-malone-london",
    "gucci",
    "guerlain",
];

fn fixture_records() -> Vec<FormulationRecord> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("perfumes.csv");
    let input = std::fs::read_to_string(path).expect("fixture read failed");
    let parsed = parse_records(&input).expect("fixture header should parse");
    assert_eq!(parsed.skipped.len(), 1, "only the broken row is skipped");
    parsed.records
}

/// Pair counts computed straight from the records, keyed by sorted pair.
fn brute_force_weights(
    records: &[FormulationRecord],
    brand: Option<&str>,
) -> BTreeMap<(String, String), u32> {
    let catalog = NoteCatalog::global();
    let mut weights = BTreeMap::new();
    for record in records {
        if brand.is_some_and(|brand| record.brand != brand) {
            continue;
        }
        let notes: BTreeSet<String> = record
            .raw_notes()
            .filter(|note| catalog.contains(note))
            .collect();
        let notes: Vec<_> = notes.into_iter().collect();
        for (i, a) in notes.iter().enumerate() {
            for b in &notes[i + 1..] {
                *weights.entry((a.clone(), b.clone())).or_insert(0) += 1;
            }
        }
    }
    weights
}

fn sorted_pair(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

#[test]
fn fixture_parses_every_well_formed_row() {
    let records = fixture_records();
    assert_eq!(records.len(), 120);
    assert!(records.iter().all(|record| BRANDS.contains(&record.brand.as_str())));
}

#[test]
fn link_weights_match_record_counts() {
    let records = fixture_records();
    for brand in BRANDS.iter().copied().map(Some).chain([None]) {
        let expected = brute_force_weights(&records, brand);
        let graph = build_graph(&records, brand, 0);
        let actual: BTreeMap<_, _> = graph
            .links
            .iter()
            .map(|link| (sorted_pair(&link.source, &link.target), link.weight))
            .collect();
        assert_eq!(actual.len(), graph.links.len(), "{brand:?}: duplicate pair");
        assert_eq!(actual, expected, "{brand:?}");
    }
}

#[test]
fn threshold_is_strictly_exclusive() {
    let records = fixture_records();
    let full = brute_force_weights(&records, None);
    let threshold = 8;
    let graph = build_graph(&records, None, threshold);

    let expected: BTreeSet<_> = full
        .iter()
        .filter(|(_, weight)| **weight > threshold)
        .map(|(pair, _)| pair.clone())
        .collect();
    let actual: BTreeSet<_> = graph
        .links
        .iter()
        .map(|link| sorted_pair(&link.source, &link.target))
        .collect();
    assert_eq!(actual, expected);

    for node in &graph.nodes {
        assert!(
            graph.links.iter().any(|link| link.touches(&node.id)),
            "{} has no surviving link",
            node.id
        );
    }
}

#[test]
fn brand_views_never_exceed_the_aggregate() {
    let records = fixture_records();
    let all = build_graph(&records, None, 0);
    for brand in BRANDS {
        let graph = build_graph(&records, Some(brand), 0);
        for link in &graph.links {
            let aggregate = all
                .link(&link.source, &link.target)
                .expect("brand link missing from aggregate");
            assert!(link.weight <= aggregate.weight);
        }
    }
}

#[test]
fn notes_keep_their_slot_across_views() {
    let records = fixture_records();
    let order = NoteCatalog::global().sorted_order();
    let config = Config::default();
    let overview = compute_layout(
        &build_graph(&records, None, 0),
        order,
        500.0,
        500.0,
        &config.layout,
    )
    .unwrap();

    for brand in BRANDS {
        let layout = compute_layout(
            &build_graph(&records, Some(brand), 0),
            order,
            500.0,
            500.0,
            &config.layout,
        )
        .unwrap();
        for node in &layout.nodes {
            let reference = overview.node(&node.id).unwrap();
            assert!((node.x - reference.x).abs() < 1e-9, "{brand}/{}", node.id);
            assert!((node.y - reference.y).abs() < 1e-9, "{brand}/{}", node.id);
        }
    }
}

#[test]
fn every_configured_view_renders() {
    let records = fixture_records();
    let config = Config::default();
    let mut brands: Vec<Option<String>> = vec![None];
    brands.extend(config.thresholds.brand_names().map(|brand| Some(brand.to_string())));

    for brand in brands {
        let options = RenderOptions {
            brand: brand.clone(),
            threshold: Some(2),
            ..RenderOptions::default()
        };
        let view = render_view(&records, &options).unwrap();
        assert!(view.svg.starts_with("<svg"), "{brand:?}");
        assert!(view.svg.ends_with("</svg>"), "{brand:?}");
        assert_eq!(
            view.svg.matches("<circle").count(),
            view.graph.nodes.len(),
            "{brand:?}"
        );
        assert_eq!(
            view.svg.matches("<line").count(),
            view.graph.links.len(),
            "{brand:?}"
        );
    }
}

#[test]
fn default_thresholds_can_empty_a_sparse_brand() {
    let records = fixture_records();
    let options = RenderOptions {
        brand: Some("jo-malone-london".to_string()),
        ..RenderOptions::default()
    };
    let view = render_view(&records, &options).unwrap();
    assert_eq!(view.threshold, 5);
    let expected = brute_force_weights(&records, Some("jo-malone-london"))
        .values()
        .filter(|weight| **weight > 5)
        .count();
    assert_eq!(view.graph.links.len(), expected);
    if expected == 0 {
        assert!(!view.svg.contains("<circle"));
    }
}

#[test]
fn layout_dump_round_trips_through_json() {
    let records = fixture_records();
    let options = RenderOptions {
        brand: Some("dior".to_string()),
        threshold: Some(1),
        ..RenderOptions::default()
    };
    let view = render_view(&records, &options).unwrap();
    let mut interaction = InteractionState::default();
    interaction.hover("musk");
    let dump = LayoutDump::from_layout(&view.layout, Some("dior"), view.threshold, &interaction);
    let json = serde_json::to_value(&dump).unwrap();

    assert_eq!(json["threshold"], 1);
    assert_eq!(
        json["nodes"].as_array().map(Vec::len),
        Some(view.layout.nodes.len())
    );
    assert_eq!(
        json["labels"].as_array().map(Vec::len),
        Some(view.layout.labels.len())
    );
    assert_eq!(json["interaction"]["highlighted"], "musk");
}
