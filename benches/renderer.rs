use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use perfume_note_graph::builder::build_graph;
use perfume_note_graph::catalog::NoteCatalog;
use perfume_note_graph::config::{LayoutConfig, RenderConfig};
use perfume_note_graph::interaction::InteractionState;
use perfume_note_graph::layout::compute_layout;
use perfume_note_graph::parser::parse_records;
use perfume_note_graph::render::{ViewStyle, render_svg};
use perfume_note_graph::theme::Theme;
use std::hint::black_box;

const BRANDS: [&str; 6] = [
    "chanel",
    "dior",
    "yves-saint-laurent",
    "tom-ford",
    "jo-malone-london",
    "gucci",
];

/// Deterministic CSV with `rows` records spread over the brand list.
fn synthetic_csv(rows: usize) -> String {
    let notes = NoteCatalog::global().sorted_order();
    let mut out = String::from("Name,Brand,Top,Middle,Base\n");
    for i in 0..rows {
        let pick = |offset: usize, count: usize| {
            (0..count)
                .map(|k| notes[(i * 7 + offset + k * 5) % notes.len()])
                .collect::<Vec<_>>()
                .join(", ")
        };
        out.push_str(&format!(
            "Perfume {},{},\"{}\",\"{}\",\"{}\"\n",
            i,
            BRANDS[i % BRANDS.len()],
            pick(0, 2 + i % 2),
            pick(3, 1 + i % 3),
            pick(11, 2 + i % 3)
        ));
    }
    out
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    for rows in [100usize, 1_000, 10_000] {
        let input = synthetic_csv(rows);
        group.bench_with_input(BenchmarkId::from_parameter(rows), &input, |b, data| {
            b.iter(|| {
                let parsed = parse_records(black_box(data)).expect("parse failed");
                black_box(parsed.records.len());
            });
        });
    }
    group.finish();
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_graph");
    for rows in [100usize, 1_000, 10_000] {
        let parsed = parse_records(&synthetic_csv(rows)).expect("parse failed");
        group.bench_with_input(
            BenchmarkId::new("all", rows),
            &parsed.records,
            |b, records| {
                b.iter(|| {
                    let graph = build_graph(black_box(records), None, 0);
                    black_box(graph.links.len());
                });
            },
        );
        group.bench_with_input(
            BenchmarkId::new("dior", rows),
            &parsed.records,
            |b, records| {
                b.iter(|| {
                    let graph = build_graph(black_box(records), Some("dior"), 0);
                    black_box(graph.links.len());
                });
            },
        );
    }
    group.finish();
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    let config = LayoutConfig::default();
    let order = NoteCatalog::global().sorted_order();
    for rows in [100usize, 10_000] {
        let parsed = parse_records(&synthetic_csv(rows)).expect("parse failed");
        let graph = build_graph(&parsed.records, None, 0);
        group.bench_with_input(BenchmarkId::from_parameter(rows), &graph, |b, graph| {
            b.iter(|| {
                let layout =
                    compute_layout(black_box(graph), order, 800.0, 800.0, &config).expect("layout failed");
                black_box(layout.links.len());
            });
        });
    }
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    let theme = Theme::classic();
    let render_cfg = RenderConfig::default();
    let view = ViewStyle {
        label_font_size: 14.0,
    };
    let parsed = parse_records(&synthetic_csv(1_000)).expect("parse failed");
    let graph = build_graph(&parsed.records, None, 0);
    let layout = compute_layout(
        &graph,
        NoteCatalog::global().sorted_order(),
        800.0,
        800.0,
        &LayoutConfig::default(),
    )
    .expect("layout failed");

    let mut hovered = InteractionState::default();
    hovered.hover("rose");
    for (name, interaction) in [("plain", InteractionState::default()), ("hover", hovered)] {
        group.bench_with_input(BenchmarkId::from_parameter(name), &interaction, |b, state| {
            b.iter(|| {
                let svg = render_svg(black_box(&layout), &theme, &render_cfg, view, state);
                black_box(svg.len());
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_parse, bench_build, bench_layout, bench_render);
criterion_main!(benches);
