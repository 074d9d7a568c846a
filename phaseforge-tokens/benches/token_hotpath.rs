use criterion::{black_box, criterion_group, criterion_main, Criterion};
use phaseforge_core::{BuilderConfig, GlobalInputs, InputScope, PhaseCatalog, PhaseId, ViewKind};
use phaseforge_tokens::{analyze_tokens, parse_tokens};

const TEMPLATE_SMALL: &str = "Project [PROJECT_NAME] ships [FEATURE_NAME] ([FEATURE_SLUG]).";

fn global_scope() -> InputScope {
    GlobalInputs {
        project_name: "Acme".to_string(),
        feature_name: "Checkout".to_string(),
        feature_slug: "checkout".to_string(),
        requirements: "Pay with a saved card".to_string(),
        ..GlobalInputs::default()
    }
    .to_scope(&BuilderConfig::default())
}

fn bench_parse(c: &mut Criterion) {
    let catalog = PhaseCatalog::builtin().expect("builtin catalog");
    let fix_report: PhaseId = "5".parse().expect("phase id");
    let large = catalog.require(fix_report).expect("fix report").template.clone();

    c.bench_function("tokens/parse_small", |b| {
        b.iter(|| black_box(parse_tokens(black_box(TEMPLATE_SMALL)).tokens.len()));
    });

    c.bench_function("tokens/parse_fix_report", |b| {
        b.iter(|| black_box(parse_tokens(black_box(&large)).positions.len()));
    });
}

fn bench_analyze(c: &mut Criterion) {
    let catalog = PhaseCatalog::builtin().expect("builtin catalog");
    let global = global_scope();
    let phase = InputScope::new();

    c.bench_function("tokens/analyze_frontend_catalog", |b| {
        b.iter(|| {
            for config in catalog.phases_for(ViewKind::Frontend) {
                let analysis = analyze_tokens(black_box(&config.template), &global, &phase);
                black_box(analysis.missing_tokens.len());
            }
        });
    });
}

criterion_group!(benches, bench_parse, bench_analyze);
criterion_main!(benches);
