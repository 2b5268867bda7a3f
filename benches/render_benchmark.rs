//! Benchmarks for richpost decoding and rendering.
//!
//! Run with: cargo bench
//!
//! These benchmarks use synthetic posts of increasing size.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::{json, Value};

/// Creates a synthetic editor state with the given number of sections.
///
/// Each section is a heading with an image followed by two paragraphs.
fn create_test_document(sections: usize) -> Value {
    let mut children = Vec::with_capacity(sections * 3);
    for i in 0..sections {
        children.push(json!({
            "type": "heading", "version": 1, "tag": "h2",
            "direction": "ltr", "format": "", "indent": 0,
            "children": [
                {"type": "text", "version": 1, "detail": 0, "format": 1, "mode": "normal",
                 "style": "", "text": format!("Section {}", i + 1)},
                {"type": "image", "version": 1, "src": format!("/upload/{}-photo.png", i),
                 "altText": "photo", "alignment": "center"}
            ]
        }));
        for _ in 0..2 {
            children.push(json!({
                "type": "paragraph", "version": 1,
                "direction": "ltr", "format": "", "indent": 0, "textFormat": 0, "textStyle": "",
                "children": [
                    {"type": "text", "version": 1, "detail": 0, "format": 0, "mode": "normal",
                     "style": "", "text": "Benchmark body text for richpost rendering <&> "},
                    {"type": "text", "version": 1, "detail": 0, "format": 3, "mode": "normal",
                     "style": "color: red", "text": "with emphasis."}
                ]
            }));
        }
    }
    json!({"root": {"type": "root", "version": 1, "direction": null, "format": "",
                    "indent": 0, "children": children}})
}

/// Benchmark payload detection.
fn bench_payload_detection(c: &mut Criterion) {
    let doc = create_test_document(1);
    let wrapped = json!({"id": 1, "jsonModel": json!({"content": doc.clone()}).to_string()});

    c.bench_function("detect_document", |b| {
        b.iter(|| richpost::detect_payload(black_box(&doc)).unwrap());
    });

    c.bench_function("unwrap_wrapped_model", |b| {
        b.iter(|| richpost::document_from_payload(black_box(&wrapped)).unwrap());
    });
}

/// Benchmark decoding and rendering at various sizes.
fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    let options = richpost::RenderOptions::new().with_asset_base_url("https://api.example.com");

    for sections in [1, 10, 100].iter() {
        let value = create_test_document(*sections);
        let json = value.to_string();
        let doc = richpost::wire::from_wire(&value).unwrap();

        group.bench_function(format!("decode_{}_sections", sections), |b| {
            b.iter(|| richpost::wire::from_json(black_box(&json)).unwrap());
        });

        group.bench_function(format!("html_{}_sections", sections), |b| {
            b.iter(|| richpost::render::to_html(black_box(&doc), &options).unwrap());
        });

        group.bench_function(format!("image_names_{}_sections", sections), |b| {
            b.iter(|| richpost::render::extract_image_names(black_box(&doc)));
        });
    }

    group.finish();
}

/// Benchmark builder pattern overhead.
fn bench_builder_creation(c: &mut Criterion) {
    c.bench_function("builder_creation", |b| {
        b.iter(|| {
            let _builder = richpost::Richpost::new()
                .lenient()
                .with_base_url("https://api.example.com")
                .with_max_heading(3);
        });
    });
}

criterion_group!(
    benches,
    bench_payload_detection,
    bench_render,
    bench_builder_creation,
);
criterion_main!(benches);
