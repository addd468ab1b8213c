use criterion::{black_box, criterion_group, criterion_main, Criterion};
use nudge_editor::{resolve_drop, Document, DropPosition};
use nudge_model::{CampaignId, LayerId, LayerKind, NudgeType};

/// A main surface with `cards` cards, each holding a carousel of three
/// slides with a text layer on every slide
fn build_document(cards: usize) -> (Document, Vec<LayerId>) {
    let mut doc = Document::new(CampaignId::new("bench"), "Bench", NudgeType::Modal);
    let mut roots = Vec::with_capacity(cards);

    for _ in 0..cards {
        let card = doc.add_layer(LayerKind::Container, None).unwrap();
        let carousel = doc.add_layer(LayerKind::Carousel, Some(&card)).unwrap();
        for _ in 0..3 {
            let slide = doc.add_slide(&carousel).unwrap();
            doc.add_layer(LayerKind::Text, Some(&slide)).unwrap();
        }
        roots.push(card);
    }

    (doc, roots)
}

fn duplicate_card(c: &mut Criterion) {
    let (doc, roots) = build_document(50);
    let target = roots[25].clone();

    c.bench_function("duplicate_card", |b| {
        b.iter(|| {
            let mut doc = doc.clone();
            doc.duplicate_layer(black_box(&target)).unwrap()
        })
    });
}

fn delete_card(c: &mut Criterion) {
    let (doc, roots) = build_document(50);
    let target = roots[25].clone();

    c.bench_function("delete_card", |b| {
        b.iter(|| {
            let mut doc = doc.clone();
            doc.delete_layer(black_box(&target)).unwrap()
        })
    });
}

fn resolve_drop_in_long_list(c: &mut Criterion) {
    let ordered: Vec<String> = (0..500).map(|i| format!("interface-{}", i)).collect();
    let dragged = ordered[10].clone();
    let hovered = ordered[480].clone();

    c.bench_function("resolve_drop_500", |b| {
        b.iter(|| resolve_drop(black_box(&ordered), &dragged, &hovered, DropPosition::After))
    });
}

criterion_group!(benches, duplicate_card, delete_card, resolve_drop_in_long_list);
criterion_main!(benches);
