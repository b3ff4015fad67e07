use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

use touchline_terminal::assessment::{
    generate_demo_result, guide_items, Corner, CornerObservations, GuidedAssessment,
};
use touchline_terminal::attendance::attendance_rate;
use touchline_terminal::seed;
use touchline_terminal::skills::{overall_score, previous_for_player};

fn full_checklist() -> GuidedAssessment {
    let area = |corner: Corner| CornerObservations {
        checked: guide_items(corner).iter().map(|s| s.to_string()).collect(),
        notes: "Strong session throughout".to_string(),
    };
    GuidedAssessment {
        technical: area(Corner::Technical),
        tactical: area(Corner::Tactical),
        physical: area(Corner::Physical),
        psychological: area(Corner::Psychological),
    }
}

fn bench_demo_scorer(c: &mut Criterion) {
    let data = full_checklist();
    c.bench_function("demo_scorer", |b| {
        b.iter(|| {
            let result =
                generate_demo_result(black_box(&data), "Emma Patel", "Midfielder", "U11");
            black_box(result.technical.score);
        })
    });
}

fn bench_attendance_rate(c: &mut Criterion) {
    let events = seed::seed_events();
    let records = seed::seed_attendance();
    c.bench_function("attendance_rate", |b| {
        b.iter(|| {
            for player_id in ["p1", "p2", "p3", "p4", "p5", "p6"] {
                black_box(attendance_rate(
                    black_box(player_id),
                    &records,
                    &events,
                ));
            }
        })
    });
}

fn bench_rating_lookups(c: &mut Criterion) {
    let ratings = seed::seed_ratings();
    c.bench_function("rating_lookups", |b| {
        b.iter(|| {
            for player_id in ["p1", "p2", "p3", "p4", "p5", "p6"] {
                if let Some(previous) = previous_for_player(&ratings, player_id) {
                    black_box(overall_score(previous));
                }
            }
        })
    });
}

criterion_group!(
    benches,
    bench_demo_scorer,
    bench_attendance_rate,
    bench_rating_lookups
);
criterion_main!(benches);
