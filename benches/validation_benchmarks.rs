//! Performance benchmarks for the per-keystroke and per-frame hot paths.
//!
//! - Phone validation across the accepted input shapes
//! - Full form validation
//! - Count-up value computation

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use elaira_inquiry::animation::{count_up_value, COUNT_UP_DURATION};
use elaira_inquiry::domain::validate_phone_number;
use elaira_inquiry::form::{validate, FormFields};
use std::time::Duration;

fn bench_phone_validation(c: &mut Criterion) {
    let mut group = c.benchmark_group("validate_phone_number");

    for input in [
        "9876543210",
        "+91 98765 43210",
        "0091 (987) 654-3210",
        "98765abcde",
        "12345",
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(input), input, |b, input| {
            b.iter(|| validate_phone_number(black_box(input)))
        });
    }

    group.finish();
}

fn bench_form_validation(c: &mut Criterion) {
    let fields = FormFields {
        name: "Asha Rao".to_string(),
        email: "asha@example.com".to_string(),
        phone: "+91 98765 43210".to_string(),
        message: "Looking for a 3BHK on a higher floor".to_string(),
        ..FormFields::default()
    };

    c.bench_function("validate_form", |b| {
        b.iter(|| validate(black_box(&fields)))
    });
}

fn bench_count_up_value(c: &mut Criterion) {
    c.bench_function("count_up_value_frame", |b| {
        let mut frame: u64 = 0;
        b.iter(|| {
            frame = (frame + 1) % 126;
            let elapsed = Duration::from_millis(frame * 16);
            count_up_value(black_box(290), elapsed, COUNT_UP_DURATION)
        })
    });
}

criterion_group!(
    benches,
    bench_phone_validation,
    bench_form_validation,
    bench_count_up_value
);
criterion_main!(benches);
