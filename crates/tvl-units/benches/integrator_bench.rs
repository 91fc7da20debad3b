// SPDX-License-Identifier: LGPL-3.0-or-later

//! Throughput benchmarks for the temporal loudness integrator.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tvl_signal::{Module, SignalBank};
use tvl_units::auditory::cam_space;
use tvl_units::loudness::IntegratedLoudness;

fn bench_integrator(c: &mut Criterion) {
    let mut group = c.benchmark_group("integrated_loudness");

    // Channel counts of a coarse and a dense auditory filterbank.
    for &channels in &[39usize, 150] {
        let mut input = SignalBank::new(2, channels, 1, 32000.0);
        input.set_frame_rate(1000.0);
        input.set_centre_freqs(&cam_space(50.0, 0.25, channels));
        for ear in 0..input.ears() {
            for channel in 0..channels {
                input.set_sample(ear, channel, 0, 0.01 + channel as f64 * 1e-4);
            }
        }

        let mut module = IntegratedLoudness::new("GM2002", 1.0);
        module.initialize(&input).unwrap();

        group.throughput(criterion::Throughput::Elements(channels as u64));
        group.bench_function(format!("frame/{}ch", channels), |b| {
            b.iter(|| module.process(black_box(&input)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_integrator);
criterion_main!(benches);
