// Ovcomp - Overhead Compensation Reporting
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Aggregation benchmarks.
//!
//! Measures percentage derivation and summary-row computation over a
//! synthetic suite of benchmarks with the full set of phases.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ovcomp_core::{derive_benchmark, with_summary_rows, RawBenchmark, RawPhase, ResultSet};

const PHASES: &[&str] = &[
    "total",
    "ss-all",
    "ss-cpd",
    "ss-min",
    "ss-conj",
    "unw-all",
    "unw-min",
    "hybrid-st",
    "hybrid-dyn",
];

fn raw_benchmark(seed: usize) -> RawBenchmark {
    let reference = 10.0 + seed as f64;
    RawBenchmark {
        benchmark: None,
        sampling_percent: 1.5,
        phases: PHASES
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let instrumented = reference * (1.0 + i as f64 / 20.0);
                (
                    name.to_string(),
                    RawPhase {
                        reference,
                        instrumented: Some(instrumented),
                        profiled: instrumented + 0.5,
                        compensated: reference + 0.1,
                        driver: Some(vec![instrumented, instrumented + 0.2, instrumented - 0.1]),
                    },
                )
            })
            .collect(),
    }
}

fn bench_derive(c: &mut Criterion) {
    let raw = raw_benchmark(3);
    c.bench_function("derive_benchmark", |b| {
        b.iter(|| derive_benchmark(black_box(&raw), false))
    });
}

fn bench_summary_rows(c: &mut Criterion) {
    let mut group = c.benchmark_group("summary_rows");
    for count in [10usize, 30, 100] {
        let set: ResultSet = (0..count)
            .map(|i| (format!("{}.bench", 400 + i), derive_benchmark(&raw_benchmark(i), false)))
            .collect();
        group.bench_with_input(BenchmarkId::from_parameter(count), &set, |b, set| {
            b.iter(|| with_summary_rows(black_box(set), Some("403.bench")))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_derive, bench_summary_rows);
criterion_main!(benches);
