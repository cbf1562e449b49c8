//! Benchmarking LNAV message generation,
//! from the bundled RINEX and SEM resources
extern crate criterion;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use lnav::prelude::*;
use std::str::FromStr;

const RINEX: &str = "test_resources/NAV/V3/GODS00USA_R_20240830000_01D_GN.rnx";
const SEM: &str = "test_resources/SEM/current.alm";

fn benchmark(c: &mut Criterion) {
    let nav = NavigationFile::from_file(RINEX).unwrap();
    let almanac = sem::from_file(SEM).unwrap();
    let sv = SV::from_str("G05").unwrap();
    let epoch = Epoch::from_str("2024-03-23T02:00:00 GPST").unwrap();

    let encoder = Encoder::from_records(&nav.ephemerides, sv, epoch, &almanac)
        .unwrap()
        .with_ionosphere(nav.ionosphere);

    let mut encoding_grp = c.benchmark_group("encoding");

    encoding_grp.bench_function("frame", |b| {
        b.iter(|| {
            let _ = encoder.build_frame(black_box(18)).unwrap();
        })
    });

    encoding_grp.bench_function("message", |b| {
        b.iter(|| {
            let _ = encoder.encode().unwrap();
        })
    });

    let message = encoder.encode().unwrap();
    encoding_grp.bench_function("formatting", |b| {
        b.iter(|| {
            let mut buf = Vec::with_capacity(48_000);
            message.format(&mut buf).unwrap();
        })
    });

    encoding_grp.finish();

    let mut parsing_grp = c.benchmark_group("parsing");

    parsing_grp.bench_function("NAV/V3", |b| {
        b.iter(|| {
            let _ = NavigationFile::from_file(RINEX).unwrap();
        })
    });

    parsing_grp.bench_function("SEM", |b| {
        b.iter(|| {
            let _ = sem::from_file(SEM).unwrap();
        })
    });

    parsing_grp.finish();
}

criterion_group!(benches, benchmark);
criterion_main!(benches);
