use criterion::{black_box, criterion_group, criterion_main, Criterion};

use myahrs_core::{
    convert::{quaternion_from_rpy, quaternion_to_euler, to_imu_message, to_transform},
    pipeline::Publisher,
    time::FixedTime,
    types::{ImuData, RawSample, Vector3},
    FrameConfig, FusedSample, MemorySink, SampleStore,
};

fn sample() -> FusedSample {
    FusedSample::from_raw(&RawSample {
        quaternion: quaternion_from_rpy(0.1, -0.2, 0.3),
        imu: ImuData {
            accel: Vector3::new(0.01, -0.02, 1.0),
            gyro: Vector3::new(1.5, -0.3, 0.2),
            mag: Vector3::new(20.0, -5.0, 40.0),
        },
    })
}

fn bench_convert(c: &mut Criterion) {
    let s = sample();
    let frames = FrameConfig::default();

    c.bench_function("quaternion_to_euler", |b| {
        b.iter(|| quaternion_to_euler(black_box(s.quaternion())))
    });
    c.bench_function("to_imu_message", |b| {
        b.iter(|| to_imu_message(black_box(&s), &frames.parent, 0))
    });
    c.bench_function("to_transform", |b| {
        b.iter(|| to_transform(black_box(&s), &frames, 0))
    });
}

fn bench_store(c: &mut Criterion) {
    let store = SampleStore::new();
    let s = sample();

    c.bench_function("store_write", |b| b.iter(|| store.write(black_box(s))));
    c.bench_function("store_latest", |b| b.iter(|| store.latest()));
    c.bench_function("publish_latest", |b| {
        let sink = MemorySink::new();
        let mut publisher = Publisher::new(sink.clone(), sink.clone(), FixedTime::new(0));
        b.iter(|| {
            publisher.publish_latest(&store).ok();
            // Keep the recording sink from growing without bound
            if sink.len() > 10_000 {
                sink.clear();
            }
        })
    });
}

criterion_group!(benches, bench_convert, bench_store);
criterion_main!(benches);
