//! Replay a capture file through the full pipeline into a JSON lines file

use std::fs;
use std::io::Write;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

use myahrs_connectors::{
    load_config, replay::write_event, ChannelSink, JsonLinesSink, JsonLinesSource,
};
use myahrs_core::{
    convert::quaternion_from_rpy,
    session,
    time::FixedTime,
    types::{ImuData, Vector3},
    AcquisitionHandler, Deferred, PublishMode, PublishWorker, Publisher, RawSample, Record,
    SampleStore, SourceEvent,
};
use tempfile::NamedTempFile;

fn sample(k: u32) -> RawSample {
    RawSample {
        quaternion: quaternion_from_rpy(0.0, 0.0, f64::from(k) * 0.01),
        imu: ImuData {
            accel: Vector3::new(0.0, 0.0, 1.0),
            gyro: Vector3::new(k as f32, 0.0, 0.0),
            mag: Vector3::default(),
        },
    }
}

fn write_capture(count: u32) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write_event(
        &mut file,
        &SourceEvent::AttributeChange { sensor_id: 0, name: "divider".into(), value: "1".into() },
    )
    .unwrap();
    for k in 1..=count {
        write_event(&mut file, &SourceEvent::Sample { sensor_id: 0, sample: sample(k) }).unwrap();
    }
    // A corrupt line mid-capture
    writeln!(file, "{{\"event\":\"sample\"").unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn capture_replays_to_json_lines() {
    let capture = write_capture(20);
    let output = NamedTempFile::new().unwrap();

    let sink = JsonLinesSink::create(output.path()).unwrap();
    let publisher = Publisher::new(sink.clone(), sink.clone(), FixedTime::new(1_000));
    let mut handler = AcquisitionHandler::new(Arc::new(SampleStore::new()), publisher);

    let mut source = JsonLinesSource::from_path(capture.path()).unwrap();
    session::initialize(&mut source, &Default::default()).unwrap();
    let stop = AtomicBool::new(false);
    let stats = session::drive(&mut source, &mut handler, &stop, Duration::from_millis(1)).unwrap();
    sink.flush().unwrap();

    assert_eq!(stats.samples, 20);
    assert_eq!(source.stats().malformed, 1);
    assert_eq!(source.commands().len(), 3);

    let text = fs::read_to_string(output.path()).unwrap();
    let records: Vec<Record> = text.lines().map(|l| serde_json::from_str(l).unwrap()).collect();
    assert_eq!(records.len(), 40);

    for (i, pair) in records.chunks(2).enumerate() {
        match (&pair[0], &pair[1]) {
            (Record::Imu(msg), Record::Tf(tf)) => {
                assert_eq!(msg.header.stamp, tf.header.stamp);
                assert_eq!(msg.linear_acceleration.z, 9.80665);
                let expected = f64::from((i + 1) as f32) * myahrs_core::constants::DEG_TO_RAD;
                assert_eq!(msg.angular_velocity.x, expected);
            }
            other => panic!("unexpected pair {:?}", other),
        }
    }
}

#[test]
fn decoupled_config_drives_worker_over_channel() {
    let mut config_file = NamedTempFile::new().unwrap();
    write!(config_file, r#"{{ "publish": {{ "mode": "decoupled", "idle_timeout_ms": 5 }} }}"#).unwrap();
    let config = load_config(config_file.path()).unwrap();
    assert_eq!(config.publish.mode, PublishMode::Decoupled);

    let capture = write_capture(100);
    let store = Arc::new(SampleStore::new());
    let (sink, rx) = ChannelSink::new();
    let publisher = Publisher::new(sink.clone(), sink, FixedTime::new(0)).with_frames(config.frames.clone());
    let worker = PublishWorker::spawn(Arc::clone(&store), publisher, config.publish.idle_timeout()).unwrap();

    let mut handler = AcquisitionHandler::new(Arc::clone(&store), Deferred);
    let mut source = JsonLinesSource::from_path(capture.path()).unwrap();
    let stop = AtomicBool::new(false);
    session::drive(&mut source, &mut handler, &stop, Duration::from_millis(1)).unwrap();
    assert_eq!(store.sequence(), 100);

    // Wait for the newest sample to come through
    let last = f64::from(100.0f32) * myahrs_core::constants::DEG_TO_RAD;
    let mut rates = Vec::new();
    while rates.last() != Some(&last) {
        match rx.recv_timeout(Duration::from_secs(5)).unwrap() {
            Record::Imu(msg) => rates.push(msg.angular_velocity.x),
            Record::Tf(_) => {}
        }
    }

    let stats = worker.stop();
    assert_eq!(stats.published + stats.skipped, 100);
    assert!(rates.windows(2).all(|w| w[0] < w[1]));
}
