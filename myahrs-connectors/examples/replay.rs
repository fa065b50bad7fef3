//! Replay a capture through the pipeline and print the published records
//!
//! ```text
//! cargo run -p myahrs-connectors --example replay -- capture.jsonl [config.json]
//! ```

use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

use myahrs_connectors::{load_config, Connector, JsonLinesSink, JsonLinesSource};
use myahrs_core::{
    session, time::SystemTime, AcquisitionHandler, Deferred, DriverConfig, PublishMode,
    PublishWorker, Publisher, SampleStore,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let capture = args.next().ok_or("usage: replay <capture.jsonl> [config.json]")?;
    let config = match args.next() {
        Some(path) => load_config(path)?,
        None => DriverConfig::default(),
    };

    let store = Arc::new(SampleStore::new());
    let sink = JsonLinesSink::new(std::io::stdout());
    let publisher = Publisher::new(sink.clone(), sink.clone(), SystemTime).with_frames(config.frames.clone());

    let mut source = JsonLinesSource::from_path(&capture)?;
    session::initialize(&mut source, &config.device)?;
    let stop = AtomicBool::new(false);
    let poll = Duration::from_millis(myahrs_core::constants::time::DEFAULT_POLL_INTERVAL_MS);

    match config.publish.mode {
        PublishMode::Inline => {
            let mut handler = AcquisitionHandler::new(store, publisher);
            session::drive(&mut source, &mut handler, &stop, poll)?;
            eprintln!("{:?}", handler.stats());
        }
        PublishMode::Decoupled => {
            let worker = PublishWorker::spawn(Arc::clone(&store), publisher, config.publish.idle_timeout())?;
            let mut handler = AcquisitionHandler::new(store, Deferred);
            session::drive(&mut source, &mut handler, &stop, poll)?;
            eprintln!("{:?} {:?}", handler.stats(), worker.stop());
        }
    }

    eprintln!("{:?} {:?}", source.stats(), sink.stats());
    Ok(())
}
