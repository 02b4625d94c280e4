//! Background batch execution
//!
//! Runs a [`BatchConverter`] on its own thread and streams progress and the
//! final result back over a channel, so a front end can keep its own loop
//! responsive and pick events up whenever it likes.

use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread::{self, JoinHandle};
use crate::error::{SaverError, Result};
use super::{BatchConverter, ConversionRequest, ConversionResult, ProgressEvent};

#[derive(Debug)]
pub enum BatchEvent {
    Progress(ProgressEvent),
    /// Always the last event of a batch.
    Finished(Result<ConversionResult>),
}

/// Outcome of a non-blocking poll on a [`BatchHandle`].
#[derive(Debug)]
pub enum BatchPoll {
    Event(BatchEvent),
    /// Worker still running, nothing queued.
    Idle,
    /// Worker gone and every event consumed.
    Closed,
}

pub struct BatchHandle {
    rx: Receiver<BatchEvent>,
    handle: JoinHandle<()>,
}

pub fn spawn_batch(request: ConversionRequest) -> Result<BatchHandle> {
    let (tx, rx) = channel::<BatchEvent>();

    let handle = thread::Builder::new()
        .name("memsaver-batch".to_string())
        .spawn(move || {
            let converter = BatchConverter::new(request);
            let progress_tx = tx.clone();
            let result = converter.run(&mut |event: &ProgressEvent| {
                let _ = progress_tx.send(BatchEvent::Progress(event.clone()));
            });
            let _ = tx.send(BatchEvent::Finished(result));
        })
        .map_err(|e| SaverError::engine(format!("Cannot start batch worker: {}", e)))?;

    Ok(BatchHandle { rx, handle })
}

impl BatchHandle {
    /// Next pending event without blocking.
    pub fn try_event(&self) -> BatchPoll {
        match self.rx.try_recv() {
            Ok(event) => BatchPoll::Event(event),
            Err(TryRecvError::Empty) => BatchPoll::Idle,
            Err(TryRecvError::Disconnected) => BatchPoll::Closed,
        }
    }

    /// Block until the batch ends, forwarding progress to `on_progress`.
    pub fn wait<F: FnMut(&ProgressEvent)>(self, mut on_progress: F) -> Result<ConversionResult> {
        let mut finished = None;
        for event in self.rx.iter() {
            match event {
                BatchEvent::Progress(progress) => on_progress(&progress),
                BatchEvent::Finished(result) => finished = Some(result),
            }
        }

        let joined = self.handle.join();
        match (finished, joined) {
            (Some(result), _) => result,
            (None, Err(_)) => Err(SaverError::engine("Batch worker panicked")),
            (None, Ok(())) => Err(SaverError::engine("Batch worker exited without a result")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hound::{SampleFormat, WavSpec, WavWriter};
    use tempfile::TempDir;
    use crate::audio::TargetFormat;

    #[test]
    fn test_worker_streams_progress_then_result() {
        let temp_dir = TempDir::new().unwrap();
        let spec = WavSpec { channels: 1, sample_rate: 32000, bits_per_sample: 16, sample_format: SampleFormat::Int };
        let mut inputs = Vec::new();
        for name in ["one.wav", "two.wav", "three.wav"] {
            let path = temp_dir.path().join(name);
            let mut writer = WavWriter::create(&path, spec).unwrap();
            for i in 0..320 {
                writer.write_sample(i as i16).unwrap();
            }
            writer.finalize().unwrap();
            inputs.push(path);
        }
        let output = temp_dir.path().join("out");
        std::fs::create_dir(&output).unwrap();

        let handle = spawn_batch(ConversionRequest::new(inputs, TargetFormat::default(), &output)).unwrap();
        let mut seen = Vec::new();
        let result = handle.wait(|e| seen.push(e.index)).unwrap();

        assert_eq!(seen, vec![1, 2, 3]);
        assert_eq!(result.outputs, vec!["one.wav", "two.wav", "three.wav"]);
    }

    #[test]
    fn test_polling_until_finished() {
        let temp_dir = TempDir::new().unwrap();
        let spec = WavSpec { channels: 2, sample_rate: 44100, bits_per_sample: 16, sample_format: SampleFormat::Int };
        let source = temp_dir.path().join("hat.wav");
        let mut writer = WavWriter::create(&source, spec).unwrap();
        for i in 0..882 {
            writer.write_sample(i as i16).unwrap();
        }
        writer.finalize().unwrap();
        let notes = temp_dir.path().join("notes.txt");
        std::fs::write(&notes, b"skip me").unwrap();

        let output = temp_dir.path().join("out");
        std::fs::create_dir(&output).unwrap();

        let handle = spawn_batch(ConversionRequest::new(
            vec![notes, source], TargetFormat::default(), &output,
        )).unwrap();

        let mut progress = Vec::new();
        let finished = loop {
            match handle.try_event() {
                BatchPoll::Event(BatchEvent::Progress(event)) => progress.push(event.index),
                BatchPoll::Event(BatchEvent::Finished(result)) => break result,
                BatchPoll::Idle => std::thread::sleep(std::time::Duration::from_millis(1)),
                BatchPoll::Closed => panic!("worker closed before finishing"),
            }
        };

        assert_eq!(progress, vec![2]);
        assert_eq!(finished.unwrap().outputs, vec!["hat.wav"]);

        // After the final event the channel drains and closes.
        loop {
            match handle.try_event() {
                BatchPoll::Closed => break,
                BatchPoll::Idle => std::thread::sleep(std::time::Duration::from_millis(1)),
                BatchPoll::Event(event) => panic!("unexpected event after finish: {:?}", event),
            }
        }
    }

    #[test]
    fn test_worker_reports_fail_stop_error() {
        let temp_dir = TempDir::new().unwrap();
        let request = ConversionRequest::new(
            vec![temp_dir.path().join("ghost.wav")], TargetFormat::default(), temp_dir.path(),
        );

        let err = spawn_batch(request).unwrap().wait(|_| {}).unwrap_err();
        assert!(matches!(err, SaverError::Engine { .. }));
    }
}
