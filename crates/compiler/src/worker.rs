//! Background semantic checking.

use std::thread;

use bantam_compiler_syntax::Program;
use crossbeam_channel::{Receiver, TryRecvError};
use tracing::{debug, warn};

use crate::{check_program, CheckReport, CompilerError, Result};

/// Runs [`check_program`] on a dedicated thread.
///
/// The report is delivered exactly once, either through [`try_report`] or [`wait`].
/// Dropping the worker joins the thread.
///
/// [`try_report`]: SemanticCheckWorker::try_report
/// [`wait`]: SemanticCheckWorker::wait
pub struct SemanticCheckWorker {
    handle: Option<thread::JoinHandle<()>>,
    report_rx: Receiver<CheckReport>,
}

impl SemanticCheckWorker {
    pub fn spawn(program: Program, file_name: impl Into<String>) -> Result<Self> {
        let file_name = file_name.into();
        let (report_tx, report_rx) = crossbeam_channel::bounded(1);

        let handle = thread::Builder::new()
            .name("semantic-check".into())
            .spawn(move || {
                debug!("Semantic check of {file_name} started");
                let report = check_program(program, &file_name);
                if report_tx.send(report).is_err() {
                    debug!("Report for {file_name} dropped, worker was abandoned");
                }
            })
            .map_err(CompilerError::Spawn)?;

        Ok(Self {
            handle: Some(handle),
            report_rx,
        })
    }

    /// Returns the report if the check already finished.
    pub fn try_report(&self) -> Option<CheckReport> {
        match self.report_rx.try_recv() {
            Ok(report) => Some(report),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }

    /// Blocks until the check finishes.
    pub fn wait(mut self) -> Result<CheckReport> {
        let report = self
            .report_rx
            .recv()
            .map_err(|_| CompilerError::WorkerDisconnected);
        self.join();
        report
    }

    fn join(&mut self) {
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("Semantic check thread panicked");
            }
        }
    }
}

impl Drop for SemanticCheckWorker {
    fn drop(&mut self) {
        self.join();
    }
}
