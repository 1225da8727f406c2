// ripcrop-core/src/external/mocks.rs

// --- Mocking Infrastructure (for testing) ---

// Scripted stand-in for the ffmpeg spawner, used by unit and integration
// tests to drive the samplers without an ffmpeg binary. Only compiled for
// tests or with the "test-mocks" feature.

use super::ffmpeg_executor::{FfmpegProcess, FfmpegSpawner};
use crate::error::{CoreError, CoreResult};
use ffmpeg_sidecar::command::FfmpegCommand;
use ffmpeg_sidecar::event::{FfmpegEvent, LogLevel};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::process::ExitStatus;
use std::rc::Rc;

/// Mock implementation of FfmpegProcess.
#[derive(Clone)]
pub struct MockFfmpegProcess {
    /// Events to emit when handle_events is called.
    pub events_to_emit: Vec<FfmpegEvent>,
    /// Exit status to return when wait is called.
    pub exit_status: ExitStatus,
}

impl FfmpegProcess for MockFfmpegProcess {
    fn handle_events<F>(&mut self, mut handler: F) -> CoreResult<()>
    where
        F: FnMut(FfmpegEvent) -> CoreResult<()>,
    {
        for event in self.events_to_emit.clone() {
            handler(event)?;
        }
        Ok(())
    }

    fn wait(&mut self) -> CoreResult<ExitStatus> {
        Ok(self.exit_status)
    }
}

/// Mock implementation of FfmpegSpawner.
///
/// Outcomes are served in call order. The arguments of every spawned command
/// are recorded for later assertions.
#[derive(Clone, Default)]
pub struct MockFfmpegSpawner {
    outcomes: Rc<RefCell<VecDeque<CoreResult<MockFfmpegProcess>>>>,
    received_calls: Rc<RefCell<Vec<Vec<String>>>>,
}

impl MockFfmpegSpawner {
    pub fn new() -> Self {
        Default::default()
    }

    /// Queues a successful run emitting `lines` as info log events.
    pub fn push_log_lines<I, L>(&self, lines: I)
    where
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        let events = lines
            .into_iter()
            .map(|line| FfmpegEvent::Log(LogLevel::Info, line.into()))
            .collect();
        self.outcomes.borrow_mut().push_back(Ok(MockFfmpegProcess {
            events_to_emit: events,
            exit_status: ExitStatus::default(),
        }));
    }

    /// Queues a run that fails to spawn.
    pub fn push_spawn_error(&self, error: CoreError) {
        self.outcomes.borrow_mut().push_back(Err(error));
    }

    /// Queues an arbitrary process.
    pub fn push_process(&self, process: MockFfmpegProcess) {
        self.outcomes.borrow_mut().push_back(Ok(process));
    }

    pub fn get_received_calls(&self) -> Vec<Vec<String>> {
        self.received_calls.borrow().clone()
    }

    pub fn remaining_outcomes(&self) -> usize {
        self.outcomes.borrow().len()
    }
}

impl FfmpegSpawner for MockFfmpegSpawner {
    type Process = MockFfmpegProcess;

    fn spawn(&self, cmd: FfmpegCommand) -> CoreResult<Self::Process> {
        let args: Vec<String> = cmd.get_args().map(|s| s.to_string_lossy().into_owned()).collect();
        self.received_calls.borrow_mut().push(args.clone());

        match self.outcomes.borrow_mut().pop_front() {
            Some(outcome) => outcome,
            None => {
                log::error!("MockFfmpegSpawner: No outcome queued for command: {:?}", args);
                panic!("MockFfmpegSpawner: No outcome queued for command: {args:?}");
            }
        }
    }
}
