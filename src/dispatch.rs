// dispatch.rs

use tracing::warn;

use crate::executor::Executor;
use crate::history::History;
use crate::render::Render;
use crate::transcript::Transcript;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum State {
    Idle,
    Dispatching,
}

/// Runs one submitted line through the local-intercept / remote-execute
/// cycle. At most one command is in flight; an overlapping submission is
/// dropped, not queued.
pub struct Dispatcher {
    state: State,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self { state: State::Idle }
    }

    /// `command` must already be trimmed.
    pub fn submit(
        &mut self,
        command: &str,
        history: &mut History,
        view: &mut dyn Render,
        transcript: &mut Transcript,
        executor: &Executor,
    ) {
        if command.is_empty() {
            return;
        }
        // local-only commands, exact and case-sensitive
        if command == "clear" || command == "cls" {
            view.clear();
            transcript.clear();
            return;
        }
        if self.state == State::Dispatching {
            warn!(command, "dropped submission while a command is in flight");
            return;
        }

        history.append(command);
        view.show_command_line(command);
        transcript.record_command(command);

        self.state = State::Dispatching;
        let result = executor.run(command);
        self.state = State::Idle;

        match result {
            // empty output renders nothing, no blank line
            Ok(output) if output.is_empty() => {}
            Ok(output) => {
                view.show_output(&output, false);
                transcript.record_output(&output);
            }
            Err(err) => {
                let line = format!("Error: {err}");
                view.show_output(&line, true);
                transcript.record_output(&line);
            }
        }
    }

    #[cfg(test)]
    fn force_in_flight(&mut self) {
        self.state = State::Dispatching;
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}
