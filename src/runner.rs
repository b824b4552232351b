use anyhow::{Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::mpsc::Sender;
use std::thread;

/// Captured result of one interpreter invocation. The text is shown the
/// same way whether the script succeeded or died with a traceback; the
/// exit code only words the status-bar message.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub id: usize,
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl RunOutput {
    pub fn is_empty(&self) -> bool {
        self.stdout.trim().is_empty() && self.stderr.trim().is_empty()
    }
}

/// Executes buffer contents with an external interpreter. Each run happens
/// on its own worker thread; completions come back over the channel the
/// Runner was built with, so the UI thread never blocks on a script.
pub struct Runner {
    interpreter: PathBuf,
    tx: Sender<RunOutput>,
    next_id: usize,
}

impl Runner {
    pub fn new(interpreter: PathBuf, tx: Sender<RunOutput>) -> Self {
        Self {
            interpreter,
            tx,
            next_id: 1,
        }
    }

    pub fn interpreter(&self) -> &Path {
        &self.interpreter
    }

    /// Start the given source on a worker thread. Returns the run id; the
    /// RunOutput arrives on the channel when the interpreter exits. A
    /// spawn failure is delivered the same way, as text.
    pub fn spawn(&mut self, source: String) -> usize {
        let id = self.next_id;
        self.next_id += 1;

        let interpreter = self.interpreter.clone();
        let tx = self.tx.clone();
        thread::spawn(move || {
            let output = match run_blocking(&interpreter, &source) {
                Ok((stdout, stderr, exit_code)) => RunOutput {
                    id,
                    stdout,
                    stderr,
                    exit_code,
                },
                Err(e) => RunOutput {
                    id,
                    stdout: String::new(),
                    stderr: format!("{e:#}"),
                    exit_code: -1,
                },
            };
            // The receiver may be gone during shutdown
            let _ = tx.send(output);
        });

        id
    }
}

/// Invoke the interpreter with `-` and pipe the source to its stdin, then
/// capture stdout and stderr to completion. Blocks the calling thread for
/// the whole run.
pub fn run_blocking(interpreter: &Path, source: &str) -> Result<(String, String, i32)> {
    let mut child = Command::new(interpreter)
        .arg("-")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .with_context(|| format!("Failed to launch interpreter: {}", interpreter.display()))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(source.as_bytes())
            .context("Failed to feed script to interpreter")?;
        // Dropping stdin closes the pipe so the interpreter sees EOF
    }

    let result = child
        .wait_with_output()
        .context("Failed to wait for interpreter")?;

    Ok((
        String::from_utf8_lossy(&result.stdout).to_string(),
        String::from_utf8_lossy(&result.stderr).to_string(),
        result.status.code().unwrap_or(-1),
    ))
}

#[cfg(test)]
#[cfg(unix)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::time::Duration;

    // `cat -` and `sh -` both read the program text from stdin, which is
    // exactly the contract the interpreter is invoked with, so the tests
    // need no Python installation.

    #[test]
    fn captures_stdout_of_successful_run() {
        let (stdout, stderr, code) =
            run_blocking(Path::new("sh"), "echo hi\n").expect("sh should run");
        assert!(stdout.contains("hi"));
        assert!(stderr.is_empty());
        assert_eq!(code, 0);
    }

    #[test]
    fn source_is_piped_not_passed_as_argument() {
        let (stdout, _, code) = run_blocking(Path::new("cat"), "print('x')\n").expect("cat");
        assert_eq!(stdout, "print('x')\n");
        assert_eq!(code, 0);
    }

    #[test]
    fn failing_run_surfaces_error_text() {
        let (_, stderr, code) =
            run_blocking(Path::new("sh"), "no_such_command_zzz\n").expect("sh should run");
        assert_ne!(code, 0);
        assert!(!stderr.is_empty());
    }

    #[test]
    fn missing_interpreter_is_an_error() {
        assert!(run_blocking(Path::new("/nonexistent/interpreter"), "").is_err());
    }

    #[test]
    fn spawn_delivers_output_over_channel() {
        let (tx, rx) = mpsc::channel();
        let mut runner = Runner::new(PathBuf::from("sh"), tx);
        let id = runner.spawn(String::from("echo from-thread\n"));

        let output = rx
            .recv_timeout(Duration::from_secs(10))
            .expect("run should complete");
        assert_eq!(output.id, id);
        assert!(output.stdout.contains("from-thread"));
        assert_eq!(output.exit_code, 0);
    }

    #[test]
    fn spawn_failure_arrives_as_text() {
        let (tx, rx) = mpsc::channel();
        let mut runner = Runner::new(PathBuf::from("/nonexistent/interpreter"), tx);
        runner.spawn(String::new());

        let output = rx
            .recv_timeout(Duration::from_secs(10))
            .expect("failure should still be delivered");
        assert!(output.stderr.contains("interpreter"));
        assert_eq!(output.exit_code, -1);
    }

    #[test]
    fn run_ids_increment() {
        let (tx, _rx) = mpsc::channel();
        let mut runner = Runner::new(PathBuf::from("cat"), tx);
        assert_eq!(runner.spawn(String::new()), 1);
        assert_eq!(runner.spawn(String::new()), 2);
    }
}
