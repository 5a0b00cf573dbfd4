//! Test helpers for behavioral specifications.
//!
//! Provides a fake controller and a high-level DSL for testing ji CLI behavior.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, dead_code)]

use std::os::unix::net::UnixListener;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::thread::JoinHandle;

use ji_wire::{Request, Response};

// Aggressive timeouts for fast tests.
//
// IMPORTANT:
//   Do NOT change these.
//   File a performance bug instead.
const JI_TIMEOUT_IPC_MS: &str = "500";

/// Returns the path to a binary, checking llvm-cov target directory first.
/// This works with both standard builds and llvm-cov coverage runs.
fn binary_path(name: &str) -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));

    let llvm_cov_path = manifest_dir.join("target/llvm-cov-target/debug").join(name);
    if llvm_cov_path.exists() {
        return llvm_cov_path;
    }

    let standard = manifest_dir.join("target/debug").join(name);
    if standard.exists() {
        return standard;
    }

    // Resolved relative to the test binary (target/debug/deps/specs-<hash>)
    assert_cmd::cargo::cargo_bin(name)
}

/// Returns a Command configured to run the ji binary
pub fn ji_cmd() -> Command {
    Command::new(binary_path("ji"))
}

/// Create a CLI builder for ji commands
pub fn cli() -> CliBuilder {
    CliBuilder::new()
}

/// High-level CLI builder for fluent test assertions
pub struct CliBuilder {
    args: Vec<String>,
    envs: Vec<(String, String)>,
}

impl CliBuilder {
    fn new() -> Self {
        Self {
            args: Vec::new(),
            envs: vec![("JI_TIMEOUT_IPC_MS".into(), JI_TIMEOUT_IPC_MS.into())],
        }
    }

    /// Add CLI arguments
    pub fn args(mut self, args: &[&str]) -> Self {
        self.args.extend(args.iter().map(|s| s.to_string()));
        self
    }

    /// Set environment variable
    pub fn env(mut self, key: &str, value: impl AsRef<Path>) -> Self {
        self.envs.push((
            key.to_string(),
            value.as_ref().to_string_lossy().to_string(),
        ));
        self
    }

    /// Build the command without running it
    pub fn command(self) -> Command {
        let mut cmd = ji_cmd();
        cmd.args(&self.args);

        // Prevent the caller's controller from leaking into tests.
        cmd.env_remove("JI_CONTROLLER");
        cmd.env_remove("RUST_LOG");

        for (key, value) in self.envs {
            cmd.env(key, value);
        }

        cmd
    }

    /// Run and expect success (exit code 0)
    pub fn passes(self) -> RunAssert {
        let mut cmd = self.command();
        let output = cmd.output().expect("command should run");
        assert!(
            output.status.success(),
            "expected command to pass, got exit code {:?}\nstdout: {}\nstderr: {}",
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        RunAssert { output }
    }

    /// Run and expect failure (non-zero exit code)
    pub fn fails(self) -> RunAssert {
        let mut cmd = self.command();
        let output = cmd.output().expect("command should run");
        assert!(
            !output.status.success(),
            "expected command to fail, but it passed\nstdout: {}\nstderr: {}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        RunAssert { output }
    }
}

/// Result of a CLI run for chaining assertions
pub struct RunAssert {
    output: Output,
}

impl RunAssert {
    /// Get stdout as string
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    /// Get stderr as string
    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    /// Assert the process exit code.
    pub fn code(self, expected: i32) -> Self {
        assert_eq!(
            self.output.status.code(),
            Some(expected),
            "unexpected exit code\nstderr: {}",
            self.stderr()
        );
        self
    }

    /// Assert stdout equals expected exactly (with diff on failure).
    /// **Prefer this for format specs** - catches format regressions.
    pub fn stdout_eq(self, expected: &str) -> Self {
        let stdout = self.stdout();
        similar_asserts::assert_eq!(stdout, expected);
        self
    }

    /// Assert stdout contains substring.
    pub fn stdout_has(self, expected: &str) -> Self {
        let stdout = self.stdout();
        assert!(
            stdout.contains(expected),
            "stdout does not contain '{}'\nstdout: {}",
            expected,
            stdout
        );
        self
    }

    /// Assert stderr contains substring.
    pub fn stderr_has(self, expected: &str) -> Self {
        let stderr = self.stderr();
        assert!(
            stderr.contains(expected),
            "stderr does not contain '{}'\nstderr: {}",
            expected,
            stderr
        );
        self
    }
}

// =============================================================================
// Fake controller
// =============================================================================

/// A controller on a Unix socket in a temp dir that answers one scripted
/// message per connection, then stops listening.
pub struct FakeController {
    dir: tempfile::TempDir,
    socket: PathBuf,
    handle: Option<JoinHandle<Vec<Request>>>,
}

impl FakeController {
    /// Serve `responses` in order, one per connection.
    pub fn serving(responses: Vec<Response>) -> Self {
        let payloads = responses
            .iter()
            .map(|r| ji_wire::encode(r).unwrap())
            .collect();
        Self::serving_raw(payloads)
    }

    /// Serve raw JSON payloads in order, one per connection.
    pub fn serving_raw(payloads: Vec<Vec<u8>>) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let socket = dir.path().join("controller.sock");
        let listener = UnixListener::bind(&socket).unwrap();

        let handle = std::thread::spawn(move || {
            let mut requests = Vec::new();
            for payload in payloads {
                let (mut stream, _) = listener.accept().unwrap();
                let bytes = ji_wire::read_message(&mut stream).unwrap();
                requests.push(ji_wire::decode(&bytes).unwrap());
                ji_wire::write_message(&mut stream, &payload).unwrap();
            }
            requests
        });

        Self {
            dir,
            socket,
            handle: Some(handle),
        }
    }

    /// Path of the controller socket
    pub fn socket(&self) -> &Path {
        &self.socket
    }

    /// State directory for the CLI under test (holds cli.log)
    pub fn state_dir(&self) -> &Path {
        self.dir.path()
    }

    /// CLI builder pointed at this controller
    pub fn ji(&self) -> CliBuilder {
        cli()
            .env("JI_STATE_DIR", self.state_dir())
            .env("JI_CONTROLLER", format!("unix:{}", self.socket.display()))
    }

    /// Wait for every scripted response to be served and return the
    /// requests the controller received.
    pub fn requests(mut self) -> Vec<Request> {
        self.handle
            .take()
            .expect("requests already taken")
            .join()
            .expect("fake controller panicked")
    }
}
