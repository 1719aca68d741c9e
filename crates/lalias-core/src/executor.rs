//! Placeholder substitution and shell execution for alias invocation.
//!
//! Every line of an alias is expanded before the first one runs, so a missing
//! argument or a malformed placeholder executes nothing. Once running, each
//! line is one synchronous shell command; its exit status is not inspected.

use crate::error::{LalError, Result};
use crate::segment::{Line, Segment};
use crate::store::AliasStore;
use std::process::Command;

/// Runs one fully expanded command line.
pub trait Shell {
    fn run(&mut self, command: &str) -> Result<()>;
}

/// The platform shell (`sh -c`, or `cmd /C` on Windows) with inherited stdio.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemShell;

impl Shell for SystemShell {
    fn run(&mut self, command: &str) -> Result<()> {
        let mut cmd = shell_command(command);
        let status = cmd
            .status()
            .map_err(|e| LalError::ShellSpawn(e.to_string()))?;
        if !status.success() {
            tracing::debug!(%status, command, "command exited unsuccessfully");
        }
        Ok(())
    }
}

#[cfg(not(windows))]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command);
    cmd
}

#[cfg(windows)]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg(command);
    cmd
}

/// Substitute positional arguments into one line.
pub fn expand_line<A: AsRef<[u8]>>(line: &Line, args: &[A]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    for segment in line.segments() {
        match segment {
            Segment::Literal(bytes) => out.extend_from_slice(bytes),
            Segment::Placeholder(p) => {
                let index = p.index()?;
                let arg = args.get(index).ok_or(LalError::InsufficientInputs {
                    expected: index.saturating_add(1),
                    got: args.len(),
                })?;
                out.extend_from_slice(arg.as_ref());
            }
        }
    }
    Ok(out)
}

/// Expand every line of `name` against `args`.
pub fn expand<A: AsRef<[u8]>>(store: &AliasStore, name: &[u8], args: &[A]) -> Result<Vec<String>> {
    let node = store.find(name)?;
    node.lines()
        .iter()
        .map(|line| {
            expand_line(line, args).map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
        })
        .collect()
}

/// Invoke alias `name` with `args`, running each expanded line through
/// `shell` in stored order. Returns the number of lines run.
pub fn invoke<A, S>(store: &AliasStore, name: &[u8], args: &[A], shell: &mut S) -> Result<usize>
where
    A: AsRef<[u8]>,
    S: Shell + ?Sized,
{
    let commands = expand(store, name, args)?;
    for command in &commands {
        tracing::debug!(command = %command, "running");
        shell.run(command)?;
    }
    Ok(commands.len())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingShell {
        ran: Vec<String>,
    }

    impl Shell for RecordingShell {
        fn run(&mut self, command: &str) -> Result<()> {
            self.ran.push(command.to_string());
            Ok(())
        }
    }

    fn store() -> AliasStore {
        let mut store = AliasStore::new();
        store.append(b"build", &["gcc <<0>> -o <<1>>"]).unwrap();
        store
            .append(b"multi", &["echo first", "echo <<2>>", "echo last"])
            .unwrap();
        store.append(b"bad", &["echo ok", "echo <<nope>>"]).unwrap();
        store
    }

    #[test]
    fn substitutes_arguments() {
        let mut shell = RecordingShell::default();
        let ran = invoke(&store(), b"build", &["main.c", "app"], &mut shell).unwrap();
        assert_eq!(ran, 1);
        assert_eq!(shell.ran, ["gcc main.c -o app"]);
    }

    #[test]
    fn extra_arguments_are_ignored() {
        let mut shell = RecordingShell::default();
        invoke(&store(), b"build", &["a.c", "a", "unused"], &mut shell).unwrap();
        assert_eq!(shell.ran, ["gcc a.c -o a"]);
    }

    #[test]
    fn runs_lines_in_order() {
        let mut shell = RecordingShell::default();
        invoke(&store(), b"multi", &["x", "y", "z"], &mut shell).unwrap();
        assert_eq!(shell.ran, ["echo first", "echo z", "echo last"]);
    }

    #[test]
    fn insufficient_arguments_run_nothing() {
        let mut shell = RecordingShell::default();
        let err = invoke(&store(), b"multi", &["x"], &mut shell).unwrap_err();
        assert!(matches!(
            err,
            LalError::InsufficientInputs {
                expected: 3,
                got: 1
            }
        ));
        assert!(shell.ran.is_empty());
    }

    #[test]
    fn malformed_placeholder_reported_at_invocation() {
        let mut shell = RecordingShell::default();
        let err = invoke(&store(), b"bad", &["x"], &mut shell).unwrap_err();
        assert!(matches!(err, LalError::MalformedPlaceholder(raw) if raw == "nope"));
        assert!(shell.ran.is_empty());
    }

    #[test]
    fn unknown_label() {
        let mut shell = RecordingShell::default();
        let none: [&str; 0] = [];
        assert!(matches!(
            invoke(&store(), b"missing", &none, &mut shell).unwrap_err(),
            LalError::LabelNotFound(_)
        ));
    }

    #[test]
    fn arguments_are_substituted_verbatim() {
        let line = Line::from_text(b"echo <<0>>").unwrap();
        let out = expand_line(&line, &["<<1>> {x}"]).unwrap();
        assert_eq!(out, b"echo <<1>> {x}");
    }

    #[test]
    fn largest_index_reports_insufficient_inputs() {
        let line = Line::from_text(format!("echo <<{}>>", usize::MAX).as_bytes()).unwrap();
        let err = expand_line(&line, &["a"]).unwrap_err();
        assert!(matches!(
            err,
            LalError::InsufficientInputs {
                expected: usize::MAX,
                got: 1
            }
        ));
    }

    #[cfg(unix)]
    #[test]
    fn system_shell_ignores_exit_status() {
        let mut shell = SystemShell;
        shell.run("exit 3").unwrap();
    }
}
