use anyhow::{bail, Context, Result};
use modelgen_codegen::{FileKind, Output};
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

/// Writes rendered files below an output directory.
#[derive(Debug)]
pub(crate) struct Writer<'a> {
    dir: &'a Path,

    /// Cleared after the first `rustfmt` failure so it is reported once
    rustfmt: bool,
}

impl<'a> Writer<'a> {
    pub(crate) fn new(dir: &'a Path, rustfmt: bool) -> Writer<'a> {
        Writer { dir, rustfmt }
    }

    pub(crate) fn write(&mut self, output: &Output) -> Result<()> {
        for file in &output.files {
            let path = self.dir.join(&file.path);

            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create directory {}", parent.display()))?;
            }

            let contents = match file.kind {
                FileKind::Rust => self.format(&file.contents),
                _ => file.contents.clone(),
            };

            std::fs::write(&path, contents)
                .with_context(|| format!("failed to write {}", path.display()))?;
            log::info!("wrote {}", path.display());
        }

        Ok(())
    }

    fn format(&mut self, source: &str) -> String {
        if !self.rustfmt {
            return source.to_string();
        }

        match rustfmt(source) {
            Ok(formatted) => formatted,
            Err(err) => {
                log::warn!("rustfmt unavailable, writing unformatted sources; error={err:#}");
                self.rustfmt = false;
                source.to_string()
            }
        }
    }
}

fn rustfmt(source: &str) -> Result<String> {
    let mut command = Command::new("rustfmt");
    command.args(["--edition", "2021", "--emit", "stdout"]);
    pipe_through(&mut command, source).context("rustfmt failed")
}

/// Feed `source` to `command` on stdin and collect its stdout.
fn pipe_through(command: &mut Command, source: &str) -> Result<String> {
    let mut child = command
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .context("failed to spawn")?;

    if let Some(mut stdin) = child.stdin.take() {
        if let Err(err) = stdin.write_all(source.as_bytes()) {
            // Reap the child before reporting
            let _ = child.kill();
            let _ = child.wait();
            return Err(err).context("failed to write to stdin");
        }
    }

    let output = child.wait_with_output()?;
    if !output.status.success() {
        bail!(
            "exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    Ok(String::from_utf8(output.stdout)?)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn output_is_collected() {
        let formatted = pipe_through(&mut Command::new("cat"), "fn main() {}\n").unwrap();
        assert_eq!(formatted, "fn main() {}\n");
    }

    #[test]
    fn a_child_that_stops_reading_is_reaped() {
        // `true` exits without reading, so writing past the pipe buffer fails
        let source = "x".repeat(1 << 20);
        let err = pipe_through(&mut Command::new("true"), &source).unwrap_err();
        assert_eq!(err.to_string(), "failed to write to stdin");
    }

    #[test]
    fn failing_children_report_stderr() {
        let mut command = Command::new("sh");
        command.args(["-c", "cat >/dev/null; echo bad input >&2; exit 3"]);
        let err = pipe_through(&mut command, "x").unwrap_err();
        assert_eq!(err.to_string(), "exited with exit status: 3: bad input");
    }
}
