use std::thread;

use crate::relay::Command;

/// One installed mod as reported by `h2mm-cli list`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModEntry {
    pub name: String,
}

/// Parse `list` output: one mod name per non-empty line.
pub fn parse_mod_list(stdout: &str) -> Vec<ModEntry> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| ModEntry {
            name: line.to_string(),
        })
        .collect()
}

/// Run `list` as a captured subprocess on a worker thread.
///
/// Unlike the mutating actions, `list` is a quick non-interactive query;
/// capturing its output keeps parsing trivial, and the worker thread keeps
/// the event loop responsive while it runs. The result is delivered
/// through `notify`, which is invoked from the worker thread.
pub fn spawn_list_worker<F>(command: Command, notify: F)
where
    F: FnOnce(Result<Vec<ModEntry>, String>) + Send + 'static,
{
    thread::spawn(move || {
        let output = std::process::Command::new(command.program())
            .args(command.arg_slice())
            .output();

        let result = match output {
            Err(err) => Err(format!(
                "Failed to run '{}': {}",
                command.program(),
                err
            )),
            Ok(output) if !output.status.success() => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                let stderr = stderr.trim();
                if stderr.is_empty() {
                    Err(format!("'{}' exited with {}", command, output.status))
                } else {
                    Err(stderr.to_string())
                }
            }
            Ok(output) => Ok(parse_mod_list(&String::from_utf8_lossy(&output.stdout))),
        };

        if let Err(err) = &result {
            tracing::warn!(error = %err, "mod list refresh failed");
        }
        notify(result);
    });
}
