//! Boundary to the external language model. The engine never talks to a
//! model API directly; a configured command receives the generation
//! request as JSON on stdin and prints a one-line JSON reply. Without a
//! configured command the two-step request/ingest flow covers the gap.

use std::io::Write;
use std::process::{Command, Stdio};

use serde::Deserialize;

use crate::core::error::NirmanakayaError;
use crate::core::prompt::GenerationRequest;

pub trait Collaborator {
    fn generate(&self, request: &GenerationRequest) -> Result<String, NirmanakayaError>;
}

/// Expected reply shape: `{"reading": "..."}` on success or
/// `{"error": "..."}` when the bridge failed upstream.
#[derive(Debug, Deserialize)]
struct CollaboratorReply {
    #[serde(default)]
    reading: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CommandCollaborator {
    program: String,
    args: Vec<String>,
}

impl CommandCollaborator {
    /// Split a configured command line into program + args. Whitespace
    /// splitting only; quoting is not interpreted.
    pub fn parse(command_line: &str) -> Option<Self> {
        let mut parts = command_line.split_whitespace();
        let program = parts.next()?.to_string();
        Some(CommandCollaborator {
            program,
            args: parts.map(String::from).collect(),
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

/// Resolve the collaborator from preferences, falling back to
/// `$NIRMANAKAYA_COLLABORATOR`. `None` means manual request/ingest only.
pub fn configured(prefs_command: Option<&str>) -> Option<CommandCollaborator> {
    let line = prefs_command
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .or_else(|| {
            std::env::var("NIRMANAKAYA_COLLABORATOR")
                .ok()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        })?;
    CommandCollaborator::parse(&line)
}

impl Collaborator for CommandCollaborator {
    fn generate(&self, request: &GenerationRequest) -> Result<String, NirmanakayaError> {
        let payload = serde_json::to_string(request)?;
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                NirmanakayaError::GenerationFailure(format!(
                    "could not start collaborator '{}': {}",
                    self.program, e
                ))
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            // A bridge that exits without reading stdin closes the pipe
            // early; only real write failures are errors.
            if let Err(e) = stdin.write_all(payload.as_bytes()) {
                if e.kind() != std::io::ErrorKind::BrokenPipe {
                    return Err(NirmanakayaError::GenerationFailure(format!(
                        "could not send request to collaborator: {}",
                        e
                    )));
                }
            }
        }

        let output = child
            .wait_with_output()
            .map_err(NirmanakayaError::IoError)?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let excerpt: String = stderr.trim().chars().take(400).collect();
            return Err(NirmanakayaError::GenerationFailure(format!(
                "collaborator exited with code {}: {}",
                output.status.code().unwrap_or(-1),
                excerpt
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let reply: CollaboratorReply = serde_json::from_str(stdout.trim()).map_err(|_| {
            NirmanakayaError::GenerationFailure(
                "collaborator output was not the expected JSON reply".to_string(),
            )
        })?;
        if let Some(err) = reply.error {
            return Err(NirmanakayaError::GenerationFailure(err));
        }
        reply
            .reading
            .filter(|r| !r.trim().is_empty())
            .ok_or_else(|| {
                NirmanakayaError::GenerationFailure(
                    "collaborator reply carried no reading".to_string(),
                )
            })
    }
}
