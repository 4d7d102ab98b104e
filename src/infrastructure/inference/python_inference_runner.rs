use std::collections::VecDeque;
use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;

use crate::application::ports::{InferenceError, InferenceRunner};
use crate::application::services::InferenceArgs;

const STDERR_TAIL_LINES: usize = 20;

/// Runs `python -m scripts.inference ...` as a child process.
pub struct PythonInferenceRunner {
    python: String,
    module: String,
    working_dir: Option<PathBuf>,
}

impl PythonInferenceRunner {
    pub fn new(python: String, module: String, working_dir: Option<PathBuf>) -> Self {
        Self {
            python,
            module,
            working_dir,
        }
    }

    fn command(&self, args: &InferenceArgs) -> Command {
        let mut command = Command::new(&self.python);
        command
            .arg("-m")
            .arg(&self.module)
            .args(args.to_cli_args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = &self.working_dir {
            command.current_dir(dir);
        }
        command
    }
}

#[async_trait]
impl InferenceRunner for PythonInferenceRunner {
    async fn run(&self, args: &InferenceArgs) -> Result<(), InferenceError> {
        tracing::info!(
            python = %self.python,
            module = %self.module,
            video_out_path = %args.video_out_path,
            "Spawning inference process"
        );

        let mut child = self
            .command(args)
            .spawn()
            .map_err(|e| InferenceError::Spawn(format!("{}: {}", self.python, e)))?;

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();

        let stdout_task = tokio::spawn(async move {
            if let Some(out) = stdout {
                forward_lines(out, STDERR_TAIL_LINES, false).await;
            }
        });
        let stderr_tail = match stderr {
            Some(err) => forward_lines(err, STDERR_TAIL_LINES, true).await,
            None => VecDeque::new(),
        };

        let status = child.wait().await?;
        let _ = stdout_task.await;

        if !status.success() {
            return Err(InferenceError::Failed {
                status: status.to_string(),
                stderr: Vec::from(stderr_tail).join("\n"),
            });
        }

        if !tokio::fs::try_exists(&args.video_out_path).await? {
            return Err(InferenceError::MissingOutput(args.video_out_path.clone()));
        }

        Ok(())
    }
}

/// Logs every line of `reader` and returns the last `keep` lines.
async fn forward_lines<R>(reader: R, keep: usize, is_stderr: bool) -> VecDeque<String>
where
    R: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(reader).lines();
    let mut tail = VecDeque::with_capacity(keep);

    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if is_stderr {
                    tracing::debug!(target: "lipsync::inference::stderr", "{}", line);
                } else {
                    tracing::debug!(target: "lipsync::inference::stdout", "{}", line);
                }
                if line.trim().is_empty() {
                    continue;
                }
                if tail.len() == keep {
                    tail.pop_front();
                }
                tail.push_back(line);
            }
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read inference output");
                break;
            }
        }
    }

    tail
}
