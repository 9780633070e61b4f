use log::{debug, warn};
use std::io::{self, Read};
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

/// 輪詢子程序狀態的間隔
const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// 外部命令的執行結果
#[derive(Debug, Clone, Default)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    /// 被訊號終止時為 `None`
    pub exit_code: Option<i32>,
}

impl CommandOutput {
    #[must_use]
    pub const fn success(&self) -> bool {
        matches!(self.exit_code, Some(0))
    }
}

/// 以明確的參數列表執行外部程式（不經過 shell）
///
/// 所有 ffprobe / ffmpeg 呼叫都經過這個介面，測試時可以換成假的實作
pub trait CommandRunner: Send + Sync {
    fn run(&self, program: &str, args: &[String]) -> io::Result<CommandOutput>;
}

/// 實際啟動子程序的實作，可選擇性設定逾時
#[derive(Debug, Clone, Default)]
pub struct SystemCommandRunner {
    timeout: Option<Duration>,
}

impl SystemCommandRunner {
    #[must_use]
    pub const fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }
}

impl CommandRunner for SystemCommandRunner {
    fn run(&self, program: &str, args: &[String]) -> io::Result<CommandOutput> {
        debug!("執行命令: {program} {}", args.join(" "));

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        // 以獨立執行緒讀取輸出，避免管線緩衝區塞滿造成子程序卡住
        let stdout_reader = spawn_pipe_reader(child.stdout.take());
        let stderr_reader = spawn_pipe_reader(child.stderr.take());

        let status = match self.timeout {
            Some(timeout) => wait_with_timeout(&mut child, timeout, program)?,
            None => child.wait()?,
        };

        Ok(CommandOutput {
            stdout: stdout_reader.join().unwrap_or_default(),
            stderr: stderr_reader.join().unwrap_or_default(),
            exit_code: status.code(),
        })
    }
}

fn spawn_pipe_reader<R: Read + Send + 'static>(pipe: Option<R>) -> thread::JoinHandle<String> {
    thread::spawn(move || {
        let mut buffer = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buffer);
        }
        String::from_utf8_lossy(&buffer).into_owned()
    })
}

fn wait_with_timeout(
    child: &mut Child,
    timeout: Duration,
    program: &str,
) -> io::Result<std::process::ExitStatus> {
    let started = Instant::now();
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(status);
        }

        if started.elapsed() >= timeout {
            warn!("{program} 執行超過 {:.1} 秒，終止程序", timeout.as_secs_f64());
            let _ = child.kill();
            let _ = child.wait();
            return Err(io::Error::new(
                io::ErrorKind::TimedOut,
                format!("{program} 執行逾時（{:.1} 秒）", timeout.as_secs_f64()),
            ));
        }

        thread::sleep(POLL_INTERVAL);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_output_success() {
        let output = CommandOutput {
            exit_code: Some(0),
            ..CommandOutput::default()
        };
        assert!(output.success());

        let output = CommandOutput {
            exit_code: Some(1),
            ..CommandOutput::default()
        };
        assert!(!output.success());

        let killed = CommandOutput::default();
        assert!(!killed.success());
    }

    #[test]
    fn test_missing_program_is_io_error() {
        let runner = SystemCommandRunner::default();
        let result = runner.run("definitely-not-a-real-program-xyz", &[]);
        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::NotFound);
    }

    #[cfg(unix)]
    #[test]
    fn test_captures_stdout_and_exit_code() {
        let runner = SystemCommandRunner::default();
        let output = runner
            .run("sh", &["-c".to_string(), "echo hello; exit 3".to_string()])
            .unwrap();
        assert_eq!(output.stdout.trim(), "hello");
        assert_eq!(output.exit_code, Some(3));
    }

    #[cfg(unix)]
    #[test]
    fn test_timeout_kills_child() {
        let runner = SystemCommandRunner::new(Some(Duration::from_millis(100)));
        let result = runner.run("sleep", &["5".to_string()]);
        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::TimedOut);
    }
}
