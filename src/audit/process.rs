//! 子进程执行工具：带超时等待，超时或被丢弃时强制结束子进程

use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use tokio::process::{Child, Command};
use tracing::debug;

use crate::error::{LeadGenError, LeadResult};

/// 由「程序 + 前置参数」构造命令
pub(crate) fn build_command(command: &[String]) -> LeadResult<Command> {
    let (program, prefix) = command
        .split_first()
        .ok_or_else(|| LeadGenError::InvalidInput("审计命令为空".to_string()))?;

    let mut cmd = Command::new(program);
    cmd.args(prefix)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true);
    Ok(cmd)
}

/// 启动后台进程（浏览器），不等待结束
pub(crate) fn spawn(command: &[String], args: &[String]) -> LeadResult<Child> {
    let mut cmd = build_command(command)?;
    cmd.args(args);
    cmd.spawn()
        .map_err(|e| LeadGenError::AuditCommandError(format!("{} 启动失败：{}", command.join(" "), e)))
}

/// 运行命令并等待结束，超过 limit 则结束进程并返回 AuditTimeout
pub(crate) async fn run_with_timeout(
    command: &[String],
    args: &[String],
    limit: Duration,
) -> LeadResult<ExitStatus> {
    let mut child = spawn(command, args)?;
    debug!("子进程已启动：{} {}", command.join(" "), args.join(" "));

    match tokio::time::timeout(limit, child.wait()).await {
        Ok(status) => Ok(status?),
        Err(_) => {
            let _ = child.kill().await;
            Err(LeadGenError::AuditTimeout(limit.as_secs()))
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn sh(script: &str) -> Vec<String> {
        vec!["sh".to_string(), "-c".to_string(), script.to_string()]
    }

    #[tokio::test]
    async fn test_exit_status_is_returned() {
        let ok = run_with_timeout(&sh("exit 0"), &[], Duration::from_secs(5)).await.unwrap();
        assert!(ok.success());

        let failed = run_with_timeout(&sh("exit 3"), &[], Duration::from_secs(5)).await.unwrap();
        assert_eq!(failed.code(), Some(3));
    }

    #[tokio::test]
    async fn test_timeout_kills_child() {
        let err = run_with_timeout(&sh("exec sleep 5"), &[], Duration::from_millis(200))
            .await
            .unwrap_err();
        assert!(matches!(err, LeadGenError::AuditTimeout(_)));
    }

    #[tokio::test]
    async fn test_missing_program_and_empty_command() {
        let missing = vec!["rsleadgen-no-such-binary".to_string()];
        assert!(matches!(
            run_with_timeout(&missing, &[], Duration::from_secs(1)).await,
            Err(LeadGenError::AuditCommandError(_))
        ));
        assert!(matches!(
            run_with_timeout(&[], &[], Duration::from_secs(1)).await,
            Err(LeadGenError::InvalidInput(_))
        ));
    }
}
