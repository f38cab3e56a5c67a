use std::time::Duration;

use switchcmd::errors::SwitchcmdError;
use switchcmd::exec::{ProcessRunner, SessionPlan, SessionRunner};
use switchcmd_test_utils::{init_tracing, with_timeout};

fn sh(script: &str) -> SessionPlan {
    SessionPlan {
        program: "sh".to_string(),
        args: vec!["-c".to_string(), script.to_string()],
        env: Vec::new(),
        stdin: None,
    }
}

#[tokio::test]
async fn captures_stdout_and_feeds_stdin() {
    with_timeout(async {
        init_tracing();

        let plan = SessionPlan {
            stdin: Some("show version\nexit\n".to_string()),
            ..sh("echo banner; cat")
        };

        let outcome = ProcessRunner::new().run(&plan, None).await.unwrap();

        assert!(outcome.success);
        assert_eq!(outcome.exit_code, Some(0));
        assert_eq!(outcome.stdout, "banner\nshow version\nexit\n");
        assert_eq!(outcome.stderr, "");
    })
    .await
}

#[tokio::test]
async fn non_zero_exit_is_an_outcome_not_an_error() {
    with_timeout(async {
        init_tracing();

        let plan = sh("echo partial; echo 'Permission denied' >&2; exit 5");

        let outcome = ProcessRunner::new()
            .run(&plan, Some(Duration::from_secs(3)))
            .await
            .unwrap();

        assert!(!outcome.success);
        assert_eq!(outcome.exit_code, Some(5));
        assert_eq!(outcome.stdout, "partial\n");
        assert_eq!(outcome.stderr, "Permission denied\n");
    })
    .await
}

#[tokio::test]
async fn environment_is_passed_to_child_only() {
    with_timeout(async {
        init_tracing();

        let plan = SessionPlan {
            env: vec![("SSHPASS".to_string(), "pa$$ word".to_string())],
            ..sh(r#"printf '%s' "$SSHPASS""#)
        };

        let outcome = ProcessRunner::new().run(&plan, None).await.unwrap();

        assert_eq!(outcome.stdout, "pa$$ word");
        assert!(std::env::var_os("SSHPASS").is_none());
    })
    .await
}

#[tokio::test]
async fn hung_session_times_out() {
    with_timeout(async {
        init_tracing();

        let plan = sh("sleep 30");
        let limit = Duration::from_millis(200);

        let err = ProcessRunner::new().run(&plan, Some(limit)).await.unwrap_err();

        match err {
            SwitchcmdError::SessionTimeout(d) => assert_eq!(d, limit),
            other => panic!("expected SessionTimeout, got {other:?}"),
        }
    })
    .await
}

#[tokio::test]
async fn missing_program_is_a_spawn_error() {
    with_timeout(async {
        init_tracing();

        let plan = SessionPlan {
            program: "switchcmd-no-such-helper".to_string(),
            args: Vec::new(),
            env: Vec::new(),
            stdin: Some("show version\n".to_string()),
        };

        let err = ProcessRunner::new().run(&plan, None).await.unwrap_err();

        match err {
            SwitchcmdError::Spawn { program, source } => {
                assert_eq!(program, "switchcmd-no-such-helper");
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("expected Spawn error, got {other:?}"),
        }
    })
    .await
}

/// True while `pid` is a live (non-zombie) process.
#[cfg(target_os = "linux")]
fn process_alive(pid: u32) -> bool {
    match std::fs::read_to_string(format!("/proc/{pid}/stat")) {
        // state is the first field after the parenthesised command name
        Ok(stat) => stat
            .rsplit_once(')')
            .and_then(|(_, rest)| rest.split_whitespace().next())
            .is_some_and(|state| state != "Z" && state != "X"),
        Err(_) => false,
    }
}

#[cfg(target_os = "linux")]
#[tokio::test]
async fn timeout_kills_the_whole_session_tree() {
    with_timeout(async {
        init_tracing();

        let dir = tempfile::tempdir().unwrap();
        let pid_file = dir.path().join("grandchild.pid");

        // `sh` waits on a grandchild, like `sh script` waiting on `sshpass`.
        let plan = SessionPlan {
            env: vec![(
                "PID_FILE".to_string(),
                pid_file.to_string_lossy().into_owned(),
            )],
            ..sh(r#"sleep 47 & echo $! > "$PID_FILE"; wait"#)
        };

        let err = ProcessRunner::new()
            .run(&plan, Some(Duration::from_millis(500)))
            .await
            .unwrap_err();
        assert!(matches!(err, SwitchcmdError::SessionTimeout(_)), "{err:?}");

        let grandchild: u32 = std::fs::read_to_string(&pid_file)
            .unwrap()
            .trim()
            .parse()
            .unwrap();

        let mut alive = process_alive(grandchild);
        for _ in 0..20 {
            if !alive {
                break;
            }
            tokio::time::sleep(Duration::from_millis(100)).await;
            alive = process_alive(grandchild);
        }
        assert!(!alive, "grandchild {grandchild} survived the session timeout");
    })
    .await
}

#[tokio::test]
async fn descendant_holding_stdout_does_not_outlive_timeout() {
    with_timeout(async {
        init_tracing();

        // `sh` exits at once but leaves a background `sleep` holding stdout.
        let plan = sh("sleep 47 & echo started");

        let err = ProcessRunner::new()
            .run(&plan, Some(Duration::from_millis(500)))
            .await
            .unwrap_err();

        assert!(matches!(err, SwitchcmdError::SessionTimeout(_)), "{err:?}");
    })
    .await
}
