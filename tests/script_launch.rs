use std::error::Error;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use switchcmd::exec::script::shell_quote;
use switchcmd::exec::{render_script, ScriptArtifact};
use switchcmd::handle_job;
use switchcmd::types::LaunchMode;
use switchcmd_test_utils::builders::{JobBuilder, SettingsBuilder};
use switchcmd_test_utils::fake_runner::FakeRunner;
use switchcmd_test_utils::{init_tracing, with_timeout};

type TestResult = Result<(), Box<dyn Error>>;

/// What the fake runner saw on disk while the script was "running".
#[derive(Debug, Default, Clone)]
struct Observed {
    path: PathBuf,
    contents: String,
    mode: u32,
}

#[tokio::test]
async fn script_exists_owner_only_while_running_and_is_removed_after() -> TestResult {
    with_timeout(async {
        init_tracing();

        let dir = tempfile::tempdir()?;
        let settings = SettingsBuilder::new()
            .launch(LaunchMode::Script)
            .script_dir(dir.path())
            .build();

        let observed = Arc::new(Mutex::new(None::<Observed>));
        let sink = Arc::clone(&observed);
        let runner = FakeRunner::succeeding("Switch1#").with_inspector(move |plan| {
            use std::os::unix::fs::PermissionsExt;

            let path = PathBuf::from(&plan.args[0]);
            let meta = std::fs::metadata(&path).expect("script exists during run");
            *sink.lock().unwrap() = Some(Observed {
                contents: std::fs::read_to_string(&path).expect("script readable"),
                mode: meta.permissions().mode() & 0o777,
                path,
            });
        });

        let job = JobBuilder::new("10.20.30.40")
            .username("netops")
            .password("Sw1tchPass")
            .commands("terminal length 0\nshow running-config")
            .build();

        let result = handle_job(&job, &settings, &runner).await;
        assert_eq!(result.description, "Output: Switch1#");

        let plans = runner.plans();
        assert_eq!(plans.lock().unwrap()[0].program, "sh");

        let seen = observed.lock().unwrap().clone().expect("runner was invoked");
        assert_eq!(seen.mode, 0o700);
        assert_eq!(seen.path.parent(), Some(dir.path()));
        let file_name = seen.path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(file_name.starts_with("switchcmd-") && file_name.ends_with(".sh"));

        assert!(seen.contents.starts_with("#!/bin/sh\n"));
        assert!(seen.contents.contains("SWITCH_IP='10.20.30.40'\n"));
        assert!(seen.contents.contains("SWITCH_USER='netops'\n"));
        assert!(seen.contents.contains("SWITCH_PASSWORD='Sw1tchPass'\n"));
        assert!(seen.contents.contains(
            "SSHPASS=\"$SWITCH_PASSWORD\" 'sshpass' -e 'ssh' '-tt' '-p' '22' \
             '-o' 'KexAlgorithms=+diffie-hellman-group14-sha1' \
             '-o' 'HostKeyAlgorithms=+ssh-rsa' \
             '-o' 'StrictHostKeyChecking=no' \
             -l \"$SWITCH_USER\" -- \"$SWITCH_IP\" <<'SWITCHCMD_EOF'\n"
        ));
        assert!(seen.contents.ends_with(
            "<<'SWITCHCMD_EOF'\nterminal length 0\nshow running-config\nSWITCHCMD_EOF\n"
        ));

        assert!(!seen.path.exists(), "script artifact should be removed after the job");
        Ok(())
    })
    .await
}

#[tokio::test]
async fn each_job_gets_its_own_script() -> TestResult {
    with_timeout(async {
        init_tracing();

        let dir = tempfile::tempdir()?;
        let settings = SettingsBuilder::new()
            .launch(LaunchMode::Script)
            .script_dir(dir.path())
            .build();
        let runner = FakeRunner::failing(255, "Connection refused");
        let job = JobBuilder::new("10.0.0.1").build();

        let first = handle_job(&job, &settings, &runner).await;
        let second = handle_job(&job, &settings, &runner).await;

        assert_eq!(first.description, "Error: Connection refused");
        assert_eq!(second, first);

        let plans = runner.plans();
        let plans = plans.lock().unwrap();
        assert_eq!(plans.len(), 2);
        assert_ne!(plans[0].args[0], plans[1].args[0]);
        assert_eq!(std::fs::read_dir(dir.path())?.count(), 0);
        Ok(())
    })
    .await
}

#[test]
fn values_are_single_quoted_against_interpolation() {
    let settings = SettingsBuilder::new().build();
    let job = JobBuilder::new("10.0.0.1")
        .username("o'brien")
        .password("$(reboot)`id`")
        .build();

    let body = render_script(&job, &settings);

    assert!(body.contains(r"SWITCH_USER='o'\''brien'"));
    assert!(body.contains("SWITCH_PASSWORD='$(reboot)`id`'"));
}

#[test]
fn heredoc_delimiter_avoids_payload_lines() {
    let settings = SettingsBuilder::new().build();
    let job = JobBuilder::new("10.0.0.1")
        .commands("show clock\nSWITCHCMD_EOF\nSWITCHCMD_EOF_1\nexit")
        .build();

    let body = render_script(&job, &settings);

    assert!(body.contains("<<'SWITCHCMD_EOF_2'\nshow clock\n"));
    assert!(body.ends_with("exit\nSWITCHCMD_EOF_2\n"));
}

#[test]
fn shell_quote_wraps_and_escapes() {
    assert_eq!(shell_quote("plain"), "'plain'");
    assert_eq!(shell_quote(""), "''");
    assert_eq!(shell_quote("it's"), r"'it'\''s'");
}

#[test]
fn artifact_is_deleted_on_drop() -> TestResult {
    let dir = tempfile::tempdir()?;
    let artifact = ScriptArtifact::create(dir.path(), "#!/bin/sh\necho hi\n")?;
    let path = artifact.path().to_path_buf();

    assert_eq!(std::fs::read_to_string(&path)?, "#!/bin/sh\necho hi\n");
    drop(artifact);
    assert!(!path.exists());
    Ok(())
}
