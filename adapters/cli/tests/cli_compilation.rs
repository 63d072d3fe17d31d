use std::process::Command;

#[test]
fn cli_compiles_without_warnings() {
    let status = Command::new(env!("CARGO"))
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .args(["check", "--quiet", "--bin", "ghost-catcher"])
        .status()
        .expect("failed to invoke cargo check for ghost-catcher CLI binary");

    assert!(status.success(), "cargo check --bin ghost-catcher should succeed");
}

#[test]
fn help_lists_every_shell_flag() {
    let output = Command::new(env!("CARGO_BIN_EXE_ghost-catcher"))
        .arg("--help")
        .output()
        .expect("failed to run ghost-catcher --help");

    assert!(output.status.success());
    let help = String::from_utf8_lossy(&output.stdout);
    for flag in ["--seed", "--config", "--script", "--quiet-board"] {
        assert!(help.contains(flag), "help output is missing {flag}");
    }
}
