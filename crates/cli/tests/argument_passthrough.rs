//! Tests that every argument after the program name reaches rsync verbatim.

use std::ffi::OsString;

use rsyncy_cli::test_utils::parse_args;
use rsyncy_monitor::RenderMode;

fn rsync_args(invocation: &rsyncy_cli::Invocation) -> Vec<String> {
    invocation
        .rsync_args
        .iter()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect()
}

// ============================================================================
// Flags Owned by rsync
// ============================================================================

#[test]
fn help_and_version_flags_are_forwarded() {
    let invocation = parse_args(["rsyncy", "--help"]).unwrap();
    assert_eq!(rsync_args(&invocation), ["--help"]);

    let invocation = parse_args(["rsyncy", "-V"]).unwrap();
    assert_eq!(rsync_args(&invocation), ["-V"]);
}

#[test]
fn short_and_long_options_keep_their_order() {
    let invocation = parse_args([
        "rsyncy",
        "-avz",
        "--delete",
        "--exclude=*.tmp",
        "-e",
        "ssh -p 2222",
        "src/",
        "backup:dst/",
    ])
    .unwrap();

    assert_eq!(
        rsync_args(&invocation),
        [
            "-avz",
            "--delete",
            "--exclude=*.tmp",
            "-e",
            "ssh -p 2222",
            "src/",
            "backup:dst/"
        ]
    );
}

#[test]
fn operands_before_options_are_forwarded() {
    let invocation = parse_args(["rsyncy", "src/", "dst/", "--dry-run"]).unwrap();
    assert_eq!(rsync_args(&invocation), ["src/", "dst/", "--dry-run"]);
}

#[test]
fn leading_double_dash_is_forwarded() {
    let invocation = parse_args(["rsyncy", "--", "-weird", "dst"]).unwrap();
    assert_eq!(rsync_args(&invocation), ["--", "-weird", "dst"]);

    let invocation = parse_args(["rsyncy", "--"]).unwrap();
    assert_eq!(rsync_args(&invocation), ["--"]);
}

#[test]
fn double_dash_after_options_is_forwarded() {
    let invocation = parse_args(["rsyncy", "-a", "--", "-weird", "dst"]).unwrap();
    assert_eq!(rsync_args(&invocation), ["-a", "--", "-weird", "dst"]);
}

#[cfg(unix)]
#[test]
fn non_utf8_operands_survive() {
    use std::os::unix::ffi::OsStringExt;

    let raw = OsString::from_vec(vec![b'f', 0xff, b'o']);
    let invocation = parse_args([OsString::from("rsyncy"), raw.clone()]).unwrap();
    assert_eq!(invocation.rsync_args, vec![raw]);
}

// ============================================================================
// Mode Selection
// ============================================================================

#[test]
fn stat_binary_selects_status_only_mode() {
    let invocation = parse_args(["/usr/bin/rsyncy-stat", "-a", "src", "dst"]).unwrap();
    assert_eq!(invocation.mode, RenderMode::StatusOnly);

    let invocation = parse_args(["/usr/bin/rsyncy", "-a", "src", "dst"]).unwrap();
    assert_eq!(invocation.mode, RenderMode::Interactive);
}
