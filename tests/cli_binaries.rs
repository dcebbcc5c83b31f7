use assert_cmd::Command;
use predicates::prelude::*;

const SESSION: &str = concat!(
    "sending incremental file list\n",
    "photos/\n",
    "photos/beach.jpg\n",
    "\r    3.93M   5%  128.19kB/s    0:00:29 (xfr#208, ir-chk=2587/2821)",
    "\r  130.95M  29%  207.03kB/s    0:10:17 (xfr#4000, to-chk=1000/5055)\r",
);

fn binary(name: &str) -> Command {
    let mut command = Command::new(name);
    command.env_remove("COLORTERM").env("TERM", "dumb").env_remove("RSYNCY_LOG");
    command
}

#[test]
fn rsyncy_renders_piped_rsync_output() {
    binary(env!("CARGO_BIN_EXE_rsyncy"))
        .write_stdin(SESSION)
        .assert()
        .success()
        .stdout(predicate::str::contains("\rphotos/beach.jpg\x1b[K\r\n"))
        .stdout(predicate::str::contains("#208"))
        .stdout(predicate::str::contains("scan 8% (2821)"))
        .stdout(predicate::str::contains("scan 80% (5055)"))
        .stdout(predicate::str::contains("photos/\x1b[K").not())
        .stdout(predicate::str::ends_with("\r\x1b[K\r\n"));
}

#[test]
fn rsyncy_stat_prints_status_lines_only() {
    binary(env!("CARGO_BIN_EXE_rsyncy-stat"))
        .write_stdin(SESSION)
        .assert()
        .success()
        .stdout(predicate::str::contains("beach.jpg").not())
        .stdout(predicate::str::contains("sending incremental").not())
        .stdout(predicate::str::contains("\r\n"))
        .stdout(predicate::str::contains("130.95M"));
}

#[test]
fn empty_pipe_only_leaves_the_status_line() {
    binary(env!("CARGO_BIN_EXE_rsyncy"))
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::ends_with("\r\x1b[K\r\n"))
        .stdout(predicate::str::contains("\r\n").count(1))
        .stderr("");
}

#[test]
fn diagnostics_go_to_stderr() {
    binary(env!("CARGO_BIN_EXE_rsyncy"))
        .env("RSYNCY_LOG", "rsyncy::launch=debug")
        .write_stdin("file.txt\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("monitoring stdin").not())
        .stderr(predicate::str::contains("monitoring stdin"));
}
