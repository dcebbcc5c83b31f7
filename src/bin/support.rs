use std::ffi::OsString;
use std::io::Write;
use std::process::ExitCode;

/// Runs a front-end entry point and maps its numeric status to an [`ExitCode`].
pub fn dispatch<I, Out, Err, Run, Map>(
    args: I,
    stdout: &mut Out,
    stderr: &mut Err,
    run: Run,
    map_exit: Map,
) -> ExitCode
where
    I: IntoIterator,
    I::Item: Into<OsString>,
    Out: Write,
    Err: Write,
    Run: FnOnce(Vec<OsString>, &mut Out, &mut Err) -> i32,
    Map: FnOnce(i32) -> ExitCode,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    let status = run(args, stdout, stderr);
    let _ = stdout.flush();
    let _ = stderr.flush();
    map_exit(status)
}
