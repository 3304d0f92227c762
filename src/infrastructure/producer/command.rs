//! Launch command resolution
//!
//! Decides how a producer file is started, in order:
//! 1. `#!` shebang line
//! 2. `[interpreters]` entry for the file extension
//! 3. executable permission bit (Unix)

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs::{File, Metadata};
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// Longest shebang line we look at
const SHEBANG_LIMIT: u64 = 512;

/// Program plus arguments used to start a producer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchCommand {
    pub program: OsString,
    pub args: Vec<OsString>,
}

impl LaunchCommand {
    /// Resolve the command for `path`, or explain why it cannot run.
    pub fn resolve(
        path: &Path,
        metadata: &Metadata,
        interpreters: &BTreeMap<String, String>,
    ) -> Result<Self, String> {
        if let Some(words) = read_shebang(path)? {
            return Self::interpreted(&words, path)
                .ok_or_else(|| "empty shebang line".to_string());
        }

        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if let Some(interpreter) = interpreters.get(extension) {
            let words: Vec<&str> = interpreter.split_whitespace().collect();
            return Self::interpreted(&words, path)
                .ok_or_else(|| format!("empty interpreter configured for '.{extension}'"));
        }

        if is_executable(metadata) {
            return Ok(Self {
                program: path.as_os_str().to_owned(),
                args: Vec::new(),
            });
        }

        Err(format!(
            "not runnable: no shebang, no interpreter configured for '.{extension}', and not executable"
        ))
    }

    fn interpreted<S: AsRef<str>>(words: &[S], script: &Path) -> Option<Self> {
        let (program, rest) = words.split_first()?;
        let mut args: Vec<OsString> = rest.iter().map(|w| OsString::from(w.as_ref())).collect();
        args.push(script.as_os_str().to_owned());
        Some(Self {
            program: OsString::from(program.as_ref()),
            args,
        })
    }
}

fn read_shebang(path: &Path) -> Result<Option<Vec<String>>, String> {
    let file = File::open(path).map_err(|e| e.to_string())?;
    let mut reader = BufReader::new(file.take(SHEBANG_LIMIT));
    let mut first = Vec::new();
    reader
        .read_until(b'\n', &mut first)
        .map_err(|e| e.to_string())?;

    let Some(rest) = first.strip_prefix(b"#!") else {
        return Ok(None);
    };

    let line = String::from_utf8_lossy(rest);
    Ok(Some(line.split_whitespace().map(String::from).collect()))
}

#[cfg(unix)]
fn is_executable(metadata: &Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & 0o111 != 0
}

#[cfg(not(unix))]
fn is_executable(_metadata: &Metadata) -> bool {
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn resolve(path: &Path, interpreters: &BTreeMap<String, String>) -> Result<LaunchCommand, String> {
        let metadata = fs::metadata(path).unwrap();
        LaunchCommand::resolve(path, &metadata, interpreters)
    }

    #[test]
    fn shebang_with_env_splits_words() {
        let dir = tempdir().unwrap();
        let script = dir.path().join("gen_producer.py");
        fs::write(&script, "#!/usr/bin/env python3\nprint('[]')\n").unwrap();

        let cmd = resolve(&script, &BTreeMap::new()).unwrap();
        assert_eq!(cmd.program, OsString::from("/usr/bin/env"));
        assert_eq!(
            cmd.args,
            vec![OsString::from("python3"), script.as_os_str().to_owned()]
        );
    }

    #[test]
    fn shebang_wins_over_interpreter_map() {
        let dir = tempdir().unwrap();
        let script = dir.path().join("gen_producer.sh");
        fs::write(&script, "#!/bin/bash\necho '[]'\n").unwrap();
        let interpreters = BTreeMap::from([("sh".to_string(), "dash".to_string())]);

        let cmd = resolve(&script, &interpreters).unwrap();
        assert_eq!(cmd.program, OsString::from("/bin/bash"));
    }

    #[test]
    fn interpreter_map_by_extension() {
        let dir = tempdir().unwrap();
        let script = dir.path().join("gen_producer.js");
        fs::write(&script, "console.log('[]')\n").unwrap();
        let interpreters = BTreeMap::from([("js".to_string(), "node --no-warnings".to_string())]);

        let cmd = resolve(&script, &interpreters).unwrap();
        assert_eq!(cmd.program, OsString::from("node"));
        assert_eq!(
            cmd.args,
            vec![OsString::from("--no-warnings"), script.as_os_str().to_owned()]
        );
    }

    #[test]
    fn plain_file_is_not_runnable() {
        let dir = tempdir().unwrap();
        let script = dir.path().join("gen_producer.txt");
        fs::write(&script, "hello").unwrap();

        let err = resolve(&script, &BTreeMap::new()).unwrap_err();
        assert!(err.contains("not runnable"), "{err}");
    }

    #[test]
    fn empty_shebang_is_rejected() {
        let dir = tempdir().unwrap();
        let script = dir.path().join("gen_producer.sh");
        fs::write(&script, "#!\n").unwrap();

        let err = resolve(&script, &BTreeMap::new()).unwrap_err();
        assert_eq!(err, "empty shebang line");
    }

    #[cfg(unix)]
    #[test]
    fn executable_without_shebang_runs_directly() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let binary = dir.path().join("gen_producer.bin");
        fs::write(&binary, [0x7f, b'E', b'L', b'F']).unwrap();
        fs::set_permissions(&binary, fs::Permissions::from_mode(0o755)).unwrap();

        let cmd = resolve(&binary, &BTreeMap::new()).unwrap();
        assert_eq!(cmd.program, binary.as_os_str().to_owned());
        assert!(cmd.args.is_empty());
    }
}
