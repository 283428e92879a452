//! Test utilities for graven-lib.
//!
//! Provides a fake compiler: a `/bin/sh` script that accepts the same
//! arguments as `go build` and writes a report of what it received to the
//! output path instead of a binary. The script only uses shell builtins, so it
//! runs inside the cleared compiler environment without `PATH`.

use std::collections::HashMap;
use std::path::Path;

use crate::build::{BuildConfig, CompilerCommand};

/// Fake compiler script.
///
/// Exits with `$FAKE_EXIT` before producing output when that variable is set.
pub const FAKE_COMPILER: &str = r#"
out=""
pkg=""
flags=""
while [ $# -gt 0 ]; do
  case "$1" in
    -o) out="$2"; shift 2 ;;
    -*) flags="$1"; shift ;;
    *) pkg="$1"; shift ;;
  esac
done
if [ -n "$FAKE_EXIT" ]; then
  echo "fake compiler: failing $pkg with $FAKE_EXIT" >&2
  exit "$FAKE_EXIT"
fi
{
  echo "package=$pkg"
  echo "flags=$flags"
  echo "pwd=$(pwd)"
  echo "GOOS=$GOOS"
  echo "GOPATH=$GOPATH"
  echo "GRAVEN_LEAKED=$GRAVEN_LEAKED"
} > "$out"
"#;

/// Write the fake compiler into `dir` and return a config that runs it.
///
/// The script is passed to `/bin/sh` as an argument rather than executed
/// directly, so it never needs the executable bit.
pub fn fake_compiler(dir: &Path) -> BuildConfig {
  let script = dir.join("fake-go.sh");
  std::fs::write(&script, FAKE_COMPILER).unwrap();

  BuildConfig {
    compiler: CompilerCommand::new("/bin/sh", [script.to_string_lossy().to_string()]),
    forward_env: vec!["GOPATH".to_string()],
  }
}

/// Parse the `key=value` report written by the fake compiler.
pub fn read_fake_output(path: &Path) -> HashMap<String, String> {
  let content =
    std::fs::read_to_string(path).unwrap_or_else(|e| panic!("missing compiler output {}: {}", path.display(), e));
  content
    .lines()
    .filter_map(|line| line.split_once('='))
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}
