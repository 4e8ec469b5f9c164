//! Toolchain glue: assemble a listing and link it with the bundled runtime.
//!
//! AT&T listings go straight through the host C compiler; NASM listings are
//! assembled with `nasm` first. Intermediate files live in a scratch
//! directory that is removed afterwards. Only x86-64 Linux is supported.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{Context, Result, bail};
use tracing::debug;

use crate::asm::{Symbols, Syntax};

/// Source of the runtime providing `main` and the print routine.
pub const RUNTIME_SOURCE: &str = include_str!("../runtime/runtime.c");

/// Locate a C compiler on `PATH`.
pub fn find_c_compiler() -> Result<PathBuf> {
  ["cc", "gcc", "clang"]
    .into_iter()
    .find_map(|name| which::which(name).ok())
    .context("no C compiler (cc, gcc or clang) found on PATH")
}

/// Assemble `listing` and link it with the runtime into `out_exe`.
pub fn link_executable(
  listing: &str,
  syntax: Syntax,
  symbols: &Symbols,
  out_exe: &Path,
) -> Result<()> {
  if !cfg!(all(target_os = "linux", target_arch = "x86_64")) {
    bail!("linking is only supported on x86-64 Linux");
  }

  let cc = find_c_compiler()?;
  let work = ScratchDir::create()?;
  let runtime = work.path().join("runtime.c");
  fs::write(&runtime, RUNTIME_SOURCE)
    .with_context(|| format!("writing {}", runtime.display()))?;

  let program = match syntax {
    Syntax::Att => {
      let src = work.path().join("program.s");
      fs::write(&src, listing).with_context(|| format!("writing {}", src.display()))?;
      src
    }
    Syntax::Intel => {
      let nasm = which::which("nasm").context("nasm is required for Intel syntax")?;
      let src = work.path().join("program.asm");
      let obj = work.path().join("program.o");
      fs::write(&src, listing).with_context(|| format!("writing {}", src.display()))?;
      let mut cmd = Command::new(nasm);
      cmd.args(["-f", "elf64", "-o"]).arg(&obj).arg(&src);
      run(cmd, "nasm")?;
      obj
    }
  };

  let mut cmd = Command::new(&cc);
  cmd
    .arg(format!("-DRPN_ENTRY={}", symbols.entry))
    .arg(format!("-DRPN_PRINT={}", symbols.print))
    .arg(&program)
    .arg(&runtime)
    .arg("-o")
    .arg(out_exe);
  run(cmd, "cc")?;

  debug!(exe = %out_exe.display(), "linked executable");
  Ok(())
}

fn run(mut cmd: Command, tool: &str) -> Result<()> {
  debug!(?cmd, "running {tool}");
  let status = cmd
    .status()
    .with_context(|| format!("failed to start {tool}"))?;
  if !status.success() {
    bail!("{tool} failed: {status}");
  }
  Ok(())
}

/// Temporary directory removed on drop.
struct ScratchDir(PathBuf);

impl ScratchDir {
  fn create() -> Result<Self> {
    static NEXT: AtomicUsize = AtomicUsize::new(0);
    let name = format!(
      "rpncc-{}-{}",
      std::process::id(),
      NEXT.fetch_add(1, Ordering::Relaxed)
    );
    let path = std::env::temp_dir().join(name);
    fs::create_dir_all(&path).with_context(|| format!("creating {}", path.display()))?;
    Ok(Self(path))
  }

  fn path(&self) -> &Path {
    &self.0
  }
}

impl Drop for ScratchDir {
  fn drop(&mut self) {
    let _ = fs::remove_dir_all(&self.0);
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn runtime_defines_configurable_symbols() {
    assert!(RUNTIME_SOURCE.contains("#define RPN_ENTRY rpn_evaluate"));
    assert!(RUNTIME_SOURCE.contains("#define RPN_PRINT rpn_print_and_exit"));
    let symbols = Symbols::default();
    assert_eq!(symbols.entry, "rpn_evaluate");
    assert_eq!(symbols.print, "rpn_print_and_exit");
  }

  #[test]
  fn scratch_dir_is_removed_on_drop() {
    let dir = ScratchDir::create().expect("temp dir should be writable");
    let path = dir.path().to_path_buf();
    assert!(path.is_dir());
    drop(dir);
    assert!(!path.exists());
  }
}
