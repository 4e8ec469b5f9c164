//! End-to-end runs through the host toolchain. Skipped when the host cannot
//! assemble x86-64 ELF or has no C compiler.

mod common;

use std::path::PathBuf;
use std::process::Command;

use common::PROGRAMS;
use rpncc::link::{find_c_compiler, link_executable};
use rpncc::{Options, Syntax, generate_assembly_with};

fn toolchain_available(syntax: Syntax) -> bool {
  if !cfg!(all(target_os = "linux", target_arch = "x86_64")) || find_c_compiler().is_err() {
    return false;
  }
  syntax == Syntax::Att || which::which("nasm").is_ok()
}

fn exe_path(tag: &str, index: usize) -> PathBuf {
  std::env::temp_dir().join(format!("rpncc-native-{}-{tag}-{index}", std::process::id()))
}

fn run_programs(syntax: Syntax, tag: &str) {
  let options = Options {
    syntax,
    ..Options::default()
  };
  for (index, (source, expected)) in PROGRAMS.iter().enumerate() {
    let asm = generate_assembly_with(source, &options).expect("program should compile");
    let exe = exe_path(tag, index);
    link_executable(&asm, syntax, &options.symbols, &exe).expect("program should link");

    let output = Command::new(&exe).output().expect("executable should start");
    let _ = std::fs::remove_file(&exe);

    assert!(output.status.success(), "exit status for {source:?}");
    assert_eq!(
      String::from_utf8_lossy(&output.stdout),
      format!("{expected}\n"),
      "source {source:?}"
    );
  }
}

#[test]
fn att_programs_print_expected_values() {
  if !toolchain_available(Syntax::Att) {
    eprintln!("skipping: no x86-64 Linux C toolchain");
    return;
  }
  run_programs(Syntax::Att, "att");
}

#[test]
fn nasm_programs_print_expected_values() {
  if !toolchain_available(Syntax::Intel) {
    eprintln!("skipping: nasm or C toolchain unavailable");
    return;
  }
  run_programs(Syntax::Intel, "intel");
}

#[test]
fn custom_symbols_link_against_runtime() {
  if !toolchain_available(Syntax::Att) {
    eprintln!("skipping: no x86-64 Linux C toolchain");
    return;
  }
  let mut options = Options::default();
  options.symbols.entry = "custom_entry".to_string();
  options.symbols.print = "custom_print".to_string();
  options.symbols.table = "custom_vars".to_string();

  let asm = generate_assembly_with("z4=;z z*", &options).expect("program should compile");
  let exe = exe_path("custom", 0);
  link_executable(&asm, Syntax::Att, &options.symbols, &exe).expect("program should link");
  let output = Command::new(&exe).output().expect("executable should start");
  let _ = std::fs::remove_file(&exe);
  assert_eq!(String::from_utf8_lossy(&output.stdout), "16\n");
}
