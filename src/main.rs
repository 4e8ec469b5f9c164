use std::env;
use std::fs;
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result, bail};
use tracing_subscriber::EnvFilter;

use rpncc::tokenizer::{describe_token, tokenize};
use rpncc::{Options, Syntax};

const USAGE: &str = "usage: rpncc [-f|--file] [-o <path>] [--intel] [--tokens] [--eval] [--exe <path>] <program>";

#[derive(Debug, Default)]
struct Cli {
  program: String,
  from_file: bool,
  output: Option<PathBuf>,
  exe: Option<PathBuf>,
  intel: bool,
  tokens_only: bool,
  eval: bool,
}

fn parse_args(args: &[String]) -> Result<Cli> {
  let mut cli = Cli::default();
  let mut program = None;
  let mut iter = args.iter();

  while let Some(arg) = iter.next() {
    match arg.as_str() {
      "-f" | "--file" => cli.from_file = true,
      "--intel" => cli.intel = true,
      "--tokens" => cli.tokens_only = true,
      "--eval" => cli.eval = true,
      "-o" => cli.output = Some(iter.next().context("-o needs a path")?.into()),
      "--exe" => cli.exe = Some(iter.next().context("--exe needs a path")?.into()),
      flag if flag.starts_with('-') && flag.len() > 1 => bail!("unknown option '{flag}'"),
      _ if program.is_some() => bail!("more than one program given"),
      _ => program = Some(arg.clone()),
    }
  }

  cli.program = program.context("missing program")?;
  Ok(cli)
}

fn run(cli: Cli) -> Result<()> {
  let source = if cli.from_file {
    fs::read_to_string(&cli.program).with_context(|| format!("reading {}", cli.program))?
  } else {
    cli.program.clone()
  };
  let source = source.trim_end_matches(['\n', '\r']);

  if cli.tokens_only {
    for token in tokenize(source)? {
      println!("{:>4}  {:<8} {}", token.loc, token_class(&token.kind), describe_token(&token));
    }
    return Ok(());
  }

  if cli.eval {
    println!("{}", rpncc::evaluate(source)?);
    return Ok(());
  }

  let options = Options {
    syntax: if cli.intel { Syntax::Intel } else { Syntax::Att },
    ..Options::default()
  };
  let asm = rpncc::generate_assembly_with(source, &options)?;

  if let Some(exe) = &cli.exe {
    rpncc::link::link_executable(&asm, options.syntax, &options.symbols, exe)?;
  }

  match &cli.output {
    Some(path) => fs::write(path, &asm).with_context(|| format!("writing {}", path.display()))?,
    None if cli.exe.is_none() => print!("{asm}"),
    None => {}
  }
  Ok(())
}

fn token_class(kind: &rpncc::tokenizer::TokenKind) -> &'static str {
  use rpncc::tokenizer::TokenKind;
  match kind {
    TokenKind::Literal(_) => "literal",
    TokenKind::Variable(_) => "variable",
    TokenKind::Operator(_) => "operator",
    TokenKind::Separator => "separator",
  }
}

fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::try_from_env("RPNCC_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
    )
    .with_target(false)
    .with_writer(std::io::stderr)
    .init();

  let args: Vec<String> = env::args().skip(1).collect();
  let cli = match parse_args(&args) {
    Ok(cli) => cli,
    Err(err) => {
      eprintln!("{err}");
      eprintln!("{USAGE}");
      process::exit(1);
    }
  };

  if let Err(err) = run(cli) {
    eprintln!("{err:#}");
    process::exit(1);
  }
}
