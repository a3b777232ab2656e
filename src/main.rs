#[macro_use] extern crate prettytable;

use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::PathBuf;

use clap::Parser as ClapParser;
use lazy_static::lazy_static;
use log::{error, info, LevelFilter};
use prettytable::{format as TableFormat, Table};

use spirv_dis::bytecode::{parse_word_dump, words_from_bytes, Header, Word};
use spirv_dis::disasm::{self, AnsiPalette, NoColor, Palette};
use spirv_dis::grammar::{Grammar, SpirvGrammar};
use spirv_dis::{Disassembler, Result};

/// Disassemble a SPIR-V module.
#[derive(ClapParser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
  /// The module to read, `-` for standard input.
  #[arg(default_value = "-")]
  input: PathBuf,

  /// Write the disassembly here instead of standard output.
  #[arg(short, long)]
  output: Option<PathBuf>,

  /// Color the output with ANSI escape codes.
  #[arg(long)]
  color: bool,

  /// The input is a text dump of hexadecimal words rather than a binary.
  #[arg(long)]
  hex: bool,

  /// Show the module header as a table before the disassembly.
  #[arg(long)]
  header: bool,

  /// Log more. Repeat for more detail.
  #[arg(short, long, action = clap::ArgAction::Count)]
  verbose: u8,
}

lazy_static! {
  static ref TABLE_DISPLAY_FORMAT: TableFormat::TableFormat =
    TableFormat::FormatBuilder::new()
      .column_separator('│')
      .borders(' ')
      .separator(
        TableFormat::LinePosition::Title,
        TableFormat::LineSeparator::new('─', '┼', ' ', ' ')
      )
      .padding(1, 1)
      .build();
}

fn main() {
  let args = Args::parse();

  let level =
    match args.verbose {
      0 => LevelFilter::Warn,
      1 => LevelFilter::Info,
      2 => LevelFilter::Debug,
      _ => LevelFilter::Trace,
    };
  env_logger::Builder::new()
    .filter_level(level)
    .parse_default_env()
    .init();

  if let Err(e) = run(&args) {
    error!("{}", e);
    std::process::exit(1);
  }
}

fn run(args: &Args) -> Result<()> {
  let words = read_words(args)?;
  info!("read {} words from {}", words.len(), args.input.display());

  let mut out: Box<dyn Write> =
    match &args.output {
      Some(path) => Box::new(BufWriter::new(File::create(path)?)),
      None       => Box::new(BufWriter::new(io::stdout()))
    };

  let grammar = SpirvGrammar;
  let palette: &dyn Palette =
    match args.color {
      true  => &AnsiPalette,
      false => &NoColor
    };

  if args.header {
    let stream = disasm::instructions(&words)?;
    header_table(&grammar, stream.header()).print(&mut out)?;
    writeln!(out)?;
  }

  Disassembler::new(&grammar)
    .with_palette(palette)
    .write_to(&words, &mut out)
}

fn read_words(args: &Args) -> Result<Vec<Word>> {
  let mut bytes = Vec::new();
  match args.input.to_str() {
    Some("-") => {
      io::stdin().read_to_end(&mut bytes)?;
    }
    _ => {
      File::open(&args.input)?.read_to_end(&mut bytes)?;
    }
  }

  match args.hex {
    true  => parse_word_dump(&String::from_utf8_lossy(&bytes)),
    false => words_from_bytes(&bytes)
  }
}

fn header_table(grammar: &dyn Grammar, header: &Header) -> Table {
  let mut table = Table::new();
  table.set_format(*TABLE_DISPLAY_FORMAT);
  table.set_titles(row![ubr->"Field", ubl->"Value"]);

  let (major, minor) = ((header.version >> 16) & 0xFF, (header.version >> 8) & 0xFF);
  table.add_row(row![r->"Magic", format!("{:#010x}", header.magic)]);
  table.add_row(row![r->"Version", format!("{}.{} ({})", major, minor, header.version)]);
  table.add_row(row![
    r->"Generator",
    format!("{} ({})", grammar.generator(header.generator), header.generator)
  ]);
  table.add_row(row![r->"Bound", header.bound]);
  table.add_row(row![r->"Schema", header.schema]);
  table
}
