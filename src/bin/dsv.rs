use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use log::info;
use tabwriter::TabWriter;

use dsv_rows::{parse_delimiter, ByteRow, Dialect, RowReader, ReaderSource};

#[derive(Parser)]
#[command(name = "dsv", about = "Read, convert and inspect delimiter-separated files", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Re-serialize rows to stdout, optionally with another delimiter
    Cat {
        #[command(flatten)]
        input: Input,
        /// Output delimiter (defaults to the input delimiter)
        #[arg(short = 'o', long, value_parser = parse_delimiter)]
        out_delimiter: Option<u8>,
        /// Quote every output field
        #[arg(long)]
        quote_all: bool,
    },
    /// Print rows as aligned columns
    Table {
        #[command(flatten)]
        input: Input,
    },
    /// Print the number of rows
    Count {
        #[command(flatten)]
        input: Input,
    },
}

#[derive(Args)]
struct Input {
    /// Input delimiter: a single character, or tab/comma/semicolon/pipe/space
    #[arg(short, long, default_value = ",", value_parser = parse_delimiter)]
    delimiter: u8,
    /// Input file; stdin if omitted or `-`
    file: Option<PathBuf>,
}

impl Input {
    fn open(&self) -> anyhow::Result<RowReader<ReaderSource<Box<dyn Read>>>> {
        let rdr: Box<dyn Read> = match self.file {
            Some(ref path) if path.as_os_str() != "-" => Box::new(
                File::open(path).with_context(|| format!("cannot open {}", path.display()))?,
            ),
            _ => Box::new(io::stdin().lock()),
        };
        Ok(Dialect::new(self.delimiter).open_read(rdr))
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let stdout = io::stdout().lock();

    match cli.command {
        Commands::Cat { input, out_delimiter, quote_all } => {
            let mut rdr = input.open()?;
            let dialect = Dialect::new(out_delimiter.unwrap_or(input.delimiter)).quote_all(quote_all);
            let mut wtr = dialect.open_write(BufWriter::new(stdout));
            let mut row = ByteRow::new();
            while rdr.read_byte_row(&mut row)? {
                wtr.write_row(&row)?;
            }
            wtr.flush()?;
            info!("copied {} rows", wtr.row_count());
        }
        Commands::Table { input } => {
            let mut rdr = input.open()?;
            let mut tw = TabWriter::new(stdout);
            let mut row = ByteRow::new();
            while rdr.read_byte_row(&mut row)? {
                let cells: Vec<String> = row.iter().map(|field| display_cell(field)).collect();
                writeln!(tw, "{}", cells.join("\t"))?;
            }
            tw.flush()?;
        }
        Commands::Count { input } => {
            let mut rdr = input.open()?;
            let mut row = ByteRow::new();
            while rdr.read_byte_row(&mut row)? {}
            let mut stdout = stdout;
            writeln!(stdout, "{}", rdr.row_count())?;
        }
    }
    Ok(())
}

// tabs and newlines inside a cell would break the column layout
fn display_cell(field: &[u8]) -> String {
    String::from_utf8_lossy(field).replace('\t', "\\t").replace('\n', "\\n")
}
