//! Quadro CLI - extract grid tables from monospaced text

#[cfg(feature = "cli")]
use clap::{Parser, ValueEnum};
#[cfg(feature = "cli")]
use quadro::{extract_table, to_csv, to_html, TableModel};
#[cfg(feature = "cli")]
use std::fs;
#[cfg(feature = "cli")]
use std::io::{self, Read, Write};

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "qdr")]
#[command(version)]
#[command(about = "Quadro - grid table extraction from text art", long_about = None)]
struct Cli {
    /// Input file path (reads from stdin if not provided)
    input_file: Option<String>,

    /// Output file path (writes to stdout if not provided)
    #[arg(short, long)]
    output: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Csv)]
    format: Format,

    /// Report whether the input holds a table without extracting
    #[arg(long)]
    detect: bool,
}

#[cfg(feature = "cli")]
#[derive(Clone, ValueEnum)]
enum Format {
    /// RFC 4180 CSV
    Csv,
    /// HTML table with span attributes
    Html,
    /// One logical row per line, cells joined with " | "
    Plain,
}

#[cfg(feature = "cli")]
fn main() -> io::Result<()> {
    let cli = Cli::parse();

    let input = match cli.input_file {
        Some(ref path) => fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let model = match extract_table(&input) {
        Ok(model) => model,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if cli.detect {
        println!("{}", if model.is_empty() { "none" } else { "table" });
        return Ok(());
    }

    if model.is_empty() {
        eprintln!("No grid table found in input");
        std::process::exit(1);
    }

    let result = match cli.format {
        Format::Csv => to_csv(&model),
        Format::Html => to_html(&model),
        Format::Plain => render_plain(&model),
    };

    match cli.output {
        Some(path) => {
            let mut file = fs::File::create(&path)?;
            write!(file, "{}", result)?;
            eprintln!("✓ Output written to: {}", path);
        }
        None => {
            print!("{}", result);
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn render_plain(model: &TableModel) -> String {
    let mut out = String::new();
    for row in 0..model.row_count() {
        let mut fields = Vec::with_capacity(model.column_count());
        for col in 0..model.column_count() {
            let text = match model.cell(row, col) {
                Some(cell) if cell.is_anchored_at(row, col) => cell.text.replace('\n', " "),
                _ => String::new(),
            };
            fields.push(text);
        }
        out.push_str(&fields.join(" | "));
        out.push('\n');
    }
    out
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Build with --features cli");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  cargo install quadro --features cli");
    eprintln!("  qdr [OPTIONS] [INPUT_FILE]");
}
