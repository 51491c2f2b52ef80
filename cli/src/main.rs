use std::error::Error;
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use clap::{ArgAction, Parser};
use rcjson::{Context, Indent, NonFinite, NumberFormat, ParseOptions, SerializeOptions, Style};

#[derive(Parser, Debug)]
#[command(name = "rcjson", version, about = "JSON parser and reformatter")]
struct Args {
    /// Input file path. Omit or use '-' to read from stdin.
    input: Option<String>,

    /// Output file path (prints to stdout if omitted).
    #[arg(short, long, value_name = "file")]
    output: Option<String>,

    /// Write compact output instead of indented output.
    #[arg(short, long)]
    compact: bool,

    /// Indentation size for pretty output (default: 2).
    #[arg(long, value_name = "number", default_value_t = 2)]
    indent: usize,

    /// Reject `//` and `/* */` comments in the input.
    #[arg(long = "no-comments", action = ArgAction::SetFalse, default_value_t = true)]
    comments: bool,

    /// Write NaN and infinities as strings instead of null.
    #[arg(long)]
    nan_as_string: bool,

    /// Write numbers like printf's %g instead of shortest round-trip text.
    #[arg(long)]
    general_numbers: bool,

    /// Escape every non-ASCII character.
    #[arg(long)]
    ascii: bool,
}

impl Args {
    fn parse_options(&self) -> ParseOptions {
        ParseOptions::default()
            .with_line_comments(self.comments)
            .with_block_comments(self.comments)
    }

    fn serialize_options(&self) -> SerializeOptions {
        let style = if self.compact {
            Style::Compact
        } else {
            Style::Pretty
        };
        let number_format = if self.general_numbers {
            NumberFormat::General
        } else {
            NumberFormat::Shortest
        };
        let non_finite = if self.nan_as_string {
            NonFinite::String
        } else {
            NonFinite::Null
        };
        SerializeOptions::new()
            .with_style(style)
            .with_indent(Indent::spaces(self.indent))
            .with_number_format(number_format)
            .with_non_finite(non_finite)
            .with_ascii_only(self.ascii)
    }
}

fn main() {
    if let Err(err) = run() {
        // Parse and read errors were already reported by the context.
        if err.downcast_ref::<rcjson::Error>().is_none() {
            eprintln!("ERROR  {err}");
        }
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let context = Context::new().with_options(args.parse_options());

    let value = match args.input.as_deref() {
        None | Some("-") => {
            let mut buf = Vec::new();
            io::stdin().read_to_end(&mut buf)?;
            context.parse_slice(&buf)?
        }
        Some(path) => context.parse_from(path)?,
    };

    let mut text = rcjson::to_string_with_options(&value, &args.serialize_options());
    text.push('\n');

    match args.output.as_deref() {
        Some(path) if path != "-" => {
            fs::write(path, text)?;
            report_status(args.input.as_deref(), path);
        }
        _ => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(text.as_bytes())?;
        }
    }
    Ok(())
}

fn report_status(input: Option<&str>, output_path: &str) {
    let input_label = match input {
        None | Some("-") => "stdin".to_string(),
        Some(path) => display_path(path),
    };
    println!("✔ Formatted {input_label} → {}", display_path(output_path));
}

fn display_path(path: &str) -> String {
    let path = Path::new(path);
    std::env::current_dir()
        .ok()
        .and_then(|cwd| path.strip_prefix(cwd).ok().map(Path::to_path_buf))
        .unwrap_or_else(|| path.to_path_buf())
        .to_string_lossy()
        .into_owned()
}
