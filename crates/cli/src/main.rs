//! Terminal viewer and exporter for the department overview deck.

mod app;
mod ui;

use anyhow::{Context, Result};
use app::App;
use clap::{Parser, Subcommand};
use deck_core::{catalog, Deck, Navigator};
use deck_pptx::{DeckExporter, DocumentSink, FileSink, PptxReader, PptxWriter, ReadDeck};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

/// Browse the department overview deck and export it as PowerPoint.
#[derive(Parser, Debug)]
#[command(name = "deck")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Open the interactive viewer (default)
    View {
        /// Directory exports are saved to (default: current directory)
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },

    /// Write the deck as a .pptx without opening the viewer
    Export {
        /// Output directory (default: current directory)
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        /// Store package parts uncompressed
        #[arg(long)]
        no_compress: bool,
    },

    /// Print the slide list
    Outline {
        /// Print the full deck as JSON instead
        #[arg(long)]
        json: bool,
    },

    /// Print the text of every slide in a .pptx file
    Inspect {
        /// PowerPoint file to read
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let command = args.command.unwrap_or(Command::View {
        output: PathBuf::from("."),
    });

    match command {
        Command::View { output } => {
            let deck = load_deck()?;
            view(&deck, output)
        }
        Command::Export {
            output,
            no_compress,
        } => {
            let deck = load_deck()?;
            let mut sink = FileSink::new(output);
            export(&deck, &mut sink, no_compress)?;
            if let Some(path) = sink.last_saved() {
                println!("Written to: {}", path.display());
            }
            Ok(())
        }
        Command::Outline { json } => {
            let deck = load_deck()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&deck)?);
            } else {
                print!("{}", outline(&deck));
            }
            Ok(())
        }
        Command::Inspect { file } => {
            let reader = File::open(&file)
                .map(BufReader::new)
                .with_context(|| format!("Failed to open {}", file.display()))?;
            let read = PptxReader::new()
                .read(reader)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            print!("{}", describe(&read));
            Ok(())
        }
    }
}

fn load_deck() -> Result<Deck> {
    let deck = catalog::department_overview().context("Built-in deck is invalid")?;
    log::debug!("Loaded '{}' with {} slides", deck.info().title, deck.len());
    Ok(deck)
}

fn view(deck: &Deck, output: PathBuf) -> Result<()> {
    let mut terminal = ratatui::init();
    let result = App::new(deck, FileSink::new(output)).run(&mut terminal);
    ratatui::restore();
    result.context("Terminal viewer failed")
}

fn export(deck: &Deck, sink: &mut dyn DocumentSink, no_compress: bool) -> Result<()> {
    let writer = if no_compress {
        PptxWriter::new().stored()
    } else {
        PptxWriter::new()
    };
    DeckExporter::with_writer(writer)
        .export(deck, sink)
        .context("Export failed")
}

/// One timeline label per line, with each slide's kicker.
fn outline(deck: &Deck) -> String {
    let nav = Navigator::new(deck);
    nav.timeline(deck)
        .iter()
        .zip(deck.slides())
        .map(|(entry, slide)| format!("{:<32} {}\n", entry.label, slide.kicker()))
        .collect()
}

/// Slide-by-slide text of a package read back from disk.
fn describe(read: &ReadDeck) -> String {
    let mut out = String::new();
    if let Some(title) = &read.title {
        out.push_str(&format!("{}\n", title));
    }
    for slide in &read.slides {
        out.push_str(&format!("\n--- Slide {} ---\n", slide.number));
        for line in slide.lines() {
            out.push_str(line);
            out.push('\n');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_outline_lists_every_slide() {
        let deck = catalog::department_overview().unwrap();
        let text = outline(&deck);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 10);
        assert!(lines[0].starts_with("1. F STSC Department"));
        assert!(lines[0].ends_with("COVER"));
        assert!(lines[9].starts_with("10. Call to Collaborate"));
    }

    #[test]
    fn test_describe_exported_deck() {
        let deck = catalog::department_overview().unwrap();
        let bytes = DeckExporter::new().render(&deck).unwrap();
        let read = PptxReader::new().read(Cursor::new(bytes)).unwrap();
        let text = describe(&read);

        assert!(text.starts_with("F STSC Department Overview\n"));
        assert!(text.contains("--- Slide 10 ---\nCall to Collaborate\n"));
        assert!(text.contains("Slide 4 of 10"));
    }

    #[test]
    fn test_export_command_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let deck = catalog::department_overview().unwrap();
        let mut sink = FileSink::new(dir.path());

        export(&deck, &mut sink, false).unwrap();

        assert!(dir.path().join("F-STSC-Department-Overview.pptx").exists());
    }

    #[test]
    fn test_export_without_compression_is_larger_and_readable() {
        let deck = catalog::department_overview().unwrap();
        let packed = tempfile::tempdir().unwrap();
        let stored = tempfile::tempdir().unwrap();

        let mut packed_sink = FileSink::new(packed.path());
        export(&deck, &mut packed_sink, false).unwrap();
        let mut stored_sink = FileSink::new(stored.path());
        export(&deck, &mut stored_sink, true).unwrap();

        let packed_path = packed_sink.last_saved().unwrap().to_path_buf();
        let stored_path = stored_sink.last_saved().unwrap().to_path_buf();
        let packed_len = std::fs::metadata(&packed_path).unwrap().len();
        let stored_len = std::fs::metadata(&stored_path).unwrap().len();
        assert!(stored_len > packed_len);

        let read = PptxReader::new().read(File::open(stored_path).unwrap()).unwrap();
        assert_eq!(read.slides.len(), 10);
    }

    #[test]
    fn test_export_error_keeps_io_source() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, b"file").unwrap();

        let deck = catalog::department_overview().unwrap();
        let err = export(&deck, &mut FileSink::new(&blocker), false).unwrap_err();

        assert_eq!(err.to_string(), "Export failed");
        assert!(err
            .chain()
            .any(|cause| cause.downcast_ref::<std::io::Error>().is_some()));
    }

    #[test]
    fn test_args_default_to_view() {
        let args = Args::try_parse_from(["deck"]).unwrap();
        assert!(args.command.is_none());

        let args = Args::try_parse_from(["deck", "export", "-o", "out", "-v"]).unwrap();
        assert!(args.verbose);
        assert!(matches!(
            args.command,
            Some(Command::Export { output, no_compress: false }) if output == PathBuf::from("out")
        ));
    }
}
