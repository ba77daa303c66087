mod logging;
mod session;

use anyhow::Context;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "hexpad")]
#[command(about = "Edit the raw bytes of a file, with unlimited undo and redo", long_about = None)]
#[command(version)]
struct Args {
    /// File to edit
    #[arg(value_name = "FILE")]
    file: std::path::PathBuf,

    /// Start from an empty file when FILE does not exist
    #[arg(long)]
    create: bool,

    /// Bytes per hex row
    #[arg(long, default_value_t = ui::DEFAULT_ROW_WIDTH)]
    width: usize,

    /// Hex rows shown around the cursor
    #[arg(long, default_value_t = 16)]
    rows: usize,

    /// Entries shown per history panel
    #[arg(long, default_value_t = ui::DEFAULT_HISTORY_ROWS)]
    history_rows: usize,

    /// Write logs here instead of stderr
    #[arg(long, value_name = "PATH")]
    log_file: Option<std::path::PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    logging::init(args.log_file.as_deref())?;

    let doc = if args.create {
        editor_state::document::Document::open_or_create(&args.file)
    } else {
        editor_state::document::Document::open(&args.file)
    }
    .with_context(|| format!("cannot load {}", args.file.display()))?;

    let mut session = session::Session::new(
        doc,
        session::Settings {
            width: args.width,
            rows: args.rows,
            history_rows: args.history_rows,
        },
    );

    session.run(&mut std::io::stdin().lock(), &mut std::io::stdout().lock())?;

    tracing::info!(
        path = %session.document().path().display(),
        cursor = session.cursor(),
        "session ended"
    );

    Ok(())
}
