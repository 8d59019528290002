use phindex::cli::{self, Cli};
use phindex::errors::PhindexError;
use phindex::output::{self, SettingsDocument};
use phindex::pipeline;
use phindex::progress::{self, Progress};

fn main() {
    let cli = cli::parse();
    let progress = Progress::new(progress::detect_mode(cli.quiet));

    if let Err(err) = run(&cli, &progress) {
        eprintln!("phindex: {err}");
        if let Some(hint) = err.hint() {
            eprintln!("hint: {hint}");
        }
        std::process::exit(err.exit_code());
    }
}

fn run(cli: &Cli, progress: &Progress) -> Result<(), PhindexError> {
    let (index, stats) = pipeline::build_index(&cli.root, progress)?;
    let document = SettingsDocument::new(&index);
    output::write(&document, cli.output.as_deref())?;
    progress.finish(&stats);
    Ok(())
}
