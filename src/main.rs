use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Parser};
use crateport::confirm::{AutoConfirm, Confirmer, TerminalConfirmer};
use crateport::export::{self, ExportConfig, ExportOutcome};
use crateport::import::import_xml;
use crateport::mixxx::{MixxxLibrary, DEFAULT_DATABASE};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "crateport")]
#[command(about = "Import and export crates from Mixxx", long_about = None)]
struct Args {
    #[command(flatten)]
    mode: ModeArgs,

    /// Path to the Mixxx database (mixxxdb.sqlite)
    #[arg(short = 'd', long, default_value = DEFAULT_DATABASE)]
    database: String,

    /// Write M3U entries relative to the current directory
    #[arg(short = 'r', long)]
    relative: bool,

    /// Answer yes to every confirmation prompt
    #[arg(short = 'y', long)]
    yes: bool,

    /// Verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,

    /// XML file to export to / import from (stdout/stdin when omitted),
    /// or the output directory for --m3u
    file: Option<PathBuf>,
}

#[derive(ClapArgs, Debug)]
#[group(required = false, multiple = false)]
struct ModeArgs {
    /// List crate names
    #[arg(short = 'l', long)]
    list: bool,

    /// Export crates as XML (default)
    #[arg(short = 'e', long)]
    export: bool,

    /// Import crates from XML
    #[arg(short = 'i', long = "import")]
    import: bool,

    /// Stream a tar archive of every file in any crate to stdout
    #[arg(short = 't', long)]
    tar: bool,

    /// Write one M3U playlist per crate
    #[arg(short = 'm', long)]
    m3u: bool,

    /// Copy crate members into per-crate folders under DIR (must exist)
    #[arg(short = 'c', long, value_name = "DIR")]
    copy: Option<PathBuf>,
}

#[derive(Debug, PartialEq, Eq)]
enum Mode {
    List,
    Export,
    Import,
    Tar,
    M3u,
    Copy(PathBuf),
}

impl ModeArgs {
    fn mode(&self) -> Mode {
        if self.list {
            Mode::List
        } else if self.import {
            Mode::Import
        } else if self.tar {
            Mode::Tar
        } else if self.m3u {
            Mode::M3u
        } else if let Some(dir) = &self.copy {
            Mode::Copy(dir.clone())
        } else {
            Mode::Export
        }
    }
}

impl Args {
    /// Directory receiving M3U playlists: the positional argument, or `.`
    fn playlist_dir(&self) -> PathBuf {
        self.file.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging (stderr, so stdout stays clean for XML and tar output)
    let log_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let db_path = PathBuf::from(shellexpand::tilde(&args.database).as_ref());
    let mut library = MixxxLibrary::open(&db_path)?;

    let mut confirmer: Box<dyn Confirmer> = if args.yes {
        Box::new(AutoConfirm)
    } else {
        Box::new(TerminalConfirmer::new())
    };

    match args.mode.mode() {
        Mode::List => list_crates(&mut library),
        Mode::Export => export_xml(&mut library, args.file.as_deref()),
        Mode::Import => import(&mut library, args.file.as_deref()),
        Mode::Tar => stream_tar(&mut library),
        Mode::M3u => {
            let mut config = ExportConfig::new(args.playlist_dir()).with_decision_logging(args.verbose);
            if args.relative {
                let cwd = std::env::current_dir().context("Failed to read working directory")?;
                config = config.with_relative_paths(cwd);
            }

            let doc = library.session(|repo| repo.crates_with_tracks())?;
            let outcome = export::export_m3u(&doc, &config, confirmer.as_mut())?;
            report("M3U export", outcome);
            Ok(())
        }
        Mode::Copy(dest) => {
            let config = ExportConfig::new(dest).with_decision_logging(args.verbose);

            let doc = library.session(|repo| repo.crates_with_tracks())?;
            let outcome = export::export_folders(&doc, &config, confirmer.as_mut())?;
            report("Folder export", outcome);
            Ok(())
        }
    }
}

fn list_crates(library: &mut MixxxLibrary) -> Result<()> {
    let names = library.session(|repo| repo.list_crate_names())?;

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "list of crates:")?;
    for name in names {
        writeln!(stdout, "{}", name)?;
    }
    Ok(())
}

fn export_xml(library: &mut MixxxLibrary, file: Option<&Path>) -> Result<()> {
    let doc = library.session(|repo| repo.crates_with_tracks())?;

    match file {
        Some(path) => {
            let output = File::create(path)
                .with_context(|| format!("Failed to create output file: {:?}", path))?;
            export::write_document(&doc, BufWriter::new(output))?;
            log::info!("Exported {} crates to {:?}", doc.crate_count(), path);
        }
        None => export::write_document(&doc, io::stdout().lock())?,
    }
    Ok(())
}

fn import(library: &mut MixxxLibrary, file: Option<&Path>) -> Result<()> {
    let report = library.session(|repo| match file {
        Some(path) => {
            let input = File::open(path)
                .with_context(|| format!("Failed to open crates file: {:?}", path))?;
            import_xml(repo, BufReader::new(input))
        }
        None => import_xml(repo, io::stdin().lock()),
    })?;

    log::info!(
        "Import complete: {} crates created, {} existing; {} tracks added, {} already in crate, {} unmatched",
        report.crates_created,
        report.crates_existing,
        report.tracks_added,
        report.tracks_already_linked,
        report.tracks_unmatched
    );
    Ok(())
}

fn stream_tar(library: &mut MixxxLibrary) -> Result<()> {
    let paths = library.session(|repo| repo.referenced_file_paths())?;

    // Nothing else may be written to stdout while the archive streams
    let mut stdout = export::write_tar(&paths, io::stdout().lock())?;
    stdout.flush().context("Failed to flush tar stream")?;
    Ok(())
}

fn report(what: &str, outcome: ExportOutcome) {
    match outcome {
        ExportOutcome::Completed(stats) => log::info!(
            "{} finished: {} written, {} skipped",
            what,
            stats.written,
            stats.skipped
        ),
        ExportOutcome::Declined => log::info!("{} cancelled", what),
    }
}
