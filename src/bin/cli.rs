use ansi_term::Color;
use anyhow::{Context, Result};
use clap::{clap_app, value_t, App, Arg, ArgGroup, ArgMatches, ErrorKind};
use keyindex::{Index, IndexBuilder, KeyLength};
use std::convert::TryFrom;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, PartialEq)]
enum Mode {
    Create,
    List,
}

struct Options {
    mode: Mode,
    input: PathBuf,
    index: PathBuf,
    key_length: KeyLength,
    preallocate: bool,
}

fn app() -> App<'static, 'static> {
    clap_app!(keyindex =>
        (version: env!("CARGO_PKG_VERSION"))
        (about: env!("CARGO_PKG_DESCRIPTION"))
        (@arg create: -c "Build the index only")
        (@arg list: -l "Build the index, then list the input in key order")
        (@arg INPUT: * "Text file to index")
        (@arg INDEX: * "Path of the index file to write")
        (@arg KEY_LENGTH: * "Number of leading bytes of each line used as key (1-24)")
    )
    .arg(
        Arg::with_name("no-count")
            .long("no-count")
            .help("Skip the line counting pass made before building"),
    )
    .group(
        ArgGroup::with_name("mode")
            .args(&["create", "list"])
            .required(true),
    )
}

fn parse_options(matches: &ArgMatches) -> keyindex::Result<Options> {
    let mode = if matches.is_present("list") {
        Mode::List
    } else {
        Mode::Create
    };

    let key_length = value_t!(matches, "KEY_LENGTH", i64).map_err(|_| {
        keyindex::Error::InvalidArgument(format!(
            "key length must be an integer between {} and {}",
            KeyLength::MIN,
            KeyLength::MAX
        ))
    })?;

    Ok(Options {
        mode,
        input: PathBuf::from(matches.value_of_os("INPUT").unwrap_or_default()),
        index: PathBuf::from(matches.value_of_os("INDEX").unwrap_or_default()),
        key_length: KeyLength::try_from(key_length)?,
        preallocate: !matches.is_present("no-count"),
    })
}

fn list(options: &Options) -> Result<()> {
    let index = Index::read_from_path(&options.index, options.key_length)
        .context("failed to read index back")?;
    let listings = index
        .lookup(&options.input)
        .context("failed to reopen input for listing")?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    writeln!(out, "Listing file using index:")?;

    let mut listed = 0usize;
    for result in listings {
        match result {
            Ok(listing) => {
                listing.write_to(&mut out)?;
                listed += 1;
            }
            Err(e) => warn!(error = %e, "skipping record"),
        }
    }

    writeln!(out, "Done listing file!")?;
    writeln!(out, "# of records in file: {}", listed)?;
    out.flush()?;

    if listed < index.len() {
        warn!(
            failed = index.len() - listed,
            total = index.len(),
            "some records could not be listed"
        );
    }
    Ok(())
}

fn run(options: &Options) -> Result<()> {
    let index = IndexBuilder::new(options.key_length)
        .preallocate(options.preallocate)
        .build_from_path(&options.input)
        .context("failed to build index")?;
    index
        .write_to_path(&options.index)
        .context("failed to write index")?;

    info!(
        input = %options.input.display(),
        index = %options.index.display(),
        records = index.len(),
        "index created"
    );

    if options.mode == Mode::List {
        list(options)?;
    }

    Ok(())
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let matches = match app().get_matches_safe() {
        Ok(matches) => matches,
        Err(e) if e.kind == ErrorKind::HelpDisplayed || e.kind == ErrorKind::VersionDisplayed => {
            e.exit()
        }
        Err(e) => {
            eprintln!("{}", e.message);
            return Ok(());
        }
    };

    let options = match parse_options(&matches) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("{} {}", Color::Red.bold().paint("error:"), e);
            return Ok(());
        }
    };

    run(&options)
}
