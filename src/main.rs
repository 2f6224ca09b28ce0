//! ink CLI
//!
//! Usage:
//!   ink [OPTIONS] <TEMPLATE>...
//!
//! Templates are local paths or http(s) URLs ending in `.in`. Each template is
//! rendered in parallel and written beside the template (or to the working
//! directory for URLs) with the `.in` suffix removed.

use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use ink_template::lint::{lint_source, LintError};
use ink_template::validate::{ensure_local_exists, has_template_extension, piped_stdin};
use ink_template::{Config, Orchestrator, RenderRequest, SourceResolver, TemplateSource};

#[derive(Parser)]
#[command(name = "ink")]
#[command(about = "Render text templates with a single replacement value")]
#[command(after_help = EXAMPLES)]
struct Cli {
    /// Template file paths or URLs (*.in)
    templates: Vec<String>,

    /// Find string value for template render ({{regex}} for a regular expression)
    #[arg(long)]
    find: Option<String>,

    /// Replacement string value for template render (reads stdin if not provided)
    #[arg(long)]
    replace: Option<String>,

    /// Lint ink template files
    #[arg(long)]
    lint: bool,

    /// Write render to standard output stream
    #[arg(long)]
    stdout: bool,

    /// Trim newline values from the end of the replacement string
    #[arg(long)]
    trimnl: bool,

    /// Config file with default settings (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging on stderr
    #[arg(long)]
    verbose: bool,

    /// Show application usage
    #[arg(long)]
    usage: bool,

    /// Show application version
    #[arg(short = 'v', long)]
    version: bool,
}

const EXAMPLES: &str = r#"BUILTIN TAGS:
    {{ .One }} .. {{ .Ten }}, {{ .Ink }}, {{ ink }}
    All resolve to the replacement value.

EXAMPLES:
    ink --replace=1.2.3 VERSION.txt.in
    git rev-parse HEAD | ink --trimnl README.md.in
    ink --find='[[sha]]' --replace=abc123 https://example.com/t/notes.txt.in
    ink --find='{{\d+\.\d+}}' --replace=2.0 --stdout CHANGES.md.in"#;

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    if cli.version {
        println!("ink v{}", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    if cli.usage {
        print_usage();
        return ExitCode::SUCCESS;
    }

    if cli.templates.is_empty() {
        eprintln!("[ink] ERROR: Missing template arguments to the ink executable.");
        print_usage();
        return ExitCode::FAILURE;
    }

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(code) => return code,
    };
    let to_stdout = cli.stdout || config.render.stdout;

    let sources: Vec<TemplateSource> = cli
        .templates
        .iter()
        .map(|arg| TemplateSource::classify(arg))
        .collect();

    if !validate_sources(&sources, to_stdout) {
        return ExitCode::FAILURE;
    }

    let resolver = match SourceResolver::new(&config.remote) {
        Ok(resolver) => resolver,
        Err(e) => {
            eprintln!("[ink] ERROR: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if cli.lint {
        return lint_all(&resolver, &sources);
    }

    let replacement = match read_replacement(cli.replace, config.render.replace) {
        Ok(Some(replacement)) => replacement,
        Ok(None) => {
            eprintln!("[ink] ERROR: Missing replacement string for template render.");
            print_usage();
            return ExitCode::FAILURE;
        }
        Err(e) => {
            eprintln!("[ink] ERROR: Unable to read standard input stream. {}", e);
            return ExitCode::FAILURE;
        }
    };
    let replacement = if cli.trimnl || config.render.trim_newlines {
        replacement.trim_end_matches('\n').to_string()
    } else {
        replacement
    };

    let find = cli.find.or(config.render.find).filter(|f| !f.is_empty());

    let requests = sources
        .into_iter()
        .map(|source| {
            let request = RenderRequest::new(source, replacement.clone()).with_stream(to_stdout);
            match &find {
                Some(find) => request.with_find(find.clone()),
                None => request,
            }
        })
        .collect();

    let report = Orchestrator::new(resolver).render_all(requests);
    if !report.is_success() {
        return ExitCode::FAILURE;
    }

    // confirm the batch only when status lines cannot corrupt streamed output
    if !to_stdout {
        println!("[ink] Render complete.");
    }
    ExitCode::SUCCESS
}

fn init_logging(verbose: bool) {
    let log_level = if verbose { Level::DEBUG } else { Level::WARN };

    // stdout carries rendered templates, so logs go to stderr
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("[ink] WARNING: unable to initialize logging: {}", e);
    }
}

fn print_usage() {
    println!("{}", Cli::command().render_usage());
}

fn load_config(path: Option<&Path>) -> Result<Config, ExitCode> {
    match path {
        Some(path) => Config::from_file(path).map_err(|e| {
            eprintln!("[ink] ERROR: Error loading config '{}': {}", path.display(), e);
            ExitCode::FAILURE
        }),
        None => Ok(Config::default()),
    }
}

/// Report every invalid argument before failing
fn validate_sources(sources: &[TemplateSource], to_stdout: bool) -> bool {
    let mut valid = true;

    // the suffix builds the output path, which a stdout render never needs
    if !to_stdout {
        for source in sources {
            if !has_template_extension(source) {
                eprintln!(
                    "[ink] ERROR: Argument '{}' is not a properly specified template with *.in file extension.",
                    source
                );
                valid = false;
            }
        }
    }

    for source in sources {
        if let TemplateSource::Local(path) = source {
            if let Err(e) = ensure_local_exists(path) {
                eprintln!("[ink] ERROR: {}", e);
                valid = false;
            }
        }
    }

    valid
}

fn lint_all(resolver: &SourceResolver, sources: &[TemplateSource]) -> ExitCode {
    let mut failed = false;
    for source in sources {
        match lint_source(resolver, source) {
            Ok(()) => println!("[✓] {}: Valid template", source),
            Err(e) => {
                eprintln!("[X] {}: FAIL --- {}", source, e);
                if let LintError::Syntax { report, .. } = &e {
                    eprint!("{}", report);
                }
                failed = true;
            }
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// `--replace` wins over the config file, which wins over piped stdin
fn read_replacement(flag: Option<String>, configured: Option<String>) -> io::Result<Option<String>> {
    match flag.filter(|r| !r.is_empty()).or(configured) {
        Some(replacement) => Ok(Some(replacement)),
        None => piped_stdin(),
    }
}
