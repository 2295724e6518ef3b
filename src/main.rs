use anyhow::{Context, Result, bail};
use camino::Utf8PathBuf;
use cbp_finder::catalog::{Catalog, FsSource, ReaderSource};
use cbp_finder::config::{DEFAULT_DATA_FILE, FinderConfig};
use cbp_finder::controller::Controller;
use cbp_finder::panel::{DirSink, LinkOutcome, SystemLinkOpener};
use cbp_finder::view::{HtmlView, TextView, View, render_page};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

const STARTUP_HINT: &str =
    "Check that the file exists and is valid catalog JSON, or pass --data <FILE> (use '-' for stdin).";

#[derive(Parser, Debug)]
#[command(author, version, about = "Browse, filter and export tile installation systems", long_about = None)]
struct Cli {
    /// Catalog JSON document ('-' reads stdin)
    #[arg(long, global = true, value_name = "FILE", default_value = DEFAULT_DATA_FILE)]
    data: Utf8PathBuf,

    /// Category selected at startup and on reset
    #[arg(long, global = true, value_name = "NAME")]
    default_category: Option<String>,

    /// Application selected at startup and on reset
    #[arg(long, global = true, value_name = "NAME")]
    default_application: Option<String>,

    /// Directory export packages are written to
    #[arg(long, global = true, value_name = "DIR", default_value = ".")]
    export_dir: Utf8PathBuf,

    /// Log at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the systems matching the filters
    List {
        #[command(flatten)]
        filters: FilterArgs,
        /// Print matching records as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the category list and the option lists
    Options,
    /// Render a standalone HTML page for the filters
    Html {
        #[command(flatten)]
        filters: FilterArgs,
        /// Output file (stdout if omitted)
        #[arg(short, long, value_name = "FILE")]
        output: Option<Utf8PathBuf>,
    },
    /// List the documents of a system
    Docs {
        system_id: String,
        /// Open the N-th document (1-based)
        #[arg(long, value_name = "N")]
        open: Option<usize>,
    },
    /// Write the download package of a system
    Export { system_id: String },
    /// Open the interactive viewer
    #[cfg(feature = "egui")]
    Gui,
}

/// Filter overrides. Omitted flags keep the defaults; an empty value means "any".
#[derive(Args, Debug, Default)]
struct FilterArgs {
    #[arg(long)]
    category: Option<String>,
    #[arg(long)]
    application: Option<String>,
    #[arg(long)]
    substrate: Option<String>,
    #[arg(long)]
    tile_type: Option<String>,
    /// Free-text search; every word must match
    #[arg(short, long)]
    query: Option<String>,
}

impl FilterArgs {
    fn apply<V: View>(self, c: &mut Controller<V>) {
        if let Some(v) = self.category {
            c.set_category(v);
        }
        if let Some(v) = self.application {
            c.set_application(v);
        }
        if let Some(v) = self.substrate {
            c.set_substrate(v);
        }
        if let Some(v) = self.tile_type {
            c.set_tile_type(v);
        }
        if let Some(v) = self.query {
            c.set_query(v);
        }
    }
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_catalog(path: &Utf8PathBuf) -> Result<Catalog> {
    let loaded = if path.as_str() == "-" {
        Catalog::load(&mut ReaderSource::new("<stdin>", std::io::stdin().lock()))
    } else {
        Catalog::load(&mut FsSource::new(path))
    };
    loaded.with_context(|| format!("Failed to load {}. {}", path, STARTUP_HINT))
}

fn controller<V: View>(catalog: Catalog, config: &FinderConfig, view: V) -> Controller<V> {
    Controller::init(
        catalog,
        config.default_filters(),
        view,
        Box::new(DirSink::new(&config.export_dir)),
        Box::new(SystemLinkOpener),
    )
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let defaults = FinderConfig::default();
    let config = FinderConfig {
        data_path: cli.data,
        default_category: cli.default_category.unwrap_or(defaults.default_category),
        default_application: cli.default_application.unwrap_or(defaults.default_application),
        export_dir: cli.export_dir,
    };

    let catalog = load_catalog(&config.data_path)?;

    match cli.command {
        Command::List { filters, json } => {
            let mut c = controller(catalog, &config, TextView::new());
            filters.apply(&mut c);
            if json {
                println!("{}", serde_json::to_string_pretty(&c.results())?);
            } else {
                print!("{}", c.view().results);
            }
        }
        Command::Options => {
            let c = controller(catalog, &config, TextView::new());
            println!("Categories:");
            print!("{}", c.view().categories_text());
            print!("{}", c.view().options_text());
        }
        Command::Html { filters, output } => {
            let mut c = controller(catalog, &config, HtmlView::new());
            filters.apply(&mut c);
            let page = render_page(c.view(), "CBP Systems Finder");
            match output {
                Some(path) => std::fs::write(&path, page)
                    .with_context(|| format!("Failed to write {}", path))?,
                None => print!("{page}"),
            }
        }
        Command::Docs { system_id, open } => {
            let mut c = controller(catalog, &config, TextView::new());
            if !c.open_documents(&system_id) {
                bail!("No system with id '{}'", system_id);
            }
            print!("{}", c.view().panel);
            if let Some(n) = open {
                match c.open_document(n.saturating_sub(1))? {
                    Some(LinkOutcome::Opened(url)) => println!("Opened {url}"),
                    Some(LinkOutcome::NoRealLink) => {
                        for notice in &c.view().notices {
                            eprintln!("{notice}");
                        }
                    }
                    None => bail!("No document #{}", n),
                }
            }
        }
        Command::Export { system_id } => {
            let mut c = controller(catalog, &config, TextView::new());
            match c.download(&system_id)? {
                Some(artifact) => println!("{}", config.export_dir.join(&artifact.filename)),
                None => bail!("No system with id '{}'", system_id),
            }
        }
        #[cfg(feature = "egui")]
        Command::Gui => cbp_finder::egui_app::run(catalog, &config)?,
    }
    Ok(())
}
