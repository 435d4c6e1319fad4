use canopy::render::{
    Page, RenderError, render_hierarchy_page, render_nodegraph_page, render_treemap_page,
};
use canopy::{CanopyConfig, DuplicateParentPolicy, GraphData, HierarchyKind};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
enum CliError {
    Usage(String),
    Io(std::io::Error),
    Data(canopy::Error),
    Render(RenderError),
    Server(canopy_server::ServerError),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Data(err) => write!(f, "{err}"),
            CliError::Render(err) => write!(f, "{err}"),
            CliError::Server(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl CliError {
    /// 2 for bad invocations or configuration, 3 when the graph cannot form a tree, 1 otherwise.
    fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => 2,
            CliError::Data(canopy::Error::Config { .. }) => 2,
            CliError::Data(err) if err.is_graph_error() => 3,
            _ => 1,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<canopy::Error> for CliError {
    fn from(value: canopy::Error) -> Self {
        Self::Data(value)
    }
}

impl From<RenderError> for CliError {
    fn from(value: RenderError) -> Self {
        Self::Render(value)
    }
}

impl From<canopy_server::ServerError> for CliError {
    fn from(value: canopy_server::ServerError) -> Self {
        Self::Server(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Hierarchy and graph views for flat node/edge datasets.
#[derive(Debug, Parser)]
#[command(name = "canopy", version, about)]
struct Cli {
    /// Settings file (JSON, or YAML by extension).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve the pages and the treemap data API over HTTP.
    Serve(ServeArgs),
    /// Print the hierarchy built from a dataset as JSON.
    Tree(TreeArgs),
    /// Write a standalone HTML page.
    Render(RenderArgs),
}

#[derive(Debug, Args)]
struct ServeArgs {
    #[arg(long)]
    host: Option<String>,
    #[arg(long)]
    port: Option<u16>,
    /// Directory holding the dataset files.
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct TreeArgs {
    #[arg(long)]
    pretty: bool,
    /// Name of the synthetic root used when there are several roots.
    #[arg(long)]
    root_name: Option<String>,
    /// Fail when a node has more than one parent instead of repeating it under each.
    #[arg(long)]
    reject_duplicate_parents: bool,
    /// Dataset JSON path (a sibling `_nodes.csv`/`_edges.csv` pair wins), or `-` for stdin.
    input: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PageKind {
    Hierarchy,
    Nodegraph,
    Treemap,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum DatasetKind {
    #[default]
    Family,
    Infrastructure,
}

impl From<DatasetKind> for HierarchyKind {
    fn from(value: DatasetKind) -> Self {
        match value {
            DatasetKind::Family => HierarchyKind::Family,
            DatasetKind::Infrastructure => HierarchyKind::Infrastructure,
        }
    }
}

#[derive(Debug, Args)]
struct RenderArgs {
    page: PageKind,
    /// Dataset the page describes (selects title, legend and treemap data URL).
    #[arg(long, value_enum, default_value_t)]
    kind: DatasetKind,
    /// Output file; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
    /// Dataset JSON path. Not needed for `treemap`.
    input: Option<PathBuf>,
}

fn load_config(path: Option<&Path>) -> Result<CanopyConfig, CliError> {
    match path {
        Some(path) => Ok(CanopyConfig::from_path(path)?),
        None => Ok(CanopyConfig::default()),
    }
}

fn read_graph(input: Option<&Path>) -> Result<GraphData, CliError> {
    match input {
        None => Err(CliError::Usage("missing dataset path (use `-` for stdin)".to_string())),
        Some(path) if path == Path::new("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(GraphData::from_json_str(&buf)?)
        }
        Some(path) => Ok(canopy::load_graph_data(path)?),
    }
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    if pretty {
        serde_json::to_writer_pretty(&mut stdout, value)?;
    } else {
        serde_json::to_writer(&mut stdout, value)?;
    }
    std::io::Write::write_all(&mut stdout, b"\n")?;
    Ok(())
}

fn write_text(text: &str, out: Option<&Path>) -> Result<(), CliError> {
    match out {
        None => {
            print!("{text}");
            Ok(())
        }
        Some(path) => {
            std::fs::write(path, text)?;
            tracing::info!(path = %path.display(), bytes = text.len(), "wrote page");
            Ok(())
        }
    }
}

fn serve(mut config: CanopyConfig, args: ServeArgs) -> Result<(), CliError> {
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(dir) = args.data_dir {
        config.data.dir = dir;
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(canopy_server::serve(config))?;
    Ok(())
}

fn tree(mut config: CanopyConfig, args: TreeArgs) -> Result<(), CliError> {
    if let Some(name) = args.root_name {
        config.hierarchy.root_name = name;
    }
    if args.reject_duplicate_parents {
        config.hierarchy.duplicate_parents = DuplicateParentPolicy::Reject;
    }

    let data = read_graph(args.input.as_deref())?;
    let tree = data.build_hierarchy(&config.hierarchy)?;
    write_json(&tree, args.pretty)
}

fn render(config: CanopyConfig, args: RenderArgs) -> Result<(), CliError> {
    let kind = HierarchyKind::from(args.kind);
    let page = match args.page {
        PageKind::Hierarchy => Page::Hierarchy(kind),
        PageKind::Nodegraph => Page::NodeGraph,
        PageKind::Treemap => Page::Treemap(kind),
    };

    let html = match page {
        Page::Treemap(kind) => render_treemap_page(kind),
        Page::NodeGraph => {
            let data = read_graph(args.input.as_deref())?;
            render_nodegraph_page(&data, &config.pages.nodegraph_options)?
        }
        Page::Hierarchy(kind) => {
            let data = read_graph(args.input.as_deref())?;
            render_hierarchy_page(&data, kind, &config.pages.hierarchy_options)?
        }
    };
    write_text(&html, args.out.as_deref())
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = load_config(cli.config.as_deref())?;
    match cli.command {
        Command::Serve(args) => serve(config, args),
        Command::Tree(args) => tree(config, args),
        Command::Render(args) => render(config, args),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    // clap prints help/version with status 0 and usage errors with status 2.
    let cli = Cli::try_parse().unwrap_or_else(|err| err.exit());
    init_tracing();

    if let Err(err) = run(cli) {
        eprintln!("{err}");
        std::process::exit(err.exit_code());
    }
}
