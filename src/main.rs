use std::path::Path;
use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use serde::Serialize;
use tracing::error;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Layer;
use watch_reconciler::discover_host;
use watch_reconciler::normalize_json;
use watch_reconciler::HandleBuilder;
use watch_reconciler::HostQuery;
use watch_reconciler::LoggingConfig;
use watch_reconciler::ResourceKind;
use watch_reconciler::Result;
use watch_reconciler::Settings;
use watch_reconciler::WatchController;
use watch_reconciler::WatchDeclaration;
use watch_reconciler::WatchError;
use watch_reconciler::WatchResource;

#[derive(Parser, Debug)]
#[command(name = "watch-reconciler", version, about)]
struct Cli {
    /// Config file; falls back to `CONFIG_PATH`
    #[arg(long, global = true)]
    config: Option<String>,

    /// Print Prometheus metrics to stderr before exiting
    #[arg(long, global = true)]
    print_metrics: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Creates a watch that must not exist yet
    Create(DeclareArgs),
    /// Reads the stored state of a watch
    Read(WatchIdArgs),
    /// Overwrites an existing watch
    Update(DeclareArgs),
    /// Deletes a watch
    Delete(WatchIdArgs),
    /// Adopts an existing watch by id
    Import(WatchIdArgs),
    /// Compares a declaration with the stored watch without changing anything
    Plan(DeclareArgs),
    /// Reports the endpoint the connection uses
    Host {
        #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
        active: bool,
    },
}

#[derive(clap::Args, Debug)]
struct WatchIdArgs {
    #[arg(long)]
    watch_id: String,
}

#[derive(clap::Args, Debug)]
struct DeclareArgs {
    #[arg(long)]
    watch_id: String,

    /// File holding the watch definition as JSON
    #[arg(long)]
    body_file: PathBuf,

    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    active: bool,

    /// Resource type name the declaration arrives under
    #[arg(long, default_value = "elasticsearch_xpack_watch")]
    resource: String,
}

impl DeclareArgs {
    async fn declaration(&self) -> Result<WatchDeclaration> {
        let body = tokio::fs::read_to_string(&self.body_file).await?;
        Ok(WatchDeclaration::new(self.watch_id.clone(), body).with_active(self.active))
    }

    fn kind(&self) -> Result<ResourceKind> {
        ResourceKind::from_name(&self.resource).ok_or_else(|| {
            WatchError::InvalidDeclaration(format!("unknown resource type: {}", self.resource)).into()
        })
    }
}

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref())?;

    // Initializing Logs
    let _guard = init_observability(&settings.logging)?;

    let result = run(cli.command, settings).await;
    if let Err(e) = &result {
        error!("{}", e);
    }

    if cli.print_metrics {
        eprintln!("{}", watch_reconciler::render());
    }
    result
}

async fn run(
    command: Commands,
    settings: Settings,
) -> Result<()> {
    let handle = HandleBuilder::new(settings.connection).build().await?;

    match command {
        Commands::Create(args) => {
            let controller = WatchController::new(handle).with_kind(args.kind()?);
            let mut resource = WatchResource::new();
            let state = controller.create(&mut resource, &args.declaration().await?).await?;
            print_json(&state)
        }
        Commands::Read(args) => {
            let mut resource = WatchResource::tracked(args.watch_id);
            let state = WatchController::new(handle).read(&mut resource).await?;
            print_json(&state)
        }
        Commands::Update(args) => {
            let controller = WatchController::new(handle).with_kind(args.kind()?);
            let mut resource = WatchResource::tracked(args.watch_id.clone());
            let state = controller.update(&mut resource, &args.declaration().await?).await?;
            print_json(&state)
        }
        Commands::Delete(args) => {
            let mut resource = WatchResource::tracked(args.watch_id.clone());
            WatchController::new(handle).delete(&mut resource).await?;
            info!("watch {} deleted", args.watch_id);
            Ok(())
        }
        Commands::Import(args) => {
            let mut resource = WatchResource::new();
            let state = WatchController::new(handle).import(&mut resource, &args.watch_id).await?;
            print_json(&state)
        }
        Commands::Plan(args) => {
            let declaration = args.declaration().await?;
            declaration.validate()?;
            let mut resource = WatchResource::tracked(args.watch_id.clone());
            let state = WatchController::new(handle).with_kind(args.kind()?).read(&mut resource).await?;

            let plan = match &state {
                None => "create",
                Some(state) if state.matches(&declaration) => "no-op",
                Some(_) => "update",
            };
            let declared = normalize_json(&declaration.body).map_err(|source| WatchError::InvalidBody {
                watch_id: args.watch_id.clone(),
                source,
            })?;
            print_json(&serde_json::json!({
                "watch_id": args.watch_id,
                "plan": plan,
                "declared": { "body": declared, "active": declaration.active },
                "stored": state,
            }))
        }
        Commands::Host { active } => {
            let record = discover_host(&handle, &HostQuery { active })?;
            print_json(&record)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| watch_reconciler::Error::Fatal(format!("cannot render output: {}", e)))?;
    println!("{}", text);
    Ok(())
}

/// Console logging, plus a non-blocking file appender when `log_dir` is set.
///
/// `RUST_LOG` wins over the configured level.
pub fn init_observability(logging: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = || EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let console = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(filter());

    match &logging.log_dir {
        Some(log_dir) => {
            std::fs::create_dir_all(log_dir)?;
            let appender = tracing_appender::rolling::never(Path::new(log_dir), "watch-reconciler.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            let file = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_filter(filter());
            tracing_subscriber::registry().with(console).with(file).init();
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::registry().with(console).init();
            Ok(None)
        }
    }
}
