//! hivec, the hived command-line client

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use hivec::{Config, Context, HttpTransport, Operation, OperationQueue, Orchestrator, RunEvent};

#[derive(Parser, Debug)]
#[command(name = "hivec")]
#[command(version, about = "Client for the hived container orchestration daemon", long_about = None)]
struct Args {
    /// Create a container
    #[arg(short = 'C', long)]
    create: bool,

    /// Start the container
    #[arg(short = 'S', long, conflicts_with = "stop")]
    start: bool,

    /// Stop the container
    #[arg(short = 'T', long)]
    stop: bool,

    /// Destroy the container
    #[arg(short = 'D', long)]
    destroy: bool,

    /// List containers, on all hosts unless --host is given
    #[arg(short = 'L', long)]
    list: bool,

    /// List hosts
    #[arg(short = 'H', long)]
    host_list: bool,

    /// List pools
    #[arg(short = 'P', long)]
    pool_list: bool,

    /// Name of the container
    #[arg(short, long)]
    name: Option<String>,

    /// Image(s) for the new container
    #[arg(short, long = "image")]
    image: Vec<String>,

    /// Host to operate on
    #[arg(long)]
    host: Option<String>,

    /// Pool to create the container in
    #[arg(long)]
    pool: Option<String>,

    /// Public ssh key file, added to root's authorized keys
    #[arg(short, long)]
    key: Option<String>,

    /// Public ssh key as a string
    #[arg(long)]
    raw_key: Option<String>,

    /// Daemon base URL, overrides the configuration file
    #[arg(long)]
    api_url: Option<String>,

    /// Configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the requests that would be sent without sending them
    #[arg(long)]
    dry_run: bool,

    /// Log level
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let level = args.log_level.parse().unwrap_or(Level::WARN);
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    match run(args).await {
        Ok(true) => {
            println!("OK");
            ExitCode::SUCCESS
        }
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> hivec::Result<bool> {
    let mut builder = Context::builder().dry_run(args.dry_run);

    if let Some(name) = args.name {
        builder = builder.container(name);
    }
    if let Some(host) = args.host {
        builder = builder.host(host);
    }
    if let Some(pool) = args.pool {
        builder = builder.pool(pool);
    }

    // Flag beats config file beats built-in default.
    let api_url = match args.api_url {
        Some(url) => Some(url),
        None => match &args.config {
            Some(path) => Config::load(path)?.api.base_url,
            None => None,
        },
    };
    if let Some(url) = api_url {
        builder = builder.api_base_url(url);
    }

    let context = builder.build();

    let mut queue = OperationQueue::new();
    if args.create {
        queue.enqueue(Operation::create());
    }
    if args.start {
        queue.enqueue(Operation::Start);
    }
    if args.stop {
        queue.enqueue(Operation::Stop);
    }
    if args.destroy {
        queue.enqueue(Operation::Destroy);
    }
    if args.list {
        queue.enqueue(Operation::ListContainers);
    }
    if args.host_list {
        queue.enqueue(Operation::ListHosts);
    }
    if args.pool_list {
        queue.enqueue(Operation::ListPools);
    }

    if !args.image.is_empty() {
        queue.set_images(args.image);
    }
    if let Some(key) = args.key {
        queue.set_key_path(key);
    }
    if let Some(raw_key) = args.raw_key {
        queue.set_raw_key(raw_key);
    }

    let cancel = CancellationToken::new();
    let ctrl_c_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c_cancel.cancel();
        }
    });

    let orchestrator = Orchestrator::new(HttpTransport::new());
    let mut events = orchestrator.run(queue, context, cancel);

    let mut all_ok = true;
    while let Some(event) = events.recv().await {
        match event {
            RunEvent::Result(Ok(text)) => println!("{text}"),
            RunEvent::Result(Err(err)) => {
                eprintln!("{err}");
                all_ok = false;
            }
            RunEvent::Finished { ok } => all_ok = ok,
        }
    }

    Ok(all_ok)
}
