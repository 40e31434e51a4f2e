use clap::Parser;
use tower_lsp::{LspService, Server};
use tracing::info;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use csharp_outline::{GLYPH_DOCUMENT_SYMBOL_METHOD, OutlineLanguageServer};

#[derive(Parser, Debug)]
#[command(name = "csharp-outline", version, about)]
struct Args {
    #[arg(long, short)]
    verbose: bool,

    /// Mirror lifecycle messages to the client's log window.
    #[arg(long)]
    log_messages: bool,

    #[arg(long)]
    log_file: Option<String>,
}

fn default_log_path() -> std::path::PathBuf {
    let dir = dirs_or_tmp();
    dir.join("csharp-outline.log")
}

fn dirs_or_tmp() -> std::path::PathBuf {
    if let Some(home) = std::env::var_os("HOME") {
        let dir = std::path::PathBuf::from(home).join(".csharp-outline");
        if std::fs::create_dir_all(&dir).is_ok() {
            return dir;
        }
    }
    std::env::temp_dir()
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let stderr_filter = if args.verbose {
        EnvFilter::new("csharp_outline=debug,tower_lsp=debug")
    } else {
        EnvFilter::new("csharp_outline=info,tower_lsp=warn")
    };

    let file_filter = if args.verbose {
        EnvFilter::new("csharp_outline=debug,tower_lsp=info")
    } else {
        EnvFilter::new("csharp_outline=info,tower_lsp=warn")
    };

    let log_path = args
        .log_file
        .as_ref()
        .map(std::path::PathBuf::from)
        .unwrap_or_else(default_log_path);

    let file_appender = tracing_appender::rolling::never(
        log_path.parent().unwrap_or(std::path::Path::new(".")),
        log_path
            .file_name()
            .unwrap_or(std::ffi::OsStr::new("csharp-outline.log")),
    );

    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false)
        .with_target(false)
        .with_filter(file_filter);

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .with_filter(stderr_filter);

    tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .init();

    info!("Starting csharp-outline server v{}", env!("CARGO_PKG_VERSION"));
    info!("Log file: {}", log_path.display());

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let log_messages = args.log_messages;
    let (service, socket) = LspService::build(|client| OutlineLanguageServer::new(client, log_messages))
        .custom_method(GLYPH_DOCUMENT_SYMBOL_METHOD, OutlineLanguageServer::glyph_document_symbol)
        .finish();

    Server::new(stdin, stdout, socket).serve(service).await;

    info!("csharp-outline server stopped");
}
