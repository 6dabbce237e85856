use clap::{Parser, Subcommand};
use pronto_core::config::ProntoConfig;
use pronto_core::types::Provider;
use pronto_core::{Pronto, ProntoError};
use pronto_store::{MemSessions, MemStore, ProfileCache};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::Path;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pronto")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    Serve,
    Openapi,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    match cli.command {
        Command::Serve => {
            if let Err(err) = serve().await {
                eprintln!("serve error: {err}");
                std::process::exit(1);
            }
        }
        Command::Openapi => {
            let spec = pronto_serve::openapi::generate_spec();
            println!("{}", spec);
        }
    }
}

async fn serve() -> Result<(), ProntoError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cache_path =
        std::env::var("PRONTO_CACHE_PATH").unwrap_or_else(|_| ".pronto/identity.db".to_string());
    prepare_cache_dir(&cache_path)?;
    let port = std::env::var("PRONTO_PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(4830);

    let store = MemStore::new();
    if let Ok(path) = std::env::var("PRONTO_FIXTURES") {
        let count = load_fixtures(&store, &path)?;
        tracing::info!(count, path, "seeded provider fixtures");
    }
    let cache = ProfileCache::open(&cache_path)?;
    let sessions = MemSessions::new();
    let pronto = Pronto::new(store, sessions.clone(), cache, ProntoConfig::from_env());
    let state = pronto_serve::AppState::new(pronto, sessions);

    let addr = SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), port);
    tracing::info!(%addr, "listening");
    pronto_serve::serve(state, addr)
        .await
        .map_err(|err| ProntoError::Internal {
            message: err.to_string(),
        })
}

/// Create the cache file's parent directory. A bare filename needs none; a
/// failed creation is fatal here, with a clearer message than the sqlite
/// open error it would otherwise surface as.
fn prepare_cache_dir(cache_path: &str) -> Result<(), ProntoError> {
    let parent = Path::new(cache_path)
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty());
    if let Some(dir) = parent {
        std::fs::create_dir_all(dir).map_err(|err| ProntoError::Internal {
            message: format!("failed to create cache directory {}: {err}", dir.display()),
        })?;
    }
    Ok(())
}

fn load_fixtures(store: &MemStore, path: &str) -> Result<usize, ProntoError> {
    let raw = std::fs::read_to_string(path).map_err(|err| ProntoError::Internal {
        message: format!("failed to read fixtures {path}: {err}"),
    })?;
    let providers: Vec<Provider> =
        serde_json::from_str(&raw).map_err(|err| ProntoError::Internal {
            message: format!("malformed fixtures {path}: {err}"),
        })?;
    let count = providers.len();
    for provider in providers {
        store.put_provider(provider);
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_filenames_need_no_directory() {
        assert!(prepare_cache_dir("identity.db").is_ok());
    }

    #[test]
    fn nested_cache_directories_are_created() {
        let dir = std::env::temp_dir().join(format!("pronto-cache-test-{}", std::process::id()));
        let path = dir.join("nested").join("identity.db");
        prepare_cache_dir(path.to_str().unwrap()).unwrap();
        assert!(path.parent().unwrap().is_dir());
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn unwritable_cache_directory_is_an_error() {
        let file = std::env::temp_dir().join(format!("pronto-cache-file-{}", std::process::id()));
        std::fs::write(&file, b"not a directory").unwrap();
        let path = file.join("identity.db");
        let result = prepare_cache_dir(path.to_str().unwrap());
        assert!(matches!(result, Err(ProntoError::Internal { .. })));
        let _ = std::fs::remove_file(file);
    }
}
