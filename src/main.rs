use soundboard_server::browser::{self, SystemBrowser};
use soundboard_server::config::{Config, ServerState};
use soundboard_server::logger;
use soundboard_server::server::{shutdown, Server};
use std::process::ExitCode;
use std::sync::Arc;

fn main() -> ExitCode {
    let cfg = match Config::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            logger::log_error(&format!("Failed to load configuration: {e}"));
            return ExitCode::FAILURE;
        }
    };

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }

    let runtime = match runtime_builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            logger::log_error(&format!("Failed to build runtime: {e}"));
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(async_main(&cfg)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            logger::log_error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

async fn async_main(cfg: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.socket_addr()?;
    let root = cfg.resolve_root()?;
    let state = Arc::new(ServerState::new(cfg, root));

    let server = match Server::bind(addr, Arc::clone(&state)) {
        Ok(server) => server,
        Err(e) => {
            logger::log_bind_failed(&addr, &e);
            return Err(e.into());
        }
    };
    let local_addr = server.local_addr()?;

    logger::log_server_start(&local_addr, &state.root);

    let shutdown_signal = Arc::new(shutdown::ShutdownSignal::new());
    shutdown::spawn_signal_listener(Arc::clone(&shutdown_signal));

    if cfg.startup.open_browser {
        browser::launch(
            &SystemBrowser,
            &format!("http://localhost:{}", local_addr.port()),
        );
    }

    server.run(shutdown_signal).await?;
    Ok(())
}
