mod config;
mod error;
mod handler;
mod http;
mod logger;
mod middleware;
mod server;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = config::Config::load()?;
    logger::init(&cfg.logging)?;

    // Tokio runtime, sized by server.workers when set
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers.get());
    }

    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let server = match server::Server::bind(&cfg) {
        Ok(server) => server,
        Err(e) => {
            logger::log_error(&format!("Startup aborted: {e}"));
            return Err(e.into());
        }
    };

    logger::log_server_start(&server.local_addr()?, &cfg);
    server.run().await;
    Ok(())
}
