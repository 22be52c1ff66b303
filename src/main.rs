use std::sync::Arc;
use std::time::Duration;

use switchyard::config::Config;
use switchyard::executor::WorkerPool;
use switchyard::model::{Request, Response};

fn main() -> anyhow::Result<()> {
    let cfg = Config::load()?;

    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_max_level(cfg.logging.max_level()?)
        .init();

    let pool = Arc::new(WorkerPool::new(&cfg.workers)?);

    switchyard::run_server(echo, &cfg.server, pool.clone())?;

    if let Ok(pool) = Arc::try_unwrap(pool) {
        pool.shutdown(Duration::from_secs(5));
    }

    Ok(())
}

fn echo(req: &Request) -> anyhow::Result<Response> {
    let mut text = format!("{} {}", req.request_method(), req.uri());
    if let Some(query) = req.query_string() {
        text.push('?');
        text.push_str(query);
    }
    text.push('\n');

    Ok(Response::text(text))
}
