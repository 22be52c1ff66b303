use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::runtime::Runtime;
use tokio::sync::Notify;
use tracing::info;

use crate::config::ServerConfig;
use crate::http::connection::Connection;
use crate::server::Handler;

/// A bound, single-threaded accept loop.
///
/// Binding happens in [`EventLoop::bind`] so address problems surface before
/// any handler is built; [`EventLoop::run`] then blocks the calling thread
/// until Ctrl-C, a [`ShutdownHandle`] trigger, or an accept failure.
pub struct EventLoop {
    runtime: Runtime,
    listener: TcpListener,
    shutdown: Arc<Notify>,
}

/// Stops a running [`EventLoop`] from another thread.
#[derive(Clone)]
pub struct ShutdownHandle {
    notify: Arc<Notify>,
}

impl ShutdownHandle {
    pub fn shutdown(&self) {
        self.notify.notify_one();
    }
}

impl EventLoop {
    pub fn bind(options: &ServerConfig) -> anyhow::Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("failed to build event loop runtime")?;

        let addr = options.listen_addr();
        let listener = runtime
            .block_on(TcpListener::bind(&addr))
            .with_context(|| format!("failed to bind {}", addr))?;

        Ok(Self {
            runtime,
            listener,
            shutdown: Arc::new(Notify::new()),
        })
    }

    pub fn local_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            notify: Arc::clone(&self.shutdown),
        }
    }

    pub fn run<H: Handler>(self, handler: H) -> anyhow::Result<()> {
        let Self {
            runtime,
            listener,
            shutdown,
        } = self;
        let handler: Arc<dyn Handler> = Arc::new(handler);

        runtime.block_on(async move {
            tokio::select! {
                res = accept_loop(listener, handler) => res,

                _ = shutdown.notified() => {
                    info!("Shutdown requested");
                    Ok(())
                }

                _ = tokio::signal::ctrl_c() => {
                    info!("Shutdown signal received");
                    Ok(())
                }
            }
        })
    }
}

async fn accept_loop(listener: TcpListener, handler: Arc<dyn Handler>) -> anyhow::Result<()> {
    info!("Listening on {}", listener.local_addr()?);

    loop {
        let (socket, peer) = listener.accept().await.context("accept failed")?;
        tracing::debug!("Accepted connection from {}", peer);

        let handler = Arc::clone(&handler);
        tokio::spawn(async move {
            let mut conn = Connection::new(socket, handler);
            if let Err(e) = conn.run().await {
                tracing::error!("Connection error from {}: {:#}", peer, e);
            }
        });
    }
}
