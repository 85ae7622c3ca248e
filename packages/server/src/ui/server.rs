//! Server execution logic.

use std::{future::IntoFuture, sync::Arc, time::Duration};

use axum::{Router, routing::get};
use rally_shared::time::Clock;
use thiserror::Error;
use tokio::{
    net::TcpListener,
    sync::Mutex,
    task::JoinHandle,
    time::MissedTickBehavior,
};
use tower_http::trace::TraceLayer;

use crate::{
    domain::{Lobby, LobbyNotifier, LobbyRules},
    infrastructure::message_pusher::WebSocketLobbyNotifier,
    usecase::{
        ConnectSessionUseCase, DisconnectSessionUseCase, GetLobbyStatusUseCase,
        HandleMessageUseCase, SharedLobby, SweepSessionsUseCase, TickLobbyUseCase,
    },
};

use super::{
    handler::{debug_lobby_state, health_check, root_handler, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Lobby server
///
/// Owns the lobby aggregate and wires it into the HTTP/WebSocket router and
/// the two background timers (lobby tick and liveness sweep).
///
/// # Example
///
/// ```ignore
/// let server = Server::new(LobbyRules::default(), Arc::new(SystemClock));
/// server.run("0.0.0.0", 8787).await?;
/// ```
pub struct Server {
    lobby: SharedLobby,
    clock: Arc<dyn Clock>,
}

impl Server {
    pub fn new(rules: LobbyRules, clock: Arc<dyn Clock>) -> Self {
        Self {
            lobby: Arc::new(Mutex::new(Lobby::new(rules))),
            clock,
        }
    }

    /// Bind to `host:port` and serve until a shutdown signal arrives.
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be bound or the listener fails.
    pub async fn run(self, host: &str, port: u16) -> Result<(), ServerError> {
        let addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|source| ServerError::Bind { addr, source })?;
        self.serve(listener).await
    }

    /// Serve on an already bound listener until a shutdown signal arrives.
    ///
    /// Shutdown is abrupt: open sockets are dropped without a close handshake.
    pub async fn serve(self, listener: TcpListener) -> Result<(), ServerError> {
        let rules = self.lobby.lock().await.rules().clone();
        let notifier: Arc<dyn LobbyNotifier> = Arc::new(WebSocketLobbyNotifier::new());

        let app_state = Arc::new(AppState {
            connect_session_usecase: Arc::new(ConnectSessionUseCase::new(
                self.lobby.clone(),
                notifier.clone(),
                self.clock.clone(),
            )),
            disconnect_session_usecase: Arc::new(DisconnectSessionUseCase::new(
                self.lobby.clone(),
                notifier.clone(),
            )),
            handle_message_usecase: Arc::new(HandleMessageUseCase::new(
                self.lobby.clone(),
                notifier.clone(),
                self.clock.clone(),
            )),
            get_lobby_status_usecase: Arc::new(GetLobbyStatusUseCase::new(self.lobby.clone())),
        });

        let ticker = spawn_lobby_ticker(
            TickLobbyUseCase::new(self.lobby.clone(), notifier, self.clock.clone()),
            Duration::from_millis(rules.tick_ms),
        );
        let sweeper = spawn_liveness_sweeper(
            SweepSessionsUseCase::new(self.lobby.clone()),
            Duration::from_millis(rules.sweep_ms),
        );

        let app = Router::new()
            .route("/", get(root_handler))
            .route("/health", get(health_check))
            .route("/debug/lobby", get(debug_lobby_state))
            .route("/ws", get(websocket_handler))
            .fallback(root_handler)
            .layer(TraceLayer::new_for_http())
            .with_state(app_state);

        let local_addr = listener.local_addr()?;
        tracing::info!("Lobby server listening on {}", local_addr);
        tracing::info!("Connect to: ws://{}/", local_addr);

        let result = tokio::select! {
            result = axum::serve(listener, app).into_future() => result.map_err(ServerError::from),
            _ = shutdown_signal() => {
                tracing::info!("Shutting down");
                Ok(())
            }
        };

        ticker.abort();
        sweeper.abort();
        result
    }
}

/// Drive the lobby tick at a fixed period. The first tick fires one period
/// after startup.
fn spawn_lobby_ticker(usecase: TickLobbyUseCase, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            usecase.execute().await;
        }
    })
}

fn spawn_liveness_sweeper(usecase: SweepSessionsUseCase, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            let report = usecase.execute().await;
            if !report.pruned.is_empty() {
                tracing::info!("Liveness sweep pruned {} sessions", report.pruned.len());
            }
        }
    })
}
