//! Dashboard controller - owns the state and the tasks that feed it

use std::io::{self, Write};
use std::sync::Arc;

use log::{debug, error, info, warn};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::render::{render_dashboard, render_text};
use super::state::{DashboardSnapshot, DashboardState, SharedState};
use crate::config::DashboardConfig;
use crate::feed::{FeedEvent, OrderSource, PushChannel};
use crate::selection::SelectionStore;

/// Cloneable access to the dashboard for readers and the selection form
#[derive(Clone)]
pub struct DashboardHandle {
    state: SharedState,
    selection: SelectionStore,
    config: Arc<DashboardConfig>,
}

impl DashboardHandle {
    pub fn state(&self) -> &SharedState {
        &self.state
    }

    /// Show `employee` from now on and remember the choice
    ///
    /// Blank names are ignored. A failed save is logged; the view still
    /// switches. The save happens under the write lock so the stored choice
    /// always matches the one on screen.
    pub async fn select_employee(&self, employee: &str) {
        let employee = employee.trim();
        if employee.is_empty() {
            warn!("Ignoring blank employee selection");
            return;
        }

        let mut state = self.state.write().await;
        if let Err(e) = self.selection.save(employee) {
            error!("Failed to save selected employee: {}", e);
        }
        state.select_employee(employee);
        info!("Showing orders for {}", employee);
        self.after_change(&state);
    }

    pub async fn render_html(&self) -> String {
        let state = self.state.read().await;
        render_dashboard(&state, &self.config.employees, &self.config.currency_symbol)
    }

    pub async fn snapshot(&self) -> DashboardSnapshot {
        self.state.read().await.snapshot(&self.config.currency_symbol)
    }

    async fn apply(&self, event: FeedEvent) {
        let mut state = self.state.write().await;
        state.apply(event);
        self.after_change(&state);
    }

    fn after_change(&self, state: &DashboardState) {
        if !self.config.console {
            return;
        }

        // Move cursor to top-left and clear screen
        let mut stdout = io::stdout().lock();
        let _ = write!(
            stdout,
            "\x1B[H\x1B[0J{}",
            render_text(state, &self.config.currency_symbol)
        );
        let _ = stdout.flush();
    }
}

/// Dashboard controller
///
/// Constructed once at startup. It spawns three tasks:
/// - the initial fetch, which reports a single snapshot
/// - the push channel, which reconnects until shutdown
/// - the event loop, the only place the order list is mutated
///
/// `shutdown` stops all of them and waits; dropping the controller signals
/// and aborts them instead.
///
/// # Example
///
/// ```ignore
/// use em_dashboard::dashboard::DashboardController;
///
/// let controller = DashboardController::start(config, selection, source, push);
/// let handle = controller.handle();
/// println!("{}", handle.render_html().await);
/// controller.shutdown().await;
/// ```
pub struct DashboardController {
    handle: DashboardHandle,
    shutdown: watch::Sender<bool>,
    tasks: Vec<JoinHandle<()>>,
}

impl DashboardController {
    /// Load the saved selection and start feeding the dashboard
    ///
    /// Must be called from within a tokio runtime.
    pub fn start<S>(
        config: DashboardConfig,
        selection: SelectionStore,
        source: S,
        push: PushChannel,
    ) -> Self
    where
        S: OrderSource + 'static,
    {
        let employee = selection.load_or(&config.default_employee);
        info!("Starting dashboard for {}", employee);

        let handle = DashboardHandle {
            state: DashboardState::new(employee).into_shared(),
            selection,
            config: Arc::new(config),
        };

        let (shutdown, _) = watch::channel(false);
        let (sender, receiver) = unbounded_channel();

        let tasks = vec![
            tokio::spawn(Self::initial_fetch(source, sender.clone(), shutdown.subscribe())),
            tokio::spawn(push.run(sender, shutdown.subscribe())),
            tokio::spawn(Self::event_loop(handle.clone(), receiver, shutdown.subscribe())),
        ];

        Self {
            handle,
            shutdown,
            tasks,
        }
    }

    pub fn handle(&self) -> DashboardHandle {
        self.handle.clone()
    }

    /// Stop every task and wait for them to finish
    pub async fn shutdown(mut self) {
        info!("Stopping dashboard");
        let _ = self.shutdown.send(true);

        for task in self.tasks.drain(..) {
            if let Err(e) = task.await {
                if !e.is_cancelled() {
                    error!("Dashboard task failed: {}", e);
                }
            }
        }
    }

    /// Fetch the full collection once; failures degrade to an empty snapshot
    async fn initial_fetch<S: OrderSource>(
        source: S,
        events: UnboundedSender<FeedEvent>,
        mut shutdown: watch::Receiver<bool>,
    ) {
        let result = tokio::select! {
            _ = shutdown.changed() => return,
            result = source.fetch_orders() => result,
        };

        let orders = match result {
            Ok(orders) => orders,
            Err(e) => {
                error!("Failed to fetch orders: {}", e);
                Vec::new()
            }
        };

        let _ = events.send(FeedEvent::Snapshot(orders));
    }

    async fn event_loop(
        handle: DashboardHandle,
        mut events: UnboundedReceiver<FeedEvent>,
        mut shutdown: watch::Receiver<bool>,
    ) {
        loop {
            let event = tokio::select! {
                _ = shutdown.changed() => break,
                event = events.recv() => event,
            };

            match event {
                Some(event) => handle.apply(event).await,
                None => break,
            }
        }

        debug!("Dashboard event loop stopped");
    }
}

impl Drop for DashboardController {
    fn drop(&mut self) {
        let _ = self.shutdown.send(true);
        for task in &self.tasks {
            task.abort();
        }
    }
}
