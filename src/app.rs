//! Main application module.
//!
//! This module contains the main `App` struct that coordinates
//! the event loop, the polling shell, state management, and rendering.

use crate::api::{ApiClient, Ticker};
use crate::config::Config;
use crate::error::Result;
use crate::events::EventHandler;
use crate::poll::{PollSchedule, Poller, ResourceKey};
use crate::state::{Action, Notification, Store};
use crate::ui::Ui;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::sync::Arc;
use tokio::sync::mpsc;

/// The main application.
pub struct App {
    /// Terminal.
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Application store.
    store: Store,
    /// Event handler.
    event_handler: EventHandler,
    /// Action sender (handed to spawned tasks).
    action_tx: mpsc::UnboundedSender<Action>,
    /// Action receiver.
    action_rx: mpsc::UnboundedReceiver<Action>,
    /// Polling shell.
    poller: Poller<Action>,
    /// API client.
    api: Arc<ApiClient>,
    /// The currently subscribed technical-analysis resource, if any.
    active_technical: Option<ResourceKey>,
    /// Configuration.
    config: Config,
}

impl App {
    /// Create a new application.
    pub fn new(config: Config) -> Result<Self> {
        // Set up terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        if config.ui.mouse_support {
            execute!(stdout, EnableMouseCapture)?;
        }
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        // Create action channel
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        // Create store
        let mut store = Store::new(action_tx.clone());
        store.app.ui = config.ui.clone();

        // Create event handler
        let event_handler = EventHandler::new(config.keybindings.clone());

        // Create API client and polling shell
        let api = Arc::new(ApiClient::new(config.api.clone())?);
        let poller = Poller::new(action_tx.clone());

        Ok(Self {
            terminal,
            store,
            event_handler,
            action_tx,
            action_rx,
            poller,
            api,
            active_technical: None,
            config,
        })
    }

    /// Run the application event loop.
    pub async fn run(&mut self) -> Result<()> {
        self.subscribe_resources();

        // Main event loop
        loop {
            // Update event handler with current state
            self.event_handler.update_store_snapshot(&self.store);

            // Render UI
            self.terminal.draw(|frame| {
                Ui::render(frame, &self.store);
            })?;

            // Handle events and actions
            tokio::select! {
                // Handle terminal events
                result = self.event_handler.next() => {
                    if let Some(action) = result? {
                        self.handle_action(action);
                    }
                }

                // Handle actions from the channel (poller results included)
                Some(action) = self.action_rx.recv() => {
                    self.handle_action(action);
                }
            }

            // Check if we should quit
            if self.store.app.should_quit {
                break;
            }
        }

        self.poller.shutdown();
        Ok(())
    }

    /// Register the fixed dashboard resources with their refresh intervals.
    ///
    /// The technical-analysis resource is not registered here: it only
    /// becomes subscribable once a valid ticker has been submitted.
    fn subscribe_resources(&mut self) {
        let poll = self.config.poll.clone();

        let api = self.api.clone();
        self.poller.subscribe(
            ResourceKey::AgentsHealth,
            PollSchedule::Every(poll.agents_health()),
            move || {
                let api = api.clone();
                async move { api.agent_health().await.map(Action::AgentsLoaded) }
            },
        );

        let api = self.api.clone();
        self.poller.subscribe(
            ResourceKey::Portfolio,
            PollSchedule::Every(poll.portfolio()),
            move || {
                let api = api.clone();
                async move { api.portfolio().await.map(Action::PortfolioLoaded) }
            },
        );

        let api = self.api.clone();
        let top_n = self.config.api.candidates_top_n;
        self.poller.subscribe(
            ResourceKey::Candidates,
            PollSchedule::Every(poll.candidates()),
            move || {
                let api = api.clone();
                async move { api.candidates(top_n).await.map(Action::CandidatesLoaded) }
            },
        );

        let api = self.api.clone();
        self.poller.subscribe(
            ResourceKey::TokenStatus,
            PollSchedule::Every(poll.token_status()),
            move || {
                let api = api.clone();
                async move { api.token_status().await.map(Action::TokenStatusLoaded) }
            },
        );

        let api = self.api.clone();
        self.poller.subscribe(
            ResourceKey::MacroReport,
            PollSchedule::Every(poll.macro_report()),
            move || {
                let api = api.clone();
                async move { api.macro_report().await.map(Action::MacroLoaded) }
            },
        );
    }

    /// Handle an action.
    fn handle_action(&mut self, action: Action) {
        match action {
            Action::Refresh => self.refetch_current_view(),
            Action::RefreshAll => self.refetch_all(),
            Action::SubmitTicker => self.submit_ticker(),
            Action::TriggerDecision => self.trigger_decision(),
            other => self.store.reduce(other),
        }
    }

    /// Refetch the resources backing the current view.
    fn refetch_current_view(&mut self) {
        use crate::state::View;

        match self.store.app.current_view {
            View::Overview => {
                self.poller.refetch(&ResourceKey::AgentsHealth);
                self.poller.refetch(&ResourceKey::Portfolio);
                self.poller.refetch(&ResourceKey::Candidates);
                self.poller.refetch(&ResourceKey::TokenStatus);
            }
            View::Portfolio => {
                self.poller.refetch(&ResourceKey::Portfolio);
            }
            View::Candidates => {
                self.poller.refetch(&ResourceKey::Candidates);
            }
            View::Technical => {
                if let Some(key) = &self.active_technical {
                    self.poller.refetch(key);
                }
            }
            View::Macro => {
                self.poller.refetch(&ResourceKey::MacroReport);
            }
        }
    }

    /// Refetch everything that is currently subscribed.
    fn refetch_all(&mut self) {
        self.poller.refetch(&ResourceKey::AgentsHealth);
        self.poller.refetch(&ResourceKey::Portfolio);
        self.poller.refetch(&ResourceKey::Candidates);
        self.poller.refetch(&ResourceKey::TokenStatus);
        self.poller.refetch(&ResourceKey::MacroReport);
        if let Some(key) = &self.active_technical {
            self.poller.refetch(key);
        }
    }

    /// Validate the ticker input and rebind the technical-analysis resource.
    fn submit_ticker(&mut self) {
        match Ticker::new(&self.store.app.input_buffer) {
            Ok(ticker) => {
                // The previous ticker's subscription is released; a late
                // result from it will be discarded, not cached.
                if let Some(old_key) = self.active_technical.take() {
                    self.poller.release(&old_key);
                }

                self.store.reduce(Action::TickerAccepted(ticker.clone()));

                let key = ResourceKey::technical(&ticker);
                let api = self.api.clone();
                self.poller
                    .subscribe(key.clone(), PollSchedule::OnDemand, move || {
                        let api = api.clone();
                        let ticker = ticker.clone();
                        async move {
                            api.technical_analysis(&ticker)
                                .await
                                .map(Action::TechnicalLoaded)
                        }
                    });
                self.poller.refetch(&key);
                self.active_technical = Some(key);
            }
            Err(_) => {
                self.store.reduce(Action::ShowNotification(Notification::warning(
                    "Ticker must be a 6-character code",
                )));
            }
        }
    }

    /// Fire a manual trade decision, unless one is already outstanding.
    fn trigger_decision(&mut self) {
        if self.store.app.decision_pending {
            return;
        }
        self.store.reduce(Action::TriggerDecision);

        let api = self.api.clone();
        let action_tx = self.action_tx.clone();
        tokio::spawn(async move {
            let action = match api.trigger_decision().await {
                Ok(outcome) => Action::DecisionCompleted(outcome),
                Err(err) => Action::DecisionFailed(err.to_string()),
            };
            let _ = action_tx.send(action);
        });
    }
}

impl Drop for App {
    fn drop(&mut self) {
        // Restore terminal state
        let _ = disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        );
        let _ = self.terminal.show_cursor();
    }
}
