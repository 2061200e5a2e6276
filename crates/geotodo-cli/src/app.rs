//! Command handlers.
//!
//! [`App`] owns the store, the signed-in session and both host capabilities
//! for the life of one invocation, and renders every result through the
//! terminal renderer.

use std::sync::Arc;

use anyhow::{Context, Result};
use geotodo_core::{
    display::{CreateResult, OperationStatus, Places, TodoList, UpdateResult},
    models::{Coordinate, NotificationPermission, TodoFilter, User},
    params::Id,
    LocationConfig, LocationWatch, NotificationGate, PermissionTracker, Session, Store,
};
use log::{info, warn};
use tokio::sync::mpsc;

use crate::{
    cli::{NearbyArgs, PlaceCommands, TodoCommands},
    hosts::{TerminalGeolocation, TerminalNotifier},
    renderer::TerminalRenderer,
};

pub struct App {
    store: Store,
    session: Session,
    renderer: TerminalRenderer,
    location: LocationWatch<TerminalGeolocation>,
    gate: NotificationGate<TerminalNotifier>,
}

impl App {
    /// Loads the user's data and wires the terminal hosts to one shared
    /// permission state.
    pub async fn open(
        store: Store,
        user: User,
        renderer: TerminalRenderer,
        at: Option<Coordinate>,
        notifications: NotificationPermission,
    ) -> Result<Self> {
        let permissions = PermissionTracker::default();
        let session = Session::open(&store, user, permissions.clone()).await?;
        let location = LocationWatch::new(
            Arc::new(TerminalGeolocation::new(at)),
            LocationConfig::default(),
            permissions.clone(),
        );
        let gate = NotificationGate::new(Arc::new(TerminalNotifier::new(notifications)), permissions);

        Ok(Self {
            store,
            session,
            renderer,
            location,
            gate,
        })
    }

    pub async fn handle_place_command(&mut self, command: PlaceCommands) -> Result<()> {
        match command {
            PlaceCommands::Add(args) => {
                let place = self
                    .session
                    .add_place(&self.store, &args.into())
                    .await
                    .context("Failed to create place")?;
                self.renderer.render(&CreateResult::new(place).to_string())
            }
            PlaceCommands::List => {
                let places = Places(self.session.places().to_vec());
                self.renderer.render(&places.to_string())
            }
        }
    }

    pub async fn handle_todo_command(&mut self, command: TodoCommands) -> Result<()> {
        match command {
            TodoCommands::Add(args) => {
                let todo = self
                    .session
                    .add_todo(&self.store, &args.into())
                    .await
                    .context("Failed to create todo")?;
                self.renderer.render(&CreateResult::new(todo).to_string())
            }
            TodoCommands::List(args) => self.list_todos(args.filter).await,
            TodoCommands::Toggle(args) => {
                let Id { id } = args.into();
                let todo = self
                    .session
                    .toggle_todo(&self.store, &id)
                    .await
                    .with_context(|| format!("Failed to toggle todo {id}"))?;
                self.renderer.render(&UpdateResult::toggled(todo).to_string())
            }
        }
    }

    async fn list_todos(&mut self, filter: TodoFilter) -> Result<()> {
        if filter == TodoFilter::Nearby {
            if let Err(e) = self.locate().await {
                self.renderer
                    .render(&OperationStatus::failure(e.to_string()).to_string())?;
            }
        }
        let list = TodoList::for_session(&self.session, filter);
        self.renderer.render(&list.to_string())
    }

    /// One-shot nearby check: locate, compute, alert, render.
    pub async fn nearby(&mut self, args: NearbyArgs) -> Result<()> {
        let located = self.locate().await;
        let result = self.session.nearby();
        self.gate.on_result(&result).await;

        if args.json {
            let json = serde_json::to_string_pretty(&result)
                .context("Failed to serialize proximity result")?;
            println!("{json}");
            return Ok(());
        }

        if let Err(e) = located {
            self.renderer
                .render(&OperationStatus::failure(e.to_string()).to_string())?;
        }
        self.renderer.render(&result.to_string())
    }

    /// Follows stdin positions until input ends or Ctrl-C.
    pub async fn watch(&mut self) -> Result<()> {
        let (tx, mut samples) = mpsc::unbounded_channel();
        // Listen for Ctrl-C once, so a signal between two fixes is not lost
        let interrupted = tokio::signal::ctrl_c();
        tokio::pin!(interrupted);

        self.location
            .start_watch(move |sample| {
                let _ = tx.send(sample);
            })
            .await
            .context("Failed to start location watch")?;
        info!("watching positions from stdin");

        loop {
            tokio::select! {
                sample = samples.recv() => {
                    let Some(sample) = sample else { break };
                    self.session.update_location(sample);
                    let result = self.session.nearby();
                    self.gate.on_result(&result).await;
                    self.renderer.render(&result.to_string())?;
                }
                _ = &mut interrupted => {
                    info!("interrupted");
                    break;
                }
            }
        }

        self.location.stop_watch().await;
        Ok(())
    }

    pub fn status(&self) -> Result<()> {
        let user = self.session.user();
        let open = self.session.todos().iter().filter(|t| !t.is_done).count();

        let mut out = format!("# {}\n\n", user.uid);
        if let Some(email) = &user.email {
            out.push_str(&format!("- **Email**: {email}\n"));
        }
        out.push_str(&format!(
            "- **Database**: {}\n",
            self.store.database_path().display()
        ));
        out.push_str(&format!("- **Places**: {}\n", self.session.places().len()));
        out.push_str(&format!(
            "- **Todos**: {open} open of {}\n",
            self.session.todos().len()
        ));
        out.push_str("\n## Permissions\n\n");
        out.push_str(&self.session.permission_state().to_string());

        self.renderer.render(&out)
    }

    async fn locate(&mut self) -> geotodo_core::Result<()> {
        match self.location.request_once().await {
            Ok(sample) => {
                self.session.update_location(sample);
                Ok(())
            }
            Err(e) => {
                warn!("no position: {e}");
                Err(e)
            }
        }
    }
}
