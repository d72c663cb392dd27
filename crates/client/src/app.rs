//! Line-oriented game loop.
//!
//! Reads commands from stdin and prints whatever the runtime publishes.
//! Intent results are printed from the event bus only, so follow-ups that
//! arrive later (counter-attacks, victory, revival) look the same as
//! immediate results.

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};

use game_content::ContentFactory;
use game_core::{EnemyId, GameConfig, GameEvent, Intent};
use runtime::{Event, Runtime, RuntimeError, RuntimeHandle, Topic};

use crate::config::ClientConfig;
use crate::input::{Command, HELP, parse_command};
use crate::presentation::{
    describe, describe_rejection, describe_session, render_look, render_status,
};

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub struct CliApp {
    config: ClientConfig,
    runtime: Runtime,
    handle: RuntimeHandle,
    /// Local copy for rendering; refreshed on reload.
    game_config: GameConfig,
}

impl CliApp {
    pub async fn new(config: ClientConfig, runtime: Runtime) -> Result<Self> {
        let handle = runtime.handle();
        let game_config = handle.query_config().await?;
        Ok(Self {
            config,
            runtime,
            handle,
            game_config,
        })
    }

    pub async fn run(mut self) -> Result<()> {
        let mut game_rx = self.handle.subscribe(Topic::Game);
        let mut session_rx = self.handle.subscribe(Topic::Session);
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        if let Some(line) = describe_session(self.runtime.started()) {
            println!("{line}");
        }
        println!("Type 'help' for commands.");
        self.print_look().await?;

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else { break };
                    if self.handle_line(&line).await? == Flow::Quit {
                        break;
                    }
                }
                event = game_rx.recv() => match event {
                    Ok(event) => self.print_event(&event).await?,
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "event consumer lagged");
                    }
                    Err(RecvError::Closed) => break,
                },
                event = session_rx.recv() => match event {
                    Ok(Event::Session(event)) => {
                        if let Some(line) = describe_session(&event) {
                            println!("{line}");
                        }
                    }
                    Ok(_) | Err(RecvError::Lagged(_)) => {}
                    Err(RecvError::Closed) => break,
                },
            }
        }

        info!("client shutting down");
        self.runtime.shutdown().await?;
        println!("Game saved. Bye.");
        Ok(())
    }

    async fn handle_line(&mut self, line: &str) -> Result<Flow> {
        let command = match parse_command(line) {
            Ok(command) => command,
            Err(error) => {
                println!("{error}");
                return Ok(Flow::Continue);
            }
        };
        debug!(?command, "parsed command");

        match command {
            Command::None => {}
            Command::Quit => return Ok(Flow::Quit),
            Command::Help => println!("{HELP}"),
            Command::Look => self.print_look().await?,
            Command::Status => {
                let state = self.handle.query_state().await?;
                for line in render_status(&state, &self.game_config) {
                    println!("{line}");
                }
            }
            Command::Reload => self.reload().await?,
            Command::NewGame => self.handle.new_game(self.config.seed).await?,
            Command::Attack { kind, target } => {
                let target = match target {
                    Some(target) => target,
                    None => self.first_living_enemy().await?,
                };
                self.submit(Intent::attack(kind, target)).await?;
            }
            Command::Submit(intent) => self.submit(intent).await?,
        }
        Ok(Flow::Continue)
    }

    async fn submit(&self, intent: Intent) -> Result<()> {
        match self.handle.submit(intent).await {
            Ok(_) => Ok(()),
            // Already reported on the event bus.
            Err(RuntimeError::Rejected(_)) => Ok(()),
            Err(error) => Err(error.into()),
        }
    }

    async fn first_living_enemy(&self) -> Result<EnemyId> {
        let state = self.handle.query_state().await?;
        Ok(state
            .enemies
            .living()
            .next()
            .map(|enemy| enemy.id)
            .unwrap_or(EnemyId::FIRST))
    }

    async fn reload(&mut self) -> Result<()> {
        let factory = ContentFactory::new(&self.config.data_dir);
        let game_config = match factory.load_game_config() {
            Ok(game_config) => game_config,
            Err(error) => {
                warn!(error = %format!("{error:#}"), "content reload failed");
                println!("Could not reload content: {error:#}");
                return Ok(());
            }
        };
        match self.handle.reload_config(game_config.clone()).await {
            Ok(()) => self.game_config = game_config,
            Err(RuntimeError::InvalidConfig(error)) => println!("Content rejected: {error}"),
            Err(error) => return Err(error.into()),
        }
        Ok(())
    }

    async fn print_event(&self, event: &Event) -> Result<()> {
        match event {
            Event::Game(game_event) => {
                if let Some(line) = describe(game_event, &self.game_config.zones) {
                    println!("{line}");
                }
                if matches!(game_event, GameEvent::CardsSettled { .. }) {
                    self.print_look().await?;
                }
            }
            Event::Rejected(rejected) => println!("{}", describe_rejection(rejected)),
            Event::Session(_) => {}
        }
        Ok(())
    }

    async fn print_look(&self) -> Result<()> {
        let state = self.handle.query_state().await?;
        for line in render_look(&state, &self.game_config) {
            println!("{line}");
        }
        Ok(())
    }
}
