/// Game-state controller: owns the run and drives the Idle / Playing /
/// GameOver transitions, notifying the UI and audio collaborators.

use std::io;

use log::{debug, info};
use rand::Rng;

use crate::collaborators::{AudioAdapter, InputState, Renderer, UiAdapter};
use crate::compute::{self, GameEvent};
use crate::difficulty::ProfileError;
use crate::entities::{GameState, GameStatus, Level};

pub struct Game<R: Rng> {
    state: GameState,
    rng: R,
}

impl<R: Rng> Game<R> {
    /// Starts on the start screen with the medium preset preselected.
    pub fn new(rng: R) -> Result<Self, ProfileError> {
        let mut state = compute::init_state(Level::Medium)?;
        state.status = GameStatus::Idle;
        Ok(Self { state, rng })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access to the run, e.g. to stage a scenario.
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn status(&self) -> GameStatus {
        self.state.status
    }

    /// Begin a fresh run at `level`. Accepted from any state.
    pub fn start(&mut self, level: Level, ui: &mut impl UiAdapter) -> Result<(), ProfileError> {
        self.state = compute::init_state(level)?;
        info!("starting run on {}", level.label());
        ui.show_start_overlay(false);
        ui.show_game_over_overlay(false);
        ui.show_score(0);
        Ok(())
    }

    /// Fresh run with the current level. Ignored on the start screen, where
    /// a level has to be picked with `start`.
    pub fn restart(&mut self, ui: &mut impl UiAdapter) -> Result<(), ProfileError> {
        if self.state.status == GameStatus::Idle {
            debug!("restart ignored on the start screen");
            return Ok(());
        }
        self.start(self.state.level, ui)
    }

    /// Back to the start screen without starting a run.
    pub fn return_to_idle(&mut self, ui: &mut impl UiAdapter) {
        info!("returning to start screen");
        self.state.status = GameStatus::Idle;
        ui.show_game_over_overlay(false);
        ui.show_start_overlay(true);
    }

    /// One simulation step. Outside `Playing` this is a no-op.
    ///
    /// `hooks` receives one explosion per destroyed enemy, the new score when
    /// it changed and the game-over overlay when the player is hit.
    pub fn tick<H>(&mut self, input: &InputState, hooks: &mut H) -> Vec<GameEvent>
    where
        H: AudioAdapter + UiAdapter,
    {
        let score_before = self.state.score;
        let events = compute::tick(&mut self.state, input, &mut self.rng);

        for event in &events {
            match event {
                GameEvent::EnemyDestroyed { .. } => hooks.play_explosion(),
                GameEvent::PlayerHit => hooks.show_game_over_overlay(true),
            }
        }
        if self.state.score != score_before {
            hooks.show_score(self.state.score);
        }
        events
    }

    /// Draw the current frame. Entities are hidden on the start screen.
    pub fn render(&self, renderer: &mut impl Renderer) -> io::Result<()> {
        renderer.clear()?;
        renderer.draw_background(self.state.frame)?;
        if self.state.status != GameStatus::Idle {
            renderer.draw_player(&self.state.player)?;
            for bullet in &self.state.player.bullets {
                renderer.draw_bullet(bullet)?;
            }
            for enemy in &self.state.enemies {
                renderer.draw_enemy(enemy)?;
            }
        }
        renderer.present()
    }
}
