use std::io;

use pixel_shooter::collaborators::{AudioAdapter, InputState, Renderer, UiAdapter};
use pixel_shooter::compute::GameEvent;
use pixel_shooter::entities::*;
use pixel_shooter::game::Game;

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Records every collaborator call.
#[derive(Default)]
struct Recorder {
    explosions: u32,
    scores: Vec<u32>,
    game_over_overlay: Option<bool>,
    start_overlay: Option<bool>,
    draws: Vec<String>,
}

impl AudioAdapter for Recorder {
    fn play_explosion(&mut self) {
        self.explosions += 1;
    }
}

impl UiAdapter for Recorder {
    fn show_score(&mut self, score: u32) {
        self.scores.push(score);
    }
    fn show_game_over_overlay(&mut self, visible: bool) {
        self.game_over_overlay = Some(visible);
    }
    fn show_start_overlay(&mut self, visible: bool) {
        self.start_overlay = Some(visible);
    }
}

impl Renderer for Recorder {
    fn clear(&mut self) -> io::Result<()> {
        self.draws.push("clear".into());
        Ok(())
    }
    fn draw_background(&mut self, frame: u64) -> io::Result<()> {
        self.draws.push(format!("background {frame}"));
        Ok(())
    }
    fn draw_player(&mut self, _: &Player) -> io::Result<()> {
        self.draws.push("player".into());
        Ok(())
    }
    fn draw_bullet(&mut self, _: &Bullet) -> io::Result<()> {
        self.draws.push("bullet".into());
        Ok(())
    }
    fn draw_enemy(&mut self, _: &Enemy) -> io::Result<()> {
        self.draws.push("enemy".into());
        Ok(())
    }
    fn present(&mut self) -> io::Result<()> {
        self.draws.push("present".into());
        Ok(())
    }
}

fn new_game() -> Game<StdRng> {
    Game::new(StdRng::seed_from_u64(7)).unwrap()
}

fn idle() -> InputState {
    InputState::default()
}

fn firing() -> InputState {
    InputState {
        fire: true,
        ..idle()
    }
}

fn enemy_at(x: f32, y: f32) -> Enemy {
    let mut enemy = Enemy::new(x, 1.5);
    enemy.y = y;
    enemy
}

#[test]
fn new_game_waits_on_start_screen() {
    let mut game = new_game();
    let mut rec = Recorder::default();
    assert_eq!(game.status(), GameStatus::Idle);

    for _ in 0..10 {
        assert!(game.tick(&idle(), &mut rec).is_empty());
    }
    assert_eq!(game.state().frame, 0);
    assert!(game.state().enemies.is_empty());
    assert!(rec.scores.is_empty());
}

#[test]
fn start_enters_playing_and_hides_overlays() {
    let mut game = new_game();
    let mut rec = Recorder::default();
    game.start(Level::Hard, &mut rec).unwrap();

    assert_eq!(game.status(), GameStatus::Playing);
    assert_eq!(game.state().level, Level::Hard);
    assert_eq!(game.state().profile.spawn_interval, 30);
    assert_eq!(rec.start_overlay, Some(false));
    assert_eq!(rec.game_over_overlay, Some(false));
    assert_eq!(rec.scores, vec![0]);
}

#[test]
fn kill_plays_explosion_and_reports_score() {
    let mut game = new_game();
    let mut rec = Recorder::default();
    game.start(Level::Medium, &mut rec).unwrap();
    {
        let s = game.state_mut();
        s.enemies.push(enemy_at(150.0, 300.0));
        s.player.bullets.push(Bullet::new(155.0, 310.0));
    }

    let events = game.tick(&idle(), &mut rec);

    assert_eq!(events.len(), 1);
    assert!(matches!(events[0], GameEvent::EnemyDestroyed { .. }));
    assert_eq!(rec.explosions, 1);
    assert_eq!(rec.scores, vec![0, 10]);
    assert_eq!(game.state().score, 10);
    // Only the enemy spawned on frame 0 is left.
    assert_eq!(game.state().enemies.len(), 1);
}

#[test]
fn score_is_not_pushed_when_unchanged() {
    let mut game = new_game();
    let mut rec = Recorder::default();
    game.start(Level::Easy, &mut rec).unwrap();
    for _ in 0..5 {
        game.tick(&idle(), &mut rec);
    }
    assert_eq!(rec.scores, vec![0]);
}

#[test]
fn player_hit_shows_game_over_until_restart() {
    let mut game = new_game();
    let mut rec = Recorder::default();
    game.start(Level::Medium, &mut rec).unwrap();
    let (px, py) = (game.state().player.x, game.state().player.y);
    game.state_mut().enemies.push(enemy_at(px, py - 2.0));

    let events = game.tick(&idle(), &mut rec);
    assert_eq!(events, vec![GameEvent::PlayerHit]);
    assert_eq!(game.status(), GameStatus::GameOver);
    assert_eq!(rec.game_over_overlay, Some(true));

    let frame = game.state().frame;
    for _ in 0..30 {
        game.tick(&firing(), &mut rec);
    }
    assert_eq!(game.status(), GameStatus::GameOver);
    assert_eq!(game.state().frame, frame);
    assert_eq!(rec.explosions, 0);

    game.restart(&mut rec).unwrap();
    assert_eq!(game.status(), GameStatus::Playing);
    assert_eq!(rec.game_over_overlay, Some(false));
    assert_eq!(game.state().level, Level::Medium);
}

#[test]
fn restart_is_idempotent() {
    let mut game = new_game();
    let mut rec = Recorder::default();
    game.start(Level::Medium, &mut rec).unwrap();
    for _ in 0..90 {
        let input = InputState {
            move_right: true,
            ..firing()
        };
        game.tick(&input, &mut rec);
    }

    game.restart(&mut rec).unwrap();
    let once = game.state().clone();
    game.restart(&mut rec).unwrap();
    let twice = game.state().clone();

    for s in [&once, &twice] {
        assert_eq!(s.score, 0);
        assert_eq!(s.frame, 0);
        assert!(s.enemies.is_empty());
        assert!(s.player.bullets.is_empty());
        assert_eq!(s.player.x, 150.0);
        assert_eq!(s.player.shoot_cooldown, 0);
        assert_eq!(s.status, GameStatus::Playing);
    }
}

#[test]
fn restart_is_ignored_on_start_screen() {
    let mut game = new_game();
    let mut rec = Recorder::default();
    game.restart(&mut rec).unwrap();
    assert_eq!(game.status(), GameStatus::Idle);
    assert!(rec.scores.is_empty());
}

#[test]
fn start_picks_a_new_level_after_game_over() {
    let mut game = new_game();
    let mut rec = Recorder::default();
    game.start(Level::Easy, &mut rec).unwrap();
    game.state_mut().status = GameStatus::GameOver;

    game.start(Level::Hard, &mut rec).unwrap();
    assert_eq!(game.status(), GameStatus::Playing);
    assert_eq!(game.state().profile.speed_min, 2.5);
}

#[test]
fn return_to_idle_shows_start_screen() {
    let mut game = new_game();
    let mut rec = Recorder::default();
    game.start(Level::Medium, &mut rec).unwrap();
    game.state_mut().status = GameStatus::GameOver;

    game.return_to_idle(&mut rec);

    assert_eq!(game.status(), GameStatus::Idle);
    assert_eq!(rec.start_overlay, Some(true));
    assert_eq!(rec.game_over_overlay, Some(false));
    let frame = game.state().frame;
    game.tick(&idle(), &mut rec);
    assert_eq!(game.state().frame, frame);
}

#[test]
fn render_hides_entities_on_start_screen() {
    let game = new_game();
    let mut rec = Recorder::default();
    game.render(&mut rec).unwrap();
    assert_eq!(rec.draws, vec!["clear", "background 0", "present"]);
}

#[test]
fn render_draws_every_entity_in_order() {
    let mut game = new_game();
    let mut rec = Recorder::default();
    game.start(Level::Medium, &mut rec).unwrap();
    game.tick(&firing(), &mut rec);

    rec.draws.clear();
    game.render(&mut rec).unwrap();
    assert_eq!(
        rec.draws,
        vec!["clear", "background 1", "player", "bullet", "enemy", "present"]
    );
}
