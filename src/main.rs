//! Target Range headless driver
//!
//! Plays one match against a simulated 60 fps wall clock with a seeded
//! auto-shooter that also takes the occasional break, logging every
//! notification. Prints the final snapshot as JSON.
//!
//! Usage: `target-range [config.json] [seed]`

use anyhow::Context;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use target_range::MatchConfig;
use target_range::sim::{Command, Match, MatchObserver, MatchPhase, Tier};

/// Simulated frame length
const FRAME_MS: u64 = 16;
/// Per-frame chance the auto-shooter fires
const SHOT_CHANCE: f64 = 0.05;
/// Per-frame chance of taking a break
const PAUSE_CHANCE: f64 = 0.002;
/// Wall-clock length of a break
const PAUSE_MS: u64 = 3_000;
const DEFAULT_SEED: u64 = 42;

/// Logs what a real frontend would draw
#[derive(Default)]
struct LogPresenter {
    hits: u32,
    misses: u32,
}

impl MatchObserver for LogPresenter {
    fn on_phase_changed(&mut self, phase: MatchPhase) {
        log::info!("[{}]", phase.label());
    }

    fn on_time_changed(&mut self, time_remaining: u32) {
        log::debug!("{}s left", time_remaining);
    }

    fn on_projectile_resolved(&mut self, id: u32, hit: bool, tier: Option<Tier>, points: u32) {
        if hit {
            self.hits += 1;
            log::info!("Arrow {} hit {:?} +{}", id, tier.unwrap_or(Tier::Outer), points);
        } else {
            self.misses += 1;
            log::debug!("Arrow {} missed", id);
        }
    }

    fn on_level_up(&mut self, level: u32) {
        log::info!("Level {}!", level);
    }

    fn on_match_ended(&mut self, final_score: u64, final_accuracy: u32, final_level: u32) {
        log::info!(
            "Game over! Score: {} Accuracy: {}% Level: {} ({} hits, {} misses)",
            final_score,
            final_accuracy,
            final_level,
            self.hits,
            self.misses
        );
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => MatchConfig::load(&path).with_context(|| format!("loading {}", path))?,
        None => MatchConfig::default(),
    };
    let seed = match args.next() {
        Some(s) => s.parse::<u64>().context("seed must be an unsigned integer")?,
        None => DEFAULT_SEED,
    };

    let mut game = Match::new(config).context("invalid match configuration")?;
    let mut rng = Pcg32::seed_from_u64(seed);
    let mut presenter = LogPresenter::default();
    log::info!("Target Range starting with seed {}", seed);

    let mut now = 0;
    let mut break_until: Option<u64> = None;
    game.handle(Command::Start, now);

    while game.phase() != MatchPhase::Over {
        now += FRAME_MS;
        match break_until {
            Some(until) if now >= until => {
                game.handle(Command::Resume, now);
                break_until = None;
            }
            Some(_) => {
                // shots during a break are dropped by the match
                if rng.random_bool(SHOT_CHANCE) {
                    game.handle(Command::Shoot, now);
                } else {
                    game.update(now);
                }
            }
            None if rng.random_bool(PAUSE_CHANCE) => {
                game.handle(Command::PauseToggle, now);
                break_until = Some(now + PAUSE_MS);
            }
            None if rng.random_bool(SHOT_CHANCE) => game.handle(Command::Shoot, now),
            None => game.update(now),
        }

        for event in game.drain_events() {
            event.dispatch(&mut presenter);
        }
    }

    println!("{}", serde_json::to_string_pretty(&game.snapshot())?);
    Ok(())
}
