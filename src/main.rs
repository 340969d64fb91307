//! Headless attract-mode runner
//!
//! Plays the game with the autopilot at a fixed 60 Hz, without a window or
//! sound, and prints a summary. Useful for balance checks on tuning files.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use anyhow::{Context, Result, bail};
    use clap::Parser;
    use pixel_invaders::audio::NullAudio;
    use pixel_invaders::consts::SIM_DT;
    use pixel_invaders::platform::{self, Autopilot, FileStore, InputSource, KeyValueStore, MemoryStore};
    use pixel_invaders::renderer::AsciiRenderer;
    use pixel_invaders::sim::GameEvent;
    use pixel_invaders::{Game, Tuning};

    #[derive(Parser, Debug)]
    #[command(name = "pixel-invaders", about = "Run the simulation headless with the autopilot")]
    struct Args {
        /// RNG seed (random when omitted)
        #[arg(long)]
        seed: Option<u64>,

        /// Simulated seconds to play
        #[arg(long, default_value_t = 120.0)]
        seconds: f32,

        /// JSON file overriding tuning values
        #[arg(long)]
        tuning: Option<PathBuf>,

        /// JSON store for the high score and settings (in-memory when omitted)
        #[arg(long)]
        data: Option<PathBuf>,

        /// Start a new game after each game over
        #[arg(long)]
        restart: bool,

        /// Print the final frame as text
        #[arg(long)]
        render: bool,
    }

    #[derive(Debug, Default)]
    struct Summary {
        games: u32,
        kills: u32,
        bonus_hits: u32,
        power_ups: u32,
        levels_cleared: u32,
        best_game: u64,
    }

    impl Summary {
        fn record(&mut self, event: &GameEvent) {
            match event {
                GameEvent::GameStarted => self.games += 1,
                GameEvent::EnemyKilled { .. } => self.kills += 1,
                GameEvent::BonusHit { .. } => self.bonus_hits += 1,
                GameEvent::PowerUpCollected { .. } => self.power_ups += 1,
                GameEvent::LevelCleared { .. } => self.levels_cleared += 1,
                GameEvent::GameOver { score } => self.best_game = self.best_game.max(*score),
                _ => {}
            }
        }
    }

    fn load_tuning(path: Option<&PathBuf>) -> Result<Tuning> {
        let Some(path) = path else {
            return Ok(Tuning::default());
        };
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read tuning file {}", path.display()))?;
        Tuning::from_json(&json)
            .with_context(|| format!("invalid tuning file {}", path.display()))
    }

    pub fn run() -> Result<()> {
        platform::init_logging();
        let args = Args::parse();

        if !(args.seconds.is_finite() && args.seconds > 0.0) {
            bail!("--seconds must be a positive number");
        }

        let tuning = load_tuning(args.tuning.as_ref())?;
        let store: Box<dyn KeyValueStore> = match &args.data {
            Some(path) => Box::new(FileStore::new(path)),
            None => Box::new(MemoryStore::new()),
        };
        let seed = args.seed.unwrap_or_else(platform::entropy_seed);

        log::info!("Pixel Invaders (headless) starting...");
        let mut game = Game::new(seed, tuning, store);
        let mut pilot = Autopilot::new(args.restart);
        let mut audio = NullAudio::default();
        let mut summary = Summary::default();

        let total_ticks = (args.seconds / SIM_DT).round() as u64;
        for _ in 0..total_ticks {
            pilot.observe(&game.state);
            game.step(&pilot.sample(), &mut audio);
            for event in game.frame_events() {
                summary.record(event);
            }
        }
        summary.best_game = summary.best_game.max(game.state.score.score);

        if args.render {
            let mut renderer = AsciiRenderer::new();
            game.render(&mut renderer);
            println!("{}", renderer.last_frame());
        }

        println!("seed:            {}", seed);
        println!("simulated:       {:.1}s ({} ticks)", args.seconds, total_ticks);
        println!("games started:   {}", summary.games);
        println!("enemies killed:  {}", summary.kills);
        println!("bonus hits:      {}", summary.bonus_hits);
        println!("power-ups:       {}", summary.power_ups);
        println!("levels cleared:  {}", summary.levels_cleared);
        println!("best game:       {}", summary.best_game);
        println!("high score:      {}", game.high_score());
        println!("final phase:     {:?} (level {})", game.state.phase, game.state.level);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser starts from `pixel_invaders::web::wasm_main`
}
