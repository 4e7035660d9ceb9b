//! Headless arena run
//!
//! Plays one match with a scripted driver and logs the outcome. An optional
//! first argument names a `.toml` or `.ron` config file.

use std::path::PathBuf;

use tank_combat::prelude::*;
use tank_engine::foundation::logging;

const TICK_RATE: f32 = 60.0;
const MAX_SECONDS: f32 = 180.0;

/// Drive in a slow loop while sweeping the turret and firing
fn scripted_input(tick: u64) -> PlayerInput {
    let phase = tick % 600;
    PlayerInput {
        forward: phase < 420,
        backward: false,
        turn_left: (300..420).contains(&phase),
        turn_right: false,
        mouse_dx: if (phase / 120) % 2 == 0 { 40.0 } else { -40.0 },
        scroll: 0.0,
        fire: tick % 90 == 0,
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_with_level("info");

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = GameConfig::load_or_default(config_path.as_deref())?;
    log::info!("Starting arena run (config: {:?})", config_path);

    let mut session = GameSession::new(&config, SoundManager::new(config.sound))?;

    let dt = 1.0 / TICK_RATE;
    let max_ticks = (MAX_SECONDS * TICK_RATE) as u64;
    let mut status = GameStatus::Running;
    for tick in 0..max_ticks {
        status = session.tick(dt, &scripted_input(tick));
        session.sound_mut().drain();
        if status != GameStatus::Running {
            break;
        }
    }

    let player = &session.entities().player;
    log::info!(
        "Run finished: {:?} after {:.1}s, {} of {} enemies destroyed, health {:.1}, ammo {}, {} powerups left",
        status,
        session.elapsed(),
        session.destroyed_enemies(),
        session.entities().enemies.len(),
        player.health(),
        player.ammo(),
        session.entities().remaining_powerups(session.scene()),
    );

    Ok(())
}
