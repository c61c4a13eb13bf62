// Mock-draft runner entry point.
//
// Startup sequence:
// 1. Initialize tracing (stderr, env-filter controlled)
// 2. Load config (seeding config/ from defaults/ on first run)
// 3. Load the player catalog, applying league scoring where needed
// 4. Derive replacement levels from the pool
// 5. Run a full simulation, autopiloting the user's slot from the
//    engine's own recommendation
// 6. Print the final report (text, or JSON with --json)

use std::collections::HashSet;
use std::path::Path;

use anyhow::Context;
use tracing::info;

use pitchdraft::catalog;
use pitchdraft::config;
use pitchdraft::draft::scheduler::SimulationStatus;
use pitchdraft::draft::state::SimulationState;
use pitchdraft::strategy::ai::ai_draft_player;
use pitchdraft::valuation::vorp;

fn main() -> anyhow::Result<()> {
    init_tracing()?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let json_output = args.iter().any(|a| a == "--json");
    let position_override = args
        .iter()
        .position(|a| a == "--position")
        .and_then(|i| args.get(i + 1))
        .map(|v| v.parse::<usize>())
        .transpose()
        .context("--position expects a number")?;

    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: league={}, {} teams, {} roster slots",
        config.league.name, config.league.num_teams, config.league.roster.max_total_players
    );

    let players = catalog::load_catalog(Path::new(&config.draft.catalog), &config.league.scoring)
        .context("failed to load player catalog")?;
    info!("Loaded {} players from {}", players.len(), config.draft.catalog);

    let replacement_levels = vorp::replacement_levels(&players, &config.league);

    let user_position = position_override.unwrap_or(config.draft.user_position);
    let mut sim = SimulationState::start(user_position, &config.draft.team_names, &config.league);

    // Drive the draft to completion. At the user's slot, stand in for the
    // interactive UI by taking the engine's own top suggestion.
    loop {
        match sim.run_until_user_turn(&players, &replacement_levels, &config.league)? {
            SimulationStatus::Complete => break,
            SimulationStatus::AwaitingUser => {
                let progress = sim.progress();
                info!(
                    "pick {} of {} (round {}): you're on the clock",
                    progress.current_pick, progress.total_picks, progress.round
                );
                let available: Vec<_> = players
                    .iter()
                    .filter(|p| !sim.draft.is_drafted(p.id))
                    .cloned()
                    .collect();
                let user_index = sim.user_team_index();
                let team = &sim.draft.teams[user_index];
                let choice = ai_draft_player(
                    team,
                    &available,
                    &replacement_levels,
                    sim.draft.round(),
                    user_position,
                    &sim.draft.drafted,
                    sim.draft.num_teams(),
                    &config.league,
                );
                match choice {
                    Some(player) => {
                        let team_id = sim.draft.teams[user_index].id;
                        info!(
                            "round {}: your pick lands on {} ({})",
                            sim.draft.round(),
                            player.name,
                            player.position
                        );
                        sim.draft_player(&player, team_id, &HashSet::new())?;
                    }
                    None => sim.skip_user_turn()?,
                }
            }
        }
    }

    let report = sim
        .results
        .as_ref()
        .context("simulation finished without a report")?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    println!("=== {} mock draft ===", config.league.name);
    println!(
        "{} teams, {} rounds, you picked from slot {}\n",
        config.league.num_teams,
        config.league.roster.max_total_players,
        user_position
    );

    println!("Final standings (projected points):");
    for (rank, standing) in report.standings.iter().enumerate() {
        let marker = if standing.team_id as usize == user_position {
            "  <- you"
        } else {
            ""
        };
        println!(
            "{:>2}. {:<24} {:>7.1} pts  ({:+.1} VORP){marker}",
            rank + 1,
            standing.team_name,
            standing.total_points,
            standing.total_vorp
        );
    }

    println!("\nBest value picks:");
    for value in &report.best_values {
        println!(
            "  round {:>2}: {} ({}) {:+.1} VORP",
            value.round, value.player_name, value.team_name, value.vorp
        );
    }

    Ok(())
}

/// Initialize tracing to stderr; verbosity via RUST_LOG.
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pitchdraft=info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
