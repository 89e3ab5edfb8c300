use std::env;

use chrono::Local;
use log::{debug, error, info, warn};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;

use showcase_rs::catalog::{self, Catalog};
use showcase_rs::config::{self, ShowcaseConfig};
use showcase_rs::controller::{Intent, ShowcaseController, ShowcaseHandle};
use showcase_rs::errors::AppError;
use showcase_rs::inventory::{self, InventoryQuery};
use showcase_rs::model::{ShowcaseCar, ShowcaseSnapshot};

// --- Constants ---
const DEFAULT_CONFIG_PATH: &str = "/etc/showcase.conf";

const HELP: &str = "commands: n next | p previous | g <k> go to slide k | t toggle autoplay | \
h hover | l leave | s [text] [brand=..] [price=under-150k|150k-250k|over-250k] search | \
d details | f featured | q quit";

/// What a line typed on stdin asks for.
#[derive(Debug, PartialEq)]
enum UserCommand {
    Showcase(Intent),
    Search(InventoryQuery),
    Details,
    Featured,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Option<UserCommand> {
    let line = line.trim();
    let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let command = match verb {
        "n" => UserCommand::Showcase(Intent::Next),
        "p" => UserCommand::Showcase(Intent::Previous),
        // Slides are numbered from 1 on screen.
        "g" => {
            let position: usize = rest.trim().parse().ok()?;
            UserCommand::Showcase(Intent::GoTo(position.checked_sub(1)?))
        }
        "t" => UserCommand::Showcase(Intent::ToggleAutoPlay),
        "h" => UserCommand::Showcase(Intent::Pause),
        "l" => UserCommand::Showcase(Intent::Resume),
        "s" => UserCommand::Search(InventoryQuery::parse(rest)),
        "d" => UserCommand::Details,
        "f" => UserCommand::Featured,
        "?" | "help" => UserCommand::Help,
        "q" | "quit" => UserCommand::Quit,
        _ => return None,
    };
    Some(command)
}

fn render_line(snapshot: &ShowcaseSnapshot, slide: &ShowcaseCar) -> String {
    let mut flags = Vec::new();
    if snapshot.is_transitioning {
        flags.push(format!("sliding {}", snapshot.direction));
    }
    let mode = if snapshot.is_auto_playing { "autoplay" } else { "manual" };
    flags.push(mode.to_string());
    if snapshot.is_paused {
        flags.push("paused".to_string());
    }
    if snapshot.has_completed_cycle {
        flags.push("all cars viewed".to_string());
    }
    format!(
        "[{}] {} / {}  {} {} {} ({}, {})  [{}]",
        Local::now().format("%H:%M:%S"),
        snapshot.position(),
        snapshot.slide_count,
        slide.brand,
        slide.name,
        slide.model,
        slide.category,
        slide.price,
        flags.join(", ")
    )
}

/// Prints a line for every published state until the controller stops.
async fn render_loop(
    handle: ShowcaseHandle<ShowcaseCar>,
    mut state_rx: watch::Receiver<ShowcaseSnapshot>,
) {
    loop {
        let snapshot = *state_rx.borrow_and_update();
        let slide = &handle.sequence()[snapshot.current_index];
        println!("{}", render_line(&snapshot, slide));
        if state_rx.changed().await.is_err() {
            debug!("Showcase state channel closed, render loop exiting.");
            break;
        }
    }
}

fn print_search(catalog: &Catalog, query: &InventoryQuery) {
    let found = query.filter(&catalog.cars);
    println!(
        "{} vehicle(s) found, {} filter(s) applied. Brands: {}",
        found.len(),
        query.active_filter_count(),
        inventory::brands(&catalog.cars).join(", ")
    );
    if found.is_empty() {
        println!("  No vehicles found. Try adjusting your search criteria.");
    }
    for car in found {
        println!(
            "  #{} {} {} {} ({}) {}",
            car.id,
            car.year,
            car.brand,
            car.name,
            car.model,
            car.display_price()
        );
    }
}

fn print_featured(catalog: &Catalog) {
    println!("Featured vehicles:");
    for car in catalog.featured() {
        println!("  #{} {} {} {} {}", car.id, car.year, car.brand, car.name, car.display_price());
    }
}

fn print_details(catalog: &Catalog, slide: &ShowcaseCar) {
    match catalog.detail_for_showcase(&slide.id) {
        Some(car) => {
            println!("{} {} {} - {}", car.year, car.brand, car.name, car.display_price());
            println!("  {}", car.description);
            println!(
                "  {} | {} | {} | top speed {} | {} | {} | {} | {}",
                car.specs.engine,
                car.specs.horsepower,
                car.specs.acceleration,
                car.specs.top_speed,
                car.specs.transmission,
                car.specs.drivetrain,
                car.specs.fuel_economy,
                car.specs.seating
            );
            for feature in &car.features {
                println!("  - {}", feature);
            }
        }
        None => println!("No detail page for showcase slide '{}'.", slide.id),
    }
}

fn load_settings(path: &str) -> ShowcaseConfig {
    match config::load_config(path) {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!("Failed to load configuration ({}), using defaults.", e);
            ShowcaseConfig::default()
        }
    }
}

fn load_catalog_for(cfg: &ShowcaseConfig) -> Result<Catalog, AppError> {
    let catalog = match &cfg.catalog_path {
        Some(path) => catalog::load_catalog(path)?,
        None => {
            debug!("No catalog_path configured, using the bundled catalog.");
            Catalog::builtin()?
        }
    };
    Ok(catalog)
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    env_logger::init(); // Initialize logger
    info!("Starting showcase_rs...");

    let config_path = env::args().nth(1).unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let cfg = load_settings(&config_path);
    let catalog = load_catalog_for(&cfg).map_err(|e| {
        error!("Cannot start showcase: {}", e);
        e
    })?;
    let sequence = catalog.slide_sequence()?;

    let handle = ShowcaseController::spawn(sequence, cfg);
    let renderer = tokio::spawn(render_loop(handle.clone(), handle.subscribe()));
    println!("{}", HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        match parse_command(&line) {
            Some(UserCommand::Showcase(intent)) => {
                handle.send(intent).await;
            }
            Some(UserCommand::Search(query)) => print_search(&catalog, &query),
            Some(UserCommand::Details) => print_details(&catalog, handle.current_slide()),
            Some(UserCommand::Featured) => print_featured(&catalog),
            Some(UserCommand::Help) => println!("{}", HELP),
            Some(UserCommand::Quit) => break,
            None => println!("Unknown command '{}'. {}", line.trim(), HELP),
        }
    }

    info!("Shutting down showcase.");
    handle.shutdown().await;
    if let Err(e) = renderer.await {
        warn!("Render loop ended abnormally: {}", e);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use showcase_rs::model::PriceBand;

    #[test]
    fn parses_navigation_commands() {
        assert_eq!(parse_command("n"), Some(UserCommand::Showcase(Intent::Next)));
        assert_eq!(parse_command(" p "), Some(UserCommand::Showcase(Intent::Previous)));
        assert_eq!(parse_command("g 3"), Some(UserCommand::Showcase(Intent::GoTo(2))));
        assert_eq!(parse_command("h"), Some(UserCommand::Showcase(Intent::Pause)));
        assert_eq!(parse_command("l"), Some(UserCommand::Showcase(Intent::Resume)));
        assert_eq!(parse_command("q"), Some(UserCommand::Quit));
    }

    #[test]
    fn parses_catalog_commands() {
        assert_eq!(parse_command("d"), Some(UserCommand::Details));
        assert_eq!(parse_command(" f"), Some(UserCommand::Featured));
        assert_eq!(parse_command("help"), Some(UserCommand::Help));
    }

    #[test]
    fn rejects_bad_slide_numbers_and_unknown_verbs() {
        assert_eq!(parse_command("g 0"), None);
        assert_eq!(parse_command("g x"), None);
        assert_eq!(parse_command("jump"), None);
    }

    #[test]
    fn search_command_builds_query() {
        let Some(UserCommand::Search(query)) = parse_command("s spur price=150k-250k") else {
            panic!("expected a search command");
        };
        assert_eq!(query.search, "spur");
        assert_eq!(query.price, Some(PriceBand::From150kTo250k));
    }

    #[test]
    fn render_line_shows_progress_and_flags() {
        let catalog = Catalog::builtin().unwrap();
        let slide = &catalog.showcase[3];
        let snapshot = ShowcaseSnapshot {
            current_index: 3,
            direction: showcase_rs::model::Direction::Backward,
            is_transitioning: true,
            is_auto_playing: false,
            has_completed_cycle: true,
            is_paused: false,
            slide_count: 4,
        };
        let line = render_line(&snapshot, slide);
        assert!(line.contains("4 / 4"));
        assert!(line.contains("Porsche 911 Turbo S"));
        assert!(line.contains("sliding backward, manual, all cars viewed"));
    }
}
