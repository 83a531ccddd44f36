//! Loads the sample fixtures into an in-memory map surface, changes a few filters and prints what would be shown
//! on the map.
//!
//! A configuration file can be given as the first argument; by default the fixtures from `examples/data` are used.

use accessmap::store::FileDataProvider;
use accessmap::{ControlId, MapSession, MapSurface, MemorySurface, SessionConfig};

const DATA_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/examples/data");

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => SessionConfig::from_file(path)?,
        None => SessionConfig::default(),
    };

    let surface = MemorySurface::new(config.center(), config.zoom());
    let mut session = MapSession::new(surface);
    let report = session
        .init(&FileDataProvider::new(DATA_DIR), config.fixtures())
        .await?;
    log::info!("Initial view: {report:?}");
    print_surface(session.surface());

    for (control, value) in [
        (ControlId::Obstacles, "yes"),
        (ControlId::Quality, "poor"),
        (ControlId::Zebra, "no"),
    ] {
        let report = session.set_control(control, value)?;
        log::info!("{control} = {value}: {report:?}");
    }
    print_surface(session.surface());

    session.surface_mut().set_zoom(3.0);
    if let Some(marker) = session.reconciler().obstacle_markers().first().copied() {
        session.surface_mut().select(marker);
    }
    print_surface(session.surface());

    Ok(())
}

fn print_surface(surface: &MemorySurface) {
    println!("--- zoom {} ---", surface.zoom());
    for (id, line) in surface.lines() {
        println!(
            "line {:>3}: {} points, {} (z {})",
            id.0,
            line.path.len(),
            line.style.color.to_css_hex(),
            line.style.z_index
        );
    }
    for (id, marker) in surface.markers() {
        println!(
            "marker {:>3}: {:.5}, {:.5} {:?} x{}",
            id.0,
            marker.position.lat(),
            marker.position.lng(),
            marker.style.shape,
            marker.style.scale
        );
    }
    for (_, popup) in surface.open_popups() {
        println!("popup: {}", popup.content.to_html());
    }
}
