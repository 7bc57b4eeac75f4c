use std::env;
use std::path::Path;

use dotenvy::dotenv;

use crm_desk::models::config::load_config;

fn main() {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    // Select config profile (defaults to `local`).
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    let desk_config = match load_config(Path::new("config"), &app_env) {
        Ok(desk_config) => desk_config,
        Err(err) => {
            log::error!("Error loading desk config: {}", err);
            std::process::exit(1);
        }
    };

    let (summary, report) = actix_rt::System::new().block_on(crm_desk::run(&desk_config));

    if let Err(err) = &report.clients {
        log::error!("Failed to load clients: {err}");
    }
    if let Err(err) = &report.projects {
        log::error!("Failed to load projects: {err}");
    }

    println!("{}", summary.greeting);
    println!(
        "Clientes: {} total, {} activos, {} inactivos, {} sin proyectos",
        summary.clients.total,
        summary.clients.active,
        summary.clients.inactive,
        summary.clients.without_projects
    );
    println!(
        "Proyectos: {} total, {} en planificación, {} en progreso, {} finalizados",
        summary.projects.total,
        summary.projects.planning,
        summary.projects.in_progress,
        summary.projects.finished
    );

    if !report.is_ok() {
        std::process::exit(1);
    }
}
