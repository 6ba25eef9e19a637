use sea_orm::Database;
use sea_orm_migration::prelude::*;

const USAGE: &str = "Usage: cargo run -p migration -- [up|down [steps]|fresh|status]";

enum Command {
    Up,
    Down(Option<u32>),
    Fresh,
    Status,
}

fn parse_command(mut args: impl Iterator<Item = String>) -> Option<Command> {
    let command = match args.next().as_deref().unwrap_or("up") {
        "up" => Command::Up,
        "down" => match args.next() {
            Some(steps) => Command::Down(Some(steps.parse().ok()?)),
            None => Command::Down(None),
        },
        "fresh" => Command::Fresh,
        "status" => Command::Status,
        _ => return None,
    };
    Some(command)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let Some(command) = parse_command(std::env::args().skip(1)) else {
        eprintln!("{USAGE}");
        std::process::exit(2);
    };

    let db_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite:./fincraft.db?mode=rwc".to_string());
    let db = Database::connect(&db_url).await?;

    match command {
        Command::Up => migration::Migrator::up(&db, None).await?,
        Command::Down(steps) => migration::Migrator::down(&db, steps).await?,
        Command::Fresh => migration::Migrator::fresh(&db).await?,
        Command::Status => migration::Migrator::status(&db).await?,
    }

    Ok(())
}
