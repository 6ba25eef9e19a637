use std::{error::Error, sync::Arc};

use chrono::{DateTime, FixedOffset, Utc};
use clap::{Args, Parser, Subcommand};
use engine::{IncomeUseCase, Money, SqlIncomeRepository, users};
use migration::MigratorTrait;
use sea_orm::{Database, DatabaseConnection, EntityTrait, Set};

#[derive(Parser, Debug)]
#[command(name = "fincraft_admin")]
#[command(about = "Admin utilities for Fincraft (bootstrap users, record and inspect incomes)")]
struct Cli {
    /// Database connection string (also read from `DATABASE_URL`).
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "sqlite:./fincraft.db?mode=rwc"
    )]
    database_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    User(User),
    Income(IncomeArgs),
}

#[derive(Args, Debug)]
struct User {
    #[command(subcommand)]
    command: UserCommand,
}

#[derive(Subcommand, Debug)]
enum UserCommand {
    Create(UserCreateArgs),
}

#[derive(Args, Debug)]
struct UserCreateArgs {
    #[arg(long)]
    id: i64,
    #[arg(long)]
    email: String,
    #[arg(long)]
    name: String,
}

#[derive(Args, Debug)]
struct IncomeArgs {
    #[command(subcommand)]
    command: IncomeCommand,
}

#[derive(Subcommand, Debug)]
enum IncomeCommand {
    Add(IncomeAddArgs),
    List(IncomeListArgs),
}

#[derive(Args, Debug)]
struct IncomeAddArgs {
    #[arg(long)]
    user: i64,
    #[arg(long)]
    category: i32,
    /// Decimal amount, e.g. `100.50` or `100,50`.
    #[arg(long)]
    amount: Money,
    #[arg(long, default_value = "")]
    description: String,
}

#[derive(Args, Debug)]
struct IncomeListArgs {
    #[arg(long)]
    user: i64,
    /// RFC 3339 timestamp, inclusive.
    #[arg(long)]
    from: DateTime<FixedOffset>,
    /// RFC 3339 timestamp, inclusive.
    #[arg(long)]
    to: DateTime<FixedOffset>,
    #[arg(long)]
    by_category: bool,
}

async fn connect_db(
    database_url: &str,
) -> Result<DatabaseConnection, Box<dyn Error + Send + Sync>> {
    let db = Database::connect(database_url).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();

    let db = connect_db(&cli.database_url).await?;

    match cli.command {
        Command::User(User {
            command: UserCommand::Create(args),
        }) => {
            if users::Entity::find_by_id(args.id).one(&db).await?.is_some() {
                eprintln!("user already exists: {}", args.id);
                std::process::exit(1);
            }

            let user = users::ActiveModel {
                id: Set(args.id),
                email: Set(args.email),
                name: Set(args.name.clone()),
            };
            users::Entity::insert(user).exec(&db).await?;

            println!("created user: {} ({})", args.name, args.id);
        }
        Command::Income(IncomeArgs {
            command: IncomeCommand::Add(args),
        }) => {
            let incomes = IncomeUseCase::new(Arc::new(SqlIncomeRepository::new(db)));
            incomes
                .add_income(
                    args.user,
                    args.category,
                    args.amount.cents(),
                    &args.description,
                )
                .await?;
            println!("recorded income of {} for user {}", args.amount, args.user);
        }
        Command::Income(IncomeArgs {
            command: IncomeCommand::List(args),
        }) => {
            let incomes = IncomeUseCase::new(Arc::new(SqlIncomeRepository::new(db)));
            let start = Some(args.from.with_timezone(&Utc));
            let end = Some(args.to.with_timezone(&Utc));

            if args.by_category {
                for group in incomes
                    .category_incomes_for_period(args.user, start, end)
                    .await?
                {
                    println!("category {}:", group.category_id);
                    for income in group.incomes {
                        println!("  {:>12}  {}", income.amount, income.description);
                    }
                }
            } else {
                for income in incomes.incomes_for_period(args.user, start, end).await? {
                    println!(
                        "{:>6}  {:>12}  {}",
                        income.category_id, income.amount, income.description
                    );
                }
            }
        }
    }

    Ok(())
}
