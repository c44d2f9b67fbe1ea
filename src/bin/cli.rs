use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use sqlx::postgres::PgPoolOptions;

use nexus::cli::seeder::{SeedPlan, seed_database};
use nexus::cli::create_system_admin;

#[derive(Parser)]
#[command(name = "nexus-cli", about = "Administrative tooling for the Nexus API")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a superuser account
    CreateAdmin {
        username: String,
        email: String,
        password: String,
    },
    /// Populate the database with demo data
    Seed {
        #[arg(long, default_value_t = 2)]
        classes: usize,
        #[arg(long, default_value_t = 20)]
        students_per_class: usize,
        #[arg(long, default_value_t = 4)]
        teachers: usize,
    },
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to connect to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    match cli.command {
        Command::CreateAdmin {
            username,
            email,
            password,
        } => match create_system_admin(&pool, &username, &email, &password).await {
            Ok(()) => println!("Admin account '{}' created.", username),
            Err(e) => {
                eprintln!("Error creating admin: {}", e);
                std::process::exit(1);
            }
        },
        Command::Seed {
            classes,
            students_per_class,
            teachers,
        } => {
            let plan = SeedPlan {
                classes,
                students_per_class,
                teachers,
            };
            if let Err(e) = seed_database(&pool, plan).await {
                eprintln!("Error seeding database: {}", e);
                std::process::exit(1);
            }
        }
    }
}
