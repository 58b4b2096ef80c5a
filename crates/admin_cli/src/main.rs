use std::error::Error;

use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use engine::Engine;
use migration::MigratorTrait;
use sea_orm::{Database, DatabaseConnection, EntityTrait, Set};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

mod users {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "users")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: String,
        pub name: String,
        pub email: String,
        pub number: Option<String>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

mod categories {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "categories")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: String,
        pub name: String,
        pub description: Option<String>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

#[derive(Parser, Debug)]
#[command(name = "dompet_admin")]
#[command(about = "Admin utilities for dompet (bootstrap users/categories/wallets)")]
struct Cli {
    /// Database connection string (also read from `DATABASE_URL`).
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite:./dompet.db?mode=rwc")]
    database_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    User(User),
    Category(Category),
    Wallet(Wallet),
    /// Print the user's summary for the current month.
    Summary(SummaryArgs),
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
    id: String,
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    number: Option<String>,
}

#[derive(Args, Debug)]
struct Category {
    #[command(subcommand)]
    command: CategoryCommand,
}

#[derive(Subcommand, Debug)]
enum CategoryCommand {
    Create(CategoryCreateArgs),
}

#[derive(Args, Debug)]
struct CategoryCreateArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    description: Option<String>,
}

#[derive(Args, Debug)]
struct Wallet {
    #[command(subcommand)]
    command: WalletCommand,
}

#[derive(Subcommand, Debug)]
enum WalletCommand {
    Create(WalletCreateArgs),
    List(WalletListArgs),
}

#[derive(Args, Debug)]
struct WalletCreateArgs {
    #[arg(long)]
    owner: String,
    #[arg(long)]
    name: String,
    /// Opening balance in minor currency units.
    #[arg(long, default_value_t = 0)]
    balance_minor: i64,
}

#[derive(Args, Debug)]
struct WalletListArgs {
    #[arg(long)]
    owner: String,
}

#[derive(Args, Debug)]
struct SummaryArgs {
    #[arg(long)]
    user: String,
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
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let db = connect_db(&cli.database_url).await?;

    match cli.command {
        Command::User(User {
            command: UserCommand::Create(args),
        }) => {
            if users::Entity::find_by_id(args.id.clone())
                .one(&db)
                .await?
                .is_some()
            {
                eprintln!("user already exists: {}", args.id);
                std::process::exit(1);
            }

            let user = users::ActiveModel {
                id: Set(args.id.clone()),
                name: Set(args.name),
                email: Set(args.email),
                number: Set(args.number),
            };
            users::Entity::insert(user).exec(&db).await?;

            println!("created user: {}", args.id);
        }
        Command::Category(Category {
            command: CategoryCommand::Create(args),
        }) => {
            let id = Uuid::new_v4().to_string();
            let category = categories::ActiveModel {
                id: Set(id.clone()),
                name: Set(args.name.clone()),
                description: Set(args.description),
            };
            categories::Entity::insert(category).exec(&db).await?;

            println!("created category: {} ({id})", args.name);
        }
        Command::Wallet(Wallet {
            command: WalletCommand::Create(args),
        }) => {
            let engine = Engine::builder().database(db.clone()).build().await?;
            let wallet_id = engine
                .new_wallet(&args.owner, &args.name, args.balance_minor)
                .await?;
            println!("created wallet: {} ({wallet_id})", args.name);
        }
        Command::Wallet(Wallet {
            command: WalletCommand::List(args),
        }) => {
            let engine = Engine::builder().database(db.clone()).build().await?;
            for wallet in engine.list_wallets(&args.owner).await? {
                println!("{}\t{}\t{}", wallet.id, wallet.name, wallet.balance);
            }
        }
        Command::Summary(args) => {
            let engine = Engine::builder().database(db.clone()).build().await?;
            let summary = engine.monthly_summary(&args.user, Utc::now()).await?;
            println!("income:  {}", summary.income_minor);
            println!("expense: {}", summary.expense_minor);
            println!("balance: {}", summary.balance_minor);
            println!("saving:  {}", summary.saving_minor);
        }
    }

    Ok(())
}
