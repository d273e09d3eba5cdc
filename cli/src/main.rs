use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use commerce_core::{UserUpdate, parse_id, parse_price, parse_quantity};
use commerce_sqlite::Store;
use tracing_subscriber::EnvFilter;

mod config;
mod menu;
mod output;

use output::OutputFormat;

#[derive(Debug, Parser)]
#[command(name = "commerce")]
#[command(about = "Manage users, products, and orders in a local SQLite store")]
struct Cli {
    /// Database file path (default: $COMMERCE_DB, then ./e_commerce.db).
    #[arg(long, global = true)]
    db: Option<PathBuf>,
    /// Output format.
    #[arg(long, global = true, value_enum, default_value = "table")]
    format: OutputFormat,
    /// Log storage activity to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
#[command(rename_all = "snake_case")]
enum Command {
    /// Create a user.
    CreateUser(CreateUserArgs),
    /// Show a user by username.
    GetUser(UsernameArgs),
    /// List all users.
    ListUsers,
    /// Replace a user's password.
    UpdateUserPassword(UpdatePasswordArgs),
    /// Change any of a user's username, email, or password.
    UpdateUser(UpdateUserArgs),
    /// Delete a user. Orders placed by the user are kept.
    DeleteUser(UsernameArgs),
    /// Create a product.
    CreateProduct(CreateProductArgs),
    /// List all products.
    ListProducts,
    /// Create an empty order for a user.
    CreateOrder(UsernameArgs),
    /// Show an order with its line items.
    GetOrder(OrderArgs),
    /// List all orders with their line items.
    ListOrders,
    /// Add a product line item to an order.
    AddProductToOrder(AddProductArgs),
    /// Print the total price of an order.
    CalculateOrderTotal(OrderArgs),
    /// Run the interactive numbered menu.
    Menu,
}

#[derive(Debug, Args)]
struct CreateUserArgs {
    username: String,
    email: String,
    password: String,
}

#[derive(Debug, Args)]
struct UsernameArgs {
    username: String,
}

#[derive(Debug, Args)]
struct UpdatePasswordArgs {
    username: String,
    password: String,
}

#[derive(Debug, Args)]
struct UpdateUserArgs {
    /// Current username of the user to change.
    username: String,
    /// New username.
    #[arg(long)]
    new_username: Option<String>,
    /// New email address.
    #[arg(long)]
    email: Option<String>,
    /// New password.
    #[arg(long)]
    password: Option<String>,
}

#[derive(Debug, Args)]
struct CreateProductArgs {
    name: String,
    /// Unit price (non-negative decimal).
    #[arg(value_parser = parse_price, allow_negative_numbers = true)]
    price: f64,
}

#[derive(Debug, Args)]
struct OrderArgs {
    #[arg(value_parser = parse_id, allow_negative_numbers = true)]
    order_id: i64,
}

#[derive(Debug, Args)]
struct AddProductArgs {
    #[arg(value_parser = parse_id, allow_negative_numbers = true)]
    order_id: i64,
    #[arg(value_parser = parse_id, allow_negative_numbers = true)]
    product_id: i64,
    /// Number of units (positive integer).
    #[arg(value_parser = parse_quantity, allow_negative_numbers = true)]
    quantity: i64,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let db_path = config::resolve_db_path(cli.db);
    let mut store = match Store::open(&db_path) {
        Ok(store) => store,
        Err(err) => {
            eprintln!(
                "error: failed to open database '{}': {err}",
                db_path.display()
            );
            std::process::exit(1);
        }
    };

    let result = run(&mut store, cli.command, cli.format);
    drop(store);

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(store: &mut Store, command: Command, format: OutputFormat) -> Result<(), String> {
    match command {
        Command::CreateUser(args) => run_create_user(store, args, format),
        Command::GetUser(args) => run_get_user(store, args, format),
        Command::ListUsers => run_list_users(store, format),
        Command::UpdateUserPassword(args) => run_update_user_password(store, args),
        Command::UpdateUser(args) => run_update_user(store, args, format),
        Command::DeleteUser(args) => run_delete_user(store, args),
        Command::CreateProduct(args) => run_create_product(store, args, format),
        Command::ListProducts => run_list_products(store, format),
        Command::CreateOrder(args) => run_create_order(store, args, format),
        Command::GetOrder(args) => run_get_order(store, args, format),
        Command::ListOrders => run_list_orders(store, format),
        Command::AddProductToOrder(args) => run_add_product_to_order(store, args),
        Command::CalculateOrderTotal(args) => run_calculate_order_total(store, args, format),
        Command::Menu => run_menu(store),
    }
}

fn run_create_user(
    store: &mut Store,
    args: CreateUserArgs,
    format: OutputFormat,
) -> Result<(), String> {
    let user = store
        .create_user(&args.username, &args.email, &args.password)
        .map_err(|e| e.to_string())?;
    println!("{}", output::format_user(&user, format)?);
    Ok(())
}

fn run_get_user(store: &Store, args: UsernameArgs, format: OutputFormat) -> Result<(), String> {
    let user = store
        .get_user_by_username(&args.username)
        .map_err(|e| e.to_string())?;
    println!("{}", output::format_user(&user, format)?);
    Ok(())
}

fn run_list_users(store: &Store, format: OutputFormat) -> Result<(), String> {
    let users = store.list_users().map_err(|e| e.to_string())?;
    println!("{}", output::format_users(&users, format)?);
    Ok(())
}

fn run_update_user_password(store: &mut Store, args: UpdatePasswordArgs) -> Result<(), String> {
    let user = store
        .get_user_by_username(&args.username)
        .map_err(|e| e.to_string())?;
    store
        .update_user_password(&user, &args.password)
        .map_err(|e| e.to_string())?;
    println!("Password updated for '{}'.", user.username);
    Ok(())
}

fn run_update_user(
    store: &mut Store,
    args: UpdateUserArgs,
    format: OutputFormat,
) -> Result<(), String> {
    let update = UserUpdate {
        username: args.new_username,
        email: args.email,
        password: args.password,
    };
    if update.normalized().is_empty() {
        return Err("nothing to update: pass --new-username, --email, or --password".to_string());
    }
    let user = store
        .get_user_by_username(&args.username)
        .map_err(|e| e.to_string())?;
    let updated = store
        .update_user(user.id, &update)
        .map_err(|e| e.to_string())?;
    println!("{}", output::format_user(&updated, format)?);
    Ok(())
}

fn run_delete_user(store: &mut Store, args: UsernameArgs) -> Result<(), String> {
    let user = store
        .get_user_by_username(&args.username)
        .map_err(|e| e.to_string())?;
    store.delete_user(&user).map_err(|e| e.to_string())?;
    println!("Deleted user '{}'.", user.username);
    Ok(())
}

fn run_create_product(
    store: &mut Store,
    args: CreateProductArgs,
    format: OutputFormat,
) -> Result<(), String> {
    let product = store
        .create_product(&args.name, args.price)
        .map_err(|e| e.to_string())?;
    println!("{}", output::format_product(&product, format)?);
    Ok(())
}

fn run_list_products(store: &Store, format: OutputFormat) -> Result<(), String> {
    let products = store.list_products().map_err(|e| e.to_string())?;
    println!("{}", output::format_products(&products, format)?);
    Ok(())
}

fn run_create_order(
    store: &mut Store,
    args: UsernameArgs,
    format: OutputFormat,
) -> Result<(), String> {
    let user = store
        .get_user_by_username(&args.username)
        .map_err(|e| e.to_string())?;
    let order = store.create_order(&user).map_err(|e| e.to_string())?;
    let summary = store.order_summary(order.id).map_err(|e| e.to_string())?;
    println!("{}", output::format_order(&summary, format)?);
    Ok(())
}

fn run_get_order(store: &Store, args: OrderArgs, format: OutputFormat) -> Result<(), String> {
    let summary = store
        .order_summary(args.order_id)
        .map_err(|e| e.to_string())?;
    println!("{}", output::format_order(&summary, format)?);
    Ok(())
}

fn run_list_orders(store: &Store, format: OutputFormat) -> Result<(), String> {
    let summaries = store.list_order_summaries().map_err(|e| e.to_string())?;
    println!("{}", output::format_orders(&summaries, format)?);
    Ok(())
}

fn run_add_product_to_order(store: &mut Store, args: AddProductArgs) -> Result<(), String> {
    let item = store
        .add_product_to_order(args.order_id, args.product_id, args.quantity)
        .map_err(|e| e.to_string())?;
    println!(
        "Added {} x product {} to order {} (line item {}).",
        item.quantity, item.product_id, item.order_id, item.id
    );
    Ok(())
}

fn run_calculate_order_total(
    store: &Store,
    args: OrderArgs,
    format: OutputFormat,
) -> Result<(), String> {
    let total = store
        .calculate_order_total(args.order_id)
        .map_err(|e| e.to_string())?;
    println!("{}", output::format_total(args.order_id, total, format)?);
    Ok(())
}

fn run_menu(store: &mut Store) -> Result<(), String> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    menu::run(store, stdin.lock(), stdout.lock()).map_err(|e| format!("menu I/O failed: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_subcommands_use_snake_case_names() {
        let cli = Cli::try_parse_from(["commerce", "add_product_to_order", "1", "2", "3"]).unwrap();
        match cli.command {
            Command::AddProductToOrder(args) => {
                assert_eq!((args.order_id, args.product_id, args.quantity), (1, 2, 3));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_bad_price_is_a_usage_error() {
        let err = Cli::try_parse_from(["commerce", "create_product", "Widget", "free"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
        assert!(err.to_string().contains("invalid price: 'free'"));
    }

    #[test]
    fn test_negative_quantity_is_a_usage_error() {
        let err = Cli::try_parse_from(["commerce", "add_product_to_order", "1", "1", "-2"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let cli = Cli::try_parse_from([
            "commerce",
            "list_users",
            "--db",
            "shop.db",
            "--format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.db, Some(PathBuf::from("shop.db")));
        assert!(matches!(cli.format, OutputFormat::Json));
    }
}
