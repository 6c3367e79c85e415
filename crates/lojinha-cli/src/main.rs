//! lojinha - command-line client for the lojinha store API.
//!
//! Provides login/logout, account registration, product browsing, and
//! order history against a configurable server.

use std::io;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use lojinha_core::models::RegisterRequest;
use lojinha_core::{ApiClient, Config, EventBus, SessionManager, TokenStore};

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn print_usage() {
    eprintln!("Usage: lojinha <command>");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  login <email>                 Authenticate and store the session token");
    eprintln!("  logout                        Clear the stored session");
    eprintln!("  register <name> <cpf> <email> Create a new account");
    eprintln!("  whoami                        Show the current session");
    eprintln!("  user <id>                     Show a user profile");
    eprintln!("  products                      List the product catalog");
    eprintln!("  product <id>                  Show a single product");
    eprintln!("  orders                        List your order history");
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    init_tracing();

    let mut config = Config::load().context("Failed to load configuration")?;
    let store = TokenStore::new(Config::data_dir()?);
    let bus = Arc::new(EventBus::new());
    let client = ApiClient::new(config.server_url(), store.clone())?;
    let mut session = SessionManager::new(store, Arc::clone(&bus));
    session.initialize().await;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command: Vec<&str> = args.iter().map(String::as_str).collect();

    match command.as_slice() {
        ["login", email] => {
            let password = rpassword::prompt_password("Password: ")?;
            let response = client.login(email, &password).await?;
            session.login(&response.token).await?;
            config.last_email = Some(email.to_string());
            config.save()?;
            info!("session established");
            println!("Logged in as {}", email);
        }
        ["logout"] => {
            session.logout().await?;
            println!("Logged out");
        }
        ["register", name, cpf, email] => {
            let password = rpassword::prompt_password("Password: ")?;
            let confirm = rpassword::prompt_password("Confirm password: ")?;
            if password != confirm {
                anyhow::bail!("Passwords do not match");
            }
            let request = RegisterRequest {
                name: name.to_string(),
                cpf: cpf.to_string(),
                email: email.to_string(),
                password,
                confirm_password: confirm,
            };
            client.register(&request).await?;
            println!("Account created for {}. Run `lojinha login {}` to sign in.", email, email);
        }
        ["whoami"] => match session.user() {
            Some(user) => println!("{} <{}> (id {})", user.name, user.email, user.id),
            None => println!("Not logged in"),
        },
        ["user", id] => {
            let user = client.fetch_user(id).await?;
            println!("{} <{}> (id {})", user.name, user.email, user.id);
            if let Some(ref cpf) = user.cpf {
                println!("CPF: {}", cpf);
            }
        }
        ["products"] => {
            let products = client.fetch_products().await?;
            if products.is_empty() {
                println!("No products available");
            }
            for product in products {
                let stock = if product.in_stock() {
                    format!("{} in stock", product.quantity)
                } else {
                    "out of stock".to_string()
                };
                println!("{}  {}  R$ {:.2}  ({})", product.id, product.name, product.price, stock);
            }
        }
        ["product", id] => {
            let product = client.fetch_product(id).await?;
            println!("{} - R$ {:.2}", product.name, product.price);
            if let Some(ref description) = product.description {
                println!("{}", description);
            }
            println!("Quantity: {}", product.quantity);
            if let Some(ref image_url) = product.image_url {
                println!("Image: {}", image_url);
            }
        }
        ["orders"] => {
            let orders = client.fetch_orders().await?;
            if orders.is_empty() {
                println!("No orders yet");
            }
            for order in orders {
                println!(
                    "#{}  {}  {}  {}  R$ {:.2}",
                    order.id,
                    order.order_date,
                    order.status_display(),
                    order.payment_method_display(),
                    order.total
                );
                for item in &order.items {
                    println!("    {} x{}  R$ {:.2}", item.name, item.quantity, item.line_total());
                }
            }
        }
        _ => {
            print_usage();
            std::process::exit(2);
        }
    }

    Ok(())
}
