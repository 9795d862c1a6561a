//! vendor-panel: CLI for restaurant vendors managing their store
//!
//! Every page of the vendor admin panel is a subcommand. Pages other than
//! the dashboard, plans and notifications need an active plan.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use std::path::PathBuf;

mod commands;

use commands::Panel;
use vendor_panel::export::{InvoiceFormat, SheetFormat};
use vendor_panel::logging;
use vendor_panel::models::account::AccountEdit;
use vendor_panel::models::product::{ItemEdit, NewItem};
use vendor_panel::models::{AccountType, BankAccount, OrderStatus, VendorStatus};

#[derive(Parser)]
#[command(name = "vendor-panel")]
#[command(about = "Manage a restaurant on the vendor panel", long_about = None)]
#[command(version)]
struct Cli {
    /// Show debug logs on stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in with email, password and the OTP sent to you
    Login {
        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        password: Option<String>,

        /// Use the OTP echoed by the server without prompting
        #[arg(long)]
        autofill: bool,
    },

    /// Register a new restaurant
    Register {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        /// 10-digit mobile number
        #[arg(long)]
        mobile: String,

        #[arg(long)]
        password: Option<String>,

        #[arg(long)]
        location: Option<String>,
    },

    /// Clear the stored session
    Logout,

    /// Show the signed-in vendor
    Whoami {
        /// Re-fetch the profile from the server
        #[arg(long)]
        refresh: bool,
    },

    /// Show or change whether the restaurant is accepting orders
    Status {
        /// active or inactive
        #[arg(long, conflicts_with = "toggle")]
        set: Option<String>,

        #[arg(long)]
        toggle: bool,
    },

    /// Orders and notifications at a glance
    Dashboard,

    /// Menu categories
    Category {
        #[command(subcommand)]
        action: CategoryAction,
    },

    /// Subcategories under a category
    Subcategory {
        #[command(subcommand)]
        action: SubcategoryAction,
    },

    /// Recommended items (products)
    Product {
        #[command(subcommand)]
        action: ProductAction,
    },

    /// Payout bank accounts
    Account {
        #[command(subcommand)]
        action: AccountAction,
    },

    /// Customer bookings
    Booking {
        #[command(subcommand)]
        action: BookingAction,
    },

    /// Subscription plans
    Plans {
        #[command(subcommand)]
        action: PlanAction,
    },

    /// Vendor notifications
    Notifications {
        #[command(subcommand)]
        action: NotificationAction,
    },
}

#[derive(Subcommand)]
enum CategoryAction {
    List {
        /// Case-insensitive text filter
        #[arg(short, long)]
        search: Option<String>,
    },
    View {
        id: String,
    },
    Create {
        name: String,

        /// Main image (required)
        #[arg(long)]
        image: Option<PathBuf>,
    },
    Edit {
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        image: Option<PathBuf>,
    },
    Delete {
        id: String,

        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum SubcategoryAction {
    List {
        category_id: String,

        #[arg(short, long)]
        search: Option<String>,
    },
    Create {
        category_id: String,

        name: String,

        #[arg(long)]
        image: Option<PathBuf>,
    },
    Edit {
        category_id: String,

        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        image: Option<PathBuf>,
    },
    Delete {
        category_id: String,

        id: String,

        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum ProductAction {
    List {
        #[arg(short, long)]
        search: Option<String>,
    },
    View {
        product_id: String,
        item_id: String,
    },
    Create {
        name: String,

        #[arg(long)]
        price: f64,

        #[arg(long)]
        category: String,

        #[arg(long)]
        half_plate_price: Option<f64>,

        #[arg(long)]
        full_plate_price: Option<f64>,

        #[arg(long)]
        discount: Option<f64>,

        /// Comma-separated tags
        #[arg(long, value_delimiter = ',')]
        tags: Vec<String>,

        #[arg(long)]
        content: Option<String>,

        #[arg(long)]
        image: Option<PathBuf>,
    },
    Edit {
        product_id: String,
        item_id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        price: Option<f64>,

        #[arg(long)]
        half_plate_price: Option<f64>,

        #[arg(long)]
        full_plate_price: Option<f64>,

        #[arg(long)]
        discount: Option<f64>,

        #[arg(long)]
        category: Option<String>,

        #[arg(long, value_delimiter = ',')]
        tags: Option<Vec<String>>,

        #[arg(long)]
        content: Option<String>,
    },
    /// Flip between active and inactive
    Toggle {
        product_id: String,
        item_id: String,
    },
    Delete {
        product_id: String,
        item_id: String,

        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum AccountAction {
    List {
        #[arg(short, long)]
        search: Option<String>,
    },
    Add {
        #[arg(long)]
        holder: String,

        #[arg(long)]
        number: String,

        /// 11-character IFSC code
        #[arg(long)]
        ifsc: String,

        #[arg(long)]
        bank: String,

        #[arg(long)]
        branch: String,

        /// savings or current
        #[arg(long, default_value = "savings")]
        account_type: String,
    },
    Edit {
        id: String,

        #[arg(long)]
        holder: Option<String>,

        #[arg(long)]
        number: Option<String>,

        #[arg(long)]
        ifsc: Option<String>,

        #[arg(long)]
        bank: Option<String>,

        #[arg(long)]
        branch: Option<String>,

        #[arg(long)]
        account_type: Option<String>,
    },
    Delete {
        id: String,

        #[arg(short, long)]
        yes: bool,
    },
    /// Make this the primary payout account
    SetPrimary {
        id: String,
    },
}

#[derive(Subcommand)]
enum BookingAction {
    List {
        #[command(flatten)]
        filter: FilterArgs,

        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
    View {
        id: String,
    },
    /// Move a booking to another status
    Status {
        id: String,

        /// Pending, Accepted, Rejected, Prepared, Out For Delivery, Delivered, Cancelled
        status: String,
    },
    Delete {
        id: String,

        #[arg(short, long)]
        yes: bool,
    },
    /// Export the filtered list as a spreadsheet
    Export {
        #[command(flatten)]
        filter: FilterArgs,

        /// csv or json
        #[arg(long, short, default_value = "csv")]
        format: String,

        /// Output file (prints to stdout when omitted)
        #[arg(long, short)]
        output: Option<String>,

        /// Save to bookings-<date>.<format> in the current directory
        #[arg(long, conflicts_with = "output")]
        save: bool,
    },
    /// Render a printable invoice for one booking
    Invoice {
        id: String,

        /// text or md
        #[arg(long, short, default_value = "text")]
        format: String,

        #[arg(long, short)]
        output: Option<String>,
    },
}

#[derive(clap::Args)]
struct FilterArgs {
    #[arg(long)]
    status: Option<String>,

    /// Only rejected or cancelled bookings
    #[arg(long)]
    cancelled: bool,

    #[arg(short, long)]
    search: Option<String>,
}

impl FilterArgs {
    fn into_filter(self) -> Result<commands::booking::BookingFilter> {
        let status = match self.status {
            Some(s) => Some(
                OrderStatus::parse_option(&s).with_context(|| format!("Unknown status: {}", s))?,
            ),
            None => None,
        };
        Ok(commands::booking::BookingFilter {
            status,
            cancelled: self.cancelled,
            search: self.search,
        })
    }
}

#[derive(Subcommand)]
enum PlanAction {
    List,
    Status,
    /// Start a plan purchase
    Buy {
        plan_id: String,
    },
    /// Confirm a completed payment
    Capture {
        payment_id: String,

        #[arg(long)]
        order: String,

        #[arg(long)]
        plan: String,
    },
}

#[derive(Subcommand)]
enum NotificationAction {
    Count,
    List {
        #[arg(short, long)]
        search: Option<String>,

        /// Mark all as read afterwards
        #[arg(long)]
        mark_read: bool,
    },
    /// Poll the unread count and alert on new notifications
    Watch {
        /// Poll interval in seconds
        #[arg(long)]
        interval: Option<u64>,
    },
}

impl Commands {
    /// Panel route a command opens, used for plan gating
    fn route(&self) -> Option<&'static str> {
        match self {
            Commands::Login { .. } => Some("/login"),
            Commands::Register { .. } => Some("/register"),
            Commands::Logout | Commands::Whoami { .. } => None,
            Commands::Status { .. } => Some("/status"),
            Commands::Dashboard => Some("/dashboard"),
            Commands::Category { .. } => Some("/category"),
            Commands::Subcategory { .. } => Some("/subcategory"),
            Commands::Product { .. } => Some("/product"),
            Commands::Account { .. } => Some("/account"),
            Commands::Booking { .. } => Some("/bookings"),
            Commands::Plans { .. } => Some("/plans"),
            Commands::Notifications { .. } => Some("/notifications"),
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli.command).await {
        eprintln!("{} {:#}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run(command: Commands) -> Result<()> {
    let mut panel = Panel::open()?;

    if let Some(route) = command.route() {
        if !panel.enter(route).await? {
            return Ok(());
        }
    }

    match command {
        Commands::Login {
            email,
            password,
            autofill,
        } => {
            let options = commands::auth::LoginOptions {
                email,
                password,
                autofill,
            };
            let route = commands::auth::login(&mut panel, options).await?;
            if panel.enter(route).await? {
                println!("{}", commands::dashboard::execute(&panel).await?);
            }
        }

        Commands::Register {
            name,
            email,
            mobile,
            password,
            location,
        } => {
            let options = commands::auth::RegisterOptions {
                restaurant_name: name,
                email,
                mobile,
                password,
                location,
            };
            commands::auth::register(&panel, options).await?;
        }

        Commands::Logout => commands::auth::logout(&mut panel)?,

        Commands::Whoami { refresh } => {
            println!("{}", commands::auth::whoami(&mut panel, refresh).await?);
        }

        Commands::Status { set, toggle } => {
            let action = match (set, toggle) {
                (Some(s), _) => commands::vendor::StatusAction::Set(
                    VendorStatus::parse(&s)
                        .context("Invalid status. Use 'active' or 'inactive'")?,
                ),
                (None, true) => commands::vendor::StatusAction::Toggle,
                (None, false) => commands::vendor::StatusAction::Show,
            };
            commands::vendor::execute(&panel, action).await?;
        }

        Commands::Dashboard => println!("{}", commands::dashboard::execute(&panel).await?),

        Commands::Category { action } => run_category(&panel, action).await?,
        Commands::Subcategory { action } => run_subcategory(&panel, action).await?,
        Commands::Product { action } => run_product(&panel, action).await?,
        Commands::Account { action } => run_account(&panel, action).await?,
        Commands::Booking { action } => run_booking(&panel, action).await?,

        Commands::Plans { action } => match action {
            PlanAction::List => println!("{}", commands::plan::list(&panel).await?),
            PlanAction::Status => println!("{}", commands::plan::status(&panel).await?),
            PlanAction::Buy { plan_id } => {
                println!("{}", commands::plan::buy(&panel, &plan_id).await?)
            }
            PlanAction::Capture {
                payment_id,
                order,
                plan,
            } => {
                let output = commands::plan::capture(&mut panel, &payment_id, &order, &plan).await?;
                println!("{}", output);
            }
        },

        Commands::Notifications { action } => match action {
            NotificationAction::Count => {
                println!("{}", commands::notification::count(&panel).await?)
            }
            NotificationAction::List { search, mark_read } => {
                let output =
                    commands::notification::list(&panel, search.as_deref(), mark_read).await?;
                println!("{}", output);
            }
            NotificationAction::Watch { interval } => {
                commands::notification::watch(&panel, interval, None).await?
            }
        },
    }

    Ok(())
}

async fn run_category(panel: &Panel, action: CategoryAction) -> Result<()> {
    use commands::category;

    match action {
        CategoryAction::List { search } => {
            println!("{}", category::list(panel, search.as_deref()).await?)
        }
        CategoryAction::View { id } => println!("{}", category::view(panel, &id).await?),
        CategoryAction::Create { name, image } => {
            println!("{}", category::create(panel, name, image).await?)
        }
        CategoryAction::Edit { id, name, image } => {
            println!("{}", category::edit(panel, &id, name, image).await?)
        }
        CategoryAction::Delete { id, yes } => {
            if let Some(output) = category::delete(panel, &id, yes).await? {
                println!("{}", output);
            }
        }
    }
    Ok(())
}

async fn run_subcategory(panel: &Panel, action: SubcategoryAction) -> Result<()> {
    use commands::category;

    match action {
        SubcategoryAction::List {
            category_id,
            search,
        } => {
            let output =
                category::list_subcategories(panel, &category_id, search.as_deref()).await?;
            println!("{}", output);
        }
        SubcategoryAction::Create {
            category_id,
            name,
            image,
        } => {
            let output = category::create_subcategory(panel, category_id, name, image).await?;
            println!("{}", output);
        }
        SubcategoryAction::Edit {
            category_id,
            id,
            name,
            image,
        } => {
            let output = category::edit_subcategory(panel, &category_id, &id, name, image).await?;
            println!("{}", output);
        }
        SubcategoryAction::Delete {
            category_id,
            id,
            yes,
        } => {
            if let Some(output) = category::delete_subcategory(panel, &category_id, &id, yes).await? {
                println!("{}", output);
            }
        }
    }
    Ok(())
}

async fn run_product(panel: &Panel, action: ProductAction) -> Result<()> {
    use commands::product;

    match action {
        ProductAction::List { search } => {
            println!("{}", product::list(panel, search.as_deref()).await?)
        }
        ProductAction::View {
            product_id,
            item_id,
        } => println!("{}", product::view(panel, &product_id, &item_id).await?),
        ProductAction::Create {
            name,
            price,
            category,
            half_plate_price,
            full_plate_price,
            discount,
            tags,
            content,
            image,
        } => {
            let item = NewItem {
                name,
                price,
                half_plate_price,
                full_plate_price,
                discount,
                category_id: category,
                tags,
                content,
            };
            println!("{}", product::create(panel, item, image).await?);
        }
        ProductAction::Edit {
            product_id,
            item_id,
            name,
            price,
            half_plate_price,
            full_plate_price,
            discount,
            category,
            tags,
            content,
        } => {
            let edit = ItemEdit {
                name,
                price,
                half_plate_price,
                full_plate_price,
                discount,
                category_id: category,
                tags,
                content,
            };
            println!("{}", product::edit(panel, &product_id, &item_id, edit).await?);
        }
        ProductAction::Toggle {
            product_id,
            item_id,
        } => println!("{}", product::toggle(panel, &product_id, &item_id).await?),
        ProductAction::Delete {
            product_id,
            item_id,
            yes,
        } => {
            if let Some(output) = product::delete(panel, &product_id, &item_id, yes).await? {
                println!("{}", output);
            }
        }
    }
    Ok(())
}

fn parse_account_type(s: &str) -> Result<AccountType> {
    AccountType::parse(s).context("Invalid account type. Use 'savings' or 'current'")
}

async fn run_account(panel: &Panel, action: AccountAction) -> Result<()> {
    use commands::account;

    match action {
        AccountAction::List { search } => {
            println!("{}", account::list(panel, search.as_deref()).await?)
        }
        AccountAction::Add {
            holder,
            number,
            ifsc,
            bank,
            branch,
            account_type,
        } => {
            let new_account = BankAccount {
                account_holder_name: holder,
                account_number: number,
                ifsc_code: ifsc,
                bank_name: bank,
                branch_name: branch,
                account_type: parse_account_type(&account_type)?,
                ..Default::default()
            };
            println!("{}", account::add(panel, new_account).await?);
        }
        AccountAction::Edit {
            id,
            holder,
            number,
            ifsc,
            bank,
            branch,
            account_type,
        } => {
            let edit = AccountEdit {
                account_holder_name: holder,
                account_number: number,
                ifsc_code: ifsc,
                bank_name: bank,
                branch_name: branch,
                account_type: account_type.as_deref().map(parse_account_type).transpose()?,
            };
            println!("{}", account::edit(panel, &id, edit).await?);
        }
        AccountAction::Delete { id, yes } => {
            if let Some(output) = account::delete(panel, &id, yes).await? {
                println!("{}", output);
            }
        }
        AccountAction::SetPrimary { id } => println!("{}", account::set_primary(panel, &id).await?),
    }
    Ok(())
}

async fn run_booking(panel: &Panel, action: BookingAction) -> Result<()> {
    use commands::booking;

    match action {
        BookingAction::List { filter, limit } => {
            let filter = filter.into_filter()?;
            println!("{}", booking::list(panel, &filter, limit).await?);
        }
        BookingAction::View { id } => println!("{}", booking::view(panel, &id).await?),
        BookingAction::Status { id, status } => {
            println!("{}", booking::set_status(panel, &id, &status).await?)
        }
        BookingAction::Delete { id, yes } => {
            if let Some(output) = booking::delete(panel, &id, yes).await? {
                println!("{}", output);
            }
        }
        BookingAction::Export {
            filter,
            format,
            output,
            save,
        } => {
            let format = SheetFormat::from_str(&format).context("Invalid format. Use 'csv' or 'json'")?;
            let filter = filter.into_filter()?;
            booking::export(panel, &filter, format, output.as_deref(), save).await?;
        }
        BookingAction::Invoice { id, format, output } => {
            let format =
                InvoiceFormat::from_str(&format).context("Invalid format. Use 'text' or 'md'")?;
            booking::invoice(panel, &id, format, output.as_deref()).await?;
        }
    }
    Ok(())
}
