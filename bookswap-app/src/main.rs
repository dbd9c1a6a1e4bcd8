//! Bookswap - terminal front end for the community book exchange

use anyhow::{bail, Context, Result};
use bookswap_app::render;
use bookswap_app::{Runtime, TerminalPlatform};
use bookswap_client::{ClientConfig, HttpListingApi};
use bookswap_core::{
    App, ContactMethod, FieldUpdate, ListingKind, Message, PhotoFile,
};
use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "bookswap")]
#[command(author, version, about = "Browse and list books on the community exchange", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Backend API base URL (defaults to $BOOKSWAP_API_BASE, then the local backend)
    #[arg(long, global = true)]
    api_base: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    Sell,
    Giveaway,
}

impl From<KindArg> for ListingKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Sell => ListingKind::ForSale,
            KindArg::Giveaway => ListingKind::Giveaway,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ContactArg {
    Email,
    Phone,
}

impl From<ContactArg> for ContactMethod {
    fn from(method: ContactArg) -> Self {
        match method {
            ContactArg::Email => ContactMethod::Email,
            ContactArg::Phone => ContactMethod::Phone,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Show the grid of book listings
    Browse,

    /// Show the details of one listing
    Show {
        /// Position in the grid, starting at 1
        number: usize,

        /// Contact the owner (opens an email or copies the phone number)
        #[arg(long)]
        contact: bool,
    },

    /// List a new book
    List {
        /// Book title
        #[arg(long, default_value = "")]
        title: String,

        /// Author name
        #[arg(long, default_value = "")]
        author: String,

        /// Listing type
        #[arg(long, value_enum, default_value = "sell")]
        kind: KindArg,

        /// Price in dollars (for sale only)
        #[arg(long, default_value = "")]
        price: String,

        /// Description
        #[arg(long, default_value = "")]
        description: String,

        /// Your name
        #[arg(long, default_value = "")]
        owner: String,

        /// How people reach you
        #[arg(long, value_enum, default_value = "email")]
        contact_method: ContactArg,

        /// Your email address or phone number
        #[arg(long, default_value = "")]
        contact_info: String,

        /// Photo of the book (HEIC photos are converted to JPEG)
        #[arg(long)]
        photo: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        "bookswap_app=debug,bookswap_client=debug,bookswap_core=debug"
    } else {
        "bookswap_app=info"
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match cli.api_base {
        Some(base) => ClientConfig::new(base),
        None => ClientConfig::from_env(),
    };
    tracing::debug!(api_base = config.api_base(), "Using backend");

    let app = App::new(config.api_base());
    let api = Arc::new(HttpListingApi::new(config).context("Failed to create HTTP client")?);
    let mut runtime = Runtime::new(app, api, TerminalPlatform::new());

    mount(&mut runtime).await;

    match cli.command {
        Commands::Browse => {
            print!("{}", render::render(runtime.app()));
        }

        Commands::Show { number, contact } => {
            let id = runtime
                .app()
                .store()
                .as_slice()
                .get(number.wrapping_sub(1))
                .map(|listing| listing.id.clone())
                .with_context(|| format!("No listing number {}", number))?;

            runtime.dispatch(Message::OpenDetail(id));
            print!("{}", render::render(runtime.app()));
            if contact {
                runtime.dispatch(Message::ContactOwner);
            }
        }

        Commands::List {
            title,
            author,
            kind,
            price,
            description,
            owner,
            contact_method,
            contact_info,
            photo,
        } => {
            runtime.dispatch(Message::OpenSubmit);
            for update in [
                FieldUpdate::Title(title),
                FieldUpdate::Author(author),
                FieldUpdate::Kind(kind.into()),
                FieldUpdate::Price(price),
                FieldUpdate::Description(description),
                FieldUpdate::OwnerName(owner),
                FieldUpdate::ContactMethod(contact_method.into()),
                FieldUpdate::ContactInfo(contact_info),
            ] {
                runtime.dispatch(Message::Field(update));
            }

            if let Some(path) = photo {
                let file = read_photo(&path).await?;
                runtime.send(Message::PhotoSelected(file)).await;
            }

            runtime.send(Message::Submit).await;

            if let Some(form) = runtime.app().draft() {
                eprint!("{}", render::render_form(form));
                bail!("Book was not listed");
            }
            print!("{}", render::render(runtime.app()));
        }
    }

    Ok(())
}

/// Run the initial fetch behind a spinner
async fn mount(runtime: &mut Runtime<TerminalPlatform>) {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message("Loading books...");

    runtime.send(Message::Mounted).await;

    pb.finish_and_clear();
}

async fn read_photo(path: &std::path::Path) -> Result<PhotoFile> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read photo: {}", path.display()))?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .context("Photo path has no file name")?
        .to_string();
    Ok(PhotoFile::from_name(file_name, bytes))
}
