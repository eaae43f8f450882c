use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chrono::Utc;
use clap::{Parser, Subcommand};

use catalog_app::files::read_upload;
use catalog_app::toasts::ToastPrinter;
use catalog_app::{AppConfig, Catalog, FormPage, HttpBackend, SubmitError};
use catalog_core::ProductId;
use catalog_products::{Field, ProductForm, today_local};
use catalog_state::DEFAULT_PAGE_SIZE;
use catalog_storage::HttpObjectStore;

#[derive(Parser, Debug)]
#[clap(name = "catalog", version, about = "Financial products catalog client")]
struct Cli {
    #[clap(long, help = "Backend base URL (overrides CATALOG_API_URL)")]
    api_url: Option<String>,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List products
    List {
        #[clap(long, short, default_value = "", help = "Filter by name or description")]
        query: String,

        #[clap(long, default_value_t = 1)]
        page: usize,

        #[clap(long, default_value = "10", help = "Page size (5, 10 or 20)")]
        size: String,
    },
    /// Print one product as JSON
    Show { id: String },
    /// Create a product; the id is generated
    Create {
        #[clap(long)]
        name: String,

        #[clap(long)]
        description: String,

        #[clap(long, help = "Logo URL")]
        logo: Option<String>,

        #[clap(long, help = "Local image uploaded as the logo")]
        logo_file: Option<PathBuf>,

        #[clap(long, help = "Release date, YYYY-MM-DD")]
        date_release: String,
    },
    /// Update fields of an existing product
    Update {
        id: String,

        #[clap(long)]
        name: Option<String>,

        #[clap(long)]
        description: Option<String>,

        #[clap(long)]
        logo: Option<String>,

        #[clap(long)]
        logo_file: Option<PathBuf>,

        #[clap(long)]
        date_release: Option<String>,
    },
    /// Delete a product
    Delete {
        id: String,

        #[clap(long, short, help = "Skip the confirmation prompt")]
        yes: bool,
    },
    /// Upload an image and print its public URL
    Upload { path: PathBuf },
}

struct Edits {
    name: Option<String>,
    description: Option<String>,
    logo: Option<String>,
    logo_file: Option<PathBuf>,
    date_release: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::from_env().context("invalid configuration")?;
    if let Some(url) = cli.api_url {
        config.api_url = url;
    }
    catalog_observability::init_with(config.log_format, "warn");

    let catalog = Catalog::new(config);
    let mut toasts = ToastPrinter::new(&catalog.toasts, catalog.config.toasts.clone());

    let work = run(&catalog, cli.command);
    tokio::pin!(work);
    let outcome = loop {
        tokio::select! {
            outcome = &mut work => break outcome,
            _ = tokio::time::sleep(toasts.wait(Utc::now())) => {
                for line in toasts.poll(Utc::now()) {
                    eprintln!("{line}");
                }
            }
        }
    };

    for line in toasts.poll(Utc::now()) {
        eprintln!("{line}");
    }
    outcome
}

async fn run(catalog: &Catalog, command: Commands) -> Result<()> {
    match command {
        Commands::List { query, page, size } => list(catalog, query, page, &size).await,
        Commands::Show { id } => {
            let page = catalog.edit_product_page(&parse_id(&id)?).await?;
            let product = page.form().await.to_product()?;
            println!("{}", serde_json::to_string_pretty(&product)?);
            Ok(())
        }
        Commands::Create {
            name,
            description,
            logo,
            logo_file,
            date_release,
        } => {
            let page = catalog.new_product_page();
            let edits = Edits {
                name: Some(name),
                description: Some(description),
                logo,
                logo_file,
                date_release: Some(date_release),
            };
            let id = save(&page, edits).await?;
            println!("{id}");
            Ok(())
        }
        Commands::Update {
            id,
            name,
            description,
            logo,
            logo_file,
            date_release,
        } => {
            let page = catalog.edit_product_page(&parse_id(&id)?).await?;
            let edits = Edits {
                name,
                description,
                logo,
                logo_file,
                date_release,
            };
            save(&page, edits).await?;
            Ok(())
        }
        Commands::Delete { id, yes } => {
            let mut page = catalog.list_page();
            page.init().await;
            page.request_delete(parse_id(&id)?);

            if !yes && !ask(page.confirm_dialog().message(), page.confirm_dialog().confirm_text())? {
                page.cancel_delete();
                return Ok(());
            }
            page.confirm_delete().await?;
            Ok(())
        }
        Commands::Upload { path } => {
            let file = read_upload(&path)
                .await
                .with_context(|| format!("cannot read {}", path.display()))?;
            println!("{}", catalog.uploads.upload(file).await?);
            Ok(())
        }
    }
}

async fn list(catalog: &Catalog, query: String, page_no: usize, size: &str) -> Result<()> {
    let page = catalog.list_page();
    let store = page.store();

    let mut loaded = false;
    if !query.is_empty() {
        store.set_query(query).await;
        loaded = true;
    }
    if size.trim().parse::<usize>().ok() != Some(DEFAULT_PAGE_SIZE) {
        page.on_size_change(size).await;
        loaded = true;
    }
    if page_no > 1 {
        page.on_page_change(page_no).await;
        loaded = true;
    }
    if !loaded {
        page.init().await;
    }

    let view = page.view();
    if let Some(error) = view.error.as_deref() {
        bail!("{error}");
    }
    for product in view.page_items() {
        println!(
            "{}\t{}\t{}\t{}\t{}",
            product.id, product.name, product.date_release, product.date_revision, product.description
        );
    }
    println!("{} resultados · página {}/{}", view.total, view.page, view.page_count());
    Ok(())
}

async fn save(page: &FormPage<HttpBackend, HttpObjectStore>, edits: Edits) -> Result<ProductId> {
    if let Some(path) = &edits.logo_file {
        let file = read_upload(path)
            .await
            .with_context(|| format!("cannot read {}", path.display()))?;
        let before = page.form().await.value(Field::Logo).to_string();
        page.on_file_selected(Some(file)).await;
        if page.form().await.value(Field::Logo) == before {
            bail!("logo upload failed");
        }
    }

    {
        let mut form = page.form().await;
        apply(&mut form, &edits);
    }

    match page.submit(today_local()).await {
        Ok(_) => Ok(ProductId::new(page.form().await.value(Field::Id))?),
        Err(SubmitError::Invalid(errors)) => {
            for (field, error) in errors.iter() {
                eprintln!("{field}: {error}");
            }
            bail!("el formulario tiene errores")
        }
        Err(err) => Err(err.into()),
    }
}

fn apply(form: &mut ProductForm, edits: &Edits) {
    if let Some(name) = &edits.name {
        form.set_name(name.clone());
    }
    if let Some(description) = &edits.description {
        form.set_description(description.clone());
    }
    if let Some(logo) = &edits.logo {
        form.set_logo(logo.clone());
    }
    if let Some(date) = &edits.date_release {
        form.set_date_release(date.clone());
    }
}

fn parse_id(raw: &str) -> Result<ProductId> {
    Ok(ProductId::new(raw)?)
}

fn ask(message: &str, confirm_text: &str) -> Result<bool> {
    eprint!("{message} [{confirm_text}? s/N] ");
    std::io::stderr().flush()?;

    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_lowercase().as_str(),
        "s" | "si" | "sí" | "y" | "yes" | "confirmar"
    ))
}
