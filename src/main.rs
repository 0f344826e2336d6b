//! Devfolio command-line client
//!
//! Drives the store and REST client against a running backend: read the
//! public collections, send an inquiry, and manage content as an admin.

use mimalloc::MiMalloc;

/// Global allocator for improved performance (M-MIMALLOC-APPS).
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

use std::sync::Arc;

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use dotenvy::dotenv;
use serde::Serialize;
use tracing::info;

use devfolio::api::{ApiClient, PortfolioBackend};
use devfolio::config::{AppConfig, ConfigArgs};
use devfolio::domain::ResourceId;
use devfolio::forms::{
    ContactForm, LoginForm, ProjectForm, RegistrationForm, TestimonialForm, ValidationErrors,
};
use devfolio::session::AdminSession;
use devfolio::store::selectors::CategoryFilter;
use devfolio::store::{AppStore, MutationResult, StoreOptions};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that the backend is up
    Health,
    /// List projects
    Projects {
        /// Category tab (all|web|mobile)
        #[arg(long, default_value = "all")]
        category: CategoryFilter,
        /// Case-insensitive text matched against title and description
        #[arg(long, default_value = "")]
        search: String,
    },
    /// List testimonials
    Testimonials,
    /// Send a contact inquiry
    Contact(ContactArgs),
    /// Admin operations
    #[command(subcommand)]
    Admin(AdminCommand),
}

#[derive(Subcommand, Debug)]
enum AdminCommand {
    /// Log in and print the session token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Register an admin account
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true)]
        password: String,
    },
    CreateProject(ProjectArgs),
    UpdateProject {
        id: String,
        #[command(flatten)]
        project: ProjectArgs,
    },
    DeleteProject {
        id: String,
    },
    CreateTestimonial(TestimonialArgs),
    UpdateTestimonial {
        id: String,
        #[command(flatten)]
        testimonial: TestimonialArgs,
    },
    DeleteTestimonial {
        id: String,
    },
}

#[derive(Args, Debug)]
struct ContactArgs {
    #[arg(long, default_value = "")]
    name: String,
    #[arg(long, default_value = "")]
    email: String,
    #[arg(long, default_value = "")]
    phone: String,
    #[arg(long, default_value = "")]
    company: String,
    /// One of the fixed project type labels, e.g. "Web Application"
    #[arg(long, default_value = "")]
    project_type: String,
    #[arg(long, default_value = "")]
    budget: String,
    #[arg(long, default_value = "")]
    timeline: String,
    #[arg(long, default_value = "")]
    message: String,
}

impl From<ContactArgs> for ContactForm {
    fn from(a: ContactArgs) -> Self {
        Self {
            name: a.name,
            email: a.email,
            phone: a.phone,
            company: a.company,
            project_type: a.project_type,
            budget: a.budget,
            timeline: a.timeline,
            message: a.message,
        }
    }
}

#[derive(Args, Debug)]
struct ProjectArgs {
    #[arg(long, default_value = "")]
    title: String,
    #[arg(long, default_value = "")]
    description: String,
    /// web|mobile|both
    #[arg(long, default_value = "")]
    category: String,
    /// Comma-separated
    #[arg(long, default_value = "")]
    tech_stack: String,
    #[arg(long, default_value = "")]
    live_demo: String,
    #[arg(long, default_value = "")]
    github: String,
    #[arg(long, default_value = "")]
    play_store: String,
    #[arg(long, default_value = "")]
    app_store: String,
    #[arg(long)]
    featured: bool,
    /// Comma-separated image URLs
    #[arg(long, default_value = "")]
    images: String,
}

impl From<ProjectArgs> for ProjectForm {
    fn from(a: ProjectArgs) -> Self {
        Self {
            title: a.title,
            description: a.description,
            category: a.category,
            tech_stack: a.tech_stack,
            live_demo: a.live_demo,
            github: a.github,
            play_store: a.play_store,
            app_store: a.app_store,
            featured: a.featured,
            images: a.images,
        }
    }
}

#[derive(Args, Debug)]
struct TestimonialArgs {
    #[arg(long, default_value = "")]
    client_name: String,
    #[arg(long, default_value = "")]
    position: String,
    #[arg(long, default_value = "")]
    company: String,
    #[arg(long, default_value = "")]
    content: String,
    /// 1-5, defaults to 5
    #[arg(long, default_value = "")]
    rating: String,
    #[arg(long, default_value = "")]
    project: String,
    #[arg(long, default_value = "")]
    avatar: String,
    #[arg(long)]
    featured: bool,
}

impl From<TestimonialArgs> for TestimonialForm {
    fn from(a: TestimonialArgs) -> Self {
        Self {
            client_name: a.client_name,
            position: a.position,
            company: a.company,
            content: a.content,
            rating: a.rating,
            project: a.project,
            avatar: a.avatar,
            featured: a.featured,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env (if present)
    let _ = dotenv();

    let cli = Cli::parse();
    let config = AppConfig::load(&cli.config).context("Failed to load configuration")?;

    devfolio::telemetry::init(&config.logging).context("Failed to initialise logging")?;

    info!(
        name: "config.loaded",
        base_url = %config.api.base_url,
        scope = ?config.store.scope,
        "Configuration loaded"
    );

    let session = config
        .api
        .token
        .as_deref()
        .map_or_else(AdminSession::new, |token| AdminSession::with_token(token));
    let client = ApiClient::new(&config.api.base_url)
        .context("Invalid API base URL")?
        .with_session(session);
    let store = AppStore::with_options(
        Arc::new(client.clone()) as Arc<dyn PortfolioBackend>,
        StoreOptions {
            scope: config.store.scope,
        },
    );

    match cli.command {
        Command::Health => print_json(&client.check_health().await?),
        Command::Projects { category, search } => {
            store.fetch_projects().await;
            if let Some(error) = store.select(|s| s.projects.error.clone()) {
                bail!(error);
            }
            print_json(&store.projects_matching(category, &search))
        }
        Command::Testimonials => {
            store.fetch_testimonials().await;
            let state = store.snapshot().testimonials;
            if let Some(error) = state.error {
                bail!(error);
            }
            print_json(&state.data)
        }
        Command::Contact(args) => {
            let submission = validated(ContactForm::from(args).validate())?;
            report(store.submit_contact(&submission).await)
        }
        Command::Admin(command) => run_admin(&client, &store, command).await,
    }
}

async fn run_admin(
    client: &ApiClient,
    store: &AppStore,
    command: AdminCommand,
) -> anyhow::Result<()> {
    let admin = client.admin();
    match command {
        AdminCommand::Login { email, password } => {
            let credentials = validated(LoginForm { email, password }.validate())?;
            let auth = admin.login(&credentials).await?;
            // Printed so it can be exported as ADMIN_TOKEN for later calls.
            println!("{}", auth.token);
            Ok(())
        }
        AdminCommand::Register {
            name,
            email,
            password,
        } => {
            let registration = validated(
                RegistrationForm {
                    name,
                    email,
                    password,
                }
                .validate(),
            )?;
            let auth = admin.register(&registration).await?;
            print_json(&auth.message)
        }
        AdminCommand::CreateProject(args) => {
            let draft = validated(ProjectForm::from(args).validate())?;
            report(store.create_project(&draft).await)
        }
        AdminCommand::UpdateProject { id, project } => {
            let draft = validated(ProjectForm::from(project).validate())?;
            print_json(&admin.update_project(&ResourceId::from(id.as_str()), &draft).await?)
        }
        AdminCommand::DeleteProject { id } => {
            print_json(&admin.delete_project(&ResourceId::from(id.as_str())).await?)
        }
        AdminCommand::CreateTestimonial(args) => {
            let draft = validated(TestimonialForm::from(args).validate())?;
            report(store.create_testimonial(&draft).await)
        }
        AdminCommand::UpdateTestimonial { id, testimonial } => {
            let draft = validated(TestimonialForm::from(testimonial).validate())?;
            print_json(
                &admin
                    .update_testimonial(&ResourceId::from(id.as_str()), &draft)
                    .await?,
            )
        }
        AdminCommand::DeleteTestimonial { id } => {
            print_json(&admin.delete_testimonial(&ResourceId::from(id.as_str())).await?)
        }
    }
}

fn validated<T>(result: Result<T, ValidationErrors>) -> anyhow::Result<T> {
    result.context("Form validation failed")
}

fn report<T: Serialize>(result: MutationResult<T>) -> anyhow::Result<()> {
    print_json(&result)?;
    if let Some(error) = result.error() {
        bail!("{error}");
    }
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
