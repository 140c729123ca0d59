use chrono::{Datelike, Utc};
use clap::{Parser, Subcommand};
use obscura::draft::Draft;
use obscura_recruitment::review::{self, DeclineNote, ReviewDecision};
use obscura_recruitment::sections::Layout;
use obscura_recruitment::submission::SUCCESS_MESSAGE;
use obscura_recruitment::validation::{self, Verdict};
use obscura_recruitment::{
    FormSession, Session, ShellState, SubmissionOutcome, SubmissionPipeline, SupabaseClient,
};
use obscura_schema::registry::FieldValue;
use obscura_settings::Settings;
use obscura_utils::error::exts::*;
use obscura_utils::error::Context;
use obscura_utils::{Error, Result};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;

#[derive(Parser)]
#[command(version, author, about)]
struct Cli {
    /// Prints the version and the settings in use before
    /// running the command.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Prints the sections of the form the applicant would see
    /// with the values filled in from the draft.
    ///
    /// It does not talk to the backend.
    Sections { draft: PathBuf },

    /// Submits the draft as the signed in applicant.
    Submit { draft: PathBuf },

    /// Prints who is signed in and with which role.
    Session,

    /// Approves or declines a submitted application. (admins only)
    Review {
        #[command(subcommand)]
        decision: ReviewCommand,
    },
}

#[derive(Subcommand)]
enum ReviewCommand {
    /// Approves the application of the given user.
    Approve { id: Uuid },

    /// Declines the application of the given user.
    Decline {
        id: Uuid,

        /// Why the application got declined. It cannot be blank.
        #[arg(long)]
        note: String,
    },
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let settings = Settings::from_env().anonymize_error()?;
    obscura::logging::init(settings.logging())?;

    if cli.verbose {
        obscura::print_launch(&settings);
    }

    match cli.command {
        Command::Sections { draft } => show_sections(&settings, &draft),
        Command::Submit { draft } => submit(&settings, &draft).await,
        Command::Session => show_session(&settings).await,
        Command::Review { decision } => review_application(&settings, decision).await,
    }
}

fn load_form(path: &Path) -> Result<FormSession> {
    let mut form = FormSession::new();
    Draft::load(path).anonymize_error()?.apply(&mut form);
    Ok(form)
}

fn connect(settings: &Settings) -> Result<Arc<SupabaseClient>> {
    let client = SupabaseClient::new(settings.backend()).anonymize_error()?;
    Ok(Arc::new(client))
}

fn show_sections(settings: &Settings, path: &Path) -> Result<ExitCode> {
    let form = load_form(path)?;
    print_layout(&form, settings);

    let application = form.state().application();
    if let Verdict::MinorConsentRequired { age } =
        validation::evaluate(application, Utc::now().year())
    {
        println!();
        println!("The applicant is {age} years old. Submitting this draft leads to the parental consent form.");
    }

    Ok(ExitCode::SUCCESS)
}

async fn submit(settings: &Settings, path: &Path) -> Result<ExitCode> {
    let mut form = load_form(path)?;
    let client = connect(settings)?;
    let pipeline = SubmissionPipeline::builder()
        .identity(client.clone())
        .storage(client.clone())
        .records(client)
        .photos_bucket(settings.storage().photos_bucket.as_str())
        .table(settings.records().table.as_str())
        .build();

    match form.submit(&pipeline, Utc::now()).await {
        Ok(SubmissionOutcome::Submitted { photo_url }) => {
            println!("{SUCCESS_MESSAGE}");
            if !photo_url.is_empty() {
                println!("Photo: {photo_url}");
            }
            Ok(ExitCode::SUCCESS)
        }
        Ok(SubmissionOutcome::MinorConsentRequired { .. }) => {
            print_layout(&form, settings);
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => Ok(report_failure(&error)),
    }
}

async fn show_session(settings: &Settings) -> Result<ExitCode> {
    let client = connect(settings)?;
    let mut session = Session::new(client.clone(), client, settings.records().table.as_str());

    match session.bootstrap().await {
        ShellState::SignedIn { identity, role } => {
            let email = identity.email.as_deref().unwrap_or("<no email>");
            println!("Signed in as {email}");
            println!("User ID: {}", identity.id);
            println!("Role: {role}");
        }
        ShellState::Checking | ShellState::SignedOut => println!("Signed out"),
    }

    Ok(ExitCode::SUCCESS)
}

async fn review_application(settings: &Settings, command: ReviewCommand) -> Result<ExitCode> {
    let (applicant, decision) = match command {
        ReviewCommand::Approve { id } => (id, ReviewDecision::Approve),
        ReviewCommand::Decline { id, note } => {
            let Some(note) = DeclineNote::new(&note) else {
                eprintln!("A reason is required to decline an application.");
                return Ok(ExitCode::FAILURE);
            };
            (id, ReviewDecision::Decline(note))
        }
    };

    let client = connect(settings)?;
    let table = settings.records().table.as_str();

    let mut session = Session::new(client.clone(), client.clone(), table);
    let reviewer = session.bootstrap().await.clone();

    match review::apply(&*client, table, &reviewer, applicant, &decision).await {
        Ok(status) => {
            println!("Application of {applicant} is now {status}.");
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => Ok(report_failure(&error)),
    }
}

/// Shows the message meant for the user. The full report
/// is logged if the failure is not the user's doing.
fn report_failure<C: Context>(error: &Error<C>) -> ExitCode {
    if !error.get_category().is_user_error() {
        warn!(%error, "command failed");
    }
    eprintln!("{}", error.current_context());
    ExitCode::FAILURE
}

fn print_layout(form: &FormSession, settings: &Settings) {
    match form.layout(settings.minor_consent()) {
        Layout::MinorConsent(consent) => {
            println!("Parental Consent Required");
            println!();
            println!("You must be 18 years or older to complete this recruitment form. If you");
            println!("are under 18, please have a parent or legal guardian fill out the Minor");
            println!("Consent Form below.");
            println!();
            println!("Sign the Minor Consent Form: {}", consent.form_url);
            println!("Proceed to Minor Recruitment Form: {}", consent.recruitment_path);
        }
        Layout::Form(sections) => {
            for section in sections.iter() {
                println!("[{section}]");
                for field in obscura_schema::registry::fields_in(section) {
                    let marker = if field.required { "*" } else { "" };
                    let value = describe(&form.get(field.name));
                    println!("  {}{marker}: {value}", field.label);
                }
            }
        }
    }
}

fn describe(value: &FieldValue) -> String {
    const BLANK: &str = "-";
    match value {
        FieldValue::Text(text) if text.is_empty() => BLANK.into(),
        FieldValue::Text(text) => text.clone(),
        FieldValue::Flag(flag) => String::from(if *flag { "yes" } else { "no" }),
        FieldValue::Date(date) => date.map_or_else(|| BLANK.into(), |v| v.to_string()),
        FieldValue::File(file) => file
            .as_ref()
            .map_or_else(|| BLANK.into(), |v| v.file_name.clone()),
        FieldValue::List(list) if list.is_empty() => BLANK.into(),
        FieldValue::List(list) => list.join(", "),
    }
}

#[allow(clippy::unwrap_used)]
fn main() -> ExitCode {
    obscura::install_hooks();
    obscura_utils::env::init();

    let cli = Cli::parse();
    let result = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(run(cli));

    match result {
        Ok(code) => code,
        Err(error) => {
            eprintln!("{error}");
            ExitCode::FAILURE
        }
    }
}
