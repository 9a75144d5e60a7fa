//! `agricure` command-line front-end.

mod render;

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use agricure_core::{
    Advisor, AppConfig, AuthUser, Authenticator, CropType, Database, FarmService, Predictor,
    ProfileUpdate, RecommendationForm, RulePredictor, SignInData, SignUpData, SoilType,
    SqliteStore,
};
use agricure_ml::HttpPredictor;
use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "agricure")]
#[command(about = "Soil analysis and fertilizer recommendations")]
#[command(version)]
struct CliArgs {
    /// Config file (default: $AGRICURE_CONFIG, then ./agricure.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create an account
    Signup {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        location: Option<String>,
    },
    /// Sign in and remember the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Sign out of the remembered session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// View or edit the farmer profile
    #[command(subcommand)]
    Profile(ProfileCommand),
    /// Generate a fertilizer recommendation and save it to history
    Recommend(RecommendArgs),
    /// Browse saved recommendations
    #[command(subcommand)]
    History(HistoryCommand),
}

#[derive(Subcommand, Debug)]
enum ProfileCommand {
    Show,
    /// Change profile fields; omitted fields keep their value
    Update {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        farm_size: Option<f64>,
        #[arg(long)]
        farm_size_unit: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum HistoryCommand {
    List,
    Show {
        id: String,
        /// Print the stored record as JSON
        #[arg(long)]
        json: bool,
    },
    Delete {
        id: String,
    },
}

/// Numeric values are passed through as typed so the form parser reports them.
#[derive(Args, Debug)]
struct RecommendArgs {
    #[arg(long)]
    field: String,
    #[arg(long)]
    size: String,
    /// hectares, acres or bigha
    #[arg(long, default_value = "hectares")]
    unit: String,
    /// Crop name or code
    #[arg(long)]
    crop: String,
    /// Soil name or code
    #[arg(long)]
    soil: String,
    #[arg(long)]
    ph: String,
    #[arg(long)]
    nitrogen: String,
    #[arg(long)]
    phosphorus: String,
    #[arg(long)]
    potassium: String,
    #[arg(long)]
    temperature: String,
    #[arg(long)]
    humidity: String,
    #[arg(long)]
    moisture: String,
    /// Print the recommendation as JSON
    #[arg(long)]
    json: bool,
}

fn load_config(path: Option<&PathBuf>) -> Result<AppConfig> {
    let config = match path {
        Some(path) => {
            let mut config = AppConfig::load_from_file(path)?;
            config.apply_overrides(|key| std::env::var(key).ok());
            config.validate()?;
            config
        }
        None => AppConfig::load()?,
    };
    Ok(config)
}

fn build_predictor(config: &AppConfig) -> Result<Arc<dyn Predictor>> {
    match &config.prediction.endpoint {
        Some(endpoint) => {
            let timeout = Duration::from_secs(config.prediction.timeout_secs);
            let predictor = HttpPredictor::new(endpoint.clone(), timeout)?;
            tracing::info!(endpoint = %endpoint, "Using prediction endpoint");
            Ok(Arc::new(predictor))
        }
        None => Ok(Arc::new(RulePredictor::new())),
    }
}

/// Accept a crop by name or code.
fn resolve_crop(input: &str) -> Result<String> {
    if let Some(crop) = CropType::from_name(input) {
        return Ok(crop.code().to_string());
    }
    if let Ok(code) = input.trim().parse::<i64>() {
        return Ok(code.to_string());
    }
    match CropType::suggest(input) {
        Some(crop) => bail!("Unknown crop '{}'. Did you mean '{}'?", input, crop.name()),
        None => bail!("Unknown crop '{}'", input),
    }
}

/// Accept a soil type by name or code.
fn resolve_soil(input: &str) -> Result<String> {
    if let Some(soil) = SoilType::from_name(input) {
        return Ok(soil.code().to_string());
    }
    if let Ok(code) = input.trim().parse::<i64>() {
        return Ok(code.to_string());
    }
    match SoilType::suggest(input) {
        Some(soil) => bail!("Unknown soil type '{}'. Did you mean '{}'?", input, soil.name()),
        None => bail!("Unknown soil type '{}'", input),
    }
}

fn signed_in_user(auth: &Authenticator) -> Result<AuthUser> {
    match auth.remembered_session()? {
        Some(session) => Ok(session.user),
        None => bail!("Not signed in. Run `agricure login` first."),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();
    let config = load_config(args.config.as_ref())?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.filter)),
        )
        .with_target(false)
        .init();

    let db = Database::open(&config.database.path).with_context(|| {
        format!("Failed to open database at {}", config.database.path.display())
    })?;
    let db = Arc::new(Mutex::new(db));
    let auth = Authenticator::new(db.clone());
    let store = Arc::new(SqliteStore::new(db));
    let service = FarmService::new(Advisor::new(build_predictor(&config)?), store.clone(), store);

    match args.command {
        Command::Signup {
            email,
            password,
            name,
            location,
        } => {
            let user = auth.sign_up(SignUpData {
                email,
                password,
                full_name: name,
                farm_location: location,
            })?;
            println!("Account created for {}. Run `agricure login` to sign in.", user.email);
        }

        Command::Login { email, password } => {
            let session = auth.sign_in(SignInData { email, password })?;
            auth.remember_session(&session.token)?;
            println!("Signed in as {}", session.user.email);
        }

        Command::Logout => match auth.remembered_session()? {
            Some(session) => {
                auth.sign_out(&session.token)?;
                auth.forget_session()?;
                println!("Signed out");
            }
            None => {
                auth.forget_session()?;
                println!("Not signed in");
            }
        },

        Command::Whoami => {
            let user = signed_in_user(&auth)?;
            let name = service
                .profile(&user)
                .await?
                .map(|p| p.display_name().to_string())
                .unwrap_or_else(|| "User".to_string());
            println!("{} <{}>", name, user.email);
        }

        Command::Profile(ProfileCommand::Show) => {
            let user = signed_in_user(&auth)?;
            match service.profile(&user).await? {
                Some(profile) => render::print_profile(&profile),
                None => println!("No profile found"),
            }
        }

        Command::Profile(ProfileCommand::Update {
            name,
            location,
            phone,
            farm_size,
            farm_size_unit,
        }) => {
            let user = signed_in_user(&auth)?;
            let Some(current) = service.profile(&user).await? else {
                bail!("No profile found");
            };
            let update = ProfileUpdate {
                full_name: name.unwrap_or(current.full_name),
                farm_location: location.or(current.farm_location),
                phone: phone.or(current.phone),
                farm_size: farm_size.or(current.farm_size),
                farm_size_unit: farm_size_unit.or(current.farm_size_unit),
            };
            let profile = service.update_profile(&user, update).await?;
            println!("Profile updated");
            render::print_profile(&profile);
        }

        Command::Recommend(rec) => {
            let user = signed_in_user(&auth)?;
            let form = RecommendationForm {
                crop_type: resolve_crop(&rec.crop)?,
                soil_type: resolve_soil(&rec.soil)?,
                field_name: rec.field,
                field_size: rec.size,
                size_unit: rec.unit,
                soil_ph: rec.ph,
                nitrogen: rec.nitrogen,
                phosphorus: rec.phosphorus,
                potassium: rec.potassium,
                temperature: rec.temperature,
                humidity: rec.humidity,
                soil_moisture: rec.moisture,
            };

            let submission = service.submit(&user, &form).await?;
            if rec.json {
                println!("{}", serde_json::to_string_pretty(&submission.recommendation)?);
            } else {
                render::print_recommendation(&submission.recommendation);
            }
            match submission.saved.warning() {
                Some(warning) => eprintln!("Warning: {}", warning),
                None => println!("Saved to history"),
            }
        }

        Command::History(HistoryCommand::List) => {
            let user = signed_in_user(&auth)?;
            let records = service.history(&user).await?;
            render::print_history(&records);
        }

        Command::History(HistoryCommand::Show { id, json }) => {
            let user = signed_in_user(&auth)?;
            let Some(record) = service.recommendation(&user, &id).await? else {
                bail!("No recommendation with ID {}", id);
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&record)?);
            } else {
                render::print_record(&record);
            }
        }

        Command::History(HistoryCommand::Delete { id }) => {
            let user = signed_in_user(&auth)?;
            if service.delete(&user, &id).await? {
                println!("Recommendation deleted successfully");
            } else {
                println!("No recommendation with ID {}", id);
            }
        }
    }

    Ok(())
}
