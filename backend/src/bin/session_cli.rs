//! Drive one persisted Colipass session from the command line.
//!
//! The session slot is a `user.json` file under the state directory, so a
//! login survives until a later `logout`.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{Context, Result, eyre};
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use serde_json::{Value, json};
use tokio::runtime::Builder;
use tracing_subscriber::{EnvFilter, fmt};

use colipass::config::CliSettings;
use colipass::domain::ports::{FixtureCredentialVerifier, TimestampUserIdGenerator};
use colipass::domain::{
    AuthService, Locale, LoginCredentials, Registration, RegistrationForm, SessionDto,
    SessionStore, SignupRole, TranslationCatalogue, Translator, UserDto,
};
use colipass::outbound::FileSessionSlot;

/// `colipass-session` command arguments.
#[derive(Debug, Parser)]
#[command(
    name = "colipass-session",
    about = "Log in, sign up and inspect a persisted Colipass session",
    version
)]
struct CliArgs {
    /// Directory holding `user.json`. Overrides `COLIPASS_CLI_STATE_DIR`.
    #[arg(long, global = true, value_name = "path")]
    state_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check credentials against the roster and persist the user.
    Login { email: String, password: String },
    /// Create an unverified account and persist it.
    Signup(SignupArgs),
    /// Forget the persisted user.
    Logout,
    /// Print the restored session.
    Whoami,
    /// Resolve a dotted translation key.
    Translate {
        key: String,
        /// `fr` or `en`. Overrides `COLIPASS_CLI_DEFAULT_LOCALE`.
        #[arg(long)]
        locale: Option<Locale>,
        /// Text printed when the key has no translation.
        #[arg(long)]
        default: Option<String>,
    },
}

#[derive(Debug, Args)]
struct SignupArgs {
    #[arg(long)]
    email: String,
    #[arg(long)]
    password: String,
    #[arg(long)]
    confirm_password: String,
    #[arg(long)]
    first_name: String,
    #[arg(long)]
    last_name: String,
    /// `traveler` or `sender`.
    #[arg(long)]
    role: SignupRole,
    #[arg(long)]
    phone: Option<String>,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .compact()
        .with_writer(io::stderr)
        .try_init()
        .map_err(|error| eyre!("tracing init failed: {error}"))?;

    let args = CliArgs::parse();
    let mut argv = std::env::args_os();
    let program = argv.next().unwrap_or_else(|| OsString::from("colipass-session"));
    let settings =
        CliSettings::load_from_iter([program]).context("failed to load CLI settings")?;

    let output = run(args, &settings)?;
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &output)?;
    writeln!(stdout)?;
    Ok(())
}

fn auth_service() -> Result<AuthService> {
    let verifier =
        FixtureCredentialVerifier::from_fixture_roster().context("embedded roster is malformed")?;
    Ok(AuthService::new(
        Arc::new(verifier),
        Arc::new(TimestampUserIdGenerator::new(Arc::new(DefaultClock))),
    ))
}

/// Execute one command and return the JSON document to print.
fn run(args: CliArgs, settings: &CliSettings) -> Result<Value> {
    let CliArgs { state_dir, command } = args;
    match command {
        Command::Translate {
            key,
            locale,
            default,
        } => {
            let locale = match locale {
                Some(locale) => locale,
                None => settings.default_locale()?,
            };
            translate(locale, &key, default.as_deref())
        }
        command => {
            let state_dir = state_dir.unwrap_or_else(|| settings.state_dir().to_path_buf());
            let slot = FileSessionSlot::open(&state_dir).with_context(|| {
                format!("failed to open session state at {}", state_dir.display())
            })?;
            let mut store = SessionStore::new(slot);
            store.restore();
            run_session_command(command, &mut store)
        }
    }
}

fn translate(locale: Locale, key: &str, default: Option<&str>) -> Result<Value> {
    let catalogue =
        TranslationCatalogue::embedded().context("embedded translation tables are malformed")?;
    let translator = Translator::with_language(Arc::new(catalogue), locale);
    let value = translator.t(key, default);
    Ok(json!({ "locale": locale, "key": key, "value": value }))
}

fn run_session_command(
    command: Command,
    store: &mut SessionStore<FileSessionSlot>,
) -> Result<Value> {
    let service = auth_service()?;
    let output = match command {
        Command::Login { email, password } => {
            let credentials = LoginCredentials::new(email, password);
            let runtime = Builder::new_current_thread()
                .enable_all()
                .build()
                .wrap_err("failed to build runtime")?;
            let user = runtime.block_on(service.login(store, &credentials))?;
            serde_json::to_value(UserDto::from(user))?
        }
        Command::Signup(signup) => {
            let registration = Registration::confirmed(
                RegistrationForm {
                    email: signup.email,
                    password: signup.password,
                    first_name: signup.first_name,
                    last_name: signup.last_name,
                    role: signup.role,
                    phone: signup.phone,
                },
                &signup.confirm_password,
            )?;
            let user = service.signup(store, registration)?;
            serde_json::to_value(UserDto::from(user))?
        }
        Command::Logout => {
            service.logout(store);
            serde_json::to_value(SessionDto::from(store.session().clone()))?
        }
        Command::Whoami | Command::Translate { .. } => {
            serde_json::to_value(SessionDto::from(store.session().clone()))?
        }
    };
    Ok(output)
}

#[cfg(test)]
mod tests {
    //! Command dispatch against a temporary state directory.

    use super::*;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    #[fixture]
    fn state() -> TempDir {
        tempfile::tempdir().expect("tempdir")
    }

    fn settings() -> CliSettings {
        CliSettings {
            state_dir: PathBuf::from(".colipass"),
            default_locale: "en".to_owned(),
        }
    }

    fn invoke(state: &TempDir, argv: &[&str]) -> Result<Value> {
        let mut full = vec!["colipass-session", "--state-dir"];
        let dir = state.path().to_str().expect("utf-8 tempdir");
        full.push(dir);
        full.extend_from_slice(argv);
        run(CliArgs::try_parse_from(full)?, &settings())
    }

    #[rstest]
    fn login_persists_across_invocations(state: TempDir) {
        let user = invoke(&state, &["login", "voyageur@example.com", "password"]).expect("login");
        assert_eq!(user["firstName"], "Jean");

        let session = invoke(&state, &["whoami"]).expect("whoami");
        assert_eq!(session["isAuthenticated"], true);
        assert_eq!(session["user"]["email"], "voyageur@example.com");

        let cleared = invoke(&state, &["logout"]).expect("logout");
        assert_eq!(cleared["isAuthenticated"], false);
        let session = invoke(&state, &["whoami"]).expect("whoami");
        assert_eq!(session["user"], Value::Null);
    }

    #[rstest]
    fn wrong_password_is_reported(state: TempDir) {
        let error = invoke(&state, &["login", "admin@example.com", "wrong"])
            .expect_err("login should fail");
        assert!(error.to_string().contains("Invalid credentials"));
        let session = invoke(&state, &["whoami"]).expect("whoami");
        assert_eq!(session["isAuthenticated"], false);
    }

    #[rstest]
    fn signup_checks_the_confirmation(state: TempDir) {
        let base = [
            "signup",
            "--email",
            "new@x.com",
            "--password",
            "s3cret",
            "--first-name",
            "Nina",
            "--last-name",
            "Roy",
            "--role",
            "sender",
            "--confirm-password",
        ];
        let mut mismatched = base.to_vec();
        mismatched.push("other");
        assert!(invoke(&state, &mismatched).is_err());

        let mut matched = base.to_vec();
        matched.push("s3cret");
        let user = invoke(&state, &matched).expect("signup");
        assert_eq!(user["roles"], json!(["sender"]));
        assert_eq!(user["verified"], false);
    }

    #[rstest]
    fn admin_cannot_be_chosen_at_signup() {
        let parsed = CliArgs::try_parse_from([
            "colipass-session",
            "signup",
            "--email",
            "a@x.com",
            "--password",
            "p",
            "--confirm-password",
            "p",
            "--first-name",
            "A",
            "--last-name",
            "B",
            "--role",
            "admin",
        ]);
        assert!(parsed.is_err());
    }

    #[rstest]
    #[case(&["translate", "nav.login"], "Login")]
    #[case(&["translate", "nav.login", "--locale", "fr"], "Connexion")]
    #[case(&["translate", "nav.nowhere", "--default", "Elsewhere"], "Elsewhere")]
    #[case(&["translate", "nav.nowhere"], "nav.nowhere")]
    fn translate_uses_the_configured_locale(
        state: TempDir,
        #[case] argv: &[&str],
        #[case] expected: &str,
    ) {
        let output = invoke(&state, argv).expect("translate");
        assert_eq!(output["value"], expected);
    }
}
