//! Flat-file auth demo front end
//!
//! A line-based stand-in for the presentation layer: reads commands from
//! stdin, dispatches them to the registration/login workflows, and holds the
//! remember-token on behalf of the client.

use log::info;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use flatfile_auth::auth::AuthenticationService;
use flatfile_auth::session::{RememberToken, SessionManager, SessionState};
use flatfile_auth::store::FlatFileStore;
use flatfile_auth::workflow::{
    LoginInput, LoginWorkflow, Outcome, RegistrationInput, RegistrationWorkflow,
};
use flatfile_auth::AuthConfig;

/// Commands accepted on stdin.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Register(Box<RegistrationFields>),
    Login {
        identifier: String,
        password: String,
        remember: bool,
    },
    Resume,
    Whoami,
    Logout,
    Quit,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct RegistrationFields {
    full_name: String,
    email: String,
    username: String,
    password: String,
    confirm_password: String,
    gender: String,
    hobbies: Vec<String>,
    country: String,
}

/// Parses one input line.
///
/// `REGISTER full name;email;username;password;confirm;gender;h1,h2;country`
/// `LOGIN <identifier> <password> [REMEMBER]`
fn parse_command(line: &str) -> Command {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    match verb.to_ascii_uppercase().as_str() {
        "REGISTER" => {
            let parts: Vec<&str> = rest.split(';').collect();
            if parts.len() != 8 {
                return Command::Unknown;
            }
            Command::Register(Box::new(RegistrationFields {
                full_name: parts[0].to_string(),
                email: parts[1].to_string(),
                username: parts[2].to_string(),
                password: parts[3].to_string(),
                confirm_password: parts[4].to_string(),
                gender: parts[5].to_string(),
                hobbies: parts[6]
                    .split(',')
                    .filter(|h| !h.trim().is_empty())
                    .map(|h| h.trim().to_string())
                    .collect(),
                country: parts[7].to_string(),
            }))
        }
        "LOGIN" => {
            let mut words = rest.split_whitespace();
            match (words.next(), words.next(), words.next()) {
                (Some(identifier), Some(password), tail) => Command::Login {
                    identifier: identifier.to_string(),
                    password: password.to_string(),
                    remember: tail.is_some_and(|w| w.eq_ignore_ascii_case("REMEMBER")),
                },
                _ => Command::Unknown,
            }
        }
        "RESUME" => Command::Resume,
        "WHOAMI" => Command::Whoami,
        "LOGOUT" => Command::Logout,
        "QUIT" | "Q" => Command::Quit,
        _ => Command::Unknown,
    }
}

fn render_outcome(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Success {
            redirect_target,
            message,
            ..
        } => format!("OK -> {} : {}", redirect_target, message),
        Outcome::ValidationFailed { field_errors } => {
            let mut out = String::from("VALIDATION FAILED");
            for (field, message) in field_errors {
                out.push_str(&format!("\n  {}: {}", field, message));
            }
            out
        }
        Outcome::AuthenticationFailed { message } => format!("LOGIN FAILED: {}", message),
        Outcome::StorageFailed { message } => format!("STORAGE FAILED: {}", message),
    }
}

#[tokio::main]
async fn main() {
    // Initialize the logger (env_logger picks up RUST_LOG environment variable)
    env_logger::init();

    let config = match AuthConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let store = match FlatFileStore::open(&config.users_path()) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            eprintln!("Failed to open credential store: {}", e);
            std::process::exit(1);
        }
    };

    let sessions = Arc::new(SessionManager::new(store.clone(), &config));
    let registration = RegistrationWorkflow::new(store.clone(), sessions.clone(), &config);
    let login = LoginWorkflow::new(
        AuthenticationService::new(store.clone()),
        sessions.clone(),
    );

    info!("Auth core ready, store at {}", store.path().display());

    // Client-side state this front end keeps on behalf of the browser.
    let mut session_state = SessionState::Anonymous;
    let mut remember_cookie: Option<RememberToken> = None;

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    let _ = stdout
        .write_all(b"Commands: REGISTER, LOGIN, RESUME, WHOAMI, LOGOUT, QUIT\n")
        .await;

    while let Ok(Some(line)) = lines.next_line().await {
        let reply = match parse_command(&line) {
            Command::Register(fields) => {
                let outcome = registration
                    .run(RegistrationInput {
                        full_name: fields.full_name,
                        email: fields.email,
                        username: fields.username,
                        password: fields.password,
                        confirm_password: fields.confirm_password,
                        gender: fields.gender,
                        hobbies: fields.hobbies,
                        country: fields.country,
                    })
                    .await;
                if let Outcome::Success { session, .. } = &outcome {
                    session_state = SessionState::Authenticated(session.clone());
                }
                render_outcome(&outcome)
            }
            Command::Login {
                identifier,
                password,
                remember,
            } => {
                let outcome = login
                    .run(LoginInput {
                        identifier,
                        password,
                        remember,
                    })
                    .await;
                if let Outcome::Success {
                    session,
                    remember_token,
                    ..
                } = &outcome
                {
                    session_state = SessionState::Authenticated(session.clone());
                    if let Some(token) = remember_token {
                        remember_cookie = Some(token.clone());
                    }
                }
                render_outcome(&outcome)
            }
            Command::Resume => {
                if session_state.logged_in() {
                    "Already logged in".to_string()
                } else if let Some(token) = remember_cookie.take() {
                    match login.resume(&token).await {
                        Some(session) => {
                            let greeting = format!("Welcome back, {}!", session.user.full_name);
                            session_state = SessionState::Authenticated(session);
                            remember_cookie = Some(token);
                            greeting
                        }
                        // Expired or forged token is treated as absent.
                        None => "Remember-token rejected; please log in".to_string(),
                    }
                } else {
                    "No remember-token held".to_string()
                }
            }
            Command::Whoami => match session_state.session() {
                Some(session) => format!(
                    "{} <{}> from {}, logged in at {}",
                    session.user.full_name,
                    session.user.email,
                    session.user.country,
                    session.login_time.format("%Y-%m-%d %H:%M:%S"),
                ),
                None => "Not logged in".to_string(),
            },
            Command::Logout => {
                let expired = sessions.destroy(&mut session_state);
                remember_cookie = Some(expired);
                "Logged out".to_string()
            }
            Command::Quit => break,
            Command::Unknown => "Unknown command".to_string(),
        };

        let _ = stdout.write_all(format!("{}\n", reply).as_bytes()).await;
        let _ = stdout.flush().await;
    }
}
