//! Authentication boundary.
//!
//! The roster itself never consults the session; gating pages on the signed-in user is up to
//! the presentation layer. [`MockSessionProvider`] keeps accounts in memory and reports the same
//! failures a hosted auth service would.

use std::{collections::HashMap, sync::OnceLock};

use async_trait::async_trait;
use log::{info, warn};
use regex::Regex;
use tokio::sync::{watch, Mutex};

use super::err::CustomError;

const MIN_PASSWORD_LEN: usize = 6;

/// Account offered on the login page for trying the app out.
pub const DEMO_EMAIL: &str = "demo@example.com";
pub const DEMO_PASSWORD: &str = "password123";

// local part, then dot-separated domain labels
const EMAIL_PATTERN: &str =
    r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)+$";

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

/// A signed-in identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub uid: String,
    pub email: String,
}

/// What subscribers see whenever the session changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub current_user: Option<User>,
    /// true until the provider has resolved the initial state
    pub loading: bool,
}

#[async_trait]
pub trait SessionProvider: Send + Sync {
    fn current_user(&self) -> Option<User>;

    fn is_loading(&self) -> bool;

    /// receive every later state change
    fn subscribe(&self) -> watch::Receiver<SessionState>;

    async fn login(&self, email: &str, password: &str) -> Result<User, CustomError>;

    async fn register(&self, email: &str, password: &str) -> Result<User, CustomError>;

    async fn logout(&self) -> Result<(), CustomError>;
}

struct Account {
    uid: String,
    password: String,
}

/// In-memory session provider.
pub struct MockSessionProvider {
    accounts: Mutex<HashMap<String, Account>>,
    state: watch::Sender<SessionState>,
}

impl MockSessionProvider {
    pub fn new() -> Self {
        Self::with_accounts(HashMap::new())
    }

    /// provider holding the demo account, see [`DEMO_EMAIL`]
    pub fn with_demo_account() -> Self {
        let mut accounts = HashMap::new();
        accounts.insert(
            DEMO_EMAIL.to_string(),
            Account {
                uid: "user-1".to_string(),
                password: DEMO_PASSWORD.to_string(),
            },
        );
        Self::with_accounts(accounts)
    }

    fn with_accounts(accounts: HashMap<String, Account>) -> Self {
        let (state, _) = watch::channel(SessionState {
            current_user: None,
            loading: true,
        });
        Self {
            accounts: Mutex::new(accounts),
            state,
        }
    }

    /// finish loading with nobody signed in
    pub fn ready(&self) {
        self.state.send_if_modified(|state| {
            let changed = state.loading;
            state.loading = false;
            changed
        });
    }

    fn publish(&self, current_user: Option<User>) {
        self.state.send_replace(SessionState {
            current_user,
            loading: false,
        });
    }
}

impl Default for MockSessionProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn email_regex() -> Result<&'static Regex, CustomError> {
    if let Some(re) = EMAIL_RE.get() {
        return Ok(re);
    }
    let re = Regex::new(EMAIL_PATTERN)?;
    Ok(EMAIL_RE.get_or_init(|| re))
}

fn check_email(email: &str) -> Result<(), CustomError> {
    if email_regex()?.is_match(email) {
        Ok(())
    } else {
        Err(CustomError::AuthError(format!("invalid email address: {}", email)))
    }
}

#[async_trait]
impl SessionProvider for MockSessionProvider {
    fn current_user(&self) -> Option<User> {
        self.state.borrow().current_user.clone()
    }

    fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    async fn login(&self, email: &str, password: &str) -> Result<User, CustomError> {
        self.ready();
        check_email(email)?;
        let accounts = self.accounts.lock().await;
        let account = accounts.get(email).ok_or_else(|| {
            warn!("login rejected for unknown account {}", email);
            CustomError::AuthError(format!("no account found for {}", email))
        })?;
        if account.password != password {
            warn!("login rejected for {}: wrong password", email);
            return Err(CustomError::AuthError("wrong password".to_string()));
        }

        let user = User {
            uid: account.uid.clone(),
            email: email.to_string(),
        };
        info!("{} signed in", email);
        self.publish(Some(user.clone()));
        Ok(user)
    }

    /// create an account and sign it in
    async fn register(&self, email: &str, password: &str) -> Result<User, CustomError> {
        self.ready();
        check_email(email)?;
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(CustomError::AuthError(format!(
                "password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }

        let mut accounts = self.accounts.lock().await;
        if accounts.contains_key(email) {
            return Err(CustomError::AuthError(format!(
                "email already in use: {}",
                email
            )));
        }
        let uid = format!("user-{}", accounts.len() + 1);
        accounts.insert(
            email.to_string(),
            Account {
                uid: uid.clone(),
                password: password.to_string(),
            },
        );

        let user = User {
            uid,
            email: email.to_string(),
        };
        info!("registered {}", email);
        self.publish(Some(user.clone()));
        Ok(user)
    }

    async fn logout(&self) -> Result<(), CustomError> {
        if let Some(user) = self.current_user() {
            info!("{} signed out", user.email);
        }
        self.publish(None);
        Ok(())
    }
}
