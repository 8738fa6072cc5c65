//! Demo auth gates
//!
//! Each gate exposes a boolean "is authenticated" flag and a login
//! predicate; the intake and triage logic is only reachable once the
//! relevant gate reports success. Sessions persist through an injectable
//! `CredentialStore` capability so the gates never depend on a storage
//! mechanism. There is no lockout or backoff; a rejected attempt is
//! reported synchronously and the caller may retry.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{info, warn};

use crate::config::StaffConfig;
use crate::error::{Error, Result};

/// Shape check for resident email addresses
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex is valid"));

const KEY_RESIDENT_EMAIL: &str = "resident_email";
const KEY_RESIDENT_NAME: &str = "resident_name";
const KEY_STAFF_SESSION: &str = "staff_session";

/// Minimal credential persistence capability.
///
/// Implementations decide where values live (browser storage, keychain,
/// memory). The gates only need get/set/delete over string keys.
pub trait CredentialStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn delete(&self, key: &str);
}

/// In-memory credential store
#[derive(Default)]
pub struct MemoryCredentialStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values
            .read()
            .expect("credential store lock poisoned")
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.values
            .write()
            .expect("credential store lock poisoned")
            .insert(key.to_string(), value.to_string());
    }

    fn delete(&self, key: &str) {
        self.values
            .write()
            .expect("credential store lock poisoned")
            .remove(key);
    }
}

/// Signed-in resident identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResidentSession {
    pub email: String,
    pub name: String,
}

/// Gate in front of the citizen submission view.
///
/// Sign-in is identity-only (no password in this demo): a well-formed email
/// is the whole credential.
pub struct ResidentGate {
    store: Arc<dyn CredentialStore>,
    session: Option<ResidentSession>,
}

impl ResidentGate {
    /// Construct the gate, restoring any session the store still holds
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        let session = store.get(KEY_RESIDENT_EMAIL).map(|email| ResidentSession {
            email,
            name: store.get(KEY_RESIDENT_NAME).unwrap_or_default(),
        });
        if session.is_some() {
            info!("resident session restored");
        }
        Self { store, session }
    }

    /// Whether a resident is currently signed in
    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// Current session, if signed in
    pub fn session(&self) -> Option<&ResidentSession> {
        self.session.as_ref()
    }

    /// Attempt to sign in with a display name and email address.
    ///
    /// The name is optional; the email must be well-formed.
    pub fn attempt_login(&mut self, name: &str, email: &str) -> Result<()> {
        if !EMAIL_RE.is_match(email) {
            warn!("resident login rejected: malformed email");
            return Err(Error::Auth("enter a valid email".to_string()));
        }

        self.store.set(KEY_RESIDENT_EMAIL, email);
        if !name.is_empty() {
            self.store.set(KEY_RESIDENT_NAME, name);
        }
        self.session = Some(ResidentSession {
            email: email.to_string(),
            name: name.to_string(),
        });
        info!("resident signed in");
        Ok(())
    }

    /// Sign out and forget the persisted session
    pub fn logout(&mut self) {
        self.store.delete(KEY_RESIDENT_EMAIL);
        self.store.delete(KEY_RESIDENT_NAME);
        self.session = None;
        info!("resident signed out");
    }
}

/// Gate in front of the admin triage view.
///
/// The credential rule (work-email domain plus shared access code) comes
/// from configuration; the engine only consumes the boolean outcome.
pub struct StaffGate {
    store: Arc<dyn CredentialStore>,
    rules: StaffConfig,
    authenticated: bool,
}

impl StaffGate {
    /// Construct the gate, restoring any session the store still holds
    pub fn new(store: Arc<dyn CredentialStore>, rules: StaffConfig) -> Self {
        let authenticated = store.get(KEY_STAFF_SESSION).as_deref() == Some("1");
        if authenticated {
            info!("staff session restored");
        }
        Self {
            store,
            rules,
            authenticated,
        }
    }

    /// Whether a staff member is currently signed in
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Attempt to sign in with a work email and access code.
    ///
    /// The email domain suffix is matched case-insensitively; the access
    /// code must match exactly.
    pub fn attempt_login(&mut self, email: &str, access_code: &str) -> Result<()> {
        let domain_ok = email
            .to_lowercase()
            .ends_with(&self.rules.email_domain.to_lowercase());
        if !domain_ok || access_code != self.rules.access_code {
            warn!("staff login rejected");
            return Err(Error::Auth(format!(
                "use a {} email and the current access code",
                self.rules.email_domain
            )));
        }

        self.store.set(KEY_STAFF_SESSION, "1");
        self.authenticated = true;
        info!("staff signed in");
        Ok(())
    }

    /// Sign out and forget the persisted session
    pub fn logout(&mut self) {
        self.store.delete(KEY_STAFF_SESSION);
        self.authenticated = false;
        info!("staff signed out");
    }
}
