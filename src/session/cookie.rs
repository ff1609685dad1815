//! In-process cookie jar with `document.cookie` semantics.
//!
//! Cookies are written as assignment strings
//! (`name=value;expires=<date>;path=/`) and read back through the
//! `name=value; name2=value2` rendering, the same way page scripts do.
//! Expired cookies are dropped.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::datetime::{cookie_expiry, parse_cookie_expiry};
use crate::{DistributedError, Result};

/// A single stored cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    /// Cookie name.
    pub name: String,
    /// Cookie value.
    pub value: String,
    /// Expiry; `None` for a session cookie.
    pub expires: Option<DateTime<Utc>>,
    /// Path attribute.
    pub path: String,
}

impl Cookie {
    /// Parse a cookie assignment such as `sess=abc;expires=Thu, 01 Jan 1970 00:00:00 GMT;path=/`.
    pub fn parse(assignment: &str) -> Result<Self> {
        let mut parts = assignment.split(';');
        let pair = parts.next().unwrap_or_default().trim();
        let (name, value) = pair
            .split_once('=')
            .ok_or_else(|| DistributedError::Cookie(format!("missing '=' in {pair:?}")))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(DistributedError::Cookie(format!(
                "empty cookie name in {assignment:?}"
            )));
        }

        let mut cookie = Cookie {
            name: name.to_string(),
            value: value.trim().to_string(),
            expires: None,
            path: "/".to_string(),
        };

        for attr in parts {
            let (key, val) = attr.split_once('=').unwrap_or((attr, ""));
            match key.trim().to_ascii_lowercase().as_str() {
                "expires" => {
                    let expires = parse_cookie_expiry(val).ok_or_else(|| {
                        DistributedError::Cookie(format!("invalid expires attribute {val:?}"))
                    })?;
                    cookie.expires = Some(expires);
                }
                "path" => cookie.path = val.trim().to_string(),
                // Attributes we have no use for in-process.
                _ => {}
            }
        }

        Ok(cookie)
    }

    /// Render the cookie as an assignment string.
    pub fn to_assignment(&self) -> String {
        let mut out = format!("{}={}", self.name, self.value);
        if let Some(expires) = self.expires {
            out.push_str(";expires=");
            out.push_str(&cookie_expiry(expires.timestamp()));
        }
        out.push_str(";path=");
        out.push_str(&self.path);
        out
    }

    /// Whether the cookie has expired at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires.is_some_and(|expires| expires <= now)
    }
}

/// Cookie jar holding cookies in insertion order.
#[derive(Debug, Clone, Default)]
pub struct CookieJar {
    cookies: Vec<Cookie>,
}

impl CookieJar {
    /// Create an empty jar.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a cookie assignment at `now`.
    ///
    /// An assignment that is already expired deletes the cookie.
    pub fn assign_at(&mut self, assignment: &str, now: DateTime<Utc>) -> Result<()> {
        let cookie = Cookie::parse(assignment)?;
        let existing = self
            .cookies
            .iter()
            .position(|c| c.name == cookie.name && c.path == cookie.path);

        if cookie.is_expired_at(now) {
            if let Some(index) = existing {
                debug!(name = %cookie.name, "cookie removed");
                self.cookies.remove(index);
            }
            return Ok(());
        }

        match existing {
            Some(index) => self.cookies[index] = cookie,
            None => self.cookies.push(cookie),
        }
        Ok(())
    }

    /// Set `name` to `value`, expiring at `expiry` epoch seconds, on path `/`.
    pub fn set_cookie(&mut self, name: &str, value: &str, expiry: i64) -> Result<()> {
        self.set_cookie_at(name, value, expiry, Utc::now())
    }

    /// [`CookieJar::set_cookie`] evaluated at `now`.
    pub fn set_cookie_at(
        &mut self,
        name: &str,
        value: &str,
        expiry: i64,
        now: DateTime<Utc>,
    ) -> Result<()> {
        let assignment = format!("{name}={value};expires={};path=/", cookie_expiry(expiry));
        self.assign_at(&assignment, now)
    }

    /// Value of cookie `name`, or an empty string when absent or expired.
    pub fn get_cookie(&self, name: &str) -> String {
        self.get_cookie_at(name, Utc::now())
    }

    /// [`CookieJar::get_cookie`] evaluated at `now`.
    pub fn get_cookie_at(&self, name: &str, now: DateTime<Utc>) -> String {
        let prefix = format!("{name}=");
        let raw = self.document_cookie_at(now);
        let decoded = match urlencoding::decode(&raw) {
            Ok(s) => s.into_owned(),
            Err(_) => raw.clone(),
        };

        decoded
            .split(';')
            .map(|c| c.trim_start_matches(' '))
            .find_map(|c| c.strip_prefix(prefix.as_str()))
            .unwrap_or_default()
            .to_string()
    }

    /// Delete cookie `name` by expiring it.
    pub fn del_cookie(&mut self, name: &str) -> Result<()> {
        self.set_cookie(name, "", 0)
    }

    /// The `document.cookie` string: unexpired `name=value` pairs joined by `"; "`.
    pub fn document_cookie_at(&self, now: DateTime<Utc>) -> String {
        self.cookies
            .iter()
            .filter(|c| !c.is_expired_at(now))
            .map(|c| format!("{}={}", c.name, c.value))
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Number of stored cookies, including any that expired since they were set.
    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    /// Whether the jar is empty.
    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    /// Load a jar from a file of assignment lines. A missing file yields an empty jar.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::new());
        }
        let content = fs::read_to_string(path)?;
        let now = Utc::now();
        let mut jar = Self::new();
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            jar.assign_at(line, now)?;
        }
        Ok(jar)
    }

    /// Save the jar as assignment lines, creating parent directories as needed.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        let mut content = String::new();
        for cookie in &self.cookies {
            content.push_str(&cookie.to_assignment());
            content.push('\n');
        }
        fs::write(path, content)?;
        Ok(())
    }
}
