//! Session credential.

use std::fmt;

/// Cookie-derived proof of an authenticated panel session.
///
/// Holds the `name=value` pairs joined by `; `, ready to be sent as a
/// `Cookie` header. A credential is either complete or absent: an empty
/// cookie list or any malformed pair produces no credential at all.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionCredential {
    header: String,
    names: Vec<String>,
}

impl SessionCredential {
    /// Builds a credential from `(name, value)` pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Option<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut names = Vec::new();
        let mut rendered = Vec::new();

        for (name, value) in pairs {
            let name = name.as_ref().trim();
            if name.is_empty() || name.contains(['=', ';']) {
                return None;
            }
            rendered.push(format!("{}={}", name, value.as_ref().trim()));
            names.push(name.to_string());
        }

        if names.is_empty() {
            return None;
        }

        Some(Self {
            header: rendered.join("; "),
            names,
        })
    }

    /// Parses a `Cookie` header rendering (`a=1; b=2`).
    pub fn from_cookie_header(header: &str) -> Option<Self> {
        let mut pairs = Vec::new();
        for part in header.split(';') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            pairs.push(part.split_once('=')?);
        }
        Self::from_pairs(pairs)
    }

    /// Value for the `Cookie` request header.
    pub fn header_value(&self) -> &str {
        &self.header
    }

    /// Number of cookies in the credential.
    pub fn cookie_count(&self) -> usize {
        self.names.len()
    }

    /// Cookie names, in order.
    pub fn cookie_names(&self) -> &[String] {
        &self.names
    }
}

impl fmt::Debug for SessionCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionCredential")
            .field("cookies", &self.names)
            .finish_non_exhaustive()
    }
}
