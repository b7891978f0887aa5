//! Admin credential row and the local login session.

use super::{Record, Table, required};
use crate::errors::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The shared admin login. Stored and compared as plaintext.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminCredentials {
    #[allow(missing_docs)]
    pub username: String,
    #[allow(missing_docs)]
    pub password: String,
    /// Last credential change
    pub updated_at: DateTime<Utc>,
}

impl Record for AdminCredentials {
    const TABLE: Table = Table::AdminCredentials;

    fn validate(&self) -> Result<()> {
        required("Username", &self.username)?;
        required("Password", &self.password)
    }
}

/// Who is logged in to the back-office, kept in the local store
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminSession {
    #[allow(missing_docs)]
    pub username: String,
    /// When the login happened
    #[serde(rename = "loginTime")]
    pub login_time: DateTime<Utc>,
}
