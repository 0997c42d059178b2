//! Domain models shared across components.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Empresa (tenant) entity.
///
/// Deliberately not `Serialize`: rows carry the password hash and must never
/// reach a response body whole. API responses use [`EmpresaSummary`].
#[derive(Debug, Clone)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Empresa {
    pub id: i64,
    pub nome: String,
    /// Business-registration number; also the tenant's storage namespace key.
    pub cnpj: String,
    /// Free-text stall/location tag inside the market.
    #[cfg_attr(feature = "sqlx", sqlx(rename = "box"))]
    pub r#box: Option<String>,
    pub email: String,
    pub senha_hash: String,
}

/// Company summary for admin listings: no password hash, no login email.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct EmpresaSummary {
    pub id: i64,
    pub nome: String,
    pub cnpj: String,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "box"))]
    pub r#box: Option<String>,
}

/// File metadata row. `caminho` is the object-storage key and always starts
/// with the owning company's cnpj prefix.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Arquivo {
    pub id: i64,
    pub empresa_id: i64,
    pub nome: String,
    pub caminho: String,
    pub data_upload: NaiveDateTime,
}

/// Caller identity, resolved once per request by the access gate and
/// consumed everywhere else. Role checks go through [`Identity::is_admin`];
/// nothing else inspects how admin identity is materialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    Anonymous,
    Empresa { empresa_id: i64, cnpj: String },
    Admin,
}

impl Identity {
    pub fn is_admin(&self) -> bool {
        matches!(self, Identity::Admin)
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self, Identity::Anonymous)
    }

    /// The tenant id this identity is scoped to, if any.
    pub fn empresa_id(&self) -> Option<i64> {
        match self {
            Identity::Empresa { empresa_id, .. } => Some(*empresa_id),
            _ => None,
        }
    }
}
