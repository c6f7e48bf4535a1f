use serde::{Deserialize, Serialize};

use super::fields::user;
use crate::glpi::RawRecord;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedUser {
    pub id: String,
    pub nome: String,
    pub sobrenome: String,
    pub titulo: String,
    pub email: String,
    pub telefone: String,
    pub setor: String,
    pub status: String,
}

impl FormattedUser {
    pub fn from_raw(raw: &RawRecord) -> Self {
        Self {
            id: raw.text(user::ID),
            nome: raw.text(user::NOME),
            sobrenome: raw.text(user::SOBRENOME),
            titulo: raw.text(user::TITULO),
            email: raw.text(user::EMAIL),
            telefone: raw.text(user::TELEFONE),
            setor: raw.text(user::SETOR),
            status: raw.text(user::STATUS),
        }
    }

    /// Users without a name, surname or email are not listed
    pub fn is_complete(&self) -> bool {
        !self.nome.is_empty() && !self.sobrenome.is_empty() && !self.email.is_empty()
    }
}

/// Project, filter and order raw user records.
///
/// Pure; an empty result means no record survived the completeness filter.
pub fn format_users(raw: &[RawRecord]) -> Vec<FormattedUser> {
    let mut users: Vec<FormattedUser> = raw
        .iter()
        .map(FormattedUser::from_raw)
        .filter(FormattedUser::is_complete)
        .collect();

    // Stable: equal names keep their upstream order
    users.sort_by_cached_key(|u| u.nome.to_lowercase());
    users
}
