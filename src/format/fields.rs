// GLPI search option IDs, fixed by the remote schema

pub mod user {
    pub const ID: &str = "1";
    pub const NOME: &str = "9";
    pub const SOBRENOME: &str = "34";
    pub const TITULO: &str = "81";
    pub const EMAIL: &str = "5";
    pub const TELEFONE: &str = "11";
    pub const SETOR: &str = "13";
    pub const STATUS: &str = "8";
}

pub mod ticket {
    /// Record identifier, not a search option
    pub const ID: &str = "id";
    pub const TITULO: &str = "1";
    pub const AUTOR: &str = "4";
    pub const GRUPO_RESPONSAVEL: &str = "8";
    pub const STATUS: &str = "12";
    pub const DATA_CRIACAO: &str = "19";
}
