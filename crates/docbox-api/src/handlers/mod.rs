//! HTTP route handlers.

pub mod arquivos;
pub mod cadastro;
pub mod download;
pub mod empresas;
pub mod health;
pub mod login;
pub mod paginas;
pub mod upload;
