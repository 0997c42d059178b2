//! Prints the bcrypt hash of a password, for seeding `ADMIN_SENHA_HASH`.
//!
//! Usage: `gera-hash <senha>`

use std::env;
use std::process::ExitCode;

const COST: u32 = 10;

fn main() -> ExitCode {
    let Some(senha) = env::args().nth(1) else {
        eprintln!("uso: gera-hash <senha>");
        return ExitCode::from(2);
    };

    match docbox_core::password::hash(&senha, COST) {
        Ok(hash) => {
            println!("{}", hash);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("erro ao gerar hash: {}", e);
            ExitCode::FAILURE
        }
    }
}
