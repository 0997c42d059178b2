//! Domain validation helpers.
//!
//! Request DTOs carry their own field-level rules; these helpers hold the
//! checks shared between the API boundary and the storage key layer.

use crate::error::AppError;

/// Placeholder object written at registration so an empty namespace exists in
/// the object store. Reserved: never a valid display name, never listed.
pub const KEEP_MARKER: &str = ".keep";

pub const MAX_DISPLAY_NAME_LENGTH: usize = 255;

/// Validate a file display name before it becomes a storage-key segment.
///
/// Names containing path separators or `..` would escape the tenant's
/// namespace prefix and are rejected outright rather than sanitized.
pub fn validate_display_name(nome: &str) -> Result<(), AppError> {
    if nome.is_empty() {
        return Err(AppError::Validation("Nome de arquivo vazio".to_string()));
    }
    if nome.len() > MAX_DISPLAY_NAME_LENGTH {
        return Err(AppError::Validation(format!(
            "Nome de arquivo excede {} caracteres",
            MAX_DISPLAY_NAME_LENGTH
        )));
    }
    if nome.contains('/') || nome.contains('\\') || nome.contains('\0') {
        return Err(AppError::Validation(
            "Nome de arquivo contém caracteres inválidos".to_string(),
        ));
    }
    if nome == "." || nome == ".." || nome == KEEP_MARKER {
        return Err(AppError::Validation(format!(
            "Nome de arquivo reservado: {}",
            nome
        )));
    }
    Ok(())
}

/// Normalize a CNPJ to its 14-digit canonical form.
///
/// Accepts the formatted variant (`12.345.678/0001-99`) and strips the
/// punctuation: the stored value doubles as the storage namespace prefix, so
/// it must be a single path segment.
pub fn normalize_cnpj(cnpj: &str) -> Result<String, AppError> {
    let digits: String = cnpj
        .chars()
        .filter(|c| !matches!(c, '.' | '/' | '-' | ' '))
        .collect();

    if digits.len() != 14 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(AppError::Validation("CNPJ inválido".to_string()));
    }
    Ok(digits)
}

/// Month filter: zero-padded two-digit string, `01` through `12`.
pub fn validate_mes(mes: &str) -> Result<(), AppError> {
    let ok = mes.len() == 2
        && mes.chars().all(|c| c.is_ascii_digit())
        && matches!(mes.parse::<u8>(), Ok(1..=12));
    if ok {
        Ok(())
    } else {
        Err(AppError::Validation(
            "Parâmetro mes deve ter o formato MM".to_string(),
        ))
    }
}

/// Year filter: four-digit string.
pub fn validate_ano(ano: &str) -> Result<(), AppError> {
    if ano.len() == 4 && ano.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(AppError::Validation(
            "Parâmetro ano deve ter o formato AAAA".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_accepts_ordinary_pdf() {
        assert!(validate_display_name("nota-fiscal-marco.pdf").is_ok());
        assert!(validate_display_name("Relatório 2024.pdf").is_ok());
    }

    #[test]
    fn test_display_name_rejects_traversal() {
        assert!(validate_display_name("..").is_err());
        assert!(validate_display_name("a/b.pdf").is_err());
        assert!(validate_display_name("a\\b.pdf").is_err());
        assert!(validate_display_name("").is_err());
    }

    #[test]
    fn test_display_name_rejects_keep_marker() {
        assert!(validate_display_name(KEEP_MARKER).is_err());
    }

    #[test]
    fn test_normalize_cnpj() {
        assert_eq!(
            normalize_cnpj("12.345.678/0001-99").unwrap(),
            "12345678000199"
        );
        assert_eq!(normalize_cnpj("12345678000199").unwrap(), "12345678000199");
        assert!(normalize_cnpj("123").is_err());
        assert!(normalize_cnpj("1234567800019x").is_err());
    }

    #[test]
    fn test_mes_shape() {
        assert!(validate_mes("03").is_ok());
        assert!(validate_mes("12").is_ok());
        assert!(validate_mes("3").is_err());
        assert!(validate_mes("13").is_err());
        assert!(validate_mes("00").is_err());
        assert!(validate_mes("ab").is_err());
    }

    #[test]
    fn test_ano_shape() {
        assert!(validate_ano("2024").is_ok());
        assert!(validate_ano("24").is_err());
        assert!(validate_ano("20x4").is_err());
    }
}
