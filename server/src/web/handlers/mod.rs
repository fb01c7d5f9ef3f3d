// server/src/web/handlers/mod.rs

pub mod auth_handlers;
pub mod barang_handlers;
pub mod kategori_handlers;
pub mod ruangan_handlers;
pub mod user_handlers;

/// A required text field counts as filled only when present and non-empty.
pub(crate) fn filled(field: &Option<String>) -> bool {
  field.as_deref().is_some_and(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn filled_rejects_missing_and_empty() {
    assert!(!filled(&None));
    assert!(!filled(&Some(String::new())));
    assert!(filled(&Some("Lab A".to_string())));
  }
}
