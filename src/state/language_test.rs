use super::*;
use crate::session::MemoryStore;

#[test]
fn language_defaults_to_english() {
    assert_eq!(language_cell("l", MemoryStore::new()).get(), Some(Language::English));
}

#[test]
fn language_codes_round_trip() {
    for lang in Language::ALL {
        assert_eq!(Language::from_code(lang.code()), Some(lang));
    }
    assert_eq!(Language::from_code(" NB "), Some(Language::Norwegian));
    assert_eq!(Language::from_code("de"), None);
}

#[test]
fn language_persists_by_code() {
    let store = MemoryStore::new();
    let cell = language_cell("l", store.clone());
    cell.set_value(Some(Language::Norwegian)).unwrap();
    assert_eq!(store.get("l").as_deref(), Some("\"nb\""));
    assert_eq!(language_cell("l", store).get(), Some(Language::Norwegian));
}
