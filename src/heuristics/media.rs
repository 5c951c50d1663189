//! Rules about music and film.

use crate::kb::KnowledgeBase;
use crate::symbol::SymbolId;

/// `(instrument, instrumentalists, person)`.
pub fn instrument(subject: SymbolId, object: SymbolId, kb: &KnowledgeBase) -> f64 {
    if !kb.is_instrument(subject) || !kb.is_person(object) {
        return 0.0;
    }
    let mut score = 0.1;
    if kb.is_musician(object) {
        score += 0.2;
    }
    f64::min(score, 0.9)
}

/// `(film, genre, genre)`: sequels and prequels tend to share a genre.
pub fn film_genre(subject: SymbolId, object: SymbolId, kb: &KnowledgeBase) -> f64 {
    let v = kb.vocab();
    if !kb.has_type(subject, v.film_class) || !kb.has_type(object, v.film_genre_class) {
        return 0.0;
    }
    let shared = [v.sequel, v.prequel]
        .iter()
        .flat_map(|&rel| kb.objects(subject, rel))
        .any(|&film| kb.objects(film, v.film_genre).contains(&object));
    if shared { 0.9 } else { 0.1 }
}
