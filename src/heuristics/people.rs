//! Rules about people: nationality, place of birth, gender.

use crate::kb::KnowledgeBase;
use crate::symbol::SymbolId;

const PERSON_PLACE_BASE: f64 = 0.1;
const PERSON_PLACE_CAP: f64 = 0.9;

/// Whether any of `places` lies within `location`.
fn any_within(kb: &KnowledgeBase, places: &[SymbolId], location: SymbolId) -> bool {
    places
        .iter()
        .any(|&p| kb.location_ancestors(p).contains(&location))
}

/// `(person, nationality, country)`: supported by being born or having lived
/// somewhere inside the country.
pub fn nationality(subject: SymbolId, object: SymbolId, kb: &KnowledgeBase) -> f64 {
    if !kb.is_person(subject) || !kb.is_location(object) {
        return 0.0;
    }
    let v = kb.vocab();
    let mut score = PERSON_PLACE_BASE;
    if any_within(kb, kb.objects(subject, v.birth_place), object) {
        score += 0.4;
    }
    if any_within(kb, kb.objects(subject, v.lived_place), object) {
        score += 0.2;
    }
    score.min(PERSON_PLACE_CAP)
}

/// `(person, place_of_birth, place)`: supported by nationalities and lived
/// places that contain or lie within the proposed place.
pub fn place_of_birth(subject: SymbolId, object: SymbolId, kb: &KnowledgeBase) -> f64 {
    if !kb.is_person(subject) || !kb.is_location(object) {
        return 0.0;
    }
    let v = kb.vocab();
    let ancestors = kb.location_ancestors(object);
    let descendants = kb.location_descendants(object);

    let mut score = PERSON_PLACE_BASE;
    let nationalities = kb.objects(subject, v.nationality);
    if nationalities.iter().any(|n| ancestors.contains(n)) {
        score += 0.4;
    }
    if nationalities.iter().any(|n| descendants.contains(n)) {
        score += 0.1;
    }
    let lived = kb.objects(subject, v.lived_place);
    if lived.iter().any(|l| ancestors.contains(l)) {
        score += 0.2;
    }
    if lived.iter().any(|l| descendants.contains(l)) {
        score += 0.1;
    }
    score.min(PERSON_PLACE_CAP)
}

/// Partners of `person` through any partner relation, either direction,
/// sorted by id and deduplicated.
fn partners(kb: &KnowledgeBase, person: SymbolId) -> Vec<SymbolId> {
    let mut found: Vec<SymbolId> = kb
        .vocab()
        .partner_relations
        .iter()
        .flat_map(|&rel| {
            kb.objects(person, rel)
                .iter()
                .chain(kb.subjects(rel, person))
                .copied()
        })
        .filter(|&p| p != person)
        .collect();
    found.sort_unstable();
    found.dedup();
    found
}

/// `(person, gender, male|female)`.
///
/// Asserted genders decide outright. Otherwise the first partner (by id) with
/// an asserted gender suggests the opposite one. Otherwise any label of a
/// directly related object mentioning "female" is a weak hint.
pub fn gender(subject: SymbolId, object: SymbolId, kb: &KnowledgeBase) -> f64 {
    let v = kb.vocab();
    if !kb.is_person(subject) || (object != v.male && object != v.female) {
        return 0.0;
    }

    let asserted = kb.objects(subject, v.gender);
    if !asserted.is_empty() {
        return if asserted.contains(&object) { 1.0 } else { 0.0 };
    }

    let partner_gender = partners(kb, subject)
        .into_iter()
        .find_map(|p| kb.objects(p, v.gender).first().copied());
    if let Some(theirs) = partner_gender {
        return if theirs != object { 0.95 } else { 0.05 };
    }

    let hinted_female = kb
        .reference()
        .objects(subject, None)
        .iter()
        .any(|&related| kb.label_mentions(related, "female"));
    if hinted_female {
        return if object == v.female { 0.9 } else { 0.1 };
    }

    0.5
}
