//! Rules about locations: containment and time zones.

use std::collections::BTreeSet;

use crate::kb::KnowledgeBase;
use crate::symbol::SymbolId;

/// `(location, contains, place)`.
pub fn location_contains(subject: SymbolId, object: SymbolId, kb: &KnowledgeBase) -> f64 {
    if !kb.is_location(subject) {
        return 0.0;
    }
    if kb.location_ancestors(object).contains(&subject) {
        return 1.0;
    }
    if kb.is_location(object) { 0.1 } else { 0.05 }
}

/// `(location, time_zones, zone)`: agreement with the zones of places inside
/// the location weighs heavily, places around it lightly.
pub fn time_zone(subject: SymbolId, object: SymbolId, kb: &KnowledgeBase) -> f64 {
    let v = kb.vocab();
    if !kb.is_location(subject) || !kb.has_type(object, v.time_zone_class) {
        return 0.0;
    }

    let vote = |places: &BTreeSet<SymbolId>, agree: f64, disagree: f64| -> f64 {
        places
            .iter()
            .map(|&place| kb.objects(place, v.time_zones))
            .filter(|zones| !zones.is_empty())
            .map(|zones| if zones.contains(&object) { agree } else { disagree })
            .sum()
    };

    let descendants = kb.location_descendants(subject);
    let ancestors = kb.location_ancestors(subject);
    let score =
        0.1 + vote(descendants.as_ref(), 0.8, -0.4) + vote(ancestors.as_ref(), 0.1, -0.05);
    score.clamp(0.0, 1.0)
}
