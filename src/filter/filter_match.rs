use std::cmp::Ordering;

use crate::database::models::Advocate;

use super::types::SearchTerm;

/// In-process twin of the SQL search predicate: case-insensitive substring
/// match against names, city, degree, any specialty, or years of experience.
pub fn matches(advocate: &Advocate, term: &SearchTerm) -> bool {
    let needle = term.folded();
    let hit = |value: &str| value.to_lowercase().contains(needle);

    hit(&advocate.first_name)
        || hit(&advocate.last_name)
        || hit(&advocate.city)
        || hit(&advocate.degree)
        || advocate.specialties.iter().any(|label| hit(label))
        || advocate.years_of_experience.to_string().contains(needle)
}

/// Same ordering as `created_at DESC, id DESC`.
pub fn newest_first(a: &Advocate, b: &Advocate) -> Ordering {
    b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id))
}
