use uuid::Uuid;

/// Identifies entities that expose a stable unique identifier.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

/// Provides access to a human-friendly entity name.
pub trait NamedEntity {
    fn name(&self) -> &str;
}

/// Filters an entity slice with an explicit predicate.
///
/// Reverse relations (an account's transactions, a category's children) are
/// always derived through this kind of lookup rather than stored
/// back-pointers, so there is no bidirectional state to keep in sync.
pub fn query<'a, T, P>(items: &'a [T], predicate: P) -> Vec<&'a T>
where
    P: Fn(&T) -> bool,
{
    items.iter().filter(|item| predicate(item)).collect()
}

#[cfg(test)]
mod tests {
    use super::query;

    #[test]
    fn query_filters_by_predicate() {
        let values = [1, 2, 3, 4, 5];
        let odd = query(&values, |v| v % 2 == 1);
        assert_eq!(odd, vec![&1, &3, &5]);
    }
}
