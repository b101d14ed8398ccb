use rust_decimal::Decimal;

/// Per-category monthly limits, in the order the user arranged them.
/// Always replaced wholesale, never merged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct BudgetMap {
    entries: Vec<(String, Decimal)>,
}

impl BudgetMap {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn defaults() -> Self {
        [
            ("Food & Drinks", Decimal::new(200, 0)),
            ("Transport", Decimal::new(100, 0)),
            ("Utilities", Decimal::new(50, 0)),
            ("Study Materials", Decimal::new(70, 0)),
            ("Entertainment", Decimal::new(50, 0)),
            ("Others", Decimal::new(30, 0)),
        ]
        .into_iter()
        .map(|(name, limit)| (name.to_string(), limit))
        .collect()
    }

    /// Set the limit for `name`. An existing entry keeps its position.
    pub(crate) fn insert(&mut self, name: String, limit: Decimal) {
        if let Some(entry) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            entry.1 = limit;
        } else {
            self.entries.push((name, limit));
        }
    }

    pub(crate) fn get(&self, name: &str) -> Option<Decimal> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, limit)| *limit)
    }

    pub(crate) fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.entries.iter().map(|(n, limit)| (n.as_str(), *limit))
    }

    pub(crate) fn categories(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all category limits, saturating. Independent of the total budget.
    pub(crate) fn total(&self) -> Decimal {
        self.entries
            .iter()
            .fold(Decimal::ZERO, |sum, (_, limit)| sum.saturating_add(*limit))
    }
}

impl FromIterator<(String, Decimal)> for BudgetMap {
    fn from_iter<I: IntoIterator<Item = (String, Decimal)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (name, limit) in iter {
            map.insert(name, limit);
        }
        map
    }
}
