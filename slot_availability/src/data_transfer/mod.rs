use std::collections::BTreeMap;

pub mod raw;

/// A slot in the shape the report works with, whichever endpoint it came
/// from. Fields the day endpoint does not provide are `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalSlot {
    pub site_name: String,
    pub pincode: u32,
    pub vaccine: String,
    pub fee_type: Option<String>,
    pub available_capacity: u32,
    pub available_capacity_dose1: Option<u32>,
    pub address: Option<String>,
    pub date: String,
}

/// Slots keyed by their `DD-MM-YYYY` date, iterated in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatedSlots(Vec<(String, Vec<CanonicalSlot>)>);

impl DatedSlots {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `slot` to the sequence for `date`, opening a new date at the
    /// end if it was not seen yet.
    pub fn push(&mut self, date: &str, slot: CanonicalSlot) {
        match self.position(date) {
            Some(index) => self.0[index].1.push(slot),
            None => self.0.push((date.to_owned(), vec![slot])),
        }
    }

    /// Sets the slots for `date`. An existing date keeps its position and
    /// loses its previous slots.
    pub fn insert(&mut self, date: String, slots: Vec<CanonicalSlot>) {
        match self.position(&date) {
            Some(index) => self.0[index].1 = slots,
            None => self.0.push((date, slots)),
        }
    }

    pub fn get(&self, date: &str) -> Option<&[CanonicalSlot]> {
        self.position(date).map(|index| self.0[index].1.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[CanonicalSlot])> {
        self.0
            .iter()
            .map(|(date, slots)| (date.as_str(), slots.as_slice()))
    }

    pub fn dates(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(date, _)| date.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn slot_count(&self) -> usize {
        self.0.iter().map(|(_, slots)| slots.len()).sum()
    }

    fn position(&self, date: &str) -> Option<usize> {
        self.0.iter().position(|(existing, _)| existing == date)
    }
}

impl IntoIterator for DatedSlots {
    type Item = (String, Vec<CanonicalSlot>);
    type IntoIter = std::vec::IntoIter<(String, Vec<CanonicalSlot>)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Everything a week run found, per sub-region name. Sub-regions iterate in
/// lexical order of their names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregatedResult(BTreeMap<String, DatedSlots>);

impl AggregatedResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes sure `sub_region_name` is listed, even if nothing is found for it.
    pub fn register(&mut self, sub_region_name: &str) {
        self.0.entry(sub_region_name.to_owned()).or_default();
    }

    /// Folds one query's slots into the sub-region. A date that is already
    /// present is replaced, not extended.
    pub fn merge(&mut self, sub_region_name: &str, slots: DatedSlots) {
        let entry = self.0.entry(sub_region_name.to_owned()).or_default();
        for (date, slots) in slots {
            entry.insert(date, slots);
        }
    }

    pub fn get(&self, sub_region_name: &str) -> Option<&DatedSlots> {
        self.0.get(sub_region_name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DatedSlots)> {
        self.0.iter().map(|(name, slots)| (name.as_str(), slots))
    }

    pub fn sub_region_count(&self) -> usize {
        self.0.len()
    }

    pub fn slot_count(&self) -> usize {
        self.0.values().map(DatedSlots::slot_count).sum()
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::slot;
    use super::{AggregatedResult, DatedSlots};

    #[test]
    fn test_push_groups_by_date_in_first_seen_order() {
        let mut dated = DatedSlots::new();
        dated.push("08-05-2021", slot("A", "08-05-2021"));
        dated.push("01-05-2021", slot("B", "01-05-2021"));
        dated.push("08-05-2021", slot("C", "08-05-2021"));

        assert_eq!(dated.dates().collect::<Vec<_>>(), vec!["08-05-2021", "01-05-2021"]);
        let names = dated
            .get("08-05-2021")
            .unwrap()
            .iter()
            .map(|slot| slot.site_name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["A", "C"]);
        assert_eq!(dated.slot_count(), 3);
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut dated = DatedSlots::new();
        dated.push("01-05-2021", slot("A", "01-05-2021"));
        dated.push("02-05-2021", slot("B", "02-05-2021"));
        dated.insert("01-05-2021".to_string(), vec![slot("Z", "01-05-2021")]);

        assert_eq!(dated.dates().collect::<Vec<_>>(), vec!["01-05-2021", "02-05-2021"]);
        assert_eq!(dated.get("01-05-2021").unwrap(), &[slot("Z", "01-05-2021")]);
    }

    #[test]
    fn test_aggregated_result_lists_sub_regions_lexically() {
        let mut result = AggregatedResult::new();
        result.register("South Delhi");
        let mut dated = DatedSlots::new();
        dated.push("01-05-2021", slot("A", "01-05-2021"));
        result.merge("Central Delhi", dated);

        let names = result.iter().map(|(name, _)| name).collect::<Vec<_>>();
        assert_eq!(names, vec!["Central Delhi", "South Delhi"]);
        assert!(result.get("South Delhi").unwrap().is_empty());
        assert_eq!(result.slot_count(), 1);
    }
}
