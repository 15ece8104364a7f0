//! Base / cost-center rule: the availability sheet's most frequent value wins

use std::collections::{BTreeMap, HashMap};

use crate::model::Plate;

/// Most frequent non-empty value; ties go to the value seen first
pub fn mode<S: AsRef<str>>(values: &[S]) -> Option<&str> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();
    for value in values.iter().map(AsRef::as_ref).filter(|v| !v.is_empty()) {
        let count = counts.entry(value).or_insert(0);
        if *count == 0 {
            order.push(value);
        }
        *count += 1;
    }

    let mut best: Option<(&str, usize)> = None;
    for value in order {
        let count = counts[value];
        if best.map_or(true, |(_, c)| count > c) {
            best = Some((value, count));
        }
    }
    best.map(|(value, _)| value)
}

/// Target value for every fleet plate whose current value disagrees with
/// the availability mode
///
/// Plates without availability values are never flagged. A missing current
/// value compares as the empty string.
pub fn reconcile_attribute(
    fleet_values: &BTreeMap<Plate, Option<String>>,
    availability_values: &BTreeMap<Plate, Vec<String>>,
) -> BTreeMap<Plate, String> {
    fleet_values
        .iter()
        .filter_map(|(plate, current)| {
            let target = mode(availability_values.get(plate)?.as_slice())?;
            let current = current.as_deref().unwrap_or("");
            (target != current).then(|| (plate.clone(), target.to_string()))
        })
        .collect()
}
