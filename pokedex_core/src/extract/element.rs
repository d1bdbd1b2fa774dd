use super::find_word;
use crate::knowledge::ElementalType;

/// Earliest byte offset at which `element` is mentioned, in either locale.
#[must_use]
pub fn first_position(text: &str, element: ElementalType) -> Option<usize> {
    let korean = text.find(element.korean_name());
    let english = find_word(text, element.key(), true);
    match (korean, english) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}

/// Every distinct type mentioned, in enumeration order.
#[must_use]
pub fn find_all_types(text: &str) -> Vec<ElementalType> {
    ElementalType::ALL
        .into_iter()
        .filter(|&t| first_position(text, t).is_some())
        .collect()
}

/// First mentioned type in enumeration order.
#[must_use]
pub fn find_type(text: &str) -> Option<ElementalType> {
    ElementalType::ALL
        .into_iter()
        .find(|&t| first_position(text, t).is_some())
}

#[must_use]
pub fn find_second_type(text: &str) -> Option<ElementalType> {
    find_all_types(text).get(1).copied()
}

/// The first two types in enumeration order, returned attacker first: the
/// one mentioned earlier in the text leads.
#[must_use]
pub fn type_pair(text: &str) -> Option<(ElementalType, ElementalType)> {
    let first = find_type(text)?;
    let second = find_second_type(text)?;
    let at = |t| first_position(text, t).unwrap_or(usize::MAX);
    if at(second) < at(first) {
        Some((second, first))
    } else {
        Some((first, second))
    }
}
