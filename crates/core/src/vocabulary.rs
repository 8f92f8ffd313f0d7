use crate::Item;
use serde::Serialize;
use std::collections::BTreeSet;

/// Sorted, de-duplicated filter options derived from a dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Vocabularies {
    pub item_types: Vec<String>,
    pub item_sub_types: Vec<String>,
    pub character_names: Vec<String>,
    pub equips_to: Vec<String>,
}

impl Vocabularies {
    pub fn from_items(items: &[Item]) -> Self {
        Self {
            item_types: distinct(items.iter().map(|item| item.item_type.as_str())),
            item_sub_types: distinct(items.iter().map(|item| item.item_sub_type.as_str())),
            character_names: distinct(items.iter().map(|item| item.character_name.as_str())),
            equips_to: distinct(
                items
                    .iter()
                    .flat_map(|item| item.equips_to.iter().map(String::as_str)),
            ),
        }
    }
}

// Blank values never become a filter option.
fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .filter(|value| !value.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::Vocabularies;
    use crate::Item;

    fn item(item_type: &str, sub_type: &str, character: &str, slots: &[&str]) -> Item {
        Item {
            item_type: item_type.to_string(),
            item_sub_type: sub_type.to_string(),
            character_name: character.to_string(),
            equips_to: slots.iter().map(|slot| slot.to_string()).collect(),
            ..Item::default()
        }
    }

    #[test]
    fn lists_are_sorted_distinct_and_skip_blanks() {
        let items = vec![
            item("Weapon", "Sword", "CharA", &["Hand", "Finger"]),
            item("Weapon", "Axe", "CharB", &["Hand"]),
            item("Armor", "", "", &["Body", ""]),
            item("", "", "CharA", &[]),
        ];

        let vocabularies = Vocabularies::from_items(&items);

        assert_eq!(vocabularies.item_types, vec!["Armor", "Weapon"]);
        assert_eq!(vocabularies.item_sub_types, vec!["Axe", "Sword"]);
        assert_eq!(vocabularies.character_names, vec!["CharA", "CharB"]);
        assert_eq!(vocabularies.equips_to, vec!["Body", "Finger", "Hand"]);
    }

    #[test]
    fn ordering_is_ordinal() {
        let items = vec![item("weapon", "", "", &[]), item("Weapon", "", "", &[])];
        assert_eq!(
            Vocabularies::from_items(&items).item_types,
            vec!["Weapon", "weapon"]
        );
    }

    #[test]
    fn extraction_is_idempotent() {
        let items = vec![
            item("Weapon", "Sword", "CharA", &["Hand"]),
            item("Armor", "Heavy", "CharB", &["Body"]),
        ];
        assert_eq!(Vocabularies::from_items(&items), Vocabularies::from_items(&items));
    }
}
