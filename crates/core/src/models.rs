use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnNull};
use std::collections::BTreeMap;

/// Selector value that matches every item.
pub const FILTER_ALL: &str = "All";
pub const DEFAULT_MIN_LEVEL: i32 = 0;
pub const DEFAULT_MAX_LEVEL: i32 = 40;
pub const ITEMS_PER_PAGE: usize = 100;

/// One item as stored in a snapshot file, plus the owner name injected during normalization.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Item {
    #[serde_as(as = "DefaultOnNull")]
    pub owner_id: i64,
    #[serde_as(as = "DefaultOnNull")]
    pub character_name: String,
    #[serde_as(as = "DefaultOnNull")]
    pub item_id: i64,
    #[serde_as(as = "DefaultOnNull")]
    pub container: String,
    #[serde_as(as = "DefaultOnNull")]
    pub tab: i32,
    #[serde_as(as = "DefaultOnNull")]
    pub tab_name: String,
    #[serde_as(as = "DefaultOnNull")]
    pub row: i32,
    #[serde_as(as = "DefaultOnNull")]
    pub column: i32,
    #[serde_as(as = "DefaultOnNull")]
    pub quantity: i32,
    #[serde_as(as = "DefaultOnNull")]
    pub weenie_id: i64,
    #[serde_as(as = "DefaultOnNull")]
    pub charges: i32,
    #[serde_as(as = "DefaultOnNull")]
    pub max_charges: i32,
    #[serde_as(as = "DefaultOnNull")]
    pub treasure_type: String,
    #[serde_as(as = "DefaultOnNull")]
    pub name: String,
    #[serde_as(as = "DefaultOnNull")]
    pub description: String,
    #[serde_as(as = "DefaultOnNull")]
    pub minimum_level: i32,
    #[serde_as(as = "DefaultOnNull")]
    pub binding: String,
    #[serde_as(as = "DefaultOnNull")]
    pub item_type: String,
    #[serde_as(as = "DefaultOnNull")]
    pub base_value_copper: i64,
    #[serde_as(as = "DefaultOnNull")]
    pub hardness: i64,
    #[serde_as(as = "DefaultOnNull")]
    pub equips_to_flags: i64,
    #[serde_as(as = "DefaultOnNull")]
    pub equips_to: Vec<String>,
    #[serde_as(as = "DefaultOnNull")]
    pub icon_source: String,
    pub clicky: Option<Clicky>,
    #[serde_as(as = "DefaultOnNull")]
    pub augment_slots: Vec<AugmentSlot>,
    #[serde_as(as = "DefaultOnNull")]
    pub proficiency: String,
    #[serde_as(as = "DefaultOnNull")]
    pub weapon_type: String,
    #[serde_as(as = "DefaultOnNull")]
    pub item_sub_type: String,
    #[serde_as(as = "DefaultOnNull")]
    pub armor_type: String,
    #[serde_as(as = "DefaultOnNull")]
    pub effects: Vec<Effect>,
    #[serde_as(as = "DefaultOnNull")]
    pub hover: String,
    #[serde_as(as = "DefaultOnNull")]
    pub set_bonus1_name: String,
    #[serde_as(as = "DefaultOnNull")]
    pub set_bonus1_description: Vec<String>,
    #[serde_as(as = "DefaultOnNull")]
    pub minor_artifact: bool,
}

/// Triggerable spell attached to an item.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Clicky {
    #[serde_as(as = "DefaultOnNull")]
    pub spell_name: String,
    #[serde_as(as = "DefaultOnNull")]
    pub spell_description: String,
    #[serde_as(as = "DefaultOnNull")]
    pub caster_level: i32,
    #[serde_as(as = "DefaultOnNull")]
    pub valid_targets: Vec<String>,
}

#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct AugmentSlot {
    #[serde_as(as = "DefaultOnNull")]
    pub name: String,
    #[serde_as(as = "DefaultOnNull")]
    pub color: String,
}

#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Effect {
    #[serde_as(as = "DefaultOnNull")]
    pub name: String,
    #[serde_as(as = "DefaultOnNull")]
    pub description: String,
}

/// Bank root. Tabs and pages are keyed by arbitrary string indices; their order carries no meaning.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Bank {
    #[serde_as(as = "DefaultOnNull")]
    pub bank_type: i32,
    #[serde_as(as = "DefaultOnNull<BTreeMap<_, DefaultOnNull>>")]
    pub tabs: BTreeMap<String, Tab>,
}

#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Tab {
    #[serde_as(as = "DefaultOnNull")]
    pub id: i32,
    #[serde_as(as = "DefaultOnNull")]
    pub name: String,
    #[serde_as(as = "DefaultOnNull")]
    pub index: i32,
    #[serde_as(as = "DefaultOnNull<BTreeMap<_, DefaultOnNull>>")]
    pub pages: BTreeMap<String, Page>,
}

#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Page {
    #[serde_as(as = "DefaultOnNull<Vec<DefaultOnNull>>")]
    pub items: Vec<Item>,
}

/// Snapshot of a single character: personal bank, reincarnation bank and carried inventory.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct CharacterData {
    #[serde_as(as = "DefaultOnNull")]
    pub character_id: i64,
    #[serde_as(as = "DefaultOnNull")]
    pub name: String,
    pub last_updated: Option<DateTime<Utc>>,
    pub personal_bank: Option<Bank>,
    pub reincarnation_bank: Option<Bank>,
    #[serde_as(as = "DefaultOnNull<Vec<DefaultOnNull>>")]
    pub inventory: Vec<Item>,
    #[serde_as(as = "DefaultOnNull")]
    pub server: String,
    #[serde_as(as = "DefaultOnNull")]
    pub subscription_key_hash: String,
    pub subscription_alias: Option<String>,
    #[serde_as(as = "DefaultOnNull")]
    pub used_capacity: i32,
    #[serde_as(as = "DefaultOnNull")]
    pub max_capacity: i32,
}

/// Account-wide storage shared by every character on a subscription.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct AccountData {
    pub shared_bank: Option<Bank>,
    pub crafting_bank: Option<Bank>,
    #[serde_as(as = "DefaultOnNull")]
    pub server: String,
    #[serde_as(as = "DefaultOnNull")]
    pub subscription_key_hash: String,
    pub subscription_alias: Option<String>,
    #[serde_as(as = "DefaultOnNull")]
    pub used_capacity: i32,
    #[serde_as(as = "DefaultOnNull")]
    pub max_capacity: i32,
}

/// Maps the wildcard spellings (`All` and the empty string) to an unrestricted selector.
/// Any other value is matched exactly.
pub fn selector(value: &str) -> Option<String> {
    if value.is_empty() || value == FILTER_ALL {
        None
    } else {
        Some(value.to_string())
    }
}

/// Predicate set evaluated by [`crate::filter_items`]. `None` selectors are unrestricted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ItemFilter {
    pub item_type: Option<String>,
    pub item_sub_type: Option<String>,
    pub character_name: Option<String>,
    pub equips_to: Option<String>,
    pub text: String,
    pub min_level: i32,
    pub max_level: i32,
}

impl Default for ItemFilter {
    fn default() -> Self {
        Self {
            item_type: None,
            item_sub_type: None,
            character_name: None,
            equips_to: None,
            text: String::new(),
            min_level: DEFAULT_MIN_LEVEL,
            max_level: DEFAULT_MAX_LEVEL,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ResultPage<'a> {
    pub items: Vec<&'a Item>,
    pub page: usize,
    pub total_pages: usize,
    pub total_count: usize,
}
