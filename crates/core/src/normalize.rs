use crate::{AccountData, Bank, CharacterData, IngestError, Item};
use std::fs;
use std::path::Path;

pub const ACCOUNT_SHARED_BANK_OWNER: &str = "Account (Shared Bank)";
pub const ACCOUNT_CRAFTING_BANK_OWNER: &str = "Account (Crafting Bank)";

/// The two root shapes a snapshot file may have.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceDocument {
    Character(CharacterData),
    Account(AccountData),
}

impl CharacterData {
    /// True when the document names a character or carries any of its containers.
    pub fn has_payload(&self) -> bool {
        !self.name.is_empty()
            || self.personal_bank.is_some()
            || self.reincarnation_bank.is_some()
            || !self.inventory.is_empty()
    }
}

impl AccountData {
    pub fn has_payload(&self) -> bool {
        self.shared_bank.is_some() || self.crafting_bank.is_some()
    }
}

/// Decodes one file's bytes, preferring the character shape.
///
/// Every field of both shapes is optional, so an account file decodes cleanly as an empty
/// character. A shape is only accepted when its `has_payload` check passes.
pub fn decode_document(bytes: &[u8]) -> Option<SourceDocument> {
    if let Ok(character) = serde_json::from_slice::<CharacterData>(bytes) {
        if character.has_payload() {
            return Some(SourceDocument::Character(character));
        }
    }

    if let Ok(account) = serde_json::from_slice::<AccountData>(bytes) {
        if account.has_payload() {
            return Some(SourceDocument::Account(account));
        }
    }

    None
}

impl SourceDocument {
    /// Flattens the document into items, overwriting each item's owner name.
    pub fn into_items(self) -> Vec<Item> {
        let mut items = Vec::new();

        match self {
            SourceDocument::Character(character) => {
                let owner = character.name;
                extend_from_bank(&mut items, character.personal_bank, &owner);
                extend_from_bank(&mut items, character.reincarnation_bank, &owner);
                extend_with_owner(&mut items, character.inventory, &owner);
            }
            SourceDocument::Account(account) => {
                extend_from_bank(&mut items, account.shared_bank, ACCOUNT_SHARED_BANK_OWNER);
                extend_from_bank(&mut items, account.crafting_bank, ACCOUNT_CRAFTING_BANK_OWNER);
            }
        }

        items
    }
}

fn extend_from_bank(target: &mut Vec<Item>, bank: Option<Bank>, owner: &str) {
    let Some(bank) = bank else {
        return;
    };

    for tab in bank.tabs.into_values() {
        for page in tab.pages.into_values() {
            extend_with_owner(target, page.items, owner);
        }
    }
}

fn extend_with_owner(target: &mut Vec<Item>, source: Vec<Item>, owner: &str) {
    target.extend(source.into_iter().map(|mut item| {
        item.character_name = owner.to_string();
        item
    }));
}

pub fn normalize_bytes(bytes: &[u8]) -> Option<Vec<Item>> {
    decode_document(bytes).map(SourceDocument::into_items)
}

/// Reads and normalizes one snapshot file. Syntax errors are reported as `Json`,
/// well-formed files of neither shape as `UnrecognizedDocument`.
pub fn normalize_file(path: &Path) -> Result<Vec<Item>, IngestError> {
    let bytes = fs::read(path)?;
    if let Some(items) = normalize_bytes(&bytes) {
        return Ok(items);
    }

    serde_json::from_slice::<serde_json::Value>(&bytes)?;
    Err(IngestError::UnrecognizedDocument(path.display().to_string()))
}

#[cfg(test)]
mod tests {
    use super::{
        decode_document, normalize_bytes, normalize_file, SourceDocument,
        ACCOUNT_CRAFTING_BANK_OWNER, ACCOUNT_SHARED_BANK_OWNER,
    };
    use crate::{AccountData, CharacterData, IngestError};
    use std::fs;
    use tempfile::tempdir;

    const CHARACTER_JSON: &str = r#"{
        "Name": "Aria",
        "PersonalBank": {
            "Tabs": {
                "1": {"Name": "Gear", "Pages": {
                    "0": {"Items": [{"Name": "Greataxe", "CharacterName": "Stale"}]},
                    "1": {"Items": [{"Name": "Tower Shield"}, {"Name": "Bracers"}]}
                }},
                "0": {"Pages": {"0": {"Items": [{"Name": "Cloak"}]}}}
            }
        },
        "ReincarnationBank": {
            "Tabs": {"0": {"Pages": {"0": {"Items": [{"Name": "Heart of Wood"}]}}}}
        },
        "Inventory": [{"Name": "Potion"}, {"Name": "Scroll"}]
    }"#;

    const ACCOUNT_JSON: &str = r#"{
        "SharedBank": {
            "Tabs": {"0": {"Pages": {"0": {"Items": [
                {"Name": "Ring", "CharacterName": "Somebody"}
            ]}}}}
        },
        "CraftingBank": {
            "Tabs": {"0": {"Pages": {"0": {"Items": [{"Name": "Cannith Essence"}]}}}}
        }
    }"#;

    #[test]
    fn character_items_are_all_tagged_with_character_name() {
        let items = normalize_bytes(CHARACTER_JSON.as_bytes()).unwrap_or_default();

        assert_eq!(items.len(), 7);
        assert!(items.iter().all(|item| item.character_name == "Aria"));
    }

    #[test]
    fn inventory_follows_banks() {
        let items = normalize_bytes(CHARACTER_JSON.as_bytes()).unwrap_or_default();
        let names: Vec<&str> = items.iter().map(|item| item.name.as_str()).collect();

        assert_eq!(&names[5..], &["Potion", "Scroll"]);
        assert!(names[..5].contains(&"Heart of Wood"));
    }

    #[test]
    fn account_items_get_sentinel_owners() {
        let items = normalize_bytes(ACCOUNT_JSON.as_bytes()).unwrap_or_default();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "Ring");
        assert_eq!(items[0].character_name, ACCOUNT_SHARED_BANK_OWNER);
        assert_eq!(items[1].name, "Cannith Essence");
        assert_eq!(items[1].character_name, ACCOUNT_CRAFTING_BANK_OWNER);
    }

    #[test]
    fn account_document_is_not_mistaken_for_empty_character() {
        let parsed_as_character: CharacterData =
            serde_json::from_str(ACCOUNT_JSON).unwrap_or_default();
        assert!(!parsed_as_character.has_payload());

        assert!(matches!(
            decode_document(ACCOUNT_JSON.as_bytes()),
            Some(SourceDocument::Account(_))
        ));
    }

    #[test]
    fn character_with_only_a_name_is_accepted() {
        let document = decode_document(br#"{"Name": "Lonely"}"#);
        assert!(matches!(document, Some(SourceDocument::Character(_))));
        assert_eq!(normalize_bytes(br#"{"Name": "Lonely"}"#), Some(Vec::new()));
    }

    #[test]
    fn empty_or_foreign_documents_are_rejected() {
        assert!(decode_document(b"{}").is_none());
        assert!(decode_document(br#"{"invalid": true}"#).is_none());
        assert!(decode_document(br#"{"invalid": true"#).is_none());
        assert!(decode_document(b"[1, 2, 3]").is_none());
        assert!(!AccountData::default().has_payload());
        assert!(!CharacterData::default().has_payload());
    }

    #[test]
    fn null_fields_do_not_drop_the_whole_file() {
        let character = normalize_bytes(
            br#"{"Name":"Aria","Inventory":[{"Name":"Potion","Charges":null},{"Name":"Sword"}]}"#,
        )
        .unwrap_or_default();
        assert_eq!(character.len(), 2);
        assert!(character.iter().all(|item| item.character_name == "Aria"));

        let account = normalize_bytes(
            br#"{"SharedBank":{"Tabs":{
                "0": null,
                "1": {"Pages": {"0": {"Items": [{"Name": "Ring", "MinorArtifact": null}]}}}
            }}}"#,
        )
        .unwrap_or_default();
        assert_eq!(account.len(), 1);
        assert_eq!(account[0].character_name, ACCOUNT_SHARED_BANK_OWNER);
    }

    #[test]
    fn null_banks_count_as_absent() {
        assert!(decode_document(br#"{"SharedBank": null, "CraftingBank": null}"#).is_none());
    }

    #[test]
    fn normalize_file_reports_offending_path() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let broken = dir.path().join("broken.json");
        fs::write(&broken, b"not json")?;
        assert!(matches!(normalize_file(&broken), Err(IngestError::Json(_))));

        let path = dir.path().join("foreign.json");
        fs::write(&path, br#"{"Something": "else"}"#)?;

        match normalize_file(&path) {
            Err(IngestError::UnrecognizedDocument(reported)) => {
                assert!(reported.ends_with("foreign.json"));
            }
            other => panic!("expected unrecognized document, got {other:?}"),
        }
        Ok(())
    }
}
