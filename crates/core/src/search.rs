use crate::{Item, ItemFilter, ResultPage, ITEMS_PER_PAGE};

/// Applies the structural predicates of `filter`, then ranks text matches.
///
/// Name matches come first, followed by items whose description, effects or clicky spell
/// matched. Each tier is sorted by item name with a stable sort.
pub fn filter_items<'a>(items: &'a [Item], filter: &ItemFilter) -> Vec<&'a Item> {
    let needle = filter.text.to_lowercase();
    let mut name_matches = Vec::new();
    let mut secondary_matches = Vec::new();

    for item in items.iter().filter(|item| matches_structure(item, filter)) {
        if needle.is_empty() || contains(&item.name, &needle) {
            name_matches.push(item);
        } else if matches_secondary(item, &needle) {
            secondary_matches.push(item);
        }
    }

    name_matches.sort_by(|left, right| left.name.cmp(&right.name));
    secondary_matches.sort_by(|left, right| left.name.cmp(&right.name));

    name_matches.extend(secondary_matches);
    name_matches
}

fn matches_structure(item: &Item, filter: &ItemFilter) -> bool {
    selects(&filter.item_type, &item.item_type)
        && selects(&filter.item_sub_type, &item.item_sub_type)
        && selects(&filter.character_name, &item.character_name)
        && (filter.min_level..=filter.max_level).contains(&item.minimum_level)
        && filter
            .equips_to
            .as_ref()
            .map_or(true, |slot| item.equips_to.iter().any(|value| value == slot))
}

fn selects(selector: &Option<String>, value: &str) -> bool {
    selector.as_deref().map_or(true, |wanted| wanted == value)
}

fn matches_secondary(item: &Item, needle: &str) -> bool {
    contains(&item.description, needle)
        || item
            .effects
            .iter()
            .any(|effect| contains(&effect.name, needle) || contains(&effect.description, needle))
        || item.clicky.as_ref().is_some_and(|clicky| {
            contains(&clicky.spell_name, needle) || contains(&clicky.spell_description, needle)
        })
}

fn contains(haystack: &str, lowered_needle: &str) -> bool {
    haystack.to_lowercase().contains(lowered_needle)
}

/// Slices one page out of a filtered result. Pages are 1-based; a page past the end
/// falls back to the first page.
pub fn paginate<'a>(items: &[&'a Item], page: usize, per_page: usize) -> ResultPage<'a> {
    let per_page = if per_page == 0 { ITEMS_PER_PAGE } else { per_page };
    let total_count = items.len();
    let total_pages = total_count.div_ceil(per_page).max(1);

    let mut page = page.max(1);
    let mut start = (page - 1).saturating_mul(per_page);
    if start >= total_count {
        page = 1;
        start = 0;
    }
    let end = start.saturating_add(per_page).min(total_count);

    ResultPage {
        items: items[start..end].to_vec(),
        page,
        total_pages,
        total_count,
    }
}
