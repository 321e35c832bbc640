//! Semantic alias matching over a full listing.

use idalias_directory::AliasListing;

/// Find the first alias in listing order whose `name` and `mount_accessor`
/// equal the target, additionally requiring `canonical_id` equality when that
/// criterion is supplied (the deletion path).
///
/// Returns the matched alias id, or `None` — no match is not an error. The
/// directory does not enforce `(name, mount_accessor)` uniqueness, so with
/// genuine duplicates the first entry in the server's `keys` order wins;
/// selection is deterministic per listing but the server defines no sort.
pub fn find_alias<'a>(
    listing: &'a AliasListing,
    name: &str,
    mount_accessor: &str,
    canonical_id: Option<&str>,
) -> Option<&'a str> {
    listing.iter_ordered().find_map(|(id, info)| {
        let matches = info.mount_accessor == mount_accessor
            && info.name == name
            && canonical_id.is_none_or(|cid| info.canonical_id == cid);
        matches.then_some(id)
    })
}
