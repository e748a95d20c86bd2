//! Author index against a `HashMap` oracle.

use proptest::prelude::*;
use quarry::verify::check_author_index;
use quarry::{AuthorIndex, DocId};
use std::collections::HashMap;

proptest! {
    #[test]
    fn prop_author_index_matches_oracle(
        bucket_count in 1usize..64,
        inserts in prop::collection::vec(("[A-Z][a-z]{0,5}", 0u8..50), 0..200),
    ) {
        let mut index = AuthorIndex::new(bucket_count);
        let mut oracle: HashMap<String, Vec<DocId>> = HashMap::new();
        for (author, doc) in &inserts {
            let id = DocId::new(format!("d{}", doc));
            index.insert(author, id.clone());
            oracle.entry(author.clone()).or_default().push(id);
        }

        prop_assert!(check_author_index(&index).is_ok());
        prop_assert_eq!(index.unique_key_count(), oracle.len());
        for (author, ids) in &oracle {
            // The first id of a new author is kept.
            prop_assert_eq!(index.lookup(author), Some(ids.as_slice()));
        }
    }

    #[test]
    fn prop_remove_then_lookup_misses(
        authors in prop::collection::btree_set("[A-Z][a-z]{0,5}", 1..40),
    ) {
        let mut index = AuthorIndex::new(7);
        for (i, author) in authors.iter().enumerate() {
            index.insert(author, DocId::new(format!("d{}", i)));
        }
        let victim = authors.iter().next().unwrap();
        prop_assert!(index.remove(victim).is_some());
        prop_assert!(index.lookup(victim).is_none());
        prop_assert!(index.remove(victim).is_none());
        prop_assert_eq!(index.unique_key_count(), authors.len() - 1);
    }
}
