#![no_main]

use avltree::AvlTree;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|inserts_removals: (Vec<u16>, Vec<u16>)| {
    let mut tree: AvlTree<u16> = AvlTree::new();

    for i in inserts_removals.0 {
        tree.insert(i);
        tree.assert_valid();
    }

    for i in inserts_removals.1 {
        tree.remove(&i);
        tree.assert_valid();
    }
});
