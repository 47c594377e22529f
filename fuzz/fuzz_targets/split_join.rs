#![no_main]

use avltree::AvlTree;
use libfuzzer_sys::arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Op {
    Insert(u16),
    Remove(u16),
    PopMin,
    PopMax,
    SplitJoin(u16),
}

fuzz_target!(|ops: Vec<Op>| {
    let mut tree: AvlTree<u16> = AvlTree::new();

    for op in ops {
        match op {
            Op::Insert(value) => tree.insert(value),
            Op::Remove(value) => {
                tree.remove(&value);
            }
            Op::PopMin => {
                tree.pop_min();
            }
            Op::PopMax => {
                tree.pop_max();
            }
            Op::SplitJoin(value) => {
                let size = tree.size();
                if let Some(detached) = tree.split(&value) {
                    tree.assert_valid();
                    detached.assert_valid();
                    assert_eq!(size, tree.size() + detached.size());
                    tree.join(detached);
                }
            }
        }
        tree.assert_valid();
    }
});
