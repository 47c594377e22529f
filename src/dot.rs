use core::fmt;

use crate::AvlTree;
use crate::node::{Node, Side};

/// Renders an [`AvlTree`] in [graphviz format] for debugging.
///
/// Produced by [`AvlTree::dot`], printable with `{}` or `{:?}`. Rendering is
/// strictly read-only.
///
/// [graphviz format]: https://graphviz.org/doc/info/lang.html
pub struct Dot<'a, T> {
    pub(crate) tree: &'a AvlTree<T>,
}

impl<T> Dot<'_, T>
where
    T: fmt::Debug,
{
    fn node_fmt(&self, f: &mut fmt::Formatter<'_>, node: &Node<T>) -> fmt::Result {
        let id = core::ptr::from_ref(node) as usize;
        f.write_fmt(format_args!(
            r#"{id} [label="value = {:?} height = {}"];"#,
            node.value(),
            node.height,
        ))?;

        let mut print_side = |side: Side| -> fmt::Result {
            if let Some(child) = node.child(side).as_deref() {
                f.write_fmt(format_args!(
                    r#"{id} -> {} [label="{side}"];"#,
                    core::ptr::from_ref(child) as usize,
                ))?;
                self.node_fmt(f, child)?;
            }
            Ok(())
        };
        print_side(Side::Left)?;
        print_side(Side::Right)
    }
}

impl<T> fmt::Display for Dot<'_, T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("digraph {")?;
        if let Some(root) = self.tree.root.as_deref() {
            self.node_fmt(f, root)?;
        }
        f.write_str("}")
    }
}

impl<T> fmt::Debug for Dot<'_, T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
