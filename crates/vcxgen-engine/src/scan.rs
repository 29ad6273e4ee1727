//! Depth-first search over a [`Node`] tree with mutable access to matches.

use crate::document::Node;

/// Visit every element matching `predicate` in document order.
///
/// A matching element is handed to `callback` and its subtree is not
/// searched further, so matches never nest. Non-matching elements are
/// descended into; text and comment children are skipped.
pub fn scan<P, F>(node: &mut Node, predicate: &P, callback: &mut F)
where
    P: Fn(&Node) -> bool,
    F: FnMut(&mut Node),
{
    if predicate(node) {
        callback(node);
        return;
    }

    for child in node.elements_mut() {
        scan(child, predicate, callback);
    }
}

/// Predicate matching elements by local name.
pub fn local_name_is(name: &str) -> impl Fn(&Node) -> bool + '_ {
    move |node: &Node| node.local_name() == name
}
