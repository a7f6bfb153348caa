//! Declared-graph cycle detection
//!
//! Walks the declared argument references (not the resolved values) depth
//! first from one argument of the definition about to be instantiated. Nothing
//! is remembered between checks; every instantiation re-walks from scratch.
//! Within one check, each (definition, previous definition) pair is expanded
//! once, which keeps fan-in graphs linear instead of exponential. The walk is
//! bounded by the number of definitions: a path longer than that must repeat
//! a definition, so it is reported as a cycle instead of recursing forever.
//! Reaching a pair that is still being expanded means the path loops, which
//! is reported the same way.

use std::collections::HashSet;

use indexmap::IndexMap;
use mreg_domain::{Definition, Error, Reference, Result};

/// Check that resolving `inner` while instantiating `root` cannot loop
pub(crate) fn check_circular(
    definitions: &IndexMap<String, Definition>,
    root: &Definition,
    inner: &Reference,
) -> Result<()> {
    let mut walk = Walk {
        definitions,
        root,
        limit: definitions.len(),
        in_progress: HashSet::new(),
        expanded: HashSet::new(),
    };
    walk.visit(inner, None, 0)
}

type Pair<'a> = (&'a str, Option<&'a str>);

struct Walk<'a> {
    definitions: &'a IndexMap<String, Definition>,
    root: &'a Definition,
    limit: usize,
    /// (definition id, previous definition id) pairs on the current path
    in_progress: HashSet<Pair<'a>>,
    /// Pairs whose expansion finished without finding a cycle
    expanded: HashSet<Pair<'a>>,
}

impl<'a> Walk<'a> {
    fn visit(
        &mut self,
        inner: &'a Reference,
        last: Option<&'a Definition>,
        depth: usize,
    ) -> Result<()> {
        if !inner.targets_definition() {
            return Ok(());
        }
        let Some(next) = self.definitions.get(inner.id()) else {
            return Ok(());
        };

        if inner.id() == self.root.id() {
            return Err(match last {
                Some(last) => Error::circular_reference(self.root.type_name(), last.type_name()),
                None => Error::self_reference(self.root.type_name()),
            });
        }

        if depth >= self.limit {
            return Err(Error::depth_exceeded(self.root.id(), self.limit));
        }

        let pair = (next.id(), last.map(Definition::id));
        if self.expanded.contains(&pair) {
            return Ok(());
        }
        if !self.in_progress.insert(pair) {
            return Err(Error::depth_exceeded(self.root.id(), self.limit));
        }

        for next_reference in next.arguments().values() {
            if let Some(last) = last
                && next_reference.targets_definition()
                && next_reference.id() == last.id()
            {
                return Err(Error::circular_reference(last.type_name(), next.type_name()));
            }
            self.visit(next_reference, Some(next), depth + 1)?;
        }

        self.in_progress.remove(&pair);
        self.expanded.insert(pair);
        Ok(())
    }
}
