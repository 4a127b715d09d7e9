use std::collections::HashMap;
use std::hash::Hash;
use std::rc::Rc;

/// One callback invoked when an external parser reduces by this production.
/// Only right-hand-side slots given an explicit `<name>` (see
/// [crate::grammar::builder::parse_production_string]) are passed through;
/// unnamed slots are dropped, exactly as `Production.apply` in the library
/// this crate grew out of only forwards `self.__ids` entries.
pub type ProductionCallback<R> = Rc<dyn Fn(HashMap<String, R>) -> R>;

/// A single grammar rule `lhs -> rhs[0] rhs[1] ... rhs[n]` (or `lhs -> ε`
/// when `rhs` is empty).
pub struct Production<S, R> {
    pub lhs: S,
    pub rhs: Vec<S>,
    pub(crate) names: HashMap<usize, String>,
    pub(crate) priority: Option<S>,
    pub(crate) callback: ProductionCallback<R>,
}

impl<S: Clone, R> Production<S, R> {
    pub fn new(lhs: S, rhs: Vec<S>, callback: ProductionCallback<R>) -> Self {
        Production {
            lhs,
            rhs,
            names: HashMap::new(),
            priority: None,
            callback,
        }
    }

    pub fn with_priority(mut self, priority: S) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_slot_name(mut self, index: usize, name: String) -> Self {
        self.names.insert(index, name);
        self
    }

    /// The rightmost symbol of `rhs` that is a member of `terminals`, if any.
    pub fn rightmost_terminal<'a>(&'a self, terminals: &std::collections::HashSet<S>) -> Option<&'a S>
    where
        S: Eq + Hash,
    {
        self.rhs.iter().rev().find(|s| terminals.contains(s))
    }

    /// Invokes the callback, passing only the named right-hand-side slots,
    /// keyed by their declared name, with `args[i]` as slot `i`'s parsed value.
    pub fn apply(&self, mut args: Vec<R>) -> R {
        let mut kwargs = HashMap::new();
        // Drain back to front so earlier removals don't shift later indices.
        let mut indices: Vec<&usize> = self.names.keys().collect();
        indices.sort_unstable_by(|a, b| b.cmp(a));
        for &index in indices {
            let name = self.names[&index].clone();
            let value = args.remove(index);
            kwargs.insert(name, value);
        }
        (self.callback)(kwargs)
    }
}

impl<S: PartialEq, R> PartialEq for Production<S, R> {
    fn eq(&self, other: &Self) -> bool {
        self.lhs == other.lhs && self.rhs == other.rhs
    }
}
impl<S: Eq, R> Eq for Production<S, R> {}

impl<S: Hash, R> Hash for Production<S, R> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.lhs.hash(state);
        self.rhs.hash(state);
    }
}
