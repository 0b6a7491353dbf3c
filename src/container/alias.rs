//! Namespace aliases and their priority ordering.

use std::sync::Arc;

use super::NAMESPACE_SEPARATOR;

/// A namespace alias used to shorten keys during resolution.
///
/// - [`Alias::Namespace`] makes every key under the namespace reachable by
///   its relative name: with `app.math`, `sum` resolves to `app.math.sum`.
/// - [`Alias::Shortcut`] renames the namespace: with `app.math` as `m`,
///   `m.sum` resolves to `app.math.sum`. The shortcut only ever replaces
///   whole dotted segments, so `m` does not match inside `mango`.
///
/// # Examples
///
/// ```rust
/// use funbox::container::Alias;
///
/// assert_eq!(Alias::from("app.math"), Alias::Namespace("app.math".to_string()));
/// assert_eq!(
///     Alias::from(("app.math", "m")),
///     Alias::Shortcut { namespace: "app.math".to_string(), shortcut: "m".to_string() }
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Alias {
    /// A namespace prefix without renaming.
    Namespace(String),
    /// A namespace reachable through a shortcut.
    Shortcut {
        /// The full namespace.
        namespace: String,
        /// The shortcut standing in for it.
        shortcut: String,
    },
}

impl Alias {
    /// The aliased namespace.
    pub fn namespace(&self) -> &str {
        match self {
            Self::Namespace(namespace) | Self::Shortcut { namespace, .. } => namespace,
        }
    }

    /// The shortcut, if the namespace is renamed.
    pub fn shortcut(&self) -> Option<&str> {
        match self {
            Self::Namespace(_) => None,
            Self::Shortcut { shortcut, .. } => Some(shortcut),
        }
    }
}

impl From<&str> for Alias {
    fn from(namespace: &str) -> Self {
        Self::Namespace(namespace.to_string())
    }
}

impl From<String> for Alias {
    fn from(namespace: String) -> Self {
        Self::Namespace(namespace)
    }
}

impl From<(&str, &str)> for Alias {
    fn from((namespace, shortcut): (&str, &str)) -> Self {
        Self::Shortcut {
            namespace: namespace.to_string(),
            shortcut: shortcut.to_string(),
        }
    }
}

impl From<(String, String)> for Alias {
    fn from((namespace, shortcut): (String, String)) -> Self {
        Self::Shortcut {
            namespace,
            shortcut,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Rule {
    namespace: String,
    shortcut: Option<String>,
}

impl Rule {
    fn expand(&self, key: &str) -> Option<String> {
        match &self.shortcut {
            None if self.namespace.is_empty() => Some(key.to_string()),
            None => Some(format!("{}{NAMESPACE_SEPARATOR}{key}", self.namespace)),
            Some(shortcut) => replace_segments(key, shortcut, &self.namespace),
        }
    }
}

/// An ordered set of aliases, most recently declared first.
///
/// Declaring the same namespace twice keeps its first position and its
/// last shortcut. The resulting order is then reversed so that later, more
/// specific declarations are probed before earlier ones.
///
/// # Examples
///
/// ```rust
/// use funbox::container::{Alias, AliasTable};
///
/// let table = AliasTable::new([
///     Alias::from(("app.math", "m")),
///     Alias::from(("app.math.inner", "m")),
/// ]);
/// let candidates: Vec<String> = table.candidates("m.map").collect();
///
/// assert_eq!(candidates, vec!["app.math.inner.map", "app.math.map"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasTable {
    rules: Arc<[Rule]>,
}

impl AliasTable {
    /// Normalizes `aliases` into priority order.
    pub fn new<I, A>(aliases: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<Alias>,
    {
        let mut rules: Vec<Rule> = Vec::new();
        for alias in aliases {
            let alias = alias.into();
            let shortcut = alias
                .shortcut()
                .filter(|shortcut| !shortcut.is_empty())
                .map(str::to_string);
            match rules.iter_mut().find(|rule| rule.namespace == alias.namespace()) {
                Some(rule) => rule.shortcut = shortcut,
                None => rules.push(Rule {
                    namespace: alias.namespace().to_string(),
                    shortcut,
                }),
            }
        }
        rules.reverse();
        Self {
            rules: rules.into(),
        }
    }

    /// Builds the table for a namespace path: one bare alias per prefix,
    /// the deepest prefix first.
    ///
    /// ```rust
    /// use funbox::container::AliasTable;
    ///
    /// let table = AliasTable::scoped(&["app".to_string(), "math".to_string()]);
    /// let candidates: Vec<String> = table.candidates("sum").collect();
    ///
    /// assert_eq!(candidates, vec!["app.math.sum", "app.sum"]);
    /// ```
    pub fn scoped(path: &[String]) -> Self {
        let prefixes = (1..=path.len()).map(|depth| {
            Alias::Namespace(path[..depth].join(NAMESPACE_SEPARATOR))
        });
        Self::new(prefixes)
    }

    /// The aliases in priority order.
    pub fn iter(&self) -> impl Iterator<Item = Alias> + '_ {
        self.rules.iter().map(|rule| match &rule.shortcut {
            None => Alias::Namespace(rule.namespace.clone()),
            Some(shortcut) => Alias::Shortcut {
                namespace: rule.namespace.clone(),
                shortcut: shortcut.clone(),
            },
        })
    }

    /// Number of aliases.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` when the table has no aliases.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Fully qualified candidates for `key`, in the order they should be
    /// probed. The raw key itself is not included.
    pub fn candidates<'a>(&'a self, key: &'a str) -> impl Iterator<Item = String> + 'a {
        self.rules.iter().filter_map(move |rule| rule.expand(key))
    }
}

/// Replaces every whole-segment occurrence of `shortcut` in `key` with
/// `namespace`. Returns `None` when the shortcut does not occur.
fn replace_segments(key: &str, shortcut: &str, namespace: &str) -> Option<String> {
    let segments: Vec<&str> = key.split(NAMESPACE_SEPARATOR).collect();
    let pattern: Vec<&str> = shortcut.split(NAMESPACE_SEPARATOR).collect();

    let mut output: Vec<&str> = Vec::with_capacity(segments.len());
    let mut replaced = false;
    let mut index = 0;
    while index < segments.len() {
        if segments[index..].starts_with(&pattern) {
            output.push(namespace);
            index += pattern.len();
            replaced = true;
        } else {
            output.push(segments[index]);
            index += 1;
        }
    }

    replaced.then(|| output.join(NAMESPACE_SEPARATOR))
}
