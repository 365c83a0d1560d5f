// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use std::cmp::Ordering;
use std::fmt::{self, Display};
use std::hash::{Hash, Hasher};

/// A performer, identified by the trimmed full name. Colleagues are tracked
/// by name so the relation stays acyclic in memory.
#[derive(Debug, Clone, Default)]
pub struct Actor {
    name: String,
    colleagues: Vec<String>,
}

impl Actor {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.trim().into(),
            colleagues: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn add_colleague(&mut self, colleague: &Actor) {
        if !self.worked_with(colleague) {
            self.colleagues.push(colleague.name.clone());
        }
    }

    pub fn worked_with(&self, colleague: &Actor) -> bool {
        self.colleagues.iter().any(|name| *name == colleague.name)
    }
}

impl PartialEq for Actor {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Actor {}

impl Hash for Actor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl PartialOrd for Actor {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Actor {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

impl Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Director {
    name: String,
    colleagues: Vec<String>,
}

impl Director {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.trim().into(),
            colleagues: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn add_colleague(&mut self, colleague: &Director) {
        if !self.worked_with(colleague) {
            self.colleagues.push(colleague.name.clone());
        }
    }

    pub fn worked_with(&self, colleague: &Director) -> bool {
        self.colleagues.iter().any(|name| *name == colleague.name)
    }
}

impl PartialEq for Director {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Director {}

impl Hash for Director {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl PartialOrd for Director {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Director {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

impl Display for Director {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Genre {
    name: String,
}

impl Genre {
    /// An empty name becomes the "None" genre.
    pub fn new(name: &str) -> Self {
        let name = name.trim();
        let name = if name.is_empty() { "None" } else { name };

        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn names_are_trimmed() {
        assert_eq!(Actor::new("  Chris Pratt ").name(), "Chris Pratt");
        assert_eq!(Director::new("James Gunn\t").name(), "James Gunn");
        assert_eq!(Genre::new(" Drama").name(), "Drama");
        assert_eq!(Genre::new("").name(), "None");
    }

    #[test]
    fn equality_and_hash_by_name() {
        let mut a = Actor::new("Zoe Saldana");
        let b = Actor::new("Zoe Saldana");
        a.add_colleague(&Actor::new("Vin Diesel"));

        assert_eq!(a, b);

        let set: HashSet<_> = vec![a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn colleague_graph() {
        let mut pratt = Actor::new("Chris Pratt");
        let saldana = Actor::new("Zoe Saldana");
        let diesel = Actor::new("Vin Diesel");

        pratt.add_colleague(&saldana);
        pratt.add_colleague(&saldana);

        assert!(pratt.worked_with(&saldana));
        assert!(!pratt.worked_with(&diesel));
        assert!(!saldana.worked_with(&pratt));

        let mut gunn = Director::new("James Gunn");
        gunn.add_colleague(&Director::new("Ridley Scott"));
        assert!(gunn.worked_with(&Director::new("Ridley Scott")));
    }
}
