use crate::Score;
use crate::clustering::Assignment;
use std::collections::BTreeMap;

/// How often each pair of labels landed in the same cluster.
///
/// Accumulated over every day of one (k, feature set) pair. Every label
/// seen gets an entry, even if it never shared a cluster.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally(BTreeMap<String, BTreeMap<String, Score>>);

impl Tally {
    /// Credit every pair of distinct labels that share a cluster.
    pub fn absorb(&mut self, labels: &[String], assignment: &Assignment) {
        let mut clusters = BTreeMap::<usize, Vec<&String>>::new();
        labels
            .iter()
            .zip(assignment.ids())
            .for_each(|(label, j)| clusters.entry(*j).or_default().push(label));
        for members in clusters.values() {
            for label in members.iter() {
                let scores = self.0.entry(label.to_string()).or_default();
                members
                    .iter()
                    .filter(|other| other != &label)
                    .for_each(|other| *scores.entry(other.to_string()).or_default() += 1);
            }
        }
    }

    pub fn score(&self, a: &str, b: &str) -> Score {
        self.0
            .get(a)
            .and_then(|scores| scores.get(b))
            .copied()
            .unwrap_or_default()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Labels that shared a cluster with `label`, with their scores.
    pub fn neighbors<'a>(&'a self, label: &str) -> impl Iterator<Item = (&'a str, Score)> + 'a {
        self.0
            .get(label)
            .into_iter()
            .flat_map(|scores| scores.iter().map(|(other, n)| (other.as_str(), *n)))
    }
}
