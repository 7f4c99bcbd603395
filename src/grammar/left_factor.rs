use std::cmp::Ordering;
use std::collections::BTreeSet;

use log::debug;

use super::grammar::{group_rules, FreshNames, Rule};
use crate::Grammar;

impl Grammar {
    /// Rewrites the rules so that no two alternatives of a non-terminal share
    /// a non-empty prefix. Each shared prefix `p` of `A` becomes `A -> p A<k>`
    /// with the differing tails moved to the fresh `A<k>`.
    pub fn left_factor(&self) -> Vec<Rule> {
        let mut rule_map = group_rules(self.rules());
        let mut names = FreshNames::new(self);
        let mut factored = Vec::new();

        for non_terminal in self.non_terminal_iter() {
            let mut alternatives = rule_map.remove(non_terminal).unwrap_or_default();

            while let Some(prefix) = longest_common_prefix(&alternatives) {
                let helper = names.next(non_terminal);
                let (shared, rest): (BTreeSet<Rule>, BTreeSet<Rule>) = alternatives
                    .into_iter()
                    .partition(|rule| rule.starts_with_prefix(&prefix));
                debug!(
                    "factoring \"{}\" out of {} alternatives of {} into {}",
                    prefix.join(" "),
                    shared.len(),
                    non_terminal,
                    helper
                );

                factored.extend(
                    shared
                        .iter()
                        .map(|rule| Rule::new(helper.as_str(), rule.right[prefix.len()..].to_vec())),
                );

                alternatives = rest;
                let mut right = prefix;
                right.push(helper);
                alternatives.insert(Rule::new(non_terminal.as_str(), right));
            }

            factored.extend(alternatives);
        }

        factored
    }
}

/// The longest prefix shared by at least two alternatives. Among prefixes of
/// equal length the one whose concatenated symbols compare greatest wins.
fn longest_common_prefix(alternatives: &BTreeSet<Rule>) -> Option<Vec<String>> {
    let mut best: Option<&[String]> = None;
    for (i, a) in alternatives.iter().enumerate() {
        for b in alternatives.iter().skip(i + 1) {
            let prefix = a.longest_prefix_with(b);
            if prefix.is_empty() {
                continue;
            }
            if best.map_or(true, |best| prefers(prefix, best)) {
                best = Some(prefix);
            }
        }
    }
    best.map(<[String]>::to_vec)
}

fn prefers(candidate: &[String], best: &[String]) -> bool {
    candidate
        .len()
        .cmp(&best.len())
        .then_with(|| candidate.concat().cmp(&best.concat()))
        .then_with(|| candidate.cmp(best))
        == Ordering::Greater
}
