use std::collections::BTreeSet;

use log::debug;

use super::{
    error::{GrammarError, Result},
    grammar::{group_rules, FreshNames, Rule},
    Grammar,
};

impl Grammar {
    /// Removes direct and indirect left recursion. Non-terminals are processed
    /// in lexicographic order; each one first has leading references to
    /// earlier non-terminals expanded, then its direct recursion replaced by a
    /// fresh right-recursive helper.
    pub fn eliminate_left_recursion(&self) -> Result<Vec<Rule>> {
        let mut rule_map = group_rules(self.rules());
        let mut names = FreshNames::new(self);

        let mut order: Vec<&String> = self.non_terminal_iter().collect();
        order.sort();
        let mut output_order: Vec<String> = Vec::with_capacity(order.len());

        for (i, &current) in order.iter().enumerate() {
            let mut rules = rule_map.remove(current).unwrap_or_default();

            for &previous in &order[..i] {
                let replacements = match rule_map.get(previous) {
                    Some(replacements) => replacements,
                    None => continue,
                };
                let (leading, mut rest): (BTreeSet<Rule>, BTreeSet<Rule>) = rules
                    .into_iter()
                    .partition(|rule| rule.starts_with(previous));
                for rule in &leading {
                    rest.extend(substitute_leading(rule, previous, replacements)?);
                }
                rules = rest;
            }

            output_order.push(current.clone());

            let (recursive, non_recursive): (Vec<Rule>, Vec<Rule>) =
                rules.into_iter().partition(Rule::is_left_recursive);
            if recursive.is_empty() {
                rule_map.insert(current.clone(), non_recursive.into_iter().collect());
                continue;
            }

            let helper = names.next(current);
            debug!(
                "{} has {} left-recursive alternatives, introducing {}",
                current,
                recursive.len(),
                helper
            );

            // A -> A on its own adds nothing and would leave the helper
            // left-recursive.
            let mut helper_rules: BTreeSet<Rule> = recursive
                .iter()
                .filter(|rule| rule.right.len() > 1)
                .map(|rule| {
                    let mut right = rule.right[1..].to_vec();
                    right.push(helper.clone());
                    Rule::new(helper.as_str(), right)
                })
                .collect();
            helper_rules.insert(Rule::new(helper.as_str(), Vec::new()));

            let rules: BTreeSet<Rule> = non_recursive
                .into_iter()
                .map(|mut rule| {
                    rule.right.push(helper.clone());
                    rule
                })
                .collect();

            rule_map.insert(current.clone(), rules);
            rule_map.insert(helper.clone(), helper_rules);
            output_order.push(helper);
        }

        Ok(output_order
            .iter()
            .filter_map(|name| rule_map.remove(name))
            .flatten()
            .collect())
    }
}

/// Replaces the leading `symbol` of `rule` by each of `replacements`,
/// keeping the rest of the rule.
pub fn substitute_leading(
    rule: &Rule,
    symbol: &str,
    replacements: &BTreeSet<Rule>,
) -> Result<Vec<Rule>> {
    if !rule.starts_with(symbol) {
        return Err(GrammarError::NotLeadingSymbol {
            rule: rule.to_string(),
            symbol: symbol.to_string(),
        });
    }

    Ok(replacements
        .iter()
        .map(|replacement| {
            let right = replacement
                .right
                .iter()
                .chain(rule.right.iter().skip(1))
                .cloned()
                .collect();
            Rule::new(rule.left.as_str(), right)
        })
        .collect())
}
