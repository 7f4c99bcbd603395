use std::collections::{HashMap, HashSet};

use log::{debug, trace};

use super::{
    error::{GrammarError, Result},
    Grammar, END_MARK,
};

/// FIRST or FOLLOW sets keyed by symbol name.
pub type SetMap = HashMap<String, HashSet<String>>;

impl Grammar {
    /// Non-terminals that can derive the empty string.
    pub fn nullable(&self) -> HashSet<String> {
        let mut nullable: HashSet<String> = self
            .rules()
            .iter()
            .filter(|rule| rule.is_epsilon())
            .map(|rule| rule.left.clone())
            .collect();

        let mut passes = 1;
        while self.nullable_pass(&mut nullable) {
            passes += 1;
        }
        debug!("nullable converged after {} passes: {:?}", passes, nullable);
        nullable
    }

    fn nullable_pass(&self, nullable: &mut HashSet<String>) -> bool {
        let mut changed = false;
        for rule in self.rules() {
            if nullable.contains(&rule.left) {
                continue;
            }
            if all_nullable(&rule.right, nullable) {
                nullable.insert(rule.left.clone());
                changed = true;
            }
        }
        changed
    }

    /// FIRST sets for every terminal and non-terminal.
    pub fn first(&self) -> Result<SetMap> {
        self.start_symbol().ok_or(GrammarError::NoStartSymbol)?;
        let nullable = self.nullable();
        self.first_with(&nullable)
    }

    fn first_with(&self, nullable: &HashSet<String>) -> Result<SetMap> {
        let mut first: SetMap = self
            .terminal_iter()
            .map(|t| (t.clone(), HashSet::from([t.clone()])))
            .chain(self.non_terminal_iter().map(|nt| (nt.clone(), HashSet::new())))
            .collect();

        let mut passes = 1;
        while self.first_pass(nullable, &mut first)? {
            passes += 1;
        }
        debug!("FIRST converged after {} passes", passes);
        Ok(first)
    }

    fn first_pass(&self, nullable: &HashSet<String>, first: &mut SetMap) -> Result<bool> {
        let mut changed = false;
        for rule in self.rules() {
            let mut addition: HashSet<String> = HashSet::new();
            for symbol in &rule.right {
                if self.is_terminal(symbol) {
                    addition.insert(symbol.clone());
                    break;
                }
                addition.extend(lookup(first, symbol)?.iter().cloned());
                if !nullable.contains(symbol) {
                    break;
                }
            }

            let set = first
                .get_mut(&rule.left)
                .ok_or_else(|| GrammarError::UnknownSymbol(rule.left.clone()))?;
            let old_len = set.len();
            set.extend(addition);
            if set.len() != old_len {
                trace!("FIRST({}) grew to {:?}", rule.left, set);
                changed = true;
            }
        }
        Ok(changed)
    }

    /// FOLLOW sets for every non-terminal. The start symbol's set contains
    /// the end marker.
    pub fn follow(&self) -> Result<SetMap> {
        let start = self.start_symbol().ok_or(GrammarError::NoStartSymbol)?;
        let nullable = self.nullable();
        let first = self.first_with(&nullable)?;
        let mut follow = self.follow_seed(start, &first, &nullable)?;

        let mut passes = 1;
        while self.follow_pass(&nullable, &mut follow)? {
            passes += 1;
        }
        debug!("FOLLOW converged after {} passes", passes);
        Ok(follow)
    }

    /// The end marker for the start symbol plus FIRST of whatever follows
    /// each non-terminal occurrence.
    fn follow_seed(
        &self,
        start: &str,
        first: &SetMap,
        nullable: &HashSet<String>,
    ) -> Result<SetMap> {
        let mut follow: SetMap = self
            .non_terminal_iter()
            .map(|nt| (nt.clone(), HashSet::new()))
            .collect();
        entry(&mut follow, start)?.insert(END_MARK.to_string());

        for rule in self.rules() {
            for (i, symbol) in rule.right.iter().enumerate() {
                if !self.is_non_terminal(symbol) {
                    continue;
                }
                let after = first_of_sequence(&rule.right, i + 1, first, nullable)?;
                entry(&mut follow, symbol)?.extend(after);
            }
        }
        Ok(follow)
    }

    /// Propagates FOLLOW of each left-hand side into the non-terminals that
    /// end its rules, walking back through nullable symbols.
    fn follow_pass(&self, nullable: &HashSet<String>, follow: &mut SetMap) -> Result<bool> {
        let mut changed = false;
        for rule in self.rules() {
            let left_follow = lookup(follow, &rule.left)?.clone();
            for symbol in rule.right.iter().rev() {
                if self.is_terminal(symbol) {
                    break;
                }
                let set = entry(follow, symbol)?;
                let old_len = set.len();
                set.extend(left_follow.iter().cloned());
                if set.len() != old_len {
                    trace!("FOLLOW({}) grew to {:?}", symbol, set);
                    changed = true;
                }
                if !nullable.contains(symbol) {
                    break;
                }
            }
        }
        Ok(changed)
    }
}

pub fn all_nullable(symbols: &[String], nullable: &HashSet<String>) -> bool {
    symbols.iter().all(|s| nullable.contains(s))
}

/// FIRST of `symbols[start..]`, stopping after the first non-nullable symbol.
pub fn first_of_sequence(
    symbols: &[String],
    start: usize,
    first: &SetMap,
    nullable: &HashSet<String>,
) -> Result<HashSet<String>> {
    let mut result = HashSet::new();
    for symbol in symbols.iter().skip(start) {
        result.extend(lookup(first, symbol)?.iter().cloned());
        if !nullable.contains(symbol) {
            break;
        }
    }
    Ok(result)
}

fn lookup<'a>(map: &'a SetMap, symbol: &str) -> Result<&'a HashSet<String>> {
    map.get(symbol)
        .ok_or_else(|| GrammarError::UnknownSymbol(symbol.to_string()))
}

fn entry<'a>(map: &'a mut SetMap, symbol: &str) -> Result<&'a mut HashSet<String>> {
    map.get_mut(symbol)
        .ok_or_else(|| GrammarError::UnknownSymbol(symbol.to_string()))
}
