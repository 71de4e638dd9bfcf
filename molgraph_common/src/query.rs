//! SMARTS-style query attributes: boolean formulas over a fixed descriptor
//! vocabulary.
//!
//! A query molecule carries one formula per atom and per bond instead of
//! concrete descriptor values. The predicate generators in
//! `molgraph_subgraph` evaluate these trees against plain molecules (or
//! against each other, by logical implication). Formula evaluation is
//! parameterized over a leaf evaluator so the same traversal serves both
//! regimes.

use crate::error::MolGraphError;
use crate::graph::Graph;

/// Atom query formula.
///
/// Leaf variants test one descriptor; `Not`/`And`/`Or` combine sub-formulas.
/// `Recursive` embeds the source text of a sub-query whose root atom must
/// match at the candidate position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryAtom {
    /// Matches any atom.
    Any,
    /// Element symbol equals.
    Symbol(String),
    /// Aromaticity flag equals.
    Aromatic(bool),
    /// Formal charge equals.
    Charge(i8),
    /// Isotope mass number equals.
    Mass(u16),
    /// Total connectivity (neighbors + implicit hydrogens) equals.
    Connectivity(u8),
    /// Heavy-atom degree equals.
    Degree(u8),
    /// Valence equals.
    Valence(u8),
    /// Implicit hydrogen count equals.
    HydrogenCount(u8),
    /// Member of a ring of exactly this size.
    RingSize(u8),
    /// Number of rings the atom belongs to equals.
    RingCount(u8),
    /// Embedded sub-query; matches when the sub-query's root atom can be
    /// anchored at the candidate atom by a substructure search.
    Recursive(String),
    /// Negation.
    Not(Box<QueryAtom>),
    /// Conjunction. Must have at least one operand.
    And(Vec<QueryAtom>),
    /// Disjunction. Must have at least one operand.
    Or(Vec<QueryAtom>),
}

/// Bond query formula.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryBond {
    /// Matches any bond.
    Any,
    /// Bond order equals.
    Order(u8),
    /// Aromaticity flag equals.
    Aromatic(bool),
    /// Ring membership equals.
    InRing(bool),
    /// Negation.
    Not(Box<QueryBond>),
    /// Conjunction. Must have at least one operand.
    And(Vec<QueryBond>),
    /// Disjunction. Must have at least one operand.
    Or(Vec<QueryBond>),
}

/// A query molecule is a graph of atom and bond formulas.
pub type QueryMolecule = Graph<QueryAtom, QueryBond>;

impl QueryAtom {
    /// Evaluate the formula, delegating every leaf to `leaf`.
    pub fn evaluate<F: FnMut(&QueryAtom) -> bool>(&self, leaf: &mut F) -> bool {
        match self {
            QueryAtom::Not(inner) => !inner.evaluate(leaf),
            QueryAtom::And(operands) => operands.iter().all(|q| q.evaluate(leaf)),
            QueryAtom::Or(operands) => operands.iter().any(|q| q.evaluate(leaf)),
            term => leaf(term),
        }
    }

    /// Collect the distinct leaf terms of this formula into `out`.
    pub fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a QueryAtom>) {
        match self {
            QueryAtom::Not(inner) => inner.collect_leaves(out),
            QueryAtom::And(operands) | QueryAtom::Or(operands) => {
                for q in operands {
                    q.collect_leaves(out);
                }
            }
            term => {
                if !out.contains(&term) {
                    out.push(term);
                }
            }
        }
    }

    /// Structural validation: `And`/`Or` with an empty operand list is an
    /// invalid representation, not a matchable formula.
    pub fn validate(&self) -> Result<(), MolGraphError> {
        match self {
            QueryAtom::Not(inner) => inner.validate(),
            QueryAtom::And(operands) | QueryAtom::Or(operands) => {
                if operands.is_empty() {
                    return Err(MolGraphError::InvalidQuery(
                        "atom formula connective with no operands".into(),
                    ));
                }
                operands.iter().try_for_each(QueryAtom::validate)
            }
            _ => Ok(()),
        }
    }

    /// Recursive sub-query sources reachable from this formula.
    pub fn recursive_sources<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            QueryAtom::Recursive(source) => {
                if !out.contains(&source.as_str()) {
                    out.push(source);
                }
            }
            QueryAtom::Not(inner) => inner.recursive_sources(out),
            QueryAtom::And(operands) | QueryAtom::Or(operands) => {
                for q in operands {
                    q.recursive_sources(out);
                }
            }
            _ => {}
        }
    }
}

impl QueryBond {
    /// Evaluate the formula, delegating every leaf to `leaf`.
    pub fn evaluate<F: FnMut(&QueryBond) -> bool>(&self, leaf: &mut F) -> bool {
        match self {
            QueryBond::Not(inner) => !inner.evaluate(leaf),
            QueryBond::And(operands) => operands.iter().all(|q| q.evaluate(leaf)),
            QueryBond::Or(operands) => operands.iter().any(|q| q.evaluate(leaf)),
            term => leaf(term),
        }
    }

    /// Collect the distinct leaf terms of this formula into `out`.
    pub fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a QueryBond>) {
        match self {
            QueryBond::Not(inner) => inner.collect_leaves(out),
            QueryBond::And(operands) | QueryBond::Or(operands) => {
                for q in operands {
                    q.collect_leaves(out);
                }
            }
            term => {
                if !out.contains(&term) {
                    out.push(term);
                }
            }
        }
    }

    /// Structural validation, as for [`QueryAtom::validate`].
    pub fn validate(&self) -> Result<(), MolGraphError> {
        match self {
            QueryBond::Not(inner) => inner.validate(),
            QueryBond::And(operands) | QueryBond::Or(operands) => {
                if operands.is_empty() {
                    return Err(MolGraphError::InvalidQuery(
                        "bond formula connective with no operands".into(),
                    ));
                }
                operands.iter().try_for_each(QueryBond::validate)
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaluate_combines_leaves() {
        let formula = QueryAtom::And(vec![
            QueryAtom::Symbol("C".into()),
            QueryAtom::Not(Box::new(QueryAtom::Aromatic(true))),
        ]);
        let mut truthy = |leaf: &QueryAtom| matches!(leaf, QueryAtom::Symbol(s) if s == "C");
        assert!(formula.evaluate(&mut truthy));

        let mut falsy = |_: &QueryAtom| true;
        assert!(!formula.evaluate(&mut falsy));
    }

    #[test]
    fn leaves_are_deduplicated() {
        let symbol = QueryAtom::Symbol("N".into());
        let formula = QueryAtom::Or(vec![
            symbol.clone(),
            QueryAtom::And(vec![symbol.clone(), QueryAtom::Charge(1)]),
        ]);
        let mut leaves = Vec::new();
        formula.collect_leaves(&mut leaves);
        assert_eq!(leaves.len(), 2);
    }

    #[test]
    fn empty_connective_is_invalid() {
        let formula = QueryAtom::And(vec![QueryAtom::Any, QueryAtom::Or(vec![])]);
        assert!(formula.validate().is_err());
        assert!(QueryBond::And(vec![]).validate().is_err());
        assert!(QueryBond::Order(2).validate().is_ok());
    }

    #[test]
    fn recursive_sources_collected_once() {
        let formula = QueryAtom::Or(vec![
            QueryAtom::Recursive("[OH]C".into()),
            QueryAtom::Recursive("[OH]C".into()),
            QueryAtom::Recursive("N=C".into()),
        ]);
        let mut sources = Vec::new();
        formula.recursive_sources(&mut sources);
        assert_eq!(sources, vec!["[OH]C", "N=C"]);
    }
}
