//! Match predicate generators.
//!
//! Three compatibility regimes, selected by the caller according to how the
//! query side is represented:
//! - [`PlainMatchers`]: both sides are plain molecules; descriptors are
//!   compared for equality.
//! - [`QueryMatchers`]: the query side carries boolean formulas over the
//!   descriptor vocabulary, evaluated against the target's descriptor
//!   vectors. Embedded recursive sub-queries are resolved once, up front,
//!   through a caller-supplied [`SubQueryResolver`] and matched by an
//!   anchored substructure search.
//! - [`QueryPairMatchers`]: both sides carry formulas; compatibility is
//!   logical implication, decided by truth-table subsumption over the
//!   union of leaf terms.
//!
//! Every generated predicate memoizes per vertex or edge pair for the
//! lifetime of one matching call. The caches live in the generator
//! instance, never in a global, so concurrent searches cannot observe each
//! other.

use molgraph_common::{MatchOptions, MolGraphError, Molecule, QueryAtom, QueryBond, QueryMolecule};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use tracing::warn;

/// Resolves the source text of an embedded recursive sub-query into a query
/// graph. The sub-query's anchor atom must be vertex 0. Sources must not
/// refer to themselves, directly or through other sub-queries.
pub trait SubQueryResolver {
    /// Parse or look up `source`, producing the sub-query graph.
    fn resolve(&self, source: &str) -> Result<QueryMolecule, MolGraphError>;
}

/// Predicates for plain molecule vs. plain molecule matching: equal element
/// symbol and aromaticity for atoms, equal order and aromaticity for bonds.
pub struct PlainMatchers<'a> {
    target: &'a Molecule,
    query: &'a Molecule,
    atom_cache: RefCell<HashMap<(usize, usize), bool>>,
    bond_cache: RefCell<HashMap<(usize, usize), bool>>,
}

impl<'a> PlainMatchers<'a> {
    /// Build the predicate pair for one search.
    pub fn new(target: &'a Molecule, query: &'a Molecule) -> Self {
        PlainMatchers {
            target,
            query,
            atom_cache: RefCell::new(HashMap::new()),
            bond_cache: RefCell::new(HashMap::new()),
        }
    }

    /// Atom compatibility of target vertex `t` with query vertex `q`.
    pub fn vmatch(&self, t: usize, q: usize) -> bool {
        if let Some(&hit) = self.atom_cache.borrow().get(&(t, q)) {
            return hit;
        }
        let ta = self.target.node(t);
        let qa = self.query.node(q);
        let result = ta.symbol == qa.symbol && ta.aromatic == qa.aromatic;
        self.atom_cache.borrow_mut().insert((t, q), result);
        result
    }

    /// Bond compatibility of target edge `te` with query edge `qe`.
    pub fn ematch(&self, te: usize, qe: usize) -> bool {
        if let Some(&hit) = self.bond_cache.borrow().get(&(te, qe)) {
            return hit;
        }
        let tb = &self.target.edge(te).attr;
        let qb = &self.query.edge(qe).attr;
        let result = tb.order == qb.order && tb.aromatic == qb.aromatic;
        self.bond_cache.borrow_mut().insert((te, qe), result);
        result
    }
}

/// Predicates for query formula vs. plain molecule matching.
pub struct QueryMatchers<'a> {
    target: &'a Molecule,
    query: &'a QueryMolecule,
    resolver: Rc<dyn SubQueryResolver + 'a>,
    subqueries: HashMap<String, Rc<QueryMolecule>>,
    atom_cache: RefCell<HashMap<(usize, usize), bool>>,
    bond_cache: RefCell<HashMap<(usize, usize), bool>>,
    recursive_cache: RefCell<HashMap<(usize, String), bool>>,
}

impl<'a> QueryMatchers<'a> {
    /// Build the predicate pair for one search.
    ///
    /// Every formula is validated and every reachable recursive sub-query
    /// is resolved here, so the predicates themselves are infallible.
    pub fn new(
        target: &'a Molecule,
        query: &'a QueryMolecule,
        resolver: Rc<dyn SubQueryResolver + 'a>,
    ) -> Result<Self, MolGraphError> {
        let mut pending: Vec<String> = Vec::new();
        for v in 0..query.node_count() {
            query.node(v).validate()?;
            let mut sources = Vec::new();
            query.node(v).recursive_sources(&mut sources);
            pending.extend(sources.into_iter().map(String::from));
        }
        for e in 0..query.edge_count() {
            query.edge(e).attr.validate()?;
        }

        let mut subqueries: HashMap<String, Rc<QueryMolecule>> = HashMap::new();
        while let Some(source) = pending.pop() {
            if subqueries.contains_key(&source) {
                continue;
            }
            let sub = resolver.resolve(&source)?;
            for v in 0..sub.node_count() {
                sub.node(v).validate()?;
                let mut nested = Vec::new();
                sub.node(v).recursive_sources(&mut nested);
                pending.extend(nested.into_iter().map(String::from));
            }
            for e in 0..sub.edge_count() {
                sub.edge(e).attr.validate()?;
            }
            subqueries.insert(source, Rc::new(sub));
        }

        Ok(Self::from_parts(target, query, resolver, subqueries))
    }

    fn from_parts(
        target: &'a Molecule,
        query: &'a QueryMolecule,
        resolver: Rc<dyn SubQueryResolver + 'a>,
        subqueries: HashMap<String, Rc<QueryMolecule>>,
    ) -> Self {
        QueryMatchers {
            target,
            query,
            resolver,
            subqueries,
            atom_cache: RefCell::new(HashMap::new()),
            bond_cache: RefCell::new(HashMap::new()),
            recursive_cache: RefCell::new(HashMap::new()),
        }
    }

    /// Atom compatibility of target vertex `t` with query vertex `q`.
    pub fn vmatch(&self, t: usize, q: usize) -> bool {
        if let Some(&hit) = self.atom_cache.borrow().get(&(t, q)) {
            return hit;
        }
        let result = self
            .query
            .node(q)
            .evaluate(&mut |leaf| self.atom_term(t, leaf));
        self.atom_cache.borrow_mut().insert((t, q), result);
        result
    }

    /// Bond compatibility of target edge `te` with query edge `qe`.
    pub fn ematch(&self, te: usize, qe: usize) -> bool {
        if let Some(&hit) = self.bond_cache.borrow().get(&(te, qe)) {
            return hit;
        }
        let result = self
            .query
            .edge(qe)
            .attr
            .evaluate(&mut |leaf| bond_term(self.target, te, leaf));
        self.bond_cache.borrow_mut().insert((te, qe), result);
        result
    }

    fn atom_term(&self, t: usize, term: &QueryAtom) -> bool {
        let atom = self.target.node(t);
        match term {
            QueryAtom::Any => true,
            QueryAtom::Symbol(symbol) => atom.symbol == *symbol,
            QueryAtom::Aromatic(flag) => atom.aromatic == *flag,
            QueryAtom::Charge(charge) => atom.charge == *charge,
            QueryAtom::Mass(mass) => atom.isotope == Some(*mass),
            QueryAtom::Connectivity(n) => self.target.connectivity(t) == usize::from(*n),
            QueryAtom::Degree(n) => self.target.heavy_degree(t) == usize::from(*n),
            QueryAtom::Valence(n) => self.target.valence(t) == usize::from(*n),
            QueryAtom::HydrogenCount(n) => atom.hydrogens == *n,
            QueryAtom::RingSize(n) => *n != 0 && atom.smallest_ring == *n,
            QueryAtom::RingCount(n) => atom.ring_count == *n,
            QueryAtom::Recursive(source) => self.recursive_match(t, source),
            QueryAtom::Not(_) | QueryAtom::And(_) | QueryAtom::Or(_) => {
                unreachable!("connectives are handled by evaluate")
            }
        }
    }

    /// Anchored substructure search: does the sub-query match with its
    /// vertex 0 pinned to target vertex `t`?
    fn recursive_match(&self, t: usize, source: &str) -> bool {
        let key = (t, source.to_string());
        if let Some(&hit) = self.recursive_cache.borrow().get(&key) {
            return hit;
        }

        let sub = Rc::clone(
            self.subqueries
                .get(source)
                .expect("sub-queries are resolved at construction"),
        );
        let inner = QueryMatchers::from_parts(
            self.target,
            &sub,
            Rc::clone(&self.resolver),
            self.subqueries.clone(),
        );
        let options = MatchOptions::unbounded().require(0, t);
        let found = crate::monomorphisms(
            self.target,
            &sub,
            |tt, qq| inner.vmatch(tt, qq),
            |te, qe| inner.ematch(te, qe),
            &options,
        )
        .next()
        .is_some();

        self.recursive_cache.borrow_mut().insert(key, found);
        found
    }
}

fn bond_term(target: &Molecule, te: usize, term: &QueryBond) -> bool {
    let bond = &target.edge(te).attr;
    match term {
        QueryBond::Any => true,
        QueryBond::Order(order) => bond.order == *order,
        QueryBond::Aromatic(flag) => bond.aromatic == *flag,
        QueryBond::InRing(flag) => bond.in_ring == *flag,
        QueryBond::Not(_) | QueryBond::And(_) | QueryBond::Or(_) => {
            unreachable!("connectives are handled by evaluate")
        }
    }
}

/// Truth tables above this many distinct leaf terms are not enumerated;
/// the implication is conservatively reported as not holding.
const MAX_IMPLICATION_TERMS: usize = 20;

/// Predicates for query vs. query matching: the target-side formula must
/// imply the query-side formula.
///
/// Leaf terms are treated as independent variables, which is conservative:
/// an implication that relies on two terms being mutually exclusive (two
/// different element symbols, say) is reported as not holding. Nothing is
/// ever reported as implied when it is not.
pub struct QueryPairMatchers<'a> {
    target: &'a QueryMolecule,
    query: &'a QueryMolecule,
    atom_cache: RefCell<HashMap<(usize, usize), bool>>,
    bond_cache: RefCell<HashMap<(usize, usize), bool>>,
}

impl<'a> QueryPairMatchers<'a> {
    /// Build the predicate pair for one search.
    pub fn new(target: &'a QueryMolecule, query: &'a QueryMolecule) -> Self {
        QueryPairMatchers {
            target,
            query,
            atom_cache: RefCell::new(HashMap::new()),
            bond_cache: RefCell::new(HashMap::new()),
        }
    }

    /// Whether the formula at target vertex `t` implies the one at query
    /// vertex `q`.
    pub fn vmatch(&self, t: usize, q: usize) -> bool {
        if let Some(&hit) = self.atom_cache.borrow().get(&(t, q)) {
            return hit;
        }
        let result = atom_implies(self.target.node(t), self.query.node(q));
        self.atom_cache.borrow_mut().insert((t, q), result);
        result
    }

    /// Whether the formula at target edge `te` implies the one at query
    /// edge `qe`.
    pub fn ematch(&self, te: usize, qe: usize) -> bool {
        if let Some(&hit) = self.bond_cache.borrow().get(&(te, qe)) {
            return hit;
        }
        let result = bond_implies(&self.target.edge(te).attr, &self.query.edge(qe).attr);
        self.bond_cache.borrow_mut().insert((te, qe), result);
        result
    }
}

/// Truth-table subsumption: every assignment satisfying `premise` also
/// satisfies `conclusion`.
pub fn atom_implies(premise: &QueryAtom, conclusion: &QueryAtom) -> bool {
    let mut leaves = Vec::new();
    premise.collect_leaves(&mut leaves);
    conclusion.collect_leaves(&mut leaves);
    // `Any` is a constant, not a variable.
    leaves.retain(|leaf| !matches!(leaf, QueryAtom::Any));
    if leaves.len() > MAX_IMPLICATION_TERMS {
        warn!(
            terms = leaves.len(),
            "formula too wide for implication check, assuming incompatible"
        );
        return false;
    }

    for mask in 0u32..(1u32 << leaves.len()) {
        let mut assignment = |leaf: &QueryAtom| {
            if matches!(leaf, QueryAtom::Any) {
                return true;
            }
            let index = leaves
                .iter()
                .position(|&l| l == leaf)
                .expect("every leaf was collected");
            mask & (1 << index) != 0
        };
        if premise.evaluate(&mut assignment) && !conclusion.evaluate(&mut assignment) {
            return false;
        }
    }
    true
}

/// Truth-table subsumption for bond formulas.
pub fn bond_implies(premise: &QueryBond, conclusion: &QueryBond) -> bool {
    let mut leaves = Vec::new();
    premise.collect_leaves(&mut leaves);
    conclusion.collect_leaves(&mut leaves);
    leaves.retain(|leaf| !matches!(leaf, QueryBond::Any));
    if leaves.len() > MAX_IMPLICATION_TERMS {
        warn!(
            terms = leaves.len(),
            "formula too wide for implication check, assuming incompatible"
        );
        return false;
    }

    for mask in 0u32..(1u32 << leaves.len()) {
        let mut assignment = |leaf: &QueryBond| {
            if matches!(leaf, QueryBond::Any) {
                return true;
            }
            let index = leaves
                .iter()
                .position(|&l| l == leaf)
                .expect("every leaf was collected");
            mask & (1 << index) != 0
        };
        if premise.evaluate(&mut assignment) && !conclusion.evaluate(&mut assignment) {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use molgraph_common::{Atom, Bond};

    lazy_static::lazy_static! {
        // 2-propanol: C-C(-O)-C
        static ref PROPANOL: Molecule = {
            let mut mol = Molecule::new();
            let c0 = mol.add_node(Atom::new("C").with_hydrogens(3));
            let c1 = mol.add_node(Atom::new("C").with_hydrogens(1));
            let c2 = mol.add_node(Atom::new("C").with_hydrogens(3));
            let o = mol.add_node(Atom::new("O").with_hydrogens(1));
            mol.add_edge(c0, c1, Bond::single());
            mol.add_edge(c1, c2, Bond::single());
            mol.add_edge(c1, o, Bond::single());
            mol
        };
    }

    struct FixtureResolver;

    impl SubQueryResolver for FixtureResolver {
        fn resolve(&self, source: &str) -> Result<QueryMolecule, MolGraphError> {
            match source {
                // A carbon bonded to an oxygen, anchored at the carbon.
                "C~O" => {
                    let mut q = QueryMolecule::new();
                    let c = q.add_node(QueryAtom::Symbol("C".into()));
                    let o = q.add_node(QueryAtom::Symbol("O".into()));
                    q.add_edge(c, o, QueryBond::Any);
                    Ok(q)
                }
                _ => Err(MolGraphError::InvalidQuery(format!(
                    "unknown sub-query {:?}",
                    source
                ))),
            }
        }
    }

    #[test]
    fn plain_matchers_compare_descriptors() {
        let matchers = PlainMatchers::new(&PROPANOL, &PROPANOL);
        assert!(matchers.vmatch(0, 2));
        assert!(!matchers.vmatch(0, 3));
        assert!(matchers.ematch(0, 1));
    }

    #[test]
    fn query_formulas_evaluate_against_descriptors() {
        let mut query = QueryMolecule::new();
        query.add_node(QueryAtom::And(vec![
            QueryAtom::Symbol("C".into()),
            QueryAtom::HydrogenCount(1),
        ]));

        let matchers =
            QueryMatchers::new(&PROPANOL, &query, Rc::new(FixtureResolver)).unwrap();
        assert!(!matchers.vmatch(0, 0));
        assert!(matchers.vmatch(1, 0));
    }

    #[test]
    fn recursive_terms_anchor_a_substructure_search() {
        let mut query = QueryMolecule::new();
        query.add_node(QueryAtom::Recursive("C~O".into()));

        let matchers =
            QueryMatchers::new(&PROPANOL, &query, Rc::new(FixtureResolver)).unwrap();
        // Only the central carbon is bonded to the oxygen.
        assert!(!matchers.vmatch(0, 0));
        assert!(matchers.vmatch(1, 0));
        assert!(!matchers.vmatch(2, 0));
        assert!(!matchers.vmatch(3, 0));
    }

    #[test]
    fn unknown_recursive_source_fails_at_construction() {
        let mut query = QueryMolecule::new();
        query.add_node(QueryAtom::Recursive("N~N".into()));
        let result = QueryMatchers::new(&PROPANOL, &query, Rc::new(FixtureResolver));
        assert!(matches!(result, Err(MolGraphError::InvalidQuery(_))));
    }

    #[test]
    fn implication_is_subsumption() {
        let narrow = QueryAtom::Symbol("C".into());
        let wide = QueryAtom::Or(vec![
            QueryAtom::Symbol("C".into()),
            QueryAtom::Symbol("N".into()),
        ]);
        assert!(atom_implies(&narrow, &wide));
        assert!(!atom_implies(&wide, &narrow));
        assert!(atom_implies(&narrow, &narrow));

        let single = QueryBond::Order(1);
        let any = QueryBond::Any;
        assert!(bond_implies(&single, &any));
    }

    #[test]
    fn conjunction_implies_each_operand() {
        let both = QueryAtom::And(vec![
            QueryAtom::Symbol("C".into()),
            QueryAtom::Aromatic(true),
        ]);
        assert!(atom_implies(&both, &QueryAtom::Aromatic(true)));
        assert!(!atom_implies(&QueryAtom::Aromatic(true), &both));
    }
}
