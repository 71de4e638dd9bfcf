//! Plain molecular graph attributes.
//!
//! The matching core does not perceive chemistry. The fields here are the
//! precomputed descriptor vector an upstream chemistry layer hands over:
//! ring membership, implicit hydrogens and aromaticity are taken at face
//! value. Descriptors that depend on the surrounding graph (degree,
//! connectivity, valence) are derived on demand from the owning [`Graph`].

use crate::graph::Graph;

/// Atom descriptor record as supplied by the chemistry layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Atom {
    /// Element symbol, e.g. `"C"`, `"N"`, `"Cl"`.
    pub symbol: String,
    /// Member of an aromatic ring system.
    pub aromatic: bool,
    /// Formal charge.
    pub charge: i8,
    /// Isotope mass number, if explicitly given.
    pub isotope: Option<u16>,
    /// Implicit hydrogen count.
    pub hydrogens: u8,
    /// Number of rings (SSSR) this atom belongs to.
    pub ring_count: u8,
    /// Size of the smallest ring containing this atom, 0 when acyclic.
    pub smallest_ring: u8,
}

impl Atom {
    /// A neutral, non-aromatic, acyclic atom of the given element with no
    /// implicit hydrogens.
    pub fn new(symbol: &str) -> Self {
        Atom {
            symbol: symbol.to_string(),
            aromatic: false,
            charge: 0,
            isotope: None,
            hydrogens: 0,
            ring_count: 0,
            smallest_ring: 0,
        }
    }

    /// Same atom with the implicit hydrogen count set.
    pub fn with_hydrogens(mut self, hydrogens: u8) -> Self {
        self.hydrogens = hydrogens;
        self
    }

    /// Same atom with the aromatic flag set.
    pub fn aromatic(mut self) -> Self {
        self.aromatic = true;
        self
    }

    /// Same atom with the formal charge set.
    pub fn with_charge(mut self, charge: i8) -> Self {
        self.charge = charge;
        self
    }
}

/// Bond descriptor record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bond {
    /// Bond order (1, 2, 3).
    pub order: u8,
    /// Part of an aromatic ring system.
    pub aromatic: bool,
    /// Member of a ring.
    pub in_ring: bool,
}

impl Bond {
    /// A non-aromatic, acyclic bond of the given order.
    pub fn new(order: u8) -> Self {
        Bond {
            order,
            aromatic: false,
            in_ring: false,
        }
    }

    /// Single bond shorthand.
    pub fn single() -> Self {
        Bond::new(1)
    }

    /// Double bond shorthand.
    pub fn double() -> Self {
        Bond::new(2)
    }
}

/// A molecule is a graph of atom and bond records.
pub type Molecule = Graph<Atom, Bond>;

impl Molecule {
    /// Heavy-atom degree: number of explicit neighbors.
    pub fn heavy_degree(&self, v: usize) -> usize {
        self.degree(v)
    }

    /// Total connectivity: explicit neighbors plus implicit hydrogens.
    pub fn connectivity(&self, v: usize) -> usize {
        self.degree(v) + usize::from(self.node(v).hydrogens)
    }

    /// Valence: sum of incident bond orders plus implicit hydrogens.
    /// Aromatic bonds count as order 1 here; the chemistry layer accounts
    /// for the delocalized electron when it assigns hydrogen counts.
    pub fn valence(&self, v: usize) -> usize {
        let bonds: usize = self
            .neighbors(v)
            .map(|(_, e)| usize::from(self.edge(e).attr.order))
            .sum();
        bonds + usize::from(self.node(v).hydrogens)
    }
}
