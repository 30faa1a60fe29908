//! Primitive enums shared by the graph, the hierarchy, and the inference passes.
//!
//! Elements carry the per-atom constants the pipeline needs (atomic number, mass, and a
//! default van der Waals radius), while the residue enums describe what segmentation can
//! resolve a repeating unit into.

use nalgebra::Point3;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

pub type Point = Point3<f64>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Element {
    H = 1,
    He = 2,
    Li = 3,
    Be = 4,
    B = 5,
    C = 6,
    N = 7,
    O = 8,
    F = 9,
    Ne = 10,
    Na = 11,
    Mg = 12,
    Al = 13,
    Si = 14,
    P = 15,
    S = 16,
    Cl = 17,
    Ar = 18,
    K = 19,
    Ca = 20,
    Mn = 25,
    Fe = 26,
    Co = 27,
    Ni = 28,
    Cu = 29,
    Zn = 30,
    Se = 34,
    Br = 35,
    I = 53,
    Unknown = 0,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BondOrder {
    Single,
    Double,
    Triple,
}

/// Classification tag attached to every residue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResidueClass {
    AminoAcid,
    NucleicAcid,
    Unknown,
}

/// Location of a residue along its chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResiduePosition {
    Internal,
    NTerminal,
    CTerminal,
    FivePrime,
    ThreePrime,
    /// The residue is both the first and the last unit of its chain.
    Only,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PolymerKind {
    Protein,
    NucleicAcid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoleculeKind {
    Water,
    Ion,
    Hetero,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum StandardResidue {
    ALA,
    ARG,
    ASN,
    ASP,
    CYS,
    GLN,
    GLU,
    GLY,
    HIS,
    ILE,
    LEU,
    LYS,
    MET,
    PHE,
    PRO,
    SER,
    THR,
    TRP,
    TYR,
    VAL,
    A,
    C,
    G,
    U,
    DA,
    DC,
    DG,
    DT,
}

impl BondOrder {
    pub fn value(&self) -> u8 {
        match self {
            BondOrder::Single => 1,
            BondOrder::Double => 2,
            BondOrder::Triple => 3,
        }
    }
}

impl fmt::Display for BondOrder {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl FromStr for BondOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1" | "Single" => Ok(BondOrder::Single),
            "2" | "Double" => Ok(BondOrder::Double),
            "3" | "Triple" => Ok(BondOrder::Triple),
            _ => Err(format!("Invalid bond order: {}", s)),
        }
    }
}

impl ResidueClass {
    pub fn name(&self) -> &'static str {
        match self {
            ResidueClass::AminoAcid => "Amino Acid",
            ResidueClass::NucleicAcid => "Nucleic Acid",
            ResidueClass::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for ResidueClass {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl ResiduePosition {
    pub fn name(&self) -> &'static str {
        match self {
            ResiduePosition::Internal => "Internal",
            ResiduePosition::NTerminal => "N-Terminal",
            ResiduePosition::CTerminal => "C-Terminal",
            ResiduePosition::FivePrime => "5'-Terminal",
            ResiduePosition::ThreePrime => "3'-Terminal",
            ResiduePosition::Only => "Single",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, ResiduePosition::Internal)
    }
}

impl fmt::Display for ResiduePosition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl PolymerKind {
    pub fn name(&self) -> &'static str {
        match self {
            PolymerKind::Protein => "Protein",
            PolymerKind::NucleicAcid => "Nucleic Acid",
        }
    }

    pub fn residue_class(&self) -> ResidueClass {
        match self {
            PolymerKind::Protein => ResidueClass::AminoAcid,
            PolymerKind::NucleicAcid => ResidueClass::NucleicAcid,
        }
    }

    /// Positions assigned to the first and last residue of a chain of this kind.
    pub fn terminal_positions(&self) -> (ResiduePosition, ResiduePosition) {
        match self {
            PolymerKind::Protein => (ResiduePosition::NTerminal, ResiduePosition::CTerminal),
            PolymerKind::NucleicAcid => (ResiduePosition::FivePrime, ResiduePosition::ThreePrime),
        }
    }
}

impl fmt::Display for PolymerKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl MoleculeKind {
    pub fn name(&self) -> &'static str {
        match self {
            MoleculeKind::Water => "Water",
            MoleculeKind::Ion => "Ion",
            MoleculeKind::Hetero => "Hetero",
        }
    }
}

impl fmt::Display for MoleculeKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Element {
    pub fn symbol(&self) -> &'static str {
        match self {
            Element::H => "H",
            Element::He => "He",
            Element::Li => "Li",
            Element::Be => "Be",
            Element::B => "B",
            Element::C => "C",
            Element::N => "N",
            Element::O => "O",
            Element::F => "F",
            Element::Ne => "Ne",
            Element::Na => "Na",
            Element::Mg => "Mg",
            Element::Al => "Al",
            Element::Si => "Si",
            Element::P => "P",
            Element::S => "S",
            Element::Cl => "Cl",
            Element::Ar => "Ar",
            Element::K => "K",
            Element::Ca => "Ca",
            Element::Mn => "Mn",
            Element::Fe => "Fe",
            Element::Co => "Co",
            Element::Ni => "Ni",
            Element::Cu => "Cu",
            Element::Zn => "Zn",
            Element::Se => "Se",
            Element::Br => "Br",
            Element::I => "I",
            Element::Unknown => "X",
        }
    }

    pub fn atomic_number(&self) -> u8 {
        *self as u8
    }

    pub fn is_hydrogen(&self) -> bool {
        matches!(self, Element::H)
    }

    pub fn is_heavy_atom(&self) -> bool {
        !matches!(self, Element::H | Element::Unknown)
    }

    /// Atoms the backbone search is allowed to walk through.
    pub fn is_backbone_candidate(&self) -> bool {
        matches!(self, Element::C | Element::N | Element::O | Element::P)
    }

    pub fn atomic_mass(&self) -> f64 {
        match self {
            Element::H => 1.00794,
            Element::He => 4.002602,
            Element::Li => 6.941,
            Element::Be => 9.012182,
            Element::B => 10.811,
            Element::C => 12.0107,
            Element::N => 14.0067,
            Element::O => 15.9994,
            Element::F => 18.9984032,
            Element::Ne => 20.1797,
            Element::Na => 22.98976928,
            Element::Mg => 24.3050,
            Element::Al => 26.9815386,
            Element::Si => 28.0855,
            Element::P => 30.973762,
            Element::S => 32.065,
            Element::Cl => 35.453,
            Element::Ar => 39.948,
            Element::K => 39.0983,
            Element::Ca => 40.078,
            Element::Mn => 54.938045,
            Element::Fe => 55.845,
            Element::Co => 58.933195,
            Element::Ni => 58.6934,
            Element::Cu => 63.546,
            Element::Zn => 65.38,
            Element::Se => 78.96,
            Element::Br => 79.904,
            Element::I => 126.90447,
            Element::Unknown => 0.0,
        }
    }

    /// Default van der Waals radius in ångströms (Bondi where tabulated).
    ///
    /// `Unknown` has no radius; bond inference treats such atoms as malformed.
    pub fn vdw_radius(&self) -> Option<f64> {
        let r = match self {
            Element::H => 1.20,
            Element::He => 1.40,
            Element::Li => 1.82,
            Element::Be => 1.53,
            Element::B => 1.92,
            Element::C => 1.70,
            Element::N => 1.55,
            Element::O => 1.52,
            Element::F => 1.47,
            Element::Ne => 1.54,
            Element::Na => 2.27,
            Element::Mg => 1.73,
            Element::Al => 1.84,
            Element::Si => 2.10,
            Element::P => 1.80,
            Element::S => 1.80,
            Element::Cl => 1.75,
            Element::Ar => 1.88,
            Element::K => 2.75,
            Element::Ca => 2.31,
            Element::Mn => 2.05,
            Element::Fe => 2.04,
            Element::Co => 2.00,
            Element::Ni => 1.63,
            Element::Cu => 1.40,
            Element::Zn => 1.39,
            Element::Se => 1.90,
            Element::Br => 1.85,
            Element::I => 1.98,
            Element::Unknown => return None,
        };
        Some(r)
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for Element {
    type Err = String;

    /// Parses an element symbol case-insensitively (`"CL"`, `"cl"` and `"Cl"` all match).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        let normalized: String = match chars.next() {
            Some(first) => first
                .to_uppercase()
                .chain(chars.flat_map(|c| c.to_lowercase()))
                .collect(),
            None => return Err("Empty element symbol".to_string()),
        };

        match normalized.as_str() {
            "H" | "D" => Ok(Element::H),
            "He" => Ok(Element::He),
            "Li" => Ok(Element::Li),
            "Be" => Ok(Element::Be),
            "B" => Ok(Element::B),
            "C" => Ok(Element::C),
            "N" => Ok(Element::N),
            "O" => Ok(Element::O),
            "F" => Ok(Element::F),
            "Ne" => Ok(Element::Ne),
            "Na" => Ok(Element::Na),
            "Mg" => Ok(Element::Mg),
            "Al" => Ok(Element::Al),
            "Si" => Ok(Element::Si),
            "P" => Ok(Element::P),
            "S" => Ok(Element::S),
            "Cl" => Ok(Element::Cl),
            "Ar" => Ok(Element::Ar),
            "K" => Ok(Element::K),
            "Ca" => Ok(Element::Ca),
            "Mn" => Ok(Element::Mn),
            "Fe" => Ok(Element::Fe),
            "Co" => Ok(Element::Co),
            "Ni" => Ok(Element::Ni),
            "Cu" => Ok(Element::Cu),
            "Zn" => Ok(Element::Zn),
            "Se" => Ok(Element::Se),
            "Br" => Ok(Element::Br),
            "I" => Ok(Element::I),
            _ => Err(format!("Unsupported element symbol: {}", trimmed)),
        }
    }
}

impl StandardResidue {
    /// Residue code as written in the hierarchy (3-letter for amino acids).
    pub fn code(&self) -> &'static str {
        match self {
            StandardResidue::ALA => "ALA",
            StandardResidue::ARG => "ARG",
            StandardResidue::ASN => "ASN",
            StandardResidue::ASP => "ASP",
            StandardResidue::CYS => "CYS",
            StandardResidue::GLN => "GLN",
            StandardResidue::GLU => "GLU",
            StandardResidue::GLY => "GLY",
            StandardResidue::HIS => "HIS",
            StandardResidue::ILE => "ILE",
            StandardResidue::LEU => "LEU",
            StandardResidue::LYS => "LYS",
            StandardResidue::MET => "MET",
            StandardResidue::PHE => "PHE",
            StandardResidue::PRO => "PRO",
            StandardResidue::SER => "SER",
            StandardResidue::THR => "THR",
            StandardResidue::TRP => "TRP",
            StandardResidue::TYR => "TYR",
            StandardResidue::VAL => "VAL",
            StandardResidue::A => "A",
            StandardResidue::C => "C",
            StandardResidue::G => "G",
            StandardResidue::U => "U",
            StandardResidue::DA => "DA",
            StandardResidue::DC => "DC",
            StandardResidue::DG => "DG",
            StandardResidue::DT => "DT",
        }
    }

    pub fn class(&self) -> ResidueClass {
        if self.is_protein() {
            ResidueClass::AminoAcid
        } else {
            ResidueClass::NucleicAcid
        }
    }

    pub fn is_protein(&self) -> bool {
        !self.is_nucleic()
    }

    pub fn is_nucleic(&self) -> bool {
        matches!(
            self,
            StandardResidue::A
                | StandardResidue::C
                | StandardResidue::G
                | StandardResidue::U
                | StandardResidue::DA
                | StandardResidue::DC
                | StandardResidue::DG
                | StandardResidue::DT
        )
    }
}

impl fmt::Display for StandardResidue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for StandardResidue {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ALA" => Ok(StandardResidue::ALA),
            "ARG" => Ok(StandardResidue::ARG),
            "ASN" => Ok(StandardResidue::ASN),
            "ASP" => Ok(StandardResidue::ASP),
            "CYS" => Ok(StandardResidue::CYS),
            "GLN" => Ok(StandardResidue::GLN),
            "GLU" => Ok(StandardResidue::GLU),
            "GLY" => Ok(StandardResidue::GLY),
            "HIS" => Ok(StandardResidue::HIS),
            "ILE" => Ok(StandardResidue::ILE),
            "LEU" => Ok(StandardResidue::LEU),
            "LYS" => Ok(StandardResidue::LYS),
            "MET" => Ok(StandardResidue::MET),
            "PHE" => Ok(StandardResidue::PHE),
            "PRO" => Ok(StandardResidue::PRO),
            "SER" => Ok(StandardResidue::SER),
            "THR" => Ok(StandardResidue::THR),
            "TRP" => Ok(StandardResidue::TRP),
            "TYR" => Ok(StandardResidue::TYR),
            "VAL" => Ok(StandardResidue::VAL),
            "A" => Ok(StandardResidue::A),
            "C" => Ok(StandardResidue::C),
            "G" => Ok(StandardResidue::G),
            "U" => Ok(StandardResidue::U),
            "DA" => Ok(StandardResidue::DA),
            "DC" => Ok(StandardResidue::DC),
            "DG" => Ok(StandardResidue::DG),
            "DT" => Ok(StandardResidue::DT),
            _ => Err(format!("Invalid standard residue: {}", s)),
        }
    }
}
