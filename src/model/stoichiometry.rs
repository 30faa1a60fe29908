//! Heavy-atom composition keys used to classify side chains, caps and molecules.
//!
//! The text form lists each element symbol followed by its count in the fixed order
//! S, P, O, N, C and then any other element alphabetically (`"O1N1C3"`). Hydrogens are
//! never counted; a composition without heavy atoms prints as `"H"`.

use super::types::Element;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

const LEADING_ORDER: [Element; 5] = [Element::S, Element::P, Element::O, Element::N, Element::C];

/// Element-count multiset over heavy atoms.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Stoichiometry {
    counts: BTreeMap<Element, u32>,
}

impl Stoichiometry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts the heavy atoms among `elements`; hydrogens and unknown elements are skipped.
    pub fn from_elements(elements: impl IntoIterator<Item = Element>) -> Self {
        let mut stoich = Self::new();
        for element in elements {
            stoich.add(element);
        }
        stoich
    }

    pub fn add(&mut self, element: Element) {
        if element.is_heavy_atom() {
            *self.counts.entry(element).or_insert(0) += 1;
        }
    }

    pub fn count(&self, element: Element) -> u32 {
        self.counts.get(&element).copied().unwrap_or(0)
    }

    pub fn heavy_atom_count(&self) -> u32 {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Whether every counted element is `element`.
    pub fn only_contains(&self, element: Element) -> bool {
        !self.counts.is_empty() && self.counts.keys().all(|&e| e == element)
    }

    /// Elements in canonical key order.
    fn ordered(&self) -> Vec<(Element, u32)> {
        let mut leading: Vec<(Element, u32)> = LEADING_ORDER
            .iter()
            .filter_map(|e| self.counts.get(e).map(|&n| (*e, n)))
            .collect();
        let mut rest: Vec<(Element, u32)> = self
            .counts
            .iter()
            .filter(|(e, _)| !LEADING_ORDER.contains(e))
            .map(|(&e, &n)| (e, n))
            .collect();
        rest.sort_by_key(|(e, _)| e.symbol());
        leading.append(&mut rest);
        leading
    }

    /// Expands the composition back into its element multiset, in key order.
    pub fn elements(&self) -> Vec<Element> {
        self.ordered()
            .into_iter()
            .flat_map(|(e, n)| std::iter::repeat_n(e, n as usize))
            .collect()
    }

    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Stoichiometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.counts.is_empty() {
            return write!(f, "H");
        }
        for (element, count) in self.ordered() {
            write!(f, "{}{}", element.symbol(), count)?;
        }
        Ok(())
    }
}

impl FromStr for Stoichiometry {
    type Err = String;

    /// Parses a key such as `"S1C3"` or `"H"`. Element order in the input is not enforced.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("Empty stoichiometry key".to_string());
        }
        if s == "H" {
            return Ok(Self::new());
        }

        let mut stoich = Self::new();
        let bytes = s.as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            if !bytes[i].is_ascii_uppercase() {
                return Err(format!("Malformed stoichiometry key: {}", s));
            }
            let sym_start = i;
            i += 1;
            while i < bytes.len() && bytes[i].is_ascii_lowercase() {
                i += 1;
            }
            let symbol = &s[sym_start..i];

            let num_start = i;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            if num_start == i {
                return Err(format!("Missing count for '{}' in key: {}", symbol, s));
            }
            let count: u32 = s[num_start..i]
                .parse()
                .map_err(|_| format!("Invalid count in key: {}", s))?;

            let element: Element = symbol.parse()?;
            if !element.is_heavy_atom() {
                return Err(format!("Hydrogen cannot be counted in key: {}", s));
            }
            if count > 0 {
                *stoich.counts.entry(element).or_insert(0) += count;
            }
        }
        Ok(stoich)
    }
}
