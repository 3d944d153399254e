//! Expected chromatographic elution order of related lipids.
//!
//! All functions here are pure. They encode the reversed-phase expectations that
//! lipid classes elute in a fixed order, that longer acyl chains retain longer,
//! and that more unsaturated chains retain less.
use std::cmp::Ordering;

use crate::lipid::{Lipid, LipidClass};

/// Glycerophospholipid classes, earliest eluting first. Classes not listed here
/// elute after all of them.
pub const CLASS_ELUTION_ORDER: [LipidClass; 6] = [
    LipidClass::PG,
    LipidClass::PE,
    LipidClass::PI,
    LipidClass::PC,
    LipidClass::PA,
    LipidClass::PS,
];

fn elution_rank(class: LipidClass) -> Option<usize> {
    CLASS_ELUTION_ORDER.iter().position(|c| *c == class)
}

/// Compare two lipid classes by the order they elute in. [`Ordering::Less`] means
/// `a` elutes before `b`.
///
/// Two classes absent from [`CLASS_ELUTION_ORDER`] compare equal, and an absent
/// class elutes after any listed class.
pub fn compare_lipid_class_elution_order(a: LipidClass, b: LipidClass) -> Ordering {
    match (elution_rank(a), elution_rank(b)) {
        (Some(a), Some(b)) => a.cmp(&b),
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
    }
}

#[inline]
pub fn elutes_before(a: LipidClass, b: LipidClass) -> bool {
    compare_lipid_class_elution_order(a, b).is_lt()
}

#[inline]
pub fn elutes_after(a: LipidClass, b: LipidClass) -> bool {
    compare_lipid_class_elution_order(a, b).is_gt()
}

#[inline]
pub fn elutes_same_as(a: LipidClass, b: LipidClass) -> bool {
    compare_lipid_class_elution_order(a, b).is_eq()
}

/// Whether `a` has more carbons than `b` but eluted earlier, when both are of the
/// same class and unsaturation.
pub fn violates_carbon_elution_order(a: &Lipid, rt_a: f64, b: &Lipid, rt_b: f64) -> bool {
    a.lipid_class == b.lipid_class
        && a.double_bond_count == b.double_bond_count
        && a.carbon_count > b.carbon_count
        && rt_a < rt_b
}

/// Whether `a` has more double bonds than `b` but eluted later, when both are of
/// the same class and chain length.
pub fn violates_double_bond_elution_order(a: &Lipid, rt_a: f64, b: &Lipid, rt_b: f64) -> bool {
    a.lipid_class == b.lipid_class
        && a.carbon_count == b.carbon_count
        && a.double_bond_count > b.double_bond_count
        && rt_a > rt_b
}

/// Whether `a`'s class elutes after `b`'s but `a` eluted earlier, when both have
/// the same chain length and unsaturation.
pub fn violates_lipid_class_elution_order(a: &Lipid, rt_a: f64, b: &Lipid, rt_b: f64) -> bool {
    a.carbon_count == b.carbon_count
        && a.double_bond_count == b.double_bond_count
        && elutes_after(a.lipid_class, b.lipid_class)
        && rt_a < rt_b
}
