// src/noyau/format.rs
//
// Rendus texte "jolis" (UI / démarche) :
// - nombre mixte : "-1 1/8"
// - rationnel compact : "n" ou "n/d"

use num_traits::Zero;

use super::rationnel::Rational;

/// Nombre mixte : partie entière + partie fractionnaire propre.
///
/// Le signe est porté par le premier morceau affiché :
/// - 9/8  -> "1 1/8"
/// - -9/8 -> "-1 1/8"
/// - -1/8 -> "-1/8" (partie entière nulle : pas de "0 ...")
/// - 3    -> "3"
pub fn format_mixte(r: &Rational) -> String {
    if r.is_integer() {
        return format!("{}", r.numer());
    }

    let entier = r.integer_part();
    if entier.is_zero() {
        return format_rat_pretty(r);
    }

    format!("{entier} {}", format_rat_pretty(&r.fraction_part()))
}

pub fn format_rat_pretty(r: &Rational) -> String {
    let n = r.numer();
    let d = r.denom();
    if r.is_integer() {
        format!("{n}")
    } else {
        format!("{n}/{d}")
    }
}
