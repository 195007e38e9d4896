// src/noyau/lecture.rs
//
// Lecture décimale d'un rationnel exact.
// - arrondi "half-up" : 0.5 s'éloigne de zéro (1.6665 -> 1.667, -1.6665 -> -1.667)
// - rendu texte à nombre de chiffres fixe (zéros de remplissage conservés)
// - pourcentage : même arrondi, deux chiffres de plus, virgule décalée

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Signed;

/* ------------------------ Décimal (scaled -> texte) ------------------------ */

fn pow10(n: u32) -> BigInt {
    BigInt::from(10).pow(n)
}

/// Convertit un entier “scalé” (×10^digits) en texte décimal.
pub fn scaled_to_decimal(mut scaled: BigInt, digits: u32) -> String {
    let neg = scaled.is_negative();
    if neg {
        scaled = -scaled;
    }

    let scale = pow10(digits);
    let int_part = &scaled / &scale;
    let frac_part = &scaled % &scale;

    if digits == 0 {
        return if neg {
            format!("-{int_part}")
        } else {
            format!("{int_part}")
        };
    }

    let mut frac = frac_part.to_str_radix(10);
    let largeur = digits as usize;
    while frac.len() < largeur {
        frac.insert(0, '0');
    }

    if neg {
        format!("-{int_part}.{frac}")
    } else {
        format!("{int_part}.{frac}")
    }
}

/// r -> entier “scalé” = r * 10^digits arrondi half-up (symétrique autour de zéro).
pub fn rational_scaled_half_up(r: &BigRational, digits: u32) -> BigInt {
    let num = r.numer().abs() * pow10(digits);
    let d = r.denom();

    let mut q = &num / d;
    let reste = &num % d;
    if reste * 2u32 >= *d {
        q += 1u32;
    }

    if r.is_negative() {
        -q
    } else {
        q
    }
}

/// Rendu décimal à `digits` chiffres après la virgule.
pub fn rational_to_decimal(r: &BigRational, digits: u32) -> String {
    scaled_to_decimal(rational_scaled_half_up(r, digits), digits)
}

/// Rendu pourcentage : 18/25 à 1 chiffre -> "72.0%".
pub fn rational_to_percent(r: &BigRational, digits: u32) -> String {
    // r*100 à `digits` chiffres == r à `digits + 2` chiffres, virgule décalée de 2
    let scaled = rational_scaled_half_up(r, digits.saturating_add(2));
    format!("{}%", scaled_to_decimal(scaled, digits))
}
