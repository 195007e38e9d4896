// src/noyau/rationnel.rs
//
// Rationnel exact (sans flottants), toujours sous forme réduite.
//
// Invariants (garantis à la construction, jamais recalculés ensuite) :
// - dénominateur > 0
// - pgcd(|numérateur|, dénominateur) = 1
// - zéro est toujours 0/1
//
// Toute opération renvoie une nouvelle valeur ; aucune mutation en place.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};
use rust_decimal::Decimal;

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;

use super::erreur::CalcError;
use super::format::format_mixte;
use super::lecture::{rational_scaled_half_up, rational_to_decimal, rational_to_percent};

/// Garde-fou : exposant décimal maximal accepté dans un littéral ("1e10000").
const EXPOSANT_MAX: u64 = 10_000;

/* ------------------------ Littéral décimal ------------------------ */

/// Décimal à précision arbitraire : valeur = mantisse / 10^echelle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecimalLiteral {
    mantisse: BigInt,
    echelle: u32,
}

impl DecimalLiteral {
    pub fn new(mantisse: BigInt, echelle: u32) -> Self {
        Self { mantisse, echelle }
    }

    /// Lit "12", "-2.50", "+.5", "5.", "1.5e3", "25e-2" (sans espaces).
    pub fn parse(s: &str) -> Option<Self> {
        let (neg, corps) = match s.as_bytes().first()? {
            b'-' => (true, &s[1..]),
            b'+' => (false, &s[1..]),
            _ => (false, s),
        };

        let (base, exposant) = match corps.find(|c: char| c == 'e' || c == 'E') {
            Some(i) => (&corps[..i], Some(&corps[i + 1..])),
            None => (corps, None),
        };

        let (ent, frac) = base.split_once('.').unwrap_or((base, ""));
        if ent.is_empty() && frac.is_empty() {
            return None;
        }
        if !ent.bytes().all(|c| c.is_ascii_digit()) || !frac.bytes().all(|c| c.is_ascii_digit())
        {
            return None;
        }

        let exp: i64 = match exposant {
            Some(e) => e.parse().ok()?,
            None => 0,
        };
        // unsigned_abs : i64::MIN n'a pas d'opposé en i64
        if exp.unsigned_abs() > EXPOSANT_MAX {
            return None;
        }

        let chiffres = format!("{ent}{frac}");
        let mut mantisse = BigInt::parse_bytes(chiffres.as_bytes(), 10)?;
        if neg {
            mantisse = -mantisse;
        }

        let echelle = frac.len() as i64 - exp;
        if echelle >= 0 {
            Some(Self::new(mantisse, u32::try_from(echelle).ok()?))
        } else {
            // échelle négative : on remonte dans la mantisse
            let k = u32::try_from(-echelle).ok()?;
            Some(Self::new(mantisse * BigInt::from(10).pow(k), 0))
        }
    }

    /// Mantisse exprimée à une échelle plus grande (ou égale).
    fn alignee(&self, echelle: u32) -> BigInt {
        &self.mantisse * BigInt::from(10).pow(echelle - self.echelle)
    }
}

impl From<Decimal> for DecimalLiteral {
    fn from(d: Decimal) -> Self {
        Self::new(BigInt::from(d.mantissa()), d.scale())
    }
}

/* ------------------------ Rationnel ------------------------ */

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Rational(BigRational);

impl Rational {
    /* --- construction --- */

    /// n/d réduit, signe porté par le numérateur.
    pub fn new(n: BigInt, d: BigInt) -> Result<Self, CalcError> {
        if d.is_zero() {
            return Err(CalcError::DivisionByZero);
        }
        Ok(Self(BigRational::new(n, d)))
    }

    pub fn from_i64_pair(n: i64, d: i64) -> Result<Self, CalcError> {
        Self::new(BigInt::from(n), BigInt::from(d))
    }

    pub fn from_integer(n: BigInt) -> Self {
        Self(BigRational::from_integer(n))
    }

    pub fn from_literal(d: &DecimalLiteral) -> Self {
        Self(BigRational::new(
            d.mantisse.clone(),
            BigInt::from(10).pow(d.echelle),
        ))
    }

    /// n/d avec alignement des échelles décimales (2.5 / 3.5 -> 25/35 -> 5/7).
    pub fn from_literal_pair(n: &DecimalLiteral, d: &DecimalLiteral) -> Result<Self, CalcError> {
        let echelle = n.echelle.max(d.echelle);
        Self::new(n.alignee(echelle), d.alignee(echelle))
    }

    pub fn from_decimal(d: Decimal) -> Self {
        Self::from_literal(&DecimalLiteral::from(d))
    }

    pub fn from_decimal_pair(n: Decimal, d: Decimal) -> Result<Self, CalcError> {
        Self::from_literal_pair(&DecimalLiteral::from(n), &DecimalLiteral::from(d))
    }

    pub fn two() -> Self {
        Self::from_integer(BigInt::from(2))
    }

    pub fn three() -> Self {
        Self::from_integer(BigInt::from(3))
    }

    pub fn one_half() -> Self {
        Self(BigRational::new(BigInt::one(), BigInt::from(2)))
    }

    pub fn one_third() -> Self {
        Self(BigRational::new(BigInt::one(), BigInt::from(3)))
    }

    /// Lit "3/4", "2.5 / 3.5", " -7 ", "1e3/4".
    ///
    /// Les espaces sont ignorés. Une seule barre de fraction au plus.
    pub fn parse(s: &str) -> Result<Self, CalcError> {
        let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        let invalide = || CalcError::InvalidFormat(s.trim().to_string());

        if compact.is_empty() || compact.starts_with('/') || compact.ends_with('/') {
            return Err(invalide());
        }

        match compact.split_once('/') {
            None => DecimalLiteral::parse(&compact)
                .map(|d| Self::from_literal(&d))
                .ok_or_else(invalide),
            Some((n, d)) => {
                let n = DecimalLiteral::parse(n).ok_or_else(invalide)?;
                let d = DecimalLiteral::parse(d).ok_or_else(invalide)?;
                Self::from_literal_pair(&n, &d)
            }
        }
    }

    /* --- accès --- */

    pub fn numer(&self) -> &BigInt {
        self.0.numer()
    }

    pub fn denom(&self) -> &BigInt {
        self.0.denom()
    }

    /* --- arithmétique --- */

    /// Division exacte ; diviseur nul => DivisionByZero.
    pub fn try_div(&self, rhs: &Rational) -> Result<Self, CalcError> {
        if rhs.0.is_zero() {
            return Err(CalcError::DivisionByZero);
        }
        Ok(Self(&self.0 / &rhs.0))
    }

    /// Puissance entière. 0^0 = 1 ; 0^(-n) => DivisionByZero.
    pub fn pow(&self, exp: i32) -> Result<Self, CalcError> {
        let e = exp.unsigned_abs();
        let n = self.numer().pow(e);
        let d = self.denom().pow(e);
        if exp < 0 {
            Self::new(d, n)
        } else {
            Self::new(n, d)
        }
    }

    pub fn negate(&self) -> Self {
        Self(-&self.0)
    }

    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    pub fn inverse(&self) -> Result<Self, CalcError> {
        Self::new(self.denom().clone(), self.numer().clone())
    }

    /* --- prédicats --- */

    pub fn is_integer(&self) -> bool {
        self.denom().is_one()
    }

    /// |n| < d
    pub fn is_proper(&self) -> bool {
        self.numer().abs() < *self.denom()
    }

    /// |n| >= d
    pub fn is_improper(&self) -> bool {
        !self.is_proper()
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    /* --- conversions entières --- */

    /// Troncature vers zéro.
    pub fn integer_part(&self) -> BigInt {
        self.numer() / self.denom()
    }

    /// Partie fractionnaire propre, toujours >= 0 : |n| mod d / d.
    pub fn fraction_part(&self) -> Self {
        Self(BigRational::new(
            self.numer().abs() % self.denom(),
            self.denom().clone(),
        ))
    }

    pub fn floor(&self) -> BigInt {
        self.0.floor().to_integer()
    }

    pub fn ceil(&self) -> BigInt {
        self.0.ceil().to_integer()
    }

    /// Arrondi half-up à l'entier (= to_decimal(0)).
    pub fn round(&self) -> BigInt {
        rational_scaled_half_up(&self.0, 0)
    }

    /* --- rendus texte --- */

    pub fn to_decimal(&self, precision: u32) -> String {
        rational_to_decimal(&self.0, precision)
    }

    pub fn to_percent(&self, precision: u32) -> String {
        rational_to_percent(&self.0, precision)
    }

    /// Nombre mixte : "-1 1/8", "3", "2/3".
    pub fn to_mixed_string(&self) -> String {
        format_mixte(self)
    }

    /// Vue flottante (avec perte).
    pub fn to_f64(&self) -> Option<f64> {
        self.0.to_f64()
    }
}

/* ------------------------ Traits ------------------------ */

impl Zero for Rational {
    fn zero() -> Self {
        Self(BigRational::zero())
    }

    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl One for Rational {
    fn one() -> Self {
        Self(BigRational::one())
    }

    fn is_one(&self) -> bool {
        self.0.is_one()
    }
}

impl From<i64> for Rational {
    fn from(n: i64) -> Self {
        Self::from_integer(BigInt::from(n))
    }
}

impl From<BigInt> for Rational {
    fn from(n: BigInt) -> Self {
        Self::from_integer(n)
    }
}

impl FromStr for Rational {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Comparaison par produits croisés (dénominateurs > 0).
impl Ord for Rational {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.numer() * other.denom()).cmp(&(other.numer() * self.denom()))
    }
}

impl PartialOrd for Rational {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_integer() {
            write!(f, "{}", self.numer())
        } else {
            write!(f, "{}/{}", self.numer(), self.denom())
        }
    }
}

impl Add<&Rational> for &Rational {
    type Output = Rational;
    fn add(self, rhs: &Rational) -> Rational {
        Rational(&self.0 + &rhs.0)
    }
}

impl Add for Rational {
    type Output = Rational;
    fn add(self, rhs: Rational) -> Rational {
        Rational(self.0 + rhs.0)
    }
}

impl Sub<&Rational> for &Rational {
    type Output = Rational;
    fn sub(self, rhs: &Rational) -> Rational {
        Rational(&self.0 - &rhs.0)
    }
}

impl Sub for Rational {
    type Output = Rational;
    fn sub(self, rhs: Rational) -> Rational {
        Rational(self.0 - rhs.0)
    }
}

impl Mul<&Rational> for &Rational {
    type Output = Rational;
    fn mul(self, rhs: &Rational) -> Rational {
        Rational(&self.0 * &rhs.0)
    }
}

impl Mul for Rational {
    type Output = Rational;
    fn mul(self, rhs: Rational) -> Rational {
        Rational(self.0 * rhs.0)
    }
}

impl Neg for Rational {
    type Output = Rational;
    fn neg(self) -> Rational {
        Rational(-self.0)
    }
}

impl Neg for &Rational {
    type Output = Rational;
    fn neg(self) -> Rational {
        self.negate()
    }
}
