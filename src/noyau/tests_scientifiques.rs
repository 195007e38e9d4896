//! Tests scientifiques (campagne) : invariants + robustesse + limites contrôlées.
//!
//! But : vérifier les propriétés du noyau sur des grilles de valeurs, sans faire chauffer la machine.
//! - budget temps global
//! - tailles bornées (profondeur, longueur)
//!
//! Notes :
//! - Les grilles sont petites mais couvrent signes, zéro, entiers et fractions propres/impropres.
//! - Les sommes longues (milliers de termes) vérifient que l'évaluation ne dépend pas de la pile native.

use std::time::{Duration, Instant};

use num_bigint::BigInt;
use num_traits::{One, Signed, Zero};
use rust_decimal::Decimal;

use super::analyse::parse_expression;
use super::erreur::CalcError;
use super::eval_expression;
use super::rationnel::Rational;

/// Budget global anti-gel (scientifique + safe).
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

fn pgcd(a: &BigInt, b: &BigInt) -> BigInt {
    let (mut a, mut b) = (a.abs(), b.abs());
    while !b.is_zero() {
        let r = &a % &b;
        a = b;
        b = r;
    }
    a
}

fn assert_reduit(r: &Rational) {
    assert!(r.denom().is_positive(), "dénominateur <= 0 : {r}");
    if r.numer().is_zero() {
        assert!(r.denom().is_one(), "zéro non canonique : {r:?}");
    } else {
        assert!(pgcd(r.numer(), r.denom()).is_one(), "non réduit : {r:?}");
    }
}

/// Grille de rationnels : n/d pour n ∈ [-12, 12], d ∈ [-6, 6] \ {0}.
fn grille() -> Vec<Rational> {
    let mut v = Vec::new();
    for n in -12..=12i64 {
        for d in (-6..=6i64).filter(|d| *d != 0) {
            v.push(Rational::from_i64_pair(n, d).unwrap());
        }
    }
    v
}

fn entier(expr: &str) -> BigInt {
    parse_expression(expr)
        .unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
        .evaluate_integer()
        .unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
}

/* ------------------------ Rationnels : forme canonique ------------------------ */

#[test]
fn sci_forme_reduite_entiers() {
    for r in grille() {
        assert_reduit(&r);
    }
}

#[test]
fn sci_forme_reduite_decimaux() {
    let valeurs = ["0", "0.5", "-1.25", "3", "-0.125", "10.0", "2.50", "-7"];
    for n in valeurs {
        for d in valeurs.iter().filter(|d| **d != "0") {
            let nd: Decimal = n.parse().unwrap();
            let dd: Decimal = d.parse().unwrap();
            let r = Rational::from_decimal_pair(nd, dd).unwrap();
            assert_reduit(&r);
        }
    }

    assert_eq!(
        Rational::from_decimal_pair(Decimal::ONE, Decimal::ZERO),
        Err(CalcError::DivisionByZero)
    );
}

#[test]
fn sci_resultats_d_operations_reduits() {
    let g = grille();
    for a in g.iter().step_by(7) {
        for b in g.iter().step_by(5) {
            assert_reduit(&(a + b));
            assert_reduit(&(a - b));
            assert_reduit(&(a * b));
            if !b.is_zero() {
                assert_reduit(&a.try_div(b).unwrap());
            }
        }
    }
}

/* ------------------------ Aller-retour texte ------------------------ */

#[test]
fn sci_aller_retour_texte() {
    for r in grille() {
        let s = r.to_string();
        assert_eq!(Rational::parse(&s).unwrap(), r, "texte={s:?}");
    }

    let grand = Rational::parse(&format!("{}/7", "9".repeat(60))).unwrap();
    assert_eq!(Rational::parse(&grand.to_string()).unwrap(), grand);
}

/* ------------------------ Arithmétique exacte ------------------------ */

#[test]
fn sci_addition_puis_soustraction_identite() {
    let g = grille();
    for a in g.iter().step_by(3) {
        for b in g.iter().step_by(4) {
            assert_eq!(&(a + b) - b, *a, "a={a} b={b}");
        }
    }
}

#[test]
fn sci_multiplication_puis_division_identite() {
    let g = grille();
    for a in g.iter().step_by(3) {
        for b in g.iter().step_by(4).filter(|b| !b.is_zero()) {
            assert_eq!((a * b).try_div(b).unwrap(), *a, "a={a} b={b}");
        }
    }
}

#[test]
fn sci_pas_de_derive_flottante() {
    // 0.1 ajouté dix fois vaut exactement 1
    let dixieme = Rational::parse("0.1").unwrap();
    let mut acc = Rational::zero();
    for _ in 0..10 {
        acc = &acc + &dixieme;
    }
    assert!(acc.is_one());
}

#[test]
fn sci_plancher_plafond_coherents() {
    for r in grille() {
        let f = Rational::from_integer(r.floor());
        let c = Rational::from_integer(r.ceil());
        assert!(f <= r && r <= c, "r={r}");
        if r.is_integer() {
            assert_eq!(f, c);
        } else {
            assert_eq!(&c - &f, Rational::one());
        }
        // troncature : entre zéro et r
        let t = Rational::from_integer(r.integer_part());
        assert!(t.abs() <= r.abs());
    }
}

#[test]
fn sci_decimal_demande() {
    let r = Rational::from_i64_pair(5, 3).unwrap();
    assert_eq!(r.to_decimal(2), "1.67");
    assert_eq!(parse_expression("5 / 3").unwrap().evaluate_decimal(2).unwrap(), "1.67");
}

/* ------------------------ Parseur : propriétés attendues ------------------------ */

#[test]
fn sci_proprietes_parseur() {
    assert_eq!(entier("1 + 2 + 3"), BigInt::from(6));
    assert_eq!(entier("1 - -2 - -3"), BigInt::from(6));
    assert_eq!(entier("-12 / -6 / -2"), BigInt::from(-1));
    assert_eq!(entier("1 * -(2 * -3)"), BigInt::from(6));

    assert!(matches!(
        parse_expression("(1+2+3"),
        Err(CalcError::MalformedExpression(_))
    ));
    assert_eq!(Rational::parse("1/0"), Err(CalcError::DivisionByZero));
    assert!(matches!(Rational::parse("/2"), Err(CalcError::InvalidFormat(_))));
}

#[test]
fn sci_evaluation_idempotente() {
    for expr in ["1/3 + 1/6", "-(2.5 - 7) * 3", "2(3)(4) / 5", "0.1 * 0.1 - 1/100"] {
        let arbre = parse_expression(expr).unwrap();
        let a = arbre.evaluate_exact().unwrap();
        let b = arbre.evaluate_exact().unwrap();
        assert_eq!(a, b, "expr={expr:?}");
        assert_eq!(arbre.evaluate_decimal(10).unwrap(), arbre.evaluate_decimal(10).unwrap());
    }
}

#[test]
fn sci_zero_algebrique() {
    assert_eq!(eval_expression("0.1 * 0.1 - 1/100", 5).unwrap().fraction, "0");
    assert_eq!(eval_expression("(1/3 - 1/3) * 7", 5).unwrap().decimal, "0.00000");
}

/* ------------------------ Stress (bornés) ------------------------ */

#[test]
fn sci_stress_taille_somme_safe() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    // 5 000 termes : chaîne gauche profonde, évaluée sans récursion
    let mut expr = String::new();
    for k in 0..5_000 {
        if k > 0 {
            expr.push_str(" + ");
        }
        expr.push_str("1 / 2");
        budget(t0, max);
    }

    // 5000*(1/2)=2500
    let e = eval_expression(&expr, 3).unwrap_or_else(|e| panic!("err: {e}"));
    assert_eq!(e.fraction, "2500");
    assert_eq!(e.decimal, "2500.000");
}

#[test]
fn sci_stress_bigint_safe() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    // gros numérateur contrôlé (100 chiffres)
    let big = "9".repeat(100);
    let expr = format!("{big} / 7 + 1 / 7");
    budget(t0, max);

    // 10^100 / 7 : doit rester exact et ne pas geler
    let e = eval_expression(&expr, 20).unwrap_or_else(|e| panic!("err: {e}"));
    assert_eq!(e.fraction, format!("1{}/7", "0".repeat(100)));
}

#[test]
fn sci_stress_produit_de_decimaux() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    // 1.1^40 : numérateur 11^40, dénominateur 10^40, aucune perte
    let expr = vec!["1.1"; 40].join(" * ");
    budget(t0, max);

    let v = eval_expression(&expr, 5).unwrap().valeur;
    assert_eq!(v, Rational::from_i64_pair(11, 10).unwrap().pow(40).unwrap());
}
