//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - on accepte les erreurs attendues (division par zéro, expression malformée, littéral illisible)
//! - invariants clés : lectures cohérentes avec la valeur exacte, évaluation idempotente

use std::time::{Duration, Instant};

use num_traits::Zero;

use super::analyse::parse_expression;
use super::erreur::CalcError;
use super::eval_expression;
use super::rationnel::Rational;

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Helpers fuzz ------------------------ */

fn is_erreur_attendue(e: &CalcError) -> bool {
    // Liste blanche : pour un fuzz, les trois natures d'erreur sont normales ;
    // ce qui ne l'est pas, c'est une panique.
    matches!(
        e,
        CalcError::DivisionByZero | CalcError::InvalidFormat(_) | CalcError::MalformedExpression(_)
    )
}

/// |valeur - lecture décimale| <= 1/2 * 10^-digits
fn check_invariant_decimal(valeur: &Rational, decimal: &str, digits: u32) {
    let lu = Rational::parse(decimal).unwrap_or_else(|e| panic!("décimal illisible {decimal:?}: {e}"));
    let ecart = (valeur - &lu).abs();
    let demi_ulp = Rational::parse(&format!("0.5e-{digits}")).unwrap();
    assert!(ecart <= demi_ulp, "valeur={valeur} decimal={decimal}");
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

fn gen_nombre(rng: &mut Rng) -> String {
    // petits entiers (0 inclus : utile pour les divisions par zéro) et décimaux simples
    let a = rng.pick(13);
    match rng.pick(4) {
        0 => format!("{a}.{}", rng.pick(100)),
        1 => format!("{a}.5"),
        _ => format!("{a}"),
    }
}

fn gen_atom(rng: &mut Rng) -> String {
    match rng.pick(6) {
        0 => format!("-{}", gen_nombre(rng)),
        _ => gen_nombre(rng),
    }
}

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_atom(rng);
    }

    match rng.pick(9) {
        0 => gen_atom(rng),
        1 => format!("{} + {}", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        2 => format!("{} - {}", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        3 => format!("{} * {}", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        4 => format!("{} / {}", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        5 => format!("({})", gen_expr(rng, depth - 1)),
        6 => format!("-({})", gen_expr(rng, depth - 1)),
        // multiplication implicite
        7 => format!("{}({})", gen_atom(rng), gen_expr(rng, depth - 1)),
        _ => {
            if rng.coin() {
                format!("({})/({})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1))
            } else {
                format!("{}*{}", gen_atom(rng), gen_atom(rng))
            }
        }
    }
}

/// Abîme une expression valide : caractère inséré, supprimé, ou fonction.
fn abime(rng: &mut Rng, expr: &str) -> String {
    let mut chars: Vec<char> = expr.chars().collect();
    let i = rng.pick(chars.len() as u32 + 1) as usize;
    match rng.pick(4) {
        0 => {
            let c = ['(', ')', '+', '*', '$', '.', 'x'][rng.pick(7) as usize];
            chars.insert(i, c);
        }
        1 if !chars.is_empty() => {
            chars.remove(i.min(chars.len() - 1));
        }
        2 => return format!("sin({expr})"),
        _ => return format!("{expr} 7"),
    }
    chars.into_iter().collect()
}

/* ------------------------ Helper somme balancée (arbre équilibré) ------------------------ */

fn somme_balancee(terme: &str, n: usize) -> String {
    let mut items: Vec<String> = (0..n).map(|_| terme.to_string()).collect();
    while items.len() > 1 {
        let mut next = Vec::new();
        let mut i = 0;
        while i < items.len() {
            if i + 1 < items.len() {
                next.push(format!("({}+{})", items[i], items[i + 1]));
                i += 2;
            } else {
                next.push(items[i].clone());
                i += 1;
            }
        }
        items = next;
    }
    items.pop().unwrap_or_else(|| "0".to_string())
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_determinisme_et_lectures() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..200 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 4);
        let digits = 1 + rng.pick(12);

        match eval_expression(&expr, digits) {
            Ok(e) => {
                check_invariant_decimal(&e.valeur, &e.decimal, digits);
                assert_eq!(e.entier, e.valeur.integer_part().to_string());
                assert_eq!(Rational::parse(&e.fraction).unwrap(), e.valeur);

                // déterminisme : même entrée => mêmes sorties
                let bis = eval_expression(&expr, digits).unwrap();
                assert_eq!(bis.fraction, e.fraction);
                assert_eq!(bis.demarche.arbre, e.demarche.arbre);
                seen_ok += 1;
            }
            Err(e) => {
                assert!(
                    is_erreur_attendue(&e),
                    "erreur non attendue: expr={expr:?} err={e}"
                );
                // seule une division par zéro peut faire échouer une expression générée valide
                assert_eq!(e, CalcError::DivisionByZero, "expr={expr:?}");
                seen_err += 1;
            }
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 50, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 0, "aucune erreur vue: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_entrees_abimees_sans_panique() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::new(0xBADC0DE_u64);
    let mut seen_malformee = 0usize;

    for _ in 0..300 {
        budget(t0, max);

        let base = gen_expr(&mut rng, 3);
        let expr = abime(&mut rng, &base);

        match eval_expression(&expr, 6) {
            Ok(e) => check_invariant_decimal(&e.valeur, &e.decimal, 6),
            Err(e) => {
                assert!(is_erreur_attendue(&e), "expr={expr:?} err={e}");
                if let CalcError::MalformedExpression(m) = &e {
                    assert_eq!(m.expression, expr.trim());
                    if let Some(p) = m.position {
                        assert!(p <= expr.trim().chars().count(), "position hors texte: {m:?}");
                    }
                    seen_malformee += 1;
                }
            }
        }
    }

    assert!(seen_malformee > 50, "trop peu d'expressions refusées: {seen_malformee}");
}

#[test]
fn fuzz_safe_evaluation_idempotente() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);

    let mut rng = Rng::new(0x5EED_u64);

    for _ in 0..100 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 4);
        let Ok(arbre) = parse_expression(&expr) else {
            panic!("expression générée refusée: {expr:?}");
        };
        assert_eq!(arbre.evaluate_exact(), arbre.evaluate_exact(), "expr={expr:?}");
        assert_eq!(arbre.evaluate_decimal(8), arbre.evaluate_decimal(8), "expr={expr:?}");
    }
}

#[test]
fn fuzz_safe_chaines_longues() {
    let t0 = Instant::now();
    let max = Duration::from_millis(2000);

    let mut rng = Rng::new(0x10_000_u64);

    for _ in 0..4 {
        budget(t0, max);

        // a0 ± a1 ± ... : chaîne gauche de 5 000 termes, référence calculée pas à pas
        let mut expr = String::new();
        let mut attendu = Rational::zero();
        for k in 0..5_000 {
            let a = rng.pick(20);
            let plus = k == 0 || rng.coin();
            if k > 0 {
                expr.push_str(if plus { " + " } else { " - " });
            }
            expr.push_str(&a.to_string());
            let a = Rational::from(i64::from(a));
            attendu = if plus { attendu + a } else { attendu - a };
        }

        let e = eval_expression(&expr, 0).unwrap_or_else(|e| panic!("err: {e}"));
        assert_eq!(e.valeur, attendu);
    }
}

#[test]
fn fuzz_safe_somme_balancee() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);

    let expr = somme_balancee("1/2", 800);
    budget(t0, max);

    let e = eval_expression(&expr, 10).unwrap_or_else(|e| panic!("err: {e}"));

    // 800*(1/2) = 400
    assert_eq!(e.fraction, "400");
    assert_eq!(e.decimal, "400.0000000000");
}
