// src/noyau/arbre.rs
//
// Arbre d'expression exact.
// - Literal : feuille, texte brut du nombre ("12", "-2.5") relu en Rational à l'évaluation
// - Add / Sub / Mul / Div : noeud binaire, chaque noeud possède ses enfants (Box)
//
// L'opérateur est résolu une fois à l'analyse (variante), jamais relu comme texte.
// Évaluation = réduction post-ordre pure : pas de mutation, résultat identique à chaque appel.
//
// Profondeur : "1+1+...+1" donne une chaîne gauche aussi longue que la somme.
// Aucun parcours ne récurse donc sur la pile native (évaluation, affichage,
// taille, égalité, libération) : tous passent par une pile explicite.

use num_bigint::BigInt;

use std::fmt;
use std::mem;

use super::erreur::CalcError;
use super::jetons::Token;
use super::rationnel::Rational;

pub enum ExprTree {
    Literal(Token),

    Add(Box<ExprTree>, Box<ExprTree>),
    Sub(Box<ExprTree>, Box<ExprTree>),
    Mul(Box<ExprTree>, Box<ExprTree>),
    Div(Box<ExprTree>, Box<ExprTree>),
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Op {
    Add,
    Sub,
    Mul,
    Div,
}

impl Op {
    fn nom(self) -> &'static str {
        match self {
            Op::Add => "add",
            Op::Sub => "sub",
            Op::Mul => "mul",
            Op::Div => "div",
        }
    }

    fn appliquer(self, gauche: Rational, droite: Rational) -> Result<Rational, CalcError> {
        match self {
            Op::Add => Ok(gauche + droite),
            Op::Sub => Ok(gauche - droite),
            Op::Mul => Ok(gauche * droite),
            Op::Div => gauche.try_div(&droite),
        }
    }
}

/// Reste à faire en remontant de l'évaluation d'un sous-arbre.
enum Suite<'a> {
    /// sous-arbre gauche évalué : il reste le droit
    Droite(Op, &'a ExprTree),
    /// les deux côtés connus : combiner
    Combiner(Op, Rational),
}

/// Vue d'un noeud : feuille ou opération binaire.
enum Forme<'a> {
    Feuille(&'a Token),
    Binaire(Op, &'a ExprTree, &'a ExprTree),
}

/// Morceaux d'affichage, dépilés dans l'ordre.
enum Morceau<'a> {
    Noeud(&'a ExprTree),
    Texte(&'static str),
}

impl ExprTree {
    pub fn literal(token: Token) -> Self {
        ExprTree::Literal(token)
    }

    /// Noeud binaire pour un opérateur `+ - * /`. None pour tout autre symbole.
    pub fn binary(op: char, left: ExprTree, right: ExprTree) -> Option<Self> {
        let (l, r) = (Box::new(left), Box::new(right));
        match op {
            '+' => Some(ExprTree::Add(l, r)),
            '-' => Some(ExprTree::Sub(l, r)),
            '*' => Some(ExprTree::Mul(l, r)),
            '/' => Some(ExprTree::Div(l, r)),
            _ => None,
        }
    }

    fn forme(&self) -> Forme<'_> {
        use ExprTree::*;
        match self {
            Literal(t) => Forme::Feuille(t),
            Add(a, b) => Forme::Binaire(Op::Add, a, b),
            Sub(a, b) => Forme::Binaire(Op::Sub, a, b),
            Mul(a, b) => Forme::Binaire(Op::Mul, a, b),
            Div(a, b) => Forme::Binaire(Op::Div, a, b),
        }
    }

    /// Valeur exacte.
    ///
    /// Descente le long de la branche gauche, puis remontée : chaque sous-arbre droit
    /// est évalué de la même façon, sa suite attendant sur la pile.
    pub fn evaluate_exact(&self) -> Result<Rational, CalcError> {
        let mut suites: Vec<Suite<'_>> = Vec::new();
        let mut noeud = self;

        loop {
            let mut valeur = loop {
                match noeud.forme() {
                    Forme::Feuille(t) => break Rational::parse(t.text())?,
                    Forme::Binaire(op, gauche, droite) => {
                        suites.push(Suite::Droite(op, droite));
                        noeud = gauche;
                    }
                }
            };

            loop {
                match suites.pop() {
                    None => return Ok(valeur),
                    Some(Suite::Droite(op, droite)) => {
                        suites.push(Suite::Combiner(op, valeur));
                        noeud = droite;
                        break;
                    }
                    Some(Suite::Combiner(op, gauche)) => {
                        valeur = op.appliquer(gauche, valeur)?;
                    }
                }
            }
        }
    }

    /// Valeur tronquée vers zéro.
    pub fn evaluate_integer(&self) -> Result<BigInt, CalcError> {
        Ok(self.evaluate_exact()?.integer_part())
    }

    /// Valeur décimale, `precision` chiffres après la virgule, arrondi half-up.
    pub fn evaluate_decimal(&self, precision: u32) -> Result<String, CalcError> {
        Ok(self.evaluate_exact()?.to_decimal(precision))
    }

    /// Nombre de noeuds (feuilles comprises).
    pub fn taille(&self) -> usize {
        let mut pile = vec![self];
        let mut n = 0;
        while let Some(noeud) = pile.pop() {
            n += 1;
            if let Forme::Binaire(_, a, b) = noeud.forme() {
                pile.push(a);
                pile.push(b);
            }
        }
        n
    }

    /// Remplace les deux enfants par des feuilles vides et les dépose sur `pile`.
    fn detacher_enfants(&mut self, pile: &mut Vec<ExprTree>) {
        use ExprTree::*;
        if let Add(a, b) | Sub(a, b) | Mul(a, b) | Div(a, b) = self {
            pile.push(mem::replace(&mut **a, ExprTree::Literal(Token::number(String::new()))));
            pile.push(mem::replace(&mut **b, ExprTree::Literal(Token::number(String::new()))));
        }
    }
}

/* ------------------------ Libération sans récursion ------------------------ */

impl Drop for ExprTree {
    fn drop(&mut self) {
        let mut pile = Vec::new();
        self.detacher_enfants(&mut pile);
        while let Some(mut noeud) = pile.pop() {
            noeud.detacher_enfants(&mut pile);
            // `noeud` n'a plus que des feuilles vides : sa libération ne descend pas
        }
    }
}

/* ------------------------ Égalité structurelle ------------------------ */

impl PartialEq for ExprTree {
    fn eq(&self, other: &Self) -> bool {
        let mut paires = vec![(self, other)];
        while let Some((a, b)) = paires.pop() {
            match (a.forme(), b.forme()) {
                (Forme::Feuille(x), Forme::Feuille(y)) if x == y => {}
                (Forme::Binaire(op_a, ga, da), Forme::Binaire(op_b, gb, db)) if op_a == op_b => {
                    paires.push((ga, gb));
                    paires.push((da, db));
                }
                _ => return false,
            }
        }
        true
    }
}

impl Eq for ExprTree {}

/* ------------------------ Affichage debug : op(gauche, droite) ------------------------ */

impl fmt::Display for ExprTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut pile = vec![Morceau::Noeud(self)];
        while let Some(m) = pile.pop() {
            match m {
                Morceau::Texte(s) => f.write_str(s)?,
                Morceau::Noeud(n) => match n.forme() {
                    Forme::Feuille(t) => write!(f, "{t}")?,
                    Forme::Binaire(op, a, b) => {
                        write!(f, "{}(", op.nom())?;
                        pile.push(Morceau::Texte(")"));
                        pile.push(Morceau::Noeud(b));
                        pile.push(Morceau::Texte(", "));
                        pile.push(Morceau::Noeud(a));
                    }
                },
            }
        }
        Ok(())
    }
}

impl fmt::Debug for ExprTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExprTree({self})")
    }
}
