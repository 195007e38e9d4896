//! Noyau exact
//!
//! Organisation interne :
//! - rationnel.rs : Rational (fraction réduite, précision arbitraire)
//! - lecture.rs   : lectures décimales half-up (+ pourcentage)
//! - format.rs    : rendus “jolis” (nombre mixte)
//! - jetons.rs    : Token + tables statiques (opérateurs, fonctions reconnues)
//! - lexeur.rs    : lecture des jetons à la demande (peek / consume)
//! - arbre.rs     : ExprTree + évaluation exacte
//! - analyse.rs   : descente récursive texte -> ExprTree
//! - erreur.rs    : CalcError
//! - eval.rs      : pipeline complet

pub mod analyse;
pub mod arbre;
pub mod erreur;
pub mod eval;
pub mod format;
pub mod jetons;
pub mod lecture;
pub mod lexeur;
pub mod rationnel;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use analyse::{parse_expression, Parser};
pub use arbre::ExprTree;
pub use erreur::{CalcError, Malformation};
pub use eval::{eval_expression, DemarcheNoyau, Evaluation};
pub use jetons::{Token, TokenKind};
pub use lexeur::Lexer;
pub use rationnel::{DecimalLiteral, Rational};
