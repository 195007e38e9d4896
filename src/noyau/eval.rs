//! Noyau — évaluation (pipeline réel)
//!
//! texte -> (jetons, pour la démarche) -> analyse -> ExprTree -> Rational
//!       -> fraction / entier tronqué / décimal half-up / mixte / pourcentage
//!
//! Une erreur (analyse ou calcul) arrête l'expression en cours ; l'appelant
//! passe simplement à la suivante.

use super::analyse::parse_expression;
use super::erreur::CalcError;
use super::jetons::format_tokens;
use super::lexeur::tokenize;
use super::rationnel::Rational;

#[derive(Default, Clone, Debug)]
pub struct DemarcheNoyau {
    pub jetons: String,
    pub arbre: String,
    pub noeuds: usize,
    pub note: String,
}

/// Résultat complet d'une évaluation.
#[derive(Clone, Debug)]
pub struct Evaluation {
    pub valeur: Rational,
    pub fraction: String,
    pub entier: String,
    pub decimal: String,
    pub mixte: String,
    pub pourcentage: String,
    pub demarche: DemarcheNoyau,
}

/// API publique : évalue une expression et retourne ses différentes lectures.
///
/// `digits` = nombre de chiffres après la virgule (décimal et pourcentage).
pub fn eval_expression(expr_str: &str, digits: u32) -> Result<Evaluation, CalcError> {
    let s = expr_str.trim();

    // 1) Analyse -> arbre
    let arbre = parse_expression(s)?;

    // 2) Valeur exacte (une seule évaluation, les lectures en dérivent)
    let valeur = arbre.evaluate_exact()?;
    log::debug!("{s:?} = {valeur}");

    // 3) Démarche
    let demarche = DemarcheNoyau {
        jetons: format_tokens(&tokenize(s)),
        arbre: arbre.to_string(),
        noeuds: arbre.taille(),
        note: "Pipeline: jetons → arbre (priorités + / -, * /) → rationnel exact → lectures.".into(),
    };

    Ok(Evaluation {
        fraction: valeur.to_string(),
        entier: valeur.integer_part().to_string(),
        decimal: valeur.to_decimal(digits),
        mixte: valeur.to_mixed_string(),
        pourcentage: valeur.to_percent(digits),
        valeur,
        demarche,
    })
}
