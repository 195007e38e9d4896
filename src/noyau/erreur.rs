// src/noyau/erreur.rs
//
// Erreurs du noyau.
// - DivisionByZero      : dénominateur nul (littéral "n/0" ou division par une valeur nulle)
// - InvalidFormat       : littéral numérique illisible ("", "/2", "1.2.3", ...)
// - MalformedExpression : structure de l'expression invalide (voir Malformation)
//
// Toutes sont fatales pour l'expression en cours : pas de reprise partielle.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalcError {
    #[error("division par zéro")]
    DivisionByZero,

    #[error("format numérique invalide : '{0}' (ex: '3/4' ou '2.5')")]
    InvalidFormat(String),

    #[error("{0}")]
    MalformedExpression(Malformation),
}

/// Contexte d'une expression malformée : ce qui était attendu, ce qui a été trouvé, où.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Malformation {
    pub attendu: String,
    /// None = fin de l'expression atteinte.
    pub trouve: Option<String>,
    /// Index (en caractères) dans l'expression, si connu.
    pub position: Option<usize>,
    pub expression: String,
}

impl Malformation {
    pub fn fin_atteinte(attendu: impl Into<String>, expression: &str) -> Self {
        Self {
            attendu: attendu.into(),
            trouve: None,
            position: None,
            expression: expression.to_string(),
        }
    }

    pub fn trouve(
        attendu: impl Into<String>,
        trouve: impl Into<String>,
        expression: &str,
        position: usize,
    ) -> Self {
        Self {
            attendu: attendu.into(),
            trouve: Some(trouve.into()),
            position: Some(position),
            expression: expression.to_string(),
        }
    }
}

impl fmt::Display for Malformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.trouve, self.position) {
            (Some(t), Some(p)) => write!(
                f,
                "attendu {}, mais trouvé '{t}' dans \"{}\" à l'index {p}",
                self.attendu, self.expression
            ),
            (Some(t), None) => write!(
                f,
                "attendu {}, mais trouvé '{t}' dans \"{}\"",
                self.attendu, self.expression
            ),
            (None, _) => write!(
                f,
                "attendu {}, mais fin de l'expression atteinte : \"{}\"",
                self.attendu, self.expression
            ),
        }
    }
}

impl From<Malformation> for CalcError {
    fn from(m: Malformation) -> Self {
        CalcError::MalformedExpression(m)
    }
}
