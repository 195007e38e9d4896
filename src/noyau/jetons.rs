// src/noyau/jetons.rs
//
// Jetons (symboles lexicaux) + tables statiques de configuration.
//
// Un jeton = une nature (Number / Operator / Parenthesis / FunctionName) + son texte brut.
// Deux jetons sont égaux ssi nature ET texte sont égaux.

use std::fmt;

/// Opérateurs binaires reconnus (un caractère chacun).
pub const OPERATEURS: [char; 4] = ['+', '-', '*', '/'];

/// Parenthèses reconnues.
pub const PARENTHESES: [char; 2] = ['(', ')'];

/// Fonctions mathématiques reconnues par la lecture mais PAS implémentées :
/// l'analyse les rejette toujours (voir analyse.rs).
pub const FONCTIONS_RECONNUES: [&str; 9] = ["!", "E", "PI", "^", "cos", "ln", "log", "sin", "tan"];

/// Liste triée (ordre des octets) pour affichage.
pub fn fonctions_triees() -> Vec<&'static str> {
    let mut v = FONCTIONS_RECONNUES.to_vec();
    v.sort_unstable();
    v
}

pub fn est_operateur(c: char) -> bool {
    OPERATEURS.contains(&c)
}

pub fn est_parenthese(c: char) -> bool {
    PARENTHESES.contains(&c)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Number,
    Operator,
    Parenthesis,
    // Reconnu mais non implémenté : toujours refusé par l'analyse.
    FunctionName,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Token {
    kind: TokenKind,
    text: String,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn number(text: impl Into<String>) -> Self {
        Self::new(TokenKind::Number, text)
    }

    pub fn operator(c: char) -> Self {
        Self::new(TokenKind::Operator, c)
    }

    pub fn parenthesis(c: char) -> Self {
        Self::new(TokenKind::Parenthesis, c)
    }

    pub fn function_name(text: impl Into<String>) -> Self {
        Self::new(TokenKind::FunctionName, text)
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Caractère porté par un opérateur ou une parenthèse.
    pub fn symbol(&self) -> Option<char> {
        match self.kind {
            TokenKind::Operator | TokenKind::Parenthesis => {
                let mut it = self.text.chars();
                match (it.next(), it.next()) {
                    (Some(c), None) => Some(c),
                    _ => None,
                }
            }
            TokenKind::Number | TokenKind::FunctionName => None,
        }
    }

    /// Vrai si le jeton est exactement ce symbole (opérateur ou parenthèse).
    pub fn is_symbol(&self, c: char) -> bool {
        self.symbol() == Some(c)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Format utilitaire (debug/“démarche”) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|t| t.text().to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
