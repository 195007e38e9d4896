// src/noyau/lexeur.rs
//
// Lecture des jetons à la demande (pas de pré-tokenisation complète).
//
// Contrat peek / consume (asymétrie voulue, l'analyse s'appuie dessus) :
// - consume() lit UN jeton complet : opérateur, parenthèse, nombre (suite maximale
//   de chiffres et de '.'), identifiant (suite maximale de lettres ASCII).
// - peek() ne regarde qu'UN caractère : pour un nombre ou un identifiant, le jeton
//   rendu est provisoire ("1" pour "12.5", "s" pour "sin"). Seul consume() garantit
//   le texte complet. Tout caractère non reconnu est vu par peek() comme un
//   FunctionName d'un caractère, ce qui permet à l'analyse de le signaler.
// - consume() sur un caractère non reconnu rend None (pas d'erreur ici) et avance
//   d'un caractère ; c'est l'analyse qui remonte l'erreur.

use super::jetons::{est_operateur, est_parenthese, Token, TokenKind};

#[derive(Clone, Debug)]
pub struct Lexer {
    chars: Vec<char>,
    pos: usize,
}

impl Lexer {
    pub fn new(s: &str) -> Self {
        Self {
            chars: s.chars().collect(),
            pos: 0,
        }
    }

    /// Position courante (en caractères), pour les messages d'erreur.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Position du prochain caractère non blanc (début du prochain jeton).
    pub fn position_suivante(&self) -> usize {
        self.chars[self.pos..]
            .iter()
            .position(|c| !c.is_whitespace())
            .map_or(self.chars.len(), |i| self.pos + i)
    }

    /// Prochain caractère non blanc, sans avancer.
    pub fn caractere_suivant(&self) -> Option<char> {
        self.chars[self.pos..]
            .iter()
            .copied()
            .find(|c| !c.is_whitespace())
    }

    /// Jeton suivant SANS avancer (un seul caractère regardé, voir en-tête).
    pub fn peek(&self) -> Option<Token> {
        let c = self.caractere_suivant()?;

        let t = if est_operateur(c) {
            Token::operator(c)
        } else if est_parenthese(c) {
            Token::parenthesis(c)
        } else if c.is_ascii_digit() {
            Token::new(TokenKind::Number, c)
        } else {
            Token::new(TokenKind::FunctionName, c)
        };
        Some(t)
    }

    /// Consomme et rend le jeton suivant complet (None en fin d'entrée ou sur caractère inconnu).
    pub fn consume(&mut self) -> Option<Token> {
        while self.pos < self.chars.len() && self.chars[self.pos].is_whitespace() {
            self.pos += 1;
        }
        if self.pos >= self.chars.len() {
            return None;
        }

        let start = self.pos;
        let c = self.chars[self.pos];
        self.pos += 1;

        let t = if est_operateur(c) {
            Token::operator(c)
        } else if est_parenthese(c) {
            Token::parenthesis(c)
        } else if c.is_ascii_digit() {
            self.avance_tant_que(|c| c.is_ascii_digit() || c == '.');
            Token::number(self.texte(start))
        } else if c.is_ascii_alphabetic() {
            self.avance_tant_que(|c| c.is_ascii_alphabetic());
            Token::function_name(self.texte(start))
        } else {
            log::trace!("caractère non reconnu {c:?} @ {start}");
            return None;
        };

        log::trace!("jeton {:?} {:?} @ {start}", t.kind(), t.text());
        Some(t)
    }

    fn avance_tant_que(&mut self, garde: impl Fn(char) -> bool) {
        while self.pos < self.chars.len() && garde(self.chars[self.pos]) {
            self.pos += 1;
        }
    }

    fn texte(&self, start: usize) -> String {
        self.chars[start..self.pos].iter().collect()
    }
}

/// Liste complète des jetons (pour la démarche). S'arrête au premier caractère inconnu.
pub fn tokenize(s: &str) -> Vec<Token> {
    let mut lx = Lexer::new(s);
    let mut out = Vec::new();
    while let Some(t) = lx.consume() {
        out.push(t);
    }
    out
}
