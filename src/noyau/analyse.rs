// src/noyau/analyse.rs
//
// Descente récursive : texte -> ExprTree.
//
// Deux niveaux de priorité, plus un niveau "primaire" :
// - polynôme : termes liés par '+' / '-' (associatif à gauche)
// - terme    : primaires liés par '*' / '/', ou multiplication implicite devant '('
// - primaire : nombre | '-' nombre | '-' '(' ... ')' | '(' ... ')'
//
// Règles :
// - "-3"        => feuille unique "-3"
// - "-( ... )"  => mul(-1, ...)
// - "2(3)"      => mul(2, 3)
// - fonction    => toujours refusée (reconnue, pas implémentée)
// - aucune reprise : la première construction malformée arrête tout.
//
// NOTE : les décisions de structure passent par Lexer::peek(), qui ne voit qu'un
// caractère ; seule la nature du jeton suivant compte ici, jamais son texte complet.

use super::arbre::ExprTree;
use super::erreur::{CalcError, Malformation};
use super::jetons::{Token, TokenKind};
use super::lexeur::Lexer;

const NOMBRE_OU_PARENTHESE: &str = "un nombre ou une parenthèse";
const OPERATEUR_OU_PARENTHESE: &str = "un opérateur ou une parenthèse";

/// Garde-fou : profondeur maximale de parenthèses (anti débordement de pile).
const PROFONDEUR_MAX: usize = 256;

/// API publique : analyse une expression complète.
pub fn parse_expression(text: &str) -> Result<ExprTree, CalcError> {
    Parser::new(text).parse()
}

pub struct Parser {
    lexer: Lexer,
    expression: String,
    profondeur: usize,
}

impl Parser {
    pub fn new(expression: &str) -> Self {
        Self {
            lexer: Lexer::new(expression),
            expression: expression.to_string(),
            profondeur: 0,
        }
    }

    pub fn parse(mut self) -> Result<ExprTree, CalcError> {
        let arbre = match self.parse_polynome() {
            Ok(a) => a,
            Err(e) => {
                log::debug!("analyse refusée: {e}");
                return Err(e);
            }
        };

        // Le polynôme s'arrête sur ')' : au niveau racine, elle n'a pas de '(' associée.
        // Refus volontaire : "1+2)*5" n'est pas lu comme "1+2" en ignorant la fin.
        if let Some(t) = self.lexer.peek() {
            let e = self.trouve("un opérateur ou la fin de l'expression", t.text());
            log::debug!("analyse refusée: {e}");
            return Err(e);
        }

        log::debug!("arbre: {arbre}");
        Ok(arbre)
    }

    /* ------------------------ Polynôme : '+' / '-' ------------------------ */

    fn parse_polynome(&mut self) -> Result<ExprTree, CalcError> {
        let mut arbre = self.parse_terme()?;

        loop {
            match self.lexer.peek() {
                None => break,
                Some(t) if t.is_symbol(')') => break,
                Some(_) => {}
            }

            // parse_terme ne rend la main que devant '+', '-', ')' ou la fin
            let debut = self.lexer.position_suivante();
            let op = match self.lexer.consume() {
                Some(t) if t.is_symbol('+') || t.is_symbol('-') => t,
                Some(t) => return Err(self.trouve_a("'+' ou '-'", t.text(), debut)),
                None => return Err(self.fin_atteinte("'+' ou '-'")),
            };

            let droite = self.parse_terme()?;
            arbre = self.noeud(&op, arbre, droite)?;
        }

        Ok(arbre)
    }

    /* ------------------------ Terme : '*' / '/' / implicite ------------------------ */

    fn parse_terme(&mut self) -> Result<ExprTree, CalcError> {
        let mut arbre = self.parse_primaire()?;

        loop {
            let Some(suivant) = self.lexer.peek() else {
                return Ok(arbre);
            };

            let op = match suivant.kind() {
                TokenKind::Operator if suivant.is_symbol('+') || suivant.is_symbol('-') => {
                    return Ok(arbre);
                }
                TokenKind::Operator => {
                    self.lexer.consume();
                    suivant
                }
                TokenKind::Parenthesis if suivant.is_symbol(')') => return Ok(arbre),
                // "2(3)" : multiplication implicite, '(' reste à lire
                TokenKind::Parenthesis => Token::operator('*'),
                TokenKind::Number | TokenKind::FunctionName => {
                    return Err(self.trouve(OPERATEUR_OU_PARENTHESE, suivant.text()));
                }
            };

            let droite = self.parse_primaire()?;
            arbre = self.noeud(&op, arbre, droite)?;
        }
    }

    /* ------------------------ Primaire ------------------------ */

    fn parse_primaire(&mut self) -> Result<ExprTree, CalcError> {
        let debut = self.lexer.position_suivante();
        let suivant = self.lexer.caractere_suivant();

        let Some(t) = self.lexer.consume() else {
            return Err(self.fin_ou_inconnu(NOMBRE_OU_PARENTHESE, suivant, debut));
        };

        match t.kind() {
            TokenKind::Number => Ok(ExprTree::literal(t)),
            TokenKind::Operator => self.parse_negation(&t, debut),
            TokenKind::Parenthesis => self.parse_parentheses(&t, debut),
            TokenKind::FunctionName => Err(self.trouve_a(
                "un nombre ou une parenthèse (fonctions non implémentées)",
                t.text(),
                debut,
            )),
        }
    }

    /// '-' suivi d'un nombre (feuille négative) ou d'une parenthèse (mul(-1, ...)).
    fn parse_negation(&mut self, signe: &Token, debut: usize) -> Result<ExprTree, CalcError> {
        if !signe.is_symbol('-') {
            return Err(self.trouve_a(NOMBRE_OU_PARENTHESE, signe.text(), debut));
        }

        let debut = self.lexer.position_suivante();
        let suivant = self.lexer.caractere_suivant();

        match self.lexer.consume() {
            None => Err(self.fin_ou_inconnu(NOMBRE_OU_PARENTHESE, suivant, debut)),
            Some(t) => match t.kind() {
                TokenKind::Number => Ok(ExprTree::literal(Token::number(format!(
                    "-{}",
                    t.text()
                )))),
                TokenKind::Parenthesis => {
                    let interieur = self.parse_parentheses(&t, debut)?;
                    Ok(ExprTree::Mul(
                        Box::new(ExprTree::literal(Token::number("-1"))),
                        Box::new(interieur),
                    ))
                }
                TokenKind::Operator | TokenKind::FunctionName => {
                    Err(self.trouve_a(NOMBRE_OU_PARENTHESE, t.text(), debut))
                }
            },
        }
    }

    /// '(' polynôme ')' ; les parenthèses ne laissent pas de noeud.
    fn parse_parentheses(&mut self, ouvrante: &Token, debut: usize) -> Result<ExprTree, CalcError> {
        if !ouvrante.is_symbol('(') {
            return Err(self.trouve_a("'('", ouvrante.text(), debut));
        }

        if self.profondeur >= PROFONDEUR_MAX {
            return Err(self.trouve_a(
                "au plus 256 niveaux de parenthèses",
                ouvrante.text(),
                debut,
            ));
        }

        self.profondeur += 1;
        let interieur = self.parse_polynome();
        self.profondeur -= 1;
        let interieur = interieur?;

        match self.lexer.peek() {
            None => Err(self.fin_atteinte("')'")),
            Some(t) if t.is_symbol(')') => {
                self.lexer.consume();
                Ok(interieur)
            }
            Some(t) => Err(self.trouve("')'", t.text())),
        }
    }

    /* ------------------------ Outils ------------------------ */

    fn noeud(&self, op: &Token, gauche: ExprTree, droite: ExprTree) -> Result<ExprTree, CalcError> {
        op.symbol()
            .and_then(|c| ExprTree::binary(c, gauche, droite))
            .ok_or_else(|| {
                Malformation::fin_atteinte("un opérateur parmi + - * /", &self.expression).into()
            })
    }

    fn fin_atteinte(&self, attendu: &str) -> CalcError {
        Malformation::fin_atteinte(attendu, &self.expression).into()
    }

    /// Jeton inattendu à la position du prochain caractère non blanc.
    fn trouve(&self, attendu: &str, trouve: &str) -> CalcError {
        self.trouve_a(attendu, trouve, self.lexer.position_suivante())
    }

    fn trouve_a(&self, attendu: &str, trouve: &str, position: usize) -> CalcError {
        Malformation::trouve(attendu, trouve, &self.expression, position).into()
    }

    /// consume() a rendu None : vraie fin d'entrée, ou caractère non reconnu.
    fn fin_ou_inconnu(&self, attendu: &str, suivant: Option<char>, debut: usize) -> CalcError {
        match suivant {
            Some(c) => self.trouve_a(attendu, &c.to_string(), debut),
            None => self.fin_atteinte(attendu),
        }
    }
}
