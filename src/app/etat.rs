//! src/app/etat.rs
//!
//! État UI (sans vue, sans noyau).
//!
//! Contient l’entrée, les lectures du dernier résultat, l’erreur, la précision et la démarche,
//! plus les opérations C/CLR/AC. Aucune évaluation ici.

use calculatrice_rationnelle::noyau::{DemarcheNoyau, Evaluation};

/// Précision par défaut des lectures décimale et pourcentage.
pub const DIGITS_DEFAUT: u32 = 3;

/// Garde-fou : on borne la précision (anti-gel sur les grands dénominateurs).
pub const DIGITS_MAX: u32 = 200;

#[derive(Clone, Default, Debug)]
pub struct Demarche {
    pub jetons: String,
    pub arbre: String,
    pub noeuds: usize,
    pub note: String,
}

impl From<DemarcheNoyau> for Demarche {
    fn from(d: DemarcheNoyau) -> Self {
        Self {
            jetons: d.jetons,
            arbre: d.arbre,
            noeuds: d.noeuds,
            note: d.note,
        }
    }
}

/// Lectures affichées du dernier résultat.
#[derive(Clone, Default, Debug)]
pub struct Lectures {
    pub fraction: String,
    pub entier: String,
    pub decimal: String,
    pub mixte: String,
    pub pourcentage: String,
}

#[derive(Clone, Debug)]
pub struct AppCalc {
    // --- entrée utilisateur ---
    pub entree: String,

    // --- sorties ---
    pub lectures: Lectures,
    pub erreur: String,
    pub resultat_dispo: bool, // false au démarrage, après CLR ou après une erreur

    pub demarche: Demarche,

    // --- paramètres ---
    pub digits: u32,

    // Permet à vue.rs de redonner le focus à l’entrée après un clic sur un bouton.
    pub focus_entree: bool,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self {
            entree: String::new(),
            lectures: Lectures::default(),
            erreur: String::new(),
            resultat_dispo: false,
            demarche: Demarche::default(),
            digits: DIGITS_DEFAUT,
            focus_entree: true,
        }
    }
}

impl AppCalc {
    /* ------------------------ Actions “boutons” (état seulement) ------------------------ */

    /// AC : remise à zéro totale (entrée + résultats + digits par défaut).
    pub fn reset_total(&mut self) {
        self.entree.clear();
        self.clear_resultats();
        self.digits = DIGITS_DEFAUT;
        self.focus_entree = true;
    }

    /// C : effacer seulement l’entrée.
    pub fn clear_entree(&mut self) {
        self.entree.clear();
        self.focus_entree = true;
    }

    /// CLR : effacer résultats + erreur + démarche (sans toucher à l’entrée).
    pub fn clear_resultats(&mut self) {
        self.lectures = Lectures::default();
        self.erreur.clear();
        self.resultat_dispo = false;
        self.demarche = Demarche::default();
        self.focus_entree = true;
    }

    /// Une erreur arrête l’expression en cours : lectures et démarche ne valent plus rien.
    pub fn set_erreur(&mut self, msg: impl Into<String>) {
        self.erreur = msg.into();
        self.lectures = Lectures::default();
        self.resultat_dispo = false;
        self.demarche = Demarche::default();
        self.focus_entree = true;
    }

    /// Dépose un résultat complet venant du noyau.
    pub fn set_resultats(&mut self, e: Evaluation) {
        self.erreur.clear();
        self.lectures = Lectures {
            fraction: e.fraction,
            entier: e.entier,
            decimal: e.decimal,
            mixte: e.mixte,
            pourcentage: e.pourcentage,
        };
        self.demarche = e.demarche.into();
        self.resultat_dispo = true;
        self.focus_entree = true;
    }

    pub fn set_digits(&mut self, digits: u32) {
        self.digits = digits.min(DIGITS_MAX);
        self.focus_entree = true;
    }
}
