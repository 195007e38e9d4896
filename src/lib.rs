//! Calculatrice rationnelle : expressions arithmétiques évaluées en fractions exactes.
//!
//! ```
//! use calculatrice_rationnelle::noyau::parse_expression;
//!
//! let arbre = parse_expression("1 * -(2 * -3)").unwrap();
//! assert_eq!(arbre.evaluate_integer().unwrap().to_string(), "6");
//! assert_eq!(arbre.to_string(), "mul(1, mul(-1, mul(2, -3)))");
//! ```

pub mod noyau;
