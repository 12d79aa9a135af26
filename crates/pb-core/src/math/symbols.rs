//! LaTeX symbol palettes

use crate::error::ProbboardError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A palette entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Symbol {
    /// Label shown on the palette button
    pub glyph: &'static str,
    /// LaTeX inserted into the buffer
    pub latex: &'static str,
    /// Templates leave the cursor inside their first `{}` slot
    pub template: bool,
}

const fn sym(glyph: &'static str, latex: &'static str) -> Symbol {
    Symbol {
        glyph,
        latex,
        template: false,
    }
}

const fn tpl(glyph: &'static str, latex: &'static str) -> Symbol {
    Symbol {
        glyph,
        latex,
        template: true,
    }
}

const BASIC: &[Symbol] = &[
    sym("+", "+"),
    sym("-", "-"),
    sym("×", "\\times"),
    sym("÷", "\\div"),
    sym("=", "="),
    sym("≠", "\\neq"),
    sym("<", "<"),
    sym(">", ">"),
    sym("≤", "\\leq"),
    sym("≥", "\\geq"),
    sym("±", "\\pm"),
    sym("∓", "\\mp"),
    sym("∞", "\\infty"),
    sym("∅", "\\emptyset"),
];

const FRACTIONS: &[Symbol] = &[
    sym("½", "\\frac{1}{2}"),
    sym("⅓", "\\frac{1}{3}"),
    sym("¼", "\\frac{1}{4}"),
    sym("⅔", "\\frac{2}{3}"),
    sym("¾", "\\frac{3}{4}"),
    tpl("Fraction", "\\frac{}{}"),
    tpl("Mixed", "\\frac{}{} \\frac{}{}"),
];

const POWERS: &[Symbol] = &[
    sym("x²", "x^2"),
    sym("x³", "x^3"),
    sym("xⁿ", "x^n"),
    tpl("√", "\\sqrt{}"),
    tpl("∛", "\\sqrt[3]{}"),
    tpl("∜", "\\sqrt[4]{}"),
    sym("x₁", "x_1"),
    sym("x₂", "x_2"),
];

const INTEGRALS: &[Symbol] = &[
    sym("∫", "\\int"),
    sym("∬", "\\iint"),
    sym("∭", "\\iiint"),
    sym("∮", "\\oint"),
    tpl("∫₀^∞", "\\int_0^{\\infty}"),
    tpl("∫_a^b", "\\int_a^b"),
];

const DERIVATIVES: &[Symbol] = &[
    sym("∂", "\\partial"),
    tpl("d/dx", "\\frac{d}{dx}"),
    tpl("d²/dx²", "\\frac{d^2}{dx^2}"),
    tpl("∂/∂x", "\\frac{\\partial}{\\partial x}"),
    sym("∇", "\\nabla"),
    sym("Δ", "\\Delta"),
];

const GREEK: &[Symbol] = &[
    sym("α", "\\alpha"),
    sym("β", "\\beta"),
    sym("γ", "\\gamma"),
    sym("δ", "\\delta"),
    sym("ε", "\\varepsilon"),
    sym("ζ", "\\zeta"),
    sym("η", "\\eta"),
    sym("θ", "\\theta"),
    sym("λ", "\\lambda"),
    sym("μ", "\\mu"),
    sym("π", "\\pi"),
    sym("σ", "\\sigma"),
    sym("τ", "\\tau"),
    sym("φ", "\\phi"),
    sym("ψ", "\\psi"),
    sym("ω", "\\omega"),
];

const SETS: &[Symbol] = &[
    sym("∈", "\\in"),
    sym("∉", "\\notin"),
    sym("⊂", "\\subset"),
    sym("⊃", "\\supset"),
    sym("∪", "\\cup"),
    sym("∩", "\\cap"),
    sym("ℝ", "\\mathbb{R}"),
    sym("ℕ", "\\mathbb{N}"),
    sym("ℤ", "\\mathbb{Z}"),
    sym("ℚ", "\\mathbb{Q}"),
    sym("ℂ", "\\mathbb{C}"),
];

const ARROWS: &[Symbol] = &[
    sym("→", "\\rightarrow"),
    sym("←", "\\leftarrow"),
    sym("↔", "\\leftrightarrow"),
    sym("⇒", "\\Rightarrow"),
    sym("⇐", "\\Leftarrow"),
    sym("⇔", "\\Leftrightarrow"),
    sym("↑", "\\uparrow"),
    sym("↓", "\\downarrow"),
    sym("↗", "\\nearrow"),
    sym("↘", "\\searrow"),
];

const FUNCTIONS: &[Symbol] = &[
    sym("sin", "\\sin"),
    sym("cos", "\\cos"),
    sym("tan", "\\tan"),
    sym("log", "\\log"),
    sym("ln", "\\ln"),
    sym("exp", "\\exp"),
    tpl("lim", "\\lim"),
    sym("max", "\\max"),
    sym("min", "\\min"),
    sym("sup", "\\sup"),
    sym("inf", "\\inf"),
    tpl("∑", "\\sum"),
    tpl("∏", "\\prod"),
];

/// Palette tab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolCategory {
    Basic,
    Fractions,
    Powers,
    Integrals,
    Derivatives,
    Greek,
    Sets,
    Arrows,
    Functions,
}

impl SymbolCategory {
    /// All tabs in display order
    pub const ALL: [SymbolCategory; 9] = [
        SymbolCategory::Basic,
        SymbolCategory::Fractions,
        SymbolCategory::Powers,
        SymbolCategory::Integrals,
        SymbolCategory::Derivatives,
        SymbolCategory::Greek,
        SymbolCategory::Sets,
        SymbolCategory::Arrows,
        SymbolCategory::Functions,
    ];

    /// Symbols on this tab
    pub fn symbols(&self) -> &'static [Symbol] {
        match self {
            SymbolCategory::Basic => BASIC,
            SymbolCategory::Fractions => FRACTIONS,
            SymbolCategory::Powers => POWERS,
            SymbolCategory::Integrals => INTEGRALS,
            SymbolCategory::Derivatives => DERIVATIVES,
            SymbolCategory::Greek => GREEK,
            SymbolCategory::Sets => SETS,
            SymbolCategory::Arrows => ARROWS,
            SymbolCategory::Functions => FUNCTIONS,
        }
    }

    /// Tab label
    pub fn name(&self) -> &'static str {
        match self {
            SymbolCategory::Basic => "Basic",
            SymbolCategory::Fractions => "Fractions",
            SymbolCategory::Powers => "Powers",
            SymbolCategory::Integrals => "Integrals",
            SymbolCategory::Derivatives => "Derivatives",
            SymbolCategory::Greek => "Greek",
            SymbolCategory::Sets => "Sets",
            SymbolCategory::Arrows => "Arrows",
            SymbolCategory::Functions => "Functions",
        }
    }

    /// Find a symbol on this tab by glyph or LaTeX
    pub fn find(&self, key: &str) -> Option<&'static Symbol> {
        self.symbols()
            .iter()
            .find(|s| s.glyph == key || s.latex == key)
    }
}

impl Default for SymbolCategory {
    fn default() -> Self {
        SymbolCategory::Basic
    }
}

impl fmt::Display for SymbolCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for SymbolCategory {
    type Err = ProbboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SymbolCategory::ALL
            .iter()
            .copied()
            .find(|c| c.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ProbboardError::Validation(format!("Unknown symbol category: {}", s)))
    }
}

/// Find a symbol on any tab by glyph or LaTeX
pub fn lookup(key: &str) -> Option<&'static Symbol> {
    SymbolCategory::ALL.iter().find_map(|c| c.find(key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_category_has_symbols() {
        for category in SymbolCategory::ALL {
            assert!(!category.symbols().is_empty(), "{} is empty", category);
        }
    }

    #[test]
    fn test_parse_category() {
        assert_eq!("greek".parse::<SymbolCategory>().unwrap(), SymbolCategory::Greek);
        assert_eq!(" Sets ".parse::<SymbolCategory>().unwrap(), SymbolCategory::Sets);
        assert!("emoji".parse::<SymbolCategory>().is_err());
    }

    #[test]
    fn test_lookup_by_glyph_and_latex() {
        assert_eq!(lookup("π").unwrap().latex, "\\pi");
        assert_eq!(lookup("\\sqrt{}").unwrap().glyph, "√");
        assert!(lookup("nothing").is_none());
    }

    #[test]
    fn test_templates_flagged() {
        assert!(SymbolCategory::Fractions.find("Fraction").unwrap().template);
        assert!(!SymbolCategory::Fractions.find("½").unwrap().template);
    }
}
