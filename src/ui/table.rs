// ============================================================================
// Styles des cellules de tableau
// ============================================================================
// Traduit une CellClass (décision métier) en Style ratatui (rendu terminal)
// ============================================================================

use ratatui::style::{Color, Modifier, Style};

use crate::styling::CellClass;

const POSITIVE_BG: Color = Color::Rgb(30, 110, 50);
const NEGATIVE_BG: Color = Color::Rgb(130, 35, 45);
const POSITIVE_FG: Color = Color::Rgb(52, 208, 88);
const NEGATIVE_FG: Color = Color::Rgb(234, 74, 90);

/// Style terminal d'une catégorie de cellule
pub fn cell_style(class: CellClass) -> Style {
    match class {
        CellClass::None => Style::default(),
        CellClass::PositiveHighlight => Style::default()
            .bg(POSITIVE_BG)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
        CellClass::NegativeHighlight => Style::default()
            .bg(NEGATIVE_BG)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
        CellClass::PositiveText => Style::default().fg(POSITIVE_FG),
        CellClass::NegativeText => Style::default().fg(NEGATIVE_FG),
    }
}

/// Style de l'en-tête des tableaux
pub fn header_style() -> Style {
    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
}

/// Style de la ligne sélectionnée
pub fn selected_style() -> Style {
    Style::default().add_modifier(Modifier::REVERSED)
}
