//! Color constants and font size tokens for consistent UI theming.

#![allow(dead_code)] // Constants populated ahead of use across multiple phases.

use bevy::prelude::*;

use crate::gameplay::enemy::EnemyArchetype;

// === Text Colors ===

/// Header/title text color (white).
pub const HEADER_TEXT: Color = Color::WHITE;

/// Body/subtitle text color (light gray).
pub const BODY_TEXT: Color = Color::srgb(0.7, 0.7, 0.7);

/// Fragment/star currency display text color (yellow-gold).
pub const CURRENCY_TEXT: Color = Color::srgb(1.0, 0.85, 0.0);

/// Boss shield readout text color (cyan).
pub const SHIELD_TEXT: Color = Color::srgb(0.3, 0.85, 1.0);

/// Button label text color.
pub const BUTTON_TEXT: Color = Color::srgb(0.925, 0.925, 0.925);

// === UI Backgrounds ===

/// Semi-transparent dark overlay for pause/modal screens.
pub const OVERLAY_BACKGROUND: Color = Color::srgba(0.0, 0.0, 0.0, 0.7);

/// Panel background (dark blue-gray, nearly opaque).
pub const PANEL_BACKGROUND: Color = Color::srgba(0.1, 0.1, 0.15, 0.95);

/// Panel border (light blue-gray, semi-transparent).
pub const PANEL_BORDER: Color = Color::srgba(0.5, 0.5, 0.6, 0.8);

// === Button Colors ===

pub const BUTTON_BACKGROUND: Color = Color::srgb(0.275, 0.4, 0.75);
pub const BUTTON_HOVERED_BACKGROUND: Color = Color::srgb(0.384, 0.6, 0.82);
pub const BUTTON_PRESSED_BACKGROUND: Color = Color::srgb(0.239, 0.286, 0.6);

/// Highlight for the currently selected class row on the main menu.
pub const CLASS_SELECTED: Color = Color::srgb(0.3, 0.5, 0.3);

// === Status Bar ===

pub const STATUS_BAR_BACKGROUND: Color = Color::srgba(0.1, 0.1, 0.15, 0.85);

// === Arena Colors ===

pub const ARENA_BACKGROUND: Color = Color::srgb(0.1, 0.1, 0.12);

// === Entity Colors ===

pub const PLAYER: Color = Color::srgb(0.2, 0.8, 0.2);
pub const BOSS: Color = Color::srgb(0.7, 0.1, 0.7);

pub const PLAYER_PROJECTILE: Color = Color::srgb(1.0, 1.0, 0.3);
pub const ENEMY_PROJECTILE: Color = Color::srgb(1.0, 0.45, 0.2);
pub const BOSS_PROJECTILE: Color = Color::srgb(1.0, 0.3, 0.8);
pub const EXPLOSION: Color = Color::srgba(1.0, 0.6, 0.1, 0.8);

/// Body color for an enemy archetype.
#[must_use]
pub const fn enemy_color(archetype: EnemyArchetype) -> Color {
    match archetype {
        EnemyArchetype::Triangle => Color::srgb(0.9, 0.3, 0.3),
        EnemyArchetype::Circle => Color::srgb(0.3, 0.5, 0.9),
        EnemyArchetype::Square => Color::srgb(0.9, 0.7, 0.2),
    }
}

// === Font Size Tokens ===

pub const FONT_SIZE_TITLE: f32 = 72.0;
pub const FONT_SIZE_HEADER: f32 = 64.0;
pub const FONT_SIZE_LABEL: f32 = 32.0;
pub const FONT_SIZE_HUD: f32 = 28.0;
pub const FONT_SIZE_PROMPT: f32 = 24.0;
pub const FONT_SIZE_BODY: f32 = 16.0;
pub const FONT_SIZE_SMALL: f32 = 14.0;
