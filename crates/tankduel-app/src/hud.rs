//! HUD overlay below the arena: per-player health and ammo labels plus
//! upgrade icons.
//!
//! Labels are bound to a value extracted from the latest snapshot and are
//! re-evaluated every frame. Icons are activated exactly while the tank holds
//! the matching upgrade, and only active icons are drawn. Player 1's widgets
//! sit left of the HUD center, player 2's are mirrored to the right.

use glam::{Affine2, Vec2};

use tankduel_core::constants::{ARENA_HEIGHT, ARENA_WIDTH, HUD_HEIGHT};
use tankduel_core::enums::{PlayerId, TextColor, TextureId};
use tankduel_core::state::{GameSnapshot, TankView};
use tankduel_sim::render::RenderTarget;

/// Offset of player 1's first label from the HUD center.
const LABEL_OFFSET: Vec2 = Vec2::new(-300.0, -60.0);
const LABEL_SPACING: f32 = 60.0;
const ICON_ROW_OFFSET: f32 = 30.0;
const ICON_SPACING: f32 = 80.0;
const ICON_SCALE: f32 = 1.5;

/// Selection and activation flags shared by every widget.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiComponent {
    selected: bool,
    active: bool,
}

impl UiComponent {
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn select(&mut self) {
        self.selected = true;
    }

    pub fn deselect(&mut self) {
        self.selected = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn activate(&mut self) {
        self.active = true;
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }
}

/// Which tank value a label shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelBinding {
    Health,
    Ammo,
}

impl LabelBinding {
    fn prefix(self) -> &'static str {
        match self {
            LabelBinding::Health => "Health:",
            LabelBinding::Ammo => "Ammo:",
        }
    }

    fn value(self, tank: &TankView) -> String {
        match self {
            LabelBinding::Health => tank.hitpoints.to_string(),
            LabelBinding::Ammo => tank.missile_ammo.to_string(),
        }
    }
}

/// A text label whose content is pulled from the snapshot each frame.
#[derive(Debug, Clone)]
pub struct BoundLabel {
    pub component: UiComponent,
    pub player: PlayerId,
    pub binding: LabelBinding,
    pub position: Vec2,
    pub color: TextColor,
    text: String,
}

impl BoundLabel {
    pub fn new(player: PlayerId, binding: LabelBinding, position: Vec2) -> Self {
        let mut label = Self {
            component: UiComponent::default(),
            player,
            binding,
            position,
            color: player_color(player),
            text: String::new(),
        };
        label.set_value("");
        label
    }

    pub fn prefix(&self) -> String {
        format!("{} {}", self.player.label(), self.binding.prefix())
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn update(&mut self, snapshot: &GameSnapshot) {
        let value = snapshot
            .tank(self.player)
            .map(|tank| self.binding.value(tank))
            .unwrap_or_else(|| "0".to_string());
        self.set_value(&value);
    }

    fn set_value(&mut self, value: &str) {
        self.text = format!("{} {}", self.prefix(), value);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpgradeKind {
    FireRate,
    ExplosiveShots,
}

impl UpgradeKind {
    fn texture(self) -> TextureId {
        match self {
            UpgradeKind::FireRate => TextureId::FireRate,
            UpgradeKind::ExplosiveShots => TextureId::ExplosiveShots,
        }
    }

    fn held_by(self, tank: &TankView) -> bool {
        match self {
            UpgradeKind::FireRate => tank.has_fire_rate_upgrade,
            UpgradeKind::ExplosiveShots => tank.has_explosive_shots_upgrade,
        }
    }
}

#[derive(Debug, Clone)]
pub struct UpgradeIcon {
    pub component: UiComponent,
    pub player: PlayerId,
    pub upgrade: UpgradeKind,
    pub position: Vec2,
}

impl UpgradeIcon {
    pub fn new(player: PlayerId, upgrade: UpgradeKind, position: Vec2) -> Self {
        Self {
            component: UiComponent::default(),
            player,
            upgrade,
            position,
        }
    }

    pub fn update(&mut self, snapshot: &GameSnapshot) {
        let held = snapshot
            .tank(self.player)
            .is_some_and(|tank| self.upgrade.held_by(tank));
        if held && !self.component.is_active() {
            self.component.activate();
        } else if !held && self.component.is_active() {
            self.component.deactivate();
        }
    }

    fn transform(&self) -> Affine2 {
        Affine2::from_scale_angle_translation(Vec2::splat(ICON_SCALE), 0.0, self.position)
    }
}

#[derive(Debug, Clone)]
pub struct Hud {
    pub labels: Vec<BoundLabel>,
    pub icons: Vec<UpgradeIcon>,
    center: Vec2,
    banner: Option<String>,
}

impl Default for Hud {
    fn default() -> Self {
        Self::new(ARENA_WIDTH, ARENA_HEIGHT)
    }
}

impl Hud {
    /// Lay out the HUD in the strip below an arena of the given size.
    pub fn new(arena_width: f32, arena_height: f32) -> Self {
        let center = Vec2::new(arena_width / 2.0, arena_height + HUD_HEIGHT / 2.0);

        let mut labels = Vec::new();
        let mut offset = LABEL_OFFSET;
        for binding in [LabelBinding::Health, LabelBinding::Ammo] {
            for player in PlayerId::ALL {
                labels.push(BoundLabel::new(player, binding, center + mirror(offset, player)));
            }
            offset.y += LABEL_SPACING;
        }

        let offset = Vec2::new(LABEL_OFFSET.x, LABEL_OFFSET.y + LABEL_SPACING + ICON_ROW_OFFSET);
        let mut icons = Vec::new();
        for player in PlayerId::ALL {
            let fire_rate = center + mirror(offset, player);
            icons.push(UpgradeIcon::new(player, UpgradeKind::FireRate, fire_rate));
            icons.push(UpgradeIcon::new(
                player,
                UpgradeKind::ExplosiveShots,
                fire_rate - Vec2::new(ICON_SPACING, 0.0),
            ));
        }

        Self {
            labels,
            icons,
            center,
            banner: None,
        }
    }

    pub fn update(&mut self, snapshot: &GameSnapshot) {
        for label in &mut self.labels {
            label.update(snapshot);
        }
        for icon in &mut self.icons {
            icon.update(snapshot);
        }
        self.banner = snapshot.game_over.then(|| match snapshot.winner {
            Some(player) => format!("{} wins!", player.label()),
            None => "Draw!".to_string(),
        });
    }

    pub fn label(&self, player: PlayerId, binding: LabelBinding) -> Option<&BoundLabel> {
        self.labels
            .iter()
            .find(|l| l.player == player && l.binding == binding)
    }

    pub fn icon(&self, player: PlayerId, upgrade: UpgradeKind) -> Option<&UpgradeIcon> {
        self.icons
            .iter()
            .find(|i| i.player == player && i.upgrade == upgrade)
    }

    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    pub fn draw(&self, target: &mut dyn RenderTarget) {
        for label in &self.labels {
            target.draw_text(label.text(), label.position, label.color);
        }
        for icon in self.icons.iter().filter(|i| i.component.is_active()) {
            target.draw_sprite(icon.upgrade.texture(), icon.transform());
        }
        if let Some(banner) = &self.banner {
            target.draw_text(banner, self.center, TextColor::White);
        }
    }
}

fn player_color(player: PlayerId) -> TextColor {
    match player {
        PlayerId::One => TextColor::Blue,
        PlayerId::Two => TextColor::Green,
    }
}

/// Player 2's widgets mirror player 1's across the HUD's vertical axis.
fn mirror(offset: Vec2, player: PlayerId) -> Vec2 {
    match player {
        PlayerId::One => offset,
        PlayerId::Two => Vec2::new(-offset.x, offset.y),
    }
}
