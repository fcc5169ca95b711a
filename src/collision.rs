/// Axis-aligned bounding-box tests.
///
/// Every function here is pure: it reports *which* entities overlap, as
/// indices into the caller's slice, and leaves damage, scoring and removal to
/// the caller. Inactive entities and enemies already in their exploding state
/// never collide.

use crate::entities::{Bullet, Enemy, GameObject, Player, PowerUp, Rect};

/// Every live enemy the bullet overlaps. A piercing round may hit several in
/// one tick, so all matches are returned in slice order.
pub fn bullet_hits(bullet: &Bullet, enemies: &[Enemy]) -> Vec<usize> {
    if !bullet.is_active() {
        return Vec::new();
    }
    overlapping(bullet.rect(), enemies)
}

pub fn player_hits(player: &Player, enemies: &[Enemy]) -> Vec<usize> {
    if !player.is_active() {
        return Vec::new();
    }
    overlapping(player.rect(), enemies)
}

pub fn power_up_pickups(player: &Player, power_ups: &[PowerUp]) -> Vec<usize> {
    if !player.is_active() {
        return Vec::new();
    }
    let rect = player.rect();
    power_ups
        .iter()
        .enumerate()
        .filter(|(_, p)| p.is_active() && rect.intersects(&p.rect()))
        .map(|(i, _)| i)
        .collect()
}

/// Live enemies whose rect lies within `radius` of `(cx, cy)`, measured to
/// the nearest point of each rect. Used for explosive splash.
pub fn enemies_within(cx: f32, cy: f32, radius: f32, enemies: &[Enemy]) -> Vec<usize> {
    enemies
        .iter()
        .enumerate()
        .filter(|(_, e)| e.is_alive())
        .filter(|(_, e)| {
            let r = e.rect();
            let nx = cx.clamp(r.x, r.right());
            let ny = cy.clamp(r.y, r.bottom());
            let (dx, dy) = (cx - nx, cy - ny);
            dx * dx + dy * dy <= radius * radius
        })
        .map(|(i, _)| i)
        .collect()
}

/// True if any part of the player lies outside `[0, w] × [0, h]`.
pub fn border_violation(player: &Player, screen_w: f32, screen_h: f32) -> bool {
    let r = player.rect();
    r.x < 0.0 || r.y < 0.0 || r.right() > screen_w || r.bottom() > screen_h
}

fn overlapping(rect: Rect, enemies: &[Enemy]) -> Vec<usize> {
    enemies
        .iter()
        .enumerate()
        .filter(|(_, e)| e.is_alive() && rect.intersects(&e.rect()))
        .map(|(i, _)| i)
        .collect()
}
