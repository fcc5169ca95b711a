use temple_shooter::entities::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn make_player() -> Player {
    Player::new(0.0, 0.0, 100.0, 100.0, 3, 25.0)
}

fn still_enemy(x: f32, y: f32, w: f32, h: f32) -> Enemy {
    Enemy::with_motion(EnemyKind::Basic, x, y, w, h, Motion::Bounce { vx: 0.0 })
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn no_minions(_: f32, _: f32) {}

// ── Rect ──────────────────────────────────────────────────────────────────────

#[test]
fn rect_overlap_is_strict() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    assert!(a.intersects(&Rect::new(5.0, 5.0, 10.0, 10.0)));
    // Touching edges only
    assert!(!a.intersects(&Rect::new(10.0, 0.0, 10.0, 10.0)));
    assert!(!a.intersects(&Rect::new(0.0, 10.0, 10.0, 10.0)));
}

#[test]
fn rect_contains_is_half_open() {
    let r = Rect::new(0.0, 0.0, 10.0, 10.0);
    assert!(r.contains(0.0, 0.0));
    assert!(r.contains(9.9, 9.9));
    assert!(!r.contains(10.0, 5.0));
    assert!(!r.contains(5.0, 10.0));
}

#[test]
fn rect_center() {
    assert_eq!(Rect::new(10.0, 20.0, 40.0, 60.0).center(), (30.0, 50.0));
}

// ── Player ────────────────────────────────────────────────────────────────────

#[test]
fn player_starts_at_full_health() {
    let p = make_player();
    assert_eq!(p.health(), 3);
    assert_eq!(p.max_health(), 3);
    assert!(p.is_active());
    assert!(!p.is_invincible());
}

#[test]
fn player_max_health_is_at_least_one() {
    let p = Player::new(0.0, 0.0, 10.0, 10.0, 0, 25.0);
    assert_eq!(p.max_health(), 1);
    assert_eq!(p.health(), 1);
}

#[test]
fn player_eases_toward_target() {
    let mut p = make_player();
    p.move_to(100.0, 0.0);
    p.update(16.0, 16);
    // 25 * 0.016 = 0.4 of the remaining distance
    assert!((p.rect().x - 40.0).abs() < 1e-3);
    assert_eq!(p.rect().y, 0.0);
}

#[test]
fn player_snaps_when_close() {
    let mut p = make_player();
    p.move_to(0.5, -0.5);
    p.update(16.0, 16);
    assert_eq!(p.rect().x, 0.5);
    assert_eq!(p.rect().y, -0.5);
}

#[test]
fn player_set_position_moves_target_too() {
    let mut p = make_player();
    p.set_position(300.0, 400.0);
    assert_eq!(p.target(), (300.0, 400.0));
    p.update(16.0, 16);
    assert_eq!((p.rect().x, p.rect().y), (300.0, 400.0));
}

#[test]
fn damage_starts_invincibility_window() {
    let mut p = make_player();
    assert_eq!(p.take_damage(1, 1000, 800, false), DamageOutcome::Applied);
    assert_eq!(p.health(), 2);
    assert_eq!(p.invincible_until(), Some(1800));

    assert_eq!(p.take_damage(1, 1500, 800, false), DamageOutcome::Ignored);
    assert_eq!(p.health(), 2);

    assert_eq!(p.take_damage(1, 1800, 800, false), DamageOutcome::Applied);
    assert_eq!(p.health(), 1);
}

#[test]
fn shielded_damage_is_absorbed() {
    let mut p = make_player();
    assert_eq!(p.take_damage(1, 0, 800, true), DamageOutcome::Absorbed);
    assert_eq!(p.health(), 3);
    assert!(p.is_invincible());
}

#[test]
fn invincibility_clears_on_update() {
    let mut p = make_player();
    p.take_damage(1, 0, 800, false);
    p.update(16.0, 799);
    assert!(p.is_invincible());
    p.update(16.0, 800);
    assert!(!p.is_invincible());
}

#[test]
fn health_never_goes_negative() {
    let mut p = make_player();
    p.take_damage(10, 0, 0, false);
    assert_eq!(p.health(), 0);
    assert!(p.is_dead());
}

#[test]
fn heal_is_capped() {
    let mut p = make_player();
    p.take_damage(2, 0, 0, false);
    p.heal(5);
    assert_eq!(p.health(), 3);
}

#[test]
fn snapshot_restore() {
    let mut p = make_player();
    p.take_damage(1, 0, 0, false);
    p.set_speed(30.0);
    let snap = p.snapshot();

    let mut fresh = make_player();
    fresh.restore(&snap);
    assert_eq!(fresh.health(), 2);
    assert_eq!(fresh.speed(), 30.0);
}

#[test]
fn lowering_max_health_lowers_health() {
    let mut p = make_player();
    p.set_max_health(2);
    assert_eq!(p.health(), 2);
}

// ── Bullet ────────────────────────────────────────────────────────────────────

#[test]
fn bullet_is_centred_on_x() {
    let b = Bullet::standard(100.0, 500.0, 600.0, 1);
    assert_eq!(b.rect().x, 96.0);
    assert_eq!(b.rect().y, 500.0);
    assert_eq!(b.damage(), 1);
}

#[test]
fn bullet_moves_up_and_leaves() {
    let mut b = Bullet::standard(100.0, 500.0, 600.0, 1);
    b.update(100.0);
    assert!((b.rect().y - 440.0).abs() < 1e-3);
    assert!(b.is_active());
    b.update(1000.0);
    assert!(!b.is_active());
}

#[test]
fn standard_round_spent_on_first_hit() {
    let mut b = Bullet::standard(0.0, 0.0, 600.0, 1);
    assert!(!b.is_piercing());
    b.register_hit();
    assert!(!b.is_active());
}

#[test]
fn laser_pierces_three() {
    let mut b = Bullet::laser(0.0, 0.0, 600.0);
    assert!(b.is_piercing());
    b.register_hit();
    b.register_hit();
    assert!(b.is_active());
    assert_eq!(b.kind(), BulletKind::Laser { hits: 2 });
    b.register_hit();
    assert!(!b.is_active());
}

#[test]
fn heavy_round_is_slower_and_harder() {
    let b = Bullet::heavy(0.0, 0.0, 1000.0);
    assert!((b.speed() - 700.0).abs() < 1e-3);
    assert_eq!(b.damage(), 3);
}

#[test]
fn weapon_selects_round() {
    let s = Bullet::for_weapon(Weapon::Standard, 0.0, 0.0, 600.0, 4);
    assert_eq!(s.kind(), BulletKind::Standard);
    assert_eq!(s.damage(), 4);

    let e = Bullet::for_weapon(Weapon::Explosive, 0.0, 0.0, 600.0, 4);
    assert_eq!(e.splash_radius(), Some(60.0));
    assert_eq!(e.damage(), 2);
}

// ── Enemy ─────────────────────────────────────────────────────────────────────

#[test]
fn spawned_enemy_size_in_range() {
    let mut rng = seeded_rng();
    for _ in 0..20 {
        let e = Enemy::spawn(EnemyKind::Basic, 0.0, 0.0, &mut rng);
        let r = e.rect();
        assert!((60.0..100.0).contains(&r.w));
        assert!((60.0..100.0).contains(&r.h));
        assert_eq!(e.health(), 1);
        assert_eq!(e.score_value(), 10);
    }
}

#[test]
fn zigzag_has_fixed_size() {
    let mut rng = seeded_rng();
    let e = Enemy::spawn(EnemyKind::ZigZag, 100.0, 0.0, &mut rng);
    assert_eq!((e.rect().w, e.rect().h), (80.0, 80.0));
    assert!(matches!(e.motion(), Motion::ZigZag { .. }));
}

#[test]
fn killing_hit_reported_once() {
    let mut e = still_enemy(0.0, 0.0, 50.0, 50.0);
    e.set_health(2);
    assert!(!e.take_damage(1, 0));
    assert!(e.take_damage(1, 10));
    assert!(e.is_dying());
    assert!(!e.is_alive());
    assert!(!e.take_damage(1, 20));
}

#[test]
fn dying_enemy_removed_after_delay() {
    let mut e = still_enemy(0.0, 0.0, 50.0, 50.0);
    e.take_damage(1, 1000);
    e.update(16.0, 1399, 1080.0, 1920.0, 400, &mut no_minions);
    assert!(e.is_active());
    assert_eq!(e.rect().y, 0.0); // frozen while exploding
    e.update(16.0, 1400, 1080.0, 1920.0, 400, &mut no_minions);
    assert!(!e.is_active());
}

#[test]
fn explode_kills_outright() {
    let mut e = still_enemy(0.0, 0.0, 50.0, 50.0);
    e.set_health(10);
    e.explode(5);
    assert!(e.is_dead());
    assert!(e.is_dying());
}

#[test]
fn bounce_reflects_at_wall() {
    let mut e = Enemy::with_motion(
        EnemyKind::Basic,
        0.0,
        0.0,
        50.0,
        50.0,
        Motion::Bounce { vx: -100.0 },
    );
    e.update(100.0, 100, 1080.0, 1920.0, 400, &mut no_minions);
    assert_eq!(e.rect().x, 0.0);
    assert!((e.rect().y - 20.0).abs() < 1e-3);
    assert_eq!(e.motion(), &Motion::Bounce { vx: 100.0 });
}

#[test]
fn enemy_leaves_through_bottom() {
    let mut e = still_enemy(100.0, 1900.0, 50.0, 50.0);
    e.update(200.0, 200, 1080.0, 1920.0, 400, &mut no_minions);
    assert!(!e.is_active());
}

#[test]
fn zigzag_stays_on_screen() {
    let mut e = Enemy::with_motion(
        EnemyKind::ZigZag,
        1000.0,
        0.0,
        80.0,
        80.0,
        Motion::ZigZag {
            time_s: 0.0,
            amplitude: 120.0,
            frequency: 2.0,
            origin_x: 1000.0,
        },
    );
    for i in 1..=60 {
        e.update(16.0, i * 16, 1080.0, 1920.0, 400, &mut no_minions);
        let r = e.rect();
        assert!(r.x >= 0.0 && r.right() <= 1080.0);
    }
}

#[test]
fn boss_descends_then_calls_minions() {
    let mut boss = Enemy::boss(440.0, -200.0, (200.0, 200.0), 1920.0, 0, 1200);
    let mut calls: Vec<(f32, f32)> = Vec::new();
    let mut record = |x: f32, y: f32| calls.push((x, y));
    for i in 1..=8u64 {
        boss.update(1000.0, i * 1000, 1080.0, 1920.0, 400, &mut record);
    }
    assert!(boss.is_active());
    assert_eq!(boss.rect().y, 640.0);

    // Reached the hover line at 6 s, then again 2 s later.
    assert_eq!(calls.len(), 4);
    assert!(calls.iter().all(|&(_, y)| y == 830.0));
    assert!((calls[1].0 - calls[0].0 - 120.0).abs() < 1e-3);
}

#[test]
fn boss_never_leaves_through_bottom() {
    let mut boss = Enemy::boss(440.0, 5000.0, (200.0, 200.0), 1920.0, 0, 1200);
    boss.update(16.0, 16, 1080.0, 1920.0, 400, &mut no_minions);
    assert!(boss.is_active());
}

// ── PowerUp ───────────────────────────────────────────────────────────────────

#[test]
fn power_up_names_map_to_kinds() {
    assert_eq!(PowerUpKind::from_name("health"), PowerUpKind::Health);
    assert_eq!(PowerUpKind::from_name("speed"), PowerUpKind::RapidFire);
    assert_eq!(PowerUpKind::from_name("rapidfire"), PowerUpKind::RapidFire);
    assert_eq!(PowerUpKind::from_name("Laser"), PowerUpKind::LaserBeam);
    assert_eq!(PowerUpKind::from_name("freeze"), PowerUpKind::ForceField);
    assert_eq!(PowerUpKind::from_name("mystery"), PowerUpKind::Shield);
}

#[test]
fn health_power_up_has_no_duration() {
    let p = PowerUp::new(PowerUpKind::Health, 0.0, 0.0, 5000);
    assert_eq!(p.duration_ms(), 0);
    let s = PowerUp::new(PowerUpKind::Shield, 0.0, 0.0, 5000);
    assert_eq!(s.duration_ms(), 5000);
}

#[test]
fn power_up_falls_and_expires() {
    let mut p = PowerUp::new(PowerUpKind::Shield, 0.0, 0.0, 5000);
    p.update(1000.0, 1920.0);
    assert!((p.rect().y - POWER_UP_FALL_SPEED).abs() < 1e-3);
    assert_eq!(p.rect().w, POWER_UP_SIZE);
    p.update(20_000.0, 1920.0);
    assert!(!p.is_active());
}

// ── Explosion ─────────────────────────────────────────────────────────────────

#[test]
fn explosion_is_centred_and_times_out() {
    let mut e = Explosion::new(100.0, 100.0, 80.0, 80.0, 1000, 500);
    assert_eq!(e.rect().center(), (100.0, 100.0));
    assert!((e.progress(1250) - 0.5).abs() < 1e-6);
    e.update(1499);
    assert!(e.is_active());
    e.update(1500);
    assert!(!e.is_active());
}
