use temple_shooter::config::BossConfig;
use temple_shooter::enemies::EnemyManager;
use temple_shooter::entities::*;
use temple_shooter::level::LevelConfig;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn make_manager() -> EnemyManager {
    EnemyManager::new(1080.0, 1920.0, BossConfig::default(), 1200, 400, 15)
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

// ── Regular spawning ──────────────────────────────────────────────────────────

#[test]
fn starts_with_level_one_tuning() {
    let m = make_manager();
    assert!(m.is_empty());
    assert_eq!(m.spawn_interval_ms(), 2000);
    assert_eq!(m.max_enemies(), 3);
    assert_eq!(m.enemy_health(), 1);
}

#[test]
fn first_spawn_waits_one_interval() {
    let mut m = make_manager();
    let mut rng = seeded_rng();
    m.update(16.0, 0, 1.0, 1, &mut rng);
    assert!(m.is_empty());
    m.update(16.0, 1999, 1.0, 1, &mut rng);
    assert!(m.is_empty());
    m.update(16.0, 2000, 1.0, 1, &mut rng);
    assert_eq!(m.len(), 1);

    let e = &m.enemies()[0];
    assert_eq!(e.kind(), EnemyKind::Basic);
    assert_eq!(e.rect().y, -100.0);
    assert_eq!(e.speed(), 150.0);
    assert!(e.rect().x >= 0.0 && e.rect().x < 980.0);
}

#[test]
fn respects_max_enemies() {
    let mut m = make_manager();
    let mut rng = seeded_rng();
    for i in 0..10u64 {
        m.update(16.0, i * 2000, 1.0, 1, &mut rng);
    }
    assert_eq!(m.len(), 3);
}

#[test]
fn respects_soft_cap() {
    let mut m = EnemyManager::new(1080.0, 1920.0, BossConfig::default(), 1200, 400, 2);
    let mut rng = seeded_rng();
    for i in 0..10u64 {
        m.update(16.0, i * 2000, 1.0, 1, &mut rng);
    }
    assert_eq!(m.len(), 2);
}

#[test]
fn level_two_spawns_zigzags() {
    let mut m = make_manager();
    let mut rng = seeded_rng();
    m.configure(&LevelConfig::builtin(2));
    m.update(16.0, 0, 1.0, 2, &mut rng);
    m.update(16.0, 1500, 1.0, 2, &mut rng);
    assert_eq!(m.len(), 1);
    let e = &m.enemies()[0];
    assert_eq!(e.kind(), EnemyKind::ZigZag);
    assert_eq!(e.health(), 2);
    assert_eq!(e.speed(), 200.0);
}

#[test]
fn empty_roster_uses_level_default() {
    let mut m = make_manager();
    let mut rng = seeded_rng();
    m.configure(&LevelConfig {
        enemy_roster: Vec::new(),
        ..LevelConfig::builtin(2)
    });
    m.update(16.0, 0, 1.0, 2, &mut rng);
    m.update(16.0, 1500, 1.0, 2, &mut rng);
    assert_eq!(m.enemies()[0].kind(), EnemyKind::ZigZag);
}

#[test]
fn speed_multiplier_scales_movement() {
    let mut m = make_manager();
    let mut rng = seeded_rng();
    m.push(Enemy::with_motion(
        EnemyKind::Basic,
        100.0,
        100.0,
        50.0,
        50.0,
        Motion::Bounce { vx: 0.0 },
    ));
    m.update(100.0, 0, 0.0, 1, &mut rng);
    assert_eq!(m.enemies()[0].rect().y, 100.0);
    m.update(100.0, 100, 1.0, 1, &mut rng);
    assert!((m.enemies()[0].rect().y - 120.0).abs() < 1e-3);
}

#[test]
fn dead_enemies_are_dropped_after_delay() {
    let mut m = make_manager();
    let mut rng = seeded_rng();
    m.push(Enemy::with_motion(
        EnemyKind::Basic,
        100.0,
        100.0,
        50.0,
        50.0,
        Motion::Bounce { vx: 0.0 },
    ));
    m.enemies_mut()[0].take_damage(1, 0);
    m.update(16.0, 100, 1.0, 1, &mut rng);
    assert_eq!(m.len(), 1);
    m.update(16.0, 400, 1.0, 1, &mut rng);
    assert!(m.is_empty());
}

// ── Boss level ────────────────────────────────────────────────────────────────

#[test]
fn boss_spawns_once_on_level_three() {
    let mut m = make_manager();
    let mut rng = seeded_rng();
    m.configure(&LevelConfig::builtin(3));
    m.update(16.0, 0, 1.0, 3, &mut rng);
    assert!(m.boss_spawned());
    assert_eq!(m.boss_count(), 1);

    let boss = &m.enemies()[0];
    assert_eq!(boss.health(), 30);
    assert_eq!((boss.rect().w, boss.rect().h), (200.0, 200.0));
    assert_eq!(boss.rect().x, 440.0);

    for i in 1..20u64 {
        m.update(16.0, i * 16, 1.0, 3, &mut rng);
    }
    assert_eq!(m.boss_count(), 1);
}

#[test]
fn boss_health_has_a_floor() {
    let mut m = make_manager();
    let mut rng = seeded_rng();
    m.configure(&LevelConfig {
        enemy_health: 0,
        ..LevelConfig::builtin(3)
    });
    m.update(16.0, 0, 1.0, 3, &mut rng);
    assert_eq!(m.enemies()[0].health(), 10);
}

#[test]
fn near_top_minions_join_the_boss() {
    let mut m = make_manager();
    let mut rng = seeded_rng();
    m.configure(&LevelConfig::builtin(3));
    m.update(16.0, 0, 1.0, 3, &mut rng);
    m.update(16.0, 1000, 1.0, 3, &mut rng);
    assert_eq!(m.len(), 2);

    let minion = m
        .enemies()
        .iter()
        .find(|e| e.kind() != EnemyKind::Boss)
        .expect("minion spawned");
    assert_eq!(minion.rect().y, -80.0);
    assert_eq!(minion.speed(), 280.0);
    assert_eq!(minion.health(), 2);
}

#[test]
fn boss_level_cap_allows_extra_minions() {
    let mut m = make_manager();
    let mut rng = seeded_rng();
    m.configure(&LevelConfig::builtin(3));
    for i in 0..30u64 {
        m.update(16.0, i * 1000, 1.0, 3, &mut rng);
    }
    // max_enemies (7) + extra_minions (2), boss included. The boss is still
    // descending at these step sizes, so it has not called any minions yet.
    assert_eq!(m.len(), 9);
}

#[test]
fn sprite_size_scales_boss() {
    let mut m = make_manager();
    m.set_enemy_sprite_size(Some((80.0, 60.0)));
    assert_eq!(m.boss_size(), (240.0, 180.0));
    m.set_enemy_sprite_size(None);
    assert_eq!(m.boss_size(), (200.0, 200.0));
}

#[test]
fn clear_allows_a_new_boss() {
    let mut m = make_manager();
    let mut rng = seeded_rng();
    m.configure(&LevelConfig::builtin(3));
    m.update(16.0, 0, 1.0, 3, &mut rng);
    m.clear();
    assert!(m.is_empty());
    assert!(!m.boss_spawned());
    m.update(16.0, 16, 1.0, 3, &mut rng);
    assert_eq!(m.boss_count(), 1);
}
