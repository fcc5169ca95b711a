use temple_shooter::config::PowerUpConfig;
use temple_shooter::entities::*;
use temple_shooter::level::LevelConfig;
use temple_shooter::power_ups::PowerUpManager;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn make_manager() -> PowerUpManager {
    PowerUpManager::new(PowerUpConfig::default(), 8)
}

fn always_drop(level: u32) -> LevelConfig {
    LevelConfig {
        power_up_drop_chance: 1.0,
        ..LevelConfig::builtin(level)
    }
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

// ── Configuration ─────────────────────────────────────────────────────────────

#[test]
fn level_one_allows_three_kinds() {
    let m = make_manager();
    assert_eq!(
        m.allowed(),
        &[PowerUpKind::Health, PowerUpKind::RapidFire, PowerUpKind::Shield]
    );
    assert_eq!(m.drop_chance(), 0.3);
}

#[test]
fn level_three_maps_laser_and_freeze() {
    let mut m = make_manager();
    m.configure(&LevelConfig::builtin(3));
    assert!(m.allowed().contains(&PowerUpKind::LaserBeam));
    assert!(m.allowed().contains(&PowerUpKind::ForceField));
    assert!(m.allowed().contains(&PowerUpKind::MultiShot));
}

#[test]
fn durations_follow_kind() {
    let m = make_manager();
    assert_eq!(m.duration_for(PowerUpKind::Health), 0);
    assert_eq!(m.duration_for(PowerUpKind::Shield), 5000);
    assert_eq!(m.duration_for(PowerUpKind::LaserBeam), 5000);
    assert_eq!(m.duration_for(PowerUpKind::EnergyShield), 10_000);
    assert_eq!(m.duration_for(PowerUpKind::ForceField), 15_000);
}

// ── Drops ─────────────────────────────────────────────────────────────────────

#[test]
fn certain_drop_is_centred_and_allowed() {
    let mut m = make_manager();
    let mut rng = seeded_rng();
    m.configure(&always_drop(1));
    let kind = m.try_spawn(300.0, 400.0, &mut rng).expect("drop");
    assert!(m.allowed().contains(&kind));
    assert_eq!(m.len(), 1);
    let p = &m.power_ups()[0];
    assert_eq!(p.kind(), kind);
    assert_eq!(p.rect().center(), (300.0, 400.0));
    assert_eq!(p.duration_ms(), m.duration_for(kind));
}

#[test]
fn zero_chance_never_drops() {
    let mut m = make_manager();
    let mut rng = seeded_rng();
    m.configure(&LevelConfig {
        power_up_drop_chance: 0.0,
        ..LevelConfig::builtin(1)
    });
    for _ in 0..100 {
        assert!(m.try_spawn(0.0, 0.0, &mut rng).is_none());
    }
    assert!(m.is_empty());
}

#[test]
fn drop_rate_roughly_matches_chance() {
    let mut m = PowerUpManager::new(PowerUpConfig::default(), usize::MAX);
    let mut rng = seeded_rng();
    let drops = (0..1000)
        .filter(|_| m.try_spawn(0.0, 0.0, &mut rng).is_some())
        .count();
    // 30% of 1000, with generous slack
    assert!((200..400).contains(&drops), "drops = {}", drops);
}

#[test]
fn soft_cap_limits_drops() {
    let mut m = PowerUpManager::new(PowerUpConfig::default(), 2);
    let mut rng = seeded_rng();
    m.configure(&always_drop(1));
    for _ in 0..5 {
        m.try_spawn(0.0, 0.0, &mut rng);
    }
    assert_eq!(m.len(), 2);
    assert!(m.try_spawn(0.0, 0.0, &mut rng).is_none());
}

#[test]
fn spawn_all_lays_out_every_kind() {
    let mut m = make_manager();
    m.spawn_all_for_testing(200.0, 200.0);
    assert_eq!(m.len(), PowerUpKind::ALL.len());
    for (p, kind) in m.power_ups().iter().zip(PowerUpKind::ALL) {
        assert_eq!(p.kind(), kind);
    }
    let first = m.power_ups()[0].rect();
    let second = m.power_ups()[1].rect();
    assert_eq!(second.x - first.x, 60.0);
}

// ── Movement ──────────────────────────────────────────────────────────────────

#[test]
fn update_drops_fallen_power_ups() {
    let mut m = make_manager();
    m.spawn(PowerUpKind::Shield, 100.0, 100.0);
    m.spawn(PowerUpKind::Health, 100.0, 1900.0);
    m.update(500.0, 1920.0);
    assert_eq!(m.len(), 1);
    assert_eq!(m.power_ups()[0].kind(), PowerUpKind::Shield);
    assert!((m.power_ups()[0].rect().y - 130.0).abs() < 1e-3);
}

#[test]
fn prune_removes_collected() {
    let mut m = make_manager();
    m.spawn(PowerUpKind::Shield, 100.0, 100.0);
    m.spawn(PowerUpKind::MultiShot, 300.0, 100.0);
    m.power_ups_mut()[0].deactivate();
    m.prune();
    assert_eq!(m.len(), 1);
    assert_eq!(m.power_ups()[0].kind(), PowerUpKind::MultiShot);
}
