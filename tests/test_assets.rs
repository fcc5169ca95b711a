use std::sync::Arc;
use std::thread;
use std::time::Duration;

use temple_shooter::assets::*;
use temple_shooter::entities::PowerUpKind;

fn keyed() -> KeyedResources {
    KeyedResources::new()
        .with(AssetRole::Player, ImageHandle::new("ship", 100, 100))
        .with(AssetRole::Enemy, ImageHandle::new("enemy", 80, 80))
        .with_level(2, AssetRole::Enemy, ImageHandle::new("desert/enemy", 90, 70))
}

// ── Bundles ───────────────────────────────────────────────────────────────────

#[test]
fn placeholder_bundle_covers_every_role() {
    let bundle = AssetBundle::placeholder(1);
    for role in AssetRole::all() {
        assert!(bundle.sprite(role).is_placeholder(), "{:?}", role);
        assert_eq!(bundle.size(role), None);
    }
    assert_eq!(
        bundle.sprite(AssetRole::Background),
        Sprite::Placeholder {
            color: temple_shooter::render::Color::rgb(20, 40, 30),
            striped: true
        }
    );
}

#[test]
fn every_power_up_has_a_role() {
    let roles = AssetRole::all();
    for kind in PowerUpKind::ALL {
        assert!(roles.contains(&AssetRole::PowerUp(kind)));
    }
}

#[test]
fn missing_images_become_placeholders() {
    let bundle = AssetBundle::load(&keyed(), 1);
    assert_eq!(
        bundle.sprite(AssetRole::Player),
        Sprite::Image(ImageHandle::new("ship", 100, 100))
    );
    assert!(bundle.sprite(AssetRole::Boss).is_placeholder());
    assert_eq!(bundle.size(AssetRole::Enemy), Some((80.0, 80.0)));
}

#[test]
fn per_level_image_wins() {
    let bundle = AssetBundle::load(&keyed(), 2);
    assert_eq!(bundle.level(), 2);
    assert_eq!(bundle.size(AssetRole::Enemy), Some((90.0, 70.0)));
    assert_eq!(bundle.size(AssetRole::Player), Some((100.0, 100.0)));
}

#[test]
fn no_resources_is_all_placeholders() {
    let bundle = AssetBundle::load(&NoResources, 3);
    assert_eq!(bundle, AssetBundle::placeholder(3));
}

// ── Loader ────────────────────────────────────────────────────────────────────

#[test]
fn loader_delivers_once() {
    let mut loader = AssetLoader::new();
    assert!(!loader.is_loading());
    loader.start(Arc::new(keyed()), 2);
    assert!(loader.is_loading());

    let bundle = loader.wait().expect("bundle");
    assert_eq!(bundle.level(), 2);
    assert!(!loader.is_loading());
    assert!(loader.poll().is_none());
    assert!(loader.wait().is_none());
}

#[test]
fn loader_can_be_polled() {
    let mut loader = AssetLoader::new();
    loader.start(Arc::new(NoResources), 1);
    let mut got = None;
    for _ in 0..500 {
        if let Some(bundle) = loader.poll() {
            got = Some(bundle);
            break;
        }
        thread::sleep(Duration::from_millis(2));
    }
    assert_eq!(got.map(|b| b.level()), Some(1));
}

#[test]
fn restart_replaces_pending_load() {
    let mut loader = AssetLoader::new();
    loader.start(Arc::new(keyed()), 1);
    loader.start(Arc::new(keyed()), 2);
    assert_eq!(loader.wait().map(|b| b.level()), Some(2));
}
