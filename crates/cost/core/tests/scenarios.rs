use cost_core::{
    ConfigError, ConsumptionError, CostStrategy, CostStrategyError, Experience, Hunger, Item,
    Position, ResourceKind, ResourceState, StageConfig, StrategyConfig, Vec3,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde_json::json;

fn strategy(config: serde_json::Value) -> CostStrategy {
    let config: StrategyConfig = serde_json::from_value(config).expect("config should parse");
    CostStrategy::build(&config).expect("strategy should build")
}

fn origin() -> Vec3 {
    Vec3::new(0.0, 0.0, 0.0)
}

// ============================================================================
// End-to-end
// ============================================================================

/// Euclidean 50 blocks, linear cost with no base, paid in experience points.
#[test]
fn test_experience_teleport_end_to_end() {
    let strategy = strategy(json!({
        "distance": { "type": "euclidean" },
        "cost": { "type": "linear", "base": 0, "scale": 1 },
        "consumption": { "type": "experience", "rate": 1, "strategy": "points" },
    }));
    let resources = ResourceState::default().with_experience(100);
    let mut rng = StdRng::seed_from_u64(0);

    let charge = strategy
        .charge_with_rng(origin(), Vec3::new(30.0, 0.0, 40.0), &resources, &mut rng)
        .expect("100 points cover a 50 point move");

    assert_eq!(charge.quote.distance, 50.0);
    assert_eq!(charge.quote.cost, 50.0);
    assert_eq!(charge.commands, ["xp add @s -50 points"]);
    assert_eq!(charge.resources.experience, Experience::new(50));

    // The caller's snapshot is never touched.
    assert_eq!(resources.experience, Experience::new(100));
}

#[test]
fn test_evaluate_returns_only_commands() {
    let strategy = strategy(json!({
        "cost": { "type": "linear", "base": 0 },
        "consumption": { "type": "experience" },
    }));
    let resources = ResourceState::default().with_experience(10);

    let commands = strategy
        .evaluate(origin(), Vec3::new(0.0, 3.0, 4.0), &resources)
        .expect("5 points are available");
    assert_eq!(commands, ["xp add @s -5 points"]);
}

#[test]
fn test_zero_distance_emits_nothing() {
    let strategy = strategy(json!({
        "cost": { "type": "linear", "base": 0 },
        "consumption": { "type": "experience" },
    }));
    let commands = strategy
        .evaluate(origin(), origin(), &ResourceState::default())
        .expect("free move never fails");
    assert!(commands.is_empty());
}

// ============================================================================
// Failure semantics
// ============================================================================

#[test]
fn test_strict_and_lenient_item_payment() {
    let config = |check: &str| {
        json!({
            "distance": { "type": "fixed", "distance": 1000 },
            "cost": { "type": "linear", "base": 0 },
            "consumption": { "type": "items", "check_strategy": check, "items": { "A": 3 } },
        })
    };
    let resources = ResourceState::default().with_items(vec![Item::new("A", 1)]);
    let mut rng = StdRng::seed_from_u64(9);

    let err = strategy(config("strict"))
        .evaluate_with_rng(origin(), origin(), &resources, &mut rng)
        .expect_err("one item cannot pay 1000");
    let shortfall = err.as_insufficient().expect("shortfall error");
    assert_eq!(shortfall.resource, ResourceKind::Items);
    assert_eq!(shortfall.available, 3.0);
    assert_eq!(shortfall.required, 1000.0);
    assert_eq!(err.error_code(), "INSUFFICIENT_ITEMS");

    let commands = strategy(config("lenient"))
        .evaluate_with_rng(origin(), origin(), &resources, &mut rng)
        .expect("lenient never fails on shortfall");
    assert_eq!(commands, ["clear @s A 1"]);
}

#[test]
fn test_failed_call_leaks_nothing() {
    let strategy = strategy(json!({
        "distance": { "type": "fixed", "distance": 30 },
        "cost": { "type": "linear", "base": 0 },
        "consumption": {
            "type": "composite",
            "costs": [
                { "type": "health" },
                { "type": "experience" },
            ],
        },
    }));
    let resources = ResourceState::default().with_health(40.0).with_experience(5);
    let before = resources.clone();

    let result = strategy.evaluate(origin(), origin(), &resources);
    assert!(matches!(result, Err(ConsumptionError::Insufficient(_))));
    assert_eq!(resources, before);
}

#[test]
fn test_composite_propagates_unpaid_balance() {
    let strategy = strategy(json!({
        "distance": { "type": "fixed", "distance": 10 },
        "cost": { "type": "linear", "base": 0 },
        "consumption": {
            "type": "composite",
            "pass_strategy": "propagate",
            "costs": [
                { "type": "experience", "pass_strategy": "propagate", "check_strategy": "lenient" },
                { "type": "items", "items": { "minecraft:gold_nugget": 1 } },
            ],
        },
    }));
    let resources = ResourceState::default()
        .with_experience(4)
        .with_items(vec![Item::new("minecraft:gold_nugget", 9)]);
    let mut rng = StdRng::seed_from_u64(1);

    let charge = strategy
        .charge_with_rng(origin(), origin(), &resources, &mut rng)
        .expect("experience and nuggets cover 10");
    assert_eq!(
        charge.commands,
        ["xp add @s -4 points", "clear @s minecraft:gold_nugget 6"]
    );
    assert_eq!(charge.resources.count_of("minecraft:gold_nugget"), 3);
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_unknown_nested_tag_fails_at_build() {
    let config: StrategyConfig = serde_json::from_value(json!({
        "consumption": {
            "type": "composite",
            "costs": [{ "type": "composite", "costs": [{ "type": "karma" }] }],
        },
    }))
    .expect("config should parse");

    let err = CostStrategy::build(&config).expect_err("karma is not a consumption type");
    assert!(matches!(err, ConfigError::UnknownType { ref tag, .. } if tag == "karma"));
    assert_eq!(err.error_code(), "CONFIG_UNKNOWN_TYPE");
}

#[test]
fn test_cross_dimension_modes() {
    let nether = Position::new(Vec3::new(8.0, 0.0, 6.0), "minecraft:the_nether");
    let overworld = Position::from(origin());

    let added = strategy(json!({
        "distance": { "type": "euclidean", "cross_dimensional_cost": { "minecraft:the_nether": 5 } },
        "cost": { "type": "linear", "base": 0 },
    }));
    assert_eq!(added.quote(overworld.clone(), nether.clone()).distance, 10.0 + 5.0 + 35.0);

    let ignored = strategy(json!({
        "distance": { "type": "euclidean", "cross_dimension": "ignore" },
        "cost": { "type": "linear", "base": 0 },
    }));
    assert_eq!(ignored.quote(overworld.clone(), nether.clone()).distance, 10.0);
    assert_eq!(ignored.distance().surcharge(&overworld, &nether), 70.0);
}

#[test]
fn test_builder_and_document_agree() {
    let from_builder = CostStrategy::build(
        &StrategyConfig::default()
            .with_cost(StageConfig::new("exponential").with("base", 2).with("scale", 0.5))
            .with_consumption(StageConfig::new("experience").with("rate", 1.2)),
    )
    .expect("strategy should build");
    let from_document = strategy(json!({
        "distance": { "type": "euclidean" },
        "cost": { "type": "exponential", "base": 2.0, "scale": 0.5 },
        "consumption": { "type": "experience", "rate": 1.2 },
    }));
    assert_eq!(from_builder.quote(origin(), Vec3::new(4.0, 0.0, 0.0)).cost, 8.0);
    assert_eq!(
        from_builder.quote(origin(), Vec3::new(4.0, 0.0, 0.0)),
        from_document.quote(origin(), Vec3::new(4.0, 0.0, 0.0))
    );
}

// ============================================================================
// Resource model
// ============================================================================

#[test]
fn test_experience_level_round_trip() {
    for points in (0..20_000).step_by(7) {
        let level = Experience::new(points).to_level().level;
        assert!(Experience::from_level(level).points <= points);
        assert!(points < Experience::from_level(level + 1).points);
    }
}

#[test]
fn test_hunger_drain_round_trip() {
    let mut hunger = Hunger::new(20, 0.0, 0.0);
    assert_eq!(hunger.total(), 20.0);
    hunger.set_total(15.0);
    assert_eq!(hunger.level, 15);
    assert_eq!(hunger.saturation_level, 0.0);
}

#[test]
fn test_hunger_and_health_pipeline() {
    let strategy = strategy(json!({
        "distance": { "type": "manhattan" },
        "cost": { "type": "linear", "base": 0 },
        "consumption": {
            "type": "composite",
            "pass_strategy": "propagate",
            "costs": [
                { "type": "hunger", "pass_strategy": "propagate", "check_strategy": "lenient" },
                { "type": "health", "damage_type": "minecraft:magic" },
            ],
        },
    }));
    let resources = ResourceState::default()
        .with_hunger(Hunger::new(4, 0.0, 0.0))
        .with_health(20.0);
    let mut rng = StdRng::seed_from_u64(5);

    let charge = strategy
        .charge_with_rng(origin(), Vec3::new(3.0, 2.0, 1.0), &resources, &mut rng)
        .expect("health covers the rest");
    assert_eq!(charge.resources.hunger.total(), 0.0);
    assert_eq!(charge.resources.health, 18.0);
    assert_eq!(charge.commands.len(), 2);
    assert!(charge.commands[0].starts_with("effect give @s minecraft:hunger "));
    assert_eq!(charge.commands[1], "damage @s 2 minecraft:magic");
}
