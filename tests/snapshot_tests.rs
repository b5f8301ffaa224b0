use battle_assistant::config::AnalyzerConfig;
use battle_assistant::model::{Creature, StrategyKind};
use battle_assistant::snapshot::{
    load_battle, load_party, parse_battle, parse_party, roster_from_party,
};
use battle_assistant::{ElementalType, MatchupAnalyzer};
use std::path::PathBuf;

fn demos_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos")
}

#[test]
fn demo_snapshot_recommends_switching_to_tyranitar() {
    let party = load_party(&demos_dir().join("party.json")).expect("party parses");
    let roster = roster_from_party(&party).expect("party is valid");
    let snapshot = load_battle(&demos_dir().join("battle.json")).expect("battle parses");
    let matchup = snapshot
        .matchup(&roster)
        .expect("battle is valid")
        .expect("battle is active");
    assert_eq!(matchup.player.slot, 0);

    let out = MatchupAnalyzer::default().analyze(&matchup.player, &matchup.opponent, &roster);
    assert_eq!(out.len(), 3);
    assert_eq!(out[0].kind, StrategyKind::Safe);
    assert_eq!(out[0].title, "Troque para Tyranitar!");
    // Hypnosis is a status move Gengar knows
    assert_eq!(out[2].title, "Use Hypnosis");
}

#[test]
fn locale_decimals_in_payload_are_accepted() {
    let text = r#"{"status":"no_battle","error":null,"health":18,5}"#;
    let snapshot = parse_battle(text).expect("commas are repaired");
    assert!(!snapshot.is_active());
}

#[test]
fn active_creature_is_not_its_own_switch_when_hp_differs_between_polls() {
    let party = parse_party(
        r#"[{"species": "Jolteon", "level": 50, "hp": 120, "max_hp": 120, "types": ["electric"],
             "moves": [{"name": "Thunderbolt", "type": "electric", "category": "special"}]}]"#,
    )
    .expect("party parses");
    let roster = roster_from_party(&party).expect("party is valid");
    let snapshot = parse_battle(
        r#"{"status": "active", "actors": [
            {"name": "Me", "side": "SideA", "pokemon": [
                {"species": "Jolteon", "level": 50, "hp": 119, "max_hp": 120, "types": ["electric"],
                 "moves": [{"name": "Thunderbolt", "type": "electric", "category": "special"}]}]},
            {"name": "Rival", "side": "SideB", "pokemon": [
                {"species": "Gyarados", "level": 50, "hp": 150, "max_hp": 150,
                 "types": ["water", "flying"]}]}
        ]}"#,
    )
    .expect("battle parses");
    let matchup = snapshot.matchup(&roster).expect("battle is valid").expect("battle is active");
    assert_eq!(matchup.player.slot, 0);

    let out = MatchupAnalyzer::default().analyze(&matchup.player, &matchup.opponent, &roster);
    assert_eq!(out[0].title, "Jogue com Calma");
    assert!(out.iter().all(|s| !s.title.contains("Jolteon")));
}

#[test]
fn locale_decimal_hp_reaches_the_analyzer() {
    let party = parse_party(
        r#"[{"species":"Pikachu","level":5,"hp":10,5,"max_hp":40,0,"types":["electric"]}]"#,
    )
    .expect("locale decimals are repaired");
    let roster = roster_from_party(&party).expect("party is valid");
    assert_eq!(roster[0].current_hp, 10);
    assert_eq!(roster[0].max_hp, 40);
    let gyarados = Creature::new(9, "Gyarados", &[ElementalType::Water]);
    let out = MatchupAnalyzer::default().analyze(&roster[0], &gyarados, &roster);
    // 10 of 40 is under the critical fraction
    assert_eq!(out[2].title, "Tudo ou Nada");
}

#[test]
fn config_file_missing_is_an_error_with_the_path() {
    let err = AnalyzerConfig::load(&demos_dir().join("missing.json")).unwrap_err();
    assert!(format!("{err:#}").contains("missing.json"));
}
