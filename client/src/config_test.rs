use super::*;

fn blob(extra: &str) -> String {
    format!(r#"{{"game_id":"g1","user_id":"u7"{extra}}}"#)
}

#[test]
fn minimal_blob_uses_defaults() {
    let config = GameConfig::from_json(&blob("")).unwrap();
    assert_eq!(config.local_player, None);
    assert!(!config.timed);
    assert!(!config.zombie);
    assert_eq!(config.alphabet, "ABCDEFGHIJKLMNOPQRSTUVWXYZ");
    assert_eq!(config.log_level(), log::LevelFilter::Info);
}

#[test]
fn full_blob_round_trips_fields() {
    let config =
        GameConfig::from_json(&blob(r#","local_player":1,"timed":true,"zombie":true,"debug":true,"alphabet":"aábd""#))
            .unwrap();
    assert_eq!(config.local_player, Some(1));
    assert!(config.timed && config.zombie);
    assert_eq!(config.log_level(), log::LevelFilter::Debug);
    assert_eq!(config.engine_config(3).alphabet.letters(), &['A', 'Á', 'B', 'D']);
}

#[test]
fn rejects_bad_seat() {
    let err = GameConfig::from_json(&blob(r#","local_player":2"#)).unwrap_err();
    assert!(matches!(err, ClientError::Config(_)));
}

#[test]
fn rejects_empty_game_id() {
    let err = GameConfig::from_json(r#"{"game_id":"","user_id":"u"}"#).unwrap_err();
    assert!(matches!(err, ClientError::Config(_)));
}

#[test]
fn rejects_malformed_json() {
    assert!(matches!(GameConfig::from_json("{"), Err(ClientError::Decode(_))));
}

#[test]
fn game_channel_path() {
    assert_eq!(GameConfig::from_json(&blob("")).unwrap().game_channel(), "game/g1/u7");
}
