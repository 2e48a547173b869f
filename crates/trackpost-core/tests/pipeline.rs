//! End-to-end pipeline properties, through the public API only.

use trackpost_core::{
    AttributeBag, AttributeValue, NormalizerConfig, PlaybackState, Rating, RawTransportState,
    StarScale, normalize,
};

fn parsed(doc: &str) -> serde_json::Value {
    serde_json::from_str(doc).unwrap()
}

#[test]
fn playing_session_produces_state_and_document() {
    let config = NormalizerConfig::default();

    let mut bag = AttributeBag::new();
    bag.insert("media.metadata.TITLE", AttributeValue::text("Song"));
    bag.insert("media.metadata.ARTIST", AttributeValue::text("Band"));
    bag.insert("media.metadata.DURATION", AttributeValue::number(125_000));
    bag.insert(
        "media.metadata.USER_RATING",
        AttributeValue::rating(Rating::Stars {
            scale: StarScale::Five,
            stars: 4.0,
        }),
    );

    let state = PlaybackState::from_transport(Some(RawTransportState::Playing));
    assert_eq!(state, Some(PlaybackState::Playing));

    let doc = normalize(&config, &bag);
    let json = parsed(doc.as_str());
    assert_eq!(json["title"], "Song");
    assert_eq!(json["artist"], "Band");
    assert_eq!(json["duration"], "125000");
    assert_eq!(json["duration_minsecs"], "02:05");
    assert_eq!(json["user_rating"], "4 / 5");
}

#[test]
fn output_is_deterministic_for_the_same_bag_order() {
    let config = NormalizerConfig::default();

    let mut bag = AttributeBag::new();
    bag.insert("xesam:album", AttributeValue::text("Greatest Hits"));
    bag.insert("xesam:title", AttributeValue::text("Just in my head"));
    bag.insert("mpris:length", AttributeValue::number(220_810));

    let first = normalize(&config, &bag);
    let second = normalize(&config, &bag);
    assert_eq!(first, second);
}

#[test]
fn buffering_never_reaches_the_bus_as_playing() {
    assert_eq!(
        PlaybackState::from_transport(Some(RawTransportState::Buffering)),
        None
    );
}

#[test]
fn tv_style_bag_with_epg_description() {
    let config = NormalizerConfig::default();

    let long_description = format!(
        "Fred finds himself stranded on a desert island with {}",
        "a can of beer and a banana. ".repeat(4)
    );
    let mut bag = AttributeBag::new();
    bag.insert(
        "media.metadata.TITLE",
        AttributeValue::text("Bon Voyage S1 Ep1"),
    );
    bag.insert(
        "media.metadata.SUBTITLE",
        AttributeValue::text("23 - No Drama Channel"),
    );
    bag.insert(
        "media.metadata.DESCRIPTION",
        AttributeValue::text(&long_description),
    );

    let json = parsed(normalize(&config, &bag).as_str());
    assert_eq!(json["title"], "Bon Voyage S1 Ep1");
    assert_eq!(json["subtitle"], "23 - No Drama Channel");

    let meta = json["meta_description"].as_str().unwrap();
    assert_eq!(meta.chars().count(), 80);
    assert!(meta.ends_with("..."));
    // the raw description attribute is still emitted in full
    assert_eq!(json["description"].as_str().unwrap(), long_description);
}

#[test]
fn binary_artwork_never_appears_in_the_document() {
    let config = NormalizerConfig::default();

    let mut bag = AttributeBag::new();
    bag.insert("media.metadata.TITLE", AttributeValue::text("Song"));
    bag.insert("media.metadata.ALBUM_ART", AttributeValue::image(vec![0u8; 4096]));

    let doc = normalize(&config, &bag);
    let json = parsed(doc.as_str());
    assert!(json.get("album_art").is_none());
    assert!(!doc.as_str().contains("album_art"));
}

#[test]
fn quotes_and_newlines_survive_a_parser_round_trip() {
    let config = NormalizerConfig::default();

    let mut bag = AttributeBag::new();
    bag.insert(
        "media.metadata.TITLE",
        AttributeValue::text("He said \"hi\"\nand left\\"),
    );
    bag.insert("media.metadata.ARTIST", AttributeValue::text("Band"));

    let json = parsed(normalize(&config, &bag).as_str());
    assert_eq!(json["title"], "He said \"hi\"\nand left\\");
}

#[test]
fn degenerate_bags_publish_the_placeholder() {
    let config = NormalizerConfig::default();

    let empty = AttributeBag::new();
    assert_eq!(normalize(&config, &empty).as_str(), "{\"title\":\"\"}");

    let mut stuck = AttributeBag::new();
    stuck.insert("mpris:trackid", AttributeValue::text("/org/mpris/track/1"));
    assert_eq!(normalize(&config, &stuck).as_str(), "{\"title\":\"\"}");
}
